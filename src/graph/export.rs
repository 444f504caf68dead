//! GEXF graph interchange
//!
//! Writes a [`VideoGraph`] as a GEXF 1.2 document for external
//! graph-visualization tools. When a universe is supplied, nodes whose ids
//! resolve to a record carry uploader/category/views/rate attribute values;
//! nodes without a record (from unrestricted-mode builds) are written bare.

use super::build::VideoGraph;
use crate::record::RecordSet;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Write `graph` as GEXF to `out`.
pub fn write_gexf<W: Write>(
    graph: &VideoGraph,
    universe: Option<&RecordSet>,
    out: &mut W,
) -> io::Result<()> {
    writeln!(out, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
    writeln!(
        out,
        r#"<gexf xmlns="http://www.gexf.net/1.2draft" version="1.2">"#
    )?;
    writeln!(out, r#"  <graph defaultedgetype="directed">"#)?;

    writeln!(out, r#"    <attributes class="node">"#)?;
    writeln!(out, r#"      <attribute id="0" title="uploader" type="string"/>"#)?;
    writeln!(out, r#"      <attribute id="1" title="category" type="string"/>"#)?;
    writeln!(out, r#"      <attribute id="2" title="views" type="long"/>"#)?;
    writeln!(out, r#"      <attribute id="3" title="rate" type="double"/>"#)?;
    writeln!(out, r#"    </attributes>"#)?;

    writeln!(out, "    <nodes>")?;
    for id in graph.node_ids() {
        let escaped = xml_escape(id);
        match universe.and_then(|u| u.get(id)) {
            Some(video) => {
                writeln!(out, r#"      <node id="{escaped}" label="{escaped}">"#)?;
                writeln!(out, "        <attvalues>")?;
                writeln!(
                    out,
                    r#"          <attvalue for="0" value="{}"/>"#,
                    xml_escape(&video.uploader)
                )?;
                writeln!(
                    out,
                    r#"          <attvalue for="1" value="{}"/>"#,
                    xml_escape(&video.category)
                )?;
                writeln!(out, r#"          <attvalue for="2" value="{}"/>"#, video.views)?;
                writeln!(out, r#"          <attvalue for="3" value="{}"/>"#, video.rate)?;
                writeln!(out, "        </attvalues>")?;
                writeln!(out, "      </node>")?;
            }
            None => {
                writeln!(out, r#"      <node id="{escaped}" label="{escaped}"/>"#)?;
            }
        }
    }
    writeln!(out, "    </nodes>")?;

    writeln!(out, "    <edges>")?;
    let mut edge_id = 0usize;
    for u in 0..graph.node_count() {
        let source = xml_escape(graph.node_id(u));
        for &v in graph.successors(u) {
            writeln!(
                out,
                r#"      <edge id="{edge_id}" source="{source}" target="{}"/>"#,
                xml_escape(graph.node_id(v))
            )?;
            edge_id += 1;
        }
    }
    writeln!(out, "    </edges>")?;

    writeln!(out, "  </graph>")?;
    writeln!(out, "</gexf>")?;
    Ok(())
}

/// Write `graph` as GEXF to a file at `path`.
pub fn save_gexf(
    graph: &VideoGraph,
    universe: Option<&RecordSet>,
    path: impl AsRef<Path>,
) -> io::Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_gexf(graph, universe, &mut writer)?;
    writer.flush()
}

fn xml_escape(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphBuilder;
    use crate::record::Video;

    fn video(id: &str, related: &[&str]) -> Video {
        Video {
            id: id.to_string(),
            uploader: "up<loader>".to_string(),
            age: 1,
            category: "R&B".to_string(),
            length: 60,
            views: 42,
            rate: 4.5,
            ratings: 10,
            comments: 0,
            related_ids: related.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_gexf_structure() {
        let records = RecordSet::from_videos(vec![video("a", &["b"]), video("b", &[])]);
        let graph = GraphBuilder::build(&records, Some(&records));

        let mut buf = Vec::new();
        write_gexf(&graph, Some(&records), &mut buf).unwrap();
        let doc = String::from_utf8(buf).unwrap();

        assert!(doc.contains(r#"defaultedgetype="directed""#));
        assert!(doc.contains(r#"<node id="a" label="a">"#));
        assert!(doc.contains(r#"<edge id="0" source="a" target="b"/>"#));
        // Metadata escaped, not mangled.
        assert!(doc.contains("up&lt;loader&gt;"));
        assert!(doc.contains("R&amp;B"));
    }

    #[test]
    fn test_gexf_nodes_without_records_are_bare() {
        let records = RecordSet::from_videos(vec![video("a", &["ghost"])]);
        let graph = GraphBuilder::build(&records, None);

        let mut buf = Vec::new();
        write_gexf(&graph, Some(&records), &mut buf).unwrap();
        let doc = String::from_utf8(buf).unwrap();

        assert!(doc.contains(r#"<node id="ghost" label="ghost"/>"#));
    }
}
