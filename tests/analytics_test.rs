//! End-to-end checks over the public API: ingest -> store -> query ->
//! graph -> degree/PageRank -> tables and report.

use vidnet::algo::{degree_summary, page_rank, top_k, top_k_records, PageRankConfig};
use vidnet::graph::GraphBuilder;
use vidnet::query::{QueryEngine, VideoQuery};
use vidnet::record::{Attribute, RecordSet, Video};
use vidnet::report::comparison_report;
use vidnet::stats::bucketize;
use vidnet::store::MemoryStore;

fn video(id: &str, category: &str, views: u64, ratings: u64, related: &[&str]) -> Video {
    Video {
        id: id.to_string(),
        uploader: format!("uploader-{id}"),
        age: 500,
        category: category.to_string(),
        length: 120,
        views,
        rate: 4.0,
        ratings,
        comments: 10,
        related_ids: related.iter().map(|s| s.to_string()).collect(),
    }
}

fn corpus() -> MemoryStore {
    let mut store = MemoryStore::new();
    store.insert(video("music-hit", "Music", 150_000, 5_000, &["music-b", "viral"]));
    store.insert(video("music-b", "Music", 50_000, 200, &["music-hit"]));
    store.insert(video("viral", "Comedy", 2_000_000, 15_000, &["music-hit", "viral-2"]));
    store.insert(video("viral-2", "Comedy", 1_200_000, 450, &["viral"]));
    store.insert(video("quiet", "Comedy", 300, 50, &[]));
    store
}

#[test]
fn test_range_query_includes_and_excludes() {
    let store = corpus();
    let engine = QueryEngine::new();

    let found = engine
        .find(
            &store,
            &VideoQuery::new()
                .between(Attribute::Views, 100_000.0, f64::INFINITY)
                .between(Attribute::Ratings, 1_000.0, 20_000.0),
        )
        .unwrap();

    // views=150000, ratings=5000 qualifies; views=50000 does not.
    assert!(found.contains("music-hit"));
    assert!(!found.contains("music-b"));
}

#[test]
fn test_bucketize_example_from_ratings() {
    let records = RecordSet::from_videos(vec![
        video("a", "Music", 0, 50, &[]),
        video("b", "Music", 0, 450, &[]),
        video("c", "Music", 0, 1000, &[]),
        video("d", "Music", 0, 2000, &[]),
    ]);

    let table = bucketize(&records, Attribute::Ratings, Some(&[0.0, 100.0, 500.0, 1000.0])).unwrap();
    assert_eq!(table.get("[0-100]"), 1);
    assert_eq!(table.get("[100-500]"), 1);
    assert_eq!(table.get("[500-1000]"), 1);
    assert_eq!(table.get("[1000-inf]"), 1);
    assert_eq!(table.total(), records.len() as u64);
}

#[test]
fn test_million_view_subnetwork() {
    let store = corpus();
    let engine = QueryEngine::new();

    let million = engine
        .find(
            &store,
            &VideoQuery::new().between(Attribute::Views, 1_000_000.0, f64::INFINITY),
        )
        .unwrap();
    assert_eq!(million.len(), 2);

    // Closed subgraph: one node per record, edges only within the set.
    let graph = GraphBuilder::build(&million, Some(&million));
    assert_eq!(graph.node_count(), million.len());
    assert!(graph.contains_edge("viral", "viral-2"));
    assert!(!graph.contains_node("music-hit"));

    let summary = degree_summary(&graph).unwrap();
    assert_eq!(summary.outgoing.max, 1);

    let n = graph.node_count();
    let in_sum: usize = (0..n).map(|i| graph.in_degree(i)).sum();
    let out_sum: usize = (0..n).map(|i| graph.out_degree(i)).sum();
    assert_eq!(in_sum, graph.edge_count());
    assert_eq!(out_sum, graph.edge_count());
}

#[test]
fn test_pagerank_over_full_graph_with_dangling_references() {
    let store = corpus();
    let engine = QueryEngine::new();
    let all = engine.find(&store, &VideoQuery::new()).unwrap();

    // Unrestricted: related ids without records become nodes too.
    let graph = GraphBuilder::build(&all, None);
    assert!(graph.contains_node("viral-2"));
    // "quiet" has no references either way and stays out.
    assert!(!graph.contains_node("quiet"));

    let scores = page_rank(&graph, &PageRankConfig::default()).unwrap();
    assert!((scores.total() - 1.0).abs() < 1e-6);

    // Every ranked id resolves through the universe or reports no detail.
    let ranked = top_k_records(&graph, &scores, graph.node_count(), &all);
    assert_eq!(ranked.len(), graph.node_count());
    for (entry, detail) in &ranked {
        match detail {
            Some(v) => assert_eq!(v.id, entry.id),
            None => assert!(!all.contains(&entry.id)),
        }
    }
}

#[test]
fn test_top_k_deterministic_on_score_ties() {
    let mut builder = GraphBuilder::new();
    // Two symmetric pairs produce tied scores; insertion order decides.
    builder.add_edge("p1", "p2");
    builder.add_edge("p2", "p1");
    builder.add_edge("q1", "q2");
    builder.add_edge("q2", "q1");
    let graph = builder.finish();

    let scores = page_rank(&graph, &PageRankConfig::default()).unwrap();
    let top = top_k(&graph, &scores, 2);
    let ids: Vec<&str> = top.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["p1", "p2"]);
}

#[test]
fn test_comparison_report_composition() {
    let store = corpus();
    let engine = QueryEngine::new();
    let all = engine.find(&store, &VideoQuery::new()).unwrap();

    let report = comparison_report(&all, 3, &PageRankConfig::default()).unwrap();

    assert_eq!(report.most_viewed.points[0].label, "viral");
    assert_eq!(report.highest_rated.points[0].label, "viral");
    assert_eq!(report.most_viewed.points.len(), 3);
    assert!(!report.most_influential.points.is_empty());

    // Renderer hand-off is plain JSON.
    let json = serde_json::to_string(&report).unwrap();
    assert!(json.contains("most_influential"));
}

#[test]
fn test_ingest_to_analysis_pipeline() {
    let data = "\
v1\tup1\t100\tMusic\t200\t1500000\t4.5\t1200\t30\tv2\tv3
v2\tup2\t90\tMusic\t180\t2500000\t4.0\t900\t10\tv1
broken\tline
v3\tup3\t80\tComedy\t60\t500\t2.0\t5\t0
";
    let videos = vidnet::ingest::read_dataset(std::io::Cursor::new(data)).unwrap();
    assert_eq!(videos.len(), 3);

    let mut store = MemoryStore::new();
    store.extend(videos);

    let engine = QueryEngine::new();
    let million = engine
        .find(
            &store,
            &VideoQuery::new().between(Attribute::Views, 1_000_000.0, f64::INFINITY),
        )
        .unwrap();
    assert_eq!(million.len(), 2);

    let graph = GraphBuilder::build(&million, Some(&million));
    assert_eq!(graph.node_count(), 2);
    assert!(graph.contains_edge("v1", "v2"));
    // v3 is below the cutoff, so the restricted build drops that edge.
    assert!(!graph.contains_node("v3"));
}
