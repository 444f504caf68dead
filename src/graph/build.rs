//! Graph construction from record sets
//!
//! Ids are interned to dense indices at build time; the frozen graph stores
//! adjacency as index vectors, which is what the degree and PageRank passes
//! iterate over. Insertion order is preserved: node index order follows the
//! input record sequence, and order-sensitive consumers (top-k tie-breaking)
//! rely on that.

use crate::record::RecordSet;
use rustc_hash::{FxHashMap, FxHashSet};

/// A frozen directed graph over video ids.
///
/// No mutators are exposed: the only way to obtain one is through
/// [`GraphBuilder`], so any analysis holding a `&VideoGraph` can assume the
/// topology never changes underneath it.
#[derive(Debug, Clone)]
pub struct VideoGraph {
    ids: Vec<String>,
    index: FxHashMap<String, usize>,
    outgoing: Vec<Vec<usize>>,
    incoming: Vec<Vec<usize>>,
    edge_count: usize,
}

impl VideoGraph {
    pub fn node_count(&self) -> usize {
        self.ids.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// The id at a dense node index. Indices are `0..node_count()`.
    pub fn node_id(&self, idx: usize) -> &str {
        &self.ids[idx]
    }

    /// Node ids in first-seen insertion order.
    pub fn node_ids(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn contains_edge(&self, from: &str, to: &str) -> bool {
        match (self.index_of(from), self.index_of(to)) {
            (Some(u), Some(v)) => self.outgoing[u].contains(&v),
            _ => false,
        }
    }

    /// Successor indices of the node at `idx`.
    pub fn successors(&self, idx: usize) -> &[usize] {
        &self.outgoing[idx]
    }

    /// Predecessor indices of the node at `idx`.
    pub fn predecessors(&self, idx: usize) -> &[usize] {
        &self.incoming[idx]
    }

    pub fn out_degree(&self, idx: usize) -> usize {
        self.outgoing[idx].len()
    }

    pub fn in_degree(&self, idx: usize) -> usize {
        self.incoming[idx].len()
    }

    pub fn degree(&self, idx: usize) -> usize {
        self.out_degree(idx) + self.in_degree(idx)
    }
}

/// Builds a [`VideoGraph`] from records, then freezes it.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    ids: Vec<String>,
    index: FxHashMap<String, usize>,
    outgoing: Vec<Vec<usize>>,
    incoming: Vec<Vec<usize>>,
    // Simple-graph discipline: re-adding an edge is a no-op.
    seen_edges: FxHashSet<(usize, usize)>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the related-video graph for `records`.
    ///
    /// Without a universe, an edge `record.id -> related_id` is added for
    /// every related reference, creating either endpoint as needed. A record
    /// with no outgoing references only appears as a node if some other
    /// record points to it; the unrestricted graph reflects exactly the
    /// edges observed, not the full record population.
    ///
    /// With a universe, every record id becomes a node unconditionally and
    /// an edge is added only when `related_id` is a universe member. Passing
    /// the record set itself as the universe yields the closed subgraph over
    /// that population.
    pub fn build(records: &RecordSet, universe: Option<&RecordSet>) -> VideoGraph {
        let mut builder = GraphBuilder::new();

        match universe {
            None => {
                for video in records {
                    for related in &video.related_ids {
                        builder.add_edge(&video.id, related);
                    }
                }
            }
            Some(universe) => {
                for video in records {
                    builder.add_node(&video.id);
                    for related in &video.related_ids {
                        if universe.contains(related) {
                            builder.add_edge(&video.id, related);
                        }
                    }
                }
            }
        }

        builder.finish()
    }

    /// Intern an id, creating the node on first sight.
    pub fn add_node(&mut self, id: &str) -> usize {
        if let Some(&idx) = self.index.get(id) {
            return idx;
        }
        let idx = self.ids.len();
        self.ids.push(id.to_string());
        self.index.insert(id.to_string(), idx);
        self.outgoing.push(Vec::new());
        self.incoming.push(Vec::new());
        idx
    }

    /// Add a directed edge, creating endpoints as needed. Duplicate edges
    /// are ignored; self-loops are kept.
    pub fn add_edge(&mut self, from: &str, to: &str) {
        let u = self.add_node(from);
        let v = self.add_node(to);
        if !self.seen_edges.insert((u, v)) {
            return;
        }
        self.outgoing[u].push(v);
        self.incoming[v].push(u);
    }

    /// Freeze into the immutable graph.
    pub fn finish(self) -> VideoGraph {
        let graph = VideoGraph {
            ids: self.ids,
            index: self.index,
            outgoing: self.outgoing,
            incoming: self.incoming,
            edge_count: self.seen_edges.len(),
        };
        tracing::debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "graph frozen"
        );
        graph
    }
}
