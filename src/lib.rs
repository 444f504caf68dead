//! Vidnet Video Network Analytics
//!
//! Analyzes a corpus of video records: filtered attribute queries, frequency
//! distributions, the directed graph induced by related-video links, degree
//! statistics over that graph, and a PageRank influence ranking.
//!
//! # Architecture
//!
//! - `record`: immutable video records, record sets, the closed attribute
//!   enumeration
//! - `store`: the record-store collaborator boundary plus an in-memory
//!   implementation
//! - `ingest`: tab-separated dataset parsing
//! - `query`: constraint construction, up-front validation, predicate
//!   evaluation through the store
//! - `graph`: build-then-freeze directed graph, GEXF interchange export
//! - `algo`: degree statistics and PageRank over the frozen graph
//! - `stats`: categorical and bucketed numeric frequency tables
//! - `report`: comparison scatter assembly for the external renderer
//!
//! Analyses treat the graph as read-only after construction, which is what
//! allows the degree and PageRank passes to parallelize their per-node work.
//!
//! ## Example Usage
//!
//! ```rust
//! use vidnet::graph::GraphBuilder;
//! use vidnet::algo::{degree_summary, page_rank, top_k, PageRankConfig};
//! use vidnet::record::{RecordSet, Video};
//!
//! let records = RecordSet::from_videos(vec![
//!     Video {
//!         id: "a".into(), uploader: "u".into(), age: 10,
//!         category: "Music".into(), length: 60, views: 1000,
//!         rate: 4.5, ratings: 50, comments: 3,
//!         related_ids: vec!["b".into()],
//!     },
//!     Video {
//!         id: "b".into(), uploader: "u".into(), age: 12,
//!         category: "Music".into(), length: 90, views: 2000,
//!         rate: 4.0, ratings: 80, comments: 7,
//!         related_ids: vec!["a".into()],
//!     },
//! ]);
//!
//! // Closed subgraph over the record population.
//! let graph = GraphBuilder::build(&records, Some(&records));
//! assert_eq!(graph.node_count(), 2);
//!
//! let summary = degree_summary(&graph).unwrap();
//! assert_eq!(summary.outgoing.max, 1);
//!
//! let scores = page_rank(&graph, &PageRankConfig::default()).unwrap();
//! let top = top_k(&graph, &scores, 1);
//! assert_eq!(top.len(), 1);
//! ```

#![warn(clippy::all)]

pub mod algo;
pub mod graph;
pub mod ingest;
pub mod query;
pub mod record;
pub mod report;
pub mod stats;
pub mod store;

// Re-export main types for convenience
pub use record::{AttrValue, Attribute, AttributeError, AttributeKind, RecordSet, Video};

pub use query::{Constraint, Predicate, QueryEngine, QueryError, QueryResult, VideoQuery};

pub use store::{MemoryStore, RecordStore, StoreError, StoreResult};

pub use graph::{save_gexf, write_gexf, GraphBuilder, VideoGraph};

pub use algo::{
    degree_summary, page_rank, page_rank_with_cancel, top_k, top_k_records, AlgoError,
    AlgoResult, CancelToken, DegreeStats, DegreeSummary, PageRankConfig, PageRankScores,
    RankedVideo,
};

pub use stats::{attribute_samples, bucketize, FrequencyTable, StatsError, StatsResult};

pub use report::{comparison_report, ComparisonReport, ScatterPoint, ScatterSeries};

pub use ingest::{load_file, parse_line, read_dataset, IngestError, IngestResult};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}
