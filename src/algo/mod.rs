//! Graph analyses over a frozen [`VideoGraph`](crate::graph::VideoGraph)
//!
//! Both passes are pure reads; the graph never changes during an analysis,
//! so the per-node work is parallelized with rayon.

pub mod degree;
pub mod pagerank;

pub use degree::{degree_summary, DegreeStats, DegreeSummary};
pub use pagerank::{
    page_rank, page_rank_with_cancel, top_k, top_k_records, CancelToken, PageRankConfig,
    PageRankScores, RankedVideo,
};

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AlgoError {
    /// Degree statistics and PageRank are undefined on a zero-node graph.
    #[error("graph has no nodes")]
    EmptyGraph,
}

pub type AlgoResult<T> = Result<T, AlgoError>;
