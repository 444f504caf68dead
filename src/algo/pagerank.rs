//! PageRank influence ranking
//!
//! Power iteration over the frozen graph. Each outgoing edge of `u` carries
//! weight `1/out_degree(u)`; nodes with no outgoing edges ("dangling")
//! redistribute their mass uniformly over all nodes each iteration, so the
//! score vector keeps summing to 1 instead of leaking into rank sinks.
//!
//! Update rule per node `v`:
//!
//! ```text
//! score'(v) = (1-d)/N + d * (sum over u->v of score(u)/outdeg(u) + dangling/N)
//! ```
//!
//! Iteration stops when the L1 change drops below the tolerance or the
//! iteration cap is hit; hitting the cap is not an error, the last vector is
//! returned with `converged = false`. A [`CancelToken`] is checked between
//! iterations and likewise yields the best vector computed so far.

use super::{AlgoError, AlgoResult};
use crate::graph::VideoGraph;
use crate::record::{RecordSet, Video};
use rayon::prelude::*;
use serde::Serialize;
use std::cmp::Ordering;
use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};
use std::sync::Arc;

/// PageRank configuration.
#[derive(Debug, Clone)]
pub struct PageRankConfig {
    /// Damping factor, in (0, 1).
    pub damping: f64,
    /// L1 convergence threshold between successive score vectors.
    pub tolerance: f64,
    /// Iteration cap; exceeding it returns the last vector as approximate.
    pub max_iterations: usize,
}

impl Default for PageRankConfig {
    fn default() -> Self {
        Self {
            damping: 0.85,
            tolerance: 1e-8,
            max_iterations: 100,
        }
    }
}

/// Cooperative cancellation signal for long-running rankings, checked
/// between iterations.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, AtomicOrdering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(AtomicOrdering::Relaxed)
    }
}

/// The full score vector, index-aligned with the graph's node order.
#[derive(Debug, Clone, Serialize)]
pub struct PageRankScores {
    values: Vec<f64>,
    /// Iterations actually run.
    pub iterations: usize,
    /// False when the iteration cap was hit or the run was cancelled;
    /// the scores are then a documented approximation.
    pub converged: bool,
}

impl PageRankScores {
    /// Score of the node at a dense graph index.
    pub fn score(&self, idx: usize) -> f64 {
        self.values[idx]
    }

    /// Score of a node by id.
    pub fn get(&self, graph: &VideoGraph, id: &str) -> Option<f64> {
        graph.index_of(id).map(|idx| self.values[idx])
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Sum over the whole vector; ~1.0 for any run on a non-empty graph.
    pub fn total(&self) -> f64 {
        self.values.iter().sum()
    }
}

/// One ranked entry of a top-k result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedVideo {
    pub id: String,
    pub score: f64,
}

/// Rank `graph` with the standard (never-cancelled) token.
pub fn page_rank(graph: &VideoGraph, config: &PageRankConfig) -> AlgoResult<PageRankScores> {
    page_rank_with_cancel(graph, config, &CancelToken::new())
}

/// Rank `graph`, checking `cancel` between iterations.
///
/// Fails with [`AlgoError::EmptyGraph`] on a zero-node graph. Cancellation
/// is not an error: the scores computed so far come back with
/// `converged = false`.
pub fn page_rank_with_cancel(
    graph: &VideoGraph,
    config: &PageRankConfig,
    cancel: &CancelToken,
) -> AlgoResult<PageRankScores> {
    let n = graph.node_count();
    if n == 0 {
        return Err(AlgoError::EmptyGraph);
    }
    let n_f = n as f64;
    let d = config.damping;
    let base = (1.0 - d) / n_f;

    // Uniform start so the vector sums to 1 from the first iteration.
    let mut scores = vec![1.0 / n_f; n];
    let mut next = vec![0.0; n];
    let mut iterations = 0;
    let mut converged = false;

    while iterations < config.max_iterations {
        if cancel.is_cancelled() {
            tracing::debug!(iterations, "pagerank cancelled");
            break;
        }

        // Mass parked on dangling nodes, redistributed uniformly.
        let dangling: f64 = (0..n)
            .into_par_iter()
            .filter(|&i| graph.out_degree(i) == 0)
            .map(|i| scores[i])
            .sum();
        let dangling_share = dangling / n_f;

        next.par_iter_mut().enumerate().for_each(|(v, slot)| {
            let incoming: f64 = graph
                .predecessors(v)
                .iter()
                .map(|&u| scores[u] / graph.out_degree(u) as f64)
                .sum();
            *slot = base + d * (incoming + dangling_share);
        });

        let diff: f64 = scores
            .par_iter()
            .zip(next.par_iter())
            .map(|(a, b)| (a - b).abs())
            .sum();

        std::mem::swap(&mut scores, &mut next);
        iterations += 1;

        if diff < config.tolerance {
            converged = true;
            break;
        }
    }

    tracing::debug!(iterations, converged, "pagerank finished");
    Ok(PageRankScores {
        values: scores,
        iterations,
        converged,
    })
}

/// The `k` highest-scoring nodes, descending by score.
///
/// Ties break by first-seen insertion order in the graph (stable sort over
/// the node enumeration), so the output is deterministic. `k` is clamped to
/// the node count.
pub fn top_k(graph: &VideoGraph, scores: &PageRankScores, k: usize) -> Vec<RankedVideo> {
    let mut order: Vec<usize> = (0..graph.node_count()).collect();
    order.sort_by(|&a, &b| {
        scores
            .score(b)
            .partial_cmp(&scores.score(a))
            .unwrap_or(Ordering::Equal)
    });
    order.truncate(k.min(graph.node_count()));

    order
        .into_iter()
        .map(|idx| RankedVideo {
            id: graph.node_id(idx).to_string(),
            score: scores.score(idx),
        })
        .collect()
}

/// [`top_k`] joined against a universe of records. Ids the universe does not
/// know come back with `None` detail ("data unavailable" is the caller's
/// rendering concern, not an error).
pub fn top_k_records<'u>(
    graph: &VideoGraph,
    scores: &PageRankScores,
    k: usize,
    universe: &'u RecordSet,
) -> Vec<(RankedVideo, Option<&'u Video>)> {
    top_k(graph, scores, k)
        .into_iter()
        .map(|ranked| {
            let detail = universe.get(&ranked.id);
            (ranked, detail)
        })
        .collect()
}
