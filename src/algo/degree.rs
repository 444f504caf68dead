//! Degree distribution statistics
//!
//! Reduces the total, in, and out degree sequences of a frozen graph to
//! mean/min/max. Invariant worth remembering when reading the numbers:
//! the in-degrees and the out-degrees each sum to the edge count.

use super::{AlgoError, AlgoResult};
use crate::graph::VideoGraph;
use rayon::prelude::*;
use serde::Serialize;
use std::fmt;

/// Mean, minimum, and maximum of one degree sequence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DegreeStats {
    pub avg: f64,
    pub min: usize,
    pub max: usize,
}

/// Degree statistics for a graph: total, incoming, and outgoing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DegreeSummary {
    pub total: DegreeStats,
    pub incoming: DegreeStats,
    pub outgoing: DegreeStats,
}

/// Compute degree statistics for `graph`.
///
/// Fails with [`AlgoError::EmptyGraph`] on a zero-node graph, where the
/// reductions are undefined.
pub fn degree_summary(graph: &VideoGraph) -> AlgoResult<DegreeSummary> {
    if graph.is_empty() {
        return Err(AlgoError::EmptyGraph);
    }

    Ok(DegreeSummary {
        total: reduce(graph, |g, i| g.degree(i)),
        incoming: reduce(graph, |g, i| g.in_degree(i)),
        outgoing: reduce(graph, |g, i| g.out_degree(i)),
    })
}

fn reduce(graph: &VideoGraph, degree_of: impl Fn(&VideoGraph, usize) -> usize + Sync) -> DegreeStats {
    let n = graph.node_count();
    let (sum, min, max) = (0..n)
        .into_par_iter()
        .map(|i| degree_of(graph, i))
        .fold(
            || (0usize, usize::MAX, 0usize),
            |(sum, min, max), d| (sum + d, min.min(d), max.max(d)),
        )
        .reduce(
            || (0usize, usize::MAX, 0usize),
            |a, b| (a.0 + b.0, a.1.min(b.1), a.2.max(b.2)),
        );

    DegreeStats {
        avg: sum as f64 / n as f64,
        min,
        max,
    }
}

impl fmt::Display for DegreeSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Average Degree: {}", self.total.avg)?;
        writeln!(f, "Minimum Degree: {}", self.total.min)?;
        writeln!(f, "Maximum Degree: {}", self.total.max)?;
        writeln!(f)?;
        writeln!(f, "Average In-Degree: {}", self.incoming.avg)?;
        writeln!(f, "Minimum In-Degree: {}", self.incoming.min)?;
        writeln!(f, "Maximum In-Degree: {}", self.incoming.max)?;
        writeln!(f)?;
        writeln!(f, "Average Out-Degree: {}", self.outgoing.avg)?;
        writeln!(f, "Minimum Out-Degree: {}", self.outgoing.min)?;
        write!(f, "Maximum Out-Degree: {}", self.outgoing.max)
    }
}
