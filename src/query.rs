//! Query construction and evaluation
//!
//! [`VideoQuery`] is an explicit constraint structure: each supported
//! attribute can carry either an exact value or a two-sided range whose ends
//! may be the infinity sentinels. Compilation validates every constraint
//! against the attribute's kind up front and produces a [`Predicate`], the
//! form the record-store boundary understands. [`QueryEngine`] runs the
//! predicate against an injected store and assembles a [`RecordSet`].
//!
//! Range semantics:
//! - `(lo, hi)` with both ends finite: `lo <= a <= hi` (inclusive)
//! - `(-inf, hi)`: `a < hi` (strict)
//! - `(lo, +inf)`: `a > lo` (strict)
//! - `(-inf, +inf)`: attribute present, value unconstrained

use crate::record::{AttrValue, Attribute, AttributeError, AttributeKind, RecordSet, Video};
use crate::store::{RecordStore, StoreError};
use indexmap::IndexMap;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum QueryError {
    #[error(transparent)]
    InvalidAttribute(#[from] AttributeError),

    #[error("constraint on '{attribute}' expects a {expected} value, got {got}")]
    TypeMismatch {
        attribute: Attribute,
        expected: &'static str,
        got: &'static str,
    },

    #[error(transparent)]
    StoreUnavailable(#[from] StoreError),
}

pub type QueryResult<T> = Result<T, QueryError>;

/// A single attribute constraint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Constraint {
    /// Type-sensitive equality with the attribute's value.
    Exact(AttrValue),
    /// Two-sided numeric bound; either end may be infinite (see module docs).
    Range { lo: f64, hi: f64 },
}

/// A query over the record store: an optional id plus per-attribute
/// constraints. Attributes without a constraint are not filtered on.
#[derive(Debug, Clone, Default, Serialize)]
pub struct VideoQuery {
    id: Option<String>,
    constraints: IndexMap<Attribute, Constraint>,
}

impl VideoQuery {
    /// An empty query matches every record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Require an exact video id.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Require the attribute to equal `value` exactly.
    pub fn exact(mut self, attribute: Attribute, value: impl Into<AttrValue>) -> Self {
        self.constraints.insert(attribute, Constraint::Exact(value.into()));
        self
    }

    /// Require the attribute to fall within `(lo, hi)`. Use
    /// `f64::NEG_INFINITY` / `f64::INFINITY` for one-sided strict bounds.
    pub fn between(mut self, attribute: Attribute, lo: f64, hi: f64) -> Self {
        self.constraints.insert(attribute, Constraint::Range { lo, hi });
        self
    }

    pub fn is_unconstrained(&self) -> bool {
        self.id.is_none() && self.constraints.is_empty()
    }

    /// Validate every constraint against its attribute's kind and produce
    /// the compiled predicate handed to the record store.
    pub fn compile(&self) -> QueryResult<Predicate> {
        let mut clauses = Vec::with_capacity(self.constraints.len() + 1);

        if let Some(id) = &self.id {
            clauses.push(Clause::IdEquals(id.clone()));
        }

        for (&attribute, constraint) in &self.constraints {
            match constraint {
                Constraint::Exact(value) => {
                    let expected = match attribute.kind() {
                        AttributeKind::Categorical => "text",
                        AttributeKind::Numeric => match attribute {
                            Attribute::Rate => "float",
                            _ => "integer",
                        },
                    };
                    if value.type_name() != expected {
                        return Err(QueryError::TypeMismatch {
                            attribute,
                            expected,
                            got: value.type_name(),
                        });
                    }
                    clauses.push(Clause::Exact(attribute, value.clone()));
                }
                Constraint::Range { lo, hi } => {
                    if attribute.kind() != AttributeKind::Numeric {
                        return Err(QueryError::TypeMismatch {
                            attribute,
                            expected: "text",
                            got: "range",
                        });
                    }
                    clauses.push(Clause::Range {
                        attribute,
                        lo: *lo,
                        hi: *hi,
                    });
                }
            }
        }

        Ok(Predicate { clauses })
    }
}

/// A compiled, validated query: the conjunction of its clauses.
///
/// This is the form submitted to the [`RecordStore`] boundary; stores that
/// filter in-process evaluate it via [`Predicate::matches`].
#[derive(Debug, Clone)]
pub struct Predicate {
    clauses: Vec<Clause>,
}

#[derive(Debug, Clone)]
enum Clause {
    IdEquals(String),
    Exact(Attribute, AttrValue),
    Range { attribute: Attribute, lo: f64, hi: f64 },
}

impl Predicate {
    /// True when the record satisfies every clause.
    pub fn matches(&self, video: &Video) -> bool {
        self.clauses.iter().all(|clause| clause.matches(video))
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }
}

impl Clause {
    fn matches(&self, video: &Video) -> bool {
        match self {
            Clause::IdEquals(id) => video.id == *id,
            Clause::Exact(attribute, value) => video.value(*attribute) == *value,
            Clause::Range { attribute, lo, hi } => {
                // Compilation guarantees the attribute is numeric.
                let Some(v) = video.numeric(*attribute) else {
                    return false;
                };
                match (lo.is_finite(), hi.is_finite()) {
                    (true, true) => *lo <= v && v <= *hi,
                    (false, true) => v < *hi,
                    (true, false) => v > *lo,
                    // Both sentinels: present and unconstrained.
                    (false, false) => true,
                }
            }
        }
    }
}

/// Runs compiled queries against an injected record store.
#[derive(Debug, Default)]
pub struct QueryEngine;

impl QueryEngine {
    pub fn new() -> Self {
        Self
    }

    /// Compile `query`, evaluate it against `store`, and collect the result
    /// into a [`RecordSet`]. Given a static store, identical queries return
    /// identical record sets.
    pub fn find(&self, store: &dyn RecordStore, query: &VideoQuery) -> QueryResult<RecordSet> {
        let predicate = query.compile()?;
        let videos = store.find(&predicate)?;
        tracing::debug!(
            clauses = predicate.clauses.len(),
            matched = videos.len(),
            "query evaluated"
        );
        Ok(RecordSet::from_videos(videos))
    }
}
