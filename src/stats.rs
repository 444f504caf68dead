//! Frequency tables over record attributes
//!
//! Categorical attributes are counted by distinct value, in first-seen
//! order. Numeric attributes are bucketed against a caller-supplied
//! ascending boundary list `b0 < b1 < ... < bn-1` into half-open intervals
//! `[b0,b1), [b1,b2), ...` plus the open-ended tail `[bn-1, inf)`. Empty
//! buckets are still reported so the caller's structure survives into the
//! output. Labels are `[lo-hi]` and `[lo-inf]`.

use crate::record::{AttrValue, Attribute, AttributeError, AttributeKind, RecordSet};
use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StatsError {
    #[error(transparent)]
    InvalidAttribute(#[from] AttributeError),

    #[error("numeric attribute '{0}' requires bucket boundaries")]
    MissingBuckets(Attribute),

    #[error("bucket boundaries must be strictly ascending")]
    UnsortedBuckets,

    #[error("attribute '{0}' is categorical; bucketize it instead of sampling")]
    NotNumeric(Attribute),
}

pub type StatsResult<T> = Result<T, StatsError>;

/// Bucket-label to count mapping, in bucket order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FrequencyTable {
    counts: IndexMap<String, u64>,
}

impl FrequencyTable {
    /// (label, count) pairs in insertion order; for numeric tables that is
    /// boundary order, for categorical tables first-seen value order.
    pub fn counts(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(label, &count)| (label.as_str(), count))
    }

    pub fn get(&self, label: &str) -> u64 {
        self.counts.get(label).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    fn init(&mut self, label: String) {
        self.counts.entry(label).or_insert(0);
    }

    fn bump(&mut self, label: &str) {
        if let Some(count) = self.counts.get_mut(label) {
            *count += 1;
        } else {
            self.counts.insert(label.to_string(), 1);
        }
    }
}

impl fmt::Display for FrequencyTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (label, count)) in self.counts.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}: {}", label, count)?;
        }
        Ok(())
    }
}

/// Count record frequencies by attribute value.
///
/// Categorical attributes ignore `boundaries`; numeric attributes require
/// them and fail with [`StatsError::MissingBuckets`] otherwise. Values below
/// the first boundary fall outside every bucket and are not counted, exactly
/// as the bucket intervals describe.
pub fn bucketize(
    records: &RecordSet,
    attribute: Attribute,
    boundaries: Option<&[f64]>,
) -> StatsResult<FrequencyTable> {
    match attribute.kind() {
        AttributeKind::Categorical => {
            let mut table = FrequencyTable::default();
            for video in records {
                if let AttrValue::Text(value) = video.value(attribute) {
                    table.bump(&value);
                }
            }
            Ok(table)
        }
        AttributeKind::Numeric => {
            let bounds = boundaries.ok_or(StatsError::MissingBuckets(attribute))?;
            if bounds.is_empty() {
                return Err(StatsError::MissingBuckets(attribute));
            }
            if !bounds.windows(2).all(|w| w[0] < w[1]) {
                return Err(StatsError::UnsortedBuckets);
            }

            let mut table = FrequencyTable::default();
            for i in 0..bounds.len() {
                table.init(bucket_label(bounds, i));
            }

            for video in records {
                // Numeric kind guarantees a numeric value.
                let Some(v) = video.numeric(attribute) else {
                    continue;
                };
                if let Some(i) = bucket_for(bounds, v) {
                    table.bump(&bucket_label(bounds, i));
                }
            }
            Ok(table)
        }
    }
}

/// Raw numeric samples of an attribute, in record order, for the external
/// continuous-histogram renderer.
pub fn attribute_samples(records: &RecordSet, attribute: Attribute) -> StatsResult<Vec<f64>> {
    if attribute.kind() != AttributeKind::Numeric {
        return Err(StatsError::NotNumeric(attribute));
    }
    Ok(records.iter().filter_map(|v| v.numeric(attribute)).collect())
}

fn bucket_label(bounds: &[f64], i: usize) -> String {
    if i == bounds.len() - 1 {
        format!("[{}-inf]", bounds[i])
    } else {
        format!("[{}-{}]", bounds[i], bounds[i + 1])
    }
}

/// Index of the bucket holding `v`: the first `[b_i, b_i+1)` containing it,
/// or the open-ended tail for `v >= b_last`. `None` below the first boundary.
fn bucket_for(bounds: &[f64], v: f64) -> Option<usize> {
    let last = bounds.len() - 1;
    if v >= bounds[last] {
        return Some(last);
    }
    (0..last).find(|&i| bounds[i] <= v && v < bounds[i + 1])
}
