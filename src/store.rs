//! Record store boundary
//!
//! The analytics core never talks to a database directly: it submits a
//! compiled [`Predicate`] to a [`RecordStore`] collaborator injected by the
//! caller and receives matching records back in store order. [`MemoryStore`]
//! is the in-process implementation used by the driver and the tests.

use crate::query::Predicate;
use crate::record::Video;
use thiserror::Error;

/// Errors surfaced by a record store implementation.
///
/// The core performs no retries; retry/backoff policy belongs to the store.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("record store unavailable: {0}")]
    Unavailable(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// A queryable store of video records.
///
/// Implementations must return records in a stable order so that repeated
/// identical queries over a static store are idempotent.
pub trait RecordStore {
    /// Return every record matching `predicate`, in store order.
    fn find(&self, predicate: &Predicate) -> StoreResult<Vec<Video>>;
}

/// In-memory record store. Insertion order is store order.
#[derive(Debug, Default)]
pub struct MemoryStore {
    videos: Vec<Video>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, video: Video) {
        self.videos.push(video);
    }

    pub fn extend(&mut self, videos: impl IntoIterator<Item = Video>) {
        self.videos.extend(videos);
    }

    pub fn len(&self) -> usize {
        self.videos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.videos.is_empty()
    }
}

impl RecordStore for MemoryStore {
    fn find(&self, predicate: &Predicate) -> StoreResult<Vec<Video>> {
        Ok(self
            .videos
            .iter()
            .filter(|v| predicate.matches(v))
            .cloned()
            .collect())
    }
}
