//! Dataset ingestion
//!
//! Parses the crawled tab-separated format: nine scalar fields (id,
//! uploader, age, category, length, views, rate, ratings, comments) followed
//! by any number of related-video ids. Lines with fewer than nine fields or
//! unparseable numbers are skipped; the skip count is logged once per read.

use crate::record::Video;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("failed to read dataset: {0}")]
    Io(#[from] io::Error),
}

pub type IngestResult<T> = Result<T, IngestError>;

/// Parse one dataset line; `None` when the line is malformed.
pub fn parse_line(line: &str) -> Option<Video> {
    let parts: Vec<&str> = line.trim_end_matches(['\r', '\n']).split('\t').collect();
    if parts.len() < 9 {
        return None;
    }

    Some(Video {
        id: parts[0].to_string(),
        uploader: parts[1].to_string(),
        age: parts[2].parse().ok()?,
        category: parts[3].to_string(),
        length: parts[4].parse().ok()?,
        views: parts[5].parse().ok()?,
        rate: parts[6].parse().ok()?,
        ratings: parts[7].parse().ok()?,
        comments: parts[8].parse().ok()?,
        related_ids: parts[9..].iter().map(|s| s.to_string()).collect(),
    })
}

/// Read every record from a dataset stream, skipping malformed lines.
pub fn read_dataset<R: BufRead>(reader: R) -> IngestResult<Vec<Video>> {
    let mut videos = Vec::new();
    let mut skipped = 0usize;

    for line in reader.lines() {
        let line = line?;
        if line.is_empty() {
            continue;
        }
        match parse_line(&line) {
            Some(video) => videos.push(video),
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        tracing::warn!(skipped, "skipped malformed dataset lines");
    }
    tracing::info!(records = videos.len(), "dataset read");
    Ok(videos)
}

/// Read a dataset file from disk.
pub fn load_file(path: impl AsRef<Path>) -> IngestResult<Vec<Video>> {
    let file = File::open(path)?;
    read_dataset(BufReader::new(file))
}
