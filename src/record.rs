//! Video record data model
//!
//! A [`Video`] is an immutable snapshot of one crawled video: eight scalar
//! attributes plus the ordered list of related-video ids. [`RecordSet`] is an
//! ordered collection of videos with a derived id lookup (last write wins on
//! duplicate ids). The [`Attribute`] enum is the closed set of queryable
//! attributes, each tagged categorical or numeric.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error for attribute names arriving from outside the type system
/// (CLI arguments, config files).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AttributeError {
    #[error("unknown attribute '{0}'")]
    Unknown(String),
}

/// How an attribute's values are aggregated and compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeKind {
    /// Distinct string values, counted exactly.
    Categorical,
    /// Scalar values, bucketed by caller-supplied boundaries.
    Numeric,
}

/// The queryable attributes of a video record.
///
/// This is a closed enumeration: an unrecognized attribute name is rejected
/// at the string boundary ([`Attribute::from_str`]) instead of being checked
/// against hardcoded name lists deep inside each analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Attribute {
    Uploader,
    Category,
    Age,
    Length,
    Views,
    Rate,
    Ratings,
    Comments,
}

impl Attribute {
    /// All attributes, in record-field order.
    pub const ALL: [Attribute; 8] = [
        Attribute::Uploader,
        Attribute::Category,
        Attribute::Age,
        Attribute::Length,
        Attribute::Views,
        Attribute::Rate,
        Attribute::Ratings,
        Attribute::Comments,
    ];

    pub fn kind(&self) -> AttributeKind {
        match self {
            Attribute::Uploader | Attribute::Category => AttributeKind::Categorical,
            _ => AttributeKind::Numeric,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Attribute::Uploader => "uploader",
            Attribute::Category => "category",
            Attribute::Age => "age",
            Attribute::Length => "length",
            Attribute::Views => "views",
            Attribute::Rate => "rate",
            Attribute::Ratings => "ratings",
            Attribute::Comments => "comments",
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Attribute {
    type Err = AttributeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Attribute::ALL
            .iter()
            .find(|a| a.name() == s)
            .copied()
            .ok_or_else(|| AttributeError::Unknown(s.to_string()))
    }
}

/// A typed attribute value, used for exact-match constraints and generic
/// attribute access.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AttrValue {
    Text(String),
    Int(i64),
    Float(f64),
}

impl AttrValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            AttrValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric view of the value, if it has one.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            AttrValue::Int(i) => Some(*i as f64),
            AttrValue::Float(f) => Some(*f),
            AttrValue::Text(_) => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            AttrValue::Text(_) => "text",
            AttrValue::Int(_) => "integer",
            AttrValue::Float(_) => "float",
        }
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Text(s) => write!(f, "\"{}\"", s),
            AttrValue::Int(i) => write!(f, "{}", i),
            AttrValue::Float(fl) => write!(f, "{}", fl),
        }
    }
}

impl From<&str> for AttrValue {
    fn from(s: &str) -> Self {
        AttrValue::Text(s.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(s: String) -> Self {
        AttrValue::Text(s)
    }
}

impl From<i64> for AttrValue {
    fn from(i: i64) -> Self {
        AttrValue::Int(i)
    }
}

impl From<u64> for AttrValue {
    fn from(i: u64) -> Self {
        AttrValue::Int(i as i64)
    }
}

impl From<f64> for AttrValue {
    fn from(f: f64) -> Self {
        AttrValue::Float(f)
    }
}

/// One video record. Created by ingestion, never mutated by the analyses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Video {
    /// Unique video id.
    pub id: String,
    pub uploader: String,
    /// Days since upload.
    pub age: i64,
    pub category: String,
    /// Duration in seconds.
    pub length: i64,
    pub views: u64,
    pub rate: f64,
    pub ratings: u64,
    pub comments: u64,
    /// Ids of related videos, in crawl order. May be empty, may contain
    /// duplicates, and may reference ids absent from the record set.
    pub related_ids: Vec<String>,
}

impl Video {
    /// Generic attribute access for the query and bucketing layers.
    pub fn value(&self, attr: Attribute) -> AttrValue {
        match attr {
            Attribute::Uploader => AttrValue::Text(self.uploader.clone()),
            Attribute::Category => AttrValue::Text(self.category.clone()),
            Attribute::Age => AttrValue::Int(self.age),
            Attribute::Length => AttrValue::Int(self.length),
            Attribute::Views => AttrValue::Int(self.views as i64),
            Attribute::Rate => AttrValue::Float(self.rate),
            Attribute::Ratings => AttrValue::Int(self.ratings as i64),
            Attribute::Comments => AttrValue::Int(self.comments as i64),
        }
    }

    /// Numeric view of a numeric attribute; `None` for categorical ones.
    pub fn numeric(&self, attr: Attribute) -> Option<f64> {
        self.value(attr).as_number()
    }
}

/// An ordered collection of videos with a derived id index.
///
/// The sequence keeps every record in insertion order (including duplicate
/// ids); the id index keeps exactly one entry per id, the last one inserted.
/// Identity lookups go through the index, enumeration and counts through the
/// sequence.
#[derive(Debug, Clone, Default)]
pub struct RecordSet {
    videos: Vec<Video>,
    by_id: HashMap<String, usize>,
}

impl RecordSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_videos(videos: Vec<Video>) -> Self {
        let mut set = Self::new();
        for video in videos {
            set.push(video);
        }
        set
    }

    pub fn push(&mut self, video: Video) {
        // Last write wins in the id index.
        self.by_id.insert(video.id.clone(), self.videos.len());
        self.videos.push(video);
    }

    pub fn len(&self) -> usize {
        self.videos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.videos.is_empty()
    }

    /// Look up a record by id (last inserted wins on duplicates).
    pub fn get(&self, id: &str) -> Option<&Video> {
        self.by_id.get(id).map(|&idx| &self.videos[idx])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Video> {
        self.videos.iter()
    }

    pub fn videos(&self) -> &[Video] {
        &self.videos
    }
}

impl FromIterator<Video> for RecordSet {
    fn from_iter<T: IntoIterator<Item = Video>>(iter: T) -> Self {
        let mut set = Self::new();
        for video in iter {
            set.push(video);
        }
        set
    }
}

impl<'a> IntoIterator for &'a RecordSet {
    type Item = &'a Video;
    type IntoIter = std::slice::Iter<'a, Video>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn video(id: &str, related: &[&str]) -> Video {
        Video {
            id: id.to_string(),
            uploader: "u".to_string(),
            age: 100,
            category: "Music".to_string(),
            length: 60,
            views: 1000,
            rate: 4.5,
            ratings: 10,
            comments: 2,
            related_ids: related.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_attribute_parse() {
        assert_eq!("views".parse::<Attribute>().unwrap(), Attribute::Views);
        assert_eq!("uploader".parse::<Attribute>().unwrap(), Attribute::Uploader);
        let err = "viewz".parse::<Attribute>().unwrap_err();
        assert_eq!(err, AttributeError::Unknown("viewz".to_string()));
    }

    #[test]
    fn test_attribute_kinds() {
        assert_eq!(Attribute::Category.kind(), AttributeKind::Categorical);
        assert_eq!(Attribute::Rate.kind(), AttributeKind::Numeric);
        assert_eq!(Attribute::Views.kind(), AttributeKind::Numeric);
    }

    #[test]
    fn test_video_value_access() {
        let v = video("a", &[]);
        assert_eq!(v.value(Attribute::Category), AttrValue::Text("Music".into()));
        assert_eq!(v.numeric(Attribute::Views), Some(1000.0));
        assert_eq!(v.numeric(Attribute::Rate), Some(4.5));
        assert_eq!(v.numeric(Attribute::Uploader), None);
    }

    #[test]
    fn test_record_set_last_write_wins() {
        let mut a = video("dup", &[]);
        a.views = 1;
        let mut b = video("dup", &[]);
        b.views = 2;

        let set = RecordSet::from_videos(vec![a, b]);
        // Sequence keeps both, index keeps the last.
        assert_eq!(set.len(), 2);
        assert_eq!(set.get("dup").unwrap().views, 2);
    }

    #[test]
    fn test_record_set_lookup() {
        let set = RecordSet::from_videos(vec![video("a", &[]), video("b", &[])]);
        assert!(set.contains("a"));
        assert!(!set.contains("c"));
        assert_eq!(set.get("b").unwrap().id, "b");
    }
}
