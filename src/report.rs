//! Comparison report assembly
//!
//! Composes three ranked views of one record set for the external plotting
//! collaborator: top-k by views, top-k by ratings, and top-k by PageRank over
//! the closed subgraph of the set. Each entry is a (ratings, views, label)
//! scatter point; the series are renderer-agnostic and serialize to JSON.
//! No analysis logic lives here beyond composition.

use crate::algo::{page_rank, top_k, AlgoResult, PageRankConfig};
use crate::graph::GraphBuilder;
use crate::record::{RecordSet, Video};
use serde::Serialize;

/// One point of a comparison scatter: ratings on x, views on y.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub ratings: u64,
    pub views: u64,
    /// Video id, for hover labels.
    pub label: String,
}

impl ScatterPoint {
    fn from_video(video: &Video) -> Self {
        Self {
            ratings: video.ratings,
            views: video.views,
            label: video.id.clone(),
        }
    }
}

/// A named series of scatter points.
#[derive(Debug, Clone, Serialize)]
pub struct ScatterSeries {
    pub name: &'static str,
    pub points: Vec<ScatterPoint>,
}

/// The three series of the comparison scatter.
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonReport {
    pub most_influential: ScatterSeries,
    pub most_viewed: ScatterSeries,
    pub highest_rated: ScatterSeries,
}

/// Assemble the comparison report for `records`.
///
/// The influence series ranks the closed subgraph of `records` (edges only
/// between members) and keeps the ranked ids that resolve to a record; ids
/// without a record carry no ratings/views and cannot be plotted.
pub fn comparison_report(
    records: &RecordSet,
    k: usize,
    config: &PageRankConfig,
) -> AlgoResult<ComparisonReport> {
    let graph = GraphBuilder::build(records, Some(records));
    let scores = page_rank(&graph, config)?;

    let most_influential = top_k(&graph, &scores, k)
        .into_iter()
        .filter_map(|ranked| records.get(&ranked.id).map(ScatterPoint::from_video))
        .collect();

    let mut by_views: Vec<&Video> = records.iter().collect();
    by_views.sort_by(|a, b| b.views.cmp(&a.views));
    let most_viewed = by_views
        .iter()
        .take(k)
        .map(|v| ScatterPoint::from_video(v))
        .collect();

    let mut by_ratings: Vec<&Video> = records.iter().collect();
    by_ratings.sort_by(|a, b| b.ratings.cmp(&a.ratings));
    let highest_rated = by_ratings
        .iter()
        .take(k)
        .map(|v| ScatterPoint::from_video(v))
        .collect();

    Ok(ComparisonReport {
        most_influential: ScatterSeries {
            name: "most_influential",
            points: most_influential,
        },
        most_viewed: ScatterSeries {
            name: "most_viewed",
            points: most_viewed,
        },
        highest_rated: ScatterSeries {
            name: "highest_rated",
            points: highest_rated,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algo::AlgoError;

    fn video(id: &str, views: u64, ratings: u64, related: &[&str]) -> Video {
        Video {
            id: id.to_string(),
            uploader: "u".to_string(),
            age: 10,
            category: "Music".to_string(),
            length: 60,
            views,
            rate: 4.0,
            ratings,
            comments: 0,
            related_ids: related.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_report_series() {
        // "hub" is pointed at by everyone, so it tops the influence series.
        let records = RecordSet::from_videos(vec![
            video("hub", 10, 5, &[]),
            video("big", 1000, 1, &["hub"]),
            video("rated", 20, 900, &["hub"]),
        ]);

        let report = comparison_report(&records, 2, &PageRankConfig::default()).unwrap();

        assert_eq!(report.most_influential.points[0].label, "hub");
        assert_eq!(report.most_viewed.points[0].label, "big");
        assert_eq!(report.highest_rated.points[0].label, "rated");
        assert_eq!(report.most_viewed.points.len(), 2);
    }

    #[test]
    fn test_report_on_empty_set_is_empty_graph_error() {
        let records = RecordSet::new();
        let err = comparison_report(&records, 3, &PageRankConfig::default()).unwrap_err();
        assert_eq!(err, AlgoError::EmptyGraph);
    }

    #[test]
    fn test_report_serializes() {
        let records = RecordSet::from_videos(vec![video("a", 1, 1, &[])]);
        let report = comparison_report(&records, 1, &PageRankConfig::default()).unwrap();
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"most_viewed\""));
        assert!(json.contains("\"label\":\"a\""));
    }
}
