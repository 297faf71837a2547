//! Ranked sub-views.

use std::cmp::Ordering;

use serde::Serialize;

use crate::models::NormalizedRecord;

/// Metric a ranking is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RankMetric {
    Clicks,
    Impressions,
    /// Lower is better: ascending order puts the best-ranked rows first
    AveragePosition,
    Ctr,
}

impl RankMetric {
    /// The order in which "top" rows come first for this metric.
    pub fn natural_direction(&self) -> SortDirection {
        match self {
            RankMetric::AveragePosition => SortDirection::Ascending,
            RankMetric::Clicks | RankMetric::Impressions | RankMetric::Ctr => {
                SortDirection::Descending
            }
        }
    }

    fn compare(&self, a: &NormalizedRecord, b: &NormalizedRecord) -> Ordering {
        match self {
            RankMetric::Clicks => a.clicks.cmp(&b.clicks),
            RankMetric::Impressions => a.impressions.cmp(&b.impressions),
            RankMetric::AveragePosition => a.average_position.total_cmp(&b.average_position),
            RankMetric::Ctr => a.ctr.total_cmp(&b.ctr),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Returns a copy of `records` sorted by `metric` and truncated to `limit`.
///
/// The sort is stable: records with equal metric values keep their original
/// relative order in either direction. A `limit` beyond the list length
/// returns every record.
pub fn top_by(
    records: &[NormalizedRecord],
    metric: RankMetric,
    limit: usize,
    direction: SortDirection,
) -> Vec<NormalizedRecord> {
    let mut sorted = records.to_vec();
    match direction {
        SortDirection::Ascending => sorted.sort_by(|a, b| metric.compare(a, b)),
        SortDirection::Descending => sorted.sort_by(|a, b| metric.compare(b, a)),
    }
    sorted.truncate(limit);
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clicks(label: &str, clicks: u64) -> NormalizedRecord {
        NormalizedRecord {
            label: label.to_string(),
            clicks,
            ..Default::default()
        }
    }

    fn positioned(label: &str, position: f64) -> NormalizedRecord {
        NormalizedRecord {
            label: label.to_string(),
            average_position: position,
            ..Default::default()
        }
    }

    fn labels(records: &[NormalizedRecord]) -> Vec<&str> {
        records.iter().map(|r| r.label.as_str()).collect()
    }

    #[test]
    fn test_top_by_clicks_descending() {
        let records = vec![clicks("a", 5), clicks("b", 9), clicks("c", 1)];
        let top = top_by(&records, RankMetric::Clicks, 2, SortDirection::Descending);
        assert_eq!(top, vec![clicks("b", 9), clicks("a", 5)]);
    }

    #[test]
    fn test_top_by_position_ascending_puts_best_rank_first() {
        let records = vec![
            positioned("a", 8.5),
            positioned("b", 1.2),
            positioned("c", 3.0),
        ];
        let top = top_by(
            &records,
            RankMetric::AveragePosition,
            3,
            SortDirection::Ascending,
        );
        assert_eq!(labels(&top), vec!["b", "c", "a"]);
    }

    #[test]
    fn test_limit_beyond_length_returns_everything() {
        let records = vec![clicks("a", 1), clicks("b", 2)];
        let top = top_by(&records, RankMetric::Clicks, 10, SortDirection::Descending);
        assert_eq!(labels(&top), vec!["b", "a"]);
    }

    #[test]
    fn test_zero_limit_returns_nothing() {
        let records = vec![clicks("a", 1)];
        assert!(top_by(&records, RankMetric::Clicks, 0, SortDirection::Descending).is_empty());
    }

    #[test]
    fn test_ties_keep_insertion_order_in_both_directions() {
        let records = vec![
            clicks("first", 3),
            clicks("low", 1),
            clicks("second", 3),
            clicks("third", 3),
        ];

        let desc = top_by(&records, RankMetric::Clicks, 4, SortDirection::Descending);
        assert_eq!(labels(&desc), vec!["first", "second", "third", "low"]);

        let asc = top_by(&records, RankMetric::Clicks, 4, SortDirection::Ascending);
        assert_eq!(labels(&asc), vec!["low", "first", "second", "third"]);
    }

    #[test]
    fn test_input_is_not_modified() {
        let records = vec![clicks("a", 1), clicks("b", 2)];
        let _ = top_by(&records, RankMetric::Clicks, 2, SortDirection::Descending);
        assert_eq!(labels(&records), vec!["a", "b"]);
    }

    #[test]
    fn test_natural_directions() {
        assert_eq!(
            RankMetric::AveragePosition.natural_direction(),
            SortDirection::Ascending
        );
        assert_eq!(
            RankMetric::Clicks.natural_direction(),
            SortDirection::Descending
        );
        assert_eq!(
            RankMetric::Impressions.natural_direction(),
            SortDirection::Descending
        );
        assert_eq!(RankMetric::Ctr.natural_direction(), SortDirection::Descending);
    }
}
