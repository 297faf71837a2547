//! Canonical data model shared by the normalization and analysis modules.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Serialize;
use serde_json::{Map, Value};
use strum_macros::EnumIter;

use crate::analysis::{self, RankMetric, SortDirection};

/// One row exactly as returned by the API.
pub type RawRecord = Map<String, Value>;

/// Which statistics endpoint a record came from.
///
/// Selects the alias table used by the normalizer and the meaning of
/// `NormalizedRecord::label`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatisticKind {
    /// Rank and traffic statistics; the label is a date
    Traffic,
    /// Keyword statistics; the label is the keyword
    Keyword,
    /// Page statistics; the label is the page URL
    Page,
    /// Query statistics; the label is the search query
    Query,
}

impl StatisticKind {
    /// Name of the label field in the original API vocabulary.
    pub fn label_name(&self) -> &'static str {
        match self {
            StatisticKind::Traffic => "date",
            StatisticKind::Keyword => "keyword",
            StatisticKind::Page => "page_url",
            StatisticKind::Query => "query",
        }
    }
}

/// A statistics row with every field present.
///
/// Fields missing from the source are zero (or an empty label), never absent.
/// `ctr` is kept exactly as received: the API does not say whether it is a
/// fraction or a percentage.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NormalizedRecord {
    pub label: String,
    pub clicks: u64,
    pub impressions: u64,
    pub average_position: f64,
    pub ctr: f64,
}

impl NormalizedRecord {
    /// Interprets the label as a date.
    ///
    /// Understands `YYYY-MM-DD`, ISO 8601 date-times and the legacy
    /// `/Date(<millis>)/` form. Returns `None` for anything else.
    pub fn label_date(&self) -> Option<NaiveDate> {
        parse_label_date(&self.label)
    }
}

fn parse_label_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();

    if let Some(inner) = raw
        .strip_prefix("/Date(")
        .and_then(|rest| rest.strip_suffix(")/"))
    {
        // Offsets such as "-0800" may follow the millisecond count
        let end = inner
            .char_indices()
            .skip(1)
            .find(|(_, c)| *c == '+' || *c == '-')
            .map(|(i, _)| i)
            .unwrap_or(inner.len());
        let millis: i64 = inner[..end].parse().ok()?;
        return DateTime::from_timestamp_millis(millis).map(|dt| dt.date_naive());
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|dt| dt.date())
}

/// Derived totals and averages over a list of normalized records.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SummaryMetrics {
    pub count: usize,
    pub total_clicks: u64,
    pub total_impressions: u64,
    /// Mean over records with a strictly positive position
    pub average_position: f64,
    /// Mean over records with a strictly positive CTR
    pub average_ctr: f64,
}

/// Normalized result of one statistics call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsReport {
    pub kind: StatisticKind,
    pub summary: SummaryMetrics,
    pub records: Vec<NormalizedRecord>,
}

impl StatsReport {
    /// Normalizes and summarizes the records of one response envelope.
    pub fn from_envelope(kind: StatisticKind, envelope: &Value) -> Self {
        let records: Vec<NormalizedRecord> = crate::normalize::resolve_records(envelope)
            .iter()
            .map(|raw| crate::normalize::normalize(kind, raw))
            .collect();
        let summary = analysis::aggregate(&records);
        StatsReport {
            kind,
            summary,
            records,
        }
    }

    /// Sorted, truncated view of the records.
    pub fn top_by(
        &self,
        metric: RankMetric,
        limit: usize,
        direction: SortDirection,
    ) -> Vec<NormalizedRecord> {
        analysis::top_by(&self.records, metric, limit, direction)
    }

    /// Records with the most clicks first.
    pub fn top_by_clicks(&self, limit: usize) -> Vec<NormalizedRecord> {
        self.top_by(RankMetric::Clicks, limit, SortDirection::Descending)
    }

    /// Records with the most impressions first.
    pub fn top_by_impressions(&self, limit: usize) -> Vec<NormalizedRecord> {
        self.top_by(RankMetric::Impressions, limit, SortDirection::Descending)
    }

    /// Records with the best (numerically smallest) average position first.
    pub fn top_by_position(&self, limit: usize) -> Vec<NormalizedRecord> {
        self.top_by(RankMetric::AveragePosition, limit, SortDirection::Ascending)
    }
}
