//! Summary aggregation.

use crate::models::{NormalizedRecord, SummaryMetrics};

/// Reduces normalized records to totals and averages.
///
/// Totals include every record. Each average only covers the records whose
/// value for that metric is strictly positive: a position of 0 means "no rank"
/// and a CTR of 0 means "no data", so those rows count toward the totals but
/// not toward the means. An average with no contributing record is 0.
pub fn aggregate(records: &[NormalizedRecord]) -> SummaryMetrics {
    let mut summary = SummaryMetrics {
        count: records.len(),
        ..SummaryMetrics::default()
    };

    let mut position_sum = 0.0;
    let mut position_count = 0usize;
    let mut ctr_sum = 0.0;
    let mut ctr_count = 0usize;

    for record in records {
        summary.total_clicks = summary.total_clicks.saturating_add(record.clicks);
        summary.total_impressions = summary.total_impressions.saturating_add(record.impressions);

        if record.average_position > 0.0 {
            position_sum += record.average_position;
            position_count += 1;
        }
        if record.ctr > 0.0 {
            ctr_sum += record.ctr;
            ctr_count += 1;
        }
    }

    summary.average_position = mean(position_sum, position_count);
    summary.average_ctr = mean(ctr_sum, ctr_count);
    summary
}

#[allow(clippy::cast_precision_loss)]
fn mean(sum: f64, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}
