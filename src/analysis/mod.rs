//! Derived views over normalized records.
//!
//! - `summary`: count, totals and positive-only averages
//! - `ranking`: sorted, truncated sub-views

mod ranking;
mod summary;

pub use ranking::{top_by, RankMetric, SortDirection};
pub use summary::aggregate;
