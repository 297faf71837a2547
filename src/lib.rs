//! bing_webmaster library: a client for the Bing Webmaster API
//!
//! The API returns statistics in several envelope shapes and with
//! inconsistently cased field names. This crate normalizes every response into
//! one typed record schema, derives summary metrics and ranked views, and wraps
//! each call in a caching, rate-limiting and retrying execution policy.
//!
//! # Example
//!
//! ```no_run
//! use bing_webmaster::{BingWebmaster, Config, TrafficOptions};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut config = Config::from_env();
//! config.cache.enabled = true;
//!
//! let client = BingWebmaster::new(Some("access-token".to_string()), config)?;
//! let report = client
//!     .get_rank_and_traffic_stats("https://example.com/", &TrafficOptions::new())
//!     .await?;
//!
//! println!(
//!     "{} days, {} clicks, average position {:.1}",
//!     report.summary.count, report.summary.total_clicks, report.summary.average_position
//! );
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

pub mod analysis;
mod client;
pub mod config;
pub mod endpoints;
pub mod error_handling;
pub mod execution;
pub mod initialization;
pub mod input;
mod models;
pub mod normalize;
pub mod submission;
pub mod transport;

// Re-export public API
pub use analysis::{RankMetric, SortDirection};
pub use client::BingWebmaster;
pub use config::{Aggregation, Config, LogFormat, LogLevel};
pub use endpoints::{DateRange, Endpoint, StatsOptions, TrafficOptions};
pub use error_handling::{ApiError, ExecutionEvent, ExecutionStats, InitializationError};
pub use models::{NormalizedRecord, RawRecord, StatisticKind, StatsReport, SummaryMetrics};
pub use submission::{SubmissionKind, SubmissionOutcome, SubmissionTarget};
