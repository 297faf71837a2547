//! Error handling and execution statistics.
//!
//! This module provides:
//! - Error type definitions for callers, transports and initialization
//! - Failure classification (transient vs. fatal) and the retry backoff schedule
//! - Execution statistics tracking
//!
//! Only the request execution policy can fail. Envelope resolution,
//! normalization, aggregation and ranking are total functions.

mod categorization;
mod stats;
mod types;

// Re-export public API
pub use categorization::{categorize_reqwest_error, classify_failure, get_retry_strategy};
pub use stats::ExecutionStats;
pub use types::{
    ApiError, ExecutionEvent, FailureClass, InitializationError, TransportError,
    TransportErrorKind, TransportFailure,
};

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_execution_stats_initialization() {
        let stats = ExecutionStats::new();
        for event in ExecutionEvent::iter() {
            assert_eq!(stats.get(event), 0);
        }
    }

    #[test]
    fn test_execution_stats_increment() {
        let stats = ExecutionStats::new();
        stats.increment(ExecutionEvent::TransportCall);
        stats.increment(ExecutionEvent::TransportCall);
        stats.increment(ExecutionEvent::CacheHit);

        assert_eq!(stats.get(ExecutionEvent::TransportCall), 2);
        assert_eq!(stats.get(ExecutionEvent::CacheHit), 1);
        assert_eq!(stats.get(ExecutionEvent::Retry), 0);
    }

    #[test]
    fn test_execution_stats_snapshot_covers_every_event() {
        let stats = ExecutionStats::new();
        stats.increment(ExecutionEvent::Failure);
        let snapshot = stats.snapshot();
        assert_eq!(snapshot.len(), ExecutionEvent::iter().count());
        assert!(snapshot.contains(&(ExecutionEvent::Failure, 1)));
    }
}
