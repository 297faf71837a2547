//! Client configuration and constants.
//!
//! This module provides:
//! - Configuration constants (timeouts, retry backoff, cache and rate limits)
//! - Request header constants
//! - The `Config` struct and its environment overlay

mod constants;
mod headers;
mod types;

// Re-export all constants
pub use constants::*;
pub use headers::*;
pub use types::{
    Aggregation, CacheConfig, Config, DefaultLimits, LogFormat, LogLevel, RateLimitConfig,
    RetryConfig,
};
