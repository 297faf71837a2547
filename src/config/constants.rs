//! Configuration constants.
//!
//! This module defines the defaults used throughout the client, including
//! timeouts, retry backoff, cache and rate-limit settings, and the names of the
//! environment variables that override them.

use std::time::Duration;

/// Base URL of the Bing Webmaster JSON API.
pub const DEFAULT_BASE_URL: &str = "https://www.bing.com/webmaster/api.svc/json";

/// Per-request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

// Retry strategy
/// Maximum number of attempts per logical call (initial attempt + retries)
pub const RETRY_MAX_ATTEMPTS: usize = 3;
/// Initial delay in milliseconds before the first retry
pub const RETRY_INITIAL_DELAY_MS: u64 = 500;
/// Factor by which retry delay is multiplied on each attempt
pub const RETRY_FACTOR: u64 = 2;
/// Maximum delay between retries in seconds
pub const RETRY_MAX_DELAY_SECS: u64 = 15;

// Per-endpoint defaults
/// Default row limit for keyword, page and query statistics
pub const DEFAULT_STATS_LIMIT: u32 = 1000;
/// Default length of the trailing date range, in days
pub const DEFAULT_DATE_RANGE_DAYS: i64 = 30;
/// Default number of rows shown by ranked views
pub const DEFAULT_TOP_LIMIT: usize = 10;

// Caching
/// Cache entry lifetime in seconds (1 hour)
pub const DEFAULT_CACHE_TTL_SECS: u64 = 3600;
/// Prefix prepended to every cache key
pub const DEFAULT_CACHE_PREFIX: &str = "bing_webmaster_";

// Rate limiting
/// Admitted requests per rate-limit window
pub const DEFAULT_MAX_REQUESTS_PER_MINUTE: usize = 60;
/// Length of the rolling rate-limit window
pub const RATE_LIMIT_WINDOW: Duration = Duration::from_secs(60);

/// Number of sitemap/URL submissions in flight at once
pub const DEFAULT_SUBMISSION_CONCURRENCY: usize = 1;

// HTTP status codes (for clarity and consistency)
pub const HTTP_STATUS_TOO_MANY_REQUESTS: u16 = 429;

// Environment variables read by `Config::from_env`
pub const ENV_TIMEOUT: &str = "BING_WEBMASTER_TIMEOUT";
pub const ENV_RETRY_ATTEMPTS: &str = "BING_WEBMASTER_RETRY_ATTEMPTS";
pub const ENV_BASE_URL: &str = "BING_WEBMASTER_BASE_URL";
pub const ENV_CACHE_ENABLED: &str = "BING_WEBMASTER_CACHE_ENABLED";
pub const ENV_CACHE_TTL: &str = "BING_WEBMASTER_CACHE_TTL";
pub const ENV_CACHE_PREFIX: &str = "BING_WEBMASTER_CACHE_PREFIX";
pub const ENV_DEBUG: &str = "BING_WEBMASTER_DEBUG";
pub const ENV_RATE_LIMITING_ENABLED: &str = "BING_WEBMASTER_RATE_LIMITING_ENABLED";
pub const ENV_RATE_LIMIT: &str = "BING_WEBMASTER_RATE_LIMIT";
