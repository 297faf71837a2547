//! Configuration types.
//!
//! This module defines the structs that control how the client talks to the API
//! and the enums shared with the command-line binary.

use std::time::Duration;

use clap::ValueEnum;
use serde::Serialize;

use crate::config::constants::*;
use crate::models::StatisticKind;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Time bucket for rank and traffic statistics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Aggregation {
    Daily,
    Weekly,
    Monthly,
}

impl Aggregation {
    /// Value sent in the `aggregation` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            Aggregation::Daily => "daily",
            Aggregation::Weekly => "weekly",
            Aggregation::Monthly => "monthly",
        }
    }
}

/// Retry behaviour for transient failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryConfig {
    /// Total attempts per logical call, including the first one
    pub attempts: usize,
    /// Delay before the first retry, in milliseconds
    pub initial_delay_ms: u64,
    /// Multiplier applied to the delay after each retry
    pub factor: u64,
    /// Upper bound for a single delay, in seconds
    pub max_delay_secs: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            attempts: RETRY_MAX_ATTEMPTS,
            initial_delay_ms: RETRY_INITIAL_DELAY_MS,
            factor: RETRY_FACTOR,
            max_delay_secs: RETRY_MAX_DELAY_SECS,
        }
    }
}

/// Response cache settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    pub enabled: bool,
    /// Lifetime of an entry measured from the time it was written
    pub ttl_secs: u64,
    /// Prefix prepended to every cache key
    pub prefix: String,
}

impl CacheConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            ttl_secs: DEFAULT_CACHE_TTL_SECS,
            prefix: DEFAULT_CACHE_PREFIX.to_string(),
        }
    }
}

/// Client-side request quota.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitConfig {
    pub enabled: bool,
    pub max_requests_per_minute: usize,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_requests_per_minute: DEFAULT_MAX_REQUESTS_PER_MINUTE,
        }
    }
}

/// Row limits applied when the caller does not pass one.
///
/// Rank and traffic statistics carry no limit unless one is configured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultLimits {
    pub traffic: Option<u32>,
    pub keyword: u32,
    pub page: u32,
    pub query: u32,
}

impl DefaultLimits {
    /// Configured default for a statistics endpoint, if any.
    pub fn for_kind(&self, kind: StatisticKind) -> Option<u32> {
        match kind {
            StatisticKind::Traffic => self.traffic,
            StatisticKind::Keyword => Some(self.keyword),
            StatisticKind::Page => Some(self.page),
            StatisticKind::Query => Some(self.query),
        }
    }
}

impl Default for DefaultLimits {
    fn default() -> Self {
        Self {
            traffic: None,
            keyword: DEFAULT_STATS_LIMIT,
            page: DEFAULT_STATS_LIMIT,
            query: DEFAULT_STATS_LIMIT,
        }
    }
}

/// Library configuration (no CLI dependencies).
///
/// # Examples
///
/// ```
/// use bing_webmaster::Config;
///
/// let mut config = Config::default();
/// config.cache.enabled = true;
/// config.retry.attempts = 5;
/// assert_eq!(config.cache.ttl_secs, 3600);
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL every endpoint path is appended to
    pub base_url: String,

    /// Per-request timeout in seconds
    pub timeout_seconds: u64,

    /// Retry policy for transient failures
    pub retry: RetryConfig,

    /// Row limits used when a request does not specify one
    pub default_limits: DefaultLimits,

    /// Aggregation used by the CLI when none is given
    pub default_aggregation: Aggregation,

    /// Length of the default trailing date range
    pub default_date_range_days: i64,

    /// Response cache
    pub cache: CacheConfig,

    /// Client-side rate limiting
    pub rate_limit: RateLimitConfig,

    /// Number of submissions run concurrently by batch operations
    pub submission_concurrency: usize,

    /// Log requests and responses at info level instead of debug
    pub debug: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
            retry: RetryConfig::default(),
            default_limits: DefaultLimits::default(),
            default_aggregation: Aggregation::Daily,
            default_date_range_days: DEFAULT_DATE_RANGE_DAYS,
            cache: CacheConfig::default(),
            rate_limit: RateLimitConfig::default(),
            submission_concurrency: DEFAULT_SUBMISSION_CONCURRENCY,
            debug: false,
        }
    }
}

impl Config {
    /// Builds a configuration from the `BING_WEBMASTER_*` environment variables.
    ///
    /// Variables that are unset keep their default. Variables that fail to
    /// parse are logged and ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds a configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(base_url) = lookup(ENV_BASE_URL) {
            let base_url = base_url.trim();
            if !base_url.is_empty() {
                config.base_url = base_url.to_string();
            }
        }
        if let Some(prefix) = lookup(ENV_CACHE_PREFIX) {
            config.cache.prefix = prefix;
        }

        overlay(&lookup, ENV_TIMEOUT, parse_number, &mut config.timeout_seconds);
        overlay(&lookup, ENV_RETRY_ATTEMPTS, parse_number, &mut config.retry.attempts);
        overlay(&lookup, ENV_CACHE_ENABLED, parse_flag, &mut config.cache.enabled);
        overlay(&lookup, ENV_CACHE_TTL, parse_number, &mut config.cache.ttl_secs);
        overlay(&lookup, ENV_DEBUG, parse_flag, &mut config.debug);
        overlay(
            &lookup,
            ENV_RATE_LIMITING_ENABLED,
            parse_flag,
            &mut config.rate_limit.enabled,
        );
        overlay(
            &lookup,
            ENV_RATE_LIMIT,
            parse_number,
            &mut config.rate_limit.max_requests_per_minute,
        );

        config
    }
}

fn overlay<F, P, T>(lookup: &F, name: &str, parse: P, target: &mut T)
where
    F: Fn(&str) -> Option<String>,
    P: Fn(&str) -> Option<T>,
{
    let Some(raw) = lookup(name) else {
        return;
    };
    match parse(raw.trim()) {
        Some(value) => *target = value,
        None => log::warn!("Ignoring invalid value {:?} for {}", raw, name),
    }
}

fn parse_number<T: std::str::FromStr>(raw: &str) -> Option<T> {
    raw.parse().ok()
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
