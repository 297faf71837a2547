//! HTTP client initialization.

use std::time::Duration;

use reqwest::ClientBuilder;

use crate::config::Config;

/// User-Agent sent with every request
const USER_AGENT: &str = concat!("bing_webmaster/", env!("CARGO_PKG_VERSION"));

/// Initializes the HTTP client used by `ReqwestTransport`.
///
/// Creates a `reqwest::Client` configured with:
/// - Timeout from `config.timeout_seconds`
/// - A crate-identifying User-Agent
///
/// Authentication and content negotiation headers are set per request.
///
/// # Errors
///
/// Returns a `reqwest::Error` if client creation fails.
pub fn init_client(config: &Config) -> Result<reqwest::Client, reqwest::Error> {
    ClientBuilder::new()
        .timeout(Duration::from_secs(config.timeout_seconds))
        .user_agent(USER_AGENT)
        .build()
}
