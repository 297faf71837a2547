//! Request execution policy.
//!
//! Every logical API call passes through `RequestExecutionPolicy::execute`:
//!
//! 1. Cache check (GET endpoints, when caching is enabled). A hit returns
//!    immediately and is never counted against the rate limit.
//! 2. Rate-limit admission. A rejection fails with `ApiError::RateLimited`
//!    before anything reaches the transport.
//! 3. Transport call, repeated while failures are transient and the backoff
//!    schedule has delays left.
//! 4. Cache store of the successful envelope.
//!
//! Admission happens once per logical call; retries of an admitted call do
//! not consume further quota.

mod cache;
mod rate_limit;
mod retry;

use std::sync::Arc;

use log::Level;
use serde_json::Value;

use crate::config::Config;
use crate::endpoints::Endpoint;
use crate::error_handling::{
    classify_failure, ApiError, ExecutionEvent, ExecutionStats, FailureClass, TransportFailure,
};
use crate::transport::{Transport, TransportRequest};

pub use cache::ResponseCache;
pub use rate_limit::RateLimitWindow;
pub use retry::{BackoffPolicy, ExponentialBackoffPolicy, FixedBackoff};

/// One logical call: an endpoint plus everything sent with it.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub endpoint: Endpoint,
    pub params: Vec<(String, String)>,
    pub body: Option<Value>,
    pub headers: Vec<(String, String)>,
}

impl ApiRequest {
    pub fn new(endpoint: Endpoint) -> Self {
        Self {
            endpoint,
            params: Vec::new(),
            body: None,
            headers: Vec::new(),
        }
    }

    pub fn params(mut self, params: Vec<(String, String)>) -> Self {
        self.params = params;
        self
    }

    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn headers(mut self, headers: Vec<(String, String)>) -> Self {
        self.headers = headers;
        self
    }

    fn to_transport_request(&self) -> TransportRequest {
        TransportRequest {
            method: self.endpoint.method(),
            path: self.endpoint.path(),
            query: self.params.clone(),
            body: self.body.clone(),
            headers: self.headers.clone(),
        }
    }
}

/// Wraps calls with caching, rate limiting and retries.
///
/// The cache and rate-limit window belong to the policy instance, so two
/// clients in one process never share quota or cached responses.
pub struct RequestExecutionPolicy {
    transport: Arc<dyn Transport>,
    backoff: Arc<dyn BackoffPolicy>,
    cache: Option<ResponseCache>,
    rate_limiter: Option<RateLimitWindow>,
    stats: Arc<ExecutionStats>,
    debug: bool,
}

impl RequestExecutionPolicy {
    /// Builds a policy from the retry, cache, rate-limit and debug settings
    /// of `config`.
    pub fn new(transport: Arc<dyn Transport>, config: &Config) -> Self {
        Self {
            transport,
            backoff: Arc::new(ExponentialBackoffPolicy::new(config.retry.clone())),
            cache: config
                .cache
                .enabled
                .then(|| ResponseCache::from_config(&config.cache)),
            rate_limiter: config
                .rate_limit
                .enabled
                .then(|| RateLimitWindow::from_config(&config.rate_limit)),
            stats: Arc::new(ExecutionStats::new()),
            debug: config.debug,
        }
    }

    /// Replaces the backoff schedule.
    pub fn with_backoff(mut self, backoff: Arc<dyn BackoffPolicy>) -> Self {
        self.backoff = backoff;
        self
    }

    pub fn stats(&self) -> &Arc<ExecutionStats> {
        &self.stats
    }

    pub fn cache(&self) -> Option<&ResponseCache> {
        self.cache.as_ref()
    }

    pub fn rate_limiter(&self) -> Option<&RateLimitWindow> {
        self.rate_limiter.as_ref()
    }

    /// Performs one logical call and returns the raw response envelope.
    ///
    /// # Errors
    ///
    /// - `ApiError::RateLimited` if admission was refused (no transport call)
    /// - `ApiError::RequestFailed` on the first fatal failure
    /// - `ApiError::ExhaustedRetries` when every attempt failed transiently
    pub async fn execute(&self, request: &ApiRequest) -> Result<Value, ApiError> {
        let endpoint = request.endpoint.name();

        let cache_key = match &self.cache {
            Some(cache) if request.endpoint.is_cacheable() => {
                Some(cache.fingerprint(endpoint, &request.params))
            }
            _ => None,
        };

        if let (Some(cache), Some(key)) = (&self.cache, &cache_key) {
            if let Some(envelope) = cache.get(key).await {
                self.stats.increment(ExecutionEvent::CacheHit);
                log::debug!("Cache hit for {} ({})", endpoint, key);
                return Ok(envelope);
            }
            self.stats.increment(ExecutionEvent::CacheMiss);
        }

        if let Some(limiter) = &self.rate_limiter {
            if !limiter.try_admit().await {
                self.stats.increment(ExecutionEvent::RateLimited);
                log::warn!(
                    "Rate limit of {} requests per minute reached, rejecting {}",
                    limiter.max_requests(),
                    endpoint
                );
                return Err(ApiError::RateLimited {
                    endpoint,
                    limit: limiter.max_requests(),
                });
            }
        }

        let transport_request = request.to_transport_request();
        let mut delays = self.backoff.delays();
        let mut attempt = 0usize;

        loop {
            attempt += 1;
            self.stats.increment(ExecutionEvent::TransportCall);
            log::log!(
                self.trace_level(),
                "{} {} attempt {} params={:?}",
                transport_request.method.as_str(),
                transport_request.path,
                attempt,
                transport_request.query
            );

            let failure = match self.transport.send(&transport_request).await {
                Ok(response) if response.is_success() => {
                    log::log!(
                        self.trace_level(),
                        "{} answered {} on attempt {}",
                        endpoint,
                        response.status,
                        attempt
                    );
                    if let (Some(cache), Some(key)) = (&self.cache, cache_key) {
                        cache.insert(key, response.body.clone()).await;
                    }
                    return Ok(response.body);
                }
                Ok(response) => TransportFailure::Status {
                    status: response.status,
                    body: response.body,
                },
                Err(error) => TransportFailure::Transport(error),
            };

            match classify_failure(&failure) {
                FailureClass::Fatal => {
                    self.stats.increment(ExecutionEvent::Failure);
                    log::debug!(
                        "{} failed on attempt {} (not retried): {}",
                        endpoint,
                        attempt,
                        failure
                    );
                    return Err(ApiError::RequestFailed {
                        endpoint,
                        attempts: attempt,
                        source: failure,
                    });
                }
                FailureClass::Transient => match delays.next() {
                    Some(delay) => {
                        self.stats.increment(ExecutionEvent::Retry);
                        log::warn!(
                            "{} attempt {} failed ({}), retrying in {:?}",
                            endpoint,
                            attempt,
                            failure,
                            delay
                        );
                        tokio::time::sleep(delay).await;
                    }
                    None => {
                        self.stats.increment(ExecutionEvent::Failure);
                        return Err(ApiError::ExhaustedRetries {
                            endpoint,
                            attempts: attempt,
                            source: failure,
                        });
                    }
                },
            }
        }
    }

    fn trace_level(&self) -> Level {
        if self.debug {
            Level::Info
        } else {
            Level::Debug
        }
    }
}
