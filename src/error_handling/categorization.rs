//! Failure classification and retry strategy.
//!
//! This module decides which failed attempts are worth retrying and builds the
//! backoff schedule used between attempts.

use std::time::Duration;
use tokio_retry::strategy::ExponentialBackoff;

use super::types::{FailureClass, TransportErrorKind, TransportFailure};
use crate::config::{RetryConfig, HTTP_STATUS_TOO_MANY_REQUESTS};

/// Creates an exponential backoff schedule for the given retry settings.
///
/// Yields `initial, initial * factor, initial * factor^2, ...`, each capped at
/// `max_delay_secs`. The iterator yields one delay per retry, so it is limited
/// to `attempts - 1` items: the first attempt never waits.
pub fn get_retry_strategy(retry: &RetryConfig) -> impl Iterator<Item = Duration> {
    let initial = Duration::from_millis(retry.initial_delay_ms);
    let max_delay = Duration::from_secs(retry.max_delay_secs);
    std::iter::once(initial)
        .chain(
            ExponentialBackoff::from_millis(retry.factor.max(1))
                .factor(retry.initial_delay_ms)
                .max_delay(max_delay),
        )
        .map(move |delay| delay.min(max_delay))
        .take(retry.attempts.saturating_sub(1))
}

/// Classifies a failed attempt as transient (retried) or fatal.
///
/// # Transient
///
/// - 429 Too Many Requests (explicit throttling by the API)
/// - Server errors (5xx)
/// - Timeouts, connection failures and request errors
///
/// # Fatal
///
/// - Client errors (4xx except 429): bad parameters, bad or expired token
/// - Body, decode and builder errors
/// - Any other non-success status (e.g. unexpected 3xx)
pub fn classify_failure(failure: &TransportFailure) -> FailureClass {
    match failure {
        TransportFailure::Status { status, .. } => {
            if *status == HTTP_STATUS_TOO_MANY_REQUESTS || (500..600).contains(status) {
                FailureClass::Transient
            } else {
                FailureClass::Fatal
            }
        }
        TransportFailure::Transport(error) => match error.kind {
            TransportErrorKind::Timeout
            | TransportErrorKind::Connect
            | TransportErrorKind::Request => FailureClass::Transient,
            TransportErrorKind::Body
            | TransportErrorKind::Decode
            | TransportErrorKind::Builder
            | TransportErrorKind::Other => FailureClass::Fatal,
        },
    }
}

/// Categorizes a `reqwest::Error` into a `TransportErrorKind`.
pub fn categorize_reqwest_error(error: &reqwest::Error) -> TransportErrorKind {
    if error.is_builder() {
        TransportErrorKind::Builder
    } else if error.is_timeout() {
        TransportErrorKind::Timeout
    } else if error.is_connect() {
        TransportErrorKind::Connect
    } else if error.is_request() {
        TransportErrorKind::Request
    } else if error.is_body() {
        TransportErrorKind::Body
    } else if error.is_decode() {
        TransportErrorKind::Decode
    } else {
        TransportErrorKind::Other
    }
}
