//! Error type definitions.
//!
//! This module defines the errors surfaced to callers, the errors produced by
//! the transport collaborator, and the event kinds tracked by `ExecutionStats`.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use serde_json::Value;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),

    /// The configured base URL could not be parsed.
    #[error("Invalid base URL {url:?}: {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

/// Transport-level failure categories.
///
/// Mirrors the error kinds `reqwest` distinguishes so that the retry policy can
/// classify failures without inspecting messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum TransportErrorKind {
    Timeout,
    Connect,
    Request,
    Body,
    Decode,
    Builder,
    Other,
}

impl TransportErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransportErrorKind::Timeout => "timeout",
            TransportErrorKind::Connect => "connect error",
            TransportErrorKind::Request => "request error",
            TransportErrorKind::Body => "body error",
            TransportErrorKind::Decode => "decode error",
            TransportErrorKind::Builder => "request builder error",
            TransportErrorKind::Other => "transport error",
        }
    }
}

impl std::fmt::Display for TransportErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned by a `Transport` when no HTTP response was obtained.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{kind}: {message}")]
pub struct TransportError {
    pub kind: TransportErrorKind,
    pub message: String,
}

impl TransportError {
    pub fn new(kind: TransportErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Why a single attempt failed.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransportFailure {
    /// The API answered with a non-success status code.
    #[error("HTTP status {status}")]
    Status { status: u16, body: Value },

    /// No response was received.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl TransportFailure {
    /// Status code of the failed response, if there was one.
    pub fn status(&self) -> Option<u16> {
        match self {
            TransportFailure::Status { status, .. } => Some(*status),
            TransportFailure::Transport(_) => None,
        }
    }

    /// Parsed response body of the failed response, if there was one.
    pub fn body(&self) -> Option<&Value> {
        match self {
            TransportFailure::Status { body, .. } => Some(body),
            TransportFailure::Transport(_) => None,
        }
    }
}

/// Retry classification of a failed attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureClass {
    /// Network errors, 5xx responses and explicit throttling; retried.
    Transient,
    /// Validation and authorization errors; surfaced immediately.
    Fatal,
}

/// Errors surfaced by the request execution policy.
///
/// Normalization and aggregation never fail; these are the only errors a
/// caller of the client can observe.
#[derive(Error, Debug)]
pub enum ApiError {
    /// No access token was configured, so no request was attempted.
    #[error("No access token configured for {endpoint}")]
    MissingAccessToken { endpoint: &'static str },

    /// The local rate limiter refused admission before any network call.
    #[error("Rate limit of {limit} requests per minute exceeded for {endpoint}")]
    RateLimited { endpoint: &'static str, limit: usize },

    /// Every attempt failed with a transient error.
    #[error("{endpoint} failed after {attempts} attempt(s): {source}")]
    ExhaustedRetries {
        endpoint: &'static str,
        attempts: usize,
        #[source]
        source: TransportFailure,
    },

    /// An attempt failed with a non-retriable error.
    #[error("{endpoint} failed on attempt {attempts}: {source}")]
    RequestFailed {
        endpoint: &'static str,
        attempts: usize,
        #[source]
        source: TransportFailure,
    },
}

impl ApiError {
    /// Number of transport attempts made before the error was returned.
    pub fn attempts(&self) -> usize {
        match self {
            ApiError::MissingAccessToken { .. } | ApiError::RateLimited { .. } => 0,
            ApiError::ExhaustedRetries { attempts, .. }
            | ApiError::RequestFailed { attempts, .. } => *attempts,
        }
    }

    /// The failure of the last attempt, if any attempt was made.
    pub fn failure(&self) -> Option<&TransportFailure> {
        match self {
            ApiError::MissingAccessToken { .. } | ApiError::RateLimited { .. } => None,
            ApiError::ExhaustedRetries { source, .. } | ApiError::RequestFailed { source, .. } => {
                Some(source)
            }
        }
    }
}

/// Events counted by `ExecutionStats`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum ExecutionEvent {
    TransportCall,
    CacheHit,
    CacheMiss,
    Retry,
    RateLimited,
    Failure,
}

impl std::fmt::Display for ExecutionEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ExecutionEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExecutionEvent::TransportCall => "Transport calls",
            ExecutionEvent::CacheHit => "Cache hits",
            ExecutionEvent::CacheMiss => "Cache misses",
            ExecutionEvent::Retry => "Retries",
            ExecutionEvent::RateLimited => "Rate-limited calls",
            ExecutionEvent::Failure => "Failed calls",
        }
    }
}
