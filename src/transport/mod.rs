//! Transport collaborator.
//!
//! The execution policy never talks to the network directly: it hands a
//! `TransportRequest` to something implementing `Transport` and classifies
//! whatever comes back. `ReqwestTransport` is the production implementation;
//! tests substitute scripted stubs.

mod http;

use async_trait::async_trait;
use serde_json::Value;

use crate::error_handling::TransportError;

pub use http::ReqwestTransport;

/// HTTP method of an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

/// One HTTP exchange to perform.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportRequest {
    pub method: Method,
    /// Endpoint path relative to the base URL, e.g. `/GetUserSites`
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
    pub headers: Vec<(String, String)>,
}

/// Status code and parsed body of a received response.
///
/// Empty or non-JSON bodies are represented as `Value::Null`.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: Value,
}

impl TransportResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends requests to the remote API.
///
/// Returns `Ok` for every response that was received, whatever its status;
/// `Err` only when no response was obtained (timeout, connection failure...).
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: &TransportRequest) -> Result<TransportResponse, TransportError>;
}
