//! `reqwest`-backed transport.

use async_trait::async_trait;
use serde_json::Value;
use url::Url;

use super::{Method, Transport, TransportRequest, TransportResponse};
use crate::error_handling::{
    categorize_reqwest_error, InitializationError, TransportError, TransportErrorKind,
};

/// Sends requests with a shared `reqwest::Client` relative to a base URL.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    base_url: String,
}

impl ReqwestTransport {
    /// Creates a transport for `base_url`.
    ///
    /// # Errors
    ///
    /// Returns `InitializationError::InvalidBaseUrl` if `base_url` is not an
    /// absolute URL.
    pub fn new(client: reqwest::Client, base_url: &str) -> Result<Self, InitializationError> {
        Url::parse(base_url).map_err(|source| InitializationError::InvalidBaseUrl {
            url: base_url.to_string(),
            source,
        })?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint_url(&self, request: &TransportRequest) -> Result<Url, TransportError> {
        let path = request.path.trim_start_matches('/');
        let mut url = Url::parse(&format!("{}/{}", self.base_url, path))
            .map_err(|e| TransportError::new(TransportErrorKind::Builder, e.to_string()))?;
        if !request.query.is_empty() {
            url.query_pairs_mut().extend_pairs(&request.query);
        }
        Ok(url)
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: &TransportRequest) -> Result<TransportResponse, TransportError> {
        let url = self.endpoint_url(request)?;

        let mut builder = match request.method {
            Method::Get => self.client.get(url),
            Method::Post => self.client.post(url),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(to_transport_error)?;
        let status = response.status().as_u16();
        let text = response.text().await.map_err(to_transport_error)?;

        Ok(TransportResponse {
            status,
            body: parse_body(&text),
        })
    }
}

fn to_transport_error(error: reqwest::Error) -> TransportError {
    TransportError::new(categorize_reqwest_error(&error), error.to_string())
}

fn parse_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|e| {
        log::debug!("Response body is not JSON ({}), treating it as empty", e);
        Value::Null
    })
}
