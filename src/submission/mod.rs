//! URL and sitemap submission.
//!
//! A submission is a POST whose result is reported as a `SubmissionOutcome`
//! rather than an error, so batches can carry on past individual failures.

mod batch;

use serde::Serialize;
use serde_json::{json, Value};

use crate::endpoints::Endpoint;
use crate::error_handling::ApiError;

pub use batch::submit_all;

/// What is being submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionKind {
    Url,
    Sitemap,
}

impl SubmissionKind {
    pub fn endpoint(&self) -> Endpoint {
        match self {
            SubmissionKind::Url => Endpoint::SubmitUrl,
            SubmissionKind::Sitemap => Endpoint::SubmitSitemap,
        }
    }

    /// Body field carrying the submitted address.
    fn body_field(&self) -> &'static str {
        match self {
            SubmissionKind::Url => "url",
            SubmissionKind::Sitemap => "sitemapUrl",
        }
    }

    fn success_message(&self) -> &'static str {
        match self {
            SubmissionKind::Url => "URL submitted successfully",
            SubmissionKind::Sitemap => "Sitemap submitted successfully",
        }
    }

    fn failure_message(&self) -> &'static str {
        match self {
            SubmissionKind::Url => "Failed to submit URL",
            SubmissionKind::Sitemap => "Failed to submit sitemap",
        }
    }
}

/// A single address to submit for a site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionTarget {
    pub kind: SubmissionKind,
    pub site_url: String,
    pub url: String,
}

impl SubmissionTarget {
    pub fn url(site_url: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            kind: SubmissionKind::Url,
            site_url: site_url.into(),
            url: url.into(),
        }
    }

    pub fn sitemap(site_url: impl Into<String>, sitemap_url: impl Into<String>) -> Self {
        Self {
            kind: SubmissionKind::Sitemap,
            site_url: site_url.into(),
            url: sitemap_url.into(),
        }
    }

    /// JSON body sent to the submission endpoint.
    pub fn body(&self) -> Value {
        let mut body = json!({ "siteUrl": self.site_url });
        body[self.kind.body_field()] = Value::String(self.url.clone());
        body
    }
}

/// Result of one submission, echoing its input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmissionOutcome {
    pub success: bool,
    pub message: String,
    pub kind: SubmissionKind,
    pub site_url: String,
    pub submitted_url: String,
    /// Response payload as received; `null` when there was none
    pub data: Value,
}

impl SubmissionOutcome {
    /// Outcome of an accepted submission.
    pub fn succeeded(target: SubmissionTarget, data: Value) -> Self {
        let message = message_from(&data, &["message", "Message"])
            .unwrap_or_else(|| target.kind.success_message().to_string());
        Self::build(target, true, message, data)
    }

    /// Outcome of a submission the API refused.
    pub fn failed(target: SubmissionTarget, data: Value) -> Self {
        let message = message_from(&data, &["message", "Message", "error"])
            .unwrap_or_else(|| target.kind.failure_message().to_string());
        Self::build(target, false, message, data)
    }

    /// Outcome of a submission that never got an answer, or was rejected
    /// locally.
    pub fn from_error(target: SubmissionTarget, error: &ApiError) -> Self {
        let data = error
            .failure()
            .and_then(|failure| failure.body())
            .cloned()
            .unwrap_or(Value::Null);
        let message = message_from(&data, &["message", "Message", "error"])
            .unwrap_or_else(|| error.to_string());
        Self::build(target, false, message, data)
    }

    fn build(target: SubmissionTarget, success: bool, message: String, data: Value) -> Self {
        Self {
            success,
            message,
            kind: target.kind,
            site_url: target.site_url,
            submitted_url: target.url,
            data,
        }
    }
}

fn message_from(data: &Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| data.get(*key))
        .find(|value| !value.is_null())
        .map(|value| match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
}
