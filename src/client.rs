//! High-level client for the Webmaster API.

use std::sync::Arc;

use serde_json::Value;

use crate::config::{request_headers, Config, DEFAULT_STATS_LIMIT};
use crate::endpoints::{Endpoint, StatsOptions, TrafficOptions};
use crate::error_handling::{ApiError, ExecutionStats, InitializationError, TransportFailure};
use crate::execution::{ApiRequest, BackoffPolicy, RequestExecutionPolicy};
use crate::initialization::init_client;
use crate::models::{RawRecord, StatisticKind, StatsReport};
use crate::normalize::resolve_records;
use crate::submission::{submit_all, SubmissionOutcome, SubmissionTarget};
use crate::transport::{ReqwestTransport, Transport};

/// Client for one Webmaster account.
///
/// Owns its own response cache and rate-limit window: independently
/// configured clients can live side by side in one process.
///
/// # Examples
///
/// ```no_run
/// use bing_webmaster::{BingWebmaster, Config, StatsOptions};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let client = BingWebmaster::new(Some("token".to_string()), Config::default())?;
/// let report = client
///     .get_query_stats("https://example.com/", &StatsOptions::new().limit(100))
///     .await?;
/// for record in report.top_by_clicks(5) {
///     println!("{}: {} clicks", record.label, record.clicks);
/// }
/// # Ok(())
/// # }
/// ```
pub struct BingWebmaster {
    access_token: Option<String>,
    config: Config,
    policy: RequestExecutionPolicy,
}

impl BingWebmaster {
    /// Creates a client that talks to `config.base_url` over HTTPS.
    ///
    /// # Errors
    ///
    /// Returns an `InitializationError` if the HTTP client cannot be built or
    /// the base URL is invalid.
    pub fn new(access_token: Option<String>, config: Config) -> Result<Self, InitializationError> {
        let http = init_client(&config)?;
        let transport = ReqwestTransport::new(http, &config.base_url)?;
        Ok(Self::with_transport(access_token, config, Arc::new(transport)))
    }

    /// Creates a client on top of any transport.
    pub fn with_transport(
        access_token: Option<String>,
        config: Config,
        transport: Arc<dyn Transport>,
    ) -> Self {
        let policy = RequestExecutionPolicy::new(transport, &config);
        Self {
            access_token,
            config,
            policy,
        }
    }

    /// Replaces the retry backoff schedule.
    pub fn with_backoff(mut self, backoff: Arc<dyn BackoffPolicy>) -> Self {
        self.policy = self.policy.with_backoff(backoff);
        self
    }

    pub fn set_access_token(&mut self, access_token: impl Into<String>) -> &mut Self {
        self.access_token = Some(access_token.into());
        self
    }

    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    /// Whether a non-empty token is configured. The token is not verified
    /// against the API.
    pub fn is_access_token_valid(&self) -> bool {
        self.access_token.as_deref().is_some_and(|t| !t.is_empty())
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn stats(&self) -> &Arc<ExecutionStats> {
        self.policy.stats()
    }

    pub fn policy(&self) -> &RequestExecutionPolicy {
        &self.policy
    }

    /// Sites the token owner can access, as returned by the API.
    pub async fn get_user_sites(&self) -> Result<Vec<RawRecord>, ApiError> {
        let envelope = self.call(ApiRequest::new(Endpoint::UserSites)).await?;
        Ok(resolve_records(&envelope))
    }

    pub async fn get_rank_and_traffic_stats(
        &self,
        site_url: &str,
        options: &TrafficOptions,
    ) -> Result<StatsReport, ApiError> {
        let params = options.to_params(
            site_url,
            self.config.default_limits.for_kind(StatisticKind::Traffic),
        );
        self.report(StatisticKind::Traffic, params).await
    }

    pub async fn get_keyword_stats(
        &self,
        site_url: &str,
        options: &StatsOptions,
    ) -> Result<StatsReport, ApiError> {
        self.stats_report(StatisticKind::Keyword, site_url, options)
            .await
    }

    pub async fn get_page_stats(
        &self,
        site_url: &str,
        options: &StatsOptions,
    ) -> Result<StatsReport, ApiError> {
        self.stats_report(StatisticKind::Page, site_url, options).await
    }

    pub async fn get_query_stats(
        &self,
        site_url: &str,
        options: &StatsOptions,
    ) -> Result<StatsReport, ApiError> {
        self.stats_report(StatisticKind::Query, site_url, options).await
    }

    pub async fn submit_url(
        &self,
        site_url: &str,
        url: &str,
    ) -> Result<SubmissionOutcome, ApiError> {
        self.submit(SubmissionTarget::url(site_url, url)).await
    }

    pub async fn submit_sitemap(
        &self,
        site_url: &str,
        sitemap_url: &str,
    ) -> Result<SubmissionOutcome, ApiError> {
        self.submit(SubmissionTarget::sitemap(site_url, sitemap_url))
            .await
    }

    /// Submits one target.
    ///
    /// A response with a non-success status that is not retried (a rejected
    /// URL, say) is reported as an outcome with `success == false`. Local
    /// rejections and exhausted retries are returned as errors.
    pub async fn submit(&self, target: SubmissionTarget) -> Result<SubmissionOutcome, ApiError> {
        let request = ApiRequest::new(target.kind.endpoint()).body(target.body());
        match self.call(request).await {
            Ok(data) => Ok(SubmissionOutcome::succeeded(target, data)),
            Err(ApiError::RequestFailed {
                source: TransportFailure::Status { body, .. },
                ..
            }) => Ok(SubmissionOutcome::failed(target, body)),
            Err(error) => Err(error),
        }
    }

    /// Submits several sitemaps for one site, one outcome per sitemap.
    pub async fn submit_sitemaps<S: AsRef<str>>(
        &self,
        site_url: &str,
        sitemap_urls: &[S],
    ) -> Vec<SubmissionOutcome> {
        let targets = sitemap_urls
            .iter()
            .map(|url| SubmissionTarget::sitemap(site_url, url.as_ref()));
        self.submit_batch(targets).await
    }

    /// Submits several URLs for one site, one outcome per URL.
    pub async fn submit_urls<S: AsRef<str>>(
        &self,
        site_url: &str,
        urls: &[S],
    ) -> Vec<SubmissionOutcome> {
        let targets = urls
            .iter()
            .map(|url| SubmissionTarget::url(site_url, url.as_ref()));
        self.submit_batch(targets).await
    }

    async fn submit_batch<I>(&self, targets: I) -> Vec<SubmissionOutcome>
    where
        I: IntoIterator<Item = SubmissionTarget>,
    {
        submit_all(targets, self.config.submission_concurrency, |target| {
            self.submit(target)
        })
        .await
    }

    async fn stats_report(
        &self,
        kind: StatisticKind,
        site_url: &str,
        options: &StatsOptions,
    ) -> Result<StatsReport, ApiError> {
        let default_limit = self
            .config
            .default_limits
            .for_kind(kind)
            .unwrap_or(DEFAULT_STATS_LIMIT);
        self.report(kind, options.to_params(site_url, default_limit))
            .await
    }

    async fn report(
        &self,
        kind: StatisticKind,
        params: Vec<(String, String)>,
    ) -> Result<StatsReport, ApiError> {
        let request = ApiRequest::new(Endpoint::for_statistic(kind)).params(params);
        let envelope = self.call(request).await?;
        let report = StatsReport::from_envelope(kind, &envelope);
        log::debug!(
            "{} returned {} {} record(s)",
            Endpoint::for_statistic(kind),
            report.records.len(),
            kind.label_name()
        );
        Ok(report)
    }

    async fn call(&self, request: ApiRequest) -> Result<Value, ApiError> {
        let token = match self.access_token.as_deref() {
            Some(token) if !token.is_empty() => token,
            _ => {
                return Err(ApiError::MissingAccessToken {
                    endpoint: request.endpoint.name(),
                })
            }
        };
        let request = request.headers(request_headers(token));
        self.policy.execute(&request).await
    }
}
