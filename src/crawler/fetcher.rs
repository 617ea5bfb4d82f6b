//! Crawl-API client
//!
//! This module handles all traffic against the remote crawling API:
//! - Building an HTTP client with sane timeouts
//! - Bearer-authenticated scrape requests for one URL at a time
//! - Typed response decoding, validated once at the boundary
//! - Error classification into recoverable [`FetchError`] variants

use crate::config::ServiceConfig;
use crate::crawler::OutputKind;
use crate::FetchError;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Upper bound on remote page processing, sent with every scrape request
/// (milliseconds)
const REMOTE_TIMEOUT_MS: u64 = 30_000;

/// How much of an error response body is kept for logging
const ERROR_DETAIL_LIMIT: usize = 500;

/// Request body for one scrape call
#[derive(Debug, Serialize)]
struct ScrapeRequest<'a> {
    url: &'a str,
    formats: Vec<&'static str>,
    timeout: u64,
}

/// Response envelope from the crawl API
///
/// Every field the service may omit is optional here; downstream code never
/// touches loosely-typed maps.
#[derive(Debug, Clone, Deserialize)]
pub struct ScrapeResponse {
    #[serde(default)]
    pub success: bool,

    pub data: Option<ScrapeData>,
}

/// Content payload of a scrape response
#[derive(Debug, Clone, Deserialize)]
pub struct ScrapeData {
    pub markdown: Option<String>,

    pub html: Option<String>,

    pub metadata: Option<ScrapeMetadata>,
}

/// Page metadata reported by the crawl API
#[derive(Debug, Clone, Deserialize)]
pub struct ScrapeMetadata {
    pub title: Option<String>,
}

/// Client for the crawl API
///
/// Constructed once from configuration and passed by reference; there is no
/// process-wide session.
#[derive(Debug, Clone)]
pub struct ScrapeClient {
    http: Client,
    api_url: String,
    api_key: String,
}

impl ScrapeClient {
    /// Creates a client for the configured crawl-API endpoint
    ///
    /// # Arguments
    ///
    /// * `config` - Endpoint and bearer token for the crawl API
    ///
    /// # Returns
    ///
    /// * `Ok(ScrapeClient)` - Successfully built client
    /// * `Err(reqwest::Error)` - Failed to build the underlying HTTP client
    pub fn new(config: &ServiceConfig) -> Result<Self, reqwest::Error> {
        let http = Client::builder()
            .timeout(Duration::from_secs(60))
            .connect_timeout(Duration::from_secs(10))
            .gzip(true)
            .brotli(true)
            .build()?;

        Ok(Self {
            http,
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
        })
    }

    /// Fetches one URL through the crawl API
    ///
    /// Sends a bearer-authenticated POST with the target URL, the desired
    /// output formats, and a fixed upper bound on remote processing time.
    /// Any non-2xx status (with response detail captured when available),
    /// network failure, undecodable body, or missing data payload is a
    /// recoverable [`FetchError`]; the caller decides whether to continue.
    ///
    /// # Arguments
    ///
    /// * `url` - The page URL to scrape
    /// * `formats` - Which payloads to request (markdown and/or html)
    pub async fn scrape(
        &self,
        url: &str,
        formats: &[OutputKind],
    ) -> Result<ScrapeResponse, FetchError> {
        let request = ScrapeRequest {
            url,
            formats: formats.iter().map(|f| f.as_format()).collect(),
            timeout: REMOTE_TIMEOUT_MS,
        };

        tracing::debug!("Requesting crawl API {} for {}", self.api_url, url);

        let response = self
            .http
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| FetchError::Request {
                url: url.to_string(),
                source: e,
            })?;

        let status = response.status();
        if !status.is_success() {
            let detail = match response.text().await {
                Ok(body) => body.chars().take(ERROR_DETAIL_LIMIT).collect(),
                Err(_) => String::from("<unreadable body>"),
            };
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
                detail,
            });
        }

        let parsed: ScrapeResponse =
            response.json().await.map_err(|e| FetchError::Decode {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        if parsed.data.is_none() {
            return Err(FetchError::MissingData {
                url: url.to_string(),
            });
        }

        Ok(parsed)
    }
}
