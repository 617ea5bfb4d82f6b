//! Per-page upload coordination
//!
//! Chunks one page's content and pushes the chunks into a knowledge-base
//! document. Two ordered strategies are tried: the structured client path
//! (dataset lookup, document lookup/create, per-chunk append), then a raw
//! authenticated HTTP call carrying all chunks at once. Only when both fail
//! is the page-level upload considered failed.

use crate::chunk::{chunk_text, DEFAULT_CHUNK_SIZE, DEFAULT_OVERLAP};
use crate::config::ServiceConfig;
use crate::kb::client::{DocumentMetadata, KbClient};
use crate::{KbError, UploadError};
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

/// Upload result status for one page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadStatus {
    Success,
    Error,
}

/// The recorded result of one page's upload
#[derive(Debug, Clone, Serialize)]
pub struct UploadOutcome {
    pub page_number: u64,

    pub document_id: String,

    pub status: UploadStatus,

    pub chunk_count: usize,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_detail: Option<String>,
}

impl UploadOutcome {
    /// Builds a success outcome
    pub fn success(page_number: u64, document_id: String, chunk_count: usize) -> Self {
        Self {
            page_number,
            document_id,
            status: UploadStatus::Success,
            chunk_count,
            error_detail: None,
        }
    }

    /// Builds an error outcome
    pub fn error(page_number: u64, document_id: String, detail: String) -> Self {
        Self {
            page_number,
            document_id,
            status: UploadStatus::Error,
            chunk_count: 0,
            error_detail: Some(detail),
        }
    }
}

/// Request body for the raw one-shot fallback
#[derive(Debug, Serialize)]
struct FallbackUploadRequest<'a> {
    chunks: &'a [String],
    metadata: DocumentMetadata<'a>,
}

/// Chunks content and pushes it into the knowledge base
pub struct Uploader {
    kb: KbClient,
    http: Client,
    api_url: String,
    api_key: String,
    chunk_size: usize,
    overlap: usize,
}

impl Uploader {
    /// Creates an uploader for the configured knowledge-base endpoint
    pub fn new(config: &ServiceConfig) -> Result<Self, reqwest::Error> {
        let http = Client::builder()
            .timeout(Duration::from_secs(60))
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            kb: KbClient::new(config)?,
            http,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            chunk_size: DEFAULT_CHUNK_SIZE,
            overlap: DEFAULT_OVERLAP,
        })
    }

    /// Uploads one page's content under the given document id
    ///
    /// Tries the structured client path first and falls back to the raw
    /// HTTP call on any error. Transient and permanent failures are treated
    /// identically: each strategy runs once, in order.
    ///
    /// # Arguments
    ///
    /// * `content` - The page content to chunk and push
    /// * `document_id` - Target document id within the knowledge base
    /// * `kb_name` - Knowledge-base name to look up
    /// * `format` - Content format recorded in document metadata
    ///
    /// # Returns
    ///
    /// * `Ok(chunk_count)` - Number of chunks pushed by the strategy that
    ///   succeeded
    /// * `Err(UploadError)` - Both strategies failed
    pub async fn upload(
        &self,
        content: &str,
        document_id: &str,
        kb_name: &str,
        format: &str,
    ) -> Result<usize, UploadError> {
        let chunks = chunk_text(content, self.chunk_size, self.overlap);
        tracing::info!("Split document {} into {} chunks", document_id, chunks.len());

        let primary_err = match self
            .upload_via_client(&chunks, document_id, kb_name, format)
            .await
        {
            Ok(count) => return Ok(count),
            Err(e) => {
                tracing::warn!(
                    "Structured client path failed for {}: {}; falling back to raw HTTP",
                    document_id,
                    e
                );
                e
            }
        };

        match self
            .upload_via_http(&chunks, document_id, kb_name, format)
            .await
        {
            Ok(()) => {
                tracing::info!("Raw HTTP fallback succeeded for {}", document_id);
                Ok(chunks.len())
            }
            Err(fallback_err) => Err(UploadError::Exhausted {
                document_id: document_id.to_string(),
                primary: primary_err.to_string(),
                fallback: fallback_err.to_string(),
            }),
        }
    }

    /// Structured client path: dataset lookup, document lookup/create, then
    /// one append per non-blank chunk
    async fn upload_via_client(
        &self,
        chunks: &[String],
        document_id: &str,
        kb_name: &str,
        format: &str,
    ) -> Result<usize, KbError> {
        let dataset = self.kb.find_dataset(kb_name).await?;
        tracing::debug!("Found knowledge base '{}' ({})", dataset.name, dataset.id);

        let metadata = DocumentMetadata {
            source: "crawl-api",
            format,
        };

        let document = match self.kb.find_document(&dataset.id, document_id).await? {
            Some(existing) => existing,
            None => {
                let created = self
                    .kb
                    .create_document(&dataset.id, document_id, metadata)
                    .await?;
                tracing::debug!("Created document {}", created.id);
                created
            }
        };

        let mut added = 0;
        for chunk in chunks {
            if chunk.trim().is_empty() {
                continue;
            }
            self.kb.add_chunk(&dataset.id, &document.id, chunk).await?;
            added += 1;
        }

        Ok(added)
    }

    /// Raw fallback: a single authenticated POST carrying all chunks
    async fn upload_via_http(
        &self,
        chunks: &[String],
        document_id: &str,
        kb_name: &str,
        format: &str,
    ) -> Result<(), KbError> {
        let request = FallbackUploadRequest {
            chunks,
            metadata: DocumentMetadata {
                source: "crawl-api",
                format,
            },
        };

        let response = self
            .http
            .post(format!(
                "{}/knowledge_bases/{}/documents/{}",
                self.api_url, kb_name, document_id
            ))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let detail = match response.text().await {
                Ok(body) => body.chars().take(500).collect(),
                Err(_) => String::from("<unreadable body>"),
            };
            return Err(KbError::Status {
                status: status.as_u16(),
                detail,
            });
        }

        Ok(())
    }
}
