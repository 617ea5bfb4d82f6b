//! Structured knowledge-base client
//!
//! Typed REST client for the retrieval-store service: dataset lookup by
//! name, document lookup/creation by id, and chunk append. This is the
//! primary upload path; the raw one-shot fallback lives in the uploader.

use crate::config::ServiceConfig;
use crate::KbError;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// How much of an error response body is kept for logging
const ERROR_DETAIL_LIMIT: usize = 500;

/// A named dataset (knowledge base) in the retrieval store
#[derive(Debug, Clone, Deserialize)]
pub struct Dataset {
    pub id: String,
    pub name: String,
}

/// A document within a dataset
#[derive(Debug, Clone, Deserialize)]
pub struct Document {
    pub id: String,
}

/// Metadata attached to documents created by pagelift
#[derive(Debug, Clone, Serialize)]
pub struct DocumentMetadata<'a> {
    pub source: &'a str,
    pub format: &'a str,
}

#[derive(Debug, Deserialize)]
struct DatasetListResponse {
    #[serde(default)]
    data: Vec<Dataset>,
}

#[derive(Debug, Deserialize)]
struct DocumentListResponse {
    #[serde(default)]
    data: Vec<Document>,
}

#[derive(Debug, Deserialize)]
struct CreateDocumentResponse {
    data: Document,
}

#[derive(Debug, Serialize)]
struct CreateDocumentRequest<'a> {
    id: &'a str,
    metadata: DocumentMetadata<'a>,
}

#[derive(Debug, Serialize)]
struct AddChunkRequest<'a> {
    content: &'a str,
}

/// Client for the knowledge-base REST API
#[derive(Debug, Clone)]
pub struct KbClient {
    http: Client,
    api_url: String,
    api_key: String,
}

impl KbClient {
    /// Creates a client for the configured knowledge-base endpoint
    pub fn new(config: &ServiceConfig) -> Result<Self, reqwest::Error> {
        let http = Client::builder()
            .timeout(Duration::from_secs(60))
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            http,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    /// Looks up a dataset by exact name
    ///
    /// Zero matches or more than one match is an error; chunk appends must
    /// target an unambiguous dataset.
    pub async fn find_dataset(&self, name: &str) -> Result<Dataset, KbError> {
        let response = self
            .http
            .get(format!("{}/api/v1/datasets", self.api_url))
            .query(&[("name", name)])
            .bearer_auth(&self.api_key)
            .send()
            .await?;
        let response = ensure_success(response).await?;

        let mut listing: DatasetListResponse = response
            .json()
            .await
            .map_err(|e| KbError::Decode(e.to_string()))?;

        if listing.data.is_empty() {
            return Err(KbError::DatasetNotFound(name.to_string()));
        }
        if listing.data.len() > 1 {
            return Err(KbError::DatasetAmbiguous {
                name: name.to_string(),
                count: listing.data.len(),
            });
        }
        Ok(listing.data.remove(0))
    }

    /// Looks up a document by id within a dataset
    pub async fn find_document(
        &self,
        dataset_id: &str,
        document_id: &str,
    ) -> Result<Option<Document>, KbError> {
        let response = self
            .http
            .get(format!(
                "{}/api/v1/datasets/{}/documents",
                self.api_url, dataset_id
            ))
            .query(&[("id", document_id)])
            .bearer_auth(&self.api_key)
            .send()
            .await?;
        let response = ensure_success(response).await?;

        let listing: DocumentListResponse = response
            .json()
            .await
            .map_err(|e| KbError::Decode(e.to_string()))?;

        Ok(listing.data.into_iter().next())
    }

    /// Creates a document with the given id and metadata
    pub async fn create_document(
        &self,
        dataset_id: &str,
        document_id: &str,
        metadata: DocumentMetadata<'_>,
    ) -> Result<Document, KbError> {
        let request = CreateDocumentRequest {
            id: document_id,
            metadata,
        };

        let response = self
            .http
            .post(format!(
                "{}/api/v1/datasets/{}/documents",
                self.api_url, dataset_id
            ))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;
        let response = ensure_success(response).await?;

        let created: CreateDocumentResponse = response
            .json()
            .await
            .map_err(|e| KbError::Decode(e.to_string()))?;

        Ok(created.data)
    }

    /// Appends one chunk to a document as a separate retrievable unit
    pub async fn add_chunk(
        &self,
        dataset_id: &str,
        document_id: &str,
        content: &str,
    ) -> Result<(), KbError> {
        let response = self
            .http
            .post(format!(
                "{}/api/v1/datasets/{}/documents/{}/chunks",
                self.api_url, dataset_id, document_id
            ))
            .bearer_auth(&self.api_key)
            .json(&AddChunkRequest { content })
            .send()
            .await?;
        ensure_success(response).await?;

        Ok(())
    }
}

/// Maps a non-2xx response to a [`KbError::Status`] carrying body detail
async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, KbError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let detail = match response.text().await {
        Ok(body) => body.chars().take(ERROR_DETAIL_LIMIT).collect(),
        Err(_) => String::from("<unreadable body>"),
    };
    Err(KbError::Status {
        status: status.as_u16(),
        detail,
    })
}
