//! Pagelift: paginated article collection for retrieval indexing
//!
//! This crate fetches a numbered sequence of article pages through a remote
//! crawling API, converts each page to Markdown or sanitized HTML, writes one
//! file per page, and optionally chunks and uploads the content to a
//! knowledge-base service.

pub mod chunk;
pub mod config;
pub mod crawler;
pub mod kb;
pub mod output;

use thiserror::Error;

/// Main error type for pagelift operations
#[derive(Debug, Error)]
pub enum PageliftError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Upload error: {0}")]
    Upload(#[from] UploadError),

    #[error("Knowledge-base error: {0}")]
    Kb(#[from] KbError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
///
/// All of these are fatal and raised before any network activity.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Missing {service} API key: set it in the config file or via the {env_var} environment variable")]
    MissingCredential {
        service: &'static str,
        env_var: &'static str,
    },

    #[error("Invalid page selector: {0}")]
    PageSelector(String),
}

/// Per-page fetch errors from the crawl API
///
/// All variants are recoverable: the orchestrator logs them and moves on to
/// the next page.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request to {url} failed: {source}")]
    Request { url: String, source: reqwest::Error },

    #[error("Crawl API returned HTTP {status} for {url}: {detail}")]
    Status {
        url: String,
        status: u16,
        detail: String,
    },

    #[error("Failed to decode crawl API response for {url}: {message}")]
    Decode { url: String, message: String },

    #[error("Crawl API response for {url} is missing the data payload")]
    MissingData { url: String },
}

/// Errors from the structured knowledge-base client
#[derive(Debug, Error)]
pub enum KbError {
    #[error("Knowledge-base request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Knowledge-base service returned HTTP {status}: {detail}")]
    Status { status: u16, detail: String },

    #[error("Failed to decode knowledge-base response: {0}")]
    Decode(String),

    #[error("Knowledge base '{0}' not found")]
    DatasetNotFound(String),

    #[error("Knowledge base name '{name}' is ambiguous ({count} matches)")]
    DatasetAmbiguous { name: String, count: usize },
}

/// Per-page upload errors
///
/// Produced only after both the structured client path and the raw HTTP
/// fallback have failed for a page. Recorded in that page's outcome; other
/// pages are unaffected.
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Upload of document {document_id} failed on both paths: client path: {primary}; HTTP fallback: {fallback}")]
    Exhausted {
        document_id: String,
        primary: String,
        fallback: String,
    },
}

/// Result type alias for pagelift operations
pub type Result<T> = std::result::Result<T, PageliftError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use chunk::{chunk_text, DEFAULT_CHUNK_SIZE, DEFAULT_OVERLAP};
pub use config::Config;
pub use crawler::{Coordinator, OutputKind, PageSelector, ProcessSummary, RunOptions, RunStatus};
pub use kb::{UploadOutcome, UploadStatus};
