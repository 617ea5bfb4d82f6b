//! Knowledge-base integration
//!
//! Structured REST client for the retrieval store plus the per-page upload
//! coordinator with its raw-HTTP fallback.

mod client;
mod uploader;

pub use client::{Dataset, Document, DocumentMetadata, KbClient};
pub use uploader::{UploadOutcome, UploadStatus, Uploader};
