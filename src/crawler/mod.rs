//! Page crawling through the remote crawl API
//!
//! This module contains the core run logic:
//! - Typed crawl-API client with bearer auth
//! - Content extraction and HTML sanitization
//! - Randomized inter-request pacing
//! - Range/list orchestration with per-page failure tolerance

mod coordinator;
mod extractor;
mod fetcher;
mod pacing;
mod selector;

pub use coordinator::{Coordinator, CrawledPage, ProcessSummary, RunOptions, RunStatus};
pub use extractor::{extract_content, sanitize_html, OutputKind};
pub use fetcher::{ScrapeClient, ScrapeData, ScrapeMetadata, ScrapeResponse};
pub use pacing::Pacer;
pub use selector::PageSelector;
