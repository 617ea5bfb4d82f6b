//! Crawl orchestration
//!
//! The coordinator drives one run: for every selected page number it asks
//! the pacer for a delay, the crawl API for content, the extractor for the
//! requested payload, persists the page, and finally hands the accumulated
//! pages to the uploader. A single page's failure never aborts the run;
//! only a run that crawls zero pages is reported as an error.

use crate::config::Config;
use crate::crawler::extractor::{extract_content, OutputKind};
use crate::crawler::fetcher::ScrapeClient;
use crate::crawler::pacing::Pacer;
use crate::crawler::selector::PageSelector;
use crate::kb::{UploadOutcome, Uploader};
use crate::output::PageWriter;
use crate::{ConfigError, PageliftError};
use serde::Serialize;
use std::path::PathBuf;

/// How much extracted content is echoed into the log
const PREVIEW_LIMIT: usize = 100;

/// Per-run options collected from the CLI
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Base URL; the page number is appended by plain string concatenation
    pub base_url: String,

    /// Which page numbers to crawl, and in what order
    pub selector: PageSelector,

    /// Which payload to extract and persist
    pub output_kind: OutputKind,

    /// Knowledge-base document id prefix; required unless `skip_upload`
    pub doc_id: Option<String>,

    /// Knowledge-base name; required unless `skip_upload`
    pub knowledge_base: Option<String>,

    /// Crawl only; do not push anything to the knowledge base
    pub skip_upload: bool,

    /// Minimum inter-page delay in seconds
    pub wait_min: f64,

    /// Maximum inter-page delay in seconds
    pub wait_max: f64,
}

/// Overall status of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    Success,
    Error,
}

/// The single, aggregated result of a full run
#[derive(Debug, Clone, Serialize)]
pub struct ProcessSummary {
    pub status: RunStatus,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    pub crawled_pages: usize,

    pub total_pages: usize,

    pub uploaded_pages: usize,

    pub details: Vec<UploadOutcome>,
}

/// One successfully crawled and persisted page
#[derive(Debug, Clone)]
pub struct CrawledPage {
    pub page_number: u64,

    pub url: String,

    pub content: String,

    pub output_kind: OutputKind,

    pub saved_path: Option<PathBuf>,
}

/// Drives a full crawl-and-upload run
pub struct Coordinator {
    config: Config,
    options: RunOptions,
    scrape: ScrapeClient,
    pacer: Pacer,
    writer: PageWriter,
    uploader: Option<Uploader>,
}

impl Coordinator {
    /// Creates a coordinator, validating run options before any network
    /// activity
    ///
    /// # Arguments
    ///
    /// * `config` - Resolved service configuration
    /// * `options` - Per-run options from the CLI
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Ready to run
    /// * `Err(PageliftError)` - Invalid options or client construction failed
    pub fn new(config: Config, options: RunOptions) -> Result<Self, PageliftError> {
        let pacer = Pacer::new(options.wait_min, options.wait_max)?;

        if !options.skip_upload {
            if options.doc_id.as_deref().map_or(true, str::is_empty) {
                return Err(ConfigError::Validation(
                    "doc-id is required unless --skip-upload is set".to_string(),
                )
                .into());
            }
            if options
                .knowledge_base
                .as_deref()
                .map_or(true, str::is_empty)
            {
                return Err(ConfigError::Validation(
                    "knowledge-base is required unless --skip-upload is set".to_string(),
                )
                .into());
            }
        }

        let scrape = ScrapeClient::new(&config.crawl_api)?;
        let writer = PageWriter::new(&config.output.dir);
        let uploader = if options.skip_upload {
            None
        } else {
            Some(Uploader::new(&config.knowledge_base)?)
        };

        Ok(Self {
            config,
            options,
            scrape,
            pacer,
            writer,
            uploader,
        })
    }

    /// Runs the full process: crawl every selected page, then upload
    ///
    /// Never fails mid-run; every per-page problem is logged and the run
    /// continues. The returned summary is the authoritative result.
    pub async fn process(&self) -> ProcessSummary {
        let pages = self.options.selector.pages();
        let total_pages = pages.len();

        tracing::info!(
            "Starting run: {} pages from {}",
            total_pages,
            self.options.base_url
        );

        let mut crawled: Vec<CrawledPage> = Vec::new();

        for (i, &page_number) in pages.iter().enumerate() {
            self.pacer.pause_before(i == 0).await;

            if let Some(page) = self.crawl_page(page_number).await {
                crawled.push(page);
            }
        }

        tracing::info!("Crawl finished: {}/{} pages", crawled.len(), total_pages);

        if crawled.is_empty() {
            return ProcessSummary {
                status: RunStatus::Error,
                message: Some("no pages were successfully crawled".to_string()),
                crawled_pages: 0,
                total_pages,
                uploaded_pages: 0,
                details: Vec::new(),
            };
        }

        let (uploaded_pages, details) = match &self.uploader {
            Some(uploader) => self.upload_pages(uploader, &crawled).await,
            None => {
                tracing::info!("Skipping knowledge-base upload");
                (0, Vec::new())
            }
        };

        ProcessSummary {
            status: RunStatus::Success,
            message: None,
            crawled_pages: crawled.len(),
            total_pages,
            uploaded_pages,
            details,
        }
    }

    /// Crawls one page: fetch, extract, persist
    ///
    /// Returns `None` on any per-page failure; the failure has already been
    /// logged.
    async fn crawl_page(&self, page_number: u64) -> Option<CrawledPage> {
        // Derived URL is plain concatenation; the base URL carries any
        // separator it needs.
        let url = format!("{}{}", self.options.base_url, page_number);
        let kind = self.options.output_kind;

        tracing::info!("Fetching page {}: {}", page_number, url);

        let response = match self.scrape.scrape(&url, &[kind]).await {
            Ok(r) => r,
            Err(e) => {
                tracing::error!("Page {} fetch failed: {}", page_number, e);
                return None;
            }
        };

        let content = match extract_content(
            &response,
            kind,
            &self.config.extractor.strip_selectors,
        ) {
            Some(c) => c,
            None => {
                let (has_markdown, has_html) = response
                    .data
                    .as_ref()
                    .map(|d| (d.markdown.is_some(), d.html.is_some()))
                    .unwrap_or((false, false));
                tracing::warn!(
                    "Page {} returned no usable {} content (markdown present: {}, html present: {})",
                    page_number,
                    kind.as_format(),
                    has_markdown,
                    has_html
                );
                return None;
            }
        };

        let preview: String = content.chars().take(PREVIEW_LIMIT).collect();
        tracing::info!("Page {} content preview: {}", page_number, preview);

        let saved_path = match self
            .writer
            .save_page(&content, kind, Some(page_number), &url)
        {
            Ok(path) => {
                tracing::info!("Page {} saved to {}", page_number, path.display());
                path
            }
            Err(e) => {
                tracing::error!("Failed to save page {}: {}", page_number, e);
                return None;
            }
        };

        Some(CrawledPage {
            page_number,
            url,
            content,
            output_kind: kind,
            saved_path: Some(saved_path),
        })
    }

    /// Uploads every crawled page, one knowledge-base document per page
    ///
    /// A page's upload failure is recorded in its outcome and does not block
    /// the remaining pages.
    async fn upload_pages(
        &self,
        uploader: &Uploader,
        crawled: &[CrawledPage],
    ) -> (usize, Vec<UploadOutcome>) {
        // Both are guaranteed present by Coordinator::new
        let doc_id = self.options.doc_id.as_deref().unwrap_or_default();
        let kb_name = self.options.knowledge_base.as_deref().unwrap_or_default();

        let mut uploaded_pages = 0;
        let mut details = Vec::with_capacity(crawled.len());

        for page in crawled {
            let document_id = format!("{}-page-{}", doc_id, page.page_number);
            tracing::info!(
                "Uploading page {} as document {}",
                page.page_number,
                document_id
            );

            match uploader
                .upload(
                    &page.content,
                    &document_id,
                    kb_name,
                    page.output_kind.as_format(),
                )
                .await
            {
                Ok(chunk_count) => {
                    tracing::info!(
                        "Page {} uploaded ({} chunks)",
                        page.page_number,
                        chunk_count
                    );
                    uploaded_pages += 1;
                    details.push(UploadOutcome::success(
                        page.page_number,
                        document_id,
                        chunk_count,
                    ));
                }
                Err(e) => {
                    tracing::error!("Page {} upload failed: {}", page.page_number, e);
                    details.push(UploadOutcome::error(
                        page.page_number,
                        document_id,
                        e.to_string(),
                    ));
                }
            }
        }

        (uploaded_pages, details)
    }
}
