//! Shared helpers for the integration tests

use pagelift::config::{Config, ExtractorConfig, OutputConfig, ServiceConfig};
use pagelift::{OutputKind, PageSelector, RunOptions};
use serde_json::{json, Value};

/// Creates a test configuration pointing both services at mock servers
pub fn test_config(crawl_api_url: &str, kb_api_url: &str, output_dir: &str) -> Config {
    Config {
        crawl_api: ServiceConfig {
            api_url: format!("{}/v1/scrape", crawl_api_url),
            api_key: "test-crawl-key".to_string(),
        },
        knowledge_base: ServiceConfig {
            api_url: kb_api_url.to_string(),
            api_key: "test-kb-key".to_string(),
        },
        output: OutputConfig {
            dir: output_dir.to_string(),
        },
        extractor: ExtractorConfig::default(),
    }
}

/// Creates run options for a crawl-only range run with no pacing delay
pub fn crawl_only_options(base_url: &str, start: u64, end: u64) -> RunOptions {
    RunOptions {
        base_url: base_url.to_string(),
        selector: PageSelector::from_range(start, end).unwrap(),
        output_kind: OutputKind::Markdown,
        doc_id: None,
        knowledge_base: None,
        skip_upload: true,
        wait_min: 0.0,
        wait_max: 0.0,
    }
}

/// Creates run options for a full crawl-and-upload range run
pub fn upload_options(base_url: &str, start: u64, end: u64) -> RunOptions {
    RunOptions {
        base_url: base_url.to_string(),
        selector: PageSelector::from_range(start, end).unwrap(),
        output_kind: OutputKind::Markdown,
        doc_id: Some("doc".to_string()),
        knowledge_base: Some("articles".to_string()),
        skip_upload: false,
        wait_min: 0.0,
        wait_max: 0.0,
    }
}

/// Builds a successful scrape response body with markdown content
pub fn scrape_markdown_body(markdown: &str) -> Value {
    json!({
        "success": true,
        "data": {
            "markdown": markdown,
            "metadata": { "title": "Test Page | Example Site" }
        }
    })
}

/// Builds a successful scrape response body with HTML content
pub fn scrape_html_body(html: &str, title: &str) -> Value {
    json!({
        "success": true,
        "data": {
            "html": html,
            "metadata": { "title": title }
        }
    })
}
