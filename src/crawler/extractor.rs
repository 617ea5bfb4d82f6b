//! Content extraction from crawl-API responses
//!
//! Selects the requested payload (markdown or HTML) from a scrape response.
//! A missing or empty payload is an expected outcome for pages with no
//! renderable content; it is reported as `None`, never as an error. HTML
//! output is additionally sanitized: cosmetic elements are stripped and a
//! `<head><title>` is guaranteed.

use crate::crawler::fetcher::ScrapeResponse;
use clap::ValueEnum;
use scraper::{Html, Selector};

/// Which payload a run extracts and persists
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputKind {
    Markdown,
    Html,
}

impl OutputKind {
    /// Format name used on the crawl-API wire and in upload metadata
    pub fn as_format(&self) -> &'static str {
        match self {
            Self::Markdown => "markdown",
            Self::Html => "html",
        }
    }

    /// File extension for persisted pages
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Markdown => "md",
            Self::Html => "html",
        }
    }
}

/// Pulls the requested content out of a scrape response
///
/// Returns `None` when the field is missing or empty. For HTML the content
/// is sanitized with the configured strip selectors and given a title from
/// the response metadata when the markup lacks one.
pub fn extract_content(
    response: &ScrapeResponse,
    kind: OutputKind,
    strip_selectors: &[String],
) -> Option<String> {
    let data = response.data.as_ref()?;

    match kind {
        OutputKind::Markdown => data
            .markdown
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(|s| s.to_string()),
        OutputKind::Html => {
            let html = data.html.as_deref().filter(|s| !s.is_empty())?;
            let title = data.metadata.as_ref().and_then(|m| m.title.as_deref());
            Some(sanitize_html(html, title, strip_selectors))
        }
    }
}

/// Strips cosmetic elements and guarantees a `<head><title>`
///
/// The reported page title is truncated at the first `|` delimiter before
/// insertion, dropping site-name suffixes.
pub fn sanitize_html(html: &str, title: Option<&str>, strip_selectors: &[String]) -> String {
    let document = Html::parse_document(html);
    let mut cleaned = html.to_string();

    for selector_str in strip_selectors {
        match Selector::parse(selector_str) {
            Ok(selector) => {
                for element in document.select(&selector) {
                    let fragment = element.html();
                    // The serialized fragment may differ from the source
                    // bytes; unmatched fragments are left in place.
                    if let Some(pos) = cleaned.find(&fragment) {
                        cleaned.replace_range(pos..pos + fragment.len(), "");
                    }
                }
            }
            Err(e) => {
                tracing::warn!("Skipping invalid strip selector '{}': {}", selector_str, e);
            }
        }
    }

    ensure_title(cleaned, title)
}

/// Inserts a `<title>` derived from the reported page title when the markup
/// has none
fn ensure_title(html: String, title: Option<&str>) -> String {
    let document = Html::parse_document(&html);
    if let Ok(selector) = Selector::parse("head > title") {
        if document.select(&selector).next().is_some() {
            return html;
        }
    }

    let short_title = title
        .map(|t| t.split('|').next().unwrap_or("").trim())
        .unwrap_or("");
    let tag = format!("<title>{}</title>", short_title);

    if let Some(pos) = html.find("<head>") {
        let mut out = html.clone();
        out.insert_str(pos + "<head>".len(), &tag);
        out
    } else if let Some(pos) = html.find("<html>") {
        let mut out = html.clone();
        out.insert_str(pos + "<html>".len(), &format!("<head>{}</head>", tag));
        out
    } else {
        format!("<head>{}</head>{}", tag, html)
    }
}
