/// Fully resolved configuration
///
/// Produced by [`crate::config::load_config`] after environment-variable
/// fallback has been applied; API keys are guaranteed present here.
#[derive(Debug, Clone)]
pub struct Config {
    pub crawl_api: ServiceConfig,
    pub knowledge_base: ServiceConfig,
    pub output: OutputConfig,
    pub extractor: ExtractorConfig,
}

/// Endpoint and credential for one external service
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Base URL of the service API
    pub api_url: String,

    /// Bearer token for the service
    pub api_key: String,
}

/// Output configuration
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Directory that receives one file per crawled page
    pub dir: String,
}

/// Content-extraction configuration
#[derive(Debug, Clone)]
pub struct ExtractorConfig {
    /// CSS selectors removed from HTML output before saving
    pub strip_selectors: Vec<String>,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            strip_selectors: default_strip_selectors(),
        }
    }
}

/// Cosmetic elements stripped from HTML output when the config file does not
/// override the selector list.
pub fn default_strip_selectors() -> Vec<String> {
    [
        ".author-info",
        ".related-content",
        ".post-actions",
        "div[class^='feature-']",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}
