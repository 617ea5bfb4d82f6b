use crate::config::types::{default_strip_selectors, Config, ExtractorConfig, OutputConfig, ServiceConfig};
use crate::config::validation::validate;
use crate::ConfigError;
use serde::Deserialize;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Environment variable consulted when `[crawl-api] api-key` is absent
pub const CRAWL_API_KEY_ENV: &str = "PAGELIFT_CRAWL_API_KEY";

/// Environment variable consulted when `[knowledge-base] api-key` is absent
pub const KB_API_KEY_ENV: &str = "PAGELIFT_KB_API_KEY";

/// On-disk configuration shape
///
/// API keys are optional here; [`resolve`] fills them from the environment
/// and fails when neither source supplies one.
#[derive(Debug, Deserialize)]
struct RawConfig {
    #[serde(rename = "crawl-api")]
    crawl_api: RawServiceConfig,

    #[serde(rename = "knowledge-base")]
    knowledge_base: RawServiceConfig,

    output: RawOutputConfig,

    #[serde(default)]
    extractor: RawExtractorConfig,
}

#[derive(Debug, Deserialize)]
struct RawServiceConfig {
    #[serde(rename = "api-url")]
    api_url: String,

    #[serde(rename = "api-key")]
    api_key: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawOutputConfig {
    dir: String,
}

#[derive(Debug, Default, Deserialize)]
struct RawExtractorConfig {
    #[serde(rename = "strip-selectors")]
    strip_selectors: Option<Vec<String>>,
}

/// Loads, resolves, and validates a configuration file
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, resolve, or validate
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;

    let raw: RawConfig = toml::from_str(&content)?;

    let config = resolve(
        raw,
        std::env::var(CRAWL_API_KEY_ENV).ok(),
        std::env::var(KB_API_KEY_ENV).ok(),
    )?;

    validate(&config)?;

    Ok(config)
}

/// Loads a configuration and returns both the config and a SHA-256 hash of
/// the file content, used to log which configuration a run executed with.
pub fn load_config_with_hash(path: &Path) -> Result<(Config, String), ConfigError> {
    let config = load_config(path)?;
    let hash = compute_config_hash(path)?;
    Ok((config, hash))
}

/// Computes a hex-encoded SHA-256 hash of the configuration file content
pub fn compute_config_hash(path: &Path) -> Result<String, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    Ok(hex::encode(hasher.finalize()))
}

/// Applies environment fallback for API keys and fixes defaults
fn resolve(
    raw: RawConfig,
    crawl_key_env: Option<String>,
    kb_key_env: Option<String>,
) -> Result<Config, ConfigError> {
    let crawl_key = raw.crawl_api.api_key.or(crawl_key_env).ok_or(
        ConfigError::MissingCredential {
            service: "crawl API",
            env_var: CRAWL_API_KEY_ENV,
        },
    )?;

    let kb_key = raw.knowledge_base.api_key.or(kb_key_env).ok_or(
        ConfigError::MissingCredential {
            service: "knowledge-base",
            env_var: KB_API_KEY_ENV,
        },
    )?;

    Ok(Config {
        crawl_api: ServiceConfig {
            api_url: raw.crawl_api.api_url,
            api_key: crawl_key,
        },
        knowledge_base: ServiceConfig {
            api_url: raw.knowledge_base.api_url,
            api_key: kb_key,
        },
        output: OutputConfig {
            dir: raw.output.dir,
        },
        extractor: ExtractorConfig {
            strip_selectors: raw
                .extractor
                .strip_selectors
                .unwrap_or_else(default_strip_selectors),
        },
    })
}
