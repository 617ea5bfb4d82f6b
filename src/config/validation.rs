use crate::config::types::{Config, ServiceConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_service(&config.crawl_api, "crawl-api")?;
    validate_service(&config.knowledge_base, "knowledge-base")?;

    if config.output.dir.is_empty() {
        return Err(ConfigError::Validation(
            "output dir cannot be empty".to_string(),
        ));
    }

    for selector in &config.extractor.strip_selectors {
        if selector.trim().is_empty() {
            return Err(ConfigError::Validation(
                "strip-selectors entries cannot be blank".to_string(),
            ));
        }
    }

    Ok(())
}

/// Validates one external-service section
fn validate_service(service: &ServiceConfig, section: &str) -> Result<(), ConfigError> {
    let url = Url::parse(&service.api_url).map_err(|e| {
        ConfigError::Validation(format!("Invalid {} api-url '{}': {}", section, service.api_url, e))
    })?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "{} api-url must use http or https, got '{}'",
            section,
            url.scheme()
        )));
    }

    if service.api_key.is_empty() {
        return Err(ConfigError::Validation(format!(
            "{} api-key cannot be empty",
            section
        )));
    }

    Ok(())
}
