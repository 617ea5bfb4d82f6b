//! Configuration loading and validation
//!
//! Credentials for both external services live in a TOML file; API keys may
//! be omitted there and supplied through environment variables instead.
//! Missing credentials are a startup-time fatal error.

mod parser;
mod types;
mod validation;

pub use parser::{load_config, load_config_with_hash, CRAWL_API_KEY_ENV, KB_API_KEY_ENV};
pub use types::{Config, ExtractorConfig, OutputConfig, ServiceConfig};
pub use validation::validate;
