//! Pagelift main entry point
//!
//! Command-line interface for crawling a numbered sequence of article pages
//! and pushing their content into a knowledge base.

use anyhow::Context;
use clap::Parser;
use pagelift::config::load_config_with_hash;
use pagelift::{Coordinator, OutputKind, PageSelector, RunOptions, RunStatus};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Pagelift: crawl paginated articles into a knowledge base
///
/// Fetches each selected page through the crawl API, saves the extracted
/// content to the output directory, and uploads chunked content to the
/// configured knowledge base unless --skip-upload is set.
#[derive(Parser, Debug)]
#[command(name = "pagelift")]
#[command(version = "1.0.0")]
#[command(about = "Crawl paginated articles into a knowledge base", long_about = None)]
struct Cli {
    /// Base URL; the page number is appended directly (no separator added)
    #[arg(long)]
    base_url: String,

    /// First page number of a contiguous range
    #[arg(long, requires = "end_page", conflicts_with = "pages_file")]
    start_page: Option<u64>,

    /// Last page number of a contiguous range (inclusive)
    #[arg(long, requires = "start_page", conflicts_with = "pages_file")]
    end_page: Option<u64>,

    /// File of page numbers, one per line, processed in file order
    #[arg(long, value_name = "FILE", conflicts_with_all = ["start_page", "end_page"])]
    pages_file: Option<PathBuf>,

    /// Which payload to extract and persist
    #[arg(long, value_enum, default_value = "markdown")]
    format: OutputKind,

    /// Knowledge-base document id prefix (per page: "{doc-id}-page-{n}")
    #[arg(long)]
    doc_id: Option<String>,

    /// Knowledge-base name to upload into
    #[arg(long)]
    knowledge_base: Option<String>,

    /// Path to TOML configuration file
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,

    /// Crawl only; skip the knowledge-base upload
    #[arg(long)]
    skip_upload: bool,

    /// Minimum wait between pages in seconds
    #[arg(long, default_value_t = 3.0)]
    wait_min: f64,

    /// Maximum wait between pages in seconds
    #[arg(long, default_value_t = 10.0)]
    wait_max: f64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.debug);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    let selector = build_selector(&cli)?;

    let options = RunOptions {
        base_url: cli.base_url,
        selector,
        output_kind: cli.format,
        doc_id: cli.doc_id,
        knowledge_base: cli.knowledge_base,
        skip_upload: cli.skip_upload,
        wait_min: cli.wait_min,
        wait_max: cli.wait_max,
    };

    let coordinator = Coordinator::new(config, options)?;
    let summary = coordinator.process().await;

    // The JSON summary on stdout is the authoritative result
    println!("{}", serde_json::to_string_pretty(&summary)?);

    if summary.status == RunStatus::Error {
        std::process::exit(1);
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber
fn setup_logging(debug: bool) {
    let filter = if debug {
        EnvFilter::new("pagelift=debug,info")
    } else {
        EnvFilter::new("pagelift=info,warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Builds the page selector from the mutually exclusive CLI inputs
fn build_selector(cli: &Cli) -> anyhow::Result<PageSelector> {
    match (cli.start_page, cli.end_page, &cli.pages_file) {
        (Some(start), Some(end), None) => Ok(PageSelector::from_range(start, end)?),
        (None, None, Some(path)) => Ok(PageSelector::from_file(path)?),
        _ => anyhow::bail!("specify either --start-page/--end-page or --pages-file"),
    }
}
