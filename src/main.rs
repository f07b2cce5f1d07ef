//! Chemharvest main entry point
//!
//! Command-line interface for the concurrent product catalog harvester.

use anyhow::Context;
use chemharvest::config::{load_config, Config};
use chemharvest::fetch::build_http_client;
use chemharvest::harvest::harvest;
use chemharvest::record::HarvestRequest;
use chemharvest::HarvestError;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use url::Url;

/// Chemharvest: a concurrent product catalog harvester
///
/// Crawls a paginated product catalog, follows every product's detail page,
/// and writes the extracted records to a JSON file.
#[derive(Parser, Debug)]
#[command(name = "chemharvest")]
#[command(version)]
#[command(about = "Harvest structured product records from a paginated catalog", long_about = None)]
struct Cli {
    /// The catalog root URL to harvest products from
    #[arg(long, value_name = "URL")]
    url: Url,

    /// Filename for the JSON output file; it will be overwritten if it
    /// already exists
    #[arg(long, value_name = "FILENAME", default_value = "output.json")]
    output: PathBuf,

    /// The (optional) number of products to harvest
    #[arg(long, value_name = "COUNT", allow_negative_numbers = true)]
    count: Option<i64>,

    /// Path to a TOML configuration file
    #[arg(long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    // Validate the cap before any network work happens.
    let cap = match cli.count {
        None => None,
        Some(count) if count > 0 => Some(count as usize),
        Some(_) => return Err(HarvestError::InvalidCap.into()),
    };

    let config = match &cli.config {
        Some(path) => {
            load_config(path).with_context(|| format!("loading {}", path.display()))?
        }
        None => Config::default(),
    };

    if cli.output.exists() {
        tracing::warn!(
            "output file {} already exists and will be overwritten",
            cli.output.display()
        );
    }

    let client = build_http_client(&config.http)?;
    let request = HarvestRequest::new(cli.url, cap)?;

    tracing::info!("harvesting {}", request.root);
    let result = harvest(&client, &request, &config.harvest).await?;
    tracing::info!("harvested {} records", result.records.len());

    let json = serde_json::to_string_pretty(&result.records)?;
    std::fs::write(&cli.output, json)
        .with_context(|| format!("writing {}", cli.output.display()))?;
    tracing::info!("wrote {}", cli.output.display());

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("chemharvest=info,warn"),
            1 => EnvFilter::new("chemharvest=debug,info"),
            2 => EnvFilter::new("chemharvest=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
