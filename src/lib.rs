//! Chemharvest: a concurrent product catalog harvester
//!
//! This crate crawls a paginated chemical product catalog, discovers
//! per-product detail pages, and extracts structured records under a bounded
//! concurrency degree while preserving discovery order.

pub mod config;
pub mod extract;
pub mod fetch;
pub mod harvest;
pub mod record;

use thiserror::Error;

/// Top-level error type for a harvest run
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("the number of products must be a positive integer")]
    InvalidCap,

    #[error("planning failed: {0}")]
    Planning(#[from] PlanningError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to set up extractors: {0}")]
    Setup(#[from] ExtractionError),

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),
}

/// Failure to derive the listing page range
///
/// Always fatal for the whole harvest: without a page count there is no
/// valid plan, partial or otherwise.
#[derive(Debug, Error)]
pub enum PlanningError {
    #[error("could not fetch the first listing page: {0}")]
    Fetch(#[from] FetchError),

    #[error("page navigation widget missing or unparsable: {0}")]
    Navigation(#[from] ExtractionError),
}

/// Transport or status failure for a single URL
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("transport error for {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Expected structure absent from otherwise well-formed markup
///
/// Distinct from the empty-page case: a listing page with zero product rows
/// is not an error, a listing page without the product table is.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("expected element not found: {0}")]
    MissingStructure(&'static str),

    #[error("malformed {context}: {message}")]
    Malformed {
        context: &'static str,
        message: String,
    },

    #[error("invalid selector {0}")]
    Selector(String),
}

/// Failure of a single fetch+extract unit of work
///
/// Per-item failures are skipped and logged; they never abort the batch.
#[derive(Debug, Error)]
pub enum PageError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Extract(#[from] ExtractionError),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type alias for harvest operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::{load_config, Config, HarvestConfig, HttpConfig};
pub use fetch::{build_http_client, fetch_page};
pub use harvest::harvest;
pub use record::{HarvestRequest, HarvestResult, ListingPage, ProductRecord, Properties};
