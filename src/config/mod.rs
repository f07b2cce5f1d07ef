//! Configuration module for chemharvest
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files. Everything is optional: without a file the defaults apply.
//!
//! # Example
//!
//! ```no_run
//! use chemharvest::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("config.toml")).unwrap();
//! println!("Include media fields: {}", config.harvest.include_media);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, HarvestConfig, HttpConfig};

// Re-export parser functions
pub use parser::load_config;
