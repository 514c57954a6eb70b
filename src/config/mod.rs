//! Configuration module for Doc-Dossier
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every section is optional; missing keys fall back to each section's `Default`.
//!
//! # Example
//!
//! ```no_run
//! use doc_dossier::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("dossier.toml")).unwrap();
//! println!("Crawler will use max depth: {}", config.crawler.max_depth);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, CrawlerConfig, ExtractionConfig, FilterConfig, OutputConfig, DEFAULT_USER_AGENT,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::validate;
pub(crate) use validation::parse_selector;
