//! Configuration module for Mailscout
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! A missing file is not an error at this level; callers fall back to
//! [`Config::default`].
//!
//! # Example
//!
//! ```no_run
//! use mailscout::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("mailscout.toml")).unwrap();
//! println!("Fetch timeout: {}ms", config.fetcher.timeout_ms);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{ApodConfig, BatchConfig, Config, FetcherConfig, ServerConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
