//! Mailscout: contact email discovery for web pages
//!
//! This crate fetches web pages, scans their visible text and link targets
//! for email addresses, and runs whole CSV files of URLs through the same
//! pipeline. It also ships a small proxy for the astronomy picture-of-the-day
//! API that renders the upstream JSON as an HTML page.

pub mod apod;
pub mod batch;
pub mod config;
pub mod extract;
pub mod fetcher;
pub mod server;
pub mod url;

use thiserror::Error;

/// Main error type for Mailscout operations
#[derive(Debug, Error)]
pub enum MailscoutError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Batch error: {0}")]
    Batch(#[from] batch::BatchError),

    #[error("APOD error: {0}")]
    Apod(#[from] apod::ApodError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
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

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("{0}")]
    Parse(String),

    #[error("missing host")]
    MissingHost,
}

/// Errors raised while fetching a page
///
/// The `Display` text of each variant is what ends up after `"Error: "` in
/// an extraction result, so it stays short and free of request internals.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] UrlError),

    #[error("timed out")]
    Timeout,

    #[error("connection failed")]
    Connect,

    #[error("HTTP status {0}")]
    Status(u16),

    #[error("gave up after {attempts} attempts (HTTP status {status})")]
    RetriesExhausted { attempts: u32, status: u16 },

    #[error("failed to read response body")]
    Body,

    #[error("request failed: {0}")]
    Request(String),
}

/// Result type alias for Mailscout operations
pub type Result<T> = std::result::Result<T, MailscoutError>;

// Re-export commonly used types
pub use batch::{BatchOutcome, BatchRunner, CsvBatch, ExtractionResult, UrlRecord};
pub use config::Config;
pub use extract::{EmailExtractor, EmailOutcome};
pub use fetcher::Fetcher;
pub use crate::url::ensure_scheme;
