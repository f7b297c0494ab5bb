use serde::Deserialize;
use std::time::Duration;

/// Main configuration structure for Mailscout
///
/// Every section is optional in the TOML file; missing sections and keys
/// fall back to the defaults below.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub fetcher: FetcherConfig,
    pub batch: BatchConfig,
    pub apod: ApodConfig,
}

/// HTTP listener configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ServerConfig {
    /// Socket address to listen on
    pub bind: String,

    /// Largest accepted request body (bytes)
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:5000".to_string(),
            max_upload_bytes: 16 * 1024 * 1024,
        }
    }
}

/// Outbound HTTP behaviour for page fetches
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct FetcherConfig {
    /// User-Agent header sent with every request
    pub user_agent: String,

    /// Total request timeout (milliseconds)
    pub timeout_ms: u64,

    /// Retries after the first attempt
    pub max_retries: u32,

    /// First backoff step (milliseconds), doubled on each further retry
    pub backoff_base_ms: u64,

    /// Status codes that trigger a retry
    pub retry_statuses: Vec<u16>,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            user_agent: "Mozilla/5.0 (compatible; Bot/1.0)".to_string(),
            timeout_ms: 10_000,
            max_retries: 3,
            backoff_base_ms: 500,
            retry_statuses: vec![429, 500, 502, 503, 504],
        }
    }
}

impl FetcherConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Delay before retry number `retry` (0-based)
    pub fn backoff(&self, retry: u32) -> Duration {
        let factor = 2u64.saturating_pow(retry);
        Duration::from_millis(self.backoff_base_ms.saturating_mul(factor))
    }
}

/// Batch processing configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct BatchConfig {
    /// Pause between two consecutive rows (milliseconds)
    pub row_delay_ms: u64,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self { row_delay_ms: 500 }
    }
}

impl BatchConfig {
    pub fn row_delay(&self) -> Duration {
        Duration::from_millis(self.row_delay_ms)
    }
}

/// Astronomy picture-of-the-day upstream
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ApodConfig {
    /// API endpoint, without query string
    pub endpoint: String,

    /// Key sent as the `api_key` query parameter
    pub api_key: String,
}

impl Default for ApodConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.nasa.gov/planetary/apod".to_string(),
            api_key: "DEMO_KEY".to_string(),
        }
    }
}
