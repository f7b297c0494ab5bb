//! HTTP fetcher implementation
//!
//! This module handles all outbound page requests, including:
//! - Building the shared HTTP client with the configured user agent and timeout
//! - Normalizing targets that arrive without a scheme
//! - Retrying with exponential backoff on transient status codes
//! - Classifying failures into [`FetchError`] variants

use crate::config::FetcherConfig;
use crate::url::normalize_target;
use crate::FetchError;
use reqwest::{Client, StatusCode};
use tokio::time::sleep;

/// A page that was fetched with a success status
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Final URL after redirects
    pub final_url: String,

    /// HTTP status code
    pub status_code: u16,

    /// Decoded response body
    pub body: String,
}

/// Builds an HTTP client with proper configuration
///
/// The client owns the connection pool, so it is built once at startup and
/// handed to every [`Fetcher`] and to the APOD proxy.
///
/// # Example
///
/// ```no_run
/// use mailscout::config::FetcherConfig;
/// use mailscout::fetcher::build_http_client;
///
/// let client = build_http_client(&FetcherConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &FetcherConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(config.timeout())
        .gzip(true)
        .brotli(true)
        .build()
}

/// Page fetcher with a bounded retry policy
///
/// # Retry Logic
///
/// | Condition | Action |
/// |-----------|--------|
/// | 2xx | Return the page |
/// | Status in `retry-statuses` | Retry up to `max-retries` times, backoff `base * 2^n` |
/// | Any other status | Immediate → `FetchError::Status` |
/// | Timeout | Immediate → `FetchError::Timeout` |
/// | Connection failure | Immediate → `FetchError::Connect` |
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
    config: FetcherConfig,
}

impl Fetcher {
    /// Creates a fetcher around an existing client
    pub fn new(client: Client, config: FetcherConfig) -> Self {
        Self { client, config }
    }

    /// Builds a dedicated client from the configuration
    pub fn from_config(config: FetcherConfig) -> Result<Self, reqwest::Error> {
        let client = build_http_client(&config)?;
        Ok(Self::new(client, config))
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn config(&self) -> &FetcherConfig {
        &self.config
    }

    /// Fetches a page, prepending `http://` when the target has no scheme
    ///
    /// # Arguments
    ///
    /// * `raw_url` - The target as supplied by the user
    ///
    /// # Returns
    ///
    /// * `Ok(FetchedPage)` - The page answered with a 2xx status
    /// * `Err(FetchError)` - The target was invalid, the request failed, or
    ///   the final status was not a success
    pub async fn fetch_page(&self, raw_url: &str) -> Result<FetchedPage, FetchError> {
        let url = normalize_target(raw_url)?;
        let mut retry = 0;

        loop {
            tracing::debug!(url = %url, attempt = retry + 1, "Fetching page");

            let response = self
                .client
                .get(url.clone())
                .send()
                .await
                .map_err(classify_error)?;

            let status = response.status();

            if status.is_success() {
                let final_url = response.url().to_string();
                let body = response.text().await.map_err(classify_error)?;

                return Ok(FetchedPage {
                    final_url,
                    status_code: status.as_u16(),
                    body,
                });
            }

            if !self.is_retryable(status) {
                tracing::debug!(url = %url, status = status.as_u16(), "Non-success status");
                return Err(FetchError::Status(status.as_u16()));
            }

            if retry >= self.config.max_retries {
                return Err(FetchError::RetriesExhausted {
                    attempts: retry + 1,
                    status: status.as_u16(),
                });
            }

            let delay = self.config.backoff(retry);
            tracing::warn!(
                url = %url,
                status = status.as_u16(),
                delay_ms = delay.as_millis() as u64,
                "Transient status, retrying"
            );
            sleep(delay).await;
            retry += 1;
        }
    }

    fn is_retryable(&self, status: StatusCode) -> bool {
        self.config.retry_statuses.contains(&status.as_u16())
    }
}

/// Maps a transport error onto the fetch error taxonomy
fn classify_error(e: reqwest::Error) -> FetchError {
    if e.is_timeout() {
        FetchError::Timeout
    } else if e.is_connect() {
        FetchError::Connect
    } else if e.is_body() || e.is_decode() {
        FetchError::Body
    } else {
        FetchError::Request(e.to_string())
    }
}
