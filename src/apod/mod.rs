//! Astronomy picture-of-the-day proxy
//!
//! Forwards an optional date to the upstream API together with the
//! configured key and renders the JSON answer as HTML. The date is passed
//! through as given; the upstream API is the one that validates it.

mod render;

pub use render::{escape_html, render_apod_page};

use crate::config::ApodConfig;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

/// Errors talking to the upstream API
#[derive(Debug, Error)]
pub enum ApodError {
    #[error("upstream request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("upstream returned HTTP status {0}")]
    Status(u16),
}

/// The fields of an upstream entry that the page shows
///
/// All fields are optional; unknown fields are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ApodEntry {
    pub title: Option<String>,
    pub date: Option<String>,
    pub explanation: Option<String>,
    pub media_type: Option<String>,
    pub url: Option<String>,
    pub hdurl: Option<String>,
    pub copyright: Option<String>,
}

impl ApodEntry {
    pub fn is_image(&self) -> bool {
        self.media_type.as_deref().map_or(true, |t| t == "image")
    }
}

/// Client for the upstream API
#[derive(Debug, Clone)]
pub struct ApodClient {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl ApodClient {
    pub fn new(client: Client, config: &ApodConfig) -> Self {
        Self {
            client,
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
        }
    }

    /// Fetches the entry for `date`, or today's entry when `None`
    pub async fn fetch(&self, date: Option<&str>) -> Result<ApodEntry, ApodError> {
        let mut query = vec![("api_key", self.api_key.as_str())];
        if let Some(date) = date {
            query.push(("date", date));
        }

        tracing::debug!(endpoint = %self.endpoint, date = ?date, "Requesting APOD entry");

        let response = self.client.get(&self.endpoint).query(&query).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApodError::Status(status.as_u16()));
        }

        Ok(response.json().await?)
    }

    /// Fetches and renders the entry in one step
    pub async fn page(&self, date: Option<&str>) -> Result<String, ApodError> {
        let entry = self.fetch(date).await?;
        Ok(render_apod_page(&entry))
    }
}
