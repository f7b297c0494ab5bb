//! Email extraction for a single target
//!
//! This module contains:
//! - Search space construction from fetched HTML
//! - The email pattern scan with order-preserving deduplication
//! - [`EmailExtractor`], which runs fetch → parse → scan and never fails

mod email;
mod page;

pub use email::{find_emails, first_email};
pub use page::build_search_space;

use crate::fetcher::Fetcher;
use serde::{Serialize, Serializer};
use std::fmt;

/// Outcome of extracting an email from one target
///
/// Results are reported as plain strings, so the non-email variants render
/// to fixed sentinels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmailOutcome {
    /// An address was found on the page
    Found(String),

    /// The page was fetched but contained no address (`"Not Found"`)
    NotFound,

    /// The target was empty; nothing was fetched (`"No URL"`)
    NoUrl,

    /// The fetch failed (`"Error: <message>"`)
    Error(String),
}

impl EmailOutcome {
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    /// The extracted address, if any
    pub fn email(&self) -> Option<&str> {
        match self {
            Self::Found(email) => Some(email),
            _ => None,
        }
    }
}

impl fmt::Display for EmailOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Found(email) => f.write_str(email),
            Self::NotFound => f.write_str("Not Found"),
            Self::NoUrl => f.write_str("No URL"),
            Self::Error(message) => write!(f, "Error: {}", message),
        }
    }
}

impl Serialize for EmailOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Fetches a page and picks the first email address on it
#[derive(Debug, Clone)]
pub struct EmailExtractor {
    fetcher: Fetcher,
}

impl EmailExtractor {
    pub fn new(fetcher: Fetcher) -> Self {
        Self { fetcher }
    }

    pub fn fetcher(&self) -> &Fetcher {
        &self.fetcher
    }

    /// Extracts the best-guess contact email for a target
    ///
    /// A blank target yields [`EmailOutcome::NoUrl`] without touching the
    /// network. Fetch failures, including non-success statuses, become
    /// [`EmailOutcome::Error`]; they are never returned as `Err`.
    pub async fn extract(&self, raw_url: &str) -> EmailOutcome {
        if raw_url.trim().is_empty() {
            return EmailOutcome::NoUrl;
        }

        let page = match self.fetcher.fetch_page(raw_url).await {
            Ok(page) => page,
            Err(e) => {
                tracing::warn!(url = raw_url, error = %e, "Fetch failed");
                return EmailOutcome::Error(e.to_string());
            }
        };

        let search_space = build_search_space(&page.body);

        match first_email(&search_space) {
            Some(email) => {
                tracing::debug!(url = %page.final_url, email = %email, "Email found");
                EmailOutcome::Found(email)
            }
            None => EmailOutcome::NotFound,
        }
    }
}
