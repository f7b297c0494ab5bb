//! Sequential batch runner
//!
//! Rows are processed one at a time with a fixed pause between them so a
//! large upload does not hammer the sites it lists.

use crate::batch::{BatchError, CsvBatch};
use crate::extract::{EmailExtractor, EmailOutcome};
use serde::Serialize;
use std::time::Duration;
use tokio::time::sleep;

/// Result for one processed row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractionResult {
    /// 1-based position in the batch
    pub index: usize,

    /// Trimmed URL cell
    pub url: String,

    /// Extracted email or sentinel, serialized as a string
    pub email: EmailOutcome,

    /// Batch size
    pub total: usize,
}

/// Everything a finished batch produces
#[derive(Debug, Clone)]
pub struct BatchOutcome {
    pub results: Vec<ExtractionResult>,

    /// The upload re-serialized with the email column filled
    pub csv: String,
}

impl BatchOutcome {
    pub fn total(&self) -> usize {
        self.results.len()
    }
}

/// Runs the extractor over every row of a batch
#[derive(Debug, Clone)]
pub struct BatchRunner {
    extractor: EmailExtractor,
    row_delay: Duration,
}

impl BatchRunner {
    pub fn new(extractor: EmailExtractor, row_delay: Duration) -> Self {
        Self {
            extractor,
            row_delay,
        }
    }

    pub fn row_delay(&self) -> Duration {
        self.row_delay
    }

    /// Processes every row in order and writes each email into the batch
    ///
    /// Per-row failures show up as `Error: ...` outcomes; they never stop
    /// the loop. The delay is applied between rows, not after the last one.
    pub async fn process(&self, batch: &mut CsvBatch) -> Vec<ExtractionResult> {
        let total = batch.len();
        let mut results = Vec::with_capacity(total);

        tracing::info!(total, delay_ms = self.row_delay.as_millis() as u64, "Starting batch");

        for row in 0..total {
            if row > 0 && !self.row_delay.is_zero() {
                sleep(self.row_delay).await;
            }

            let url = batch.records()[row].url().to_string();
            let email = self.extractor.extract(&url).await;

            batch.set_email(row, email.to_string());

            tracing::info!(
                row = row + 1,
                total,
                url = %url,
                email = %email,
                "Processed row"
            );

            results.push(ExtractionResult {
                index: row + 1,
                url,
                email,
                total,
            });
        }

        results
    }

    /// Processes the batch and serializes the updated CSV
    pub async fn run(&self, mut batch: CsvBatch) -> Result<BatchOutcome, BatchError> {
        let results = self.process(&mut batch).await;
        let csv = batch.to_csv()?;

        let found = results.iter().filter(|r| r.email.is_found()).count();
        tracing::info!(total = results.len(), found, "Batch finished");

        Ok(BatchOutcome { results, csv })
    }
}
