//! Batch processing of CSV uploads
//!
//! This module handles:
//! - Mapping an uploaded CSV onto URL records and an email column
//! - Running the email extractor over every record in order
//! - Re-serializing the upload with the results filled in

mod mapper;
mod runner;

pub use mapper::{single_result_csv, CsvBatch, UrlRecord, DEFAULT_EMAIL_COLUMN};
pub use runner::{BatchOutcome, BatchRunner, ExtractionResult};

use thiserror::Error;

/// Errors that reject a whole batch before or after processing
#[derive(Debug, Error)]
pub enum BatchError {
    #[error("CSV has no header row")]
    MissingHeader,

    #[error("CSV has no URL column")]
    MissingUrlColumn,

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
