//! Mapping of handler failures onto HTTP responses
//!
//! Client errors carry a human-readable message. Everything else is logged
//! in full and answered with a generic message, so internal error text never
//! reaches the caller.

use crate::apod::ApodError;
use crate::batch::BatchError;
use crate::MailscoutError;
use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

pub const NO_URL_COLUMN_MESSAGE: &str =
    "No URL column found. Please ensure your CSV has a column named \"url\", \"website\", etc.";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("upload exceeds the size limit")]
    PayloadTooLarge,

    #[error(transparent)]
    Upstream(#[from] ApodError),

    #[error(transparent)]
    Internal(#[from] MailscoutError),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            Self::BadRequest(message) => (StatusCode::BAD_REQUEST, message.clone()),
            Self::PayloadTooLarge => (
                StatusCode::PAYLOAD_TOO_LARGE,
                "File is too large".to_string(),
            ),
            Self::Upstream(_) => (
                StatusCode::BAD_GATEWAY,
                "Could not load the picture of the day".to_string(),
            ),
            Self::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        }
    }
}

impl From<BatchError> for ApiError {
    fn from(error: BatchError) -> Self {
        match error {
            BatchError::MissingHeader => Self::bad_request("Invalid CSV file"),
            BatchError::MissingUrlColumn => Self::bad_request(NO_URL_COLUMN_MESSAGE),
            BatchError::Csv(e) => {
                tracing::warn!(error = %e, "Rejected malformed CSV upload");
                Self::bad_request("Invalid CSV file")
            }
            other => Self::Internal(other.into()),
        }
    }
}

impl From<MultipartError> for ApiError {
    fn from(error: MultipartError) -> Self {
        tracing::warn!(error = %error, "Rejected multipart upload");

        if error.status() == StatusCode::PAYLOAD_TOO_LARGE {
            Self::PayloadTooLarge
        } else {
            Self::bad_request("Invalid upload")
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %self, "Request failed");
        }

        (status, Json(json!({ "error": message }))).into_response()
    }
}
