use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;

use crate::batch::single_result_csv;
use crate::server::ApiError;
use crate::MailscoutError;

pub const BATCH_CSV_FILENAME: &str = "emails_extracted.csv";
pub const SINGLE_CSV_FILENAME: &str = "email_result.csv";

#[derive(Debug, Deserialize)]
pub struct DownloadCsvRequest {
    #[serde(default)]
    csv_data: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DownloadSingleCsvRequest {
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    email: Option<String>,
}

/// Returns previously generated batch CSV text as a file download
pub async fn download_csv_handler(
    Json(request): Json<DownloadCsvRequest>,
) -> Result<Response, ApiError> {
    let csv_data = request.csv_data.unwrap_or_default();
    if csv_data.is_empty() {
        return Err(ApiError::bad_request("No CSV data provided"));
    }

    Ok(csv_attachment(BATCH_CSV_FILENAME, csv_data))
}

/// Returns a single lookup as a two-column CSV download
pub async fn download_single_csv_handler(
    Json(request): Json<DownloadSingleCsvRequest>,
) -> Result<Response, ApiError> {
    let url = request.url.unwrap_or_default();
    if url.is_empty() {
        return Err(ApiError::bad_request("No URL provided"));
    }

    let email = request.email.unwrap_or_default();
    let csv = single_result_csv(&url, &email).map_err(MailscoutError::from)?;

    Ok(csv_attachment(SINGLE_CSV_FILENAME, csv))
}

fn csv_attachment(file_name: &str, body: String) -> Response {
    (
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", file_name),
            ),
        ],
        body,
    )
        .into_response()
}
