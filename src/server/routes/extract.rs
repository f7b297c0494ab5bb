use axum::extract::{Multipart, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::batch::{CsvBatch, ExtractionResult};
use crate::extract::EmailOutcome;
use crate::server::{ApiError, AppState};

#[derive(Debug, Deserialize)]
pub struct FetchSingleRequest {
    #[serde(default)]
    url: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct FetchSingleResponse {
    url: String,
    email: EmailOutcome,
    success: bool,
}

#[derive(Debug, Serialize)]
pub struct FetchCsvResponse {
    results: Vec<ExtractionResult>,
    total: usize,
    success: bool,
    csv_data: String,
}

/// Looks up the contact email for one URL
pub async fn fetch_single_handler(
    State(state): State<AppState>,
    Json(request): Json<FetchSingleRequest>,
) -> Result<Json<FetchSingleResponse>, ApiError> {
    let url = request.url.as_deref().unwrap_or_default().trim();
    if url.is_empty() {
        return Err(ApiError::bad_request("Please enter a URL"));
    }

    let email = state.extractor.extract(url).await;

    Ok(Json(FetchSingleResponse {
        url: url.to_string(),
        email,
        success: true,
    }))
}

/// Runs every URL in an uploaded CSV through the extractor
///
/// The upload is read from the multipart field named `file`. The whole
/// batch runs inside this request; the response carries both the per-row
/// results and the regenerated CSV.
pub async fn fetch_csv_handler(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<FetchCsvResponse>, ApiError> {
    let mut upload = None;

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_string();
        let bytes = field.bytes().await?;
        upload = Some((file_name, bytes));
        break;
    }

    let (file_name, bytes) = upload.ok_or_else(|| ApiError::bad_request("No file provided"))?;

    if file_name.is_empty() {
        return Err(ApiError::bad_request("No file selected"));
    }

    if !file_name.to_ascii_lowercase().ends_with(".csv") {
        return Err(ApiError::bad_request("Please upload a CSV file"));
    }

    let batch = CsvBatch::parse(&bytes)?;
    tracing::info!(file = %file_name, rows = batch.len(), "Accepted CSV upload");

    let outcome = state.runner.run(batch).await?;

    Ok(Json(FetchCsvResponse {
        total: outcome.total(),
        results: outcome.results,
        success: true,
        csv_data: outcome.csv,
    }))
}
