use axum::extract::{Path, State};
use axum::response::Html;

use crate::server::{ApiError, AppState};

/// Today's picture of the day
pub async fn apod_today_handler(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    Ok(Html(state.apod.page(None).await?))
}

/// Picture of the day for a `YYYY-MM-DD` date, forwarded unchecked
pub async fn apod_date_handler(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> Result<Html<String>, ApiError> {
    Ok(Html(state.apod.page(Some(date.as_str())).await?))
}
