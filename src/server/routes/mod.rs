mod apod;
mod download;
mod extract;
mod health;

pub use apod::{apod_date_handler, apod_today_handler};
pub use download::{
    download_csv_handler, download_single_csv_handler, BATCH_CSV_FILENAME, SINGLE_CSV_FILENAME,
};
pub use extract::{fetch_csv_handler, fetch_single_handler};
pub use health::health_handler;

use axum::response::Html;

const INDEX_HTML: &str = include_str!("../../../static/index.html");

/// Front page of the extractor tool
pub async fn index_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}
