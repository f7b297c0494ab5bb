//! HTTP API for the extractor and the picture-of-the-day proxy
//!
//! Routes:
//! - `GET  /` - extractor front page
//! - `GET  /healthz` - liveness probe
//! - `POST /api/fetch-single` - one URL → one email
//! - `POST /api/fetch-csv` - multipart CSV upload → per-row results + CSV
//! - `POST /download-csv` - batch CSV text → file download
//! - `POST /download-single-csv` - url/email pair → file download
//! - `GET  /apod`, `GET /apod/:date` - picture of the day

mod error;
pub mod routes;

pub use error::{ApiError, NO_URL_COLUMN_MESSAGE};

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use reqwest::Client;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::apod::ApodClient;
use crate::batch::BatchRunner;
use crate::config::Config;
use crate::extract::EmailExtractor;
use crate::fetcher::Fetcher;
use routes::{
    apod_date_handler, apod_today_handler, download_csv_handler, download_single_csv_handler,
    fetch_csv_handler, fetch_single_handler, health_handler, index_handler,
};

/// Shared application state
///
/// Everything here is read-only; each request owns its own batch data.
#[derive(Clone)]
pub struct AppState {
    pub extractor: Arc<EmailExtractor>,
    pub runner: Arc<BatchRunner>,
    pub apod: Arc<ApodClient>,
}

impl AppState {
    /// Wires the services around one shared HTTP client
    pub fn new(config: &Config, client: Client) -> Self {
        let fetcher = Fetcher::new(client.clone(), config.fetcher.clone());
        let extractor = EmailExtractor::new(fetcher);
        let runner = BatchRunner::new(extractor.clone(), config.batch.row_delay());
        let apod = ApodClient::new(client, &config.apod);

        Self {
            extractor: Arc::new(extractor),
            runner: Arc::new(runner),
            apod: Arc::new(apod),
        }
    }
}

/// Build the Axum application router
pub fn build_router(state: AppState, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/healthz", get(health_handler))
        .route("/api/fetch-single", post(fetch_single_handler))
        .route("/api/fetch-csv", post(fetch_csv_handler))
        .route("/download-csv", post(download_csv_handler))
        .route("/download-single-csv", post(download_single_csv_handler))
        .route("/apod", get(apod_today_handler))
        .route("/apod/:date", get(apod_date_handler))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Binds the configured address and serves until Ctrl+C
pub async fn serve(config: &Config, state: AppState) -> crate::Result<()> {
    let app = build_router(state, config.server.max_upload_bytes);

    let listener = TcpListener::bind(&config.server.bind).await?;
    tracing::info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
