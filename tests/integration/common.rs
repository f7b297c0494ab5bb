use mailscout::config::{Config, FetcherConfig};
use mailscout::extract::EmailExtractor;
use mailscout::fetcher::Fetcher;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Fetcher settings tuned for tests: short timeout and near-zero backoff
pub fn test_fetcher_config() -> FetcherConfig {
    FetcherConfig {
        timeout_ms: 2_000,
        backoff_base_ms: 1,
        ..FetcherConfig::default()
    }
}

/// Full configuration with no row delay and the APOD endpoint on `apod_base`
pub fn test_config(apod_base: &str) -> Config {
    let mut config = Config::default();
    config.fetcher = test_fetcher_config();
    config.batch.row_delay_ms = 0;
    config.apod.endpoint = format!("{}/apod", apod_base);
    config.apod.api_key = "test-key".to_string();
    config
}

pub fn extractor_with(config: FetcherConfig) -> EmailExtractor {
    let fetcher = Fetcher::from_config(config).expect("Failed to build fetcher");
    EmailExtractor::new(fetcher)
}

/// The mock server address without its `http://` prefix
pub fn schemeless(server: &MockServer) -> String {
    server.uri().trim_start_matches("http://").to_string()
}

/// Mounts an HTML page at `page_path`
pub async fn mount_page(server: &MockServer, page_path: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}
