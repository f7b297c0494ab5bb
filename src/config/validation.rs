use crate::config::types::{ApodConfig, BatchConfig, Config, FetcherConfig, ServerConfig};
use crate::ConfigError;
use std::net::SocketAddr;
use url::Url;

/// Upper bound for the request timeout (five minutes)
const MAX_TIMEOUT_MS: u64 = 300_000;

/// Upper bound for the pause between batch rows (one minute)
const MAX_ROW_DELAY_MS: u64 = 60_000;

const MAX_RETRIES: u32 = 10;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_server_config(&config.server)?;
    validate_fetcher_config(&config.fetcher)?;
    validate_batch_config(&config.batch)?;
    validate_apod_config(&config.apod)?;
    Ok(())
}

fn validate_server_config(config: &ServerConfig) -> Result<(), ConfigError> {
    config.bind.parse::<SocketAddr>().map_err(|e| {
        ConfigError::Validation(format!("bind must be a socket address, got '{}': {}", config.bind, e))
    })?;

    if config.max_upload_bytes == 0 {
        return Err(ConfigError::Validation(
            "max_upload_bytes must be greater than 0".to_string(),
        ));
    }

    Ok(())
}

fn validate_fetcher_config(config: &FetcherConfig) -> Result<(), ConfigError> {
    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    if config.timeout_ms == 0 || config.timeout_ms > MAX_TIMEOUT_MS {
        return Err(ConfigError::Validation(format!(
            "timeout_ms must be between 1 and {}, got {}",
            MAX_TIMEOUT_MS, config.timeout_ms
        )));
    }

    if config.max_retries > MAX_RETRIES {
        return Err(ConfigError::Validation(format!(
            "max_retries must be <= {}, got {}",
            MAX_RETRIES, config.max_retries
        )));
    }

    if let Some(status) = config
        .retry_statuses
        .iter()
        .find(|status| !(400..=599).contains(*status))
    {
        return Err(ConfigError::Validation(format!(
            "retry_statuses may only contain 4xx/5xx codes, got {}",
            status
        )));
    }

    Ok(())
}

fn validate_batch_config(config: &BatchConfig) -> Result<(), ConfigError> {
    if config.row_delay_ms > MAX_ROW_DELAY_MS {
        return Err(ConfigError::Validation(format!(
            "row_delay_ms must be <= {}ms, got {}ms",
            MAX_ROW_DELAY_MS, config.row_delay_ms
        )));
    }

    Ok(())
}

fn validate_apod_config(config: &ApodConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.endpoint)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid apod endpoint: {}", e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "apod endpoint must use http or https, got '{}'",
            config.endpoint
        )));
    }

    if config.api_key.trim().is_empty() {
        return Err(ConfigError::Validation(
            "apod api_key cannot be empty".to_string(),
        ));
    }

    Ok(())
}
