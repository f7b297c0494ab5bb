//! Mailscout main entry point
//!
//! Starts the HTTP server for the email extractor and the picture-of-the-day
//! proxy.

use anyhow::Context;
use clap::Parser;
use mailscout::config::{load_config_with_hash, Config};
use mailscout::fetcher::build_http_client;
use mailscout::server::{serve, AppState};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Mailscout: find contact emails on web pages
///
/// Serves a small web tool that fetches a URL (or every URL in an uploaded
/// CSV), scans the page for email addresses and offers the results as CSV.
#[derive(Parser, Debug)]
#[command(name = "mailscout")]
#[command(version)]
#[command(about = "Find contact emails on web pages", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (defaults are used when omitted)
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Override the listen address from the configuration
    #[arg(long, value_name = "ADDR")]
    bind: Option<String>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate the configuration, print it and exit
    #[arg(long)]
    check_config: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("failed to load {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => {
            tracing::info!("No configuration file given, using defaults");
            Config::default()
        }
    };

    if let Some(bind) = cli.bind {
        config.server.bind = bind;
    }

    if cli.check_config {
        print_config(&config);
        return Ok(());
    }

    let client = build_http_client(&config.fetcher).context("failed to build HTTP client")?;
    let state = AppState::new(&config, client);

    if let Err(e) = serve(&config, state).await {
        tracing::error!("Server failed: {}", e);
        return Err(e.into());
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("mailscout=info,tower_http=info,warn"),
            1 => EnvFilter::new("mailscout=debug,tower_http=debug,info"),
            2 => EnvFilter::new("mailscout=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

fn print_config(config: &Config) {
    println!("=== Mailscout Configuration ===\n");

    println!("Server:");
    println!("  Bind: {}", config.server.bind);
    println!("  Max upload: {} bytes", config.server.max_upload_bytes);

    println!("\nFetcher:");
    println!("  User agent: {}", config.fetcher.user_agent);
    println!("  Timeout: {}ms", config.fetcher.timeout_ms);
    println!(
        "  Retries: {} (backoff from {}ms) on {:?}",
        config.fetcher.max_retries, config.fetcher.backoff_base_ms, config.fetcher.retry_statuses
    );

    println!("\nBatch:");
    println!("  Row delay: {}ms", config.batch.row_delay_ms);

    println!("\nAPOD:");
    println!("  Endpoint: {}", config.apod.endpoint);

    println!("\n✓ Configuration is valid");
}
