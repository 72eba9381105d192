//! LaneQuote CLI
//!
//! Usage: lanequote <requests.yaml|requests.json> [config.yaml]
//!
//! Prices every lane in the request file and prints the outcomes as JSON.

use anyhow::{bail, Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use lanequote::batch::{price_batch, BatchRequest};
use lanequote::config::{AppConfig, LoggingConfig};

fn init_logging(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    // Quotes go to stdout, logs to stderr
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let Some(request_path) = args.next() else {
        bail!("usage: lanequote <requests.yaml|requests.json> [config.yaml]");
    };

    let config = match args.next() {
        Some(path) => AppConfig::load_from(&path)?,
        None => AppConfig::load()?,
    };
    init_logging(&config.logging);
    info!("Configuration: {}", config);

    let request = BatchRequest::load(&request_path).await?;
    info!("Loaded {} lanes from {}", request.lanes.len(), request_path);

    let default_tier = config.engine.default_customer_tier().unwrap_or_default();
    let outcomes = price_batch(
        request.lanes,
        config.engine.settings(),
        default_tier,
        config.batch.max_concurrency,
    )
    .await?;

    let json = serde_json::to_string_pretty(&outcomes).context("Failed to serialize quotes")?;
    println!("{}", json);

    Ok(())
}
