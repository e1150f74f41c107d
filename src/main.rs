use anyhow::{Context, Result};
use clap::Parser;
use resume_builder::app_log;
use resume_builder::cli::{self, Cli};
use resume_builder::AppConfig;
use std::fs::OpenOptions;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;

    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&config.log_file)
        .with_context(|| format!("Failed to open log file: {}", config.log_file.display()))?;

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .json()
                .with_writer(file)
                .with_current_span(false)
                .with_span_list(false),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    app_log!(
        info,
        "Loaded configuration for environment {}: storage {}, output {}",
        config.environment,
        config.storage_dir.display(),
        config.output_dir.display()
    );

    cli::run(cli, config)
}
