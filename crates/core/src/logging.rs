//! Structured logging bootstrap
//!
//! Installs a `tracing-subscriber` registry with an `EnvFilter` and one of
//! three formatters. `RUST_LOG`, when set, wins over the configured level.

use std::io;
use tracing_subscriber::{fmt::Layer, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{LogFormat, LoggingConfig};

/// Filter directive for `config`: the workspace crates at the configured
/// level, everything else (sqlx included) at `warn`.
pub fn filter_directive(config: &LoggingConfig) -> String {
    let level = config.level.to_lowercase();
    format!(
        "warn,pagelinks_core={level},pagelinks_orm={level},pagelinks_pages={level},pagelinks_cli={level},pagelinks={level}"
    )
}

/// Initialize logging for the process. Fails if a global subscriber is
/// already installed or the filter does not parse.
pub fn init_logging(config: &LoggingConfig) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(filter_directive(config)))?;

    // Logs go to stderr; stdout carries command output.
    match config.format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(Layer::new().with_writer(io::stderr).json())
            .try_init()?,
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(filter)
            .with(Layer::new().with_writer(io::stderr).pretty())
            .try_init()?,
        LogFormat::Compact => tracing_subscriber::registry()
            .with(filter)
            .with(Layer::new().with_writer(io::stderr).compact())
            .try_init()?,
    }

    tracing::debug!(
        target: "pagelinks::logging",
        "Structured logging initialized (level: {}, format: {:?})",
        config.level,
        config.format
    );

    Ok(())
}
