//! # pagelinks-core
//!
//! Configuration and logging foundation shared by the pagelinks crates.

pub mod config;
pub mod logging;

pub use config::{
    AppConfig, AppConfigTrait, ConfigError, ConfigSource, DatabaseConfig, Environment, LogFormat,
    LoggingConfig, ResolverConfig,
};
pub use logging::init_logging;
