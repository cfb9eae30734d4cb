//! Environment-driven configuration
//!
//! Every section implements [`AppConfigTrait`]: load from the environment,
//! validate, and report where each value came from.

pub mod app_config;
pub mod sources;
pub mod validation;

pub use app_config::{
    AppConfig, AppConfigTrait, DatabaseConfig, Environment, LogFormat, LoggingConfig,
    ResolverConfig,
};
pub use sources::ConfigSource;
pub use validation::ConfigError;
