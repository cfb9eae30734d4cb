use std::env;
use std::str::FromStr;

use super::ConfigError;

/// Where a configuration value came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Value loaded from environment variable
    EnvVar(String),
    /// Default value used
    Default(String),
    /// Value loaded from nested configuration
    Nested,
}

impl ConfigSource {
    /// Record whether `var` was set or `default` applied
    pub fn of(var: &str, default: &str) -> Self {
        if env::var(var).is_ok() {
            ConfigSource::EnvVar(var.to_string())
        } else {
            ConfigSource::Default(default.to_string())
        }
    }

    pub fn is_env_var(&self) -> bool {
        matches!(self, ConfigSource::EnvVar(_))
    }

    pub fn is_default(&self) -> bool {
        matches!(self, ConfigSource::Default(_))
    }
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::EnvVar(var) => write!(f, "Environment variable: {}", var),
            ConfigSource::Default(value) => write!(f, "Default value: {}", value),
            ConfigSource::Nested => write!(f, "Nested configuration"),
        }
    }
}

pub(crate) fn get_env_required(key: &str) -> Result<String, ConfigError> {
    env::var(key).map_err(|_| ConfigError::MissingEnvVar {
        var: key.to_string(),
    })
}

pub(crate) fn get_env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Read `key` (or `default`) and parse it, naming `field` on failure
pub(crate) fn parse_env_or_default<T: FromStr>(
    key: &str,
    default: &str,
    field: &str,
    expected: &str,
) -> Result<T, ConfigError> {
    let raw = get_env_or_default(key, default);
    raw.trim()
        .parse::<T>()
        .map_err(|_| ConfigError::invalid_value(field, raw.clone(), expected))
}
