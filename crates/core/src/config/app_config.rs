use std::collections::HashMap;
use std::str::FromStr;

use super::sources::{get_env_or_default, get_env_required, parse_env_or_default};
use super::{ConfigError, ConfigSource};

/// Configuration trait for application configuration
pub trait AppConfigTrait: Sized {
    /// Load configuration from environment variables
    fn from_env() -> Result<Self, ConfigError>;

    /// Validate the configuration
    fn validate(&self) -> Result<(), ConfigError>;

    /// Get configuration source information for debugging
    fn config_sources(&self) -> HashMap<String, ConfigSource>;
}

/// Environment enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Testing,
    Production,
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "testing" | "test" => Ok(Environment::Testing),
            "production" | "prod" => Ok(Environment::Production),
            _ => Err(ConfigError::invalid_value(
                "environment",
                s,
                "development, testing, or production",
            )),
        }
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let env_str = match self {
            Environment::Development => "development",
            Environment::Testing => "testing",
            Environment::Production => "production",
        };
        write!(f, "{}", env_str)
    }
}

/// Application configuration structure
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub environment: Environment,
    pub database: DatabaseConfig,
    pub resolver: ResolverConfig,
    pub logging: LoggingConfig,
}

/// Database connection settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_seconds: u64,
}

/// Settings of the related-pages resolver
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverConfig {
    /// Site prefix prepended to every table name, metadata and dynamic alike
    pub table_prefix: String,
    /// Field and stream namespace searched for relationship fields
    pub namespace: String,
    /// Maximum number of dynamic-table queries in flight at once
    pub fan_out: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            table_prefix: String::new(),
            namespace: "pages".to_string(),
            fan_out: 1,
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Compact,
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "compact" => Ok(LogFormat::Compact),
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            _ => Err(ConfigError::invalid_value("format", s, "compact, pretty, or json")),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Compact,
        }
    }
}

impl AppConfigTrait for AppConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let environment = Environment::from_str(&get_env_or_default("APP_ENV", "development"))?;

        Ok(AppConfig {
            environment,
            database: DatabaseConfig::from_env()?,
            resolver: ResolverConfig::from_env()?,
            logging: LoggingConfig::from_env()?,
        })
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.database.validate()?;
        self.resolver.validate()?;
        self.logging.validate()?;
        Ok(())
    }

    fn config_sources(&self) -> HashMap<String, ConfigSource> {
        let mut sources = HashMap::new();
        sources.insert("environment".to_string(), ConfigSource::of("APP_ENV", "development"));
        sources.insert("database".to_string(), ConfigSource::Nested);
        sources.insert("resolver".to_string(), ConfigSource::Nested);
        sources.insert("logging".to_string(), ConfigSource::Nested);
        sources
    }
}

impl AppConfigTrait for DatabaseConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let url = get_env_required("DATABASE_URL")?;
        let max_connections =
            parse_env_or_default("DB_MAX_CONNECTIONS", "10", "max_connections", "a positive integer")?;
        let min_connections =
            parse_env_or_default("DB_MIN_CONNECTIONS", "1", "min_connections", "a non-negative integer")?;
        let acquire_timeout_seconds =
            parse_env_or_default("DB_ACQUIRE_TIMEOUT", "30", "acquire_timeout", "a number of seconds")?;

        Ok(DatabaseConfig {
            url,
            max_connections,
            min_connections,
            acquire_timeout_seconds,
        })
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.url.trim().is_empty() {
            return Err(ConfigError::validation_failed("database_url", "Database URL cannot be empty"));
        }

        if self.max_connections == 0 {
            return Err(ConfigError::validation_failed("max_connections", "must be at least 1"));
        }

        if self.min_connections > self.max_connections {
            return Err(ConfigError::validation_failed(
                "min_connections",
                format!(
                    "{} exceeds max_connections ({})",
                    self.min_connections, self.max_connections
                ),
            ));
        }

        Ok(())
    }

    fn config_sources(&self) -> HashMap<String, ConfigSource> {
        let mut sources = HashMap::new();
        sources.insert("url".to_string(), ConfigSource::EnvVar("DATABASE_URL".to_string()));
        sources.insert("max_connections".to_string(), ConfigSource::of("DB_MAX_CONNECTIONS", "10"));
        sources.insert("min_connections".to_string(), ConfigSource::of("DB_MIN_CONNECTIONS", "1"));
        sources.insert("acquire_timeout".to_string(), ConfigSource::of("DB_ACQUIRE_TIMEOUT", "30"));
        sources
    }
}

impl AppConfigTrait for ResolverConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let table_prefix = get_env_or_default("PAGELINKS_TABLE_PREFIX", "");
        let namespace = get_env_or_default("PAGELINKS_NAMESPACE", "pages");
        let fan_out = parse_env_or_default("PAGELINKS_FAN_OUT", "1", "fan_out", "a positive integer")?;

        Ok(ResolverConfig {
            table_prefix,
            namespace,
            fan_out,
        })
    }

    fn validate(&self) -> Result<(), ConfigError> {
        // The prefix is glued onto validated identifiers later; reject
        // anything that could never form one.
        if let Some(c) = self
            .table_prefix
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '_'))
        {
            return Err(ConfigError::invalid_value(
                "table_prefix",
                self.table_prefix.clone(),
                &format!("letters, digits or underscores (found '{}')", c),
            ));
        }

        if self.namespace.trim().is_empty() {
            return Err(ConfigError::validation_failed("namespace", "Namespace cannot be empty"));
        }

        if self.fan_out == 0 {
            return Err(ConfigError::validation_failed("fan_out", "must be at least 1"));
        }

        Ok(())
    }

    fn config_sources(&self) -> HashMap<String, ConfigSource> {
        let mut sources = HashMap::new();
        sources.insert("table_prefix".to_string(), ConfigSource::of("PAGELINKS_TABLE_PREFIX", ""));
        sources.insert("namespace".to_string(), ConfigSource::of("PAGELINKS_NAMESPACE", "pages"));
        sources.insert("fan_out".to_string(), ConfigSource::of("PAGELINKS_FAN_OUT", "1"));
        sources
    }
}

impl AppConfigTrait for LoggingConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let level = get_env_or_default("LOG_LEVEL", "info");
        let format = LogFormat::from_str(&get_env_or_default("LOG_FORMAT", "compact"))?;

        Ok(LoggingConfig { level, format })
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.level.to_lowercase().as_str()) {
            return Err(ConfigError::invalid_value(
                "level",
                self.level.clone(),
                "trace, debug, info, warn, or error",
            ));
        }

        Ok(())
    }

    fn config_sources(&self) -> HashMap<String, ConfigSource> {
        let mut sources = HashMap::new();
        sources.insert("level".to_string(), ConfigSource::of("LOG_LEVEL", "info"));
        sources.insert("format".to_string(), ConfigSource::of("LOG_FORMAT", "compact"));
        sources
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    const VARS: &[&str] = &[
        "APP_ENV",
        "DATABASE_URL",
        "DB_MAX_CONNECTIONS",
        "DB_MIN_CONNECTIONS",
        "DB_ACQUIRE_TIMEOUT",
        "PAGELINKS_TABLE_PREFIX",
        "PAGELINKS_NAMESPACE",
        "PAGELINKS_FAN_OUT",
        "LOG_LEVEL",
        "LOG_FORMAT",
    ];

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn test_defaults_with_only_database_url() {
        clear_env();
        env::set_var("DATABASE_URL", "postgres://localhost/cms");

        let config = AppConfig::from_env().unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.database.max_connections, 10);
        assert_eq!(config.database.min_connections, 1);
        assert_eq!(config.resolver, ResolverConfig::default());
        assert_eq!(config.logging, LoggingConfig::default());

        let sources = config.resolver.config_sources();
        assert!(sources["namespace"].is_default());

        clear_env();
    }

    #[test]
    #[serial]
    fn test_missing_database_url() {
        clear_env();
        let err = AppConfig::from_env().unwrap_err();
        assert_eq!(
            err,
            ConfigError::MissingEnvVar {
                var: "DATABASE_URL".to_string()
            }
        );
    }

    #[test]
    #[serial]
    fn test_resolver_settings_from_env() {
        clear_env();
        env::set_var("DATABASE_URL", "postgres://localhost/cms");
        env::set_var("PAGELINKS_TABLE_PREFIX", "default_");
        env::set_var("PAGELINKS_FAN_OUT", "4");
        env::set_var("LOG_FORMAT", "json");

        let config = AppConfig::from_env().unwrap();
        assert_eq!(config.resolver.table_prefix, "default_");
        assert_eq!(config.resolver.fan_out, 4);
        assert_eq!(config.logging.format, LogFormat::Json);
        assert!(config.resolver.config_sources()["table_prefix"].is_env_var());

        clear_env();
    }

    #[test]
    #[serial]
    fn test_unparseable_number_is_reported() {
        clear_env();
        env::set_var("DATABASE_URL", "postgres://localhost/cms");
        env::set_var("PAGELINKS_FAN_OUT", "many");

        match AppConfig::from_env() {
            Err(ConfigError::InvalidValue { field, value, .. }) => {
                assert_eq!(field, "fan_out");
                assert_eq!(value, "many");
            }
            other => panic!("expected InvalidValue, got {:?}", other),
        }

        clear_env();
    }

    #[test]
    fn test_resolver_validation() {
        let mut config = ResolverConfig::default();
        assert!(config.validate().is_ok());

        config.table_prefix = "site-1".to_string();
        assert!(config.validate().is_err());

        config.table_prefix = "site_1_".to_string();
        config.fan_out = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_database_validation() {
        let config = DatabaseConfig {
            url: "postgres://localhost/cms".to_string(),
            max_connections: 2,
            min_connections: 5,
            acquire_timeout_seconds: 30,
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationFailed { .. })
        ));
    }

    #[test]
    fn test_environment_parsing() {
        assert_eq!("prod".parse::<Environment>().unwrap(), Environment::Production);
        assert_eq!("Test".parse::<Environment>().unwrap(), Environment::Testing);
        assert!("staging".parse::<Environment>().is_err());
    }
}
