use thiserror::Error;

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {var}")]
    MissingEnvVar { var: String },

    #[error("Invalid value for {field}: '{value}', expected {expected}")]
    InvalidValue {
        field: String,
        value: String,
        expected: String,
    },

    #[error("Validation failed for {field}: {reason}")]
    ValidationFailed { field: String, reason: String },
}

impl ConfigError {
    pub fn invalid_value(field: &str, value: impl Into<String>, expected: &str) -> Self {
        ConfigError::InvalidValue {
            field: field.to_string(),
            value: value.into(),
            expected: expected.to_string(),
        }
    }

    pub fn validation_failed(field: &str, reason: impl Into<String>) -> Self {
        ConfigError::ValidationFailed {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}
