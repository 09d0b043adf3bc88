//! Error types for MixMuse.rs

use thiserror::Error;

/// Main error type for MixMuse.rs operations
#[derive(Debug, Error)]
pub enum MuseError {
    #[error("Invalid {kind} value: '{value}'")]
    InvalidEnumValue { kind: &'static str, value: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl MuseError {
    /// Shorthand for an unrecognized enumeration label
    pub fn invalid_enum(kind: &'static str, value: impl Into<String>) -> Self {
        MuseError::InvalidEnumValue {
            kind,
            value: value.into(),
        }
    }
}

/// Result type alias for MixMuse operations
pub type Result<T> = std::result::Result<T, MuseError>;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },

    #[error("Invalid configuration format: {message}")]
    InvalidFormat { message: String },

    #[error("Invalid configuration value for {key}: {value}")]
    InvalidValue { key: String, value: String },

    #[error("Unsupported configuration key: {key}")]
    UnsupportedKey { key: String },
}

impl From<ConfigError> for MuseError {
    fn from(error: ConfigError) -> Self {
        MuseError::Config {
            message: error.to_string(),
        }
    }
}

impl From<config::ConfigError> for MuseError {
    fn from(error: config::ConfigError) -> Self {
        MuseError::Config {
            message: error.to_string(),
        }
    }
}

impl From<toml::de::Error> for MuseError {
    fn from(error: toml::de::Error) -> Self {
        ConfigError::InvalidFormat {
            message: error.to_string(),
        }
        .into()
    }
}

impl From<toml::ser::Error> for MuseError {
    fn from(error: toml::ser::Error) -> Self {
        ConfigError::InvalidFormat {
            message: error.to_string(),
        }
        .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_enum_message() {
        let error = MuseError::invalid_enum("music style", "polka");
        assert_eq!(error.to_string(), "Invalid music style value: 'polka'");
    }

    #[test]
    fn test_config_error_conversion() {
        let error: MuseError = ConfigError::UnsupportedKey {
            key: "defaults.mood".to_string(),
        }
        .into();

        match error {
            MuseError::Config { message } => assert!(message.contains("defaults.mood")),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
