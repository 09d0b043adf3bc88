//! Configuration management for MixMuse.rs

use crate::error::{ConfigError, Result};
use crate::types::{Complexity, MusicStyle};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Prefix of environment variables overriding configuration values
pub const ENV_PREFIX: &str = "MIXMUSE";

/// Accepted tempo range for configured defaults (BPM)
pub const TEMPO_RANGE: std::ops::RangeInclusive<u32> = 20..=300;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Main configuration structure for MixMuse.rs
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MuseConfig {
    /// Rendering defaults used when a request does not specify them
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// Feature switches
    #[serde(default)]
    pub features: FeatureConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Default musical rendering settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefaultsConfig {
    pub style: MusicStyle,
    pub complexity: Complexity,
    /// Beats per minute
    pub tempo: u32,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            style: MusicStyle::Jazz,
            complexity: Complexity::Medium,
            tempo: 120,
        }
    }
}

/// Feature switches
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureConfig {
    /// Include the musical pattern in reports
    pub musical_analysis: bool,

    /// Include rename proposals in reports
    pub naming_suggestions: bool,
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            musical_analysis: true,
            naming_suggestions: true,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive, overridden by `RUST_LOG`
    pub level: String,

    /// Emit JSON formatted log lines
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl MuseConfig {
    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ConfigError::FileNotFound {
                path: path.display().to_string(),
            }
            .into(),
            _ => crate::MuseError::Io(e),
        })?;

        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Defaults overridden by `MIXMUSE_*` environment variables
    pub fn load_with_env() -> Result<Self> {
        Self::load_layered(None, Self::env_source())
    }

    /// Defaults, then an optional file, then environment variables
    pub fn load_layered(path: Option<&Path>, env: config::Environment) -> Result<Self> {
        let mut builder = config::Config::builder().add_source(config::Config::try_from(&Self::default())?);

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(false));
        }

        let config: Self = builder.add_source(env).build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Environment source: `MIXMUSE_DEFAULTS__STYLE=rock` sets `defaults.style`
    pub fn env_source() -> config::Environment {
        config::Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if !TEMPO_RANGE.contains(&self.defaults.tempo) {
            return Err(ConfigError::InvalidValue {
                key: "defaults.tempo".to_string(),
                value: self.defaults.tempo.to_string(),
            }
            .into());
        }

        let level = self.logging.level.to_ascii_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(ConfigError::InvalidValue {
                key: "logging.level".to_string(),
                value: self.logging.level.clone(),
            }
            .into());
        }

        Ok(())
    }
}
