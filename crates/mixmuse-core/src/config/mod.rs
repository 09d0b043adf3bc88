//! Configuration Management
//!
//! This module handles the runtime side of MixMuse.rs configuration:
//! - Discovering, loading and saving configuration files
//! - Environment variable overrides
//! - Reading and writing single values by dotted key path

use mixmuse_shared::{Complexity, ConfigError, MuseConfig, MusicStyle, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

/// Configuration file name looked up during discovery
pub const CONFIG_FILE_NAME: &str = "mixmuse.toml";

/// Key paths accepted by [`ConfigManager::get_value`] and [`ConfigManager::set_value`]
pub const KEY_PATHS: [&str; 7] = [
    "defaults.style",
    "defaults.complexity",
    "defaults.tempo",
    "features.musical_analysis",
    "features.naming_suggestions",
    "logging.level",
    "logging.json",
];

/// Configuration manager for MixMuse.rs
pub struct ConfigManager {
    /// Current configuration
    config: Arc<RwLock<MuseConfig>>,

    /// Configuration file path
    config_path: Option<PathBuf>,
}

impl ConfigManager {
    /// Create a new configuration manager
    pub fn new(config: MuseConfig) -> Self {
        Self {
            config: Arc::new(RwLock::new(config)),
            config_path: None,
        }
    }

    /// Create configuration manager from file, with environment overrides
    #[instrument]
    pub async fn from_file<P: AsRef<Path> + std::fmt::Debug>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {}", path.display());

        let config = if path.exists() {
            MuseConfig::load_layered(Some(path), MuseConfig::env_source())?
        } else {
            warn!("Configuration file not found, using defaults");
            MuseConfig::load_with_env()?
        };

        Ok(Self {
            config: Arc::new(RwLock::new(config)),
            config_path: Some(path.to_path_buf()),
        })
    }

    /// Create with automatic configuration discovery
    ///
    /// Falls back to defaults plus environment when no file is found. Nothing
    /// is written to disk.
    #[instrument]
    pub async fn auto_discover() -> Result<Self> {
        info!("Auto-discovering configuration");

        for path in Self::get_config_search_paths() {
            if path.exists() {
                debug!("Found configuration at: {}", path.display());
                return Self::from_file(path).await;
            }
        }

        info!("No configuration file found, using defaults");
        Ok(Self::new(MuseConfig::load_with_env()?))
    }

    /// Path the configuration was loaded from, if any
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// Get current configuration (read-only)
    pub async fn get_config(&self) -> MuseConfig {
        self.config.read().await.clone()
    }

    /// Update configuration
    #[instrument(skip(self, new_config))]
    pub async fn update_config(&self, new_config: MuseConfig) -> Result<()> {
        info!("Updating configuration");

        new_config.validate()?;
        *self.config.write().await = new_config;

        if let Some(ref path) = self.config_path {
            self.save_to_file(path).await?;
        }

        info!("Configuration updated successfully");
        Ok(())
    }

    /// Save current configuration to file
    #[instrument(skip(self))]
    pub async fn save_to_file<P: AsRef<Path> + std::fmt::Debug>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        debug!("Saving configuration to: {}", path.display());

        let config = self.config.read().await;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        config.save_to_file(path)?;

        info!("Configuration saved to: {}", path.display());
        Ok(())
    }

    /// Get configuration value by key path
    pub async fn get_value(&self, key_path: &str) -> Option<ConfigValue> {
        let config = self.config.read().await;
        Self::extract_value_by_path(&config, key_path)
    }

    /// Set configuration value by key path
    ///
    /// The change is validated before it is stored, and persisted when the
    /// manager was loaded from a file.
    #[instrument(skip(self, value))]
    pub async fn set_value(&self, key_path: &str, value: ConfigValue) -> Result<()> {
        debug!("Setting config value: {} = {:?}", key_path, value);

        let mut config = self.config.write().await;
        let mut updated = config.clone();
        Self::set_value_by_path(&mut updated, key_path, value)?;
        updated.validate()?;
        *config = updated;

        if let Some(ref path) = self.config_path {
            config.save_to_file(path)?;
        }

        Ok(())
    }

    /// Get configuration search paths
    fn get_config_search_paths() -> Vec<PathBuf> {
        let mut paths = vec![
            PathBuf::from(".").join(CONFIG_FILE_NAME),
            PathBuf::from("./config").join(CONFIG_FILE_NAME),
        ];

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("mixmuse").join(CONFIG_FILE_NAME));
        }

        if let Some(home_dir) = dirs::home_dir() {
            paths.push(home_dir.join(".mixmuse.toml"));
        }

        paths
    }

    /// Extract configuration value by dot-separated path
    fn extract_value_by_path(config: &MuseConfig, key_path: &str) -> Option<ConfigValue> {
        let parts: Vec<&str> = key_path.split('.').collect();

        match parts.as_slice() {
            ["defaults", "style"] => Some(ConfigValue::String(config.defaults.style.to_string())),
            ["defaults", "complexity"] => Some(ConfigValue::String(config.defaults.complexity.to_string())),
            ["defaults", "tempo"] => Some(ConfigValue::Number(f64::from(config.defaults.tempo))),
            ["features", "musical_analysis"] => Some(ConfigValue::Bool(config.features.musical_analysis)),
            ["features", "naming_suggestions"] => Some(ConfigValue::Bool(config.features.naming_suggestions)),
            ["logging", "level"] => Some(ConfigValue::String(config.logging.level.clone())),
            ["logging", "json"] => Some(ConfigValue::Bool(config.logging.json)),
            _ => None,
        }
    }

    /// Set configuration value by dot-separated path
    fn set_value_by_path(config: &mut MuseConfig, key_path: &str, value: ConfigValue) -> Result<()> {
        let parts: Vec<&str> = key_path.split('.').collect();

        match (parts.as_slice(), value) {
            (["defaults", "style"], ConfigValue::String(style)) => {
                config.defaults.style = style.parse::<MusicStyle>()?;
            }
            (["defaults", "complexity"], ConfigValue::String(level)) => {
                config.defaults.complexity = level.parse::<Complexity>()?;
            }
            (["defaults", "tempo"], ConfigValue::Number(bpm)) => {
                if bpm.fract() != 0.0 || !(0.0..=f64::from(u32::MAX)).contains(&bpm) {
                    return Err(invalid_value(key_path, bpm));
                }
                config.defaults.tempo = bpm as u32;
            }
            (["features", "musical_analysis"], ConfigValue::Bool(enabled)) => {
                config.features.musical_analysis = enabled;
            }
            (["features", "naming_suggestions"], ConfigValue::Bool(enabled)) => {
                config.features.naming_suggestions = enabled;
            }
            (["logging", "level"], ConfigValue::String(level)) => {
                config.logging.level = level;
            }
            (["logging", "json"], ConfigValue::Bool(json)) => {
                config.logging.json = json;
            }
            (_, value) if KEY_PATHS.contains(&key_path) => {
                return Err(invalid_value(key_path, value));
            }
            _ => {
                return Err(ConfigError::UnsupportedKey {
                    key: key_path.to_string(),
                }
                .into());
            }
        }

        Ok(())
    }
}

fn invalid_value(key_path: &str, value: impl std::fmt::Display) -> mixmuse_shared::MuseError {
    ConfigError::InvalidValue {
        key: key_path.to_string(),
        value: value.to_string(),
    }
    .into()
}

/// Configuration value types
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValue {
    String(String),
    Bool(bool),
    Number(f64),
}

impl ConfigValue {
    /// Interpret command-line text: booleans, then numbers, then plain strings
    pub fn parse_loose(raw: &str) -> Self {
        let raw = raw.trim();
        if let Ok(flag) = raw.parse::<bool>() {
            ConfigValue::Bool(flag)
        } else if let Ok(number) = raw.parse::<f64>() {
            ConfigValue::Number(number)
        } else {
            ConfigValue::String(raw.to_string())
        }
    }
}

impl std::fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigValue::String(s) => write!(f, "{}", s),
            ConfigValue::Bool(b) => write!(f, "{}", b),
            ConfigValue::Number(n) => write!(f, "{}", n),
        }
    }
}
