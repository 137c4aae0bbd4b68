//! Configuration management
//!
//! Loads and saves configuration from XDG-compliant paths.
//! Config location: ~/.config/geokode/config.toml

pub mod defaults;

use crate::error::{Error, Result};
use crate::geocoder::Platform;
use defaults::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Settings shared by every platform
    #[serde(default)]
    pub geocoder: GeocoderConfig,

    /// Android-specific settings
    #[serde(default)]
    pub android: AndroidConfig,

    /// Replay fixture settings
    #[serde(default)]
    pub replay: ReplayConfig,
}

/// Settings shared by every platform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocoderConfig {
    /// Which native platform to drive
    #[serde(default = "default_platform")]
    pub platform: Platform,

    /// Maximum number of results per query
    #[serde(default = "default_max_results")]
    pub max_results: usize,

    /// Seconds to wait for a native completion (0 = wait forever)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Android-specific settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AndroidConfig {
    /// API level of the device; selects the geocoder call shape
    #[serde(default = "default_api_level")]
    pub api_level: u32,
}

/// Replay fixture settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReplayConfig {
    /// Path to the JSON fixture backing the native services
    #[serde(default)]
    pub fixture: String,
}

// Default value functions for serde
fn default_platform() -> Platform {
    Platform::from_str(DEFAULT_PLATFORM).unwrap_or_default()
}
fn default_max_results() -> usize {
    DEFAULT_MAX_RESULTS
}
fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}
fn default_api_level() -> u32 {
    DEFAULT_API_LEVEL
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            platform: default_platform(),
            max_results: default_max_results(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for AndroidConfig {
    fn default() -> Self {
        Self {
            api_level: default_api_level(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|p| p.join(APP_DIR_NAME))
            .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Load configuration from the default path
    ///
    /// Creates default config if file doesn't exist
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from `path`, creating it with defaults if missing
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            let config = Config::default();
            config.save_to(path)?;
            return Ok(config);
        }

        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read config file: {}", e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse config file: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to the default path
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to `path`
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                Error::Config(format!("Failed to create config directory: {}", e))
            })?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(path, content)
            .map_err(|e| Error::Config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    /// Reject values no backend can work with
    pub fn validate(&self) -> Result<()> {
        if self.geocoder.max_results == 0 {
            return Err(Error::Config("max_results must be at least 1".to_string()));
        }
        Ok(())
    }

    /// Native completion timeout, `None` when disabled
    pub fn timeout(&self) -> Option<Duration> {
        match self.geocoder.timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }

    /// Replay fixture path, if one is configured
    pub fn fixture_path(&self) -> Option<PathBuf> {
        if self.replay.fixture.is_empty() {
            None
        } else {
            Some(PathBuf::from(&self.replay.fixture))
        }
    }

    /// Get a configuration value by key path
    ///
    /// Key format: "section.key"
    /// Returns the value as a string, or None if not found
    pub fn get(&self, key: &str) -> Option<String> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["geocoder", "platform"] => Some(self.geocoder.platform.to_string()),
            ["geocoder", "max_results"] => Some(self.geocoder.max_results.to_string()),
            ["geocoder", "timeout_secs"] => Some(self.geocoder.timeout_secs.to_string()),

            ["android", "api_level"] => Some(self.android.api_level.to_string()),

            ["replay", "fixture"] => Some(self.replay.fixture.clone()),

            _ => None,
        }
    }

    /// Set a configuration value by key path
    ///
    /// Key format: "section.key"
    /// Returns error if key is invalid or value type is wrong
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["geocoder", "platform"] => {
                self.geocoder.platform = Platform::from_str(value).map_err(Error::Config)?;
            }
            ["geocoder", "max_results"] => {
                let max_results: usize = value.parse().map_err(|_| {
                    Error::Config(format!("Invalid max_results value: {}", value))
                })?;
                if max_results == 0 {
                    return Err(Error::Config("max_results must be at least 1".to_string()));
                }
                self.geocoder.max_results = max_results;
            }
            ["geocoder", "timeout_secs"] => {
                self.geocoder.timeout_secs = value.parse().map_err(|_| {
                    Error::Config(format!("Invalid timeout value: {}", value))
                })?;
            }

            ["android", "api_level"] => {
                self.android.api_level = value.parse().map_err(|_| {
                    Error::Config(format!("Invalid API level: {}", value))
                })?;
            }

            ["replay", "fixture"] => {
                self.replay.fixture = value.to_string();
            }

            _ => {
                return Err(Error::Config(format!("Unknown config key: {}", key)));
            }
        }

        Ok(())
    }

    /// List all available config keys
    pub fn available_keys() -> Vec<&'static str> {
        vec![
            "geocoder.platform",
            "geocoder.max_results",
            "geocoder.timeout_secs",
            "android.api_level",
            "replay.fixture",
        ]
    }
}
