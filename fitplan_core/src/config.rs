//! Configuration file support for Fitplan.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/fitplan/config.toml`.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub generation: GenerationConfig,
}

/// Data storage configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

/// Plan generation configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Pause before a generated plan is returned
    #[serde(default = "default_response_delay_ms")]
    pub response_delay_ms: u64,

    /// Fixed seed for exercise selection; random when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            response_delay_ms: default_response_delay_ms(),
            seed: None,
        }
    }
}

impl GenerationConfig {
    pub fn response_delay(&self) -> Duration {
        Duration::from_millis(self.response_delay_ms)
    }
}

// Default value functions
fn home_fallback(suffix: &str) -> PathBuf {
    match std::env::var_os("HOME") {
        Some(home) => PathBuf::from(home).join(suffix),
        None => PathBuf::from(".").join(suffix),
    }
}

fn default_data_dir() -> PathBuf {
    let base = dirs::data_local_dir().unwrap_or_else(|| home_fallback(".local/share"));
    base.join("fitplan")
}

fn default_response_delay_ms() -> u64 {
    800
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!(
                "No config file found at {:?}, using defaults",
                config_path
            );
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        if config.data.data_dir.as_os_str().is_empty() {
            return Err(Error::Config(format!("{:?}: data_dir must not be empty", path)));
        }
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir().unwrap_or_else(|| home_fallback(".config"));
        base.join("fitplan").join("config.toml")
    }
}
