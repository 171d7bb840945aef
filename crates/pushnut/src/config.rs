//! Configuration management for pushnut.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::PathBuf;
use std::time::Duration;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::catalog;
use crate::error::{Error, Result};
use crate::settings::{map_delete_setting, map_summary_setting, PushSettings};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default configuration directory name.
const CONFIG_DIR_NAME: &str = "pushnut";

/// Random characters every app name gets at minimum.
const MIN_RANDOM_SUFFIX: usize = 4;

/// Cloud Foundry app names end up in route host names, which are limited to 63 characters.
const MAX_APP_NAME_LENGTH: usize = 63;

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `PUSHNUT_`)
/// 2. TOML config file at `~/.config/pushnut/config.toml`
/// 3. Default values
///
/// Command-line flags override the `[push]` values per invocation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Push defaults.
    pub push: PushConfig,
    /// `cf` client settings.
    pub cf: CfConfig,
}

/// Push-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PushConfig {
    /// Delete the app afterwards: `always`, `never` or `on-success`.
    pub delete: String,
    /// Summary detail level: `quiet`, `short` or `full`.
    pub summary: String,
    /// Structured output for full summaries: `json`, `yaml`, or empty.
    pub output: String,
    /// Total length of generated app names.
    pub app_name_length: usize,
}

/// `cf` client configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CfConfig {
    /// Name or path of the `cf` binary.
    pub binary: String,
    /// Upper bound for a single `cf push`, in seconds.
    pub push_timeout_secs: u64,
}

impl Default for PushConfig {
    fn default() -> Self {
        Self {
            delete: "always".to_string(),
            summary: "short".to_string(),
            output: String::new(),
            app_name_length: 32,
        }
    }
}

impl Default for CfConfig {
    fn default() -> Self {
        Self {
            binary: "cf".to_string(),
            push_timeout_secs: 15 * 60,
        }
    }
}

impl CfConfig {
    /// Get the push timeout as a Duration.
    #[must_use]
    pub fn push_timeout(&self) -> Duration {
        Duration::from_secs(self.push_timeout_secs)
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading, parsing or validation fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed("PUSHNUT_").split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        map_delete_setting(&self.push.delete).map_err(|e| Error::ConfigValidation {
            message: format!("push.delete: {e}"),
        })?;
        map_summary_setting(&self.push.summary).map_err(|e| Error::ConfigValidation {
            message: format!("push.summary: {e}"),
        })?;

        let min_length = catalog::longest_prefix_len() + MIN_RANDOM_SUFFIX;
        if self.push.app_name_length < min_length
            || self.push.app_name_length > MAX_APP_NAME_LENGTH
        {
            return Err(Error::ConfigValidation {
                message: format!(
                    "app_name_length ({}) must be between {min_length} and {MAX_APP_NAME_LENGTH}",
                    self.push.app_name_length
                ),
            });
        }

        if self.cf.binary.trim().is_empty() {
            return Err(Error::ConfigValidation {
                message: "cf.binary must not be empty".to_string(),
            });
        }

        if self.cf.push_timeout_secs == 0 {
            return Err(Error::ConfigValidation {
                message: "push_timeout_secs must be greater than 0".to_string(),
            });
        }

        Ok(())
    }

    /// Push settings with command-line values taking precedence.
    #[must_use]
    pub fn push_settings(
        &self,
        delete: Option<&str>,
        summary: Option<&str>,
        output: Option<&str>,
    ) -> PushSettings {
        PushSettings {
            delete: delete.unwrap_or(&self.push.delete).to_string(),
            summary: summary.unwrap_or(&self.push.summary).to_string(),
            output: output.unwrap_or(&self.push.output).to_string(),
        }
    }
}
