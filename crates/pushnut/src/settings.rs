//! Push settings and the mappers from their string form.
//!
//! The `delete`, `summary` and `output` settings arrive as strings, either from
//! command-line flags or from the configuration file, and are mapped to enums
//! once per push.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Error, Result};

/// What to do with a pushed app once the push is over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CleanupSetting {
    /// Delete the app whether the push worked or not.
    Always,
    /// Keep the app.
    Never,
    /// Delete the app only if the push worked.
    OnSuccess,
}

impl CleanupSetting {
    /// Whether the app should be deleted given the outcome of the push.
    #[must_use]
    pub fn should_delete(self, push_succeeded: bool) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::OnSuccess => push_succeeded,
        }
    }
}

impl std::fmt::Display for CleanupSetting {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Always => write!(f, "always"),
            Self::Never => write!(f, "never"),
            Self::OnSuccess => write!(f, "on-success"),
        }
    }
}

/// Structured output format for full summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputType {
    /// No structured output, print the human readable report.
    #[default]
    None,
    /// JSON document.
    Json,
    /// YAML document.
    Yaml,
}

/// How much to print once an app was pushed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SummarySetting {
    /// Print nothing.
    Quiet,
    /// One line with the total duration.
    #[default]
    Short,
    /// Per-phase report, or a structured document if an output type is set.
    Full,
}

/// Map the `--delete` value to a [`CleanupSetting`].
///
/// # Errors
///
/// Returns [`Error::UnsupportedDeleteSetting`] for anything but `always`,
/// `never` and `on-success`.
pub fn map_delete_setting(setting: &str) -> Result<CleanupSetting> {
    match setting {
        "always" => Ok(CleanupSetting::Always),
        "never" => Ok(CleanupSetting::Never),
        "on-success" => Ok(CleanupSetting::OnSuccess),
        other => Err(Error::UnsupportedDeleteSetting(other.to_string())),
    }
}

/// Map the `--output` value to an [`OutputType`].
///
/// Case-insensitive. Unlike an unknown delete setting, an unknown value is not
/// an error: it falls back to [`OutputType::None`] with a warning.
#[must_use]
pub fn map_output_setting(setting: &str) -> OutputType {
    match setting.to_lowercase().as_str() {
        "json" => OutputType::Json,
        "yaml" => OutputType::Yaml,
        "" => OutputType::None,
        _ => {
            warn!(output = %setting, "Unsupported output type, printing the regular summary");
            OutputType::None
        }
    }
}

/// Map the `--summary` value to a [`SummarySetting`].
///
/// # Errors
///
/// Returns [`Error::UnsupportedSummarySetting`] for anything but `quiet`,
/// `short` (or `oneline`) and `full`.
pub fn map_summary_setting(setting: &str) -> Result<SummarySetting> {
    match setting {
        "quiet" => Ok(SummarySetting::Quiet),
        "short" | "oneline" => Ok(SummarySetting::Short),
        "full" => Ok(SummarySetting::Full),
        other => Err(Error::UnsupportedSummarySetting(other.to_string())),
    }
}

/// Raw setting values for one invocation, before mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushSettings {
    /// Value of the delete setting.
    pub delete: String,
    /// Value of the summary setting.
    pub summary: String,
    /// Value of the output setting.
    pub output: String,
}

/// Settings after mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedSettings {
    /// What happens to the app afterwards.
    pub cleanup: CleanupSetting,
    /// Summary detail level.
    pub summary: SummarySetting,
    /// Structured output type.
    pub output: OutputType,
}

impl PushSettings {
    /// Map all three settings, the delete setting first.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete or summary setting is unsupported.
    pub fn resolve(&self) -> Result<ResolvedSettings> {
        let cleanup = map_delete_setting(&self.delete)?;
        let summary = map_summary_setting(&self.summary)?;
        let output = map_output_setting(&self.output);
        Ok(ResolvedSettings {
            cleanup,
            summary,
            output,
        })
    }
}
