//! Error types for pushnut.
//!
//! This module defines all error types used throughout the pushnut crate,
//! providing enough context to tell a misconfigured flag from a failed push.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for pushnut operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Setting Errors ===
    /// The delete setting is not one of `always`, `never`, `on-success`.
    #[error("unsupported delete setting: {0}")]
    UnsupportedDeleteSetting(String),

    /// The summary setting is not one of `quiet`, `short`, `full`.
    #[error("unsupported summary setting: {0}")]
    UnsupportedSummarySetting(String),

    /// No sample app matches the requested name.
    #[error("failed to detect which sample app is to be tested: {0}")]
    UnknownSampleApp(String),

    // === Bundle Errors ===
    /// A sample app bundle contains an invalid file entry.
    #[error("invalid bundle entry '{path}': {message}")]
    Bundle {
        /// The offending path.
        path: String,
        /// Description of what is wrong with it.
        message: String,
    },

    /// Failed to write a bundle file to disk.
    #[error("failed to write bundle file {path}: {source}")]
    BundleWrite {
        /// Path that couldn't be written.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Platform Errors ===
    /// The `cf` command-line client could not be started.
    #[error("failed to run '{binary}', is the cf CLI installed? {source}")]
    CfCliMissing {
        /// The binary that was invoked.
        binary: String,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The `cf` client has no target or is not logged in.
    #[error("cf CLI is not logged in or has no target: {message}")]
    NotLoggedIn {
        /// Output of the failed `cf target` call.
        message: String,
    },

    /// `cf push` exited unsuccessfully.
    #[error("failed to push app {app_name} (exit code {}):\n{output}", exit_code_display(.code))]
    PushFailed {
        /// Name of the app that was pushed.
        app_name: String,
        /// Exit code, if the process exited normally.
        code: Option<i32>,
        /// Tail of the push output.
        output: String,
    },

    /// `cf delete` exited unsuccessfully.
    #[error("failed to delete app {app_name}: {message}")]
    DeleteFailed {
        /// Name of the app that should have been deleted.
        app_name: String,
        /// Description of what went wrong.
        message: String,
    },

    /// A `cf` command other than push or delete failed.
    #[error("cf {command} failed: {message}")]
    CfCommand {
        /// The sub-command, e.g. `apps`.
        command: &'static str,
        /// Description of what went wrong.
        message: String,
    },

    // === I/O Errors ===
    /// File system or process operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // === Serialization Errors ===
    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization failed.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    // === Generic Errors ===
    /// An operation timed out.
    #[error("operation timed out: {operation}")]
    Timeout {
        /// Description of the operation that timed out.
        operation: String,
    },

    /// An internal error occurred (bug).
    #[error("internal error: {0}")]
    Internal(String),
}

/// A specialized Result type for pushnut operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

fn exit_code_display(code: &Option<i32>) -> String {
    code.map_or_else(|| "none".to_string(), |c| c.to_string())
}

impl Error {
    /// Create a new internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Create a bundle validation error.
    #[must_use]
    pub fn bundle(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Bundle {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a delete failure error.
    #[must_use]
    pub fn delete_failed(app_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::DeleteFailed {
            app_name: app_name.into(),
            message: message.into(),
        }
    }

    /// Create an error for a failed auxiliary `cf` command.
    #[must_use]
    pub fn cf_command(command: &'static str, message: impl Into<String>) -> Self {
        Self::CfCommand {
            command,
            message: message.into(),
        }
    }

    /// Check if this error came from an unusable flag or config value.
    #[must_use]
    pub fn is_setting_error(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedDeleteSetting(_)
                | Self::UnsupportedSummarySetting(_)
                | Self::ConfigValidation { .. }
        )
    }

    /// Check if this error means the push itself failed on the platform.
    #[must_use]
    pub fn is_push_failure(&self) -> bool {
        matches!(self, Self::PushFailed { .. } | Self::Timeout { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_delete_setting_display() {
        let err = Error::UnsupportedDeleteSetting("bogus".to_string());
        assert_eq!(err.to_string(), "unsupported delete setting: bogus");
    }

    #[test]
    fn test_unknown_sample_app_display() {
        let err = Error::UnknownSampleApp("cobol".to_string());
        assert!(err.to_string().contains("cobol"));
    }

    #[test]
    fn test_is_setting_error() {
        assert!(Error::UnsupportedDeleteSetting("x".to_string()).is_setting_error());
        assert!(Error::UnsupportedSummarySetting("x".to_string()).is_setting_error());
        assert!(!Error::internal("x").is_setting_error());
    }

    #[test]
    fn test_is_push_failure() {
        let err = Error::PushFailed {
            app_name: "pushnut-go-app-abc".to_string(),
            code: Some(1),
            output: "FAILED".to_string(),
        };
        assert!(err.is_push_failure());
        assert!(Error::Timeout {
            operation: "cf push".to_string()
        }
        .is_push_failure());
        assert!(!Error::delete_failed("a", "b").is_push_failure());
    }

    #[test]
    fn test_push_failed_display() {
        let err = Error::PushFailed {
            app_name: "pushnut-php-app-xyz".to_string(),
            code: Some(1),
            output: "Staging failed".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("pushnut-php-app-xyz"));
        assert!(msg.contains("exit code 1"));
        assert!(msg.contains("Staging failed"));
    }

    #[test]
    fn test_push_failed_without_code() {
        let err = Error::PushFailed {
            app_name: "app".to_string(),
            code: None,
            output: String::new(),
        };
        assert!(err.to_string().contains("exit code none"));
    }

    #[test]
    fn test_bundle_error_display() {
        let err = Error::bundle("../etc/passwd", "path escapes the bundle root");
        let msg = err.to_string();
        assert!(msg.contains("../etc/passwd"));
        assert!(msg.contains("escapes"));
    }

    #[test]
    fn test_delete_failed_display() {
        let err = Error::delete_failed("pushnut-ruby-sinatra-app-1", "app in use");
        assert_eq!(
            err.to_string(),
            "failed to delete app pushnut-ruby-sinatra-app-1: app in use"
        );
    }

    #[test]
    fn test_cf_command_display() {
        let err = Error::cf_command("apps", "not authorized");
        assert_eq!(err.to_string(), "cf apps failed: not authorized");
    }

    #[test]
    fn test_internal_error() {
        let err = Error::internal("something went wrong");
        assert_eq!(err.to_string(), "internal error: something went wrong");
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_from_json_error() {
        let json_result: std::result::Result<i32, serde_json::Error> =
            serde_json::from_str("not valid json");
        if let Err(json_err) = json_result {
            let err: Error = json_err.into();
            assert!(matches!(err, Error::Json(_)));
        }
    }

    #[test]
    fn test_cf_cli_missing_display() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "No such file");
        let err = Error::CfCliMissing {
            binary: "cf".to_string(),
            source: io_err,
        };
        assert!(err.to_string().contains("'cf'"));
    }

    #[test]
    fn test_bundle_write_error_display() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = Error::BundleWrite {
            path: PathBuf::from("/root/forbidden/main.go"),
            source: io_err,
        };
        assert!(err.to_string().contains("/root/forbidden/main.go"));
    }
}
