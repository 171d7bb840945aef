//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::error::Result;
use crate::push::PushTarget;

/// Push command arguments.
#[derive(Debug, Args)]
pub struct PushCommand {
    /// Sample app to push (command name or alias), or `all`
    #[arg(value_name = "APP")]
    pub app: String,

    /// Delete the app afterwards: always, never, on-success
    #[arg(short, long, value_name = "WHEN")]
    pub delete: Option<String>,

    /// Summary detail: quiet, short, full
    #[arg(short, long, value_name = "LEVEL")]
    pub summary: Option<String>,

    /// Structured output for full summaries: json, yaml
    #[arg(short, long, value_name = "FORMAT")]
    pub output: Option<String>,
}

/// Cleanup command arguments.
#[derive(Debug, Args)]
pub struct CleanupCommand {
    /// Only list the apps that would be deleted
    #[arg(long)]
    pub dry_run: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show configuration file path
    Path,

    /// Validate configuration file
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

impl PushCommand {
    /// Resolve the requested app against the sample app table.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::UnknownSampleApp`] if nothing matches.
    pub fn target(&self) -> Result<PushTarget> {
        PushTarget::parse(&self.app)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn push(app: &str) -> PushCommand {
        PushCommand {
            app: app.to_string(),
            delete: None,
            summary: None,
            output: None,
        }
    }

    #[test]
    fn test_target_all() {
        assert!(matches!(push("all").target(), Ok(PushTarget::All)));
    }

    #[test]
    fn test_target_alias() {
        assert!(matches!(
            push("static").target(),
            Ok(PushTarget::App(app)) if app.caption == "Staticfile"
        ));
    }

    #[test]
    fn test_target_unknown_is_a_crate_error() {
        let err = push("cobol").target().unwrap_err();
        assert!(matches!(err, Error::UnknownSampleApp(ref name) if name == "cobol"));
    }
}
