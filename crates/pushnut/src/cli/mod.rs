//! Command-line interface for pushnut.
//!
//! This module provides the CLI structure and the termination routine for the
//! `pushnut` binary.

mod commands;

use std::fmt::Display;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{CleanupCommand, ConfigCommand, PushCommand};

use crate::logging::Verbosity;

/// pushnut - Push sample apps to Cloud Foundry and time every phase
///
/// Pushes a small app for a given runtime with the `cf` client, reports how
/// long ramp-up, creating, uploading, staging and starting took, and deletes
/// the app again.
#[derive(Debug, Parser)]
#[command(name = "pushnut")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Push a sample app (or all of them) and report timings
    Push(PushCommand),

    /// List the available sample apps
    Apps,

    /// Delete pushnut apps left behind by earlier runs
    Cleanup(CleanupCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.verbose, self.quiet)
    }
}

/// Print `error` to stderr and exit with status 1.
pub fn exit_with_error(error: impl Display) -> ! {
    eprintln!("Error: {error}");
    std::process::exit(1)
}
