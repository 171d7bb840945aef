//! `pushnut` - push sample apps to Cloud Foundry and time every phase
//!
//! This library bundles a small app per runtime, pushes it with the `cf`
//! client, records when each push phase started, and formats the result as a
//! one-line summary, a full report, JSON or YAML.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod assets;
pub mod catalog;
pub mod cf;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod push;
pub mod report;
pub mod settings;
pub mod summary;

pub use catalog::{SampleApp, SAMPLE_APPS};
pub use cf::{CfCli, Platform};
pub use config::Config;
pub use error::{Error, Result};
pub use logging::init_logging;
pub use report::PushReport;
pub use settings::{CleanupSetting, OutputType, SummarySetting};
pub use summary::{human_readable_duration, print_summary};
