//! Cloud Foundry access.
//!
//! The [`Platform`] trait is the seam between push orchestration and the
//! platform. [`CfCli`] implements it by running the `cf` command-line client;
//! tests use an in-memory fake.

mod cli;
pub mod output;

use std::path::Path;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

pub use cli::CfCli;

use crate::assets::Bundle;
use crate::error::Result;
use crate::report::{PhaseMarkers, PushReport};
use crate::settings::CleanupSetting;

/// What a successful `cf push` left behind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushTranscript {
    /// When the push process was started.
    pub started: DateTime<Utc>,
    /// When the push process exited.
    pub finished: DateTime<Utc>,
    /// Every stdout line, in order.
    pub lines: Vec<String>,
    /// First occurrence of each phase.
    pub phases: PhaseMarkers,
}

/// Operations pushnut needs from a Cloud Foundry platform.
#[async_trait::async_trait]
pub trait Platform: Send + Sync {
    /// Check that the platform can be talked to.
    ///
    /// # Errors
    ///
    /// Returns an error if the client is missing or not logged in.
    async fn ensure_ready(&self) -> Result<()>;

    /// Push the app in `dir` under `app_name`.
    ///
    /// # Errors
    ///
    /// Returns an error if the push fails or times out.
    async fn push_bundle(&self, app_name: &str, dir: &Path) -> Result<PushTranscript>;

    /// Delete the app and its routes.
    ///
    /// # Errors
    ///
    /// Returns an error if the app could not be deleted.
    async fn delete_app(&self, app_name: &str) -> Result<()>;

    /// Names of all apps in the targeted space.
    ///
    /// # Errors
    ///
    /// Returns an error if the apps could not be listed.
    async fn list_apps(&self) -> Result<Vec<String>>;
}

/// Push `bundle` as `app_name`, apply the cleanup setting, and report.
///
/// With [`CleanupSetting::Always`] the app is deleted even when the push
/// failed. If both the push and the deletion fail, the push error is returned
/// and the deletion error is logged.
///
/// # Errors
///
/// Returns an error if the platform is not ready, the bundle can't be staged
/// on disk, the push fails, or the deletion after a successful push fails.
pub async fn push_app<P: Platform + ?Sized>(
    platform: &P,
    caption: &str,
    app_name: &str,
    bundle: &Bundle,
    cleanup: CleanupSetting,
) -> Result<PushReport> {
    platform.ensure_ready().await?;

    let scratch = tempfile::Builder::new().prefix("pushnut-").tempdir()?;
    bundle.write_to(scratch.path())?;

    info!(app = %app_name, files = bundle.len(), "Pushing {caption} sample app");
    let outcome = platform.push_bundle(app_name, scratch.path()).await;

    if cleanup.should_delete(outcome.is_ok()) {
        debug!(app = %app_name, cleanup = %cleanup, "Deleting app");
        match platform.delete_app(app_name).await {
            Ok(()) => info!(app = %app_name, "Deleted app"),
            Err(err) if outcome.is_err() => {
                warn!(app = %app_name, error = %err, "Failed to delete app after failed push");
            }
            Err(err) => return Err(err),
        }
    } else {
        debug!(app = %app_name, cleanup = %cleanup, "Keeping app");
    }

    let transcript = outcome?;
    Ok(PushReport {
        caption: caption.to_string(),
        app_name: app_name.to_string(),
        stack: output::parse_stack(&transcript.lines),
        buildpack: output::parse_buildpack(&transcript.lines),
        bundle_digest: bundle.digest(),
        started: transcript.started,
        finished: transcript.finished,
        phases: transcript.phases,
    })
}
