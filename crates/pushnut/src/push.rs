//! Push orchestration.
//!
//! Resolves settings, names and bundles a sample app, hands it to
//! [`cf::push_app`], and prints the summary. Runs are strictly sequential and
//! stop at the first error.

use std::io::Write;

use tracing::{debug, info};

use crate::catalog::{self, SampleApp, APP_PREFIX, SAMPLE_APPS};
use crate::cf::{self, Platform};
use crate::error::Result;
use crate::report::PushReport;
use crate::settings::PushSettings;
use crate::summary::print_summary;

/// What `push` was asked to push.
#[derive(Debug, Clone, Copy)]
pub enum PushTarget {
    /// Every sample app, in table order.
    All,
    /// A single sample app.
    App(&'static SampleApp),
}

impl PushTarget {
    /// Parse a command-line target: `all`, a command name, or an alias.
    ///
    /// # Errors
    ///
    /// Returns an error if no sample app matches.
    pub fn parse(name: &str) -> Result<Self> {
        if name == "all" {
            return Ok(Self::All);
        }
        catalog::require(name).map(Self::App)
    }

    /// The apps this target covers.
    #[must_use]
    pub fn apps(&self) -> Vec<&'static SampleApp> {
        match self {
            Self::All => SAMPLE_APPS.iter().collect(),
            Self::App(app) => vec![*app],
        }
    }
}

/// Push one sample app and print its summary to `out`.
///
/// # Errors
///
/// Returns the first error of: mapping the settings, building the bundle,
/// pushing, or printing the summary.
pub async fn run_sample_app_push<P, W>(
    platform: &P,
    app: &SampleApp,
    settings: &PushSettings,
    app_name_length: usize,
    out: &mut W,
) -> Result<PushReport>
where
    P: Platform + ?Sized,
    W: Write,
{
    let resolved = settings.resolve()?;
    let app_name = app.random_app_name(app_name_length);
    let bundle = app.bundle()?;
    debug!(
        app = %app_name,
        digest = %bundle.digest(),
        "Prepared {} sample app bundle",
        app.caption
    );

    let report = cf::push_app(platform, app.caption, &app_name, &bundle, resolved.cleanup).await?;
    print_summary(out, app.caption, &report, resolved.summary, resolved.output)?;
    Ok(report)
}

/// Push every app of `target` one after another.
///
/// # Errors
///
/// Returns the first error; apps after the failing one are not pushed.
pub async fn run_target<P, W>(
    platform: &P,
    target: PushTarget,
    settings: &PushSettings,
    app_name_length: usize,
    out: &mut W,
) -> Result<Vec<PushReport>>
where
    P: Platform + ?Sized,
    W: Write,
{
    let apps = target.apps();
    let mut reports = Vec::with_capacity(apps.len());
    for app in apps {
        reports.push(run_sample_app_push(platform, app, settings, app_name_length, out).await?);
    }
    Ok(reports)
}

/// Push every sample app in catalog order, stopping at the first failure.
///
/// # Errors
///
/// Returns the first error encountered.
pub async fn run_all<P, W>(
    platform: &P,
    settings: &PushSettings,
    app_name_length: usize,
    out: &mut W,
) -> Result<Vec<PushReport>>
where
    P: Platform + ?Sized,
    W: Write,
{
    run_target(platform, PushTarget::All, settings, app_name_length, out).await
}

/// Whether an app name looks like one this tool pushed.
#[must_use]
pub fn is_pushnut_app(name: &str) -> bool {
    name.strip_prefix(APP_PREFIX)
        .is_some_and(|rest| rest.starts_with('-'))
}

/// Delete apps left behind by earlier runs, e.g. with `--delete never`.
///
/// With `dry_run` the apps are only listed. Returns the affected names.
///
/// # Errors
///
/// Returns an error if the platform is not ready, apps can't be listed, or a
/// deletion fails. Deletion stops at the first failure.
pub async fn cleanup_apps<P, W>(platform: &P, dry_run: bool, out: &mut W) -> Result<Vec<String>>
where
    P: Platform + ?Sized,
    W: Write,
{
    platform.ensure_ready().await?;

    let leftovers: Vec<String> = platform
        .list_apps()
        .await?
        .into_iter()
        .filter(|name| is_pushnut_app(name))
        .collect();

    if leftovers.is_empty() {
        writeln!(out, "No leftover {APP_PREFIX} apps found.")?;
        return Ok(leftovers);
    }

    for name in &leftovers {
        if dry_run {
            writeln!(out, "Would delete {name}")?;
        } else {
            platform.delete_app(name).await?;
            info!(app = %name, "Deleted leftover app");
            writeln!(out, "Deleted {name}")?;
        }
    }
    Ok(leftovers)
}
