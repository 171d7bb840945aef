//! The result of one push.
//!
//! A [`PushReport`] records when a push started and finished, when each phase
//! of `cf push` was first seen, and which stack and buildpack the platform
//! picked. Phase durations are derived from those timestamps.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// A phase of `cf push`, in the order the platform goes through them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// The app record is created.
    Creating,
    /// App bits are uploaded.
    Uploading,
    /// The buildpack builds a droplet.
    Staging,
    /// The droplet is started and health-checked.
    Starting,
}

impl Phase {
    /// All phases in order.
    pub const ALL: [Phase; 4] = [
        Phase::Creating,
        Phase::Uploading,
        Phase::Staging,
        Phase::Starting,
    ];
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Creating => write!(f, "creating"),
            Self::Uploading => write!(f, "uploading"),
            Self::Staging => write!(f, "staging"),
            Self::Starting => write!(f, "starting"),
        }
    }
}

/// When each phase was first observed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhaseMarkers {
    /// Start of the creating phase.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creating: Option<DateTime<Utc>>,
    /// Start of the uploading phase.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uploading: Option<DateTime<Utc>>,
    /// Start of the staging phase.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub staging: Option<DateTime<Utc>>,
    /// Start of the starting phase.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub starting: Option<DateTime<Utc>>,
}

impl PhaseMarkers {
    /// The marker for `phase`.
    #[must_use]
    pub fn get(&self, phase: Phase) -> Option<DateTime<Utc>> {
        match phase {
            Phase::Creating => self.creating,
            Phase::Uploading => self.uploading,
            Phase::Staging => self.staging,
            Phase::Starting => self.starting,
        }
    }

    /// Record `at` for `phase` unless it was already seen.
    ///
    /// Returns `true` if the marker was set by this call.
    pub fn mark(&mut self, phase: Phase, at: DateTime<Utc>) -> bool {
        let slot = match phase {
            Phase::Creating => &mut self.creating,
            Phase::Uploading => &mut self.uploading,
            Phase::Staging => &mut self.staging,
            Phase::Starting => &mut self.starting,
        };
        if slot.is_some() {
            return false;
        }
        *slot = Some(at);
        true
    }

    /// Whether every phase was observed.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        Phase::ALL.iter().all(|p| self.get(*p).is_some())
    }

    /// Whether no phase was observed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        Phase::ALL.iter().all(|p| self.get(*p).is_none())
    }
}

/// Summary of one push.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PushReport {
    /// Caption of the sample app.
    pub caption: String,
    /// Generated name of the pushed app.
    pub app_name: String,
    /// Stack the app ran on.
    pub stack: String,
    /// Buildpack that staged the app.
    pub buildpack: String,
    /// Digest of the pushed bundle.
    pub bundle_digest: String,
    /// When the push started.
    pub started: DateTime<Utc>,
    /// When the push finished.
    pub finished: DateTime<Utc>,
    /// Phase markers seen during the push.
    #[serde(default, skip_serializing_if = "PhaseMarkers::is_empty")]
    pub phases: PhaseMarkers,
}

fn span(from: Option<DateTime<Utc>>, to: Option<DateTime<Utc>>) -> Duration {
    match (from, to) {
        (Some(from), Some(to)) => (to - from).to_std().unwrap_or_default(),
        _ => Duration::ZERO,
    }
}

impl PushReport {
    /// Total time from start to finish.
    #[must_use]
    pub fn elapsed_time(&self) -> Duration {
        span(Some(self.started), Some(self.finished))
    }

    /// Time until the platform started creating the app.
    #[must_use]
    pub fn init_time(&self) -> Duration {
        span(Some(self.started), self.phases.creating)
    }

    /// Duration of the creating phase.
    #[must_use]
    pub fn creating_time(&self) -> Duration {
        span(self.phases.creating, self.phases.uploading)
    }

    /// Duration of the uploading phase.
    #[must_use]
    pub fn uploading_time(&self) -> Duration {
        span(self.phases.uploading, self.phases.staging)
    }

    /// Duration of the staging phase.
    #[must_use]
    pub fn staging_time(&self) -> Duration {
        span(self.phases.staging, self.phases.starting)
    }

    /// Duration of the starting phase.
    #[must_use]
    pub fn starting_time(&self) -> Duration {
        span(self.phases.starting, Some(self.finished))
    }

    /// Whether all phases were observed, so per-phase times are meaningful.
    #[must_use]
    pub fn has_time_details(&self) -> bool {
        self.phases.is_complete()
    }

    /// Stack the app ran on.
    #[must_use]
    pub fn stack(&self) -> &str {
        &self.stack
    }

    /// Buildpack that staged the app.
    #[must_use]
    pub fn buildpack(&self) -> &str {
        &self.buildpack
    }

    /// Serialize as JSON, indented by three spaces.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        let mut buffer = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"   ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
        self.serialize(&mut serializer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }

    /// Serialize as YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::TimeZone;

    pub(crate) fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    pub(crate) fn sample_report() -> PushReport {
        PushReport {
            caption: "Golang".to_string(),
            app_name: "pushnut-golang-app-abc123".to_string(),
            stack: "cflinuxfs4".to_string(),
            buildpack: "go_buildpack".to_string(),
            bundle_digest: "00ff".to_string(),
            started: at(0),
            finished: at(100),
            phases: PhaseMarkers {
                creating: Some(at(2)),
                uploading: Some(at(5)),
                staging: Some(at(15)),
                starting: Some(at(75)),
            },
        }
    }

    #[test]
    fn test_phase_durations() {
        let report = sample_report();
        assert_eq!(report.elapsed_time(), Duration::from_secs(100));
        assert_eq!(report.init_time(), Duration::from_secs(2));
        assert_eq!(report.creating_time(), Duration::from_secs(3));
        assert_eq!(report.uploading_time(), Duration::from_secs(10));
        assert_eq!(report.staging_time(), Duration::from_secs(60));
        assert_eq!(report.starting_time(), Duration::from_secs(25));
        assert!(report.has_time_details());
    }

    #[test]
    fn test_missing_markers() {
        let mut report = sample_report();
        report.phases.staging = None;
        assert!(!report.has_time_details());
        assert_eq!(report.uploading_time(), Duration::ZERO);
        assert_eq!(report.staging_time(), Duration::ZERO);
        assert_eq!(report.creating_time(), Duration::from_secs(3));
    }

    #[test]
    fn test_clock_going_backwards_is_zero() {
        let mut report = sample_report();
        report.finished = at(-10);
        assert_eq!(report.elapsed_time(), Duration::ZERO);
    }

    #[test]
    fn test_mark_keeps_first() {
        let mut markers = PhaseMarkers::default();
        assert!(markers.is_empty());
        assert!(markers.mark(Phase::Staging, at(1)));
        assert!(!markers.mark(Phase::Staging, at(2)));
        assert_eq!(markers.get(Phase::Staging), Some(at(1)));
        assert!(!markers.is_empty());
        assert!(!markers.is_complete());
    }

    #[test]
    fn test_phase_display() {
        let names: Vec<_> = Phase::ALL.iter().map(ToString::to_string).collect();
        assert_eq!(names, vec!["creating", "uploading", "staging", "starting"]);
    }

    #[test]
    fn test_to_json_uses_three_space_indent() {
        let json = sample_report().to_json().unwrap();
        assert!(json.starts_with("{\n   \"caption\": \"Golang\""));
        assert!(json.contains("\n      \"creating\""));

        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["stack"], "cflinuxfs4");
    }

    #[test]
    fn test_to_json_omits_empty_phases() {
        let mut report = sample_report();
        report.phases = PhaseMarkers::default();
        let json = report.to_json().unwrap();
        assert!(!json.contains("phases"));
    }

    #[test]
    fn test_to_yaml() {
        let yaml = sample_report().to_yaml().unwrap();
        assert!(yaml.contains("caption: Golang"));
        assert!(yaml.contains("buildpack: go_buildpack"));
        assert!(yaml.contains("phases:"));

        let parsed: PushReport = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed, sample_report());
    }
}
