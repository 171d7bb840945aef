//! Rendering push reports for humans and scripts.

use std::io::Write;
use std::time::Duration;

use crate::error::Result;
use crate::report::PushReport;
use crate::settings::{OutputType, SummarySetting};

/// Render a duration as `"1 h 2 min 3 sec"`, leaving out zero components.
///
/// Anything under a second is `"less than a second"`; fractions of a second
/// are dropped otherwise.
#[must_use]
pub fn human_readable_duration(duration: Duration) -> String {
    if duration < Duration::from_secs(1) {
        return "less than a second".to_string();
    }

    let total = duration.as_secs();
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;

    let mut parts = Vec::with_capacity(3);
    if hours > 0 {
        parts.push(format!("{hours} h"));
    }
    if minutes > 0 {
        parts.push(format!("{minutes} min"));
    }
    if seconds > 0 {
        parts.push(format!("{seconds} sec"));
    }

    parts.join(" ")
}

/// Write the summary of a push to `out`.
///
/// Structured output is only used for the full summary; the short summary is
/// always the one-line message.
///
/// # Errors
///
/// Returns an error if the report can't be serialized or `out` fails.
pub fn print_summary<W: Write>(
    out: &mut W,
    caption: &str,
    report: &PushReport,
    summary: SummarySetting,
    output: OutputType,
) -> Result<()> {
    match summary {
        SummarySetting::Quiet => {}
        SummarySetting::Short => {
            writeln!(
                out,
                "Successfully pushed {caption} sample app in {}.",
                human_readable_duration(report.elapsed_time())
            )?;
        }
        SummarySetting::Full => match output {
            OutputType::Json => writeln!(out, "{}", report.to_json()?)?,
            OutputType::Yaml => write!(out, "{}", report.to_yaml()?)?,
            OutputType::None => print_full_report(out, caption, report)?,
        },
    }
    Ok(())
}

fn print_full_report<W: Write>(out: &mut W, caption: &str, report: &PushReport) -> Result<()> {
    writeln!(
        out,
        "Successfully pushed {caption} sample app in {}:",
        human_readable_duration(report.elapsed_time())
    )?;
    writeln!(out, "{:>11} {}", "stack:", report.stack())?;
    writeln!(out, "{:>11} {}", "buildpack:", report.buildpack())?;
    if report.has_time_details() {
        let rows = [
            ("ramp-up:", report.init_time()),
            ("creating:", report.creating_time()),
            ("uploading:", report.uploading_time()),
            ("staging:", report.staging_time()),
            ("starting:", report.starting_time()),
        ];
        for (label, duration) in rows {
            writeln!(out, "{label:>11} {}", human_readable_duration(duration))?;
        }
    }
    writeln!(out)?;
    Ok(())
}

/// [`print_summary`] to standard output.
///
/// # Errors
///
/// Returns an error if the report can't be serialized or written.
pub fn print_summary_stdout(
    caption: &str,
    report: &PushReport,
    summary: SummarySetting,
    output: OutputType,
) -> Result<()> {
    let stdout = std::io::stdout();
    let mut lock = stdout.lock();
    print_summary(&mut lock, caption, report, summary, output)?;
    lock.flush()?;
    Ok(())
}
