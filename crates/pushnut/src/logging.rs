//! Tracing setup for the `pushnut` binary.
//!
//! Diagnostics go to stderr. Stdout carries only push summaries, so JSON and
//! YAML reports can be piped into other tools.

use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Log level chosen with `-q`, `-v` and `-vv`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Errors only.
    Quiet,
    /// Phase starts, deletions and warnings.
    #[default]
    Normal,
    /// Adds the `cf` commands being run and bundle details.
    Verbose,
    /// Adds every line `cf push` prints.
    Trace,
}

impl Verbosity {
    /// Map the global command-line flags; `-q` wins over any number of `-v`.
    #[must_use]
    pub fn from_flags(verbose: u8, quiet: bool) -> Self {
        match (quiet, verbose) {
            (true, _) => Self::Quiet,
            (false, 0) => Self::Normal,
            (false, 1) => Self::Verbose,
            (false, _) => Self::Trace,
        }
    }

    /// The most detailed level that gets through.
    #[must_use]
    pub fn to_level_filter(&self) -> Level {
        match self {
            Self::Quiet => Level::ERROR,
            Self::Normal => Level::INFO,
            Self::Verbose => Level::DEBUG,
            Self::Trace => Level::TRACE,
        }
    }

    /// Filter used when `RUST_LOG` is unset. Other crates stay at `warn`
    /// unless quiet.
    #[must_use]
    pub fn default_directive(&self) -> String {
        match self {
            Self::Quiet => "error".to_string(),
            _ => format!("warn,pushnut={}", self.to_level_filter()),
        }
    }
}

/// Install the global subscriber. `RUST_LOG` replaces the verbosity filter.
///
/// Later calls are no-ops.
///
/// ```no_run
/// use pushnut::{init_logging, logging::Verbosity};
///
/// init_logging(Verbosity::from_flags(1, false));
/// ```
pub fn init_logging(verbosity: Verbosity) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.default_directive()));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time();

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_flags() {
        assert_eq!(Verbosity::from_flags(0, false), Verbosity::Normal);
        assert_eq!(Verbosity::from_flags(1, false), Verbosity::Verbose);
        assert_eq!(Verbosity::from_flags(2, false), Verbosity::Trace);
        assert_eq!(Verbosity::from_flags(7, false), Verbosity::Trace);
        assert_eq!(Verbosity::from_flags(0, true), Verbosity::Quiet);
        assert_eq!(Verbosity::from_flags(2, true), Verbosity::Quiet);
    }

    #[test]
    fn test_default_directive() {
        assert_eq!(Verbosity::Quiet.default_directive(), "error");
        assert_eq!(Verbosity::Normal.default_directive(), "warn,pushnut=INFO");
        assert_eq!(Verbosity::Trace.default_directive(), "warn,pushnut=TRACE");
    }

    #[test]
    fn test_default_directive_parses() {
        for verbosity in [
            Verbosity::Quiet,
            Verbosity::Normal,
            Verbosity::Verbose,
            Verbosity::Trace,
        ] {
            assert!(EnvFilter::try_new(verbosity.default_directive()).is_ok());
        }
    }
}
