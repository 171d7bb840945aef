//! The table of sample apps that can be pushed.

use rand::distributions::Alphanumeric;
use rand::Rng;

use crate::assets::{self, Bundle};
use crate::error::{Error, Result};

/// Prefix of every app name pushed by this tool.
///
/// The `cleanup` command treats apps whose name starts with this prefix and a
/// dash as leftovers that are safe to delete.
pub const APP_PREFIX: &str = "pushnut";

/// Static descriptor of a sample app.
#[derive(Debug, Clone, Copy)]
pub struct SampleApp {
    /// Display name of the language or runtime.
    pub caption: &'static str,
    /// Name used on the command line.
    pub command: &'static str,
    /// Alternative command-line names.
    pub aliases: &'static [&'static str],
    /// Prefix of the generated app name.
    pub app_name_prefix: &'static str,
    /// Produces the files to push.
    pub assets: fn() -> Result<Bundle>,
}

impl SampleApp {
    /// Whether `name` is this app's command or one of its aliases.
    #[must_use]
    pub fn matches(&self, name: &str) -> bool {
        self.command == name || self.aliases.contains(&name)
    }

    /// Build the file bundle for this app.
    ///
    /// # Errors
    ///
    /// Returns an error if the bundle is malformed.
    pub fn bundle(&self) -> Result<Bundle> {
        (self.assets)()
    }

    /// Generate a fresh app name of `total_len` characters from the prefix.
    #[must_use]
    pub fn random_app_name(&self, total_len: usize) -> String {
        random_string_with_prefix(self.app_name_prefix, total_len)
    }
}

/// All sample apps, in the order `push all` runs them.
pub static SAMPLE_APPS: &[SampleApp] = &[
    SampleApp {
        caption: "Golang",
        command: "golang",
        aliases: &["go"],
        app_name_prefix: "pushnut-golang-app-",
        assets: assets::golang_sample_app,
    },
    SampleApp {
        caption: "Python",
        command: "python",
        aliases: &[],
        app_name_prefix: "pushnut-python-app-",
        assets: assets::python_sample_app,
    },
    SampleApp {
        caption: "PHP",
        command: "php",
        aliases: &[],
        app_name_prefix: "pushnut-php-app-",
        assets: assets::php_sample_app,
    },
    SampleApp {
        caption: "Staticfile",
        command: "staticfile",
        aliases: &["static"],
        app_name_prefix: "pushnut-staticfile-app-",
        assets: assets::staticfile_sample_app,
    },
    SampleApp {
        caption: "Swift",
        command: "swift",
        aliases: &[],
        app_name_prefix: "pushnut-swift-app-",
        assets: assets::swift_sample_app,
    },
    SampleApp {
        caption: "NodeJS",
        command: "nodejs",
        aliases: &["node"],
        app_name_prefix: "pushnut-nodejs-app-",
        assets: assets::nodejs_sample_app,
    },
    SampleApp {
        caption: "Ruby",
        command: "ruby",
        aliases: &[],
        app_name_prefix: "pushnut-ruby-sinatra-app-",
        assets: assets::ruby_sample_app,
    },
];

/// Find a sample app by command name or alias.
#[must_use]
pub fn lookup(name: &str) -> Option<&'static SampleApp> {
    SAMPLE_APPS.iter().find(|app| app.matches(name))
}

/// Like [`lookup`], but an unknown name is an error.
///
/// # Errors
///
/// Returns [`Error::UnknownSampleApp`] if no app matches.
pub fn require(name: &str) -> Result<&'static SampleApp> {
    lookup(name).ok_or_else(|| Error::UnknownSampleApp(name.to_string()))
}

/// Length of the longest app name prefix in the table.
#[must_use]
pub fn longest_prefix_len() -> usize {
    SAMPLE_APPS
        .iter()
        .map(|app| app.app_name_prefix.len())
        .max()
        .unwrap_or(0)
}

/// Append lowercase alphanumerics to `prefix` until the result is `total_len`
/// characters long. At least one random character is always appended.
#[must_use]
pub fn random_string_with_prefix(prefix: &str, total_len: usize) -> String {
    let suffix_len = total_len.saturating_sub(prefix.len()).max(1);
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(suffix_len)
        .map(|b| char::from(b).to_ascii_lowercase())
        .collect();
    format!("{prefix}{suffix}")
}
