//! Parsing what the `cf` command-line client prints.

use std::sync::OnceLock;

use regex::Regex;

use crate::report::Phase;

/// Value used when the push output doesn't name a stack or buildpack.
pub const UNKNOWN: &str = "unknown";

/// Line fragments that announce a phase, checked in this order.
const PHASE_MARKERS: [(&str, Phase); 4] = [
    ("Creating app", Phase::Creating),
    ("Uploading", Phase::Uploading),
    ("Staging app", Phase::Staging),
    ("Waiting for app", Phase::Starting),
];

/// The phase a `cf push` output line announces, if any.
#[must_use]
pub fn detect_phase(line: &str) -> Option<Phase> {
    PHASE_MARKERS
        .iter()
        .find(|(marker, _)| line.contains(marker))
        .map(|(_, phase)| *phase)
}

fn stack_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*stack:\s*(.*?)\s*$").expect("Invalid regex pattern"))
}

fn buildpack_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\s*buildpacks?:\s*(.*?)\s*$").expect("Invalid regex pattern")
    })
}

/// Find `<key>: value` in the push summary.
///
/// Newer clients print `buildpacks:` as a header followed by a table; an empty
/// value is therefore taken from the first word of the next non-empty line,
/// skipping a `name ...` table header.
fn summary_value(lines: &[String], regex: &Regex) -> Option<String> {
    let index = lines.iter().rposition(|line| regex.is_match(line))?;
    let value = regex
        .captures(&lines[index])
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default();
    if !value.is_empty() {
        return Some(value);
    }

    lines[index + 1..]
        .iter()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .find(|line| !line.starts_with("name "))
        .and_then(|line| line.split_whitespace().next())
        .map(str::to_string)
}

/// Stack named in the push summary.
#[must_use]
pub fn parse_stack(lines: &[String]) -> String {
    summary_value(lines, stack_regex()).unwrap_or_else(|| UNKNOWN.to_string())
}

/// Buildpack named in the push summary.
#[must_use]
pub fn parse_buildpack(lines: &[String]) -> String {
    summary_value(lines, buildpack_regex()).unwrap_or_else(|| UNKNOWN.to_string())
}

/// App names from `cf apps` output: first column of the rows below the
/// `name` header.
#[must_use]
pub fn parse_app_names(output: &str) -> Vec<String> {
    output
        .lines()
        .skip_while(|line| !line.trim_start().starts_with("name "))
        .skip(1)
        .filter_map(|line| line.split_whitespace().next())
        .map(str::to_string)
        .collect()
}

/// The last `count` lines joined by newlines.
#[must_use]
pub fn tail(lines: &[String], count: usize) -> String {
    let start = lines.len().saturating_sub(count);
    lines[start..].join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(text: &str) -> Vec<String> {
        text.lines().map(str::to_string).collect()
    }

    const CF6_PUSH: &str = "\
Pushing from manifest to org demo / space dev as admin...
Getting app info...
Creating app with these attributes...
+ name:       pushnut-golang-app-x1
Creating app pushnut-golang-app-x1...
Mapping routes...
Comparing local files to remote cache...
Packaging files to upload...
Uploading files...
 1.23 KiB / 1.23 KiB [=====================] 100.00% 1s
Waiting for API to complete processing files...

Staging app and tracing logs...
   Downloading go_buildpack...
   Uploading droplet...
Waiting for app to start...

name:              pushnut-golang-app-x1
requested state:   started
routes:            pushnut-golang-app-x1.example.com
last uploaded:     Mon 19 Oct 12:00:00 UTC 2026
stack:             cflinuxfs4
buildpacks:        go

type:            web
instances:       1/1
";

    const CF7_SUMMARY: &str = "\
Waiting for app pushnut-python-app-y2 to start...

name:              pushnut-python-app-y2
requested state:   started
stack:             cflinuxfs4
buildpacks:
   name               version   detect output   buildpack name
   python_buildpack   1.8.20    python          python

type:           web
";

    #[test]
    fn test_detect_phase() {
        assert_eq!(
            detect_phase("Creating app pushnut-php-app-1..."),
            Some(Phase::Creating)
        );
        assert_eq!(detect_phase("Uploading files..."), Some(Phase::Uploading));
        assert_eq!(
            detect_phase("Staging app and tracing logs..."),
            Some(Phase::Staging)
        );
        assert_eq!(
            detect_phase("Waiting for app pushnut-php-app-1 to start..."),
            Some(Phase::Starting)
        );
        assert_eq!(detect_phase("Getting app info..."), None);
        assert_eq!(detect_phase(""), None);
    }

    #[test]
    fn test_detect_phase_sequence_in_cf6_output() {
        let phases: Vec<_> = lines(CF6_PUSH)
            .iter()
            .filter_map(|l| detect_phase(l))
            .collect();
        assert_eq!(phases.first(), Some(&Phase::Creating));
        assert!(phases.contains(&Phase::Uploading));
        assert!(phases.contains(&Phase::Staging));
        assert_eq!(phases.last(), Some(&Phase::Starting));
    }

    #[test]
    fn test_parse_stack_and_buildpack_inline() {
        let output = lines(CF6_PUSH);
        assert_eq!(parse_stack(&output), "cflinuxfs4");
        assert_eq!(parse_buildpack(&output), "go");
    }

    #[test]
    fn test_parse_buildpack_table() {
        let output = lines(CF7_SUMMARY);
        assert_eq!(parse_stack(&output), "cflinuxfs4");
        assert_eq!(parse_buildpack(&output), "python_buildpack");
    }

    #[test]
    fn test_parse_missing_values() {
        let output = lines("Pushing app...\nFAILED\n");
        assert_eq!(parse_stack(&output), UNKNOWN);
        assert_eq!(parse_buildpack(&output), UNKNOWN);
    }

    #[test]
    fn test_parse_app_names() {
        let output = "\
Getting apps in org demo / space dev as admin...
OK

name                        requested state   instances   memory   disk   urls
pushnut-golang-app-abc      started           1/1         64M      1G     pushnut-golang-app-abc.example.com
my-service                  stopped           0/1         1G       1G
";
        assert_eq!(
            parse_app_names(output),
            vec!["pushnut-golang-app-abc".to_string(), "my-service".to_string()]
        );
    }

    #[test]
    fn test_parse_app_names_empty_space() {
        assert!(parse_app_names("Getting apps...\nOK\n\nNo apps found\n").is_empty());
    }

    #[test]
    fn test_tail() {
        let output = lines("a\nb\nc\nd");
        assert_eq!(tail(&output, 2), "c\nd");
        assert_eq!(tail(&output, 10), "a\nb\nc\nd");
        assert_eq!(tail(&[], 3), "");
    }
}
