//! [`Platform`] implementation on top of the `cf` command-line client.

use std::path::Path;
use std::process::{Output, Stdio};
use std::time::Duration;

use chrono::Utc;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncReadExt, BufReader};
use tokio::process::Command;
use tracing::{debug, info, trace};

use super::output::{detect_phase, parse_app_names, tail};
use super::{Platform, PushTranscript};
use crate::config::CfConfig;
use crate::error::{Error, Result};
use crate::report::PhaseMarkers;

/// Number of output lines kept in a push failure message.
const FAILURE_TAIL_LINES: usize = 20;

/// Runs the `cf` binary.
#[derive(Debug, Clone)]
pub struct CfCli {
    binary: String,
    push_timeout: Duration,
}

impl CfCli {
    /// Create a client for `binary` with a bound on each push.
    #[must_use]
    pub fn new(binary: impl Into<String>, push_timeout: Duration) -> Self {
        Self {
            binary: binary.into(),
            push_timeout,
        }
    }

    /// Create a client from the `[cf]` configuration section.
    #[must_use]
    pub fn from_config(config: &CfConfig) -> Self {
        Self::new(config.binary.clone(), config.push_timeout())
    }

    /// The binary this client runs.
    #[must_use]
    pub fn binary(&self) -> &str {
        &self.binary
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut command = Command::new(&self.binary);
        command
            .args(args)
            .stdin(Stdio::null())
            .kill_on_drop(true);
        command
    }

    fn spawn_error(&self, source: std::io::Error) -> Error {
        if source.kind() == std::io::ErrorKind::NotFound {
            Error::CfCliMissing {
                binary: self.binary.clone(),
                source,
            }
        } else {
            Error::Io(source)
        }
    }

    async fn run(&self, args: &[&str]) -> Result<Output> {
        debug!("Running {} {}", self.binary, args.join(" "));
        self.command(args)
            .output()
            .await
            .map_err(|source| self.spawn_error(source))
    }
}

/// Read everything from `stderr`, keeping whatever arrived before a read error.
async fn drain_stderr<R: AsyncRead + Unpin>(stderr: &mut R, app_name: &str) -> String {
    let mut buf = Vec::new();
    if let Err(err) = stderr.read_to_end(&mut buf).await {
        debug!(app = %app_name, error = %err, "Failed to read cf push stderr");
    }
    String::from_utf8_lossy(&buf).into_owned()
}

fn combined_output(output: &Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{}\n{}", stdout.trim(), stderr.trim())
        .trim()
        .to_string()
}

#[async_trait::async_trait]
impl Platform for CfCli {
    async fn ensure_ready(&self) -> Result<()> {
        let output = self.run(&["target"]).await?;
        if !output.status.success() {
            return Err(Error::NotLoggedIn {
                message: combined_output(&output),
            });
        }
        Ok(())
    }

    async fn push_bundle(&self, app_name: &str, dir: &Path) -> Result<PushTranscript> {
        let dir = dir.to_string_lossy();
        let mut child = self
            .command(&["push", app_name, "-p", &*dir])
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| self.spawn_error(source))?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| Error::internal("cf push stdout was not captured"))?;
        let mut stderr = child
            .stderr
            .take()
            .ok_or_else(|| Error::internal("cf push stderr was not captured"))?;
        let stderr_app = app_name.to_string();
        let stderr_task = tokio::spawn(async move { drain_stderr(&mut stderr, &stderr_app).await });

        let started = Utc::now();
        let mut phases = PhaseMarkers::default();
        let mut lines = Vec::new();
        let mut reader = BufReader::new(stdout).lines();

        let read = async {
            while let Some(line) = reader.next_line().await? {
                if let Some(phase) = detect_phase(&line) {
                    if phases.mark(phase, Utc::now()) {
                        info!(app = %app_name, phase = %phase, "Phase started");
                    }
                }
                trace!(app = %app_name, "{line}");
                lines.push(line);
            }
            child.wait().await
        };
        let waited = tokio::time::timeout(self.push_timeout, read).await;

        let status = match waited {
            Ok(status) => status?,
            Err(_) => {
                return Err(Error::Timeout {
                    operation: format!("cf push {app_name}"),
                });
            }
        };
        let finished = Utc::now();
        let stderr = stderr_task.await.unwrap_or_default();

        if !status.success() {
            let mut output = tail(&lines, FAILURE_TAIL_LINES);
            if !stderr.trim().is_empty() {
                output.push('\n');
                output.push_str(stderr.trim());
            }
            return Err(Error::PushFailed {
                app_name: app_name.to_string(),
                code: status.code(),
                output,
            });
        }

        Ok(PushTranscript {
            started,
            finished,
            lines,
            phases,
        })
    }

    async fn delete_app(&self, app_name: &str) -> Result<()> {
        let output = self.run(&["delete", app_name, "-f", "-r"]).await?;
        if !output.status.success() {
            return Err(Error::delete_failed(app_name, combined_output(&output)));
        }
        Ok(())
    }

    async fn list_apps(&self) -> Result<Vec<String>> {
        let output = self.run(&["apps"]).await?;
        if !output.status.success() {
            return Err(Error::cf_command("apps", combined_output(&output)));
        }
        Ok(parse_app_names(&String::from_utf8_lossy(&output.stdout)))
    }
}
