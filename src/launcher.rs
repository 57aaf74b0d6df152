//! Process launching.
//!
//! Every interaction with the bridge client goes through a [`Launcher`], which
//! runs a program to completion under a hard timeout. The only production
//! implementation is [`SystemLauncher`]; tests substitute a scripted one.

use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;

use crate::error::LaunchError;

/// Raw result of a finished process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    pub stdout: String,
    pub stderr: String,
    /// `None` when the process was terminated by a signal.
    pub exit_code: Option<i32>,
}

impl ProcessOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

#[async_trait]
pub trait Launcher: Send + Sync {
    /// Run `program` with `args`, capturing stdout and stderr.
    ///
    /// The child is killed if it has not exited within `timeout`.
    async fn run(
        &self,
        program: &str,
        args: &[String],
        timeout: Duration,
    ) -> Result<ProcessOutput, LaunchError>;

    /// Start `program` without waiting for it.
    fn spawn_detached(&self, program: &str, args: &[String]) -> Result<(), LaunchError>;
}

/// Launches real processes through tokio.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemLauncher;

#[async_trait]
impl Launcher for SystemLauncher {
    async fn run(
        &self,
        program: &str,
        args: &[String],
        timeout: Duration,
    ) -> Result<ProcessOutput, LaunchError> {
        tracing::debug!(program, ?args, ?timeout, "launching");

        // Dropping the child on timeout kills it.
        let child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| LaunchError::Spawn {
                program: program.to_string(),
                source,
            })?;

        let output = match tokio::time::timeout(timeout, child.wait_with_output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(source)) => {
                return Err(LaunchError::Spawn {
                    program: program.to_string(),
                    source,
                })
            }
            Err(_) => {
                return Err(LaunchError::Timeout {
                    program: program.to_string(),
                    timeout,
                })
            }
        };

        let output = ProcessOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            exit_code: output.status.code(),
        };
        tracing::debug!(program, exit_code = ?output.exit_code, "finished");
        Ok(output)
    }

    fn spawn_detached(&self, program: &str, args: &[String]) -> Result<(), LaunchError> {
        tracing::debug!(program, ?args, "spawning detached");

        std::process::Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map(|_| ())
            .map_err(|source| LaunchError::Spawn {
                program: program.to_string(),
                source,
            })
    }
}
