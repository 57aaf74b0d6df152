//! Bridge command execution.
//!
//! [`CommandExecutor`] is the only place the bridge client is invoked. It
//! never returns an error: launch failures, timeouts and non-zero exits are
//! logged to the console and folded into an unsuccessful [`CommandResult`].

use std::sync::Arc;
use std::time::Duration;

use crate::console::Console;
use crate::error::{Failure, LaunchError};
use crate::launcher::Launcher;

/// How the payload is handed to the bridge client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// `shell <command>` on the device.
    Shell,
    /// `install <local path>`.
    Install,
}

impl Mode {
    fn subcommand(self) -> &'static str {
        match self {
            Mode::Shell => "shell",
            Mode::Install => "install",
        }
    }
}

/// Outcome of one bridge invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    pub success: bool,
    /// Trimmed standard output.
    pub stdout: String,
    /// Trimmed standard error.
    pub stderr: String,
    pub exit_code: Option<i32>,
    pub failure: Option<Failure>,
}

impl CommandResult {
    fn failed(failure: Failure) -> Self {
        Self {
            success: false,
            stdout: String::new(),
            stderr: String::new(),
            exit_code: None,
            failure: Some(failure),
        }
    }

    /// Standard output of a successful command.
    pub fn output(&self) -> Option<&str> {
        self.success.then_some(self.stdout.as_str())
    }
}

pub struct CommandExecutor<L> {
    launcher: L,
    adb_path: String,
    /// `host:port` passed as `-s` to device-scoped commands.
    serial: Option<String>,
    timeout: Duration,
    console: Arc<dyn Console>,
}

impl<L: Launcher> CommandExecutor<L> {
    pub fn new(launcher: L, adb_path: &str, timeout: Duration, console: Arc<dyn Console>) -> Self {
        Self {
            launcher,
            adb_path: adb_path.to_string(),
            serial: None,
            timeout,
            console,
        }
    }

    pub fn launcher(&self) -> &L {
        &self.launcher
    }

    pub fn console(&self) -> &Arc<dyn Console> {
        &self.console
    }

    pub fn adb_path(&self) -> &str {
        &self.adb_path
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn set_serial(&mut self, serial: Option<String>) {
        self.serial = serial;
    }

    /// Run `args` against the device as a shell command or install request.
    pub async fn execute(&self, args: &[&str], mode: Mode, timeout: Duration) -> CommandResult {
        let mut argv = vec![mode.subcommand()];
        argv.extend_from_slice(args);
        self.device(&argv, timeout).await
    }

    /// Remote shell command with the default timeout.
    pub async fn shell(&self, command: &str) -> CommandResult {
        self.execute(&[command], Mode::Shell, self.timeout).await
    }

    /// Install the APK at `path` with the default timeout.
    pub async fn install(&self, path: &str) -> CommandResult {
        self.execute(&[path], Mode::Install, self.timeout).await
    }

    /// Bridge subcommand addressed to the session's device.
    pub async fn device(&self, args: &[&str], timeout: Duration) -> CommandResult {
        let mut argv = Vec::with_capacity(args.len() + 2);
        if let Some(serial) = &self.serial {
            argv.push("-s".to_string());
            argv.push(serial.clone());
        }
        argv.extend(args.iter().map(|a| a.to_string()));
        self.run(argv, timeout).await
    }

    /// Bridge subcommand that talks to the server rather than a device.
    pub async fn server(&self, args: &[&str], timeout: Duration) -> CommandResult {
        self.run(args.iter().map(|a| a.to_string()).collect(), timeout).await
    }

    async fn run(&self, argv: Vec<String>, timeout: Duration) -> CommandResult {
        match self.launcher.run(&self.adb_path, &argv, timeout).await {
            Ok(output) => {
                let stdout = output.stdout.trim().to_string();
                let stderr = output.stderr.trim().to_string();

                if output.success() {
                    tracing::debug!(?argv, "command succeeded");
                    return CommandResult {
                        success: true,
                        stdout,
                        stderr,
                        exit_code: output.exit_code,
                        failure: None,
                    };
                }

                let message = if !stderr.is_empty() {
                    stderr.clone()
                } else if !stdout.is_empty() {
                    stdout.clone()
                } else {
                    match output.exit_code {
                        Some(code) => format!("exit status {code}"),
                        None => "terminated by signal".to_string(),
                    }
                };
                tracing::debug!(?argv, exit_code = ?output.exit_code, "command failed");
                let failure = Failure::NonZeroExit { code: output.exit_code, message };
                self.console.error(&failure.to_string());

                CommandResult {
                    success: false,
                    stdout,
                    stderr,
                    exit_code: output.exit_code,
                    failure: Some(failure),
                }
            }
            Err(LaunchError::Timeout { timeout, .. }) => {
                tracing::debug!(?argv, ?timeout, "command timed out");
                self.report(Failure::Timeout { timeout, command: argv.join(" ") })
            }
            Err(err) => {
                tracing::debug!(?argv, error = %err, "launch failed");
                self.report(Failure::Launch(err.to_string()))
            }
        }
    }

    fn report(&self, failure: Failure) -> CommandResult {
        self.console.error(&failure.to_string());
        CommandResult::failed(failure)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::Level;
    use crate::testing::{Reply, ScriptedConsole, ScriptedLauncher};

    fn executor(launcher: &ScriptedLauncher, console: &ScriptedConsole) -> CommandExecutor<ScriptedLauncher> {
        CommandExecutor::new(
            launcher.clone(),
            "adb",
            Duration::from_secs(20),
            Arc::new(console.clone()),
        )
    }

    #[tokio::test]
    async fn test_shell_success_trims_output() {
        let launcher = ScriptedLauncher::new();
        launcher.reply(Reply::ok("  Pixel 7\n"));
        let console = ScriptedConsole::default();

        let result = executor(&launcher, &console).shell("getprop ro.product.model").await;

        assert!(result.success);
        assert_eq!(result.output(), Some("Pixel 7"));
        assert_eq!(launcher.calls(), vec![vec!["shell", "getprop ro.product.model"]]);
        assert_eq!(launcher.programs(), vec!["adb"]);
        assert!(console.logs(Level::Error).is_empty());
    }

    #[tokio::test]
    async fn test_install_mode_passes_path() {
        let launcher = ScriptedLauncher::new();
        let console = ScriptedConsole::default();

        let result = executor(&launcher, &console)
            .execute(&["app debug.apk"], Mode::Install, Duration::from_secs(60))
            .await;

        assert!(result.success);
        assert_eq!(launcher.calls(), vec![vec!["install", "app debug.apk"]]);
        assert_eq!(launcher.timeouts(), vec![Duration::from_secs(60)]);
    }

    #[tokio::test]
    async fn test_serial_scopes_device_commands_only() {
        let launcher = ScriptedLauncher::new();
        let console = ScriptedConsole::default();
        let mut exec = executor(&launcher, &console);
        exec.set_serial(Some("10.0.0.5:5555".to_string()));

        exec.shell("id").await;
        exec.server(&["devices"], Duration::from_secs(15)).await;

        assert_eq!(
            launcher.calls(),
            vec![vec!["-s", "10.0.0.5:5555", "shell", "id"], vec!["devices"]]
        );
    }

    #[tokio::test]
    async fn test_non_zero_exit_is_failure_even_with_output() {
        let launcher = ScriptedLauncher::new();
        launcher.reply(Reply::Exit {
            code: 1,
            stdout: "partial".to_string(),
            stderr: "  /system/bin/sh: foo: not found \n".to_string(),
        });
        let console = ScriptedConsole::default();

        let result = executor(&launcher, &console).shell("foo").await;

        assert!(!result.success);
        assert_eq!(result.output(), None);
        assert_eq!(result.stdout, "partial");
        assert_eq!(
            result.failure,
            Some(Failure::NonZeroExit {
                code: Some(1),
                message: "/system/bin/sh: foo: not found".to_string(),
            })
        );
        assert_eq!(
            console.logs(Level::Error),
            vec!["Command failed: /system/bin/sh: foo: not found"]
        );
    }

    #[tokio::test]
    async fn test_failure_message_falls_back_to_stdout_then_generic() {
        let launcher = ScriptedLauncher::new();
        launcher.reply(Reply::Exit { code: 2, stdout: "usage".to_string(), stderr: String::new() });
        launcher.reply(Reply::fail(3, ""));
        let console = ScriptedConsole::default();
        let exec = executor(&launcher, &console);

        exec.shell("a").await;
        exec.shell("b").await;

        assert_eq!(
            console.logs(Level::Error),
            vec!["Command failed: usage", "Command failed: exit status 3"]
        );
    }

    #[tokio::test]
    async fn test_timeout_is_logged_and_absorbed() {
        let launcher = ScriptedLauncher::new();
        launcher.reply(Reply::Timeout);
        let console = ScriptedConsole::default();

        let result = executor(&launcher, &console).shell("logcat").await;

        assert!(!result.success);
        let failure = result.failure.expect("timeout recorded");
        assert_eq!(
            failure,
            Failure::Timeout { timeout: Duration::from_secs(20), command: "shell logcat".to_string() }
        );
        assert_eq!(console.logs(Level::Error), vec![failure.to_string()]);
        assert_eq!(failure.to_string(), "Command timed out after 20s: shell logcat");
    }

    #[tokio::test]
    async fn test_launch_failure_is_logged_and_absorbed() {
        let launcher = ScriptedLauncher::new();
        launcher.reply(Reply::SpawnFailure);
        let console = ScriptedConsole::default();

        let result = executor(&launcher, &console).shell("id").await;

        assert!(!result.success);
        let failure = result.failure.expect("launch failure recorded");
        assert!(matches!(failure, Failure::Launch(_)));
        assert_eq!(console.logs(Level::Error), vec![failure.to_string()]);
        assert!(failure.to_string().starts_with("Error running command: failed to launch adb"));
    }
}
