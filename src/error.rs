//! Error types.

use std::time::Duration;

use thiserror::Error;

/// Failure to run an external process to completion.
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("failed to launch {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} timed out after {}s", .timeout.as_secs_f32())]
    Timeout { program: String, timeout: Duration },
}

/// Why a bridge command did not succeed. The display form is the operator log line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Failure {
    /// The bridge client could not be started.
    #[error("Error running command: {0}")]
    Launch(String),

    #[error("Command timed out after {}s: {command}", .timeout.as_secs_f32())]
    Timeout { timeout: Duration, command: String },

    /// The command ran and reported an error status.
    #[error("Command failed: {message}")]
    NonZeroExit { code: Option<i32>, message: String },
}

/// Errors that keep a session from becoming usable.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("unable to connect to {target}: {response:?}")]
    Connect { target: String, response: String },

    #[error("no connected device found in {} listing line(s)", .listing.len())]
    Verify { listing: Vec<String> },

    #[error("session is not verified")]
    NotVerified,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_display_is_log_line() {
        let exit = Failure::NonZeroExit { code: Some(1), message: "inaccessible or not found".into() };
        assert_eq!(exit.to_string(), "Command failed: inaccessible or not found");

        let timeout = Failure::Timeout {
            timeout: Duration::from_millis(1500),
            command: "shell logcat".into(),
        };
        assert_eq!(timeout.to_string(), "Command timed out after 1.5s: shell logcat");

        let launch = Failure::Launch("failed to launch adb: not found".into());
        assert_eq!(launch.to_string(), "Error running command: failed to launch adb: not found");
    }

    #[test]
    fn test_failure_is_std_error() {
        let err: Box<dyn std::error::Error> =
            Box::new(Failure::NonZeroExit { code: None, message: "terminated by signal".into() });
        assert_eq!(err.to_string(), "Command failed: terminated by signal");
    }
}
