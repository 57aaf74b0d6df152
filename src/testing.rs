//! Test doubles for the launcher and console seams.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::console::{Console, Level, Tone};
use crate::error::LaunchError;
use crate::launcher::{Launcher, ProcessOutput};

/// Queued outcome for one `run` call.
pub enum Reply {
    Exit { code: i32, stdout: String, stderr: String },
    Timeout,
    SpawnFailure,
}

impl Reply {
    pub fn ok(stdout: &str) -> Self {
        Reply::Exit { code: 0, stdout: stdout.to_string(), stderr: String::new() }
    }

    pub fn fail(code: i32, stderr: &str) -> Self {
        Reply::Exit { code, stdout: String::new(), stderr: stderr.to_string() }
    }
}

#[derive(Default)]
struct LauncherState {
    replies: VecDeque<Reply>,
    calls: Vec<(String, Vec<String>)>,
    timeouts: Vec<Duration>,
    detached: Vec<(String, Vec<String>)>,
}

/// Replays queued replies and records every invocation.
///
/// Runs beyond the queued replies succeed with empty output.
#[derive(Clone, Default)]
pub struct ScriptedLauncher {
    state: Arc<Mutex<LauncherState>>,
}

impl ScriptedLauncher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(&self, reply: Reply) -> &Self {
        self.state.lock().unwrap().replies.push_back(reply);
        self
    }

    /// Argument vectors of every `run` call, in order.
    pub fn calls(&self) -> Vec<Vec<String>> {
        self.state.lock().unwrap().calls.iter().map(|(_, args)| args.clone()).collect()
    }

    pub fn programs(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.iter().map(|(p, _)| p.clone()).collect()
    }

    pub fn timeouts(&self) -> Vec<Duration> {
        self.state.lock().unwrap().timeouts.clone()
    }

    pub fn detached(&self) -> Vec<(String, Vec<String>)> {
        self.state.lock().unwrap().detached.clone()
    }
}

#[async_trait]
impl Launcher for ScriptedLauncher {
    async fn run(
        &self,
        program: &str,
        args: &[String],
        timeout: Duration,
    ) -> Result<ProcessOutput, LaunchError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push((program.to_string(), args.to_vec()));
        state.timeouts.push(timeout);

        match state.replies.pop_front() {
            None => Ok(ProcessOutput { exit_code: Some(0), ..Default::default() }),
            Some(Reply::Exit { code, stdout, stderr }) => Ok(ProcessOutput {
                stdout,
                stderr,
                exit_code: Some(code),
            }),
            Some(Reply::Timeout) => Err(LaunchError::Timeout {
                program: program.to_string(),
                timeout,
            }),
            Some(Reply::SpawnFailure) => Err(LaunchError::Spawn {
                program: program.to_string(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "No such file or directory"),
            }),
        }
    }

    fn spawn_detached(&self, program: &str, args: &[String]) -> Result<(), LaunchError> {
        self.state
            .lock()
            .unwrap()
            .detached
            .push((program.to_string(), args.to_vec()));
        Ok(())
    }
}

#[derive(Default)]
struct ConsoleState {
    inputs: VecDeque<String>,
    lines: Vec<String>,
    logs: Vec<(Level, String)>,
    prompts: Vec<String>,
}

/// Feeds queued input lines and captures everything written.
#[derive(Clone, Default)]
pub struct ScriptedConsole {
    state: Arc<Mutex<ConsoleState>>,
}

impl ScriptedConsole {
    pub fn with_input(lines: &[&str]) -> Self {
        let console = Self::default();
        console.state.lock().unwrap().inputs = lines.iter().map(|l| l.to_string()).collect();
        console
    }

    pub fn lines(&self) -> Vec<String> {
        self.state.lock().unwrap().lines.clone()
    }

    pub fn logs(&self, level: Level) -> Vec<String> {
        self.state
            .lock()
            .unwrap()
            .logs
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m.clone())
            .collect()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.state.lock().unwrap().prompts.clone()
    }
}

impl Console for ScriptedConsole {
    fn log(&self, level: Level, msg: &str) {
        self.state.lock().unwrap().logs.push((level, msg.to_string()));
    }

    fn say(&self, _tone: Tone, msg: &str) {
        self.state.lock().unwrap().lines.push(msg.to_string());
    }

    fn print(&self, text: &str) {
        self.state.lock().unwrap().lines.push(text.to_string());
    }

    fn prompt(&self, label: &str, default: &str) -> Option<String> {
        let mut state = self.state.lock().unwrap();
        state.prompts.push(label.to_string());
        let value = state.inputs.pop_front()?;
        Some(if value.is_empty() { default.to_string() } else { value })
    }

    fn read_line(&self, _prompt: &str) -> Option<String> {
        self.state.lock().unwrap().inputs.pop_front()
    }
}
