//! User-facing console.
//!
//! All operator output and input goes through [`Console`]. The implementation
//! is picked once at startup: [`StyledConsole`] for an interactive terminal,
//! [`PlainConsole`] when input or output is redirected.

use std::io::{self, BufRead, IsTerminal, Write};
use std::sync::Arc;

use crossterm::style::{style, Stylize};
use dialoguer::Input;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Warn,
    Error,
}

/// Presentation of a non-log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Heading,
    Action,
    Success,
    Muted,
}

pub trait Console: Send + Sync {
    /// Timestamped log line.
    fn log(&self, level: Level, msg: &str);

    fn say(&self, tone: Tone, msg: &str);

    /// Print `text` exactly as given.
    fn print(&self, text: &str);

    /// Ask for a value, returning `default` on empty input.
    ///
    /// `None` means the operator aborted or input is closed; the caller must not
    /// act on a value it never received.
    fn prompt(&self, label: &str, default: &str) -> Option<String>;

    /// Read one line. `None` means input is closed.
    fn read_line(&self, prompt: &str) -> Option<String>;

    fn info(&self, msg: &str) {
        self.log(Level::Info, msg);
    }

    fn warn(&self, msg: &str) {
        self.log(Level::Warn, msg);
    }

    fn error(&self, msg: &str) {
        self.log(Level::Error, msg);
    }
}

/// Pick the console for this process.
pub fn select() -> Arc<dyn Console> {
    if io::stdin().is_terminal() && io::stdout().is_terminal() {
        Arc::new(StyledConsole)
    } else {
        Arc::new(PlainConsole)
    }
}

fn timestamp() -> String {
    chrono::Local::now().format("%H:%M:%S").to_string()
}

fn level_tag(level: Level) -> &'static str {
    match level {
        Level::Info => "[INFO]",
        Level::Warn => "[WARN]",
        Level::Error => "[ERROR]",
    }
}

/// Colored terminal output with interactive prompts.
pub struct StyledConsole;

impl Console for StyledConsole {
    fn log(&self, level: Level, msg: &str) {
        let tag = match level {
            Level::Info => style(level_tag(level)).yellow().bold(),
            Level::Warn => style(level_tag(level)).dark_yellow().bold(),
            Level::Error => style(level_tag(level)).red().bold(),
        };
        println!("{} {} {}", style(format!("[{}]", timestamp())).cyan().bold(), tag, msg);
    }

    fn say(&self, tone: Tone, msg: &str) {
        let styled = match tone {
            Tone::Heading => style(msg).magenta().bold(),
            Tone::Action => style(msg).cyan(),
            Tone::Success => style(msg).green(),
            Tone::Muted => style(msg).dim(),
        };
        println!("{styled}");
    }

    fn print(&self, text: &str) {
        println!("{text}");
    }

    fn prompt(&self, label: &str, default: &str) -> Option<String> {
        Input::<String>::new()
            .with_prompt(style(label).cyan().bold().to_string())
            .default(default.to_string())
            .interact_text()
            .ok()
    }

    fn read_line(&self, prompt: &str) -> Option<String> {
        Input::<String>::new()
            .with_prompt(style(prompt).yellow().bold().to_string())
            .allow_empty(true)
            .interact_text()
            .ok()
    }
}

/// Escape-free output for pipes and non-interactive use.
pub struct PlainConsole;

impl PlainConsole {
    fn read_stdin(&self, prompt: &str) -> Option<String> {
        print!("{prompt}");
        let _ = io::stdout().flush();
        read_line_lossy(&mut io::stdin().lock())
    }
}

/// One line without its terminator. Invalid UTF-8 is replaced, not treated as EOF.
fn read_line_lossy(reader: &mut impl BufRead) -> Option<String> {
    let mut buf = Vec::new();
    match reader.read_until(b'\n', &mut buf) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(
            String::from_utf8_lossy(&buf)
                .trim_end_matches(['\r', '\n'])
                .to_string(),
        ),
    }
}

impl Console for PlainConsole {
    fn log(&self, level: Level, msg: &str) {
        println!("[{}] {} {}", timestamp(), level_tag(level), msg);
    }

    fn say(&self, _tone: Tone, msg: &str) {
        println!("{msg}");
    }

    fn print(&self, text: &str) {
        println!("{text}");
    }

    fn prompt(&self, label: &str, default: &str) -> Option<String> {
        let value = self.read_stdin(&format!("{label} ({default}): "))?;
        let value = value.trim();
        Some(if value.is_empty() { default } else { value }.to_string())
    }

    fn read_line(&self, prompt: &str) -> Option<String> {
        self.read_stdin(prompt)
    }
}
