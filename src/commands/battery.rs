//! Battery state simulation

use super::{shell_quote, Context};
use crate::console::Tone;
use crate::launcher::Launcher;

/// Status codes understood by `dumpsys battery set status`.
pub const STATUS_CODES: [(u8, &str); 5] = [
    (1, "unknown"),
    (2, "charging"),
    (3, "discharging"),
    (4, "not charging"),
    (5, "full"),
];

/// The value is passed through unvalidated; the device decides what it accepts.
pub async fn set_level<L: Launcher>(ctx: &Context<'_, L>, level: &str) {
    let command = format!("dumpsys battery set level {}", shell_quote(level));
    if ctx.executor.shell(&command).await.success {
        ctx.console().say(Tone::Success, &format!("Battery level set to {level}%"));
    }
}

pub async fn set_status<L: Launcher>(ctx: &Context<'_, L>, status: &str) {
    let command = format!("dumpsys battery set status {}", shell_quote(status));
    if ctx.executor.shell(&command).await.success {
        let name = STATUS_CODES
            .iter()
            .find(|(code, _)| status.trim().parse::<u8>().ok() == Some(*code))
            .map(|(_, name)| format!(" ({name})"))
            .unwrap_or_default();
        ctx.console().say(Tone::Success, &format!("Battery status set to {status}{name}"));
    }
}

pub async fn reset<L: Launcher>(ctx: &Context<'_, L>) {
    ctx.console().say(Tone::Action, "Resetting battery stats...");
    if ctx.executor.shell("dumpsys battery reset").await.success {
        ctx.console().say(Tone::Success, "Battery reset done.");
    }
}
