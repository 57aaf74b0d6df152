//! Packages, logs, screen capture and mirroring

use super::Context;
use crate::console::Tone;
use crate::executor::Mode;
use crate::launcher::Launcher;

pub const REMOTE_SCREENSHOT: &str = "/sdcard/screenshot.png";
pub const IMEI_QUERY: &str = "dumpsys iphonesubinfo | grep 'Device ID'";
/// Terminal emulator the mirror client is started in.
pub const MIRROR_TERMINAL: &str = "xterm";

/// Install a local APK. The path is handed to the bridge as its own argument.
pub async fn install<L: Launcher>(ctx: &Context<'_, L>, path: &str) {
    let result = ctx
        .executor
        .execute(&[path], Mode::Install, ctx.executor.timeout())
        .await;
    if result.success {
        ctx.console().say(Tone::Success, &format!("Installed {path}"));
    }
}

pub async fn clear_logcat<L: Launcher>(ctx: &Context<'_, L>) {
    ctx.console().say(Tone::Action, "Clearing logcat...");
    ctx.executor
        .device(&["logcat", "-c"], ctx.executor.timeout())
        .await;
}

/// Capture the screen on the device and pull it to the local screenshot path.
pub async fn screenshot<L: Launcher>(ctx: &Context<'_, L>) {
    ctx.console().say(Tone::Action, "Taking screenshot...");

    let capture = ctx
        .executor
        .shell(&format!("screencap -p {REMOTE_SCREENSHOT}"))
        .await;
    if !capture.success {
        return;
    }

    let local = ctx.config.screenshot_path.to_string_lossy().into_owned();
    let pull = ctx
        .executor
        .device(&["pull", REMOTE_SCREENSHOT, local.as_str()], ctx.executor.timeout())
        .await;
    if pull.success {
        ctx.console()
            .say(Tone::Success, &format!("Screenshot saved as {local}"));
    }
}

pub async fn imei<L: Launcher>(ctx: &Context<'_, L>) {
    ctx.console().say(Tone::Action, "Getting IMEI...");
    let result = ctx.executor.shell(IMEI_QUERY).await;
    let imei = match result.output() {
        Some(line) if !line.is_empty() => line,
        _ => "Unknown",
    };
    ctx.console().say(Tone::Success, imei);
}

/// Start the mirroring client in its own terminal window and return immediately.
pub fn mirror<L: Launcher>(ctx: &Context<'_, L>) {
    ctx.console().info("Starting scrcpy for mirroring...");

    let args = vec!["-e".to_string(), ctx.config.scrcpy_path.clone()];
    if let Err(err) = ctx.executor.launcher().spawn_detached(MIRROR_TERMINAL, &args) {
        ctx.console().error(&format!("Unable to start mirroring: {err}"));
    }
}
