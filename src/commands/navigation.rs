//! Key events and activity launches

use super::{shell_quote, Context};
use crate::launcher::Launcher;

pub const KEY_BACK: &str = "input keyevent KEYCODE_BACK";
pub const KEY_HOME: &str = "input keyevent KEYCODE_HOME";
pub const KEY_MENU: &str = "input keyevent 82";
pub const KEY_VOLUME_UP: &str = "input keyevent 24";
pub const KEY_VOLUME_DOWN: &str = "input keyevent 25";
pub const OPEN_SETTINGS: &str = "am start -a android.settings.SETTINGS";

pub async fn back<L: Launcher>(ctx: &Context<'_, L>) {
    ctx.executor.shell(KEY_BACK).await;
}

pub async fn home<L: Launcher>(ctx: &Context<'_, L>) {
    ctx.executor.shell(KEY_HOME).await;
}

pub async fn menu<L: Launcher>(ctx: &Context<'_, L>) {
    ctx.executor.shell(KEY_MENU).await;
}

pub async fn volume_up<L: Launcher>(ctx: &Context<'_, L>) {
    ctx.executor.shell(KEY_VOLUME_UP).await;
}

pub async fn volume_down<L: Launcher>(ctx: &Context<'_, L>) {
    ctx.executor.shell(KEY_VOLUME_DOWN).await;
}

pub async fn open_settings<L: Launcher>(ctx: &Context<'_, L>) {
    ctx.executor.shell(OPEN_SETTINGS).await;
}

pub async fn open_url<L: Launcher>(ctx: &Context<'_, L>, url: &str) {
    let command = format!("am start -a android.intent.action.VIEW -d {}", shell_quote(url));
    ctx.executor.shell(&command).await;
}
