//! Device operation implementations

pub mod battery;
pub mod info;
pub mod navigation;
pub mod system;

use std::sync::Arc;

use crate::catalog::Action;
use crate::config::Config;
use crate::console::Console;
use crate::executor::CommandExecutor;
use crate::launcher::Launcher;

/// What an action runs against.
pub struct Context<'a, L> {
    pub executor: &'a CommandExecutor<L>,
    pub config: &'a Config,
}

impl<L: Launcher> Context<'_, L> {
    pub fn console(&self) -> &Arc<dyn Console> {
        self.executor.console()
    }
}

/// Run `action` with its resolved argument (empty for zero-argument actions).
pub async fn perform<L: Launcher>(ctx: &Context<'_, L>, action: Action, arg: &str) {
    match action {
        Action::Back => navigation::back(ctx).await,
        Action::Home => navigation::home(ctx).await,
        Action::Menu => navigation::menu(ctx).await,
        Action::VolumeUp => navigation::volume_up(ctx).await,
        Action::VolumeDown => navigation::volume_down(ctx).await,
        Action::OpenSettings => navigation::open_settings(ctx).await,
        Action::OpenUrl => navigation::open_url(ctx, arg).await,
        Action::InstallApk => system::install(ctx, arg).await,
        Action::ClearLogcat => system::clear_logcat(ctx).await,
        Action::Screenshot => system::screenshot(ctx).await,
        Action::GetImei => system::imei(ctx).await,
        Action::Mirror => system::mirror(ctx),
        Action::SetBatteryLevel => battery::set_level(ctx, arg).await,
        Action::SetBatteryStatus => battery::set_status(ctx, arg).await,
        Action::ResetBattery => battery::reset(ctx).await,
        Action::DeviceInfo => info::device_info(ctx).await,
    }
}

/// Quote `value` as a single word for the device's shell.
pub fn shell_quote(value: &str) -> String {
    let plain = !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "_@%+=:,./-".contains(c));

    if plain {
        value.to_string()
    } else {
        format!("'{}'", value.replace('\'', r"'\''"))
    }
}
