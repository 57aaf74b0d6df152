//! Device information

use super::Context;
use crate::device::DeviceInfo;
use crate::launcher::Launcher;

pub async fn device_info<L: Launcher>(ctx: &Context<'_, L>) {
    let info = DeviceInfo::query(ctx.executor).await;
    info.render(ctx.console().as_ref());
}
