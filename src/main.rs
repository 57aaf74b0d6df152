//! sword - Interactive controller for network-attached Android devices.
//!
//! Connects to a device's adb daemon over TCP, verifies it is ready, then
//! offers a menu of device operations until the operator exits. The adb
//! server is stopped on every exit path.

mod catalog;
mod cli;
mod commands;
mod config;
mod connection;
mod console;
mod device;
mod error;
mod executor;
mod launcher;
mod menu;

#[cfg(test)]
mod testing;

use std::process::{ExitCode, Stdio};

use anyhow::{Context as _, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use catalog::Catalog;
use cli::Cli;
use commands::Context;
use config::Config;
use connection::{ConnectionManager, Target};
use device::DeviceInfo;
use error::SessionError;
use executor::CommandExecutor;
use launcher::{Launcher, SystemLauncher};
use menu::InteractionLoop;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Diagnostics go to stderr; RUST_LOG overrides the default level
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr).compact())
        .with(filter)
        .init();

    let config = Config::from_env()?;
    let console = console::select();
    if config.adb_fallback {
        console.warn(&format!(
            "ADB binary not found at '{}'. Falling back to 'adb' in PATH.",
            config::BUNDLED_ADB
        ));
    }

    install_interrupt_handler(&config.adb_path)?;

    let executor = CommandExecutor::new(SystemLauncher, &config.adb_path, config.timeout, console);
    let mut manager = ConnectionManager::new(executor, config.connect_timeout);

    match run(&mut manager, &cli.address, &config).await {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(err) => {
            tracing::debug!(?err, "session ended with error");
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Run one session against `target` and stop the adb server however it ends.
async fn run<L: Launcher>(
    manager: &mut ConnectionManager<L>,
    target: &Target,
    config: &Config,
) -> Result<(), SessionError> {
    let outcome = run_session(manager, target, config).await;
    manager.stop_server().await;
    outcome
}

/// Connect, verify, then hand the session to the menu.
async fn run_session<L: Launcher>(
    manager: &mut ConnectionManager<L>,
    target: &Target,
    config: &Config,
) -> Result<(), SessionError> {
    manager.establish(target).await?;

    let session = manager.session();
    tracing::debug!(
        device = ?session.target,
        adb = %session.adb_path,
        timeout = ?session.timeout,
        "session verified"
    );

    let executor = manager.executor()?;
    DeviceInfo::query(executor).await.render(executor.console().as_ref());

    let catalog = Catalog::standard();
    let outcome = InteractionLoop::new(&catalog, Context { executor, config })
        .run()
        .await;
    tracing::debug!(?outcome, "interaction loop finished");

    Ok(())
}

/// Stop the adb server and exit with 130 on Ctrl-C.
fn install_interrupt_handler(adb_path: &str) -> Result<()> {
    let adb_path = adb_path.to_string();
    ctrlc::set_handler(move || {
        let _ = std::process::Command::new(&adb_path)
            .arg("kill-server")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();
        eprintln!("\nInterrupted, ADB stopped");
        std::process::exit(130);
    })
    .context("Failed to install Ctrl-C handler")
}
