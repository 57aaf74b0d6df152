//! Runtime configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};

/// Bridge client shipped next to the tool.
pub const BUNDLED_ADB: &str = "./tools/adb";
pub const BUNDLED_SCRCPY: &str = "./tools/scrcpy";

/// Timeout for device operations.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);
/// Timeout for server lifecycle, connect and device listing.
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(15);

pub const SCREENSHOT_PATH: &str = "./screenshot.png";

#[derive(Debug, Clone)]
pub struct Config {
    pub adb_path: String,
    pub scrcpy_path: String,
    pub timeout: Duration,
    pub connect_timeout: Duration,
    pub screenshot_path: PathBuf,
    /// Set when the bundled bridge client was missing and `adb` from PATH is used.
    pub adb_fallback: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            adb_path: BUNDLED_ADB.to_string(),
            scrcpy_path: BUNDLED_SCRCPY.to_string(),
            timeout: DEFAULT_TIMEOUT,
            connect_timeout: CONNECT_TIMEOUT,
            screenshot_path: PathBuf::from(SCREENSHOT_PATH),
            adb_fallback: false,
        }
    }
}

impl Config {
    /// Build from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::resolve(|key| std::env::var(key).ok(), |path| Path::new(path).exists())
    }

    fn resolve(
        var: impl Fn(&str) -> Option<String>,
        exists: impl Fn(&str) -> bool,
    ) -> Result<Self> {
        let mut config = Config::default();

        match var("SWORD_ADB") {
            Some(path) => config.adb_path = path,
            None if !exists(BUNDLED_ADB) => {
                config.adb_path = "adb".to_string();
                config.adb_fallback = true;
            }
            None => {}
        }

        if let Some(path) = var("SWORD_SCRCPY") {
            config.scrcpy_path = path;
        }

        if let Some(raw) = var("SWORD_TIMEOUT") {
            let secs: u64 = raw
                .trim()
                .parse()
                .with_context(|| format!("Invalid SWORD_TIMEOUT value: {raw:?}"))?;
            // A zero deadline would fail every command before it starts
            anyhow::ensure!(secs > 0, "Invalid SWORD_TIMEOUT value: {raw:?} (must be at least 1 second)");
            config.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }
}
