//! Device identification.

use crate::console::{Console, Tone};
use crate::executor::CommandExecutor;
use crate::launcher::Launcher;

/// Shown for a property that could not be read.
pub const UNKNOWN: &str = "unknown";

/// Label and system property, in display order.
pub const PROPERTIES: [(&str, &str); 5] = [
    ("Serial", "ro.serialno"),
    ("Model", "ro.product.model"),
    ("Brand", "ro.product.brand"),
    ("Android", "ro.build.version.release"),
    ("Device", "ro.product.device"),
];

/// Identity of the connected device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceInfo {
    pub serial: String,
    pub model: String,
    pub brand: String,
    pub android_version: String,
    pub codename: String,
}

impl DeviceInfo {
    /// Query every property. A failed or empty query yields [`UNKNOWN`].
    pub async fn query<L: Launcher>(executor: &CommandExecutor<L>) -> Self {
        let mut values = Vec::with_capacity(PROPERTIES.len());
        for (_, property) in PROPERTIES {
            let result = executor.shell(&format!("getprop {property}")).await;
            let value = match result.output() {
                Some(v) if !v.is_empty() => v.to_string(),
                _ => UNKNOWN.to_string(),
            };
            values.push(value);
        }

        let mut values = values.into_iter();
        let mut next = || values.next().unwrap_or_else(|| UNKNOWN.to_string());
        Self {
            serial: next(),
            model: next(),
            brand: next(),
            android_version: next(),
            codename: next(),
        }
    }

    /// `(label, value)` pairs in display order.
    pub fn entries(&self) -> [(&'static str, &str); 5] {
        [
            (PROPERTIES[0].0, self.serial.as_str()),
            (PROPERTIES[1].0, self.model.as_str()),
            (PROPERTIES[2].0, self.brand.as_str()),
            (PROPERTIES[3].0, self.android_version.as_str()),
            (PROPERTIES[4].0, self.codename.as_str()),
        ]
    }

    pub fn render(&self, console: &dyn Console) {
        console.print("");
        console.say(Tone::Heading, "------------- Device Info -------------");
        for (label, value) in self.entries() {
            console.print(&format!("{label:<9}: {value}"));
        }
        console.say(Tone::Heading, "---------------------------------------");
        console.print("");
    }
}
