//! Registry of menu operations.
//!
//! The catalog is a fixed, ordered list built once at startup. Each entry maps a
//! stable key to a label and either an [`Action`] or the exit sentinel.

/// Argument an action needs before it runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgSpec {
    None,
    /// One string read from the operator, with a default for empty input.
    Prompt {
        label: &'static str,
        default: &'static str,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Back,
    Home,
    Menu,
    OpenUrl,
    OpenSettings,
    VolumeUp,
    VolumeDown,
    InstallApk,
    ClearLogcat,
    Screenshot,
    GetImei,
    SetBatteryLevel,
    SetBatteryStatus,
    ResetBattery,
    Mirror,
    DeviceInfo,
}

impl Action {
    pub fn arg_spec(self) -> ArgSpec {
        match self {
            Action::OpenUrl => ArgSpec::Prompt {
                label: "Enter URL to open",
                default: "https://google.com",
            },
            Action::InstallApk => ArgSpec::Prompt {
                label: "APK Path",
                default: "lib/evilscreen.apk",
            },
            Action::SetBatteryLevel => ArgSpec::Prompt {
                label: "Enter battery level (0-100)",
                default: "100",
            },
            Action::SetBatteryStatus => ArgSpec::Prompt {
                label: "Enter status (1=unknown, 2=charging, 3=discharging, 4=not charging, 5=full)",
                default: "2",
            },
            _ => ArgSpec::None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Run(Action),
    Exit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operation {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: Kind,
}

impl Operation {
    pub fn arg_spec(&self) -> ArgSpec {
        match self.kind {
            Kind::Run(action) => action.arg_spec(),
            Kind::Exit => ArgSpec::None,
        }
    }
}

pub const EXIT_KEY: &str = "0";

#[derive(Debug, Clone)]
pub struct Catalog {
    operations: Vec<Operation>,
}

impl Catalog {
    pub fn standard() -> Self {
        const ENTRIES: [(&str, &str, Kind); 17] = [
            ("1", "Back", Kind::Run(Action::Back)),
            ("2", "Home", Kind::Run(Action::Home)),
            ("3", "Menu", Kind::Run(Action::Menu)),
            ("4", "Open URL", Kind::Run(Action::OpenUrl)),
            ("5", "Open Settings", Kind::Run(Action::OpenSettings)),
            ("6", "Volume Up", Kind::Run(Action::VolumeUp)),
            ("7", "Volume Down", Kind::Run(Action::VolumeDown)),
            ("8", "Install APK", Kind::Run(Action::InstallApk)),
            ("9", "Clear Logcat", Kind::Run(Action::ClearLogcat)),
            ("10", "Screenshot", Kind::Run(Action::Screenshot)),
            ("11", "Get IMEI", Kind::Run(Action::GetImei)),
            ("12", "Set Battery Level", Kind::Run(Action::SetBatteryLevel)),
            ("13", "Set Battery Status", Kind::Run(Action::SetBatteryStatus)),
            ("14", "Reset Battery", Kind::Run(Action::ResetBattery)),
            ("15", "Mirroring Device", Kind::Run(Action::Mirror)),
            ("16", "Device Info", Kind::Run(Action::DeviceInfo)),
            (EXIT_KEY, "Exit", Kind::Exit),
        ];

        Self {
            operations: ENTRIES
                .into_iter()
                .map(|(key, label, kind)| Operation { key, label, kind })
                .collect(),
        }
    }

    pub fn resolve(&self, key: &str) -> Option<&Operation> {
        self.operations.iter().find(|op| op.key == key)
    }

    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// Two-column listing, left column filled first.
    pub fn render_lines(&self) -> Vec<String> {
        let half = self.operations.len().div_ceil(2);
        let (left, right) = self.operations.split_at(half);

        left.iter()
            .enumerate()
            .map(|(i, l)| {
                let cell = format!("[{}] {}", l.key, l.label);
                match right.get(i) {
                    Some(r) => format!("{cell:<30}[{}] {}", r.key, r.label),
                    None => cell,
                }
            })
            .collect()
    }
}
