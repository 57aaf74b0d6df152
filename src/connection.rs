//! Bridge server lifecycle and device handshake.
//!
//! ```text
//! Disconnected -> start-server -> ServerRunning -> connect -> Connected -> devices -> Verified
//! ```
//!
//! A single connect attempt is made. Any failure leaves the session unusable
//! and the caller must still run [`ConnectionManager::stop_server`].

use std::fmt;
use std::time::Duration;

use crate::error::SessionError;
use crate::executor::CommandExecutor;
use crate::launcher::Launcher;

pub const DEFAULT_PORT: u16 = 5555;

/// Network address of the device's bridge daemon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub host: String,
    pub port: u16,
}

impl Target {
    /// Parse `host`, `host:port`, `[ipv6]` or `[ipv6]:port`.
    ///
    /// An unbracketed host with more than one `:` is rejected rather than
    /// guessing where the port starts.
    pub fn parse(address: &str) -> Result<Self, String> {
        let address = address.trim();

        let (host, port) = if let Some(rest) = address.strip_prefix('[') {
            let (host, tail) = rest
                .split_once(']')
                .ok_or_else(|| format!("missing ']' in '{address}'"))?;
            let port = match tail {
                "" => DEFAULT_PORT,
                _ => match tail.strip_prefix(':') {
                    Some(port) => parse_port(port, address)?,
                    None => return Err(format!("unexpected '{tail}' after ']' in '{address}'")),
                },
            };
            (host, port)
        } else {
            match address.split_once(':') {
                Some((_, rest)) if rest.contains(':') => {
                    return Err(format!(
                        "IPv6 address '{address}' must be bracketed, e.g. '[{address}]:{DEFAULT_PORT}'"
                    ));
                }
                Some((host, port)) => (host, parse_port(port, address)?),
                None => (address, DEFAULT_PORT),
            }
        };

        if host.is_empty() {
            return Err(format!("missing host in '{address}'"));
        }

        Ok(Self { host: host.to_string(), port })
    }
}

fn parse_port(port: &str, address: &str) -> Result<u16, String> {
    port.parse::<u16>()
        .map_err(|_| format!("invalid port '{port}' in '{address}'"))
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.host.contains(':') {
            write!(f, "[{}]:{}", self.host, self.port)
        } else {
            write!(f, "{}:{}", self.host, self.port)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Disconnected,
    ServerRunning,
    Connected,
    Verified,
}

/// The one device session of this process.
#[derive(Debug, Clone)]
pub struct Session {
    pub target: Option<Target>,
    pub adb_path: String,
    pub timeout: Duration,
    pub state: SessionState,
}

impl Session {
    pub fn is_verified(&self) -> bool {
        self.state == SessionState::Verified
    }
}

/// `true` when a `connect` response acknowledges the connection
/// ("connected to ..." or "already connected to ...").
pub fn is_connect_ack(response: &str) -> bool {
    response
        .split_whitespace()
        .any(|word| word.eq_ignore_ascii_case("connected"))
}

/// `true` when a `devices` listing shows a ready device on its second line.
pub fn has_ready_device(listing: &[&str]) -> bool {
    listing.len() >= 2 && listing[1].split_whitespace().skip(1).any(|status| status == "device")
}

pub struct ConnectionManager<L> {
    executor: CommandExecutor<L>,
    session: Session,
    connect_timeout: Duration,
}

impl<L: Launcher> ConnectionManager<L> {
    pub fn new(executor: CommandExecutor<L>, connect_timeout: Duration) -> Self {
        let session = Session {
            target: None,
            adb_path: executor.adb_path().to_string(),
            timeout: executor.timeout(),
            state: SessionState::Disconnected,
        };

        Self {
            executor,
            session,
            connect_timeout,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Executor for device operations. Only available once verified.
    pub fn executor(&self) -> Result<&CommandExecutor<L>, SessionError> {
        if self.session.is_verified() {
            Ok(&self.executor)
        } else {
            Err(SessionError::NotVerified)
        }
    }

    /// Start the bridge server. Failure is logged, not fatal.
    pub async fn start_server(&mut self) {
        let result = self.executor.server(&["start-server"], self.connect_timeout).await;
        if result.success {
            self.executor.console().info("ADB started");
        } else {
            self.executor.console().warn("ADB server did not start cleanly, continuing");
        }
        self.session.state = SessionState::ServerRunning;
    }

    /// Stop the bridge server and drop the session.
    pub async fn stop_server(&mut self) {
        let result = self.executor.server(&["kill-server"], self.connect_timeout).await;
        if result.success {
            self.executor.console().info("ADB stopped");
        }
        self.executor.set_serial(None);
        self.session.state = SessionState::Disconnected;
    }

    /// One connect attempt to `target`.
    pub async fn connect(&mut self, target: &Target) -> Result<(), SessionError> {
        let console = self.executor.console().clone();
        let address = target.to_string();
        console.info(&format!("Connecting to {address}"));

        let result = self
            .executor
            .server(&["connect", address.as_str()], self.connect_timeout)
            .await;

        if !is_connect_ack(&result.stdout) {
            console.error(&format!("Unable to connect to {address}"));
            return Err(SessionError::Connect {
                target: address,
                response: result.stdout,
            });
        }

        console.info(&format!("Connected to {address}"));
        self.session.target = Some(target.clone());
        self.session.state = SessionState::Connected;
        Ok(())
    }

    /// Check the device listing for a ready device.
    pub async fn verify_device(&mut self) -> Result<(), SessionError> {
        if self.session.state != SessionState::Connected {
            return Err(SessionError::NotVerified);
        }

        let console = self.executor.console().clone();
        console.info("Checking device connection...");

        let result = self.executor.server(&["devices"], self.connect_timeout).await;
        let listing: Vec<&str> = result.stdout.lines().collect();

        if !result.success || !has_ready_device(&listing) {
            console.error("No connected device found!");
            return Err(SessionError::Verify {
                listing: listing.iter().map(|l| l.to_string()).collect(),
            });
        }

        console.info("Device connected!");
        self.executor
            .set_serial(self.session.target.as_ref().map(Target::to_string));
        self.session.state = SessionState::Verified;
        Ok(())
    }

    /// Start the server, connect and verify. Stops at the first failure.
    pub async fn establish(&mut self, target: &Target) -> Result<(), SessionError> {
        self.start_server().await;
        self.connect(target).await?;
        self.verify_device().await
    }
}
