//! CLI argument definitions using clap

use clap::Parser;

use crate::connection::Target;

#[derive(Parser)]
#[command(name = "sword")]
#[command(author, version, about = "Interactive Android device controller over adb", long_about = None)]
pub struct Cli {
    /// Device address, `host` or `host:port` (port defaults to 5555)
    #[arg(value_parser = Target::parse)]
    pub address: Target,
}
