//! Command-line interface.

use std::path::PathBuf;

use clap::Parser;

/// Receive phone notifications over MQTT and show them on the desktop.
#[derive(Debug, Parser)]
#[command(name = "mqtt2notif", version, about)]
pub struct Cli {
    /// Path to the configuration file (defaults to the user config dir).
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Write a default configuration file and exit.
    #[arg(long)]
    pub init_config: bool,

    /// Verbose (debug-level) logging.
    #[arg(short, long)]
    pub verbose: bool,

    /// Daemon mode: warnings and errors only. Process supervision and
    /// detaching are left to the service manager.
    #[arg(long)]
    pub daemon: bool,

    /// Disable icon-over-preview compositing; plain icons are used instead.
    #[arg(long)]
    pub no_composite: bool,
}
