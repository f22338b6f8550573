use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use hostmonitor::ConnectionType;

#[derive(Parser)]
#[command(name = "hostmonitor", version)]
#[command(about = "Reports reachability changes of monitored hosts.")]
pub struct CommandLine {
    /// Service config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Raise log verbosity, repeat for trace output
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check hosts periodically and whenever connectivity changes
    #[command(alias = "r")]
    Run,
    /// Run a single check cycle
    #[command(alias = "c")]
    Check {
        /// Use this connection type instead of asking the platform
        #[arg(long)]
        connection_type: Option<ConnectionType>,
    },
    /// Start monitoring a host
    #[command(alias = "a")]
    Add { host: String, port: u16 },
    /// Stop monitoring a host
    Remove { host: String, port: u16 },
    /// Stop monitoring every host
    Clear,
    /// Show monitored hosts and their last known status
    #[command(alias = "ls")]
    List,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
