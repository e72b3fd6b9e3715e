use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::ui::OutputFormat;

/// Set NASA's Astronomy Picture of the Day as the desktop background
#[derive(Parser, Debug)]
#[command(name = "apod", author, version, about, long_about = None)]
pub struct Cli {
    /// Show debug output
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Output format
    #[arg(long, value_enum, default_value = "text", global = true)]
    pub output: OutputFormat,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Use this configuration file instead of the per-user one
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Fetch today's picture and set it as the wallpaper (default)
    Run(RunArgs),
    /// Inspect or create the configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    /// Download the picture but leave the desktop background alone
    #[arg(long)]
    pub no_set: bool,

    /// Directory to save the picture in
    #[arg(long, value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Connection attempts before giving up
    #[arg(long, value_name = "N")]
    pub attempts: Option<u32>,

    /// Seconds to wait between connection attempts
    #[arg(long, value_name = "SECS")]
    pub delay: Option<u64>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommands {
    /// Print the effective configuration
    Show,
    /// Write a default configuration file if none exists
    Init,
    /// Print the configuration file path
    Path,
}
