//! Subcommand enum definitions for CLI

use clap::Subcommand;
use std::path::PathBuf;

/// Config file commands
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the effective configuration as TOML
    Show,

    /// Print the default config file location
    Path,

    /// Write a config file with default settings
    Init {
        /// Target file (defaults to the default location)
        path: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}
