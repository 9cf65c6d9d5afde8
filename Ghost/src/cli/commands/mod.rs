use clap::Subcommand;
use std::path::PathBuf;

pub mod catalog;
pub mod definitions;
pub mod execute;
pub mod loadout;
pub mod lookup;
pub mod run;

use definitions::ConfigCommands;

#[derive(Subcommand)]
pub enum Commands {
    /// Run the bot on the console (one message per line)
    Run {
        /// User id the console speaks as
        #[arg(long, default_value_t = 1)]
        user_id: u64,

        /// Display name the console speaks as
        #[arg(long, default_value = "console")]
        user_name: String,
    },

    /// Review a DIM loadout link
    Review {
        /// Share link (dim.gg or destinyitemmanager.com)
        link: String,

        /// Print the analysis as JSON instead of the scorecard
        #[arg(long)]
        json: bool,
    },

    /// Look up weapons by name
    Weapon {
        /// Name or part of a name
        query: String,

        /// Most matches to show
        #[arg(short, long, default_value_t = 5)]
        limit: usize,
    },

    /// Show catalog status
    Status,

    /// Decode a share link to its payload JSON (no catalog needed)
    Decode {
        /// Share link
        link: String,

        /// Resolve the payload against the catalog and print the loadout
        #[arg(long)]
        resolve: bool,
    },

    /// Build a share link from a payload JSON file
    Encode {
        /// Payload file, or `-` for stdin
        source: PathBuf,
    },

    /// Inspect or create the config file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}
