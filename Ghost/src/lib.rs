//! Ghost - Destiny 2 build-review chat bot
//!
//! Commands, configuration and the god-roll reaction flow on top of the
//! [`ishtar`] engine. Transport-agnostic: [`bot::Bot`] takes messages and
//! returns reply lines; [`console::run_console`] drives it over stdio.

// Re-export ishtar
pub use ishtar;

pub mod bot;
pub mod commands;
pub mod config;
pub mod console;
pub mod error;
pub mod godroll;
pub mod reaction;
pub mod state;

// Feature-gated modules
#[cfg(feature = "cli")]
pub mod cli;

pub use bot::{Bot, Message};
pub use commands::{Author, Command, CommandHandler, Reply};
pub use config::{GhostConfig, Secrets};
pub use error::{Error, Result};
pub use state::CatalogState;
