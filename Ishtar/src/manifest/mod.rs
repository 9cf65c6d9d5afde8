//! Destiny 2 manifest catalog
//!
//! The manifest is Bungie's static game database. This module downloads the
//! handful of definition tables the loadout tools need and exposes them as a
//! read-only [`Catalog`].
//!
//! # Lifecycle
//!
//! A catalog is built exactly once, either by [`CatalogClient::initialize`]
//! or from local files with [`Catalog::from_dir`], then shared behind an
//! `Arc` with the decoder and the command handlers. There is no refresh: a
//! failed initialization leaves the caller without a catalog for the rest of
//! the process.
//!
//! # Usage
//!
//! ```no_run
//! use ishtar::manifest::{CatalogClient, ClientConfig};
//!
//! # async fn run() -> ishtar::Result<()> {
//! let client = CatalogClient::new(ClientConfig {
//!     api_key: std::env::var("BUNGIE_API_KEY").ok(),
//!     ..ClientConfig::default()
//! })?;
//! let catalog = client.initialize().await?;
//! if let Some(item) = catalog.lookup(-1_073_741_824) {
//!     println!("{} ({})", item.name, item.item_type);
//! }
//! # Ok(())
//! # }
//! ```

mod catalog;
mod client;
pub mod definitions;
mod types;

pub use catalog::{Catalog, DEFAULT_CACHE_DURATION, RawTables};
pub use client::{
    API_KEY_HEADER, CatalogClient, ClientConfig, DEFAULT_API_ROOT, DEFAULT_CONTENT_ROOT,
    parse_manifest_envelope, table_paths,
};
pub use types::{CatalogEntry, EXOTIC_TIER, Element, ItemCategory, LEGENDARY_TIER};
