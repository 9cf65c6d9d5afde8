//! # Ishtar
//!
//! A Destiny 2 loadout review engine: the Bungie.net manifest, share-link
//! decoding, rule-based synergy scoring and text scorecards.
//!
//! ## Pipeline
//!
//! ```text
//! share link -> LoadoutDecoder (+ Catalog) -> LoadoutRecord
//!            -> SynergyEvaluator -> AnalysisResult -> format_report
//! ```
//!
//! ## Quick Start
//!
//! ### Fetching the catalog
//!
//! ```no_run
//! use ishtar::manifest::{CatalogClient, ClientConfig};
//!
//! # async fn run() -> ishtar::Result<()> {
//! let client = CatalogClient::new(ClientConfig {
//!     api_key: Some("your-api-key".to_string()),
//!     ..ClientConfig::default()
//! })?;
//! let catalog = client.initialize().await?;
//! println!("{} items", catalog.item_count());
//! # Ok(())
//! # }
//! ```
//!
//! ### Reviewing a loadout
//!
//! ```
//! use std::sync::Arc;
//! use ishtar::prelude::*;
//!
//! let catalog = Arc::new(Catalog::empty());
//! let decoder = LoadoutDecoder::new(catalog);
//! let evaluator = SynergyEvaluator::default();
//!
//! let link = ishtar::loadout::share_link(&serde_json::json!({
//!     "characterClass": 2,
//!     "equipped": []
//! }))?;
//! let loadout = decoder.parse(&link).expect("readable link");
//! let result = evaluator.analyze(&loadout);
//! assert_eq!(result.rating, 5);
//! println!("{}", format_report(&result));
//! # Ok::<(), ishtar::Error>(())
//! ```
//!
//! ## Modules
//!
//! - [`manifest`] - manifest client and the read-only [`Catalog`](manifest::Catalog)
//! - [`loadout`] - share-link codec and decoder
//! - [`synergy`] - rule tables and the evaluator
//! - [`report`] - text rendering

pub mod error;
pub mod loadout;
pub mod manifest;
pub mod report;
pub mod synergy;
pub mod utils;

// Re-exports for convenience
pub use error::{Error, Result};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::error::{Error, Result};

    pub use crate::manifest::{Catalog, CatalogClient, CatalogEntry, ClientConfig, Element};

    pub use crate::loadout::{
        ArmorInfo, CharacterClass, DecodeError, LoadoutDecoder, LoadoutRecord, SubclassInfo,
        WeaponInfo,
    };

    pub use crate::synergy::{AnalysisResult, RuleTable, SynergyEvaluator};

    pub use crate::report::{format_report, format_weapon};
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
