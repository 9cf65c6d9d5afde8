//! Process-wide catalog state
//!
//! The catalog is built once at startup and never refreshed. A failed build
//! leaves the bot running with the catalog marked unavailable.

use std::sync::Arc;

use ishtar::manifest::{Catalog, CatalogClient};

use crate::config::{BUNGIE_API_KEY_VAR, GhostConfig};

#[derive(Debug, Clone)]
pub enum CatalogState {
    Ready(Arc<Catalog>),
    /// Reason shown to users
    Unavailable(String),
}

impl CatalogState {
    /// Build the catalog from the configured tables directory, or from
    /// Bungie.net with `api_key`. Never fails; failures become `Unavailable`.
    pub async fn initialize(config: &GhostConfig, api_key: Option<String>) -> Self {
        if let Some(dir) = &config.manifest.tables_dir {
            return match Catalog::from_dir(dir) {
                Ok(catalog) => Self::ready(catalog.with_cache_duration(config.cache_duration())),
                Err(e) => Self::unavailable(format!(
                    "could not load tables from {}: {e}",
                    dir.display()
                )),
            };
        }

        let client = match CatalogClient::new(config.client_config(api_key)) {
            Ok(client) => client,
            Err(ishtar::Error::MissingApiKey) => {
                return Self::unavailable(format!("{BUNGIE_API_KEY_VAR} is not set"));
            }
            Err(e) => return Self::unavailable(e.to_string()),
        };

        match client.initialize().await {
            Ok(catalog) => Self::ready(catalog),
            Err(e) => Self::unavailable(format!("manifest download failed: {e}")),
        }
    }

    #[must_use]
    pub fn ready(catalog: Catalog) -> Self {
        Self::Ready(Arc::new(catalog))
    }

    #[must_use]
    pub fn unavailable(reason: impl Into<String>) -> Self {
        let reason = reason.into();
        tracing::warn!("Item catalog unavailable: {reason}");
        Self::Unavailable(reason)
    }

    #[must_use]
    pub fn catalog(&self) -> Option<&Arc<Catalog>> {
        match self {
            Self::Ready(catalog) => Some(catalog),
            Self::Unavailable(_) => None,
        }
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    /// One-line summary for logs and the status command
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Ready(catalog) => format!(
                "ready ({} items, manifest {})",
                catalog.item_count(),
                if catalog.version().is_empty() { "unknown" } else { catalog.version() }
            ),
            Self::Unavailable(reason) => format!("unavailable: {reason}"),
        }
    }
}
