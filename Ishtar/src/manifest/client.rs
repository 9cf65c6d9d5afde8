//! Bungie.net manifest client
//!
//! Fetches the manifest index, then each definition table the catalog needs,
//! one request at a time. There is no retry: the first failure ends
//! initialization and the caller decides how to degrade.

use std::time::{Duration, Instant};

use indexmap::IndexMap;
use reqwest::header::{HeaderMap, HeaderValue};

use crate::error::{Error, Result};

use super::catalog::{Catalog, DEFAULT_CACHE_DURATION, RawTables};
use super::definitions::{
    CLASS_TABLE, DAMAGE_TYPE_TABLE, ITEM_TABLE, ManifestIndex, PERK_TABLE, PLATFORM_SUCCESS,
    PlatformEnvelope, REQUIRED_TABLES, STAT_TABLE,
};

/// Bungie.net platform API root
pub const DEFAULT_API_ROOT: &str = "https://www.bungie.net/Platform";
/// Root that manifest content paths are relative to
pub const DEFAULT_CONTENT_ROOT: &str = "https://www.bungie.net";
/// Header carrying the application API key
pub const API_KEY_HEADER: &str = "x-api-key";

const USER_AGENT: &str = concat!("ishtar/", env!("CARGO_PKG_VERSION"));

/// Settings for [`CatalogClient`]
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_key: Option<String>,
    pub api_root: String,
    pub content_root: String,
    pub locale: String,
    pub timeout: Duration,
    pub cache_duration: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_root: DEFAULT_API_ROOT.to_string(),
            content_root: DEFAULT_CONTENT_ROOT.to_string(),
            locale: "en".to_string(),
            timeout: Duration::from_secs(120),
            cache_duration: DEFAULT_CACHE_DURATION,
        }
    }
}

/// HTTP client for the manifest and its definition tables
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl CatalogClient {
    /// Create a client. An API key is required.
    ///
    /// # Errors
    /// Returns an error if no key is configured or the HTTP client cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let key = config
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or(Error::MissingApiKey)?;

        let mut headers = HeaderMap::new();
        let mut value = HeaderValue::from_str(key.trim()).map_err(|_| Error::InvalidApiKey)?;
        value.set_sensitive(true);
        headers.insert(API_KEY_HEADER, value);

        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(config.timeout)
            .build()?;

        Ok(Self { http, config })
    }

    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// URL of the manifest index
    #[must_use]
    pub fn manifest_url(&self) -> String {
        format!("{}/Destiny2/Manifest/", self.config.api_root.trim_end_matches('/'))
    }

    /// Fetch the manifest index
    ///
    /// # Errors
    /// Returns an error on transport failure, a non-success HTTP status, or a
    /// platform error in the response envelope.
    pub async fn fetch_manifest_index(&self) -> Result<ManifestIndex> {
        let body = self.get_text(&self.manifest_url()).await?;
        parse_manifest_envelope(&body)
    }

    /// Fetch one definition table by its content path
    ///
    /// # Errors
    /// Returns an error on transport failure or a non-success HTTP status.
    pub async fn fetch_table(&self, content_path: &str) -> Result<String> {
        let url = format!(
            "{}{}",
            self.config.content_root.trim_end_matches('/'),
            content_path
        );
        self.get_text(&url).await
    }

    /// Fetch the manifest index and every required table, in order, and
    /// build the catalog.
    ///
    /// # Errors
    /// Returns the first failure encountered; nothing is retried.
    pub async fn initialize(&self) -> Result<Catalog> {
        let started = Instant::now();
        tracing::info!("Fetching Destiny 2 manifest from {}", self.manifest_url());

        let index = self.fetch_manifest_index().await?;
        let paths = table_paths(&index, &self.config.locale)?;
        tracing::info!("Manifest version {} ({} tables)", index.version, paths.len());

        let mut fetched: IndexMap<&str, String> = IndexMap::new();
        for (table, path) in &paths {
            tracing::debug!("Fetching {table} from {path}");
            let body = self.fetch_table(path).await?;
            tracing::debug!("{table}: {} bytes", body.len());
            fetched.insert(*table, body);
        }

        let mut take = |table: &str| fetched.swap_remove(table).unwrap_or_default();
        let tables = RawTables {
            items: take(ITEM_TABLE),
            stats: take(STAT_TABLE),
            damage_types: take(DAMAGE_TYPE_TABLE),
            classes: take(CLASS_TABLE),
            perks: take(PERK_TABLE),
        };

        let catalog = Catalog::from_tables(index.version, &tables)?
            .with_cache_duration(self.config.cache_duration);
        tracing::info!("Manifest loaded in {:.1?}", started.elapsed());
        Ok(catalog)
    }

    async fn get_text(&self, url: &str) -> Result<String> {
        tracing::debug!("GET {url}");
        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        Ok(response.text().await?)
    }
}

/// Unwrap the platform envelope around a manifest index
///
/// # Errors
/// Returns an error if the JSON is malformed or the envelope reports failure.
pub fn parse_manifest_envelope(body: &str) -> Result<ManifestIndex> {
    let envelope: PlatformEnvelope<ManifestIndex> = serde_json::from_str(body)?;
    if envelope.error_code != PLATFORM_SUCCESS {
        return Err(Error::Platform {
            code: envelope.error_code,
            status: envelope.error_status,
            message: envelope.message,
        });
    }
    envelope.response.ok_or_else(|| Error::Platform {
        code: envelope.error_code,
        status: envelope.error_status,
        message: "response body missing".to_string(),
    })
}

/// Content paths of every required table for a locale, in fetch order
///
/// # Errors
/// Returns an error if the locale or any required table is absent.
pub fn table_paths(index: &ManifestIndex, locale: &str) -> Result<IndexMap<&'static str, String>> {
    let tables = index
        .json_world_component_content_paths
        .get(locale)
        .ok_or_else(|| Error::ManifestLocaleMissing(locale.to_string()))?;

    REQUIRED_TABLES
        .iter()
        .map(|&table| {
            tables
                .get(table)
                .map(|path| (table, path.clone()))
                .ok_or_else(|| Error::ManifestTableMissing(table.to_string()))
        })
        .collect()
}
