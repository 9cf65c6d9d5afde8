//! Bot configuration (ghost.toml)
//!
//! Everything here is plain settings. Secrets never live in the file; they
//! come from the environment through [`Secrets::from_env`].

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use ishtar::loadout::SHARE_HOSTS;
use ishtar::manifest::{ClientConfig, DEFAULT_API_ROOT, DEFAULT_CONTENT_ROOT};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Environment variable holding the chat bot token
pub const DISCORD_TOKEN_VAR: &str = "DISCORD_TOKEN";
/// Environment variable holding the Bungie.net API key
pub const BUNGIE_API_KEY_VAR: &str = "BUNGIE_API_KEY";

fn default_prefix() -> String {
    "!".to_string()
}

fn default_bot_name() -> String {
    "Ghost".to_string()
}

fn default_locale() -> String {
    "en".to_string()
}

fn default_api_root() -> String {
    DEFAULT_API_ROOT.to_string()
}

fn default_content_root() -> String {
    DEFAULT_CONTENT_ROOT.to_string()
}

fn default_request_timeout() -> u64 {
    120
}

fn default_cache_hours() -> u64 {
    24
}

fn default_reaction_timeout() -> u64 {
    60
}

fn default_sharing_hosts() -> Vec<String> {
    SHARE_HOSTS.iter().map(ToString::to_string).collect()
}

/// The full bot configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GhostConfig {
    /// Command prefix
    #[serde(default = "default_prefix")]
    pub prefix: String,
    #[serde(default)]
    pub bot: BotSettings,
    #[serde(default)]
    pub manifest: ManifestSettings,
    /// Seconds a reaction prompt stays open
    #[serde(default = "default_reaction_timeout")]
    pub reaction_timeout_secs: u64,
    /// Hosts whose links the review command accepts
    #[serde(default = "default_sharing_hosts")]
    pub sharing_hosts: Vec<String>,
    /// Fixed lines sent whenever a given author speaks
    #[serde(default)]
    pub alerts: Vec<AlertRule>,
}

/// Identity of the bot account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotSettings {
    #[serde(default = "default_bot_name")]
    pub name: String,
    /// User id of the bot itself; its own messages are ignored
    #[serde(default)]
    pub user_id: u64,
}

impl Default for BotSettings {
    fn default() -> Self {
        Self {
            name: default_bot_name(),
            user_id: 0,
        }
    }
}

/// Manifest download settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestSettings {
    #[serde(default = "default_locale")]
    pub locale: String,
    #[serde(default = "default_api_root")]
    pub api_root: String,
    #[serde(default = "default_content_root")]
    pub content_root: String,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
    /// Declared catalog lifetime, reported by the status command
    #[serde(default = "default_cache_hours")]
    pub cache_hours: u64,
    /// Load definition tables from this directory instead of Bungie.net
    #[serde(default)]
    pub tables_dir: Option<PathBuf>,
}

impl Default for ManifestSettings {
    fn default() -> Self {
        Self {
            locale: default_locale(),
            api_root: default_api_root(),
            content_root: default_content_root(),
            request_timeout_secs: default_request_timeout(),
            cache_hours: default_cache_hours(),
            tables_dir: None,
        }
    }
}

/// Send `message` before handling any message from `author_id`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertRule {
    pub author_id: u64,
    pub message: String,
}

impl Default for GhostConfig {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
            bot: BotSettings::default(),
            manifest: ManifestSettings::default(),
            reaction_timeout_secs: default_reaction_timeout(),
            sharing_hosts: default_sharing_hosts(),
            alerts: Vec::new(),
        }
    }
}

impl GhostConfig {
    /// Default config file location (`<config dir>/ghost/config.toml`)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("ghost").join("config.toml"))
    }

    /// Load from `path` if given, else from the default location if a file
    /// exists there, else defaults.
    ///
    /// # Errors
    /// Returns an error if a chosen file cannot be read or parsed.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::from_file(path);
        }
        match Self::default_path() {
            Some(path) if path.is_file() => Self::from_file(&path),
            _ => {
                tracing::debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Read and validate a config file
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn from_file(path: &Path) -> Result<Self> {
        tracing::info!("Loading config from {}", path.display());
        let content = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the bot cannot run with
    ///
    /// # Errors
    /// Returns `Config` naming the offending setting.
    pub fn validate(&self) -> Result<()> {
        if self.prefix.trim().is_empty() {
            return Err(Error::Config("prefix must not be empty".to_string()));
        }
        if self.reaction_timeout_secs == 0 {
            return Err(Error::Config("reaction_timeout_secs must be positive".to_string()));
        }
        if self.sharing_hosts.iter().all(|h| h.trim().is_empty()) {
            return Err(Error::Config("sharing_hosts must name at least one host".to_string()));
        }
        Ok(())
    }

    /// Serialize to TOML
    ///
    /// # Errors
    /// Returns `Config` if serialization fails.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::Config(e.to_string()))
    }

    #[must_use]
    pub fn reaction_timeout(&self) -> Duration {
        Duration::from_secs(self.reaction_timeout_secs)
    }

    #[must_use]
    pub fn cache_duration(&self) -> Duration {
        Duration::from_secs(self.manifest.cache_hours * 60 * 60)
    }

    /// Alert lines for an author, in configured order
    pub fn alerts_for(&self, author_id: u64) -> impl Iterator<Item = &str> {
        self.alerts
            .iter()
            .filter(move |rule| rule.author_id == author_id)
            .map(|rule| rule.message.as_str())
    }

    /// Manifest client settings with the given API key
    #[must_use]
    pub fn client_config(&self, api_key: Option<String>) -> ClientConfig {
        ClientConfig {
            api_key,
            api_root: self.manifest.api_root.clone(),
            content_root: self.manifest.content_root.clone(),
            locale: self.manifest.locale.clone(),
            timeout: Duration::from_secs(self.manifest.request_timeout_secs),
            cache_duration: self.cache_duration(),
        }
    }
}

/// Process secrets, read from the environment only
#[derive(Clone, Default)]
pub struct Secrets {
    pub discord_token: Option<String>,
    pub bungie_api_key: Option<String>,
}

impl Secrets {
    #[must_use]
    pub fn from_env() -> Self {
        let read = |var: &str| {
            std::env::var(var)
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        Self {
            discord_token: read(DISCORD_TOKEN_VAR),
            bungie_api_key: read(BUNGIE_API_KEY_VAR),
        }
    }
}

impl std::fmt::Debug for Secrets {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mask = |v: &Option<String>| if v.is_some() { "<set>" } else { "<unset>" };
        f.debug_struct("Secrets")
            .field("discord_token", &mask(&self.discord_token))
            .field("bungie_api_key", &mask(&self.bungie_api_key))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = GhostConfig::default();
        assert_eq!(config.prefix, "!");
        assert_eq!(config.reaction_timeout(), Duration::from_secs(60));
        assert_eq!(config.cache_duration(), Duration::from_secs(86_400));
        assert_eq!(config.sharing_hosts, vec!["dim.gg", "destinyitemmanager.com"]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
prefix = "?"

[bot]
user_id = 42

[manifest]
locale = "fr"

[[alerts]]
author_id = 7
message = "Heads up"
"#
        )
        .unwrap();

        let config = GhostConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.prefix, "?");
        assert_eq!(config.bot.user_id, 42);
        assert_eq!(config.bot.name, "Ghost");
        assert_eq!(config.manifest.locale, "fr");
        assert_eq!(config.manifest.cache_hours, 24);
        assert_eq!(config.alerts_for(7).collect::<Vec<_>>(), vec!["Heads up"]);
        assert_eq!(config.alerts_for(8).count(), 0);
    }

    #[test]
    fn test_invalid_files() {
        let mut broken = tempfile::NamedTempFile::new().unwrap();
        write!(broken, "prefix = ").unwrap();
        assert!(matches!(
            GhostConfig::load(Some(broken.path())),
            Err(Error::ConfigParse { .. })
        ));

        let mut empty_prefix = tempfile::NamedTempFile::new().unwrap();
        write!(empty_prefix, "prefix = \" \"").unwrap();
        assert!(matches!(
            GhostConfig::load(Some(empty_prefix.path())),
            Err(Error::Config(_))
        ));

        let missing = tempfile::tempdir().unwrap().path().join("nope.toml");
        assert!(matches!(GhostConfig::load(Some(&missing)), Err(Error::Io(_))));
    }

    #[test]
    fn test_toml_roundtrip() {
        let mut config = GhostConfig::default();
        config.alerts.push(AlertRule {
            author_id: 530_400_547_610_558_514,
            message: "🚨 Alert 🚨".to_string(),
        });
        let parsed: GhostConfig = toml::from_str(&config.to_toml().unwrap()).unwrap();
        assert_eq!(parsed.alerts, config.alerts);
        assert_eq!(parsed.manifest.api_root, config.manifest.api_root);
    }

    #[test]
    fn test_client_config() {
        let client = GhostConfig::default().client_config(Some("key".to_string()));
        assert_eq!(client.api_key.as_deref(), Some("key"));
        assert_eq!(client.timeout, Duration::from_secs(120));
        assert_eq!(client.locale, "en");
    }
}
