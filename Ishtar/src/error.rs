//! Error types for `Ishtar`

use std::path::PathBuf;

use thiserror::Error;

/// The error type for `Ishtar` operations.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    // ==================== IO Errors ====================
    /// IO error from file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ==================== Manifest Errors ====================
    /// HTTP transport error talking to Bungie.net.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Bungie.net answered with a non-success status code.
    #[error("Bungie.net returned HTTP {status} for {url}")]
    HttpStatus {
        /// The HTTP status code.
        status: u16,
        /// The requested URL.
        url: String,
    },

    /// The Bungie platform envelope reported an error.
    #[error("Bungie platform error {code} ({status}): {message}")]
    Platform {
        /// Numeric `ErrorCode` from the envelope.
        code: i64,
        /// `ErrorStatus` name from the envelope.
        status: String,
        /// Human-readable `Message` from the envelope.
        message: String,
    },

    /// No API key was configured for the manifest client.
    #[error("no Bungie.net API key configured")]
    MissingApiKey,

    /// The configured API key cannot be sent as a header value.
    #[error("Bungie.net API key contains invalid header characters")]
    InvalidApiKey,

    /// The manifest index did not list content for the requested locale.
    #[error("manifest has no content for locale '{0}'")]
    ManifestLocaleMissing(String),

    /// The manifest index did not list a required definition table.
    #[error("manifest is missing definition table {0}")]
    ManifestTableMissing(String),

    /// A definition table could not be read from a local directory.
    #[error("definition table not found: {path}")]
    TableFileMissing {
        /// The expected path to the table file.
        path: PathBuf,
    },

    /// A definition table had an unexpected shape.
    #[error("invalid {table} table: {message}")]
    InvalidTable {
        /// The table name.
        table: String,
        /// Description of what is invalid.
        message: String,
    },

    // ==================== Loadout Errors ====================
    /// A share link could not be decoded.
    #[error("loadout decode failed: {0}")]
    Decode(#[from] crate::loadout::DecodeError),

    /// A share-link payload could not be encoded.
    #[error("loadout encode failed: {0}")]
    Encode(String),

    // ==================== Serialization Errors ====================
    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// A specialized Result type for `Ishtar` operations.
pub type Result<T> = std::result::Result<T, Error>;
