//! Share-link payload codec
//!
//! A share link carries its loadout as text in the URL fragment or in one of
//! a few query parameters. The text is normally URL-safe base64 of a
//! gzip-compressed JSON document, but older links skip the compression and
//! some skip base64 entirely, so decoding falls back stage by stage:
//!
//! ```text
//! percent-decode -> base64 -> gunzip -> JSON
//!                          \-> JSON (not gzip)
//!                \-> JSON (not base64)
//! ```

use std::fmt;
use std::io::{Read, Write};

use base64::Engine as _;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use flate2::Compression;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use percent_encoding::percent_decode_str;
use reqwest::Url;
use serde_json::Value;
use thiserror::Error;

use crate::error::Result;

/// Hosts whose links carry loadouts. Subdomains are accepted.
pub const SHARE_HOSTS: &[&str] = &["dim.gg", "destinyitemmanager.com"];

/// Query parameters searched for a payload, in priority order (after the
/// fragment).
pub const PAYLOAD_PARAMS: &[&str] = &["loadout", "build", "data"];

/// Base URL used when building share links
pub const SHARE_LINK_BASE: &str = "https://app.destinyitemmanager.com/loadouts";

const LENIENT: GeneralPurposeConfig = GeneralPurposeConfig::new()
    .with_encode_padding(false)
    .with_decode_padding_mode(DecodePaddingMode::Indifferent);
const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::URL_SAFE, LENIENT);
const STANDARD_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::STANDARD, LENIENT);

/// Which input the final JSON parse ran over
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadStage {
    /// Decompressed gzip stream
    Gzip,
    /// Base64-decoded bytes that were not gzip
    Base64,
    /// Percent-decoded text that was not base64
    Text,
}

impl fmt::Display for PayloadStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PayloadStage::Gzip => "after gunzip",
            PayloadStage::Base64 => "after base64",
            PayloadStage::Text => "as plain text",
        })
    }
}

/// Why a link or payload could not be decoded
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("{0:?} is not a loadout sharing host")]
    UnknownHost(String),

    #[error("link has no loadout payload")]
    NoPayload,

    #[error("payload is not percent-encoded UTF-8: {0}")]
    Percent(String),

    #[error("payload is not base64: {0}")]
    Base64(String),

    #[error("payload is not gzip: {0}")]
    Gzip(String),

    #[error("payload is not UTF-8 ({stage}): {message}")]
    Utf8 { stage: PayloadStage, message: String },

    #[error("payload is not JSON ({stage}): {message}")]
    Json { stage: PayloadStage, message: String },

    #[error("payload JSON is not a loadout: {0}")]
    Shape(String),
}

/// Whether `host` is one of `hosts` or a subdomain of one
#[must_use]
pub fn is_share_host(host: &str, hosts: &[&str]) -> bool {
    let host = host.trim_end_matches('.').to_ascii_lowercase();
    hosts.iter().any(|allowed| {
        host == *allowed
            || host
                .strip_suffix(allowed)
                .is_some_and(|prefix| prefix.ends_with('.'))
    })
}

/// Parse a link, tolerating a missing scheme
///
/// # Errors
/// Returns `InvalidUrl` if the text is not a URL even with `https://` added.
pub fn parse_link(link: &str) -> std::result::Result<Url, DecodeError> {
    let link = link.trim().trim_matches(|c| c == '<' || c == '>');
    let parsed = if link.contains("://") {
        Url::parse(link)
    } else {
        Url::parse(&format!("https://{link}"))
    };
    parsed.map_err(|e| DecodeError::InvalidUrl(e.to_string()))
}

/// Raw (still percent-encoded) payload candidates of a URL: the fragment
/// first, then each of [`PAYLOAD_PARAMS`] that is present.
#[must_use]
pub fn payload_candidates(url: &Url) -> Vec<String> {
    let mut candidates = Vec::new();

    if let Some(fragment) = url.fragment().filter(|f| !f.trim().is_empty()) {
        candidates.push(fragment.to_string());
    }

    if let Some(query) = url.query() {
        for param in PAYLOAD_PARAMS {
            let value = query.split('&').find_map(|pair| {
                let (key, value) = pair.split_once('=')?;
                let key = percent_decode_str(key).decode_utf8_lossy();
                (key == *param && !value.is_empty()).then(|| value.to_string())
            });
            candidates.extend(value);
        }
    }

    candidates
}

/// Decode the payload JSON of a share link. The first candidate that decodes
/// wins; otherwise the last candidate's error is returned.
///
/// # Errors
/// Returns a [`DecodeError`] naming the step that failed.
pub fn decode_link(link: &str, hosts: &[&str]) -> std::result::Result<Value, DecodeError> {
    let url = parse_link(link)?;
    let host = url.host_str().unwrap_or_default();
    if !is_share_host(host, hosts) {
        return Err(DecodeError::UnknownHost(host.to_string()));
    }

    let mut last_error = DecodeError::NoPayload;
    for candidate in payload_candidates(&url) {
        match decode_payload(&candidate) {
            Ok(value) => return Ok(value),
            Err(e) => {
                tracing::debug!("Payload candidate rejected: {e}");
                last_error = e;
            }
        }
    }
    Err(last_error)
}

/// Decode one raw payload string
///
/// # Errors
/// Returns `Percent` when the text is not valid percent-encoded UTF-8, or
/// `Json` (tagged with the stage reached) when no fallback yields JSON.
pub fn decode_payload(raw: &str) -> std::result::Result<Value, DecodeError> {
    let text = percent_decode_str(raw)
        .decode_utf8()
        .map_err(|e| DecodeError::Percent(e.to_string()))?;
    let text = text.trim();

    match decode_base64(text) {
        Ok(bytes) => match gunzip(&bytes) {
            Ok(json) => parse_json(&json, PayloadStage::Gzip),
            Err(e) => {
                tracing::debug!("{e}; parsing base64 bytes directly");
                parse_json(&bytes, PayloadStage::Base64)
            }
        },
        Err(e) => {
            tracing::debug!("{e}; parsing text directly");
            parse_json(text.as_bytes(), PayloadStage::Text)
        }
    }
}

/// Base64-decode, accepting either alphabet with or without padding. Spaces
/// are read as `+`, which form encoding turns into spaces.
///
/// # Errors
/// Returns `Base64` if neither alphabet accepts the text.
pub fn decode_base64(text: &str) -> std::result::Result<Vec<u8>, DecodeError> {
    let text = text.replace(' ', "+");
    URL_SAFE_LENIENT
        .decode(&text)
        .or_else(|_| STANDARD_LENIENT.decode(&text))
        .map_err(|e| DecodeError::Base64(e.to_string()))
}

/// Decompress a gzip stream
///
/// # Errors
/// Returns `Gzip` if the bytes are not a complete gzip stream.
pub fn gunzip(bytes: &[u8]) -> std::result::Result<Vec<u8>, DecodeError> {
    let mut decoder = GzDecoder::new(bytes);
    let mut decompressed = Vec::with_capacity(bytes.len() * 4);
    decoder
        .read_to_end(&mut decompressed)
        .map_err(|e| DecodeError::Gzip(e.to_string()))?;
    Ok(decompressed)
}

fn parse_json(bytes: &[u8], stage: PayloadStage) -> std::result::Result<Value, DecodeError> {
    let text = std::str::from_utf8(bytes).map_err(|e| DecodeError::Utf8 {
        stage,
        message: e.to_string(),
    })?;
    serde_json::from_str(text).map_err(|e| DecodeError::Json {
        stage,
        message: e.to_string(),
    })
}

/// Encode a payload the way [`decode_payload`] reads it first: JSON, gzip,
/// URL-safe base64 without padding.
///
/// # Errors
/// Returns an error if serialization or compression fails.
pub fn encode_payload(payload: &Value) -> Result<String> {
    let json = serde_json::to_vec(payload)?;
    let mut encoder = GzEncoder::new(Vec::new(), Compression::best());
    encoder.write_all(&json)?;
    let compressed = encoder.finish()?;
    Ok(URL_SAFE_LENIENT.encode(compressed))
}

/// Build a share link carrying `payload` in its fragment
///
/// # Errors
/// Returns an error if the payload cannot be encoded.
pub fn share_link(payload: &Value) -> Result<String> {
    Ok(format!("{SHARE_LINK_BASE}#{}", encode_payload(payload)?))
}
