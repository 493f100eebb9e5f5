//! In-memory image references as RFC 2397 `data:` URLs.
//!
//! A record hands out URLs rather than raw buffers so a front end can render
//! them directly. The archive step resolves them back into bytes.

use crate::constants::{DATA_URL_BASE64_MARKER, DATA_URL_SCHEME};
use crate::error::{CompressionError, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUrl(String);

impl DataUrl {
    /// Encode `bytes` as a base64 data URL with the given media type.
    pub fn encode(media_type: &str, bytes: &[u8]) -> Self {
        Self(format!(
            "{}{}{},{}",
            DATA_URL_SCHEME,
            media_type,
            DATA_URL_BASE64_MARKER,
            STANDARD.encode(bytes)
        ))
    }

    /// Wrap an existing URL string without checking it.
    pub fn from_string(url: String) -> Self {
        Self(url)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The media type between `data:` and the first `;` or `,`.
    pub fn media_type(&self) -> Option<&str> {
        let rest = self.0.strip_prefix(DATA_URL_SCHEME)?;
        let end = rest.find([';', ','])?;
        Some(&rest[..end])
    }

    /// Decode the payload back into bytes.
    pub fn resolve(&self) -> Result<Vec<u8>> {
        let rest = self
            .0
            .strip_prefix(DATA_URL_SCHEME)
            .ok_or_else(|| CompressionError::InvalidDataUrl("missing data: scheme".to_string()))?;
        let (header, payload) = rest
            .split_once(',')
            .ok_or_else(|| CompressionError::InvalidDataUrl("missing payload".to_string()))?;

        if !header.ends_with(DATA_URL_BASE64_MARKER) {
            return Err(CompressionError::InvalidDataUrl(
                "only base64 payloads are supported".to_string(),
            ));
        }

        STANDARD
            .decode(payload)
            .map_err(|e| CompressionError::InvalidDataUrl(e.to_string()))
    }
}

impl fmt::Display for DataUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
