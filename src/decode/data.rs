//! `data:` URI decoding (RFC 2397 shape, permissive header handling).
//!
//! ```text
//! data:[<mediatype>][;<key>=<value>...][;base64],<data>
//! ```
//!
//! The header ends at the *first* comma; later commas are payload. Header
//! segments are consumed in one forward pass: a trailing `base64` flag, then a
//! leading bare segment as the MIME type, then everything else as attributes.

use crate::config::{Base64Mode, DecodeConfig};
use crate::error::UriError;
use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig, STANDARD};
use base64::Engine as _;
use percent_encoding::percent_decode_str;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use tracing::{debug, warn};

/// Literal prefix every data URI starts with (case-sensitive).
pub const DATA_PREFIX: &str = "data:";

const BASE64_FLAG: &str = "base64";

/// Standard alphabet, padding required. Unused low bits of the final symbol
/// are ignored (`SGl=` decodes like `SGk=`).
const PAYLOAD_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_allow_trailing_bits(true),
);

/// A decoded `data:` URI.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedDataUri {
    /// First header segment when it is non-empty and has no `=`. Not validated.
    pub mime_type: Option<String>,
    /// `key=value` header parameters in declaration order.
    pub attributes: DataUriAttributes,
    /// Decoded payload.
    #[serde(serialize_with = "serialize_base64")]
    pub content: Vec<u8>,
}

impl ParsedDataUri {
    /// The `charset` attribute, if declared.
    pub fn charset(&self) -> Option<&str> {
        self.attributes.get("charset")
    }
}

fn serialize_base64<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&STANDARD.encode(bytes))
}

// ── Attributes ───────────────────────────────────────────────────────────

/// Ordered string → string mapping of data URI header parameters.
///
/// Re-inserting an existing key replaces its value but keeps the position of
/// its first declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataUriAttributes {
    entries: Vec<(String, String)>,
}

impl DataUriAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite `key`, returning the previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => Some(std::mem::replace(existing, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for DataUriAttributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attrs = Self::new();
        for (k, v) in iter {
            attrs.insert(k, v);
        }
        attrs
    }
}

impl Serialize for DataUriAttributes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

// ── Decoding ─────────────────────────────────────────────────────────────

/// Decode a `data:` URI with strict base64 handling.
///
/// # Errors
/// - [`UriError::NotADataUri`] — input does not start with `data:`
/// - [`UriError::MalformedDataUri`] — no `,` after the prefix
/// - [`UriError::InvalidBase64`] — `;base64` payload is not valid base64
pub fn decode_data_uri(uri: &str) -> Result<ParsedDataUri, UriError> {
    decode_data_uri_with(uri, &DecodeConfig::default())
}

/// Decode a `data:` URI with an explicit configuration.
pub fn decode_data_uri_with(uri: &str, config: &DecodeConfig) -> Result<ParsedDataUri, UriError> {
    let rest = uri.strip_prefix(DATA_PREFIX).ok_or(UriError::NotADataUri)?;
    let (header, payload) = rest.split_once(',').ok_or(UriError::MalformedDataUri)?;

    let mut segments: Vec<&str> = header.split(';').collect();
    let is_base64 = segments.last() == Some(&BASE64_FLAG);
    if is_base64 {
        segments.pop();
    }

    let mut segments = segments.into_iter().peekable();
    let mime_type = segments
        .next_if(|s| !s.is_empty() && !s.contains('='))
        .map(str::to_string);

    let mut attributes = DataUriAttributes::new();
    for segment in segments {
        match segment.split_once('=') {
            Some((key, value)) => {
                attributes.insert(key, value);
            }
            None if !segment.is_empty() => {
                attributes.insert(segment, "");
            }
            None => {}
        }
    }

    let content = if is_base64 {
        decode_base64(payload, config.base64_mode)?
    } else {
        percent_decode_str(payload).collect()
    };

    debug!(
        "Decoded data URI: mime={:?}, {} attributes, base64={}, {} bytes",
        mime_type,
        attributes.len(),
        is_base64,
        content.len()
    );

    Ok(ParsedDataUri {
        mime_type,
        attributes,
        content,
    })
}

fn decode_base64(payload: &str, mode: Base64Mode) -> Result<Vec<u8>, UriError> {
    let decoded = match mode {
        Base64Mode::Strict => PAYLOAD_ENGINE.decode(payload),
        Base64Mode::Lenient => {
            let filtered: Vec<u8> = payload
                .bytes()
                .filter(|b| b.is_ascii_alphanumeric() || matches!(b, b'+' | b'/' | b'='))
                .collect();
            if filtered.len() != payload.len() {
                warn!(
                    "Discarded {} non-base64 bytes from data URI payload",
                    payload.len() - filtered.len()
                );
            }
            PAYLOAD_ENGINE.decode(filtered)
        }
    };
    decoded.map_err(|source| UriError::InvalidBase64 { source })
}

/// Shorten a data URI to its header followed by `...`.
///
/// `data:image/png;base64,iVBOR…` → `data:image/png;base64...`. Anything that
/// is not a data URI with a payload separator is returned unchanged.
pub fn truncate_data_uri(uri: &str) -> String {
    if !uri.starts_with(DATA_PREFIX) {
        return uri.to_string();
    }
    match uri.split_once(',') {
        Some((header, _)) => format!("{header}..."),
        None => uri.to_string(),
    }
}
