//! URI decoders: `file:` and `data:` URIs into locally usable values.
//!
//! Each submodule is a pure, synchronous decoder: a string goes in, a fresh
//! immutable value or a [`UriError`] comes out. Nothing is cached or shared,
//! so every function here may be called from any number of threads at once.
//!
//! ```text
//! uri ──▶ scheme::split ──┬─▶ file  ──▶ ParsedFileUri  (host?, absolute path)
//!                         └─▶ data  ──▶ ParsedDataUri  (mime?, attributes, bytes)
//! ```
//!
//! 1. [`scheme`] — generic RFC 3986 component split, no decoding
//! 2. [`file`]   — percent-decode, native separators, absolutise, collapse dots
//! 3. [`data`]   — header segments, base64 or percent payload

pub mod data;
pub mod file;
pub mod scheme;

use crate::config::DecodeConfig;
use crate::error::UriError;
use serde::Serialize;

pub use data::{DataUriAttributes, ParsedDataUri};
pub use file::ParsedFileUri;

/// The result of decoding a URI whose scheme was not known in advance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "scheme", rename_all = "lowercase")]
pub enum DecodedUri {
    File(ParsedFileUri),
    Data(ParsedDataUri),
}

/// Decode a `file:` or `data:` URI, dispatching on its scheme.
pub fn decode_uri(uri: &str) -> Result<DecodedUri, UriError> {
    decode_uri_with(uri, &DecodeConfig::default())
}

/// Decode a `file:` or `data:` URI with an explicit configuration.
///
/// # Errors
/// - [`UriError::InvalidScheme`] — the input has no scheme at all
/// - [`UriError::UnsupportedScheme`] — a scheme other than `file`/`data`
/// - any error of the selected decoder
pub fn decode_uri_with(uri: &str, config: &DecodeConfig) -> Result<DecodedUri, UriError> {
    let parts = scheme::split(uri);
    match parts.scheme {
        Some(s) if s.eq_ignore_ascii_case("data") => {
            data::decode_data_uri_with(uri, config).map(DecodedUri::Data)
        }
        Some(s) if s.eq_ignore_ascii_case("file") => {
            file::decode_file_uri_with(uri, config).map(DecodedUri::File)
        }
        Some(s) => Err(UriError::UnsupportedScheme {
            scheme: s.to_ascii_lowercase(),
        }),
        None => Err(UriError::InvalidScheme {
            uri: uri.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatches_data() {
        let d = decode_uri("data:,abc").unwrap();
        assert!(matches!(d, DecodedUri::Data(ref p) if p.content == b"abc"));
    }

    #[test]
    fn dispatches_file() {
        let d = decode_uri("file:///tmp/x.txt").unwrap();
        assert!(matches!(d, DecodedUri::File(_)));
    }

    #[test]
    fn unsupported_and_missing_schemes() {
        assert!(matches!(
            decode_uri("HTTPS://example.com/a.pdf"),
            Err(UriError::UnsupportedScheme { ref scheme }) if scheme == "https"
        ));
        assert!(matches!(
            decode_uri("doc.pdf"),
            Err(UriError::InvalidScheme { .. })
        ));
    }

    #[test]
    fn uppercase_data_scheme_is_not_a_data_uri() {
        assert!(matches!(decode_uri("DATA:,x"), Err(UriError::NotADataUri)));
    }

    #[test]
    fn serializes_with_scheme_tag() {
        let json = serde_json::to_value(decode_uri("data:text/plain,hi").unwrap()).unwrap();
        assert_eq!(json["scheme"], "data");
        assert_eq!(json["content"], "aGk=");
    }
}
