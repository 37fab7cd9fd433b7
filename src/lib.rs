//! # edgequake-uri
//!
//! Decode `file:` and `data:` URIs into locally usable values.
//!
//! Documents reference content in two self-contained ways: a `file:` URI
//! pointing at something on disk, or a `data:` URI carrying the bytes inline.
//! This crate turns both into plain Rust values: an absolute OS path (plus the
//! network location of UNC-style URIs), or a decoded payload with its declared
//! MIME type and attributes. Nothing is fetched, opened, or validated on disk.
//!
//! ## Pipeline Overview
//!
//! ```text
//! URI string
//!  │
//!  ├─ 1. Split    scheme / authority / path (RFC 3986, no decoding)
//!  ├─ 2. Decode   file: → ParsedFileUri   data: → ParsedDataUri
//!  ├─ 3. Guess    StreamInfo (mimetype, extension, charset, filename)
//!  └─ 4. Resolve  LocalFile { path } | Inline { content } + caller hints
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use edgequake_uri::{decode_data_uri, decode_file_uri};
//!
//! let data = decode_data_uri("data:text/plain;base64,SGVsbG8=").unwrap();
//! assert_eq!(data.mime_type.as_deref(), Some("text/plain"));
//! assert_eq!(data.content, b"Hello");
//!
//! let file = decode_file_uri("file:///tmp/a%20b.txt").unwrap();
//! assert!(file.path.ends_with("a b.txt"));
//! assert_eq!(file.network_location, None);
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `uri-decode` binary (clap + anyhow + tracing-subscriber) |
//!
//! Disable `cli` when using only the library to avoid pulling in CLI-only deps:
//! ```toml
//! edgequake-uri = { version = "0.1", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod decode;
pub mod error;
pub mod markdown;
pub mod resolve;
pub mod stream_info;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{Base64Mode, DecodeConfig, DecodeConfigBuilder};
pub use decode::data::{decode_data_uri, decode_data_uri_with, truncate_data_uri};
pub use decode::file::{decode_file_uri, decode_file_uri_with, encode_file_uri};
pub use decode::{decode_uri, decode_uri_with, DataUriAttributes, DecodedUri, ParsedDataUri, ParsedFileUri};
pub use error::{UriError, UriErrorKind};
pub use markdown::truncate_data_uris;
pub use resolve::{resolve_uri, ResolvedUri};
pub use stream_info::StreamInfo;
