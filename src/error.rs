//! Error types for the edgequake-uri library.
//!
//! Every decoder failure is terminal: the decoders never return a partially
//! populated value and never substitute defaults for malformed input. The
//! caller (CLI or conversion pipeline) decides how to present the failure.
//!
//! [`UriError`] carries enough context for a readable message;
//! [`UriErrorKind`] is the fieldless classification for callers that only
//! branch on *what* went wrong.

use thiserror::Error;

/// All errors returned by the edgequake-uri library.
#[derive(Debug, Error)]
pub enum UriError {
    // ── Decoder errors ────────────────────────────────────────────────────
    /// A `file:` decode was asked to handle a URI with another (or no) scheme.
    #[error("Not a file URI: '{uri}'")]
    InvalidScheme { uri: String },

    /// Input does not begin with the literal `data:`.
    #[error("Not a data URI")]
    NotADataUri,

    /// No `,` separates the data URI header from its payload.
    #[error("Malformed data URI, missing ',' separator")]
    MalformedDataUri,

    /// The `;base64` flag was set but the payload is not valid base64.
    #[error("Invalid base64 payload in data URI: {source}")]
    InvalidBase64 {
        #[source]
        source: base64::DecodeError,
    },

    // ── Dispatch errors ───────────────────────────────────────────────────
    /// Scheme dispatch found a scheme this crate does not decode.
    #[error("Unsupported URI scheme '{scheme}': only file: and data: URIs can be decoded locally")]
    UnsupportedScheme { scheme: String },

    /// A `file:` URI names a host other than `localhost`; it cannot be opened locally.
    #[error("Cannot open file URI on remote host '{host}': network location must be empty or localhost")]
    RemoteFileUri { host: String },

    // ── Path errors ───────────────────────────────────────────────────────
    /// The current directory was needed to absolutise a relative path.
    #[error("Cannot read the current working directory: {source}")]
    WorkingDirectory {
        #[source]
        source: std::io::Error,
    },

    /// Only absolute paths can be turned back into a `file:` URI.
    #[error("Cannot encode '{path}' as a file URI: {reason}")]
    NotEncodable { path: String, reason: String },

    // ── Hint errors ───────────────────────────────────────────────────────
    /// A MIME-type hint does not have the `type/subtype` shape.
    #[error("Invalid MIME type: {0}")]
    InvalidMimeType(String),

    /// A charset hint names no known encoding.
    #[error("Invalid charset: {0}")]
    InvalidCharset(String),

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Fieldless classification of a [`UriError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UriErrorKind {
    InvalidScheme,
    NotADataUri,
    MalformedDataUri,
    InvalidBase64,
    UnsupportedScheme,
    RemoteFileUri,
    WorkingDirectory,
    NotEncodable,
    InvalidMimeType,
    InvalidCharset,
    InvalidConfig,
}

impl UriError {
    /// The kind of this error, without its payload.
    pub fn kind(&self) -> UriErrorKind {
        match self {
            UriError::InvalidScheme { .. } => UriErrorKind::InvalidScheme,
            UriError::NotADataUri => UriErrorKind::NotADataUri,
            UriError::MalformedDataUri => UriErrorKind::MalformedDataUri,
            UriError::InvalidBase64 { .. } => UriErrorKind::InvalidBase64,
            UriError::UnsupportedScheme { .. } => UriErrorKind::UnsupportedScheme,
            UriError::RemoteFileUri { .. } => UriErrorKind::RemoteFileUri,
            UriError::WorkingDirectory { .. } => UriErrorKind::WorkingDirectory,
            UriError::NotEncodable { .. } => UriErrorKind::NotEncodable,
            UriError::InvalidMimeType(_) => UriErrorKind::InvalidMimeType,
            UriError::InvalidCharset(_) => UriErrorKind::InvalidCharset,
            UriError::InvalidConfig(_) => UriErrorKind::InvalidConfig,
        }
    }
}
