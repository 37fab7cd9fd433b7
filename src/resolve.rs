//! Input resolution: turn a document reference URI into something a
//! converter can consume.
//!
//! A `file:` URI resolves to a local path (the file is not opened or checked);
//! a `data:` URI resolves to its decoded bytes. Both carry a [`StreamInfo`]
//! guess derived from the URI, overlaid with any caller hints. Remote content
//! is never fetched: `http(s):` and other schemes are rejected, as are
//! `file:` URIs naming a host other than `localhost`.

use crate::config::DecodeConfig;
use crate::decode::{self, DecodedUri};
use crate::error::UriError;
use crate::stream_info::StreamInfo;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// The resolved input — either a local path or inline content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedUri {
    /// A `file:` URI on this machine.
    LocalFile {
        path: PathBuf,
        stream_info: StreamInfo,
    },
    /// A `data:` URI's payload.
    Inline {
        content: Vec<u8>,
        stream_info: StreamInfo,
    },
}

impl ResolvedUri {
    /// Stream-info guess regardless of how the URI was resolved.
    pub fn stream_info(&self) -> &StreamInfo {
        match self {
            ResolvedUri::LocalFile { stream_info, .. } => stream_info,
            ResolvedUri::Inline { stream_info, .. } => stream_info,
        }
    }

    /// The local path, for `file:` URIs.
    pub fn local_path(&self) -> Option<&Path> {
        match self {
            ResolvedUri::LocalFile { path, .. } => Some(path),
            ResolvedUri::Inline { .. } => None,
        }
    }
}

/// Resolve `uri` to a local file or inline content.
///
/// `hints` override the guesses derived from the URI itself.
///
/// # Errors
/// - [`UriError::UnsupportedScheme`] / [`UriError::InvalidScheme`] for
///   anything that is not a `file:` or `data:` URI
/// - [`UriError::RemoteFileUri`] for `file://host/...` with a non-local host
/// - any decoder error
pub fn resolve_uri(
    uri: &str,
    config: &DecodeConfig,
    hints: Option<&StreamInfo>,
) -> Result<ResolvedUri, UriError> {
    let resolved = match decode::decode_uri_with(uri, config)? {
        DecodedUri::File(parsed) => {
            if let Some(host) = parsed
                .network_location
                .as_deref()
                .filter(|h| !h.eq_ignore_ascii_case("localhost"))
            {
                return Err(UriError::RemoteFileUri {
                    host: host.to_string(),
                });
            }
            let guess = StreamInfo::from_file_uri(&parsed);
            info!("Resolved file URI to {}", parsed.path.display());
            ResolvedUri::LocalFile {
                path: parsed.path,
                stream_info: overlay(guess, hints),
            }
        }
        DecodedUri::Data(parsed) => {
            let guess = StreamInfo::from_data_uri(&parsed);
            info!(
                "Resolved data URI: {} bytes ({})",
                parsed.content.len(),
                parsed.mime_type.as_deref().unwrap_or("no mime type")
            );
            ResolvedUri::Inline {
                content: parsed.content,
                stream_info: overlay(guess, hints),
            }
        }
    };

    debug!("Stream info: {:?}", resolved.stream_info());
    Ok(resolved)
}

fn overlay(guess: StreamInfo, hints: Option<&StreamInfo>) -> StreamInfo {
    match hints {
        Some(h) => guess.copy_and_update(h),
        None => guess,
    }
}
