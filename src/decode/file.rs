//! `file:` URI decoding: URI → optional network location + absolute OS path.
//!
//! The path component is percent-decoded, converted to native separators,
//! made absolute against the working directory (or [`DecodeConfig::base_dir`])
//! and collapsed lexically. Symlinks are never resolved and the filesystem is
//! never touched, so decoding a URI for a file that does not exist succeeds.

use crate::config::DecodeConfig;
use crate::decode::scheme;
use crate::error::UriError;
use percent_encoding::percent_decode_str;
use serde::Serialize;
use std::path::{Component, Path, PathBuf};
use tracing::debug;
use url::{Host, Url};

/// A decoded `file:` URI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedFileUri {
    /// Authority of a UNC-style URI (`file://host/path`), verbatim.
    /// `None` for `file:///path` and `file:path`.
    pub network_location: Option<String>,
    /// Absolute, lexically normalised, OS-native path.
    pub path: PathBuf,
}

impl ParsedFileUri {
    /// Re-encode as a `file:` URI. See [`encode_file_uri`].
    pub fn to_uri(&self) -> Result<String, UriError> {
        encode_file_uri(self)
    }
}

/// Decode a `file:` URI, resolving relative paths against the current directory.
///
/// # Errors
/// - [`UriError::InvalidScheme`] when the scheme is not `file`
/// - [`UriError::WorkingDirectory`] when a relative path needs the current
///   directory and it cannot be read
pub fn decode_file_uri(uri: &str) -> Result<ParsedFileUri, UriError> {
    decode_file_uri_with(uri, &DecodeConfig::default())
}

/// Decode a `file:` URI with an explicit configuration.
pub fn decode_file_uri_with(uri: &str, config: &DecodeConfig) -> Result<ParsedFileUri, UriError> {
    let parts = scheme::split(uri);
    if !parts.has_scheme("file") {
        return Err(UriError::InvalidScheme {
            uri: uri.to_string(),
        });
    }

    let network_location = parts
        .authority
        .filter(|a| !a.is_empty())
        .map(str::to_string);

    let native = native_path(parts.path);
    let path = absolutize(&native, config.base_dir.as_deref())?;

    debug!(
        "Decoded file URI → {} (host: {:?})",
        path.display(),
        network_location
    );

    Ok(ParsedFileUri {
        network_location,
        path,
    })
}

/// Encode an absolute path (and optional host) back into a `file:` URI.
///
/// Bytes that are not path-safe (space, `%`, `#`, `?`, non-ASCII, …) are
/// percent-escaped, so [`decode_file_uri`] of the result yields `parsed` again.
/// The host is written verbatim (case and `:port` kept), after checking that
/// it parses as a URI host.
///
/// # Errors
/// [`UriError::NotEncodable`] when the path is relative or the host is not a
/// valid URI host.
pub fn encode_file_uri(parsed: &ParsedFileUri) -> Result<String, UriError> {
    let not_encodable = |reason: String| UriError::NotEncodable {
        path: parsed.path.display().to_string(),
        reason,
    };

    let url = Url::from_file_path(&parsed.path)
        .map_err(|()| not_encodable("path is not absolute".into()))?;

    match parsed.network_location {
        None => Ok(url.into()),
        Some(ref authority) => {
            check_authority(authority).map_err(not_encodable)?;
            Ok(format!("file://{authority}{}", url.path()))
        }
    }
}

/// Accept `host` or `host:port` where `host` is a registered name, an IPv4
/// address or a bracketed IPv6 address.
fn check_authority(authority: &str) -> Result<(), String> {
    let host = match authority.rsplit_once(':') {
        Some((host, port)) if !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit()) => {
            port.parse::<u16>()
                .map_err(|_| format!("port out of range in '{authority}'"))?;
            host
        }
        _ => authority,
    };
    if host.is_empty() {
        return Err("empty host".into());
    }
    Host::parse(host)
        .map(|_| ())
        .map_err(|e| format!("invalid host '{authority}': {e}"))
}

// ── URI path → native path ───────────────────────────────────────────────

#[cfg(unix)]
fn native_path(url_path: &str) -> PathBuf {
    use std::ffi::OsString;
    use std::os::unix::ffi::OsStringExt;

    // Raw bytes: a non-UTF-8 file name survives the round trip.
    let bytes: Vec<u8> = percent_decode_str(url_path).collect();
    PathBuf::from(OsString::from_vec(bytes))
}

#[cfg(windows)]
fn native_path(url_path: &str) -> PathBuf {
    PathBuf::from(windows_path_from_url_path(url_path))
}

#[cfg(not(any(unix, windows)))]
fn native_path(url_path: &str) -> PathBuf {
    PathBuf::from(percent_decode_str(url_path).decode_utf8_lossy().into_owned())
}

/// Convert a URI path to Windows syntax: `/C:/dir/a%20b` → `C:\dir\a b`.
///
/// `|` is accepted in place of the drive colon, and a `////host/share` path
/// becomes the UNC path `\\host\share`.
#[cfg_attr(not(windows), allow(dead_code))]
fn windows_path_from_url_path(url_path: &str) -> String {
    let decoded = percent_decode_str(url_path).decode_utf8_lossy();
    let mut rest: &str = &decoded;

    if let Some(stripped) = rest.strip_prefix('/').filter(|r| has_drive_letter(r)) {
        rest = stripped;
    } else if rest.starts_with("////") {
        rest = &rest[2..];
    }

    let mut out = String::with_capacity(rest.len() + 1);
    if has_drive_letter(rest) {
        out.push(rest.as_bytes()[0].to_ascii_uppercase() as char);
        out.push(':');
        out.push_str(&rest[2..]);
        if out.len() == 2 {
            out.push('/');
        }
    } else {
        out.push_str(rest);
    }
    out.replace('/', "\\")
}

fn has_drive_letter(s: &str) -> bool {
    let b = s.as_bytes();
    b.len() >= 2
        && b[0].is_ascii_alphabetic()
        && matches!(b[1], b':' | b'|')
        && (b.len() == 2 || b[2] == b'/')
}

// ── Absolutisation ───────────────────────────────────────────────────────

fn absolutize(path: &Path, base_dir: Option<&Path>) -> Result<PathBuf, UriError> {
    if path.is_absolute() {
        return Ok(normalize_lexically(path));
    }
    let base = match base_dir {
        Some(dir) => dir.to_path_buf(),
        None => std::env::current_dir().map_err(|source| UriError::WorkingDirectory { source })?,
    };
    Ok(normalize_lexically(&base.join(path)))
}

/// Collapse `.` and `..` without consulting the filesystem.
/// `..` at the root stays at the root.
fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => out.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                if matches!(out.components().next_back(), Some(Component::Normal(_))) {
                    out.pop();
                } else if !out.has_root() {
                    out.push("..");
                }
            }
            Component::Normal(name) => out.push(name),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_other_schemes() {
        for uri in ["http://example.com/a", "data:,x", "/tmp/a", ""] {
            let err = decode_file_uri(uri).unwrap_err();
            assert!(matches!(err, UriError::InvalidScheme { .. }), "{uri}: {err:?}");
        }
    }

    #[test]
    fn uppercase_scheme_accepted() {
        assert!(decode_file_uri("FILE:///tmp/x").is_ok());
    }

    #[test]
    fn windows_drive_path() {
        assert_eq!(windows_path_from_url_path("/C:/dir/a%20b.txt"), r"C:\dir\a b.txt");
        assert_eq!(windows_path_from_url_path("/c|/dir"), r"C:\dir");
        assert_eq!(windows_path_from_url_path("/C:"), r"C:\");
    }

    #[test]
    fn windows_plain_and_unc_paths() {
        assert_eq!(windows_path_from_url_path("/share/doc.txt"), r"\share\doc.txt");
        assert_eq!(windows_path_from_url_path("////host/share/x"), r"\\host\share\x");
    }

    #[test]
    fn drive_letter_detection() {
        assert!(has_drive_letter("C:/x"));
        assert!(has_drive_letter("d|"));
        assert!(!has_drive_letter("CC:/x"));
        assert!(!has_drive_letter("C:x"));
    }

    #[cfg(unix)]
    mod unix {
        use super::*;

        #[test]
        fn normalizes_dot_segments() {
            assert_eq!(
                normalize_lexically(Path::new("/a/./b/../c")),
                PathBuf::from("/a/c")
            );
            assert_eq!(normalize_lexically(Path::new("/../../x")), PathBuf::from("/x"));
            assert_eq!(normalize_lexically(Path::new("/a/b/")), PathBuf::from("/a/b"));
        }

        #[test]
        fn relative_path_uses_base_dir() {
            let config = DecodeConfig::builder()
                .base_dir("/srv/docs")
                .build()
                .unwrap();
            let parsed = decode_file_uri_with("file:notes/../readme.md", &config).unwrap();
            assert_eq!(parsed.path, PathBuf::from("/srv/docs/readme.md"));
            assert_eq!(parsed.network_location, None);
        }

        #[test]
        fn empty_path_is_base_dir() {
            let config = DecodeConfig::builder().base_dir("/srv").build().unwrap();
            let parsed = decode_file_uri_with("file://host", &config).unwrap();
            assert_eq!(parsed.path, PathBuf::from("/srv"));
            assert_eq!(parsed.network_location.as_deref(), Some("host"));
        }

        #[test]
        fn double_leading_slash_folds_to_root() {
            let parsed = decode_file_uri("file:////share/doc.txt").unwrap();
            assert_eq!(parsed.network_location, None);
            assert_eq!(parsed.path, PathBuf::from("/share/doc.txt"));
        }

        #[test]
        fn non_utf8_bytes_preserved() {
            use std::os::unix::ffi::OsStrExt;
            let parsed = decode_file_uri("file:///tmp/%FF.bin").unwrap();
            assert_eq!(parsed.path.as_os_str().as_bytes(), b"/tmp/\xFF.bin");
        }

        #[test]
        fn encode_escapes_unsafe_bytes() {
            let parsed = ParsedFileUri {
                network_location: None,
                path: PathBuf::from("/tmp/a b#1?.txt"),
            };
            let uri = parsed.to_uri().unwrap();
            assert_eq!(uri, "file:///tmp/a%20b%231%3F.txt");
            assert_eq!(decode_file_uri(&uri).unwrap(), parsed);
        }

        #[test]
        fn encode_with_host() {
            let parsed = ParsedFileUri {
                network_location: Some("server".into()),
                path: PathBuf::from("/share/doc.txt"),
            };
            assert_eq!(parsed.to_uri().unwrap(), "file://server/share/doc.txt");
        }

        #[test]
        fn encode_keeps_host_verbatim() {
            for host in ["SERVER", "server:8080", "localhost", "[::1]:445", "10.0.0.7"] {
                let parsed = ParsedFileUri {
                    network_location: Some(host.into()),
                    path: PathBuf::from("/share/doc.txt"),
                };
                let uri = parsed.to_uri().unwrap();
                assert_eq!(uri, format!("file://{host}/share/doc.txt"));
                assert_eq!(decode_file_uri(&uri).unwrap(), parsed);
            }
        }

        #[test]
        fn encode_rejects_bad_host() {
            for host in ["", "server:99999", "bad host", "a/b", "x#y", "fe80::1"] {
                let parsed = ParsedFileUri {
                    network_location: Some(host.into()),
                    path: PathBuf::from("/share/doc.txt"),
                };
                let err = encode_file_uri(&parsed).unwrap_err();
                assert!(matches!(err, UriError::NotEncodable { .. }), "{host}: {err:?}");
            }
        }

        #[test]
        fn encode_rejects_relative_path() {
            let parsed = ParsedFileUri {
                network_location: None,
                path: PathBuf::from("relative.txt"),
            };
            let err = encode_file_uri(&parsed).unwrap_err();
            assert!(matches!(err, UriError::NotEncodable { .. }));
        }
    }
}
