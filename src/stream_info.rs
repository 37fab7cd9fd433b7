//! Stream-info hints: what a downstream converter should assume about bytes.
//!
//! A decoded URI says where content lives (a local path) or what it is
//! (inline bytes). Converters additionally want a guess at its MIME type,
//! file extension, and charset. [`StreamInfo`] carries those guesses; it is
//! built from a decoded URI and then overlaid with caller-supplied hints,
//! which always win.
//!
//! Hints arrive as free text (CLI flags, config files) and are normalised
//! here: extensions get a leading dot, MIME types must look like
//! `type/subtype`, and charsets resolve to a canonical codec name.

use crate::decode::{ParsedDataUri, ParsedFileUri};
use crate::error::UriError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Known facts and guesses about a content stream. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mimetype: Option<String>,
    /// Extension including the leading dot, e.g. `.pdf`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub charset: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub local_path: Option<PathBuf>,
}

impl StreamInfo {
    /// True when no field is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// A copy of `self` with every field that is set in `overlay` replaced.
    pub fn copy_and_update(&self, overlay: &StreamInfo) -> StreamInfo {
        StreamInfo {
            mimetype: overlay.mimetype.clone().or_else(|| self.mimetype.clone()),
            extension: overlay.extension.clone().or_else(|| self.extension.clone()),
            charset: overlay.charset.clone().or_else(|| self.charset.clone()),
            filename: overlay.filename.clone().or_else(|| self.filename.clone()),
            local_path: overlay.local_path.clone().or_else(|| self.local_path.clone()),
        }
    }

    /// Build a hint set from raw user input.
    ///
    /// Returns `Ok(None)` when every hint is absent or blank.
    pub fn from_hints(
        extension: Option<&str>,
        mimetype: Option<&str>,
        charset: Option<&str>,
    ) -> Result<Option<StreamInfo>, UriError> {
        let info = StreamInfo {
            extension: extension.and_then(normalize_extension_hint),
            mimetype: mimetype.map(normalize_mime_type_hint).transpose()?.flatten(),
            charset: charset.map(normalize_charset_hint).transpose()?.flatten(),
            ..Default::default()
        };
        Ok((!info.is_empty()).then_some(info))
    }

    /// Guess from a local file: path, file name, and extension.
    pub fn from_file_uri(parsed: &ParsedFileUri) -> StreamInfo {
        StreamInfo {
            extension: parsed
                .path
                .extension()
                .map(|e| format!(".{}", e.to_string_lossy())),
            filename: parsed
                .path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned()),
            local_path: Some(parsed.path.clone()),
            ..Default::default()
        }
    }

    /// Guess from inline content: declared MIME type and `charset` attribute.
    pub fn from_data_uri(parsed: &ParsedDataUri) -> StreamInfo {
        StreamInfo {
            mimetype: parsed.mime_type.clone(),
            charset: parsed.charset().map(str::to_string),
            ..Default::default()
        }
    }
}

// ── Hint normalisation ───────────────────────────────────────────────────

/// `"PDF"` → `".pdf"`, `" .Md "` → `".md"`, blank → `None`.
pub fn normalize_extension_hint(hint: &str) -> Option<String> {
    let ext = hint.trim().to_lowercase();
    if ext.is_empty() {
        None
    } else if ext.starts_with('.') {
        Some(ext)
    } else {
        Some(format!(".{ext}"))
    }
}

/// Trim a MIME-type hint and require exactly one `/`. Blank → `None`.
pub fn normalize_mime_type_hint(hint: &str) -> Result<Option<String>, UriError> {
    let mime = hint.trim();
    if mime.is_empty() {
        return Ok(None);
    }
    if mime.matches('/').count() != 1 {
        return Err(UriError::InvalidMimeType(mime.to_string()));
    }
    Ok(Some(mime.to_string()))
}

/// Resolve a charset hint to its canonical codec name. Blank → `None`.
///
/// Lookup ignores case and punctuation, so `UTF8`, `utf_8` and `Utf-8` all
/// resolve to `utf-8`.
pub fn normalize_charset_hint(hint: &str) -> Result<Option<String>, UriError> {
    let charset = hint.trim();
    if charset.is_empty() {
        return Ok(None);
    }
    let key = charset_lookup_key(charset);
    CHARSETS
        .iter()
        .find(|(_, aliases)| aliases.contains(&key.as_str()))
        .map(|(canonical, _)| Some((*canonical).to_string()))
        .ok_or_else(|| UriError::InvalidCharset(charset.to_string()))
}

/// Lowercase, with every run of non-alphanumeric characters collapsed to `_`.
fn charset_lookup_key(name: &str) -> String {
    let mut key = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_ascii_alphanumeric() || c == '.' {
            key.push(c.to_ascii_lowercase());
        } else if !key.is_empty() && !key.ends_with('_') {
            key.push('_');
        }
    }
    key.trim_end_matches('_').to_string()
}

/// Canonical codec name → lookup keys that resolve to it.
const CHARSETS: &[(&str, &[&str])] = &[
    ("utf-8", &["utf_8", "utf8", "u8", "utf", "cp65001"]),
    ("utf-8-sig", &["utf_8_sig"]),
    ("utf-16", &["utf_16", "utf16", "u16"]),
    ("utf-16-le", &["utf_16_le", "utf_16le"]),
    ("utf-16-be", &["utf_16_be", "utf_16be"]),
    ("utf-32", &["utf_32", "utf32", "u32"]),
    ("ascii", &["ascii", "us_ascii", "646", "ansi_x3.4_1968", "us"]),
    (
        "iso8859-1",
        &["latin_1", "latin1", "latin", "l1", "iso8859_1", "iso_8859_1", "8859", "cp819"],
    ),
    ("iso8859-2", &["iso8859_2", "iso_8859_2", "latin2", "l2"]),
    ("iso8859-15", &["iso8859_15", "iso_8859_15", "latin9", "l9"]),
    ("cp1251", &["cp1251", "windows_1251"]),
    ("cp1252", &["cp1252", "windows_1252"]),
    ("cp437", &["cp437", "ibm437", "437"]),
    ("koi8-r", &["koi8_r"]),
    ("mac-roman", &["mac_roman", "macroman", "macintosh"]),
    ("shift_jis", &["shift_jis", "shiftjis", "sjis", "s_jis"]),
    ("euc_jp", &["euc_jp", "eucjp", "ujis", "u_jis"]),
    ("euc_kr", &["euc_kr", "euckr", "korean", "ksc5601"]),
    ("iso2022_jp", &["iso2022_jp", "iso_2022_jp", "csiso2022jp"]),
    ("gb2312", &["gb2312", "euc_cn", "euccn", "chinese"]),
    ("gbk", &["gbk", "cp936", "ms936", "936"]),
    ("gb18030", &["gb18030", "gb18030_2000"]),
    ("big5", &["big5", "big5_tw", "csbig5"]),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::data::decode_data_uri;
    use std::path::Path;

    #[test]
    fn extension_hints() {
        assert_eq!(normalize_extension_hint("PDF").as_deref(), Some(".pdf"));
        assert_eq!(normalize_extension_hint(" .Md ").as_deref(), Some(".md"));
        assert_eq!(normalize_extension_hint("   "), None);
    }

    #[test]
    fn mime_type_hints() {
        assert_eq!(
            normalize_mime_type_hint(" text/html ").unwrap().as_deref(),
            Some("text/html")
        );
        assert_eq!(normalize_mime_type_hint("").unwrap(), None);
        assert!(matches!(
            normalize_mime_type_hint("texthtml"),
            Err(UriError::InvalidMimeType(_))
        ));
        assert!(matches!(
            normalize_mime_type_hint("a/b/c"),
            Err(UriError::InvalidMimeType(_))
        ));
    }

    #[test]
    fn charset_hints() {
        for alias in ["UTF-8", "utf8", "Utf_8"] {
            assert_eq!(
                normalize_charset_hint(alias).unwrap().as_deref(),
                Some("utf-8"),
                "{alias}"
            );
        }
        assert_eq!(
            normalize_charset_hint("latin-1").unwrap().as_deref(),
            Some("iso8859-1")
        );
        assert_eq!(
            normalize_charset_hint("Windows-1252").unwrap().as_deref(),
            Some("cp1252")
        );
        assert_eq!(normalize_charset_hint(" ").unwrap(), None);
        assert!(matches!(
            normalize_charset_hint("klingon"),
            Err(UriError::InvalidCharset(_))
        ));
    }

    #[test]
    fn from_hints_all_blank_is_none() {
        assert_eq!(StreamInfo::from_hints(None, Some(" "), Some("")).unwrap(), None);
        let info = StreamInfo::from_hints(Some("html"), None, Some("utf8"))
            .unwrap()
            .unwrap();
        assert_eq!(info.extension.as_deref(), Some(".html"));
        assert_eq!(info.charset.as_deref(), Some("utf-8"));
        assert_eq!(info.mimetype, None);
    }

    #[test]
    fn overlay_wins() {
        let base = StreamInfo {
            mimetype: Some("text/plain".into()),
            charset: Some("ascii".into()),
            ..Default::default()
        };
        let overlay = StreamInfo {
            charset: Some("utf-8".into()),
            ..Default::default()
        };
        let merged = base.copy_and_update(&overlay);
        assert_eq!(merged.mimetype.as_deref(), Some("text/plain"));
        assert_eq!(merged.charset.as_deref(), Some("utf-8"));
    }

    #[test]
    fn guess_from_file_uri() {
        let parsed = ParsedFileUri {
            network_location: None,
            path: PathBuf::from("/docs/Report.PDF"),
        };
        let info = StreamInfo::from_file_uri(&parsed);
        assert_eq!(info.extension.as_deref(), Some(".PDF"));
        assert_eq!(info.filename.as_deref(), Some("Report.PDF"));
        assert_eq!(info.local_path.as_deref(), Some(Path::new("/docs/Report.PDF")));
    }

    #[test]
    fn guess_from_data_uri() {
        let parsed = decode_data_uri("data:text/html;charset=utf-8,<p>").unwrap();
        let info = StreamInfo::from_data_uri(&parsed);
        assert_eq!(info.mimetype.as_deref(), Some("text/html"));
        assert_eq!(info.charset.as_deref(), Some("utf-8"));
        assert_eq!(info.local_path, None);
    }
}
