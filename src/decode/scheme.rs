//! Generic URI splitting (RFC 3986 §3): `scheme:[//authority]path[?query][#fragment]`.
//!
//! Splitting is purely syntactic. Nothing is percent-decoded, lowercased, or
//! validated here, so callers see every component exactly as written.

use once_cell::sync::Lazy;
use regex::Regex;

static RE_SCHEME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Za-z][A-Za-z0-9+.\-]*):").unwrap());

/// Borrowed components of a URI string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UriParts<'a> {
    /// Scheme without the trailing `:`; `None` when the input has no scheme.
    pub scheme: Option<&'a str>,
    /// Text after `//` up to the next `/`, `?` or `#`. May be empty (`file:///x`).
    pub authority: Option<&'a str>,
    pub path: &'a str,
    pub query: Option<&'a str>,
    pub fragment: Option<&'a str>,
}

impl UriParts<'_> {
    /// True when the scheme equals `expected`, ignoring ASCII case.
    pub fn has_scheme(&self, expected: &str) -> bool {
        self.scheme.is_some_and(|s| s.eq_ignore_ascii_case(expected))
    }
}

/// Split `uri` into its generic components.
pub fn split(uri: &str) -> UriParts<'_> {
    let (scheme, rest) = match RE_SCHEME.captures(uri) {
        Some(caps) => {
            let name = caps.get(1).map_or("", |m| m.as_str());
            (Some(name), &uri[name.len() + 1..])
        }
        None => (None, uri),
    };

    let (rest, fragment) = match rest.split_once('#') {
        Some((r, f)) => (r, Some(f)),
        None => (rest, None),
    };
    let (rest, query) = match rest.split_once('?') {
        Some((r, q)) => (r, Some(q)),
        None => (rest, None),
    };

    let (authority, path) = match rest.strip_prefix("//") {
        Some(after) => {
            let end = after.find('/').unwrap_or(after.len());
            (Some(&after[..end]), &after[end..])
        }
        None => (None, rest),
    };

    UriParts {
        scheme,
        authority,
        path,
        query,
        fragment,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_full_uri() {
        let p = split("file://server/share/doc.txt?x=1#top");
        assert_eq!(p.scheme, Some("file"));
        assert_eq!(p.authority, Some("server"));
        assert_eq!(p.path, "/share/doc.txt");
        assert_eq!(p.query, Some("x=1"));
        assert_eq!(p.fragment, Some("top"));
    }

    #[test]
    fn empty_authority() {
        let p = split("file:///tmp/a%20b.txt");
        assert_eq!(p.authority, Some(""));
        assert_eq!(p.path, "/tmp/a%20b.txt");
    }

    #[test]
    fn no_authority() {
        let p = split("file:relative/doc.md");
        assert_eq!(p.scheme, Some("file"));
        assert_eq!(p.authority, None);
        assert_eq!(p.path, "relative/doc.md");
    }

    #[test]
    fn authority_without_path() {
        let p = split("file://host");
        assert_eq!(p.authority, Some("host"));
        assert_eq!(p.path, "");
    }

    #[test]
    fn no_scheme() {
        let p = split("/tmp/doc.pdf");
        assert_eq!(p.scheme, None);
        assert_eq!(p.path, "/tmp/doc.pdf");
        // A colon after a non-scheme character is not a scheme separator.
        assert_eq!(split("1abc:def").scheme, None);
    }

    #[test]
    fn scheme_is_case_insensitive() {
        assert!(split("FILE:///x").has_scheme("file"));
        assert!(!split("http://x").has_scheme("file"));
    }
}
