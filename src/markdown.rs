//! Markdown post-processing for inline `data:` URIs.
//!
//! Converters that inline embedded images produce link targets such as
//! `![chart](data:image/png;base64,iVBORw0KGgo…)` that can run to megabytes.
//! Unless the caller asks to keep them, every such target is cut down to its
//! header: `![chart](data:image/png;base64...)`. The alt text and any link
//! title are left alone; non-`data:` targets are never touched.

use crate::decode::data::truncate_data_uri;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

// `](` then a data URI up to the closing paren or the whitespace before a title.
static RE_DATA_TARGET: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\]\((data:[^)\s]*)").unwrap());

/// Replace every `data:` link or image target with its truncated form.
pub fn truncate_data_uris(markdown: &str) -> String {
    RE_DATA_TARGET
        .replace_all(markdown, |caps: &Captures| {
            format!("]({}", truncate_data_uri(&caps[1]))
        })
        .into_owned()
}
