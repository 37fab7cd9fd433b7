//! Configuration types for URI decoding.
//!
//! The decoders themselves are pure functions; [`DecodeConfig`] only carries
//! the two knobs that change their output: the directory relative paths are
//! resolved against, and how forgiving base64 payload decoding is. Build it
//! with [`DecodeConfig::builder()`] or take [`DecodeConfig::default()`].

use crate::error::UriError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for `file:` and `data:` URI decoding.
///
/// # Example
/// ```rust
/// use edgequake_uri::{Base64Mode, DecodeConfig};
///
/// let config = DecodeConfig::builder()
///     .base_dir(std::env::temp_dir())
///     .base64_mode(Base64Mode::Lenient)
///     .build()
///     .unwrap();
/// assert_eq!(config.base64_mode, Base64Mode::Lenient);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodeConfig {
    /// Directory that relative `file:` paths are resolved against.
    /// Default: `None` (the process working directory, read at decode time).
    ///
    /// Must be absolute when set.
    pub base_dir: Option<PathBuf>,

    /// How `;base64` payloads are decoded. Default: [`Base64Mode::Strict`].
    pub base64_mode: Base64Mode,
}

impl DecodeConfig {
    /// Create a new builder for `DecodeConfig`.
    pub fn builder() -> DecodeConfigBuilder {
        DecodeConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`DecodeConfig`].
#[derive(Debug)]
pub struct DecodeConfigBuilder {
    config: DecodeConfig,
}

impl DecodeConfigBuilder {
    pub fn base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.base_dir = Some(dir.into());
        self
    }

    pub fn base64_mode(mut self, mode: Base64Mode) -> Self {
        self.config.base64_mode = mode;
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<DecodeConfig, UriError> {
        if let Some(ref dir) = self.config.base_dir {
            if !dir.is_absolute() {
                return Err(UriError::InvalidConfig(format!(
                    "base_dir must be an absolute path, got {}",
                    dir.display()
                )));
            }
        }
        Ok(self.config)
    }
}

// ── Enums ────────────────────────────────────────────────────────────────

/// How the payload of a `;base64` data URI is decoded.
///
/// | Mode | Accepts |
/// |------|---------|
/// | `Strict` | standard alphabet, `=` padding required, nothing else (default) |
/// | `Lenient` | as `Strict` after dropping every byte outside the alphabet (line breaks, spaces, stray punctuation) |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Base64Mode {
    /// Reject anything that is not canonical padded base64. (default)
    #[default]
    Strict,
    /// Discard non-alphabet bytes first, then decode strictly.
    Lenient,
}
