//! Process-wide default text encoding.
//!
//! Track locations may arrive as raw bytes from the filesystem or from
//! playlists written by other tools. They are decoded once into the stored
//! `String` form using the default encoding configured here, and encoded
//! back with `Track::location_for_io`. Hosts that deal with non-UTF-8
//! libraries should override the default before constructing any tracks.

use std::sync::RwLock;

use serde::Deserialize;

static DEFAULT_ENCODING: RwLock<TextEncoding> = RwLock::new(TextEncoding::Utf8);

/// Supported byte <-> text mappings for locations and tag values.
///
/// Decoding is best-effort and never fails: bytes that are invalid in the
/// selected encoding are substituted, not rejected. ASCII-range input
/// round-trips byte-identically through both encodings.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TextEncoding {
    #[serde(alias = "utf-8", alias = "UTF-8")]
    Utf8,
    #[serde(alias = "latin-1", alias = "iso-8859-1")]
    Latin1,
}

impl TextEncoding {
    /// Decode raw bytes into a `String`, substituting where needed.
    pub fn decode(self, raw: &[u8]) -> String {
        match self {
            TextEncoding::Utf8 => String::from_utf8_lossy(raw).into_owned(),
            // Latin-1 code points coincide with the first 256 Unicode
            // scalar values, so every byte decodes.
            TextEncoding::Latin1 => raw.iter().map(|&b| b as char).collect(),
        }
    }

    /// Encode text back into bytes; characters outside the encoding's
    /// repertoire become `b'?'`.
    pub fn encode(self, text: &str) -> Vec<u8> {
        match self {
            TextEncoding::Utf8 => text.as_bytes().to_vec(),
            TextEncoding::Latin1 => text
                .chars()
                .map(|c| {
                    let cp = c as u32;
                    if cp <= 0xFF { cp as u8 } else { b'?' }
                })
                .collect(),
        }
    }
}

/// The current process-wide default encoding.
pub fn default_encoding() -> TextEncoding {
    *DEFAULT_ENCODING
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Override the process-wide default encoding.
///
/// Call this before constructing tracks; locations already decoded with a
/// previous default are not re-decoded.
pub fn set_default_encoding(encoding: TextEncoding) {
    *DEFAULT_ENCODING
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner()) = encoding;
}
