use serde::Deserialize;

use crate::encoding::{self, TextEncoding};

/// Top-level settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/trackmeta/config.toml` or
/// `~/.config/trackmeta/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `TRACKMETA__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub encoding: EncodingSettings,
    pub formats: FormatSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            encoding: EncodingSettings::default(),
            formats: FormatSettings::default(),
        }
    }
}

impl Settings {
    /// Install these settings process-wide.
    ///
    /// Call before constructing any tracks: locations are decoded with the
    /// default encoding at construction time.
    pub fn apply(&self) {
        encoding::set_default_encoding(self.encoding.default);
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EncodingSettings {
    /// Default text encoding used to decode track locations and raw tag
    /// bytes (`"utf8"` or `"latin1"`, with the usual aliases).
    pub default: TextEncoding,
}

impl Default for EncodingSettings {
    fn default() -> Self {
        Self {
            default: TextEncoding::Utf8,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FormatSettings {
    /// Extensions to treat as unsupported even though a codec exists
    /// (case-insensitive, with or without dot).
    pub disabled: Vec<String>,
}

impl Default for FormatSettings {
    fn default() -> Self {
        Self { disabled: vec![] }
    }
}
