use std::collections::BTreeMap;
use std::sync::Arc;

use crate::config::Settings;
use crate::error::CodecError;
use crate::track::Track;

use super::lofty_codec::LoftyCodec;

/// A format-specific tag reader/writer.
///
/// `fill_track` populates the track's fields from the file at its location
/// and must report a malformed header as [`CodecError::HeaderCorrupt`] so
/// the caller can distinguish "possibly corrupt" from other failures.
pub trait TagCodec: Send + Sync {
    fn fill_track(&self, track: &mut Track) -> Result<(), CodecError>;
    fn write_track(&self, track: &Track) -> Result<(), CodecError>;
}

/// Result of looking up an extension in the registry.
pub enum CodecLookup<'a> {
    /// A codec handles this extension.
    Codec(&'a Arc<dyn TagCodec>),
    /// The extension is known but has no codec (e.g. `mod`); reads fail
    /// softly and writes no-op.
    Unsupported,
    /// The extension is not in the table at all.
    Unknown,
}

/// Maps normalized (lowercase, dotless) extensions to codecs.
pub struct CodecRegistry {
    codecs: BTreeMap<String, Option<Arc<dyn TagCodec>>>,
}

/// Extensions handled by the default lofty-backed codec.
const DEFAULT_SUPPORTED: &[&str] = &[
    "aac", "flac", "m4a", "mp+", "mp2", "mp3", "mp4", "mpc", "oga", "ogg", "tta", "wav", "wma",
    "wv",
];

/// Extensions we recognize but have no tag codec for. Kept in the table so
/// they fail softly instead of being reported as not understood.
const DEFAULT_UNSUPPORTED: &[&str] = &["ac3", "mod", "s3m"];

impl CodecRegistry {
    /// An empty registry; every lookup is [`CodecLookup::Unknown`].
    pub fn new() -> Self {
        Self {
            codecs: BTreeMap::new(),
        }
    }

    /// The stock extension table, all supported formats backed by lofty.
    pub fn with_default_formats() -> Self {
        let mut registry = Self::new();
        let codec: Arc<dyn TagCodec> = Arc::new(LoftyCodec);
        for ext in DEFAULT_SUPPORTED {
            registry.register(ext, Arc::clone(&codec));
        }
        for ext in DEFAULT_UNSUPPORTED {
            registry.register_unsupported(ext);
        }
        registry
    }

    /// The stock table minus any extensions the host disabled in settings.
    pub fn from_settings(settings: &Settings) -> Self {
        let mut registry = Self::with_default_formats();
        for ext in &settings.formats.disabled {
            registry.register_unsupported(ext);
        }
        registry
    }

    pub fn register(&mut self, extension: &str, codec: Arc<dyn TagCodec>) {
        self.codecs
            .insert(normalize_extension(extension), Some(codec));
    }

    /// Mark an extension as known-but-unsupported.
    pub fn register_unsupported(&mut self, extension: &str) {
        self.codecs.insert(normalize_extension(extension), None);
    }

    pub fn lookup(&self, extension: &str) -> CodecLookup<'_> {
        match self.codecs.get(&normalize_extension(extension)) {
            Some(Some(codec)) => CodecLookup::Codec(codec),
            Some(None) => CodecLookup::Unsupported,
            None => CodecLookup::Unknown,
        }
    }

    /// Every known extension as a dotted suffix (`.mp3`, ...), supported
    /// or not, in stable order. Useful for building file-scan filters.
    pub fn known_extensions(&self) -> Vec<String> {
        self.codecs.keys().map(|ext| format!(".{ext}")).collect()
    }

    /// Extensions that currently map to a codec, dotless, in stable order.
    pub fn supported_extensions(&self) -> Vec<String> {
        self.codecs
            .iter()
            .filter(|(_, codec)| codec.is_some())
            .map(|(ext, _)| ext.clone())
            .collect()
    }
}

impl Default for CodecRegistry {
    fn default() -> Self {
        Self::with_default_formats()
    }
}

fn normalize_extension(extension: &str) -> String {
    extension.trim().trim_start_matches('.').to_ascii_lowercase()
}
