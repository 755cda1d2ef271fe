use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::time::UNIX_EPOCH;

use log::{debug, error, info, warn};
use strum::{AsRefStr, EnumString};
use url::Url;

use crate::codec::{CodecLookup, CodecRegistry};
use crate::encoding;
use crate::error::{CodecError, MalformedNumericField, TagReadError, TagWriteError};

use super::sort::{SortKey, lstrip_special};

/// Separator used to flatten multiple values into one stored text field.
/// NUL never occurs in real tag text, so its absence marks a single value.
const MULTI_VALUE_SEPARATOR: char = '\0';

/// The fixed set of text tag fields a track can carry.
///
/// String names are the lowercase variant names (`tracknumber`,
/// `albumartist`, ...), matching the vocabulary used by tag codecs and
/// playlist formats.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, EnumString, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum TagField {
    Title,
    Version,
    Album,
    TrackNumber,
    Artist,
    Genre,
    Performer,
    Copyright,
    License,
    Organization,
    Description,
    Contact,
    Isrc,
    Date,
    Arranger,
    Author,
    Composer,
    Conductor,
    Lyricist,
    DiscNumber,
    LabelId,
    Part,
    Website,
    Language,
    EncodedBy,
    Bpm,
    AlbumArtist,
    OriginalDate,
    OriginalAlbum,
    OriginalArtist,
    RecordingDate,
}

/// Read-side view of a stored tag field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagValue<'a> {
    Single(&'a str),
    Multi(Vec<&'a str>),
}

impl<'a> TagValue<'a> {
    /// The first value, or `""` when the field decoded to nothing.
    pub fn first(&self) -> &'a str {
        match self {
            TagValue::Single(s) => s,
            TagValue::Multi(v) => v.first().copied().unwrap_or(""),
        }
    }

    /// All values in stored order.
    pub fn to_vec(&self) -> Vec<&'a str> {
        match self {
            TagValue::Single(s) => vec![s],
            TagValue::Multi(v) => v.clone(),
        }
    }
}

/// Whether the last tag-read attempt for a track succeeded.
///
/// Every failure path of [`Track::read_tags`] lands in `Invalid`; a retry
/// is always allowed and may move the track to `Valid`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum ScanStatus {
    #[default]
    Unscanned,
    Valid,
    Invalid,
}

/// A single media item's normalized metadata.
#[derive(Debug, Clone, Default)]
pub struct Track {
    location: String,
    fields: HashMap<TagField, String>,
    scan_status: ScanStatus,

    // Numeric fields are stored apart from the text fields and are never
    // NUL-joined.
    pub playcount: Option<i64>,
    pub bitrate: Option<i64>,
    /// Duration in seconds.
    pub length: Option<f64>,
    pub rating: Option<f64>,
    /// Unix mtime observed at the last successful stat.
    pub modified: Option<i64>,
    pub blacklisted: bool,
}

impl Track {
    /// Create a track for `location` without touching the filesystem.
    pub fn new(location: &str) -> Self {
        let mut track = Track::default();
        track.set_location(location);
        track
    }

    /// Create a track and immediately attempt a tag read through `registry`.
    ///
    /// Read failures are routine here (unsupported formats, corrupt files);
    /// they are logged and recorded in [`Track::scan_status`] rather than
    /// returned.
    pub fn from_location(location: &str, registry: &CodecRegistry) -> Self {
        let mut track = Track::new(location);
        let _ = track.read_tags(registry);
        track
    }

    /// Set the location, stripping a `file://` prefix if present.
    ///
    /// No validation that the path exists.
    pub fn set_location(&mut self, raw: &str) {
        let loc = raw.strip_prefix("file://").unwrap_or(raw);
        self.location = loc.to_owned();
    }

    /// Set the location from raw bytes, decoding with the process default
    /// encoding. Undecodable bytes are substituted, not rejected.
    pub fn set_location_bytes(&mut self, raw: &[u8]) {
        let decoded = encoding::default_encoding().decode(raw);
        self.set_location(&decoded);
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    /// The location re-encoded with the process default encoding, for
    /// handing to byte-oriented I/O. Identity for ASCII paths.
    pub fn location_for_io(&self) -> Vec<u8> {
        encoding::default_encoding().encode(&self.location)
    }

    pub fn scan_status(&self) -> ScanStatus {
        self.scan_status
    }

    pub fn is_scan_valid(&self) -> bool {
        self.scan_status == ScanStatus::Valid
    }

    /// Read a tag field.
    ///
    /// A stored value containing the NUL separator splits into its ordered
    /// non-empty parts; anything else comes back as a single value.
    pub fn get_tag(&self, field: TagField) -> Option<TagValue<'_>> {
        let raw = self.fields.get(&field)?;
        if raw.contains(MULTI_VALUE_SEPARATOR) {
            Some(TagValue::Multi(
                raw.split(MULTI_VALUE_SEPARATOR)
                    .filter(|part| !part.is_empty())
                    .collect(),
            ))
        } else {
            Some(TagValue::Single(raw))
        }
    }

    /// Read a tag field by its lowercase name.
    ///
    /// Unknown names return `None` rather than failing; callers probing
    /// arbitrary column names rely on this.
    pub fn get_tag_by_name(&self, name: &str) -> Option<TagValue<'_>> {
        TagField::from_str(name).ok().and_then(|f| self.get_tag(f))
    }

    /// Single-value fast path: store `value` as-is, bypassing the
    /// join logic. A value containing NUL reads back as multi-valued.
    pub fn set_tag_value(&mut self, field: TagField, value: impl Into<String>) {
        self.fields.insert(field, value.into());
    }

    /// Store a sequence of values for a tag field.
    ///
    /// Empty entries are dropped before joining with NUL. With `append`,
    /// the new values are concatenated onto the existing ones; a missing
    /// prior value is treated as the empty sequence. When nothing remains
    /// after filtering the field is cleared, so a stored value never
    /// contains an empty part.
    pub fn set_tag<I, S>(&mut self, field: TagField, values: I, append: bool)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let new_parts = values
            .into_iter()
            .map(|v| v.as_ref().to_owned())
            .filter(|v| !v.is_empty());

        let mut parts: Vec<String> = if append {
            self.get_tag(field)
                .map(|existing| existing.to_vec().into_iter().map(str::to_owned).collect())
                .unwrap_or_default()
        } else {
            Vec::new()
        };
        parts.extend(new_parts);

        if parts.is_empty() {
            self.fields.remove(&field);
        } else {
            self.fields
                .insert(field, parts.join(&MULTI_VALUE_SEPARATOR.to_string()));
        }
    }

    /// Store values for a tag field addressed by name.
    ///
    /// Returns `false` for an unknown name, leaving the track untouched.
    pub fn set_tag_by_name<I, S>(&mut self, name: &str, values: I, append: bool) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        match TagField::from_str(name) {
            Ok(field) => {
                self.set_tag(field, values, append);
                true
            }
            Err(_) => false,
        }
    }

    pub fn clear_tag(&mut self, field: TagField) {
        self.fields.remove(&field);
    }

    /// The track number as an integer.
    ///
    /// `"3/12"` style values take the part before the slash; an empty or
    /// missing field is `-1`. Non-numeric text is a data-integrity error
    /// and is propagated, never swallowed.
    pub fn track_number(&self) -> Result<i32, MalformedNumericField> {
        let value = match self.get_tag(TagField::TrackNumber) {
            Some(v) => v.first().to_owned(),
            None => return Ok(-1),
        };
        let number = value.split('/').next().unwrap_or("");
        if number.is_empty() {
            return Ok(-1);
        }
        number.parse().map_err(|_| MalformedNumericField {
            field: "tracknumber",
            value,
        })
    }

    /// The duration in whole seconds, truncated toward zero.
    /// Absent or zero `length` is `0`.
    pub fn duration_secs(&self) -> i64 {
        match self.length {
            Some(length) if length != 0.0 => length as i64,
            _ => 0,
        }
    }

    /// Derive the sort key for a field.
    ///
    /// Track numbers sort numerically. Artists additionally drop a leading
    /// "the " article after the special-character strip. Everything else
    /// is lowercased with leading specials stripped. Multi-valued fields
    /// sort by their first value.
    pub fn sort_key(&self, field: TagField) -> Result<SortKey, MalformedNumericField> {
        match field {
            TagField::TrackNumber => Ok(SortKey::Number(i64::from(self.track_number()?))),
            TagField::Artist => {
                let stripped = lstrip_special(self.tag_first(TagField::Artist));
                let key = stripped
                    .strip_prefix("the ")
                    .map(str::to_owned)
                    .unwrap_or(stripped);
                Ok(SortKey::Text(key))
            }
            _ => Ok(SortKey::Text(lstrip_special(self.tag_first(field)))),
        }
    }

    fn tag_first(&self, field: TagField) -> &str {
        match self.fields.get(&field) {
            Some(raw) => raw
                .split(MULTI_VALUE_SEPARATOR)
                .find(|part| !part.is_empty())
                .unwrap_or(""),
            None => "",
        }
    }

    /// Lowercase extension of the location, without the dot.
    fn extension(&self) -> String {
        Path::new(&self.location)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default()
    }

    /// Read tags from the file at `location` via the registry's codec.
    ///
    /// Remote URIs are never read locally. The file mtime is stat'ed on a
    /// best-effort basis before the codec runs; a stat failure leaves
    /// `modified` unset. Every failure path records `ScanStatus::Invalid`
    /// and a retry is always permitted.
    pub fn read_tags(&mut self, registry: &CodecRegistry) -> Result<(), TagReadError> {
        // Anything that parses as a URL carries a scheme; bare paths don't.
        if Url::parse(&self.location).is_ok() {
            self.scan_status = ScanStatus::Invalid;
            return Err(TagReadError::RemoteLocation(self.location.clone()));
        }

        let ext = self.extension();
        let codec = match registry.lookup(&ext) {
            CodecLookup::Codec(codec) => codec,
            CodecLookup::Unsupported => {
                self.scan_status = ScanStatus::Invalid;
                return Err(TagReadError::UnsupportedFormat(ext));
            }
            CodecLookup::Unknown => {
                debug!("'{ext}' format is not understood");
                self.scan_status = ScanStatus::Invalid;
                return Err(TagReadError::UnsupportedFormat(ext));
            }
        };

        if let Ok(mtime) = std::fs::metadata(&self.location).and_then(|m| m.modified()) {
            self.modified = mtime
                .duration_since(UNIX_EPOCH)
                .ok()
                .map(|d| d.as_secs() as i64);
        }

        match codec.fill_track(self) {
            Ok(()) => {
                self.scan_status = ScanStatus::Valid;
                Ok(())
            }
            Err(CodecError::HeaderCorrupt(source)) => {
                warn!("possibly corrupt file: {}", self.location);
                self.scan_status = ScanStatus::Invalid;
                Err(TagReadError::HeaderCorrupt {
                    path: self.location.clone(),
                    source,
                })
            }
            Err(source) => {
                error!("failed to read tags from {}: {source}", self.location);
                self.scan_status = ScanStatus::Invalid;
                Err(TagReadError::Codec {
                    path: self.location.clone(),
                    source,
                })
            }
        }
    }

    /// Write the current field set back into the file.
    ///
    /// An extension with no codec is a logged no-op, not an error: corrupt
    /// and unsupported files are routine and must not abort batch saves.
    pub fn write_tags(&self, registry: &CodecRegistry) -> Result<(), TagWriteError> {
        let ext = self.extension();
        match registry.lookup(&ext) {
            CodecLookup::Codec(codec) => codec.write_track(self).map_err(|source| {
                error!("failed to write tags to {}: {source}", self.location);
                TagWriteError::Codec {
                    path: self.location.clone(),
                    source,
                }
            }),
            CodecLookup::Unsupported | CodecLookup::Unknown => {
                info!("writing metadata to type '{ext}' is not supported");
                Ok(())
            }
        }
    }
}

impl fmt::Display for Track {
    /// `'Title' by 'Artist' from 'Album'`, skipping empty parts.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}'", self.tag_first(TagField::Title))?;
        let artist = self.tag_first(TagField::Artist);
        if !artist.trim().is_empty() {
            write!(f, " by '{artist}'")?;
        }
        let album = self.tag_first(TagField::Album);
        if !album.trim().is_empty() {
            write!(f, " from '{album}'")?;
        }
        Ok(())
    }
}
