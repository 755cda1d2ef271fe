//! trackmeta: a normalized metadata model for music files.
//!
//! A [`Track`] holds one media item's tag fields in a normalized form:
//! multi-valued fields are flattened with a NUL separator, numeric fields
//! are kept apart from text, and sort keys and track numbers are derived
//! on demand. Reading and writing files goes through a [`CodecRegistry`]
//! of per-format codecs chosen by file extension; the stock registry is
//! backed by lofty.
//!
//! ```no_run
//! use trackmeta::{CodecRegistry, TagField, Track};
//!
//! let registry = CodecRegistry::with_default_formats();
//! let mut track = Track::from_location("file:///music/song.mp3", &registry);
//! track.set_tag(TagField::Genre, ["Ambient", "Drone"], false);
//! track.write_tags(&registry)?;
//! # Ok::<(), trackmeta::TagWriteError>(())
//! ```

mod codec;
mod config;
mod encoding;
mod error;
mod repo;
mod track;

pub use codec::{CodecLookup, CodecRegistry, LoftyCodec, TagCodec};
pub use config::{EncodingSettings, FormatSettings, Settings};
pub use encoding::{TextEncoding, default_encoding, set_default_encoding};
pub use error::{
    CodecError, MalformedNumericField, StoreError, TagReadError, TagWriteError,
};
pub use repo::{MemoryRepository, TrackRepository};
pub use track::{ScanStatus, SortKey, TagField, TagValue, Track, lstrip_special};
