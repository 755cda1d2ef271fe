use std::fs::OpenOptions;

use lofty::config::WriteOptions;
use lofty::error::ErrorKind;
use lofty::prelude::*;
use lofty::tag::{ItemValue, Tag, TagItem};

use crate::error::CodecError;
use crate::track::{TagField, Track};

use super::registry::TagCodec;

/// Bridge between our tag fields and lofty's item keys, for the fields
/// lofty models. Fields without a stable key (e.g. arranger, part) are
/// carried in memory but not round-tripped through files.
const ITEM_KEYS: &[(TagField, ItemKey)] = &[
    (TagField::Title, ItemKey::TrackTitle),
    (TagField::Artist, ItemKey::TrackArtist),
    (TagField::Album, ItemKey::AlbumTitle),
    (TagField::AlbumArtist, ItemKey::AlbumArtist),
    (TagField::Genre, ItemKey::Genre),
    (TagField::TrackNumber, ItemKey::TrackNumber),
    (TagField::DiscNumber, ItemKey::DiscNumber),
    (TagField::Date, ItemKey::Year),
    (TagField::RecordingDate, ItemKey::RecordingDate),
    (TagField::OriginalDate, ItemKey::OriginalReleaseDate),
    (TagField::Composer, ItemKey::Composer),
    (TagField::Conductor, ItemKey::Conductor),
    (TagField::Lyricist, ItemKey::Lyricist),
    (TagField::Copyright, ItemKey::CopyrightMessage),
    (TagField::License, ItemKey::License),
    (TagField::Organization, ItemKey::Publisher),
    (TagField::LabelId, ItemKey::CatalogNumber),
    (TagField::Description, ItemKey::Comment),
    (TagField::Language, ItemKey::Language),
    (TagField::EncodedBy, ItemKey::EncodedBy),
    (TagField::Isrc, ItemKey::Isrc),
];

/// Default codec for all supported formats, backed by lofty's probing
/// reader. The format is determined from file content, so a mismatched
/// extension does not pick the wrong parser.
pub struct LoftyCodec;

impl TagCodec for LoftyCodec {
    fn fill_track(&self, track: &mut Track) -> Result<(), CodecError> {
        let tagged = lofty::read_from_path(track.location()).map_err(classify)?;

        let properties = tagged.properties();
        track.length = Some(properties.duration().as_secs_f64());
        track.bitrate = properties.audio_bitrate().map(i64::from);

        if let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) {
            for (field, key) in ITEM_KEYS {
                if let Some(value) = tag.get_string(key) {
                    if !value.is_empty() {
                        track.set_tag_value(*field, value);
                    }
                }
            }
        }
        Ok(())
    }

    fn write_track(&self, track: &Track) -> Result<(), CodecError> {
        let mut tagged = lofty::read_from_path(track.location()).map_err(classify)?;

        if tagged.primary_tag().is_none() {
            tagged.insert_tag(Tag::new(tagged.primary_tag_type()));
        }
        let Some(tag) = tagged.primary_tag_mut() else {
            return Err(CodecError::Other("file accepts no tag".into()));
        };

        for (field, key) in ITEM_KEYS {
            if let Some(value) = track.get_tag(*field) {
                let values = value.to_vec();
                if let Some((first, rest)) = values.split_first() {
                    // insert_text replaces any existing items for the key;
                    // extra values of a multi-valued field are pushed after.
                    tag.insert_text(key.clone(), (*first).to_owned());
                    for part in rest {
                        tag.push(TagItem::new(
                            key.clone(),
                            ItemValue::Text((*part).to_owned()),
                        ));
                    }
                }
            }
        }

        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(track.location())?;
        tagged
            .save_to(&mut file, WriteOptions::default())
            .map_err(classify)
    }
}

/// Reclassify a lofty error: an undetermined format or a failed format
/// parse means the header did not match what the extension promised,
/// which callers treat as possibly corrupt.
fn classify(err: lofty::error::LoftyError) -> CodecError {
    if matches!(
        err.kind(),
        ErrorKind::UnknownFormat | ErrorKind::FileDecoding(_)
    ) {
        CodecError::HeaderCorrupt(Box::new(err))
    } else {
        CodecError::Other(Box::new(err))
    }
}
