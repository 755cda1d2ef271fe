//! Track module: the normalized tag-field model for a single media item.
//!
//! `Track` lives in `track::model` and holds the location, the NUL-joined
//! text fields and the numeric fields. Sort-key helpers live in
//! `track::sort`.

mod model;
mod sort;

pub use model::*;
pub use sort::{SortKey, lstrip_special};
