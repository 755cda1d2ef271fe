//! Codec module: per-format tag readers/writers and the extension registry
//! that dispatches to them.
//!
//! The registry is plain data constructed at startup and passed into
//! `Track` operations, so tests can swap in fake codecs and hosts can
//! disable formats without touching global state.

mod lofty_codec;
mod registry;

pub use lofty_codec::LoftyCodec;
pub use registry::{CodecLookup, CodecRegistry, TagCodec};
