//! Typed failure taxonomy for tag I/O and field derivation.
//!
//! Tag-read failures are routine (corrupt and unsupported files are common
//! in real libraries), so they are classified and reported softly at the
//! `Track` boundary. `MalformedNumericField` is the exception: it indicates
//! data corruption in a field that should be numeric and is always
//! propagated to the caller.

use thiserror::Error;

/// Failure raised by a [`TagCodec`](crate::codec::TagCodec) implementation.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The file's header did not match the expected format.
    #[error("corrupt or unrecognized file header")]
    HeaderCorrupt(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("tag i/o failed")]
    Io(#[from] std::io::Error),

    /// Any other codec-specific failure.
    #[error("codec failure: {0}")]
    Other(Box<dyn std::error::Error + Send + Sync>),
}

/// Why a `read_tags` attempt produced no metadata.
#[derive(Debug, Error)]
pub enum TagReadError {
    /// The location is a remote URI; tags are never read over the network.
    #[error("remote location is not read locally: {0}")]
    RemoteLocation(String),

    /// The extension is unknown to the registry or explicitly unsupported.
    #[error("no tag codec for extension '{0}'")]
    UnsupportedFormat(String),

    /// The codec flagged a malformed header; the file is possibly corrupt.
    #[error("possibly corrupt file: {path}")]
    HeaderCorrupt {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Any other codec failure during the read.
    #[error("failed to read tags from {path}")]
    Codec {
        path: String,
        #[source]
        source: CodecError,
    },
}

/// Why a `write_tags` attempt failed. Unsupported formats are not an
/// error on the write path; they log and no-op instead.
#[derive(Debug, Error)]
pub enum TagWriteError {
    #[error("failed to write tags to {path}")]
    Codec {
        path: String,
        #[source]
        source: CodecError,
    },
}

/// A field that must parse as a number contained non-numeric text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed numeric field '{field}': {value:?}")]
pub struct MalformedNumericField {
    pub field: &'static str,
    pub value: String,
}

/// Failure reported by a [`TrackRepository`](crate::repo::TrackRepository)
/// backend.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("track store backend error: {0}")]
    Backend(String),
}
