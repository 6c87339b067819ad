//! Error types for png-chunk-io

use std::io;

/// Result type for png-chunk-io operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading, editing or saving a PNG buffer
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Invalid file format (signature mismatch)
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// Missing or malformed input for an operation
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Truncated or corrupt chunk
    #[error("Invalid chunk at offset {offset}: {reason}")]
    InvalidSegment { offset: u64, reason: String },

    /// Stored chunk CRC does not match the recomputed one
    #[error("CRC mismatch in {tag} chunk at offset {offset}: stored {stored:#010x}, computed {computed:#010x}")]
    CrcMismatch {
        offset: u64,
        tag: String,
        stored: u32,
        computed: u32,
    },
}
