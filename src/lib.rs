//! Chunk-level editing of PNG files.
//!
//! A PNG file is an 8-byte signature followed by a sequence of chunks, each
//! `length ‖ type ‖ data ‖ crc`. This crate treats that stream as a mutable
//! sequence of typed records: it can remove chunks, splice a new chunk in
//! after the header, or rewrite a chunk's payload, always recomputing the
//! CRC-32 of anything it writes and never desynchronizing chunk boundaries.
//!
//! Image content is never decoded. Only the chunk framing is interpreted.
//!
//! # Design Principles
//!
//! - **Positional scan**: chunks are decoded one header at a time from the
//!   buffer, never collected into an intermediate list
//! - **Rebuild, then swap**: every edit produces a fresh buffer; the image is
//!   only updated when the whole pass succeeds
//! - **Transparent unknowns**: unrecognized chunk types are copied bit for bit
//!
//! # Quick Start
//!
//! ```no_run
//! use png_chunk_io::{ChunkType, PngImage};
//!
//! # fn main() -> png_chunk_io::Result<()> {
//! let mut png = PngImage::open("drawing.png")?;
//!
//! // Drop the sRGB chunk and declare an explicit gamma instead
//! png.remove_chunk(ChunkType::RgbColorSpace)?;
//! png.insert_chunk_after_header("gAMA", 4, 389)?;
//!
//! png.save_atomic("drawing.png")?;
//! # Ok(())
//! # }
//! ```
//!
//! # Edit Requests
//!
//! Edits can also be described as values and applied later:
//!
//! ```
//! use png_chunk_io::{test_utils::minimal_png, ChunkEdit, ChunkType, PngImage};
//!
//! # fn main() -> png_chunk_io::Result<()> {
//! let mut png = PngImage::from_bytes(minimal_png())?;
//! png.apply(&ChunkEdit::insert_after_header("gAMA", 389)?)?;
//! assert_eq!(png.count(ChunkType::Gamma)?, 1);
//! # Ok(())
//! # }
//! ```

mod binary;
mod chunk;
pub mod crc;
mod edit;
mod editor;
mod error;
mod png;

pub use binary::{BinaryImage, ImageEncoder};
pub use chunk::{
    chunk_crc, parse_tag, read_chunk_length, read_chunk_tag, read_chunk_type, ChunkRef, ChunkTag,
    ChunkType, Chunks, CRC_FIELD_SIZE, LENGTH_FIELD_SIZE, MAX_CHUNK_LENGTH, MIN_CHUNK_SIZE,
    PAYLOAD_OFFSET, PNG_SIGNATURE, TYPE_FIELD_SIZE,
};
pub use edit::{ChunkEdit, GAMMA_SCALE};
pub use editor::{insert_chunk_after_header, remove_chunk, set_chunk, VALUE_SIZE};
pub use error::{Error, Result};
pub use png::{has_png_signature, PngImage};

// Test utilities - only compiled for tests or when explicitly enabled
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
