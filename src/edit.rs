//! Chunk edit requests

use crate::{
    chunk::{parse_tag, ChunkTag, ChunkType},
    editor::{self, VALUE_SIZE},
    error::{Error, Result},
};

/// Scale factor PNG uses to store gamma as an integer
pub const GAMMA_SCALE: f64 = 100_000.0;

/// A single structural edit of a PNG buffer
///
/// Edits are applied one at a time; each one is a full pass over the buffer.
///
/// # Example
///
/// ```
/// use png_chunk_io::{ChunkEdit, ChunkType};
///
/// # fn main() -> png_chunk_io::Result<()> {
/// let drop_srgb = ChunkEdit::remove(ChunkType::RgbColorSpace);
/// let add_gamma = ChunkEdit::insert_after_header("gAMA", 389)?;
/// # let _ = (drop_srgb, add_gamma);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChunkEdit {
    /// Drop every chunk of this type
    Remove(ChunkType),

    /// Insert a new chunk directly after `IHDR`
    InsertAfterHeader {
        tag: ChunkTag,
        length: u32,
        value: u32,
    },

    /// Rewrite the payload of every chunk with this tag
    Set {
        tag: ChunkTag,
        length: u32,
        value: u32,
    },
}

impl ChunkEdit {
    pub fn remove(kind: ChunkType) -> Self {
        ChunkEdit::Remove(kind)
    }

    /// Insert a 4-byte `value` chunk tagged `tag` after the header
    pub fn insert_after_header(tag: &str, value: u32) -> Result<Self> {
        Ok(ChunkEdit::InsertAfterHeader {
            tag: parse_tag(tag)?,
            length: VALUE_SIZE,
            value,
        })
    }

    /// Replace the payload of chunks tagged `tag` with a 4-byte `value`
    pub fn set(tag: &str, value: u32) -> Result<Self> {
        Ok(ChunkEdit::Set {
            tag: parse_tag(tag)?,
            length: VALUE_SIZE,
            value,
        })
    }

    /// Insert a `gAMA` chunk for the given gamma exponent
    ///
    /// The stored value is `round(gamma * 100000)`.
    pub fn insert_gamma(gamma: f64) -> Result<Self> {
        let scaled = (gamma * GAMMA_SCALE).round();
        if !scaled.is_finite() || scaled <= 0.0 || scaled > u32::MAX as f64 {
            return Err(Error::InvalidArgument(format!(
                "gamma {} cannot be stored in a gAMA chunk",
                gamma
            )));
        }
        Ok(ChunkEdit::InsertAfterHeader {
            tag: *b"gAMA",
            length: VALUE_SIZE,
            value: scaled as u32,
        })
    }

    /// Run this edit over `data`, returning the rebuilt buffer
    pub fn apply_to(&self, data: &[u8]) -> Result<Vec<u8>> {
        match self {
            ChunkEdit::Remove(kind) => editor::remove_chunk(data, *kind),
            ChunkEdit::InsertAfterHeader { tag, length, value } => {
                editor::insert_chunk_after_header(data, tag, *length, *value)
            }
            ChunkEdit::Set { tag, length, value } => editor::set_chunk(data, tag, *length, *value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors() {
        assert_eq!(
            ChunkEdit::insert_after_header("gAMA", 389).unwrap(),
            ChunkEdit::InsertAfterHeader {
                tag: *b"gAMA",
                length: 4,
                value: 389
            }
        );
        assert_eq!(
            ChunkEdit::set("pHYs", 1).unwrap(),
            ChunkEdit::Set {
                tag: *b"pHYs",
                length: 4,
                value: 1
            }
        );
        assert!(ChunkEdit::set("toolong", 1).is_err());
    }

    #[test]
    fn test_insert_gamma() {
        assert_eq!(
            ChunkEdit::insert_gamma(1.0 / 2.2).unwrap(),
            ChunkEdit::InsertAfterHeader {
                tag: *b"gAMA",
                length: 4,
                value: 45455
            }
        );
        assert!(ChunkEdit::insert_gamma(0.0).is_err());
        assert!(ChunkEdit::insert_gamma(-1.0).is_err());
        assert!(ChunkEdit::insert_gamma(f64::NAN).is_err());
        assert!(ChunkEdit::insert_gamma(1e12).is_err());
    }
}
