//! Signature-checked PNG container

use crate::{
    binary::{BinaryImage, ImageEncoder},
    chunk::{parse_tag, ChunkType, Chunks, PNG_SIGNATURE},
    edit::ChunkEdit,
    editor,
    error::{Error, Result},
};
use std::path::Path;

/// A PNG file held in memory, editable chunk by chunk
///
/// The signature is checked once when the image is constructed. Every edit
/// rebuilds the whole buffer and swaps it in only on success, so a failed edit
/// leaves the image unchanged.
///
/// # Example
///
/// ```no_run
/// use png_chunk_io::{ChunkType, PngImage};
///
/// # fn main() -> png_chunk_io::Result<()> {
/// let mut png = PngImage::open("image.png")?;
/// png.remove_chunk(ChunkType::RgbColorSpace)?;
/// png.insert_chunk_after_header("gAMA", 4, 389)?;
/// png.save("image.png")?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PngImage {
    binary: BinaryImage,
}

impl PngImage {
    /// Load and validate a PNG file
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_binary(BinaryImage::open(path)?)
    }

    /// Validate and adopt an in-memory buffer
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        Self::from_binary(BinaryImage::from_bytes(data))
    }

    /// Validate and adopt the output of an encoder
    pub fn from_encoder<E: ImageEncoder + ?Sized>(encoder: Option<&E>) -> Result<Self> {
        Self::from_binary(BinaryImage::from_encoder(encoder)?)
    }

    /// Validate an untyped buffer as PNG
    pub fn from_binary(binary: BinaryImage) -> Result<Self> {
        if !has_png_signature(binary.as_bytes()) {
            return Err(Error::InvalidFormat("Not a PNG file".into()));
        }
        Ok(Self { binary })
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.binary.as_bytes()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.binary.into_bytes()
    }

    pub fn into_binary(self) -> BinaryImage {
        self.binary
    }

    pub fn len(&self) -> usize {
        self.binary.len()
    }

    pub fn is_empty(&self) -> bool {
        self.binary.is_empty()
    }

    /// Walk the chunks without copying them
    pub fn chunks(&self) -> Chunks<'_> {
        Chunks::new(self.binary.as_bytes())
    }

    /// Number of chunks of the given type
    pub fn count(&self, kind: ChunkType) -> Result<usize> {
        let mut count = 0;
        for chunk in self.chunks() {
            if chunk?.kind == kind {
                count += 1;
            }
        }
        Ok(count)
    }

    /// Check every chunk's stored CRC
    pub fn verify(&self) -> Result<()> {
        for chunk in self.chunks() {
            let chunk = chunk?;
            let computed = chunk.computed_crc();
            if chunk.crc != computed {
                return Err(Error::CrcMismatch {
                    offset: chunk.offset as u64,
                    tag: chunk.tag_str().into_owned(),
                    stored: chunk.crc,
                    computed,
                });
            }
        }
        Ok(())
    }

    /// Apply one edit
    pub fn apply(&mut self, edit: &ChunkEdit) -> Result<()> {
        let rebuilt = edit.apply_to(self.binary.as_bytes())?;
        self.binary.replace(rebuilt);
        Ok(())
    }

    /// Drop every chunk of type `kind`
    pub fn remove_chunk(&mut self, kind: ChunkType) -> Result<()> {
        let rebuilt = editor::remove_chunk(self.binary.as_bytes(), kind)?;
        self.binary.replace(rebuilt);
        Ok(())
    }

    /// Insert a chunk with a 4-byte `value` payload directly after `IHDR`
    ///
    /// `length` must be 4.
    pub fn insert_chunk_after_header(&mut self, tag: &str, length: u32, value: u32) -> Result<()> {
        let tag = parse_tag(tag)?;
        let rebuilt =
            editor::insert_chunk_after_header(self.binary.as_bytes(), &tag, length, value)?;
        self.binary.replace(rebuilt);
        Ok(())
    }

    /// Replace the payload of every chunk tagged `tag` with a 4-byte `value`
    ///
    /// `length` must be 4 and `tag` must name a known chunk type.
    pub fn set_chunk(&mut self, tag: &str, length: u32, value: u32) -> Result<()> {
        let tag = parse_tag(tag)?;
        let rebuilt = editor::set_chunk(self.binary.as_bytes(), &tag, length, value)?;
        self.binary.replace(rebuilt);
        Ok(())
    }

    /// Write the current buffer to `path`
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.binary.save(path)
    }

    /// Write the current buffer to `path` via temp file and rename
    pub fn save_atomic<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.binary.save_atomic(path)
    }
}

impl AsRef<[u8]> for PngImage {
    fn as_ref(&self) -> &[u8] {
        self.binary.as_bytes()
    }
}

/// Check for the 8-byte PNG signature
pub fn has_png_signature(data: &[u8]) -> bool {
    data.len() >= PNG_SIGNATURE.len() && &data[..PNG_SIGNATURE.len()] == PNG_SIGNATURE
}
