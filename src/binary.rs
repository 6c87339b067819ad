//! Untyped image byte buffer with file load/save
//!
//! [`BinaryImage`] owns the raw bytes of an encoded image and nothing else.
//! Format checks live in the typed wrapper ([`crate::PngImage`]).

use crate::error::{Error, Result};
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Something that can produce an encoded image, e.g. a finished PNG encoder
///
/// The output is taken as-is; nothing is re-encoded.
pub trait ImageEncoder {
    /// Produce the encoded bytes
    fn encode(&self) -> Result<Vec<u8>>;
}

impl ImageEncoder for [u8] {
    fn encode(&self) -> Result<Vec<u8>> {
        Ok(self.to_vec())
    }
}

impl ImageEncoder for Vec<u8> {
    fn encode(&self) -> Result<Vec<u8>> {
        Ok(self.clone())
    }
}

/// Raw encoded image held entirely in memory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryImage {
    data: Vec<u8>,
}

impl BinaryImage {
    /// Read a whole file into memory
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = fs::read(path.as_ref())?;
        log::debug!("loaded {} bytes from {}", data.len(), path.as_ref().display());
        Ok(Self { data })
    }

    /// Take ownership of an already-encoded buffer
    pub fn from_bytes(data: Vec<u8>) -> Self {
        Self { data }
    }

    /// Store the output of an encoder
    ///
    /// Fails with [`Error::InvalidArgument`] when no encoder is given.
    pub fn from_encoder<E: ImageEncoder + ?Sized>(encoder: Option<&E>) -> Result<Self> {
        let encoder =
            encoder.ok_or_else(|| Error::InvalidArgument("no image source given".into()))?;
        Ok(Self {
            data: encoder.encode()?,
        })
    }

    /// Replace the buffer with the contents of a file
    ///
    /// On failure the current buffer is kept.
    pub fn load_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        *self = Self::open(path)?;
        Ok(())
    }

    /// Replace the buffer with the output of an encoder
    ///
    /// On failure the current buffer is kept.
    pub fn load_encoded<E: ImageEncoder + ?Sized>(&mut self, encoder: Option<&E>) -> Result<()> {
        *self = Self::from_encoder(encoder)?;
        Ok(())
    }

    /// Write the buffer verbatim to `path`
    ///
    /// A failed write may leave a partial file behind; see [`Self::save_atomic`].
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(path.as_ref(), &self.data)?;
        log::debug!("saved {} bytes to {}", self.data.len(), path.as_ref().display());
        Ok(())
    }

    /// Write the buffer to a temp file next to `path`, then rename it into place
    ///
    /// Either the old file or the complete new one is visible at `path`.
    pub fn save_atomic<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut temp_file = NamedTempFile::new_in(dir)?;
        temp_file.write_all(&self.data)?;
        temp_file.as_file().sync_all()?;
        temp_file.persist(path).map_err(|e| Error::Io(e.error))?;

        log::debug!(
            "atomically saved {} bytes to {}",
            self.data.len(),
            path.display()
        );
        Ok(())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Install a rebuilt buffer
    pub(crate) fn replace(&mut self, data: Vec<u8>) {
        self.data = data;
    }
}

impl AsRef<[u8]> for BinaryImage {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}
