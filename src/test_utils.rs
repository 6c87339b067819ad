//! Test utilities for building PNG buffers and locating fixture files.
//!
//! This module provides helpers for working with test data, including:
//! - Synthetic chunk and PNG builders with correct CRCs
//! - File-based fixtures from `tests/fixtures/`
//! - Extended fixtures from custom directories (via `PNG_TEST_FIXTURES` env var)
//!
//! # Usage
//!
//! ```no_run
//! use png_chunk_io::test_utils::*;
//!
//! # fn example() -> png_chunk_io::Result<()> {
//! // Synthetic buffer: signature + IHDR + IDAT + IEND
//! let png = minimal_png();
//!
//! // Committed fixture file
//! let bytes = fixture_bytes(SRGB_2X2)?;
//! # Ok(())
//! # }
//! ```

use std::{fs, path::PathBuf};

use crate::{chunk_crc, Error, Result, PNG_SIGNATURE};

/// 2x2 RGB image with sRGB, gAMA, pHYs, a private `prVt` chunk, IDAT, tEXt and IEND
pub const SRGB_2X2: &str = "srgb_2x2.png";

/// Data of a 1x1, 8-bit RGB `IHDR` chunk
pub const IHDR_1X1_RGB: [u8; 13] = [
    0x00, 0x00, 0x00, 0x01, // Width: 1
    0x00, 0x00, 0x00, 0x01, // Height: 1
    0x08, // Bit depth: 8
    0x02, // Color type: RGB
    0x00, // Compression: deflate
    0x00, // Filter: adaptive
    0x00, // Interlace: none
];

/// Encode one chunk: length, tag, data and CRC
pub fn chunk_bytes(tag: &[u8; 4], data: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(12 + data.len());
    out.extend_from_slice(&(data.len() as u32).to_be_bytes());
    out.extend_from_slice(tag);
    out.extend_from_slice(data);
    out.extend_from_slice(&chunk_crc(tag, data).to_be_bytes());
    out
}

/// Builder for synthetic PNG buffers
///
/// Chunks are appended in call order after the signature.
#[derive(Debug, Clone)]
pub struct PngBuilder {
    data: Vec<u8>,
}

impl PngBuilder {
    pub fn new() -> Self {
        Self {
            data: PNG_SIGNATURE.to_vec(),
        }
    }

    /// Append a well-formed chunk
    pub fn chunk(mut self, tag: &[u8; 4], data: &[u8]) -> Self {
        self.data.extend_from_slice(&chunk_bytes(tag, data));
        self
    }

    /// Append arbitrary bytes (for corrupt or truncated input)
    pub fn raw(mut self, bytes: &[u8]) -> Self {
        self.data.extend_from_slice(bytes);
        self
    }

    pub fn build(self) -> Vec<u8> {
        self.data
    }
}

impl Default for PngBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Signature + `IHDR` (13-byte data) + `IDAT` (1-byte data) + `IEND`
pub fn minimal_png() -> Vec<u8> {
    PngBuilder::new()
        .chunk(b"IHDR", &IHDR_1X1_RGB)
        .chunk(b"IDAT", &[0x00])
        .chunk(b"IEND", &[])
        .build()
}

/// Get path to a fixture file
///
/// Search order:
/// 1. PNG_TEST_FIXTURES env var (for extended test sets)
/// 2. Default tests/fixtures directory
pub fn fixture_path(file_name: &str) -> PathBuf {
    if let Ok(custom_dir) = std::env::var("PNG_TEST_FIXTURES") {
        let path = PathBuf::from(custom_dir).join(file_name);
        if path.exists() {
            return path;
        }
    }

    // Default to tests/fixtures (relative to project root)
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests/fixtures");
    path.push(file_name);
    path
}

/// Helper to get fixture data as bytes
pub fn fixture_bytes(name: &str) -> Result<Vec<u8>> {
    fs::read(fixture_path(name)).map_err(Error::Io)
}
