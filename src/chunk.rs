//! PNG chunk types and the positional chunk scanner
//!
//! Chunks are never materialized into a list. The scanner decodes one header
//! at a time straight out of the byte buffer; callers advance the cursor by
//! `12 + length` themselves.

use crate::{
    crc::{checksum, CRC_FINAL_XOR, CRC_SEED},
    error::{Error, Result},
};
use byteorder::{BigEndian, ByteOrder};

/// PNG signature: 89 50 4E 47 0D 0A 1A 0A
pub const PNG_SIGNATURE: &[u8; 8] = b"\x89PNG\r\n\x1a\n";

/// Offset of the first chunk, just past the signature
pub const PAYLOAD_OFFSET: usize = 8;

pub const LENGTH_FIELD_SIZE: usize = 4;
pub const TYPE_FIELD_SIZE: usize = 4;
pub const CRC_FIELD_SIZE: usize = 4;

/// Size of a chunk with no data: length + type + CRC
pub const MIN_CHUNK_SIZE: usize = LENGTH_FIELD_SIZE + TYPE_FIELD_SIZE + CRC_FIELD_SIZE;

/// Largest data length PNG allows (2^31 - 1)
pub const MAX_CHUNK_LENGTH: u32 = 0x7FFF_FFFF;

/// Raw 4-byte chunk type tag
pub type ChunkTag = [u8; 4];

/// Known PNG chunk kinds
///
/// Any tag outside the known set maps to [`ChunkType::Unknown`]; unknown
/// chunks are carried through edits untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChunkType {
    /// `IHDR`
    ImageHeader,
    /// `PLTE`
    PaletteTable,
    /// `IDAT`
    ImageData,
    /// `IEND`
    ImageTrailer,
    /// `tRNS`
    Transparency,
    /// `cHRM`
    Chromaticities,
    /// `gAMA`
    Gamma,
    /// `iCCP`
    IccProfile,
    /// `sBIT`
    SignificantBits,
    /// `sRGB`
    RgbColorSpace,
    /// `tEXt`
    IsoText,
    /// `zTXt`
    CompressedText,
    /// `iTXt`
    UnicodeText,
    /// `bKGD`
    BackgroundColor,
    /// `hIST`
    Histogram,
    /// `pHYs`
    PhyisicalDimensions,
    /// `sPLT`
    SuggestedPalette,
    /// `tIME`
    Time,
    Unknown,
}

impl ChunkType {
    /// Every known kind, in declaration order
    pub const KNOWN: [ChunkType; 18] = [
        ChunkType::ImageHeader,
        ChunkType::PaletteTable,
        ChunkType::ImageData,
        ChunkType::ImageTrailer,
        ChunkType::Transparency,
        ChunkType::Chromaticities,
        ChunkType::Gamma,
        ChunkType::IccProfile,
        ChunkType::SignificantBits,
        ChunkType::RgbColorSpace,
        ChunkType::IsoText,
        ChunkType::CompressedText,
        ChunkType::UnicodeText,
        ChunkType::BackgroundColor,
        ChunkType::Histogram,
        ChunkType::PhyisicalDimensions,
        ChunkType::SuggestedPalette,
        ChunkType::Time,
    ];

    /// Classify a raw tag
    pub fn from_tag(tag: &ChunkTag) -> Self {
        match tag {
            b"IHDR" => ChunkType::ImageHeader,
            b"PLTE" => ChunkType::PaletteTable,
            b"IDAT" => ChunkType::ImageData,
            b"IEND" => ChunkType::ImageTrailer,
            b"tRNS" => ChunkType::Transparency,
            b"cHRM" => ChunkType::Chromaticities,
            b"gAMA" => ChunkType::Gamma,
            b"iCCP" => ChunkType::IccProfile,
            b"sBIT" => ChunkType::SignificantBits,
            b"sRGB" => ChunkType::RgbColorSpace,
            b"tEXt" => ChunkType::IsoText,
            b"zTXt" => ChunkType::CompressedText,
            b"iTXt" => ChunkType::UnicodeText,
            b"bKGD" => ChunkType::BackgroundColor,
            b"hIST" => ChunkType::Histogram,
            b"pHYs" => ChunkType::PhyisicalDimensions,
            b"sPLT" => ChunkType::SuggestedPalette,
            b"tIME" => ChunkType::Time,
            _ => ChunkType::Unknown,
        }
    }

    /// Canonical tag of a known kind, `None` for [`ChunkType::Unknown`]
    pub fn tag(self) -> Option<&'static ChunkTag> {
        Some(match self {
            ChunkType::ImageHeader => b"IHDR",
            ChunkType::PaletteTable => b"PLTE",
            ChunkType::ImageData => b"IDAT",
            ChunkType::ImageTrailer => b"IEND",
            ChunkType::Transparency => b"tRNS",
            ChunkType::Chromaticities => b"cHRM",
            ChunkType::Gamma => b"gAMA",
            ChunkType::IccProfile => b"iCCP",
            ChunkType::SignificantBits => b"sBIT",
            ChunkType::RgbColorSpace => b"sRGB",
            ChunkType::IsoText => b"tEXt",
            ChunkType::CompressedText => b"zTXt",
            ChunkType::UnicodeText => b"iTXt",
            ChunkType::BackgroundColor => b"bKGD",
            ChunkType::Histogram => b"hIST",
            ChunkType::PhyisicalDimensions => b"pHYs",
            ChunkType::SuggestedPalette => b"sPLT",
            ChunkType::Time => b"tIME",
            ChunkType::Unknown => return None,
        })
    }
}

impl std::fmt::Display for ChunkType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.tag() {
            Some(tag) => f.write_str(&String::from_utf8_lossy(tag)),
            None => f.write_str("unknown"),
        }
    }
}

/// Parse a textual chunk tag such as `"gAMA"`
///
/// PNG tags are exactly four ASCII letters.
pub fn parse_tag(tag: &str) -> Result<ChunkTag> {
    let bytes = tag.as_bytes();
    if bytes.len() != TYPE_FIELD_SIZE || !bytes.iter().all(u8::is_ascii_alphabetic) {
        return Err(Error::InvalidArgument(format!(
            "chunk tag must be four ASCII letters, got {:?}",
            tag
        )));
    }
    let mut out = [0u8; 4];
    out.copy_from_slice(bytes);
    Ok(out)
}

/// CRC of a chunk, computed over `tag ‖ data` with the PNG seed and final XOR
pub fn chunk_crc(tag: &[u8], data: &[u8]) -> u32 {
    checksum(checksum(CRC_SEED, tag), data) ^ CRC_FINAL_XOR
}

fn header_field(data: &[u8], offset: usize, skip: usize, size: usize) -> Result<&[u8]> {
    let start = offset.checked_add(skip);
    let end = start.and_then(|start| start.checked_add(size));
    match (start, end) {
        (Some(start), Some(end)) if end <= data.len() => Ok(&data[start..end]),
        _ => Err(Error::InvalidSegment {
            offset: offset as u64,
            reason: format!(
                "chunk header runs past end of buffer ({} bytes)",
                data.len()
            ),
        }),
    }
}

/// Read the big-endian data length of the chunk starting at `offset`
pub fn read_chunk_length(data: &[u8], offset: usize) -> Result<u32> {
    let field = header_field(data, offset, 0, LENGTH_FIELD_SIZE)?;
    Ok(BigEndian::read_u32(field))
}

/// Read the raw type tag of the chunk starting at `offset`
pub fn read_chunk_tag(data: &[u8], offset: usize) -> Result<ChunkTag> {
    let field = header_field(data, offset, LENGTH_FIELD_SIZE, TYPE_FIELD_SIZE)?;
    let mut tag = [0u8; 4];
    tag.copy_from_slice(field);
    Ok(tag)
}

/// Read and classify the type of the chunk starting at `offset`
pub fn read_chunk_type(data: &[u8], offset: usize) -> Result<ChunkType> {
    read_chunk_tag(data, offset).map(|tag| ChunkType::from_tag(&tag))
}

/// Total span of a chunk with `length` data bytes starting at `offset`
///
/// Fails if `length` exceeds [`MAX_CHUNK_LENGTH`] or the span would run past
/// the end of `data`.
pub(crate) fn chunk_span(data: &[u8], offset: usize, length: u32) -> Result<usize> {
    if length > MAX_CHUNK_LENGTH {
        return Err(Error::InvalidSegment {
            offset: offset as u64,
            reason: format!("chunk length too large: {}", length),
        });
    }
    let span = (length as usize).checked_add(MIN_CHUNK_SIZE);
    match span.and_then(|span| offset.checked_add(span)) {
        Some(end) if end <= data.len() => Ok(end - offset),
        _ => Err(Error::InvalidSegment {
            offset: offset as u64,
            reason: format!(
                "declared length {} runs past end of buffer ({} bytes)",
                length,
                data.len()
            ),
        }),
    }
}

/// A chunk located inside a buffer, borrowed from it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkRef<'a> {
    /// Offset of the length field
    pub offset: usize,
    /// Declared data length
    pub length: u32,
    pub tag: ChunkTag,
    pub kind: ChunkType,
    pub data: &'a [u8],
    /// CRC as stored in the file
    pub crc: u32,
}

impl ChunkRef<'_> {
    /// Full chunk size including length, type and CRC fields
    pub fn span(&self) -> usize {
        MIN_CHUNK_SIZE + self.length as usize
    }

    /// Recompute the CRC from the chunk's type and data
    pub fn computed_crc(&self) -> u32 {
        chunk_crc(&self.tag, self.data)
    }

    pub fn crc_matches(&self) -> bool {
        self.crc == self.computed_crc()
    }

    /// Tag as text, lossy for non-ASCII tags
    pub fn tag_str(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.tag)
    }
}

/// Lazy walk over the chunks of a PNG buffer
///
/// Yields an error once and then stops if a chunk is truncated.
#[derive(Debug, Clone)]
pub struct Chunks<'a> {
    data: &'a [u8],
    offset: usize,
    failed: bool,
}

impl<'a> Chunks<'a> {
    /// Walk `data` starting just past the signature
    ///
    /// The signature itself is not checked here.
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            offset: PAYLOAD_OFFSET,
            failed: false,
        }
    }

    fn read_at(&self, offset: usize) -> Result<ChunkRef<'a>> {
        let data = self.data;
        let length = read_chunk_length(data, offset)?;
        let tag = read_chunk_tag(data, offset)?;
        let span = chunk_span(data, offset, length)?;
        let data_start = offset + LENGTH_FIELD_SIZE + TYPE_FIELD_SIZE;
        let crc_start = offset + span - CRC_FIELD_SIZE;
        Ok(ChunkRef {
            offset,
            length,
            tag,
            kind: ChunkType::from_tag(&tag),
            data: &data[data_start..crc_start],
            crc: BigEndian::read_u32(&data[crc_start..crc_start + CRC_FIELD_SIZE]),
        })
    }
}

impl<'a> Iterator for Chunks<'a> {
    type Item = Result<ChunkRef<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.offset >= self.data.len() {
            return None;
        }
        match self.read_at(self.offset) {
            Ok(chunk) => {
                self.offset += chunk.span();
                Some(Ok(chunk))
            }
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}
