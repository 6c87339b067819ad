//! Chunk-level rewrites of a PNG byte buffer
//!
//! Each operation is a single linear pass: copy the signature, then walk the
//! input chunk by chunk and emit either the original bytes or replacement
//! bytes into a fresh output buffer. The input is never modified, so a failed
//! pass leaves the caller's buffer intact.

use crate::{
    chunk::{
        chunk_crc, chunk_span, read_chunk_length, read_chunk_tag, ChunkTag, ChunkType,
        PAYLOAD_OFFSET,
    },
    error::{Error, Result},
};
use byteorder::{BigEndian, WriteBytesExt};
use std::io::Write;

/// Data size of chunks written by [`insert_chunk_after_header`] and [`set_chunk`]
pub const VALUE_SIZE: u32 = 4;

fn check_value_length(length: u32) -> Result<()> {
    if length != VALUE_SIZE {
        return Err(Error::InvalidArgument(format!(
            "declared length {} does not match the {}-byte payload",
            length, VALUE_SIZE
        )));
    }
    Ok(())
}

fn check_payload_offset(data: &[u8]) -> Result<()> {
    if data.len() < PAYLOAD_OFFSET {
        return Err(Error::InvalidFormat(format!(
            "buffer too short for PNG signature: {} bytes",
            data.len()
        )));
    }
    Ok(())
}

/// Write a chunk whose payload is a single big-endian `u32`
fn write_value_chunk<W: Write>(
    writer: &mut W,
    tag: &ChunkTag,
    length: u32,
    value: u32,
) -> Result<()> {
    let payload = value.to_be_bytes();

    writer.write_u32::<BigEndian>(length)?;
    writer.write_all(tag)?;
    writer.write_all(&payload)?;
    writer.write_u32::<BigEndian>(chunk_crc(tag, &payload))?;

    Ok(())
}

/// Drop every chunk of type `kind`, copying all others unchanged
///
/// Removing an absent type is not an error; the output then equals the input.
pub fn remove_chunk(data: &[u8], kind: ChunkType) -> Result<Vec<u8>> {
    check_payload_offset(data)?;

    let mut output = Vec::with_capacity(data.len());
    output.extend_from_slice(&data[..PAYLOAD_OFFSET]);

    let mut offset = PAYLOAD_OFFSET;
    let mut removed = 0usize;

    while offset < data.len() {
        let length = read_chunk_length(data, offset)?;
        let tag = read_chunk_tag(data, offset)?;
        let span = chunk_span(data, offset, length)?;

        if ChunkType::from_tag(&tag) == kind {
            // Skip over the chunk being filtered
            log::trace!("dropping {} chunk at offset {}", kind, offset);
            removed += 1;
        } else {
            output.extend_from_slice(&data[offset..offset + span]);
        }

        offset += span;
    }

    if removed == 0 {
        log::warn!("remove {}: no matching chunk found", kind);
    }
    log::debug!(
        "remove {}: dropped {} chunk(s), {} -> {} bytes",
        kind,
        removed,
        data.len(),
        output.len()
    );

    Ok(output)
}

/// Splice a new 4-byte-payload chunk in directly after the `IHDR` chunk
///
/// The walk stops at the first non-header chunk: the new chunk is written
/// there and the remainder of the input is copied verbatim.
pub fn insert_chunk_after_header(
    data: &[u8],
    tag: &ChunkTag,
    length: u32,
    value: u32,
) -> Result<Vec<u8>> {
    check_payload_offset(data)?;
    check_value_length(length)?;

    let mut output = Vec::with_capacity(data.len() + 12 + VALUE_SIZE as usize);
    output.extend_from_slice(&data[..PAYLOAD_OFFSET]);

    let mut offset = PAYLOAD_OFFSET;

    while offset < data.len() {
        let length_field = read_chunk_length(data, offset)?;
        let kind = ChunkType::from_tag(&read_chunk_tag(data, offset)?);

        if kind == ChunkType::ImageHeader {
            let span = chunk_span(data, offset, length_field)?;
            output.extend_from_slice(&data[offset..offset + span]);
            offset += span;
            continue;
        }

        write_value_chunk(&mut output, tag, length, value)?;
        output.extend_from_slice(&data[offset..]);

        log::debug!(
            "insert {}: placed at offset {} before {} chunk, {} -> {} bytes",
            String::from_utf8_lossy(tag),
            offset,
            kind,
            data.len(),
            output.len()
        );
        return Ok(output);
    }

    Err(Error::InvalidArgument("no chunk after IHDR to insert before".into()))
}

/// Replace every chunk whose type matches `tag` with a 4-byte-payload chunk
///
/// The input cursor always advances by the original chunk's span, so the
/// replaced chunk may have had any data length. `tag` must name a known
/// chunk type.
pub fn set_chunk(data: &[u8], tag: &ChunkTag, length: u32, value: u32) -> Result<Vec<u8>> {
    check_payload_offset(data)?;
    check_value_length(length)?;

    let target = ChunkType::from_tag(tag);
    if target == ChunkType::Unknown {
        return Err(Error::InvalidArgument(format!(
            "cannot set chunk {:?}: not a known chunk type",
            String::from_utf8_lossy(tag)
        )));
    }

    let mut output = Vec::with_capacity(data.len());
    output.extend_from_slice(&data[..PAYLOAD_OFFSET]);

    let mut offset = PAYLOAD_OFFSET;
    let mut replaced = 0usize;

    while offset < data.len() {
        let old_length = read_chunk_length(data, offset)?;
        let kind = ChunkType::from_tag(&read_chunk_tag(data, offset)?);
        let span = chunk_span(data, offset, old_length)?;

        if kind == target {
            log::trace!(
                "replacing {} chunk at offset {} ({} data bytes)",
                kind,
                offset,
                old_length
            );
            write_value_chunk(&mut output, tag, length, value)?;
            replaced += 1;
        } else {
            output.extend_from_slice(&data[offset..offset + span]);
        }

        offset += span;
    }

    if replaced == 0 {
        log::warn!("set {}: no matching chunk found", target);
    }
    log::debug!(
        "set {}: replaced {} chunk(s), {} -> {} bytes",
        target,
        replaced,
        data.len(),
        output.len()
    );

    Ok(output)
}
