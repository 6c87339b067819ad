#![no_main]

use libfuzzer_sys::fuzz_target;
use png_chunk_io::{test_utils::minimal_png, ChunkType, PngImage, PNG_SIGNATURE};

fuzz_target!(|data: &[u8]| {
    // Prefix a real signature so the editor always gets past validation
    let mut input = PNG_SIGNATURE.to_vec();
    input.extend_from_slice(data);

    let selector = data.first().copied().unwrap_or(0) as usize;
    let kind = ChunkType::KNOWN[selector % ChunkType::KNOWN.len()];

    let mut png = PngImage::from_bytes(input).expect("signature prefixed");
    let _ = png.remove_chunk(kind);
    let _ = png.insert_chunk_after_header("gAMA", 4, 389);
    let _ = png.set_chunk("gAMA", 4, 45455);
    assert_eq!(&png.as_bytes()[..8], PNG_SIGNATURE);

    // Edits on a well-formed image followed by fuzz bytes
    let mut tail = minimal_png();
    tail.extend_from_slice(data);
    if let Ok(mut png) = PngImage::from_bytes(tail) {
        let _ = png.remove_chunk(ChunkType::ImageTrailer);
    }
});
