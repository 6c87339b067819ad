#![no_main]

use libfuzzer_sys::fuzz_target;
use png_chunk_io::{ChunkType, PngImage};

fuzz_target!(|data: &[u8]| {
    // Loading and inspecting arbitrary bytes must NEVER panic, only return errors
    if let Ok(png) = PngImage::from_bytes(data.to_vec()) {
        for chunk in png.chunks() {
            match chunk {
                Ok(chunk) => {
                    let _ = chunk.crc_matches();
                    let _ = chunk.tag_str();
                }
                Err(_) => break,
            }
        }

        let _ = png.verify();
        let _ = png.count(ChunkType::Unknown);
    }
});
