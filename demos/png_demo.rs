//! PNG chunk editing demonstration
//!
//! This example shows the save workflow of a drawing application:
//! - Loading a PNG (from a file, or a built-in synthetic image)
//! - Listing its chunks and checking their CRCs
//! - Replacing the sRGB chunk with an explicit gAMA chunk
//! - Saving the result atomically
//!
//! Usage: cargo run --example png_demo -- [input.png] [output.png]
//!
//! Set RUST_LOG=debug to see what each edit pass does.

use png_chunk_io::{test_utils::minimal_png, ChunkEdit, ChunkType, PngImage};

fn print_chunks(png: &PngImage) -> png_chunk_io::Result<()> {
    for chunk in png.chunks() {
        let chunk = chunk?;
        println!(
            "   {:>6}  {:<4}  {:>8} bytes  crc {:08x} {}",
            chunk.offset,
            chunk.tag_str(),
            chunk.length,
            chunk.crc,
            if chunk.crc_matches() { "ok" } else { "BAD" }
        );
    }
    Ok(())
}

fn main() -> png_chunk_io::Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let input = args.next();
    let output = args.next().unwrap_or_else(|| "/tmp/png_demo_output.png".to_string());

    println!("=== PNG Chunk Demo ===\n");

    // 1. Load
    let mut png = match &input {
        Some(path) => {
            println!("1. Loading {}...", path);
            PngImage::open(path)?
        }
        None => {
            println!("1. Using built-in 1x1 image...");
            PngImage::from_bytes(minimal_png())?
        }
    };
    println!("   ✓ {} bytes\n", png.len());

    // 2. Inspect
    println!("2. Chunks:");
    print_chunks(&png)?;
    png.verify()?;
    println!("   ✓ All CRCs valid\n");

    // 3. Edit
    println!("3. Replacing sRGB with gAMA...");
    png.apply(&ChunkEdit::remove(ChunkType::RgbColorSpace))?;
    if png.count(ChunkType::Gamma)? > 0 {
        png.set_chunk("gAMA", 4, 389)?;
        println!("   ✓ Updated existing gAMA");
    } else {
        png.insert_chunk_after_header("gAMA", 4, 389)?;
        println!("   ✓ Inserted gAMA after IHDR");
    }
    print_chunks(&png)?;

    // 4. Save
    println!("\n4. Saving to {}...", output);
    png.save_atomic(&output)?;

    let reloaded = PngImage::open(&output)?;
    reloaded.verify()?;
    println!("   ✓ Reloaded {} bytes, CRCs valid", reloaded.len());

    println!("\n=== PNG Chunk Notes ===");
    println!("• Each chunk has: length(4) + type(4) + data + CRC(4)");
    println!("• CRC-32 covers type + data, not the length field");
    println!("• Unknown chunks are copied through unchanged");

    Ok(())
}
