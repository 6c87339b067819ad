// Integration tests for chunk editing on synthetic buffers and fixture files

use png_chunk_io::{test_utils::*, ChunkEdit, ChunkType, Error, PngImage, PNG_SIGNATURE};
use tempfile::TempDir;

fn kinds(png: &PngImage) -> Vec<ChunkType> {
    png.chunks().map(|c| c.unwrap().kind).collect()
}

fn tags(png: &PngImage) -> Vec<String> {
    png.chunks()
        .map(|c| c.unwrap().tag_str().into_owned())
        .collect()
}

#[test]
fn test_end_to_end_gamma_workflow() {
    let input = minimal_png();
    let mut png = PngImage::from_bytes(input.clone()).unwrap();

    png.insert_chunk_after_header("gAMA", 4, 389).unwrap();
    png.remove_chunk(ChunkType::RgbColorSpace).unwrap();

    let expected = PngBuilder::new()
        .chunk(b"IHDR", &IHDR_1X1_RGB)
        .chunk(b"gAMA", &389u32.to_be_bytes())
        .chunk(b"IDAT", &[0x00])
        .chunk(b"IEND", &[])
        .build();
    assert_eq!(png.as_bytes(), &expected[..]);

    // New chunk: length 4, "gAMA", 0x00000185, CRC
    let gama = &png.as_bytes()[33..49];
    assert_eq!(&gama[..12], b"\0\0\0\x04gAMA\0\0\x01\x85");
    assert_eq!(&gama[12..], &0x0FEC26A3_u32.to_be_bytes());
    assert_eq!(
        u32::from_be_bytes([gama[12], gama[13], gama[14], gama[15]]),
        crc32fast::hash(b"gAMA\x00\x00\x01\x85")
    );

    png.verify().unwrap();
}

#[test]
fn test_insertion_shifts_remainder_by_sixteen() {
    let input = minimal_png();
    let mut png = PngImage::from_bytes(input.clone()).unwrap();
    png.insert_chunk_after_header("gAMA", 4, 389).unwrap();

    let out = png.as_bytes();
    assert_eq!(out.len(), input.len() + 16);
    assert_eq!(&out[..33], &input[..33]);
    assert_eq!(&out[49..], &input[33..]);
    assert_eq!(
        kinds(&png),
        vec![
            ChunkType::ImageHeader,
            ChunkType::Gamma,
            ChunkType::ImageData,
            ChunkType::ImageTrailer
        ]
    );
}

#[test]
fn test_remove_preserves_other_chunks() {
    let input = fixture_bytes(SRGB_2X2).unwrap();
    let original = PngImage::from_bytes(input).unwrap();

    let mut png = original.clone();
    png.remove_chunk(ChunkType::RgbColorSpace).unwrap();
    assert_eq!(png.count(ChunkType::RgbColorSpace).unwrap(), 0);

    let kept: Vec<Vec<u8>> = original
        .chunks()
        .map(|c| c.unwrap())
        .filter(|c| c.kind != ChunkType::RgbColorSpace)
        .map(|c| original.as_bytes()[c.offset..c.offset + c.span()].to_vec())
        .collect();
    let after: Vec<Vec<u8>> = png
        .chunks()
        .map(|c| c.unwrap())
        .map(|c| png.as_bytes()[c.offset..c.offset + c.span()].to_vec())
        .collect();
    assert_eq!(kept, after);
}

#[test]
fn test_remove_is_idempotent() {
    let mut once = PngImage::from_bytes(fixture_bytes(SRGB_2X2).unwrap()).unwrap();
    once.remove_chunk(ChunkType::Gamma).unwrap();

    let mut twice = once.clone();
    twice.remove_chunk(ChunkType::Gamma).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn test_unknown_chunk_is_transparent() {
    let original = PngImage::from_bytes(fixture_bytes(SRGB_2X2).unwrap()).unwrap();
    let private = original
        .chunks()
        .map(|c| c.unwrap())
        .find(|c| &c.tag == b"prVt")
        .map(|c| original.as_bytes()[c.offset..c.offset + c.span()].to_vec())
        .unwrap();

    for kind in ChunkType::KNOWN {
        let mut png = original.clone();
        png.remove_chunk(kind).unwrap();
        let found = png
            .chunks()
            .map(|c| c.unwrap())
            .find(|c| &c.tag == b"prVt")
            .map(|c| png.as_bytes()[c.offset..c.offset + c.span()].to_vec());
        assert_eq!(found.as_deref(), Some(&private[..]), "removing {}", kind);
    }

    let mut png = original.clone();
    png.set_chunk("gAMA", 4, 389).unwrap();
    assert!(tags(&png).contains(&"prVt".to_string()));

    // Targeting Unknown drops only unrecognized chunks
    let mut png = original.clone();
    png.remove_chunk(ChunkType::Unknown).unwrap();
    assert_eq!(
        tags(&png),
        vec!["IHDR", "sRGB", "gAMA", "pHYs", "IDAT", "tEXt", "IEND"]
    );
}

#[test]
fn test_set_existing_gamma() {
    let mut png = PngImage::from_bytes(fixture_bytes(SRGB_2X2).unwrap()).unwrap();
    let len_before = png.len();

    png.set_chunk("gAMA", 4, 389).unwrap();
    assert_eq!(png.len(), len_before);

    let gama = png
        .chunks()
        .map(|c| c.unwrap())
        .find(|c| c.kind == ChunkType::Gamma)
        .unwrap();
    assert_eq!(gama.data, &389u32.to_be_bytes());
    assert!(gama.crc_matches());
    png.verify().unwrap();
}

#[test]
fn test_fixture_save_and_reload() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("edited.png");

    let mut png = PngImage::open(fixture_path(SRGB_2X2)).unwrap();
    png.verify().unwrap();
    png.apply(&ChunkEdit::remove(ChunkType::RgbColorSpace)).unwrap();
    png.apply(&ChunkEdit::remove(ChunkType::Gamma)).unwrap();
    let gamma = ChunkEdit::insert_after_header("gAMA", 389).unwrap();
    png.apply(&gamma).unwrap();
    png.save(&output).unwrap();

    let reloaded = PngImage::open(&output).unwrap();
    reloaded.verify().unwrap();
    assert_eq!(reloaded, png);
    assert_eq!(
        tags(&reloaded),
        vec!["IHDR", "gAMA", "pHYs", "prVt", "IDAT", "tEXt", "IEND"]
    );
}

#[test]
fn test_save_atomic_replaces_file() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("image.png");
    std::fs::write(&output, minimal_png()).unwrap();

    let mut png = PngImage::open(&output).unwrap();
    png.insert_chunk_after_header("gAMA", 4, 389).unwrap();
    png.save_atomic(&output).unwrap();

    assert_eq!(PngImage::open(&output).unwrap(), png);
}

#[test]
fn test_open_rejects_non_png_before_scanning() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("not.png");
    // JPEG SOI followed by bytes that would be a garbage chunk header
    std::fs::write(&path, [0xFF, 0xD8, 0xFF, 0xE0, 0, 0, 0, 0, 0xFF, 0xFF]).unwrap();

    assert!(matches!(PngImage::open(&path), Err(Error::InvalidFormat(_))));
}

#[test]
fn test_open_missing_file() {
    assert!(matches!(
        PngImage::open("/nonexistent/image.png"),
        Err(Error::Io(_))
    ));
}

#[test]
fn test_from_encoder() {
    let encoded = minimal_png();
    let png = PngImage::from_encoder(Some(&encoded)).unwrap();
    assert_eq!(png.as_bytes(), &encoded[..]);

    assert!(matches!(
        PngImage::from_encoder::<Vec<u8>>(None),
        Err(Error::InvalidArgument(_))
    ));

    let not_png = b"GIF89a\0\0".to_vec();
    assert!(matches!(
        PngImage::from_encoder(Some(&not_png)),
        Err(Error::InvalidFormat(_))
    ));
}

#[test]
fn test_signature_is_preserved() {
    let mut png = PngImage::from_bytes(minimal_png()).unwrap();
    png.insert_chunk_after_header("sBIT", 4, 0x0808_0808).unwrap();
    png.set_chunk("sBIT", 4, 0x0505_0505).unwrap();
    png.remove_chunk(ChunkType::ImageData).unwrap();
    assert_eq!(&png.as_bytes()[..8], PNG_SIGNATURE);
}
