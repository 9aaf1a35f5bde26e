use std::io::Cursor;

use super::*;

fn temp_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!(
        "snowball_{name}_{}_{}.png",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

#[test]
fn decode_image_matches_image_crate_encoder() {
    let (w, h) = (3u32, 2u32);
    let src: Vec<u8> = (0..(w * h * 4)).map(|v| (v * 11 % 256) as u8).collect();

    let mut buf = Vec::new();
    image::codecs::png::PngEncoder::new_with_quality(
        &mut buf,
        image::codecs::png::CompressionType::Best,
        image::codecs::png::FilterType::NoFilter,
    )
    .write_image(&src, w, h, image::ExtendedColorType::Rgba8)
    .unwrap();

    let img = decode_image(&mut Cursor::new(&buf), PngDecodeOpts { verify_crc: true }).unwrap();
    assert_eq!(img.width(), w);
    assert_eq!(img.height(), h);
    assert_eq!(Pixel::to_rgba8_bytes(img.pixels()), src);
}

#[test]
fn decode_image_rejects_unknown_formats() {
    let err = decode_image(&mut Cursor::new(b"GIF89a....".to_vec()), PngDecodeOpts::default())
        .unwrap_err();
    match err {
        SnowballError::UnsupportedFormat(msg) => assert!(msg.contains("unknown image format")),
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn encode_then_decode_file() {
    let path = temp_path("encode_then_decode");
    let pixels = vec![
        Pixel::new(255, 0, 0, 255),
        Pixel::new(0, 255, 0, 128),
        Pixel::new(0, 0, 255, 0),
        Pixel::new(9, 8, 7, 6),
    ];
    encode_png_file(&path, 2, 2, &pixels).unwrap();

    let img = decode_image_file(&path, PngDecodeOpts { verify_crc: true }).unwrap();
    assert_eq!(img.pixels(), pixels.as_slice());

    std::fs::remove_file(&path).ok();
}

#[test]
fn decode_missing_file_reports_path() {
    let path = temp_path("does_not_exist");
    let err = decode_image_file(&path, PngDecodeOpts::default()).unwrap_err();
    assert!(matches!(err, SnowballError::Other(_)));
    assert!(err.to_string().contains("open image file"));
}
