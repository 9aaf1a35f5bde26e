use super::*;

#[test]
fn overwrite_replaces_all_channels() {
    let mut dst = Pixel::new(1, 2, 3, 4);
    blend(&mut dst, Pixel::new(10, 20, 30, 0), PixelMode::Overwrite);
    assert_eq!(dst, Pixel::new(10, 20, 30, 0));
}

#[test]
fn opaque_source_wins_and_keeps_dest_alpha() {
    let dst = Pixel::new(7, 8, 9, 42);
    let out = blended(dst, Pixel::new(200, 100, 50, 255), PixelMode::AlphaBlend);
    assert_eq!(out, Pixel::new(200, 100, 50, 42));
}

#[test]
fn transparent_source_leaves_dest_unchanged() {
    let dst = Pixel::new(7, 8, 9, 42);
    let out = blended(dst, Pixel::new(200, 100, 50, 0), PixelMode::AlphaBlend);
    assert_eq!(out, dst);
}

#[test]
fn half_alpha_truncates() {
    // 255 * (128 / 255) in f32 may land just below 128.
    let out = blended(Pixel::BLACK, Pixel::new(255, 0, 0, 128), PixelMode::AlphaBlend);
    assert!(out.r == 127 || out.r == 128);
    assert_eq!(out.g, 0);
    assert_eq!(out.b, 0);
    assert_eq!(out.a, 255);
}

#[test]
fn blend_never_writes_alpha() {
    for a in [0u8, 1, 64, 128, 254, 255] {
        let out = blended(
            Pixel::new(0, 0, 0, 17),
            Pixel::new(255, 255, 255, a),
            PixelMode::AlphaBlend,
        );
        assert_eq!(out.a, 17);
    }
}
