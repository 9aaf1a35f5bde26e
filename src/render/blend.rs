use crate::foundation::core::{Pixel, PixelMode};
use crate::foundation::math::lerp_channel_trunc;

/// Combine `src` into `dst` according to `mode`.
///
/// `AlphaBlend` computes `a = src.a / 255` in `f32` and writes
/// `trunc(a * src + (1 - a) * dst)` for each of R, G and B. Destination alpha is not written.
#[inline]
pub fn blend(dst: &mut Pixel, src: Pixel, mode: PixelMode) {
    match mode {
        PixelMode::Overwrite => *dst = src,
        PixelMode::AlphaBlend => {
            let a = f32::from(src.a) / 255.0;
            dst.r = lerp_channel_trunc(src.r, dst.r, a);
            dst.g = lerp_channel_trunc(src.g, dst.g, a);
            dst.b = lerp_channel_trunc(src.b, dst.b, a);
        }
    }
}

/// Value-returning form of [`blend`].
#[inline]
pub fn blended(mut dst: Pixel, src: Pixel, mode: PixelMode) -> Pixel {
    blend(&mut dst, src, mode);
    dst
}

#[cfg(test)]
#[path = "../../tests/unit/render/blend.rs"]
mod tests;
