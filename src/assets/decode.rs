use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Seek, Write};
use std::path::Path;

use anyhow::Context;
use image::ImageEncoder;

use crate::{
    assets::image_data::ImageData,
    assets::png::{PngDecodeOpts, decode_png, is_png},
    foundation::core::Pixel,
    foundation::error::{SnowballError, SnowballResult},
};

/// Sniff the image format and decode. PNG is the only recognized format.
pub fn decode_image<R: Read + Seek>(
    reader: &mut R,
    opts: PngDecodeOpts,
) -> SnowballResult<ImageData> {
    if is_png(reader) {
        return decode_png(reader, opts);
    }
    Err(SnowballError::unsupported_format("unknown image format"))
}

/// Open `path` and decode it with [`decode_image`].
#[tracing::instrument(skip_all, fields(path = %path.display()))]
pub fn decode_image_file(path: &Path, opts: PngDecodeOpts) -> SnowballResult<ImageData> {
    let file =
        File::open(path).with_context(|| format!("open image file {}", path.display()))?;
    decode_image(&mut BufReader::new(file), opts)
}

/// Write straight-alpha pixels to `path` as an unfiltered 8-bit RGBA PNG.
///
/// Scanlines are written with filter type None so the result reads back through
/// [`decode_image`].
pub fn encode_png_file(
    path: &Path,
    width: u32,
    height: u32,
    pixels: &[Pixel],
) -> SnowballResult<()> {
    let file =
        File::create(path).with_context(|| format!("create png file {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    let encoder = image::codecs::png::PngEncoder::new_with_quality(
        &mut writer,
        image::codecs::png::CompressionType::Default,
        image::codecs::png::FilterType::NoFilter,
    );
    encoder
        .write_image(
            &Pixel::to_rgba8_bytes(pixels),
            width,
            height,
            image::ExtendedColorType::Rgba8,
        )
        .with_context(|| format!("encode png {}", path.display()))?;
    writer
        .flush()
        .with_context(|| format!("flush png {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
