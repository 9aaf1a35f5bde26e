//! PNG decoding for the subset the renderer consumes.
//!
//! Supported: 8-bit grayscale (color type 0), RGB (2) and RGBA (6), non-interlaced, scanline
//! filters None (0) and Up (2). The `Sub`, `Average` and `Paeth` filters are rejected with a
//! "not implemented" decode error instead of producing corrupt pixels. Palette chunks are read
//! and ignored.
//!
//! Chunk CRCs are read and discarded unless [`PngDecodeOpts::verify_crc`] is set.

use std::fmt;
use std::io::{self, Read, Seek, SeekFrom};

use anyhow::Context;

use crate::assets::image_data::ImageData;
use crate::foundation::core::Pixel;
use crate::foundation::error::{SnowballError, SnowballResult};
use crate::foundation::math::Crc32;

/// The fixed 8-byte PNG signature.
pub const PNG_SIGNATURE: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

/// PNG decoder options.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PngDecodeOpts {
    /// Reject chunks whose trailing CRC-32 does not match their type and data.
    #[serde(default)]
    pub verify_crc: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
struct ChunkType([u8; 4]);

impl ChunkType {
    const IHDR: Self = Self(*b"IHDR");
    const PLTE: Self = Self(*b"PLTE");
    const IDAT: Self = Self(*b"IDAT");
    const IEND: Self = Self(*b"IEND");
}

impl fmt::Debug for ChunkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in &self.0 {
            let c = if b.is_ascii_graphic() { b as char } else { '?' };
            fmt::Write::write_char(f, c)?;
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ColorType {
    Grayscale,
    Rgb,
    Rgba,
}

impl ColorType {
    fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Grayscale),
            2 => Some(Self::Rgb),
            6 => Some(Self::Rgba),
            _ => None,
        }
    }

    fn bytes_per_pixel(self) -> usize {
        match self {
            Self::Grayscale => 1,
            Self::Rgb => 3,
            Self::Rgba => 4,
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct Header {
    width: u32,
    height: u32,
    bit_depth: u8,
    color_type: u8,
    compression_method: u8,
    filter_method: u8,
    interlace_method: u8,
}

impl Header {
    const LEN: usize = 13;

    fn parse(data: &[u8]) -> SnowballResult<Self> {
        if data.len() < Self::LEN {
            return Err(SnowballError::decode(format!(
                "IHDR chunk is {} bytes, expected {}",
                data.len(),
                Self::LEN
            )));
        }
        Ok(Self {
            width: read_u32_be(&data[0..4]),
            height: read_u32_be(&data[4..8]),
            bit_depth: data[8],
            color_type: data[9],
            compression_method: data[10],
            filter_method: data[11],
            interlace_method: data[12],
        })
    }

    /// Resolve the pixel layout, failing for anything this decoder cannot reconstruct.
    fn color(&self) -> SnowballResult<ColorType> {
        let color = ColorType::from_code(self.color_type).ok_or_else(|| {
            SnowballError::decode(format!(
                "PNG loading not implemented for color type {}",
                self.color_type
            ))
        })?;
        if self.bit_depth != 8 {
            return Err(SnowballError::decode(format!(
                "PNG loading not implemented for bit depth {}",
                self.bit_depth
            )));
        }
        if self.interlace_method != 0 {
            return Err(SnowballError::decode(format!(
                "PNG loading not implemented for interlace method {}",
                self.interlace_method
            )));
        }
        Ok(color)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ScanlineFilter {
    None,
    Sub,
    Up,
    Average,
    Paeth,
}

impl ScanlineFilter {
    fn from_byte(b: u8) -> SnowballResult<Self> {
        match b {
            0 => Ok(Self::None),
            1 => Ok(Self::Sub),
            2 => Ok(Self::Up),
            3 => Ok(Self::Average),
            4 => Ok(Self::Paeth),
            other => Err(SnowballError::decode(format!(
                "unknown scanline filter type {other}"
            ))),
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Sub => "Sub",
            Self::Up => "Up",
            Self::Average => "Average",
            Self::Paeth => "Paeth",
        }
    }
}

fn read_u32_be(b: &[u8]) -> u32 {
    u32::from_be_bytes([b[0], b[1], b[2], b[3]])
}

fn read_exact_or_truncated<R: Read>(
    reader: &mut R,
    buf: &mut [u8],
    what: &str,
) -> SnowballResult<()> {
    match reader.read_exact(buf) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
            Err(SnowballError::decode(format!("truncated {what}")))
        }
        Err(e) => Err(anyhow::Error::new(e).context(format!("read {what}")).into()),
    }
}

/// Check for the PNG signature without consuming it.
///
/// The stream position is restored before returning. Read failures report `false`.
pub fn is_png<R: Read + Seek>(reader: &mut R) -> bool {
    let Ok(start) = reader.stream_position() else {
        return false;
    };
    let mut sig = [0u8; PNG_SIGNATURE.len()];
    let matched = reader.read_exact(&mut sig).is_ok() && sig == PNG_SIGNATURE;
    reader.seek(SeekFrom::Start(start)).is_ok() && matched
}

/// Decode a PNG stream into straight-alpha pixels.
///
/// The reader must be positioned at the PNG signature. RGB images get the default pixel alpha
/// (0); grayscale images are replicated into RGB with alpha 255.
#[tracing::instrument(skip(reader))]
pub fn decode_png<R: Read + Seek>(reader: &mut R, opts: PngDecodeOpts) -> SnowballResult<ImageData> {
    if !is_png(reader) {
        return Err(SnowballError::unsupported_format("PNG header incorrect"));
    }
    reader
        .seek(SeekFrom::Current(PNG_SIGNATURE.len() as i64))
        .context("skip png signature")?;

    let mut header: Option<Header> = None;
    let mut idat: Option<Vec<u8>> = None;

    loop {
        let mut chunk_header = [0u8; 8];
        read_exact_or_truncated(reader, &mut chunk_header, "chunk header")?;
        let len = read_u32_be(&chunk_header[0..4]);
        let ty = ChunkType([
            chunk_header[4],
            chunk_header[5],
            chunk_header[6],
            chunk_header[7],
        ]);
        tracing::trace!(chunk = ?ty, len, "png chunk");

        if ty == ChunkType::IEND {
            break;
        }

        let mut data = Vec::new();
        let read = reader
            .by_ref()
            .take(u64::from(len))
            .read_to_end(&mut data)
            .with_context(|| format!("read {ty:?} chunk data"))?;
        if read != len as usize {
            return Err(SnowballError::decode(format!(
                "truncated {ty:?} chunk: expected {len} bytes, got {read}"
            )));
        }

        let mut crc_bytes = [0u8; 4];
        read_exact_or_truncated(reader, &mut crc_bytes, "chunk crc")?;
        if opts.verify_crc {
            let mut crc = Crc32::new();
            crc.write_bytes(&ty.0);
            crc.write_bytes(&data);
            let expected = read_u32_be(&crc_bytes);
            let actual = crc.finish();
            if expected != actual {
                return Err(SnowballError::decode(format!(
                    "crc mismatch in {ty:?} chunk: stored {expected:#010x}, computed {actual:#010x}"
                )));
            }
        }

        match ty {
            ChunkType::IHDR => {
                if header.is_some() {
                    return Err(SnowballError::decode("duplicate IHDR chunk"));
                }
                header = Some(Header::parse(&data)?);
            }
            ChunkType::PLTE => {}
            ChunkType::IDAT => {
                if header.is_none() {
                    return Err(SnowballError::decode("IDAT chunk before IHDR"));
                }
                match idat.as_mut() {
                    Some(buf) => buf.extend_from_slice(&data),
                    None => idat = Some(data),
                }
            }
            _ => {}
        }
    }

    let header = header.ok_or_else(|| SnowballError::decode("no IHDR chunk found"))?;
    let color = header.color()?;
    let idat = idat.ok_or_else(|| SnowballError::decode("no IDAT chunk found"))?;

    let layout = ScanlineLayout::new(header.width, header.height, color.bytes_per_pixel())?;
    let inflated = inflate_idat(&idat, layout.filtered_len)?;
    let raw = unfilter_scanlines(&inflated, layout)?;
    let pixels = raw_to_pixels(&raw, color);

    tracing::debug!(
        width = header.width,
        height = header.height,
        color = ?color,
        compression = header.compression_method,
        filter = header.filter_method,
        "decoded png"
    );

    ImageData::new(header.width, header.height, pixels)
}

/// Byte geometry of the filtered scanlines for one image.
#[derive(Clone, Copy, Debug)]
struct ScanlineLayout {
    height: usize,
    /// Unfiltered bytes per row (`width * bpp`).
    stride: usize,
    /// `height * (1 + stride)`: the inflated size IHDR promises.
    filtered_len: usize,
}

impl ScanlineLayout {
    fn new(width: u32, height: u32, bpp: usize) -> SnowballResult<Self> {
        let overflow = || SnowballError::decode("image dimensions overflow");
        let stride = (width as usize).checked_mul(bpp).ok_or_else(overflow)?;
        let filtered_len = stride
            .checked_add(1)
            .and_then(|row| row.checked_mul(height as usize))
            .ok_or_else(overflow)?;
        Ok(Self {
            height: height as usize,
            stride,
            filtered_len,
        })
    }
}

/// Skip the two-byte zlib header and inflate the raw DEFLATE stream behind it.
///
/// Output is capped at `limit` bytes; anything the stream holds past that is dropped.
fn inflate_idat(idat: &[u8], limit: usize) -> SnowballResult<Vec<u8>> {
    let deflate = idat
        .get(2..)
        .ok_or_else(|| SnowballError::decode("image data shorter than the zlib header"))?;
    match miniz_oxide::inflate::decompress_to_vec_with_limit(deflate, limit.max(1)) {
        Ok(out) => Ok(out),
        Err(e) if e.status == miniz_oxide::inflate::TINFLStatus::HasMoreOutput => {
            tracing::debug!(limit, "image data longer than the scanlines; trailing bytes dropped");
            Ok(e.output)
        }
        Err(e) => Err(SnowballError::decode(format!(
            "failed to inflate image data: {:?}",
            e.status
        ))),
    }
}

/// Reverse per-scanline filtering. Returns `height` rows of `stride` bytes.
fn unfilter_scanlines(inflated: &[u8], layout: ScanlineLayout) -> SnowballResult<Vec<u8>> {
    let ScanlineLayout {
        height,
        stride,
        filtered_len: expected,
    } = layout;
    let row_len = stride + 1;
    if inflated.len() < expected {
        return Err(SnowballError::decode(format!(
            "truncated image data: expected {expected} bytes, got {}",
            inflated.len()
        )));
    }

    let mut raw = vec![0u8; stride * height];
    let mut prev = vec![0u8; stride];

    for (y, (row, out)) in inflated[..expected]
        .chunks_exact(row_len)
        .zip(raw.chunks_exact_mut(stride.max(1)))
        .enumerate()
    {
        let filter = ScanlineFilter::from_byte(row[0])?;
        let filtered = &row[1..];
        match filter {
            ScanlineFilter::None => out.copy_from_slice(filtered),
            ScanlineFilter::Up => {
                for ((o, &f), &p) in out.iter_mut().zip(filtered).zip(&prev) {
                    *o = f.wrapping_add(p);
                }
            }
            ScanlineFilter::Sub | ScanlineFilter::Average | ScanlineFilter::Paeth => {
                return Err(SnowballError::decode(format!(
                    "{} filter algorithm in PNG is not implemented (scanline {y})",
                    filter.name()
                )));
            }
        }
        prev.copy_from_slice(out);
    }

    Ok(raw)
}

fn raw_to_pixels(raw: &[u8], color: ColorType) -> Vec<Pixel> {
    match color {
        ColorType::Rgba => raw
            .chunks_exact(4)
            .map(|c| Pixel::new(c[0], c[1], c[2], c[3]))
            .collect(),
        ColorType::Rgb => raw
            .chunks_exact(3)
            .map(|c| Pixel {
                r: c[0],
                g: c[1],
                b: c[2],
                ..Pixel::default()
            })
            .collect(),
        ColorType::Grayscale => raw.iter().map(|&v| Pixel::new(v, v, v, 255)).collect(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/png.rs"]
mod tests;
