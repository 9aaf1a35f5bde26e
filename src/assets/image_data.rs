use crate::foundation::core::Pixel;
use crate::foundation::error::{SnowballError, SnowballResult};

/// Decoded raster image: `width * height` straight-alpha pixels, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageData {
    width: u32,
    height: u32,
    pixels: Vec<Pixel>,
}

impl ImageData {
    /// Wrap decoded pixels, rejecting buffers whose length disagrees with the dimensions.
    pub fn new(width: u32, height: u32, pixels: Vec<Pixel>) -> SnowballResult<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .ok_or_else(|| SnowballError::configuration("image dimensions overflow"))?;
        if pixels.len() != expected {
            return Err(SnowballError::configuration(format!(
                "expected length of pixels to be {expected} but was {}",
                pixels.len()
            )));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pixels in row-major order.
    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    /// Consume the image and return its pixel buffer.
    pub fn into_pixels(self) -> Vec<Pixel> {
        self.pixels
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/image_data.rs"]
mod tests;
