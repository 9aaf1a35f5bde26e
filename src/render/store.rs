use crate::foundation::core::Pixel;
use crate::foundation::error::{SnowballError, SnowballResult};
use crate::render::surface::Surface;

/// Opaque index of a pixel buffer inside a [`SurfaceStore`].
///
/// Handles are assigned from 0 upward in allocation order and never reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SurfaceHandle(u32);

impl SurfaceHandle {
    /// Raw allocation index.
    pub fn index(self) -> u32 {
        self.0
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
/// Allocation counters for a [`SurfaceStore`].
pub struct SurfaceStoreStats {
    /// Number of live surfaces.
    pub surfaces: usize,
    /// Bytes held across all pixel buffers.
    pub bytes: usize,
}

#[derive(Debug)]
struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Pixel>,
}

/// Arena of pixel buffers addressed by [`SurfaceHandle`].
///
/// The store owns every buffer. Buffers are never freed individually; dropping the store
/// invalidates all of its handles.
#[derive(Debug, Default)]
pub struct SurfaceStore {
    buffers: Vec<PixelBuffer>,
    stats: SurfaceStoreStats,
}

impl SurfaceStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a `width * height` buffer and return its handle.
    ///
    /// `initial` must hold exactly `width * height` pixels; without it the buffer is
    /// zero-filled.
    pub fn allocate(
        &mut self,
        width: u32,
        height: u32,
        initial: Option<Vec<Pixel>>,
    ) -> SnowballResult<SurfaceHandle> {
        if i32::try_from(width).is_err() || i32::try_from(height).is_err() {
            return Err(SnowballError::configuration(format!(
                "surface dimensions {width}x{height} exceed i32 range"
            )));
        }
        let len = (width as usize)
            .checked_mul(height as usize)
            .ok_or_else(|| SnowballError::configuration("surface dimensions overflow"))?;

        let pixels = match initial {
            Some(pixels) if pixels.len() != len => {
                return Err(SnowballError::configuration(format!(
                    "expected length of pixels to be {len} but was {}",
                    pixels.len()
                )));
            }
            Some(pixels) => pixels,
            None => vec![Pixel::default(); len],
        };

        let index: u32 = self
            .buffers
            .len()
            .try_into()
            .map_err(|_| SnowballError::configuration("surface handle overflow"))?;
        self.buffers.push(PixelBuffer {
            width,
            height,
            pixels,
        });

        let bytes = len.saturating_mul(Pixel::SIZE_IN_BYTES);
        self.stats.surfaces = self.stats.surfaces.saturating_add(1);
        self.stats.bytes = self.stats.bytes.saturating_add(bytes);
        tracing::debug!(handle = index, width, height, bytes, "allocated surface");

        Ok(SurfaceHandle(index))
    }

    /// Number of allocated surfaces.
    pub fn len(&self) -> usize {
        self.buffers.len()
    }

    /// Return `true` when nothing has been allocated.
    pub fn is_empty(&self) -> bool {
        self.buffers.is_empty()
    }

    /// Allocation counters.
    pub fn stats(&self) -> SurfaceStoreStats {
        self.stats
    }

    /// Describe the buffer behind `handle` as a [`Surface`].
    pub fn surface(&self, handle: SurfaceHandle) -> SnowballResult<Surface> {
        let buf = self.buffer(handle)?;
        Ok(Surface::new(handle, buf.width, buf.height))
    }

    /// Borrow the pixels behind `handle`.
    pub fn pixels(&self, handle: SurfaceHandle) -> SnowballResult<&[Pixel]> {
        Ok(&self.buffer(handle)?.pixels)
    }

    /// Mutably borrow the pixels behind `handle`.
    pub fn pixels_mut(&mut self, handle: SurfaceHandle) -> SnowballResult<&mut [Pixel]> {
        let buf = self
            .buffers
            .get_mut(handle.0 as usize)
            .ok_or_else(|| unknown_handle(handle))?;
        Ok(&mut buf.pixels)
    }

    /// Borrow a destination buffer mutably and a different source buffer immutably.
    pub(crate) fn pair_mut(
        &mut self,
        dst: SurfaceHandle,
        src: SurfaceHandle,
    ) -> SnowballResult<(&mut [Pixel], &[Pixel])> {
        let (d, s) = (dst.0 as usize, src.0 as usize);
        if d == s {
            return Err(SnowballError::configuration(
                "source and destination must be different surfaces",
            ));
        }
        if d >= self.buffers.len() {
            return Err(unknown_handle(dst));
        }
        if s >= self.buffers.len() {
            return Err(unknown_handle(src));
        }

        if d < s {
            let (lo, hi) = self.buffers.split_at_mut(s);
            Ok((&mut lo[d].pixels, &hi[0].pixels))
        } else {
            let (lo, hi) = self.buffers.split_at_mut(d);
            Ok((&mut hi[0].pixels, &lo[s].pixels))
        }
    }

    /// Reject surfaces whose handle is unknown here or whose dimensions disagree with the
    /// stored buffer (a surface from another store).
    pub(crate) fn check(&self, surface: Surface) -> SnowballResult<()> {
        let buf = self.buffer(surface.handle())?;
        if buf.width != surface.width() || buf.height != surface.height() {
            return Err(SnowballError::configuration(format!(
                "surface {:?} is {}x{} but its buffer is {}x{}",
                surface.handle(),
                surface.width(),
                surface.height(),
                buf.width,
                buf.height
            )));
        }
        Ok(())
    }

    fn buffer(&self, handle: SurfaceHandle) -> SnowballResult<&PixelBuffer> {
        self.buffers
            .get(handle.0 as usize)
            .ok_or_else(|| unknown_handle(handle))
    }
}

fn unknown_handle(handle: SurfaceHandle) -> SnowballError {
    SnowballError::configuration(format!("unknown surface handle {}", handle.0))
}

#[cfg(test)]
#[path = "../../tests/unit/render/store.rs"]
mod tests;
