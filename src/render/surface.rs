use crate::foundation::core::{Rectangle, Size};
use crate::render::store::SurfaceHandle;

/// A drawable pixel buffer owned by a [`Compositor`](crate::Compositor).
///
/// `Surface` is a cheap copyable description (handle plus dimensions); the pixels stay in the
/// compositor's store. Dimensions always fit in `i32`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Surface {
    handle: SurfaceHandle,
    width: u32,
    height: u32,
}

impl Surface {
    pub(crate) fn new(handle: SurfaceHandle, width: u32, height: u32) -> Self {
        Self {
            handle,
            width,
            height,
        }
    }

    /// Store handle of the backing buffer.
    pub fn handle(&self) -> SurfaceHandle {
        self.handle
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Dimensions as a signed [`Size`].
    pub fn size(&self) -> Size {
        Size::new(self.width as i32, self.height as i32)
    }

    /// `Rectangle::new(0, 0, width, height)`.
    pub fn bounds(&self) -> Rectangle {
        Rectangle::from_size(self.size())
    }

    /// Number of pixels in the buffer.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}
