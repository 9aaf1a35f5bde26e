use crate::foundation::core::Pixel;
use crate::foundation::error::SnowballResult;

/// Borrowed view of a finished back buffer handed to a [`Presenter`].
#[derive(Clone, Copy, Debug)]
pub struct FrameView<'a> {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Row-major straight-alpha pixels, `width * height` long.
    pub pixels: &'a [Pixel],
}

impl FrameView<'_> {
    /// Copy the frame out as tightly packed RGBA8 bytes.
    pub fn to_rgba8(&self) -> PresentedFrame {
        PresentedFrame {
            width: self.width,
            height: self.height,
            data: Pixel::to_rgba8_bytes(self.pixels),
        }
    }
}

/// Owned RGBA8 copy of a presented frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PresentedFrame {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Row-major RGBA8 bytes.
    pub data: Vec<u8>,
}

/// Destination for finished frames (a window, a texture upload, a test capture).
///
/// `present` is called from the thread that owns the compositor, between draw calls. The view
/// must not be retained past the call.
pub trait Presenter: Send {
    /// Consume one frame.
    fn present(&mut self, frame: FrameView<'_>) -> SnowballResult<()>;
}

/// Presenter that discards every frame.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullPresenter;

impl Presenter for NullPresenter {
    fn present(&mut self, _frame: FrameView<'_>) -> SnowballResult<()> {
        Ok(())
    }
}

/// In-memory presenter for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemoryPresenter {
    frames: Vec<PresentedFrame>,
}

impl InMemoryPresenter {
    /// Create an empty presenter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames in presentation order.
    pub fn frames(&self) -> &[PresentedFrame] {
        &self.frames
    }

    /// Most recently presented frame.
    pub fn last(&self) -> Option<&PresentedFrame> {
        self.frames.last()
    }
}

impl Presenter for InMemoryPresenter {
    fn present(&mut self, frame: FrameView<'_>) -> SnowballResult<()> {
        self.frames.push(frame.to_rgba8());
        Ok(())
    }
}
