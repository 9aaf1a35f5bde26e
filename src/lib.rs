//! Snowball is a small immediate-mode software rendering core.
//!
//! Pixels live in plain memory and every operation runs synchronously on the calling thread.
//! The crate provides:
//!
//! - [`Compositor`]: owns surfaces (including the back buffer), performs clears, clipped blits,
//!   filled rectangles, lines and sprite draws, and hands finished frames to a [`Presenter`].
//! - A PNG decoder ([`decode_png`], [`decode_image`]) for the 8-bit, non-interlaced subset
//!   games ship their sprites in.
//! - [`GraphicsSettings`]: serde-backed construction settings.
//!
//! # Drawing model
//!
//! Whole-surface operations ([`Compositor::clear`], [`Compositor::blit`]) work at any time.
//! Pixel-combination draws (fills, lines, sprites) need an open draw session:
//!
//! ```no_run
//! use snowball::{Compositor, GraphicsSettings, Pixel, PixelMode, Rectangle};
//!
//! # fn main() -> snowball::SnowballResult<()> {
//! let mut gfx = Compositor::headless(GraphicsSettings::default())?;
//! let bb = gfx.back_buffer();
//! gfx.clear(bb, Pixel::BLACK)?;
//! gfx.begin_draw(bb)?;
//! gfx.draw_filled_rectangle(Pixel::WHITE, Rectangle::new(8, 8, 16, 16), PixelMode::Overwrite)?;
//! gfx.end_draw()?;
//! gfx.present()?;
//! # Ok(())
//! # }
//! ```
//!
//! Pixels use straight (not premultiplied) alpha. [`PixelMode::AlphaBlend`] blends RGB by
//! source alpha and never writes destination alpha.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod foundation;
mod render;

pub use assets::decode::{decode_image, decode_image_file, encode_png_file};
pub use assets::image_data::ImageData;
pub use assets::png::{PNG_SIGNATURE, PngDecodeOpts, decode_png, is_png};
pub use foundation::core::{Pixel, PixelMode, Point, Rectangle, Size, Vec2};
pub use foundation::error::{SnowballError, SnowballResult};
pub use render::blend::{blend, blended};
pub use render::compositor::Compositor;
pub use render::present::{
    FrameView, InMemoryPresenter, NullPresenter, PresentedFrame, Presenter,
};
pub use render::session::DrawSession;
pub use render::settings::GraphicsSettings;
pub use render::store::{SurfaceHandle, SurfaceStore, SurfaceStoreStats};
pub use render::surface::Surface;
