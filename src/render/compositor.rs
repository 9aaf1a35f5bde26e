//! The software compositor: surface ownership, the draw session and every pixel operation.

use std::io::{Read, Seek};
use std::path::Path;

use crate::assets::decode::{decode_image, decode_image_file, encode_png_file};
use crate::assets::image_data::ImageData;
use crate::foundation::core::{Pixel, PixelMode, Point, Rectangle, Size, Vec2};
use crate::foundation::error::SnowballResult;
use crate::render::blend::blend;
use crate::render::clip::CopySpans;
use crate::render::present::{FrameView, NullPresenter, Presenter};
use crate::render::session::DrawSession;
use crate::render::settings::GraphicsSettings;
use crate::render::store::SurfaceStore;
use crate::render::surface::Surface;

/// Immediate-mode software renderer.
///
/// Owns every surface it creates (including the back buffer, which is always the first one),
/// tracks the draw session and hands the finished back buffer to a [`Presenter`].
///
/// Whole-surface operations ([`clear`](Self::clear), [`blit`](Self::blit)) work at any time.
/// Pixel-combination draws require an open session started with
/// [`begin_draw`](Self::begin_draw) and write into its target.
#[derive(Debug)]
pub struct Compositor<P: Presenter = NullPresenter> {
    settings: GraphicsSettings,
    store: SurfaceStore,
    back_buffer: Surface,
    session: DrawSession,
    presenter: P,
}

impl Compositor<NullPresenter> {
    /// Build a compositor whose frames are discarded.
    pub fn headless(settings: GraphicsSettings) -> SnowballResult<Self> {
        Self::new(settings, NullPresenter)
    }
}

impl<P: Presenter> Compositor<P> {
    /// Validate `settings`, allocate the back buffer and optionally clear it.
    #[tracing::instrument(skip(presenter))]
    pub fn new(settings: GraphicsSettings, presenter: P) -> SnowballResult<Self> {
        settings.validate()?;

        let mut store = SurfaceStore::new();
        let Size { width, height } = settings.back_buffer;
        let handle = store.allocate(width as u32, height as u32, None)?;
        let back_buffer = store.surface(handle)?;

        let mut compositor = Self {
            settings,
            store,
            back_buffer,
            session: DrawSession::Idle,
            presenter,
        };
        if let Some(color) = compositor.settings.clear_color {
            compositor.clear(back_buffer, color)?;
        }
        Ok(compositor)
    }

    /// Settings the compositor was built with.
    pub fn settings(&self) -> &GraphicsSettings {
        &self.settings
    }

    /// Borrow the presenter.
    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    /// Mutably borrow the presenter.
    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    /// The surface handed to the presenter by [`present`](Self::present).
    pub fn back_buffer(&self) -> Surface {
        self.back_buffer
    }

    /// Number of surfaces owned by this compositor, back buffer included.
    pub fn surface_count(&self) -> usize {
        self.store.len()
    }

    /// Allocate a surface, zero-filled or from `pixels` (row-major, `width * height` long).
    pub fn create_surface(
        &mut self,
        width: u32,
        height: u32,
        pixels: Option<Vec<Pixel>>,
    ) -> SnowballResult<Surface> {
        let handle = self.store.allocate(width, height, pixels)?;
        self.store.surface(handle)
    }

    /// Allocate a surface holding decoded image pixels.
    pub fn create_surface_from_image(&mut self, image: ImageData) -> SnowballResult<Surface> {
        let (width, height) = (image.width(), image.height());
        self.create_surface(width, height, Some(image.into_pixels()))
    }

    /// Decode an image stream into a new surface.
    ///
    /// A failed decode allocates nothing.
    #[tracing::instrument(skip(self, reader))]
    pub fn load_surface<R: Read + Seek>(&mut self, reader: &mut R) -> SnowballResult<Surface> {
        let image = decode_image(reader, self.settings.png)?;
        self.create_surface_from_image(image)
    }

    /// Decode an image file into a new surface.
    pub fn load_surface_file(&mut self, path: impl AsRef<Path>) -> SnowballResult<Surface> {
        let image = decode_image_file(path.as_ref(), self.settings.png)?;
        self.create_surface_from_image(image)
    }

    /// Write `surface` to `path` as an 8-bit RGBA PNG.
    pub fn save_png(&self, surface: Surface, path: impl AsRef<Path>) -> SnowballResult<()> {
        let pixels = self.pixels(surface)?;
        encode_png_file(path.as_ref(), surface.width(), surface.height(), pixels)
    }

    /// Borrow the pixels of `surface`, row-major.
    pub fn pixels(&self, surface: Surface) -> SnowballResult<&[Pixel]> {
        self.store.check(surface)?;
        self.store.pixels(surface.handle())
    }

    /// Mutably borrow the pixels of `surface`, row-major.
    pub fn pixels_mut(&mut self, surface: Surface) -> SnowballResult<&mut [Pixel]> {
        self.store.check(surface)?;
        self.store.pixels_mut(surface.handle())
    }

    /// Overwrite every pixel of `surface` with `pixel`.
    pub fn clear(&mut self, surface: Surface, pixel: Pixel) -> SnowballResult<()> {
        self.pixels_mut(surface)?.fill(pixel);
        Ok(())
    }

    /// Copy `source_rect` of `source` (the whole source when `None`) to `dest` on
    /// `destination` without blending.
    ///
    /// Cells that fall outside either surface are skipped. `source` may equal
    /// `destination`; the source pixels are read as they were before the call.
    pub fn blit(
        &mut self,
        destination: Surface,
        source: Surface,
        dest: Point,
        source_rect: Option<Rectangle>,
    ) -> SnowballResult<()> {
        self.store.check(destination)?;
        self.store.check(source)?;

        let src_rect = source_rect.unwrap_or_else(|| source.bounds());
        let spans = CopySpans::new(src_rect, source.size(), dest, destination.size());
        if spans.is_empty() {
            return Ok(());
        }
        tracing::trace!(pixels = spans.pixel_count(), "blit");

        if source.handle() == destination.handle() {
            let pixels = self.store.pixels_mut(destination.handle())?;
            let snapshot = pixels.to_vec();
            for (s, d) in spans.rows() {
                pixels[d].copy_from_slice(&snapshot[s]);
            }
        } else {
            let (dst, src) = self.store.pair_mut(destination.handle(), source.handle())?;
            for (s, d) in spans.rows() {
                dst[d].copy_from_slice(&src[s]);
            }
        }
        Ok(())
    }

    /// Nothing is buffered by the software renderer; every call has already landed in its
    /// surface when it returns.
    pub fn flush(&mut self) {}

    /// Open a draw session targeting `target`.
    ///
    /// Fails with an invalid-operation error if a session is already open.
    pub fn begin_draw(&mut self, target: Surface) -> SnowballResult<()> {
        self.store.check(target)?;
        self.session.begin(target)
    }

    /// Close the current draw session.
    ///
    /// Fails with an invalid-operation error if no session is open.
    pub fn end_draw(&mut self) -> SnowballResult<()> {
        self.session.end().map(|_| ())
    }

    /// Return `true` while a draw session is open.
    pub fn is_drawing(&self) -> bool {
        self.session.target().is_some()
    }

    /// Target of the open draw session.
    pub fn draw_target(&self) -> Option<Surface> {
        self.session.target()
    }

    /// Current draw-session state.
    pub fn session(&self) -> DrawSession {
        self.session
    }

    /// Fill `rect` of the draw target with `pixel`.
    ///
    /// # Panics
    ///
    /// Panics if a non-empty `rect` reaches outside the draw target.
    pub fn draw_filled_rectangle(
        &mut self,
        pixel: Pixel,
        rect: Rectangle,
        mode: PixelMode,
    ) -> SnowballResult<()> {
        self.draw_filled_rectangle_with(|_| pixel, rect, mode)
    }

    /// Fill `rect` of the draw target with pixels produced by `generator`.
    ///
    /// `generator` receives rectangle-local coordinates and is called exactly once per cell,
    /// row by row.
    ///
    /// # Panics
    ///
    /// Panics if a non-empty `rect` reaches outside the draw target.
    pub fn draw_filled_rectangle_with<F>(
        &mut self,
        mut generator: F,
        rect: Rectangle,
        mode: PixelMode,
    ) -> SnowballResult<()>
    where
        F: FnMut(Point) -> Pixel,
    {
        let target = self.session.require_target()?;
        if rect.width <= 0 || rect.height <= 0 {
            return Ok(());
        }

        let (x0, y0) = (i64::from(rect.x), i64::from(rect.y));
        let (x1, y1) = (x0 + i64::from(rect.width), y0 + i64::from(rect.height));
        assert!(
            x0 >= 0
                && y0 >= 0
                && x1 <= i64::from(target.width())
                && y1 <= i64::from(target.height()),
            "rectangle {rect:?} reaches outside the {}x{} draw target",
            target.width(),
            target.height()
        );

        let stride = target.width() as usize;
        let pixels = self.store.pixels_mut(target.handle())?;
        for y in 0..rect.height {
            let row = (rect.y + y) as usize * stride + rect.x as usize;
            for x in 0..rect.width {
                let src = generator(Point::new(x, y));
                blend(&mut pixels[row + x as usize], src, mode);
            }
        }
        Ok(())
    }

    /// Blend `source_rect` of `source` (the whole source when `None`) into the draw target
    /// with its top-left corner at `dest`.
    ///
    /// Destination coordinates are `dest + offset` truncated toward zero. Cells that fall
    /// outside either surface are skipped. `source` may be the draw target itself.
    pub fn draw_sprite(
        &mut self,
        source: Surface,
        dest: Vec2,
        source_rect: Option<Rectangle>,
        mode: PixelMode,
    ) -> SnowballResult<()> {
        let target = self.session.require_target()?;
        self.store.check(source)?;
        let src_rect = source_rect.unwrap_or_else(|| source.bounds());

        if source.handle() == target.handle() {
            let pixels = self.store.pixels_mut(target.handle())?;
            let snapshot = pixels.to_vec();
            let sprite = Sprite {
                pixels: &snapshot,
                surface: source,
                rect: src_rect,
            };
            sprite.draw(pixels, target, dest, mode);
        } else {
            let (dst, src) = self.store.pair_mut(target.handle(), source.handle())?;
            let sprite = Sprite {
                pixels: src,
                surface: source,
                rect: src_rect,
            };
            sprite.draw(dst, target, dest, mode);
        }
        Ok(())
    }

    /// Draw a one-pixel line from `p1` to `p2` into the draw target.
    ///
    /// Endpoints are rounded half to even. Vertical lines run top to bottom; all others run
    /// left to right, stepping `y` by one whenever the accumulated slope error reaches 0.5.
    /// Pixels outside the target are skipped, and columns left of it are stepped over in one go.
    pub fn draw_line(
        &mut self,
        pixel: Pixel,
        p1: Vec2,
        p2: Vec2,
        mode: PixelMode,
    ) -> SnowballResult<()> {
        let target = self.session.require_target()?;
        let (w, h) = (target.width() as i32, target.height() as i32);
        let stride = target.width() as usize;
        let pixels = self.store.pixels_mut(target.handle())?;
        let mut plot = |x: i32, y: i32| {
            blend(&mut pixels[y as usize * stride + x as usize], pixel, mode);
        };

        if p1.x == p2.x {
            let (top, bottom) = if p1.y > p2.y { (p2, p1) } else { (p1, p2) };
            let x = round_coord(top.x);
            if x < 0 || x >= w {
                return Ok(());
            }
            let (y1, y2) = (round_coord(top.y).max(0), round_coord(bottom.y).min(h - 1));
            for y in y1..=y2 {
                plot(x, y);
            }
            return Ok(());
        }

        let (start, end) = if p1.x > p2.x { (p2, p1) } else { (p1, p2) };
        let delta = end - start;
        let delta_error = (delta.y / delta.x).abs();
        let y_step = if delta.y > 0.0 {
            1
        } else if delta.y < 0.0 {
            -1
        } else {
            0
        };

        let x_end = round_coord(end.x);
        if x_end < 0 {
            return Ok(());
        }
        let mut error = 0.0;
        let mut x = round_coord(start.x);
        let mut y = round_coord(start.y);
        if x < 0 {
            // Columns left of the target step `y` floor(n * slope + 0.5) times, at most once each.
            let n = -f64::from(x);
            let total = n * delta_error;
            let steps = n.min((total + 0.5).floor());
            error = total - steps;
            y = (f64::from(y) + steps * f64::from(y_step)) as i32;
            x = 0;
        }
        for x in x..=x_end {
            if x >= w {
                break;
            }
            if x >= 0 && y >= 0 && y < h {
                plot(x, y);
            }
            error += delta_error;
            if error >= 0.5 {
                y = y.saturating_add(y_step);
                error -= 1.0;
            }
        }
        Ok(())
    }

    /// Hand the back buffer to the presenter.
    #[tracing::instrument(skip(self))]
    pub fn present(&mut self) -> SnowballResult<()> {
        if let Some(target) = self.session.target() {
            tracing::warn!(?target, "presenting while a draw session is open");
        }
        let bb = self.back_buffer;
        let pixels = self.store.pixels(bb.handle())?;
        self.presenter.present(FrameView {
            width: bb.width(),
            height: bb.height(),
            pixels,
        })
    }
}

/// Source side of a sprite draw.
struct Sprite<'a> {
    pixels: &'a [Pixel],
    surface: Surface,
    rect: Rectangle,
}

impl Sprite<'_> {
    /// Per-pixel clipped blend. Rows and columns outside the source or the target are skipped
    /// while below range and end the scan once past it.
    fn draw(&self, dst: &mut [Pixel], target: Surface, dest: Vec2, mode: PixelMode) {
        let (sw, sh) = (i64::from(self.surface.width()), i64::from(self.surface.height()));
        let (dw, dh) = (i64::from(target.width()), i64::from(target.height()));

        for y in 0..self.rect.height {
            let sy = i64::from(self.rect.y) + i64::from(y);
            if sy < 0 {
                continue;
            }
            if sy >= sh {
                break;
            }
            let dy = i64::from((dest.y + f64::from(y)) as i32);
            if dy < 0 {
                continue;
            }
            if dy >= dh {
                break;
            }

            for x in 0..self.rect.width {
                let sx = i64::from(self.rect.x) + i64::from(x);
                if sx < 0 {
                    continue;
                }
                if sx >= sw {
                    break;
                }
                let dx = i64::from((dest.x + f64::from(x)) as i32);
                if dx < 0 {
                    continue;
                }
                if dx >= dw {
                    break;
                }

                let src = self.pixels[(sy * sw + sx) as usize];
                blend(&mut dst[(dy * dw + dx) as usize], src, mode);
            }
        }
    }
}

fn round_coord(v: f64) -> i32 {
    v.round_ties_even() as i32
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
