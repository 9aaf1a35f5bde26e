pub use kurbo::Vec2;

/// Straight-alpha RGBA8 color. Channels are independent; nothing is premultiplied.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(from = "[u8; 4]", into = "[u8; 4]")]
#[repr(C)]
pub struct Pixel {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Pixel {
    /// Size of one pixel in bytes.
    pub const SIZE_IN_BYTES: usize = 4;

    /// Fully transparent black. Same as `Pixel::default()`.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    /// Opaque black.
    pub const BLACK: Self = Self::new(0, 0, 0, 255);

    /// Opaque white.
    pub const WHITE: Self = Self::new(255, 255, 255, 255);

    /// Build a pixel from its four channels.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Build an opaque pixel.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Channels in `[r, g, b, a]` order.
    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Flatten pixels into tightly packed RGBA8 bytes, row-major.
    pub fn to_rgba8_bytes(pixels: &[Pixel]) -> Vec<u8> {
        let mut out = Vec::with_capacity(pixels.len() * Self::SIZE_IN_BYTES);
        for px in pixels {
            out.extend_from_slice(&px.to_array());
        }
        out
    }
}

impl From<[u8; 4]> for Pixel {
    fn from(v: [u8; 4]) -> Self {
        Self::new(v[0], v[1], v[2], v[3])
    }
}

impl From<Pixel> for [u8; 4] {
    fn from(p: Pixel) -> Self {
        p.to_array()
    }
}

/// How a source pixel is combined with the destination pixel it lands on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PixelMode {
    /// Replace all four destination channels.
    #[default]
    Overwrite,
    /// Blend RGB by source alpha; destination alpha is left untouched.
    AlphaBlend,
}

/// Integer 2D point.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: i32,
    /// Vertical coordinate.
    pub y: i32,
}

impl Point {
    /// The origin.
    pub const ZERO: Self = Self::new(0, 0);

    /// Build a point.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Convert to a fractional vector.
    pub fn to_vec2(self) -> Vec2 {
        Vec2::new(f64::from(self.x), f64::from(self.y))
    }
}

/// Integer 2D extent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Size {
    /// Width in pixels.
    pub width: i32,
    /// Height in pixels.
    pub height: i32,
}

impl Size {
    /// Build a size.
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

/// Integer rectangle `(x, y, width, height)`.
///
/// Containment and intersection treat the far edge as inclusive: a rectangle at `(0, 0)` with
/// width 10 contains `x = 10`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rectangle {
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Width, never negative in valid use.
    pub width: i32,
    /// Height, never negative in valid use.
    pub height: i32,
}

impl Rectangle {
    /// The zero rectangle.
    pub const EMPTY: Self = Self::new(0, 0, 0, 0);

    /// Build a rectangle.
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle at the origin covering `size`.
    pub const fn from_size(size: Size) -> Self {
        Self::new(0, 0, size.width, size.height)
    }

    /// Left side (`x`).
    pub const fn left(self) -> i32 {
        self.x
    }

    /// Top side (`y`).
    pub const fn top(self) -> i32 {
        self.y
    }

    /// Right side (`x + width`), wrapping on `i32` overflow.
    pub const fn right(self) -> i32 {
        self.x.wrapping_add(self.width)
    }

    /// Bottom side (`y + height`), wrapping on `i32` overflow.
    pub const fn bottom(self) -> i32 {
        self.y.wrapping_add(self.height)
    }

    const fn right_wide(self) -> i64 {
        self.x as i64 + self.width as i64
    }

    const fn bottom_wide(self) -> i64 {
        self.y as i64 + self.height as i64
    }

    /// Extent of the rectangle.
    pub const fn size(self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Return `true` when `(x, y)` lies in `[left, right] x [top, bottom]`.
    ///
    /// Edges are computed without overflow, so rectangles reaching past `i32::MAX` still
    /// contain their points.
    pub const fn contains_xy(self, x: i32, y: i32) -> bool {
        x >= self.x
            && x as i64 <= self.right_wide()
            && y >= self.y
            && y as i64 <= self.bottom_wide()
    }

    /// Return `true` when `p` lies in `[left, right] x [top, bottom]`.
    pub const fn contains(self, p: Point) -> bool {
        self.contains_xy(p.x, p.y)
    }

    /// Fractional variant of [`Rectangle::contains`].
    pub fn contains_vec2(self, v: Vec2) -> bool {
        v.x >= f64::from(self.x)
            && v.x <= self.right_wide() as f64
            && v.y >= f64::from(self.y)
            && v.y <= self.bottom_wide() as f64
    }

    /// Return `true` when the rectangles overlap or touch.
    pub const fn intersects(self, other: Rectangle) -> bool {
        !(other.x as i64 > self.right_wide()
            || other.right_wide() < self.x as i64
            || other.y as i64 > self.bottom_wide()
            || other.bottom_wide() < self.y as i64)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
