use std::ops::Range;

use crate::foundation::core::{Point, Rectangle, Size};

/// Offsets `i` in `0..count` with `src_start + i` inside `0..src_len` and `dst_start + i`
/// inside `0..dst_len`.
///
/// Both conditions are monotonic in `i`, so the surviving offsets are always one contiguous
/// range.
pub(crate) fn clip_span(
    count: i32,
    src_start: i32,
    src_len: i32,
    dst_start: i32,
    dst_len: i32,
) -> Range<usize> {
    let (src_start, dst_start) = (i64::from(src_start), i64::from(dst_start));
    let lo = 0i64.max(-src_start).max(-dst_start);
    let hi = i64::from(count)
        .min(i64::from(src_len) - src_start)
        .min(i64::from(dst_len) - dst_start);
    if lo >= hi {
        return 0..0;
    }
    lo as usize..hi as usize
}

/// Row-by-row copy plan for moving `src_rect` of one surface to `dst` on another, with the
/// parts that fall outside either surface removed.
#[derive(Clone, Debug)]
pub(crate) struct CopySpans {
    rows: Range<usize>,
    cols: Range<usize>,
    src_origin: (i64, i64),
    dst_origin: (i64, i64),
    src_stride: i64,
    dst_stride: i64,
}

impl CopySpans {
    pub(crate) fn new(src_rect: Rectangle, src_size: Size, dst: Point, dst_size: Size) -> Self {
        let rows = clip_span(src_rect.height, src_rect.y, src_size.height, dst.y, dst_size.height);
        let cols = clip_span(src_rect.width, src_rect.x, src_size.width, dst.x, dst_size.width);
        Self {
            rows,
            cols,
            src_origin: (i64::from(src_rect.x), i64::from(src_rect.y)),
            dst_origin: (i64::from(dst.x), i64::from(dst.y)),
            src_stride: i64::from(src_size.width),
            dst_stride: i64::from(dst_size.width),
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.rows.is_empty() || self.cols.is_empty()
    }

    /// Number of pixels the plan copies.
    pub(crate) fn pixel_count(&self) -> usize {
        self.rows.len() * self.cols.len()
    }

    /// `(source index range, destination index range)` per surviving row.
    pub(crate) fn rows(&self) -> impl Iterator<Item = (Range<usize>, Range<usize>)> + '_ {
        let (c0, len) = (self.cols.start as i64, self.cols.len());
        let rows = if self.is_empty() { 0..0 } else { self.rows.clone() };
        rows.map(move |r| {
            let r = r as i64;
            let s = (self.src_origin.1 + r) * self.src_stride + self.src_origin.0 + c0;
            let d = (self.dst_origin.1 + r) * self.dst_stride + self.dst_origin.0 + c0;
            let (s, d) = (s as usize, d as usize);
            (s..s + len, d..d + len)
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/clip.rs"]
mod tests;
