/// Incremental CRC-32 (IEEE 802.3, reflected), as used by PNG chunk trailers.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Crc32(u32);

impl Crc32 {
    const POLY: u32 = 0xEDB8_8320;

    pub(crate) fn new() -> Self {
        Self(0xFFFF_FFFF)
    }

    pub(crate) fn write_bytes(&mut self, bytes: &[u8]) {
        let mut c = self.0;
        for &b in bytes {
            c ^= u32::from(b);
            for _ in 0..8 {
                let mask = (c & 1).wrapping_neg();
                c = (c >> 1) ^ (Self::POLY & mask);
            }
        }
        self.0 = c;
    }

    pub(crate) fn finish(self) -> u32 {
        self.0 ^ 0xFFFF_FFFF
    }
}

/// `a * src + (1 - a) * dst`, truncated toward zero. `a` is the source alpha in `[0, 1]`.
#[inline]
pub(crate) fn lerp_channel_trunc(src: u8, dst: u8, a: f32) -> u8 {
    let c = 1.0 - a;
    (a * f32::from(src) + c * f32::from(dst)) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
