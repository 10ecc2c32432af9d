//! Panel colors in buffer storage order
//!
//! The pixel buffer holds each pixel exactly as the transport must send it:
//! big-endian color words laid out little-endian in memory. A [`Color`] is
//! that raw storage word, so the RGB565 red `0xF800` is stored as `0x00F8`.
//!
//! Channel math (coverage blending) works on the *logical* word, which is
//! the storage word with its `bytes_per_pixel` bytes reversed.

use amoled_specs::BitDepth;

/// A pixel value in buffer storage order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color(u32);

impl Color {
    /// Black
    pub const BLACK: Self = Self(0x0000);
    /// Blue
    pub const BLUE: Self = Self(0x1F00);
    /// Red
    pub const RED: Self = Self(0x00F8);
    /// Green
    pub const GREEN: Self = Self(0xE007);
    /// Cyan
    pub const CYAN: Self = Self(0xFF07);
    /// Magenta
    pub const MAGENTA: Self = Self(0x1FF8);
    /// Yellow
    pub const YELLOW: Self = Self(0xE0FF);
    /// White
    pub const WHITE: Self = Self(0xFFFF);

    /// Wrap a raw storage word.
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Raw storage word.
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Pack 8-bit channels as a 16 bpp color.
    ///
    /// The named constants above are 16 bpp values; use [`Color::from_rgb`]
    /// for the 18 and 24 bpp modes.
    ///
    /// # Examples
    /// ```
    /// # use amoled_gfx::Color;
    /// assert_eq!(Color::rgb565(255, 0, 0), Color::RED);
    /// assert_eq!(Color::rgb565(0, 0, 255), Color::BLUE);
    /// ```
    // SAFETY: channels are masked to their top bits before shifting into a u16.
    #[allow(clippy::arithmetic_side_effects)]
    pub const fn rgb565(red: u8, green: u8, blue: u8) -> Self {
        let logical = ((red as u16 & 0xF8) << 8) | ((green as u16 & 0xFC) << 3) | (blue as u16 >> 3);
        Self(logical.swap_bytes() as u32)
    }

    /// Pack 8-bit channels for any supported bit depth.
    // SAFETY: each channel is below 256, shifts stay inside 24 bits.
    #[allow(clippy::arithmetic_side_effects)]
    pub fn from_rgb(depth: BitDepth, red: u8, green: u8, blue: u8) -> Self {
        let (r, g, b) = (u32::from(red), u32::from(green), u32::from(blue));
        let logical = match depth {
            BitDepth::Bpp16 => return Self::rgb565(red, green, blue),
            BitDepth::Bpp18 => ((r >> 2) << 16) | ((g >> 2) << 8) | (b >> 2),
            BitDepth::Bpp24 => (r << 16) | (g << 8) | b,
        };
        Self::from_logical(depth, logical)
    }

    /// Build a color from its logical (transport-order) word.
    pub fn from_logical(depth: BitDepth, logical: u32) -> Self {
        Self(reverse_bytes(logical, depth.bytes_per_pixel()))
    }

    /// Logical (transport-order) word for `depth`.
    pub fn to_logical(self, depth: BitDepth) -> u32 {
        reverse_bytes(self.0, depth.bytes_per_pixel())
    }

    /// Storage bytes; the first `bytes_per_pixel` are written to the buffer.
    pub const fn to_bytes(self) -> [u8; 4] {
        self.0.to_le_bytes()
    }

    /// Read one pixel's storage bytes (at most four are used).
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut raw = [0u8; 4];
        for (dst, src) in raw.iter_mut().zip(bytes) {
            *dst = *src;
        }
        Self(u32::from_le_bytes(raw))
    }

    /// Scale every channel by `coverage / 256`.
    ///
    /// Channels are extracted with the depth's channel mask, scaled as
    /// `(coverage * channel) >> 8` and reassembled.
    ///
    /// # Examples
    /// ```
    /// # use amoled_gfx::Color;
    /// # use amoled_specs::BitDepth;
    /// let half = Color::WHITE.scale_coverage(128, BitDepth::Bpp16);
    /// assert_eq!(half.to_logical(BitDepth::Bpp16), 0x7BEF);
    /// ```
    // SAFETY: channels are masked to at most 8 bits, so coverage * channel < 2^16.
    #[allow(clippy::arithmetic_side_effects)]
    pub fn scale_coverage(self, coverage: u8, depth: BitDepth) -> Self {
        let mask = depth.channel_mask();
        let v = u32::from(coverage);
        let (r, g, b) = mask.split(self.to_logical(depth));
        let blended = mask.join((v * r) >> 8, (v * g) >> 8, (v * b) >> 8);
        Self::from_logical(depth, blended)
    }
}

/// Byte-swapped RGB565 value as a raw integer.
pub const fn color565(red: u8, green: u8, blue: u8) -> u16 {
    Color::rgb565(red, green, blue).raw() as u16
}

/// Reverse the low `count` bytes of `word`; higher bytes are dropped.
fn reverse_bytes(word: u32, count: usize) -> u32 {
    let bytes = word.to_le_bytes();
    let mut out = [0u8; 4];
    for (dst, src) in out.iter_mut().take(count).zip(bytes.iter().take(count).rev()) {
        *dst = *src;
    }
    u32::from_le_bytes(out)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::indexing_slicing)]
    use super::*;

    #[test]
    fn test_named_colors_match_color565() {
        assert_eq!(color565(0, 0, 0), 0x0000);
        assert_eq!(color565(0, 0, 255), 0x1F00);
        assert_eq!(color565(255, 0, 0), 0x00F8);
        assert_eq!(color565(0, 255, 0), 0xE007);
        assert_eq!(color565(0, 255, 255), 0xFF07);
        assert_eq!(color565(255, 0, 255), 0x1FF8);
        assert_eq!(color565(255, 255, 0), 0xE0FF);
        assert_eq!(color565(255, 255, 255), 0xFFFF);
    }

    #[test]
    fn test_storage_bytes_are_transport_order() {
        let bytes = Color::RED.to_bytes();
        assert_eq!(&bytes[..2], &[0xF8, 0x00]);

        let c = Color::from_rgb(BitDepth::Bpp24, 0x12, 0x34, 0x56);
        assert_eq!(&c.to_bytes()[..3], &[0x12, 0x34, 0x56]);
        assert_eq!(c.to_logical(BitDepth::Bpp24), 0x12_3456);
    }

    #[test]
    fn test_rgb666_drops_low_bits() {
        let c = Color::from_rgb(BitDepth::Bpp18, 0xFF, 0x80, 0x07);
        assert_eq!(c.to_logical(BitDepth::Bpp18), 0x3F_2001);
    }

    #[test]
    fn test_from_bytes_round_trip() {
        let c = Color::from_rgb(BitDepth::Bpp24, 1, 2, 3);
        let bytes = c.to_bytes();
        assert_eq!(Color::from_bytes(&bytes[..3]), c);
    }

    #[test]
    fn test_coverage_blend_worked_example() {
        let half = Color::WHITE.scale_coverage(128, BitDepth::Bpp16);
        assert_eq!(half.to_logical(BitDepth::Bpp16), 0x7BEF);
        assert_eq!(half.raw(), 0xEF7B);
    }

    #[test]
    fn test_coverage_extremes() {
        assert_eq!(Color::RED.scale_coverage(0, BitDepth::Bpp16), Color::BLACK);
        // 255/256 truncates every channel by one step at most
        let nearly = Color::from_rgb(BitDepth::Bpp24, 200, 100, 50).scale_coverage(255, BitDepth::Bpp24);
        assert_eq!(nearly.to_logical(BitDepth::Bpp24), (199 << 16) | (99 << 8) | 49);
    }
}
