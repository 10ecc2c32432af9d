//! Pixel format encodings: color order, bit depth and channel masks

use crate::madctl;

/// Color component order on the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum ColorSpace {
    /// Red-green-blue (MADCTL BGR bit clear)
    #[default]
    Rgb,
    /// Blue-green-red (MADCTL BGR bit set)
    Bgr,
    /// Single channel. Listed for completeness; no supported controller accepts it.
    Monochrome,
}

impl ColorSpace {
    /// MADCTL bits for this color order, or `None` when unsupported.
    pub const fn madctl_bits(self) -> Option<u8> {
        match self {
            Self::Rgb => Some(madctl::DEFAULT),
            Self::Bgr => Some(madctl::BGR),
            Self::Monochrome => None,
        }
    }
}

/// Bits per pixel on the wire and in the pixel buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum BitDepth {
    /// RGB565, 2 bytes per pixel
    #[default]
    Bpp16,
    /// RGB666, 3 bytes per pixel (6 significant bits per byte)
    Bpp18,
    /// RGB888, 3 bytes per pixel
    Bpp24,
}

impl BitDepth {
    /// Parse a bit count (16, 18 or 24).
    pub const fn from_bits(bits: u8) -> Option<Self> {
        match bits {
            16 => Some(Self::Bpp16),
            18 => Some(Self::Bpp18),
            24 => Some(Self::Bpp24),
            _ => None,
        }
    }

    /// Bit count.
    pub const fn bits(self) -> u8 {
        match self {
            Self::Bpp16 => 16,
            Self::Bpp18 => 18,
            Self::Bpp24 => 24,
        }
    }

    /// Packed storage width: `(bits + 6) >> 3`.
    pub const fn bytes_per_pixel(self) -> usize {
        match self {
            Self::Bpp16 => 2,
            Self::Bpp18 | Self::Bpp24 => 3,
        }
    }

    /// COLMOD (0x3A) parameter.
    pub const fn colmod(self) -> u8 {
        match self {
            Self::Bpp16 => 0x55,
            Self::Bpp18 => 0x66,
            Self::Bpp24 => 0x77,
        }
    }

    /// Channel layout used for coverage blending.
    pub const fn channel_mask(self) -> ChannelMask {
        match self {
            Self::Bpp16 => ChannelMask::RGB565,
            Self::Bpp18 => ChannelMask::RGB666,
            Self::Bpp24 => ChannelMask::RGB888,
        }
    }
}

/// Channel extraction layout for a logical (big-endian ordered) color word.
///
/// `channel = (word & mask) >> shift`; blue always sits at bit 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct ChannelMask {
    /// Red bits
    pub red_mask: u32,
    /// Red position
    pub red_shift: u8,
    /// Green bits
    pub green_mask: u32,
    /// Green position
    pub green_shift: u8,
    /// Blue bits (at bit 0)
    pub blue_mask: u32,
}

impl ChannelMask {
    /// 5 red bits at 11, 6 green bits at 5, 5 blue bits at 0.
    pub const RGB565: Self = Self {
        red_mask: 0xF800,
        red_shift: 11,
        green_mask: 0x07E0,
        green_shift: 5,
        blue_mask: 0x001F,
    };

    /// One byte per channel, low 6 bits significant.
    pub const RGB666: Self = Self {
        red_mask: 0x3F_0000,
        red_shift: 16,
        green_mask: 0x00_3F00,
        green_shift: 8,
        blue_mask: 0x00_003F,
    };

    /// One byte per channel.
    pub const RGB888: Self = Self {
        red_mask: 0xFF_0000,
        red_shift: 16,
        green_mask: 0x00_FF00,
        green_shift: 8,
        blue_mask: 0x00_00FF,
    };

    /// Split a logical color word into (red, green, blue).
    // SAFETY: shifts are the table constants (0..=16), always below 32.
    #[allow(clippy::arithmetic_side_effects)]
    pub const fn split(&self, word: u32) -> (u32, u32, u32) {
        (
            (word & self.red_mask) >> self.red_shift,
            (word & self.green_mask) >> self.green_shift,
            word & self.blue_mask,
        )
    }

    /// Reassemble (red, green, blue) into a logical color word.
    ///
    /// Out-of-range channel values are masked off.
    // SAFETY: shifts are the table constants (0..=16), always below 32.
    #[allow(clippy::arithmetic_side_effects)]
    pub const fn join(&self, red: u32, green: u32, blue: u32) -> u32 {
        ((red << self.red_shift) & self.red_mask)
            | ((green << self.green_shift) & self.green_mask)
            | (blue & self.blue_mask)
    }
}
