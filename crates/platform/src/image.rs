//! Tile-emitting JPEG decoder abstraction
//!
//! The decoder is a black box: it reads a byte stream, reports the image
//! dimensions, then hands decoded rectangular tiles to a callback in a
//! deterministic top-to-bottom order.

use embedded_io::{Read, Seek};

/// Dimensions reported by [`JpegDecoder::prepare`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ImageInfo {
    /// Image width in pixels
    pub width: u16,
    /// Image height in pixels
    pub height: u16,
}

/// One decoded tile.
///
/// Bounds are inclusive, in image coordinates. `pixels` is row-major and
/// already in panel byte order (big-endian RGB565 for 16 bpp).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile<'a> {
    /// Leftmost column
    pub left: u16,
    /// Topmost row
    pub top: u16,
    /// Rightmost column (inclusive)
    pub right: u16,
    /// Bottom row (inclusive)
    pub bottom: u16,
    /// Row-major pixel block
    pub pixels: &'a [u8],
}

impl Tile<'_> {
    /// Tile width in pixels (0 for a malformed tile with `right < left`).
    pub fn width(&self) -> u16 {
        self.right
            .checked_sub(self.left)
            .and_then(|w| w.checked_add(1))
            .unwrap_or(0)
    }

    /// Tile height in pixels (0 for a malformed tile with `bottom < top`).
    pub fn height(&self) -> u16 {
        self.bottom
            .checked_sub(self.top)
            .and_then(|h| h.checked_add(1))
            .unwrap_or(0)
    }
}

/// JPEG decoder capability.
///
/// `S` is the byte stream the decoder pulls compressed data from.
pub trait JpegDecoder<S: Read + Seek> {
    /// Parse headers and report image dimensions.
    fn prepare(&mut self, stream: &mut S) -> Result<ImageInfo, DecodeError>;

    /// Decode the whole image, invoking `on_tile` once per tile.
    ///
    /// Returning `false` from `on_tile` aborts decoding with
    /// [`DecodeError::Aborted`].
    fn decode(
        &mut self,
        stream: &mut S,
        on_tile: &mut dyn FnMut(&Tile<'_>) -> bool,
    ) -> Result<(), DecodeError>;
}

/// Decoder errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DecodeError {
    /// Stream read or seek failed
    Io,
    /// Corrupt or truncated bit-stream
    Format,
    /// Valid JPEG using a feature the decoder does not implement
    Unsupported,
    /// Tile callback requested an abort
    Aborted,
    /// `decode` called before a successful `prepare`
    NotPrepared,
}

impl core::error::Error for DecodeError {}

impl core::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Io => write!(f, "JPEG stream I/O error"),
            Self::Format => write!(f, "JPEG data is corrupt"),
            Self::Unsupported => write!(f, "JPEG feature not supported"),
            Self::Aborted => write!(f, "JPEG decode aborted"),
            Self::NotPrepared => write!(f, "JPEG decoder not prepared"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_extent_is_inclusive() {
        let tile = Tile {
            left: 8,
            top: 16,
            right: 15,
            bottom: 23,
            pixels: &[],
        };
        assert_eq!(tile.width(), 8);
        assert_eq!(tile.height(), 8);
    }

    #[test]
    fn test_malformed_tile_has_zero_extent() {
        let tile = Tile {
            left: 4,
            top: 4,
            right: 3,
            bottom: 2,
            pixels: &[],
        };
        assert_eq!(tile.width(), 0);
        assert_eq!(tile.height(), 0);
    }
}
