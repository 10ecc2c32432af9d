//! Variable-pitch bitmap fonts
//!
//! Glyph bits form one continuous MSB-first bit stream. Each glyph starts
//! at the bit offset stored for it in `offsets` and runs `width * height`
//! bits. Characters are found by a linear scan of the UTF-8 map, so lookup
//! cost grows with the size of the map.

use platform::PanelTransport;

use super::{saturating_i32, TextStyle};
use crate::display::Display;
use crate::error::{GfxError, Result};

/// Variable-pitch bitmap font.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProportionalFont<'a> {
    /// Glyph height in pixels
    pub height: u32,
    /// Bytes per `offsets` entry (1 to 3, big-endian)
    pub offset_width: u8,
    /// Width of each mapped character, in map order
    pub widths: &'a [u8],
    /// Bit offset of each glyph in `bitmap`, in map order
    pub offsets: &'a [u8],
    /// Continuous glyph bit stream
    pub bitmap: &'a [u8],
    /// Characters in glyph order
    pub map: &'a str,
}

impl<'a> ProportionalFont<'a> {
    /// Describe a font blob.
    pub const fn new(
        height: u32,
        offset_width: u8,
        widths: &'a [u8],
        offsets: &'a [u8],
        bitmap: &'a [u8],
        map: &'a str,
    ) -> Self {
        Self {
            height,
            offset_width,
            widths,
            offsets,
            bitmap,
            map,
        }
    }

    /// Map position of `chr`.
    pub fn index_of(&self, chr: char) -> Option<usize> {
        self.map.chars().position(|c| c == chr)
    }

    fn width_at(&self, index: usize) -> Result<u8> {
        self.widths
            .get(index)
            .copied()
            .ok_or(GfxError::Asset("proportional width table too short"))
    }

    /// First bit of glyph `index` in the bit stream.
    // SAFETY: index * offset_width is bounded by the table length through `get`.
    #[allow(clippy::arithmetic_side_effects)]
    fn bit_offset(&self, index: usize) -> Result<usize> {
        let size = usize::from(self.offset_width);
        if !(1..=3).contains(&size) {
            return Err(GfxError::Asset("offset width must be 1 to 3 bytes"));
        }
        let start = index * size;
        let entry = self
            .offsets
            .get(start..start + size)
            .ok_or(GfxError::Asset("proportional offset table too short"))?;
        Ok(entry.iter().fold(0usize, |acc, &b| (acc << 8) | usize::from(b)))
    }

    /// Total advance of the mapped characters of `text`.
    pub fn measure(&self, text: &str) -> Result<u32> {
        text.chars()
            .filter_map(|c| self.index_of(c))
            .try_fold(0u32, |acc, index| {
                Ok(acc.saturating_add(u32::from(self.width_at(index)?)))
            })
    }
}

/// Bit `bit` of an MSB-first stream.
// SAFETY: bit / 8 and bit % 8 cannot overflow; the shift is below 8.
#[allow(clippy::arithmetic_side_effects)]
fn stream_bit(bitmap: &[u8], bit: usize) -> Result<bool> {
    let byte = bitmap
        .get(bit / 8)
        .ok_or(GfxError::Asset("proportional glyph past end of bitmap"))?;
    Ok(byte & (0x80 >> (bit % 8)) != 0)
}

impl<T: PanelTransport> Display<T> {
    /// Draw `text` in a proportional font with its top-left corner at `(x, y)`.
    ///
    /// Characters missing from the map are skipped; drawing stops before
    /// the first glyph that would cross the right edge. Returns the
    /// advance actually drawn.
    // SAFETY: cursor math is i64 over u8 widths; bit indices are bounded
    // by glyph size and checked against the bitmap.
    #[allow(clippy::arithmetic_side_effects)]
    pub fn write(
        &mut self,
        font: &ProportionalFont<'_>,
        text: &str,
        x: i32,
        y: i32,
        style: TextStyle,
    ) -> Result<i32> {
        let (x0, y0) = (i64::from(x), i64::from(y));
        let limit = i64::from(self.width());
        let mut cursor = x0;
        let mut outcome = Ok(());

        for chr in text.chars() {
            let Some(index) = font.index_of(chr) else {
                continue;
            };
            let glyph = font
                .width_at(index)
                .and_then(|width| Ok((width, font.bit_offset(index)?)));
            let (width, start) = match glyph {
                Ok(glyph) => glyph,
                Err(err) => {
                    outcome = Err(err);
                    break;
                }
            };
            if cursor + i64::from(width) > limit {
                tracing::trace!(cursor, "proportional text truncated at right edge");
                break;
            }

            let cols = usize::from(width);
            let mut bit = start;
            for line in y0..y0 + i64::from(font.height) {
                let row: Result<heapless::Vec<bool, 256>> =
                    (bit..bit + cols).map(|b| stream_bit(font.bitmap, b)).collect();
                match row {
                    Ok(row) => self.paint_bits(cursor, line, row, style),
                    Err(err) => {
                        outcome = Err(err);
                        break;
                    }
                }
                bit += cols;
            }
            if outcome.is_err() {
                break;
            }
            cursor += i64::from(width);
        }

        if cursor > x0 && font.height > 0 {
            self.refresh_bounds(x0, y0, cursor - 1, y0 + i64::from(font.height) - 1)?;
        }
        outcome.map(|()| saturating_i32(u32::try_from(cursor - x0).unwrap_or(u32::MAX)))
    }
}
