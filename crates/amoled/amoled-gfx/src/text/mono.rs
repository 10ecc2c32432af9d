//! Fixed-pitch bitmap fonts

use platform::PanelTransport;

use super::{saturating_i32, TextStyle};
use crate::display::Display;
use crate::error::{GfxError, Result};

/// Fixed-cell bitmap font.
///
/// Glyphs `first..=last` are stored back to back, `height` rows each, every
/// row `ceil(width / 8)` bytes of MSB-first bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonoFont<'a> {
    /// Cell width in pixels
    pub width: u32,
    /// Cell height in pixels
    pub height: u32,
    /// First encoded character
    pub first: u8,
    /// Last encoded character
    pub last: u8,
    /// Packed glyph rows
    pub bitmap: &'a [u8],
}

impl<'a> MonoFont<'a> {
    /// Describe a font blob.
    pub const fn new(width: u32, height: u32, first: u8, last: u8, bitmap: &'a [u8]) -> Self {
        Self {
            width,
            height,
            first,
            last,
            bitmap,
        }
    }

    /// Bytes per glyph row
    fn row_bytes(&self) -> usize {
        self.width.div_ceil(8) as usize
    }

    fn covers(&self, chr: u8) -> bool {
        (self.first..=self.last).contains(&chr)
    }

    /// Packed rows of `chr`, or `None` outside `first..=last`.
    // SAFETY: chr >= first is checked; the product is bounded by the blob
    // length through `get`.
    #[allow(clippy::arithmetic_side_effects)]
    fn glyph(&self, chr: u8) -> Option<Result<&'a [u8]>> {
        if !self.covers(chr) {
            return None;
        }
        let size = self.height as usize * self.row_bytes();
        let start = usize::from(chr - self.first) * size;
        Some(
            self.bitmap
                .get(start..start + size)
                .ok_or(GfxError::Asset("mono glyph past end of bitmap")),
        )
    }

    /// Total advance of the characters of `text` this font covers.
    pub fn measure(&self, text: &str) -> u32 {
        let count = text.bytes().filter(|&b| self.covers(b)).count();
        u32::try_from(count).unwrap_or(u32::MAX).saturating_mul(self.width)
    }
}

impl<T: PanelTransport> Display<T> {
    /// Draw `text` in a fixed-pitch font with its top-left corner at `(x, y)`.
    ///
    /// Bytes outside the font's range are skipped. Drawing stops before
    /// the first glyph that would cross the right edge. Returns the advance
    /// actually drawn.
    ///
    /// ```
    /// # use amoled_gfx::{Color, Display, DisplayConfig, MonoFont, TextStyle};
    /// # use amoled_testing::{small_panel, RecordingTransport};
    /// # let config = DisplayConfig::for_panel(small_panel(32, 8));
    /// let bar = [0xFF; 8];
    /// let font = MonoFont::new(8, 8, b'#', b'#', &bar);
    /// let mut display = Display::new(RecordingTransport::new(), config).unwrap();
    /// let advance = display.text(&font, "##", 0, 0, TextStyle::new(Color::RED)).unwrap();
    /// assert_eq!(advance, 16);
    /// assert_eq!(display.get_pixel(15, 7), Some(Color::RED));
    /// ```
    // SAFETY: cursor math is i64 over u32 glyph sizes and a u32 screen width.
    #[allow(clippy::arithmetic_side_effects)]
    pub fn text(&mut self, font: &MonoFont<'_>, text: &str, x: i32, y: i32, style: TextStyle) -> Result<i32> {
        let (x0, y0) = (i64::from(x), i64::from(y));
        let cell = i64::from(font.width);
        let limit = i64::from(self.width());
        let row_bytes = font.row_bytes().max(1);
        let mut cursor = x0;
        let mut outcome = Ok(());

        for chr in text.bytes() {
            let glyph = match font.glyph(chr) {
                None => continue,
                Some(Err(err)) => {
                    outcome = Err(err);
                    break;
                }
                Some(Ok(glyph)) => glyph,
            };
            if cursor + cell > limit {
                tracing::trace!(cursor, "mono text truncated at right edge");
                break;
            }
            for (line, row) in (y0..).zip(glyph.chunks_exact(row_bytes)) {
                let bits = row
                    .iter()
                    .copied()
                    .flat_map(|byte| (0..8u8).rev().map(move |bit| (byte >> bit) & 1 == 1))
                    .take(font.width as usize);
                self.paint_bits(cursor, line, bits, style);
            }
            cursor += cell;
        }

        if cursor > x0 && font.height > 0 {
            self.refresh_bounds(x0, y0, cursor - 1, y0 + i64::from(font.height) - 1)?;
        }
        outcome.map(|()| saturating_i32(u32::try_from(cursor - x0).unwrap_or(u32::MAX)))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::indexing_slicing, clippy::unwrap_used)]
    use super::*;
    use crate::color::Color;
    use crate::config::DisplayConfig;
    use amoled_testing::{small_panel, RecordingTransport};

    // 'A' is a hollow box, 'B' a diagonal; 8x4 cells.
    const FONT: [u8; 8] = [
        0xFF, 0x81, 0x81, 0xFF, //
        0x80, 0x40, 0x20, 0x10,
    ];

    fn font() -> MonoFont<'static> {
        MonoFont::new(8, 4, b'A', b'B', &FONT)
    }

    fn display(width: u16) -> Display<RecordingTransport> {
        Display::new(RecordingTransport::new(), DisplayConfig::for_panel(small_panel(width, 8))).unwrap()
    }

    #[test]
    fn test_bits_are_msb_first() {
        let mut d = display(32);
        d.text(&font(), "B", 0, 0, TextStyle::new(Color::RED)).unwrap();
        assert_eq!(d.get_pixel(0, 0), Some(Color::RED));
        assert_eq!(d.get_pixel(1, 1), Some(Color::RED));
        assert_eq!(d.get_pixel(7, 0), Some(Color::BLACK));
        assert_eq!(d.get_pixel(3, 3), Some(Color::RED));
    }

    #[test]
    fn test_background_only_when_supplied() {
        let mut d = display(32);
        d.fill(Color::BLUE).unwrap();
        d.text(&font(), "A", 0, 0, TextStyle::new(Color::RED)).unwrap();
        assert_eq!(d.get_pixel(3, 1), Some(Color::BLUE));

        let style = TextStyle::new(Color::RED).with_background(Color::GREEN);
        d.text(&font(), "A", 8, 0, style).unwrap();
        assert_eq!(d.get_pixel(11, 1), Some(Color::GREEN));
        assert_eq!(d.get_pixel(8, 1), Some(Color::RED));
    }

    #[test]
    fn test_skips_characters_outside_range() {
        let mut d = display(32);
        let advance = d.text(&font(), "AzB", 0, 0, TextStyle::default()).unwrap();
        assert_eq!(advance, 16);
        assert_eq!(font().measure("AzB"), 16);
        assert_eq!(d.get_pixel(8, 0), Some(Color::WHITE));
    }

    #[test]
    fn test_truncates_at_right_edge() {
        let mut d = display(20);
        let advance = d.text(&font(), "AAA", 0, 0, TextStyle::default()).unwrap();
        assert_eq!(advance, 16);
        assert_eq!(d.get_pixel(16, 0), Some(Color::BLACK));
        assert!(!d.is_held());
    }

    #[test]
    fn test_one_refresh_over_text_box() {
        let mut d = display(32);
        d.text(&font(), "AB", 2, 2, TextStyle::default()).unwrap();
        assert_eq!(d.flush_stats().flushes, 1);
        let windows = d.transport().windows();
        assert_eq!(windows.first().unwrap(), &(vec![0, 2, 0, 17], vec![0, 2, 0, 3]));
        assert_eq!(windows.last().unwrap(), &(vec![0, 2, 0, 17], vec![0, 4, 0, 5]));
    }

    #[test]
    fn test_truncated_blob_is_an_asset_error() {
        let mut d = display(32);
        let short = MonoFont::new(8, 4, b'A', b'C', &FONT);
        let err = d.text(&short, "AC", 0, 0, TextStyle::default());
        assert!(matches!(err, Err(GfxError::Asset(_))));
        assert_eq!(d.get_pixel(0, 0), Some(Color::WHITE));
    }

    #[test]
    fn test_narrow_cells_ignore_padding_bits() {
        let glyph = [0xFF; 3];
        let narrow = MonoFont::new(5, 3, b'x', b'x', &glyph);
        let mut d = display(32);
        assert_eq!(d.text(&narrow, "xx", 0, 0, TextStyle::default()).unwrap(), 10);
        assert_eq!(d.get_pixel(4, 0), Some(Color::WHITE));
        assert_eq!(d.get_pixel(9, 2), Some(Color::WHITE));
        assert_eq!(d.get_pixel(10, 0), Some(Color::BLACK));
    }
}
