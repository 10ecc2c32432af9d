//! Anti-aliased outline text
//!
//! Glyphs come from an external [`OutlineFont`] engine as 8-bit coverage
//! maps and are composited onto the buffer: full coverage writes the
//! foreground, zero coverage writes the background only when one is set,
//! anything in between scales each foreground channel by `coverage / 256`.

use platform::{GlyphId, GlyphMetrics, Kerning, OutlineFont, PanelTransport};

use super::TextStyle;
use crate::display::Display;
use crate::error::{try_zeroed, GfxError, Result};

/// Pen state carried across the glyphs of one string.
struct Pen {
    x_next: i64,
    y_min: i64,
    y_max: i64,
    previous: Option<GlyphId>,
}

/// Resolve the next glyph and its kerning against the previous one.
fn next_glyph<F: OutlineFont + ?Sized>(
    font: &F,
    chr: char,
    previous: Option<GlyphId>,
) -> Result<(GlyphId, GlyphMetrics, Kerning)> {
    let glyph = font.lookup(chr)?;
    let metrics = font.metrics(glyph)?;
    let kerning = match previous {
        Some(left) => font.kerning(left, glyph)?.unwrap_or_default(),
        None => Kerning::default(),
    };
    Ok((glyph, metrics, kerning))
}

/// Total advance of `text`: kerning shifts plus glyph advances.
pub fn measure_outline<F: OutlineFont + ?Sized>(font: &F, text: &str) -> Result<i32> {
    let mut previous = None;
    let mut advance = 0i32;
    for chr in text.chars() {
        let (glyph, metrics, kerning) = next_glyph(font, chr, previous)?;
        advance = advance
            .saturating_add(kerning.x_shift)
            .saturating_add(metrics.advance);
        previous = Some(glyph);
    }
    Ok(advance)
}

impl<T: PanelTransport> Display<T> {
    /// Draw anti-aliased `text` with its pen origin at `(x, y)`.
    ///
    /// Glyph rows are padded to a multiple of four pixels; padding has zero
    /// coverage. Refreshes `(x, ymin)` to `(x + advance, ymax)` once and
    /// returns the advance.
    ///
    /// ```
    /// # use amoled_gfx::{Color, Display, DisplayConfig, TextStyle};
    /// # use amoled_testing::{small_panel, BoxFont, RecordingTransport};
    /// # let config = DisplayConfig::for_panel(small_panel(32, 16));
    /// let font = BoxFont::new(4, 6).with_coverage(128);
    /// let mut display = Display::new(RecordingTransport::new(), config).unwrap();
    /// display.draw_outline(&font, "o", 0, 0, TextStyle::new(Color::WHITE)).unwrap();
    /// assert_eq!(display.get_pixel(1, 0), Some(Color::from_raw(0xEF7B)));
    /// ```
    // SAFETY: pen math is i64 over i32 metrics; glyph extents are u32.
    #[allow(clippy::arithmetic_side_effects)]
    pub fn draw_outline<F: OutlineFont + ?Sized>(
        &mut self,
        font: &F,
        text: &str,
        x: i32,
        y: i32,
        style: TextStyle,
    ) -> Result<i32> {
        let (x0, y0) = (i64::from(x), i64::from(y));
        let mut pen = Pen {
            x_next: x0,
            y_min: y0,
            y_max: y0,
            previous: None,
        };
        let drawn = self.outline_glyphs(font, text, y0, style, &mut pen);

        if pen.x_next > x0 && pen.y_max > pen.y_min {
            self.refresh_bounds(x0, pen.y_min, pen.x_next - 1, pen.y_max - 1)?;
        }
        drawn.map(|()| i32::try_from(pen.x_next - x0).unwrap_or(i32::MAX))
    }

    // SAFETY: see `draw_outline`; image sizes are bounded by the allocation.
    #[allow(clippy::arithmetic_side_effects, clippy::cast_possible_truncation)]
    fn outline_glyphs<F: OutlineFont + ?Sized>(
        &mut self,
        font: &F,
        text: &str,
        y0: i64,
        style: TextStyle,
        pen: &mut Pen,
    ) -> Result<()> {
        let depth = self.bit_depth();
        let mut coverage = Vec::new();

        for chr in text.chars() {
            let (glyph, metrics, kerning) = next_glyph(font, chr, pen.previous)?;
            pen.previous = Some(glyph);

            let width = metrics
                .min_width
                .checked_add(3)
                .ok_or(GfxError::Asset("glyph width overflows"))?
                & !3;
            let height = metrics.min_height;
            let bytes = width as usize * height as usize;
            if coverage.len() < bytes {
                coverage = try_zeroed(bytes)?;
            }
            let image = coverage
                .get_mut(..bytes)
                .ok_or(GfxError::AllocationFailure { bytes })?;
            image.fill(0);
            font.render(glyph, width, height, image)?;

            pen.x_next += i64::from(kerning.x_shift);
            let x_pen = pen.x_next + i64::from(metrics.left_bearing);
            let y_pen = y0 + i64::from(kerning.y_shift) + i64::from(metrics.y_offset);
            pen.y_min = pen.y_min.min(y_pen);
            pen.y_max = pen.y_max.max(y_pen + i64::from(height));

            if width > 0 {
                for (py, row) in (y_pen..).zip(image.chunks_exact(width as usize)) {
                    for (px, &v) in (x_pen..).zip(row) {
                        let color = match v {
                            255 => Some(style.fg),
                            0 => style.bg,
                            v => Some(style.fg.scale_coverage(v, depth)),
                        };
                        if let (Some(color), Ok(px), Ok(py)) = (color, i32::try_from(px), i32::try_from(py)) {
                            self.buffer.set_pixel(px, py, color);
                        }
                    }
                }
            }
            pen.x_next += i64::from(metrics.advance);
        }
        Ok(())
    }
}
