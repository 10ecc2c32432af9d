//! Hershey-style stroke fonts
//!
//! Each printable ASCII code (32..=127) has a little-endian u16 entry in
//! `index` pointing into `strokes`. A glyph record is a point count, the
//! left and right bounds, then that many coordinate pairs. Every byte is
//! biased by [`STROKE_BIAS`]; a pair starting with a space lifts the pen.

use platform::PanelTransport;

use crate::color::Color;
use crate::display::Display;
use crate::error::{GfxError, Result};

/// Stored value of coordinate zero.
pub const STROKE_BIAS: i32 = 0x52;

const PEN_UP: u8 = b' ';
const FIRST_CODE: u8 = 32;
const LAST_CODE: u8 = 127;

/// Stroke font data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VectorFont<'a> {
    /// Two bytes per code from 32, little-endian offsets into `strokes`
    pub index: &'a [u8],
    /// Glyph records
    pub strokes: &'a [u8],
}

/// A glyph record resolved against the stroke stream. Bounds are unbiased
/// but unscaled.
struct Glyph<'a> {
    left: i32,
    right: i32,
    count: usize,
    points: &'a [u8],
}

impl Glyph<'_> {
    /// Horizontal advance: the bound width times `scale`, rounded once.
    // SAFETY: both bounds are unbiased bytes, so the difference fits easily.
    #[allow(clippy::arithmetic_side_effects, clippy::cast_precision_loss)]
    fn advance(&self, scale: f32) -> i32 {
        round_half_up((self.right - self.left) as f32 * scale)
    }

    /// Scaled left bound; stroke x positions are taken relative to it.
    #[allow(clippy::cast_precision_loss)]
    fn origin(&self, scale: f32) -> i32 {
        round_half_up(self.left as f32 * scale)
    }
}

impl<'a> VectorFont<'a> {
    /// Describe a font blob.
    pub const fn new(index: &'a [u8], strokes: &'a [u8]) -> Self {
        Self { index, strokes }
    }

    /// Glyph for `code`, or `None` outside the printable range.
    // SAFETY: code >= 32 is checked; offsets are bounded through `get`.
    #[allow(clippy::arithmetic_side_effects)]
    fn glyph(&self, code: u8) -> Option<Result<Glyph<'a>>> {
        if !(FIRST_CODE..=LAST_CODE).contains(&code) {
            return None;
        }
        let slot = usize::from(code - FIRST_CODE) * 2;
        let record = self
            .index
            .get(slot..slot + 2)
            .and_then(|b| <[u8; 2]>::try_from(b).ok())
            .map(|b| usize::from(u16::from_le_bytes(b)))
            .and_then(|offset| self.strokes.get(offset..))
            .ok_or(GfxError::Asset("stroke index out of range"));
        Some(record.and_then(|record| match record {
            [count, left, right, points @ ..] => Ok(Glyph {
                left: unbias(*left),
                right: unbias(*right),
                count: usize::from(*count),
                points,
            }),
            _ => Err(GfxError::Asset("stroke record truncated")),
        }))
    }

    /// Total advance of `text` at `scale`, summing the same per-glyph
    /// widths [`Display::draw_vector`] advances by.
    pub fn measure(&self, text: &str, scale: f32) -> Result<i32> {
        text.bytes()
            .filter_map(|code| self.glyph(code))
            .try_fold(0i32, |acc, glyph| Ok(acc.saturating_add(glyph?.advance(scale))))
    }
}

// SAFETY: a byte minus a small constant cannot overflow i32.
#[allow(clippy::arithmetic_side_effects)]
fn unbias(stored: u8) -> i32 {
    i32::from(stored) - STROKE_BIAS
}

/// Round to the nearest integer, halves toward +infinity; the cast saturates.
#[allow(clippy::cast_possible_truncation, clippy::arithmetic_side_effects)]
fn round_half_up(value: f32) -> i32 {
    (value + 0.5).floor() as i32
}

/// Unbias and scale one stored coordinate.
#[allow(clippy::cast_precision_loss)]
fn scaled(stored: u8, scale: f32) -> i32 {
    round_half_up(scale * unbias(stored) as f32)
}

impl<T: PanelTransport> Display<T> {
    /// Draw `text` as strokes with its origin at `(x, y)`.
    ///
    /// Pen-down points are joined with [`Display::line`] segments drawn
    /// under one hold; the touched box is refreshed once. Returns the
    /// horizontal advance.
    // SAFETY: pen positions are i64 sums of scaled byte-sized coordinates.
    #[allow(clippy::arithmetic_side_effects)]
    pub fn draw_vector(&mut self, font: &VectorFont<'_>, text: &str, x: i32, y: i32, color: Color, scale: f32) -> Result<i32> {
        let (x0, y0) = (i64::from(x), i64::from(y));
        let mut pos_x = x0;
        let mut touched: Option<(i64, i64, i64, i64)> = None;

        let drawn = {
            let mut batch = self.hold();
            let mut outcome = Ok(());
            'glyphs: for code in text.bytes() {
                let glyph = match font.glyph(code) {
                    None => continue,
                    Some(Ok(glyph)) => glyph,
                    Some(Err(err)) => {
                        outcome = Err(err);
                        break;
                    }
                };
                let left = i64::from(glyph.origin(scale));
                let mut from: Option<(i64, i64)> = None;
                let mut rest = glyph.points;
                for _ in 0..glyph.count {
                    let (pair, tail) = match rest {
                        [a, b, tail @ ..] => ((*a, *b), tail),
                        _ => {
                            outcome = Err(GfxError::Asset("stroke record truncated"));
                            break 'glyphs;
                        }
                    };
                    rest = tail;
                    if pair.0 == PEN_UP {
                        from = None;
                        continue;
                    }
                    let to = (
                        pos_x + i64::from(scaled(pair.0, scale)) - left,
                        y0 + i64::from(scaled(pair.1, scale)),
                    );
                    if let Some((fx, fy)) = from {
                        if let Err(err) = batch.line_runs(fx, fy, to.0, to.1, color) {
                            outcome = Err(err);
                            break 'glyphs;
                        }
                        touched = Some(grow(touched, (fx, fy)));
                        touched = Some(grow(touched, to));
                    }
                    from = Some(to);
                }
                pos_x += i64::from(glyph.advance(scale));
            }
            outcome
        };

        if let Some((bx0, by0, bx1, by1)) = touched {
            self.refresh_bounds(bx0, by0, bx1, by1)?;
        }
        drawn.map(|()| i32::try_from(pos_x - x0).unwrap_or(i32::MAX))
    }
}

fn grow(bounds: Option<(i64, i64, i64, i64)>, (x, y): (i64, i64)) -> (i64, i64, i64, i64) {
    match bounds {
        None => (x, y, x, y),
        Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::indexing_slicing, clippy::unwrap_used)]
    use super::*;
    use crate::config::DisplayConfig;
    use amoled_testing::{small_panel, RecordingTransport};

    // 'L': down then right. left -2, right +2.
    const GLYPH_L: [u8; 9] = [3, 0x50, 0x54, 0x50, 0x52, 0x50, 0x56, 0x53, 0x56];
    // '-': two dashes split by a pen-up. left -2, right +3.
    const GLYPH_DASH: [u8; 13] = [5, 0x50, 0x55, 0x50, 0x52, 0x51, 0x52, b' ', b'R', 0x53, 0x52, 0x54, 0x52];

    fn blob() -> (Vec<u8>, Vec<u8>) {
        let mut strokes = vec![0u8, 0x52, 0x52];
        let mut index = vec![0u8; 96 * 2];
        for (code, glyph) in [(b'L', &GLYPH_L[..]), (b'-', &GLYPH_DASH[..])] {
            let offset = u16::try_from(strokes.len()).unwrap().to_le_bytes();
            let slot = usize::from(code - 32) * 2;
            index[slot..slot + 2].copy_from_slice(&offset);
            strokes.extend_from_slice(glyph);
        }
        (index, strokes)
    }

    fn display() -> Display<RecordingTransport> {
        Display::new(RecordingTransport::new(), DisplayConfig::for_panel(small_panel(40, 20))).unwrap()
    }

    #[test]
    fn test_strokes_join_pen_down_points() {
        let (index, strokes) = blob();
        let font = VectorFont::new(&index, &strokes);
        let mut d = display();
        let advance = d.draw_vector(&font, "L", 5, 2, Color::RED, 1.0).unwrap();
        assert_eq!(advance, 4);
        for y in 2..=6 {
            assert_eq!(d.get_pixel(5, y), Some(Color::RED));
        }
        for x in 5..=8 {
            assert_eq!(d.get_pixel(x, 6), Some(Color::RED));
        }
        assert_eq!(d.get_pixel(6, 5), Some(Color::BLACK));
    }

    #[test]
    fn test_pen_up_breaks_the_stroke() {
        let (index, strokes) = blob();
        let font = VectorFont::new(&index, &strokes);
        let mut d = display();
        d.draw_vector(&font, "-", 0, 0, Color::WHITE, 1.0).unwrap();
        assert_eq!(d.get_pixel(0, 0), Some(Color::WHITE));
        assert_eq!(d.get_pixel(1, 0), Some(Color::WHITE));
        assert_eq!(d.get_pixel(2, 0), Some(Color::BLACK));
        assert_eq!(d.get_pixel(3, 0), Some(Color::WHITE));
        assert_eq!(d.get_pixel(4, 0), Some(Color::WHITE));
    }

    #[test]
    fn test_measure_matches_draw_advance() {
        let (index, strokes) = blob();
        let font = VectorFont::new(&index, &strokes);
        for scale in [1.0, 2.0, 0.5] {
            let mut d = display();
            let advance = d.draw_vector(&font, "L-L", 0, 0, Color::WHITE, scale).unwrap();
            assert_eq!(advance, font.measure("L-L", scale).unwrap());
        }
        assert_eq!(font.measure("L-L", 1.0).unwrap(), 13);
    }

    #[test]
    fn test_scale_rounds_each_coordinate() {
        let (index, strokes) = blob();
        let font = VectorFont::new(&index, &strokes);
        let mut d = display();
        // bounds -2..2 give (2 - -2) * 2 = 8; the foot ends at (1 - -2) * 2 = 6
        assert_eq!(d.draw_vector(&font, "L", 0, 0, Color::WHITE, 2.0).unwrap(), 8);
        assert_eq!(d.get_pixel(0, 0), Some(Color::WHITE));
        assert_eq!(d.get_pixel(0, 8), Some(Color::WHITE));
        assert_eq!(d.get_pixel(6, 8), Some(Color::WHITE));
        assert_eq!(d.get_pixel(7, 8), Some(Color::BLACK));
        assert_eq!(d.get_pixel(1, 7), Some(Color::BLACK));
    }

    #[test]
    fn test_negative_bounds_round_to_nearest() {
        let (index, strokes) = blob();
        let font = VectorFont::new(&index, &strokes);
        // '-' spans -2..3: 5 at scale 1, 2.5 rounds up to 3 at scale 0.5
        assert_eq!(font.measure("-", 1.0).unwrap(), 5);
        assert_eq!(font.measure("-", 0.5).unwrap(), 3);
        assert_eq!(font.measure("L", 0.5).unwrap(), 2);
        assert_eq!(scaled(0x50, 1.0), -2);
        assert_eq!(scaled(0x50, 0.75), -1);
        assert_eq!(scaled(0x51, 0.5), 0);

        let mut d = display();
        d.draw_vector(&font, "L", 3, 0, Color::RED, 1.0).unwrap();
        // the stem sits on the pen origin, not one column to the right
        assert_eq!(d.get_pixel(3, 0), Some(Color::RED));
        assert_eq!(d.get_pixel(4, 0), Some(Color::BLACK));
    }

    #[test]
    fn test_one_refresh_for_the_whole_string() {
        let (index, strokes) = blob();
        let font = VectorFont::new(&index, &strokes);
        let mut d = display();
        d.draw_vector(&font, "LL", 0, 0, Color::WHITE, 1.0).unwrap();
        assert_eq!(d.flush_stats().flushes, 1);
        assert!(!d.is_held());
    }

    #[test]
    fn test_empty_glyphs_still_advance() {
        let (index, strokes) = blob();
        let font = VectorFont::new(&index, &strokes);
        let mut d = display();
        assert_eq!(d.draw_vector(&font, "  ", 0, 0, Color::WHITE, 1.0).unwrap(), 0);
        assert_eq!(d.flush_stats().flushes, 0);
    }

    #[test]
    fn test_truncated_record_is_an_asset_error() {
        let (index, strokes) = blob();
        let cut = &strokes[..strokes.len() - 2];
        let font = VectorFont::new(&index, cut);
        let mut d = display();
        let err = d.draw_vector(&font, "-", 0, 0, Color::WHITE, 1.0);
        assert!(matches!(err, Err(GfxError::Asset(_))));
        assert!(!d.is_held());
    }
}
