//! Address window alignment
//!
//! The supported controllers address RAM in 2×2 pixel units: every window
//! must start on an even column/row and end on an odd one, so its width and
//! height are always even.

use amoled_specs::commands::window_payload;

/// Round a start coordinate down to an even value.
///
/// # Examples
/// ```
/// # use amoled_gfx::alignment::align_start;
/// assert_eq!(align_start(0), 0);
/// assert_eq!(align_start(5), 4);
/// assert_eq!(align_start(6), 6);
/// ```
pub const fn align_start(value: u16) -> u16 {
    value & !1
}

/// Round an inclusive end coordinate up to an odd value.
///
/// # Examples
/// ```
/// # use amoled_gfx::alignment::align_end;
/// assert_eq!(align_end(0), 1);
/// assert_eq!(align_end(5), 5);
/// assert_eq!(align_end(6), 7);
/// ```
pub const fn align_end(value: u16) -> u16 {
    value | 1
}

/// A transport-legal window in buffer coordinates (inclusive bounds).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddressWindow {
    /// Start column (even)
    pub sc: u16,
    /// Start row (even)
    pub sr: u16,
    /// End column (odd)
    pub ec: u16,
    /// End row (odd)
    pub er: u16,
}

impl AddressWindow {
    /// Smallest aligned window covering the inclusive corners `(x0, y0)`
    /// and `(x1, y1)`.
    pub fn covering(x0: u16, y0: u16, x1: u16, y1: u16) -> Self {
        Self {
            sc: align_start(x0.min(x1)),
            sr: align_start(y0.min(y1)),
            ec: align_end(x0.max(x1)),
            er: align_end(y0.max(y1)),
        }
    }

    /// Window width in pixels (always even).
    // SAFETY: ec >= sc by construction (align_end(max) > align_start(min)).
    #[allow(clippy::arithmetic_side_effects)]
    pub fn width(&self) -> u32 {
        u32::from(self.ec) - u32::from(self.sc) + 1
    }

    /// Window height in pixels (always even).
    // SAFETY: er >= sr by construction.
    #[allow(clippy::arithmetic_side_effects)]
    pub fn height(&self) -> u32 {
        u32::from(self.er) - u32::from(self.sr) + 1
    }

    /// Pixel count.
    // SAFETY: both factors are at most 65536.
    #[allow(clippy::arithmetic_side_effects)]
    pub fn area(&self) -> usize {
        self.width() as usize * self.height() as usize
    }

    /// Restrict the window to the row pair starting at `row`.
    pub fn row_pair(&self, row: u16) -> Self {
        Self {
            sr: row,
            er: align_end(row),
            ..*self
        }
    }

    /// CASET payload with the column offset applied.
    pub fn column_payload(&self, col_offset: u16) -> [u8; 4] {
        window_payload(
            self.sc.saturating_add(col_offset),
            self.ec.saturating_add(col_offset),
        )
    }

    /// RASET payload with the row offset applied.
    pub fn row_payload(&self, row_offset: u16) -> [u8; 4] {
        window_payload(
            self.sr.saturating_add(row_offset),
            self.er.saturating_add(row_offset),
        )
    }
}

/// Clip inclusive corners `(x0, y0)`–`(x1, y1)` to `[0, width) × [0, height)`.
///
/// Returns the clipped corners, or `None` when nothing remains.
// SAFETY: comparisons and `- 1` run in i64 on u32-derived bounds.
#[allow(clippy::arithmetic_side_effects, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn clip_bounds(x0: i64, y0: i64, x1: i64, y1: i64, width: u32, height: u32) -> Option<(u16, u16, u16, u16)> {
    let x0 = x0.max(0);
    let y0 = y0.max(0);
    let x1 = x1.min(i64::from(width) - 1).min(i64::from(u16::MAX));
    let y1 = y1.min(i64::from(height) - 1).min(i64::from(u16::MAX));
    if x0 > x1 || y0 > y1 {
        return None;
    }
    Some((x0 as u16, y0 as u16, x1 as u16, y1 as u16))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_covering_single_pixel() {
        let win = AddressWindow::covering(5, 5, 5, 5);
        assert_eq!(win, AddressWindow { sc: 4, sr: 4, ec: 5, er: 5 });
        assert_eq!((win.width(), win.height()), (2, 2));
    }

    #[test]
    fn test_covering_normalises_corner_order() {
        let a = AddressWindow::covering(9, 2, 3, 7);
        let b = AddressWindow::covering(3, 7, 9, 2);
        assert_eq!(a, b);
        assert_eq!(a, AddressWindow { sc: 2, sr: 2, ec: 9, er: 7 });
    }

    #[test]
    fn test_payloads_apply_offsets() {
        let win = AddressWindow::covering(0, 0, 449, 599);
        assert_eq!(win.column_payload(16), [0x00, 0x10, 0x01, 0xD1]);
        assert_eq!(win.row_payload(0), [0x00, 0x00, 0x02, 0x57]);
    }

    #[test]
    fn test_row_pair() {
        let win = AddressWindow::covering(0, 0, 9, 9);
        let pair = win.row_pair(4);
        assert_eq!((pair.sr, pair.er), (4, 5));
        assert_eq!(pair.sc, win.sc);
    }

    #[test]
    fn test_clip_bounds() {
        assert_eq!(clip_bounds(-5, -5, 4, 4, 50, 50), Some((0, 0, 4, 4)));
        assert_eq!(clip_bounds(45, 45, 54, 54, 50, 50), Some((45, 45, 49, 49)));
        assert_eq!(clip_bounds(50, 0, 50, 0, 50, 50), None);
        assert_eq!(clip_bounds(3, 3, 2, 5, 50, 50), None);
        assert_eq!(clip_bounds(-10, 0, -6, 4, 50, 50), None);
    }
}
