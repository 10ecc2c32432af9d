//! Primitive rasterizer
//!
//! Every shape is reduced to horizontal and vertical runs written straight
//! into the pixel buffer. Runs clip themselves, so shapes may hang off any
//! edge of the screen. Composite shapes draw their runs under a hold and
//! refresh their bounding box once.

use platform::PanelTransport;

use crate::alignment::clip_bounds;
use crate::color::Color;
use crate::display::Display;
use crate::error::Result;

impl<T: PanelTransport> Display<T> {
    /// Set one pixel and refresh it.
    pub fn pixel(&mut self, x: i32, y: i32, color: Color) -> Result<()> {
        self.run(i64::from(x), i64::from(y), 1, 1, color)
    }

    /// Horizontal line of `len` pixels starting at `(x, y)`.
    pub fn hline(&mut self, x: i32, y: i32, len: u32, color: Color) -> Result<()> {
        self.run(i64::from(x), i64::from(y), i64::from(len), 1, color)
    }

    /// Vertical line of `len` pixels starting at `(x, y)`.
    pub fn vline(&mut self, x: i32, y: i32, len: u32, color: Color) -> Result<()> {
        self.run(i64::from(x), i64::from(y), 1, i64::from(len), color)
    }

    /// Line between two inclusive end points.
    ///
    /// ```
    /// # use amoled_gfx::{Color, Display, DisplayConfig};
    /// # use amoled_testing::{small_panel, RecordingTransport};
    /// # let config = DisplayConfig::for_panel(small_panel(16, 16));
    /// let mut display = Display::new(RecordingTransport::new(), config).unwrap();
    /// display.line(0, 0, 7, 3, Color::WHITE).unwrap();
    /// assert_eq!(display.get_pixel(7, 3), Some(Color::WHITE));
    /// assert_eq!(display.flush_stats().flushes, 1);
    /// ```
    pub fn line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Color) -> Result<()> {
        let (x0, y0, x1, y1) = (i64::from(x0), i64::from(y0), i64::from(x1), i64::from(y1));
        let bounds = (x0.min(x1), y0.min(y1), x0.max(x1), y0.max(y1));
        self.batched(bounds, |d| d.line_runs(x0, y0, x1, y1, color))
    }

    /// Rectangle outline.
    // SAFETY: i64 arithmetic on i32 origins and u32 extents.
    #[allow(clippy::arithmetic_side_effects)]
    pub fn rect(&mut self, x: i32, y: i32, w: u32, h: u32, color: Color) -> Result<()> {
        let (x, y, w, h) = (i64::from(x), i64::from(y), i64::from(w), i64::from(h));
        if w == 0 || h == 0 {
            return Ok(());
        }
        if h == 1 || w == 1 {
            return self.run(x, y, w, h, color);
        }
        let (x1, y1) = (x + w - 1, y + h - 1);
        self.batched((x, y, x1, y1), |d| {
            d.run(x, y, w, 1, color)?;
            d.run(x, y1, w, 1, color)?;
            d.run(x, y, 1, h, color)?;
            d.run(x1, y, 1, h, color)
        })
    }

    /// Solid rectangle.
    pub fn fill_rect(&mut self, x: i32, y: i32, w: u32, h: u32, color: Color) -> Result<()> {
        self.run(i64::from(x), i64::from(y), i64::from(w), i64::from(h), color)
    }

    /// Circle outline of radius `r` centred on `(xm, ym)`.
    // SAFETY: i64 arithmetic on i32 centres and u32 radii.
    #[allow(clippy::arithmetic_side_effects)]
    pub fn circle(&mut self, xm: i32, ym: i32, r: u32, color: Color) -> Result<()> {
        let (xm, ym, r) = (i64::from(xm), i64::from(ym), i64::from(r));
        self.batched((xm - r, ym - r, xm + r, ym + r), |d| {
            if r == 0 {
                return d.run(xm, ym, 1, 1, color);
            }
            walk_octant(d, r, false, |d, x, y| {
                for (px, py) in [
                    (xm + x, ym + y),
                    (xm + x, ym - y),
                    (xm - x, ym + y),
                    (xm - x, ym - y),
                    (xm + y, ym + x),
                    (xm + y, ym - x),
                    (xm - y, ym + x),
                    (xm - y, ym - x),
                ] {
                    d.run(px, py, 1, 1, color)?;
                }
                Ok(())
            })
        })
    }

    /// Solid circle: four vertical spans per octant step.
    // SAFETY: i64 arithmetic on i32 centres and u32 radii.
    #[allow(clippy::arithmetic_side_effects)]
    pub fn fill_circle(&mut self, xm: i32, ym: i32, r: u32, color: Color) -> Result<()> {
        let (xm, ym, r) = (i64::from(xm), i64::from(ym), i64::from(r));
        self.batched((xm - r, ym - r, xm + r, ym + r), |d| {
            if r == 0 {
                return d.run(xm, ym, 1, 1, color);
            }
            walk_octant(d, r, false, |d, x, y| {
                d.run(xm + x, ym - y, 1, 2 * y + 1, color)?;
                d.run(xm - x, ym - y, 1, 2 * y + 1, color)?;
                d.run(xm + y, ym - x, 1, 2 * x + 1, color)?;
                d.run(xm - y, ym - x, 1, 2 * x + 1, color)
            })
        })
    }

    /// Ellipse outline with radii `rx`, `ry`.
    ///
    /// A zero radius collapses the ellipse to a single span along the other
    /// axis.
    // SAFETY: i64 arithmetic on i32 centres and u32 radii.
    #[allow(clippy::arithmetic_side_effects)]
    pub fn ellipse(&mut self, xm: i32, ym: i32, rx: u32, ry: u32, color: Color) -> Result<()> {
        let (xm, ym, rx, ry) = (i64::from(xm), i64::from(ym), i64::from(rx), i64::from(ry));
        self.batched((xm - rx, ym - ry, xm + rx, ym + ry), |d| {
            if rx == 0 || ry == 0 {
                return d.run(xm - rx, ym - ry, 2 * rx + 1, 2 * ry + 1, color);
            }
            walk_ellipse(d, rx, ry, |d, x, y| {
                for (px, py) in [
                    (xm + x, ym + y),
                    (xm + x, ym - y),
                    (xm - x, ym + y),
                    (xm - x, ym - y),
                ] {
                    d.run(px, py, 1, 1, color)?;
                }
                Ok(())
            })
        })
    }

    /// Solid ellipse: two vertical spans per step, one pass.
    // SAFETY: i64 arithmetic on i32 centres and u32 radii.
    #[allow(clippy::arithmetic_side_effects)]
    pub fn fill_ellipse(&mut self, xm: i32, ym: i32, rx: u32, ry: u32, color: Color) -> Result<()> {
        let (xm, ym, rx, ry) = (i64::from(xm), i64::from(ym), i64::from(rx), i64::from(ry));
        self.batched((xm - rx, ym - ry, xm + rx, ym + ry), |d| {
            if rx == 0 || ry == 0 {
                return d.run(xm - rx, ym - ry, 2 * rx + 1, 2 * ry + 1, color);
            }
            walk_ellipse(d, rx, ry, |d, x, y| {
                d.run(xm + x, ym - y, 1, 2 * y + 1, color)?;
                d.run(xm - x, ym - y, 1, 2 * y + 1, color)
            })
        })
    }

    /// Triangle outline.
    pub fn triangle(
        &mut self,
        (x0, y0): (i32, i32),
        (x1, y1): (i32, i32),
        (x2, y2): (i32, i32),
        color: Color,
    ) -> Result<()> {
        let bounds = (
            i64::from(x0.min(x1).min(x2)),
            i64::from(y0.min(y1).min(y2)),
            i64::from(x0.max(x1).max(x2)),
            i64::from(y0.max(y1).max(y2)),
        );
        self.batched(bounds, |d| {
            d.line(x0, y0, x1, y1, color)?;
            d.line(x1, y1, x2, y2, color)?;
            d.line(x0, y0, x2, y2, color)
        })
    }

    /// Solid triangle.
    ///
    /// Vertices are sorted by y; each scanline is filled between the long
    /// edge (v0→v2) and the short edge of the current half.
    // SAFETY: i64 arithmetic on sorted i32 vertices; divisors are non-zero
    // because each half is only walked when its y extent is positive.
    #[allow(clippy::arithmetic_side_effects, clippy::cast_precision_loss)]
    pub fn fill_triangle(
        &mut self,
        a: (i32, i32),
        b: (i32, i32),
        c: (i32, i32),
        color: Color,
    ) -> Result<()> {
        let mut v = [a, b, c].map(|(x, y)| (i64::from(x), i64::from(y)));
        v.sort_by_key(|&(_, y)| y);
        let [(x0, y0), (x1, y1), (x2, y2)] = v;
        let xmin = x0.min(x1).min(x2);
        let xmax = x0.max(x1).max(x2);

        if y0 == y2 {
            return self.run(xmin, y0, xmax - xmin + 1, 1, color);
        }

        self.batched((xmin, y0, xmax, y2), |d| {
            let dx02 = (x2 - x0) as f32 / (y2 - y0) as f32;
            let mut x02 = x0 as f32;

            if y1 > y0 {
                let dx01 = (x1 - x0) as f32 / (y1 - y0) as f32;
                let mut x01 = x0 as f32;
                for y in y0..=y1 {
                    d.scan_span(x01, x02, y, color)?;
                    x01 += dx01;
                    x02 += dx02;
                }
            } else {
                d.scan_span(x0 as f32, x1 as f32, y0, color)?;
                x02 += dx02;
            }

            if y2 > y1 {
                let dx12 = (x2 - x1) as f32 / (y2 - y1) as f32;
                let mut x12 = x1 as f32 + dx12;
                for y in y1 + 1..=y2 {
                    d.scan_span(x02, x12, y, color)?;
                    x02 += dx02;
                    x12 += dx12;
                }
            }
            Ok(())
        })
    }

    /// Rounded rectangle outline; the corner radius is `min(w, h) / 4`.
    // SAFETY: i64 arithmetic on i32 origins and u32 extents; 2 * bubble <= min(w, h).
    #[allow(clippy::arithmetic_side_effects)]
    pub fn bubble_rect(&mut self, x: i32, y: i32, w: u32, h: u32, color: Color) -> Result<()> {
        let Some(c) = Corners::new(x, y, w, h) else {
            return Ok(());
        };
        self.batched(c.bounds(), |d| {
            d.run(c.xm, c.ys, c.inner_w, 1, color)?;
            d.run(c.xm, c.ys + c.h - 1, c.inner_w, 1, color)?;
            d.run(c.xs, c.ym, 1, c.inner_h, color)?;
            d.run(c.xs + c.w - 1, c.ym, 1, c.inner_h, color)?;
            if c.bubble <= 1 {
                return Ok(());
            }
            let (right, bottom) = (c.xm + c.inner_w - 1, c.ym + c.inner_h - 1);
            walk_octant(d, c.bubble, true, |d, x, y| {
                for (px, py) in [
                    (c.xm - x, c.ym - y),
                    (c.xm - y, c.ym - x),
                    (right + x, c.ym - y),
                    (right + y, c.ym - x),
                    (c.xm - x, bottom + y),
                    (c.xm - y, bottom + x),
                    (right + x, bottom + y),
                    (right + y, bottom + x),
                ] {
                    d.run(px, py, 1, 1, color)?;
                }
                Ok(())
            })
        })
    }

    /// Solid rounded rectangle.
    // SAFETY: see `bubble_rect`.
    #[allow(clippy::arithmetic_side_effects)]
    pub fn fill_bubble_rect(&mut self, x: i32, y: i32, w: u32, h: u32, color: Color) -> Result<()> {
        let Some(c) = Corners::new(x, y, w, h) else {
            return Ok(());
        };
        self.batched(c.bounds(), |d| {
            d.run(c.xs, c.ym, c.w, c.inner_h, color)?;
            if c.bubble < 1 {
                return Ok(());
            }
            let bottom = c.ym + c.inner_h - 1;
            walk_octant(d, c.bubble, true, |d, x, y| {
                d.run(c.xm - x, c.ym - y, c.inner_w + 2 * x, 1, color)?;
                d.run(c.xm - y, c.ym - x, c.inner_w + 2 * y, 1, color)?;
                d.run(c.xm - x, bottom + y, c.inner_w + 2 * x, 1, color)?;
                d.run(c.xm - y, bottom + x, c.inner_w + 2 * y, 1, color)
            })
        })
    }

    /// Clip a `w × h` run to the buffer, fill it and refresh it.
    // SAFETY: i64 arithmetic on i32/u32-derived values; clipped extents fit u16.
    #[allow(clippy::arithmetic_side_effects)]
    pub(crate) fn run(&mut self, x: i64, y: i64, w: i64, h: i64, color: Color) -> Result<()> {
        if w <= 0 || h <= 0 {
            return Ok(());
        }
        let (x1, y1) = (x + w - 1, y + h - 1);
        if let Some((cx0, cy0, cx1, cy1)) = clip_bounds(x, y, x1, y1, self.width(), self.height()) {
            self.buffer.fill_region(
                color,
                u32::from(cx0),
                u32::from(cy0),
                u32::from(cx1) - u32::from(cx0) + 1,
                u32::from(cy1) - u32::from(cy0) + 1,
            );
        }
        self.refresh_bounds(x, y, x1, y1)
    }

    /// Horizontal span between two fractional x positions, both ends rounded
    /// to the nearest pixel and included.
    // SAFETY: positions come from i32 vertices interpolated in f32.
    #[allow(clippy::arithmetic_side_effects, clippy::cast_possible_truncation)]
    fn scan_span(&mut self, a: f32, b: f32, y: i64, color: Color) -> Result<()> {
        let (left, right) = (a.min(b).round() as i64, a.max(b).round() as i64);
        self.run(left, y, right - left + 1, 1, color)
    }

    /// Bresenham walk emitting one run per row (or column when steep).
    // SAFETY: i64 arithmetic on i32 end points.
    #[allow(clippy::arithmetic_side_effects)]
    pub(crate) fn line_runs(&mut self, x0: i64, y0: i64, x1: i64, y1: i64, color: Color) -> Result<()> {
        let steep = (y1 - y0).abs() > (x1 - x0).abs();
        let (mut x0, mut y0, mut x1, mut y1) = if steep {
            (y0, x0, y1, x1)
        } else {
            (x0, y0, x1, y1)
        };
        if x0 > x1 {
            core::mem::swap(&mut x0, &mut x1);
            core::mem::swap(&mut y0, &mut y1);
        }

        let dx = x1 - x0;
        let dy = (y1 - y0).abs();
        let ystep = if y0 < y1 { 1 } else { -1 };
        let mut err = dx >> 1;
        let mut start = x0;
        let mut len = 0;
        let mut y = y0;

        for x in x0..=x1 {
            len += 1;
            err -= dy;
            if err < 0 {
                err += dx;
                self.line_run(steep, start, y, len, color)?;
                len = 0;
                y += ystep;
                start = x + 1;
            }
        }
        if len > 0 {
            self.line_run(steep, start, y, len, color)?;
        }
        Ok(())
    }

    fn line_run(&mut self, steep: bool, start: i64, y: i64, len: i64, color: Color) -> Result<()> {
        if steep {
            self.run(y, start, 1, len, color)
        } else {
            self.run(start, y, len, 1, color)
        }
    }
}

/// Rounded-rectangle geometry shared by outline and fill.
#[derive(Clone, Copy)]
struct Corners {
    xs: i64,
    ys: i64,
    w: i64,
    h: i64,
    bubble: i64,
    xm: i64,
    ym: i64,
    inner_w: i64,
    inner_h: i64,
}

impl Corners {
    // SAFETY: bubble = min(w, h) / 4, so the inner extents stay positive.
    #[allow(clippy::arithmetic_side_effects)]
    fn new(x: i32, y: i32, w: u32, h: u32) -> Option<Self> {
        if w == 0 || h == 0 {
            return None;
        }
        let (xs, ys, w, h) = (i64::from(x), i64::from(y), i64::from(w), i64::from(h));
        let bubble = w.min(h) / 4;
        Some(Self {
            xs,
            ys,
            w,
            h,
            bubble,
            xm: xs + bubble,
            ym: ys + bubble,
            inner_w: w - 2 * bubble,
            inner_h: h - 2 * bubble,
        })
    }

    // SAFETY: w, h >= 1.
    #[allow(clippy::arithmetic_side_effects)]
    fn bounds(&self) -> (i64, i64, i64, i64) {
        (self.xs, self.ys, self.xs + self.w - 1, self.ys + self.h - 1)
    }
}

/// Midpoint circle walk over one octant, calling `step(x, y)` while `x <= y`.
///
/// With `skip_axis` the walk starts at `x = 1`, which the rounded-rectangle
/// corners use because their straight edges already cover the axis pixels.
// SAFETY: radius is u32-derived; the decision variable stays within i64.
#[allow(clippy::arithmetic_side_effects)]
fn walk_octant<S>(
    state: &mut S,
    radius: i64,
    skip_axis: bool,
    mut step: impl FnMut(&mut S, i64, i64) -> Result<()>,
) -> Result<()> {
    let (mut x, mut y, mut p) = if skip_axis {
        (1, radius, 6 - radius)
    } else {
        (0, radius, 1 - radius)
    };
    while x <= y {
        step(state, x, y)?;
        if p < 0 {
            p += 2 * x + 3;
        } else {
            p += 2 * (x - y) + 5;
            y -= 1;
        }
        x += 1;
    }
    Ok(())
}

/// Midpoint ellipse walk over one quadrant, calling `step(x, y)` for every
/// point from `(0, ry)` to `(rx, 0)`.
///
/// Region 1 steps x while the slope magnitude is below 1, region 2 steps y.
// SAFETY: radii are u32-derived; decision variables are f64.
#[allow(clippy::arithmetic_side_effects, clippy::cast_precision_loss)]
fn walk_ellipse<S>(
    state: &mut S,
    rx: i64,
    ry: i64,
    mut step: impl FnMut(&mut S, i64, i64) -> Result<()>,
) -> Result<()> {
    let rx2 = (rx * rx) as f64;
    let ry2 = (ry * ry) as f64;
    let (mut x, mut y) = (0i64, ry);

    let mut d1 = ry2 - rx2 * ry as f64 + 0.25 * rx2;
    let mut dx = 0.0;
    let mut dy = 2.0 * rx2 * y as f64;
    while dx <= dy {
        step(state, x, y)?;
        x += 1;
        dx += 2.0 * ry2;
        if d1 < 0.0 {
            d1 += dx + ry2;
        } else {
            y -= 1;
            dy -= 2.0 * rx2;
            d1 += dx - dy + ry2;
        }
    }

    let half_x = x as f64 + 0.5;
    let prev_y = (y - 1) as f64;
    let mut d2 = ry2 * half_x * half_x + rx2 * prev_y * prev_y - rx2 * ry2;
    while y >= 0 {
        step(state, x, y)?;
        y -= 1;
        dy -= 2.0 * rx2;
        if d2 > 0.0 {
            d2 += rx2 - dy;
        } else {
            x += 1;
            dx += 2.0 * ry2;
            d2 += dx - dy + rx2;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::indexing_slicing, clippy::unwrap_used)]
    use super::*;
    use crate::config::DisplayConfig;
    use amoled_testing::{small_panel, RecordingTransport};

    fn display() -> Display<RecordingTransport> {
        Display::new(RecordingTransport::new(), DisplayConfig::for_panel(small_panel(50, 50))).unwrap()
    }

    fn lit(d: &Display<RecordingTransport>) -> Vec<(i32, i32)> {
        let mut out = Vec::new();
        for y in 0..d.height() as i32 {
            for x in 0..d.width() as i32 {
                if d.get_pixel(x, y) != Some(Color::BLACK) {
                    out.push((x, y));
                }
            }
        }
        out
    }

    #[test]
    fn test_fill_rect_scenario() {
        let mut d = display();
        d.fill_rect(10, 10, 5, 5, Color::RED).unwrap();
        assert_eq!(d.get_pixel(12, 12), Some(Color::RED));
        assert_eq!(d.get_pixel(16, 16), Some(Color::BLACK));
        assert_eq!(lit(&d).len(), 25);
    }

    #[test]
    fn test_circle_scenario() {
        let mut d = display();
        d.circle(20, 20, 5, Color::GREEN).unwrap();
        assert_eq!(d.get_pixel(20, 25), Some(Color::GREEN));
        assert_eq!(d.get_pixel(20, 15), Some(Color::GREEN));
        assert_eq!(d.get_pixel(25, 20), Some(Color::GREEN));
        assert_eq!(d.get_pixel(20, 20), Some(Color::BLACK));
        assert_eq!(d.flush_stats().flushes, 1);
    }

    #[test]
    fn test_zero_radius_circle_is_one_pixel() {
        let mut d = display();
        d.circle(3, 3, 0, Color::WHITE).unwrap();
        assert_eq!(lit(&d), vec![(3, 3)]);
    }

    #[test]
    fn test_fill_circle_spans_full_diameter() {
        let mut d = display();
        d.fill_circle(20, 20, 4, Color::WHITE).unwrap();
        for i in 16..=24 {
            assert_eq!(d.get_pixel(20, i), Some(Color::WHITE));
            assert_eq!(d.get_pixel(i, 20), Some(Color::WHITE));
        }
        assert_eq!(d.get_pixel(20, 25), Some(Color::BLACK));
        assert_eq!(d.get_pixel(25, 20), Some(Color::BLACK));
    }

    #[test]
    fn test_line_single_point() {
        let mut d = display();
        d.line(7, 9, 7, 9, Color::WHITE).unwrap();
        assert_eq!(lit(&d), vec![(7, 9)]);
    }

    #[test]
    fn test_line_diagonal_and_steep() {
        let mut d = display();
        d.line(0, 0, 4, 4, Color::WHITE).unwrap();
        assert_eq!(lit(&d), vec![(0, 0), (1, 1), (2, 2), (3, 3), (4, 4)]);

        let mut d = display();
        d.line(2, 0, 3, 9, Color::WHITE).unwrap();
        let pixels = lit(&d);
        assert_eq!(pixels.len(), 10);
        assert!(pixels.iter().all(|&(x, _)| x == 2 || x == 3));
    }

    #[test]
    fn test_line_off_screen_is_clipped() {
        let mut d = display();
        d.line(-10, 5, 60, 5, Color::WHITE).unwrap();
        assert_eq!(lit(&d).len(), 50);
        assert_eq!(d.flush_stats().flushes, 1);
    }

    #[test]
    fn test_rect_outline_and_degenerate() {
        let mut d = display();
        d.rect(1, 1, 4, 3, Color::WHITE).unwrap();
        assert_eq!(lit(&d).len(), 10);
        assert_eq!(d.get_pixel(2, 2), Some(Color::BLACK));

        let mut d = display();
        d.rect(5, 5, 6, 1, Color::WHITE).unwrap();
        assert_eq!(lit(&d).len(), 6);
        d.rect(0, 0, 0, 5, Color::WHITE).unwrap();
        assert_eq!(lit(&d).len(), 6);
    }

    #[test]
    fn test_ellipse_extremes() {
        let mut d = display();
        d.ellipse(25, 25, 10, 5, Color::WHITE).unwrap();
        for (x, y) in [(35, 25), (15, 25), (25, 30), (25, 20)] {
            assert_eq!(d.get_pixel(x, y), Some(Color::WHITE), "({x}, {y})");
        }
        assert_eq!(d.get_pixel(25, 25), Some(Color::BLACK));
    }

    #[test]
    fn test_flat_ellipse_is_a_span() {
        let mut d = display();
        d.ellipse(10, 10, 0, 3, Color::WHITE).unwrap();
        assert_eq!(lit(&d), (7..=13).map(|y| (10, y)).collect::<Vec<_>>());

        let mut d = display();
        d.fill_ellipse(10, 10, 2, 0, Color::WHITE).unwrap();
        assert_eq!(lit(&d), (8..=12).map(|x| (x, 10)).collect::<Vec<_>>());
    }

    #[test]
    fn test_fill_ellipse_covers_outline() {
        let mut outline = display();
        outline.ellipse(25, 25, 12, 7, Color::WHITE).unwrap();
        let mut filled = display();
        filled.fill_ellipse(25, 25, 12, 7, Color::WHITE).unwrap();
        for (x, y) in lit(&outline) {
            assert_eq!(filled.get_pixel(x, y), Some(Color::WHITE));
        }
        assert_eq!(filled.get_pixel(25, 25), Some(Color::WHITE));
    }

    #[test]
    fn test_fill_triangle_contains_vertices() {
        let mut d = display();
        d.fill_triangle((5, 5), (30, 10), (12, 40), Color::WHITE).unwrap();
        for (x, y) in [(5, 5), (30, 10), (12, 40), (15, 15)] {
            assert_eq!(d.get_pixel(x, y), Some(Color::WHITE), "({x}, {y})");
        }
        assert_eq!(d.get_pixel(40, 40), Some(Color::BLACK));
        assert_eq!(d.flush_stats().flushes, 1);
    }

    #[test]
    fn test_fill_triangle_flat_top_and_flat() {
        let mut d = display();
        d.fill_triangle((0, 0), (10, 0), (5, 5), Color::WHITE).unwrap();
        assert_eq!(d.get_pixel(0, 0), Some(Color::WHITE));
        assert_eq!(d.get_pixel(10, 0), Some(Color::WHITE));
        assert_eq!(d.get_pixel(5, 5), Some(Color::WHITE));

        let mut d = display();
        d.fill_triangle((3, 7), (9, 7), (6, 7), Color::WHITE).unwrap();
        assert_eq!(lit(&d), (3..=9).map(|x| (x, 7)).collect::<Vec<_>>());
    }

    #[test]
    fn test_triangle_outline_hits_vertices() {
        let mut d = display();
        d.triangle((2, 2), (20, 4), (8, 18), Color::WHITE).unwrap();
        for (x, y) in [(2, 2), (20, 4), (8, 18)] {
            assert_eq!(d.get_pixel(x, y), Some(Color::WHITE));
        }
        assert_eq!(d.flush_stats().flushes, 1);
    }

    #[test]
    fn test_bubble_rect_rounds_corners() {
        let mut d = display();
        d.bubble_rect(0, 0, 20, 12, Color::WHITE).unwrap();
        assert_eq!(d.get_pixel(0, 0), Some(Color::BLACK));
        assert_eq!(d.get_pixel(10, 0), Some(Color::WHITE));
        assert_eq!(d.get_pixel(0, 6), Some(Color::WHITE));
        assert_eq!(d.get_pixel(19, 6), Some(Color::WHITE));
        assert_eq!(d.get_pixel(10, 11), Some(Color::WHITE));
    }

    #[test]
    fn test_fill_bubble_rect_is_symmetric() {
        let mut d = display();
        d.fill_bubble_rect(4, 4, 21, 13, Color::WHITE).unwrap();
        let pixels = lit(&d);
        for &(x, y) in &pixels {
            let mirrored = (4 + 24 - x, y);
            assert!(pixels.contains(&mirrored), "{mirrored:?} missing");
        }
        assert_eq!(d.get_pixel(4, 4), Some(Color::BLACK));
        assert_eq!(d.get_pixel(14, 10), Some(Color::WHITE));
    }

    #[test]
    fn test_fill_bubble_rect_covers_outline() {
        let mut outline = display();
        outline.bubble_rect(3, 3, 30, 20, Color::WHITE).unwrap();
        let mut filled = display();
        filled.fill_bubble_rect(3, 3, 30, 20, Color::WHITE).unwrap();
        for (x, y) in lit(&outline) {
            assert_eq!(filled.get_pixel(x, y), Some(Color::WHITE), "({x}, {y})");
        }
    }
}
