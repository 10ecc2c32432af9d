//! Polygons: outline, scanline fill, rotation and centroid
//!
//! Points are `f32`. Rotation snaps them to whole pixels; unrotated
//! fractional points are rounded when outlined and floored when filled.

use platform::PanelTransport;

use crate::color::Color;
use crate::display::Display;
use crate::error::{GfxError, Result};

/// Largest number of points a [`Polygon`] may hold; it also bounds the
/// edge crossings found on one scanline.
pub const MAX_POLYGON_POINTS: usize = 32;

/// Rotation applied to a polygon before it is drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolygonRotation {
    /// Angle in radians, counter-clockwise in screen coordinates
    pub angle: f32,
    /// Pivot, in the polygon's own coordinates
    pub center: (f32, f32),
}

/// An ordered ring of points.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    points: heapless::Vec<(f32, f32), MAX_POLYGON_POINTS>,
}

impl Polygon {
    /// Build a polygon; it must have between 1 and [`MAX_POLYGON_POINTS`] points.
    pub fn new(points: &[(f32, f32)]) -> Result<Self> {
        if points.is_empty() {
            return Err(GfxError::InvalidArgument("polygon has no points"));
        }
        let points = heapless::Vec::from_slice(points)
            .map_err(|_| GfxError::InvalidArgument("polygon has too many points"))?;
        Ok(Self { points })
    }

    /// Build a polygon from coordinate slices; every slice needs at least
    /// an x and a y (extra values are ignored).
    ///
    /// ```
    /// # use amoled_gfx::Polygon;
    /// let square = Polygon::try_from_slices(&[&[0.0, 0.0], &[4.0, 0.0], &[4.0, 4.0], &[0.0, 4.0]]).unwrap();
    /// assert_eq!(square.center().unwrap(), (2, 2));
    /// assert!(Polygon::try_from_slices(&[&[1.0]]).is_err());
    /// ```
    pub fn try_from_slices(points: &[&[f32]]) -> Result<Self> {
        let mut pairs = heapless::Vec::<(f32, f32), MAX_POLYGON_POINTS>::new();
        for point in points {
            let &[x, y, ..] = *point else {
                return Err(GfxError::InvalidArgument("point needs two coordinates"));
            };
            pairs
                .push((x, y))
                .map_err(|_| GfxError::InvalidArgument("polygon has too many points"))?;
        }
        Self::new(&pairs)
    }

    /// The points, in order
    pub fn points(&self) -> &[(f32, f32)] {
        &self.points
    }

    /// Rotate every point about `rotation.center`, snapping the results to
    /// whole pixels (half-pixel rounding).
    // SAFETY: f32 arithmetic.
    #[allow(clippy::arithmetic_side_effects)]
    pub fn rotate(&mut self, rotation: PolygonRotation) {
        let (sin, cos) = rotation.angle.sin_cos();
        let (cx, cy) = rotation.center;
        for (x, y) in self.points.iter_mut() {
            let (dx, dy) = (*x - cx, *y - cy);
            *x = (cx + dx * cos - dy * sin + 0.5).floor();
            *y = (cy + dx * sin + dy * cos + 0.5).floor();
        }
    }

    /// Area centroid by the shoelace formula, truncated to whole pixels.
    ///
    /// Fails on a ring with zero signed area.
    // SAFETY: f64 arithmetic; the divisor is checked non-zero.
    #[allow(clippy::arithmetic_side_effects, clippy::cast_possible_truncation)]
    pub fn center(&self) -> Result<(i32, i32)> {
        let mut area = 0.0f64;
        let mut sx = 0.0f64;
        let mut sy = 0.0f64;
        for (&(x1, y1), &(x2, y2)) in self.edges() {
            let (x1, y1, x2, y2) = (f64::from(x1), f64::from(y1), f64::from(x2), f64::from(y2));
            let cross = x1 * y2 - y1 * x2;
            area += cross;
            sx += (x1 + x2) * cross;
            sy += (y1 + y2) * cross;
        }
        if area == 0.0 {
            return Err(GfxError::InvalidArgument("degenerate polygon"));
        }
        let z = 1.0 / (3.0 * area);
        Ok(((sx * z) as i32, (sy * z) as i32))
    }

    /// Consecutive point pairs, closing the ring.
    fn edges(&self) -> impl Iterator<Item = (&(f32, f32), &(f32, f32))> {
        self.points
            .iter()
            .zip(self.points.iter().skip(1).chain(self.points.first()))
    }

    fn transformed(&self, rotation: Option<PolygonRotation>) -> Self {
        let mut out = self.clone();
        if let Some(rotation) = rotation {
            out.rotate(rotation);
        }
        out
    }

    fn bounds(&self) -> (f32, f32, f32, f32) {
        self.points.iter().fold(
            (f32::INFINITY, f32::INFINITY, f32::NEG_INFINITY, f32::NEG_INFINITY),
            |(x0, y0, x1, y1), &(x, y)| (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
        )
    }
}

/// Centroid of a ring given as coordinate slices.
pub fn polygon_center(points: &[&[f32]]) -> Result<(i32, i32)> {
    Polygon::try_from_slices(points)?.center()
}

/// Nearest pixel.
#[allow(clippy::cast_possible_truncation)]
fn snap(v: f32) -> i64 {
    v.round() as i64
}

#[allow(clippy::cast_possible_truncation)]
fn floor(v: f32) -> i64 {
    v.floor() as i64
}

impl<T: PanelTransport> Display<T> {
    /// Closed polygon outline, translated by `(x, y)`.
    // SAFETY: i64 arithmetic on snapped f32 points and i32 offsets.
    #[allow(clippy::arithmetic_side_effects)]
    pub fn polygon(
        &mut self,
        polygon: &Polygon,
        x: i32,
        y: i32,
        color: Color,
        rotation: Option<PolygonRotation>,
    ) -> Result<()> {
        let shape = polygon.transformed(rotation);
        let (lx, ly) = (i64::from(x), i64::from(y));
        let place = |&(px, py): &(f32, f32)| (lx + snap(px), ly + snap(py));

        let (bx0, by0, bx1, by1) = shape.bounds();
        let bounds = (lx + snap(bx0), ly + snap(by0), lx + snap(bx1), ly + snap(by1));
        self.batched(bounds, |d| {
            for (a, b) in shape.edges() {
                let ((x0, y0), (x1, y1)) = (place(a), place(b));
                d.line_runs(x0, y0, x1, y1, color)?;
            }
            Ok(())
        })
    }

    /// Filled polygon (even-odd rule), translated by `(x, y)`.
    ///
    /// For each scanline the crossings with every non-horizontal edge are
    /// sorted and filled pairwise.
    // SAFETY: i64/f32 arithmetic; horizontal edges are skipped, so the
    // interpolation divisor is non-zero.
    #[allow(clippy::arithmetic_side_effects, clippy::cast_precision_loss)]
    pub fn fill_polygon(
        &mut self,
        polygon: &Polygon,
        x: i32,
        y: i32,
        color: Color,
        rotation: Option<PolygonRotation>,
    ) -> Result<()> {
        let shape = polygon.transformed(rotation);
        let (lx, ly) = (i64::from(x), i64::from(y));
        let (fx0, fy0, fx1, fy1) = shape.bounds();
        let (min_x, min_y, max_x, max_y) = (floor(fx0), floor(fy0), floor(fx1), floor(fy1));

        self.batched((lx + min_x, ly + min_y, lx + max_x, ly + max_y), |d| {
            let mut nodes = heapless::Vec::<i64, MAX_POLYGON_POINTS>::new();
            for row in min_y..max_y {
                let py = row as f32;
                nodes.clear();
                for (&(xi, yi), &(xj, yj)) in shape.edges() {
                    if yi == yj {
                        continue;
                    }
                    if (yi < py && yj >= py) || (yj < py && yi >= py) {
                        let cross = xi + (py - yi) / (yj - yi) * (xj - xi);
                        nodes
                            .push(floor(cross))
                            .map_err(|_| GfxError::InvalidArgument("polygon too complex"))?;
                    }
                }
                nodes.sort_unstable();

                for pair in nodes.chunks_exact(2) {
                    let &[start, end] = pair else { continue };
                    if start >= max_x {
                        break;
                    }
                    if end > min_x {
                        let (start, end) = (start.max(min_x), end.min(max_x));
                        d.run(lx + start, ly + row, end - start + 1, 1, color)?;
                    }
                }
            }
            Ok(())
        })
    }
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

    fn square(size: f32) -> Polygon {
        Polygon::new(&[(0.0, 0.0), (size, 0.0), (size, size), (0.0, size)]).unwrap()
    }

    fn lit(d: &Display<RecordingTransport>) -> Vec<(i32, i32)> {
        let mut out = Vec::new();
        for y in 0..50 {
            for x in 0..50 {
                if d.get_pixel(x, y) != Some(Color::BLACK) {
                    out.push((x, y));
                }
            }
        }
        out
    }

    #[test]
    fn test_new_rejects_empty_and_oversized() {
        assert!(matches!(Polygon::new(&[]), Err(GfxError::InvalidArgument(_))));
        let many = [(0.0, 0.0); MAX_POLYGON_POINTS + 1];
        assert!(matches!(Polygon::new(&many), Err(GfxError::InvalidArgument(_))));
        assert!(Polygon::new(&many[..MAX_POLYGON_POINTS]).is_ok());
    }

    #[test]
    fn test_center_of_triangle_and_degenerate() {
        let tri = Polygon::new(&[(0.0, 0.0), (9.0, 0.0), (0.0, 9.0)]).unwrap();
        assert_eq!(tri.center().unwrap(), (3, 3));
        let flat = Polygon::new(&[(0.0, 0.0), (5.0, 0.0), (9.0, 0.0)]).unwrap();
        assert_eq!(flat.center(), Err(GfxError::InvalidArgument("degenerate polygon")));
        assert_eq!(polygon_center(&[&[0.0, 0.0], &[10.0, 0.0], &[10.0, 10.0], &[0.0, 10.0]]), Ok((5, 5)));
    }

    #[test]
    fn test_outline_closes_ring() {
        let mut d = display();
        d.polygon(&square(10.0), 5, 5, Color::WHITE, None).unwrap();
        for (x, y) in [(5, 5), (15, 5), (15, 15), (5, 15), (5, 10), (10, 15)] {
            assert_eq!(d.get_pixel(x, y), Some(Color::WHITE), "({x}, {y})");
        }
        assert_eq!(d.get_pixel(10, 10), Some(Color::BLACK));
        assert_eq!(lit(&d).len(), 40);
        assert_eq!(d.flush_stats().flushes, 1);
    }

    #[test]
    fn test_fill_square() {
        let mut d = display();
        d.fill_polygon(&square(10.0), 5, 5, Color::WHITE, None).unwrap();
        assert_eq!(d.get_pixel(10, 10), Some(Color::WHITE));
        assert_eq!(d.get_pixel(5, 6), Some(Color::WHITE));
        assert_eq!(d.get_pixel(15, 14), Some(Color::WHITE));
        assert_eq!(d.get_pixel(16, 10), Some(Color::BLACK));
        assert_eq!(d.get_pixel(4, 10), Some(Color::BLACK));
        assert_eq!(d.flush_stats().flushes, 1);
    }

    #[test]
    fn test_fill_concave_leaves_notch_empty() {
        // U shape: notch between x = 4 and x = 8, open at the top.
        let u = Polygon::new(&[
            (0.0, 0.0),
            (4.0, 0.0),
            (4.0, 8.0),
            (8.0, 8.0),
            (8.0, 0.0),
            (12.0, 0.0),
            (12.0, 12.0),
            (0.0, 12.0),
        ])
        .unwrap();
        let mut d = display();
        d.fill_polygon(&u, 0, 0, Color::WHITE, None).unwrap();
        assert_eq!(d.get_pixel(2, 4), Some(Color::WHITE));
        assert_eq!(d.get_pixel(10, 4), Some(Color::WHITE));
        assert_eq!(d.get_pixel(6, 4), Some(Color::BLACK));
        assert_eq!(d.get_pixel(6, 10), Some(Color::WHITE));
    }

    #[test]
    fn test_quarter_turn_square_fills_same_pixels() {
        let mut plain = display();
        plain.fill_polygon(&square(10.0), 5, 5, Color::WHITE, None).unwrap();
        let mut turned = display();
        let rotation = PolygonRotation {
            angle: core::f32::consts::FRAC_PI_2,
            center: (5.0, 5.0),
        };
        turned.fill_polygon(&square(10.0), 5, 5, Color::WHITE, Some(rotation)).unwrap();
        assert_eq!(lit(&plain), lit(&turned));
    }

    #[test]
    fn test_rotate_about_center() {
        let mut p = Polygon::new(&[(10.0, 0.0)]).unwrap();
        p.rotate(PolygonRotation {
            angle: core::f32::consts::PI,
            center: (5.0, 0.0),
        });
        assert_eq!(p.points(), &[(0.0, 0.0)]);
    }
}
