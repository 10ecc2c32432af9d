//! In-memory pixel store
//!
//! Row-major, `bytes_per_pixel` bytes per pixel, each pixel already in the
//! byte order the transport sends. Geometry is the post-rotation logical
//! extent.

use amoled_specs::BitDepth;

use crate::color::Color;
use crate::error::{try_zeroed, Result};

/// Pixel buffer owned by a [`Display`](crate::Display).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    data: Vec<u8>,
    width: u32,
    height: u32,
    depth: BitDepth,
}

impl PixelBuffer {
    /// Allocate a zero-filled (black) buffer.
    // SAFETY: panel extents are u16-sized, so width * height * 3 fits in usize.
    #[allow(clippy::arithmetic_side_effects)]
    pub fn allocate(width: u32, height: u32, depth: BitDepth) -> Result<Self> {
        let bytes = width as usize * height as usize * depth.bytes_per_pixel();
        let data = try_zeroed(bytes)?;
        Ok(Self {
            data,
            width,
            height,
            depth,
        })
    }

    /// Logical width in pixels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Logical height in pixels
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Bit depth of the stored pixels
    pub fn depth(&self) -> BitDepth {
        self.depth
    }

    /// Storage bytes per pixel
    pub fn bytes_per_pixel(&self) -> usize {
        self.depth.bytes_per_pixel()
    }

    /// The raw store.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Change the logical extent (rotation).
    ///
    /// Contents are kept when the pixel count is unchanged; otherwise the
    /// store is reallocated and cleared.
    // SAFETY: see `allocate`.
    #[allow(clippy::arithmetic_side_effects)]
    pub fn reshape(&mut self, width: u32, height: u32) -> Result<()> {
        let bytes = width as usize * height as usize * self.bytes_per_pixel();
        if bytes != self.data.len() {
            self.data = try_zeroed(bytes)?;
        }
        self.width = width;
        self.height = height;
        Ok(())
    }

    /// Byte offset of `(x, y)`, or `None` outside the buffer.
    // SAFETY: x < width and y < height are checked first; the product is
    // bounded by the buffer length.
    #[allow(clippy::arithmetic_side_effects)]
    fn offset(&self, x: u32, y: u32) -> Option<usize> {
        if x < self.width && y < self.height {
            Some((y as usize * self.width as usize + x as usize) * self.bytes_per_pixel())
        } else {
            None
        }
    }

    /// Write one pixel; coordinates outside the buffer are ignored.
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        let (Ok(x), Ok(y)) = (u32::try_from(x), u32::try_from(y)) else {
            return;
        };
        let bpp = self.bytes_per_pixel();
        let bytes = color.to_bytes();
        if let Some(start) = self.offset(x, y) {
            if let (Some(dst), Some(src)) = (self.data.get_mut(start..start.saturating_add(bpp)), bytes.get(..bpp)) {
                dst.copy_from_slice(src);
            }
        }
    }

    /// Read one pixel.
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<Color> {
        let x = u32::try_from(x).ok()?;
        let y = u32::try_from(y).ok()?;
        let start = self.offset(x, y)?;
        self.data
            .get(start..start.saturating_add(self.bytes_per_pixel()))
            .map(Color::from_bytes)
    }

    /// Fill a rectangle row by row.
    ///
    /// Callers clip first; anything past the right or bottom edge is
    /// dropped rather than wrapped.
    pub fn fill_region(&mut self, color: Color, x: u32, y: u32, w: u32, h: u32) {
        let bpp = self.bytes_per_pixel();
        let pattern = color.to_bytes();
        let Some(pixel) = pattern.get(..bpp) else {
            return;
        };
        let w = w.min(self.width.saturating_sub(x));
        let h = h.min(self.height.saturating_sub(y));
        for row in y..y.saturating_add(h) {
            if let Some(span) = self.row_mut(x, row, w) {
                for dst in span.chunks_exact_mut(bpp) {
                    dst.copy_from_slice(pixel);
                }
            }
        }
    }

    /// Fill the whole buffer.
    pub fn fill(&mut self, color: Color) {
        self.fill_region(color, 0, 0, self.width, self.height);
    }

    /// Bytes of `len` pixels starting at `(x, y)`; `None` if the span leaves the row.
    // SAFETY: x + len <= width is checked before the span is built.
    #[allow(clippy::arithmetic_side_effects)]
    pub fn row(&self, x: u32, y: u32, len: u32) -> Option<&[u8]> {
        if len == 0 || x.checked_add(len)? > self.width {
            return None;
        }
        let start = self.offset(x, y)?;
        self.data.get(start..start + len as usize * self.bytes_per_pixel())
    }

    /// Mutable variant of [`PixelBuffer::row`].
    // SAFETY: see `row`.
    #[allow(clippy::arithmetic_side_effects)]
    pub fn row_mut(&mut self, x: u32, y: u32, len: u32) -> Option<&mut [u8]> {
        if len == 0 || x.checked_add(len)? > self.width {
            return None;
        }
        let start = self.offset(x, y)?;
        let end = start + len as usize * self.bytes_per_pixel();
        self.data.get_mut(start..end)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::indexing_slicing, clippy::unwrap_used)]
    use super::*;

    fn buffer(w: u32, h: u32) -> PixelBuffer {
        PixelBuffer::allocate(w, h, BitDepth::Bpp16).unwrap()
    }

    #[test]
    fn test_allocate_is_zeroed() {
        let fb = buffer(10, 4);
        assert_eq!(fb.as_bytes().len(), 80);
        assert!(fb.as_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_allocate_24bpp_size() {
        let fb = PixelBuffer::allocate(10, 4, BitDepth::Bpp24).unwrap();
        assert_eq!(fb.as_bytes().len(), 120);
    }

    #[test]
    fn test_set_get_pixel() {
        let mut fb = buffer(10, 10);
        fb.set_pixel(3, 4, Color::RED);
        assert_eq!(fb.get_pixel(3, 4), Some(Color::RED));
        assert_eq!(fb.get_pixel(4, 3), Some(Color::BLACK));
    }

    #[test]
    fn test_out_of_range_pixel_is_ignored() {
        let mut fb = buffer(10, 10);
        let before = fb.clone();
        fb.set_pixel(-1, 0, Color::WHITE);
        fb.set_pixel(10, 0, Color::WHITE);
        fb.set_pixel(0, 10, Color::WHITE);
        assert_eq!(fb, before);
        assert_eq!(fb.get_pixel(10, 0), None);
        assert_eq!(fb.get_pixel(0, -1), None);
    }

    #[test]
    fn test_fill_region_stays_inside() {
        let mut fb = buffer(20, 20);
        fb.fill_region(Color::GREEN, 5, 6, 3, 2);
        for y in 0..20 {
            for x in 0..20 {
                let inside = (5..8).contains(&x) && (6..8).contains(&y);
                let expected = if inside { Color::GREEN } else { Color::BLACK };
                assert_eq!(fb.get_pixel(x, y), Some(expected), "({x}, {y})");
            }
        }
    }

    #[test]
    fn test_fill_region_drops_overhang() {
        let mut fb = buffer(8, 8);
        fb.fill_region(Color::WHITE, 6, 6, 10, 10);
        assert_eq!(fb.get_pixel(7, 7), Some(Color::WHITE));
        assert_eq!(fb.get_pixel(5, 7), Some(Color::BLACK));
    }

    #[test]
    fn test_row_bounds() {
        let fb = buffer(8, 2);
        assert_eq!(fb.row(0, 1, 8).map(<[u8]>::len), Some(16));
        assert!(fb.row(1, 1, 8).is_none());
        assert!(fb.row(0, 2, 1).is_none());
    }

    #[test]
    fn test_reshape_keeps_contents_for_same_area() {
        let mut fb = buffer(4, 2);
        fb.set_pixel(1, 0, Color::BLUE);
        fb.reshape(2, 4).unwrap();
        assert_eq!((fb.width(), fb.height()), (2, 4));
        // byte offset 2 is now (1, 0) in the new geometry too
        assert_eq!(fb.get_pixel(1, 0), Some(Color::BLUE));
        fb.reshape(3, 3).unwrap();
        assert_eq!(fb.as_bytes().len(), 18);
        assert!(fb.as_bytes().iter().all(|&b| b == 0));
    }
}
