//! embedded-graphics interop
//!
//! Lets `embedded-graphics` primitives, fonts and images render into the
//! pixel buffer. Each `draw_iter` call refreshes the box it touched once.

use amoled_specs::BitDepth;
use embedded_graphics::pixelcolor::raw::{RawData, RawU16};
use embedded_graphics::pixelcolor::{Rgb565, Rgb888};
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use platform::PanelTransport;

use crate::color::Color;
use crate::display::Display;
use crate::error::GfxError;

/// Convert an embedded-graphics color for a buffer of `depth`.
pub fn from_rgb565(color: Rgb565, depth: BitDepth) -> Color {
    match depth {
        BitDepth::Bpp16 => Color::from_logical(depth, u32::from(RawU16::from(color).into_inner())),
        _ => {
            let wide = Rgb888::from(color);
            Color::from_rgb(depth, wide.r(), wide.g(), wide.b())
        }
    }
}

impl<T: PanelTransport> DrawTarget for Display<T> {
    type Color = Rgb565;
    type Error = GfxError;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let depth = self.bit_depth();
        let mut touched: Option<(i32, i32, i32, i32)> = None;
        for Pixel(point, color) in pixels {
            self.buffer.set_pixel(point.x, point.y, from_rgb565(color, depth));
            touched = Some(match touched {
                None => (point.x, point.y, point.x, point.y),
                Some((x0, y0, x1, y1)) => (x0.min(point.x), y0.min(point.y), x1.max(point.x), y1.max(point.y)),
            });
        }
        match touched {
            Some((x0, y0, x1, y1)) => {
                self.refresh_bounds(i64::from(x0), i64::from(y0), i64::from(x1), i64::from(y1))
            }
            None => Ok(()),
        }
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let fill = from_rgb565(color, self.bit_depth());
        self.fill_rect(area.top_left.x, area.top_left.y, area.size.width, area.size.height, fill)
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        let fill = from_rgb565(color, self.bit_depth());
        self.fill(fill)
    }
}

impl<T: PanelTransport> OriginDimensions for Display<T> {
    fn size(&self) -> Size {
        Size::new(self.width(), self.height())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::indexing_slicing, clippy::unwrap_used)]
    use super::*;
    use crate::config::DisplayConfig;
    use amoled_testing::{small_panel, RecordingTransport};
    use embedded_graphics::primitives::{Line, PrimitiveStyle};

    fn display() -> Display<RecordingTransport> {
        Display::new(RecordingTransport::new(), DisplayConfig::for_panel(small_panel(32, 32))).unwrap()
    }

    #[test]
    fn test_rgb565_maps_to_named_colors() {
        assert_eq!(from_rgb565(Rgb565::RED, BitDepth::Bpp16), Color::RED);
        assert_eq!(from_rgb565(Rgb565::WHITE, BitDepth::Bpp16), Color::WHITE);
        assert_eq!(from_rgb565(Rgb565::BLUE, BitDepth::Bpp16), Color::BLUE);
        let red24 = from_rgb565(Rgb565::RED, BitDepth::Bpp24);
        assert_eq!(red24.to_logical(BitDepth::Bpp24), 0xFF_0000);
    }

    #[test]
    fn test_primitive_draws_with_one_refresh() {
        let mut d = display();
        Line::new(Point::new(0, 0), Point::new(9, 0))
            .into_styled(PrimitiveStyle::with_stroke(Rgb565::GREEN, 1))
            .draw(&mut d)
            .unwrap();
        assert_eq!(d.get_pixel(9, 0), Some(Color::GREEN));
        assert_eq!(d.flush_stats().flushes, 1);
    }

    #[test]
    fn test_fill_solid_clips() {
        let mut d = display();
        let area = Rectangle::new(Point::new(28, -2), Size::new(8, 4));
        d.fill_solid(&area, Rgb565::RED).unwrap();
        assert_eq!(d.get_pixel(31, 1), Some(Color::RED));
        assert_eq!(d.get_pixel(27, 1), Some(Color::BLACK));
    }

    #[test]
    fn test_size_follows_rotation() {
        let mut d = Display::new(RecordingTransport::new(), DisplayConfig::for_panel(small_panel(40, 20))).unwrap();
        assert_eq!(d.size(), Size::new(40, 20));
        d.set_rotation(1).unwrap();
        assert_eq!(d.size(), Size::new(20, 40));
    }

    #[test]
    fn test_empty_iterator_sends_nothing() {
        let mut d = display();
        d.draw_iter(core::iter::empty()).unwrap();
        assert!(d.transport().records().is_empty());
    }
}
