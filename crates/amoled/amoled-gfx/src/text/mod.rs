//! Text engines
//!
//! Four independent renderers share one pattern: walk the source bytes,
//! resolve a glyph, write it into the pixel buffer at an advancing cursor,
//! then refresh the text's bounding box once. Every draw returns the
//! horizontal advance it consumed, and every font can measure a string
//! without drawing it.
//!
//! | Font | Asset | Draw |
//! |------|-------|------|
//! | [`MonoFont`] | fixed cell, MSB-first rows | [`Display::text`] |
//! | [`ProportionalFont`] | per-glyph widths, bit-offset table, UTF-8 map | [`Display::write`] |
//! | [`VectorFont`] | Hershey-style stroke stream | [`Display::draw_vector`] |
//! | [`OutlineFont`] | external engine, 8-bit coverage | [`Display::draw_outline`] |
//!
//! [`FontAsset`] closes over all four for callers that pick a font at run
//! time.

mod mono;
mod outline;
mod proportional;
mod vector;

pub use mono::MonoFont;
pub use outline::measure_outline;
pub use proportional::ProportionalFont;
pub use vector::{VectorFont, STROKE_BIAS};

use platform::{OutlineFont, PanelTransport};

use crate::color::Color;
use crate::display::Display;
use crate::error::Result;

/// Foreground and optional background for text.
///
/// Without a background, unset glyph bits leave the buffer untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextStyle {
    /// Color of set bits / full coverage
    pub fg: Color,
    /// Color of clear bits / zero coverage, if any
    pub bg: Option<Color>,
}

impl TextStyle {
    /// Foreground only
    pub const fn new(fg: Color) -> Self {
        Self { fg, bg: None }
    }

    /// Also paint clear bits with `bg`.
    #[must_use]
    pub const fn with_background(mut self, bg: Color) -> Self {
        self.bg = Some(bg);
        self
    }
}

impl Default for TextStyle {
    fn default() -> Self {
        Self::new(Color::WHITE)
    }
}

/// A font of any supported kind.
#[derive(Clone, Copy)]
pub enum FontAsset<'a> {
    /// Fixed-pitch bitmap font
    Mono(&'a MonoFont<'a>),
    /// Variable-pitch bitmap font
    Proportional(&'a ProportionalFont<'a>),
    /// Stroke font drawn at `scale`
    Vector {
        /// Stroke data
        font: &'a VectorFont<'a>,
        /// Multiplier applied to every stroke coordinate
        scale: f32,
    },
    /// Anti-aliased outline font engine
    Outline(&'a dyn OutlineFont),
}

impl FontAsset<'_> {
    /// Horizontal advance `text` would consume.
    pub fn measure(&self, text: &str) -> Result<i32> {
        match *self {
            Self::Mono(font) => Ok(saturating_i32(font.measure(text))),
            Self::Proportional(font) => font.measure(text).map(saturating_i32),
            Self::Vector { font, scale } => font.measure(text, scale),
            Self::Outline(font) => measure_outline(font, text),
        }
    }
}

impl core::fmt::Debug for FontAsset<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Mono(font) => f.debug_tuple("Mono").field(font).finish(),
            Self::Proportional(font) => f.debug_tuple("Proportional").field(font).finish(),
            Self::Vector { font, scale } => f
                .debug_struct("Vector")
                .field("font", font)
                .field("scale", scale)
                .finish(),
            Self::Outline(_) => f.write_str("Outline(..)"),
        }
    }
}

impl<T: PanelTransport> Display<T> {
    /// Draw `text` with any font kind and return the advance consumed.
    ///
    /// Vector fonts only use `style.fg`.
    pub fn draw_text(&mut self, font: FontAsset<'_>, text: &str, x: i32, y: i32, style: TextStyle) -> Result<i32> {
        match font {
            FontAsset::Mono(font) => self.text(font, text, x, y, style),
            FontAsset::Proportional(font) => self.write(font, text, x, y, style),
            FontAsset::Vector { font, scale } => self.draw_vector(font, text, x, y, style.fg, scale),
            FontAsset::Outline(font) => self.draw_outline(font, text, x, y, style),
        }
    }

    /// Paint one row of packed glyph bits.
    ///
    /// `bits` yields one flag per column starting at `(x, y)`.
    pub(crate) fn paint_bits<I>(&mut self, x: i64, y: i64, bits: I, style: TextStyle)
    where
        I: IntoIterator<Item = bool>,
    {
        for (col, set) in (x..).zip(bits) {
            let color = if set { Some(style.fg) } else { style.bg };
            if let (Some(color), Ok(px), Ok(py)) = (color, i32::try_from(col), i32::try_from(y)) {
                self.buffer.set_pixel(px, py, color);
            }
        }
    }
}

pub(crate) fn saturating_i32(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}
