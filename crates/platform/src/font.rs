//! Outline (TrueType-style) font engine abstraction
//!
//! The rasterizer itself lives outside this workspace; the text layer only
//! needs glyph lookup, metrics, kerning and an 8-bit coverage render.

/// Opaque glyph identifier issued by [`OutlineFont::lookup`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GlyphId(pub u32);

/// Per-glyph placement metrics, in pixels at the font's current scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GlyphMetrics {
    /// Horizontal offset from the pen position to the bitmap's left edge
    pub left_bearing: i32,
    /// Horizontal pen advance after this glyph
    pub advance: i32,
    /// Vertical offset from the baseline origin to the bitmap's top edge
    pub y_offset: i32,
    /// Tight bitmap width
    pub min_width: u32,
    /// Tight bitmap height
    pub min_height: u32,
}

/// Pair adjustment between two consecutive glyphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Kerning {
    /// Horizontal shift applied before the right glyph
    pub x_shift: i32,
    /// Vertical shift applied to the right glyph
    pub y_shift: i32,
}

/// Outline font engine capability.
pub trait OutlineFont {
    /// Map a code point to a glyph.
    fn lookup(&self, codepoint: char) -> Result<GlyphId, FontError>;

    /// Placement metrics for a glyph.
    fn metrics(&self, glyph: GlyphId) -> Result<GlyphMetrics, FontError>;

    /// Kerning between `left` and `right`, or `None` when the font has no
    /// pair adjustment (or kerning is disabled).
    fn kerning(&self, left: GlyphId, right: GlyphId) -> Result<Option<Kerning>, FontError> {
        let _ = (left, right);
        Ok(None)
    }

    /// Render `glyph` as row-major 8-bit coverage into `coverage`.
    ///
    /// `coverage.len() == width * height`; `width` may exceed the glyph's
    /// `min_width` (callers pad rows to a multiple of 4) and the extra
    /// columns must be written as 0.
    fn render(
        &self,
        glyph: GlyphId,
        width: u32,
        height: u32,
        coverage: &mut [u8],
    ) -> Result<(), FontError>;
}

/// Outline font errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FontError {
    /// Code point has no glyph
    UnknownGlyph,
    /// Glyph metrics could not be read
    BadMetrics,
    /// Glyph outline could not be rasterized
    Render,
    /// Font file could not be read
    Io,
}

impl core::error::Error for FontError {}

impl core::fmt::Display for FontError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::UnknownGlyph => write!(f, "Unknown glyph"),
            Self::BadMetrics => write!(f, "Bad glyph metrics"),
            Self::Render => write!(f, "Glyph rendering failed"),
            Self::Io => write!(f, "Font I/O error"),
        }
    }
}
