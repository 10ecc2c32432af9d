//! Display configuration

use amoled_specs::panels;
use amoled_specs::{BitDepth, ColorSpace, PanelSpec};

use crate::flush::FlushStrategy;

/// Construction-time settings for a [`Display`](crate::Display)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayConfig {
    /// Panel geometry and orientation table
    pub panel: PanelSpec,
    /// Pixel depth on the wire and in the buffer
    pub bit_depth: BitDepth,
    /// RGB or BGR component order
    pub color_space: ColorSpace,
    /// Initial rotation index (taken mod 4)
    pub rotation: u8,
    /// How refreshed regions are streamed
    pub flush_strategy: FlushStrategy,
    /// Flush automatically after every draw call
    pub auto_refresh: bool,
}

impl DisplayConfig {
    /// LilyGo T4-S3 2.41" at 16 bpp, rotation 0
    pub const T4_S3: Self = Self::for_panel(panels::LILYGO_T4_S3_RM690B0);

    /// LilyGo T-Display S3 AMOLED at 16 bpp, rotation 0
    pub const T_DISPLAY_S3: Self = Self::for_panel(panels::LILYGO_T_DISPLAY_S3_RM67162);

    /// LilyGo T-Display S3 AMOLED in landscape
    pub const T_DISPLAY_S3_LANDSCAPE: Self = Self::T_DISPLAY_S3.with_rotation(1);

    /// Waveshare 1.8" at 16 bpp, rotation 0
    pub const WAVESHARE_1_8: Self = Self::for_panel(panels::WAVESHARE_1_8_SH8601);

    /// Waveshare 2.41" round at 16 bpp, rotation 0
    pub const WAVESHARE_2_41: Self = Self::for_panel(panels::WAVESHARE_2_41_CO5300);

    /// Defaults for `panel`: 16 bpp RGB, rotation 0, line-pair flushing,
    /// auto-refresh on.
    pub const fn for_panel(panel: PanelSpec) -> Self {
        Self {
            panel,
            bit_depth: BitDepth::Bpp16,
            color_space: ColorSpace::Rgb,
            rotation: 0,
            flush_strategy: FlushStrategy::LinePair,
            auto_refresh: true,
        }
    }

    /// Set the bit depth
    #[must_use]
    pub const fn with_bit_depth(mut self, bit_depth: BitDepth) -> Self {
        self.bit_depth = bit_depth;
        self
    }

    /// Set the component order
    #[must_use]
    pub const fn with_color_space(mut self, color_space: ColorSpace) -> Self {
        self.color_space = color_space;
        self
    }

    /// Set the initial rotation
    #[must_use]
    pub const fn with_rotation(mut self, rotation: u8) -> Self {
        self.rotation = rotation;
        self
    }

    /// Set the flush strategy
    #[must_use]
    pub const fn with_flush_strategy(mut self, flush_strategy: FlushStrategy) -> Self {
        self.flush_strategy = flush_strategy;
        self
    }

    /// Enable or disable automatic refresh
    #[must_use]
    pub const fn with_auto_refresh(mut self, auto_refresh: bool) -> Self {
        self.auto_refresh = auto_refresh;
        self
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self::T4_S3
    }
}
