//! Panel specification types
//!
//! Defines the fixed geometry of an AMOLED panel and its four orientation
//! profiles.

/// One orientation entry: MADCTL flags, logical extents and address offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct RotationProfile {
    /// MY/MX/MV bits for this orientation
    pub madctl: u8,
    /// Logical width after rotation
    pub width: u16,
    /// Logical height after rotation
    pub height: u16,
    /// Column offset added to every CASET address
    pub col_offset: u16,
    /// Row offset added to every RASET address
    pub row_offset: u16,
}

impl RotationProfile {
    /// Build a profile (const-friendly constructor for tables).
    pub const fn new(madctl: u8, width: u16, height: u16, col_offset: u16, row_offset: u16) -> Self {
        Self {
            madctl,
            width,
            height,
            col_offset,
            row_offset,
        }
    }

    /// Pixel count of the logical area.
    pub const fn pixel_count(&self) -> usize {
        // SAFETY: u16 * u16 always fits in usize on 32-bit+ targets.
        #[allow(clippy::arithmetic_side_effects)]
        let count = self.width as usize * self.height as usize;
        count
    }
}

/// Complete specification of an AMOLED panel
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct PanelSpec {
    /// Board / panel name (e.g., "LilyGo T4-S3 2.41\"")
    pub name: &'static str,

    /// Display controller chip
    pub controller: Controller,

    /// Native width in pixels (rotation 0)
    pub width: u16,

    /// Native height in pixels (rotation 0)
    pub height: u16,

    /// Default tear-effect scanline
    pub tear_scanline: u16,

    /// Orientation table indexed by rotation 0..=3
    pub rotations: [RotationProfile; 4],
}

impl PanelSpec {
    /// Profile for rotation `index mod 4`.
    pub fn rotation(&self, index: u8) -> RotationProfile {
        let [r0, r1, r2, r3] = self.rotations;
        match index % 4 {
            0 => r0,
            1 => r1,
            2 => r2,
            _ => r3,
        }
    }

    /// Largest pixel count over all orientations.
    pub fn max_pixel_count(&self) -> usize {
        self.rotations
            .iter()
            .map(RotationProfile::pixel_count)
            .max()
            .unwrap_or(0)
    }
}

/// AMOLED controller chips
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum Controller {
    /// Raydium RM67162 (LilyGo T-Display S3 AMOLED 1.91")
    RM67162,
    /// Raydium RM690B0 (LilyGo T4-S3 2.41")
    RM690B0,
    /// Sino Wealth SH8601 (Waveshare 1.8")
    SH8601,
    /// Chipone CO5300 (Waveshare 2.41" round and 2.06")
    CO5300,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::indexing_slicing)]
    use super::*;
    use crate::madctl;

    fn test_spec() -> PanelSpec {
        PanelSpec {
            name: "Test Panel",
            controller: Controller::RM690B0,
            width: 100,
            height: 60,
            tear_scanline: 60,
            rotations: [
                RotationProfile::new(madctl::DEFAULT, 100, 60, 2, 0),
                RotationProfile::new(madctl::MX | madctl::MV, 60, 100, 0, 2),
                RotationProfile::new(madctl::MX | madctl::MY, 100, 60, 2, 0),
                RotationProfile::new(madctl::MV | madctl::MY, 60, 100, 0, 2),
            ],
        }
    }

    #[test]
    fn test_rotation_index_wraps() {
        let spec = test_spec();
        assert_eq!(spec.rotation(5), spec.rotations[1]);
        assert_eq!(spec.rotation(255), spec.rotations[3]);
    }

    #[test]
    fn test_pixel_counts() {
        let spec = test_spec();
        assert_eq!(spec.rotations[0].pixel_count(), 6000);
        assert_eq!(spec.max_pixel_count(), 6000);
    }
}
