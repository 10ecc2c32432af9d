//! Orientation selection
//!
//! A rotation index picks one of four [`RotationProfile`]s. Applying it
//! rewrites the MY/MX/MV bits of MADCTL (keeping ML, BGR and MH), reshapes
//! the pixel buffer to the profile's logical extents, switches the RAM
//! offset and selects the whole screen as the address window.

use amoled_specs::commands::Command;
use amoled_specs::{madctl, RotationProfile};
use platform::PanelTransport;

use crate::alignment::AddressWindow;
use crate::display::Display;
use crate::error::Result;
use crate::flush::{select_window, RamOffset};

impl<T: PanelTransport> Display<T> {
    /// Select rotation `index mod 4`.
    ///
    /// The buffer keeps its contents when the pixel count is unchanged (all
    /// built-in panels); otherwise it is reallocated and cleared.
    ///
    /// ```
    /// # use amoled_gfx::{Display, DisplayConfig};
    /// # use amoled_testing::RecordingTransport;
    /// let mut display = Display::new(RecordingTransport::new(), DisplayConfig::T4_S3).unwrap();
    /// display.set_rotation(1).unwrap();
    /// assert_eq!((display.width(), display.height()), (600, 450));
    /// assert_eq!(display.offset().row, 16);
    /// ```
    pub fn set_rotation(&mut self, index: u8) -> Result<()> {
        let rotation = index % 4;
        let profile = self.profile(rotation);
        self.buffer
            .reshape(u32::from(profile.width), u32::from(profile.height))?;

        self.rotation = rotation;
        self.madctl = madctl::merge_rotation(self.madctl, profile.madctl);
        self.offset = RamOffset {
            col: profile.col_offset,
            row: profile.row_offset,
        };
        self.transport
            .send_params(Command::MemoryAccessControl.opcode(), &[self.madctl])?;

        let full = AddressWindow::covering(
            0,
            0,
            profile.width.saturating_sub(1),
            profile.height.saturating_sub(1),
        );
        select_window(&mut self.transport, &full, self.offset)?;

        tracing::debug!(
            rotation,
            width = profile.width,
            height = profile.height,
            madctl = self.madctl,
            "rotation applied"
        );
        Ok(())
    }

    /// Rotate by `steps` quarter turns relative to the current rotation.
    pub fn rotate_by(&mut self, steps: u8) -> Result<()> {
        let target = self.rotation.wrapping_add(steps % 4) % 4;
        self.set_rotation(target)
    }

    /// Replace the orientation table and re-apply the current rotation.
    pub fn set_rotation_profiles(&mut self, profiles: [RotationProfile; 4]) -> Result<()> {
        self.rotations = profiles;
        self.set_rotation(self.rotation)
    }

    /// Current orientation table
    pub fn rotation_profiles(&self) -> &[RotationProfile; 4] {
        &self.rotations
    }

    fn profile(&self, rotation: u8) -> RotationProfile {
        let [r0, r1, r2, r3] = self.rotations;
        match rotation % 4 {
            0 => r0,
            1 => r1,
            2 => r2,
            _ => r3,
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::indexing_slicing, clippy::unwrap_used)]
    use super::*;
    use crate::config::DisplayConfig;
    use amoled_specs::panels;
    use amoled_testing::{small_panel, RecordingTransport};

    fn display(config: DisplayConfig) -> Display<RecordingTransport> {
        Display::new(RecordingTransport::new(), config).unwrap()
    }

    #[test]
    fn test_set_rotation_sends_madctl_then_full_window() {
        let mut d = display(DisplayConfig::for_panel(small_panel(50, 40)));
        d.set_rotation(1).unwrap();
        assert_eq!((d.width(), d.height()), (40, 50));
        assert_eq!(
            d.transport().commands(),
            vec![
                (0x36, vec![madctl::MX | madctl::MV]),
                (0x2A, vec![0, 0, 0, 39]),
                (0x2B, vec![0, 0, 0, 49]),
            ]
        );
    }

    #[test]
    fn test_rotation_keeps_color_order_bit() {
        let config = DisplayConfig::for_panel(small_panel(8, 8))
            .with_color_space(amoled_specs::ColorSpace::Bgr);
        let mut d = display(config);
        for k in 0..4 {
            d.set_rotation(k).unwrap();
            assert_eq!(d.madctl() & madctl::BGR, madctl::BGR);
        }
        assert_eq!(d.madctl() & 0xE0, madctl::MV | madctl::MY);
    }

    #[test]
    fn test_round_trip_restores_geometry() {
        for k in 0..4u8 {
            let mut d = display(DisplayConfig::T4_S3);
            let before = (d.width(), d.height(), d.offset());
            d.rotate_by(k).unwrap();
            d.rotate_by((4 - k) % 4).unwrap();
            assert_eq!((d.width(), d.height(), d.offset()), before);
            assert_eq!(d.rotation(), 0);
        }
    }

    #[test]
    fn test_offsets_follow_profile() {
        let mut d = display(DisplayConfig::T4_S3);
        let expected = panels::LILYGO_T4_S3_RM690B0.rotations;
        for (k, profile) in expected.iter().enumerate() {
            d.set_rotation(k as u8).unwrap();
            assert_eq!(d.offset().col, profile.col_offset);
            assert_eq!(d.offset().row, profile.row_offset);
        }
    }

    #[test]
    fn test_custom_profiles_apply_immediately() {
        let mut d = display(DisplayConfig::for_panel(small_panel(20, 10)));
        let custom = [RotationProfile::new(madctl::MY, 20, 10, 4, 2); 4];
        d.set_rotation_profiles(custom).unwrap();
        assert_eq!(d.offset(), RamOffset { col: 4, row: 2 });
        assert_eq!(d.madctl() & madctl::MY, madctl::MY);
        assert_eq!(d.rotation_profiles()[3], custom[3]);
    }

    #[test]
    fn test_reshape_preserves_pixels_when_area_matches() {
        let mut d = display(DisplayConfig::for_panel(small_panel(4, 2)));
        d.buffer.set_pixel(0, 0, crate::Color::RED);
        d.set_rotation(1).unwrap();
        assert_eq!(d.get_pixel(0, 0), Some(crate::Color::RED));
    }
}
