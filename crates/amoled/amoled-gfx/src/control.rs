//! Panel controls
//!
//! Parameterised DCS commands shared by every supported controller:
//! power-up, brightness, mirroring, inversion, tearing effect and vertical
//! scrolling. Chip-specific register tables are the board's business.

use amoled_specs::commands::Command;
use amoled_specs::madctl;
use embedded_hal::delay::DelayNs;
use platform::PanelTransport;

use crate::display::Display;
use crate::error::Result;

/// Settle time after SLPOUT before the controller accepts commands.
const SLEEP_OUT_DELAY_MS: u32 = 120;
/// Settle time after DISPON before the first frame.
const DISPLAY_ON_DELAY_MS: u32 = 10;

impl<T: PanelTransport> Display<T> {
    /// Power the panel up and push the current buffer.
    ///
    /// SLPOUT, wait, MADCTL, COLMOD, brightness 0, TEON, DISPON, wait,
    /// full-screen flush, brightness 0xFF.
    pub fn init(&mut self, delay: &mut impl DelayNs) -> Result<()> {
        self.command(Command::SleepOut, &[])?;
        delay.delay_ms(SLEEP_OUT_DELAY_MS);
        self.command(Command::MemoryAccessControl, &[self.madctl])?;
        self.command(Command::PixelFormat, &[self.bit_depth().colmod()])?;
        self.command(Command::WriteBrightness, &[0x00])?;
        self.command(Command::TearingOn, &[0x00])?;
        self.command(Command::DisplayOn, &[])?;
        delay.delay_ms(DISPLAY_ON_DELAY_MS);
        self.show()?;
        self.command(Command::WriteBrightness, &[0xFF])?;
        tracing::debug!(
            panel = self.panel.name,
            colmod = self.bit_depth().colmod(),
            madctl = self.madctl,
            "panel initialised"
        );
        Ok(())
    }

    /// Send a raw command with parameters.
    pub fn send_command(&mut self, cmd: u8, params: &[u8]) -> Result<()> {
        self.transport.send_params(cmd, params)?;
        Ok(())
    }

    fn command(&mut self, cmd: Command, params: &[u8]) -> Result<()> {
        self.send_command(cmd.opcode(), params)
    }

    fn write_madctl(&mut self, value: u8) -> Result<()> {
        self.madctl = value;
        self.command(Command::MemoryAccessControl, &[value])
    }

    /// Set panel brightness (0 = off, 0xFF = full).
    pub fn set_brightness(&mut self, level: u8) -> Result<()> {
        self.command(Command::WriteBrightness, &[level])
    }

    /// Full brightness
    pub fn backlight_on(&mut self) -> Result<()> {
        self.set_brightness(0xFF)
    }

    /// Zero brightness
    pub fn backlight_off(&mut self) -> Result<()> {
        self.set_brightness(0x00)
    }

    /// Mirror the scan direction horizontally and/or vertically.
    pub fn mirror(&mut self, mirror_x: bool, mirror_y: bool) -> Result<()> {
        let value = madctl::with_bit(self.madctl, madctl::MX, mirror_x);
        let value = madctl::with_bit(value, madctl::MY, mirror_y);
        self.write_madctl(value)
    }

    /// Exchange rows and columns in controller RAM.
    pub fn swap_xy(&mut self, swap: bool) -> Result<()> {
        self.write_madctl(madctl::with_bit(self.madctl, madctl::MV, swap))
    }

    /// Enable or disable color inversion.
    pub fn invert_color(&mut self, invert: bool) -> Result<()> {
        let cmd = if invert {
            Command::InversionOn
        } else {
            Command::InversionOff
        };
        self.command(cmd, &[])
    }

    /// Enter sleep and blank the panel.
    pub fn display_off(&mut self) -> Result<()> {
        self.command(Command::SleepIn, &[])?;
        self.command(Command::DisplayOff, &[])
    }

    /// Leave sleep and show RAM contents.
    pub fn display_on(&mut self) -> Result<()> {
        self.command(Command::SleepOut, &[])?;
        self.command(Command::DisplayOn, &[])
    }

    /// Controller software reset.
    pub fn software_reset(&mut self) -> Result<()> {
        self.command(Command::SoftwareReset, &[])
    }

    /// Enable the tearing-effect output.
    ///
    /// `mode` 0 signals V-blank only, 1 signals V-blank and H-blank.
    /// `scanline` defaults to the current logical height.
    pub fn set_tearing(&mut self, mode: u8, scanline: Option<u16>) -> Result<()> {
        let line = scanline.unwrap_or_else(|| u16::try_from(self.height()).unwrap_or(u16::MAX));
        self.command(Command::TearingOn, &[mode])?;
        self.command(Command::SetTearScanline, &line.to_be_bytes())
    }

    /// Disable the tearing-effect output.
    pub fn tearing_off(&mut self) -> Result<()> {
        self.command(Command::TearingOff, &[])
    }

    /// Define the vertical scroll area: top fixed, scrolling and bottom
    /// fixed line counts.
    pub fn vscroll_area(&mut self, top_fixed: u16, scroll: u16, bottom_fixed: u16) -> Result<()> {
        let [t0, t1] = top_fixed.to_be_bytes();
        let [s0, s1] = scroll.to_be_bytes();
        let [b0, b1] = bottom_fixed.to_be_bytes();
        self.command(Command::VerticalScrollDefinition, &[t0, t1, s0, s1, b0, b1])
    }

    /// Set the first line of the scroll area and the refresh direction.
    pub fn vscroll_start(&mut self, line: u16, bottom_up: bool) -> Result<()> {
        self.write_madctl(madctl::with_bit(self.madctl, madctl::ML, bottom_up))?;
        self.command(Command::VerticalScrollStart, &line.to_be_bytes())
    }
}
