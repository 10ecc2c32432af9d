//! User command set shared by the supported AMOLED controllers
//!
//! Only the MIPI-DCS user page is listed; manufacturer pages used by the
//! per-chip power-up tables are not part of this crate.

/// Controller command opcodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Command {
    /// No operation
    Nop = 0x00,
    /// Software reset (frame memory is kept)
    SoftwareReset = 0x01,
    /// Enter sleep mode
    SleepIn = 0x10,
    /// Exit sleep mode
    SleepOut = 0x11,
    /// Normal display mode on
    NormalDisplayOn = 0x13,
    /// Display inversion off
    InversionOff = 0x20,
    /// Display inversion on
    InversionOn = 0x21,
    /// Display output off
    DisplayOff = 0x28,
    /// Display output on
    DisplayOn = 0x29,
    /// Column address window (4 bytes: SC hi, SC lo, EC hi, EC lo)
    ColumnAddressSet = 0x2A,
    /// Row address window (4 bytes: SR hi, SR lo, ER hi, ER lo)
    RowAddressSet = 0x2B,
    /// Memory write into the selected window
    MemoryWrite = 0x2C,
    /// Vertical scroll definition (6 bytes: TFA, VSA, BFA, big-endian)
    VerticalScrollDefinition = 0x33,
    /// Tearing effect line off
    TearingOff = 0x34,
    /// Tearing effect line on (1 byte: mode)
    TearingOn = 0x35,
    /// Memory data access control (1 byte, see [`crate::madctl`])
    MemoryAccessControl = 0x36,
    /// Vertical scroll start address (2 bytes)
    VerticalScrollStart = 0x37,
    /// Interface pixel format (1 byte, see [`crate::BitDepth::colmod`])
    PixelFormat = 0x3A,
    /// Tear scanline (2 bytes)
    SetTearScanline = 0x44,
    /// Display brightness (1 byte)
    WriteBrightness = 0x51,
    /// Control display 1
    WriteControlDisplay = 0x53,
}

impl Command {
    /// Raw opcode byte.
    pub const fn opcode(self) -> u8 {
        self as u8
    }
}

impl From<Command> for u8 {
    fn from(cmd: Command) -> Self {
        cmd.opcode()
    }
}

/// Encode a start/end pair as the 4-byte big-endian CASET/RASET payload.
///
/// # Examples
/// ```
/// # use amoled_specs::commands::window_payload;
/// assert_eq!(window_payload(16, 465), [0x00, 0x10, 0x01, 0xD1]);
/// ```
pub const fn window_payload(start: u16, end: u16) -> [u8; 4] {
    let s = start.to_be_bytes();
    let e = end.to_be_bytes();
    [s[0], s[1], e[0], e[1]]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_addressing_opcodes() {
        assert_eq!(Command::ColumnAddressSet.opcode(), 0x2A);
        assert_eq!(Command::RowAddressSet.opcode(), 0x2B);
        assert_eq!(Command::MemoryWrite.opcode(), 0x2C);
        assert_eq!(u8::from(Command::MemoryAccessControl), 0x36);
    }

    #[test]
    fn test_window_payload_is_big_endian() {
        assert_eq!(window_payload(0, 1), [0, 0, 0, 1]);
        assert_eq!(window_payload(0x0102, 0x0304), [1, 2, 3, 4]);
    }
}
