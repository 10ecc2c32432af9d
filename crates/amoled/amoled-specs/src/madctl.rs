//! MADCTL (0x36) orientation register layout
//!
//! Rotation profiles own the top three bits (MY, MX, MV); the low five bits
//! (ML, BGR, MH and the two reserved flip bits) survive a rotation change.

/// Row address order: bottom to top
pub const MY: u8 = 0x80;
/// Column address order: right to left
pub const MX: u8 = 0x40;
/// Row/column exchange
pub const MV: u8 = 0x20;
/// Vertical refresh order: bottom to top
pub const ML: u8 = 0x10;
/// Color order: BGR
pub const BGR: u8 = 0x08;
/// Horizontal latch order: right to left
pub const MH: u8 = 0x04;
/// No flags set
pub const DEFAULT: u8 = 0x00;

/// Bits preserved across a rotation change.
pub const PRESERVED_ON_ROTATION: u8 = 0x1F;

/// Merge a rotation profile's flags into the current register value.
///
/// # Examples
/// ```
/// # use amoled_specs::madctl::{merge_rotation, BGR, MV, MX, MY};
/// // BGR survives, the old MY is replaced by the new MX|MV
/// assert_eq!(merge_rotation(MY | BGR, MX | MV), MX | MV | BGR);
/// ```
pub const fn merge_rotation(current: u8, rotation_flags: u8) -> u8 {
    (current & PRESERVED_ON_ROTATION) | rotation_flags
}

/// Set or clear `bit` in `value`.
pub const fn with_bit(value: u8, bit: u8, enabled: bool) -> u8 {
    if enabled {
        value | bit
    } else {
        value & !bit
    }
}
