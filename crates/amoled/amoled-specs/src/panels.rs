//! AMOLED board specifications
//!
//! Pre-configured specs for the LilyGo and Waveshare ESP32-S3 AMOLED boards.
//! Orientation tables come from the boards' reference drivers; offsets are
//! the visible-area origin inside controller RAM.

use crate::madctl::{DEFAULT, MV, MX, MY};
use crate::{Controller, PanelSpec, RotationProfile};

/// LilyGo T-Display S3 AMOLED 1.91" (240×536, RM67162)
pub const LILYGO_T_DISPLAY_S3_RM67162: PanelSpec = PanelSpec {
    name: "LilyGo T-Display S3 AMOLED 1.91\"",
    controller: Controller::RM67162,
    width: 240,
    height: 536,
    tear_scanline: 536,
    rotations: [
        RotationProfile::new(DEFAULT, 240, 536, 0, 0),
        RotationProfile::new(MX | MV, 536, 240, 0, 0),
        RotationProfile::new(MX | MY, 240, 536, 0, 0),
        RotationProfile::new(MV | MY, 536, 240, 0, 0),
    ],
};

/// LilyGo T4-S3 2.41" (450×600, RM690B0)
///
/// The visible area starts 16 pixels into controller RAM along the short
/// axis, so every address window carries that offset.
pub const LILYGO_T4_S3_RM690B0: PanelSpec = PanelSpec {
    name: "LilyGo T4-S3 2.41\"",
    controller: Controller::RM690B0,
    width: 450,
    height: 600,
    tear_scanline: 600,
    rotations: [
        RotationProfile::new(DEFAULT, 450, 600, 16, 0),
        RotationProfile::new(MX | MV, 600, 450, 0, 16),
        RotationProfile::new(MX | MY, 450, 600, 16, 0),
        RotationProfile::new(MV | MY, 600, 450, 0, 16),
    ],
};

/// Waveshare ESP32-S3 Touch AMOLED 1.8" (368×448, SH8601)
///
/// The SH8601 cannot exchange rows and columns; odd rotations mirror X.
pub const WAVESHARE_1_8_SH8601: PanelSpec = PanelSpec {
    name: "Waveshare ESP32-S3 Touch AMOLED 1.8\"",
    controller: Controller::SH8601,
    width: 368,
    height: 448,
    tear_scanline: 448,
    rotations: [
        RotationProfile::new(DEFAULT, 368, 448, 0, 0),
        RotationProfile::new(MX, 368, 448, 0, 0),
        RotationProfile::new(DEFAULT, 368, 448, 0, 0),
        RotationProfile::new(MX, 368, 448, 0, 0),
    ],
};

/// Waveshare ESP32-S3 Touch AMOLED 2.41" round (466×466, CO5300)
pub const WAVESHARE_2_41_CO5300: PanelSpec = PanelSpec {
    name: "Waveshare ESP32-S3 Touch AMOLED 2.41\"",
    controller: Controller::CO5300,
    width: 466,
    height: 466,
    tear_scanline: 466,
    rotations: [
        RotationProfile::new(DEFAULT, 466, 466, 0, 0),
        RotationProfile::new(MX, 466, 466, 0, 0),
        RotationProfile::new(MX | MY, 466, 466, 0, 0),
        RotationProfile::new(MY, 466, 466, 0, 0),
    ],
};

/// Waveshare ESP32-S3 Touch AMOLED 2.06" (410×502, CO5300)
pub const WAVESHARE_2_06_CO5300: PanelSpec = PanelSpec {
    name: "Waveshare ESP32-S3 Touch AMOLED 2.06\"",
    controller: Controller::CO5300,
    width: 410,
    height: 502,
    tear_scanline: 502,
    rotations: [
        RotationProfile::new(DEFAULT, 410, 502, 0, 0),
        RotationProfile::new(MX | MV, 502, 410, 0, 0),
        RotationProfile::new(MX | MY, 410, 502, 0, 0),
        RotationProfile::new(MV | MY, 502, 410, 0, 0),
    ],
};

/// Every built-in panel, in the board-type order of the reference driver.
pub const ALL: [&PanelSpec; 5] = [
    &LILYGO_T_DISPLAY_S3_RM67162,
    &LILYGO_T4_S3_RM690B0,
    &WAVESHARE_1_8_SH8601,
    &WAVESHARE_2_41_CO5300,
    &WAVESHARE_2_06_CO5300,
];
