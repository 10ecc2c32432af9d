//! AMOLED Panel Specifications
//!
//! Constants tables for the MIPI-DCS style AMOLED controllers (RM67162,
//! RM690B0, SH8601, CO5300): per-orientation rotation profiles, the
//! MADCTL orientation register layout, COLMOD pixel formats and the
//! per-bit-depth channel masks used for anti-aliased text blending.
//!
//! # Features
//!
//! - **no_std compatible** - Works on embedded systems
//! - **Panel templates** - Pre-configured specs for LilyGo and Waveshare boards
//! - **Serde support** - Optional serialization/deserialization for TOML/JSON configs
//!
//! # Example
//!
//! ```
//! use amoled_specs::panels::LILYGO_T4_S3_RM690B0;
//!
//! let spec = LILYGO_T4_S3_RM690B0;
//! let landscape = spec.rotations[1];
//! assert_eq!((landscape.width, landscape.height), (600, 450));
//! assert_eq!(landscape.row_offset, 16);
//! ```
//!
//! # Custom Panel Specs
//!
//! ```
//! use amoled_specs::{madctl, Controller, PanelSpec, RotationProfile};
//!
//! const MY_PANEL: PanelSpec = PanelSpec {
//!     name: "Custom 1.43\"",
//!     controller: Controller::CO5300,
//!     width: 466,
//!     height: 466,
//!     tear_scanline: 466,
//!     rotations: [
//!         RotationProfile::new(madctl::DEFAULT, 466, 466, 6, 0),
//!         RotationProfile::new(madctl::MX | madctl::MV, 466, 466, 0, 6),
//!         RotationProfile::new(madctl::MX | madctl::MY, 466, 466, 6, 0),
//!         RotationProfile::new(madctl::MV | madctl::MY, 466, 466, 0, 6),
//!     ],
//! };
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

pub mod color_format;
pub mod commands;
pub mod madctl;
mod panel_spec;
pub mod panels;

pub use color_format::{BitDepth, ChannelMask, ColorSpace};
pub use panel_spec::{Controller, PanelSpec, RotationProfile};
