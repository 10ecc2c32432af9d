//! AMOLED Software Rasterizer
//!
//! Owns an in-memory pixel buffer for a MIPI-DCS AMOLED panel, draws into
//! it, and streams rectangular regions of it to the panel through any
//! [`PanelTransport`](platform::PanelTransport).
//!
//! - Pixel buffer at 16, 18 or 24 bpp, stored in transport byte order
//! - 2-aligned address windows with three interchangeable flush strategies
//! - Draw batching: a [`Hold`] guard suppresses refreshes, composite shapes
//!   refresh their bounding box once
//! - Lines, rectangles, circles, ellipses, triangles, rounded rectangles
//!   and polygons with rotation
//! - Four text engines: fixed-pitch, proportional, stroke and anti-aliased
//!   outline
//! - JPEG tile compositing, direct or cropped into a standalone buffer
//! - embedded-graphics `DrawTarget` integration
//!
//! # Example
//!
//! ```
//! use amoled_gfx::{Color, Display, DisplayConfig};
//! use amoled_testing::RecordingTransport;
//! use embedded_hal_mock::eh1::delay::NoopDelay;
//!
//! let mut display = Display::new(RecordingTransport::new(), DisplayConfig::T4_S3).unwrap();
//! display.init(&mut NoopDelay::new()).unwrap();
//!
//! display.fill_rect(10, 10, 5, 5, Color::RED).unwrap();
//! assert_eq!(display.get_pixel(12, 12), Some(Color::RED));
//!
//! {
//!     let mut batch = display.hold();
//!     batch.circle(100, 100, 40, Color::WHITE).unwrap();
//!     batch.line(0, 0, 449, 599, Color::GREEN).unwrap();
//! }
//! display.show().unwrap();
//! display.transport().assert_windows_aligned().unwrap();
//! ```

// ── Lint policy ─────────────────────────────────────────────────────────────
#![deny(clippy::unwrap_used)] // no .unwrap() in production code
#![deny(clippy::expect_used)] // no .expect() in production code
#![deny(clippy::panic)] // no panic!() in production code
#![deny(unused_must_use)]
// all Results must be handled
// ────────────────────────────────────────────────────────────────────────────
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::print_stdout)] // prefer tracing over println! in lib code
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::too_many_arguments)]

pub mod alignment;
mod color;
pub mod config;
mod control;
mod display;
mod draw_target;
mod error;
pub mod flush;
mod framebuffer;
pub mod image;
mod polygon;
mod raster;
mod rotation;
pub mod text;

pub use alignment::AddressWindow;
pub use color::{color565, Color};
pub use config::DisplayConfig;
pub use display::{Display, FlushStats, Hold};
pub use draw_target::from_rgb565;
pub use error::{GfxError, Result};
pub use flush::{FlushStrategy, RamOffset};
pub use framebuffer::PixelBuffer;
pub use image::{CropRect, DecodedImage, CROP_FILL};
pub use polygon::{polygon_center, Polygon, PolygonRotation, MAX_POLYGON_POINTS};
pub use text::{measure_outline, FontAsset, MonoFont, ProportionalFont, TextStyle, VectorFont, STROKE_BIAS};
