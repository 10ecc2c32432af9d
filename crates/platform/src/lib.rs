//! Capability layer for AMOLED panel rendering
//!
//! This crate provides the trait-based seams between the software
//! rasterizer and everything it treats as a black box, so the core can be
//! developed and tested without physical hardware.
//!
//! # Architecture Layers
//!
//! ```text
//! Application / board code
//!         ↓
//! amoled-gfx (pixel buffer, rasterizer, text, images)
//!         ↓
//! Platform capabilities (this crate - trait abstractions)
//!         ↓
//! Bus drivers, JPEG decoders, outline-font engines
//! ```
//!
//! # Capabilities
//!
//! - [`PanelTransport`] - command/parameter and pixel transfers to the panel
//! - [`SpiTransport`] - [`PanelTransport`] over an `embedded-hal` SPI device + DC pin
//! - [`JpegDecoder`] - tile-emitting JPEG decoder driven over an `embedded-io` stream
//! - [`OutlineFont`] - glyph lookup, metrics, kerning and coverage rendering
//!
//! # Features
//!
//! - `defmt`: Enable defmt logging derives
//!
//! # Example
//!
//! ```
//! use platform::{PanelTransport, TransportError};
//!
//! struct Discard;
//!
//! impl PanelTransport for Discard {
//!     fn send_params(&mut self, _cmd: u8, _params: &[u8]) -> Result<(), TransportError> {
//!         Ok(())
//!     }
//!     fn send_pixels(&mut self, _pixels: &[u8]) -> Result<(), TransportError> {
//!         Ok(())
//!     }
//! }
//!
//! let mut bus = Discard;
//! bus.send_params(0x29, &[]).unwrap();
//! ```

// ── Lint policy ─────────────────────────────────────────────────────────────
#![deny(clippy::unwrap_used)] // no .unwrap() in production code
#![deny(clippy::expect_used)] // no .expect() in production code
#![deny(clippy::panic)] // no panic!() in production code
#![deny(clippy::unreachable)] // no unreachable!() that isn't documented
#![deny(unused_must_use)]
// all Results must be handled
// ────────────────────────────────────────────────────────────────────────────
#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::print_stdout)] // prefer tracing/defmt over println! in lib code
#![allow(clippy::doc_markdown)] // opcodes and chip names in doc comments
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod display;
pub mod font;
pub mod image;
pub mod spi;

pub use display::{PanelTransport, TransportError};
pub use font::{FontError, GlyphId, GlyphMetrics, Kerning, OutlineFont};
pub use image::{DecodeError, ImageInfo, JpegDecoder, Tile};
pub use spi::SpiTransport;
