//! AMOLED rendering test doubles
//!
//! Host-side stand-ins for everything `amoled-gfx` treats as an external
//! capability, so draw calls can be checked byte for byte without a panel.
//!
//! # Quick start
//!
//! ```
//! use amoled_testing::{small_panel, RecordingTransport};
//! use platform::PanelTransport;
//!
//! let mut bus = RecordingTransport::new();
//! bus.send_params(0x2A, &[0, 0, 0, 9]).unwrap();
//! bus.send_pixels(&[0xF8, 0x00]).unwrap();
//! assert_eq!(bus.commands(), vec![(0x2A, vec![0, 0, 0, 9])]);
//! assert_eq!(bus.pixel_bytes(), vec![0xF8, 0x00]);
//!
//! let panel = small_panel(50, 40);
//! assert_eq!(panel.rotation(1).width, 40);
//! ```
//!
//! | Double | Stands in for |
//! |--------|---------------|
//! | [`RecordingTransport`] | SPI/QSPI panel bus |
//! | [`FailingTransport`] | a bus that breaks after N transfers |
//! | [`TileDecoder`] + [`MemoryStream`] | JPEG decoder and file |
//! | [`BoxFont`] | outline font engine |

#![warn(clippy::all)]
#![warn(clippy::dbg_macro)]
#![warn(clippy::print_stdout)]
#![allow(clippy::module_name_repetitions)]
// Fixture math on small test images; overflow here means a broken test.
#![allow(clippy::arithmetic_side_effects)]

use core::cell::RefCell;

use amoled_specs::madctl::{DEFAULT, MV, MX, MY};
use amoled_specs::{Controller, PanelSpec, RotationProfile};
use embedded_io::{ErrorKind, ErrorType, Read, ReadExactError, Seek, SeekFrom};
use platform::{
    DecodeError, FontError, GlyphId, GlyphMetrics, ImageInfo, JpegDecoder, Kerning, OutlineFont,
    PanelTransport, Tile, TransportError,
};

/// Column-address opcode, for filtering recorded windows.
pub const CASET: u8 = 0x2A;
/// Row-address opcode, for filtering recorded windows.
pub const RASET: u8 = 0x2B;

// ─────────────────────────────────────────────────────────────────────────────
// Panels
// ─────────────────────────────────────────────────────────────────────────────

/// A `width × height` panel with landscape/portrait rotations and no RAM offset.
pub fn small_panel(width: u16, height: u16) -> PanelSpec {
    PanelSpec {
        name: "Test panel",
        controller: Controller::RM690B0,
        width,
        height,
        tear_scanline: height,
        rotations: [
            RotationProfile::new(DEFAULT, width, height, 0, 0),
            RotationProfile::new(MX | MV, height, width, 0, 0),
            RotationProfile::new(MX | MY, width, height, 0, 0),
            RotationProfile::new(MV | MY, height, width, 0, 0),
        ],
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Transports
// ─────────────────────────────────────────────────────────────────────────────

/// One call seen by a [`RecordingTransport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record {
    /// `send_params(cmd, params)`
    Command {
        /// Opcode
        cmd: u8,
        /// Parameter bytes
        params: Vec<u8>,
    },
    /// `send_pixels(bytes)`
    Pixels(Vec<u8>),
}

/// Transport that records every call in order.
#[derive(Debug, Clone, Default)]
pub struct RecordingTransport {
    records: Vec<Record>,
}

impl RecordingTransport {
    /// Empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call, in order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Forget everything recorded so far.
    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Commands with their parameters, in order.
    pub fn commands(&self) -> Vec<(u8, Vec<u8>)> {
        self.records
            .iter()
            .filter_map(|r| match r {
                Record::Command { cmd, params } => Some((*cmd, params.clone())),
                Record::Pixels(_) => None,
            })
            .collect()
    }

    /// Opcodes only, in order.
    pub fn opcodes(&self) -> Vec<u8> {
        self.commands().into_iter().map(|(cmd, _)| cmd).collect()
    }

    /// All pixel bytes, concatenated.
    pub fn pixel_bytes(&self) -> Vec<u8> {
        self.records
            .iter()
            .filter_map(|r| match r {
                Record::Pixels(bytes) => Some(bytes.as_slice()),
                Record::Command { .. } => None,
            })
            .flatten()
            .copied()
            .collect()
    }

    /// Number of `send_pixels` calls.
    pub fn pixel_transfers(&self) -> usize {
        self.records
            .iter()
            .filter(|r| matches!(r, Record::Pixels(_)))
            .count()
    }

    /// (CASET, RASET) payload pairs, in order.
    pub fn windows(&self) -> Vec<(Vec<u8>, Vec<u8>)> {
        let mut windows = Vec::new();
        let mut column = None;
        for (cmd, params) in self.commands() {
            match cmd {
                CASET => column = Some(params),
                RASET => {
                    if let Some(col) = column.take() {
                        windows.push((col, params));
                    }
                }
                _ => {}
            }
        }
        windows
    }

    /// Check that every recorded window starts even and ends odd.
    pub fn assert_windows_aligned(&self) -> Result<(), String> {
        for (i, (col, row)) in self.windows().iter().enumerate() {
            for (name, payload) in [("column", col), ("row", row)] {
                let [s0, s1, e0, e1] = payload.as_slice() else {
                    return Err(format!("window {i}: {name} payload is {} bytes", payload.len()));
                };
                let start = u16::from_be_bytes([*s0, *s1]);
                let end = u16::from_be_bytes([*e0, *e1]);
                if start % 2 != 0 || end % 2 != 1 {
                    return Err(format!("window {i}: {name} {start}..={end} is not 2-aligned"));
                }
            }
        }
        Ok(())
    }
}

impl PanelTransport for RecordingTransport {
    fn send_params(&mut self, cmd: u8, params: &[u8]) -> Result<(), TransportError> {
        self.records.push(Record::Command {
            cmd,
            params: params.to_vec(),
        });
        Ok(())
    }

    fn send_pixels(&mut self, pixels: &[u8]) -> Result<(), TransportError> {
        self.records.push(Record::Pixels(pixels.to_vec()));
        Ok(())
    }
}

/// Transport that succeeds for a fixed number of calls, then fails every call.
#[derive(Debug, Clone)]
pub struct FailingTransport {
    remaining: usize,
    error: TransportError,
    /// Calls attempted, including failed ones
    pub calls: usize,
}

impl FailingTransport {
    /// Fail with [`TransportError::Communication`] after `ok_calls` successes.
    pub fn after(ok_calls: usize) -> Self {
        Self {
            remaining: ok_calls,
            error: TransportError::Communication,
            calls: 0,
        }
    }

    /// Use `error` instead of the default.
    #[must_use]
    pub fn with_error(mut self, error: TransportError) -> Self {
        self.error = error;
        self
    }

    fn step(&mut self) -> Result<(), TransportError> {
        self.calls = self.calls.saturating_add(1);
        match self.remaining.checked_sub(1) {
            Some(left) => {
                self.remaining = left;
                Ok(())
            }
            None => Err(self.error),
        }
    }
}

impl PanelTransport for FailingTransport {
    fn send_params(&mut self, _cmd: u8, _params: &[u8]) -> Result<(), TransportError> {
        self.step()
    }

    fn send_pixels(&mut self, _pixels: &[u8]) -> Result<(), TransportError> {
        self.step()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Images
// ─────────────────────────────────────────────────────────────────────────────

/// In-memory byte stream with `embedded-io` read and seek.
#[derive(Debug, Clone, Default)]
pub struct MemoryStream {
    data: Vec<u8>,
    pos: usize,
}

impl MemoryStream {
    /// Stream over `data`, positioned at the start.
    pub fn new(data: Vec<u8>) -> Self {
        Self { data, pos: 0 }
    }
}

impl ErrorType for MemoryStream {
    type Error = ErrorKind;
}

impl Read for MemoryStream {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        let rest = self.data.get(self.pos..).unwrap_or_default();
        let n = rest.len().min(buf.len());
        if let (Some(dst), Some(src)) = (buf.get_mut(..n), rest.get(..n)) {
            dst.copy_from_slice(src);
        }
        self.pos = self.pos.saturating_add(n);
        Ok(n)
    }
}

impl Seek for MemoryStream {
    fn seek(&mut self, pos: SeekFrom) -> Result<u64, Self::Error> {
        let len = i64::try_from(self.data.len()).map_err(|_| ErrorKind::InvalidInput)?;
        let current = i64::try_from(self.pos).map_err(|_| ErrorKind::InvalidInput)?;
        let target = match pos {
            SeekFrom::Start(n) => i64::try_from(n).ok(),
            SeekFrom::End(n) => len.checked_add(n),
            SeekFrom::Current(n) => current.checked_add(n),
        };
        let target = target
            .and_then(|t| usize::try_from(t).ok())
            .ok_or(ErrorKind::InvalidInput)?;
        self.pos = target;
        u64::try_from(target).map_err(|_| ErrorKind::InvalidInput)
    }
}

/// Encode a raw test image: a big-endian `width, height` header followed by
/// `width * height` two-byte pixels produced by `pixel(x, y)`.
pub fn encode_raw_image(width: u16, height: u16, pixel: impl Fn(u16, u16) -> [u8; 2]) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(&width.to_be_bytes());
    out.extend_from_slice(&height.to_be_bytes());
    for y in 0..height {
        for x in 0..width {
            out.extend_from_slice(&pixel(x, y));
        }
    }
    out
}

/// Deterministic stand-in for a JPEG decoder.
///
/// Reads images produced by [`encode_raw_image`] and emits them as
/// `tile_width × tile_height` tiles, left to right then top to bottom.
/// Edge tiles are clipped to the image.
#[derive(Debug, Clone)]
pub struct TileDecoder {
    tile_width: u16,
    tile_height: u16,
    info: Option<ImageInfo>,
    fail_after: Option<usize>,
}

impl TileDecoder {
    /// Decoder with the given tile size (a real baseline JPEG uses 8 or 16).
    pub fn new(tile_width: u16, tile_height: u16) -> Self {
        Self {
            tile_width: tile_width.max(1),
            tile_height: tile_height.max(1),
            info: None,
            fail_after: None,
        }
    }

    /// Report [`DecodeError::Format`] after emitting `tiles` tiles.
    #[must_use]
    pub fn failing_after(mut self, tiles: usize) -> Self {
        self.fail_after = Some(tiles);
        self
    }
}

fn read_error<E>(err: ReadExactError<E>) -> DecodeError {
    match err {
        ReadExactError::UnexpectedEof => DecodeError::Format,
        ReadExactError::Other(_) => DecodeError::Io,
    }
}

impl<S: Read + Seek> JpegDecoder<S> for TileDecoder {
    fn prepare(&mut self, stream: &mut S) -> Result<ImageInfo, DecodeError> {
        let mut header = [0u8; 4];
        stream.read_exact(&mut header).map_err(read_error)?;
        let [w0, w1, h0, h1] = header;
        let info = ImageInfo {
            width: u16::from_be_bytes([w0, w1]),
            height: u16::from_be_bytes([h0, h1]),
        };
        if info.width == 0 || info.height == 0 {
            return Err(DecodeError::Format);
        }
        self.info = Some(info);
        Ok(info)
    }

    fn decode(
        &mut self,
        stream: &mut S,
        on_tile: &mut dyn FnMut(&Tile<'_>) -> bool,
    ) -> Result<(), DecodeError> {
        let info = self.info.take().ok_or(DecodeError::NotPrepared)?;
        let (w, h) = (usize::from(info.width), usize::from(info.height));
        let mut pixels = vec![0u8; w.saturating_mul(h).saturating_mul(2)];
        stream.read_exact(&mut pixels).map_err(read_error)?;

        let mut emitted = 0usize;
        let mut block = Vec::new();
        for top in (0..info.height).step_by(usize::from(self.tile_height)) {
            for left in (0..info.width).step_by(usize::from(self.tile_width)) {
                if self.fail_after == Some(emitted) {
                    return Err(DecodeError::Format);
                }
                let right = left.saturating_add(self.tile_width - 1).min(info.width - 1);
                let bottom = top.saturating_add(self.tile_height - 1).min(info.height - 1);
                block.clear();
                for y in top..=bottom {
                    let start = (usize::from(y) * w + usize::from(left)) * 2;
                    let end = (usize::from(y) * w + usize::from(right) + 1) * 2;
                    block.extend_from_slice(pixels.get(start..end).ok_or(DecodeError::Format)?);
                }
                let tile = Tile {
                    left,
                    top,
                    right,
                    bottom,
                    pixels: &block,
                };
                if !on_tile(&tile) {
                    return Err(DecodeError::Aborted);
                }
                emitted = emitted.saturating_add(1);
            }
        }
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Fonts
// ─────────────────────────────────────────────────────────────────────────────

/// Outline font whose every printable ASCII glyph is a solid box.
///
/// Every glyph has the same metrics and renders `coverage` over its
/// `width × height` box; padding columns stay 0. Kerning queries are logged.
#[derive(Debug)]
pub struct BoxFont {
    /// Box width (`min_width`)
    pub width: u32,
    /// Box height (`min_height`)
    pub height: u32,
    /// Coverage value painted inside the box
    pub coverage: u8,
    /// Left side bearing
    pub left_bearing: i32,
    /// Horizontal advance
    pub advance: i32,
    /// Offset from the pen line to the box top
    pub y_offset: i32,
    /// Shift returned for every glyph pair, if any
    pub kerning: Option<Kerning>,
    queries: RefCell<Vec<(GlyphId, GlyphId)>>,
}

impl BoxFont {
    /// Solid boxes, advance = `width + 2`, bearing 1, no kerning.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            coverage: 255,
            left_bearing: 1,
            advance: i32::try_from(width).unwrap_or(0).saturating_add(2),
            y_offset: 0,
            kerning: None,
            queries: RefCell::new(Vec::new()),
        }
    }

    /// Paint `coverage` instead of 255.
    #[must_use]
    pub fn with_coverage(mut self, coverage: u8) -> Self {
        self.coverage = coverage;
        self
    }

    /// Return `kerning` for every pair.
    #[must_use]
    pub fn with_kerning(mut self, kerning: Kerning) -> Self {
        self.kerning = Some(kerning);
        self
    }

    /// Glyph pairs the renderer asked about, in order.
    pub fn kerning_queries(&self) -> Vec<(GlyphId, GlyphId)> {
        self.queries.borrow().clone()
    }
}

impl OutlineFont for BoxFont {
    fn lookup(&self, codepoint: char) -> Result<GlyphId, FontError> {
        if codepoint == ' ' || codepoint.is_ascii_graphic() {
            Ok(GlyphId(u32::from(codepoint)))
        } else {
            Err(FontError::UnknownGlyph)
        }
    }

    fn metrics(&self, _glyph: GlyphId) -> Result<GlyphMetrics, FontError> {
        Ok(GlyphMetrics {
            left_bearing: self.left_bearing,
            advance: self.advance,
            y_offset: self.y_offset,
            min_width: self.width,
            min_height: self.height,
        })
    }

    fn kerning(&self, left: GlyphId, right: GlyphId) -> Result<Option<Kerning>, FontError> {
        self.queries.borrow_mut().push((left, right));
        Ok(self.kerning)
    }

    fn render(
        &self,
        _glyph: GlyphId,
        width: u32,
        height: u32,
        coverage: &mut [u8],
    ) -> Result<(), FontError> {
        let stride = usize::try_from(width).map_err(|_| FontError::Render)?;
        let rows = usize::try_from(height).map_err(|_| FontError::Render)?;
        if width < self.width || coverage.len() < stride.saturating_mul(rows) {
            return Err(FontError::Render);
        }
        let inked = usize::try_from(self.width).map_err(|_| FontError::Render)?;
        for row in coverage.chunks_exact_mut(stride.max(1)).take(rows) {
            for (i, cell) in row.iter_mut().enumerate() {
                *cell = if i < inked { self.coverage } else { 0 };
            }
        }
        Ok(())
    }
}
