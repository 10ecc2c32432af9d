//! Window selection and pixel streaming
//!
//! Three interchangeable strategies move an aligned window of the pixel
//! buffer to the panel. They differ only in scratch memory and transfer
//! count; the byte stream the panel receives is identical.

use amoled_specs::commands::Command;
use platform::PanelTransport;

use crate::alignment::AddressWindow;
use crate::error::{try_zeroed, Result};
use crate::framebuffer::PixelBuffer;

/// How a window is streamed to the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlushStrategy {
    /// Two-scanline scratch buffer, one transfer per row pair
    #[default]
    LinePair,
    /// Whole-window scratch buffer filled with row block copies, one transfer
    FullWindow,
    /// Whole-window scratch buffer filled pixel by pixel, one transfer
    Hybrid,
}

/// Column/row offset of the visible area inside controller RAM.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RamOffset {
    /// Added to every column address
    pub col: u16,
    /// Added to every row address
    pub row: u16,
}

/// Heap scratch space that lives for exactly one flush.
struct ScratchBuffer {
    data: Vec<u8>,
}

impl ScratchBuffer {
    fn acquire(bytes: usize) -> Result<Self> {
        Ok(Self {
            data: try_zeroed(bytes)?,
        })
    }
}

impl Drop for ScratchBuffer {
    fn drop(&mut self) {
        tracing::trace!(bytes = self.data.len(), "scratch buffer released");
    }
}

/// Issue CASET and RASET for `window`.
pub fn select_window<T: PanelTransport + ?Sized>(
    transport: &mut T,
    window: &AddressWindow,
    offset: RamOffset,
) -> Result<()> {
    transport.send_params(
        Command::ColumnAddressSet.opcode(),
        &window.column_payload(offset.col),
    )?;
    transport.send_params(
        Command::RowAddressSet.opcode(),
        &window.row_payload(offset.row),
    )?;
    Ok(())
}

/// Stream `window` from `buffer` to the panel. Returns the pixel bytes sent.
///
/// Window pixels that fall outside the buffer (odd-sized panels) are sent
/// as zero.
// SAFETY: window extents are u16-bounded, products fit in usize.
#[allow(clippy::arithmetic_side_effects)]
pub fn flush_window<T: PanelTransport + ?Sized>(
    transport: &mut T,
    buffer: &PixelBuffer,
    window: &AddressWindow,
    offset: RamOffset,
    strategy: FlushStrategy,
) -> Result<usize> {
    let bpp = buffer.bytes_per_pixel();
    let row_bytes = window.width() as usize * bpp;

    match strategy {
        FlushStrategy::LinePair => {
            let mut scratch = ScratchBuffer::acquire(row_bytes * 2)?;
            let mut sent = 0;
            for row in (window.sr..=window.er).step_by(2) {
                for (dst, y) in scratch.data.chunks_exact_mut(row_bytes).zip(u32::from(row)..) {
                    copy_row_block(buffer, y, window, dst);
                }
                select_window(transport, &window.row_pair(row), offset)?;
                transport.send_pixels(&scratch.data)?;
                sent += scratch.data.len();
            }
            Ok(sent)
        }
        FlushStrategy::FullWindow | FlushStrategy::Hybrid => {
            let mut scratch = ScratchBuffer::acquire(window.area() * bpp)?;
            for (dst, y) in scratch
                .data
                .chunks_exact_mut(row_bytes)
                .zip(u32::from(window.sr)..=u32::from(window.er))
            {
                if strategy == FlushStrategy::FullWindow {
                    copy_row_block(buffer, y, window, dst);
                } else {
                    copy_row_pixels(buffer, y, window, dst);
                }
            }
            select_window(transport, window, offset)?;
            transport.send_pixels(&scratch.data)?;
            Ok(scratch.data.len())
        }
    }
}

/// Copy one window row with a single slice copy; pad what lies outside.
// SAFETY: `inside` is at most the window width, bounded by dst.len() / bpp.
#[allow(clippy::arithmetic_side_effects)]
fn copy_row_block(buffer: &PixelBuffer, y: u32, window: &AddressWindow, dst: &mut [u8]) {
    let sc = u32::from(window.sc);
    let inside = window
        .width()
        .min(buffer.width().saturating_sub(sc));
    let copied = match buffer.row(sc, y, inside) {
        Some(src) => {
            if let Some(head) = dst.get_mut(..src.len()) {
                head.copy_from_slice(src);
            }
            src.len()
        }
        None => 0,
    };
    if let Some(tail) = dst.get_mut(copied..) {
        tail.fill(0);
    }
}

/// Copy one window row pixel by pixel.
fn copy_row_pixels(buffer: &PixelBuffer, y: u32, window: &AddressWindow, dst: &mut [u8]) {
    let bpp = buffer.bytes_per_pixel();
    let y = i32::try_from(y).unwrap_or(i32::MAX);
    for (x, out) in (i32::from(window.sc)..).zip(dst.chunks_exact_mut(bpp)) {
        match buffer.get_pixel(x, y) {
            Some(color) => {
                if let Some(src) = color.to_bytes().get(..bpp) {
                    out.copy_from_slice(src);
                }
            }
            None => out.fill(0),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::indexing_slicing, clippy::unwrap_used)]
    use super::*;
    use crate::color::Color;
    use amoled_specs::BitDepth;
    use platform::TransportError;

    #[derive(Default)]
    struct Capture {
        commands: Vec<(u8, Vec<u8>)>,
        pixels: Vec<u8>,
        transfers: usize,
    }

    impl PanelTransport for Capture {
        fn send_params(&mut self, cmd: u8, params: &[u8]) -> core::result::Result<(), TransportError> {
            self.commands.push((cmd, params.to_vec()));
            Ok(())
        }

        fn send_pixels(&mut self, pixels: &[u8]) -> core::result::Result<(), TransportError> {
            self.pixels.extend_from_slice(pixels);
            self.transfers += 1;
            Ok(())
        }
    }

    fn patterned(w: u32, h: u32) -> PixelBuffer {
        let mut fb = PixelBuffer::allocate(w, h, BitDepth::Bpp16).unwrap();
        for y in 0..h as i32 {
            for x in 0..w as i32 {
                fb.set_pixel(x, y, Color::from_raw((x * 7 + y * 13) as u32 & 0xFFFF));
            }
        }
        fb
    }

    #[test]
    fn test_strategies_emit_identical_streams() {
        let fb = patterned(12, 10);
        let window = AddressWindow::covering(3, 1, 8, 6);
        let mut streams = Vec::new();
        for strategy in [FlushStrategy::LinePair, FlushStrategy::FullWindow, FlushStrategy::Hybrid] {
            let mut bus = Capture::default();
            let sent = flush_window(&mut bus, &fb, &window, RamOffset::default(), strategy).unwrap();
            assert_eq!(sent, bus.pixels.len());
            streams.push(bus.pixels);
        }
        assert_eq!(streams[0], streams[1]);
        assert_eq!(streams[1], streams[2]);
        assert_eq!(streams[0].len(), 8 * 8 * 2);
    }

    #[test]
    fn test_line_pair_selects_each_pair() {
        let fb = patterned(8, 8);
        let window = AddressWindow::covering(0, 0, 7, 3);
        let mut bus = Capture::default();
        flush_window(&mut bus, &fb, &window, RamOffset { col: 0, row: 16 }, FlushStrategy::LinePair).unwrap();
        assert_eq!(bus.transfers, 2);
        let rasets: Vec<_> = bus.commands.iter().filter(|(c, _)| *c == 0x2B).map(|(_, p)| p.clone()).collect();
        assert_eq!(rasets, vec![vec![0, 16, 0, 17], vec![0, 18, 0, 19]]);
    }

    #[test]
    fn test_full_window_single_transfer() {
        let fb = patterned(8, 8);
        let window = AddressWindow::covering(0, 0, 7, 7);
        let mut bus = Capture::default();
        flush_window(&mut bus, &fb, &window, RamOffset::default(), FlushStrategy::FullWindow).unwrap();
        assert_eq!(bus.transfers, 1);
        assert_eq!(bus.pixels, fb.as_bytes());
        assert_eq!(bus.commands[0], (0x2A, vec![0, 0, 0, 7]));
    }

    #[test]
    fn test_window_past_odd_edge_is_zero_padded() {
        let mut fb = PixelBuffer::allocate(5, 2, BitDepth::Bpp16).unwrap();
        fb.fill(Color::WHITE);
        let window = AddressWindow::covering(4, 0, 4, 1);
        for strategy in [FlushStrategy::LinePair, FlushStrategy::FullWindow, FlushStrategy::Hybrid] {
            let mut bus = Capture::default();
            flush_window(&mut bus, &fb, &window, RamOffset::default(), strategy).unwrap();
            assert_eq!(bus.pixels, vec![0xFF, 0xFF, 0, 0, 0xFF, 0xFF, 0, 0]);
        }
    }
}
