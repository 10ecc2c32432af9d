//! The display: pixel buffer, flush control and batching
//!
//! Every draw call writes into the [`PixelBuffer`] and then asks for one
//! refresh over what it touched. Refreshes go to the transport only while
//! auto-refresh is on and no [`Hold`] is active.

use core::ops::{Deref, DerefMut};

use amoled_specs::{madctl, BitDepth, ColorSpace, PanelSpec, RotationProfile};
use platform::PanelTransport;

use crate::alignment::{clip_bounds, AddressWindow};
use crate::color::Color;
use crate::config::DisplayConfig;
use crate::error::{GfxError, Result};
use crate::flush::{flush_window, FlushStrategy, RamOffset};
use crate::framebuffer::PixelBuffer;

/// Counters for transfers issued by the flush path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FlushStats {
    /// Windows flushed
    pub flushes: u32,
    /// Pixel bytes sent
    pub bytes: usize,
}

/// An AMOLED panel with its in-memory pixel buffer.
pub struct Display<T> {
    pub(crate) transport: T,
    pub(crate) buffer: PixelBuffer,
    pub(crate) panel: PanelSpec,
    pub(crate) rotations: [RotationProfile; 4],
    pub(crate) rotation: u8,
    pub(crate) madctl: u8,
    pub(crate) color_space: ColorSpace,
    pub(crate) offset: RamOffset,
    pub(crate) auto_refresh: bool,
    pub(crate) hold: bool,
    pub(crate) strategy: FlushStrategy,
    pub(crate) stats: FlushStats,
}

impl<T: PanelTransport> Display<T> {
    /// Validate `config` and allocate the pixel buffer.
    ///
    /// Nothing is sent to the transport; call
    /// [`init`](Display::init) to power the panel up.
    pub fn new(transport: T, config: DisplayConfig) -> Result<Self> {
        let Some(color_bits) = config.color_space.madctl_bits() else {
            tracing::warn!("monochrome color space rejected");
            return Err(GfxError::InvalidArgument("unsupported color space"));
        };
        let rotation = config.rotation % 4;
        let profile = config.panel.rotation(rotation);
        let buffer = PixelBuffer::allocate(
            u32::from(profile.width),
            u32::from(profile.height),
            config.bit_depth,
        )?;

        tracing::debug!(
            panel = config.panel.name,
            width = profile.width,
            height = profile.height,
            bits = config.bit_depth.bits(),
            rotation,
            "display created"
        );

        Ok(Self {
            transport,
            buffer,
            rotations: config.panel.rotations,
            panel: config.panel,
            rotation,
            madctl: madctl::merge_rotation(color_bits, profile.madctl),
            color_space: config.color_space,
            offset: RamOffset {
                col: profile.col_offset,
                row: profile.row_offset,
            },
            auto_refresh: config.auto_refresh,
            hold: false,
            strategy: config.flush_strategy,
            stats: FlushStats::default(),
        })
    }

    /// Give the transport back.
    pub fn release(self) -> T {
        self.transport
    }

    /// Logical width for the current rotation
    pub fn width(&self) -> u32 {
        self.buffer.width()
    }

    /// Logical height for the current rotation
    pub fn height(&self) -> u32 {
        self.buffer.height()
    }

    /// Current rotation index (0..=3)
    pub fn rotation(&self) -> u8 {
        self.rotation
    }

    /// Bit depth fixed at construction
    pub fn bit_depth(&self) -> BitDepth {
        self.buffer.depth()
    }

    /// Color order fixed at construction
    pub fn color_space(&self) -> ColorSpace {
        self.color_space
    }

    /// Current MADCTL register value
    pub fn madctl(&self) -> u8 {
        self.madctl
    }

    /// RAM offset of the visible area for the current rotation
    pub fn offset(&self) -> RamOffset {
        self.offset
    }

    /// Panel this display was built for
    pub fn panel(&self) -> &PanelSpec {
        &self.panel
    }

    /// Read-only view of the pixel buffer
    pub fn buffer(&self) -> &PixelBuffer {
        &self.buffer
    }

    /// The transport
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Mutable access to the transport
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Read one pixel of the buffer.
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<Color> {
        self.buffer.get_pixel(x, y)
    }

    /// Whether draw calls flush automatically
    pub fn auto_refresh(&self) -> bool {
        self.auto_refresh
    }

    /// Turn automatic flushing on or off.
    pub fn set_auto_refresh(&mut self, enabled: bool) {
        self.auto_refresh = enabled;
    }

    /// Transfer counters since construction or the last reset
    pub fn flush_stats(&self) -> FlushStats {
        self.stats
    }

    /// Zero the transfer counters.
    pub fn reset_flush_stats(&mut self) {
        self.stats = FlushStats::default();
    }

    /// Whether a [`Hold`] is active
    pub fn is_held(&self) -> bool {
        self.hold
    }

    /// Suppress refreshes until the returned guard is dropped.
    ///
    /// Guards nest; each restores the state it found.
    ///
    /// ```
    /// # use amoled_gfx::{Color, Display, DisplayConfig};
    /// # use amoled_testing::RecordingTransport;
    /// let mut display = Display::new(RecordingTransport::new(), DisplayConfig::T4_S3).unwrap();
    /// {
    ///     let mut batch = display.hold();
    ///     batch.hline(0, 0, 10, Color::RED).unwrap();
    ///     batch.hline(0, 1, 10, Color::RED).unwrap();
    /// }
    /// assert_eq!(display.flush_stats().flushes, 0);
    /// display.refresh_region(0, 0, 10, 2).unwrap();
    /// assert_eq!(display.flush_stats().flushes, 1);
    /// ```
    pub fn hold(&mut self) -> Hold<'_, T> {
        let previous = self.hold;
        self.hold = true;
        Hold {
            display: self,
            previous,
        }
    }

    /// Run `draw` under a hold, then refresh the inclusive bounds once.
    pub(crate) fn batched<F>(&mut self, bounds: (i64, i64, i64, i64), draw: F) -> Result<()>
    where
        F: FnOnce(&mut Self) -> Result<()>,
    {
        {
            let mut batch = self.hold();
            draw(&mut *batch)?;
        }
        let (x0, y0, x1, y1) = bounds;
        self.refresh_bounds(x0, y0, x1, y1)
    }

    /// Flush a region if auto-refresh is on and nothing is held.
    // SAFETY: i64 arithmetic on i32/u32 inputs cannot overflow.
    #[allow(clippy::arithmetic_side_effects)]
    pub fn refresh_region(&mut self, x: i32, y: i32, w: u32, h: u32) -> Result<()> {
        if w == 0 || h == 0 {
            return Ok(());
        }
        let (x0, y0) = (i64::from(x), i64::from(y));
        self.refresh_bounds(x0, y0, x0 + i64::from(w) - 1, y0 + i64::from(h) - 1)
    }

    /// Flush the whole screen if auto-refresh is on and nothing is held.
    pub fn refresh(&mut self) -> Result<()> {
        self.refresh_region(0, 0, self.width(), self.height())
    }

    /// Flush a region even when auto-refresh is off.
    // SAFETY: see `refresh_region`.
    #[allow(clippy::arithmetic_side_effects)]
    pub fn show_region(&mut self, x: i32, y: i32, w: u32, h: u32) -> Result<()> {
        if self.hold || w == 0 || h == 0 {
            return Ok(());
        }
        let (x0, y0) = (i64::from(x), i64::from(y));
        self.flush_bounds(x0, y0, x0 + i64::from(w) - 1, y0 + i64::from(h) - 1)
    }

    /// Flush the whole screen even when auto-refresh is off.
    pub fn show(&mut self) -> Result<()> {
        self.show_region(0, 0, self.width(), self.height())
    }

    /// Gated refresh over inclusive corners.
    pub(crate) fn refresh_bounds(&mut self, x0: i64, y0: i64, x1: i64, y1: i64) -> Result<()> {
        if !self.auto_refresh || self.hold {
            return Ok(());
        }
        self.flush_bounds(x0, y0, x1, y1)
    }

    /// Clip, align and stream inclusive corners to the panel.
    pub(crate) fn flush_bounds(&mut self, x0: i64, y0: i64, x1: i64, y1: i64) -> Result<()> {
        let (lx, hx) = (x0.min(x1), x0.max(x1));
        let (ly, hy) = (y0.min(y1), y0.max(y1));
        let Some((cx0, cy0, cx1, cy1)) = clip_bounds(lx, ly, hx, hy, self.width(), self.height())
        else {
            return Ok(());
        };
        let window = AddressWindow::covering(cx0, cy0, cx1, cy1);
        match flush_window(
            &mut self.transport,
            &self.buffer,
            &window,
            self.offset,
            self.strategy,
        ) {
            Ok(bytes) => {
                tracing::trace!(
                    sc = window.sc,
                    sr = window.sr,
                    ec = window.ec,
                    er = window.er,
                    bytes,
                    "window flushed"
                );
                self.stats.flushes = self.stats.flushes.saturating_add(1);
                self.stats.bytes = self.stats.bytes.saturating_add(bytes);
                Ok(())
            }
            Err(err) => {
                tracing::warn!(error = %err, "flush failed");
                Err(err)
            }
        }
    }

    /// Fill the whole buffer and refresh the screen.
    pub fn fill(&mut self, color: Color) -> Result<()> {
        self.buffer.fill(color);
        self.refresh()
    }

    /// Copy a caller pixel block (`w * h` pixels in buffer byte order) to
    /// `(x, y)`, clipped, then refresh it.
    // SAFETY: lengths are u32-derived and clipped against u16-sized extents.
    #[allow(clippy::arithmetic_side_effects, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn blit_buffer(&mut self, x: i32, y: i32, w: u32, h: u32, pixels: &[u8]) -> Result<()> {
        let bpp = self.buffer.bytes_per_pixel();
        let stride = w as usize * bpp;
        if pixels.len() < stride * h as usize {
            return Err(GfxError::InvalidArgument("pixel block shorter than w * h"));
        }
        if w == 0 || h == 0 {
            return Ok(());
        }
        let (x0, y0) = (i64::from(x), i64::from(y));
        let (x1, y1) = (x0 + i64::from(w) - 1, y0 + i64::from(h) - 1);
        let Some((cx0, cy0, cx1, _cy1)) = clip_bounds(x0, y0, x1, y1, self.width(), self.height()) else {
            return Ok(());
        };
        let skip_cols = (i64::from(cx0) - x0) as usize;
        let visible = u32::from(cx1) - u32::from(cx0) + 1;
        for (row, src) in pixels.chunks_exact(stride).take(h as usize).enumerate() {
            let dst_y = y0 + row as i64;
            if dst_y < i64::from(cy0) {
                continue;
            }
            let Some(dst) = self.buffer.row_mut(u32::from(cx0), dst_y as u32, visible) else {
                break;
            };
            if let Some(src) = src.get(skip_cols * bpp..skip_cols * bpp + dst.len()) {
                dst.copy_from_slice(src);
            }
        }
        self.refresh_bounds(x0, y0, x1, y1)
    }
}

/// Batch guard returned by [`Display::hold`].
///
/// Derefs to the display; dropping it restores the previous hold state.
pub struct Hold<'a, T: PanelTransport> {
    display: &'a mut Display<T>,
    previous: bool,
}

impl<T: PanelTransport> Deref for Hold<'_, T> {
    type Target = Display<T>;

    fn deref(&self) -> &Self::Target {
        self.display
    }
}

impl<T: PanelTransport> DerefMut for Hold<'_, T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.display
    }
}

impl<T: PanelTransport> Drop for Hold<'_, T> {
    fn drop(&mut self) {
        self.display.hold = self.previous;
    }
}
