//! JPEG compositing
//!
//! A [`JpegDecoder`] hands over decoded tiles one at a time. Direct mode
//! copies every tile into the pixel buffer at an offset and refreshes the
//! image once; crop mode copies the part of each tile inside a rectangle
//! into a standalone buffer that can later go through
//! [`Display::blit_buffer`].
//!
//! Tile pixels must already be in buffer byte order at the display's bit
//! depth.

use embedded_io::{Read, Seek};
use platform::{ImageInfo, JpegDecoder, PanelTransport, Tile};

use crate::display::Display;
use crate::error::{try_zeroed, GfxError, Result};

/// Byte written to crop cells the image does not cover.
pub const CROP_FILL: u8 = 0xEF;

/// Region of the image kept by [`Display::decode_crop`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropRect {
    /// Left column in image coordinates
    pub x: u16,
    /// Top row in image coordinates
    pub y: u16,
    /// Width in pixels
    pub width: u16,
    /// Height in pixels
    pub height: u16,
}

impl CropRect {
    /// Rectangle with its top-left corner at `(x, y)`.
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self { x, y, width, height }
    }

    /// Inclusive `(left, top, right, bottom)`; `None` when empty.
    // SAFETY: u32 sums of u16 values.
    #[allow(clippy::arithmetic_side_effects)]
    fn bounds(&self) -> Option<(u32, u32, u32, u32)> {
        if self.width == 0 || self.height == 0 {
            return None;
        }
        let (left, top) = (u32::from(self.x), u32::from(self.y));
        Some((
            left,
            top,
            left + u32::from(self.width) - 1,
            top + u32::from(self.height) - 1,
        ))
    }
}

/// Output of [`Display::decode_crop`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    /// Row-major pixels in buffer byte order; cells no tile reached are 0
    pub pixels: Vec<u8>,
    /// Width in pixels
    pub width: u16,
    /// Height in pixels
    pub height: u16,
}

/// Check a tile's block length against its extent.
// SAFETY: u16 extents multiplied in usize.
#[allow(clippy::arithmetic_side_effects)]
fn tile_stride(tile: &Tile<'_>, bpp: usize) -> Result<usize> {
    let stride = usize::from(tile.width()) * bpp;
    if stride == 0 || tile.pixels.len() != stride * usize::from(tile.height()) {
        return Err(GfxError::Asset("tile block does not match its bounds"));
    }
    Ok(stride)
}

/// Run `decoder` over `stream`, keeping the first error raised by `on_tile`.
fn drive<S, D, F>(decoder: &mut D, stream: &mut S, mut on_tile: F) -> Result<()>
where
    S: Read + Seek,
    D: JpegDecoder<S> + ?Sized,
    F: FnMut(&Tile<'_>) -> Result<()>,
{
    let mut failure = None;
    let decoded = decoder.decode(stream, &mut |tile: &Tile<'_>| match on_tile(tile) {
        Ok(()) => true,
        Err(err) => {
            failure = Some(err);
            false
        }
    });
    match (failure, decoded) {
        (Some(err), _) => Err(err),
        (None, decoded) => decoded.map_err(GfxError::from),
    }
}

impl<T: PanelTransport> Display<T> {
    /// Decode an image straight into the buffer with its top-left corner
    /// at `(x, y)`, then refresh the visible part of it.
    ///
    /// Tile rows falling off the buffer are clipped. On a decoder error the
    /// tiles already copied stay in the buffer.
    // SAFETY: i64 positions from i32 origins and u16 tile coordinates.
    #[allow(clippy::arithmetic_side_effects, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn decode_and_blit<S, D>(&mut self, decoder: &mut D, stream: &mut S, x: i32, y: i32) -> Result<ImageInfo>
    where
        S: Read + Seek,
        D: JpegDecoder<S> + ?Sized,
    {
        let info = decoder.prepare(stream)?;
        let bpp = self.buffer.bytes_per_pixel();
        let (width, height) = (i64::from(self.width()), i64::from(self.height()));
        let (x0, y0) = (i64::from(x), i64::from(y));
        tracing::debug!(width = info.width, height = info.height, x, y, "jpeg blit");

        let buffer = &mut self.buffer;
        let decoded = drive(decoder, stream, |tile| {
            let stride = tile_stride(tile, bpp)?;
            let left = x0 + i64::from(tile.left);
            let first = left.max(0);
            let last = (left + i64::from(tile.width()) - 1).min(width - 1);
            if first > last {
                return Ok(());
            }
            let skip = (first - left) as usize * bpp;
            let visible = (last - first + 1) as u32;
            for (row, src) in (y0 + i64::from(tile.top)..).zip(tile.pixels.chunks_exact(stride)) {
                if row < 0 || row >= height {
                    continue;
                }
                let Some(dst) = buffer.row_mut(first as u32, row as u32, visible) else {
                    continue;
                };
                if let Some(src) = src.get(skip..skip + dst.len()) {
                    dst.copy_from_slice(src);
                }
            }
            Ok(())
        });

        self.refresh_bounds(
            x0,
            y0,
            x0 + i64::from(info.width) - 1,
            y0 + i64::from(info.height) - 1,
        )?;
        decoded.map(|()| info)
    }

    /// Decode an image (or the `crop` part of it) into a new buffer.
    ///
    /// The display's buffer is not touched. Every byte of a crop cell
    /// outside the image is [`CROP_FILL`].
    ///
    /// ```
    /// # use amoled_gfx::{CropRect, Display, DisplayConfig};
    /// # use amoled_testing::{encode_raw_image, small_panel, MemoryStream, RecordingTransport, TileDecoder};
    /// # let display = Display::new(RecordingTransport::new(), DisplayConfig::for_panel(small_panel(8, 8))).unwrap();
    /// let data = encode_raw_image(16, 16, |x, y| [x as u8, y as u8]);
    /// let mut decoder = TileDecoder::new(8, 8);
    /// let image = display
    ///     .decode_crop(&mut decoder, &mut MemoryStream::new(data), Some(CropRect::new(6, 6, 4, 4)))
    ///     .unwrap();
    /// assert_eq!((image.width, image.height), (4, 4));
    /// assert_eq!(&image.pixels[..4], &[6, 6, 7, 6]);
    /// ```
    // SAFETY: offsets are u32/usize products of u16 coordinates, each
    // bounded by the intersection with both rectangles.
    #[allow(clippy::arithmetic_side_effects)]
    pub fn decode_crop<S, D>(&self, decoder: &mut D, stream: &mut S, crop: Option<CropRect>) -> Result<DecodedImage>
    where
        S: Read + Seek,
        D: JpegDecoder<S> + ?Sized,
    {
        let info = decoder.prepare(stream)?;
        let crop = crop.unwrap_or(CropRect::new(0, 0, info.width, info.height));
        let (c_left, c_top, c_right, c_bottom) = crop
            .bounds()
            .ok_or(GfxError::InvalidArgument("empty crop rectangle"))?;
        let bpp = self.buffer.bytes_per_pixel();
        let out_stride = usize::from(crop.width) * bpp;
        let mut pixels = try_zeroed(out_stride * usize::from(crop.height))?;
        pixels.fill(CROP_FILL);
        tracing::debug!(
            x = crop.x,
            y = crop.y,
            width = crop.width,
            height = crop.height,
            "jpeg crop"
        );

        drive(decoder, stream, |tile| {
            let stride = tile_stride(tile, bpp)?;
            let left = c_left.max(u32::from(tile.left));
            let top = c_top.max(u32::from(tile.top));
            let right = c_right.min(u32::from(tile.right));
            let bottom = c_bottom.min(u32::from(tile.bottom));
            if left > right || top > bottom {
                return Ok(());
            }
            let run = (right - left + 1) as usize * bpp;
            for row in top..=bottom {
                let src = (row - u32::from(tile.top)) as usize * stride
                    + (left - u32::from(tile.left)) as usize * bpp;
                let dst = (row - c_top) as usize * out_stride + (left - c_left) as usize * bpp;
                let (Some(src), Some(dst)) = (tile.pixels.get(src..src + run), pixels.get_mut(dst..dst + run))
                else {
                    return Err(GfxError::Asset("tile row outside crop buffer"));
                };
                dst.copy_from_slice(src);
            }
            Ok(())
        })?;

        Ok(DecodedImage {
            pixels,
            width: crop.width,
            height: crop.height,
        })
    }
}
