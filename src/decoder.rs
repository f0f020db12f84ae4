//! Scanline decoding.
//!
//! [`DecodeRequest`] gathers the header fields, masks and pixel data,
//! validates them and resolves the channel tables once. The resulting
//! [`DibDecoder`] turns any stored scanline into `width × 4` output bytes.
//!
//! Output alpha is not read from the pixel word. A pixel is opaque (0xFF) when
//! any of its scaled red, green or blue values is non-zero and transparent
//! (0x00) otherwise, even when an alpha mask was declared.
//!
//! Pixels whose bytes lie past the end of the pixel data decode as zero.
//! Truncation is never reported as an error.

use alloc::vec::Vec;

use enough::Stop;

use crate::buffer::{PackedWidth, PixelBuffer};
use crate::channel::{ChannelMasks, ChannelSpecs};
use crate::error::{BufferError, DibError, FormatError};
use crate::format::FormatDescriptor;
use crate::limits::Limits;
use crate::pixel::{ChannelOrder, PixelData};
use crate::scale::ScaleTables;
use crate::sink::DecodeRowSink;
use crate::validate::validate;

/// Rows decoded between cancellation checks, and strip height for sinks.
const STRIP_HEIGHT: usize = 16;

/// Everything needed to start a decode session.
///
/// ```
/// use zendib::{ChannelOrder, Compression, DecodeRequest, FormatDescriptor, PixelBuffer};
///
/// // one 24-bit pixel, padded to a 4-byte row
/// let data = [0x10, 0x20, 0x30, 0x00];
/// let desc = FormatDescriptor::new(1, 1, 24, Compression::Rgb);
/// let decoder = DecodeRequest::new(desc, PixelBuffer::for_format(&data, &desc)).start()?;
///
/// let mut row = [0u8; 4];
/// decoder.read_row(0, ChannelOrder::Rgba, &mut row)?;
/// assert_eq!(row, [0x30, 0x20, 0x10, 0xFF]);
/// # Ok::<(), zendib::DibError>(())
/// ```
#[derive(Clone, Debug)]
pub struct DecodeRequest<'a> {
    desc: FormatDescriptor,
    masks: ChannelMasks,
    pixels: PixelBuffer<'a>,
    tables: &'a ScaleTables,
    limits: Option<Limits>,
}

impl<'a> DecodeRequest<'a> {
    /// Start a request with no masks, the shared table cache and no limits.
    pub fn new(desc: FormatDescriptor, pixels: PixelBuffer<'a>) -> Self {
        Self {
            desc,
            masks: ChannelMasks::NONE,
            pixels,
            tables: ScaleTables::shared(),
            limits: None,
        }
    }

    /// Set the channel masks. Only used with `BI_BITFIELDS`.
    pub fn with_masks(mut self, masks: ChannelMasks) -> Self {
        self.masks = masks;
        self
    }

    /// Use a specific table cache instead of [`ScaleTables::shared()`].
    pub fn with_tables(mut self, tables: &'a ScaleTables) -> Self {
        self.tables = tables;
        self
    }

    /// Apply resource limits, checked after validation.
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// Validate the declared format without starting a session.
    pub fn validate(&self) -> Result<(), FormatError> {
        validate(&self.desc, self.masks)
    }

    /// Validate, check limits and resolve the channel tables.
    ///
    /// No pixel is read before this succeeds.
    pub fn start(self) -> Result<DibDecoder<'a>, DibError> {
        let desc = self.desc;
        validate(&desc, self.masks)?;
        if let Some(limits) = &self.limits {
            limits.check(&desc)?;
        }
        let packed = PackedWidth::from_bits_per_pixel(desc.bits_per_pixel)
            .ok_or(FormatError::UnsupportedDepth)?;
        let row_bytes = desc.output_row_bytes().ok_or(BufferError::SizeOverflow)?;

        let specs = ChannelSpecs::resolve(&desc, self.masks, self.tables);
        log::debug!(
            "dib: {}x{} {}bpp {:?} {}, r={:?} g={:?} b={:?} a={:?}, stride {} over {} bytes",
            desc.width,
            desc.rows(),
            desc.bits_per_pixel,
            desc.compression,
            if desc.is_top_down() { "top-down" } else { "bottom-up" },
            specs.red.field,
            specs.green.field,
            specs.blue.field,
            specs.alpha.field,
            self.pixels.stride(),
            self.pixels.len(),
        );
        let required = self
            .pixels
            .required_len(desc.pixel_width(), desc.rows(), packed);
        if required > self.pixels.len() {
            log::debug!(
                "dib: pixel data holds {} of {required} bytes, missing pixels decode as zero",
                self.pixels.len()
            );
        }
        for (name, spec) in ["red", "green", "blue", "alpha"]
            .into_iter()
            .zip(specs.as_array())
        {
            if spec.is_unbound() {
                log::warn!(
                    "dib: {name} mask {:#010x} is not a contiguous run of 1-8 bits, channel decodes as zero",
                    spec.field.to_mask()
                );
            }
        }

        Ok(DibDecoder {
            desc,
            specs,
            pixels: self.pixels,
            packed,
            row_bytes,
            required,
        })
    }
}

/// A started decode session.
///
/// Immutable after setup. Rows can be read in any order and from several
/// threads at once.
#[derive(Clone, Debug)]
pub struct DibDecoder<'a> {
    desc: FormatDescriptor,
    specs: ChannelSpecs<'a>,
    pixels: PixelBuffer<'a>,
    packed: PackedWidth,
    row_bytes: usize,
    required: usize,
}

impl<'a> DibDecoder<'a> {
    /// Declared format.
    #[inline]
    pub fn descriptor(&self) -> &FormatDescriptor {
        &self.desc
    }

    /// Resolved channels.
    #[inline]
    pub fn channels(&self) -> &ChannelSpecs<'a> {
        &self.specs
    }

    /// Source pixel data.
    #[inline]
    pub fn pixels(&self) -> PixelBuffer<'a> {
        self.pixels
    }

    /// Width in pixels.
    #[inline]
    pub fn width(&self) -> usize {
        self.desc.pixel_width()
    }

    /// Number of output rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.desc.rows()
    }

    /// Output bytes per row (`width × 4`).
    #[inline]
    pub fn row_bytes(&self) -> usize {
        self.row_bytes
    }

    /// Source bytes needed for every scanline to be fully present.
    #[inline]
    pub fn required_source_bytes(&self) -> usize {
        self.required
    }

    /// Whether the pixel data is shorter than
    /// [`required_source_bytes()`](Self::required_source_bytes).
    #[inline]
    pub fn is_truncated(&self) -> bool {
        self.required > self.pixels.len()
    }

    /// Output bytes for the whole image.
    pub fn image_bytes(&self) -> Result<usize, BufferError> {
        self.row_bytes
            .checked_mul(self.rows())
            .ok_or(BufferError::SizeOverflow)
    }

    /// Decode one packed pixel word.
    #[inline]
    pub fn decode_pixel(&self, pixel: u32, order: ChannelOrder) -> [u8; 4] {
        let rgb = self.specs.sample_rgb(pixel);
        let alpha = if rgb == [0, 0, 0] { 0x00 } else { 0xFF };
        order.arrange(rgb, alpha)
    }

    /// Decode output row `row` into the first [`row_bytes()`](Self::row_bytes)
    /// bytes of `out`.
    ///
    /// Row 0 is the top of the image whatever the storage order.
    pub fn read_row(&self, row: usize, order: ChannelOrder, out: &mut [u8]) -> Result<(), BufferError> {
        let rows = self.rows();
        let line = self
            .desc
            .source_row(row)
            .ok_or(BufferError::RowOutOfBounds { row, rows })?;
        let actual = out.len();
        let out = out
            .get_mut(..self.row_bytes)
            .ok_or(BufferError::OutputTooSmall {
                required: self.row_bytes,
                actual,
            })?;

        let bpp = self.packed.bytes();
        let start = self.pixels.line_offset(line);
        for (x, dst) in out.chunks_exact_mut(4).enumerate() {
            let offset = start.saturating_add(x.saturating_mul(bpp));
            let pixel = self.pixels.read_packed(offset, self.packed);
            dst.copy_from_slice(&self.decode_pixel(pixel, order));
        }
        Ok(())
    }

    /// Decode every row, top to bottom, into a tightly packed buffer of
    /// [`image_bytes()`](Self::image_bytes) bytes.
    ///
    /// `stop` is checked every 16 rows.
    pub fn decode_into(&self, order: ChannelOrder, out: &mut [u8], stop: &dyn Stop) -> Result<(), DibError> {
        let total = self.image_bytes()?;
        let actual = out.len();
        let out = out.get_mut(..total).ok_or(BufferError::OutputTooSmall {
            required: total,
            actual,
        })?;
        if self.row_bytes == 0 {
            return Ok(());
        }
        for (row, dst) in out.chunks_exact_mut(self.row_bytes).enumerate() {
            if row % STRIP_HEIGHT == 0 {
                stop.check()?;
            }
            self.read_row(row, order, dst)?;
        }
        Ok(())
    }

    /// Decode every row into `sink`, 16 rows per strip.
    ///
    /// `stop` is checked before each strip.
    pub fn decode_rows(
        &self,
        order: ChannelOrder,
        sink: &mut dyn DecodeRowSink,
        stop: &dyn Stop,
    ) -> Result<(), DibError> {
        let rows = self.rows();
        let mut y = 0;
        while y < rows {
            stop.check()?;
            let height = STRIP_HEIGHT.min(rows - y);
            let min_bytes = self
                .row_bytes
                .checked_mul(height)
                .ok_or(BufferError::SizeOverflow)?;
            let buf = sink.demand(y as u32, height as u32, min_bytes);
            let actual = buf.len();
            let strip = buf.get_mut(..min_bytes).ok_or(BufferError::OutputTooSmall {
                required: min_bytes,
                actual,
            })?;
            if self.row_bytes > 0 {
                for (i, dst) in strip.chunks_exact_mut(self.row_bytes).enumerate() {
                    self.read_row(y + i, order, dst)?;
                }
            }
            y += height;
        }
        Ok(())
    }

    /// Decode the whole image into a newly allocated [`PixelData`].
    pub fn decode(&self, order: ChannelOrder, stop: &dyn Stop) -> Result<PixelData, DibError> {
        let total = self.image_bytes()?;
        let mut buf = Vec::new();
        buf.try_reserve_exact(total)
            .map_err(|_| BufferError::AllocationFailed { bytes: total })?;
        buf.resize(total, 0);
        self.decode_into(order, &mut buf, stop)?;
        Ok(PixelData::from_bytes(&buf, self.width(), self.rows(), order))
    }
}
