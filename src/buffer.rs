//! Borrowed view of packed source pixels.
//!
//! [`PixelBuffer`] never reads outside its slice. A pixel whose offset fails
//! the [`PixelBuffer::is_readable`] bound reads as zero; a pixel that passes
//! the bound but runs past the end gets zeros for the missing bytes.

use core::fmt;

use crate::format::FormatDescriptor;

/// Size of one packed little-endian pixel word.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PackedWidth {
    /// 16 bits per pixel.
    Two = 2,
    /// 24 bits per pixel. The high byte of the word is always zero.
    Three = 3,
    /// 32 bits per pixel.
    Four = 4,
}

impl PackedWidth {
    /// Pixel word size for a bit depth, or `None` for anything but 16, 24, 32.
    pub const fn from_bits_per_pixel(bits: u16) -> Option<Self> {
        match bits {
            16 => Some(Self::Two),
            24 => Some(Self::Three),
            32 => Some(Self::Four),
            _ => None,
        }
    }

    /// Bytes per pixel.
    #[inline]
    pub const fn bytes(self) -> usize {
        self as usize
    }

    /// Assemble a pixel word from up to four little-endian bytes.
    #[inline]
    const fn assemble(self, b: [u8; 4]) -> u32 {
        match self {
            Self::Two => u16::from_le_bytes([b[0], b[1]]) as u32,
            Self::Three => u32::from_le_bytes([b[0], b[1], b[2], 0]),
            Self::Four => u32::from_le_bytes(b),
        }
    }
}

/// Packed pixel rows borrowed from the caller.
///
/// `stride` is the distance in bytes between scanline starts, row padding
/// included. The data may be shorter than `stride * rows`; missing pixels
/// decode as zero.
#[derive(Clone, Copy)]
pub struct PixelBuffer<'a> {
    data: &'a [u8],
    stride: usize,
}

impl<'a> PixelBuffer<'a> {
    /// Wrap `data` with an explicit stride.
    #[inline]
    pub const fn new(data: &'a [u8], stride: usize) -> Self {
        Self { data, stride }
    }

    /// Wrap `data` using the standard 4-byte aligned DIB stride of `desc`.
    #[inline]
    pub const fn for_format(data: &'a [u8], desc: &FormatDescriptor) -> Self {
        Self::new(data, desc.dib_stride())
    }

    /// Byte stride between scanline starts.
    #[inline]
    pub const fn stride(&self) -> usize {
        self.stride
    }

    /// Total bytes available.
    #[inline]
    pub const fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the buffer holds no bytes.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The underlying bytes.
    #[inline]
    pub const fn as_bytes(&self) -> &'a [u8] {
        self.data
    }

    /// Byte offset of the start of stored scanline `line`.
    ///
    /// Saturates instead of overflowing; a saturated offset is never readable.
    #[inline]
    pub const fn line_offset(&self, line: usize) -> usize {
        line.saturating_mul(self.stride)
    }

    /// Bytes needed to hold `rows` scanlines of `width` pixels.
    ///
    /// The last scanline needs only its pixels, not its padding. Saturates
    /// instead of overflowing.
    #[inline]
    pub const fn required_len(&self, width: usize, rows: usize, packed: PackedWidth) -> usize {
        if width == 0 || rows == 0 {
            return 0;
        }
        self.line_offset(rows - 1)
            .saturating_add(width.saturating_mul(packed.bytes()))
    }

    /// Whether a pixel at `offset` may be read.
    ///
    /// The bound is `offset < len + bytes_per_pixel`, which admits pixels
    /// that start up to `bytes_per_pixel - 1` bytes past the end. Those bytes
    /// are not read; they come back as zero from [`read_packed`](Self::read_packed).
    #[inline]
    pub const fn is_readable(&self, offset: usize, width: PackedWidth) -> bool {
        offset < self.data.len().saturating_add(width.bytes())
    }

    /// Read one packed little-endian pixel at `offset`.
    ///
    /// Returns 0 when the offset fails [`is_readable`](Self::is_readable).
    /// Bytes at or past the end of the buffer read as zero.
    #[inline]
    pub fn read_packed(&self, offset: usize, width: PackedWidth) -> u32 {
        if !self.is_readable(offset, width) {
            return 0;
        }
        let mut bytes = [0u8; 4];
        if let Some(tail) = self.data.get(offset..) {
            let n = tail.len().min(width.bytes());
            bytes[..n].copy_from_slice(&tail[..n]);
        }
        width.assemble(bytes)
    }
}

impl fmt::Debug for PixelBuffer<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PixelBuffer")
            .field("len", &self.data.len())
            .field("stride", &self.stride)
            .finish()
    }
}
