//! Declared pixel format of a DIB.
//!
//! [`FormatDescriptor`] carries the geometry and encoding fields read from a
//! bitmap info header. The header parser is someone else's job; this crate
//! only consumes the values.

/// Largest accepted width and absolute height (`2^30`).
pub const MAX_DIMENSION: i32 = 0x4000_0000;

/// DIB compression field.
///
/// Only [`Compression::Rgb`] and [`Compression::BitFields`] can be decoded;
/// the rest exist so a header value can be carried through validation and
/// rejected with a reason.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Compression {
    /// `BI_RGB`: uncompressed with fixed channel layout.
    Rgb,
    /// `BI_RLE8`.
    Rle8,
    /// `BI_RLE4`.
    Rle4,
    /// `BI_BITFIELDS`: uncompressed with explicit channel masks.
    BitFields,
    /// `BI_JPEG`.
    Jpeg,
    /// `BI_PNG`.
    Png,
    /// `BI_ALPHABITFIELDS`.
    AlphaBitFields,
    /// Any other header value.
    Unknown(u32),
}

impl Compression {
    /// Map the `biCompression` header field.
    pub const fn from_u32(value: u32) -> Self {
        match value {
            0 => Self::Rgb,
            1 => Self::Rle8,
            2 => Self::Rle4,
            3 => Self::BitFields,
            4 => Self::Jpeg,
            5 => Self::Png,
            6 => Self::AlphaBitFields,
            other => Self::Unknown(other),
        }
    }

    /// The `biCompression` header value.
    pub const fn to_u32(self) -> u32 {
        match self {
            Self::Rgb => 0,
            Self::Rle8 => 1,
            Self::Rle4 => 2,
            Self::BitFields => 3,
            Self::Jpeg => 4,
            Self::Png => 5,
            Self::AlphaBitFields => 6,
            Self::Unknown(other) => other,
        }
    }

    /// Whether this decoder handles the compression mode.
    pub const fn is_supported(self) -> bool {
        matches!(self, Self::Rgb | Self::BitFields)
    }
}

/// Geometry and encoding of packed DIB pixel data.
///
/// `height` is signed: negative means rows are stored top-down, positive
/// means bottom-up. Run [`validate`](crate::validate) before trusting any
/// of the derived sizes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FormatDescriptor {
    /// Width in pixels.
    pub width: i32,
    /// Height in pixels; the sign encodes row order.
    pub height: i32,
    /// Bits per pixel.
    pub bits_per_pixel: u16,
    /// Compression mode.
    pub compression: Compression,
}

impl FormatDescriptor {
    /// Create a descriptor.
    pub const fn new(width: i32, height: i32, bits_per_pixel: u16, compression: Compression) -> Self {
        Self {
            width,
            height,
            bits_per_pixel,
            compression,
        }
    }

    /// Whether rows are stored top-down (negative height).
    #[inline]
    pub const fn is_top_down(&self) -> bool {
        self.height < 0
    }

    /// Width in pixels, clamped at zero.
    #[inline]
    pub const fn pixel_width(&self) -> usize {
        if self.width < 0 { 0 } else { self.width as usize }
    }

    /// Number of rows, regardless of storage order.
    #[inline]
    pub const fn rows(&self) -> usize {
        self.height.unsigned_abs() as usize
    }

    /// Bytes per packed source pixel.
    #[inline]
    pub const fn bytes_per_pixel(&self) -> usize {
        (self.bits_per_pixel as usize).div_ceil(8)
    }

    /// Output bytes per decoded row (`width * 4`), or `None` if that
    /// overflows `usize`.
    #[inline]
    pub const fn output_row_bytes(&self) -> Option<usize> {
        self.pixel_width().checked_mul(4)
    }

    /// Standard DIB stride: the row size rounded up to a multiple of 4 bytes.
    ///
    /// Saturates on overflow.
    #[inline]
    pub const fn dib_stride(&self) -> usize {
        self.pixel_width()
            .saturating_mul(self.bits_per_pixel as usize)
            .div_ceil(32)
            .saturating_mul(4)
    }

    /// Stored scanline index holding output row `row`.
    ///
    /// Top-down images store row 0 first; bottom-up images store it last.
    /// Returns `None` when `row` is outside the image.
    #[inline]
    pub const fn source_row(&self, row: usize) -> Option<usize> {
        let rows = self.rows();
        if row >= rows {
            return None;
        }
        if self.is_top_down() {
            Some(row)
        } else {
            Some(rows - 1 - row)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compression_header_values() {
        for value in 0..=6u32 {
            assert_eq!(Compression::from_u32(value).to_u32(), value);
        }
        assert_eq!(Compression::from_u32(3), Compression::BitFields);
        assert_eq!(Compression::from_u32(99), Compression::Unknown(99));
        assert!(Compression::Rgb.is_supported());
        assert!(Compression::BitFields.is_supported());
        assert!(!Compression::Rle8.is_supported());
        assert!(!Compression::AlphaBitFields.is_supported());
    }

    #[test]
    fn row_mapping_follows_height_sign() {
        let bottom_up = FormatDescriptor::new(2, 4, 16, Compression::Rgb);
        assert!(!bottom_up.is_top_down());
        assert_eq!(bottom_up.source_row(0), Some(3));
        assert_eq!(bottom_up.source_row(3), Some(0));
        assert_eq!(bottom_up.source_row(4), None);

        let top_down = FormatDescriptor::new(2, -4, 16, Compression::Rgb);
        assert!(top_down.is_top_down());
        assert_eq!(top_down.rows(), 4);
        assert_eq!(top_down.source_row(0), Some(0));
        assert_eq!(top_down.source_row(3), Some(3));
        assert_eq!(top_down.source_row(4), None);
    }

    #[test]
    fn sizes() {
        let desc = FormatDescriptor::new(3, 1, 24, Compression::Rgb);
        assert_eq!(desc.bytes_per_pixel(), 3);
        assert_eq!(desc.output_row_bytes(), Some(12));
        // 9 bytes padded to 12
        assert_eq!(desc.dib_stride(), 12);

        let desc = FormatDescriptor::new(3, 1, 16, Compression::Rgb);
        assert_eq!(desc.bytes_per_pixel(), 2);
        assert_eq!(desc.dib_stride(), 8);

        let desc = FormatDescriptor::new(5, 1, 32, Compression::BitFields);
        assert_eq!(desc.dib_stride(), 20);
    }

    #[test]
    fn extreme_height_does_not_overflow() {
        let desc = FormatDescriptor::new(1, i32::MIN, 32, Compression::Rgb);
        assert_eq!(desc.rows(), 1 << 31);
        assert!(desc.is_top_down());
        let desc = FormatDescriptor::new(-5, 1, 32, Compression::Rgb);
        assert_eq!(desc.pixel_width(), 0);
    }
}
