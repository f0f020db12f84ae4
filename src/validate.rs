//! Format validation.
//!
//! Checks run in a fixed order and the first failure wins. Zero masks,
//! overlapping masks and masks with internal gaps are accepted here; only a
//! reduced mask wider than 8 bits is rejected.

use crate::bitfield::MAX_REDUCED_MASK;
use crate::channel::ChannelMasks;
use crate::error::FormatError;
use crate::format::{FormatDescriptor, MAX_DIMENSION};

/// Check that `desc` and `masks` describe something the decoder supports.
///
/// Masks are checked as they will be used: with `BI_RGB` the depth defaults
/// replace the supplied masks, so only `BI_BITFIELDS` masks can fail.
pub fn validate(desc: &FormatDescriptor, masks: ChannelMasks) -> Result<(), FormatError> {
    if desc.width < 0 {
        return Err(FormatError::NegativeWidth);
    }
    if desc.width > MAX_DIMENSION || desc.height < -MAX_DIMENSION || desc.height > MAX_DIMENSION {
        return Err(FormatError::DimensionsOutOfBounds);
    }
    if !matches!(desc.bits_per_pixel, 16 | 24 | 32) {
        return Err(FormatError::UnsupportedDepth);
    }
    if !desc.compression.is_supported() {
        return Err(FormatError::UnsupportedCompression);
    }
    if masks
        .effective(desc)
        .decode()
        .iter()
        .any(|field| field.mask > MAX_REDUCED_MASK)
    {
        return Err(FormatError::MaskTooLong);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::Compression;

    fn rgb_desc(width: i32, height: i32, depth: u16) -> FormatDescriptor {
        FormatDescriptor::new(width, height, depth, Compression::Rgb)
    }

    #[test]
    fn accepts_supported_formats() {
        for depth in [16, 24, 32] {
            assert_eq!(validate(&rgb_desc(640, 480, depth), ChannelMasks::NONE), Ok(()));
            assert_eq!(validate(&rgb_desc(640, -480, depth), ChannelMasks::NONE), Ok(()));
        }
        assert_eq!(validate(&rgb_desc(0, 0, 24), ChannelMasks::NONE), Ok(()));
        assert_eq!(
            validate(&rgb_desc(MAX_DIMENSION, -MAX_DIMENSION, 32), ChannelMasks::NONE),
            Ok(())
        );
    }

    #[test]
    fn rejects_negative_width() {
        assert_eq!(
            validate(&rgb_desc(-1, 10, 24), ChannelMasks::NONE),
            Err(FormatError::NegativeWidth)
        );
    }

    #[test]
    fn rejects_out_of_bounds_dimensions() {
        assert_eq!(
            validate(&rgb_desc(i32::MAX, 10, 24), ChannelMasks::NONE),
            Err(FormatError::DimensionsOutOfBounds)
        );
        assert_eq!(
            validate(&rgb_desc(10, MAX_DIMENSION + 1, 24), ChannelMasks::NONE),
            Err(FormatError::DimensionsOutOfBounds)
        );
        assert_eq!(
            validate(&rgb_desc(10, -MAX_DIMENSION - 1, 24), ChannelMasks::NONE),
            Err(FormatError::DimensionsOutOfBounds)
        );
        assert_eq!(
            validate(&rgb_desc(10, i32::MIN, 24), ChannelMasks::NONE),
            Err(FormatError::DimensionsOutOfBounds)
        );
    }

    #[test]
    fn rejects_unsupported_depths() {
        for depth in [0, 1, 4, 8, 15, 48, 64] {
            assert_eq!(
                validate(&rgb_desc(1, 1, depth), ChannelMasks::NONE),
                Err(FormatError::UnsupportedDepth),
                "depth {depth}"
            );
        }
    }

    #[test]
    fn rejects_unsupported_compression() {
        for compression in [
            Compression::Rle8,
            Compression::Rle4,
            Compression::Jpeg,
            Compression::Png,
            Compression::AlphaBitFields,
            Compression::Unknown(11),
        ] {
            let desc = FormatDescriptor::new(1, 1, 24, compression);
            assert_eq!(
                validate(&desc, ChannelMasks::NONE),
                Err(FormatError::UnsupportedCompression)
            );
        }
    }

    #[test]
    fn rejects_wide_masks() {
        let desc = FormatDescriptor::new(1, 1, 32, Compression::BitFields);
        let nine_bits = 0x1FF << 3;
        assert_eq!(
            validate(&desc, ChannelMasks::new(nine_bits, 0xFF, 0, 0)),
            Err(FormatError::MaskTooLong)
        );
        assert_eq!(
            validate(&desc, ChannelMasks::new(0xFF, 0, 0, 0xFFFF_0000)),
            Err(FormatError::MaskTooLong)
        );
        // two set bits nine apart still span nine bits
        assert_eq!(
            validate(&desc, ChannelMasks::new(0x101, 0, 0, 0)),
            Err(FormatError::MaskTooLong)
        );
    }

    #[test]
    fn accepts_zero_overlapping_and_gapped_masks() {
        let desc = FormatDescriptor::new(1, 1, 32, Compression::BitFields);
        assert_eq!(validate(&desc, ChannelMasks::NONE), Ok(()));
        assert_eq!(
            validate(&desc, ChannelMasks::new(0xFF, 0xFF, 0xFF, 0xFF)),
            Ok(())
        );
        assert_eq!(validate(&desc, ChannelMasks::new(0b1010_0101, 0, 0, 0)), Ok(()));
    }

    #[test]
    fn rgb_ignores_supplied_masks() {
        let desc = rgb_desc(1, 1, 32);
        assert_eq!(validate(&desc, ChannelMasks::new(u32::MAX, 0, 0, 0)), Ok(()));
    }

    #[test]
    fn first_failure_wins() {
        let desc = FormatDescriptor::new(-1, i32::MAX, 8, Compression::Rle8);
        assert_eq!(
            validate(&desc, ChannelMasks::NONE),
            Err(FormatError::NegativeWidth)
        );
        let desc = FormatDescriptor::new(1, 1, 8, Compression::Rle8);
        assert_eq!(
            validate(&desc, ChannelMasks::NONE),
            Err(FormatError::UnsupportedDepth)
        );
    }
}
