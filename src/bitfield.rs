//! Channel bitfield decoding.
//!
//! A DIB channel mask is a 32-bit word whose set bits select the bits of a
//! packed pixel that belong to one channel. [`Bitfield::decode`] reduces the
//! mask to a `(shift, mask)` pair so a channel value is `(pixel >> shift) & mask`.

/// Widest channel the decoder can expand to 8 bits.
pub const MAX_CHANNEL_BITS: u32 = 8;

/// Largest reduced mask accepted by validation (`2^MAX_CHANNEL_BITS - 1`).
pub const MAX_REDUCED_MASK: u32 = (1 << MAX_CHANNEL_BITS) - 1;

/// A decoded channel mask.
///
/// `mask` is the original mask shifted down so that its lowest set bit is
/// bit 0. Contiguity of the remaining bits is not checked here: a mask with
/// internal gaps decodes to a reduced mask that still has gaps. Such masks
/// pass validation as long as they span at most 8 bits, and then fail to
/// bind a scale table (see [`ChannelSpec`](crate::ChannelSpec)).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Bitfield {
    /// Position of the lowest set bit of the original mask.
    pub shift: u32,
    /// Original mask shifted right by `shift`.
    pub mask: u32,
}

impl Bitfield {
    /// The absent channel: shift 0, mask 0.
    pub const ABSENT: Self = Self { shift: 0, mask: 0 };

    /// Decode a 32-bit channel mask.
    ///
    /// Returns [`Bitfield::ABSENT`] for a zero mask.
    #[inline]
    pub const fn decode(mask: u32) -> Self {
        if mask == 0 {
            return Self::ABSENT;
        }
        let shift = mask.trailing_zeros();
        Self {
            shift,
            mask: mask >> shift,
        }
    }

    /// Whether this channel is present in the pixel word.
    #[inline]
    pub const fn is_present(self) -> bool {
        self.mask != 0
    }

    /// Number of bits spanned by the reduced mask, from bit 0 to its highest set bit.
    ///
    /// Equals the channel bit-width for contiguous masks.
    #[inline]
    pub const fn span(self) -> u32 {
        u32::BITS - self.mask.leading_zeros()
    }

    /// Bit-width `w` such that `mask == 2^w - 1`, if the reduced mask is a
    /// clean run of ones.
    #[inline]
    pub const fn contiguous_width(self) -> Option<u32> {
        if self.mask == 0 {
            return None;
        }
        let width = self.mask.trailing_ones();
        if width == self.span() {
            Some(width)
        } else {
            None
        }
    }

    /// Extract this channel's raw value from a packed pixel.
    #[inline]
    pub const fn extract(self, pixel: u32) -> u32 {
        (pixel >> self.shift) & self.mask
    }

    /// Re-expand to the original 32-bit mask.
    #[inline]
    pub const fn to_mask(self) -> u32 {
        self.mask << self.shift
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_mask_is_absent() {
        assert_eq!(Bitfield::decode(0), Bitfield::ABSENT);
        assert!(!Bitfield::ABSENT.is_present());
        assert_eq!(Bitfield::ABSENT.span(), 0);
        assert_eq!(Bitfield::ABSENT.contiguous_width(), None);
    }

    #[test]
    fn rgb555_masks() {
        assert_eq!(
            Bitfield::decode(0x7C00),
            Bitfield {
                shift: 10,
                mask: 0x1F
            }
        );
        assert_eq!(Bitfield::decode(0x03E0), Bitfield { shift: 5, mask: 0x1F });
        assert_eq!(Bitfield::decode(0x001F), Bitfield { shift: 0, mask: 0x1F });
    }

    #[test]
    fn top_byte_mask() {
        let field = Bitfield::decode(0xFF00_0000);
        assert_eq!(field.shift, 24);
        assert_eq!(field.mask, 0xFF);
        assert_eq!(field.contiguous_width(), Some(8));
        assert_eq!(field.extract(0xAB12_3456), 0xAB);
    }

    #[test]
    fn contiguous_masks_reexpand_to_original() {
        for width in 1..=32u32 {
            let run = if width == 32 {
                u32::MAX
            } else {
                (1u32 << width) - 1
            };
            for shift in 0..=(32 - width) {
                let mask = run << shift;
                let field = Bitfield::decode(mask);
                assert_eq!(field.shift, shift, "mask {mask:#010x}");
                assert_eq!(field.to_mask(), mask, "mask {mask:#010x}");
                assert_eq!(field.span(), width);
                assert_eq!(field.contiguous_width(), Some(width));
            }
        }
    }

    #[test]
    fn gapped_mask_is_decoded_but_not_contiguous() {
        // 0b1011 << 4
        let field = Bitfield::decode(0xB0);
        assert_eq!(field.shift, 4);
        assert_eq!(field.mask, 0b1011);
        assert_eq!(field.span(), 4);
        assert_eq!(field.contiguous_width(), None);
    }

    #[test]
    fn extract_green_565() {
        let field = Bitfield::decode(0x07E0);
        // r=0b10101, g=0b110011, b=0b01110
        let pixel = (0b10101 << 11) | (0b110011 << 5) | 0b01110;
        assert_eq!(field.extract(pixel), 0b110011);
    }
}
