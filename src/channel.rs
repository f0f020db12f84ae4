//! Channel masks and their resolved per-session specs.

use crate::bitfield::Bitfield;
use crate::format::{Compression, FormatDescriptor};
use crate::scale::{ScaleTable, ScaleTables};

/// Raw 32-bit channel masks as declared by a `BI_BITFIELDS` header.
///
/// A zero mask marks an absent channel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ChannelMasks {
    /// Red mask.
    pub red: u32,
    /// Green mask.
    pub green: u32,
    /// Blue mask.
    pub blue: u32,
    /// Alpha mask.
    pub alpha: u32,
}

impl ChannelMasks {
    /// 16-bit `BI_RGB` layout: X1R5G5B5.
    pub const RGB555: Self = Self::new(0x7C00, 0x03E0, 0x001F, 0);
    /// 24/32-bit `BI_RGB` layout: (X8)R8G8B8.
    pub const RGB888: Self = Self::new(0x00FF_0000, 0x0000_FF00, 0x0000_00FF, 0);
    /// No channels.
    pub const NONE: Self = Self::new(0, 0, 0, 0);

    /// Create a mask set.
    pub const fn new(red: u32, green: u32, blue: u32, alpha: u32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Fixed layout used by `BI_RGB` images of the given depth.
    ///
    /// Depths other than 16, 24 and 32 have no channel layout.
    pub const fn defaults_for_depth(bits_per_pixel: u16) -> Self {
        match bits_per_pixel {
            16 => Self::RGB555,
            24 | 32 => Self::RGB888,
            _ => Self::NONE,
        }
    }

    /// Masks actually in effect for `desc`.
    ///
    /// `BI_BITFIELDS` uses the supplied masks; every other mode uses the
    /// depth defaults and ignores `self`.
    pub const fn effective(self, desc: &FormatDescriptor) -> Self {
        match desc.compression {
            Compression::BitFields => self,
            _ => Self::defaults_for_depth(desc.bits_per_pixel),
        }
    }

    /// Decode all four masks, in red, green, blue, alpha order.
    pub const fn decode(self) -> [Bitfield; 4] {
        [
            Bitfield::decode(self.red),
            Bitfield::decode(self.green),
            Bitfield::decode(self.blue),
            Bitfield::decode(self.alpha),
        ]
    }
}

/// One channel resolved against a table cache.
///
/// `table` is `None` when the channel is absent or its reduced mask is not of
/// the form `2^w - 1` with `w` in 1..=8; such a channel always scales to 0.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChannelSpec<'t> {
    /// Decoded shift and reduced mask.
    pub field: Bitfield,
    /// Expansion table bound to this channel, if any.
    pub table: Option<&'t ScaleTable>,
}

impl<'t> ChannelSpec<'t> {
    /// Bind `field` to the table matching its width.
    pub fn bind(field: Bitfield, tables: &'t ScaleTables) -> Self {
        let table = field
            .contiguous_width()
            .and_then(|width| tables.table_for(width));
        Self { field, table }
    }

    /// Whether this channel has a table and so can produce non-zero values.
    #[inline]
    pub fn contributes(&self) -> bool {
        self.table.is_some()
    }

    /// Whether a non-zero mask failed to bind a table.
    #[inline]
    pub fn is_unbound(&self) -> bool {
        self.field.is_present() && self.table.is_none()
    }

    /// Scaled 8-bit value of this channel in `pixel`.
    #[inline]
    pub fn sample(&self, pixel: u32) -> u8 {
        match self.table {
            Some(table) => table.scale(self.field.extract(pixel)),
            None => 0,
        }
    }
}

/// The four resolved channels of a decode session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChannelSpecs<'t> {
    /// Red channel.
    pub red: ChannelSpec<'t>,
    /// Green channel.
    pub green: ChannelSpec<'t>,
    /// Blue channel.
    pub blue: ChannelSpec<'t>,
    /// Alpha channel. Resolved but not used for output alpha.
    pub alpha: ChannelSpec<'t>,
}

impl<'t> ChannelSpecs<'t> {
    /// Resolve the channels of `desc`.
    ///
    /// `BI_RGB` formats never have alpha and use the depth defaults; with
    /// `BI_BITFIELDS` the four supplied masks are decoded as given.
    pub fn resolve(desc: &FormatDescriptor, masks: ChannelMasks, tables: &'t ScaleTables) -> Self {
        let [red, green, blue, alpha] = masks.effective(desc).decode();
        Self {
            red: ChannelSpec::bind(red, tables),
            green: ChannelSpec::bind(green, tables),
            blue: ChannelSpec::bind(blue, tables),
            alpha: ChannelSpec::bind(alpha, tables),
        }
    }

    /// Channels in red, green, blue, alpha order.
    pub fn as_array(&self) -> [&ChannelSpec<'t>; 4] {
        [&self.red, &self.green, &self.blue, &self.alpha]
    }

    /// Scaled `[r, g, b]` of a packed pixel.
    #[inline]
    pub fn sample_rgb(&self, pixel: u32) -> [u8; 3] {
        [
            self.red.sample(pixel),
            self.green.sample(pixel),
            self.blue.sample(pixel),
        ]
    }
}
