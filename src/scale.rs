//! Channel expansion tables.
//!
//! A [`ScaleTable`] maps every raw value of an N-bit channel (1 ≤ N ≤ 8) to
//! its linearly scaled 8-bit equivalent: `table[i] = i * 255 / (2^N - 1)`,
//! rounded down. [`ScaleTables`] holds one table per width and is evaluated
//! at compile time, so every table is complete before any decoder can read
//! it and no table is ever rebuilt. Decoders borrow the cache explicitly;
//! [`ScaleTables::shared()`] is the process-wide instance.

use crate::bitfield::MAX_CHANNEL_BITS;

const TABLE_COUNT: usize = MAX_CHANNEL_BITS as usize;

/// Expansion table for one channel bit-width.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct ScaleTable {
    width: u8,
    entries: [u8; 256],
}

impl ScaleTable {
    /// Build the table for `width` bits.
    ///
    /// # Panics
    ///
    /// Panics if `width` is outside `1..=8`. In const context this is a
    /// compile error.
    pub const fn build(width: u32) -> Self {
        assert!(
            width >= 1 && width <= MAX_CHANNEL_BITS,
            "scale table width must be 1..=8"
        );
        let max = (1u32 << width) - 1;
        let mut entries = [0u8; 256];
        let mut i = 0u32;
        while i <= max {
            entries[i as usize] = (i * 255 / max) as u8;
            i += 1;
        }
        Self {
            width: width as u8,
            entries,
        }
    }

    /// Channel bit-width this table expands.
    #[inline]
    pub const fn width(&self) -> u32 {
        self.width as u32
    }

    /// Number of entries (`2^width`), at least 2.
    #[inline]
    pub const fn entry_count(&self) -> usize {
        1 << self.width
    }

    /// Table entries, `2^width` of them.
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.entries[..self.entry_count()]
    }

    /// Scaled 8-bit value for raw channel value `raw`.
    ///
    /// Bits above the table width are ignored.
    #[inline]
    pub const fn scale(&self, raw: u32) -> u8 {
        self.entries[(raw as usize) & (self.entry_count() - 1)]
    }
}

impl core::fmt::Debug for ScaleTable {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ScaleTable")
            .field("width", &self.width)
            .field("entries", &self.as_slice())
            .finish()
    }
}

/// One [`ScaleTable`] for each channel width 1..=8.
///
/// Immutable once built; share by reference across decoders and threads.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ScaleTables {
    tables: [ScaleTable; TABLE_COUNT],
}

static SHARED: ScaleTables = ScaleTables::new();

impl ScaleTables {
    /// Build all eight tables.
    pub const fn new() -> Self {
        let mut tables = [ScaleTable::build(1); TABLE_COUNT];
        let mut i = 1;
        while i < TABLE_COUNT {
            tables[i] = ScaleTable::build(i as u32 + 1);
            i += 1;
        }
        Self { tables }
    }

    /// The process-wide table cache.
    #[inline]
    pub fn shared() -> &'static ScaleTables {
        &SHARED
    }

    /// Table for a channel `width` bits wide, or `None` outside `1..=8`.
    #[inline]
    pub fn table_for(&self, width: u32) -> Option<&ScaleTable> {
        match width {
            1..=MAX_CHANNEL_BITS => Some(&self.tables[width as usize - 1]),
            _ => None,
        }
    }

    /// Iterate tables from width 1 to 8.
    pub fn iter(&self) -> impl Iterator<Item = &ScaleTable> {
        self.tables.iter()
    }
}

impl Default for ScaleTables {
    fn default() -> Self {
        Self::new()
    }
}
