//! Caller-chosen caps on the images a session will accept.
//!
//! Checked by [`DecodeRequest::start()`](crate::DecodeRequest::start) after
//! format validation, so the descriptor is already known to be sane.

use crate::format::FormatDescriptor;

/// Resource caps for a decode session. Unset caps are not checked.
///
/// ```
/// use zendib::Limits;
///
/// let limits = Limits::default()
///     .with_max_pixels(100_000_000)
///     .with_max_output_bytes(512 * 1024 * 1024);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Limits {
    max_width: Option<usize>,
    max_rows: Option<usize>,
    max_pixels: Option<u64>,
    max_output_bytes: Option<u64>,
}

impl Limits {
    /// Cap the width in pixels.
    pub fn with_max_width(mut self, width: usize) -> Self {
        self.max_width = Some(width);
        self
    }

    /// Cap the row count, whatever the storage order.
    pub fn with_max_rows(mut self, rows: usize) -> Self {
        self.max_rows = Some(rows);
        self
    }

    /// Cap `width × rows`.
    pub fn with_max_pixels(mut self, pixels: u64) -> Self {
        self.max_pixels = Some(pixels);
        self
    }

    /// Cap the decoded size, 4 bytes per pixel.
    pub fn with_max_output_bytes(mut self, bytes: u64) -> Self {
        self.max_output_bytes = Some(bytes);
        self
    }

    /// Check `desc` against every cap that is set.
    ///
    /// Width is checked first, then rows, pixel count and output size.
    pub fn check(&self, desc: &FormatDescriptor) -> Result<(), LimitExceeded> {
        let width = desc.pixel_width();
        let rows = desc.rows();
        if let Some(max) = self.max_width
            && width > max
        {
            return Err(LimitExceeded::Width { width, max });
        }
        if let Some(max) = self.max_rows
            && rows > max
        {
            return Err(LimitExceeded::Rows { rows, max });
        }
        let pixels = (width as u64).saturating_mul(rows as u64);
        if let Some(max) = self.max_pixels
            && pixels > max
        {
            return Err(LimitExceeded::Pixels { pixels, max });
        }
        let bytes = pixels.saturating_mul(4);
        if let Some(max) = self.max_output_bytes
            && bytes > max
        {
            return Err(LimitExceeded::OutputBytes { bytes, max });
        }
        Ok(())
    }
}

/// An image larger than a [`Limits`] cap.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum LimitExceeded {
    /// Width over `max_width`.
    #[error("width {width} exceeds limit {max}")]
    Width {
        /// Image width.
        width: usize,
        /// Cap.
        max: usize,
    },
    /// Row count over `max_rows`.
    #[error("{rows} rows exceed limit {max}")]
    Rows {
        /// Image rows.
        rows: usize,
        /// Cap.
        max: usize,
    },
    /// `width × rows` over `max_pixels`.
    #[error("{pixels} pixels exceed limit {max}")]
    Pixels {
        /// Image pixel count.
        pixels: u64,
        /// Cap.
        max: u64,
    },
    /// Decoded size over `max_output_bytes`.
    #[error("{bytes} output bytes exceed limit {max}")]
    OutputBytes {
        /// Decoded size.
        bytes: u64,
        /// Cap.
        max: u64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::Compression;
    use alloc::string::ToString;

    fn desc(width: i32, height: i32) -> FormatDescriptor {
        FormatDescriptor::new(width, height, 24, Compression::Rgb)
    }

    #[test]
    fn default_accepts_anything_valid() {
        let limits = Limits::default();
        assert_eq!(limits.check(&desc(crate::MAX_DIMENSION, -crate::MAX_DIMENSION)), Ok(()));
        assert_eq!(limits.check(&desc(0, 0)), Ok(()));
    }

    #[test]
    fn caps_are_inclusive() {
        let limits = Limits::default()
            .with_max_width(640)
            .with_max_rows(480)
            .with_max_pixels(640 * 480)
            .with_max_output_bytes(640 * 480 * 4);
        assert_eq!(limits.check(&desc(640, 480)), Ok(()));
        assert_eq!(limits.check(&desc(640, -480)), Ok(()));
    }

    #[test]
    fn rows_use_absolute_height() {
        let limits = Limits::default().with_max_rows(100);
        assert_eq!(
            limits.check(&desc(10, -101)),
            Err(LimitExceeded::Rows { rows: 101, max: 100 })
        );
        assert_eq!(
            limits.check(&desc(10, 101)),
            Err(LimitExceeded::Rows { rows: 101, max: 100 })
        );
    }

    #[test]
    fn width_is_checked_before_rows() {
        let limits = Limits::default().with_max_width(8).with_max_rows(8);
        assert_eq!(
            limits.check(&desc(9, 9)),
            Err(LimitExceeded::Width { width: 9, max: 8 })
        );
    }

    #[test]
    fn pixels_and_output_bytes() {
        let limits = Limits::default().with_max_pixels(1_000_000);
        assert_eq!(
            limits.check(&desc(1001, 1000)),
            Err(LimitExceeded::Pixels {
                pixels: 1_001_000,
                max: 1_000_000
            })
        );

        // output size ignores source depth
        let limits = Limits::default().with_max_output_bytes(400);
        let rgb16 = FormatDescriptor::new(10, 10, 16, Compression::Rgb);
        assert_eq!(limits.check(&rgb16), Ok(()));
        let rgb16 = FormatDescriptor::new(10, 11, 16, Compression::Rgb);
        assert_eq!(
            limits.check(&rgb16),
            Err(LimitExceeded::OutputBytes { bytes: 440, max: 400 })
        );
    }

    #[test]
    fn display() {
        let err = LimitExceeded::Width { width: 5000, max: 4096 };
        assert_eq!(err.to_string(), "width 5000 exceeds limit 4096");
        let err = LimitExceeded::OutputBytes { bytes: 800, max: 400 };
        assert_eq!(err.to_string(), "800 output bytes exceed limit 400");
    }
}
