//! Error types.

use enough::StopReason;

use crate::limits::LimitExceeded;

/// A declared format the decoder refuses to handle.
///
/// Raised once, before setup. [`FormatError::reason()`] gives the fixed
/// human-readable reason string.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum FormatError {
    /// Width is negative.
    #[error("Image width less than zero")]
    NegativeWidth,
    /// Width or absolute height exceeds `2^30`.
    #[error("Image dimensions out of bounds")]
    DimensionsOutOfBounds,
    /// Bits per pixel is not 16, 24 or 32.
    #[error("Unsupported bit depth")]
    UnsupportedDepth,
    /// Compression is neither `BI_RGB` nor `BI_BITFIELDS`.
    #[error("Unsupported compression")]
    UnsupportedCompression,
    /// A decoded channel mask spans more than 8 bits.
    #[error("Bit mask too long")]
    MaskTooLong,
}

impl FormatError {
    /// Human-readable rejection reason.
    pub const fn reason(self) -> &'static str {
        match self {
            Self::NegativeWidth => "Image width less than zero",
            Self::DimensionsOutOfBounds => "Image dimensions out of bounds",
            Self::UnsupportedDepth => "Unsupported bit depth",
            Self::UnsupportedCompression => "Unsupported compression",
            Self::MaskTooLong => "Bit mask too long",
        }
    }
}

/// Misuse of the row output API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum BufferError {
    /// Requested row is outside `0..rows`.
    #[error("row {row} out of bounds (rows: {rows})")]
    RowOutOfBounds {
        /// Requested output row.
        row: usize,
        /// Rows in the image.
        rows: usize,
    },
    /// Output slice is shorter than required.
    #[error("output buffer holds {actual} bytes, {required} required")]
    OutputTooSmall {
        /// Bytes required.
        required: usize,
        /// Bytes supplied.
        actual: usize,
    },
    /// Output size does not fit in `usize`.
    #[error("output size overflows usize")]
    SizeOverflow,
    /// The output allocation could not be made.
    #[error("failed to allocate {bytes} output bytes")]
    AllocationFailed {
        /// Bytes requested.
        bytes: usize,
    },
}

/// Any error produced while setting up or running a decode.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum DibError {
    /// Declared format rejected by validation.
    #[error(transparent)]
    Format(#[from] FormatError),
    /// Resource limit exceeded.
    #[error(transparent)]
    Limit(#[from] LimitExceeded),
    /// Bad output buffer or row index.
    #[error(transparent)]
    Buffer(#[from] BufferError),
    /// Cooperative cancellation via [`Stop`](enough::Stop).
    #[error("decode stopped: {0:?}")]
    Stopped(StopReason),
}

impl From<StopReason> for DibError {
    fn from(reason: StopReason) -> Self {
        Self::Stopped(reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn reasons_are_distinct_and_match_display() {
        let all = [
            FormatError::NegativeWidth,
            FormatError::DimensionsOutOfBounds,
            FormatError::UnsupportedDepth,
            FormatError::UnsupportedCompression,
            FormatError::MaskTooLong,
        ];
        for (i, a) in all.iter().enumerate() {
            assert_eq!(a.to_string(), a.reason());
            for b in &all[i + 1..] {
                assert_ne!(a.reason(), b.reason());
            }
        }
    }

    #[test]
    fn wraps_sources() {
        let err = DibError::from(FormatError::UnsupportedDepth);
        assert_eq!(err.to_string(), "Unsupported bit depth");

        let err = DibError::from(BufferError::OutputTooSmall {
            required: 16,
            actual: 8,
        });
        assert_eq!(err.to_string(), "output buffer holds 8 bytes, 16 required");
        assert!(matches!(err, DibError::Buffer(_)));
    }

    #[test]
    fn is_error() {
        fn assert_error<E: core::error::Error>(_: &E) {}
        assert_error(&DibError::from(FormatError::MaskTooLong));
        assert_error(&FormatError::NegativeWidth);
        assert_error(&BufferError::SizeOverflow);
    }
}
