//! Zero-copy row sink for streaming decode.
//!
//! [`DecodeRowSink`] lets the caller own the output buffer while the decoder
//! writes rows directly into it.
//!
//! # Contract
//!
//! - [`DibDecoder::decode_rows()`](crate::DibDecoder::decode_rows) calls
//!   [`demand()`](DecodeRowSink::demand) once per strip, top to bottom
//!   (`y` increases monotonically).
//! - The returned buffer must be at least `min_bytes` bytes.
//! - Rows are tightly packed: `width × 4` bytes per row, no padding.
//! - When `demand()` is called again, the previous buffer has been fully
//!   written. When `decode_rows()` returns `Ok`, the last buffer has been
//!   written.

/// Receives decoded rows during streaming decode.
///
/// # Object safety
///
/// This trait is object-safe. Use `&mut dyn DecodeRowSink` in generic code.
///
/// # Example implementation
///
/// ```
/// use zendib::DecodeRowSink;
///
/// struct CollectSink {
///     buf: Vec<u8>,
///     image: Vec<u8>,
/// }
///
/// impl DecodeRowSink for CollectSink {
///     fn demand(&mut self, _y: u32, _height: u32, min_bytes: usize) -> &mut [u8] {
///         // previous strip is complete
///         self.image.extend_from_slice(&self.buf);
///         self.buf.clear();
///         self.buf.resize(min_bytes, 0);
///         &mut self.buf
///     }
/// }
/// ```
pub trait DecodeRowSink {
    /// Provide a mutable buffer for decoded rows `y .. y + height`.
    ///
    /// `min_bytes` is `width × height × 4`. The returned slice must be at
    /// least that long; anything past `min_bytes` is left untouched.
    fn demand(&mut self, y: u32, height: u32, min_bytes: usize) -> &mut [u8];
}

impl DecodeRowSink for alloc::vec::Vec<u8> {
    /// Append each strip to the vector.
    fn demand(&mut self, _y: u32, _height: u32, min_bytes: usize) -> &mut [u8] {
        let start = self.len();
        self.resize(start + min_bytes, 0);
        &mut self[start..]
    }
}
