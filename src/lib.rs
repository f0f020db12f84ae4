//! Pixel decoding for uncompressed Windows DIB data.
//!
//! Turns packed 16, 24 and 32-bit `BI_RGB` / `BI_BITFIELDS` pixel data into
//! 8-bit BGRA or RGBA scanlines:
//!
//! - [`Bitfield`]: reduces a 32-bit channel mask to a shift and reduced mask
//! - [`ScaleTable`] / [`ScaleTables`]: N-bit to 8-bit expansion tables
//! - [`validate()`]: rejects formats the decoder cannot handle, with a reason
//! - [`ChannelSpecs`]: channels resolved against the table cache
//! - [`DecodeRequest`] / [`DibDecoder`]: per-image setup and scanline reads
//! - [`PixelData`]: whole decoded images over `imgref::ImgVec`
//! - [`Limits`]: optional resource limits checked at setup
//!
//! Header parsing, palettes, RLE and embedded JPEG/PNG payloads are out of
//! scope; the caller supplies the declared fields and the raw pixel bytes.

#![no_std]
#![forbid(unsafe_code)]

extern crate alloc;

mod bitfield;
mod buffer;
mod channel;
mod decoder;
mod error;
mod format;
mod limits;
mod pixel;
mod scale;
mod sink;
mod validate;

pub use bitfield::{Bitfield, MAX_CHANNEL_BITS, MAX_REDUCED_MASK};
pub use buffer::{PackedWidth, PixelBuffer};
pub use channel::{ChannelMasks, ChannelSpec, ChannelSpecs};
pub use decoder::{DecodeRequest, DibDecoder};
pub use error::{BufferError, DibError, FormatError};
pub use format::{Compression, FormatDescriptor, MAX_DIMENSION};
pub use limits::{LimitExceeded, Limits};
pub use pixel::{ChannelOrder, PixelData};
pub use scale::{ScaleTable, ScaleTables};
pub use sink::DecodeRowSink;
pub use validate::validate;

// Re-exports for callers.
pub use enough::{Stop, StopReason, Unstoppable};
pub use imgref::{Img, ImgRef, ImgRefMut, ImgVec};
pub use rgb;
pub use rgb::Rgba;
pub use rgb::alt::BGRA as Bgra;
