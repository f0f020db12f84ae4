//! Output channel order and typed decoded images.
//!
//! Uses `imgref::ImgVec` for 2D pixel data with typed pixels from the `rgb` crate.

use alloc::vec::Vec;
use imgref::ImgVec;
use rgb::Rgba;
use rgb::alt::BGRA;

/// Byte order of each 4-byte output pixel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ChannelOrder {
    /// Blue, green, red, alpha. A little-endian `0xAARRGGBB` word.
    #[default]
    Bgra,
    /// Red, green, blue, alpha.
    Rgba,
}

impl ChannelOrder {
    /// Arrange scaled `[r, g, b]` and `a` into output byte order.
    #[inline]
    pub const fn arrange(self, [r, g, b]: [u8; 3], a: u8) -> [u8; 4] {
        match self {
            Self::Bgra => [b, g, r, a],
            Self::Rgba => [r, g, b, a],
        }
    }
}

/// A fully decoded image.
#[non_exhaustive]
pub enum PixelData {
    /// 8-bit RGBA.
    Rgba8(ImgVec<Rgba<u8>>),
    /// 8-bit BGRA (blue, green, red, alpha byte order).
    Bgra8(ImgVec<BGRA<u8>>),
}

impl PixelData {
    /// Wrap tightly packed 4-byte pixels in `order`.
    ///
    /// Trailing bytes that do not form a whole pixel are dropped.
    pub fn from_bytes(bytes: &[u8], width: usize, height: usize, order: ChannelOrder) -> Self {
        let pixels = bytes.chunks_exact(4);
        match order {
            ChannelOrder::Rgba => {
                let buf: Vec<Rgba<u8>> = pixels
                    .map(|p| Rgba {
                        r: p[0],
                        g: p[1],
                        b: p[2],
                        a: p[3],
                    })
                    .collect();
                PixelData::Rgba8(image(buf, width, height))
            }
            ChannelOrder::Bgra => {
                let buf: Vec<BGRA<u8>> = pixels
                    .map(|p| BGRA {
                        b: p[0],
                        g: p[1],
                        r: p[2],
                        a: p[3],
                    })
                    .collect();
                PixelData::Bgra8(image(buf, width, height))
            }
        }
    }

    /// Image width in pixels.
    pub fn width(&self) -> usize {
        match self {
            PixelData::Rgba8(img) => img.width(),
            PixelData::Bgra8(img) => img.width(),
        }
    }

    /// Image height in pixels.
    pub fn height(&self) -> usize {
        match self {
            PixelData::Rgba8(img) => img.height(),
            PixelData::Bgra8(img) => img.height(),
        }
    }

    /// Channel order of the stored pixels.
    pub fn order(&self) -> ChannelOrder {
        match self {
            PixelData::Rgba8(_) => ChannelOrder::Rgba,
            PixelData::Bgra8(_) => ChannelOrder::Bgra,
        }
    }

    /// Convert to RGBA8, swizzling BGRA if needed.
    pub fn into_rgba8(self) -> ImgVec<Rgba<u8>> {
        match self {
            PixelData::Rgba8(img) => img,
            PixelData::Bgra8(img) => {
                let (w, h, stride) = (img.width(), img.height(), img.stride());
                let buf: Vec<Rgba<u8>> = img
                    .into_buf()
                    .into_iter()
                    .map(|p| Rgba {
                        r: p.r,
                        g: p.g,
                        b: p.b,
                        a: p.a,
                    })
                    .collect();
                ImgVec::new_stride(buf, w, h, stride)
            }
        }
    }
}

/// `imgref` rejects a zero stride, so a zero-width image keeps one unused
/// pixel per row behind a stride of 1.
fn image<P: Copy + Default>(mut buf: Vec<P>, width: usize, height: usize) -> ImgVec<P> {
    if width == 0 {
        buf.clear();
        buf.resize(height, P::default());
        return ImgVec::new_stride(buf, 0, height, 1);
    }
    ImgVec::new(buf, width, height)
}

impl core::fmt::Debug for PixelData {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PixelData")
            .field("order", &self.order())
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}
