//! Typed pixel adapters.
//!
//! When the `pixel-types` feature is enabled, frames can be built from
//! pixel types of the [`rgb`] crate instead of raw byte slices:
//!
//! ```rust,no_run
//! use rgb::Rgba;
//! use zenapng::mux::Animation;
//! use zenapng::pixel;
//!
//! let frame: Vec<Rgba<u8>> = vec![Rgba::new(255, 0, 0, 255); 4 * 4];
//! let mut anim = Animation::new(0);
//! anim.push_frame(pixel::raster(&frame, 4, 4), 10);
//! ```

use alloc::format;
use alloc::vec::Vec;

use rgb::{ComponentBytes, Rgb, Rgba};

use crate::codec::{CodecError, FrameCodec};
use crate::raster::{PixelLayout, Raster};

mod private {
    pub trait Sealed {}
}

/// Pixel type that can be placed in an animation frame.
pub trait EncodePixel: Copy + 'static + private::Sealed {
    /// The corresponding [`PixelLayout`].
    fn layout() -> PixelLayout;
}

/// Pixel type that a decoded frame can be converted into.
pub trait DecodePixel: Copy + 'static + private::Sealed {
    /// Layout this pixel type reads from.
    fn layout() -> PixelLayout;
    /// Build one pixel from exactly `layout().bytes_per_pixel()` bytes.
    fn from_bytes(bytes: &[u8]) -> Self;
}

// --- Sealed impls ---

impl private::Sealed for Rgb<u8> {}
impl private::Sealed for Rgba<u8> {}
impl private::Sealed for rgb::Gray<u8> {}
impl private::Sealed for rgb::GrayAlpha<u8> {}

// --- EncodePixel impls ---

impl EncodePixel for Rgb<u8> {
    fn layout() -> PixelLayout {
        PixelLayout::Rgb8
    }
}

impl EncodePixel for Rgba<u8> {
    fn layout() -> PixelLayout {
        PixelLayout::Rgba8
    }
}

impl EncodePixel for rgb::Gray<u8> {
    fn layout() -> PixelLayout {
        PixelLayout::L8
    }
}

impl EncodePixel for rgb::GrayAlpha<u8> {
    fn layout() -> PixelLayout {
        PixelLayout::La8
    }
}

// --- DecodePixel impls ---

impl DecodePixel for Rgb<u8> {
    fn layout() -> PixelLayout {
        PixelLayout::Rgb8
    }
    fn from_bytes(b: &[u8]) -> Self {
        Rgb::new(b[0], b[1], b[2])
    }
}

impl DecodePixel for Rgba<u8> {
    fn layout() -> PixelLayout {
        PixelLayout::Rgba8
    }
    fn from_bytes(b: &[u8]) -> Self {
        Rgba::new(b[0], b[1], b[2], b[3])
    }
}

impl DecodePixel for rgb::Gray<u8> {
    fn layout() -> PixelLayout {
        PixelLayout::L8
    }
    fn from_bytes(b: &[u8]) -> Self {
        rgb::Gray::new(b[0])
    }
}

impl DecodePixel for rgb::GrayAlpha<u8> {
    fn layout() -> PixelLayout {
        PixelLayout::La8
    }
    fn from_bytes(b: &[u8]) -> Self {
        rgb::GrayAlpha::new(b[0], b[1])
    }
}

/// Borrow typed pixels as a [`Raster`] at the canvas origin.
pub fn raster<P: EncodePixel>(pixels: &[P], width: u32, height: u32) -> Raster<'_>
where
    [P]: ComponentBytes<u8>,
{
    Raster::new(pixels.as_bytes(), P::layout(), width, height)
}

/// Decode a standalone PNG into typed pixels.
///
/// The PNG must already be in `P`'s layout; no conversion is done.
pub fn decode<P: DecodePixel>(
    codec: &impl FrameCodec,
    data: &[u8],
) -> Result<(Vec<P>, u32, u32), CodecError> {
    let buf = codec.decode(data)?;
    if buf.layout != P::layout() {
        return Err(CodecError::Unsupported(format!(
            "image is {}, requested {}",
            buf.layout,
            P::layout()
        )));
    }
    let pixels = buf
        .pixels
        .chunks_exact(buf.layout.bytes_per_pixel())
        .map(P::from_bytes)
        .collect();
    Ok((pixels, buf.width, buf.height))
}

/// Borrow a contiguous [`imgref::ImgRef`] as a [`Raster`].
///
/// Returns `None` for strided images, which have padding between rows;
/// collect those into a contiguous buffer first.
#[cfg(feature = "imgref")]
pub fn raster_from_img<P: EncodePixel>(img: imgref::ImgRef<'_, P>) -> Option<Raster<'_>>
where
    [P]: ComponentBytes<u8>,
{
    let (width, height) = (img.width(), img.height());
    if img.stride() != width {
        return None;
    }
    let pixels = img.into_buf().get(..width * height)?;
    Some(raster(pixels, width as u32, height as u32))
}

/// Decode a standalone PNG into an [`imgref::ImgVec`].
#[cfg(feature = "imgref")]
pub fn decode_to_img<P: DecodePixel>(
    codec: &impl FrameCodec,
    data: &[u8],
) -> Result<imgref::ImgVec<P>, CodecError> {
    let (pixels, w, h) = decode::<P>(codec, data)?;
    Ok(imgref::ImgVec::new(pixels, w as usize, h as usize))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PngCodec;

    #[test]
    fn typed_roundtrip() {
        let pixels: Vec<Rgba<u8>> = (0..12u8).map(|i| Rgba::new(i, i * 2, i * 3, 255)).collect();
        let r = raster(&pixels, 4, 3);
        assert_eq!(r.layout(), PixelLayout::Rgba8);
        assert_eq!(r.pixels().len(), 48);

        let codec = PngCodec::new();
        let png = codec.encode(&r).unwrap();
        let (back, w, h) = decode::<Rgba<u8>>(&codec, &png).unwrap();
        assert_eq!((w, h), (4, 3));
        assert_eq!(back, pixels);
    }

    #[test]
    fn decode_refuses_other_layouts() {
        let pixels = vec![rgb::Gray::new(7u8); 4];
        let codec = PngCodec::new();
        let png = codec.encode(&raster(&pixels, 2, 2)).unwrap();
        assert!(decode::<Rgb<u8>>(&codec, &png).is_err());
        assert!(decode::<rgb::Gray<u8>>(&codec, &png).is_ok());
    }

    #[cfg(feature = "imgref")]
    #[test]
    fn imgref_contiguous_only() {
        let buf = vec![Rgb::new(1u8, 2, 3); 6 * 2];
        let img = imgref::Img::new_stride(&buf[..], 4, 2, 6);
        assert!(raster_from_img(img).is_none());
        let img = imgref::Img::new(&buf[..], 6, 2);
        assert_eq!(raster_from_img(img).map(|r| r.width()), Some(6));
    }
}
