//! Single-image codec collaborator.
//!
//! The animation encoder never compresses pixels itself. It asks a
//! [`FrameCodec`] for a complete standalone PNG per frame and then lifts
//! the header and image-data chunks out of it. [`PngCodec`] is the default
//! implementation, built on the `png` crate.
//!
//! ```rust
//! use zenapng::{FrameCodec, PixelLayout, PngCodec, Raster};
//!
//! let pixels = vec![0u8; 4 * 4 * 3];
//! let codec = PngCodec::new();
//! let png = codec.encode(&Raster::new(&pixels, PixelLayout::Rgb8, 4, 4))?;
//! let back = codec.decode(&png)?;
//! assert_eq!(back.pixels, pixels);
//! # Ok::<(), zenapng::CodecError>(())
//! ```

use alloc::format;
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;
use std::io::Cursor;

use thiserror::Error;

use crate::raster::{PixelLayout, Raster, RasterBuf};

/// Errors reported by a [`FrameCodec`].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CodecError {
    /// The pixel buffer does not match the raster's size and layout.
    #[error("Invalid buffer size: {0}")]
    InvalidBufferSize(String),

    /// The image uses a feature this codec does not handle.
    #[error("Unsupported image: {0}")]
    Unsupported(String),

    /// The underlying PNG encoder failed.
    #[error("PNG encoding error: {0}")]
    Encoding(#[from] png::EncodingError),

    /// The underlying PNG decoder failed.
    #[error("PNG decoding error: {0}")]
    Decoding(#[from] png::DecodingError),
}

/// Turns one raster into a standalone PNG, and back.
///
/// `encode` must produce a complete PNG stream (signature through `IEND`)
/// whose `IHDR` describes the raster's own width and height. Only `encode`
/// is used while assembling an animation; `decode` exists for callers.
pub trait FrameCodec {
    /// Encode `raster` as a standalone PNG.
    fn encode(&self, raster: &Raster<'_>) -> Result<Vec<u8>, CodecError>;

    /// Decode a standalone PNG into an owned raster.
    fn decode(&self, data: &[u8]) -> Result<RasterBuf, CodecError>;
}

/// Deflate effort used for each frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum CompressionLevel {
    /// The codec's balanced default.
    #[default]
    Default,
    /// Favour speed over size.
    Fast,
    /// Favour size over speed.
    Best,
}

impl CompressionLevel {
    fn to_png(self) -> png::Compression {
        match self {
            CompressionLevel::Default => png::Compression::Default,
            CompressionLevel::Fast => png::Compression::Fast,
            CompressionLevel::Best => png::Compression::Best,
        }
    }
}

/// [`FrameCodec`] backed by the `png` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct PngCodec {
    compression: CompressionLevel,
}

impl PngCodec {
    /// Codec with default compression.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the deflate effort.
    #[must_use]
    pub fn with_compression(mut self, compression: CompressionLevel) -> Self {
        self.compression = compression;
        self
    }

    /// Current deflate effort.
    pub fn compression(&self) -> CompressionLevel {
        self.compression
    }
}

fn png_format(layout: PixelLayout) -> (png::ColorType, png::BitDepth) {
    let color = match layout {
        PixelLayout::L8 | PixelLayout::L16 => png::ColorType::Grayscale,
        PixelLayout::La8 | PixelLayout::La16 => png::ColorType::GrayscaleAlpha,
        PixelLayout::Rgb8 | PixelLayout::Rgb16 => png::ColorType::Rgb,
        PixelLayout::Rgba8 | PixelLayout::Rgba16 => png::ColorType::Rgba,
    };
    let depth = if layout.bit_depth() == 16 {
        png::BitDepth::Sixteen
    } else {
        png::BitDepth::Eight
    };
    (color, depth)
}

fn layout_from_png(color: png::ColorType, depth: png::BitDepth) -> Option<PixelLayout> {
    use png::{BitDepth, ColorType};
    Some(match (color, depth) {
        (ColorType::Grayscale, BitDepth::Eight) => PixelLayout::L8,
        (ColorType::GrayscaleAlpha, BitDepth::Eight) => PixelLayout::La8,
        (ColorType::Rgb, BitDepth::Eight) => PixelLayout::Rgb8,
        (ColorType::Rgba, BitDepth::Eight) => PixelLayout::Rgba8,
        (ColorType::Grayscale, BitDepth::Sixteen) => PixelLayout::L16,
        (ColorType::GrayscaleAlpha, BitDepth::Sixteen) => PixelLayout::La16,
        (ColorType::Rgb, BitDepth::Sixteen) => PixelLayout::Rgb16,
        (ColorType::Rgba, BitDepth::Sixteen) => PixelLayout::Rgba16,
        _ => return None,
    })
}

impl FrameCodec for PngCodec {
    fn encode(&self, raster: &Raster<'_>) -> Result<Vec<u8>, CodecError> {
        let expected = raster.expected_len().ok_or_else(|| {
            CodecError::InvalidBufferSize(format!(
                "{}x{} {} overflows usize",
                raster.width(),
                raster.height(),
                raster.layout()
            ))
        })?;
        if raster.pixels().len() != expected {
            return Err(CodecError::InvalidBufferSize(format!(
                "expected {} bytes for {}x{} {}, got {}",
                expected,
                raster.width(),
                raster.height(),
                raster.layout(),
                raster.pixels().len()
            )));
        }

        let (color, depth) = png_format(raster.layout());
        let mut out = Vec::with_capacity(expected / 2 + 64);
        let mut encoder = png::Encoder::new(&mut out, raster.width(), raster.height());
        encoder.set_color(color);
        encoder.set_depth(depth);
        encoder.set_compression(self.compression.to_png());
        let mut writer = encoder.write_header()?;
        writer.write_image_data(raster.pixels())?;
        writer.finish()?;
        Ok(out)
    }

    fn decode(&self, data: &[u8]) -> Result<RasterBuf, CodecError> {
        let mut decoder = png::Decoder::new(Cursor::new(data));
        decoder.set_transformations(png::Transformations::IDENTITY);
        let mut reader = decoder.read_info()?;
        let mut buf = vec![0u8; reader.output_buffer_size()];
        let info = reader.next_frame(&mut buf)?;

        let layout = layout_from_png(info.color_type, info.bit_depth).ok_or_else(|| {
            CodecError::Unsupported(format!(
                "{:?} at {} bits per sample",
                info.color_type, info.bit_depth as u8
            ))
        })?;
        buf.truncate(info.buffer_size());

        Ok(RasterBuf {
            pixels: buf,
            layout,
            width: info.width,
            height: info.height,
        })
    }
}
