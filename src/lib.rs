//! Assembly of Animated PNG (APNG) files from pre-rendered frames.
//!
//! Each frame is compressed as an ordinary single-image PNG by a
//! [`FrameCodec`], then split at the chunk level and re-emitted under APNG
//! control chunks (`acTL`, `fcTL`, `fdAT`). Pixel data is compressed exactly
//! once; the assembler never decodes or recompresses it.
//!
//! # Features
//!
//! - `pixel-types`: Build frames from [`rgb`](https://docs.rs/rgb) pixel types.
//! - `imgref`: Build frames from [`imgref`](https://docs.rs/imgref) images
//!   (implies `pixel-types`).
//!
//! # Encoding
//!
//! Use [`encode_all`] for default settings:
//!
//! ```rust
//! use zenapng::{encode_all, Animation, PixelLayout, Raster};
//!
//! let rgba = vec![128u8; 4 * 4 * 4];
//! let mut anim = Animation::new(0);
//! anim.push_frame(Raster::new(&rgba, PixelLayout::Rgba8, 4, 4), 10);
//!
//! let mut apng = Vec::new();
//! encode_all(&mut apng, &anim)?;
//! # Ok::<(), zenapng::MuxError>(())
//! ```
//!
//! Or an [`AnimationEncoder`] with an [`EncoderConfig`] for reusable
//! configuration:
//!
//! ```rust
//! use zenapng::{Animation, AnimationEncoder, CompressionLevel, EncoderConfig};
//! use zenapng::{PixelLayout, Raster};
//!
//! let config = EncoderConfig::new().with_compression(CompressionLevel::Best);
//! let encoder = AnimationEncoder::new(config);
//!
//! let gray = vec![0u8; 8 * 8];
//! let mut anim = Animation::new(1);
//! anim.push_frame(Raster::new(&gray, PixelLayout::L8, 8, 8), 25);
//! let apng = encoder.encode_to_vec(&anim)?;
//! # Ok::<(), zenapng::MuxError>(())
//! ```
//!
//! # Output
//!
//! The file starts with frame 0's `IHDR`, copied verbatim, followed by a
//! single `acTL`. Frame 0's image data is written as `IDAT` so that
//! non-animated decoders show it as a still image; every later frame goes
//! into `fdAT` chunks. All `fcTL` and `fdAT` chunks share one sequence
//! counter that starts at 0.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

extern crate alloc;

/// PNG chunk constants and checksum helpers.
pub mod chunk;
mod codec;
/// APNG demux and animation encoding.
pub mod mux;
mod raster;

// Slice reader utility (used by the chunk splitter)
mod slice_reader;

/// Type-safe pixel adapters for building and decoding frames.
#[cfg(feature = "pixel-types")]
pub mod pixel;

// Re-export raster and codec public API
pub use codec::{CodecError, CompressionLevel, FrameCodec, PngCodec};
pub use raster::{PixelLayout, Raster, RasterBuf, Rect};

// Re-export mux public API
pub use mux::{
    encode_all, validate, Animation, AnimationEncoder, BlendOp, DisposeOp, EncoderConfig,
    MuxError,
};
