//! Animation encoder.
//!
//! Turns an ordered list of rasters into an animated PNG. Each frame is
//! compressed by a [`FrameCodec`] into a standalone PNG, split into its
//! header and image data, and re-emitted under APNG control chunks. Pixel
//! data is never recompressed.
//!
//! # Example
//!
//! ```rust
//! use zenapng::mux::{Animation, AnimationEncoder, EncoderConfig};
//! use zenapng::{PixelLayout, Raster};
//!
//! let red = vec![255u8, 0, 0, 255].repeat(16 * 16);
//! let blue = vec![0u8, 0, 255, 255].repeat(8 * 8);
//!
//! let mut anim = Animation::new(0); // loop forever
//! anim.push_frame(Raster::new(&red, PixelLayout::Rgba8, 16, 16), 50);
//! anim.push_frame(Raster::new(&blue, PixelLayout::Rgba8, 8, 8).at(4, 4), 50);
//!
//! let apng = AnimationEncoder::new(EncoderConfig::new()).encode_to_vec(&anim)?;
//! assert_eq!(&apng[..8], b"\x89PNG\r\n\x1a\n");
//! # Ok::<(), zenapng::mux::MuxError>(())
//! ```

use alloc::vec::Vec;
use std::io::Write;

use super::assemble::{ChunkWriter, FrameControl};
use super::demux::split_png;
use super::error::MuxError;
use super::validate::validate;
use crate::codec::{CompressionLevel, FrameCodec, PngCodec};
use crate::raster::Raster;

/// How a decoder clears the frame's area before the next frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum DisposeOp {
    /// Leave the canvas as it is.
    #[default]
    None = 0,
    /// Clear the frame's area to transparent black.
    Background = 1,
    /// Restore the frame's area to what it was before this frame.
    Previous = 2,
}

/// How a decoder combines the frame with the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum BlendOp {
    /// Replace the frame's area, alpha included.
    #[default]
    Source = 0,
    /// Alpha-composite over the existing canvas.
    Over = 1,
}

/// An ordered list of frames plus timing and looping.
///
/// The delay and disposal lists are kept separate from the frames, so a
/// mismatched animation can be built and is rejected by validation rather
/// than by the type system.
#[derive(Debug, Clone, Default)]
pub struct Animation<'a> {
    frames: Vec<Raster<'a>>,
    delays: Vec<u16>,
    disposals: Option<Vec<DisposeOp>>,
    loop_count: u32,
}

impl<'a> Animation<'a> {
    /// Empty animation. `loop_count` of 0 loops forever.
    pub fn new(loop_count: u32) -> Self {
        Self {
            loop_count,
            ..Self::default()
        }
    }

    /// Build from parallel lists. Lengths are checked at encode time.
    pub fn from_parts(
        frames: Vec<Raster<'a>>,
        delays: Vec<u16>,
        disposals: Option<Vec<DisposeOp>>,
        loop_count: u32,
    ) -> Self {
        Self {
            frames,
            delays,
            disposals,
            loop_count,
        }
    }

    /// Append a frame shown for `delay` hundredths of a second.
    pub fn push_frame(&mut self, raster: Raster<'a>, delay: u16) -> &mut Self {
        self.frames.push(raster);
        self.delays.push(delay);
        if let Some(disposals) = &mut self.disposals {
            disposals.push(DisposeOp::None);
        }
        self
    }

    /// Append a frame with an explicit disposal.
    pub fn push_frame_with_dispose(
        &mut self,
        raster: Raster<'a>,
        delay: u16,
        dispose: DisposeOp,
    ) -> &mut Self {
        let earlier = self.frames.len();
        self.frames.push(raster);
        self.delays.push(delay);
        self.disposals
            .get_or_insert_with(|| alloc::vec![DisposeOp::None; earlier])
            .push(dispose);
        self
    }

    /// Frames in display order.
    pub fn frames(&self) -> &[Raster<'a>] {
        &self.frames
    }

    /// Per-frame delays in hundredths of a second.
    pub fn delays(&self) -> &[u16] {
        &self.delays
    }

    /// Per-frame disposals, if any were given.
    pub fn disposals(&self) -> Option<&[DisposeOp]> {
        self.disposals.as_deref()
    }

    /// Number of plays; 0 is infinite.
    pub fn loop_count(&self) -> u32 {
        self.loop_count
    }

    /// Set the number of plays; 0 is infinite.
    pub fn set_loop_count(&mut self, loop_count: u32) {
        self.loop_count = loop_count;
    }

    /// Number of frames.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Whether there are no frames.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

/// Settings for [`AnimationEncoder`].
#[derive(Debug, Clone, Default)]
#[non_exhaustive]
pub struct EncoderConfig {
    /// Deflate effort for each frame. Default: [`CompressionLevel::Default`].
    pub compression: CompressionLevel,
    /// Write each frame's [`DisposeOp`] into its `fcTL`. When `false` (the
    /// default) every frame is written with dispose op 0, whatever the
    /// animation asks for.
    pub dispose_passthrough: bool,
}

impl EncoderConfig {
    /// Default settings.
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

    /// Write caller-supplied disposal ops instead of always 0.
    #[must_use]
    pub fn with_dispose_passthrough(mut self, enable: bool) -> Self {
        self.dispose_passthrough = enable;
        self
    }
}

/// Animated PNG encoder.
///
/// Holds configuration only. All per-file state lives inside a single
/// [`encode`](Self::encode) call, so one encoder can be reused freely.
#[derive(Debug, Clone)]
pub struct AnimationEncoder<C = PngCodec> {
    config: EncoderConfig,
    codec: C,
}

impl Default for AnimationEncoder<PngCodec> {
    fn default() -> Self {
        Self::new(EncoderConfig::default())
    }
}

impl AnimationEncoder<PngCodec> {
    /// Encoder backed by the `png` crate.
    pub fn new(config: EncoderConfig) -> Self {
        let codec = PngCodec::new().with_compression(config.compression);
        Self { config, codec }
    }
}

impl<C: FrameCodec> AnimationEncoder<C> {
    /// Encoder backed by a custom single-image codec.
    ///
    /// [`EncoderConfig::compression`] is ignored; `codec` decides.
    pub fn with_codec(config: EncoderConfig, codec: C) -> Self {
        Self { config, codec }
    }

    /// Current settings.
    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }

    /// The single-image codec.
    pub fn codec(&self) -> &C {
        &self.codec
    }

    /// Encode `animation` into a fresh buffer.
    pub fn encode_to_vec(&self, animation: &Animation<'_>) -> Result<Vec<u8>, MuxError> {
        let mut out = Vec::new();
        self.encode(&mut out, animation)?;
        Ok(out)
    }

    /// Encode `animation` into `sink`.
    ///
    /// Validation happens before anything is written. After that, frames
    /// are encoded and written one at a time; each frame's compressed data
    /// is dropped before the next frame is encoded. On error the sink may
    /// hold a partial file, which the caller should discard.
    pub fn encode<W: Write>(&self, sink: W, animation: &Animation<'_>) -> Result<(), MuxError> {
        validate(animation)?;

        let frames = animation.frames();
        let num_frames =
            u32::try_from(frames.len()).map_err(|_| MuxError::TooManyFrames(frames.len()))?;
        log::debug!(
            "encoding {} frame(s) of {}, loop count {}",
            num_frames,
            frames[0].layout(),
            animation.loop_count()
        );

        let mut w = ChunkWriter::new(sink);
        w.write_signature();

        for (index, raster) in frames.iter().enumerate() {
            if w.has_failed() {
                break;
            }

            let png = self
                .codec
                .encode(raster)
                .map_err(|source| MuxError::Codec { index, source })?;
            let payload = split_png(&png)?;
            let fctl = self.frame_control(animation, index)?;

            log::debug!(
                "frame {}: {}, {} data chunk(s), {} bytes",
                index,
                raster.bounds(),
                payload.data.len(),
                payload.data_len()
            );

            if index == 0 {
                w.write_ihdr(payload.header);
                w.write_actl(num_frames, animation.loop_count());
                w.write_fctl(&fctl);
                w.write_idats(&payload.data);
            } else {
                w.write_fctl(&fctl);
                w.write_fdats(&payload.data);
            }
        }

        w.write_iend();
        w.finish().map(drop)
    }

    fn frame_control(
        &self,
        animation: &Animation<'_>,
        index: usize,
    ) -> Result<FrameControl, MuxError> {
        let bounds = animation.frames()[index].bounds();
        let mut fctl = FrameControl::from_bounds(bounds, animation.delays()[index]).ok_or(
            MuxError::NegativeOffset {
                index,
                x: bounds.min_x(),
                y: bounds.min_y(),
            },
        )?;
        if self.config.dispose_passthrough {
            if let Some(disposals) = animation.disposals() {
                fctl.dispose_op = disposals[index] as u8;
            }
        }
        fctl.blend_op = BlendOp::Source as u8;
        Ok(fctl)
    }
}

/// Encode `animation` into `sink` with default settings.
pub fn encode_all<W: Write>(sink: W, animation: &Animation<'_>) -> Result<(), MuxError> {
    AnimationEncoder::new(EncoderConfig::default()).encode(sink, animation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::CodecError;
    use crate::raster::{PixelLayout, RasterBuf};

    #[test]
    fn push_frame_keeps_lists_aligned() {
        let px = [0u8; 4];
        let mut a = Animation::new(3);
        a.push_frame(Raster::new(&px, PixelLayout::Rgba8, 1, 1), 5);
        assert!(a.disposals().is_none());
        a.push_frame_with_dispose(
            Raster::new(&px, PixelLayout::Rgba8, 1, 1),
            6,
            DisposeOp::Previous,
        );
        a.push_frame(Raster::new(&px, PixelLayout::Rgba8, 1, 1), 7);
        assert_eq!(a.len(), 3);
        assert_eq!(a.delays(), &[5, 6, 7]);
        assert_eq!(
            a.disposals(),
            Some(&[DisposeOp::None, DisposeOp::Previous, DisposeOp::None][..])
        );
        assert_eq!(a.loop_count(), 3);
    }

    struct Broken;

    impl FrameCodec for Broken {
        fn encode(&self, _raster: &Raster<'_>) -> Result<Vec<u8>, CodecError> {
            Err(CodecError::Unsupported("broken on purpose".into()))
        }

        fn decode(&self, _data: &[u8]) -> Result<RasterBuf, CodecError> {
            Err(CodecError::Unsupported("broken on purpose".into()))
        }
    }

    #[test]
    fn codec_failure_names_the_frame() {
        let px = [0u8; 4];
        let mut a = Animation::new(0);
        a.push_frame(Raster::new(&px, PixelLayout::Rgba8, 1, 1), 1);
        let enc = AnimationEncoder::with_codec(EncoderConfig::new(), Broken);
        match enc.encode_to_vec(&a) {
            Err(MuxError::Codec { index: 0, source }) => {
                assert!(source.to_string().contains("broken on purpose"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn validation_error_writes_nothing() {
        let mut out = Vec::new();
        let err = encode_all(&mut out, &Animation::new(0)).unwrap_err();
        assert!(err.is_validation());
        assert!(out.is_empty());
    }

    #[test]
    fn dispose_passthrough_is_opt_in() {
        let px = [0u8; 4];
        let mut a = Animation::new(0);
        a.push_frame_with_dispose(
            Raster::new(&px, PixelLayout::Rgba8, 1, 1),
            1,
            DisposeOp::Background,
        );
        let legacy = AnimationEncoder::new(EncoderConfig::new());
        assert_eq!(legacy.frame_control(&a, 0).unwrap().dispose_op, 0);

        let passthrough = AnimationEncoder::new(EncoderConfig::new().with_dispose_passthrough(true));
        let fctl = passthrough.frame_control(&a, 0).unwrap();
        assert_eq!(fctl.dispose_op, 1);
        assert_eq!(fctl.blend_op, 0);
    }
}
