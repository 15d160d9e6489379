//! Error types for mux/demux operations.

use thiserror::Error;

use crate::chunk::{tag_str, ChunkTag};
use crate::codec::CodecError;
use crate::raster::PixelLayout;

/// Errors that can occur while assembling an animated PNG.
///
/// Any error means the sink may hold a partial, invalid file; the caller
/// should discard it.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum MuxError {
    /// The animation has no frames.
    #[error("Animation needs at least one frame")]
    NoFrames,

    /// More frames than `acTL` can count.
    #[error("Too many frames: {0}")]
    TooManyFrames(usize),

    /// The delay list does not have one entry per frame.
    #[error("Mismatched frame and delay counts: {frames} frames, {delays} delays")]
    DelayCountMismatch {
        /// Number of frames.
        frames: usize,
        /// Number of delays.
        delays: usize,
    },

    /// A disposal list was supplied without one entry per frame.
    #[error("Mismatched frame and disposal counts: {frames} frames, {disposals} disposals")]
    DisposalCountMismatch {
        /// Number of frames.
        frames: usize,
        /// Number of disposal values.
        disposals: usize,
    },

    /// A frame does not share frame 0's color model.
    #[error("Frame {index} is {found}, expected {expected} like frame 0")]
    MixedPixelLayout {
        /// Offending frame.
        index: usize,
        /// Frame 0's layout.
        expected: PixelLayout,
        /// The offending frame's layout.
        found: PixelLayout,
    },

    /// A frame's minimum corner lies left of or above the canvas.
    #[error("Frame {index} has negative offset ({x}, {y})")]
    NegativeOffset {
        /// Offending frame.
        index: usize,
        /// Minimum x coordinate.
        x: i32,
        /// Minimum y coordinate.
        y: i32,
    },

    /// A frame reaches past frame 0's maximum corner.
    #[error(
        "Frame {index} extends to ({max_x}, {max_y}), past canvas corner ({canvas_max_x}, {canvas_max_y})"
    )]
    FrameOutsideCanvas {
        /// Offending frame.
        index: usize,
        /// Frame's exclusive maximum x.
        max_x: i64,
        /// Frame's exclusive maximum y.
        max_y: i64,
        /// Frame 0's exclusive maximum x.
        canvas_max_x: i64,
        /// Frame 0's exclusive maximum y.
        canvas_max_y: i64,
    },

    /// The single-image codec failed on a frame.
    #[error("Frame {index}: {source}")]
    Codec {
        /// Frame being encoded.
        index: usize,
        /// What the codec reported.
        #[source]
        source: CodecError,
    },

    /// The intermediate PNG does not start with the PNG signature.
    #[error("Invalid PNG signature")]
    InvalidSignature,

    /// A chunk declares more bytes than the buffer holds.
    #[error("Truncated {} chunk: declared {declared} bytes, {remaining} remain", tag_str(.tag))]
    Truncated {
        /// Tag of the chunk being read.
        tag: ChunkTag,
        /// Payload plus CRC bytes the chunk needs.
        declared: u64,
        /// Bytes left in the buffer.
        remaining: usize,
    },

    /// The buffer ended before an `IEND` chunk.
    #[error("Unexpected end of PNG data before IEND")]
    UnexpectedEof,

    /// `IEND` was reached without an `IHDR`.
    #[error("PNG has no IHDR chunk")]
    MissingHeader,

    /// The intermediate PNG carries a chunk the animation cannot hold.
    #[error("Unsupported {} chunk in frame data", tag_str(.0))]
    UnsupportedChunk(ChunkTag),

    /// A chunk payload does not fit the 32-bit length field.
    #[error("{} chunk of {len} bytes is too large", tag_str(.tag))]
    ChunkTooLarge {
        /// Tag of the chunk.
        tag: ChunkTag,
        /// Payload length.
        len: u64,
    },

    /// Writing to the sink failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl MuxError {
    /// Whether the error was raised by validation, before anything was written.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            MuxError::NoFrames
                | MuxError::TooManyFrames(_)
                | MuxError::DelayCountMismatch { .. }
                | MuxError::DisposalCountMismatch { .. }
                | MuxError::MixedPixelLayout { .. }
                | MuxError::NegativeOffset { .. }
                | MuxError::FrameOutsideCanvas { .. }
        )
    }
}
