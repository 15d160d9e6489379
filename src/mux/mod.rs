//! APNG demux of single-frame PNGs and animation assembly.
//!
//! This module provides four pieces:
//!
//! - **Demux** ([`split_png`]): Parse a standalone PNG at the chunk level and
//!   borrow its header and image-data payloads without decoding pixels.
//! - **Validation** ([`validate`]): Structural checks on an [`Animation`]
//!   before any output is produced.
//! - **Mux** ([`ChunkWriter`]): Emit checksummed PNG/APNG chunks with a
//!   shared sequence counter and a sticky first error.
//! - **Animation** ([`AnimationEncoder`]): Encode animated PNG files
//!   frame-by-frame using a single-image [`FrameCodec`](crate::FrameCodec).

mod anim;
mod assemble;
mod demux;
mod error;
mod validate;

pub use anim::{encode_all, Animation, AnimationEncoder, BlendOp, DisposeOp, EncoderConfig};
pub use assemble::{ChunkWriter, FrameControl, DELAY_DENOMINATOR};
pub use demux::{split_png, ExtractedPayload};
pub use error::MuxError;
pub use validate::validate;
