//! APNG chunk writer.
//!
//! [`ChunkWriter`] owns the mutable state of one encode call: the output
//! sink, the sequence counter shared by every `fcTL` and `fdAT`, and the
//! first error seen. Once anything fails, every later write is a no-op
//! and [`ChunkWriter::finish`] reports that first failure.
//!
//! # Example
//!
//! ```rust
//! use zenapng::mux::{ChunkWriter, FrameControl};
//!
//! let mut w = ChunkWriter::new(Vec::new());
//! w.write_signature();
//! w.write_actl(1, 0);
//! w.write_fctl(&FrameControl::new(16, 16));
//! assert_eq!(w.sequence(), 1);
//! let bytes = w.finish()?;
//! assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
//! # Ok::<(), zenapng::mux::MuxError>(())
//! ```

use std::io::Write;

use super::error::MuxError;
use crate::chunk::{
    chunk_crc, put_u16, put_u32, tag_str, ChunkTag, ACTL, CHUNK_PREFIX_LEN, FCTL, FDAT, IDAT,
    IEND, IHDR, PNG_SIGNATURE,
};
use crate::raster::Rect;

/// Denominator used for every frame delay: delays are in 1/100 s.
pub const DELAY_DENOMINATOR: u16 = 100;

/// Payload of an `fcTL` chunk, minus the sequence number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameControl {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Horizontal offset on the canvas.
    pub x_offset: u32,
    /// Vertical offset on the canvas.
    pub y_offset: u32,
    /// Delay numerator.
    pub delay_num: u16,
    /// Delay denominator.
    pub delay_den: u16,
    /// Disposal operation code (0 none, 1 background, 2 previous).
    pub dispose_op: u8,
    /// Blend operation code (0 source, 1 over).
    pub blend_op: u8,
}

impl FrameControl {
    /// Encoded payload size, sequence number included.
    pub const SIZE: usize = 26;

    /// A zero-delay frame of the given size at the canvas origin.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            x_offset: 0,
            y_offset: 0,
            delay_num: 0,
            delay_den: DELAY_DENOMINATOR,
            dispose_op: 0,
            blend_op: 0,
        }
    }

    /// Frame control for a validated (non-negative) placement.
    ///
    /// Returns `None` if the rectangle has a negative corner.
    pub fn from_bounds(bounds: Rect, delay_num: u16) -> Option<Self> {
        Some(Self {
            width: bounds.width,
            height: bounds.height,
            x_offset: u32::try_from(bounds.min_x()).ok()?,
            y_offset: u32::try_from(bounds.min_y()).ok()?,
            delay_num,
            delay_den: DELAY_DENOMINATOR,
            dispose_op: 0,
            blend_op: 0,
        })
    }

    /// Serialize with the given sequence number.
    pub fn to_bytes(&self, sequence: u32) -> [u8; Self::SIZE] {
        let mut b = [0u8; Self::SIZE];
        put_u32(&mut b[0..4], sequence);
        put_u32(&mut b[4..8], self.width);
        put_u32(&mut b[8..12], self.height);
        put_u32(&mut b[12..16], self.x_offset);
        put_u32(&mut b[16..20], self.y_offset);
        put_u16(&mut b[20..22], self.delay_num);
        put_u16(&mut b[22..24], self.delay_den);
        b[24] = self.dispose_op;
        b[25] = self.blend_op;
        b
    }
}

/// Writes PNG/APNG chunks to a sink with a sticky error.
///
/// Create one per encode call; the sequence counter starts at 0 and is
/// never reset.
pub struct ChunkWriter<W: Write> {
    sink: W,
    sequence: u32,
    error: Option<MuxError>,
}

impl<W: Write> ChunkWriter<W> {
    /// Wrap a sink. Nothing is written until the first `write_*` call.
    pub fn new(sink: W) -> Self {
        Self {
            sink,
            sequence: 0,
            error: None,
        }
    }

    /// Next sequence number to be stamped.
    pub fn sequence(&self) -> u32 {
        self.sequence
    }

    /// Whether a write has already failed.
    pub fn has_failed(&self) -> bool {
        self.error.is_some()
    }

    /// Return the sink, or the first error if any write failed.
    pub fn finish(self) -> Result<W, MuxError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.sink),
        }
    }

    fn fail(&mut self, err: MuxError) {
        log::warn!("APNG output aborted: {err}");
        self.error = Some(err);
    }

    fn put(&mut self, bytes: &[u8]) {
        if self.error.is_some() {
            return;
        }
        if let Err(err) = self.sink.write_all(bytes) {
            self.fail(MuxError::Io(err));
        }
    }

    fn next_sequence(&mut self) -> u32 {
        let seq = self.sequence;
        self.sequence = self.sequence.wrapping_add(1);
        seq
    }

    /// Write the 8-byte PNG signature.
    pub fn write_signature(&mut self) {
        self.put(&PNG_SIGNATURE);
    }

    /// Write one chunk with a contiguous payload.
    pub fn write_chunk(&mut self, tag: ChunkTag, payload: &[u8]) {
        self.write_chunk_parts(tag, &[payload]);
    }

    /// Write one chunk whose payload is the concatenation of `parts`.
    ///
    /// Length and CRC cover all parts; they are never copied together.
    pub fn write_chunk_parts(&mut self, tag: ChunkTag, parts: &[&[u8]]) {
        if self.error.is_some() {
            return;
        }

        let len: u64 = parts.iter().map(|p| p.len() as u64).sum();
        let Ok(len32) = u32::try_from(len) else {
            self.fail(MuxError::ChunkTooLarge { tag, len });
            return;
        };

        let mut prefix = [0u8; CHUNK_PREFIX_LEN];
        put_u32(&mut prefix[0..4], len32);
        prefix[4..8].copy_from_slice(&tag);
        self.put(&prefix);

        for part in parts {
            self.put(part);
        }

        let mut crc = [0u8; 4];
        put_u32(&mut crc, chunk_crc(&tag, parts));
        self.put(&crc);

        log::trace!("wrote {} chunk ({} bytes)", tag_str(&tag), len32);
    }

    /// Write an `IHDR` chunk from a raw header payload.
    pub fn write_ihdr(&mut self, header: &[u8]) {
        self.write_chunk(IHDR, header);
    }

    /// Write the `acTL` animation control chunk.
    pub fn write_actl(&mut self, num_frames: u32, num_plays: u32) {
        let mut b = [0u8; 8];
        put_u32(&mut b[0..4], num_frames);
        put_u32(&mut b[4..8], num_plays);
        self.write_chunk(ACTL, &b);
    }

    /// Write an `fcTL` chunk, consuming one sequence number.
    pub fn write_fctl(&mut self, fctl: &FrameControl) {
        let seq = self.next_sequence();
        self.write_chunk(FCTL, &fctl.to_bytes(seq));
    }

    /// Write each payload as an `IDAT` chunk.
    pub fn write_idats(&mut self, data: &[&[u8]]) {
        for payload in data {
            self.write_chunk(IDAT, payload);
        }
    }

    /// Write each payload as an `fdAT` chunk, consuming one sequence number
    /// per chunk.
    pub fn write_fdats(&mut self, data: &[&[u8]]) {
        for payload in data {
            let mut seq = [0u8; 4];
            put_u32(&mut seq, self.next_sequence());
            self.write_chunk_parts(FDAT, &[&seq[..], *payload]);
        }
    }

    /// Write the empty `IEND` trailer.
    pub fn write_iend(&mut self) {
        self.write_chunk(IEND, &[]);
    }
}
