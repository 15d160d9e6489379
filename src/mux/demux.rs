//! Zero-copy chunk reader for standalone PNG streams.
//!
//! Splits the output of a single-image encoder into its `IHDR` payload and
//! its ordered `IDAT` payloads, borrowing both from the input buffer.
//!
//! # Example
//!
//! ```rust
//! use zenapng::mux::split_png;
//! use zenapng::{FrameCodec, PixelLayout, PngCodec, Raster};
//!
//! let pixels = vec![0u8; 8 * 8 * 4];
//! let png = PngCodec::new().encode(&Raster::new(&pixels, PixelLayout::Rgba8, 8, 8))?;
//! let payload = split_png(&png)?;
//! assert_eq!(payload.header.len(), 13);
//! assert!(!payload.data.is_empty());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use alloc::vec::Vec;

use super::assemble::ChunkWriter;
use super::error::MuxError;
use crate::chunk::{
    tag_str, ChunkTag, CHUNK_CRC_LEN, IDAT, IEND, IHDR, PLTE, PNG_SIGNATURE, TRNS,
};
use crate::slice_reader::SliceReader;

/// Header and image data lifted out of one frame's standalone PNG.
///
/// Lives only while its frame is being written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedPayload<'a> {
    /// Raw `IHDR` payload, verbatim.
    pub header: &'a [u8],
    /// Raw `IDAT` payloads, in stream order.
    pub data: Vec<&'a [u8]>,
}

impl ExtractedPayload<'_> {
    /// Total image-data bytes across all `IDAT` payloads.
    pub fn data_len(&self) -> usize {
        self.data.iter().map(|d| d.len()).sum()
    }

    /// Rebuild a still PNG from the extracted chunks: signature, `IHDR`,
    /// every `IDAT`, `IEND`.
    ///
    /// For encoders that emit no ancillary chunks this reproduces the
    /// original stream byte for byte.
    pub fn reassemble(&self) -> Result<Vec<u8>, MuxError> {
        let capacity = PNG_SIGNATURE.len()
            + self.header.len()
            + self.data_len()
            + 12 * (self.data.len() + 2);
        let mut w = ChunkWriter::new(Vec::with_capacity(capacity));
        w.write_signature();
        w.write_ihdr(self.header);
        w.write_idats(&self.data);
        w.write_iend();
        w.finish()
    }
}

/// Split a standalone PNG into its header and image-data payloads.
///
/// CRCs are skipped, not verified: the bytes come straight from a trusted
/// encoder. `PLTE` and `tRNS` are refused because the animation writer has
/// nowhere to put them; any other ancillary chunk is ignored.
pub fn split_png(data: &[u8]) -> Result<ExtractedPayload<'_>, MuxError> {
    let mut r = SliceReader::new(data);

    let signature: [u8; 8] = r.read_array().map_err(|_| MuxError::UnexpectedEof)?;
    if signature != PNG_SIGNATURE {
        return Err(MuxError::InvalidSignature);
    }

    let mut header = None;
    let mut chunks = Vec::new();

    loop {
        let offset = r.position();
        let length = r.read_u32_be().map_err(|_| MuxError::UnexpectedEof)?;
        let tag: ChunkTag = r.read_array().map_err(|_| MuxError::UnexpectedEof)?;

        let truncated = |remaining: usize| MuxError::Truncated {
            tag,
            declared: u64::from(length) + CHUNK_CRC_LEN as u64,
            remaining,
        };
        let payload = r
            .take_slice(length as usize)
            .map_err(|e| truncated(e.remaining))?;
        let remaining = r.remaining();
        r.skip(CHUNK_CRC_LEN)
            .map_err(|_| truncated(payload.len() + remaining))?;

        match tag {
            IHDR => header = Some(payload),
            IDAT => chunks.push(payload),
            IEND => break,
            PLTE | TRNS => return Err(MuxError::UnsupportedChunk(tag)),
            _ => log::trace!(
                "skipping {} chunk ({} bytes) at offset {}",
                tag_str(&tag),
                length,
                offset
            ),
        }
    }

    if !r.is_exhausted() {
        log::trace!("ignoring {} bytes after IEND", r.remaining());
    }

    let header = header.ok_or(MuxError::MissingHeader)?;
    Ok(ExtractedPayload {
        header,
        data: chunks,
    })
}
