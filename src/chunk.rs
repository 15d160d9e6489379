//! PNG chunk primitives shared by the chunk reader and the chunk writer.
//!
//! Everything in the PNG container is big-endian. A chunk is laid out as
//! `u32 length | [u8; 4] tag | payload | u32 crc32(tag ‖ payload)`.

use byteorder_lite::{BigEndian, ByteOrder};
use crc32fast::Hasher;

/// The 8-byte PNG file signature.
pub const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// A four-byte chunk type tag.
pub type ChunkTag = [u8; 4];

/// Image header.
pub const IHDR: ChunkTag = *b"IHDR";
/// Palette.
pub const PLTE: ChunkTag = *b"PLTE";
/// Transparency.
pub const TRNS: ChunkTag = *b"tRNS";
/// Image data.
pub const IDAT: ChunkTag = *b"IDAT";
/// Image trailer.
pub const IEND: ChunkTag = *b"IEND";
/// Animation control.
pub const ACTL: ChunkTag = *b"acTL";
/// Frame control.
pub const FCTL: ChunkTag = *b"fcTL";
/// Frame data.
pub const FDAT: ChunkTag = *b"fdAT";

/// Length-and-tag prefix that precedes every chunk payload.
pub const CHUNK_PREFIX_LEN: usize = 8;

/// Size of the trailing CRC.
pub const CHUNK_CRC_LEN: usize = 4;

/// Write `v` big-endian into the first two bytes of `buf`.
#[inline]
pub fn put_u16(buf: &mut [u8], v: u16) {
    BigEndian::write_u16(buf, v);
}

/// Write `v` big-endian into the first four bytes of `buf`.
#[inline]
pub fn put_u32(buf: &mut [u8], v: u32) {
    BigEndian::write_u32(buf, v);
}

/// Read a big-endian u32 from the first four bytes of `buf`.
#[inline]
pub fn get_u32(buf: &[u8]) -> u32 {
    BigEndian::read_u32(buf)
}

/// IEEE CRC32 over the tag followed by each payload part, in order.
///
/// The parts never need to be contiguous; `fdAT` uses this to checksum
/// the sequence number and the borrowed image data separately.
pub fn chunk_crc(tag: &ChunkTag, parts: &[&[u8]]) -> u32 {
    let mut hasher = Hasher::new();
    hasher.update(tag);
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize()
}

/// Render a tag for error messages and logs.
pub fn tag_str(tag: &ChunkTag) -> &str {
    core::str::from_utf8(tag).unwrap_or("????")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn big_endian_helpers() {
        let mut buf = [0u8; 6];
        put_u16(&mut buf[0..2], 0x0102);
        put_u32(&mut buf[2..6], 0x0304_0506);
        assert_eq!(buf, [1, 2, 3, 4, 5, 6]);
        assert_eq!(get_u32(&buf[2..6]), 0x0304_0506);
    }

    #[test]
    fn crc_of_iend_matches_known_value() {
        // Every PNG ends with the same IEND chunk: 00 00 00 00 49 45 4E 44 AE 42 60 82
        assert_eq!(chunk_crc(&IEND, &[]), 0xAE42_6082);
    }

    #[test]
    fn crc_over_split_parts_equals_contiguous() {
        let whole = [0u8, 0, 0, 7, 1, 2, 3, 4, 5];
        let split = chunk_crc(&FDAT, &[&whole[..4], &whole[4..]]);
        let mut joined = FDAT.to_vec();
        joined.extend_from_slice(&whole);
        assert_eq!(split, crc32fast::hash(&joined));
    }

    #[test]
    fn tag_str_falls_back_for_non_utf8() {
        assert_eq!(tag_str(&IDAT), "IDAT");
        assert_eq!(tag_str(&[0xFF, 0xFE, 0, 0]), "????");
    }
}
