//! Bounds-checked cursor over a byte slice.
//!
//! [`SliceReader`] hands out borrowed sub-slices of the buffer it wraps, so
//! chunk payloads can be extracted without copying.

use core::fmt;

use crate::chunk::get_u32;

/// Returned when a read runs past the end of the slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct OutOfBounds {
    /// Bytes that were actually left.
    pub remaining: usize,
}

/// A reader that wraps a byte slice and tracks the current position.
#[derive(Clone)]
pub(crate) struct SliceReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> SliceReader<'a> {
    /// Create a new SliceReader wrapping the given byte slice.
    #[inline]
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Returns the current position in the slice.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Returns the number of bytes remaining from the current position.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    /// Returns true once every byte has been consumed.
    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }

    /// Take a slice of n bytes from the current position and advance position.
    /// Returns a slice reference without copying data.
    #[inline]
    pub fn take_slice(&mut self, n: usize) -> Result<&'a [u8], OutOfBounds> {
        let remaining = self.remaining();
        if n > remaining {
            return Err(OutOfBounds { remaining });
        }
        let slice = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    /// Read a fixed-size array.
    #[inline]
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], OutOfBounds> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take_slice(N)?);
        Ok(out)
    }

    /// Read a u32 in big-endian byte order.
    #[inline]
    pub fn read_u32_be(&mut self) -> Result<u32, OutOfBounds> {
        Ok(get_u32(self.take_slice(4)?))
    }

    /// Advance past `n` bytes without looking at them.
    #[inline]
    pub fn skip(&mut self, n: usize) -> Result<(), OutOfBounds> {
        self.take_slice(n).map(|_| ())
    }
}

impl fmt::Debug for SliceReader<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SliceReader")
            .field("len", &self.data.len())
            .field("pos", &self.pos)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_advance_position() {
        let data = [0, 0, 1, 0, 9, 8, 7];
        let mut r = SliceReader::new(&data);
        assert_eq!(r.read_u32_be(), Ok(256));
        assert_eq!(r.position(), 4);
        assert_eq!(r.read_array::<2>(), Ok([9, 8]));
        assert_eq!(r.remaining(), 1);
        r.skip(1).unwrap();
        assert!(r.is_exhausted());
    }

    #[test]
    fn short_read_reports_what_was_left() {
        let data = [1, 2, 3];
        let mut r = SliceReader::new(&data);
        assert_eq!(
            r.take_slice(5),
            Err(OutOfBounds { remaining: 3 })
        );
        // A failed read does not move the cursor.
        assert_eq!(r.position(), 0);
    }
}
