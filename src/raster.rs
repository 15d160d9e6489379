//! Raster images handed to the encoder.
//!
//! A [`Raster`] borrows the caller's pixels for the duration of an encode
//! call; nothing in this crate ever writes through it. Its [`Rect`] bounds
//! place it on the animation canvas, and may be negative (validation rejects
//! those before any output is produced).

use alloc::vec::Vec;
use core::fmt;

/// Memory layout of the pixel data, i.e. the color model of a frame.
///
/// Two rasters share a color model only when their layouts are exactly
/// equal: `Rgb8` and `Rgb16` are different models.
///
/// 16-bit samples are stored big-endian, the byte order PNG uses on disk.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PixelLayout {
    /// One 8-bit luminance sample per pixel.
    L8,
    /// 8-bit luminance and alpha.
    La8,
    /// 8-bit red, green, blue.
    Rgb8,
    /// 8-bit red, green, blue, alpha.
    Rgba8,
    /// One 16-bit luminance sample per pixel.
    L16,
    /// 16-bit luminance and alpha.
    La16,
    /// 16-bit red, green, blue.
    Rgb16,
    /// 16-bit red, green, blue, alpha.
    Rgba16,
}

impl PixelLayout {
    /// Number of samples per pixel.
    pub const fn channels(self) -> usize {
        match self {
            Self::L8 | Self::L16 => 1,
            Self::La8 | Self::La16 => 2,
            Self::Rgb8 | Self::Rgb16 => 3,
            Self::Rgba8 | Self::Rgba16 => 4,
        }
    }

    /// Bits per sample.
    pub const fn bit_depth(self) -> u8 {
        match self {
            Self::L8 | Self::La8 | Self::Rgb8 | Self::Rgba8 => 8,
            Self::L16 | Self::La16 | Self::Rgb16 | Self::Rgba16 => 16,
        }
    }

    /// Bytes per pixel.
    pub const fn bytes_per_pixel(self) -> usize {
        self.channels() * (self.bit_depth() as usize / 8)
    }

    /// Whether the layout carries an alpha channel.
    pub const fn has_alpha(self) -> bool {
        matches!(self, Self::La8 | Self::Rgba8 | Self::La16 | Self::Rgba16)
    }
}

impl fmt::Display for PixelLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::L8 => "L8",
            Self::La8 => "LA8",
            Self::Rgb8 => "RGB8",
            Self::Rgba8 => "RGBA8",
            Self::L16 => "L16",
            Self::La16 => "LA16",
            Self::Rgb16 => "RGB16",
            Self::Rgba16 => "RGBA16",
        };
        f.write_str(name)
    }
}

/// Placement of a raster on the canvas.
///
/// The minimum corner is `(x, y)`; the maximum corner is exclusive.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    /// Minimum x coordinate.
    pub x: i32,
    /// Minimum y coordinate.
    pub y: i32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Rect {
    /// A rectangle with its minimum corner at `(x, y)`.
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Minimum x coordinate.
    pub const fn min_x(&self) -> i32 {
        self.x
    }

    /// Minimum y coordinate.
    pub const fn min_y(&self) -> i32 {
        self.y
    }

    /// Exclusive maximum x coordinate. Widened so it can never overflow.
    pub const fn max_x(&self) -> i64 {
        self.x as i64 + self.width as i64
    }

    /// Exclusive maximum y coordinate.
    pub const fn max_y(&self) -> i64 {
        self.y as i64 + self.height as i64
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}x{} at ({}, {})",
            self.width, self.height, self.x, self.y
        )
    }
}

/// A borrowed raster image: row-major pixels without padding.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Raster<'a> {
    pixels: &'a [u8],
    layout: PixelLayout,
    bounds: Rect,
}

impl<'a> Raster<'a> {
    /// Wrap `pixels` as a `width` x `height` image at the canvas origin.
    ///
    /// The buffer length is not checked here; the codec rejects buffers
    /// that do not hold exactly `width * height` pixels.
    pub fn new(pixels: &'a [u8], layout: PixelLayout, width: u32, height: u32) -> Self {
        Self::with_bounds(pixels, layout, Rect::new(0, 0, width, height))
    }

    /// Wrap `pixels` with explicit canvas bounds.
    pub fn with_bounds(pixels: &'a [u8], layout: PixelLayout, bounds: Rect) -> Self {
        Self {
            pixels,
            layout,
            bounds,
        }
    }

    /// Move the raster so its minimum corner sits at `(x, y)`.
    #[must_use]
    pub fn at(mut self, x: i32, y: i32) -> Self {
        self.bounds.x = x;
        self.bounds.y = y;
        self
    }

    /// Raw pixel bytes.
    pub fn pixels(&self) -> &'a [u8] {
        self.pixels
    }

    /// Color model of the pixels.
    pub fn layout(&self) -> PixelLayout {
        self.layout
    }

    /// Placement on the canvas.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.bounds.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.bounds.height
    }

    /// Byte length `pixels` must have for the declared size and layout.
    pub fn expected_len(&self) -> Option<usize> {
        (self.bounds.width as usize)
            .checked_mul(self.bounds.height as usize)?
            .checked_mul(self.layout.bytes_per_pixel())
    }
}

/// An owned raster, as produced by decoding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RasterBuf {
    /// Row-major pixel bytes.
    pub pixels: Vec<u8>,
    /// Color model of `pixels`.
    pub layout: PixelLayout,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl RasterBuf {
    /// Borrow as a [`Raster`] at the canvas origin.
    pub fn as_raster(&self) -> Raster<'_> {
        Raster::new(&self.pixels, self.layout, self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_sizes() {
        assert_eq!(PixelLayout::L8.bytes_per_pixel(), 1);
        assert_eq!(PixelLayout::Rgba8.bytes_per_pixel(), 4);
        assert_eq!(PixelLayout::La16.bytes_per_pixel(), 4);
        assert_eq!(PixelLayout::Rgb16.bytes_per_pixel(), 6);
        assert!(PixelLayout::Rgba16.has_alpha());
        assert!(!PixelLayout::Rgb8.has_alpha());
    }

    #[test]
    fn rect_extents_do_not_overflow() {
        let r = Rect::new(i32::MAX, -5, u32::MAX, 10);
        assert_eq!(r.max_x(), i32::MAX as i64 + u32::MAX as i64);
        assert_eq!(r.max_y(), 5);
    }

    #[test]
    fn at_only_moves_origin() {
        let px = [0u8; 12];
        let r = Raster::new(&px, PixelLayout::Rgb8, 2, 2).at(3, 4);
        assert_eq!(r.bounds(), Rect::new(3, 4, 2, 2));
        assert_eq!(r.expected_len(), Some(12));
    }
}
