//! Contains various types needed across the crate.

use crate::{MAX_COLORS, MAX_PIXELS};
use palette::Srgba;
use std::fmt::Display;
use thiserror::Error;

/// An error returned when pixel data cannot be used as input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PixelSourceError {
    /// The length of a raw RGBA buffer does not match the given dimensions.
    #[error("pixel buffer length {len} does not match dimensions {width}x{height}")]
    DimensionMismatch {
        /// The length of the buffer in bytes.
        len: usize,
        /// The given width.
        width: u32,
        /// The given height.
        height: u32,
    },
    /// The number of pixels is above [`MAX_PIXELS`].
    #[error("{pixels} pixels is above the maximum of {max}")]
    TooManyPixels {
        /// The number of pixels in the input.
        pixels: u64,
        /// The maximum supported number of pixels.
        max: u32,
    },
}

/// Checks that `width * height` is at most [`MAX_PIXELS`].
pub(crate) fn check_pixel_count(width: u32, height: u32) -> Result<u32, PixelSourceError> {
    let pixels = u64::from(width) * u64::from(height);
    u32::try_from(pixels)
        .ok()
        .filter(|&n| n <= MAX_PIXELS)
        .ok_or(PixelSourceError::TooManyPixels { pixels, max: MAX_PIXELS })
}

/// A source of 8-bit RGBA pixels, such as a decoded (and possibly downscaled) image.
///
/// The palette pipeline reads every pixel exactly once.
pub trait PixelSource {
    /// The width in pixels.
    fn width(&self) -> u32;

    /// The height in pixels.
    fn height(&self) -> u32;

    /// Returns the pixel at the given coordinates.
    ///
    /// `x` is less than `width` and `y` is less than `height`.
    fn pixel(&self, x: u32, y: u32) -> Srgba<u8>;

    /// Calls `f` for every pixel in row-major order.
    ///
    /// Implementors backed by contiguous memory may override this for speed.
    fn for_each_pixel(&self, mut f: impl FnMut(Srgba<u8>)) {
        for y in 0..self.height() {
            for x in 0..self.width() {
                f(self.pixel(x, y));
            }
        }
    }
}

impl<T: PixelSource + ?Sized> PixelSource for &T {
    fn width(&self) -> u32 {
        (**self).width()
    }

    fn height(&self) -> u32 {
        (**self).height()
    }

    fn pixel(&self, x: u32, y: u32) -> Srgba<u8> {
        (**self).pixel(x, y)
    }

    fn for_each_pixel(&self, f: impl FnMut(Srgba<u8>)) {
        (**self).for_each_pixel(f);
    }
}

/// A [`PixelSource`] that can produce a smaller copy of itself.
///
/// The [`PalettePipeline`](crate::PalettePipeline) uses this to limit the number of pixels
/// it reads. Implementors that do not support scaling can always return `None`.
pub trait Downscale: PixelSource {
    /// The type of the scaled-down copy.
    type Scaled: PixelSource;

    /// Returns a copy scaled down, preserving the aspect ratio,
    /// so that neither dimension is above `max_dimension`.
    ///
    /// Returns `None` if the source is already small enough or cannot be scaled.
    fn downscale(&self, max_dimension: u32) -> Option<Self::Scaled>;
}

impl<T: Downscale + ?Sized> Downscale for &T {
    type Scaled = T::Scaled;

    fn downscale(&self, max_dimension: u32) -> Option<Self::Scaled> {
        (**self).downscale(max_dimension)
    }
}

/// A borrowed, row-major buffer of interleaved RGBA bytes with known dimensions.
///
/// # Examples
/// ```
/// # use swatchette::{RgbaSlice, PixelSourceError};
/// # fn main() -> Result<(), PixelSourceError> {
/// let bytes = [255, 0, 0, 255, 0, 0, 255, 255];
/// let pixels = RgbaSlice::new(&bytes, 2, 1)?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RgbaSlice<'a> {
    /// The raw bytes, 4 per pixel.
    bytes: &'a [u8],
    /// The width in pixels.
    width: u32,
    /// The height in pixels.
    height: u32,
}

impl<'a> RgbaSlice<'a> {
    /// Creates a new [`RgbaSlice`] after checking that the length of `bytes`
    /// is exactly `width * height * 4` and that the pixel count is at most [`MAX_PIXELS`].
    pub fn new(bytes: &'a [u8], width: u32, height: u32) -> Result<Self, PixelSourceError> {
        let pixels = check_pixel_count(width, height)?;
        if bytes.len() as u64 == u64::from(pixels) * 4 {
            Ok(Self { bytes, width, height })
        } else {
            Err(PixelSourceError::DimensionMismatch { len: bytes.len(), width, height })
        }
    }

    /// Returns the raw bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }
}

impl<'a> PixelSource for RgbaSlice<'a> {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn pixel(&self, x: u32, y: u32) -> Srgba<u8> {
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let [r, g, b, a] = [self.bytes[i], self.bytes[i + 1], self.bytes[i + 2], self.bytes[i + 3]];
        Srgba::new(r, g, b, a)
    }

    fn for_each_pixel(&self, mut f: impl FnMut(Srgba<u8>)) {
        for px in self.bytes.chunks_exact(4) {
            f(Srgba::new(px[0], px[1], px[2], px[3]));
        }
    }
}

/// Raw buffers are always read as-is.
impl<'a> Downscale for RgbaSlice<'a> {
    type Scaled = Self;

    fn downscale(&self, _max_dimension: u32) -> Option<Self> {
        None
    }
}

/// This type is used to specify the maximum number of swatches to compute.
///
/// This is a simple new type wrapper around `u16` with the invariant that it must be
/// less than or equal to [`MAX_COLORS`].
///
/// If a [`PaletteSize`] of `0` is provided, an empty palette will be returned.
///
/// # Examples
/// Use `into` to create [`PaletteSize`]s from `u8`s.
/// For `u16`s, use `try_into` or [`PaletteSize::from_clamped`].
///
/// ```
/// # use swatchette::PaletteSize;
/// let size = PaletteSize::from(24);
/// let size = PaletteSize::from_clamped(1024);
/// assert_eq!(size, PaletteSize::MAX);
/// assert_eq!(PaletteSize::default().into_inner(), 16);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct PaletteSize(u16);

impl PaletteSize {
    /// The maximum supported palette size (given by [`MAX_COLORS`]).
    pub const MAX: Self = Self(MAX_COLORS);

    /// The default palette size of `16`.
    pub const DEFAULT: Self = Self(16);

    /// Gets the inner `u16` value.
    #[must_use]
    pub const fn into_inner(self) -> u16 {
        self.0
    }

    /// Gets the inner value as a `usize`.
    pub(crate) const fn as_usize(self) -> usize {
        self.0 as usize
    }

    /// Creates a [`PaletteSize`] by clamping the given `u16` to be less than or equal to [`MAX_COLORS`].
    #[must_use]
    pub const fn from_clamped(value: u16) -> Self {
        if value <= MAX_COLORS {
            Self(value)
        } else {
            Self(MAX_COLORS)
        }
    }
}

impl Default for PaletteSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl From<PaletteSize> for u16 {
    fn from(val: PaletteSize) -> Self {
        val.into_inner()
    }
}

impl From<u8> for PaletteSize {
    fn from(value: u8) -> Self {
        Self(value.into())
    }
}

/// An error type for when a requested palette size is above [`MAX_COLORS`].
///
/// The inner value is the maximum supported value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Error)]
#[error("above the maximum palette size of {0}")]
pub struct AboveMaxColors(pub u16);

impl TryFrom<u16> for PaletteSize {
    type Error = AboveMaxColors;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        if value <= MAX_COLORS {
            Ok(PaletteSize(value))
        } else {
            Err(AboveMaxColors(MAX_COLORS))
        }
    }
}

impl Display for PaletteSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.into_inner())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn rgba_slice_checks_length() {
        let bytes = [0u8; 24];
        assert!(RgbaSlice::new(&bytes, 3, 2).is_ok());
        assert_eq!(
            RgbaSlice::new(&bytes, 2, 2),
            Err(PixelSourceError::DimensionMismatch { len: 24, width: 2, height: 2 })
        );
    }

    #[test]
    fn rgba_slice_rejects_too_many_pixels() {
        let result = RgbaSlice::new(&[], u32::MAX, 2);
        assert!(matches!(result, Err(PixelSourceError::TooManyPixels { .. })));
    }

    #[test]
    fn rgba_slice_reads_row_major() {
        #[rustfmt::skip]
        let bytes = [
            1, 2, 3, 4,     5, 6, 7, 8,
            9, 10, 11, 12,  13, 14, 15, 16,
        ];
        let pixels = RgbaSlice::new(&bytes, 2, 2).unwrap();
        assert_eq!(pixels.pixel(1, 0), Srgba::new(5, 6, 7, 8));
        assert_eq!(pixels.pixel(0, 1), Srgba::new(9, 10, 11, 12));

        let mut seen = Vec::new();
        pixels.for_each_pixel(|px| seen.push(px.alpha));
        assert_eq!(seen, vec![4, 8, 12, 16]);
    }

    #[test]
    fn palette_size_bounds() {
        assert_eq!(PaletteSize::try_from(300u16), Err(AboveMaxColors(MAX_COLORS)));
        assert_eq!(PaletteSize::try_from(32u16).unwrap().into_inner(), 32);
        assert_eq!(PaletteSize::from_clamped(u16::MAX), PaletteSize::MAX);
    }
}
