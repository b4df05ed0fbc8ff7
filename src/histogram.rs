//! Population counts for each distinct [`QuantizedColor`] in an image.

use crate::{
    quantized::NUM_KEYS,
    types::{check_pixel_count, PixelSourceError},
    PixelSource, QuantizedColor,
};
use log::debug;
use palette::Srgb;

/// The distinct quantized colors of an image and the number of pixels for each.
///
/// Colors are kept in the order they were first seen so that results are reproducible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorHistogram {
    /// The distinct colors in first-seen order.
    colors: Vec<QuantizedColor>,
    /// A dense table of counts indexed by quantized color key.
    counts: Box<[u32]>,
    /// The sum of all counts.
    total_count: u32,
}

impl Default for ColorHistogram {
    fn default() -> Self {
        Self {
            colors: Vec::new(),
            counts: vec![0; NUM_KEYS].into_boxed_slice(),
            total_count: 0,
        }
    }
}

impl ColorHistogram {
    /// Builds a histogram by quantizing every pixel of `pixels`.
    ///
    /// Alpha is ignored.
    ///
    /// # Errors
    /// Returns [`PixelSourceError::TooManyPixels`] if the source has more than
    /// [`MAX_PIXELS`](crate::MAX_PIXELS) pixels.
    pub fn new(pixels: &impl PixelSource) -> Result<Self, PixelSourceError> {
        check_pixel_count(pixels.width(), pixels.height())?;

        let mut hist = Self::default();
        pixels.for_each_pixel(|px| hist.add(QuantizedColor::from_rgb888(px.color)));

        debug!(
            "built histogram of {} distinct colors from {} pixels",
            hist.len(),
            hist.total_count
        );

        Ok(hist)
    }

    /// Builds a histogram from the given colors, each counted once.
    ///
    /// Counting stops after [`MAX_PIXELS`](crate::MAX_PIXELS) colors.
    pub fn from_colors(colors: impl IntoIterator<Item = Srgb<u8>>) -> Self {
        let mut hist = Self::default();
        for color in colors.into_iter().take(crate::MAX_PIXELS as usize) {
            hist.add(QuantizedColor::from_rgb888(color));
        }
        hist
    }

    /// Increments the count of `color`.
    fn add(&mut self, color: QuantizedColor) {
        let count = &mut self.counts[color.index()];
        if *count == 0 {
            self.colors.push(color);
        }
        *count += 1;
        self.total_count += 1;
    }

    /// The distinct colors in first-seen order.
    #[must_use]
    pub fn colors(&self) -> &[QuantizedColor] {
        &self.colors
    }

    /// The number of pixels with the given quantized color.
    #[must_use]
    pub fn count(&self, color: QuantizedColor) -> u32 {
        self.counts[color.index()]
    }

    /// The total number of pixels, i.e., the sum of all counts.
    #[must_use]
    pub fn total_count(&self) -> u32 {
        self.total_count
    }

    /// The number of distinct colors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Whether there are no colors.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Iterates over the distinct colors and their counts in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (QuantizedColor, u32)> + '_ {
        self.colors.iter().map(|&color| (color, self.count(color)))
    }
}
