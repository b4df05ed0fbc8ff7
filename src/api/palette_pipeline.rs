//! Contains the [`PalettePipeline`] builder struct for the high level API.

use crate::{
    Downscale, Palette, PaletteSize, PixelSourceError, VariationSelector,
    DEFAULT_RESIZE_MAX_DIMENSION,
};
use log::debug;

/// A builder struct to specify options for generating a [`Palette`] from an image.
///
/// # Examples
/// Create a [`PalettePipeline`] from any [`Downscale`] pixel source,
/// like an [`RgbaSlice`](crate::RgbaSlice) or an `image::RgbaImage` (with the `image` feature):
/// ```
/// # use swatchette::{PalettePipeline, PixelSourceError, RgbaSlice};
/// # fn main() -> Result<(), PixelSourceError> {
/// let bytes = [200, 30, 30, 255, 20, 20, 40, 255];
/// let pixels = RgbaSlice::new(&bytes, 2, 1)?;
///
/// let palette = PalettePipeline::new(pixels)
///     .palette_size(8.into())
///     .palette()?;
///
/// assert_eq!(palette.swatches().len(), 2);
/// # Ok(())
/// # }
/// ```
#[must_use]
#[derive(Debug, Clone)]
pub struct PalettePipeline<S> {
    /// The input pixels.
    pub(crate) pixels: S,
    /// The maximum number of swatches.
    pub(crate) k: PaletteSize,
    /// The largest allowed width or height before quantization, if any.
    pub(crate) resize_max_dimension: Option<u32>,
    /// Selects the variations from the swatches.
    pub(crate) selector: VariationSelector,
}

impl<S: Downscale> PalettePipeline<S> {
    /// Creates a new [`PalettePipeline`] with default options.
    pub fn new(pixels: S) -> Self {
        Self {
            pixels,
            k: PaletteSize::default(),
            resize_max_dimension: Some(DEFAULT_RESIZE_MAX_DIMENSION),
            selector: VariationSelector::default(),
        }
    }

    /// Sets the maximum number of swatches.
    ///
    /// The default is [`PaletteSize::DEFAULT`].
    pub fn palette_size(mut self, size: PaletteSize) -> Self {
        self.k = size;
        self
    }

    /// Sets the largest width or height the input is scaled down to before quantization,
    /// or `None` to use every pixel.
    ///
    /// Sources that cannot be scaled are always read in full.
    /// The default is `Some(192)`.
    pub fn resize_max_dimension(mut self, max_dimension: Option<u32>) -> Self {
        self.resize_max_dimension = max_dimension;
        self
    }

    /// Sets the [`VariationSelector`] used to pick the variations.
    pub fn selector(mut self, selector: VariationSelector) -> Self {
        self.selector = selector;
        self
    }

    /// Runs the pipeline and returns the resulting [`Palette`].
    ///
    /// # Errors
    /// Returns an error if the input has more than [`MAX_PIXELS`](crate::MAX_PIXELS) pixels.
    pub fn palette(&self) -> Result<Palette, PixelSourceError> {
        let Self { pixels, k, resize_max_dimension, selector } = self;

        match resize_max_dimension.and_then(|max| pixels.downscale(max)) {
            Some(scaled) => {
                debug!("scaled input down to at most {resize_max_dimension:?} pixels per side");
                Palette::new(&scaled, *k, selector)
            }
            None => Palette::new(pixels, *k, selector),
        }
    }
}
