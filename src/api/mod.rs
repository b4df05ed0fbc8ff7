//! Contains the [`Palette`] result type and the [`PalettePipeline`] builder for the high level API.

#[cfg(feature = "image")]
mod rgba_image;
mod palette_pipeline;

pub use palette_pipeline::PalettePipeline;

use crate::{
    median_cut, ColorHistogram, PaletteSize, PixelSource, PixelSourceError, Swatch, Variations,
    VariationSelector,
};

/// The swatches of an image and the swatch chosen for each variation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Palette {
    /// The swatches produced by quantization.
    swatches: Vec<Swatch>,
    /// The swatch selected for each variation.
    variations: Variations,
}

impl Palette {
    /// Quantizes the pixels of `pixels` into at most `palette_size` swatches
    /// and selects the variations among them.
    ///
    /// # Errors
    /// Returns an error if `pixels` has more than [`MAX_PIXELS`](crate::MAX_PIXELS) pixels.
    pub fn new(
        pixels: &impl PixelSource,
        palette_size: PaletteSize,
        selector: &VariationSelector,
    ) -> Result<Self, PixelSourceError> {
        let hist = ColorHistogram::new(pixels)?;
        Ok(Self::from_histogram(&hist, palette_size, selector))
    }

    /// Same as [`Palette::new`], but starts from an already built [`ColorHistogram`].
    #[must_use]
    pub fn from_histogram(
        hist: &ColorHistogram,
        palette_size: PaletteSize,
        selector: &VariationSelector,
    ) -> Self {
        Self::from_swatches(median_cut::palette(hist, palette_size), selector)
    }

    /// Selects the variations among the given swatches.
    #[must_use]
    pub fn from_swatches(swatches: Vec<Swatch>, selector: &VariationSelector) -> Self {
        let variations = selector.select(&swatches);
        Self { swatches, variations }
    }

    /// The swatches produced by quantization.
    ///
    /// If the image had no more distinct colors than the palette size, these are in the order
    /// the colors first appeared. Otherwise, they are ordered by descending color box volume.
    #[must_use]
    pub fn swatches(&self) -> &[Swatch] {
        &self.swatches
    }

    /// Consumes the [`Palette`] and returns its swatches.
    #[must_use]
    pub fn into_swatches(self) -> Vec<Swatch> {
        self.swatches
    }

    /// The selection for every variation.
    #[must_use]
    pub fn variations(&self) -> &Variations {
        &self.variations
    }

    /// The vibrant swatch, if any.
    #[must_use]
    pub fn vibrant_swatch(&self) -> Option<&Swatch> {
        self.variations.vibrant()
    }

    /// The muted swatch, if any.
    #[must_use]
    pub fn muted_swatch(&self) -> Option<&Swatch> {
        self.variations.muted()
    }

    /// The light vibrant swatch, if any.
    #[must_use]
    pub fn light_vibrant_swatch(&self) -> Option<&Swatch> {
        self.variations.light_vibrant()
    }

    /// The light muted swatch, if any.
    #[must_use]
    pub fn light_muted_swatch(&self) -> Option<&Swatch> {
        self.variations.light_muted()
    }

    /// The dark vibrant swatch, if any.
    #[must_use]
    pub fn dark_vibrant_swatch(&self) -> Option<&Swatch> {
        self.variations.dark_vibrant()
    }

    /// The dark muted swatch, if any.
    #[must_use]
    pub fn dark_muted_swatch(&self) -> Option<&Swatch> {
        self.variations.dark_muted()
    }
}
