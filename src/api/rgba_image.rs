//! Integration with the [`image`] crate.

use crate::{types::check_pixel_count, Downscale, PalettePipeline, PixelSource, PixelSourceError};
use image::{
    imageops::{self, FilterType},
    DynamicImage, ImageBuffer, RgbaImage,
};
use palette::Srgba;

impl PixelSource for RgbaImage {
    fn width(&self) -> u32 {
        ImageBuffer::width(self)
    }

    fn height(&self) -> u32 {
        ImageBuffer::height(self)
    }

    fn pixel(&self, x: u32, y: u32) -> Srgba<u8> {
        let [r, g, b, a] = self.get_pixel(x, y).0;
        Srgba::new(r, g, b, a)
    }

    fn for_each_pixel(&self, mut f: impl FnMut(Srgba<u8>)) {
        for px in self.pixels() {
            let [r, g, b, a] = px.0;
            f(Srgba::new(r, g, b, a));
        }
    }
}

impl Downscale for RgbaImage {
    type Scaled = RgbaImage;

    fn downscale(&self, max_dimension: u32) -> Option<RgbaImage> {
        let (width, height) = scaled_dimensions(self.dimensions(), max_dimension)?;
        Some(imageops::resize(self, width, height, FilterType::Triangle))
    }
}

/// The dimensions after scaling so that the largest one is `max_dimension`,
/// or `None` if the image is already small enough.
///
/// Neither returned dimension is less than `1`.
fn scaled_dimensions((width, height): (u32, u32), max_dimension: u32) -> Option<(u32, u32)> {
    let largest = width.max(height);
    if largest <= max_dimension {
        return None;
    }

    let scale = f64::from(max_dimension) / f64::from(largest);

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let scaled = |dim: u32| ((f64::from(dim) * scale).round() as u32).max(1);

    Some((scaled(width), scaled(height)))
}

impl<'a> TryFrom<&'a RgbaImage> for PalettePipeline<&'a RgbaImage> {
    type Error = PixelSourceError;

    fn try_from(image: &'a RgbaImage) -> Result<Self, Self::Error> {
        check_pixel_count(image.width(), image.height())?;
        Ok(Self::new(image))
    }
}

impl PalettePipeline<RgbaImage> {
    /// Creates a new [`PalettePipeline`] from a decoded image of any pixel format.
    ///
    /// # Errors
    /// Returns an error if the image has more than [`MAX_PIXELS`](crate::MAX_PIXELS) pixels.
    ///
    /// # Examples
    /// ```no_run
    /// # use swatchette::PalettePipeline;
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let img = image::open("some image")?;
    /// let palette = PalettePipeline::from_image(&img)?.palette()?;
    /// if let Some(swatch) = palette.vibrant_swatch() {
    ///     println!("{swatch}");
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_image(image: &DynamicImage) -> Result<Self, PixelSourceError> {
        check_pixel_count(image.width(), image.height())?;
        Ok(Self::new(image.to_rgba8()))
    }
}
