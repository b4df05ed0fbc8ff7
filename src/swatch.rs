//! A representative color of an image along with readable text colors for it.

use crate::contrast::{minimum_alpha, BODY_MIN_CONTRAST, TITLE_MIN_CONTRAST};
use palette::{FromColor, Hsv, Srgb, Srgba, WithAlpha};
use std::fmt::Display;

/// Opaque white.
const WHITE: Srgb<u8> = Srgb::new(255, 255, 255);

/// Opaque black.
const BLACK: Srgb<u8> = Srgb::new(0, 0, 0);

/// A color found in an image, the number of pixels it represents,
/// and text colors that are readable on top of it.
///
/// Two swatches are equal if they have the same color and population.
#[derive(Debug, Clone, Copy)]
pub struct Swatch {
    /// The swatch color.
    color: Srgb<u8>,
    /// The number of pixels represented by this swatch.
    population: u32,
    /// White or black with enough alpha for title text, if any.
    title_text_color: Option<Srgba<u8>>,
    /// White or black with enough alpha for body text, if any.
    body_text_color: Option<Srgba<u8>>,
}

impl Swatch {
    /// Creates a new [`Swatch`] and computes its text colors.
    #[must_use]
    pub fn new(color: Srgb<u8>, population: u32) -> Self {
        let (title_text_color, body_text_color) = text_colors(color);
        Self {
            color,
            population,
            title_text_color,
            body_text_color,
        }
    }

    /// The swatch color.
    #[must_use]
    pub fn color(&self) -> Srgb<u8> {
        self.color
    }

    /// The number of pixels represented by this swatch.
    ///
    /// This is `0` for swatches synthesized from another swatch.
    #[must_use]
    pub fn population(&self) -> u32 {
        self.population
    }

    /// A translucent white or black that has a contrast ratio of at least
    /// [`TITLE_MIN_CONTRAST`] against this swatch.
    #[must_use]
    pub fn title_text_color(&self) -> Option<Srgba<u8>> {
        self.title_text_color
    }

    /// A translucent white or black that has a contrast ratio of at least
    /// [`BODY_MIN_CONTRAST`] against this swatch.
    #[must_use]
    pub fn body_text_color(&self) -> Option<Srgba<u8>> {
        self.body_text_color
    }

    /// The swatch color in the HSV color model.
    #[must_use]
    pub fn hsv(&self) -> Hsv {
        Hsv::from_color(self.color.into_format::<f32>())
    }

    /// The HSV saturation, computed with a single division of the 8-bit channels.
    ///
    /// Exact ratios like `56 / 160` compare equal to the matching `f32` literal (`0.35`).
    #[must_use]
    pub fn saturation(&self) -> f32 {
        let (min, max) = self.min_max();
        if max == 0 {
            0.0
        } else {
            f32::from(max - min) / f32::from(max)
        }
    }

    /// The HSV value ("luma"), computed with a single division of the largest channel.
    #[must_use]
    pub fn luma(&self) -> f32 {
        let (_, max) = self.min_max();
        f32::from(max) / f32::from(u8::MAX)
    }

    /// The smallest and largest channel values.
    fn min_max(&self) -> (u8, u8) {
        let (r, g, b) = self.color.into_components();
        (r.min(g).min(b), r.max(g).max(b))
    }
}

impl PartialEq for Swatch {
    fn eq(&self, other: &Self) -> bool {
        self.color == other.color && self.population == other.population
    }
}

impl Eq for Swatch {}

impl Display for Swatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (r, g, b) = self.color.into_components();
        write!(f, "Color: #{r:02x}{g:02x}{b:02x} Population: {}", self.population)
    }
}

/// Picks title and body text colors for the given background.
///
/// White text is preferred when both title and body can use it, then black text for both.
/// Otherwise, the title and body use whichever of white or black works for each.
fn text_colors(background: Srgb<u8>) -> (Option<Srgba<u8>>, Option<Srgba<u8>>) {
    let background = background.with_alpha(u8::MAX);
    let alpha_for = |text: Srgb<u8>, ratio: f64| {
        minimum_alpha(text, background, ratio).map(|alpha| text.with_alpha(alpha))
    };

    let light_title = alpha_for(WHITE, TITLE_MIN_CONTRAST);
    let light_body = alpha_for(WHITE, BODY_MIN_CONTRAST);
    if let (Some(title), Some(body)) = (light_title, light_body) {
        return (Some(title), Some(body));
    }

    let dark_title = alpha_for(BLACK, TITLE_MIN_CONTRAST);
    let dark_body = alpha_for(BLACK, BODY_MIN_CONTRAST);
    if let (Some(title), Some(body)) = (dark_title, dark_body) {
        return (Some(title), Some(body));
    }

    match (dark_title, light_body, light_title, dark_body) {
        (Some(title), Some(body), _, _) | (_, _, Some(title), Some(body)) => {
            (Some(title), Some(body))
        }
        _ => (None, None),
    }
}
