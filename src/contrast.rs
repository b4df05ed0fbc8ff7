//! WCAG relative luminance and contrast ratio, and the minimum text alpha
//! needed to stay readable on a given background.
//!
//! Formulas from <https://www.w3.org/TR/2008/REC-WCAG20-20081211/#relativeluminancedef>
//! and <https://www.w3.org/TR/2008/REC-WCAG20-20081211/#contrast-ratiodef>.

use palette::{Srgb, Srgba, WithAlpha};

/// The minimum contrast ratio for title text.
pub const TITLE_MIN_CONTRAST: f64 = 3.0;

/// The minimum contrast ratio for body text.
pub const BODY_MIN_CONTRAST: f64 = 4.5;

/// The maximum number of binary search steps in [`minimum_alpha`].
const MIN_ALPHA_SEARCH_MAX_ITERATIONS: u32 = 10;

/// The binary search in [`minimum_alpha`] stops once the alpha window is this narrow.
const MIN_ALPHA_SEARCH_PRECISION: u16 = 10;

/// Fully opaque alpha.
const OPAQUE: u16 = 0xFF;

/// Converts an 8-bit sRGB channel to linear light.
fn linearize(channel: u8) -> f64 {
    let c = f64::from(channel) / 255.0;
    if c < 0.03928 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Returns the relative luminance of a color in `0.0..=1.0`.
#[must_use]
pub fn luminance(color: Srgb<u8>) -> f64 {
    let (r, g, b) = color.into_components();
    0.2126 * linearize(r) + 0.7152 * linearize(g) + 0.0722 * linearize(b)
}

/// Composites `foreground` over `background` with alpha-over blending.
#[must_use]
pub fn composite_colors(foreground: Srgba<u8>, background: Srgba<u8>) -> Srgba<u8> {
    let fg_a = u16::from(foreground.alpha);
    let bg_a = u16::from(background.alpha);
    let a = composite_alpha(fg_a, bg_a);

    let channel = |fg: u8, bg: u8| composite_component(fg, fg_a, bg, bg_a, a);

    #[allow(clippy::cast_possible_truncation)]
    Srgba::new(
        channel(foreground.red, background.red),
        channel(foreground.green, background.green),
        channel(foreground.blue, background.blue),
        a as u8,
    )
}

/// The alpha of `fg` composited over `bg`.
fn composite_alpha(fg_a: u16, bg_a: u16) -> u16 {
    OPAQUE - ((OPAQUE - bg_a) * (OPAQUE - fg_a)) / OPAQUE
}

/// A single channel of `fg` composited over `bg`, where `a` is the composite alpha.
fn composite_component(fg: u8, fg_a: u16, bg: u8, bg_a: u16, a: u16) -> u8 {
    if a == 0 {
        return 0;
    }
    let [fg, bg] = [fg, bg].map(u32::from);
    let [fg_a, bg_a, a, opaque] = [fg_a, bg_a, a, OPAQUE].map(u32::from);
    let c = (opaque * fg * fg_a + bg * bg_a * (opaque - fg_a)) / (a * opaque);
    #[allow(clippy::cast_possible_truncation)]
    {
        c.min(opaque) as u8
    }
}

/// Returns the contrast ratio between `foreground` and `background`, in `1.0..=21.0`.
///
/// A translucent `foreground` is first composited over `background`,
/// which should be opaque.
///
/// # Examples
/// ```
/// # use swatchette::contrast::contrast_ratio;
/// # use palette::Srgba;
/// let ratio = contrast_ratio(Srgba::new(0, 0, 0, 255), Srgba::new(255, 255, 255, 255));
/// assert!((ratio - 21.0).abs() < 1e-9);
/// ```
#[must_use]
pub fn contrast_ratio(foreground: Srgba<u8>, background: Srgba<u8>) -> f64 {
    let foreground = if u16::from(foreground.alpha) < OPAQUE {
        composite_colors(foreground, background)
    } else {
        foreground
    };

    let l1 = luminance(foreground.color) + 0.05;
    let l2 = luminance(background.color) + 0.05;

    l1.max(l2) / l1.min(l2)
}

/// Returns an alpha for `foreground` that gives a contrast ratio of at least
/// `min_contrast_ratio` against `background`.
///
/// The result is the upper end of the final binary search window, so it is
/// guaranteed to pass but may be up to 10 above the true minimum.
///
/// Returns `None` if `background` is not fully opaque, or if even a fully opaque
/// `foreground` does not reach `min_contrast_ratio`.
#[must_use]
pub fn minimum_alpha(
    foreground: Srgb<u8>,
    background: Srgba<u8>,
    min_contrast_ratio: f64,
) -> Option<u8> {
    if u16::from(background.alpha) != OPAQUE {
        return None;
    }

    let with_alpha = |alpha: u16| {
        #[allow(clippy::cast_possible_truncation)]
        let alpha = alpha as u8;
        foreground.with_alpha(alpha)
    };

    if contrast_ratio(with_alpha(OPAQUE), background) < min_contrast_ratio {
        return None;
    }

    let mut min_alpha = 0;
    let mut max_alpha = OPAQUE;
    let mut iterations = 0;

    while iterations < MIN_ALPHA_SEARCH_MAX_ITERATIONS
        && max_alpha - min_alpha > MIN_ALPHA_SEARCH_PRECISION
    {
        let test_alpha = (min_alpha + max_alpha) / 2;

        if contrast_ratio(with_alpha(test_alpha), background) < min_contrast_ratio {
            min_alpha = test_alpha;
        } else {
            max_alpha = test_alpha;
        }

        iterations += 1;
    }

    #[allow(clippy::cast_possible_truncation)]
    Some(max_alpha as u8)
}
