//! Picks the swatches that best match six named variations:
//! vibrant and muted, each in a normal, light, and dark version.
//!
//! A swatch is a candidate for a variation if its HSV saturation and value ("luma")
//! fall within the variation's windows. Candidates are scored by a weighted mean of
//! how close their saturation and luma are to the variation's targets and how
//! large their population is relative to the largest population.
//!
//! Variations are evaluated in the fixed order given by [`Variation::ALL`],
//! and a swatch chosen for one variation is not considered for any later one.
//! So, when a swatch fits several variations, the earliest variation gets it.
//!
//! Afterwards, if exactly one of vibrant or dark vibrant was found,
//! the other is synthesized from it by changing its luma.
//! No other variations are synthesized.

use crate::Swatch;
use bitvec::vec::BitVec;
use log::debug;
use ordered_float::OrderedFloat;
use palette::{FromColor, Srgb};
use std::fmt::Display;

/// One of the six named swatch variations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variation {
    /// Saturated with medium luma.
    Vibrant,
    /// Saturated with high luma.
    LightVibrant,
    /// Saturated with low luma.
    DarkVibrant,
    /// Desaturated with medium luma.
    Muted,
    /// Desaturated with high luma.
    LightMuted,
    /// Desaturated with low luma.
    DarkMuted,
}

impl Variation {
    /// All variations in the order they are evaluated.
    ///
    /// This order is part of the selection contract: a swatch matching
    /// several variations goes to the one that comes first here.
    pub const ALL: [Self; 6] = [
        Self::Vibrant,
        Self::LightVibrant,
        Self::DarkVibrant,
        Self::Muted,
        Self::LightMuted,
        Self::DarkMuted,
    ];

    /// The position of this variation in [`Variation::ALL`].
    const fn index(self) -> usize {
        match self {
            Self::Vibrant => 0,
            Self::LightVibrant => 1,
            Self::DarkVibrant => 2,
            Self::Muted => 3,
            Self::LightMuted => 4,
            Self::DarkMuted => 5,
        }
    }

    /// The default target for this variation.
    #[must_use]
    pub const fn default_target(self) -> VariationTarget {
        match self {
            Self::Vibrant => VariationTarget::new(NORMAL_LUMA, VIBRANT_SATURATION),
            Self::LightVibrant => VariationTarget::new(LIGHT_LUMA, VIBRANT_SATURATION),
            Self::DarkVibrant => VariationTarget::new(DARK_LUMA, VIBRANT_SATURATION),
            Self::Muted => VariationTarget::new(NORMAL_LUMA, MUTED_SATURATION),
            Self::LightMuted => VariationTarget::new(LIGHT_LUMA, MUTED_SATURATION),
            Self::DarkMuted => VariationTarget::new(DARK_LUMA, MUTED_SATURATION),
        }
    }
}

impl Display for Variation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Vibrant => "vibrant",
            Self::LightVibrant => "light vibrant",
            Self::DarkVibrant => "dark vibrant",
            Self::Muted => "muted",
            Self::LightMuted => "light muted",
            Self::DarkMuted => "dark muted",
        };
        f.write_str(name)
    }
}

/// A target value and the inclusive range of accepted values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Window {
    /// The minimum accepted value.
    pub min: f32,
    /// The ideal value.
    pub target: f32,
    /// The maximum accepted value.
    pub max: f32,
}

impl Window {
    /// Creates a new [`Window`].
    #[must_use]
    pub const fn new(min: f32, target: f32, max: f32) -> Self {
        Self { min, target, max }
    }

    /// Whether `value` is within `min..=max`.
    #[must_use]
    pub fn contains(&self, value: f32) -> bool {
        (self.min..=self.max).contains(&value)
    }

    /// `1.0` at the target, decreasing linearly with the distance from it.
    fn closeness(&self, value: f32) -> f32 {
        1.0 - (value - self.target).abs()
    }
}

/// Luma of dark variations.
const DARK_LUMA: Window = Window::new(0.0, 0.26, 0.45);
/// Luma of normal variations.
const NORMAL_LUMA: Window = Window::new(0.3, 0.5, 0.7);
/// Luma of light variations.
const LIGHT_LUMA: Window = Window::new(0.55, 0.74, 1.0);
/// Saturation of muted variations.
const MUTED_SATURATION: Window = Window::new(0.0, 0.3, 0.4);
/// Saturation of vibrant variations.
const VIBRANT_SATURATION: Window = Window::new(0.35, 1.0, 1.0);

/// The luma and saturation a variation is looking for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VariationTarget {
    /// The accepted and ideal HSV value.
    pub luma: Window,
    /// The accepted and ideal HSV saturation.
    pub saturation: Window,
}

impl VariationTarget {
    /// Creates a new [`VariationTarget`].
    #[must_use]
    pub const fn new(luma: Window, saturation: Window) -> Self {
        Self { luma, saturation }
    }

    /// Whether a color with the given saturation and luma is a candidate.
    #[must_use]
    pub fn accepts(&self, saturation: f32, luma: f32) -> bool {
        self.saturation.contains(saturation) && self.luma.contains(luma)
    }
}

/// The relative importance of each term when scoring a candidate swatch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreWeights {
    /// The weight of saturation closeness.
    pub saturation: f32,
    /// The weight of luma closeness.
    pub luma: f32,
    /// The weight of the relative population.
    pub population: f32,
}

impl ScoreWeights {
    /// The default weights: saturation `3`, luma `6`, population `1`.
    pub const DEFAULT: Self = Self { saturation: 3.0, luma: 6.0, population: 1.0 };
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// The outcome of selecting a swatch for one variation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// A swatch from the palette matched the variation.
    Found(Swatch),
    /// No swatch matched, so one was derived from a related variation.
    /// Its population is `0`.
    Synthesized(Swatch),
    /// No swatch matched.
    Missing,
}

impl Selection {
    /// The selected swatch, if any.
    #[must_use]
    pub fn swatch(&self) -> Option<&Swatch> {
        match self {
            Selection::Found(swatch) | Selection::Synthesized(swatch) => Some(swatch),
            Selection::Missing => None,
        }
    }

    /// Whether no swatch was selected.
    #[must_use]
    pub fn is_missing(&self) -> bool {
        matches!(self, Selection::Missing)
    }
}

/// The selected swatch for each [`Variation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Variations([Selection; 6]);

impl Default for Variations {
    fn default() -> Self {
        Self([Selection::Missing; 6])
    }
}

impl Variations {
    /// The selection for `variation`.
    #[must_use]
    pub fn selection(&self, variation: Variation) -> &Selection {
        &self.0[variation.index()]
    }

    /// The swatch for `variation`, if any.
    #[must_use]
    pub fn get(&self, variation: Variation) -> Option<&Swatch> {
        self.selection(variation).swatch()
    }

    /// The vibrant swatch, if any.
    #[must_use]
    pub fn vibrant(&self) -> Option<&Swatch> {
        self.get(Variation::Vibrant)
    }

    /// The light vibrant swatch, if any.
    #[must_use]
    pub fn light_vibrant(&self) -> Option<&Swatch> {
        self.get(Variation::LightVibrant)
    }

    /// The dark vibrant swatch, if any.
    #[must_use]
    pub fn dark_vibrant(&self) -> Option<&Swatch> {
        self.get(Variation::DarkVibrant)
    }

    /// The muted swatch, if any.
    #[must_use]
    pub fn muted(&self) -> Option<&Swatch> {
        self.get(Variation::Muted)
    }

    /// The light muted swatch, if any.
    #[must_use]
    pub fn light_muted(&self) -> Option<&Swatch> {
        self.get(Variation::LightMuted)
    }

    /// The dark muted swatch, if any.
    #[must_use]
    pub fn dark_muted(&self) -> Option<&Swatch> {
        self.get(Variation::DarkMuted)
    }

    /// Iterates over each variation and its selection in evaluation order.
    pub fn iter(&self) -> impl Iterator<Item = (Variation, &Selection)> {
        Variation::ALL.into_iter().zip(&self.0)
    }
}

/// Selects a swatch for each [`Variation`] from a list of swatches.
///
/// # Examples
/// ```
/// # use swatchette::{Swatch, Variation, VariationSelector};
/// # use palette::Srgb;
/// let swatches = [Swatch::new(Srgb::new(128, 20, 20), 10), Swatch::new(Srgb::new(60, 50, 50), 4)];
/// let variations = VariationSelector::new().select(&swatches);
/// assert_eq!(variations.vibrant(), Some(&swatches[0]));
/// assert_eq!(variations.dark_muted(), Some(&swatches[1]));
/// assert!(variations.get(Variation::LightMuted).is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VariationSelector {
    /// The target of each variation, indexed by [`Variation::index`].
    targets: [VariationTarget; 6],
    /// The scoring weights.
    weights: ScoreWeights,
}

impl Default for VariationSelector {
    fn default() -> Self {
        Self::new()
    }
}

impl VariationSelector {
    /// Creates a new [`VariationSelector`] with the default targets and weights.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            targets: [
                Variation::Vibrant.default_target(),
                Variation::LightVibrant.default_target(),
                Variation::DarkVibrant.default_target(),
                Variation::Muted.default_target(),
                Variation::LightMuted.default_target(),
                Variation::DarkMuted.default_target(),
            ],
            weights: ScoreWeights::DEFAULT,
        }
    }

    /// Sets the target for `variation`.
    #[must_use]
    pub fn target(mut self, variation: Variation, target: VariationTarget) -> Self {
        self.targets[variation.index()] = target;
        self
    }

    /// Sets the scoring weights.
    #[must_use]
    pub fn weights(mut self, weights: ScoreWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Returns the target for `variation`.
    #[must_use]
    pub const fn target_of(&self, variation: Variation) -> VariationTarget {
        self.targets[variation.index()]
    }

    /// Selects at most one swatch per variation without reusing a swatch,
    /// then synthesizes a missing vibrant or dark vibrant swatch from the other.
    #[must_use]
    pub fn select(&self, swatches: &[Swatch]) -> Variations {
        let max_population = swatches.iter().map(Swatch::population).max().unwrap_or(0);
        let saturation_luma = swatches
            .iter()
            .map(|swatch| (swatch.saturation(), swatch.luma()))
            .collect::<Vec<_>>();

        let mut claimed: BitVec = BitVec::repeat(false, swatches.len());
        let mut selections = [Selection::Missing; 6];

        for variation in Variation::ALL {
            let target = self.target_of(variation);

            let mut best: Option<(usize, OrderedFloat<f32>)> = None;
            let candidates = swatches.iter().zip(&saturation_luma).enumerate();
            for (i, (swatch, &(saturation, luma))) in candidates {
                if claimed[i] || !target.accepts(saturation, luma) {
                    continue;
                }

                let score = OrderedFloat(self.score(
                    &target,
                    saturation,
                    luma,
                    swatch.population(),
                    max_population,
                ));

                if best.map_or(true, |(_, best_score)| score > best_score) {
                    best = Some((i, score));
                }
            }

            if let Some((i, _)) = best {
                let chosen = swatches[i];
                for (j, swatch) in swatches.iter().enumerate() {
                    if *swatch == chosen {
                        claimed.set(j, true);
                    }
                }
                selections[variation.index()] = Selection::Found(chosen);
            } else {
                debug!("no swatch matches {variation}");
            }
        }

        let mut variations = Variations(selections);
        self.fill_vibrant_pair(&mut variations);
        variations
    }

    /// Computes the weighted mean score of a candidate.
    fn score(
        &self,
        target: &VariationTarget,
        saturation: f32,
        luma: f32,
        population: u32,
        max_population: u32,
    ) -> f32 {
        #[allow(clippy::cast_precision_loss)]
        let population = if max_population == 0 {
            0.0
        } else {
            population as f32 / max_population as f32
        };

        weighted_mean(&[
            (target.saturation.closeness(saturation), self.weights.saturation),
            (target.luma.closeness(luma), self.weights.luma),
            (population, self.weights.population),
        ])
    }

    /// Fills in a missing vibrant swatch from the dark vibrant swatch, and vice versa.
    fn fill_vibrant_pair(&self, variations: &mut Variations) {
        let pairs = [
            (Variation::Vibrant, Variation::DarkVibrant),
            (Variation::DarkVibrant, Variation::Vibrant),
        ];

        for (missing, source) in pairs {
            if !variations.selection(missing).is_missing() {
                continue;
            }

            if let Some(&swatch) = variations.get(source) {
                let luma = self.target_of(missing).luma.target;
                let synthesized = with_luma(&swatch, luma);
                debug!("synthesized {missing} swatch {synthesized} from {source}");
                variations.0[missing.index()] = Selection::Synthesized(synthesized);
            }
        }
    }
}

/// Returns a swatch with the hue and saturation of `swatch`,
/// the given HSV value, and no population.
fn with_luma(swatch: &Swatch, luma: f32) -> Swatch {
    let mut hsv = swatch.hsv();
    hsv.value = luma;
    Swatch::new(Srgb::from_color(hsv).into_format(), 0)
}

/// Computes the mean of values with the given weights.
fn weighted_mean(values: &[(f32, f32)]) -> f32 {
    let (sum, weights) = values
        .iter()
        .fold((0.0, 0.0), |(sum, weights), &(value, weight)| {
            (sum + value * weight, weights + weight)
        });
    sum / weights
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIBRANT: Srgb<u8> = Srgb::new(128, 20, 20);
    const LIGHT_VIBRANT: Srgb<u8> = Srgb::new(240, 60, 60);
    const DARK_VIBRANT: Srgb<u8> = Srgb::new(60, 10, 10);
    const MUTED: Srgb<u8> = Srgb::new(128, 100, 100);
    const LIGHT_MUTED: Srgb<u8> = Srgb::new(230, 200, 200);
    const DARK_MUTED: Srgb<u8> = Srgb::new(60, 50, 50);

    fn swatches(colors: &[Srgb<u8>]) -> Vec<Swatch> {
        colors.iter().map(|&c| Swatch::new(c, 10)).collect()
    }

    #[test]
    fn empty_input() {
        let variations = VariationSelector::new().select(&[]);
        assert_eq!(variations, Variations::default());
        assert!(variations.iter().all(|(_, s)| s.is_missing()));
    }

    #[test]
    fn finds_each_variation() {
        let swatches = swatches(&[
            DARK_MUTED,
            LIGHT_MUTED,
            MUTED,
            DARK_VIBRANT,
            LIGHT_VIBRANT,
            VIBRANT,
        ]);
        let variations = VariationSelector::new().select(&swatches);

        let expected = [
            (Variation::Vibrant, VIBRANT),
            (Variation::LightVibrant, LIGHT_VIBRANT),
            (Variation::DarkVibrant, DARK_VIBRANT),
            (Variation::Muted, MUTED),
            (Variation::LightMuted, LIGHT_MUTED),
            (Variation::DarkMuted, DARK_MUTED),
        ];

        for (variation, color) in expected {
            assert_eq!(
                variations.selection(variation),
                &Selection::Found(Swatch::new(color, 10)),
                "{variation:?}"
            );
        }
    }

    #[test]
    fn claimed_swatch_is_not_reused() {
        // fits both vibrant and light vibrant
        let swatches = swatches(&[Srgb::new(153, 15, 15)]);
        let variations = VariationSelector::new().select(&swatches);
        assert_eq!(variations.vibrant(), Some(&swatches[0]));
        assert!(variations.light_vibrant().is_none());
    }

    #[test]
    fn equal_swatches_count_as_claimed() {
        let swatches = swatches(&[Srgb::new(153, 15, 15), Srgb::new(153, 15, 15)]);
        let variations = VariationSelector::new().select(&swatches);
        assert_eq!(variations.vibrant(), Some(&swatches[0]));
        assert!(variations.light_vibrant().is_none());
    }

    #[test]
    fn window_edges_are_inclusive() {
        // saturation is exactly 0.35, the vibrant minimum
        let edge = Swatch::new(Srgb::new(160, 104, 104), 5);
        let variations = VariationSelector::new().select(&[edge]);
        assert_eq!(variations.vibrant(), Some(&edge));

        // saturation is exactly 0.4, the muted maximum
        let vibrant = Swatch::new(VIBRANT, 5);
        let edge = Swatch::new(Srgb::new(120, 72, 72), 5);
        let variations = VariationSelector::new().select(&[vibrant, edge]);
        assert_eq!(variations.vibrant(), Some(&vibrant));
        assert_eq!(variations.muted(), Some(&edge));
    }

    #[test]
    fn ties_keep_first() {
        let red = Srgb::new(128, 20, 20);
        let green = Srgb::new(20, 128, 20);

        let variations = VariationSelector::new().select(&swatches(&[red, green]));
        assert_eq!(variations.vibrant().map(Swatch::color), Some(red));

        let variations = VariationSelector::new().select(&swatches(&[green, red]));
        assert_eq!(variations.vibrant().map(Swatch::color), Some(green));
    }

    #[test]
    fn population_breaks_near_ties() {
        let small = Swatch::new(Srgb::new(128, 20, 20), 1);
        let large = Swatch::new(Srgb::new(20, 128, 20), 100);
        let variations = VariationSelector::new().select(&[small, large]);
        assert_eq!(variations.vibrant(), Some(&large));
    }

    #[test]
    fn synthesizes_vibrant_from_dark_vibrant() {
        let swatches = swatches(&[DARK_VIBRANT]);
        let variations = VariationSelector::new().select(&swatches);

        assert_eq!(variations.selection(Variation::DarkVibrant), &Selection::Found(swatches[0]));

        let Selection::Synthesized(vibrant) = *variations.selection(Variation::Vibrant) else {
            panic!("vibrant was not synthesized");
        };
        assert_eq!(vibrant.population(), 0);

        let source = swatches[0].hsv();
        let hsv = vibrant.hsv();
        assert!((hsv.hue.into_positive_degrees() - source.hue.into_positive_degrees()).abs() < 2.0);
        assert!((hsv.saturation - source.saturation).abs() < 0.02);
        assert!((hsv.value - 0.5).abs() < 0.01);
    }

    #[test]
    fn synthesizes_dark_vibrant_from_vibrant() {
        let swatches = swatches(&[VIBRANT]);
        let variations = VariationSelector::new().select(&swatches);

        assert_eq!(variations.vibrant(), Some(&swatches[0]));

        let Selection::Synthesized(dark) = *variations.selection(Variation::DarkVibrant) else {
            panic!("dark vibrant was not synthesized");
        };
        assert_eq!(dark.population(), 0);
        assert!((dark.hsv().value - 0.26).abs() < 0.01);
        assert!((dark.hsv().saturation - swatches[0].hsv().saturation).abs() < 0.02);
    }

    #[test]
    fn muted_and_light_are_not_synthesized() {
        let swatches = swatches(&[DARK_MUTED, LIGHT_VIBRANT]);
        let variations = VariationSelector::new().select(&swatches);
        assert!(variations.muted().is_none());
        assert!(variations.light_muted().is_none());
        assert!(variations.vibrant().is_none());
        assert!(variations.dark_vibrant().is_none());
    }

    #[test]
    fn custom_target() {
        let selector = VariationSelector::new().target(
            Variation::Vibrant,
            VariationTarget::new(LIGHT_LUMA, VIBRANT_SATURATION),
        );
        let swatches = swatches(&[LIGHT_VIBRANT]);
        let variations = selector.select(&swatches);
        assert_eq!(variations.vibrant(), Some(&swatches[0]));
        assert!(variations.light_vibrant().is_none());
    }

    #[test]
    fn weighted_mean_of_scores() {
        let mean = weighted_mean(&[(1.0, 3.0), (0.5, 6.0), (0.0, 1.0)]);
        assert!((mean - 0.6).abs() < 1e-6);
    }
}
