//! Reduced bit-width color keys used to bucket near-identical colors together.

use palette::Srgb;

/// The number of bits kept per channel in a [`QuantizedColor`].
pub const QUANTIZE_WORD_WIDTH: u32 = 5;

/// Mask for a single channel field of a [`QuantizedColor`].
const WORD_MASK: u16 = (1 << QUANTIZE_WORD_WIDTH) - 1;

/// The number of bits dropped from each 8-bit channel.
const SHIFT: u32 = u8::BITS - QUANTIZE_WORD_WIDTH;

/// The number of distinct [`QuantizedColor`] keys.
pub(crate) const NUM_KEYS: usize = 1 << (3 * QUANTIZE_WORD_WIDTH);

/// A color channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// The red channel.
    Red,
    /// The green channel.
    Green,
    /// The blue channel.
    Blue,
}

/// An RGB color reduced to [`QUANTIZE_WORD_WIDTH`] bits per channel
/// and packed as `red << 2W | green << W | blue`.
///
/// Converting a color to a [`QuantizedColor`] and back is lossy:
/// each channel may change by up to `2^(8 - W) - 1`.
///
/// # Examples
/// ```
/// # use swatchette::QuantizedColor;
/// # use palette::Srgb;
/// let key = QuantizedColor::from_rgb888(Srgb::new(255, 130, 7));
/// assert_eq!(key.to_rgb888(), Srgb::new(248, 128, 0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct QuantizedColor(u16);

impl QuantizedColor {
    /// Packs already quantized channel values (each less than `2^W`).
    #[must_use]
    pub const fn from_components(red: u8, green: u8, blue: u8) -> Self {
        let (r, g, b) = (red as u16 & WORD_MASK, green as u16 & WORD_MASK, blue as u16 & WORD_MASK);
        Self(r << (2 * QUANTIZE_WORD_WIDTH) | g << QUANTIZE_WORD_WIDTH | b)
    }

    /// Quantizes an 8-bit color by truncating the low bits of each channel.
    #[must_use]
    pub fn from_rgb888(color: Srgb<u8>) -> Self {
        let (r, g, b) = color.into_components();
        Self::from_components(r >> SHIFT, g >> SHIFT, b >> SHIFT)
    }

    /// Expands back to an approximate 8-bit color.
    ///
    /// The dropped low bits are left as zero.
    #[must_use]
    pub fn to_rgb888(self) -> Srgb<u8> {
        Srgb::new(
            self.red() << SHIFT,
            self.green() << SHIFT,
            self.blue() << SHIFT,
        )
    }

    /// The quantized red value.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn red(self) -> u8 {
        ((self.0 >> (2 * QUANTIZE_WORD_WIDTH)) & WORD_MASK) as u8
    }

    /// The quantized green value.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn green(self) -> u8 {
        ((self.0 >> QUANTIZE_WORD_WIDTH) & WORD_MASK) as u8
    }

    /// The quantized blue value.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn blue(self) -> u8 {
        (self.0 & WORD_MASK) as u8
    }

    /// The quantized value of the given channel.
    #[must_use]
    pub const fn channel(self, channel: Channel) -> u8 {
        match channel {
            Channel::Red => self.red(),
            Channel::Green => self.green(),
            Channel::Blue => self.blue(),
        }
    }

    /// Returns a packed key where `channel` occupies the most significant field.
    ///
    /// Sorting by this key orders colors by `channel` first.
    /// Green swaps with red (GRB) and blue swaps with red (BGR).
    #[must_use]
    pub const fn with_major_channel(self, channel: Channel) -> u16 {
        let (r, g, b) = (self.red(), self.green(), self.blue());
        match channel {
            Channel::Red => self.0,
            Channel::Green => Self::from_components(g, r, b).0,
            Channel::Blue => Self::from_components(b, g, r).0,
        }
    }

    /// The packed key.
    #[must_use]
    pub const fn into_inner(self) -> u16 {
        self.0
    }

    /// The packed key as an index into a dense table of [`NUM_KEYS`] entries.
    pub(crate) const fn index(self) -> usize {
        self.0 as usize
    }
}

impl From<Srgb<u8>> for QuantizedColor {
    fn from(color: Srgb<u8>) -> Self {
        Self::from_rgb888(color)
    }
}

impl From<QuantizedColor> for Srgb<u8> {
    fn from(color: QuantizedColor) -> Self {
        color.to_rgb888()
    }
}
