//! Median cut color quantization.
//!
//! Starting from a single box around every distinct color in the histogram,
//! this repeatedly takes the box with the largest volume and splits it along its
//! longest channel at the population median, until the requested number of boxes
//! is reached or no box can be split. Each final box becomes one [`Swatch`] with the
//! population-weighted average color of the box.
//!
//! The boxes do not own any colors. They are index ranges into a single color array
//! that is reordered in place as boxes are split, and the ranges of the live boxes
//! always partition that array.

use crate::{Channel, ColorHistogram, PaletteSize, QuantizedColor, Swatch};
use log::{debug, trace};
use std::{cmp::Ordering, collections::BinaryHeap, ops::Range};

/// The channels in the order used to break ties between equally long channels.
const CHANNELS: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];

/// A box tightly fitted around a contiguous range of the color array.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Vbox {
    /// The range of indices into the color array.
    range: Range<usize>,
    /// The minimum quantized value of each channel.
    min: [u8; 3],
    /// The maximum quantized value of each channel.
    max: [u8; 3],
    /// The total number of pixels of the colors in this box.
    population: u32,
}

impl Vbox {
    /// Creates a box over `range` and computes its bounds and population.
    fn fit(colors: &[QuantizedColor], hist: &ColorHistogram, range: Range<usize>) -> Self {
        debug_assert!(!range.is_empty());

        let mut min = [u8::MAX; 3];
        let mut max = [u8::MIN; 3];
        let mut population = 0;

        for &color in &colors[range.clone()] {
            population += hist.count(color);
            for (i, channel) in CHANNELS.into_iter().enumerate() {
                let v = color.channel(channel);
                min[i] = min[i].min(v);
                max[i] = max[i].max(v);
            }
        }

        Self { range, min, max, population }
    }

    /// The number of distinct colors in this box.
    fn color_count(&self) -> usize {
        self.range.len()
    }

    /// Whether this box has more than one color.
    fn can_split(&self) -> bool {
        self.color_count() > 1
    }

    /// The product of the extents of each channel.
    fn volume(&self) -> u32 {
        (0..3)
            .map(|i| u32::from(self.max[i] - self.min[i]) + 1)
            .product()
    }

    /// The channel with the greatest extent.
    ///
    /// Red wins ties against green and blue, and green wins a tie against blue.
    fn longest_channel(&self) -> Channel {
        let [r, g, b] = [0, 1, 2].map(|i| self.max[i] - self.min[i]);
        if r >= g && r >= b {
            Channel::Red
        } else if g >= b {
            Channel::Green
        } else {
            Channel::Blue
        }
    }
}

/// A box in the split queue.
///
/// Larger volumes come first, and boxes with equal volume come out in the order they were pushed.
struct QueuedBox {
    /// The box.
    vbox: Vbox,
    /// The volume of the box when it was pushed.
    volume: u32,
    /// The push order.
    order: u32,
}

impl PartialOrd for QueuedBox {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueuedBox {
    fn cmp(&self, other: &Self) -> Ordering {
        self.volume
            .cmp(&other.volume)
            .then_with(|| other.order.cmp(&self.order))
    }
}

impl Eq for QueuedBox {}

impl PartialEq for QueuedBox {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

/// The state of a median cut run.
struct MedianCut<'a> {
    /// The histogram of colors and counts.
    hist: &'a ColorHistogram,
    /// The distinct colors, reordered as boxes are split.
    colors: Vec<QuantizedColor>,
    /// The live boxes.
    queue: BinaryHeap<QueuedBox>,
    /// The number of boxes pushed so far.
    pushed: u32,
}

impl<'a> MedianCut<'a> {
    /// Creates a new [`MedianCut`] with a single box spanning every color in `hist`.
    fn new(hist: &'a ColorHistogram) -> Self {
        let colors = hist.colors().to_vec();
        let mut data = Self {
            hist,
            queue: BinaryHeap::new(),
            pushed: 0,
            colors,
        };

        if !data.colors.is_empty() {
            let vbox = Vbox::fit(&data.colors, hist, 0..data.colors.len());
            data.push(vbox);
        }

        data
    }

    /// Adds a box to the queue.
    fn push(&mut self, vbox: Vbox) {
        let volume = vbox.volume();
        self.queue.push(QueuedBox { vbox, volume, order: self.pushed });
        self.pushed += 1;
    }

    /// Pops the largest box and splits it in two.
    ///
    /// Returns the volume of the split box,
    /// or `None` if the largest box cannot be split (it is put back).
    fn split_largest(&mut self) -> Option<u32> {
        let QueuedBox { mut vbox, volume, order } = self.queue.pop()?;

        if !vbox.can_split() {
            self.queue.push(QueuedBox { vbox, volume, order });
            return None;
        }

        let channel = vbox.longest_channel();
        let new_box = self.split(&mut vbox, channel);

        trace!(
            "split box of volume {volume} along {channel:?} into {:?} and {:?}",
            vbox.range,
            new_box.range
        );

        self.push(new_box);
        self.push(vbox);

        Some(volume)
    }

    /// Splits `vbox` along `channel` at the population median.
    ///
    /// `vbox` keeps the lower half and the upper half is returned.
    fn split(&mut self, vbox: &mut Vbox, channel: Channel) -> Vbox {
        let split_point = self.find_split_point(vbox, channel);
        let new_box = Vbox::fit(&self.colors, self.hist, (split_point + 1)..vbox.range.end);
        *vbox = Vbox::fit(&self.colors, self.hist, vbox.range.start..(split_point + 1));
        new_box
    }

    /// Sorts the colors of `vbox` by `channel` and returns the index of the last color in the lower half.
    ///
    /// The lower half is the shortest prefix holding at least half of the population,
    /// but always leaves at least one color for the upper half.
    fn find_split_point(&mut self, vbox: &Vbox, channel: Channel) -> usize {
        let range = vbox.range.clone();

        // the keys are distinct, so stability does not matter
        self.colors[range.clone()].sort_unstable_by_key(|color| color.with_major_channel(channel));

        let midpoint = vbox.population / 2;
        let last = range.end - 2;
        let mut count = 0;
        for i in range.clone() {
            count += self.hist.count(self.colors[i]);
            if count >= midpoint {
                return i.min(last);
            }
        }

        range.start
    }

    /// Returns the swatch for the population weighted average color of `vbox`.
    fn average_color(&self, vbox: &Vbox) -> Swatch {
        let mut sums = [0u64; 3];
        let mut total = 0u64;

        for &color in &self.colors[vbox.range.clone()] {
            let n = u64::from(self.hist.count(color));
            total += n;
            for (sum, channel) in sums.iter_mut().zip(CHANNELS) {
                *sum += n * u64::from(color.channel(channel));
            }
        }

        debug_assert!(total > 0);

        // round half up
        #[allow(clippy::cast_possible_truncation)]
        let [r, g, b] = sums.map(|sum| ((2 * sum + total) / (2 * total)) as u8);

        #[allow(clippy::cast_possible_truncation)]
        Swatch::new(
            QuantizedColor::from_components(r, g, b).to_rgb888(),
            total as u32,
        )
    }

    /// Splits boxes until there are `k` boxes or no box can be split,
    /// and returns the final boxes from largest to smallest volume.
    fn boxes(&mut self, k: usize) -> Vec<Vbox> {
        while !self.queue.is_empty() && self.queue.len() < k {
            if self.split_largest().is_none() {
                debug!("stopped with {} boxes, no box can be split", self.queue.len());
                break;
            }
        }

        std::mem::take(&mut self.queue)
            .into_sorted_vec()
            .into_iter()
            .rev()
            .map(|queued| queued.vbox)
            .collect()
    }

    /// Computes one swatch per box after splitting down to at most `k` boxes.
    fn palette(mut self, k: usize) -> Vec<Swatch> {
        let boxes = self.boxes(k);
        boxes.iter().map(|vbox| self.average_color(vbox)).collect()
    }
}

/// Computes at most `palette_size` swatches from the colors in `hist`.
///
/// If `hist` has no more distinct colors than `palette_size`,
/// each color becomes its own swatch in first-seen order without any quantization.
/// Otherwise, median cut is used and the swatches are ordered by decreasing box volume.
///
/// The populations of the returned swatches sum to [`ColorHistogram::total_count`].
/// An empty `Vec` is returned if `palette_size` is `0` or `hist` is empty.
#[must_use]
pub fn palette(hist: &ColorHistogram, palette_size: PaletteSize) -> Vec<Swatch> {
    let k = palette_size.as_usize();

    if k == 0 || hist.is_empty() {
        Vec::new()
    } else if hist.len() <= k {
        debug!("{} distinct colors is within {k}, skipping quantization", hist.len());
        hist.iter()
            .map(|(color, count)| Swatch::new(color.to_rgb888(), count))
            .collect()
    } else {
        debug!("quantizing {} distinct colors down to {k}", hist.len());
        MedianCut::new(hist).palette(k)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::tests::*;
    use palette::Srgb;

    fn histogram_of(colors: &[(Srgb<u8>, usize)]) -> ColorHistogram {
        ColorHistogram::from_colors(
            colors
                .iter()
                .flat_map(|&(color, n)| std::iter::repeat(color).take(n)),
        )
    }

    fn assert_partition(data: &MedianCut, boxes: &[Vbox]) {
        let mut ranges = boxes.iter().map(|b| b.range.clone()).collect::<Vec<_>>();
        ranges.sort_by_key(|r| r.start);
        assert_eq!(ranges.first().unwrap().start, 0);
        assert_eq!(ranges.last().unwrap().end, data.colors.len());
        for pair in ranges.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
        }

        for vbox in boxes {
            assert!(!vbox.range.is_empty());
            let population = data.colors[vbox.range.clone()]
                .iter()
                .map(|&c| data.hist.count(c))
                .sum::<u32>();
            assert_eq!(vbox.population, population);
        }
    }

    #[test]
    fn empty_input() {
        let hist = ColorHistogram::default();
        assert!(palette(&hist, PaletteSize::MAX).is_empty());
    }

    #[test]
    fn zero_palette_size() {
        let hist = ColorHistogram::from_colors(test_data_256());
        assert!(palette(&hist, 0.into()).is_empty());
    }

    #[test]
    fn uniform_image() {
        let color = Srgb::new(64, 128, 192);
        let hist = histogram_of(&[(color, 500)]);
        let swatches = palette(&hist, PaletteSize::DEFAULT);
        assert_eq!(swatches, vec![Swatch::new(color, 500)]);
    }

    #[test]
    fn not_enough_colors() {
        let colors = [
            (Srgb::new(250, 0, 0), 3),
            (Srgb::new(0, 250, 0), 1),
            (Srgb::new(0, 0, 250), 2),
        ];
        let hist = histogram_of(&colors);
        let swatches = palette(&hist, 3.into());
        let expected = colors
            .iter()
            .map(|&(c, n)| Swatch::new(QuantizedColor::from_rgb888(c).to_rgb888(), n as u32))
            .collect::<Vec<_>>();
        assert_eq!(swatches, expected);
    }

    #[test]
    fn single_box_is_weighted_average() {
        let a = Srgb::new(200, 40, 40);
        let b = Srgb::new(40, 40, 200);
        let hist = histogram_of(&[(a, 70), (b, 30)]);

        let swatches = palette(&hist, 1.into());
        assert_eq!(swatches.len(), 1);
        assert_eq!(swatches[0].population(), 100);

        let (r, g, bl) = swatches[0].color().into_components();
        let error = 7.0;
        assert!((f64::from(r) - (0.7 * 200.0 + 0.3 * 40.0)).abs() <= error);
        assert!((f64::from(g) - 40.0).abs() <= error);
        assert!((f64::from(bl) - (0.7 * 40.0 + 0.3 * 200.0)).abs() <= error);
    }

    #[test]
    fn populations_sum_to_total() {
        let hist = ColorHistogram::from_colors(test_data_1024());
        for k in [1u8, 2, 5, 16, 64, 255] {
            let swatches = palette(&hist, k.into());
            assert!(swatches.len() <= usize::from(k));
            assert_eq!(
                swatches.iter().map(Swatch::population).sum::<u32>(),
                hist.total_count()
            );
        }
    }

    #[test]
    fn reaches_requested_count() {
        let hist = ColorHistogram::from_colors(test_data_1024());
        assert!(hist.len() > 64);
        assert_eq!(palette(&hist, 64.into()).len(), 64);
    }

    #[test]
    fn boxes_partition_colors() {
        let hist = ColorHistogram::from_colors(test_data_1024());
        let mut data = MedianCut::new(&hist);
        let boxes = data.boxes(40);
        assert_eq!(boxes.len(), 40);
        assert_partition(&data, &boxes);

        let volumes = boxes.iter().map(Vbox::volume).collect::<Vec<_>>();
        assert!(volumes.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn popped_volumes_do_not_increase() {
        let hist = ColorHistogram::from_colors(test_data_1024());
        let mut data = MedianCut::new(&hist);

        let mut popped = Vec::new();
        while data.queue.len() < 100 {
            popped.push(data.split_largest().unwrap());
        }

        assert!(popped.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn stops_when_nothing_can_split() {
        let hist = histogram_of(&[(Srgb::new(0, 0, 0), 1), (Srgb::new(255, 255, 255), 1)]);
        let mut data = MedianCut::new(&hist);
        assert!(data.split_largest().is_some());
        assert!(data.split_largest().is_none());
        assert!(data.split_largest().is_none());
        assert_eq!(data.queue.len(), 2);

        let boxes = data.boxes(10);
        assert_eq!(boxes.len(), 2);
        assert_partition(&data, &boxes);
    }

    #[test]
    fn splits_where_running_population_reaches_half() {
        let hist = histogram_of(&[
            (Srgb::new(24, 0, 0), 1),
            (Srgb::new(0, 0, 0), 1),
            (Srgb::new(16, 0, 0), 1),
            (Srgb::new(8, 0, 0), 1),
        ]);
        let mut data = MedianCut::new(&hist);
        let boxes = data.boxes(2);

        let mut ranges = boxes.iter().map(|b| b.range.clone()).collect::<Vec<_>>();
        ranges.sort_by_key(|r| r.start);
        assert_eq!(ranges, vec![0..2, 2..4]);

        let reds = data.colors.iter().map(|c| c.red()).collect::<Vec<_>>();
        assert_eq!(reds, vec![0, 1, 2, 3]);
    }

    #[test]
    fn average_rounds_half_up() {
        // quantized reds 1 and 2 average to 1.5
        let hist = histogram_of(&[(Srgb::new(8, 0, 0), 3), (Srgb::new(16, 0, 0), 3)]);
        let swatches = palette(&hist, 1.into());
        assert_eq!(swatches, vec![Swatch::new(Srgb::new(16, 0, 0), 6)]);
    }

    #[test]
    fn split_leaves_both_halves_non_empty() {
        // all of the population is in the last color along red
        let hist = histogram_of(&[(Srgb::new(0, 0, 0), 1), (Srgb::new(255, 0, 0), 50)]);
        let mut data = MedianCut::new(&hist);
        let boxes = data.boxes(2);
        assert_eq!(boxes.len(), 2);
        assert_partition(&data, &boxes);
    }

    #[test]
    fn longest_channel_tie_breaks() {
        let vbox = |max: [u8; 3]| Vbox { range: 0..2, min: [0; 3], max, population: 2 };
        assert_eq!(vbox([4, 4, 4]).longest_channel(), Channel::Red);
        assert_eq!(vbox([3, 4, 4]).longest_channel(), Channel::Green);
        assert_eq!(vbox([3, 4, 5]).longest_channel(), Channel::Blue);
        assert_eq!(vbox([5, 1, 5]).longest_channel(), Channel::Red);
        assert_eq!(vbox([5, 1, 1]).volume(), 6 * 2 * 2);
    }

    #[test]
    fn split_sorts_by_longest_channel() {
        let hist = histogram_of(&[
            (Srgb::new(0, 200, 8), 1),
            (Srgb::new(8, 0, 0), 1),
            (Srgb::new(0, 100, 16), 1),
            (Srgb::new(8, 50, 0), 1),
        ]);
        let mut data = MedianCut::new(&hist);
        assert!(data.split_largest().is_some());

        let greens = data.colors.iter().map(|c| c.green()).collect::<Vec<_>>();
        let mut sorted = greens.clone();
        sorted.sort_unstable();
        assert_eq!(greens, sorted);
    }
}
