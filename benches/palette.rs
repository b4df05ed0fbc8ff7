#[path = "../util/util.rs"]
mod util;

use util::synthetic_images;

use std::time::Duration;

use criterion::{
    criterion_group, criterion_main, measurement::WallTime, Bencher, BenchmarkId, Criterion,
    SamplingMode,
};
use image::RgbaImage;
use swatchette::{median_cut, ColorHistogram, PalettePipeline, PaletteSize, VariationSelector};

fn bench<Input>(
    c: &mut Criterion,
    group: &str,
    inputs: &[(String, Input)],
    mut f: impl FnMut(&mut Bencher<WallTime>, &(PaletteSize, &Input)),
) {
    let mut group = c.benchmark_group(group);
    group
        .sample_size(30)
        .noise_threshold(0.05)
        .sampling_mode(SamplingMode::Flat)
        .warm_up_time(Duration::from_millis(500));

    for (k, secs) in [(16.into(), 2), (64.into(), 3), (PaletteSize::MAX, 4)] {
        group.measurement_time(Duration::from_secs(secs));
        for (path, input) in inputs {
            group.bench_with_input(BenchmarkId::new(k.to_string(), path), &(k, input), &mut f);
        }
    }
}

fn to_histograms(images: &[(String, RgbaImage)]) -> Vec<(String, ColorHistogram)> {
    images
        .iter()
        .map(|(path, image)| (path.clone(), ColorHistogram::new(image).unwrap()))
        .collect()
}

fn histogram(c: &mut Criterion) {
    let mut group = c.benchmark_group("histogram");
    group.sample_size(30).noise_threshold(0.05);
    for (path, image) in synthetic_images() {
        group.bench_with_input(BenchmarkId::from_parameter(path), image, |b, image| {
            b.iter(|| ColorHistogram::new(image).unwrap())
        });
    }
}

fn median_cut_palette(c: &mut Criterion) {
    let hists = to_histograms(synthetic_images());
    bench(c, "median_cut_palette", &hists, |b, &(k, hist)| {
        b.iter(|| median_cut::palette(hist, k))
    })
}

fn variations(c: &mut Criterion) {
    let hists = to_histograms(synthetic_images());
    let selector = VariationSelector::new();
    bench(c, "variations", &hists, |b, &(k, hist)| {
        let swatches = median_cut::palette(hist, k);
        b.iter(|| selector.select(&swatches))
    })
}

fn pipeline(c: &mut Criterion) {
    bench(c, "pipeline", synthetic_images(), |b, &(k, image)| {
        b.iter(|| PalettePipeline::new(image).palette_size(k).palette().unwrap())
    })
}

fn pipeline_full_size(c: &mut Criterion) {
    bench(c, "pipeline_full_size", synthetic_images(), |b, &(k, image)| {
        b.iter(|| {
            PalettePipeline::new(image)
                .palette_size(k)
                .resize_max_dimension(None)
                .palette()
                .unwrap()
        })
    })
}

criterion_group!(
    benches,
    histogram,
    median_cut_palette,
    variations,
    pipeline,
    pipeline_full_size,
);
criterion_main!(benches);
