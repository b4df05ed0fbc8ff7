#![deny(unsafe_code, unsafe_op_in_unsafe_fn)]
#![warn(
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::todo,
    clippy::unimplemented,
    clippy::unneeded_field_pattern,
    clippy::rest_pat_in_fully_bound_structs,
    clippy::unnecessary_self_imports,
    clippy::str_to_string,
    clippy::string_to_string,
    clippy::string_slice
)]

use std::path::PathBuf;

use clap::Parser;
use palette::Srgba;
use swatchette::{PalettePipeline, PaletteSize, Selection, Swatch};

#[derive(Parser)]
pub struct Options {
    /// The maximum number of swatches.
    #[arg(short, long, default_value_t = PaletteSize::default(), value_parser = parse_palette_size)]
    k: PaletteSize,

    /// Scale the image down so neither side is larger than this (0 to use the full image).
    #[arg(long, default_value_t = swatchette::DEFAULT_RESIZE_MAX_DIMENSION)]
    max_dimension: u32,

    #[arg(long)]
    verbose: bool,

    input: PathBuf,
}

fn parse_palette_size(s: &str) -> Result<PaletteSize, String> {
    let value: u16 = s.parse().map_err(|e| format!("{e}"))?;
    value.try_into().map_err(|e| format!("{e}"))
}

fn text_color(color: Option<Srgba<u8>>) -> String {
    match color {
        Some(c) => format!("#{:02x}{:02x}{:02x}{:02x}", c.red, c.green, c.blue, c.alpha),
        None => "none".to_owned(),
    }
}

fn print_swatch(swatch: &Swatch) {
    println!(
        "{swatch} title: {} body: {}",
        text_color(swatch.title_text_color()),
        text_color(swatch.body_text_color()),
    );
}

fn main() {
    let Options { k, max_dimension, verbose, input } = Options::parse();

    macro_rules! log {
        ($name: literal, $val: expr) => {
            if verbose {
                let time = std::time::Instant::now();
                let value = $val;
                println!("{} took {}ms", $name, time.elapsed().as_millis());
                value
            } else {
                $val
            }
        };
    }

    let image = log!("read image", image::open(input).unwrap());

    let max_dimension = (max_dimension > 0).then_some(max_dimension);
    let pipeline = PalettePipeline::from_image(&image)
        .unwrap()
        .palette_size(k)
        .resize_max_dimension(max_dimension);

    let palette = log!("palette", pipeline.palette().unwrap());

    println!("swatches:");
    for swatch in palette.swatches() {
        print_swatch(swatch);
    }

    println!();
    println!("variations:");
    for (variation, selection) in palette.variations().iter() {
        print!("{variation}: ");
        match selection {
            Selection::Found(swatch) => print_swatch(swatch),
            Selection::Synthesized(swatch) => {
                print!("(synthesized) ");
                print_swatch(swatch);
            }
            Selection::Missing => println!("none"),
        }
    }
}
