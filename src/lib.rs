//! A library for extracting a small palette of representative colors ("swatches") from an image
//! and picking the swatches that best fit a set of named variations for theming UI around it.
//!
//! Colors are first reduced to 5 bits per channel and counted into a histogram.
//! The histogram is then quantized with the median cut algorithm into at most
//! a given number of swatches. Each swatch carries its population and a white or black
//! text color (with minimum alpha) that is readable on top of it.
//! Finally, a swatch is selected for each of the six variations:
//! vibrant, light vibrant, dark vibrant, muted, light muted, and dark muted.
//!
//! # Features
//! - `image`: enables integration with the [`image`] crate (on by default).
//!
//! # High-Level API
//! To get started, see [`PalettePipeline`]:
//! ```no_run
//! # use swatchette::PalettePipeline;
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let img = image::open("some image")?.into_rgba8();
//!
//! let palette = PalettePipeline::new(&img)
//!     .palette_size(24.into()) // set the max number of swatches
//!     .resize_max_dimension(Some(256)) // scale the image down before quantization
//!     .palette()?;
//!
//! for swatch in palette.swatches() {
//!     println!("{swatch}");
//! }
//!
//! if let Some(vibrant) = palette.vibrant_swatch() {
//!     println!("vibrant: {vibrant}, title text: {:?}", vibrant.title_text_color());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Low-Level API
//! The individual steps are also exposed:
//! build a [`ColorHistogram`], quantize it with [`median_cut::palette`],
//! and pick variations with a [`VariationSelector`].
//! The WCAG contrast helpers used for text colors are in [`contrast`].

#![deny(unsafe_code, unsafe_op_in_unsafe_fn)]
#![warn(
    clippy::pedantic,
    clippy::cargo,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::todo,
    clippy::unimplemented,
    clippy::unwrap_used,
    clippy::unwrap_in_result,
    clippy::expect_used,
    clippy::unneeded_field_pattern,
    clippy::rest_pat_in_fully_bound_structs,
    clippy::unnecessary_self_imports,
    clippy::str_to_string,
    clippy::string_to_string,
    clippy::string_slice,
    missing_docs,
    clippy::missing_docs_in_private_items,
    rustdoc::all,
    clippy::float_cmp_const,
    clippy::lossy_float_literal
)]
#![allow(
    clippy::doc_markdown,
    clippy::module_name_repetitions,
    clippy::many_single_char_names,
    clippy::missing_panics_doc,
    clippy::unreadable_literal,
    clippy::wildcard_imports
)]

mod api;
mod histogram;
mod quantized;
mod swatch;
mod types;
mod variation;

pub mod contrast;
pub mod median_cut;

pub use api::*;
pub use histogram::ColorHistogram;
pub use quantized::{Channel, QuantizedColor, QUANTIZE_WORD_WIDTH};
pub use swatch::Swatch;
pub use types::*;
pub use variation::*;

/// The maximum supported image size in number of pixels is `u32::MAX`.
pub const MAX_PIXELS: u32 = u32::MAX;

/// The maximum supported number of swatches is `256`.
pub const MAX_COLORS: u16 = u8::MAX as u16 + 1;

/// The default maximum width or height that [`PalettePipeline`] scales images down to.
pub const DEFAULT_RESIZE_MAX_DIMENSION: u32 = 192;
