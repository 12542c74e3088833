//! A library to extract a color palette from an image and render it as a
//! labeled swatch grid.
//!
//! The pipeline has four stages: uploaded image bytes are decoded (and
//! optionally downscaled) into a [`PixelBuffer`], the buffer is reduced to
//! a deduplicated or frequency-ranked sequence of [`ColorCode`]s, a
//! palette is selected from that sequence per an [`ExtractionMode`], and
//! the palette is drawn as a grid of labeled swatches exportable as PNG
//! bytes. [`Session`] holds the state between those stages the way an
//! interactive caller needs it; the stage functions themselves are pure
//! and can be used directly.

mod codec;
mod error;
mod extract;
mod render;
mod sampler;
mod session;

/// Default bound on the larger image side during sampling. Large photos are
/// downscaled to roughly this working size before extraction.
pub const DEFAULT_MAX_SAMPLE_DIMENSION: u32 = 100;
/// Hard cap on palette length in [`ExtractionMode::All`].
pub const MAX_PALETTE_COLORS: usize = 256;

pub use crate::{
    codec::{ColorCode, Contrast},
    error::PaletteError,
    extract::{extract_distinct, extract_ranked, select_palette, ExtractionMode, Swatch},
    render::{export_png, render, GridGeometry, GridSpec},
    sampler::{sample, PixelBuffer},
    session::Session,
};
pub use image;

/// One-shot convenience: sample `bytes` with the default size bound and
/// return the frequency-ranked palette the given mode selects.
pub fn extract_palette(bytes: &[u8], mode: ExtractionMode) -> Result<Vec<ColorCode>, PaletteError> {
    let buffer = sample(bytes, Some(DEFAULT_MAX_SAMPLE_DIMENSION))?;
    let ranked: Vec<ColorCode> = extract_ranked(&buffer)
        .into_iter()
        .map(|swatch| swatch.code())
        .collect();

    select_palette(&ranked, mode)
}
