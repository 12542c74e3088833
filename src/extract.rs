use crate::{codec::ColorCode, error::PaletteError, sampler::PixelBuffer, MAX_PALETTE_COLORS};
use log::debug;
use std::{
    cmp::Reverse,
    collections::{HashMap, HashSet},
};

/// A distinct color found in a sampled image, together with how many
/// pixels carried it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Swatch {
    code: ColorCode,
    population: u32,
}

impl Swatch {
    pub fn new(code: ColorCode, population: u32) -> Swatch {
        Self { code, population }
    }

    pub fn code(&self) -> ColorCode {
        self.code
    }

    pub fn population(&self) -> u32 {
        self.population
    }
}

/// How many colors the extracted palette should keep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExtractionMode {
    /// Every color found, capped at [`MAX_PALETTE_COLORS`].
    All,
    /// The first `n` colors of the sequence. Counts larger than the
    /// sequence clamp to its length; zero is rejected with
    /// [`PaletteError::InvalidCount`].
    Partial(usize),
}

/// Collect the buffer's distinct color codes in first-seen order,
/// collapsing duplicates. Alpha is ignored.
pub fn extract_distinct(buffer: &PixelBuffer) -> Vec<ColorCode> {
    let mut seen = HashSet::new();
    let mut distinct = Vec::new();

    for (r, g, b, _) in buffer.pixels() {
        let code = ColorCode::new(r, g, b);
        if seen.insert(code) {
            distinct.push(code);
        }
    }

    debug!(
        "found {} distinct colors in {} pixels",
        distinct.len(),
        buffer.width() as u64 * buffer.height() as u64
    );

    distinct
}

/// Build a frequency table over the buffer in one pass and return its
/// swatches ordered by descending population.
///
/// The sort is stable and the pre-sort order is first-seen order, so two
/// colors with equal populations keep the order in which they first
/// appeared in the image. That tie-break is part of the contract, not an
/// implementation accident.
pub fn extract_ranked(buffer: &PixelBuffer) -> Vec<Swatch> {
    let mut index: HashMap<ColorCode, usize> = HashMap::new();
    let mut swatches: Vec<Swatch> = Vec::new();

    for (r, g, b, _) in buffer.pixels() {
        let code = ColorCode::new(r, g, b);
        match index.get(&code) {
            Some(&at) => swatches[at].population += 1,
            None => {
                index.insert(code, swatches.len());
                swatches.push(Swatch::new(code, 1));
            }
        }
    }

    swatches.sort_by_key(|swatch| Reverse(swatch.population));
    swatches
}

/// Take the palette the given mode asks for from the front of an already
/// ordered color sequence.
pub fn select_palette(
    colors: &[ColorCode],
    mode: ExtractionMode,
) -> Result<Vec<ColorCode>, PaletteError> {
    let take = match mode {
        ExtractionMode::All => MAX_PALETTE_COLORS,
        ExtractionMode::Partial(0) => return Err(PaletteError::InvalidCount(0)),
        ExtractionMode::Partial(n) => n,
    };

    Ok(colors.iter().copied().take(take).collect())
}
