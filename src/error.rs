use thiserror::Error;

/// Errors reported by the palette pipeline.
///
/// Every variant is recoverable at the caller's boundary; none of the
/// library functions panic on bad input.
#[derive(Debug, Error)]
pub enum PaletteError {
    #[error("no image data was supplied")]
    EmptyInput,

    #[error("input bytes could not be decoded as an image")]
    UnsupportedFormat(#[source] image::ImageError),

    #[error("color count must be a positive integer, got {0}")]
    InvalidCount(usize),

    #[error("cannot render an empty palette")]
    EmptyPalette,

    #[error("malformed color code {0:?}, expected '#' followed by 6 hex digits")]
    InvalidFormat(String),

    #[error("failed to encode the palette raster as PNG")]
    PngEncode(#[source] image::ImageError),
}
