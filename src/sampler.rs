use crate::error::PaletteError;
use image::imageops::FilterType;
use log::debug;

/// An immutable RGBA8 pixel buffer produced by [`sample`].
///
/// The channel data is flat and row-major, four bytes per pixel, so
/// `data.len() == width * height * 4` always holds.
#[derive(Debug, Clone)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw channel data, RGBA interleaved.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Iterate over the buffer's pixels as `(r, g, b, a)` tuples in
    /// row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = (u8, u8, u8, u8)> + '_ {
        self.data
            .chunks_exact(4)
            .map(|px| (px[0], px[1], px[2], px[3]))
    }
}

/// Decode `bytes` into a [`PixelBuffer`], optionally bounding its size.
///
/// When `max_dimension` is given and the image's larger side exceeds it,
/// the image is scaled down so that side equals `max_dimension`, keeping
/// the aspect ratio. Sampling every pixel of a large photo is wasteful for
/// palette purposes; a bounded working size keeps extraction near-constant
/// time while preserving color diversity.
///
/// Fails with [`PaletteError::EmptyInput`] for an empty slice and
/// [`PaletteError::UnsupportedFormat`] when the bytes are not a decodable
/// raster image.
pub fn sample(bytes: &[u8], max_dimension: Option<u32>) -> Result<PixelBuffer, PaletteError> {
    if bytes.is_empty() {
        return Err(PaletteError::EmptyInput);
    }

    let decoded = image::load_from_memory(bytes).map_err(PaletteError::UnsupportedFormat)?;
    let mut rgba = decoded.to_rgba8();

    let (width, height) = rgba.dimensions();
    if let Some(bound) = max_dimension {
        let larger = width.max(height);
        if bound > 0 && larger > bound {
            let ratio = bound as f32 / larger as f32;
            let new_width = ((width as f32 * ratio).round() as u32).max(1);
            let new_height = ((height as f32 * ratio).round() as u32).max(1);

            debug!("downscaling {width}x{height} to {new_width}x{new_height} for sampling");
            rgba = image::imageops::resize(&rgba, new_width, new_height, FilterType::Nearest);
        }
    }

    let (width, height) = rgba.dimensions();
    Ok(PixelBuffer {
        width,
        height,
        data: rgba.into_raw(),
    })
}
