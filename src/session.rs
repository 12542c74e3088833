use crate::{
    codec::ColorCode,
    error::PaletteError,
    extract::{extract_ranked, select_palette, ExtractionMode, Swatch},
    render::{export_png, render, GridSpec},
    sampler::{sample, PixelBuffer},
    DEFAULT_MAX_SAMPLE_DIMENSION,
};
use log::debug;

/// State of one palette-extraction session: the current image, the colors
/// found in it, and the palette last selected from them.
///
/// Every user action replaces the state it touches wholesale; nothing is
/// merged across actions. A new upload discards the previous buffer and
/// inventory, a new extraction discards the previous palette.
#[derive(Debug, Default)]
pub struct Session {
    image: Option<PixelBuffer>,
    inventory: Vec<Swatch>,
    palette: Vec<ColorCode>,
}

impl Session {
    pub fn new() -> Session {
        Session::default()
    }

    /// Sample an uploaded image, replacing any previously loaded one, and
    /// build the frequency-ranked color inventory for it. Returns the
    /// number of distinct colors found.
    ///
    /// Sampling is bounded at [`DEFAULT_MAX_SAMPLE_DIMENSION`] on the
    /// larger side; use [`Session::load_image_with_bound`] to override.
    pub fn load_image(&mut self, bytes: &[u8]) -> Result<usize, PaletteError> {
        self.load_image_with_bound(bytes, Some(DEFAULT_MAX_SAMPLE_DIMENSION))
    }

    pub fn load_image_with_bound(
        &mut self,
        bytes: &[u8],
        max_dimension: Option<u32>,
    ) -> Result<usize, PaletteError> {
        let buffer = sample(bytes, max_dimension)?;
        let inventory = extract_ranked(&buffer);
        debug!("loaded image with {} distinct colors", inventory.len());

        self.image = Some(buffer);
        self.inventory = inventory;
        self.palette.clear();

        Ok(self.inventory.len())
    }

    /// Select a palette from the loaded image per `mode`, replacing the
    /// previous palette. Fails with [`PaletteError::EmptyInput`] when no
    /// image has been loaded.
    pub fn extract(&mut self, mode: ExtractionMode) -> Result<&[ColorCode], PaletteError> {
        if self.image.is_none() {
            return Err(PaletteError::EmptyInput);
        }

        let ranked: Vec<ColorCode> = self.inventory.iter().map(Swatch::code).collect();
        self.palette = select_palette(&ranked, mode)?;

        Ok(&self.palette)
    }

    /// The palette currently selected, in rank order. Empty until
    /// [`Session::extract`] has run.
    pub fn palette(&self) -> &[ColorCode] {
        &self.palette
    }

    /// The full ranked color inventory of the loaded image.
    pub fn inventory(&self) -> &[Swatch] {
        &self.inventory
    }

    pub fn has_image(&self) -> bool {
        self.image.is_some()
    }

    /// Render the current palette and serialize it to PNG bytes. Fails with
    /// [`PaletteError::EmptyPalette`] when no palette has been extracted.
    pub fn export_palette(&self, spec: &GridSpec) -> Result<Vec<u8>, PaletteError> {
        let raster = render(&self.palette, spec)?;
        export_png(&raster)
    }

    /// Clear the extracted palette but keep the loaded image and its
    /// inventory, so a new extraction can run without re-uploading.
    pub fn reset(&mut self) {
        self.palette.clear();
    }

    /// Drop all state, including the loaded image.
    pub fn clear(&mut self) {
        *self = Session::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;

    fn two_color_png() -> Vec<u8> {
        let mut image = RgbaImage::from_pixel(2, 2, Rgba([255, 0, 0, 255]));
        image.put_pixel(1, 1, Rgba([0, 0, 255, 255]));

        let mut bytes = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn extract_without_an_image_fails() {
        let mut session = Session::new();
        assert!(matches!(
            session.extract(ExtractionMode::All),
            Err(PaletteError::EmptyInput)
        ));
    }

    #[test]
    fn load_reports_distinct_color_count() {
        let mut session = Session::new();
        let found = session.load_image(&two_color_png()).unwrap();
        assert_eq!(found, 2);
        assert!(session.has_image());
    }

    #[test]
    fn new_upload_replaces_the_palette() {
        let mut session = Session::new();
        session.load_image(&two_color_png()).unwrap();
        session.extract(ExtractionMode::All).unwrap();
        assert!(!session.palette().is_empty());

        session.load_image(&two_color_png()).unwrap();
        assert!(session.palette().is_empty());
    }

    #[test]
    fn reset_keeps_the_image() {
        let mut session = Session::new();
        session.load_image(&two_color_png()).unwrap();
        session.extract(ExtractionMode::Partial(1)).unwrap();

        session.reset();
        assert!(session.palette().is_empty());
        assert!(session.has_image());

        // extraction still works against the retained inventory
        assert_eq!(session.extract(ExtractionMode::All).unwrap().len(), 2);
    }

    #[test]
    fn clear_drops_everything() {
        let mut session = Session::new();
        session.load_image(&two_color_png()).unwrap();

        session.clear();
        assert!(!session.has_image());
        assert!(session.inventory().is_empty());
    }

    #[test]
    fn export_without_a_palette_fails() {
        let mut session = Session::new();
        session.load_image(&two_color_png()).unwrap();

        assert!(matches!(
            session.export_palette(&GridSpec::default()),
            Err(PaletteError::EmptyPalette)
        ));
    }
}
