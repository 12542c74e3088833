use crate::{
    codec::{ColorCode, Contrast},
    error::PaletteError,
};
use image::{ImageFormat, Rgba, RgbaImage};
use log::debug;
use std::io::Cursor;

const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);
const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Glyph dimensions of the embedded bitmap font, before scaling.
const GLYPH_WIDTH: u32 = 5;
const GLYPH_HEIGHT: u32 = 7;

/// Configuration of the exported swatch grid.
///
/// The column count is fixed rather than derived from the palette size; the
/// grid grows downward row by row. Defaults match the original download
/// grid: 120 px boxes, 20 px padding, 5 columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridSpec {
    pub box_size: u32,
    pub padding: u32,
    pub columns: u32,
}

impl Default for GridSpec {
    fn default() -> Self {
        Self {
            box_size: 120,
            padding: 20,
            columns: 5,
        }
    }
}

/// Row-major placement derived from a [`GridSpec`] and a color count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridGeometry {
    pub columns: u32,
    pub rows: u32,
    pub width: u32,
    pub height: u32,
}

impl GridSpec {
    /// Compute the grid geometry for `count` swatches: `ceil(count /
    /// columns)` rows, with padding around every box including the outer
    /// edge.
    pub fn layout(&self, count: usize) -> GridGeometry {
        let columns = self.columns.max(1);
        let rows = (count as u32).div_ceil(columns);

        GridGeometry {
            columns,
            rows,
            width: columns * (self.box_size + self.padding) + self.padding,
            height: rows * (self.box_size + self.padding) + self.padding,
        }
    }

    fn cell_origin(&self, index: usize) -> (u32, u32) {
        let columns = self.columns.max(1);
        let column = index as u32 % columns;
        let row = index as u32 / columns;

        (
            column * (self.box_size + self.padding) + self.padding,
            row * (self.box_size + self.padding) + self.padding,
        )
    }
}

/// Render a palette as a labeled swatch grid.
///
/// Each color fills a solid box with its own code drawn centered on top;
/// per [`ColorCode::contrast`], light backgrounds get dark text and dark
/// backgrounds get light text, outlined in the opposite extreme so the
/// label stays legible either way. Canvas area outside the boxes is fully
/// transparent.
///
/// An empty palette is rejected with [`PaletteError::EmptyPalette`] rather
/// than producing a degenerate raster.
pub fn render(colors: &[ColorCode], spec: &GridSpec) -> Result<RgbaImage, PaletteError> {
    if colors.is_empty() {
        return Err(PaletteError::EmptyPalette);
    }

    let geometry = spec.layout(colors.len());
    debug!(
        "rendering {} swatches onto a {}x{} grid ({} columns, {} rows)",
        colors.len(),
        geometry.width,
        geometry.height,
        geometry.columns,
        geometry.rows
    );

    let mut canvas = RgbaImage::from_pixel(geometry.width, geometry.height, TRANSPARENT);

    for (index, &color) in colors.iter().enumerate() {
        let (box_x, box_y) = spec.cell_origin(index);
        let (r, g, b) = color.rgb();
        fill_box(&mut canvas, box_x, box_y, spec.box_size, Rgba([r, g, b, 255]));

        let (text, outline) = match color.contrast() {
            Contrast::Light => (BLACK, WHITE),
            Contrast::Dark => (WHITE, BLACK),
        };
        draw_label(
            &mut canvas,
            &color.to_string(),
            box_x,
            box_y,
            spec.box_size,
            text,
            outline,
        );
    }

    Ok(canvas)
}

/// Serialize a rendered grid to PNG bytes suitable for direct download.
pub fn export_png(raster: &RgbaImage) -> Result<Vec<u8>, PaletteError> {
    let mut bytes = Vec::new();
    raster
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .map_err(PaletteError::PngEncode)?;

    Ok(bytes)
}

fn fill_box(canvas: &mut RgbaImage, x: u32, y: u32, size: u32, color: Rgba<u8>) {
    for dy in 0..size {
        for dx in 0..size {
            canvas.put_pixel(x + dx, y + dy, color);
        }
    }
}

/// Draw `label` centered in the box at `(box_x, box_y)`, outlined by one
/// pixel on all eight sides.
fn draw_label(
    canvas: &mut RgbaImage,
    label: &str,
    box_x: u32,
    box_y: u32,
    box_size: u32,
    text: Rgba<u8>,
    outline: Rgba<u8>,
) {
    let scale = (box_size / 60).max(1);
    let advance = (GLYPH_WIDTH + 1) * scale;
    let text_width = advance * label.len() as u32 - scale;
    let text_height = GLYPH_HEIGHT * scale;

    // a label wider than its box is skipped rather than clipped mid-glyph
    if text_width > box_size || text_height > box_size {
        return;
    }

    let origin_x = (box_x + (box_size - text_width) / 2) as i64;
    let origin_y = (box_y + (box_size - text_height) / 2) as i64;

    for dy in -1..=1i64 {
        for dx in -1..=1i64 {
            if (dx, dy) != (0, 0) {
                draw_text(canvas, label, origin_x + dx, origin_y + dy, scale, outline);
            }
        }
    }
    draw_text(canvas, label, origin_x, origin_y, scale, text);
}

fn draw_text(canvas: &mut RgbaImage, text: &str, x: i64, y: i64, scale: u32, color: Rgba<u8>) {
    let advance = ((GLYPH_WIDTH + 1) * scale) as i64;

    for (position, byte) in text.bytes().enumerate() {
        if let Some(rows) = glyph(byte) {
            draw_glyph(canvas, rows, x + position as i64 * advance, y, scale, color);
        }
    }
}

fn draw_glyph(
    canvas: &mut RgbaImage,
    rows: &[u8; GLYPH_HEIGHT as usize],
    x: i64,
    y: i64,
    scale: u32,
    color: Rgba<u8>,
) {
    for (row, bits) in rows.iter().enumerate() {
        for column in 0..GLYPH_WIDTH {
            if bits & (1 << (GLYPH_WIDTH - 1 - column)) == 0 {
                continue;
            }

            for sy in 0..scale as i64 {
                for sx in 0..scale as i64 {
                    let px = x + (column as i64 * scale as i64) + sx;
                    let py = y + (row as i64 * scale as i64) + sy;

                    if px >= 0 && py >= 0 && px < canvas.width() as i64 && py < canvas.height() as i64
                    {
                        canvas.put_pixel(px as u32, py as u32, color);
                    }
                }
            }
        }
    }
}

/// 5x7 bitmaps for the 17 characters a color code can contain.
fn glyph(byte: u8) -> Option<&'static [u8; 7]> {
    const HASH: [u8; 7] = [0b01010, 0b01010, 0b11111, 0b01010, 0b11111, 0b01010, 0b01010];
    const D0: [u8; 7] = [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110];
    const D1: [u8; 7] = [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110];
    const D2: [u8; 7] = [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111];
    const D3: [u8; 7] = [0b11111, 0b00010, 0b00100, 0b00010, 0b00001, 0b10001, 0b01110];
    const D4: [u8; 7] = [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010];
    const D5: [u8; 7] = [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110];
    const D6: [u8; 7] = [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110];
    const D7: [u8; 7] = [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000];
    const D8: [u8; 7] = [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110];
    const D9: [u8; 7] = [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100];
    const A: [u8; 7] = [0b00000, 0b00000, 0b01110, 0b00001, 0b01111, 0b10001, 0b01111];
    const B: [u8; 7] = [0b10000, 0b10000, 0b10110, 0b11001, 0b10001, 0b10001, 0b11110];
    const C: [u8; 7] = [0b00000, 0b00000, 0b01110, 0b10000, 0b10000, 0b10001, 0b01110];
    const D: [u8; 7] = [0b00001, 0b00001, 0b01101, 0b10011, 0b10001, 0b10001, 0b01111];
    const E: [u8; 7] = [0b00000, 0b00000, 0b01110, 0b10001, 0b11111, 0b10000, 0b01110];
    const F: [u8; 7] = [0b00110, 0b01001, 0b01000, 0b11100, 0b01000, 0b01000, 0b01000];

    match byte {
        b'#' => Some(&HASH),
        b'0' => Some(&D0),
        b'1' => Some(&D1),
        b'2' => Some(&D2),
        b'3' => Some(&D3),
        b'4' => Some(&D4),
        b'5' => Some(&D5),
        b'6' => Some(&D6),
        b'7' => Some(&D7),
        b'8' => Some(&D8),
        b'9' => Some(&D9),
        b'a' => Some(&A),
        b'b' => Some(&B),
        b'c' => Some(&C),
        b'd' => Some(&D),
        b'e' => Some(&E),
        b'f' => Some(&F),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_fills_rows_left_to_right() {
        let spec = GridSpec::default();
        let geometry = spec.layout(7);

        assert_eq!(geometry.columns, 5);
        assert_eq!(geometry.rows, 2);
        assert_eq!(geometry.width, 5 * (120 + 20) + 20);
        assert_eq!(geometry.height, 2 * (120 + 20) + 20);
    }

    #[test]
    fn layout_single_row() {
        let geometry = GridSpec::default().layout(3);
        assert_eq!((geometry.columns, geometry.rows), (5, 1));
    }

    #[test]
    fn empty_palette_is_rejected() {
        assert!(matches!(
            render(&[], &GridSpec::default()),
            Err(PaletteError::EmptyPalette)
        ));
    }

    #[test]
    fn boxes_are_filled_with_their_color() {
        let spec = GridSpec {
            box_size: 40,
            padding: 4,
            columns: 2,
        };
        let colors = [ColorCode::new(255, 0, 0), ColorCode::new(0, 0, 255)];
        let canvas = render(&colors, &spec).unwrap();

        // top-left corner of each box is outside the label area
        assert_eq!(canvas.get_pixel(4, 4), &Rgba([255, 0, 0, 255]));
        assert_eq!(canvas.get_pixel(4 + 40 + 4, 4), &Rgba([0, 0, 255, 255]));
    }

    #[test]
    fn unused_canvas_is_transparent() {
        let canvas = render(&[ColorCode::new(1, 2, 3)], &GridSpec::default()).unwrap();

        assert_eq!(canvas.get_pixel(0, 0), &Rgba([0, 0, 0, 0]));
        // second cell of the first row holds no swatch
        assert_eq!(canvas.get_pixel(20 + 120 + 20 + 1, 21), &Rgba([0, 0, 0, 0]));
    }

    #[test]
    fn labels_are_drawn_over_the_fill() {
        let spec = GridSpec::default();
        let colors = [ColorCode::new(255, 255, 255)];
        let canvas = render(&colors, &spec).unwrap();

        // a white box with a dark label must contain black pixels
        let has_text = canvas.pixels().any(|px| px == &Rgba([0, 0, 0, 255]));
        assert!(has_text);
    }

    #[test]
    fn png_export_produces_a_png_stream() {
        let canvas = render(&[ColorCode::new(10, 20, 30)], &GridSpec::default()).unwrap();
        let bytes = export_png(&canvas).unwrap();

        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }
}
