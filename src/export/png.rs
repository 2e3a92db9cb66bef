//! PNG export: solid swatches on a transparent canvas.

use image::{ImageBuffer, ImageFormat, Rgba, RgbaImage};
use std::io::Cursor;

use crate::error::{HueError, Result};
use crate::export::{ensure_exportable, span, ExportConfig};
use crate::grid::PaletteGrid;

/// Largest canvas edge we are willing to allocate.
const MAX_DIMENSION: u64 = 16_384;

fn dimension(name: &str, value: u64) -> Result<u32> {
    if value == 0 || value > MAX_DIMENSION {
        return Err(HueError::InvalidParameter {
            param: name.to_string(),
            message: format!(
                "image {} must be between 1 and {} pixels, got {}",
                name, MAX_DIMENSION, value
            ),
        });
    }
    Ok(value as u32)
}

/// Rasterize `grid`. Gaps between cells stay fully transparent.
pub fn render_image(grid: &PaletteGrid, config: &ExportConfig) -> Result<RgbaImage> {
    ensure_exportable(grid)?;

    let cell = config.png_cell_size;
    let gap = config.svg_gap;
    let width = dimension("width", span(grid.column_count(), cell, gap))?;
    let height = dimension("height", span(grid.row_count(), cell, gap))?;

    let mut img: RgbaImage = ImageBuffer::new(width, height);
    for (row, column, color) in grid.iter_cells() {
        let [r, g, b] = color.bytes();
        let x0 = column as u32 * (cell + gap);
        let y0 = row as u32 * (cell + gap);
        for y in y0..y0 + cell {
            for x in x0..x0 + cell {
                img.put_pixel(x, y, Rgba([r, g, b, 255]));
            }
        }
    }

    Ok(img)
}

/// Render `grid` and encode it as PNG bytes.
pub fn render_png(grid: &PaletteGrid, config: &ExportConfig) -> Result<Vec<u8>> {
    let img = render_image(grid, config)?;
    let mut buffer = Cursor::new(Vec::new());
    img.write_to(&mut buffer, ImageFormat::Png)?;
    Ok(buffer.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;

    fn config() -> ExportConfig {
        ExportConfig {
            png_cell_size: 4,
            svg_gap: 1,
            ..ExportConfig::default()
        }
    }

    fn grid() -> PaletteGrid {
        let red: Color = "#ff0000".parse().unwrap();
        let blue: Color = "#0000ff".parse().unwrap();
        PaletteGrid::from_rows(vec![vec![red, blue]]).unwrap()
    }

    #[test]
    fn test_pixels_and_gap() {
        let img = render_image(&grid(), &config()).unwrap();
        assert_eq!(img.dimensions(), (9, 4));
        assert_eq!(*img.get_pixel(0, 0), Rgba([255, 0, 0, 255]));
        assert_eq!(*img.get_pixel(3, 3), Rgba([255, 0, 0, 255]));
        assert_eq!(img.get_pixel(4, 2)[3], 0);
        assert_eq!(*img.get_pixel(8, 0), Rgba([0, 0, 255, 255]));
    }

    #[test]
    fn test_png_signature() {
        let bytes = render_png(&grid(), &config()).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn test_zero_cell_size_rejected() {
        let config = ExportConfig {
            png_cell_size: 0,
            svg_gap: 0,
            ..ExportConfig::default()
        };
        assert!(render_image(&grid(), &config).is_err());
        assert!(matches!(
            render_png(&PaletteGrid::empty(), &ExportConfig::default()),
            Err(HueError::EmptyPalette)
        ));
    }
}
