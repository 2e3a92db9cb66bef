//! Paginated print layout.
//!
//! The grid is tiled across landscape A4 pages in blocks of rows and
//! columns, each block scaled to fill the usable page area with square
//! cells and centered on its page. The result is a plain description of
//! what to draw; turning it into PDF bytes is left to the consumer.

use serde::Serialize;

use crate::color::Color;
use crate::error::Result;
use crate::export::{ensure_exportable, ExportConfig};
use crate::grid::PaletteGrid;

/// Landscape A4 in points.
pub const PAGE_WIDTH: f64 = 841.89;
pub const PAGE_HEIGHT: f64 = 595.28;

const FOOTER_FONT_SIZE: f64 = 8.0;
const FOOTER_COLOR: Color = Color::from_bytes(0x88, 0x88, 0x88);
const MIN_LABEL_FONT: f64 = 4.0;
const MAX_LABEL_FONT: f64 = 8.0;

/// A centered line of text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PdfText {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub font_size: f64,
    pub color: Color,
}

/// One filled square.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PdfCell {
    pub row: usize,
    pub column: usize,
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub fill: Color,
    /// Uppercase hex, only on cells large enough to read it
    pub label: Option<PdfText>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PdfPage {
    pub number: usize,
    pub cell_size: f64,
    pub cells: Vec<PdfCell>,
    pub footer: PdfText,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PdfLayout {
    pub page_width: f64,
    pub page_height: f64,
    pub pages: Vec<PdfPage>,
}

/// How many cells of `min_cell` fit in `usable`, at least one.
fn cells_per_page(usable: f64, min_cell: f64, gap: f64) -> usize {
    (((usable + gap) / (min_cell + gap)).floor() as usize).max(1)
}

/// Lay `grid` out on as many pages as it needs.
pub fn pdf_layout(grid: &PaletteGrid, config: &ExportConfig) -> Result<PdfLayout> {
    ensure_exportable(grid)?;

    let margin = config.pdf_margin;
    let gap = config.pdf_gap;
    let min_cell = config.pdf_min_cell_size;
    let usable_width = PAGE_WIDTH - 2.0 * margin;
    let usable_height = PAGE_HEIGHT - 2.0 * margin;

    let rows = grid.row_count();
    let columns = grid.column_count();
    let rows_per_page = cells_per_page(usable_height, min_cell, gap);
    let columns_per_page = cells_per_page(usable_width, min_cell, gap);

    let mut pages = Vec::new();
    for start_row in (0..rows).step_by(rows_per_page) {
        for start_column in (0..columns).step_by(columns_per_page) {
            let end_row = (start_row + rows_per_page).min(rows);
            let end_column = (start_column + columns_per_page).min(columns);
            let page_rows = (end_row - start_row) as f64;
            let page_columns = (end_column - start_column) as f64;

            let cell_width = (usable_width - (page_columns - 1.0) * gap) / page_columns;
            let cell_height = (usable_height - (page_rows - 1.0) * gap) / page_rows;
            let cell_size = cell_width.min(cell_height).max(1.0);

            let grid_width = page_columns * cell_size + (page_columns - 1.0) * gap;
            let grid_height = page_rows * cell_size + (page_rows - 1.0) * gap;
            let origin_x = margin + ((usable_width - grid_width) / 2.0).max(0.0);
            let origin_y = margin + ((usable_height - grid_height) / 2.0).max(0.0);
            let font_size = (cell_size * 0.15).clamp(MIN_LABEL_FONT, MAX_LABEL_FONT);

            let mut cells = Vec::with_capacity((end_row - start_row) * (end_column - start_column));
            for row in start_row..end_row {
                for column in start_column..end_column {
                    let Some(fill) = grid.get(row, column) else {
                        continue;
                    };
                    let x = origin_x + (column - start_column) as f64 * (cell_size + gap);
                    let y = origin_y + (row - start_row) as f64 * (cell_size + gap);
                    let label = (cell_size >= min_cell).then(|| PdfText {
                        text: fill.to_upper_hex(),
                        x: x + cell_size / 2.0,
                        y: y + cell_size / 2.0,
                        font_size,
                        color: fill.contrast_text(),
                    });

                    cells.push(PdfCell {
                        row,
                        column,
                        x,
                        y,
                        size: cell_size,
                        fill,
                        label,
                    });
                }
            }

            let number = pages.len() + 1;
            pages.push(PdfPage {
                number,
                cell_size,
                cells,
                footer: PdfText {
                    text: format!("Page {}", number),
                    x: PAGE_WIDTH / 2.0,
                    y: PAGE_HEIGHT - margin / 2.0,
                    font_size: FOOTER_FONT_SIZE,
                    color: FOOTER_COLOR,
                },
            });
        }
    }

    Ok(PdfLayout {
        page_width: PAGE_WIDTH,
        page_height: PAGE_HEIGHT,
        pages,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{BLACK, WHITE};

    fn uniform(rows: usize, columns: usize, color: Color) -> PaletteGrid {
        PaletteGrid::from_rows(vec![vec![color; columns]; rows]).unwrap()
    }

    #[test]
    fn test_single_row_fits_one_page() {
        let layout = pdf_layout(&uniform(1, 7, WHITE), &ExportConfig::default()).unwrap();
        assert_eq!(layout.pages.len(), 1);

        let page = &layout.pages[0];
        assert_eq!(page.cells.len(), 7);
        // 7 columns across 761.89pt minus six 2pt gaps
        assert!((page.cell_size - 749.89 / 7.0).abs() < 1e-9);
        assert_eq!(page.footer.text, "Page 1");
        assert!((page.footer.y - (PAGE_HEIGHT - 20.0)).abs() < 1e-9);
    }

    #[test]
    fn test_grid_is_centered() {
        let layout = pdf_layout(&uniform(1, 7, WHITE), &ExportConfig::default()).unwrap();
        let page = &layout.pages[0];
        let first = &page.cells[0];
        let last = &page.cells[6];
        assert!((first.x - 40.0).abs() < 1e-9);
        assert!((last.x + last.size - (PAGE_WIDTH - 40.0)).abs() < 1e-6);

        let top_space = first.y;
        let bottom_space = PAGE_HEIGHT - (first.y + first.size);
        assert!((top_space - bottom_space).abs() < 1e-6);
    }

    #[test]
    fn test_labels_use_contrast_color() {
        let layout = pdf_layout(&uniform(2, 2, BLACK), &ExportConfig::default()).unwrap();
        let label = layout.pages[0].cells[0].label.clone().unwrap();
        assert_eq!(label.text, "#000000");
        assert_eq!(label.color, WHITE);
        assert_eq!(label.font_size, 8.0);

        let yellow = Color::from_bytes(0xff, 0xeb, 0x3b);
        let layout = pdf_layout(&uniform(1, 1, yellow), &ExportConfig::default()).unwrap();
        let label = layout.pages[0].cells[0].label.clone().unwrap();
        assert_eq!(label.text, "#FFEB3B");
        assert_eq!(label.color, BLACK);
    }

    #[test]
    fn test_large_grid_paginates_row_blocks_first() {
        // 25 rows and 38 columns fit on a default page
        let layout = pdf_layout(&uniform(30, 40, WHITE), &ExportConfig::default()).unwrap();
        let numbers: Vec<usize> = layout.pages.iter().map(|p| p.number).collect();
        assert_eq!(numbers, [1, 2, 3, 4]);

        let sizes: Vec<usize> = layout.pages.iter().map(|p| p.cells.len()).collect();
        assert_eq!(sizes, [25 * 38, 25 * 2, 5 * 38, 5 * 2]);
        assert_eq!(layout.pages[1].cells[0].column, 38);
        assert_eq!(layout.pages[2].cells[0].row, 25);

        let total: usize = sizes.iter().sum();
        assert_eq!(total, 30 * 40);
    }

    #[test]
    fn test_small_cells_have_no_label() {
        let config = ExportConfig {
            pdf_min_cell_size: 600.0,
            ..ExportConfig::default()
        };
        // a 600pt cell does not fit the page height, so cells shrink
        let layout = pdf_layout(&uniform(1, 1, WHITE), &config).unwrap();
        assert!(layout.pages[0].cell_size < 600.0);
        assert!(layout.pages[0].cells[0].label.is_none());
    }

    #[test]
    fn test_serializes_colors_as_hex() {
        let layout = pdf_layout(&uniform(1, 1, BLACK), &ExportConfig::default()).unwrap();
        let json = serde_json::to_value(&layout).unwrap();
        assert_eq!(json["pages"][0]["cells"][0]["fill"], "#000000");
        assert_eq!(json["pages"][0]["footer"]["color"], "#888888");
    }
}
