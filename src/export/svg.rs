//! SVG export: one rounded `<rect>` per cell on a white background.

use crate::error::Result;
use crate::export::{ensure_exportable, span, ExportConfig};
use crate::grid::PaletteGrid;

const CORNER_RADIUS: u32 = 4;

/// Render `grid` as a standalone SVG document.
pub fn render_svg(grid: &PaletteGrid, config: &ExportConfig) -> Result<String> {
    ensure_exportable(grid)?;

    let cell = config.svg_cell_size;
    let gap = config.svg_gap;
    let width = span(grid.column_count(), cell, gap);
    let height = span(grid.row_count(), cell, gap);

    let mut svg = format!(
        "<svg width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\" \
         xmlns=\"http://www.w3.org/2000/svg\">\n"
    );
    svg.push_str("  <rect width=\"100%\" height=\"100%\" fill=\"#ffffff\"/>\n");

    for (row, column, color) in grid.iter_cells() {
        let x = column as u64 * u64::from(cell + gap);
        let y = row as u64 * u64::from(cell + gap);
        svg.push_str(&format!(
            "  <rect x=\"{x}\" y=\"{y}\" width=\"{cell}\" height=\"{cell}\" fill=\"{color}\" \
             rx=\"{CORNER_RADIUS}\" ry=\"{CORNER_RADIUS}\"/>\n"
        ));
    }

    svg.push_str("</svg>\n");
    Ok(svg)
}
