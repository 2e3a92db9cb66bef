//! Exporters for finished palettes.
//!
//! Exporters are plain consumers of a [`PaletteGrid`]: they never blend
//! colors themselves and reject an empty grid with
//! [`HueError::EmptyPalette`].

pub mod pdf;
pub mod png;
pub mod svg;

use serde::{Deserialize, Serialize};

use crate::error::{HueError, Result};
use crate::grid::PaletteGrid;

pub use pdf::{pdf_layout, PdfCell, PdfLayout, PdfPage, PdfText};
pub use png::{render_image, render_png};
pub use svg::render_svg;

/// Geometry shared by the exporters, in pixels (SVG/PNG) or points (PDF).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportConfig {
    #[serde(default = "default_svg_cell_size")]
    pub svg_cell_size: u32,

    #[serde(default = "default_svg_gap")]
    pub svg_gap: u32,

    #[serde(default = "default_pdf_margin")]
    pub pdf_margin: f64,

    /// Cells smaller than this get no hex label
    #[serde(default = "default_pdf_min_cell_size")]
    pub pdf_min_cell_size: f64,

    #[serde(default = "default_pdf_gap")]
    pub pdf_gap: f64,

    /// PNG cells use the SVG gap
    #[serde(default = "default_png_cell_size")]
    pub png_cell_size: u32,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            svg_cell_size: default_svg_cell_size(),
            svg_gap: default_svg_gap(),
            pdf_margin: default_pdf_margin(),
            pdf_min_cell_size: default_pdf_min_cell_size(),
            pdf_gap: default_pdf_gap(),
            png_cell_size: default_png_cell_size(),
        }
    }
}

fn default_svg_cell_size() -> u32 {
    40
}

fn default_svg_gap() -> u32 {
    3
}

fn default_pdf_margin() -> f64 {
    40.0
}

fn default_pdf_min_cell_size() -> f64 {
    18.0
}

fn default_pdf_gap() -> f64 {
    2.0
}

fn default_png_cell_size() -> u32 {
    40
}

/// Total length of `count` cells separated by `gap`.
pub(crate) fn span(count: usize, cell: u32, gap: u32) -> u64 {
    let count = count as u64;
    count * u64::from(cell) + count.saturating_sub(1) * u64::from(gap)
}

pub(crate) fn ensure_exportable(grid: &PaletteGrid) -> Result<()> {
    if grid.is_empty() || !grid.is_valid() {
        return Err(HueError::EmptyPalette);
    }
    Ok(())
}
