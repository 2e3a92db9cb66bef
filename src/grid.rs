//! Palette grid construction.
//!
//! A palette is a horizontal gradient between the left and right colors.
//! With vertical mode on, every column additionally gets two independent
//! gradients that meet at the unmodified base color in the center row: the
//! top color fades into the base above it, and the base fades into the
//! bottom color below it.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::color::{Color, INVALID_MARKER};
use crate::diagnostics::Diagnostic;
use crate::error::{HueError, Result};
use crate::interpolation::{Blend, InterpolationMethod, Registry};

/// A palette generation request.
///
/// Corner colors are kept as the raw strings the caller supplied. Malformed
/// ones are not a settings error: the cells derived from them become the
/// marker color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaletteSettings {
    pub left: String,
    pub right: String,
    pub top: Option<String>,
    pub bottom: Option<String>,
    pub horizontal_levels: usize,
    pub vertical_steps: usize,
    pub method: InterpolationMethod,
    pub vertical_enabled: bool,
}

impl Default for PaletteSettings {
    fn default() -> Self {
        Self {
            left: "#9c27b0".to_string(),
            right: "#2196f3".to_string(),
            top: Some("#ffffff".to_string()),
            bottom: Some("#000000".to_string()),
            horizontal_levels: 7,
            vertical_steps: 2,
            method: InterpolationMethod::Lab,
            vertical_enabled: false,
        }
    }
}

fn is_missing(color: Option<&str>) -> bool {
    color.map_or(true, |c| c.trim().is_empty())
}

fn invalid(param: &str, message: &str) -> HueError {
    HueError::InvalidParameter {
        param: param.to_string(),
        message: message.to_string(),
    }
}

impl PaletteSettings {
    /// Check the structural requirements a grid needs.
    pub fn validate(&self) -> Result<()> {
        if self.horizontal_levels < 1 {
            return Err(invalid("horizontal_levels", "must be at least 1"));
        }
        if is_missing(Some(self.left.as_str())) {
            return Err(invalid("left", "color is required"));
        }
        if is_missing(Some(self.right.as_str())) {
            return Err(invalid("right", "color is required"));
        }

        if self.vertical_enabled {
            if self.vertical_steps < 1 {
                return Err(invalid("vertical_steps", "must be at least 1 in vertical mode"));
            }
            if is_missing(self.top.as_deref()) {
                return Err(invalid("top", "color is required in vertical mode"));
            }
            if is_missing(self.bottom.as_deref()) {
                return Err(invalid("bottom", "color is required in vertical mode"));
            }
        }
        Ok(())
    }

    /// Number of rows a valid build produces.
    pub fn row_count(&self) -> usize {
        if self.vertical_enabled {
            2 * self.vertical_steps + 1
        } else {
            1
        }
    }
}

/// A rectangular grid of colors, serialized as nested arrays of hex strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaletteGrid {
    rows: Vec<Vec<Color>>,
}

impl PaletteGrid {
    /// The grid with zero rows, returned for invalid settings.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Wrap existing rows, rejecting ragged input.
    pub fn from_rows(rows: Vec<Vec<Color>>) -> Result<Self> {
        let grid = Self { rows };
        if grid.is_valid() {
            Ok(grid)
        } else {
            Err(invalid("rows", "all rows must have the same length"))
        }
    }

    pub fn rows(&self) -> &[Vec<Color>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() || self.column_count() == 0
    }

    /// Every row has the same length.
    pub fn is_valid(&self) -> bool {
        let columns = self.column_count();
        self.rows.iter().all(|row| row.len() == columns)
    }

    pub fn get(&self, row: usize, column: usize) -> Option<Color> {
        self.rows.get(row).and_then(|r| r.get(column)).copied()
    }

    /// `(row, column, color)` in row-major order.
    pub fn iter_cells(&self) -> impl Iterator<Item = (usize, usize, Color)> + '_ {
        self.rows.iter().enumerate().flat_map(|(i, row)| {
            row.iter().enumerate().map(move |(j, color)| (i, j, *color))
        })
    }

    pub fn to_hex_rows(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|row| row.iter().map(Color::to_string).collect())
            .collect()
    }
}

fn decode_corner(registry: &Registry, hex: Option<&str>) -> Option<Color> {
    let hex = hex?;
    match hex.parse::<Color>() {
        Ok(color) => Some(color),
        Err(_) => {
            registry.diagnostics().record(Diagnostic::InvalidColor {
                input: hex.to_string(),
            });
            None
        }
    }
}

fn sample_or_marker(
    blend: &Blend,
    from: Option<Color>,
    to: Option<Color>,
    ts: &[f64],
) -> Vec<Color> {
    match (from, to) {
        (Some(from), Some(to)) => {
            let gradient = blend.gradient(&[from, to]);
            ts.iter().map(|t| gradient.sample(*t)).collect()
        }
        _ => vec![INVALID_MARKER; ts.len()],
    }
}

/// Build the palette grid for `settings`.
///
/// Never fails: invalid settings give an empty grid and an
/// [`Diagnostic::InvalidSettings`] report.
pub fn build(registry: &Registry, settings: &PaletteSettings) -> PaletteGrid {
    if let Err(error) = settings.validate() {
        registry.diagnostics().record(Diagnostic::InvalidSettings {
            reason: error.to_string(),
        });
        return PaletteGrid::empty();
    }

    let blend = registry.resolve(settings.method);
    let levels = settings.horizontal_levels;

    let left = decode_corner(registry, Some(settings.left.as_str()));
    let right = decode_corner(registry, Some(settings.right.as_str()));
    let base_row = match (left, right) {
        (Some(left), Some(right)) => blend.gradient(&[left, right]).colors(levels),
        _ => vec![INVALID_MARKER; levels],
    };

    if !settings.vertical_enabled {
        return PaletteGrid {
            rows: vec![base_row],
        };
    }

    let steps = settings.vertical_steps;
    let mid = steps;
    let top = decode_corner(registry, settings.top.as_deref());
    let bottom = decode_corner(registry, settings.bottom.as_deref());
    // a marker base color is not blended any further
    let base_ok = left.is_some() && right.is_some();

    let upper_ts: Vec<f64> = (0..mid).map(|i| i as f64 / mid as f64).collect();
    let lower_ts: Vec<f64> = (1..=steps).map(|k| k as f64 / steps as f64).collect();

    let mut rows = vec![Vec::with_capacity(levels); settings.row_count()];
    for base in &base_row {
        let base = Some(*base).filter(|_| base_ok);
        let upper = sample_or_marker(&blend, top, base, &upper_ts);
        let lower = sample_or_marker(&blend, base, bottom, &lower_ts);

        for (i, row) in rows.iter_mut().enumerate() {
            let cell = match i.cmp(&mid) {
                Ordering::Less => upper[i],
                Ordering::Equal => base.unwrap_or(INVALID_MARKER),
                Ordering::Greater => lower[i - mid - 1],
            };
            row.push(cell);
        }
    }

    PaletteGrid { rows }
}
