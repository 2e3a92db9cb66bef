//! Palette endpoint handler.
//!
//! Builds a palette grid from query parameters layered over the configured
//! default palette and returns it as nested arrays of hex colors.

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

use crate::color::with_hash;
use crate::diagnostics::Diagnostic;
use crate::error::{HueError, Result};
use crate::grid::{PaletteGrid, PaletteSettings};
use crate::handlers::error_response;
use crate::interpolation::InterpolationMethod;
use crate::logging::{generate_request_id, log_palette_stats};
use crate::state::AppState;

/// Query parameters shared by the palette and export endpoints.
///
/// Colors may be given with or without the leading `#`, which otherwise has
/// to be percent-encoded in a URL.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PaletteQuery {
    pub left: Option<String>,
    pub right: Option<String>,
    pub top: Option<String>,
    pub bottom: Option<String>,
    pub levels: Option<usize>,
    pub steps: Option<usize>,
    pub vertical: Option<bool>,
    pub method: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PaletteResponse {
    pub request_id: String,
    pub requested_method: InterpolationMethod,
    /// Method that actually produced the colors
    pub method: InterpolationMethod,
    pub rows: usize,
    pub columns: usize,
    pub vertical: bool,
    pub palette: PaletteGrid,
}

impl PaletteQuery {
    /// Layer the query over `defaults`, enforcing the server's size limits.
    ///
    /// An unknown method name is not an error: it is reported and the
    /// palette is built with RGB.
    pub fn to_settings(&self, state: &AppState) -> Result<PaletteSettings> {
        let mut settings = state.config.palette.clone();

        if let Some(left) = &self.left {
            settings.left = with_hash(left);
        }
        if let Some(right) = &self.right {
            settings.right = with_hash(right);
        }
        if let Some(top) = &self.top {
            settings.top = Some(with_hash(top));
        }
        if let Some(bottom) = &self.bottom {
            settings.bottom = Some(with_hash(bottom));
        }
        if let Some(vertical) = self.vertical {
            settings.vertical_enabled = vertical;
        }

        if let Some(levels) = self.levels {
            if levels > state.config.server.max_levels {
                return Err(HueError::InvalidParameter {
                    param: "levels".to_string(),
                    message: format!("at most {} allowed", state.config.server.max_levels),
                });
            }
            settings.horizontal_levels = levels;
        }
        if let Some(steps) = self.steps {
            if steps > state.config.server.max_steps {
                return Err(HueError::InvalidParameter {
                    param: "steps".to_string(),
                    message: format!("at most {} allowed", state.config.server.max_steps),
                });
            }
            settings.vertical_steps = steps;
        }

        if let Some(name) = &self.method {
            settings.method = match name.parse::<InterpolationMethod>() {
                Ok(method) => method,
                Err(_) => {
                    state
                        .registry
                        .diagnostics()
                        .record(Diagnostic::UnknownMethod { name: name.clone() });
                    InterpolationMethod::Rgb
                }
            };
        }

        Ok(settings)
    }
}

/// Build the palette a query describes.
///
/// Settings the engine rejects come back as the validation error rather
/// than an empty grid.
pub fn build_palette(
    state: &AppState,
    query: &PaletteQuery,
) -> Result<(PaletteSettings, PaletteGrid)> {
    let settings = query.to_settings(state)?;

    let start = Instant::now();
    let grid = state.build(&settings);
    log_palette_stats(
        settings.method,
        state.registry.effective_method(settings.method),
        grid.row_count(),
        grid.column_count(),
        settings.vertical_enabled,
        start.elapsed(),
    );

    if grid.is_empty() {
        return Err(settings.validate().err().unwrap_or(HueError::EmptyPalette));
    }
    Ok((settings, grid))
}

/// Handle GET /palette requests
pub async fn palette_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PaletteQuery>,
) -> Response {
    let start_time = Instant::now();
    let request_id = generate_request_id();

    debug!(
        request_id = %request_id,
        params = ?query,
        "Processing palette request"
    );

    let (settings, grid) = match build_palette(&state, &query) {
        Ok(built) => built,
        Err(e) => {
            let params = format!("{:?}", query);
            return error_response(&e, "/palette", &request_id, Some(&params));
        }
    };

    info!(
        request_id = %request_id,
        rows = grid.row_count(),
        columns = grid.column_count(),
        duration_ms = start_time.elapsed().as_secs_f64() * 1000.0,
        "Palette request completed"
    );

    Json(PaletteResponse {
        request_id,
        requested_method: settings.method,
        method: state.registry.effective_method(settings.method),
        rows: grid.row_count(),
        columns: grid.column_count(),
        vertical: settings.vertical_enabled,
        palette: grid,
    })
    .into_response()
}
