//! Export endpoint handlers.
//!
//! Render the palette a query describes as SVG, PNG, or a paginated print
//! layout. They take the same parameters as `/palette`.

use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

use crate::error::Result;
use crate::export::{pdf_layout, render_png, render_svg};
use crate::handlers::error_response;
use crate::handlers::palette::{build_palette, PaletteQuery};
use crate::logging::generate_request_id;
use crate::state::AppState;

/// Output of an export endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Svg,
    Png,
    PdfLayout,
}

impl ExportFormat {
    pub fn name(&self) -> &'static str {
        match self {
            ExportFormat::Svg => "svg",
            ExportFormat::Png => "png",
            ExportFormat::PdfLayout => "pdf-layout",
        }
    }

    pub fn endpoint(&self) -> &'static str {
        match self {
            ExportFormat::Svg => "/palette/svg",
            ExportFormat::Png => "/palette/png",
            ExportFormat::PdfLayout => "/palette/pdf-layout",
        }
    }
}

fn image_response(content_type: &'static str, body: Vec<u8>) -> Response {
    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(content_type));
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));

    (StatusCode::OK, headers, body).into_response()
}

fn render(state: &AppState, query: &PaletteQuery, format: ExportFormat) -> Result<Response> {
    let (_, grid) = build_palette(state, query)?;
    let export = &state.config.export;

    Ok(match format {
        ExportFormat::Svg => {
            image_response("image/svg+xml", render_svg(&grid, export)?.into_bytes())
        }
        ExportFormat::Png => image_response("image/png", render_png(&grid, export)?),
        ExportFormat::PdfLayout => Json(pdf_layout(&grid, export)?).into_response(),
    })
}

async fn export(state: Arc<AppState>, query: PaletteQuery, format: ExportFormat) -> Response {
    let start_time = Instant::now();
    let request_id = generate_request_id();

    debug!(
        request_id = %request_id,
        format = format.name(),
        params = ?query,
        "Processing export request"
    );

    match render(&state, &query, format) {
        Ok(response) => {
            info!(
                request_id = %request_id,
                format = format.name(),
                duration_ms = start_time.elapsed().as_secs_f64() * 1000.0,
                "Export request completed"
            );
            response
        }
        Err(e) => {
            let params = format!("{:?}", query);
            error_response(&e, format.endpoint(), &request_id, Some(&params))
        }
    }
}

/// Handle GET /palette/svg requests
pub async fn svg_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PaletteQuery>,
) -> Response {
    export(state, query, ExportFormat::Svg).await
}

/// Handle GET /palette/png requests
pub async fn png_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PaletteQuery>,
) -> Response {
    export(state, query, ExportFormat::Png).await
}

/// Handle GET /palette/pdf-layout requests
pub async fn pdf_layout_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PaletteQuery>,
) -> Response {
    export(state, query, ExportFormat::PdfLayout).await
}
