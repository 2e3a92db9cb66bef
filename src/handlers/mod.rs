//! HTTP request handlers for the huecraft API.
//!
//! This module contains all the endpoint handlers for the web server and the
//! router that wires them together.

pub mod export;
pub mod heartbeat;
pub mod methods;
pub mod palette;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::error::HueError;
use crate::logging::{create_http_trace_layer, log_request_error};
use crate::state::AppState;

pub use export::{pdf_layout_handler, png_handler, svg_handler};
pub use heartbeat::heartbeat_handler;
pub use methods::methods_handler;
pub use palette::{palette_handler, PaletteQuery};

/// Build the application router
pub fn router(state: Arc<AppState>) -> Router {
    heartbeat::mark_start();

    Router::new()
        .route("/heartbeat", get(heartbeat_handler))
        .route("/methods", get(methods_handler))
        .route("/palette", get(palette_handler))
        .route("/palette/svg", get(svg_handler))
        .route("/palette/png", get(png_handler))
        .route("/palette/pdf-layout", get(pdf_layout_handler))
        .layer(CorsLayer::permissive())
        .layer(create_http_trace_layer())
        .with_state(state)
}

/// Status code an error is reported with
pub fn status_for(error: &HueError) -> StatusCode {
    match error {
        HueError::InvalidColor { .. }
        | HueError::InvalidParameter { .. }
        | HueError::UnknownMethod { .. }
        | HueError::EmptyPalette => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Log a failed request and turn it into a JSON error body
pub fn error_response(
    error: &HueError,
    endpoint: &str,
    request_id: &str,
    params: Option<&str>,
) -> Response {
    log_request_error(error, endpoint, request_id, params);

    (
        status_for(error),
        Json(serde_json::json!({
            "error": error.to_string(),
            "request_id": request_id
        })),
    )
        .into_response()
}
