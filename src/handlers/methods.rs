//! Methods endpoint handler.
//!
//! Lists every interpolation method, whether it is available in this
//! process, and what a request for it resolves to.

use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::interpolation::{Capabilities, InterpolationMethod, MethodInfo};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct MethodsResponse {
    pub default: InterpolationMethod,
    pub capabilities: Capabilities,
    pub methods: Vec<MethodInfo>,
}

/// Handle GET /methods requests
pub async fn methods_handler(State(state): State<Arc<AppState>>) -> Json<MethodsResponse> {
    Json(MethodsResponse {
        default: state.config.palette.method,
        capabilities: state.registry.capabilities(),
        methods: state.registry.methods(),
    })
}
