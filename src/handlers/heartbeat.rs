//! Heartbeat endpoint handler.
//!
//! Returns server status information, including uptime, memory usage, the
//! capabilities in effect and how many results were degraded since startup.

use axum::{extract::State, Json};
use once_cell::sync::Lazy;
use serde::Serialize;
use std::sync::Arc;
use std::time::{Duration, SystemTime};
use uuid::Uuid;

use crate::diagnostics::{Diagnostic, DiagnosticCounts};
use crate::interpolation::{Capabilities, InterpolationMethod};
use crate::state::AppState;

/// Unique per server process
static SERVER_ID: Lazy<String> = Lazy::new(|| Uuid::new_v4().to_string());

/// Server start time
static START_TIME: Lazy<SystemTime> = Lazy::new(SystemTime::now);

/// Pin the start time; called when the router is built.
pub fn mark_start() {
    Lazy::force(&START_TIME);
}

/// Heartbeat response structure
#[derive(Debug, Serialize)]
pub struct HeartbeatResponse {
    /// Server ID (unique per instance)
    pub server_id: String,
    /// Current timestamp (ISO 8601 format)
    pub timestamp: String,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    /// Process memory usage in bytes
    pub memory_usage_bytes: Option<u64>,
    pub capabilities: Capabilities,
    pub default_method: InterpolationMethod,
    /// Degraded results since startup
    pub diagnostics: DiagnosticCounts,
    /// Most recent degraded results, oldest first
    pub recent_diagnostics: Vec<Diagnostic>,
    /// Server status
    pub status: String,
}

/// Handle GET /heartbeat requests
pub async fn heartbeat_handler(State(state): State<Arc<AppState>>) -> Json<HeartbeatResponse> {
    let now = SystemTime::now();
    let timestamp = chrono::DateTime::<chrono::Utc>::from(now)
        .to_rfc3339_opts(chrono::SecondsFormat::Millis, true);
    let uptime = now
        .duration_since(*START_TIME)
        .unwrap_or(Duration::from_secs(0));

    Json(HeartbeatResponse {
        server_id: SERVER_ID.clone(),
        timestamp,
        uptime_seconds: uptime.as_secs(),
        memory_usage_bytes: get_memory_usage(),
        capabilities: state.registry.capabilities(),
        default_method: state.config.palette.method,
        diagnostics: state.diagnostics.snapshot(),
        recent_diagnostics: state.diagnostics.recent(),
        status: "healthy".to_string(),
    })
}

/// Get current process memory usage (Linux only)
fn get_memory_usage() -> Option<u64> {
    #[cfg(target_os = "linux")]
    {
        // RSS is the second field of /proc/self/statm, in pages
        let statm = std::fs::read_to_string("/proc/self/statm").ok()?;
        let pages = statm.split_whitespace().nth(1)?.parse::<u64>().ok()?;
        Some(pages * 4096)
    }

    #[cfg(not(target_os = "linux"))]
    {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[tokio::test]
    async fn test_heartbeat_reports_state() {
        mark_start();
        let state = AppState::new_shared(Config::default());
        let Json(response) = heartbeat_handler(State(state)).await;

        assert_eq!(response.status, "healthy");
        assert_eq!(response.server_id, *SERVER_ID);
        assert_eq!(response.default_method, InterpolationMethod::Lab);
        assert_eq!(response.diagnostics.total(), 0);
        assert!(response.recent_diagnostics.is_empty());
        assert!(response.timestamp.ends_with('Z'));
    }
}
