//! Integration tests for the huecraft server
//!
//! Each test starts its own server on an ephemeral port so diagnostic
//! counters never leak between tests.

mod common;

use common::http_client;
use common::server::{spawn_default_server, spawn_server};
use huecraft::{Capabilities, Config};
use pretty_assertions::assert_eq;
use serde_json::Value;

#[tokio::test]
async fn test_heartbeat_endpoint() {
    let addr = spawn_default_server().await;

    let json: Value = http_client::get_json(&addr, "/heartbeat")
        .await
        .expect("Failed to fetch heartbeat");

    assert_eq!(json["status"], "healthy");
    assert_eq!(json["default_method"], "lab");
    assert_eq!(json["diagnostics"]["unknown_method"], 0);
    assert!(json["server_id"].as_str().is_some());
    assert!(json["uptime_seconds"].is_u64());
}

#[tokio::test]
async fn test_methods_endpoint() {
    let addr = spawn_default_server().await;

    let json: Value = http_client::get_json(&addr, "/methods")
        .await
        .expect("Failed to fetch methods");

    let methods = json["methods"].as_array().expect("methods is an array");
    assert_eq!(methods.len(), 10);
    assert!(methods.iter().all(|m| m["available"] == true));

    let bezier = methods
        .iter()
        .find(|m| m["method"] == "bezier_lch")
        .expect("bezier_lch listed");
    assert_eq!(bezier["fallback"], "lch");
}

#[tokio::test]
async fn test_palette_endpoint() {
    let addr = spawn_default_server().await;

    let json: Value = http_client::get_json(
        &addr,
        "/palette?left=ff0000&right=%230000ff&levels=3&method=rgb",
    )
    .await
    .expect("Failed to fetch palette");

    assert_eq!(json["method"], "rgb");
    assert_eq!(json["rows"], 1);
    assert_eq!(json["columns"], 3);
    assert_eq!(
        json["palette"],
        serde_json::json!([["#ff0000", "#800080", "#0000ff"]])
    );
    assert!(json["request_id"].as_str().is_some());
}

#[tokio::test]
async fn test_vertical_palette_keeps_base_row() {
    let addr = spawn_default_server().await;

    let horizontal: Value = http_client::get_json(&addr, "/palette?levels=5&method=oklch")
        .await
        .expect("Failed to fetch palette");
    let vertical: Value = http_client::get_json(
        &addr,
        "/palette?levels=5&method=oklch&vertical=true&steps=3",
    )
    .await
    .expect("Failed to fetch palette");

    assert_eq!(vertical["rows"], 7);
    assert_eq!(vertical["columns"], 5);
    assert_eq!(vertical["palette"][3], horizontal["palette"][0]);
    assert_eq!(vertical["palette"][0][0], "#ffffff");
    assert_eq!(vertical["palette"][6][4], "#000000");
}

#[tokio::test]
async fn test_invalid_settings_return_400() {
    let addr = spawn_default_server().await;

    let (status, json) = http_client::get_error(&addr, "/palette?levels=0")
        .await
        .expect("Failed to make request");
    assert_eq!(status, 400);
    assert!(json["error"].as_str().unwrap().contains("horizontal_levels"));
    assert!(json["request_id"].as_str().is_some());

    let (status, json) = http_client::get_error(&addr, "/palette?levels=100000")
        .await
        .expect("Failed to make request");
    assert_eq!(status, 400);
    assert!(json["error"].as_str().unwrap().contains("levels"));
}

#[tokio::test]
async fn test_unknown_method_falls_back_to_rgb() {
    let addr = spawn_default_server().await;

    let json: Value = http_client::get_json(&addr, "/palette?left=000&right=fff&levels=3&method=cmyk")
        .await
        .expect("Failed to fetch palette");
    assert_eq!(json["method"], "rgb");
    assert_eq!(json["palette"][0][1], "#808080");

    let heartbeat: Value = http_client::get_json(&addr, "/heartbeat")
        .await
        .expect("Failed to fetch heartbeat");
    assert_eq!(heartbeat["diagnostics"]["unknown_method"], 1);
    assert_eq!(heartbeat["recent_diagnostics"][0]["kind"], "unknown_method");
    assert_eq!(heartbeat["recent_diagnostics"][0]["name"], "cmyk");
}

#[tokio::test]
async fn test_disabled_capabilities_degrade_to_rgb() {
    let mut config = Config::default();
    config.capabilities = Capabilities::rgb_only();
    let addr = spawn_server(config).await;

    let hct: Value = http_client::get_json(&addr, "/palette?left=ff0000&right=0000ff&levels=5&method=hct")
        .await
        .expect("Failed to fetch palette");
    let rgb: Value = http_client::get_json(&addr, "/palette?left=ff0000&right=0000ff&levels=5&method=rgb")
        .await
        .expect("Failed to fetch palette");

    assert_eq!(hct["requested_method"], "hct");
    assert_eq!(hct["method"], "rgb");
    assert_eq!(hct["palette"], rgb["palette"]);

    let heartbeat: Value = http_client::get_json(&addr, "/heartbeat")
        .await
        .expect("Failed to fetch heartbeat");
    assert_eq!(heartbeat["diagnostics"]["method_unavailable"], 1);
    assert_eq!(heartbeat["capabilities"]["perceptual"], false);
}

#[tokio::test]
async fn test_malformed_color_marks_cells() {
    let addr = spawn_default_server().await;

    let json: Value = http_client::get_json(&addr, "/palette?left=zzzzzz&levels=3")
        .await
        .expect("Failed to fetch palette");

    assert_eq!(
        json["palette"],
        serde_json::json!([["#ff00ff", "#ff00ff", "#ff00ff"]])
    );
}

#[tokio::test]
async fn test_svg_export() {
    let addr = spawn_default_server().await;

    let (content_type, body) = http_client::get_bytes(&addr, "/palette/svg?levels=3")
        .await
        .expect("Failed to fetch svg");
    let svg = String::from_utf8(body).expect("svg is utf-8");

    assert_eq!(content_type, "image/svg+xml");
    assert!(svg.starts_with("<svg"));
    assert_eq!(svg.matches("rx=\"4\"").count(), 3);
}

#[tokio::test]
async fn test_png_export() {
    let addr = spawn_default_server().await;

    let (content_type, body) =
        http_client::get_bytes(&addr, "/palette/png?levels=3&vertical=true&steps=1")
            .await
            .expect("Failed to fetch png");
    assert_eq!(content_type, "image/png");

    let img = image::load_from_memory(&body).expect("Failed to decode png");
    // 3 columns and 3 rows of 40px cells with 3px gaps
    assert_eq!(img.width(), 126);
    assert_eq!(img.height(), 126);
}

#[tokio::test]
async fn test_pdf_layout_export() {
    let addr = spawn_default_server().await;

    let json: Value = http_client::get_json(&addr, "/palette/pdf-layout?levels=4")
        .await
        .expect("Failed to fetch layout");

    let pages = json["pages"].as_array().expect("pages is an array");
    assert_eq!(pages.len(), 1);
    assert_eq!(pages[0]["cells"].as_array().unwrap().len(), 4);
    assert_eq!(pages[0]["footer"]["text"], "Page 1");
}

#[tokio::test]
async fn test_export_of_empty_palette_fails() {
    let addr = spawn_default_server().await;

    let (status, json) = http_client::get_error(&addr, "/palette/svg?levels=0")
        .await
        .expect("Failed to make request");
    assert_eq!(status, 400);
    assert!(json["request_id"].as_str().is_some());
}
