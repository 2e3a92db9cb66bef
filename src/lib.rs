//! # huecraft
//!
//! A palette grid generator that blends user-chosen corner colors across
//! several color spaces, with an HTTP API and SVG/PNG/PDF-layout exporters.
//!
//! ## Key Features
//!
//! - **Many color spaces**: RGB, HSL, CIELAB, LCh, OKLab, OKLCH, HCT, plus
//!   hue-guided, blended and Bezier-in-LCh variants
//! - **Never crashes on bad input**: every blend degrades along a fallback
//!   chain that ends at plain RGB, and malformed colors become a marker color
//! - **Pure engine**: building a grid is a stateless function of its settings
//!
//! ## Architecture
//!
//! - **Color Layer**: hex codec and the HCT color model
//! - **Interpolation Layer**: one strategy per color space behind a registry
//!   that knows which spaces are available
//! - **Grid Layer**: turns settings into a grid of hex colors
//! - **API Layer**: serves grids and exports through a RESTful HTTP API

pub mod color;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod export;
pub mod grid;
pub mod handlers;
pub mod interpolation;
pub mod logging;
pub mod state;

pub use color::{decode, encode, Color, Hct, Rgb, INVALID_MARKER};
pub use config::Config;
pub use diagnostics::{CountingSink, Diagnostic, DiagnosticsSink, FanoutSink, TracingSink};
pub use error::{HueError, Result};
pub use grid::{build, PaletteGrid, PaletteSettings};
pub use interpolation::{Blend, Capabilities, Capability, Gradient, InterpolationMethod, Registry};
pub use logging::{
    create_http_trace_layer, generate_request_id, init_tracing, log_error, log_operation_end,
    log_operation_start, log_palette_stats, log_request_error, log_timed_operation,
};
pub use state::AppState;
