//! Application state management for huecraft.
//!
//! This module defines the shared state that is passed to all handlers: the
//! configuration, the interpolation registry built from the configured
//! capabilities, and the diagnostics counters the heartbeat reports.

use std::sync::Arc;

use crate::config::Config;
use crate::diagnostics::{CountingSink, DiagnosticsSink, FanoutSink, TracingSink};
use crate::grid::{self, PaletteGrid, PaletteSettings};
use crate::interpolation::Registry;

/// The main application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Configuration
    pub config: Config,
    /// Interpolation strategies available in this process
    pub registry: Arc<Registry>,
    /// Counts of every degraded result since startup
    pub diagnostics: Arc<CountingSink>,
}

impl AppState {
    /// Create a new AppState. Diagnostics are both logged and counted.
    pub fn new(config: Config) -> Self {
        let diagnostics = Arc::new(CountingSink::new());
        let sink = FanoutSink::new(vec![
            Arc::new(TracingSink) as Arc<dyn DiagnosticsSink>,
            diagnostics.clone(),
        ]);
        let registry = Registry::new(config.capabilities, Arc::new(sink));

        Self {
            config,
            registry: Arc::new(registry),
            diagnostics,
        }
    }

    /// Create a new AppState wrapped in an Arc for shared ownership
    pub fn new_shared(config: Config) -> Arc<Self> {
        Arc::new(Self::new(config))
    }

    /// Build a palette with this state's registry
    pub fn build(&self, settings: &PaletteSettings) -> PaletteGrid {
        grid::build(&self.registry, settings)
    }
}
