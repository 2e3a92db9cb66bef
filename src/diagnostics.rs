//! Observable record of degraded results.
//!
//! The palette engine never fails outward: a bad color becomes the marker,
//! a failing blend falls back to a simpler method, and bad settings give an
//! empty grid. Each of those events is reported to a [`DiagnosticsSink`] so
//! that callers can count, log or assert on them.

use parking_lot::Mutex;
use serde::Serialize;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::warn;

use crate::interpolation::InterpolationMethod;

/// Something the engine degraded instead of failing on.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// A method name did not parse; RGB was used
    UnknownMethod { name: String },
    /// A method's capability is switched off; `fallback` was used
    MethodUnavailable {
        method: InterpolationMethod,
        fallback: InterpolationMethod,
    },
    /// A blend or curve failed; `fallback` is the next method tried, if any
    BlendFailed {
        method: InterpolationMethod,
        fallback: Option<InterpolationMethod>,
        error: String,
    },
    /// A color string did not decode; the marker color was used
    InvalidColor { input: String },
    /// Palette settings were rejected; the grid is empty
    InvalidSettings { reason: String },
}

impl Diagnostic {
    pub fn kind(&self) -> &'static str {
        match self {
            Diagnostic::UnknownMethod { .. } => "unknown_method",
            Diagnostic::MethodUnavailable { .. } => "method_unavailable",
            Diagnostic::BlendFailed { .. } => "blend_failed",
            Diagnostic::InvalidColor { .. } => "invalid_color",
            Diagnostic::InvalidSettings { .. } => "invalid_settings",
        }
    }
}

/// Receiver of engine diagnostics. Must be cheap; it is called inline.
pub trait DiagnosticsSink: Send + Sync {
    fn record(&self, diagnostic: Diagnostic);
}

/// Emits every diagnostic as a structured `tracing` warning.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticsSink for TracingSink {
    fn record(&self, diagnostic: Diagnostic) {
        match &diagnostic {
            Diagnostic::UnknownMethod { name } => {
                warn!(
                    kind = diagnostic.kind(),
                    name = %name,
                    "Unknown interpolation method, using rgb"
                );
            }
            Diagnostic::MethodUnavailable { method, fallback } => {
                warn!(
                    kind = diagnostic.kind(),
                    method = %method,
                    fallback = %fallback,
                    "Interpolation method unavailable"
                );
            }
            Diagnostic::BlendFailed {
                method,
                fallback,
                error,
            } => {
                warn!(
                    kind = diagnostic.kind(),
                    method = %method,
                    fallback = fallback.map(|m| m.name()).unwrap_or("marker"),
                    error = %error,
                    "Blend failed, falling back"
                );
            }
            Diagnostic::InvalidColor { input } => {
                warn!(kind = diagnostic.kind(), input = %input, "Invalid color, using marker");
            }
            Diagnostic::InvalidSettings { reason } => {
                warn!(kind = diagnostic.kind(), reason = %reason, "Invalid palette settings");
            }
        }
    }
}

/// How many of the most recent diagnostics [`CountingSink`] keeps.
pub const DEFAULT_RECENT_CAPACITY: usize = 64;

/// Counts diagnostics by kind and keeps the most recent ones.
#[derive(Debug)]
pub struct CountingSink {
    unknown_method: AtomicU64,
    method_unavailable: AtomicU64,
    blend_failed: AtomicU64,
    invalid_color: AtomicU64,
    invalid_settings: AtomicU64,
    recent: Mutex<VecDeque<Diagnostic>>,
    capacity: usize,
}

/// Point-in-time counter values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DiagnosticCounts {
    pub unknown_method: u64,
    pub method_unavailable: u64,
    pub blend_failed: u64,
    pub invalid_color: u64,
    pub invalid_settings: u64,
}

impl DiagnosticCounts {
    pub fn total(&self) -> u64 {
        self.unknown_method
            + self.method_unavailable
            + self.blend_failed
            + self.invalid_color
            + self.invalid_settings
    }
}

impl CountingSink {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_RECENT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            unknown_method: AtomicU64::new(0),
            method_unavailable: AtomicU64::new(0),
            blend_failed: AtomicU64::new(0),
            invalid_color: AtomicU64::new(0),
            invalid_settings: AtomicU64::new(0),
            recent: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity,
        }
    }

    pub fn snapshot(&self) -> DiagnosticCounts {
        DiagnosticCounts {
            unknown_method: self.unknown_method.load(Ordering::Relaxed),
            method_unavailable: self.method_unavailable.load(Ordering::Relaxed),
            blend_failed: self.blend_failed.load(Ordering::Relaxed),
            invalid_color: self.invalid_color.load(Ordering::Relaxed),
            invalid_settings: self.invalid_settings.load(Ordering::Relaxed),
        }
    }

    /// The retained diagnostics, oldest first.
    pub fn recent(&self) -> Vec<Diagnostic> {
        self.recent.lock().iter().cloned().collect()
    }

    fn counter(&self, diagnostic: &Diagnostic) -> &AtomicU64 {
        match diagnostic {
            Diagnostic::UnknownMethod { .. } => &self.unknown_method,
            Diagnostic::MethodUnavailable { .. } => &self.method_unavailable,
            Diagnostic::BlendFailed { .. } => &self.blend_failed,
            Diagnostic::InvalidColor { .. } => &self.invalid_color,
            Diagnostic::InvalidSettings { .. } => &self.invalid_settings,
        }
    }
}

impl Default for CountingSink {
    fn default() -> Self {
        Self::new()
    }
}

impl DiagnosticsSink for CountingSink {
    fn record(&self, diagnostic: Diagnostic) {
        self.counter(&diagnostic).fetch_add(1, Ordering::Relaxed);

        if self.capacity == 0 {
            return;
        }
        let mut recent = self.recent.lock();
        if recent.len() == self.capacity {
            recent.pop_front();
        }
        recent.push_back(diagnostic);
    }
}

/// Forwards every diagnostic to each inner sink in order.
#[derive(Clone, Default)]
pub struct FanoutSink {
    sinks: Vec<Arc<dyn DiagnosticsSink>>,
}

impl FanoutSink {
    pub fn new(sinks: Vec<Arc<dyn DiagnosticsSink>>) -> Self {
        Self { sinks }
    }
}

impl DiagnosticsSink for FanoutSink {
    fn record(&self, diagnostic: Diagnostic) {
        if let Some((last, rest)) = self.sinks.split_last() {
            for sink in rest {
                sink.record(diagnostic.clone());
            }
            last.record(diagnostic);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invalid(input: &str) -> Diagnostic {
        Diagnostic::InvalidColor {
            input: input.to_string(),
        }
    }

    #[test]
    fn test_counting_sink_counts_by_kind() {
        let sink = CountingSink::new();
        sink.record(invalid("#zz"));
        sink.record(invalid("red"));
        sink.record(Diagnostic::UnknownMethod {
            name: "cmyk".to_string(),
        });

        let counts = sink.snapshot();
        assert_eq!(counts.invalid_color, 2);
        assert_eq!(counts.unknown_method, 1);
        assert_eq!(counts.blend_failed, 0);
        assert_eq!(counts.total(), 3);
    }

    #[test]
    fn test_recent_log_is_bounded() {
        let sink = CountingSink::with_capacity(2);
        for input in ["a", "b", "c"] {
            sink.record(invalid(input));
        }
        assert_eq!(sink.recent(), vec![invalid("b"), invalid("c")]);
        assert_eq!(sink.snapshot().invalid_color, 3);
    }

    #[test]
    fn test_fanout_reaches_every_sink() {
        let first = Arc::new(CountingSink::new());
        let second = Arc::new(CountingSink::new());
        let fanout = FanoutSink::new(vec![
            first.clone() as Arc<dyn DiagnosticsSink>,
            Arc::new(TracingSink),
            second.clone(),
        ]);

        fanout.record(Diagnostic::InvalidSettings {
            reason: "levels must be at least 1".to_string(),
        });

        assert_eq!(first.snapshot().invalid_settings, 1);
        assert_eq!(second.snapshot().invalid_settings, 1);
    }

    #[test]
    fn test_serializes_with_kind_tag() {
        let diagnostic = Diagnostic::MethodUnavailable {
            method: InterpolationMethod::Hct,
            fallback: InterpolationMethod::Rgb,
        };
        let json = serde_json::to_value(&diagnostic).unwrap();
        assert_eq!(json["kind"], "method_unavailable");
        assert_eq!(json["method"], "hct");
        assert_eq!(json["fallback"], "rgb");
    }
}
