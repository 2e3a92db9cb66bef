//! Method lookup with availability checks and fallback.
//!
//! The registry is built once from the process [`Capabilities`] and only
//! holds strategies whose capabilities are present. Resolving a method gives
//! a [`Blend`]: the method's fallback chain restricted to registered
//! strategies. RGB is always registered, so every chain has a usable end.

use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;

use super::common::{clamp_t, PolylineCurve};
use super::{get_interpolator, Capabilities, Capability, Curve, InterpolationMethod, Interpolator};
use crate::color::{decode, Color, INVALID_MARKER};
use crate::diagnostics::{Diagnostic, DiagnosticsSink};
use crate::error::HueError;

/// One entry of the method listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MethodInfo {
    pub method: InterpolationMethod,
    pub available: bool,
    /// What a request for this method actually uses
    pub resolves_to: InterpolationMethod,
    pub fallback: Option<InterpolationMethod>,
    pub requires: Vec<Capability>,
}

type Link = (InterpolationMethod, Arc<dyn Interpolator>);

/// Available interpolation strategies.
pub struct Registry {
    capabilities: Capabilities,
    interpolators: HashMap<InterpolationMethod, Arc<dyn Interpolator>>,
    diagnostics: Arc<dyn DiagnosticsSink>,
}

impl Registry {
    pub fn new(capabilities: Capabilities, diagnostics: Arc<dyn DiagnosticsSink>) -> Self {
        let interpolators: HashMap<_, Arc<dyn Interpolator>> = InterpolationMethod::ALL
            .into_iter()
            .filter(|method| capabilities.allows(*method))
            .map(|method| (method, Arc::from(get_interpolator(method))))
            .collect();

        Self {
            capabilities,
            interpolators,
            diagnostics,
        }
    }

    /// Register `interpolator` under its own method, replacing any existing
    /// strategy regardless of capabilities.
    pub fn with_interpolator(mut self, interpolator: Arc<dyn Interpolator>) -> Self {
        self.interpolators.insert(interpolator.method(), interpolator);
        self
    }

    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    pub fn diagnostics(&self) -> &Arc<dyn DiagnosticsSink> {
        &self.diagnostics
    }

    pub fn is_available(&self, method: InterpolationMethod) -> bool {
        self.interpolators.contains_key(&method)
    }

    fn links(&self, method: InterpolationMethod) -> Vec<Link> {
        method
            .fallback_chain()
            .into_iter()
            .filter_map(|m| self.interpolators.get(&m).map(|i| (m, Arc::clone(i))))
            .collect()
    }

    /// The method a request for `method` actually runs with.
    pub fn effective_method(&self, method: InterpolationMethod) -> InterpolationMethod {
        method
            .fallback_chain()
            .into_iter()
            .find(|m| self.interpolators.contains_key(m))
            .unwrap_or(InterpolationMethod::Rgb)
    }

    /// The blend for `method`, or for its first available fallback.
    pub fn resolve(&self, method: InterpolationMethod) -> Blend {
        let links = self.links(method);
        let effective = links
            .first()
            .map(|(m, _)| *m)
            .unwrap_or(InterpolationMethod::Rgb);

        if effective != method {
            self.diagnostics.record(Diagnostic::MethodUnavailable {
                method,
                fallback: effective,
            });
        }

        Blend {
            requested: method,
            links,
            diagnostics: Arc::clone(&self.diagnostics),
        }
    }

    /// Like [`Registry::resolve`], but by name. Unknown names resolve to RGB.
    pub fn resolve_name(&self, name: &str) -> Blend {
        match name.parse::<InterpolationMethod>() {
            Ok(method) => self.resolve(method),
            Err(_) => {
                self.diagnostics.record(Diagnostic::UnknownMethod {
                    name: name.to_string(),
                });
                self.resolve(InterpolationMethod::Rgb)
            }
        }
    }

    /// Every known method with its availability.
    pub fn methods(&self) -> Vec<MethodInfo> {
        InterpolationMethod::ALL
            .into_iter()
            .map(|method| MethodInfo {
                method,
                available: self.is_available(method),
                resolves_to: self.effective_method(method),
                fallback: method.fallback(),
                requires: method.required_capabilities().to_vec(),
            })
            .collect()
    }
}

/// A resolved blend function.
///
/// Results are always valid colors. When a strategy fails, the next one in
/// the chain is tried and the failure is reported; if every strategy fails
/// the marker color is returned.
pub struct Blend {
    requested: InterpolationMethod,
    links: Vec<Link>,
    diagnostics: Arc<dyn DiagnosticsSink>,
}

impl Blend {
    /// The method blends are computed with (before any per-call fallback).
    pub fn method(&self) -> InterpolationMethod {
        self.links
            .first()
            .map(|(m, _)| *m)
            .unwrap_or(InterpolationMethod::Rgb)
    }

    /// The method that was asked for.
    pub fn requested(&self) -> InterpolationMethod {
        self.requested
    }

    fn next_method(&self, index: usize) -> Option<InterpolationMethod> {
        self.links.get(index + 1).map(|(m, _)| *m)
    }

    fn report_failure(&self, index: usize, error: &HueError) {
        self.diagnostics.record(Diagnostic::BlendFailed {
            method: self.links[index].0,
            fallback: self.next_method(index),
            error: error.to_string(),
        });
    }

    pub fn blend(&self, a: &Color, b: &Color, t: f64) -> Color {
        let t = clamp_t(t);
        if t <= 0.0 {
            return *a;
        }
        if t >= 1.0 {
            return *b;
        }

        for (index, (_, interpolator)) in self.links.iter().enumerate() {
            match interpolator.blend(a.rgb(), b.rgb(), t) {
                Ok(rgb) if rgb.is_finite() => return Color::from_rgb(rgb),
                Ok(rgb) => {
                    let error = HueError::conversion(
                        interpolator.method().name(),
                        format!("non-finite result {:?}", rgb),
                    );
                    self.report_failure(index, &error);
                }
                Err(error) => self.report_failure(index, &error),
            }
        }
        INVALID_MARKER
    }

    /// Blend two hex strings. Malformed input gives the marker color.
    pub fn blend_hex(&self, a: &str, b: &str, t: f64) -> Color {
        match (self.decode_or_report(a), self.decode_or_report(b)) {
            (Some(a), Some(b)) => self.blend(&a, &b, t),
            _ => INVALID_MARKER,
        }
    }

    fn decode_or_report(&self, hex: &str) -> Option<Color> {
        match decode(hex) {
            Ok(rgb) => Some(Color::from_rgb(rgb)),
            Err(_) => {
                self.diagnostics.record(Diagnostic::InvalidColor {
                    input: hex.to_string(),
                });
                None
            }
        }
    }

    /// Prepare a curve through `stops` for repeated sampling.
    pub fn gradient(&self, stops: &[Color]) -> Gradient {
        let mut links = Vec::new();

        if stops.len() >= 2 {
            let rgbs: Vec<_> = stops.iter().map(Color::rgb).collect();
            for (index, (method, interpolator)) in self.links.iter().enumerate() {
                let curve = interpolator.curve(&rgbs).and_then(|native| match native {
                    Some(curve) => Ok(curve),
                    None => PolylineCurve::new(Arc::clone(interpolator), &rgbs)
                        .map(|curve| Box::new(curve) as Box<dyn Curve>),
                });
                match curve {
                    Ok(curve) => links.push((*method, curve)),
                    Err(error) => self.report_failure(index, &error),
                }
            }
        }

        Gradient {
            stops: stops.to_vec(),
            links,
            diagnostics: Arc::clone(&self.diagnostics),
        }
    }
}

/// A multi-stop color path, built once and sampled many times.
pub struct Gradient {
    stops: Vec<Color>,
    links: Vec<(InterpolationMethod, Box<dyn Curve>)>,
    diagnostics: Arc<dyn DiagnosticsSink>,
}

impl Gradient {
    /// The color at `t` (clamped). The first and last stops are returned
    /// exactly at the ends.
    pub fn sample(&self, t: f64) -> Color {
        let t = clamp_t(t);
        let (first, last) = match (self.stops.first(), self.stops.last()) {
            (Some(first), Some(last)) => (*first, *last),
            _ => return INVALID_MARKER,
        };
        if t <= 0.0 || self.stops.len() == 1 {
            return first;
        }
        if t >= 1.0 {
            return last;
        }

        for (index, (method, curve)) in self.links.iter().enumerate() {
            let error = match curve.sample(t) {
                Ok(rgb) if rgb.is_finite() => return Color::from_rgb(rgb),
                Ok(rgb) => HueError::conversion(method.name(), format!("non-finite {:?}", rgb)),
                Err(error) => error,
            };
            self.diagnostics.record(Diagnostic::BlendFailed {
                method: *method,
                fallback: self.links.get(index + 1).map(|(m, _)| *m),
                error: error.to_string(),
            });
        }
        INVALID_MARKER
    }

    /// `count` evenly spaced samples from the first stop to the last.
    pub fn colors(&self, count: usize) -> Vec<Color> {
        match count {
            0 => Vec::new(),
            1 => vec![self.sample(0.5)],
            _ => (0..count)
                .map(|i| self.sample(i as f64 / (count - 1) as f64))
                .collect(),
        }
    }
}
