//! HCT-based interpolation.
//!
//! [`HctInterpolator`] blends hue along the shorter arc with linear chroma and
//! tone. [`HybridHctRgbHueInterpolator`] keeps chroma and tone perceptually
//! linear but steers hue by the plain RGB blend, which avoids the long hue
//! sweeps HCT takes between distant hues.

use super::common::{clamp_t, lerp, lerp_hue_shortest};
use super::{InterpolationMethod, Interpolator};
use crate::color::{Color, Hct, Rgb};
use crate::error::Result;

fn blended_chroma_tone(start: &Hct, end: &Hct, t: f64) -> (f64, f64) {
    let chroma = lerp(start.chroma, end.chroma, t).max(0.0);
    let tone = lerp(start.tone, end.tone, t).clamp(0.0, 100.0);
    (chroma, tone)
}

/// HCT blend with shortest-arc hue
pub struct HctInterpolator;

impl Interpolator for HctInterpolator {
    fn method(&self) -> InterpolationMethod {
        InterpolationMethod::Hct
    }

    fn blend(&self, a: Rgb, b: Rgb, t: f64) -> Result<Rgb> {
        let t = clamp_t(t);
        let (start, end) = (Hct::from_rgb(a)?, Hct::from_rgb(b)?);

        let hue = lerp_hue_shortest(start.hue, end.hue, t);
        let (chroma, tone) = blended_chroma_tone(&start, &end, t);
        Hct::new(hue, chroma, tone).to_rgb()
    }
}

/// HCT chroma and tone with the hue of the RGB blend
pub struct HybridHctRgbHueInterpolator;

impl Interpolator for HybridHctRgbHueInterpolator {
    fn method(&self) -> InterpolationMethod {
        InterpolationMethod::HybridHctRgbHue
    }

    fn blend(&self, a: Rgb, b: Rgb, t: f64) -> Result<Rgb> {
        let t = clamp_t(t);
        let (start, end) = (Hct::from_rgb(a)?, Hct::from_rgb(b)?);
        let (chroma, tone) = blended_chroma_tone(&start, &end, t);

        // the guide color is quantized like any other finished color
        let guide = Color::from_rgb(a.lerp(b, t));
        let guide_hue = Hct::from_rgb(guide.rgb())?.hue;

        Hct::new(guide_hue, chroma, tone).to_rgb()
    }
}
