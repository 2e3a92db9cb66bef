//! Hex color codec.
//!
//! Colors travel through the system as `#rrggbb` strings. Internally the
//! engine works on [`Rgb`] triples on the 0-255 scale and stores finished
//! colors as [`Color`], which is always a valid 6-digit hex color.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::{HueError, Result};

/// Substituted for any color that could not be decoded.
pub const INVALID_MARKER: Color = Color([0xff, 0x00, 0xff]);

/// Pure black.
pub const BLACK: Color = Color([0x00, 0x00, 0x00]);

/// Pure white.
pub const WHITE: Color = Color([0xff, 0xff, 0xff]);

/// Luminance above which dark text is used on a fill.
const LUMINANCE_THRESHOLD: f64 = 128.0;

/// An RGB triple on the 0-255 scale.
///
/// Channels are not clamped; intermediate results of color math may fall
/// outside the displayable range until they are encoded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Channel-wise linear interpolation.
    pub fn lerp(self, other: Rgb, t: f64) -> Rgb {
        Rgb::new(
            self.r * (1.0 - t) + other.r * t,
            self.g * (1.0 - t) + other.g * t,
            self.b * (1.0 - t) + other.b * t,
        )
    }

    pub fn is_finite(&self) -> bool {
        self.r.is_finite() && self.g.is_finite() && self.b.is_finite()
    }

    /// Channels scaled to 0.0..=1.0 (unclamped).
    pub fn to_unit(self) -> [f64; 3] {
        [self.r / 255.0, self.g / 255.0, self.b / 255.0]
    }

    pub fn from_unit(channels: [f64; 3]) -> Self {
        Rgb::new(channels[0] * 255.0, channels[1] * 255.0, channels[2] * 255.0)
    }
}

/// Decode `#RGB` or `#RRGGBB` (case-insensitive) into an RGB triple.
pub fn decode(hex: &str) -> Result<Rgb> {
    let invalid = || HueError::InvalidColor {
        input: hex.to_string(),
    };

    let digits = hex.trim().strip_prefix('#').ok_or_else(invalid)?;
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }

    let expanded = match digits.len() {
        3 => digits.chars().flat_map(|c| [c, c]).collect::<String>(),
        6 => digits.to_string(),
        _ => return Err(invalid()),
    };

    let channel = |i: usize| {
        u8::from_str_radix(&expanded[i..i + 2], 16)
            .map(f64::from)
            .map_err(|_| invalid())
    };

    Ok(Rgb::new(channel(0)?, channel(2)?, channel(4)?))
}

/// Trim user input and add the leading `#` if it was left off, so `ff0000`
/// and ` #ff0000 ` both decode. Blank input stays blank.
pub fn with_hash(input: &str) -> String {
    let input = input.trim();
    if input.is_empty() || input.starts_with('#') {
        input.to_string()
    } else {
        format!("#{}", input)
    }
}

/// Encode an RGB triple as lowercase `#rrggbb`, rounding and clamping each
/// channel.
pub fn encode(rgb: Rgb) -> String {
    Color::from_rgb(rgb).to_string()
}

fn to_byte(channel: f64) -> u8 {
    if channel.is_nan() {
        0
    } else {
        channel.round().clamp(0.0, 255.0) as u8
    }
}

/// A finished color: always a valid 6-digit hex color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color([u8; 3]);

impl Color {
    pub const fn from_bytes(r: u8, g: u8, b: u8) -> Self {
        Color([r, g, b])
    }

    /// Round and clamp an RGB triple into a color. NaN channels become 0.
    pub fn from_rgb(rgb: Rgb) -> Self {
        Color([to_byte(rgb.r), to_byte(rgb.g), to_byte(rgb.b)])
    }

    pub fn rgb(&self) -> Rgb {
        let [r, g, b] = self.0;
        Rgb::new(f64::from(r), f64::from(g), f64::from(b))
    }

    pub fn bytes(&self) -> [u8; 3] {
        self.0
    }

    /// Relative luminance on the 0-255 scale (Rec. 709 weights).
    pub fn luminance(&self) -> f64 {
        let rgb = self.rgb();
        0.2126 * rgb.r + 0.7152 * rgb.g + 0.0722 * rgb.b
    }

    /// Black or white, whichever reads better on top of this color.
    pub fn contrast_text(&self) -> Color {
        if self.luminance() > LUMINANCE_THRESHOLD {
            BLACK
        } else {
            WHITE
        }
    }

    /// Uppercase `#RRGGBB`, as printed on labels.
    pub fn to_upper_hex(&self) -> String {
        self.to_string().to_uppercase()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.0;
        write!(f, "#{:02x}{:02x}{:02x}", r, g, b)
    }
}

impl FromStr for Color {
    type Err = HueError;

    fn from_str(s: &str) -> Result<Self> {
        decode(s).map(Color::from_rgb)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
