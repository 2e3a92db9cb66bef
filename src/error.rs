//! Error types for the huecraft application.
//!
//! Errors inside the palette engine never escape the public blend/build
//! boundary: they are reported to the diagnostics sink and replaced by a
//! degraded-but-valid color. The variants below are what the engine produces
//! internally and what the HTTP and export layers surface to callers.

use thiserror::Error;

/// The main error type for huecraft operations.
#[derive(Error, Debug)]
pub enum HueError {
    /// Malformed hex color input
    #[error("Invalid color: '{input}' is not a #RGB or #RRGGBB hex color")]
    InvalidColor { input: String },

    /// A color space conversion produced an unusable value
    #[error("Conversion error in {space}: {message}")]
    Conversion { space: String, message: String },

    /// Bezier curve construction or sampling failed
    #[error("Curve error: {message}")]
    Curve { message: String },

    /// Unknown interpolation method identifier
    #[error("Unknown interpolation method: {name}")]
    UnknownMethod { name: String },

    /// Invalid parameter errors
    #[error("Invalid parameter: {param} - {message}")]
    InvalidParameter { param: String, message: String },

    /// Export of an empty palette was requested
    #[error("Palette is empty; nothing to export")]
    EmptyPalette,

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Image encoding errors
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Server errors
    #[error("Server error: {message}")]
    Server { message: String },
}

impl HueError {
    /// Shorthand for a conversion failure in the named space.
    pub fn conversion(space: &str, message: impl Into<String>) -> Self {
        HueError::Conversion {
            space: space.to_string(),
            message: message.into(),
        }
    }
}

/// Convenience type alias for Results with HueError
pub type Result<T> = std::result::Result<T, HueError>;
