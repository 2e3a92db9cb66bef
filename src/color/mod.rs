//! Color representations used by the palette engine.
//!
//! This module provides the hex codec and the HCT perceptual color model.

pub mod codec;
pub mod hct;

pub use codec::{decode, encode, with_hash, Color, Rgb, BLACK, INVALID_MARKER, WHITE};
pub use hct::Hct;
