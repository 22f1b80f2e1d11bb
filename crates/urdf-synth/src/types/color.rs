//! RGBA color

use serde::{Deserialize, Serialize};

/// Material color, each channel in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rgba(pub [f64; 4]);

impl Rgba {
    pub const GREY: Rgba = Rgba([0.7, 0.7, 0.7, 1.0]);

    pub fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self([r, g, b, a])
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Self::GREY
    }
}
