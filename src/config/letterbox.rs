//! Configuration for the letterboxed camera.

use bevy::prelude::*;
use serde::Deserialize;

/// Logical view the letterbox keeps visible.
#[derive(Reflect, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct LetterboxConfig {
    /// Logical width of the visible area (aspect numerator).
    pub visible_width: f32,

    /// Logical height of the visible area (aspect denominator).
    pub visible_height: f32,

    /// World units shown vertically by the orthographic projection.
    pub viewport_height: f32,
}

impl LetterboxConfig {
    /// Target aspect ratio (width / height).
    pub fn aspect(&self) -> f32 {
        self.visible_width / self.visible_height
    }
}

impl Default for LetterboxConfig {
    fn default() -> Self {
        Self {
            visible_width: 6.0,
            visible_height: 5.0,
            viewport_height: 10.0,
        }
    }
}
