//! Configuration for the submersion visuals.

use bevy::prelude::*;
use serde::Deserialize;

/// Configuration for how a sinking object changes its appearance.
#[derive(Reflect, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct SinkConfig {
    /// Factor applied to the local X/Y scale when submerging.
    /// Surfacing divides by the same factor. Must be in `(0, 1]`.
    pub scale: f32,

    /// Draw depth (Z) removed from the object while submerged so it renders
    /// behind everything on the water surface.
    pub depth_offset: f32,

    /// sRGBA tint applied to every sprite while submerged.
    pub dim_color: [f32; 4],
}

impl SinkConfig {
    /// The submerged tint as a Bevy color.
    pub fn dim_color(&self) -> Color {
        let [r, g, b, a] = self.dim_color;
        Color::srgba(r, g, b, a)
    }
}

impl Default for SinkConfig {
    fn default() -> Self {
        Self {
            scale: 0.8,
            depth_offset: 500.0,
            dim_color: [0.5, 0.5, 0.5, 1.0],
        }
    }
}
