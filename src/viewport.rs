//! Letterboxed camera viewport.
//!
//! Keeps a fixed logical aspect ratio visible whatever the window shape:
//! wide windows get bars left and right, tall windows get bars top and
//! bottom. The viewport is only recomputed when the window size or the
//! camera's [`LetterboxConfig`] changes.

use bevy::camera::{ScalingMode, Viewport};
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::config::LetterboxConfig;

/// Normalized sub-rectangle (0..1 on both axes) showing `aspect` centered in
/// a `width` x `height` display.
///
/// Returns `None` when the display or the aspect ratio is degenerate.
pub fn letterbox_rect(width: f32, height: f32, aspect: f32) -> Option<Rect> {
    if !(width > 0.0 && height > 0.0 && aspect > 0.0) {
        return None;
    }

    let scale = (width / height) / aspect;
    if scale > 1.0 {
        let visible = 1.0 / scale;
        let margin = (1.0 - visible) / 2.0;
        Some(Rect::new(margin, 0.0, margin + visible, 1.0))
    } else {
        let visible = scale;
        let margin = (1.0 - visible) / 2.0;
        Some(Rect::new(0.0, margin, 1.0, margin + visible))
    }
}

/// Convert a normalized rect into a physical-pixel position and size.
pub fn physical_viewport(rect: Rect, size: UVec2) -> (UVec2, UVec2) {
    let size_f = size.as_vec2();
    let position = (rect.min * size_f).round().as_uvec2();
    let extent = (rect.size() * size_f).round().as_uvec2().max(UVec2::ONE);
    (position, extent)
}

/// Camera that letterboxes its viewport to a fixed aspect ratio.
#[derive(Component, Reflect, Debug, Clone, Copy, Default)]
#[reflect(Component)]
#[require(Camera2d)]
pub struct LetterboxCamera {
    pub config: LetterboxConfig,
    last_size: UVec2,
    last_config: Option<LetterboxConfig>,
}

impl LetterboxCamera {
    pub fn new(config: LetterboxConfig) -> Self {
        Self {
            config,
            last_size: UVec2::ZERO,
            last_config: None,
        }
    }
}

/// Keep letterbox cameras on a projection showing a fixed world height.
pub fn configure_letterbox_projection(
    mut q_cameras: Query<(&LetterboxCamera, &mut Projection), Changed<LetterboxCamera>>,
) {
    for (letterbox, mut projection) in &mut q_cameras {
        let height = letterbox.config.viewport_height;
        let Projection::Orthographic(ortho) = &mut *projection else {
            continue;
        };
        let current = matches!(
            ortho.scaling_mode,
            ScalingMode::FixedVertical { viewport_height } if viewport_height == height
        );
        if !current {
            ortho.scaling_mode = ScalingMode::FixedVertical {
                viewport_height: height,
            };
        }
    }
}

/// Recompute letterbox viewports when the primary window is resized or a
/// camera's config is edited.
pub fn update_letterbox(
    q_window: Query<&Window, With<PrimaryWindow>>,
    mut q_cameras: Query<(&mut Camera, &mut LetterboxCamera)>,
) {
    let Ok(window) = q_window.single() else {
        return;
    };
    let size = UVec2::new(window.physical_width(), window.physical_height());

    for (mut camera, mut letterbox) in &mut q_cameras {
        let config = letterbox.config;
        if letterbox.last_size == size && letterbox.last_config == Some(config) {
            continue;
        }
        // Bookkeeping only; user edits are what `Changed` should see.
        let bookkeeping = letterbox.bypass_change_detection();
        bookkeeping.last_size = size;
        bookkeeping.last_config = Some(config);

        let Some(rect) = letterbox_rect(size.x as f32, size.y as f32, config.aspect())
        else {
            debug!("Skipping letterbox for degenerate window size {size}");
            continue;
        };

        let (physical_position, physical_size) = physical_viewport(rect, size);
        camera.viewport = Some(Viewport {
            physical_position,
            physical_size,
            ..default()
        });
    }
}

/// Plugin keeping every [`LetterboxCamera`] letterboxed.
pub struct LetterboxPlugin;

impl Plugin for LetterboxPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<LetterboxCamera>();
        app.add_systems(
            Update,
            (configure_letterbox_projection, update_letterbox).chain(),
        );
    }
}
