//! The landing state machine.
//!
//! [`LandingController`] owns the airborne / grounded / submerged state of a
//! floating object together with the surfaces it currently overlaps. Every
//! side effect (joints, sprites, splash, notifications) goes through a
//! [`LandingHost`], so the state machine itself never touches the ECS world.

use bevy::prelude::*;

use crate::config::LandingConfig;
use crate::host::LandingHost;
use crate::messages::LandingEventKind;
use crate::state::LandingState;

/// Marker for entities a floating object may land on.
#[derive(Component, Reflect, Debug, Clone, Copy, Default)]
#[reflect(Component)]
pub struct Landable;

/// Link between a grounded object and the surface it rests on.
#[derive(Reflect, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attachment {
    /// The surface the object is attached to.
    pub surface: Entity,
    /// Entity carrying the joint created by the backend.
    pub link: Entity,
}

/// Landing state of a buoyant object.
///
/// # Example
///
/// ```rust
/// use bevy::prelude::*;
/// use msg_landing_controller::prelude::*;
///
/// let controller = LandingController::new()
///     .with_anchor_point(Vec2::new(0.0, -0.5))
///     .landing_on_spawn();
/// assert!(controller.is_airborne());
/// assert!(!controller.can_land());
/// ```
#[derive(Component, Reflect, Debug, Clone, Default)]
#[reflect(Component)]
#[require(Transform)]
pub struct LandingController {
    /// Offset from the object's position where the attachment is anchored.
    pub anchor_point: Vec2,
    /// Attempt a landing shortly after spawning.
    pub land_on_spawn: bool,
    state: LandingState,
    candidate_surfaces: Vec<Entity>,
    attachment: Option<Attachment>,
    saved_appearance: Option<Vec<Color>>,
    /// Whether the sink visuals are currently applied.
    dimmed: bool,
}

impl LandingController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_anchor_point(mut self, anchor_point: Vec2) -> Self {
        self.anchor_point = anchor_point;
        self
    }

    /// Schedule a landing attempt right after the object is spawned.
    pub fn landing_on_spawn(mut self) -> Self {
        self.land_on_spawn = true;
        self
    }

    pub fn state(&self) -> LandingState {
        self.state
    }

    pub fn is_airborne(&self) -> bool {
        self.state.is_airborne()
    }

    pub fn is_grounded(&self) -> bool {
        self.state.is_grounded()
    }

    pub fn is_submerged(&self) -> bool {
        self.state.is_submerged()
    }

    /// Whether any landable surface is currently overlapping.
    pub fn can_land(&self) -> bool {
        !self.candidate_surfaces.is_empty()
    }

    /// Overlapping landable surfaces, oldest contact first.
    pub fn candidate_surfaces(&self) -> &[Entity] {
        &self.candidate_surfaces
    }

    /// The current attachment. `Some` exactly when grounded.
    pub fn attachment(&self) -> Option<Attachment> {
        self.attachment
    }

    /// Sprite colors saved by the last submersion.
    pub fn saved_appearance(&self) -> Option<&[Color]> {
        self.saved_appearance.as_deref()
    }

    /// Land on the oldest overlapping surface, or sink if there is none.
    ///
    /// Surfaces the host cannot attach to (e.g. despawned) are dropped from
    /// the candidates. A submerged object that lands surfaces first. Returns
    /// whether the object landed.
    pub fn try_land(&mut self, config: &LandingConfig, host: &mut impl LandingHost) -> bool {
        self.release(host);

        while let Some(&surface) = self.candidate_surfaces.first() {
            let Some(link) = host.attach(surface, self.anchor_point) else {
                self.candidate_surfaces.remove(0);
                continue;
            };
            self.surface(config, host);
            self.attachment = Some(Attachment { surface, link });
            self.state = LandingState::Grounded;
            host.notify(LandingEventKind::Landed);
            return true;
        }

        self.sink(config, host);
        false
    }

    /// Release any attachment and become airborne.
    pub fn unground(&mut self, host: &mut impl LandingHost) {
        self.release(host);
        self.state = LandingState::Airborne;
    }

    /// Submerge the object. Does nothing when already submerged.
    ///
    /// Returns whether the object sank on this call.
    pub fn sink(&mut self, config: &LandingConfig, host: &mut impl LandingHost) -> bool {
        if self.is_submerged() {
            return false;
        }

        self.unground(host);
        self.state = LandingState::Submerged;

        // Knocked loose while still dimmed: keep the original snapshot.
        if !self.dimmed {
            let sinking = &config.sinking;
            host.scale_by(sinking.scale);

            let colors = host.sprite_colors();
            host.set_sprite_colors(&vec![sinking.dim_color(); colors.len()]);
            self.saved_appearance = Some(colors);
            host.shift_depth(-sinking.depth_offset);
            self.dimmed = true;
        }

        host.spawn_splash();
        host.play_splash_sound();
        host.notify(LandingEventKind::Sank);
        true
    }

    /// Undo the submersion visuals and become airborne again.
    ///
    /// Only acts when submerged; returns whether the object surfaced.
    pub fn surface(&mut self, config: &LandingConfig, host: &mut impl LandingHost) -> bool {
        if !self.is_submerged() {
            return false;
        }

        if self.dimmed {
            let sinking = &config.sinking;
            host.scale_by(sinking.scale.recip());
            if let Some(colors) = &self.saved_appearance {
                host.set_sprite_colors(colors);
            }
            host.shift_depth(sinking.depth_offset);
            self.dimmed = false;
        }

        self.state = LandingState::Airborne;
        host.notify(LandingEventKind::Surfaced);
        true
    }

    /// Any solid collision knocks the object loose, whatever its state.
    pub fn on_physical_contact(&mut self, host: &mut impl LandingHost) {
        self.unground(host);
    }

    /// Record a newly overlapping surface. Returns whether it was added.
    pub fn on_surface_enter(&mut self, surface: Entity, landable: bool) -> bool {
        if !landable || self.candidate_surfaces.contains(&surface) {
            return false;
        }
        self.candidate_surfaces.push(surface);
        true
    }

    /// Forget a surface. A grounded object with nothing left below it sinks.
    ///
    /// Returns whether the object sank.
    pub fn on_surface_exit(
        &mut self,
        surface: Entity,
        config: &LandingConfig,
        host: &mut impl LandingHost,
    ) -> bool {
        self.candidate_surfaces.retain(|&s| s != surface);

        if self.is_grounded() && !self.can_land() {
            return self.sink(config, host);
        }
        false
    }

    fn release(&mut self, host: &mut impl LandingHost) {
        if let Some(attachment) = self.attachment.take() {
            host.detach(attachment.link);
        }
    }
}
