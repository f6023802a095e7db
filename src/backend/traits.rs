//! Physics backend abstraction.
//!
//! This module defines the trait that physics backends must implement to
//! work with the landing controller. The backend decides what counts as a
//! landable surface and how an object is physically linked to it.

use bevy::prelude::*;

use crate::controller::Landable;

/// Anchors of a link between a floating object and a surface.
#[derive(Reflect, Debug, Clone, Copy, PartialEq, Default)]
pub struct AttachmentAnchors {
    /// Anchor in the surface's local space.
    pub surface_local: Vec2,
    /// The same point in the object's local space.
    pub body_local: Vec2,
}

impl AttachmentAnchors {
    /// Anchors for a link at `anchor_point` (a world-space offset from the
    /// object's position), configured so the joint starts out satisfied.
    pub fn compute(body: &GlobalTransform, surface: &GlobalTransform, anchor_point: Vec2) -> Self {
        let (_, body_rotation, body_position) = body.to_scale_rotation_translation();
        let (_, surface_rotation, surface_position) = surface.to_scale_rotation_translation();

        let world_anchor = body_position.xy() + anchor_point;
        let surface_local = surface_rotation.inverse() * (world_anchor - surface_position.xy()).extend(0.0);
        let body_local = body_rotation.inverse() * anchor_point.extend(0.0);

        Self {
            surface_local: surface_local.xy(),
            body_local: body_local.xy(),
        }
    }
}

/// Trait for physics backend implementations.
///
/// Implement this trait to integrate a physics engine with the landing
/// controller. All methods are called from the exclusive transition system,
/// so they get direct `World` access.
pub trait LandingBackend: 'static + Send + Sync {
    /// Returns the plugin that sets up this backend.
    fn plugin() -> impl Plugin;

    /// Whether `entity` counts as a landable surface.
    ///
    /// Default implementation checks for the [`Landable`] marker.
    fn is_landable(world: &World, entity: Entity) -> bool {
        world.get::<Landable>(entity).is_some()
    }

    /// The entity a link to `surface` should target.
    ///
    /// Backends whose contacts report collider entities can map them to the
    /// owning rigid body here. Default implementation returns `surface`.
    fn surface_body(_world: &World, surface: Entity) -> Entity {
        surface
    }

    /// Create a joint-like link between `body` and `surface`.
    ///
    /// Returns the entity owning the link, or `None` if no link could be made.
    fn attach(
        world: &mut World,
        body: Entity,
        surface: Entity,
        anchors: AttachmentAnchors,
    ) -> Option<Entity>;

    /// Remove a link created by [`attach`](Self::attach).
    ///
    /// Default implementation despawns the link entity if it still exists.
    fn detach(world: &mut World, link: Entity) {
        if world.get_entity(link).is_ok() {
            world.despawn(link);
        }
    }
}
