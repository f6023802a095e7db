use bevy::prelude::*;

use super::{AttachmentAnchors, LandingBackend, NoOpBackendPlugin};

/// Bookkeeping for a link between a floating object and a surface.
///
/// Every backend spawns one of these per attachment; physics backends add
/// their joint component to the same entity.
#[derive(Component, Reflect, Debug, Clone, Copy, PartialEq)]
pub struct SurfaceLink {
    pub body: Entity,
    pub surface: Entity,
    pub anchors: AttachmentAnchors,
}

/// Backend without a physics engine.
///
/// Attachments are plain [`SurfaceLink`] entities and contacts must be
/// written as [`LandingInput`](crate::LandingInput) messages by game code.
pub struct LinkBackend;

impl LandingBackend for LinkBackend {
    fn plugin() -> impl Plugin {
        NoOpBackendPlugin
    }

    fn attach(
        world: &mut World,
        body: Entity,
        surface: Entity,
        anchors: AttachmentAnchors,
    ) -> Option<Entity> {
        let link = world
            .spawn(SurfaceLink {
                body,
                surface,
                anchors,
            })
            .id();
        Some(link)
    }
}
