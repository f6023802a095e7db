//! Avian2D physics backend implementation.
//!
//! This module provides the landing backend for Avian2D. Enable with the
//! `avian2d` feature.
//!
//! Landable surfaces are expected to be sensors: overlapping a sensor
//! reports a surface contact, while touching any solid collider counts as a
//! physical contact that knocks the object loose. Attachments are
//! [`RevoluteJoint`]s between the surface body and the floating object.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::backend::{AttachmentAnchors, LandingBackend, SurfaceLink};
use crate::controller::{Landable, LandingController};
use crate::messages::LandingInput;
use crate::LandingSet;

/// Avian2D physics backend for the landing controller.
pub struct Avian2dBackend;

impl LandingBackend for Avian2dBackend {
    fn plugin() -> impl Plugin {
        Avian2dBackendPlugin
    }

    fn is_landable(world: &World, entity: Entity) -> bool {
        if world.get::<Landable>(entity).is_some() {
            return true;
        }
        // Sensor colliders may be children of a landable body.
        world
            .get::<ColliderOf>(entity)
            .is_some_and(|collider_of| world.get::<Landable>(collider_of.body).is_some())
    }

    fn surface_body(world: &World, surface: Entity) -> Entity {
        world
            .get::<ColliderOf>(surface)
            .map(|collider_of| collider_of.body)
            .unwrap_or(surface)
    }

    fn attach(
        world: &mut World,
        body: Entity,
        surface: Entity,
        anchors: AttachmentAnchors,
    ) -> Option<Entity> {
        let joint = RevoluteJoint::new(surface, body)
            .with_local_anchor1(anchors.surface_local)
            .with_local_anchor2(anchors.body_local);

        let link = world
            .spawn((
                joint,
                SurfaceLink {
                    body,
                    surface,
                    anchors,
                },
            ))
            .id();
        Some(link)
    }
}

/// Plugin that sets up Avian2D-specific systems for the landing controller.
pub struct Avian2dBackendPlugin;

impl Plugin for Avian2dBackendPlugin {
    fn build(&self, app: &mut App) {
        app.add_observer(enable_controller_collision_events);
        app.add_observer(enable_collider_collision_events);
        app.add_systems(Update, translate_collisions.in_set(LandingSet::Contacts));
    }
}

/// Avian only reports collisions for colliders that opt in. A floating
/// object opts in itself and any collider already attached below it.
fn enable_controller_collision_events(
    add: On<Add, LandingController>,
    mut commands: Commands,
    q_children: Query<&Children>,
    q_colliders: Query<&ColliderOf, Without<CollisionEventsEnabled>>,
) {
    let body = add.entity;
    commands.entity(body).insert(CollisionEventsEnabled);

    for descendant in q_children.iter_descendants(body) {
        if q_colliders.get(descendant).is_ok_and(|c| c.body == body) {
            commands.entity(descendant).insert(CollisionEventsEnabled);
        }
    }
}

/// Colliders attached to a floating object's body opt in too.
fn enable_collider_collision_events(
    add: On<Add, ColliderOf>,
    mut commands: Commands,
    q_colliders: Query<&ColliderOf, Without<CollisionEventsEnabled>>,
    q_controllers: Query<(), With<LandingController>>,
) {
    let Ok(collider_of) = q_colliders.get(add.entity) else {
        return;
    };
    if q_controllers.contains(collider_of.body) {
        commands.entity(add.entity).insert(CollisionEventsEnabled);
    }
}

/// Which floating object, if any, owns `collider`.
fn floating_object(
    collider: Entity,
    body: Option<Entity>,
    q_controllers: &Query<(), With<LandingController>>,
) -> Option<Entity> {
    body.filter(|&b| q_controllers.contains(b))
        .or_else(|| q_controllers.contains(collider).then_some(collider))
}

/// Translate Avian collision messages into landing inputs.
///
/// Starts are written before ends so a surface swapped within one step is
/// entered before the old one is left.
fn translate_collisions(
    mut started: MessageReader<CollisionStart>,
    mut ended: MessageReader<CollisionEnd>,
    q_controllers: Query<(), With<LandingController>>,
    q_sensors: Query<(), With<Sensor>>,
    mut inputs: MessageWriter<LandingInput>,
) {
    for collision in started.read() {
        let sides = [
            (collision.collider1, collision.body1, collision.collider2),
            (collision.collider2, collision.body2, collision.collider1),
        ];
        for (own, own_body, other) in sides {
            let Some(object) = floating_object(own, own_body, &q_controllers) else {
                continue;
            };
            if q_sensors.contains(other) {
                inputs.write(LandingInput::SurfaceEntered {
                    object,
                    surface: other,
                });
            } else if !q_sensors.contains(own) {
                inputs.write(LandingInput::PhysicalContact { object });
            }
        }
    }

    for collision in ended.read() {
        let sides = [
            (collision.collider1, collision.body1, collision.collider2),
            (collision.collider2, collision.body2, collision.collider1),
        ];
        for (own, own_body, other) in sides {
            let Some(object) = floating_object(own, own_body, &q_controllers) else {
                continue;
            };
            if q_sensors.contains(other) {
                inputs.write(LandingInput::SurfaceExited {
                    object,
                    surface: other,
                });
            }
        }
    }
}
