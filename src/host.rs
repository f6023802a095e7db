//! Collaborators of the landing state machine.
//!
//! [`LandingHost`] is everything [`LandingController`](crate::LandingController)
//! needs from the outside world. [`WorldHost`] implements it on top of a Bevy
//! `World`, delegating physics attachments to a [`LandingBackend`].

use std::marker::PhantomData;

use bevy::prelude::*;

use crate::backend::{AttachmentAnchors, LandingBackend};
use crate::effects::{splash_particles, splash_sound, SplashSound};
use crate::messages::{LandingEvent, LandingEventKind};

/// Side effects available to the landing state machine.
pub trait LandingHost {
    /// Link the object to `surface`, anchored at `anchor_point` (an offset
    /// from the object's position). Returns the link entity, or `None` if
    /// the surface cannot be attached to.
    fn attach(&mut self, surface: Entity, anchor_point: Vec2) -> Option<Entity>;

    /// Remove a link created by [`attach`](Self::attach). Unknown links are ignored.
    fn detach(&mut self, link: Entity);

    /// Multiply the object's local X/Y scale.
    fn scale_by(&mut self, factor: f32);

    /// Colors of every sprite in the object's hierarchy, in a stable order.
    fn sprite_colors(&self) -> Vec<Color>;

    /// Overwrite sprite colors, in the order returned by [`sprite_colors`](Self::sprite_colors).
    fn set_sprite_colors(&mut self, colors: &[Color]);

    /// Move the object forwards (positive) or backwards in draw order.
    fn shift_depth(&mut self, delta: f32);

    /// Spawn a one-shot splash particle effect at the object's position.
    fn spawn_splash(&mut self);

    /// Play the splash sound at the object's position.
    fn play_splash_sound(&mut self);

    /// Tell subscribers about a transition.
    fn notify(&mut self, kind: LandingEventKind);
}

/// [`LandingHost`] for one floating object living in a Bevy `World`.
pub struct WorldHost<'w, B: LandingBackend> {
    world: &'w mut World,
    entity: Entity,
    splash_lifetime: f32,
    _backend: PhantomData<B>,
}

impl<'w, B: LandingBackend> WorldHost<'w, B> {
    pub fn new(world: &'w mut World, entity: Entity, splash_lifetime: f32) -> Self {
        Self {
            world,
            entity,
            splash_lifetime,
            _backend: PhantomData,
        }
    }

    fn position(&self) -> Vec3 {
        self.world
            .get::<GlobalTransform>(self.entity)
            .map(GlobalTransform::translation)
            .unwrap_or(Vec3::ZERO)
    }

    /// The object and its descendants that carry a `Sprite`, depth first.
    fn sprite_entities(&self) -> Vec<Entity> {
        let mut sprites = Vec::new();
        let mut stack = vec![self.entity];
        while let Some(entity) = stack.pop() {
            if self.world.get::<Sprite>(entity).is_some() {
                sprites.push(entity);
            }
            if let Some(children) = self.world.get::<Children>(entity) {
                // Reverse so children are visited in their stored order.
                stack.extend(children[..].iter().rev().copied());
            }
        }
        sprites
    }
}

impl<B: LandingBackend> LandingHost for WorldHost<'_, B> {
    fn attach(&mut self, surface: Entity, anchor_point: Vec2) -> Option<Entity> {
        let surface = B::surface_body(self.world, surface);
        let body = self.world.get::<GlobalTransform>(self.entity)?;
        let surface_transform = self.world.get::<GlobalTransform>(surface)?;
        let anchors = AttachmentAnchors::compute(body, surface_transform, anchor_point);
        B::attach(self.world, self.entity, surface, anchors)
    }

    fn detach(&mut self, link: Entity) {
        B::detach(self.world, link);
    }

    fn scale_by(&mut self, factor: f32) {
        if let Some(mut transform) = self.world.get_mut::<Transform>(self.entity) {
            transform.scale.x *= factor;
            transform.scale.y *= factor;
        }
    }

    fn sprite_colors(&self) -> Vec<Color> {
        self.sprite_entities()
            .into_iter()
            .filter_map(|entity| self.world.get::<Sprite>(entity).map(|s| s.color))
            .collect()
    }

    fn set_sprite_colors(&mut self, colors: &[Color]) {
        for (entity, color) in self.sprite_entities().into_iter().zip(colors) {
            if let Some(mut sprite) = self.world.get_mut::<Sprite>(entity) {
                sprite.color = *color;
            }
        }
    }

    fn shift_depth(&mut self, delta: f32) {
        // Children inherit the root's Z, so only the root moves.
        if let Some(mut transform) = self.world.get_mut::<Transform>(self.entity) {
            transform.translation.z += delta;
        }
    }

    fn spawn_splash(&mut self) {
        let position = self.position();
        self.world
            .spawn(splash_particles(position, self.splash_lifetime));
    }

    fn play_splash_sound(&mut self) {
        let Some(sound) = self.world.get_resource::<SplashSound>().cloned() else {
            return;
        };
        let position = self.position();
        self.world.spawn(splash_sound(&sound, position));
    }

    fn notify(&mut self, kind: LandingEventKind) {
        self.world.write_message(LandingEvent {
            entity: self.entity,
            kind,
        });
    }
}
