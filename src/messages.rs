//! Messages flowing into and out of the landing state machine.
//!
//! A simulation driver (a physics backend plugin or game code) writes
//! [`LandingInput`] messages. They are applied in write order by
//! [`apply_landing_inputs`](crate::systems::apply_landing_inputs), which in
//! turn writes [`LandingEvent`] messages for any number of readers.

use bevy::prelude::*;

/// A request or contact report for one floating object.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LandingInput {
    /// `object` started overlapping `surface`. Ignored unless the backend
    /// classifies `surface` as landable.
    SurfaceEntered { object: Entity, surface: Entity },
    /// `object` stopped overlapping `surface`.
    SurfaceExited { object: Entity, surface: Entity },
    /// `object` hit something solid.
    PhysicalContact { object: Entity },
    /// Attempt to land on the oldest overlapping surface, sinking otherwise.
    TryLand(Entity),
    /// Release any attachment and become airborne.
    Unground(Entity),
    /// Submerge the object.
    Sink(Entity),
    /// Bring a submerged object back up.
    Surface(Entity),
}

impl LandingInput {
    /// The floating object this input targets.
    pub fn object(&self) -> Entity {
        match *self {
            LandingInput::SurfaceEntered { object, .. }
            | LandingInput::SurfaceExited { object, .. }
            | LandingInput::PhysicalContact { object } => object,
            LandingInput::TryLand(object)
            | LandingInput::Unground(object)
            | LandingInput::Sink(object)
            | LandingInput::Surface(object) => object,
        }
    }
}

/// What happened to a floating object.
#[derive(Reflect, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LandingEventKind {
    Landed,
    Sank,
    Surfaced,
}

/// Notification written after a landing transition.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct LandingEvent {
    pub entity: Entity,
    pub kind: LandingEventKind,
}
