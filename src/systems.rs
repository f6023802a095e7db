//! Systems driving the landing state machine.

use bevy::ecs::message::{MessageCursor, Messages};
use bevy::prelude::*;

use crate::backend::LandingBackend;
use crate::config::LandingConfig;
use crate::controller::LandingController;
use crate::host::WorldHost;
use crate::messages::LandingInput;

/// Countdown to the landing attempt of an object spawned with `land_on_spawn`.
#[derive(Component, Debug, Clone)]
pub struct PendingLanding(pub Timer);

/// Schedule a landing attempt for newly spawned objects that asked for one.
pub fn start_spawn_landings(
    mut commands: Commands,
    q_added: Query<(Entity, &LandingController, Option<&LandingConfig>), Added<LandingController>>,
) {
    for (entity, controller, config) in &q_added {
        if !controller.land_on_spawn {
            continue;
        }
        let delay = config.copied().unwrap_or_default().spawn_landing_delay;
        commands
            .entity(entity)
            .insert(PendingLanding(Timer::from_seconds(delay, TimerMode::Once)));
    }
}

/// Turn finished spawn countdowns into landing attempts.
pub fn tick_pending_landings(
    mut commands: Commands,
    time: Res<Time>,
    mut q_pending: Query<(Entity, &mut PendingLanding)>,
    mut inputs: MessageWriter<LandingInput>,
) {
    for (entity, mut pending) in &mut q_pending {
        if pending.0.tick(time.delta()).just_finished() {
            inputs.write(LandingInput::TryLand(entity));
            commands.entity(entity).remove::<PendingLanding>();
        }
    }
}

/// Apply every queued [`LandingInput`] in write order.
///
/// Runs exclusively so each transition sees the effects of the previous one.
/// Inputs are read through a private cursor and left to expire normally, so
/// other `MessageReader<LandingInput>`s still see them.
pub fn apply_landing_inputs<B: LandingBackend>(
    world: &mut World,
    mut cursor: Local<MessageCursor<LandingInput>>,
) {
    let inputs: Vec<LandingInput> = match world.get_resource::<Messages<LandingInput>>() {
        Some(messages) => cursor.read(messages).copied().collect(),
        None => return,
    };

    for input in inputs {
        apply_landing_input::<B>(world, input);
    }
}

fn apply_landing_input<B: LandingBackend>(world: &mut World, input: LandingInput) {
    let entity = input.object();
    let Some(mut controller) = world.get::<LandingController>(entity).cloned() else {
        warn!("Landing input {input:?} targets {entity}, which has no LandingController");
        return;
    };
    let config = world
        .get::<LandingConfig>(entity)
        .copied()
        .unwrap_or_default();
    let before = controller.state();

    let landable = match input {
        LandingInput::SurfaceEntered { surface, .. } => B::is_landable(world, surface),
        _ => false,
    };

    {
        let mut host = WorldHost::<B>::new(world, entity, config.splash_lifetime);
        match input {
            LandingInput::SurfaceEntered { surface, .. } => {
                if controller.on_surface_enter(surface, landable) {
                    trace!("{entity} overlaps landable surface {surface}");
                }
            }
            LandingInput::SurfaceExited { surface, .. } => {
                controller.on_surface_exit(surface, &config, &mut host);
            }
            LandingInput::PhysicalContact { .. } => controller.on_physical_contact(&mut host),
            LandingInput::TryLand(_) => {
                controller.try_land(&config, &mut host);
            }
            LandingInput::Unground(_) => controller.unground(&mut host),
            LandingInput::Sink(_) => {
                controller.sink(&config, &mut host);
            }
            LandingInput::Surface(_) => {
                if !controller.surface(&config, &mut host) {
                    debug!("{entity} asked to surface while {:?}", controller.state());
                }
            }
        }
    }

    let after = controller.state();
    if before != after {
        debug!("{entity}: {before:?} -> {after:?}");
    }

    if let Some(mut slot) = world.get_mut::<LandingController>(entity) {
        *slot = controller;
    }
}
