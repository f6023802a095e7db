//! Splash feedback spawned when an object sinks.
//!
//! Particles are plain marker entities placed at the splash position. Attach
//! visuals to them by querying `Added<SplashParticles>`; they despawn on their
//! own once their lifetime runs out.

use bevy::prelude::*;

/// Marker for a one-shot splash particle effect.
#[derive(Component, Reflect, Debug, Clone, Copy, Default)]
#[reflect(Component)]
pub struct SplashParticles;

/// Remaining lifetime of a splash effect.
#[derive(Component, Debug, Clone)]
pub struct SplashLifetime(pub Timer);

impl SplashLifetime {
    pub fn from_seconds(seconds: f32) -> Self {
        Self(Timer::from_seconds(seconds, TimerMode::Once))
    }
}

/// Sound played at the splash position. Without this resource sinking is silent.
#[derive(Resource, Debug, Clone)]
pub struct SplashSound(pub Handle<AudioSource>);

/// Bundle for a splash particle marker at `position`.
pub fn splash_particles(position: Vec3, lifetime: f32) -> impl Bundle {
    (
        SplashParticles,
        SplashLifetime::from_seconds(lifetime),
        Transform::from_translation(position),
    )
}

/// Bundle for a one-shot spatial splash sound at `position`.
pub fn splash_sound(sound: &SplashSound, position: Vec3) -> impl Bundle {
    (
        AudioPlayer::new(sound.0.clone()),
        PlaybackSettings::DESPAWN.with_spatial(true),
        Transform::from_translation(position),
    )
}

/// Despawn splash effects whose lifetime has run out.
pub fn expire_splashes(
    mut commands: Commands,
    time: Res<Time>,
    mut q_splashes: Query<(Entity, &mut SplashLifetime)>,
) {
    for (entity, mut lifetime) in &mut q_splashes {
        if lifetime.0.tick(time.delta()).just_finished() {
            commands.entity(entity).despawn();
        }
    }
}
