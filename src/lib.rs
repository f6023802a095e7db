//! Landing / sinking state machine and letterboxed camera for 2D Bevy games.
//!
//! A [`LandingController`] tracks whether a buoyant object is airborne,
//! grounded on a [`Landable`] surface, or submerged. Contacts and requests
//! arrive as [`LandingInput`] messages; transitions are reported as
//! [`LandingEvent`] messages.
//!
//! ```rust,no_run
//! use bevy::prelude::*;
//! use msg_landing_controller::prelude::*;
//!
//! App::new()
//!     .add_plugins(DefaultPlugins)
//!     .add_plugins(LandingPlugin::<LinkBackend>::default())
//!     .add_plugins(LetterboxPlugin)
//!     .run();
//! ```

use std::marker::PhantomData;

use bevy::prelude::*;

pub mod backend;
pub mod config;
pub mod controller;
pub mod effects;
pub mod host;
pub mod messages;
pub mod state;
pub mod systems;
pub mod viewport;

#[cfg(feature = "avian2d")]
pub mod avian;

pub use backend::{LandingBackend, LinkBackend, SurfaceLink};
pub use config::{ConfigError, LandingConfig, LetterboxConfig, SinkConfig};
pub use controller::{Attachment, Landable, LandingController};
pub use messages::{LandingEvent, LandingEventKind, LandingInput};
pub use state::LandingState;
pub use viewport::{LetterboxCamera, LetterboxPlugin};

pub mod prelude {
    pub use crate::backend::{AttachmentAnchors, LandingBackend, LinkBackend, SurfaceLink};
    pub use crate::config::{ConfigError, LandingConfig, LetterboxConfig, SinkConfig};
    pub use crate::controller::{Attachment, Landable, LandingController};
    pub use crate::effects::{SplashParticles, SplashSound};
    pub use crate::host::LandingHost;
    pub use crate::messages::{LandingEvent, LandingEventKind, LandingInput};
    pub use crate::state::LandingState;
    pub use crate::viewport::{LetterboxCamera, LetterboxPlugin};
    pub use crate::{LandingPlugin, LandingSet};

    #[cfg(feature = "avian2d")]
    pub use crate::avian::Avian2dBackend;
}

/// Ordering of the landing systems within `Update`.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LandingSet {
    /// Backends and timers write [`LandingInput`] messages.
    Contacts,
    /// Queued inputs are applied to controllers.
    Transitions,
    /// Splash effects age and expire.
    Effects,
}

/// Plugin adding the landing state machine for physics backend `B`.
pub struct LandingPlugin<B: LandingBackend> {
    _backend: PhantomData<B>,
}

impl<B: LandingBackend> Default for LandingPlugin<B> {
    fn default() -> Self {
        Self {
            _backend: PhantomData,
        }
    }
}

impl<B: LandingBackend> Plugin for LandingPlugin<B> {
    fn build(&self, app: &mut App) {
        app.add_message::<LandingInput>();
        app.add_message::<LandingEvent>();

        app.register_type::<LandingController>()
            .register_type::<LandingConfig>()
            .register_type::<Landable>()
            .register_type::<SurfaceLink>()
            .register_type::<effects::SplashParticles>();

        app.configure_sets(
            Update,
            (
                LandingSet::Contacts,
                LandingSet::Transitions,
                LandingSet::Effects,
            )
                .chain(),
        );

        app.add_systems(
            Update,
            (systems::start_spawn_landings, systems::tick_pending_landings)
                .chain()
                .in_set(LandingSet::Contacts),
        );
        app.add_systems(
            Update,
            systems::apply_landing_inputs::<B>.in_set(LandingSet::Transitions),
        );
        app.add_systems(
            Update,
            effects::expire_splashes.in_set(LandingSet::Effects),
        );

        app.add_plugins(B::plugin());
    }
}
