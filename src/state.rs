//! Landing lifecycle phases.

use bevy::prelude::*;

/// Lifecycle phase of a floating object.
///
/// Objects start [`LandingState::Airborne`]. There is no terminal state.
#[derive(Reflect, Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum LandingState {
    /// Free in the air (or drifting), not attached to anything.
    #[default]
    Airborne,
    /// Attached to exactly one landable surface.
    Grounded,
    /// Sunk below the fluid surface, drawn smaller and dimmed.
    Submerged,
}

impl LandingState {
    pub fn is_airborne(self) -> bool {
        self == Self::Airborne
    }

    pub fn is_grounded(self) -> bool {
        self == Self::Grounded
    }

    pub fn is_submerged(self) -> bool {
        self == Self::Submerged
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_airborne() {
        assert_eq!(LandingState::default(), LandingState::Airborne);
    }

    #[test]
    fn predicates_are_exclusive() {
        for state in [
            LandingState::Airborne,
            LandingState::Grounded,
            LandingState::Submerged,
        ] {
            let set = [state.is_airborne(), state.is_grounded(), state.is_submerged()];
            assert_eq!(set.iter().filter(|&&b| b).count(), 1, "{state:?}");
        }
    }
}
