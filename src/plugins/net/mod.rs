//! Authority role + broadcast channels.
//!
//! The simulation distinguishes one **authoritative** instance from any number
//! of **observer** instances. Canonical decisions (damage application, bullet
//! destruction, the death-effects broadcast) run only on the authority; every
//! other instance mirrors outcomes.
//!
//! Broadcasts are modeled as buffered Bevy messages written exclusively by
//! authority-gated systems and consumed by presentation systems on every
//! instance. In a networked build these channels map onto a reliable, ordered
//! one-to-many transport; consumers must therefore tolerate re-delivery
//! (re-applying a visual transition is harmless).

use bevy::prelude::*;

/// Which role this simulation instance plays.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NetRole {
    #[default]
    Authority,
    Observer,
}

impl NetRole {
    #[inline]
    pub fn is_authority(self) -> bool {
        matches!(self, NetRole::Authority)
    }
}

/// Broadcast: play impact effects at a world position.
///
/// Written exactly once per bullet contact event, destructive or not.
#[derive(Message, Clone, Copy, Debug)]
pub struct ImpactEffects {
    pub point: Vec3,
    pub normal: Vec3,
}

/// Broadcast: play the visual death transition for a character.
///
/// Consumers are idempotent; receiving this twice for the same character must
/// leave the world in the same state as receiving it once.
#[derive(Message, Clone, Copy, Debug)]
pub struct DeathEffects {
    pub character: Entity,
}

pub fn plugin(app: &mut App) {
    app.init_resource::<NetRole>();
    app.add_message::<ImpactEffects>();
    app.add_message::<DeathEffects>();
}
