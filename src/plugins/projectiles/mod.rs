//! Projectiles: fire producer, lifespan, impact resolution.
//!
//! Data flow:
//! ```text
//! Update            fire::fire_player_bullets   (authority-only producer)
//! FixedUpdate       lifetime                    (lifespan timeout despawn)
//! FixedPostUpdate   impact::resolve_bullet_impacts
//!                     after Avian collision event emission,
//!                     before health::apply_point_damage
//! ```
//!
//! A bullet is destroyed by its first qualifying collision (health-capable
//! target or simulating rigid body) or by its lifespan timer, whichever comes
//! first. Every contact event — including a non-destructive ricochet off
//! static geometry — broadcasts exactly one `ImpactEffects`.

use avian3d::collision::narrow_phase::CollisionEventSystems;
use bevy::prelude::*;

use crate::common::state::GameState;
use crate::plugins::health::apply_point_damage;

pub mod components;
pub mod fire;
pub mod impact;

pub use components::{Bullet, Lifetime};

pub fn plugin(app: &mut App) {
    app.add_systems(
        Update,
        fire::fire_player_bullets.run_if(in_state(GameState::InGame)),
    )
    .add_systems(FixedUpdate, lifetime)
    .add_systems(
        FixedPostUpdate,
        impact::resolve_bullet_impacts
            .after(CollisionEventSystems)
            .before(apply_point_damage),
    );
}

/// Lifespan timeout: the passive scheduled removal.
pub fn lifetime(
    mut commands: Commands,
    time: Res<Time<Fixed>>,
    mut q: Query<(Entity, &mut Lifetime)>,
) {
    for (e, mut lt) in &mut q {
        lt.tick(time.delta());
        if lt.is_finished() {
            commands.entity(e).despawn();
        }
    }
}
