//! Collision layers.
//!
//! `Pawn` and `WorldDynamic` are separate layers because a dead character's
//! capsule stops filtering against exactly those two while still colliding
//! with `World` and `Projectile`.

use avian3d::prelude::*;

#[derive(PhysicsLayer, Default, Clone, Copy, Debug)]
pub enum Layer {
    #[default]
    Default,
    World,
    WorldDynamic,
    Pawn,
    Projectile,
}
