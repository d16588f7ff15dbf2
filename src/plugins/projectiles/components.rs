use avian3d::prelude::*;
use bevy::prelude::*;

use crate::common::layers::Layer;

/// Bullet payload, set once by the weapon at fire time and read-only after.
#[derive(Component, Debug, Clone, Copy)]
pub struct Bullet {
    pub damage: f32,
    /// The pawn that fired, if any. Damage is attributed to its controller.
    pub owner: Option<Entity>,
    /// Fire origin, reported as the damage origin point.
    pub origin: Vec3,
}

#[derive(Component, Deref, DerefMut)]
pub struct Lifetime(pub Timer);

#[inline]
pub fn bullet_layers() -> CollisionLayers {
    CollisionLayers::new(
        Layer::Projectile,
        [Layer::World, Layer::WorldDynamic, Layer::Pawn],
    )
}
