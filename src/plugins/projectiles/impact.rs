//! Impact resolution.
//!
//! Per `CollisionStart`, in order:
//! 1. health-capable target -> point damage attributed to the owner's
//!    controller, destroy self;
//! 2. simulating rigid body -> impulse along bullet velocity at the impact
//!    point, destroy self;
//! 3. anything else (static world) -> no destructive action; the bullet
//!    bounces until its lifespan expires.
//!
//! Every contact event broadcasts `ImpactEffects` exactly once, destructive
//! or not — a ricochet off a wall still sparks.
//!
//! Non-authoritative instances skip the handler entirely. A per-run dedupe
//! set guarantees a bullet never processes two destructive collisions even
//! when several contacts land in the same batch.

use avian3d::prelude::*;
use bevy::platform::collections::HashSet;
use bevy::prelude::*;

use crate::common::tunables::Tunables;
use crate::plugins::health::{Health, PointDamage};
use crate::plugins::net::{ImpactEffects, NetRole};
use crate::plugins::player::ControlledBy;

use super::components::Bullet;

#[derive(Clone, Copy, Debug)]
struct CollisionTarget {
    collider: Entity,
    body: Option<Entity>,
}

impl CollisionTarget {
    #[inline]
    fn gameplay_owner(self) -> Entity {
        self.body.unwrap_or(self.collider)
    }
}

#[inline]
fn targets(ev: &CollisionStart) -> (CollisionTarget, CollisionTarget) {
    (
        CollisionTarget {
            collider: ev.collider1,
            body: ev.body1,
        },
        CollisionTarget {
            collider: ev.collider2,
            body: ev.body2,
        },
    )
}

pub fn resolve_bullet_impacts(
    role: Res<NetRole>,
    mut commands: Commands,
    mut started: MessageReader<CollisionStart>,
    tunables: Res<Tunables>,
    mut impacts: MessageWriter<ImpactEffects>,
    mut damage: MessageWriter<PointDamage>,
    q_is_bullet: Query<(), With<Bullet>>,
    q_bullets: Query<(&Bullet, &Transform, &LinearVelocity)>,
    q_health: Query<(), With<Health>>,
    q_bodies: Query<(&RigidBody, &Transform), Without<Bullet>>,
    q_controlled: Query<&ControlledBy>,
    mut resolved: Local<HashSet<Entity>>,
) {
    if !role.is_authority() {
        return;
    }
    resolved.clear();

    for ev in started.read() {
        let (t1, t2) = targets(ev);

        // Exactly one side must be a bullet.
        let b1 = q_is_bullet.contains(t1.collider);
        let b2 = q_is_bullet.contains(t2.collider);
        if !(b1 ^ b2) {
            continue;
        }
        let (bullet_side, other_side) = if b1 { (t1, t2) } else { (t2, t1) };

        // A destroyed bullet processes no further contacts this run.
        if resolved.contains(&bullet_side.collider) {
            continue;
        }

        let Ok((bullet, bullet_tf, vel)) = q_bullets.get(bullet_side.collider) else {
            continue;
        };

        let struck = other_side.gameplay_owner();
        let hit_point = bullet_tf.translation;
        let hit_normal = -vel.0.try_normalize().unwrap_or(Vec3::Y);
        let mut destructive = false;

        if q_health.contains(struck) {
            // Attribute damage to the owner's controller, if the owner is a
            // controllable entity.
            let instigator = bullet
                .owner
                .and_then(|owner| q_controlled.get(owner).ok())
                .map(|&ControlledBy(controller)| controller);

            damage.write(PointDamage {
                target: struck,
                amount: bullet.damage,
                origin: bullet.origin,
                hit_point,
                instigator,
                causer: bullet.owner,
            });
            destructive = true;
        } else if let Ok((body, body_tf)) = q_bodies.get(struck) {
            if matches!(body, RigidBody::Dynamic) {
                let mut impulse = ExternalImpulse::default().with_persistence(false);
                impulse.apply_impulse_at_point(
                    vel.0 * tunables.impact_impulse_scale,
                    hit_point - body_tf.translation,
                    Vec3::ZERO,
                );
                commands.entity(struck).insert(impulse);
                destructive = true;
            }
        }

        // Exactly one broadcast per contact event, destructive or not.
        impacts.write(ImpactEffects {
            point: hit_point,
            normal: hit_normal,
        });

        if destructive {
            resolved.insert(bullet_side.collider);
            commands.entity(bullet_side.collider).despawn();
        }
    }
}
