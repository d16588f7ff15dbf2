//! Health capability + point damage pipeline.
//!
//! `Health` is an opt-in component: "can this entity take damage" is a typed
//! query (`With<Health>` / `get_mut`), not a runtime class scan. Damage flows
//! through a buffered `PointDamage` message so producers (bullet impacts,
//! later melee/explosions) never touch health state directly.
//!
//! Death is a one-shot notification: `Died` is written the first time
//! accumulated damage reaches the threshold and never again for that entity.

use bevy::prelude::*;

use crate::plugins::net::NetRole;

/// Damage-intake capability.
#[derive(Component, Debug, Clone)]
pub struct Health {
    pub current: f32,
    pub max: f32,
}

impl Health {
    pub fn new(max: f32) -> Self {
        Self { current: max, max }
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        self.current <= 0.0
    }

    #[inline]
    pub fn fraction(&self) -> f32 {
        self.current / self.max
    }
}

impl Default for Health {
    fn default() -> Self {
        Self::new(100.0)
    }
}

/// Directional point damage, attributed to an instigating controller.
///
/// `amount` is clamped non-negative on application; `instigator` is the
/// controller entity of whoever fired (or `None` if the causer is not a
/// controllable entity).
#[derive(Message, Clone, Copy, Debug)]
pub struct PointDamage {
    pub target: Entity,
    pub amount: f32,
    pub origin: Vec3,
    pub hit_point: Vec3,
    pub instigator: Option<Entity>,
    pub causer: Option<Entity>,
}

/// One-shot death notification.
#[derive(Message, Clone, Copy, Debug)]
pub struct Died {
    pub entity: Entity,
    pub instigator: Option<Entity>,
}

/// Apply buffered point damage. Authority only; observers receive outcomes
/// through the broadcast channels instead.
pub fn apply_point_damage(
    role: Res<NetRole>,
    mut damage: MessageReader<PointDamage>,
    mut deaths: MessageWriter<Died>,
    mut q_health: Query<&mut Health>,
) {
    if !role.is_authority() {
        return;
    }

    for msg in damage.read() {
        let Ok(mut health) = q_health.get_mut(msg.target) else {
            continue;
        };

        // Already-dead targets absorb damage silently; the notification
        // must not fire a second time.
        if health.is_dead() {
            continue;
        }

        health.current = (health.current - msg.amount.max(0.0)).max(0.0);

        if health.is_dead() {
            deaths.write(Died {
                entity: msg.target,
                instigator: msg.instigator,
            });
        }
    }
}

pub fn plugin(app: &mut App) {
    app.add_message::<PointDamage>();
    app.add_message::<Died>();
    app.add_systems(FixedPostUpdate, apply_point_damage);
}
