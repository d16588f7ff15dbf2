//! Fire producer: spawn a bullet from the local character's eye along the
//! view direction.

use avian3d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::state::GameState;
use crate::common::tunables::Tunables;
use crate::plugins::net::NetRole;
use crate::plugins::player::{Character, LifeState, LocallyControlled, LookAngles};

use super::components::{bullet_layers, Bullet, Lifetime};

/// Spawn a bullet on fire input. Authority-only: observers see the replicated
/// projectile, never originate one.
///
/// `Option<Res<ButtonInput<MouseButton>>>` makes this a no-op in headless
/// test apps where no input resources exist.
pub fn fire_player_bullets(
    mut commands: Commands,
    role: Res<NetRole>,
    buttons: Option<Res<ButtonInput<MouseButton>>>,
    tunables: Res<Tunables>,
    q_player: Query<
        (Entity, &Transform, &LookAngles, &LifeState),
        (With<Character>, With<LocallyControlled>),
    >,
) {
    if !role.is_authority() {
        return;
    }
    let Some(buttons) = buttons else {
        return;
    };
    if !buttons.just_pressed(MouseButton::Left) {
        return;
    }

    let Ok((player, tf, look, life)) = q_player.single() else {
        debug!("no locally controlled character to fire from");
        return;
    };
    if *life == LifeState::Dead {
        return;
    }

    let dir = Quat::from_rotation_y(look.yaw) * Quat::from_rotation_x(look.pitch) * Vec3::NEG_Z;
    let eye = tf.translation + Vec3::Y * tunables.eye_height;
    let origin = eye + dir * 0.5;

    spawn_bullet(
        &mut commands,
        &tunables,
        origin,
        dir * tunables.bullet_speed,
        tunables.bullet_damage,
        Some(player),
    );
}

/// Spawn one bullet. Split out so game modes or AI weapons can fire too.
pub fn spawn_bullet(
    commands: &mut Commands,
    tunables: &Tunables,
    origin: Vec3,
    velocity: Vec3,
    damage: f32,
    owner: Option<Entity>,
) -> Entity {
    // Bouncy sphere: bullets ricochet off static world geometry until their
    // lifespan runs out.
    let restitution = Restitution::new(0.95).with_combine_rule(CoefficientCombine::Max);
    let friction = Friction::ZERO;

    commands
        .spawn((
            Name::new("Bullet"),
            Bullet {
                damage,
                owner,
                origin,
            },
            Lifetime(Timer::from_seconds(
                tunables.bullet_lifespan_secs,
                TimerMode::Once,
            )),
            Transform::from_translation(origin),
            RigidBody::Dynamic,
            Collider::sphere(tunables.bullet_radius),
            bullet_layers(),
            restitution,
            friction,
            GravityScale(tunables.bullet_gravity_scale),
            LinearVelocity(velocity),
            // Opt-in collision events: Avian only emits CollisionStart if one
            // collider has this marker.
            CollisionEventsEnabled,
            DespawnOnExit(GameState::InGame),
        ))
        .id()
}
