//! Input sampling + movement application.
//!
//! Update-phase systems sample the raw input surface into a `PlayerInput`
//! resource; the FixedUpdate system turns it into capsule velocity. All of it
//! is a no-op for characters whose `Movement` is disabled or whose controller
//! is in cinematic mode.

use avian3d::prelude::*;
use bevy::input::mouse::AccumulatedMouseMotion;
use bevy::prelude::*;

use crate::common::tunables::Tunables;

use super::{Character, ControlledBy, LocallyControlled, LookAngles, Movement, PlayerController};

/// Sampled per-frame input for the locally controlled character.
#[derive(Resource, Debug, Default)]
pub struct PlayerInput {
    pub move_axis: Vec2,
    pub look_axis: Vec2,
    pub jump: bool,
    pub crouch_toggle: bool,
}

/// Sample keyboard + mouse into `PlayerInput`.
///
/// Headless apps have no input resources; that is a missing-binding condition,
/// logged once, and input stays at its default.
pub fn gather_input(
    keys: Option<Res<ButtonInput<KeyCode>>>,
    mouse_motion: Option<Res<AccumulatedMouseMotion>>,
    mut input: ResMut<PlayerInput>,
) {
    let Some(keys) = keys else {
        bevy::log::warn_once!("no keyboard input resource; player input bindings are inactive");
        *input = PlayerInput::default();
        return;
    };

    let mut axis = Vec2::ZERO;
    if keys.pressed(KeyCode::KeyW) {
        axis.y += 1.0;
    }
    if keys.pressed(KeyCode::KeyS) {
        axis.y -= 1.0;
    }
    if keys.pressed(KeyCode::KeyA) {
        axis.x -= 1.0;
    }
    if keys.pressed(KeyCode::KeyD) {
        axis.x += 1.0;
    }

    input.move_axis = if axis.length_squared() > 0.0 {
        axis.normalize()
    } else {
        Vec2::ZERO
    };

    input.look_axis = mouse_motion.map(|m| m.delta).unwrap_or(Vec2::ZERO);
    input.jump = keys.pressed(KeyCode::Space);
    input.crouch_toggle = keys.just_pressed(KeyCode::KeyC);
}

/// Accumulate look input into `LookAngles` and rotate the body to match yaw.
pub fn apply_look(
    tunables: Res<Tunables>,
    input: Res<PlayerInput>,
    mut q: Query<
        (&mut LookAngles, &mut Transform, &Movement),
        (With<Character>, With<LocallyControlled>),
    >,
) {
    let Ok((mut look, mut tf, movement)) = q.single_mut() else {
        return;
    };
    if !movement.enabled {
        return;
    }

    let sens = tunables.look_sensitivity.to_radians();
    look.yaw -= input.look_axis.x * sens;
    look.pitch = (look.pitch - input.look_axis.y * sens)
        .clamp(-std::f32::consts::FRAC_PI_2, std::f32::consts::FRAC_PI_2);

    tf.rotation = Quat::from_rotation_y(look.yaw);
}

/// Crouch is a toggle on the movement integrator.
pub fn toggle_crouch(
    input: Res<PlayerInput>,
    mut q: Query<&mut Movement, (With<Character>, With<LocallyControlled>)>,
) {
    if !input.crouch_toggle {
        return;
    }
    let Ok(mut movement) = q.single_mut() else {
        return;
    };
    if movement.enabled {
        movement.crouched = !movement.crouched;
    }
}

/// Turn sampled input into capsule velocity.
pub fn apply_movement(
    tunables: Res<Tunables>,
    input: Res<PlayerInput>,
    q_controllers: Query<&PlayerController>,
    mut q: Query<
        (
            &mut LinearVelocity,
            &Transform,
            &mut Movement,
            Option<&ControlledBy>,
        ),
        (With<Character>, With<LocallyControlled>),
    >,
) {
    let Ok((mut vel, tf, mut movement, controlled_by)) = q.single_mut() else {
        return;
    };

    if !movement.enabled {
        vel.0 = Vec3::ZERO;
        return;
    }

    // Cinematic mode disables input interpretation but not physics.
    if let Some(&ControlledBy(controller)) = controlled_by {
        if q_controllers.get(controller).is_ok_and(|pc| pc.cinematic) {
            return;
        }
    }

    let speed = if movement.crouched {
        tunables.move_speed * tunables.crouch_speed_factor
    } else {
        tunables.move_speed
    };

    let forward = tf.forward().as_vec3();
    let right = tf.right().as_vec3();
    let planar = (forward * input.move_axis.y + right * input.move_axis.x) * speed;

    vel.0.x = planar.x;
    vel.0.z = planar.z;

    // Near-zero vertical velocity stands in for a grounded check; the jump
    // only re-arms after two consecutive idle ticks so the single-tick zero
    // crossing at a jump's apex cannot grant a mid-air impulse.
    let vertical_idle = vel.0.y.abs() < 0.01;
    if vertical_idle && movement.settled {
        movement.jump_armed = true;
    }

    if input.jump && movement.jump_armed && vertical_idle {
        vel.0.y = tunables.jump_speed;
        movement.jump_armed = false;
    }

    // Settled tracks the post-jump velocity, so the tick that launches a
    // jump never counts as idle.
    movement.settled = vel.0.y.abs() < 0.01;
}
