//! Render-only: first-person camera attached to the local character.

use bevy::prelude::*;

use crate::common::tunables::Tunables;
use crate::plugins::player::{Character, LocallyControlled, LookAngles};

#[derive(Component)]
pub struct MainCamera;

pub fn plugin(app: &mut App) {
    app.add_systems(Update, (attach_first_person_camera, apply_camera_pitch));
}

/// Attach the camera at eye height when a locally controlled character
/// appears.
fn attach_first_person_camera(
    mut commands: Commands,
    tunables: Res<Tunables>,
    q_new: Query<Entity, (Added<LocallyControlled>, With<Character>)>,
) {
    for character in &q_new {
        let camera = commands
            .spawn((
                Name::new("FirstPersonCamera"),
                MainCamera,
                Camera3d::default(),
                Transform::from_xyz(0.0, tunables.eye_height, 0.0),
            ))
            .id();
        commands.entity(character).add_child(camera);
    }
}

/// Pitch lives on the camera; yaw already rotates the body transform.
fn apply_camera_pitch(
    q_look: Query<&LookAngles, With<LocallyControlled>>,
    mut q_camera: Query<&mut Transform, With<MainCamera>>,
) {
    let Ok(look) = q_look.single() else {
        return;
    };
    let Ok(mut tf) = q_camera.single_mut() else {
        return;
    };
    tf.rotation = Quat::from_rotation_x(look.pitch);
}
