//! Game mode: match composition stubs.
//!
//! On entering the match, spawn the player controller entity and the
//! character pawn it drives. The character owns its two visual children by
//! explicit handle (`CharacterMeshes`); the spawn-time visibility split is
//! applied here and re-derived only by the death transition.

use avian3d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::state::GameState;
use crate::common::tunables::Tunables;
use crate::plugins::health::Health;
use crate::plugins::player::{
    alive_pawn_layers, mesh_visibility, Character, CharacterMeshes, ControlledBy, FirstPersonMesh,
    LifeState, LocallyControlled, LookAngles, Movement, PlayerController, ThirdPersonMesh,
};

pub fn plugin(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), spawn_player);
}

fn vis(shown: bool) -> Visibility {
    if shown {
        Visibility::Visible
    } else {
        Visibility::Hidden
    }
}

pub fn spawn_player(mut commands: Commands, tunables: Res<Tunables>) {
    let controller = commands
        .spawn((
            Name::new("PlayerController"),
            PlayerController::default(),
            DespawnOnExit(GameState::InGame),
        ))
        .id();

    // Spawn-time visibility: locally controlled and alive.
    let spawn_vis = mesh_visibility(true, true);

    let first_person = commands
        .spawn((
            Name::new("FirstPersonMesh"),
            FirstPersonMesh,
            Transform::from_xyz(0.0, tunables.eye_height, -0.3),
            vis(spawn_vis.first_person),
        ))
        .id();

    let third_person = commands
        .spawn((
            Name::new("ThirdPersonMesh"),
            ThirdPersonMesh,
            Transform::from_xyz(0.0, 0.0, 0.0),
            vis(spawn_vis.third_person),
        ))
        .id();

    let character = commands
        .spawn((
            Name::new("PlayerCharacter"),
            Character,
            LocallyControlled,
            LifeState::default(),
            Movement::default(),
            LookAngles::default(),
            Health::new(100.0),
            ControlledBy(controller),
            CharacterMeshes {
                first_person,
                third_person,
            },
            Transform::from_xyz(0.0, 1.0, 0.0),
            RigidBody::Dynamic,
            Collider::capsule(0.35, 1.1),
            LockedAxes::ROTATION_LOCKED,
            alive_pawn_layers(),
            LinearVelocity::ZERO,
            DespawnOnExit(GameState::InGame),
        ))
        .id();

    commands
        .entity(character)
        .add_children(&[first_person, third_person]);
}

#[cfg(test)]
mod tests;
