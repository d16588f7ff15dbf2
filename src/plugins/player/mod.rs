//! Player character: movement, view, and the death transition.
//!
//! Pipeline:
//! - Update: sample input into `PlayerInput`, apply look rotation, crouch toggle
//! - FixedUpdate: apply velocity to the capsule rigid body
//! - FixedPostUpdate: `death::handle_character_death` reacts to `Died`
//! - PostUpdate: `death::play_death_effects` consumes the broadcast channel
//!
//! The character entity owns everything by value: a `CharacterMeshes` handle
//! struct points at the two visual child entities (first-person arms, third-
//! person body) so visibility writes are straight-line `get_mut(entity)`
//! instead of hierarchy scans.

use avian3d::prelude::*;
use bevy::prelude::*;

use crate::common::layers::Layer;
use crate::common::state::GameState;

pub mod death;
pub mod input;

/// Character marker.
#[derive(Component)]
pub struct Character;

/// The character this process views through and feeds input to.
#[derive(Component)]
pub struct LocallyControlled;

/// Terminal one-way life state. `Alive -> Dead` happens at most once.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LifeState {
    #[default]
    Alive,
    Dead,
}

/// Movement integrator surface: halt/disable + crouch query/toggle.
///
/// `jump_armed`/`settled` implement jump re-arming: a jump consumes the arm,
/// and it only comes back after vertical velocity has been idle for two
/// consecutive fixed ticks (true only when standing, never at the apex of a
/// jump, where the zero crossing lasts a single tick).
#[derive(Component, Debug, Clone)]
pub struct Movement {
    pub enabled: bool,
    pub crouched: bool,
    pub jump_armed: bool,
    pub settled: bool,
}

impl Default for Movement {
    fn default() -> Self {
        Self {
            enabled: true,
            crouched: false,
            jump_armed: true,
            settled: false,
        }
    }
}

/// View rotation state, fed by look input. Yaw drives the body transform;
/// pitch is presentation-only (camera).
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct LookAngles {
    pub yaw: f32,
    pub pitch: f32,
}

/// First-person arms mesh marker (child entity).
#[derive(Component)]
pub struct FirstPersonMesh;

/// Third-person full-body mesh marker (child entity).
#[derive(Component)]
pub struct ThirdPersonMesh;

/// Explicit handles to the two visual children.
#[derive(Component, Debug, Clone, Copy)]
pub struct CharacterMeshes {
    pub first_person: Entity,
    pub third_person: Entity,
}

/// Points a pawn at its controller entity.
#[derive(Component, Debug, Clone, Copy)]
pub struct ControlledBy(pub Entity);

/// Player controller stub. `cinematic` suppresses all input interpretation.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct PlayerController {
    pub cinematic: bool,
}

/// Which meshes the local viewer should see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeshVisibility {
    pub first_person: bool,
    pub third_person: bool,
}

/// Visibility is a pure function of (locally controlled, alive).
///
/// A remote observer never sees the arms; the local viewer never sees the
/// body while alive. Once dead, everyone sees the body.
#[inline]
pub fn mesh_visibility(locally_controlled: bool, alive: bool) -> MeshVisibility {
    if locally_controlled && alive {
        MeshVisibility {
            first_person: true,
            third_person: false,
        }
    } else {
        MeshVisibility {
            first_person: false,
            third_person: true,
        }
    }
}

impl MeshVisibility {
    #[inline]
    fn as_visibility(shown: bool) -> Visibility {
        if shown {
            Visibility::Visible
        } else {
            Visibility::Hidden
        }
    }

    /// Write both mesh visibilities through the handle struct.
    pub fn apply(self, meshes: &CharacterMeshes, q_vis: &mut Query<&mut Visibility>) {
        if let Ok(mut vis) = q_vis.get_mut(meshes.first_person) {
            *vis = Self::as_visibility(self.first_person);
        }
        if let Ok(mut vis) = q_vis.get_mut(meshes.third_person) {
            *vis = Self::as_visibility(self.third_person);
        }
    }
}

/// Capsule layers while alive: collides with everything relevant.
#[inline]
pub fn alive_pawn_layers() -> CollisionLayers {
    CollisionLayers::new(
        Layer::Pawn,
        [
            Layer::World,
            Layer::WorldDynamic,
            Layer::Pawn,
            Layer::Projectile,
        ],
    )
}

/// Capsule layers after death: the body is a passive physical object that no
/// longer collides with pawns or dynamic props.
#[inline]
pub fn dead_pawn_layers() -> CollisionLayers {
    CollisionLayers::new(Layer::Pawn, [Layer::World, Layer::Projectile])
}

pub fn plugin(app: &mut App) {
    app.insert_resource(input::PlayerInput::default())
        .add_systems(
            Update,
            (input::gather_input, input::apply_look, input::toggle_crouch)
                .chain()
                .run_if(in_state(GameState::InGame)),
        )
        .add_systems(FixedUpdate, input::apply_movement)
        .add_systems(
            FixedPostUpdate,
            death::handle_character_death
                .after(crate::plugins::health::apply_point_damage),
        )
        .add_systems(PostUpdate, death::play_death_effects);
}

#[cfg(test)]
mod tests;
