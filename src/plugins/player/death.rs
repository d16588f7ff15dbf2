//! Death transition: `Died` -> local halt + authority broadcast -> visual
//! transition on every instance.

use avian3d::prelude::*;
use bevy::prelude::*;

use crate::plugins::health::Died;
use crate::plugins::net::{DeathEffects, NetRole};

use super::{
    dead_pawn_layers, mesh_visibility, Character, CharacterMeshes, ControlledBy, LifeState,
    LocallyControlled, Movement, PlayerController,
};

/// React to the one-shot death notification.
///
/// Runs identically on every simulating instance: halt and disable movement.
/// Only the authority writes the `DeathEffects` broadcast; only a
/// player-controlled pawn forces its controller into cinematic mode.
pub fn handle_character_death(
    role: Res<NetRole>,
    mut deaths: MessageReader<Died>,
    mut effects: MessageWriter<DeathEffects>,
    mut q_characters: Query<
        (
            &mut LifeState,
            &mut Movement,
            &mut LinearVelocity,
            Option<&ControlledBy>,
        ),
        With<Character>,
    >,
    mut q_controllers: Query<&mut PlayerController>,
) {
    for msg in deaths.read() {
        let Ok((mut life, mut movement, mut vel, controlled_by)) = q_characters.get_mut(msg.entity)
        else {
            continue;
        };

        // Terminal transition; a repeated notification is ignored.
        if *life == LifeState::Dead {
            continue;
        }
        *life = LifeState::Dead;

        vel.0 = Vec3::ZERO;
        movement.enabled = false;

        if role.is_authority() {
            effects.write(DeathEffects {
                character: msg.entity,
            });
        }

        if let Some(&ControlledBy(controller)) = controlled_by {
            if let Ok(mut pc) = q_controllers.get_mut(controller) {
                pc.cinematic = true;
            }
        }
    }
}

/// Consume the broadcast channel and apply the visual death state.
///
/// Idempotent: replaying the message leaves the world unchanged. The body
/// becomes a passive physical object — visible to everyone, free to tumble,
/// and no longer colliding with pawns or dynamic props.
pub fn play_death_effects(
    mut commands: Commands,
    mut effects: MessageReader<DeathEffects>,
    mut q_characters: Query<
        (
            &mut LifeState,
            &mut CollisionLayers,
            &CharacterMeshes,
            Has<LocallyControlled>,
        ),
        With<Character>,
    >,
    mut q_vis: Query<&mut Visibility>,
) {
    for msg in effects.read() {
        let Ok((mut life, mut layers, meshes, locally_controlled)) =
            q_characters.get_mut(msg.character)
        else {
            continue;
        };

        *life = LifeState::Dead;
        *layers = dead_pawn_layers();

        mesh_visibility(locally_controlled, false).apply(meshes, &mut q_vis);

        // Ragdoll: free the rotation axes so the dynamic body tumbles.
        commands.entity(msg.character).remove::<LockedAxes>();
    }
}
