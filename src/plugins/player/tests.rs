use avian3d::prelude::*;
use bevy::ecs::message::Messages;
use bevy::prelude::*;

use crate::common::test_utils::run_system_once;
use crate::common::tunables::Tunables;
use crate::plugins::health::Died;
use crate::plugins::net::{DeathEffects, NetRole};

use super::input::PlayerInput;
use super::*;

// --------------------------------------------------------------------------------------
// Visibility rule
// --------------------------------------------------------------------------------------

#[test]
fn visibility_is_pure_function_of_control_and_life() {
    // {local, alive}: arms visible, body hidden to self
    let v = mesh_visibility(true, true);
    assert!(v.first_person && !v.third_person);

    // {local, dead}: arms hidden, body visible
    let v = mesh_visibility(true, false);
    assert!(!v.first_person && v.third_person);

    // {remote, any}: arms hidden, body visible
    for alive in [true, false] {
        let v = mesh_visibility(false, alive);
        assert!(!v.first_person && v.third_person);
    }
}

// --------------------------------------------------------------------------------------
// Death transition
// --------------------------------------------------------------------------------------

fn death_world(role: NetRole) -> World {
    let mut world = World::new();
    world.insert_resource(role);
    world.init_resource::<Messages<Died>>();
    world.init_resource::<Messages<DeathEffects>>();
    world
}

fn spawn_controlled_character(world: &mut World) -> (Entity, Entity) {
    let controller = world.spawn(PlayerController::default()).id();
    let character = world
        .spawn((
            Character,
            LifeState::Alive,
            Movement::default(),
            LinearVelocity(Vec3::new(1.0, 0.0, 2.0)),
            ControlledBy(controller),
        ))
        .id();
    (character, controller)
}

fn death_effects_count(world: &World) -> usize {
    world.resource::<Messages<DeathEffects>>().len()
}

#[test]
fn death_halts_movement_and_broadcasts_once() {
    let mut world = death_world(NetRole::Authority);
    let (character, controller) = spawn_controlled_character(&mut world);

    world.write_message(Died {
        entity: character,
        instigator: None,
    });
    run_system_once(&mut world, death::handle_character_death);

    assert_eq!(*world.get::<LifeState>(character).unwrap(), LifeState::Dead);
    assert!(!world.get::<Movement>(character).unwrap().enabled);
    assert_eq!(world.get::<LinearVelocity>(character).unwrap().0, Vec3::ZERO);
    assert!(world.get::<PlayerController>(controller).unwrap().cinematic);
    assert_eq!(death_effects_count(&world), 1);

    // A repeated notification is ignored: no second broadcast.
    world.write_message(Died {
        entity: character,
        instigator: None,
    });
    run_system_once(&mut world, death::handle_character_death);
    assert_eq!(death_effects_count(&world), 1);
}

#[test]
fn observer_halts_locally_but_never_broadcasts() {
    let mut world = death_world(NetRole::Observer);
    let (character, _) = spawn_controlled_character(&mut world);

    world.write_message(Died {
        entity: character,
        instigator: None,
    });
    run_system_once(&mut world, death::handle_character_death);

    assert_eq!(*world.get::<LifeState>(character).unwrap(), LifeState::Dead);
    assert!(!world.get::<Movement>(character).unwrap().enabled);
    assert_eq!(death_effects_count(&world), 0);
}

fn spawn_visual_character(world: &mut World, local: bool) -> (Entity, Entity, Entity) {
    let first = world.spawn((FirstPersonMesh, Visibility::Visible)).id();
    let third = world.spawn((ThirdPersonMesh, Visibility::Hidden)).id();
    let mut character = world.spawn((
        Character,
        LifeState::Alive,
        CharacterMeshes {
            first_person: first,
            third_person: third,
        },
        alive_pawn_layers(),
        LockedAxes::ROTATION_LOCKED,
    ));
    if local {
        character.insert(LocallyControlled);
    }
    (character.id(), first, third)
}

#[test]
fn death_effects_switch_visibility_and_collision() {
    let mut world = death_world(NetRole::Authority);
    let (character, first, third) = spawn_visual_character(&mut world, true);

    world.write_message(DeathEffects { character });
    run_system_once(&mut world, death::play_death_effects);

    assert_eq!(*world.get::<Visibility>(first).unwrap(), Visibility::Hidden);
    assert_eq!(*world.get::<Visibility>(third).unwrap(), Visibility::Visible);
    assert_eq!(*world.get::<LifeState>(character).unwrap(), LifeState::Dead);

    // Ragdoll: rotation axes freed, capsule ignores pawns + dynamic props.
    assert!(world.get::<LockedAxes>(character).is_none());
    let layers = world.get::<CollisionLayers>(character).unwrap();
    assert!(!layers.filters.has_all(crate::common::layers::Layer::Pawn));
    assert!(!layers.filters.has_all(crate::common::layers::Layer::WorldDynamic));
    assert!(layers.filters.has_all(crate::common::layers::Layer::World));
    assert!(layers.filters.has_all(crate::common::layers::Layer::Projectile));
}

#[test]
fn death_effects_are_idempotent() {
    let mut world = death_world(NetRole::Authority);
    let (character, first, third) = spawn_visual_character(&mut world, true);

    world.write_message(DeathEffects { character });
    world.write_message(DeathEffects { character });
    run_system_once(&mut world, death::play_death_effects);
    world.write_message(DeathEffects { character });
    run_system_once(&mut world, death::play_death_effects);

    assert_eq!(*world.get::<Visibility>(first).unwrap(), Visibility::Hidden);
    assert_eq!(*world.get::<Visibility>(third).unwrap(), Visibility::Visible);
    assert_eq!(*world.get::<LifeState>(character).unwrap(), LifeState::Dead);
}

// --------------------------------------------------------------------------------------
// Movement
// --------------------------------------------------------------------------------------

fn movement_world() -> World {
    let mut world = World::new();
    world.insert_resource(Tunables::default());
    world.insert_resource(PlayerInput {
        move_axis: Vec2::new(0.0, 1.0),
        ..default()
    });
    world
}

fn spawn_mover(world: &mut World, movement: Movement, cinematic: bool) -> Entity {
    let controller = world.spawn(PlayerController { cinematic }).id();
    world
        .spawn((
            Character,
            LocallyControlled,
            movement,
            Transform::default(),
            LinearVelocity::ZERO,
            ControlledBy(controller),
        ))
        .id()
}

#[test]
fn movement_applies_forward_velocity() {
    let mut world = movement_world();
    let e = spawn_mover(&mut world, Movement::default(), false);

    run_system_once(&mut world, input::apply_movement);

    let speed = world.resource::<Tunables>().move_speed;
    let vel = world.get::<LinearVelocity>(e).unwrap();
    // Default transform faces -Z.
    assert!((vel.0.z + speed).abs() < 1e-4);
    assert_eq!(vel.0.x, 0.0);
}

#[test]
fn crouch_halves_speed() {
    let mut world = movement_world();
    let e = spawn_mover(
        &mut world,
        Movement {
            crouched: true,
            ..default()
        },
        false,
    );

    run_system_once(&mut world, input::apply_movement);

    let t = world.resource::<Tunables>().clone();
    let vel = world.get::<LinearVelocity>(e).unwrap();
    assert!((vel.0.z + t.move_speed * t.crouch_speed_factor).abs() < 1e-4);
}

#[test]
fn disabled_movement_zeroes_velocity() {
    let mut world = movement_world();
    let e = spawn_mover(
        &mut world,
        Movement {
            enabled: false,
            ..default()
        },
        false,
    );
    world.get_mut::<LinearVelocity>(e).unwrap().0 = Vec3::new(3.0, 1.0, 3.0);

    run_system_once(&mut world, input::apply_movement);

    assert_eq!(world.get::<LinearVelocity>(e).unwrap().0, Vec3::ZERO);
}

#[test]
fn cinematic_controller_ignores_input() {
    let mut world = movement_world();
    let e = spawn_mover(&mut world, Movement::default(), true);

    run_system_once(&mut world, input::apply_movement);

    assert_eq!(world.get::<LinearVelocity>(e).unwrap().0, Vec3::ZERO);
}

#[test]
fn grounded_jump_applies_vertical_velocity_once() {
    let mut world = movement_world();
    world.resource_mut::<PlayerInput>().jump = true;
    let e = spawn_mover(&mut world, Movement::default(), false);

    run_system_once(&mut world, input::apply_movement);

    let jump = world.resource::<Tunables>().jump_speed;
    assert_eq!(world.get::<LinearVelocity>(e).unwrap().0.y, jump);
    assert!(!world.get::<Movement>(e).unwrap().jump_armed);
}

#[test]
fn apex_zero_crossing_grants_no_second_jump() {
    let mut world = movement_world();
    world.resource_mut::<PlayerInput>().jump = true;
    let e = spawn_mover(&mut world, Movement::default(), false);

    // Jump from the ground.
    run_system_once(&mut world, input::apply_movement);

    // At the apex, vertical velocity crosses zero for a single tick while
    // the jump input is still held.
    world.get_mut::<LinearVelocity>(e).unwrap().0.y = 0.0;
    run_system_once(&mut world, input::apply_movement);

    assert_eq!(world.get::<LinearVelocity>(e).unwrap().0.y, 0.0);
}

#[test]
fn jump_rearms_after_settling_on_the_ground() {
    let mut world = movement_world();
    world.resource_mut::<PlayerInput>().jump = false;
    let e = spawn_mover(&mut world, Movement::default(), false);

    // Consume the arm.
    world.get_mut::<Movement>(e).unwrap().jump_armed = false;

    // Two idle ticks on the ground re-arm the jump.
    run_system_once(&mut world, input::apply_movement);
    run_system_once(&mut world, input::apply_movement);
    assert!(world.get::<Movement>(e).unwrap().jump_armed);

    world.resource_mut::<PlayerInput>().jump = true;
    run_system_once(&mut world, input::apply_movement);

    let jump = world.resource::<Tunables>().jump_speed;
    assert_eq!(world.get::<LinearVelocity>(e).unwrap().0.y, jump);
}
