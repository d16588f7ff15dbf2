use avian3d::prelude::*;
use bevy::prelude::*;

use crate::common::layers::Layer;
use crate::common::test_utils::run_system_once;
use crate::common::tunables::Tunables;
use crate::plugins::health::Health;
use crate::plugins::player::{
    Character, CharacterMeshes, ControlledBy, LifeState, LocallyControlled, PlayerController,
};

fn spawned_world() -> World {
    let mut world = World::new();
    world.insert_resource(Tunables::default());
    run_system_once(&mut world, super::spawn_player);
    world
}

#[test]
fn spawns_controlled_character_with_full_health() {
    let mut world = spawned_world();

    let mut q = world.query_filtered::<(&Health, &LifeState, &ControlledBy), With<Character>>();
    let (health, life, &ControlledBy(controller)) = q.single(&world).unwrap();

    assert_eq!(health.current, 100.0);
    assert_eq!(*life, LifeState::Alive);
    assert!(!world.get::<PlayerController>(controller).unwrap().cinematic);
}

#[test]
fn spawn_visibility_shows_arms_and_hides_body() {
    let mut world = spawned_world();

    let mut q = world.query_filtered::<&CharacterMeshes, With<LocallyControlled>>();
    let meshes = *q.single(&world).unwrap();

    assert_eq!(
        *world.get::<Visibility>(meshes.first_person).unwrap(),
        Visibility::Visible
    );
    assert_eq!(
        *world.get::<Visibility>(meshes.third_person).unwrap(),
        Visibility::Hidden
    );
}

#[test]
fn alive_capsule_collides_with_pawns_and_props() {
    let mut world = spawned_world();

    let mut q = world.query_filtered::<&CollisionLayers, With<Character>>();
    let layers = q.single(&world).unwrap();

    assert!(layers.memberships.has_all(Layer::Pawn));
    assert!(layers.filters.has_all(Layer::Pawn));
    assert!(layers.filters.has_all(Layer::WorldDynamic));
    assert!(layers.filters.has_all(Layer::World));
    assert!(layers.filters.has_all(Layer::Projectile));
}
