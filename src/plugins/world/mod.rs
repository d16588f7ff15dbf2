//! World plugin: static arena geometry + loose dynamic props.

use avian3d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::layers::Layer;
use crate::common::state::GameState;

const ARENA_HALF: f32 = 20.0;
const WALL_HEIGHT: f32 = 4.0;
const WALL_THICKNESS: f32 = 0.5;

pub fn plugin(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), spawn_arena);
    app.add_systems(OnEnter(GameState::InGame), spawn_props);
}

fn spawn_arena(mut commands: Commands) {
    let static_layers = CollisionLayers::new(
        Layer::World,
        [Layer::Pawn, Layer::WorldDynamic, Layer::Projectile],
    );

    commands.spawn((
        Name::new("Floor"),
        Transform::from_xyz(0.0, -0.25, 0.0),
        RigidBody::Static,
        Collider::cuboid(ARENA_HALF * 2.0, 0.5, ARENA_HALF * 2.0),
        static_layers,
        DespawnOnExit(GameState::InGame),
    ));

    let mut spawn_wall = |name: String, pos: Vec3, size: Vec3| {
        commands.spawn((
            Name::new(name),
            Transform::from_translation(pos),
            RigidBody::Static,
            Collider::cuboid(size.x, size.y, size.z),
            static_layers,
            DespawnOnExit(GameState::InGame),
        ));
    };

    let span = ARENA_HALF * 2.0 + WALL_THICKNESS * 2.0;
    spawn_wall(
        "WallNorth".into(),
        Vec3::new(0.0, WALL_HEIGHT * 0.5, -ARENA_HALF - WALL_THICKNESS * 0.5),
        Vec3::new(span, WALL_HEIGHT, WALL_THICKNESS),
    );
    spawn_wall(
        "WallSouth".into(),
        Vec3::new(0.0, WALL_HEIGHT * 0.5, ARENA_HALF + WALL_THICKNESS * 0.5),
        Vec3::new(span, WALL_HEIGHT, WALL_THICKNESS),
    );
    spawn_wall(
        "WallWest".into(),
        Vec3::new(-ARENA_HALF - WALL_THICKNESS * 0.5, WALL_HEIGHT * 0.5, 0.0),
        Vec3::new(WALL_THICKNESS, WALL_HEIGHT, span),
    );
    spawn_wall(
        "WallEast".into(),
        Vec3::new(ARENA_HALF + WALL_THICKNESS * 0.5, WALL_HEIGHT * 0.5, 0.0),
        Vec3::new(WALL_THICKNESS, WALL_HEIGHT, span),
    );
}

/// Dynamic crates: targets for the bullet impulse branch.
fn spawn_props(mut commands: Commands) {
    let prop_layers = CollisionLayers::new(
        Layer::WorldDynamic,
        [
            Layer::World,
            Layer::WorldDynamic,
            Layer::Pawn,
            Layer::Projectile,
        ],
    );

    for (i, pos) in [
        Vec3::new(3.0, 0.5, -4.0),
        Vec3::new(-2.5, 0.5, -6.0),
        Vec3::new(0.0, 0.5, -9.0),
    ]
    .into_iter()
    .enumerate()
    {
        commands.spawn((
            Name::new(format!("Crate{i}")),
            Transform::from_translation(pos),
            RigidBody::Dynamic,
            Collider::cuboid(1.0, 1.0, 1.0),
            prop_layers,
            DespawnOnExit(GameState::InGame),
        ));
    }
}
