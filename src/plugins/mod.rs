//! Feature plugins.

use bevy::prelude::*;

pub mod core;
pub mod gamemode;
pub mod health;
pub mod net;
pub mod physics;
pub mod player;
pub mod projectiles;
pub mod world;

// Render-only
pub mod camera;

/// Register gameplay plugins that work in headless tests.
pub fn register_gameplay(app: &mut App) {
    core::plugin(app);
    physics::plugin(app);
    net::plugin(app);
    health::plugin(app);
    world::plugin(app);
    player::plugin(app);
    gamemode::plugin(app);
    projectiles::plugin(app);
}

/// Register render-only plugins (requires DefaultPlugins / render infra).
pub fn register_render(app: &mut App) {
    camera::plugin(app);
}

/// Register all plugins (full app).
pub fn register_all(app: &mut App) {
    register_gameplay(app);
    register_render(app);
}
