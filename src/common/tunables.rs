//! Tunable gameplay constants.

use bevy::prelude::*;

#[derive(Resource, Debug, Clone)]
pub struct Tunables {
    pub move_speed: f32,
    pub crouch_speed_factor: f32,
    pub jump_speed: f32,
    pub look_sensitivity: f32,
    pub eye_height: f32,
    pub bullet_speed: f32,
    pub bullet_radius: f32,
    pub bullet_gravity_scale: f32,
    pub bullet_lifespan_secs: f32,
    pub bullet_damage: f32,
    pub impact_impulse_scale: f32,
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            move_speed: 4.2,
            crouch_speed_factor: 0.5,
            jump_speed: 4.5,
            look_sensitivity: 0.12,
            eye_height: 0.64,
            bullet_speed: 30.0,
            bullet_radius: 0.1,
            bullet_gravity_scale: 0.2,
            bullet_lifespan_secs: 3.0,
            bullet_damage: 25.0,
            impact_impulse_scale: 50.0,
        }
    }
}
