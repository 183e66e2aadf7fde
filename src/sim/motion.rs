//! Per-scene motion rules
//!
//! Each rule advances the particle store in place by one fixed tick
//! (`SIM_DT`). Updates are per particle and run in index order; only the
//! fireworks rule reads another particle (the spark's own center).

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::noise::vec2_cell_noise;
use super::particles::ParticleStore;
use crate::consts::*;

/// Snowflake gravity (normalized units/s²)
pub const SNOW_GRAVITY: f32 = -1.8;
/// Snowflake linear drag coefficient
pub const SNOW_DRAG: f32 = 2.0;

/// Bouncing ball gravity (normalized units/s²)
pub const BALL_GRAVITY: f32 = -2.8;
/// Velocity multiplier applied on a floor bounce
pub const BALL_BOUNCE: f32 = -0.8;
/// Settling threshold for both velocity and position change
pub const BALL_EPSILON: f32 = 0.001;

/// Radius above which a hypnosis ring restarts
pub const HYPNOSIS_CUTOFF: f32 = 0.5;
/// Radius a hypnosis ring restarts at
pub const HYPNOSIS_RESET_RADIUS: f32 = 0.02;
/// Radius growth per tick
pub const HYPNOSIS_GROWTH: f32 = 0.01;

/// Spark distance from its center at which it respawns on the rim
pub const SPARK_MAX_DIST: f32 = 0.25;
/// A respawned spark's velocity is its unit direction divided by this
pub const SPARK_SPEED_DIVISOR: f32 = 5.0;

/// Motion rule for a scene, selected once at load time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MotionRule {
    /// No animation
    #[default]
    Static,
    Snowflakes,
    BouncingBalls,
    Hypnosis,
    Fireworks,
}

impl MotionRule {
    /// Advance `store` by one tick
    pub fn advance(&self, store: &mut ParticleStore) {
        match self {
            MotionRule::Static => {}
            MotionRule::Snowflakes => advance_snowflakes(store),
            MotionRule::BouncingBalls => advance_bouncing_balls(store),
            MotionRule::Hypnosis => advance_hypnosis(store),
            MotionRule::Fireworks => advance_fireworks(store),
        }
    }
}

/// Drifting snow: noise flutter, drag, gravity, respawn at the top
pub fn advance_snowflakes(store: &mut ParticleStore) {
    let dt = SIM_DT;

    for i in 0..store.len() {
        let pos = store.position[i];
        let vel = store.velocity[i];
        let radius = store.radius[i];

        // Farther flakes move more slowly (parallax)
        let force_scaling = (1.0 - pos.z).clamp(0.1, 1.0);

        let noise_input = Vec3::new(10.0 * pos.x, 10.0 * pos.y, 255.0 * pos.z);
        let noise_force = vec2_cell_noise(noise_input, i) * Vec2::new(7.5, 5.0);

        let drag = Vec2::new(-SNOW_DRAG * vel.x, -SNOW_DRAG * vel.y);

        // Position first, from the pre-update velocity
        let mut new_pos = pos + vel * dt;
        let mut new_vel = vel;
        new_vel.x += force_scaling * (noise_force.x + drag.x) * dt;
        new_vel.y += force_scaling * (SNOW_GRAVITY + noise_force.y + drag.y) * dt;

        let below = new_pos.y + radius < 0.0;
        let off_left = new_pos.x + radius < 0.0;
        let off_right = new_pos.x - radius > 1.0;
        if below || off_left || off_right {
            let respawn = vec2_cell_noise(new_pos * 255.0, i);
            new_pos.x = 0.5 + 0.5 * respawn.x;
            new_pos.y = 1.35 + radius;
            new_vel.x = 2.0 * respawn.y;
            new_vel.y = 0.0;
        }

        store.position[i] = new_pos;
        store.velocity[i] = new_vel;
    }
}

/// Vertical-only balls that bounce on y = 0 and settle to exact rest
pub fn advance_bouncing_balls(store: &mut ParticleStore) {
    let dt = SIM_DT;

    for i in 0..store.len() {
        let old_vel = store.velocity[i].y;
        let old_pos = store.position[i].y;

        // Terminal rest state
        if old_vel == 0.0 && old_pos == 0.0 {
            continue;
        }

        let mut vel = old_vel;
        if old_pos < 0.0 && old_vel < 0.0 {
            vel *= BALL_BOUNCE;
        }

        vel += BALL_GRAVITY * dt;
        let mut pos = old_pos + vel * dt;

        if (vel - old_vel).abs() < BALL_EPSILON
            && old_pos < 0.0
            && (pos - old_pos).abs() < BALL_EPSILON
        {
            vel = 0.0;
            pos = 0.0;
        }

        store.velocity[i].y = vel;
        store.position[i].y = pos;
    }
}

/// Radius grows each tick and restarts once past the cutoff
pub fn advance_hypnosis(store: &mut ParticleStore) {
    for radius in store.radius.iter_mut() {
        if *radius > HYPNOSIS_CUTOFF {
            *radius = HYPNOSIS_RESET_RADIUS;
        } else {
            *radius += HYPNOSIS_GROWTH;
        }
    }
}

/// Rim position and outward velocity of spark `j` for a center and radius
pub fn spark_rim_state(center: Vec2, radius: f32, j: usize) -> (Vec3, Vec3) {
    let angle = j as f32 * std::f32::consts::TAU / NUM_SPARKS as f32;
    let (sin_a, cos_a) = angle.sin_cos();
    let pos = Vec3::new(center.x + cos_a * radius, center.y + sin_a * radius, 0.0);
    let vel = Vec3::new(cos_a / SPARK_SPEED_DIVISOR, sin_a / SPARK_SPEED_DIVISOR, 0.0);
    (pos, vel)
}

/// Index of spark `j` of firework `i` in the store
#[inline]
pub fn spark_index(firework: usize, spark: usize) -> usize {
    NUM_FIREWORKS + firework * NUM_SPARKS + spark
}

/// Sparks stream away from their (stationary) centers and respawn on the rim
pub fn advance_fireworks(store: &mut ParticleStore) {
    let dt = SIM_DT;
    let n = store.len();

    for i in 0..NUM_FIREWORKS.min(n) {
        let center = store.position[i].truncate();
        let center_radius = store.radius[i];

        for j in 0..NUM_SPARKS {
            let s = spark_index(i, j);
            if s >= n {
                return;
            }

            let vel = store.velocity[s];
            let pos = &mut store.position[s];
            pos.x += vel.x * dt;
            pos.y += vel.y * dt;

            let dist = (pos.truncate() - center).length();
            if dist > SPARK_MAX_DIST {
                let (rim_pos, rim_vel) = spark_rim_state(center, center_radius, j);
                store.position[s] = rim_pos;
                store.velocity[s] = rim_vel;
            }
        }
    }
}
