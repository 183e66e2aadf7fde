//! Deterministic particle simulation
//!
//! All animation lives here. This module must stay pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG / hashed noise only
//! - Stable iteration order (by circle index)
//! - No rendering dependencies

pub mod loader;
pub mod motion;
pub mod noise;
pub mod particles;

pub use loader::load_circle_scene;
pub use motion::{
    MotionRule, advance_bouncing_balls, advance_fireworks, advance_hypnosis, advance_snowflakes,
    spark_index, spark_rim_state,
};
pub use noise::vec2_cell_noise;
pub use particles::ParticleStore;
