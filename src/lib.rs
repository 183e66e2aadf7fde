//! Circle Render - sequential reference renderer for circle scenes
//!
//! Core modules:
//! - `sim`: Deterministic particle state and per-scene motion rules
//! - `renderer`: Output image, pixel shader and rasterizer
//! - `scene`: Closed set of scene names and their rule selection
//! - `engine`: Facade tying scene loading, animation and rendering together
//! - `config`: Run configuration (JSON file + CLI overrides)
//!
//! Output is order-sensitive: circles are blended into each pixel strictly
//! in index order, so any faster renderer can be checked against this one.

pub mod config;
pub mod engine;
pub mod error;
pub mod renderer;
pub mod scene;
pub mod sim;

pub use config::RenderConfig;
pub use engine::RefRenderer;
pub use error::{RenderError, Result};
pub use renderer::Image;
pub use scene::SceneName;
pub use sim::ParticleStore;

/// Simulation constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Number of firework centers in the fireworks scene
    pub const NUM_FIREWORKS: usize = 15;
    /// Sparks orbiting each firework center
    pub const NUM_SPARKS: usize = 20;
}
