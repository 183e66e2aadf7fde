//! Error types for the renderer.

use std::io;
use thiserror::Error;

/// Errors surfaced by the engine facade and its file collaborators
#[derive(Debug, Error)]
pub enum RenderError {
    /// I/O error while writing a dump/image or reading a file
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Scene name outside the known set
    #[error("Unknown scene: {0}")]
    UnknownScene(String),

    /// Malformed JSON configuration
    #[error("Invalid config: {0}")]
    Config(#[from] serde_json::Error),

    /// Particle attribute arrays of differing length, from `from_arrays` or
    /// `load_particles`
    #[error(
        "Particle arrays differ in length: \
         position={position}, velocity={velocity}, color={color}, radius={radius}"
    )]
    ParticleCountMismatch {
        position: usize,
        velocity: usize,
        color: usize,
        radius: usize,
    },

    /// Image operation requested before `alloc_output_image`
    #[error("No output image allocated")]
    NoImage,

    /// PPM encode/decode failure, including malformed or oversized headers
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, RenderError>;
