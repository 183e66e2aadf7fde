//! Particle store
//!
//! Struct-of-arrays layout: index `i` names the same circle in every array.
//! The store is sized once at load and never resized afterwards.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::{RenderError, Result};

/// Per-circle attributes for a loaded scene
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParticleStore {
    /// Center in normalized space (z = depth / spark cue)
    pub position: Vec<Vec3>,
    /// Change in position per second
    pub velocity: Vec<Vec3>,
    /// Fixed RGB color (ignored by snowflake shading)
    pub color: Vec<Vec3>,
    /// Radius in normalized space
    pub radius: Vec<f32>,
}

impl ParticleStore {
    /// Zeroed store holding `count` circles
    pub fn with_count(count: usize) -> Self {
        Self {
            position: vec![Vec3::ZERO; count],
            velocity: vec![Vec3::ZERO; count],
            color: vec![Vec3::ZERO; count],
            radius: vec![0.0; count],
        }
    }

    /// Take ownership of four parallel arrays, checking they line up
    pub fn from_arrays(
        position: Vec<Vec3>,
        velocity: Vec<Vec3>,
        color: Vec<Vec3>,
        radius: Vec<f32>,
    ) -> Result<Self> {
        let store = Self {
            position,
            velocity,
            color,
            radius,
        };
        store.check_lengths()?;
        Ok(store)
    }

    /// Error unless all four arrays hold the same number of circles
    pub fn check_lengths(&self) -> Result<()> {
        let n = self.position.len();
        if self.velocity.len() != n || self.color.len() != n || self.radius.len() != n {
            return Err(RenderError::ParticleCountMismatch {
                position: n,
                velocity: self.velocity.len(),
                color: self.color.len(),
                radius: self.radius.len(),
            });
        }
        Ok(())
    }

    /// Number of circles
    #[inline]
    pub fn len(&self) -> usize {
        self.radius.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.radius.is_empty()
    }

    /// Write the store as text: count, then `px py pz   vx vy vz   r` per line
    pub fn write_dump<W: std::io::Write>(&self, out: &mut W) -> std::io::Result<()> {
        writeln!(out, "{}", self.len())?;
        for i in 0..self.len() {
            let p = self.position[i];
            let v = self.velocity[i];
            writeln!(
                out,
                "{:.6} {:.6} {:.6}   {:.6} {:.6} {:.6}   {:.6}",
                p.x, p.y, p.z, v.x, v.y, v.z, self.radius[i]
            )?;
        }
        Ok(())
    }
}
