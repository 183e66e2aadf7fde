//! Reference renderer facade
//!
//! Owns the scene selection, the particle store and the output image.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{RenderError, Result};
use crate::renderer::{Image, RasterStats, ShadingRule, render_circles};
use crate::scene::SceneName;
use crate::sim::{MotionRule, ParticleStore, load_circle_scene};

/// Snow background shade as the row index approaches the height
pub const SNOW_CLEAR_BASE: f32 = 0.4;
/// Extra shade added at row 0 (0.4 + 0.45 = 0.85)
pub const SNOW_CLEAR_RANGE: f32 = 0.45;

/// Sequential circle renderer
#[derive(Debug, Default)]
pub struct RefRenderer {
    scene: SceneName,
    motion: MotionRule,
    shading: ShadingRule,
    particles: ParticleStore,
    image: Option<Image>,
    /// Seed handed to the scene loader
    seed: u64,
    /// Ticks since the scene was loaded
    frame: u64,
}

impl RefRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Renderer whose scene loader draws from `seed`
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    pub fn scene(&self) -> SceneName {
        self.scene
    }

    pub fn particles(&self) -> &ParticleStore {
        &self.particles
    }

    /// Ticks advanced since the last load
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Output image, if one has been allocated
    pub fn image(&self) -> Option<&Image> {
        self.image.as_ref()
    }

    /// Replace the output image with a new `width` x `height` buffer
    pub fn alloc_output_image(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            log::warn!("Allocating empty {}x{} output image", width, height);
        }
        self.image = Some(Image::new(width, height));
        log::info!("Allocated {}x{} output image", width, height);
    }

    /// Load `scene` from the built-in scene loader
    pub fn load_scene(&mut self, scene: SceneName) {
        let particles = load_circle_scene(scene, self.seed);
        self.install(scene, particles);
    }

    /// Install an externally built particle store for `scene`. A store whose
    /// arrays differ in length is rejected and the current scene is kept.
    pub fn load_particles(&mut self, scene: SceneName, particles: ParticleStore) -> Result<()> {
        particles.check_lengths()?;
        self.install(scene, particles);
        Ok(())
    }

    fn install(&mut self, scene: SceneName, particles: ParticleStore) {
        self.scene = scene;
        self.motion = scene.motion_rule();
        self.shading = scene.shading_rule();
        self.particles = particles;
        self.frame = 0;
        log::info!(
            "Loaded scene {} ({} circles, motion {:?}, shading {:?})",
            scene,
            self.particles.len(),
            self.motion,
            self.shading
        );
    }

    /// Reset the image to the scene's background
    pub fn clear_image(&mut self) -> Result<()> {
        let is_snow = self.scene.is_snow();
        let image = self.image.as_mut().ok_or(RenderError::NoImage)?;

        if is_snow {
            let height = image.height();
            for y in 0..height {
                let shade =
                    SNOW_CLEAR_BASE + SNOW_CLEAR_RANGE * (height - y) as f32 / height as f32;
                image.row_mut(y).fill([shade, shade, shade, 1.0]);
            }
        } else {
            image.clear([1.0, 1.0, 1.0, 1.0]);
        }
        Ok(())
    }

    /// Advance the scene's motion rule by one tick
    pub fn advance_animation(&mut self) {
        self.motion.advance(&mut self.particles);
        self.frame += 1;
    }

    /// Composite all circles into the image; call `clear_image` first
    pub fn render(&mut self) -> Result<RasterStats> {
        let image = self.image.as_mut().ok_or(RenderError::NoImage)?;
        let stats = render_circles(&self.particles, self.shading, image);
        log::debug!(
            "Frame {}: {} circles, {} pixels tested, {} shaded",
            self.frame,
            stats.circles,
            stats.pixels_tested,
            stats.pixels_shaded
        );
        Ok(stats)
    }

    /// Write particle count then `px py pz   vx vy vz   r` per particle
    pub fn dump_particles(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let mut out = BufWriter::new(File::create(path)?);
        self.particles.write_dump(&mut out)?;
        out.flush()?;
        log::debug!("Dumped {} particles to {}", self.particles.len(), path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_render_requires_image() {
        let mut renderer = RefRenderer::new();
        renderer.load_scene(SceneName::CircleRgb);
        assert!(matches!(renderer.clear_image(), Err(RenderError::NoImage)));
        assert!(matches!(renderer.render(), Err(RenderError::NoImage)));
    }

    #[test]
    fn test_realloc_replaces_image() {
        let mut renderer = RefRenderer::new();
        renderer.alloc_output_image(16, 8);
        renderer.alloc_output_image(4, 2);
        let image = renderer.image().unwrap();
        assert_eq!((image.width(), image.height()), (4, 2));
        assert_eq!(image.data().len(), 4 * 2 * 4);
    }

    #[test]
    fn test_clear_white() {
        let mut renderer = RefRenderer::new();
        renderer.load_particles(SceneName::Hypnosis, ParticleStore::default()).unwrap();
        renderer.alloc_output_image(4, 4);
        renderer.clear_image().unwrap();
        assert!(renderer.image().unwrap().pixels().iter().all(|p| *p == [1.0; 4]));
    }

    #[test]
    fn test_clear_snow_gradient() {
        let mut renderer = RefRenderer::new();
        renderer
            .load_particles(SceneName::SnowflakesSingleFrame, ParticleStore::default())
            .unwrap();
        renderer.alloc_output_image(2, 10);
        renderer.clear_image().unwrap();

        let image = renderer.image().unwrap();
        let first = image.pixel(0, 0);
        let last = image.pixel(1, 9);
        assert!((first[0] - 0.85).abs() < 1e-6);
        assert!((last[0] - (0.4 + 0.45 * 0.1)).abs() < 1e-6);
        assert_eq!(first[3], 1.0);
        for y in 1..10 {
            assert!(image.pixel(0, y)[0] < image.pixel(0, y - 1)[0]);
        }
    }

    #[test]
    fn test_reload_resets_state() {
        let mut renderer = RefRenderer::new();
        renderer.load_scene(SceneName::Hypnosis);
        renderer.advance_animation();
        assert_eq!(renderer.frame(), 1);

        renderer.load_scene(SceneName::CircleRgby);
        assert_eq!(renderer.frame(), 0);
        assert_eq!(renderer.particles().len(), 4);
        let before = renderer.particles().clone();
        renderer.advance_animation();
        assert_eq!(renderer.particles(), &before);
    }

    #[test]
    fn test_load_particles_rejects_ragged_store() {
        let mut store = ParticleStore::with_count(1);
        store.radius.push(0.3);

        let mut renderer = RefRenderer::new();
        renderer.load_scene(SceneName::CircleRgb);
        let err = renderer.load_particles(SceneName::Hypnosis, store).unwrap_err();
        assert!(matches!(
            err,
            RenderError::ParticleCountMismatch { position: 1, radius: 2, .. }
        ));

        // Previous scene is still installed and renders
        assert_eq!(renderer.scene(), SceneName::CircleRgb);
        assert_eq!(renderer.particles().len(), 3);
        renderer.alloc_output_image(8, 8);
        renderer.clear_image().unwrap();
        assert!(renderer.render().is_ok());
    }

    #[test]
    fn test_render_does_not_clear() {
        let mut store = ParticleStore::with_count(1);
        store.position[0] = Vec3::new(0.5, 0.5, 0.0);
        store.radius[0] = 0.2;
        store.color[0] = Vec3::ZERO;

        let mut renderer = RefRenderer::new();
        renderer.load_particles(SceneName::CircleRgb, store).unwrap();
        renderer.alloc_output_image(8, 8);
        renderer.clear_image().unwrap();
        renderer.render().unwrap();
        renderer.render().unwrap();

        // Two passes of 50% black over white
        assert_eq!(renderer.image().unwrap().pixel(4, 4), [0.25, 0.25, 0.25, 2.0]);
    }
}
