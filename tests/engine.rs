use std::fs;

use circle_render::consts::{NUM_FIREWORKS, NUM_SPARKS};
use circle_render::{Image, ParticleStore, RefRenderer, SceneName};
use glam::Vec3;

fn render_frames(scene: SceneName, seed: u64, size: u32, frames: u32) -> RefRenderer {
    let mut renderer = RefRenderer::with_seed(seed);
    renderer.alloc_output_image(size, size);
    renderer.load_scene(scene);
    for frame in 0..frames {
        if frame > 0 {
            renderer.advance_animation();
        }
        renderer.clear_image().unwrap();
        renderer.render().unwrap();
    }
    renderer
}

#[test]
fn test_single_ball_comes_to_rest() {
    let mut store = ParticleStore::with_count(1);
    store.position[0] = Vec3::new(0.5, 0.5, 0.0);
    store.radius[0] = 0.05;

    let mut renderer = RefRenderer::new();
    renderer.load_particles(SceneName::BouncingBalls, store).unwrap();
    for _ in 0..2_000 {
        renderer.advance_animation();
    }
    let settled = renderer.particles().clone();
    assert_eq!(settled.position[0].y, 0.0);
    assert_eq!(settled.velocity[0].y, 0.0);

    for _ in 0..100 {
        renderer.advance_animation();
    }
    assert_eq!(renderer.particles(), &settled);
}

#[test]
fn test_dump_file_format() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("particles.txt");

    let mut renderer = RefRenderer::new();
    renderer.load_scene(SceneName::CircleRgb);
    renderer.dump_particles(&path).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("3"));
    let first: Vec<f32> = lines
        .next()
        .unwrap()
        .split_whitespace()
        .map(|f| f.parse().unwrap())
        .collect();
    assert_eq!(first, vec![0.4, 0.5, 0.75, 0.0, 0.0, 0.0, 0.3]);
    assert_eq!(lines.count(), 2);
}

#[test]
fn test_dump_to_missing_directory_reports_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("particles.txt");

    let mut renderer = RefRenderer::new();
    renderer.load_scene(SceneName::CircleRgb);
    assert!(renderer.dump_particles(&path).is_err());
}

#[test]
fn test_render_is_reproducible() {
    for scene in [SceneName::Fireworks, SceneName::Hypnosis, SceneName::CircleRgby] {
        let a = render_frames(scene, 11, 48, 5);
        let b = render_frames(scene, 11, 48, 5);
        assert_eq!(a.image(), b.image(), "scene {scene}");
        assert_eq!(a.particles(), b.particles(), "scene {scene}");
    }
}

#[test]
fn test_circle_order_changes_output() {
    let mut forward = ParticleStore::with_count(2);
    forward.position = vec![Vec3::new(0.45, 0.5, 0.0), Vec3::new(0.55, 0.5, 0.0)];
    forward.radius = vec![0.2, 0.2];
    forward.color = vec![Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 1.0)];

    let mut reversed = forward.clone();
    reversed.position.reverse();
    reversed.radius.reverse();
    reversed.color.reverse();

    let render = |store: ParticleStore| {
        let mut renderer = RefRenderer::new();
        renderer.load_particles(SceneName::CircleRgb, store).unwrap();
        renderer.alloc_output_image(32, 32);
        renderer.clear_image().unwrap();
        renderer.render().unwrap();
        renderer.image().unwrap().clone()
    };

    let a = render(forward);
    let b = render(reversed);
    // Overlap region differs, alpha does not
    assert_ne!(a.pixel(16, 16), b.pixel(16, 16));
    assert_eq!(a.pixel(16, 16)[3], b.pixel(16, 16)[3]);
}

#[test]
fn test_zero_radius_scene_leaves_clear_image() {
    let mut store = ParticleStore::with_count(1);
    store.position[0] = Vec3::new(0.5, 0.5, 0.0);

    let mut renderer = RefRenderer::new();
    renderer.load_particles(SceneName::SnowflakesSingleFrame, store).unwrap();
    renderer.alloc_output_image(33, 33);
    renderer.clear_image().unwrap();
    let cleared = renderer.image().unwrap().clone();
    renderer.render().unwrap();
    assert_eq!(renderer.image().unwrap(), &cleared);
}

#[test]
fn test_snow_single_frame_is_static() {
    let mut renderer = RefRenderer::with_seed(2);
    renderer.load_scene(SceneName::SnowflakesSingleFrame);
    let before = renderer.particles().clone();
    renderer.advance_animation();
    assert_eq!(renderer.particles(), &before);
}

#[test]
fn test_fireworks_layout() {
    let renderer = render_frames(SceneName::Fireworks, 3, 32, 60);
    let particles = renderer.particles();
    assert_eq!(particles.len(), NUM_FIREWORKS * (NUM_SPARKS + 1));
    for i in 0..NUM_FIREWORKS {
        let center = particles.position[i].truncate();
        for j in 0..NUM_SPARKS {
            let spark = particles.position[NUM_FIREWORKS + i * NUM_SPARKS + j].truncate();
            assert!((spark - center).length() <= 0.25 + 1e-5);
        }
    }
}

#[test]
fn test_ppm_frame_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("frame.ppm");

    let renderer = render_frames(SceneName::CircleRgb, 0, 40, 1);
    let image = renderer.image().unwrap();
    image.save_ppm(&path).unwrap();

    let loaded = Image::load_ppm(&path).unwrap();
    assert!(image.quantized().matches(&loaded, 0.0));
    assert_eq!(loaded.data().len(), 40 * 40 * 4);
}

#[test]
fn test_malformed_reference_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.ppm");
    fs::write(&path, b"P6\n4294967295 4294967295\n255\n").unwrap();
    assert!(Image::load_ppm(&path).is_err());
}
