//! Scene loader
//!
//! Builds the initial particle store for each scene. All randomness comes
//! from a seeded `Pcg32`, so a scene loaded twice with the same seed is
//! identical.

use glam::{Vec2, Vec3};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::motion::{SPARK_MAX_DIST, spark_index, spark_rim_state};
use super::particles::ParticleStore;
use crate::consts::*;
use crate::scene::SceneName;

pub const SNOWFLAKE_COUNT: usize = 100_000;
pub const BOUNCING_BALL_COUNT: usize = 10;
pub const HYPNOSIS_RING_COUNT: usize = 20;
/// Large circles in the big/little scenes
pub const BIG_CIRCLE_COUNT: usize = 10;
/// Small circles in the big/little scenes
pub const LITTLE_CIRCLE_COUNT: usize = 9_990;
/// Grid cells per side in the pattern scene
pub const PATTERN_GRID: usize = 8;
/// Concentric rings per pattern cell
pub const PATTERN_RINGS: usize = 4;

const RED: Vec3 = Vec3::new(1.0, 0.0, 0.0);
const GREEN: Vec3 = Vec3::new(0.0, 1.0, 0.0);
const BLUE: Vec3 = Vec3::new(0.0, 0.0, 1.0);
const YELLOW: Vec3 = Vec3::new(1.0, 1.0, 0.0);

/// Build the initial particle store for `scene`
pub fn load_circle_scene(scene: SceneName, seed: u64) -> ParticleStore {
    let mut rng = Pcg32::seed_from_u64(seed);

    let store = match scene {
        SceneName::CircleRgb => fixed_circles(&[
            (Vec3::new(0.4, 0.5, 0.75), RED, 0.3),
            (Vec3::new(0.5, 0.5, 0.5), GREEN, 0.3),
            (Vec3::new(0.6, 0.5, 0.25), BLUE, 0.3),
        ]),
        SceneName::CircleRgby => fixed_circles(&[
            (Vec3::new(0.4, 0.4, 0.75), RED, 0.25),
            (Vec3::new(0.6, 0.4, 0.5), GREEN, 0.25),
            (Vec3::new(0.4, 0.6, 0.25), BLUE, 0.25),
            (Vec3::new(0.6, 0.6, 0.0), YELLOW, 0.25),
        ]),
        SceneName::CircleTest10k => random_circles(&mut rng, 10_000, 0.02, 0.06),
        SceneName::CircleTest100k => random_circles(&mut rng, 100_000, 0.02, 0.06),
        SceneName::BigLittle => {
            let mut store = random_circles(&mut rng, BIG_CIRCLE_COUNT, 0.1, 0.2);
            append(&mut store, random_circles(&mut rng, LITTLE_CIRCLE_COUNT, 0.005, 0.02));
            store
        }
        SceneName::LittleBig => {
            let mut store = random_circles(&mut rng, LITTLE_CIRCLE_COUNT, 0.005, 0.02);
            append(&mut store, random_circles(&mut rng, BIG_CIRCLE_COUNT, 0.1, 0.2));
            store
        }
        SceneName::Pattern => pattern(),
        SceneName::Snowflakes | SceneName::SnowflakesSingleFrame => {
            snowflakes(&mut rng, SNOWFLAKE_COUNT)
        }
        SceneName::BouncingBalls => bouncing_balls(&mut rng),
        SceneName::Hypnosis => hypnosis(&mut rng),
        SceneName::Fireworks => fireworks(&mut rng),
    };

    log::debug!("Built scene {} with {} circles (seed {})", scene, store.len(), seed);
    store
}

fn fixed_circles(circles: &[(Vec3, Vec3, f32)]) -> ParticleStore {
    let mut store = ParticleStore::with_count(circles.len());
    for (i, &(pos, color, radius)) in circles.iter().enumerate() {
        store.position[i] = pos;
        store.color[i] = color;
        store.radius[i] = radius;
    }
    store
}

fn append(store: &mut ParticleStore, other: ParticleStore) {
    store.position.extend(other.position);
    store.velocity.extend(other.velocity);
    store.color.extend(other.color);
    store.radius.extend(other.radius);
}

/// Depths in [0, 1) sorted far to near, so nearer circles composite last
fn sorted_depths(rng: &mut Pcg32, count: usize) -> Vec<f32> {
    let mut depths: Vec<f32> = (0..count).map(|_| rng.random::<f32>()).collect();
    depths.sort_by(|a, b| b.total_cmp(a));
    depths
}

fn random_circles(
    rng: &mut Pcg32,
    count: usize,
    min_radius: f32,
    radius_range: f32,
) -> ParticleStore {
    let mut store = ParticleStore::with_count(count);
    let depths = sorted_depths(rng, count);

    for (i, depth) in depths.into_iter().enumerate() {
        store.radius[i] = min_radius + radius_range * rng.random::<f32>();
        store.position[i] = Vec3::new(rng.random(), rng.random(), depth);
        store.color[i] = Vec3::new(
            0.1 + 0.9 * rng.random::<f32>(),
            0.1 + 0.9 * rng.random::<f32>(),
            0.1 + 0.9 * rng.random::<f32>(),
        );
    }
    store
}

fn pattern() -> ParticleStore {
    let cells = PATTERN_GRID * PATTERN_GRID;
    let mut store = ParticleStore::with_count(cells * PATTERN_RINGS);
    let cell_size = 1.0 / PATTERN_GRID as f32;

    for cy in 0..PATTERN_GRID {
        for cx in 0..PATTERN_GRID {
            let cell = cy * PATTERN_GRID + cx;
            let center = Vec2::new(
                (cx as f32 + 0.5) * cell_size,
                (cy as f32 + 0.5) * cell_size,
            );
            let tint = Vec3::new(
                cx as f32 / PATTERN_GRID as f32,
                cy as f32 / PATTERN_GRID as f32,
                1.0 - cx as f32 / PATTERN_GRID as f32,
            );
            for ring in 0..PATTERN_RINGS {
                let i = cell * PATTERN_RINGS + ring;
                // Largest ring first so the inner ones stay visible
                let scale = 1.0 - ring as f32 / PATTERN_RINGS as f32;
                store.position[i] = center.extend(ring as f32 / PATTERN_RINGS as f32);
                store.radius[i] = 0.5 * cell_size * scale;
                store.color[i] = if ring % 2 == 0 { tint } else { Vec3::ONE - tint };
            }
        }
    }
    store
}

fn snowflakes(rng: &mut Pcg32, count: usize) -> ParticleStore {
    let mut store = ParticleStore::with_count(count);
    let depths = sorted_depths(rng, count);

    for (i, depth) in depths.into_iter().enumerate() {
        // Nearer flakes are larger
        store.radius[i] = 0.0025 + 0.02 * (1.0 - depth) * rng.random::<f32>();
        store.position[i] = Vec3::new(rng.random(), rng.random(), depth);
        store.color[i] = Vec3::ONE;
    }
    store
}

fn bouncing_balls(rng: &mut Pcg32) -> ParticleStore {
    let mut store = ParticleStore::with_count(BOUNCING_BALL_COUNT);
    let spacing = 1.0 / BOUNCING_BALL_COUNT as f32;

    for i in 0..BOUNCING_BALL_COUNT {
        store.position[i] = Vec3::new((i as f32 + 0.5) * spacing, rng.random_range(0.4..0.9), 0.0);
        store.radius[i] = 0.4 * spacing;
        store.color[i] = Vec3::new(rng.random(), rng.random(), rng.random());
    }
    store
}

fn hypnosis(rng: &mut Pcg32) -> ParticleStore {
    let mut store = ParticleStore::with_count(HYPNOSIS_RING_COUNT);
    let step = 0.5 / HYPNOSIS_RING_COUNT as f32;

    for i in 0..HYPNOSIS_RING_COUNT {
        // Largest first: later (smaller) rings composite on top
        store.position[i] = Vec3::new(0.5, 0.5, 0.0);
        store.radius[i] = 0.5 - step * i as f32;
        store.color[i] = if i % 2 == 0 {
            Vec3::new(rng.random(), rng.random(), rng.random())
        } else {
            Vec3::ONE
        };
    }
    store
}

fn fireworks(rng: &mut Pcg32) -> ParticleStore {
    let mut store = ParticleStore::with_count(NUM_FIREWORKS + NUM_FIREWORKS * NUM_SPARKS);

    for i in 0..NUM_FIREWORKS {
        let center = Vec2::new(rng.random_range(0.2..0.8), rng.random_range(0.2..0.8));
        let radius = rng.random_range(0.02..0.05);
        let color = Vec3::new(rng.random(), rng.random(), rng.random());

        store.position[i] = center.extend(0.0);
        store.radius[i] = radius;
        store.color[i] = color;

        for j in 0..NUM_SPARKS {
            let s = spark_index(i, j);
            let (rim_pos, vel) = spark_rim_state(center, radius, j);
            // Stagger sparks along their ray so they don't pulse in unison
            let dir = vel.truncate().normalize_or_zero();
            let travel = rng.random_range(0.0..(SPARK_MAX_DIST - radius));
            store.position[s] = rim_pos + (dir * travel).extend(0.0);
            store.velocity[s] = vel;
            store.radius[s] = 0.005;
            store.color[s] = color.lerp(Vec3::ONE, 0.5);
        }
    }
    store
}
