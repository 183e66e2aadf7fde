//! Snowflake color ramp

use glam::Vec3;

const RAMP: [Vec3; 5] = [
    Vec3::new(1.0, 1.0, 1.0),
    Vec3::new(1.0, 1.0, 1.0),
    Vec3::new(0.8, 0.9, 1.0),
    Vec3::new(0.8, 0.9, 1.0),
    Vec3::new(0.8, 0.8, 1.0),
];

/// Piecewise-linear lookup of `coord` in [0, 1] over the snowflake ramp
pub fn lookup_color(coord: f32) -> Vec3 {
    let n = RAMP.len();
    let scaled = coord * (n - 1) as f32;

    // coord == 1 lands on the last entry; keep base + 1 in range
    let base = (scaled as usize).min(n - 1);
    let next = (base + 1).min(n - 1);

    let weight = scaled - base as f32;
    let one_minus_weight = 1.0 - weight;

    one_minus_weight * RAMP[base] + weight * RAMP[next]
}
