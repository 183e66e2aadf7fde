//! Circle rasterizer
//!
//! Circles are processed strictly in index order. For each circle only the
//! pixels inside its screen-space bounding box are shaded; the shader then
//! rejects pixels outside the radius.

use glam::Vec2;

use super::image::Image;
use super::shade::{CircleSample, ShadingRule, shade_pixel};
use crate::sim::ParticleStore;

/// Half-open pixel rectangle `[min_x, max_x) x [min_y, max_y)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelBounds {
    pub min_x: u32,
    pub max_x: u32,
    pub min_y: u32,
    pub max_y: u32,
}

impl PixelBounds {
    pub fn is_empty(&self) -> bool {
        self.min_x >= self.max_x || self.min_y >= self.max_y
    }

    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.min_x && x < self.max_x && y >= self.min_y && y < self.max_y
    }

    pub fn area(&self) -> u64 {
        if self.is_empty() {
            0
        } else {
            (self.max_x - self.min_x) as u64 * (self.max_y - self.min_y) as u64
        }
    }
}

/// Counters from one raster pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RasterStats {
    /// Circles visited
    pub circles: usize,
    /// Pixels inside some circle's bounding box
    pub pixels_tested: u64,
    /// Pixels that received a contribution
    pub pixels_shaded: u64,
}

#[inline]
fn to_pixel(coord: f32, dimension: u32) -> i64 {
    (coord * dimension as f32).floor() as i64
}

/// Screen-space bounding box of a circle, clamped to the image. The max edge
/// is pushed out one pixel so circles ending inside a pixel are covered.
pub fn circle_pixel_bounds(center: Vec2, radius: f32, width: u32, height: u32) -> PixelBounds {
    let w = width as i64;
    let h = height as i64;
    PixelBounds {
        min_x: to_pixel(center.x - radius, width).clamp(0, w) as u32,
        max_x: (to_pixel(center.x + radius, width) + 1).clamp(0, w) as u32,
        min_y: to_pixel(center.y - radius, height).clamp(0, h) as u32,
        max_y: (to_pixel(center.y + radius, height) + 1).clamp(0, h) as u32,
    }
}

/// Normalized center of pixel `(x, y)`
#[inline]
pub fn pixel_center(x: u32, y: u32, inv_width: f32, inv_height: f32) -> Vec2 {
    Vec2::new(inv_width * (x as f32 + 0.5), inv_height * (y as f32 + 0.5))
}

/// Shade one circle into every pixel of its bounding box
pub fn render_circle(
    rule: ShadingRule,
    circle: &CircleSample,
    image: &mut Image,
    stats: &mut RasterStats,
) {
    stats.circles += 1;

    // Zero-area circles cover nothing, even a pixel center they sit on
    if circle.radius <= 0.0 {
        return;
    }

    let width = image.width();
    let height = image.height();
    let bounds = circle_pixel_bounds(circle.center.truncate(), circle.radius, width, height);
    if bounds.is_empty() {
        return;
    }

    let inv_width = 1.0 / width as f32;
    let inv_height = 1.0 / height as f32;

    for y in bounds.min_y..bounds.max_y {
        let row = image.row_mut(y);
        for x in bounds.min_x..bounds.max_x {
            let center = pixel_center(x, y, inv_width, inv_height);
            if shade_pixel(rule, circle, center, &mut row[x as usize]) {
                stats.pixels_shaded += 1;
            }
        }
    }
    stats.pixels_tested += bounds.area();
}

/// Render every circle in `store` into `image`, in index order
pub fn render_circles(store: &ParticleStore, rule: ShadingRule, image: &mut Image) -> RasterStats {
    let mut stats = RasterStats::default();
    for i in 0..store.len() {
        let circle = CircleSample {
            center: store.position[i],
            radius: store.radius[i],
            color: store.color[i],
        };
        render_circle(rule, &circle, image, &mut stats);
    }
    stats
}
