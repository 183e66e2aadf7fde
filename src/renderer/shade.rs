//! Per-pixel circle shading and blending
//!
//! Blending is a read-modify-write on the pixel: RGB uses the "over"
//! operator, alpha accumulates. The operation does not commute, so every
//! pixel must see contributing circles in increasing index order.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::color::lookup_color;
use super::image::Pixel;

/// Peak opacity of a snowflake before the depth falloff
pub const SNOWFLAKE_MAX_ALPHA: f32 = 0.5;
/// Gaussian falloff exponent scale for snowflakes
pub const SNOWFLAKE_FALLOFF: f32 = 4.0;
/// Opacity of flat-colored circles
pub const FLAT_ALPHA: f32 = 0.5;

/// How a circle's color and opacity are computed at a pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ShadingRule {
    /// Circle's own color at fixed opacity
    #[default]
    FlatColor,
    /// Radial color ramp with depth-scaled Gaussian opacity
    Snowflake,
}

/// Circle attributes the shader reads
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleSample {
    pub center: Vec3,
    pub radius: f32,
    pub color: Vec3,
}

impl ShadingRule {
    /// Color and opacity for a pixel `dist_sq` away from the circle center
    #[inline]
    pub fn color_and_alpha(&self, circle: &CircleSample, dist_sq: f32) -> (Vec3, f32) {
        match self {
            ShadingRule::FlatColor => (circle.color, FLAT_ALPHA),
            ShadingRule::Snowflake => {
                let norm_dist = dist_sq.sqrt() / circle.radius;
                let color = lookup_color(norm_dist);

                // Nearer flakes (smaller z) are more opaque
                let max_alpha =
                    SNOWFLAKE_MAX_ALPHA * (0.6 + 0.4 * (1.0 - circle.center.z)).clamp(0.0, 1.0);
                let alpha = max_alpha * (-SNOWFLAKE_FALLOFF * norm_dist * norm_dist).exp();
                (color, alpha)
            }
        }
    }
}

/// Blend `circle` into `pixel` sampled at `pixel_center` (normalized space).
/// Returns false, leaving the pixel untouched, when the pixel is outside the
/// circle.
#[inline]
pub fn shade_pixel(
    rule: ShadingRule,
    circle: &CircleSample,
    pixel_center: Vec2,
    pixel: &mut Pixel,
) -> bool {
    let diff = circle.center.truncate() - pixel_center;
    let dist_sq = diff.x * diff.x + diff.y * diff.y;
    if dist_sq > circle.radius * circle.radius {
        return false;
    }

    let (color, alpha) = rule.color_and_alpha(circle, dist_sq);
    blend(pixel, color, alpha);
    true
}

/// `rgb = a * color + (1 - a) * rgb`, `alpha += a`
#[inline]
pub fn blend(pixel: &mut Pixel, color: Vec3, alpha: f32) {
    let one_minus_alpha = 1.0 - alpha;
    pixel[0] = alpha * color.x + one_minus_alpha * pixel[0];
    pixel[1] = alpha * color.y + one_minus_alpha * pixel[1];
    pixel[2] = alpha * color.z + one_minus_alpha * pixel[2];
    pixel[3] += alpha;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn circle(x: f32, y: f32, z: f32, radius: f32, color: Vec3) -> CircleSample {
        CircleSample {
            center: Vec3::new(x, y, z),
            radius,
            color,
        }
    }

    #[test]
    fn test_outside_leaves_pixel_untouched() {
        let c = circle(0.5, 0.5, 0.0, 0.1, Vec3::X);
        let mut pixel = [0.2, 0.3, 0.4, 1.0];
        assert!(!shade_pixel(ShadingRule::FlatColor, &c, Vec2::new(0.7, 0.5), &mut pixel));
        assert_eq!(pixel, [0.2, 0.3, 0.4, 1.0]);
    }

    #[test]
    fn test_flat_blend() {
        let c = circle(0.5, 0.5, 0.0, 0.1, Vec3::new(1.0, 0.0, 0.0));
        let mut pixel = [1.0, 1.0, 1.0, 1.0];
        assert!(shade_pixel(ShadingRule::FlatColor, &c, Vec2::new(0.5, 0.5), &mut pixel));
        assert_eq!(pixel, [1.0, 0.5, 0.5, 1.5]);
    }

    #[test]
    fn test_snowflake_center_alpha_depends_on_depth() {
        let near = circle(0.5, 0.5, 0.0, 0.1, Vec3::ZERO);
        let far = circle(0.5, 0.5, 1.0, 0.1, Vec3::ZERO);

        let (color, alpha_near) = ShadingRule::Snowflake.color_and_alpha(&near, 0.0);
        assert_eq!(color, Vec3::ONE);
        assert_eq!(alpha_near, 0.5);

        let (_, alpha_far) = ShadingRule::Snowflake.color_and_alpha(&far, 0.0);
        assert!((alpha_far - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_snowflake_edge_falloff() {
        let c = circle(0.5, 0.5, 0.0, 0.1, Vec3::ZERO);
        let (color, alpha) = ShadingRule::Snowflake.color_and_alpha(&c, 0.01);
        assert!((alpha - 0.5 * (-4.0f32).exp()).abs() < 1e-6);
        assert!((color - Vec3::new(0.8, 0.8, 1.0)).length() < 1e-5);
    }

    #[test]
    fn test_blend_order_matters() {
        let red = Vec3::new(1.0, 0.0, 0.0);
        let blue = Vec3::new(0.0, 0.0, 1.0);

        let mut a = [1.0, 1.0, 1.0, 1.0];
        blend(&mut a, red, 0.5);
        blend(&mut a, blue, 0.5);

        let mut b = [1.0, 1.0, 1.0, 1.0];
        blend(&mut b, blue, 0.5);
        blend(&mut b, red, 0.5);

        assert_ne!(a, b);
        assert_eq!(a[3], b[3]);
    }
}
