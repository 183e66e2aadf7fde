//! CPU reference rendering
//!
//! Circles are composited into an RGBA float image one at a time, in index
//! order. This ordering is the contract any faster renderer has to match.

pub mod color;
pub mod image;
pub mod raster;
pub mod shade;

pub use color::lookup_color;
pub use self::image::{Image, Pixel};
pub use raster::{PixelBounds, RasterStats, circle_pixel_bounds, render_circles};
pub use shade::{CircleSample, ShadingRule, blend, shade_pixel};
