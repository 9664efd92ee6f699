//! Mode 13h-style software rasterizer
//!
//! Features:
//! - Palette-indexed 320x200 framebuffer, one byte per pixel
//! - Bresenham lines, clipped rectangles, scanline-filled polygons
//! - Scale/rotate/shear applied about each polygon's centroid
//! - Color index 0 is transparent for every shape

mod math;
mod palette;
mod render;
mod transform;
mod types;

pub use math::*;
pub use palette::*;
pub use render::*;
pub use types::*;

/// Screen dimensions (VGA mode 13h)
pub const WIDTH: usize = 320;
pub const HEIGHT: usize = 200;
