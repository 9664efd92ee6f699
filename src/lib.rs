//! mode13: palettized software rasterizer
//!
//! Draws points, lines, rectangles and polygons into a 320x200 byte-per-pixel
//! buffer, in the spirit of VGA mode 13h:
//! - Scale, rotate (about X, Y or Z) and shear polygons about their centroid
//! - Bresenham lines, clipped rectangles, scanline polygon fill
//! - Paint order is draw order; no depth buffer
//! - Frames are handed to a display service for presentation

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod app;
pub mod config;
pub mod display;
pub mod error;
pub mod logging;
pub mod rasterizer;
pub mod scene;
pub mod session;
