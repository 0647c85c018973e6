//! Orthographic scan-line software renderer
//!
//! Classic fixed pipeline, one triangle at a time:
//! - rigid transforms and fit-to-canvas normalization
//! - back-face culling and flat Lambertian shading
//! - per-polygon edge lists (scan conversion)
//! - z-buffered compositing into a framebuffer

mod math;
mod edge;
mod render;

pub use math::*;
pub use edge::*;
pub use render::*;

/// Canvas dimensions
pub const WIDTH: usize = 600;
pub const HEIGHT: usize = 600;
