//! Scene module - triangles, lights, and scene file loading

mod geometry;
mod loader;

pub use geometry::*;
pub use loader::*;
