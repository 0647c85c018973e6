//! Scene data model: colors, triangles, and the immutable scene
//!
//! Pure data structures with minimal behavior. Every scene-level transform
//! returns a new Scene; nothing here mutates in place, which keeps rotation
//! idempotent and reversible across frames.

use serde::{Serialize, Deserialize};
use crate::rasterizer::{Transform, Vec3};

/// RGB color (0-255 per channel)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0 };
    pub const WHITE: Color = Color { r: 255, g: 255, b: 255 };

    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn channels(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

/// A triangle: three ordered vertices plus a reflectance color.
///
/// Vertex order is significant; winding determines which way the face
/// normal points. Collinear vertices are tolerated and produce a zero
/// normal through the normalize guard.
#[derive(Debug, Clone, Copy)]
pub struct Polygon {
    pub vertices: [Vec3; 3],
    pub reflectance: Color,
}

impl Polygon {
    pub fn new(v0: Vec3, v1: Vec3, v2: Vec3, reflectance: Color) -> Self {
        Self {
            vertices: [v0, v1, v2],
            reflectance,
        }
    }

    /// Unit face normal: normalize((v1-v0) x (v2-v1)).
    /// Zero for degenerate triangles.
    pub fn normal(&self) -> Vec3 {
        let [v0, v1, v2] = self.vertices;
        let edge1 = v1 - v0;
        let edge2 = v2 - v1;
        edge1.cross(edge2).normalize()
    }

    fn transformed(&self, t: &Transform) -> Polygon {
        Polygon {
            vertices: [
                t.apply(self.vertices[0]),
                t.apply(self.vertices[1]),
                t.apply(self.vertices[2]),
            ],
            reflectance: self.reflectance,
        }
    }
}

/// Axis-aligned 2D bounds of a scene's vertices (z is ignored)
#[derive(Debug, Clone, Copy)]
pub struct Bounds {
    pub min_x: f32,
    pub min_y: f32,
    pub max_x: f32,
    pub max_y: f32,
}

impl Bounds {
    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f32 {
        self.max_y - self.min_y
    }
}

/// An ordered set of triangles plus one directional light vector.
///
/// Polygon order is draw order but never affects the final image; depth
/// testing makes compositing order-independent.
#[derive(Debug, Clone)]
pub struct Scene {
    pub polygons: Vec<Polygon>,
    pub light: Vec3,
}

impl Scene {
    pub fn new(polygons: Vec<Polygon>, light: Vec3) -> Self {
        Self { polygons, light }
    }

    /// Rotate every vertex and the light about the X then the Y axis.
    pub fn rotated(&self, x_angle: f32, y_angle: f32) -> Scene {
        let rotation = Transform::rotation_y(y_angle) * Transform::rotation_x(x_angle);
        Scene {
            polygons: self.polygons.iter().map(|p| p.transformed(&rotation)).collect(),
            light: rotation.apply(self.light),
        }
    }

    /// Translate every vertex. The light is a direction and is left alone.
    pub fn translated(&self, offset: Vec3) -> Scene {
        let translation = Transform::translation(offset);
        Scene {
            polygons: self.polygons.iter().map(|p| p.transformed(&translation)).collect(),
            light: self.light,
        }
    }

    /// Uniformly scale every vertex and the light. Uniform scale does not
    /// change the light's direction, and shading normalizes it anyway.
    pub fn scaled(&self, factor: f32) -> Scene {
        let scale = Transform::scale(factor, factor, factor);
        Scene {
            polygons: self.polygons.iter().map(|p| p.transformed(&scale)).collect(),
            light: scale.apply(self.light),
        }
    }

    /// Axis-aligned X/Y bounds over all vertices.
    /// Empty scenes collapse to a zero box at the origin.
    pub fn bounds(&self) -> Bounds {
        let mut bounds = Bounds {
            min_x: f32::MAX,
            min_y: f32::MAX,
            max_x: -f32::MAX,
            max_y: -f32::MAX,
        };
        for polygon in &self.polygons {
            for v in &polygon.vertices {
                bounds.min_x = bounds.min_x.min(v.x);
                bounds.min_y = bounds.min_y.min(v.y);
                bounds.max_x = bounds.max_x.max(v.x);
                bounds.max_y = bounds.max_y.max(v.y);
            }
        }
        if self.polygons.is_empty() {
            return Bounds { min_x: 0.0, min_y: 0.0, max_x: 0.0, max_y: 0.0 };
        }
        bounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    fn sample_scene() -> Scene {
        Scene::new(
            vec![
                Polygon::new(
                    Vec3::new(0.0, 0.0, 0.0),
                    Vec3::new(2.0, 0.0, 1.0),
                    Vec3::new(0.0, 3.0, -1.0),
                    Color::new(200, 50, 50),
                ),
                Polygon::new(
                    Vec3::new(-1.0, -1.0, 0.5),
                    Vec3::new(1.0, -1.0, 0.5),
                    Vec3::new(0.0, 1.0, 2.0),
                    Color::new(50, 200, 50),
                ),
            ],
            Vec3::new(0.0, 0.0, -1.0),
        )
    }

    #[test]
    fn test_normal_worked_example() {
        let poly = Polygon::new(
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            Color::WHITE,
        );
        let n = poly.normal();
        assert!((n.x).abs() < EPS && (n.y).abs() < EPS);
        assert!((n.z - 1.0).abs() < EPS);
    }

    #[test]
    fn test_degenerate_normal_is_zero() {
        let poly = Polygon::new(
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 1.0, 1.0),
            Vec3::new(2.0, 2.0, 2.0),
            Color::WHITE,
        );
        let n = poly.normal();
        assert!(n.len() < EPS);
        assert!(!n.x.is_nan() && !n.y.is_nan() && !n.z.is_nan());
    }

    #[test]
    fn test_rotation_inverse_restores_scene() {
        let scene = sample_scene();
        let round_trip = scene.rotated(0.6, 0.0).rotated(-0.6, 0.0);
        for (a, b) in scene.polygons.iter().zip(round_trip.polygons.iter()) {
            for (va, vb) in a.vertices.iter().zip(b.vertices.iter()) {
                assert!((va.x - vb.x).abs() < EPS);
                assert!((va.y - vb.y).abs() < EPS);
                assert!((va.z - vb.z).abs() < EPS);
            }
        }
    }

    #[test]
    fn test_transforms_do_not_mutate_source() {
        let scene = sample_scene();
        let original_v = scene.polygons[0].vertices[0];
        let _ = scene.rotated(1.0, 1.0);
        let _ = scene.translated(Vec3::new(10.0, 10.0, 0.0));
        let _ = scene.scaled(5.0);
        let v = scene.polygons[0].vertices[0];
        assert_eq!(v.x, original_v.x);
        assert_eq!(v.y, original_v.y);
        assert_eq!(v.z, original_v.z);
    }

    #[test]
    fn test_translation_leaves_light_alone() {
        let scene = sample_scene();
        let moved = scene.translated(Vec3::new(100.0, -50.0, 7.0));
        assert_eq!(moved.light.x, scene.light.x);
        assert_eq!(moved.light.y, scene.light.y);
        assert_eq!(moved.light.z, scene.light.z);
    }

    #[test]
    fn test_bounds() {
        let scene = sample_scene();
        let b = scene.bounds();
        assert!((b.min_x - -1.0).abs() < EPS);
        assert!((b.min_y - -1.0).abs() < EPS);
        assert!((b.max_x - 2.0).abs() < EPS);
        assert!((b.max_y - 3.0).abs() < EPS);
        assert!((b.width() - 3.0).abs() < EPS);
        assert!((b.height() - 4.0).abs() < EPS);
    }
}
