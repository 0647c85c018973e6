//! Vector and affine-transform math for the orthographic pipeline

use std::ops::{Add, Sub, Mul};
use serde::{Serialize, Deserialize};

/// 3D Vector
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 { x: 0.0, y: 0.0, z: 0.0 };

    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn dot(self, other: Vec3) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(self, other: Vec3) -> Vec3 {
        Vec3 {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    pub fn len(self) -> f32 {
        self.dot(self).sqrt()
    }

    pub fn normalize(self) -> Vec3 {
        let l = self.len();
        if l == 0.0 {
            return Vec3::ZERO;
        }
        Vec3 {
            x: self.x / l,
            y: self.y / l,
            z: self.z / l,
        }
    }

    /// Cosine of the angle between two vectors.
    /// Returns 0.0 when either vector has zero length.
    pub fn cos_angle(self, other: Vec3) -> f32 {
        let denom = self.len() * other.len();
        if denom == 0.0 {
            return 0.0;
        }
        self.dot(other) / denom
    }

    pub fn scale(self, s: f32) -> Vec3 {
        Vec3 {
            x: self.x * s,
            y: self.y * s,
            z: self.z * s,
        }
    }
}

impl Add for Vec3 {
    type Output = Vec3;
    fn add(self, other: Vec3) -> Vec3 {
        Vec3 {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }
}

impl Sub for Vec3 {
    type Output = Vec3;
    fn sub(self, other: Vec3) -> Vec3 {
        Vec3 {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}

impl Mul<f32> for Vec3 {
    type Output = Vec3;
    fn mul(self, s: f32) -> Vec3 {
        self.scale(s)
    }
}

/// Row-major 4x4 affine transform over [`Vec3`].
///
/// Built through the named factories; applying one never mutates its input
/// and never fails for finite input. Composition is matrix multiplication,
/// so `(a * b).apply(v) == a.apply(b.apply(v))`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    m: [[f32; 4]; 4],
}

impl Transform {
    /// Rotation about the X axis; (y, z) rotate, x is fixed.
    pub fn rotation_x(angle: f32) -> Transform {
        let (s, c) = angle.sin_cos();
        Transform {
            m: [
                [1.0, 0.0, 0.0, 0.0],
                [0.0, c, -s, 0.0],
                [0.0, s, c, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }

    /// Rotation about the Y axis; (x, z) rotate, y is fixed.
    pub fn rotation_y(angle: f32) -> Transform {
        let (s, c) = angle.sin_cos();
        Transform {
            m: [
                [c, 0.0, s, 0.0],
                [0.0, 1.0, 0.0, 0.0],
                [-s, 0.0, c, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }

    pub fn scale(sx: f32, sy: f32, sz: f32) -> Transform {
        Transform {
            m: [
                [sx, 0.0, 0.0, 0.0],
                [0.0, sy, 0.0, 0.0],
                [0.0, 0.0, sz, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }

    pub fn translation(v: Vec3) -> Transform {
        Transform {
            m: [
                [1.0, 0.0, 0.0, v.x],
                [0.0, 1.0, 0.0, v.y],
                [0.0, 0.0, 1.0, v.z],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }

    /// Apply the transform to a point, yielding a new point.
    pub fn apply(&self, v: Vec3) -> Vec3 {
        let m = &self.m;
        Vec3 {
            x: m[0][0] * v.x + m[0][1] * v.y + m[0][2] * v.z + m[0][3],
            y: m[1][0] * v.x + m[1][1] * v.y + m[1][2] * v.z + m[1][3],
            z: m[2][0] * v.x + m[2][1] * v.y + m[2][2] * v.z + m[2][3],
        }
    }
}

impl Mul for Transform {
    type Output = Transform;

    fn mul(self, other: Transform) -> Transform {
        let mut m = [[0.0f32; 4]; 4];
        for row in 0..4 {
            for col in 0..4 {
                let mut acc = 0.0;
                for k in 0..4 {
                    acc += self.m[row][k] * other.m[k][col];
                }
                m[row][col] = acc;
            }
        }
        Transform { m }
    }
}
