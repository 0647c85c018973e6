//! Per-polygon edge lists for scan conversion
//!
//! An EdgeList is one triangle's scanline boundary table: for each integer
//! row in the triangle's vertical range, the left and right (x, z) where
//! the row crosses the triangle's edges. Rows are stored in fixed arrays
//! indexed by `y - start_y` so the range invariant is explicit.

use crate::scene::Polygon;

/// One scanline boundary: x position and interpolated depth
#[derive(Debug, Clone, Copy)]
pub struct Boundary {
    pub x: f32,
    pub z: f32,
}

/// Scanline boundary table for a single polygon
#[derive(Debug, Clone)]
pub struct EdgeList {
    start_y: i32,
    end_y: i32,
    left: Vec<Option<Boundary>>,
    right: Vec<Option<Boundary>>,
}

impl EdgeList {
    pub fn new(start_y: i32, end_y: i32) -> Self {
        let rows = (end_y - start_y).max(0) as usize + 1;
        Self {
            start_y,
            end_y,
            left: vec![None; rows],
            right: vec![None; rows],
        }
    }

    /// Build the edge list for one triangle already in canvas pixel space.
    ///
    /// Each directed edge walks its integer rows accumulating x and z by a
    /// per-row slope. Edges traversed with increasing y feed the left
    /// boundary, decreasing y the right boundary; edges whose endpoints
    /// round to the same row are skipped (no slope exists). Left/right
    /// assignment follows traversal direction only, so some windings yield
    /// a left boundary right of the right one; the compositor treats those
    /// rows as empty spans.
    pub fn for_polygon(poly: &Polygon) -> EdgeList {
        let ys = poly.vertices.map(|v| v.y.round() as i32);
        let start_y = ys[0].min(ys[1]).min(ys[2]);
        let end_y = ys[0].max(ys[1]).max(ys[2]);
        let mut list = EdgeList::new(start_y, end_y);

        for i in 0..3 {
            let a = poly.vertices[i];
            let b = poly.vertices[(i + 1) % 3];
            let ya = a.y.round() as i32;
            let yb = b.y.round() as i32;
            if ya == yb {
                continue; // horizontal edge, no rows
            }
            let dy = (yb - ya) as f32;
            let dx = (b.x - a.x) / dy;
            let dz = (b.z - a.z) / dy;
            let mut x = a.x;
            let mut z = a.z;
            if ya < yb {
                let mut y = ya;
                while y <= yb {
                    list.set_left(y, Boundary { x, z });
                    x += dx;
                    z += dz;
                    y += 1;
                }
            } else {
                let mut y = ya;
                while y >= yb {
                    list.set_right(y, Boundary { x, z });
                    x -= dx;
                    z -= dz;
                    y -= 1;
                }
            }
        }

        list
    }

    pub fn start_y(&self) -> i32 {
        self.start_y
    }

    pub fn end_y(&self) -> i32 {
        self.end_y
    }

    pub fn left(&self, y: i32) -> Option<Boundary> {
        self.row_index(y).and_then(|i| self.left[i])
    }

    pub fn right(&self, y: i32) -> Option<Boundary> {
        self.row_index(y).and_then(|i| self.right[i])
    }

    /// Later writes replace earlier ones (shared vertices revisit rows).
    pub fn set_left(&mut self, y: i32, b: Boundary) {
        if let Some(i) = self.row_index(y) {
            self.left[i] = Some(b);
        }
    }

    pub fn set_right(&mut self, y: i32, b: Boundary) {
        if let Some(i) = self.row_index(y) {
            self.right[i] = Some(b);
        }
    }

    fn row_index(&self, y: i32) -> Option<usize> {
        if y < self.start_y || y > self.end_y {
            return None;
        }
        Some((y - self.start_y) as usize)
    }
}
