//! Core rendering pipeline
//!
//! Orthographic flat-shaded rasterization: cull back faces, shade each
//! triangle once, scan-convert it to an edge list, and composite the spans
//! into a z-buffered framebuffer. No perspective divide anywhere; x and y
//! are already screen coordinates and z only orders depth (smaller = nearer).

use serde::{Serialize, Deserialize};
use super::edge::EdgeList;
use super::math::Vec3;
use crate::scene::{Color, Polygon, Scene};

/// Framebuffer for software rendering
pub struct Framebuffer {
    pub pixels: Vec<u8>,   // RGBA, 4 bytes per pixel
    pub zbuffer: Vec<f32>, // Depth buffer
    pub width: usize,
    pub height: usize,
}

impl Framebuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            pixels: vec![0; width * height * 4],
            zbuffer: vec![f32::MAX; width * height],
            width,
            height,
        }
    }

    pub fn clear(&mut self, color: Color) {
        for i in 0..(self.width * self.height) {
            self.pixels[i * 4] = color.r;
            self.pixels[i * 4 + 1] = color.g;
            self.pixels[i * 4 + 2] = color.b;
            self.pixels[i * 4 + 3] = 255;
            self.zbuffer[i] = f32::MAX;
        }
    }

    /// Write a pixel if z is nearer than what is already stored.
    pub fn set_pixel_with_depth(&mut self, x: usize, y: usize, z: f32, color: Color) -> bool {
        if x < self.width && y < self.height {
            let idx = y * self.width + x;
            if z < self.zbuffer[idx] {
                self.zbuffer[idx] = z;
                let pixel_idx = idx * 4;
                self.pixels[pixel_idx] = color.r;
                self.pixels[pixel_idx + 1] = color.g;
                self.pixels[pixel_idx + 2] = color.b;
                self.pixels[pixel_idx + 3] = 255;
                return true;
            }
        }
        false
    }

    pub fn pixel(&self, x: usize, y: usize) -> Color {
        if x < self.width && y < self.height {
            let idx = (y * self.width + x) * 4;
            Color::new(self.pixels[idx], self.pixels[idx + 1], self.pixels[idx + 2])
        } else {
            Color::BLACK
        }
    }

    /// Save the color buffer as a PNG file
    pub fn save_png<P: AsRef<std::path::Path>>(&self, path: P) -> Result<(), String> {
        let path = path.as_ref();
        let img = image::RgbaImage::from_raw(self.width as u32, self.height as u32, self.pixels.clone())
            .ok_or_else(|| "Framebuffer dimensions do not match pixel data".to_string())?;
        img.save(path)
            .map_err(|e| format!("Failed to save {}: {}", path.display(), e))
    }
}

/// Light and background settings for a frame
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderSettings {
    /// Color of the directional light
    pub light_color: Color,
    /// Direction-independent light
    pub ambient_light: Color,
    /// Framebuffer clear color
    pub background: Color,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            light_color: Color::WHITE,
            ambient_light: Color::new(128, 128, 128),
            background: Color::new(30, 30, 35),
        }
    }
}

/// Back-face test: the viewer looks along increasing z, so a triangle whose
/// normal has positive z faces away and is culled. Degenerate triangles
/// have a zero normal and are culled too rather than rasterized with NaNs.
pub fn is_hidden(poly: &Polygon) -> bool {
    let normal = poly.normal();
    if normal.len() == 0.0 {
        return true;
    }
    normal.z > 0.0
}

/// Flat shading: one color for the whole triangle from ambient plus the
/// directional light scaled by the cosine of its angle to the face normal.
/// A light behind the face gives a negative cosine; the per-channel clamp
/// zeroes its contribution.
pub fn shade(poly: &Polygon, light_dir: Vec3, light_color: Color, ambient: Color) -> Color {
    let cos = light_dir.cos_angle(poly.normal());
    let reflectance = poly.reflectance.channels();
    let light = light_color.channels();
    let ambient = ambient.channels();

    let mut out = [0u8; 3];
    for c in 0..3 {
        let ambient_term =
            (ambient[c] as f32 / 255.0 * reflectance[c] as f32).clamp(0.0, 255.0);
        let diffuse_term =
            (light[c] as f32 / 255.0 * reflectance[c] as f32 * cos).clamp(0.0, 255.0);
        out[c] = (ambient_term + diffuse_term).round().clamp(0.0, 255.0) as u8;
    }
    Color::new(out[0], out[1], out[2])
}

/// Map a scene of arbitrary coordinates into canvas pixel space.
///
/// Translate the bounding-box corner to a fixed margin, scale uniformly so
/// the whole scene fits the canvas minus margins, then re-translate since
/// scaling moved the corner. Applying this to an already-fitted scene is a
/// no-op up to float tolerance, so it can run fresh every frame without
/// drift. A degenerate (zero width or height) scene keeps scale 1.
pub fn fit_to_canvas(scene: &Scene, width: usize, height: usize) -> Scene {
    let margin = width as f32 / 8.0;
    let moved = move_to_margin(scene, margin);

    let bounds = moved.bounds();
    let avail_w = width as f32 - 2.0 * margin;
    let avail_h = height as f32 - 2.0 * margin;
    let scale = if bounds.width() <= 0.0 || bounds.height() <= 0.0 {
        1.0
    } else {
        (avail_w / bounds.width()).min(avail_h / bounds.height())
    };

    move_to_margin(&moved.scaled(scale), margin)
}

fn move_to_margin(scene: &Scene, margin: f32) -> Scene {
    let bounds = scene.bounds();
    scene.translated(Vec3::new(margin - bounds.min_x, margin - bounds.min_y, 0.0))
}

/// Merge one edge list into the framebuffer with nearest-wins depth.
///
/// Rows missing either boundary contribute nothing, as do zero-width and
/// reversed (left x > right x) spans, so the edge list's left/right
/// ambiguity never turns into out-of-order pixel walks.
pub fn composite(fb: &mut Framebuffer, list: &EdgeList, color: Color) {
    for y in list.start_y()..list.end_y() {
        let (Some(left), Some(right)) = (list.left(y), list.right(y)) else {
            continue;
        };
        if right.x == left.x {
            continue; // zero-width span, z slope undefined
        }
        let slope_z = (right.z - left.z) / (right.x - left.x);
        let mut z = left.z;
        let mut x = left.x.round() as i32;
        let x_end = right.x.round() as i32 - 1;
        while x <= x_end {
            if x >= 0 && y >= 0 {
                fb.set_pixel_with_depth(x as usize, y as usize, z, color);
            }
            z += slope_z;
            x += 1;
        }
    }
}

/// Render one frame of the scene into the framebuffer.
///
/// The scene is expected to carry any accumulated rotation already; the
/// fit-to-canvas normalization is recomputed here every frame and never
/// persisted back, so repeated renders cannot drift.
pub fn render_frame(scene: &Scene, settings: &RenderSettings, fb: &mut Framebuffer) {
    fb.clear(settings.background);
    let fitted = fit_to_canvas(scene, fb.width, fb.height);

    for poly in &fitted.polygons {
        if is_hidden(poly) {
            continue;
        }
        let color = shade(poly, fitted.light, settings.light_color, settings.ambient_light);
        let list = EdgeList::for_polygon(poly);
        composite(fb, &list, color);
    }
}
