//! Application state
//!
//! Holds the loaded scene and its accumulated rotation. Rotation composes
//! onto the stored scene so it persists across frames; fit-to-canvas
//! normalization happens inside render_frame on a per-frame working copy
//! and is never stored back.

use std::path::Path;
use crate::rasterizer::{render_frame, Framebuffer, RenderSettings};
use crate::scene::{load_scene, Scene, SceneError};

/// Rotation step per keypress: 2 degrees
pub const ROTATE_STEP: f32 = 2.0 * std::f32::consts::PI / 180.0;

/// Renderer application state: Unloaded until a scene file parses, then
/// Loaded with the scene at its as-loaded orientation.
pub struct App {
    /// Scene as loaded from disk, kept pristine for reset
    original: Option<Scene>,
    /// Scene with accumulated rotation applied
    scene: Option<Scene>,
    pub settings: RenderSettings,
}

impl App {
    pub fn new(settings: RenderSettings) -> Self {
        Self {
            original: None,
            scene: None,
            settings,
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.scene.is_some()
    }

    /// Parse a scene file and replace the current scene. On error the
    /// previous scene (if any) stays untouched.
    pub fn load<P: AsRef<Path>>(&mut self, path: P) -> Result<(), SceneError> {
        let scene = load_scene(path)?;
        self.original = Some(scene.clone());
        self.scene = Some(scene);
        Ok(())
    }

    /// Compose a rotation onto the stored scene.
    pub fn rotate(&mut self, x_angle: f32, y_angle: f32) {
        if let Some(scene) = &self.scene {
            self.scene = Some(scene.rotated(x_angle, y_angle));
        }
    }

    /// Drop accumulated rotation, back to the as-loaded orientation.
    pub fn reset(&mut self) {
        self.scene = self.original.clone();
    }

    /// Render the current state into the framebuffer. With no scene loaded
    /// this just clears to the background color.
    pub fn render(&self, fb: &mut Framebuffer) {
        match &self.scene {
            Some(scene) => render_frame(scene, &self.settings, fb),
            None => fb.clear(self.settings.background),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rasterizer::Vec3;
    use crate::scene::{Color, Polygon};

    const EPS: f32 = 1e-4;

    fn app_with_scene() -> App {
        let mut app = App::new(RenderSettings::default());
        let scene = Scene::new(
            vec![Polygon::new(
                Vec3::new(0.0, 0.0, 1.0),
                Vec3::new(0.0, 4.0, 1.0),
                Vec3::new(4.0, 0.0, 1.0),
                Color::new(200, 80, 80),
            )],
            Vec3::new(0.0, 0.0, -1.0),
        );
        app.original = Some(scene.clone());
        app.scene = Some(scene);
        app
    }

    #[test]
    fn test_rotation_accumulates() {
        let mut stepped = app_with_scene();
        stepped.rotate(ROTATE_STEP, 0.0);
        stepped.rotate(ROTATE_STEP, 0.0);

        let mut once = app_with_scene();
        once.rotate(2.0 * ROTATE_STEP, 0.0);

        let a = stepped.scene.as_ref().unwrap().polygons[0].vertices[1];
        let b = once.scene.as_ref().unwrap().polygons[0].vertices[1];
        assert!((a.y - b.y).abs() < EPS);
        assert!((a.z - b.z).abs() < EPS);
    }

    #[test]
    fn test_reset_restores_orientation() {
        let mut app = app_with_scene();
        let before = app.scene.as_ref().unwrap().polygons[0].vertices[1];
        app.rotate(0.5, -0.3);
        app.reset();
        let after = app.scene.as_ref().unwrap().polygons[0].vertices[1];
        assert!((before.y - after.y).abs() < EPS);
        assert!((before.z - after.z).abs() < EPS);
    }

    #[test]
    fn test_unloaded_render_is_background() {
        let app = App::new(RenderSettings::default());
        assert!(!app.is_loaded());
        let mut fb = Framebuffer::new(8, 8);
        app.render(&mut fb);
        assert_eq!(fb.pixel(3, 3), app.settings.background);
    }

    #[test]
    fn test_rotate_without_scene_is_noop() {
        let mut app = App::new(RenderSettings::default());
        app.rotate(1.0, 1.0);
        assert!(!app.is_loaded());
    }
}
