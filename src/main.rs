//! Ortho Engine: orthographic scan-line software renderer
//!
//! Loads a text scene of flat-shaded triangles plus one directional light
//! and rasterizes it on the CPU:
//! - back-face culling and per-polygon Lambertian shading
//! - edge-list scan conversion with z-buffered compositing
//! - keyboard-driven rotation of the whole scene

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod rasterizer;
mod scene;
mod config;
mod app;

use macroquad::prelude::*;
use rasterizer::{Framebuffer, RenderSettings, HEIGHT, WIDTH};
use app::{App, ROTATE_STEP};

const SETTINGS_PATH: &str = "assets/render.ron";
const SNAPSHOT_PATH: &str = "snapshot.png";

fn window_conf() -> Conf {
    Conf {
        window_title: format!("Ortho Engine v{}", VERSION),
        window_width: WIDTH as i32,
        window_height: HEIGHT as i32,
        window_resizable: true,
        high_dpi: true,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    let mut fb = Framebuffer::new(WIDTH, HEIGHT);

    let settings = match config::load_settings(SETTINGS_PATH) {
        Ok(s) => s,
        Err(config::ConfigError::IoError(_)) => {
            // First run: write the defaults so there is a file to tweak.
            let defaults = RenderSettings::default();
            if let Some(parent) = std::path::Path::new(SETTINGS_PATH).parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            if let Err(e) = config::save_settings(&defaults, SETTINGS_PATH) {
                eprintln!("Could not write default settings: {}", e);
            }
            defaults
        }
        Err(e) => {
            eprintln!("Ignoring bad settings file {}: {}", SETTINGS_PATH, e);
            RenderSettings::default()
        }
    };

    let mut app = App::new(settings);
    let mut status = String::from("Press O to open a scene file");

    // A scene file may be given on the command line.
    if let Some(path) = std::env::args().nth(1) {
        match app.load(&path) {
            Ok(()) => status = format!("Loaded {}", path),
            Err(e) => {
                eprintln!("Failed to load {}: {}", path, e);
                status = format!("Load failed: {}", e);
            }
        }
    }

    println!("=== Ortho Engine ===");

    loop {
        handle_keys(&mut app, &mut fb, &mut status);

        app.render(&mut fb);

        // Blit the framebuffer to the window, preserving aspect ratio
        let texture = Texture2D::from_rgba8(fb.width as u16, fb.height as u16, &fb.pixels);
        texture.set_filter(FilterMode::Nearest);

        let screen_w = screen_width();
        let screen_h = screen_height();
        let scale = (screen_w / fb.width as f32).min(screen_h / fb.height as f32);
        let draw_w = fb.width as f32 * scale;
        let draw_h = fb.height as f32 * scale;

        clear_background(Color::from_rgba(15, 15, 18, 255));
        draw_texture_ex(
            &texture,
            (screen_w - draw_w) / 2.0,
            (screen_h - draw_h) / 2.0,
            WHITE,
            DrawTextureParams {
                dest_size: Some(Vec2::new(draw_w, draw_h)),
                ..Default::default()
            },
        );

        draw_text(&status, 10.0, screen_h - 10.0, 18.0, Color::from_rgba(200, 200, 200, 255));
        draw_text(
            "Arrows/WASD rotate | R reset | O open | P snapshot",
            10.0,
            20.0,
            18.0,
            Color::from_rgba(140, 140, 140, 255),
        );

        next_frame().await;
    }
}

fn handle_keys(app: &mut App, fb: &mut Framebuffer, status: &mut String) {
    // One discrete rotation step per keypress
    if is_key_pressed(KeyCode::Up) || is_key_pressed(KeyCode::W) {
        app.rotate(-ROTATE_STEP, 0.0);
    }
    if is_key_pressed(KeyCode::Down) || is_key_pressed(KeyCode::S) {
        app.rotate(ROTATE_STEP, 0.0);
    }
    if is_key_pressed(KeyCode::Left) || is_key_pressed(KeyCode::A) {
        app.rotate(0.0, ROTATE_STEP);
    }
    if is_key_pressed(KeyCode::Right) || is_key_pressed(KeyCode::D) {
        app.rotate(0.0, -ROTATE_STEP);
    }

    if is_key_pressed(KeyCode::R) {
        app.reset();
        *status = String::from("Rotation reset");
    }

    if is_key_pressed(KeyCode::P) {
        app.render(fb);
        match fb.save_png(SNAPSHOT_PATH) {
            Ok(()) => *status = format!("Saved {}", SNAPSHOT_PATH),
            Err(e) => {
                eprintln!("{}", e);
                *status = format!("Snapshot failed: {}", e);
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    if is_key_pressed(KeyCode::O) {
        let dialog = rfd::FileDialog::new()
            .add_filter("Scene", &["txt"])
            .set_directory("assets/scenes");

        if let Some(path) = dialog.pick_file() {
            match app.load(&path) {
                Ok(()) => {
                    println!("Loaded scene {}", path.display());
                    *status = format!("Loaded {}", path.display());
                }
                Err(e) => {
                    eprintln!("Failed to load {}: {}", path.display(), e);
                    *status = format!("Load failed: {}", e);
                }
            }
        }
    }
}
