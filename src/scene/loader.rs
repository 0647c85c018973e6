//! Scene file loading
//!
//! Scenes are plain text: a polygon-count header line, then one
//! comma-separated record per line. A 3-field record is the directional
//! light vector (the last one encountered wins); any other record is a
//! triangle: 3 integer reflectance channels followed by 9 vertex floats.

use std::fs;
use std::path::Path;
use crate::rasterizer::Vec3;
use super::{Color, Polygon, Scene};

/// Error type for scene loading
#[derive(Debug)]
pub enum SceneError {
    IoError(std::io::Error),
    Malformed { line: usize, message: String },
    MissingLight,
}

impl From<std::io::Error> for SceneError {
    fn from(e: std::io::Error) -> Self {
        SceneError::IoError(e)
    }
}

impl std::fmt::Display for SceneError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SceneError::IoError(e) => write!(f, "IO error: {}", e),
            SceneError::Malformed { line, message } => {
                write!(f, "Malformed scene file at line {}: {}", line, message)
            }
            SceneError::MissingLight => write!(f, "Scene file has no light vector line"),
        }
    }
}

/// Load a scene from a text file
pub fn load_scene<P: AsRef<Path>>(path: P) -> Result<Scene, SceneError> {
    let contents = fs::read_to_string(path)?;
    load_scene_from_str(&contents)
}

/// Load a scene from a string (for embedded scenes or testing)
pub fn load_scene_from_str(s: &str) -> Result<Scene, SceneError> {
    let mut lines = s.lines().enumerate();

    // Header: polygon count. Informational only; the body is authoritative.
    let (_, header) = lines.next().ok_or(SceneError::Malformed {
        line: 1,
        message: "missing polygon count header".to_string(),
    })?;
    let _declared_count: usize = header.trim().parse().map_err(|_| SceneError::Malformed {
        line: 1,
        message: format!("polygon count is not an integer: {:?}", header.trim()),
    })?;

    let mut polygons = Vec::new();
    let mut light: Option<Vec3> = None;

    for (index, raw_line) in lines {
        let line_no = index + 1;
        if raw_line.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = raw_line.split(',').map(str::trim).collect();

        if fields.len() == 3 {
            light = Some(Vec3::new(
                parse_float(fields[0], line_no)?,
                parse_float(fields[1], line_no)?,
                parse_float(fields[2], line_no)?,
            ));
        } else if fields.len() == 12 {
            let reflectance = Color::new(
                parse_channel(fields[0], line_no)?,
                parse_channel(fields[1], line_no)?,
                parse_channel(fields[2], line_no)?,
            );
            let mut coords = [0.0f32; 9];
            for (i, field) in fields[3..].iter().enumerate() {
                coords[i] = parse_float(field, line_no)?;
            }
            polygons.push(Polygon::new(
                Vec3::new(coords[0], coords[1], coords[2]),
                Vec3::new(coords[3], coords[4], coords[5]),
                Vec3::new(coords[6], coords[7], coords[8]),
                reflectance,
            ));
        } else {
            return Err(SceneError::Malformed {
                line: line_no,
                message: format!("expected 3 or 12 fields, found {}", fields.len()),
            });
        }
    }

    let light = light.ok_or(SceneError::MissingLight)?;
    Ok(Scene::new(polygons, light))
}

fn parse_float(field: &str, line: usize) -> Result<f32, SceneError> {
    field.parse().map_err(|_| SceneError::Malformed {
        line,
        message: format!("not a number: {:?}", field),
    })
}

fn parse_channel(field: &str, line: usize) -> Result<u8, SceneError> {
    field.parse().map_err(|_| SceneError::Malformed {
        line,
        message: format!("not a color channel (0-255): {:?}", field),
    })
}
