use std::path::Path;

use egui::{Color32, Vec2};
use serde::{Deserialize, Serialize};

use crate::brush::Brush;
use crate::error::CanvasResult;

/// Settings for a drawing canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)] // missing fields fall back to the defaults below
pub struct CanvasConfig {
    /// Share of the host's available width and height the surface occupies
    pub viewport_fraction: [f32; 2],
    /// Brush in effect when the canvas is created
    pub brush: Brush,
    /// Color of a freshly created surface
    pub background: Color32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            viewport_fraction: [0.985, 0.93],
            brush: Brush::default(),
            background: Color32::WHITE,
        }
    }
}

impl CanvasConfig {
    /// Reads a JSON config file
    pub fn load(path: impl AsRef<Path>) -> CanvasResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn from_json(json: &str) -> CanvasResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> CanvasResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Surface dimensions for a host viewport, between 1 and `max_side` on each axis
    pub fn surface_size(&self, viewport: Vec2, max_side: usize) -> [usize; 2] {
        let max_side = max_side.max(1);
        let scale = |extent: f32, fraction: f32| {
            let pixels = (extent * fraction).floor();
            if pixels.is_finite() && pixels >= 1.0 {
                (pixels as usize).min(max_side)
            } else {
                1
            }
        };
        [
            scale(viewport.x, self.viewport_fraction[0]),
            scale(viewport.y, self.viewport_fraction[1]),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CanvasError;

    #[test]
    fn test_surface_size_uses_fractions() {
        let config = CanvasConfig::default();
        assert_eq!(config.surface_size(Vec2::new(1000.0, 800.0), 4096), [985, 744]);
    }

    #[test]
    fn test_surface_size_never_zero() {
        let config = CanvasConfig::default();
        assert_eq!(config.surface_size(Vec2::ZERO, 4096), [1, 1]);
        assert_eq!(config.surface_size(Vec2::new(-20.0, f32::NAN), 4096), [1, 1]);
        assert_eq!(config.surface_size(Vec2::new(50.0, 50.0), 0), [1, 1]);
    }

    #[test]
    fn test_surface_size_respects_max_side() {
        let config = CanvasConfig::default();
        assert_eq!(config.surface_size(Vec2::new(2200.0, 900.0), 2048), [2048, 837]);
        assert_eq!(config.surface_size(Vec2::new(9000.0, 9000.0), 2048), [2048, 2048]);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = CanvasConfig::from_json(r#"{ "viewport_fraction": [1.0, 0.5] }"#).unwrap();
        assert_eq!(config.viewport_fraction, [1.0, 0.5]);
        assert_eq!(config.brush, Brush::default());
        assert_eq!(config.background, Color32::WHITE);
    }

    #[test]
    fn test_json_round_trip() {
        let config = CanvasConfig {
            brush: Brush::new(Color32::from_rgb(10, 20, 30), 12.0).unwrap(),
            ..Default::default()
        };
        let json = config.to_json().unwrap();
        assert_eq!(CanvasConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_invalid_json_is_reported() {
        assert!(matches!(
            CanvasConfig::from_json("{ not json"),
            Err(CanvasError::Config(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("canvas.json");
        std::fs::write(&path, r#"{ "brush": { "width": 8.0 } }"#).unwrap();

        let config = CanvasConfig::load(&path).unwrap();
        assert_eq!(config.brush.width, 8.0);
        assert_eq!(config.brush.color, Color32::BLACK);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = CanvasConfig::load(dir.path().join("missing.json"));
        assert!(matches!(result, Err(CanvasError::Io(_))));
    }
}
