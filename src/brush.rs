use egui::Color32;
use serde::{Deserialize, Serialize};

use crate::error::{CanvasError, CanvasResult};

/// Color and width used to stroke segments.
///
/// A brush is a plain value: the canvas hands it to the renderer on every
/// draw call, so changing it never touches pixels that are already painted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Brush {
    pub color: Color32,
    pub width: f32,
}

impl Default for Brush {
    fn default() -> Self {
        Self {
            color: Color32::BLACK,
            width: 5.0,
        }
    }
}

impl Brush {
    pub fn new(color: Color32, width: f32) -> CanvasResult<Self> {
        Ok(Self {
            color,
            width: validate_width(width)?,
        })
    }

    /// Returns a copy of this brush painting with `color`
    pub fn with_color(self, color: Color32) -> Self {
        Self { color, ..self }
    }

    /// Returns a copy of this brush with `width`, rejecting widths a 2D context would ignore
    pub fn with_width(self, width: f32) -> CanvasResult<Self> {
        Ok(Self {
            width: validate_width(width)?,
            ..self
        })
    }

    pub fn radius(&self) -> f32 {
        self.width * 0.5
    }
}

fn validate_width(width: f32) -> CanvasResult<f32> {
    if width.is_finite() && width > 0.0 {
        Ok(width)
    } else {
        Err(CanvasError::InvalidWidth(width))
    }
}

/// Parses a CSS-style color: `#rgb`, `#rrggbb`, `#rrggbbaa` or a common color name.
pub fn parse_color(value: &str) -> CanvasResult<Color32> {
    let trimmed = value.trim();
    let invalid = || CanvasError::InvalidColor(value.to_owned());

    if let Some(hex) = trimmed.strip_prefix('#') {
        return parse_hex(hex).ok_or_else(invalid);
    }

    named_color(&trimmed.to_ascii_lowercase()).ok_or_else(invalid)
}

/// Formats `color` the way a color input reports it: `#rrggbb`, or `#rrggbbaa` when translucent
pub fn to_hex(color: Color32) -> String {
    let [r, g, b, a] = color.to_srgba_unmultiplied();
    if a == u8::MAX {
        format!("#{r:02x}{g:02x}{b:02x}")
    } else {
        format!("#{r:02x}{g:02x}{b:02x}{a:02x}")
    }
}

fn parse_hex(hex: &str) -> Option<Color32> {
    if !hex.is_ascii() {
        return None;
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    // Short form: each digit is doubled, so `f` becomes `ff`.
    let short = |s: &str| channel(s).map(|v| v * 17);

    match hex.len() {
        3 => Some(Color32::from_rgb(
            short(&hex[0..1])?,
            short(&hex[1..2])?,
            short(&hex[2..3])?,
        )),
        6 => Some(Color32::from_rgb(
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
        )),
        8 => Some(Color32::from_rgba_unmultiplied(
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
            channel(&hex[6..8])?,
        )),
        _ => None,
    }
}

fn named_color(name: &str) -> Option<Color32> {
    let color = match name {
        "black" => Color32::BLACK,
        "white" => Color32::WHITE,
        "red" => Color32::from_rgb(255, 0, 0),
        "green" => Color32::from_rgb(0, 128, 0),
        "lime" => Color32::from_rgb(0, 255, 0),
        "blue" => Color32::from_rgb(0, 0, 255),
        "yellow" => Color32::from_rgb(255, 255, 0),
        "orange" => Color32::from_rgb(255, 165, 0),
        "purple" => Color32::from_rgb(128, 0, 128),
        "gray" | "grey" => Color32::from_rgb(128, 128, 128),
        "transparent" => Color32::TRANSPARENT,
        _ => return None,
    };
    Some(color)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_forms() {
        assert_eq!(parse_color("#000").unwrap(), Color32::BLACK);
        assert_eq!(parse_color("#ff8000").unwrap(), Color32::from_rgb(255, 128, 0));
        assert_eq!(
            parse_color("#0000ff80").unwrap(),
            Color32::from_rgba_unmultiplied(0, 0, 255, 128)
        );
    }

    #[test]
    fn test_parse_named_colors() {
        assert_eq!(parse_color("black").unwrap(), Color32::BLACK);
        assert_eq!(parse_color(" Red ").unwrap(), Color32::from_rgb(255, 0, 0));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(parse_color("#12"), Err(CanvasError::InvalidColor(_))));
        assert!(matches!(parse_color("#gggggg"), Err(CanvasError::InvalidColor(_))));
        assert!(matches!(parse_color("chartreuse-ish"), Err(CanvasError::InvalidColor(_))));
    }

    #[test]
    fn test_hex_formatting() {
        assert_eq!(to_hex(Color32::BLACK), "#000000");
        assert_eq!(to_hex(Color32::from_rgb(255, 128, 1)), "#ff8001");
        let color = Color32::from_rgb(3, 4, 5);
        assert_eq!(parse_color(&to_hex(color)).unwrap(), color);
    }

    #[test]
    fn test_width_validation() {
        let brush = Brush::default();
        assert_eq!(brush.with_width(12.0).unwrap().width, 12.0);
        assert!(brush.with_width(0.0).is_err());
        assert!(brush.with_width(-3.0).is_err());
        assert!(brush.with_width(f32::NAN).is_err());
        assert!(brush.with_width(f32::INFINITY).is_err());
    }
}
