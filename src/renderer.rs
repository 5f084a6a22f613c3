use egui::Pos2;

use crate::brush::Brush;
use crate::surface::Surface;

/// Draws strokes as chains of independent round-capped segments.
///
/// Each segment becomes its own sub-path and the path is reset afterwards,
/// so a long gesture never accumulates into one huge path.
#[derive(Debug, Default, Clone, Copy)]
pub struct StrokeRenderer;

impl StrokeRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Strokes `from` → `to` with `brush`, leaving the path cursor at `to`.
    /// A zero-length segment paints a single dot.
    pub fn draw_segment<S: Surface>(&self, surface: &mut S, brush: &Brush, from: Pos2, to: Pos2) {
        log::trace!("segment {:?} -> {:?} width {}", from, to, brush.width);
        surface.begin_path();
        surface.move_to(from);
        surface.line_to(to);
        surface.stroke(brush);
        surface.begin_path();
        surface.move_to(to);
    }

    /// Drops the path cursor at the end of a gesture without painting
    pub fn finish<S: Surface>(&self, surface: &mut S) {
        surface.begin_path();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DrawCall, RecordingSurface};
    use egui::{pos2, Color32};

    #[test]
    fn test_segment_call_sequence() {
        let mut surface = RecordingSurface::new([100, 100]);
        let brush = Brush::new(Color32::RED, 3.0).unwrap();
        StrokeRenderer::new().draw_segment(&mut surface, &brush, pos2(1.0, 1.0), pos2(5.0, 5.0));

        assert_eq!(
            surface.calls(),
            &[
                DrawCall::BeginPath,
                DrawCall::MoveTo(pos2(1.0, 1.0)),
                DrawCall::LineTo(pos2(5.0, 5.0)),
                DrawCall::Stroke(brush),
                DrawCall::BeginPath,
                DrawCall::MoveTo(pos2(5.0, 5.0)),
            ]
        );
        assert_eq!(surface.ink().len(), 1);
    }

    #[test]
    fn test_finish_only_resets_path() {
        let mut surface = RecordingSurface::new([10, 10]);
        StrokeRenderer::new().finish(&mut surface);
        assert_eq!(surface.calls(), &[DrawCall::BeginPath]);
        assert!(surface.ink().is_empty());
    }
}
