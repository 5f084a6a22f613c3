use egui::Pos2;

use super::{PathBuilder, Surface};
use crate::brush::Brush;

/// One call made against a [`RecordingSurface`]
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    BeginPath,
    MoveTo(Pos2),
    LineTo(Pos2),
    Stroke(Brush),
    Restore,
    Resize([usize; 2]),
}

/// A stroked segment, standing in for the pixels it would cover
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub from: Pos2,
    pub to: Pos2,
    pub brush: Brush,
}

/// Surface that rasterizes nothing and records every call.
///
/// Its "pixel content" is the list of segments stroked so far, which is what
/// snapshots capture and restores replace.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    size: [usize; 2],
    calls: Vec<DrawCall>,
    ink: Vec<Segment>,
    path: PathBuilder,
}

impl RecordingSurface {
    pub fn new(size: [usize; 2]) -> Self {
        Self {
            size,
            ..Default::default()
        }
    }

    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    pub fn ink(&self) -> &[Segment] {
        &self.ink
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }
}

impl Surface for RecordingSurface {
    type Snapshot = Vec<Segment>;

    fn size(&self) -> [usize; 2] {
        self.size
    }

    fn begin_path(&mut self) {
        self.path.clear();
        self.calls.push(DrawCall::BeginPath);
    }

    fn move_to(&mut self, pos: Pos2) {
        self.path.move_to(pos);
        self.calls.push(DrawCall::MoveTo(pos));
    }

    fn line_to(&mut self, pos: Pos2) {
        self.path.line_to(pos);
        self.calls.push(DrawCall::LineTo(pos));
    }

    fn stroke(&mut self, brush: &Brush) {
        let segments = self.path.segments().map(|(from, to)| Segment {
            from,
            to,
            brush: *brush,
        });
        self.ink.extend(segments);
        self.calls.push(DrawCall::Stroke(*brush));
    }

    fn snapshot(&self) -> Vec<Segment> {
        self.ink.clone()
    }

    fn restore(&mut self, snapshot: &Vec<Segment>) {
        self.ink.clone_from(snapshot);
        self.calls.push(DrawCall::Restore);
    }

    fn resize(&mut self, size: [usize; 2]) {
        self.size = size;
        self.calls.push(DrawCall::Resize(size));
    }
}
