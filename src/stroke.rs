use egui::Pos2;

/// Transient state of the gesture currently being drawn.
///
/// `last_point` outlives the gesture so malformed input (a touch event with
/// no touches) can fall back to the last known position.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StrokeSession {
    active: bool,
    last_point: Option<Pos2>,
}

impl StrokeSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn last_point(&self) -> Option<Pos2> {
        self.last_point
    }

    /// Starts a gesture at `pos`
    pub fn begin(&mut self, pos: Pos2) {
        self.active = true;
        self.last_point = Some(pos);
    }

    /// Records `pos` and returns the point the next segment starts from.
    /// Returns `None` when no gesture is active.
    pub fn advance(&mut self, pos: Pos2) -> Option<Pos2> {
        if !self.active {
            return None;
        }
        let from = self.last_point.replace(pos).unwrap_or(pos);
        Some(from)
    }

    pub fn end(&mut self) {
        self.active = false;
    }
}
