use egui::{Pos2, Vec2};

use crate::brush::{self, Brush};
use crate::command::{Command, SnapshotHistory};
use crate::config::CanvasConfig;
use crate::error::CanvasResult;
use crate::input::{EventResponse, InputCapture, InputEvent, StrokeSignal};
use crate::renderer::StrokeRenderer;
use crate::stroke::StrokeSession;
use crate::surface::Surface;

/// A freehand drawing canvas over a [`Surface`].
///
/// Input drives the stroke session. A gesture start snapshots the surface into
/// the history and every move strokes one segment with the current brush.
/// Without a surface (no rendering context yet) every surface operation is
/// skipped and only the session state advances.
pub struct DrawingCanvas<S: Surface> {
    surface: Option<S>,
    config: CanvasConfig,
    brush: Brush,
    capture: InputCapture,
    session: StrokeSession,
    renderer: StrokeRenderer,
    history: SnapshotHistory<S::Snapshot>,
    /// Largest side a surface may have, e.g. the GPU texture limit
    max_surface_side: usize,
}

impl<S: Surface> DrawingCanvas<S> {
    pub fn new(surface: S, config: CanvasConfig) -> Self {
        let mut canvas = Self::detached(config);
        canvas.surface = Some(surface);
        canvas
    }

    /// A canvas with nothing to draw into yet
    pub fn detached(config: CanvasConfig) -> Self {
        let brush = match Brush::new(config.brush.color, config.brush.width) {
            Ok(brush) => brush,
            Err(err) => {
                log::warn!("Ignoring configured brush: {err}");
                Brush::default()
            }
        };
        Self {
            surface: None,
            config,
            brush,
            capture: InputCapture::default(),
            session: StrokeSession::new(),
            renderer: StrokeRenderer::new(),
            history: SnapshotHistory::new(),
            max_surface_side: usize::MAX,
        }
    }

    /// Installs a surface, replacing any previous one.
    /// History is dropped since its snapshots belong to the old surface.
    pub fn attach(&mut self, surface: S) {
        log::debug!("Attaching {:?} surface", surface.size());
        self.history.clear();
        self.surface = Some(surface);
    }

    pub fn is_attached(&self) -> bool {
        self.surface.is_some()
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub fn surface_mut(&mut self) -> Option<&mut S> {
        self.surface.as_mut()
    }

    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    pub fn history(&self) -> &SnapshotHistory<S::Snapshot> {
        &self.history
    }

    pub fn session(&self) -> &StrokeSession {
        &self.session
    }

    pub fn is_drawing(&self) -> bool {
        self.session.is_active()
    }

    pub fn brush(&self) -> Brush {
        self.brush
    }

    /// Replaces the brush used by every following segment
    pub fn set_brush(&mut self, brush: Brush) {
        self.brush = brush;
    }

    /// Sets the brush color from a CSS-style string; invalid colors leave the brush unchanged
    pub fn set_color(&mut self, value: &str) -> CanvasResult<()> {
        let color = brush::parse_color(value).inspect_err(|err| log::warn!("{err}"))?;
        self.set_brush(self.brush.with_color(color));
        Ok(())
    }

    /// Sets the brush width; non-positive or non-finite widths leave the brush unchanged
    pub fn set_brush_width(&mut self, width: f32) -> CanvasResult<()> {
        let brush = self.brush.with_width(width).inspect_err(|err| log::warn!("{err}"))?;
        self.set_brush(brush);
        Ok(())
    }

    pub fn max_surface_side(&self) -> usize {
        self.max_surface_side
    }

    /// Caps both surface sides; an oversized surface shrinks right away
    pub fn set_max_surface_side(&mut self, max_side: usize) {
        self.max_surface_side = max_side.max(1);
        if let Some(size) = self.surface.as_ref().map(Surface::size) {
            self.resize(size);
        }
    }

    /// Surface dimensions for a host viewport under the current limits
    pub fn surface_size_for(&self, viewport: Vec2) -> [usize; 2] {
        self.config.surface_size(viewport, self.max_surface_side)
    }

    /// Moves the surface origin used to localize host coordinates
    pub fn set_origin(&mut self, origin: Pos2) {
        self.capture.set_origin(origin);
    }

    /// Feeds one host event through the canvas
    pub fn handle_event(&mut self, event: &InputEvent) -> EventResponse {
        match event {
            InputEvent::KeyCombo { key, modifiers } => {
                match Command::from_key_combo(*key, *modifiers) {
                    Some(command) => {
                        self.execute(command);
                        EventResponse::CONSUMED
                    }
                    None => EventResponse::IGNORED,
                }
            }
            InputEvent::Resize { viewport } => {
                self.resize_to_viewport(*viewport);
                EventResponse::HANDLED
            }
            _ => {
                let fallback = self.session.last_point().unwrap_or(Pos2::ZERO);
                let Some(signal) = self.capture.stroke_signal(event, fallback) else {
                    return EventResponse::IGNORED;
                };
                let handled = match signal {
                    StrokeSignal::Begin(pos) => {
                        self.begin(pos);
                        true
                    }
                    StrokeSignal::Move(pos) => self.stroke_to(pos),
                    StrokeSignal::End => {
                        self.end();
                        true
                    }
                };
                EventResponse {
                    handled,
                    // Keeps the page from scrolling under a finger.
                    prevent_default: matches!(event, InputEvent::TouchMove { .. }),
                }
            }
        }
    }

    /// Starts a gesture at surface-local `pos` and marks it with a dot
    pub fn begin(&mut self, pos: Pos2) {
        self.session.begin(pos);
        if let Some(surface) = &self.surface {
            self.history.capture_before_stroke(surface.snapshot());
        }
        self.stroke_to(pos);
    }

    /// Extends the active gesture to `pos`. Returns false when no gesture is active.
    pub fn stroke_to(&mut self, pos: Pos2) -> bool {
        let Some(from) = self.session.advance(pos) else {
            return false;
        };
        if let Some(surface) = self.surface.as_mut() {
            self.renderer.draw_segment(surface, &self.brush, from, pos);
        }
        true
    }

    pub fn end(&mut self) {
        self.session.end();
        if let Some(surface) = self.surface.as_mut() {
            self.renderer.finish(surface);
        }
    }

    /// Restores the surface to before the last stroke.
    ///
    /// Returns false if there was nothing to undo or a gesture is in progress.
    pub fn undo(&mut self) -> bool {
        if self.is_drawing() {
            log::debug!("Ignoring undo during a stroke");
            return false;
        }
        let Some(surface) = self.surface.as_mut() else {
            return false;
        };
        let Some(snapshot) = self.history.undo(|| surface.snapshot()) else {
            return false;
        };
        surface.restore(&snapshot);
        log::debug!(
            "Undo: {} undo / {} redo left",
            self.history.undo_len(),
            self.history.redo_len()
        );
        true
    }

    /// Reapplies the last undone stroke.
    ///
    /// Returns false if there was nothing to redo or a gesture is in progress.
    pub fn redo(&mut self) -> bool {
        if self.is_drawing() {
            log::debug!("Ignoring redo during a stroke");
            return false;
        }
        let Some(surface) = self.surface.as_mut() else {
            return false;
        };
        let Some(snapshot) = self.history.redo(|| surface.snapshot()) else {
            return false;
        };
        surface.restore(&snapshot);
        log::debug!(
            "Redo: {} undo / {} redo left",
            self.history.undo_len(),
            self.history.redo_len()
        );
        true
    }

    pub fn execute(&mut self, command: Command) -> bool {
        match command {
            Command::Undo => self.undo(),
            Command::Redo => self.redo(),
        }
    }

    pub fn can_undo(&self) -> bool {
        self.surface.is_some() && !self.is_drawing() && self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.surface.is_some() && !self.is_drawing() && self.history.can_redo()
    }

    /// Resizes the surface to fit the host's available space. History is kept.
    pub fn resize_to_viewport(&mut self, viewport: Vec2) {
        let size = self.surface_size_for(viewport);
        self.resize(size);
    }

    /// Resizes the surface, clamping each side to the surface limit
    pub fn resize(&mut self, size: [usize; 2]) {
        let max_side = self.max_surface_side;
        let size = size.map(|side| side.clamp(1, max_side));
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        if surface.size() == size {
            return;
        }
        log::debug!("Resizing surface {:?} -> {:?}", surface.size(), size);
        surface.resize(size);
    }
}
