use egui::{Key, Modifiers, Pos2, Vec2};

mod handler;

pub use handler::InputHandler;

/// Host events the canvas understands, in host (client) coordinates.
///
/// This is the whole surface between the canvas and its environment: a host
/// adapter produces these and the canvas never looks at the host directly.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Primary button pressed over the drawing surface
    PointerDown { pos: Pos2 },
    PointerMove { pos: Pos2 },
    PointerUp,
    /// Touch started; `touches` lists every active touch point
    TouchStart { touches: Vec<Pos2> },
    TouchMove { touches: Vec<Pos2> },
    TouchEnd,
    KeyCombo { key: Key, modifiers: Modifiers },
    /// Space available to the canvas changed
    Resize { viewport: Vec2 },
}

/// Lifecycle of one gesture, in surface-local coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StrokeSignal {
    Begin(Pos2),
    Move(Pos2),
    End,
}

/// What the host should do with an event after the canvas saw it
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventResponse {
    /// The canvas acted on the event
    pub handled: bool,
    /// The host's default action (page scroll, browser shortcut) must be suppressed
    pub prevent_default: bool,
}

impl EventResponse {
    pub const IGNORED: Self = Self {
        handled: false,
        prevent_default: false,
    };

    pub const HANDLED: Self = Self {
        handled: true,
        prevent_default: false,
    };

    pub const CONSUMED: Self = Self {
        handled: true,
        prevent_default: true,
    };
}

/// Translates pointer and touch events into surface-local stroke signals
#[derive(Debug, Clone, Copy, Default)]
pub struct InputCapture {
    /// Top-left of the surface in host coordinates
    origin: Pos2,
}

impl InputCapture {
    pub fn new(origin: Pos2) -> Self {
        Self { origin }
    }

    /// Update the surface position (e.g. if the layout moved it)
    pub fn set_origin(&mut self, origin: Pos2) {
        self.origin = origin;
    }

    pub fn to_local(&self, client: Pos2) -> Pos2 {
        (client - self.origin).to_pos2()
    }

    /// Maps `event` to a stroke signal.
    ///
    /// Touch events use the first touch point. A touch event without touches
    /// falls back to `fallback`, already in surface-local space.
    pub fn stroke_signal(&self, event: &InputEvent, fallback: Pos2) -> Option<StrokeSignal> {
        let first_touch = |touches: &[Pos2]| {
            touches
                .first()
                .map_or(fallback, |&client| self.to_local(client))
        };

        match event {
            InputEvent::PointerDown { pos } => Some(StrokeSignal::Begin(self.to_local(*pos))),
            InputEvent::PointerMove { pos } => Some(StrokeSignal::Move(self.to_local(*pos))),
            InputEvent::TouchStart { touches } => Some(StrokeSignal::Begin(first_touch(touches))),
            InputEvent::TouchMove { touches } => Some(StrokeSignal::Move(first_touch(touches))),
            InputEvent::PointerUp | InputEvent::TouchEnd => Some(StrokeSignal::End),
            InputEvent::KeyCombo { .. } | InputEvent::Resize { .. } => None,
        }
    }
}
