use egui::{Context, Event, PointerButton, Pos2, Rect, TouchId, TouchPhase, Vec2};

use super::InputEvent;
use crate::command::Command;

/// Handles converting raw egui input into our domain-specific InputEvents
#[derive(Debug, Default)]
pub struct InputHandler {
    /// Active touches in the order they went down
    touches: Vec<(TouchId, Pos2)>,
    last_viewport: Option<Vec2>,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consumes this frame's undo/redo shortcuts and returns them as key combos.
    ///
    /// Call before any widget runs so no other widget reacts to them.
    pub fn consume_shortcuts(&mut self, ctx: &Context) -> Vec<InputEvent> {
        let mut events = Vec::new();
        ctx.input_mut(|input| {
            for (shortcut, _) in Command::SHORTCUTS {
                while input.consume_shortcut(&shortcut) {
                    events.push(InputEvent::KeyCombo {
                        key: shortcut.logical_key,
                        modifiers: shortcut.modifiers,
                    });
                }
            }
        });
        events
    }

    /// Process this frame's pointer, touch and viewport input.
    ///
    /// `canvas_rect` is where the surface is shown, `viewport` the space the
    /// host has available for it.
    pub fn process_input(
        &mut self,
        ctx: &Context,
        canvas_rect: Rect,
        viewport: Vec2,
    ) -> Vec<InputEvent> {
        let mut events = Vec::new();

        if self.last_viewport != Some(viewport) {
            self.last_viewport = Some(viewport);
            events.push(InputEvent::Resize { viewport });
        }

        let raw_events = ctx.input(|input| input.events.clone());
        events.extend(self.translate_events(&raw_events, canvas_rect));
        events
    }

    /// Converts pointer and touch events.
    ///
    /// Backends emulate pointer events from the first touch, so pointer events
    /// are dropped while a touch is down or when the frame carries touches.
    pub fn translate_events(&mut self, raw: &[Event], canvas_rect: Rect) -> Vec<InputEvent> {
        let frame_has_touch = raw.iter().any(|event| matches!(event, Event::Touch { .. }));
        let use_pointer = !frame_has_touch && self.touches.is_empty();
        let mut events = Vec::new();

        for event in raw {
            match event {
                Event::PointerButton {
                    pos,
                    button: PointerButton::Primary,
                    pressed,
                    ..
                } if use_pointer => {
                    if !*pressed {
                        events.push(InputEvent::PointerUp);
                    } else if canvas_rect.contains(*pos) {
                        events.push(InputEvent::PointerDown { pos: *pos });
                    }
                }
                Event::PointerMoved(pos) if use_pointer => {
                    events.push(InputEvent::PointerMove { pos: *pos });
                }
                Event::Touch { id, phase, pos, .. } => {
                    if let Some(event) = self.track_touch(*id, *phase, *pos, canvas_rect) {
                        events.push(event);
                    }
                }
                _ => {}
            }
        }

        events
    }

    fn track_touch(
        &mut self,
        id: TouchId,
        phase: TouchPhase,
        pos: Pos2,
        canvas_rect: Rect,
    ) -> Option<InputEvent> {
        match phase {
            TouchPhase::Start => {
                if !canvas_rect.contains(pos) {
                    return None;
                }
                self.touches.push((id, pos));
                Some(InputEvent::TouchStart {
                    touches: self.touch_points(),
                })
            }
            TouchPhase::Move => {
                let touch = self.touches.iter_mut().find(|(touch_id, _)| *touch_id == id)?;
                touch.1 = pos;
                Some(InputEvent::TouchMove {
                    touches: self.touch_points(),
                })
            }
            TouchPhase::End | TouchPhase::Cancel => {
                let index = self.touches.iter().position(|(touch_id, _)| *touch_id == id)?;
                self.touches.remove(index);
                Some(InputEvent::TouchEnd)
            }
        }
    }

    fn touch_points(&self) -> Vec<Pos2> {
        self.touches.iter().map(|(_, pos)| *pos).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{pos2, Key, Modifiers, RawInput, TouchDeviceId};

    fn canvas() -> Rect {
        Rect::from_min_size(pos2(0.0, 0.0), Vec2::new(100.0, 100.0))
    }

    fn button(pos: Pos2, pressed: bool) -> Event {
        Event::PointerButton {
            pos,
            button: PointerButton::Primary,
            pressed,
            modifiers: Modifiers::NONE,
        }
    }

    fn touch(id: u64, phase: TouchPhase, pos: Pos2) -> Event {
        Event::Touch {
            device_id: TouchDeviceId(0),
            id: TouchId(id),
            phase,
            pos,
            force: None,
        }
    }

    #[test]
    fn test_pointer_press_outside_canvas_is_dropped() {
        let mut handler = InputHandler::new();
        let events = handler.translate_events(&[button(pos2(150.0, 10.0), true)], canvas());
        assert!(events.is_empty());
    }

    #[test]
    fn test_pointer_sequence() {
        let mut handler = InputHandler::new();
        let raw = [
            button(pos2(10.0, 10.0), true),
            Event::PointerMoved(pos2(20.0, 20.0)),
            button(pos2(20.0, 20.0), false),
        ];
        assert_eq!(
            handler.translate_events(&raw, canvas()),
            vec![
                InputEvent::PointerDown { pos: pos2(10.0, 10.0) },
                InputEvent::PointerMove { pos: pos2(20.0, 20.0) },
                InputEvent::PointerUp,
            ]
        );
    }

    #[test]
    fn test_emulated_pointer_events_are_ignored_during_touch() {
        let mut handler = InputHandler::new();
        let raw = [
            touch(1, TouchPhase::Start, pos2(5.0, 5.0)),
            button(pos2(5.0, 5.0), true),
        ];
        assert_eq!(
            handler.translate_events(&raw, canvas()),
            vec![InputEvent::TouchStart { touches: vec![pos2(5.0, 5.0)] }]
        );

        // Still touching: a pointer-only frame is emulation too.
        let events = handler.translate_events(&[Event::PointerMoved(pos2(6.0, 6.0))], canvas());
        assert!(events.is_empty());
    }

    #[test]
    fn test_touch_tracking_keeps_first_touch_first() {
        let mut handler = InputHandler::new();
        let raw = [
            touch(1, TouchPhase::Start, pos2(5.0, 5.0)),
            touch(2, TouchPhase::Start, pos2(50.0, 50.0)),
            touch(1, TouchPhase::Move, pos2(8.0, 9.0)),
            touch(1, TouchPhase::End, pos2(8.0, 9.0)),
        ];
        let events = handler.translate_events(&raw, canvas());
        assert_eq!(
            events[2],
            InputEvent::TouchMove {
                touches: vec![pos2(8.0, 9.0), pos2(50.0, 50.0)]
            }
        );
        assert_eq!(events[3], InputEvent::TouchEnd);
    }

    #[test]
    fn test_unknown_touch_end_is_ignored() {
        let mut handler = InputHandler::new();
        let raw = [touch(7, TouchPhase::Cancel, pos2(1.0, 1.0))];
        let events = handler.translate_events(&raw, canvas());
        assert!(events.is_empty());
    }

    fn key(key: Key, modifiers: Modifiers) -> Event {
        Event::Key {
            key,
            physical_key: None,
            pressed: true,
            repeat: false,
            modifiers,
        }
    }

    fn frame(events: Vec<Event>, modifiers: Modifiers) -> RawInput {
        RawInput {
            screen_rect: Some(canvas()),
            modifiers,
            events,
            ..Default::default()
        }
    }

    #[test]
    fn test_undo_shortcut_is_consumed() {
        let ctx = Context::default();
        let mut handler = InputHandler::new();
        let mut combos = Vec::new();
        let mut still_pressed = true;

        let raw = frame(vec![key(Key::Z, Modifiers::COMMAND)], Modifiers::COMMAND);
        let _ = ctx.run(raw, |ctx| {
            combos = handler.consume_shortcuts(ctx);
            still_pressed = ctx.input(|i| i.key_pressed(Key::Z));
        });

        assert!(!still_pressed);
        assert_eq!(combos.len(), 1);
        let InputEvent::KeyCombo { key, modifiers } = &combos[0] else {
            panic!("expected a key combo, got {:?}", combos[0]);
        };
        assert_eq!(Command::from_key_combo(*key, *modifiers), Some(Command::Undo));
    }

    #[test]
    fn test_shift_undo_shortcut_is_redo() {
        let ctx = Context::default();
        let mut handler = InputHandler::new();
        let mut combos = Vec::new();
        let modifiers = Modifiers::COMMAND.plus(Modifiers::SHIFT);

        let _ = ctx.run(frame(vec![key(Key::Z, modifiers)], modifiers), |ctx| {
            combos = handler.consume_shortcuts(ctx);
        });

        let commands: Vec<_> = combos
            .iter()
            .filter_map(|event| match event {
                InputEvent::KeyCombo { key, modifiers } => {
                    Command::from_key_combo(*key, *modifiers)
                }
                _ => None,
            })
            .collect();
        assert_eq!(commands, vec![Command::Redo]);
    }

    #[test]
    fn test_plain_keys_are_left_alone() {
        let ctx = Context::default();
        let mut handler = InputHandler::new();
        let mut combos = Vec::new();
        let mut still_pressed = false;

        let _ = ctx.run(frame(vec![key(Key::Z, Modifiers::NONE)], Modifiers::NONE), |ctx| {
            combos = handler.consume_shortcuts(ctx);
            still_pressed = ctx.input(|i| i.key_pressed(Key::Z));
        });

        assert!(combos.is_empty());
        assert!(still_pressed);
    }

    #[test]
    fn test_viewport_change_emits_one_resize() {
        let ctx = Context::default();
        let mut handler = InputHandler::new();
        let mut resizes = Vec::new();

        let viewports = [
            Vec2::new(300.0, 200.0),
            Vec2::new(300.0, 200.0),
            Vec2::new(640.0, 480.0),
        ];
        for viewport in viewports {
            let _ = ctx.run(frame(Vec::new(), Modifiers::NONE), |ctx| {
                let events = handler.process_input(ctx, canvas(), viewport);
                resizes.extend(
                    events
                        .into_iter()
                        .filter(|event| matches!(event, InputEvent::Resize { .. })),
                );
            });
        }

        assert_eq!(
            resizes,
            vec![
                InputEvent::Resize { viewport: Vec2::new(300.0, 200.0) },
                InputEvent::Resize { viewport: Vec2::new(640.0, 480.0) },
            ]
        );
    }

    #[test]
    fn test_process_input_routes_pointer_events() {
        let ctx = Context::default();
        let mut handler = InputHandler::new();
        let mut events = Vec::new();
        let raw = vec![button(pos2(10.0, 10.0), true), Event::PointerMoved(pos2(12.0, 14.0))];

        let _ = ctx.run(frame(raw, Modifiers::NONE), |ctx| {
            events = handler.process_input(ctx, canvas(), Vec2::new(100.0, 100.0));
        });

        assert_eq!(
            events,
            vec![
                InputEvent::Resize { viewport: Vec2::new(100.0, 100.0) },
                InputEvent::PointerDown { pos: pos2(10.0, 10.0) },
                InputEvent::PointerMove { pos: pos2(12.0, 14.0) },
            ]
        );
    }
}
