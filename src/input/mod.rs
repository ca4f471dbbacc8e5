use egui::{Pos2, Rect, Response, Vec2};

pub mod gestures;
mod router;
pub mod shortcuts;

pub use gestures::{Gesture, GestureRecognizer, TouchSample};
pub use router::route_event;

use crate::state::GesturePhase;
use crate::view::ViewTransform;

/// Canvas input, already translated into the drawing's local space.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Primary button pressed on the canvas
    PointerDown { local: Pos2, phase: GesturePhase },
    /// Pointer dragged with the button held
    PointerMove {
        local: Pos2,
        /// Movement since the last frame, in screen points
        screen_delta: Vec2,
        phase: GesturePhase,
    },
    /// Button released
    PointerUp,
    /// Multi-touch gesture
    Gesture(Gesture),
    /// Mouse wheel or trackpad scroll
    Scroll {
        /// Browser-style delta: positive y scrolls down
        delta: Vec2,
        /// Ctrl/Cmd was held, so the scroll zooms
        zoom: bool,
        anchor: Pos2,
    },
}

/// Turns the canvas widget's response and egui's raw input into
/// [`InputEvent`]s.
#[derive(Debug, Default)]
pub struct InputHandler {
    gestures: GestureRecognizer,
    pan_modifier: bool,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Phase to stamp onto pointer events this frame.
    pub fn phase(&self) -> GesturePhase {
        if self.gestures.is_active() {
            GesturePhase::MultiTouch
        } else if self.pan_modifier {
            GesturePhase::PanModifier
        } else {
            GesturePhase::Idle
        }
    }

    /// Process this frame's input for the canvas occupying `canvas`.
    pub fn process(
        &mut self,
        ctx: &egui::Context,
        response: &Response,
        canvas: Rect,
        view: &ViewTransform,
    ) -> Vec<InputEvent> {
        let mut events = Vec::new();

        let (touch, now, shift, command, scroll, hover) = ctx.input(|i| {
            (
                i.multi_touch().as_ref().map(TouchSample::from),
                i.time,
                i.modifiers.shift,
                i.modifiers.command,
                i.raw_scroll_delta,
                i.pointer.hover_pos(),
            )
        });

        self.pan_modifier = shift;
        for gesture in self.gestures.update(touch, now) {
            events.push(InputEvent::Gesture(gesture));
        }
        let phase = self.phase();

        if response.clicked() {
            // A press and release without movement: a one-point gesture
            if let Some(pos) = response.interact_pointer_pos() {
                events.push(InputEvent::PointerDown {
                    local: view.screen_to_local(pos, canvas),
                    phase,
                });
                events.push(InputEvent::PointerUp);
            }
        } else if response.drag_started() {
            // egui reports the drag once the pointer has moved a little;
            // start the stroke where the button went down.
            let origin = ctx.input(|i| i.pointer.press_origin());
            if let Some(pos) = origin.or(response.interact_pointer_pos()) {
                events.push(InputEvent::PointerDown {
                    local: view.screen_to_local(pos, canvas),
                    phase,
                });
            }
            if let Some(pos) = response.interact_pointer_pos().filter(|p| Some(*p) != origin) {
                events.push(InputEvent::PointerMove {
                    local: view.screen_to_local(pos, canvas),
                    screen_delta: response.drag_delta(),
                    phase,
                });
            }
        } else if response.dragged() {
            if let Some(pos) = response.interact_pointer_pos() {
                events.push(InputEvent::PointerMove {
                    local: view.screen_to_local(pos, canvas),
                    screen_delta: response.drag_delta(),
                    phase,
                });
            }
        }
        if response.drag_stopped() {
            events.push(InputEvent::PointerUp);
        }

        if scroll != Vec2::ZERO {
            if let Some(anchor) = hover.filter(|pos| canvas.contains(*pos)) {
                events.push(InputEvent::Scroll {
                    delta: -scroll,
                    zoom: command,
                    anchor,
                });
            }
        }

        events
    }
}
