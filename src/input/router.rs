use egui::Rect;

use crate::command::Command;
use crate::replicator::SymmetricReplicator;
use crate::state::GesturePhase;
use crate::view::ViewTransform;

use super::{Gesture, InputEvent};

/// Apply one canvas event to the replicator or the view.
///
/// Returns a command when the event maps to one (a two-finger tap undoes).
pub fn route_event(
    event: &InputEvent,
    replicator: &mut SymmetricReplicator,
    view: &mut ViewTransform,
    canvas: Rect,
) -> Option<Command> {
    match event {
        InputEvent::PointerDown { local, phase } => {
            replicator.begin_stroke(*local, *phase);
        }
        InputEvent::PointerMove {
            local,
            screen_delta,
            phase,
        } => match phase {
            GesturePhase::Idle => {
                replicator.add_point(*local);
            }
            GesturePhase::PanModifier => view.pan_by(*screen_delta),
            // Two-finger movement arrives as gestures
            GesturePhase::MultiTouch => {}
        },
        InputEvent::PointerUp => {
            replicator.end_stroke();
        }
        InputEvent::Gesture(gesture) => {
            if replicator.is_drawing() {
                // The first finger started a stroke before the second landed
                log::debug!("Multi-touch began mid-stroke; dropping the stroke");
                replicator.undo();
            }
            match gesture {
                Gesture::Pinch { factor, anchor } => view.zoom_by(*factor, *anchor, canvas),
                Gesture::Pan { delta } => view.pan_by(*delta),
                Gesture::TwoFingerTap => return Some(Command::Undo),
            }
        }
        InputEvent::Scroll { delta, zoom, anchor } => {
            if *zoom {
                view.wheel_zoom(delta.y, *anchor, canvas);
            } else {
                view.pan_by(-*delta);
            }
        }
    }
    None
}
