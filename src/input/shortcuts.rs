use egui::{Key, Modifiers, Vec2};

use crate::command::{Command, ExportFormat};
use crate::view::PAN_STEP;

/// The command bound to a key press, if any.
///
/// `command` is Ctrl on Windows/Linux and Cmd on macOS.
pub fn command_for_key(key: Key, modifiers: Modifiers) -> Option<Command> {
    if modifiers.command {
        return match key {
            Key::S => Some(Command::Export(ExportFormat::Png)),
            Key::Z => Some(Command::Undo),
            Key::Plus | Key::Equals => Some(Command::ZoomIn),
            Key::Minus => Some(Command::ZoomOut),
            _ => None,
        };
    }

    // Arrows move the content, so the view shifts the opposite way
    match key {
        Key::ArrowUp => Some(Command::Pan(Vec2::new(0.0, PAN_STEP))),
        Key::ArrowDown => Some(Command::Pan(Vec2::new(0.0, -PAN_STEP))),
        Key::ArrowLeft => Some(Command::Pan(Vec2::new(PAN_STEP, 0.0))),
        Key::ArrowRight => Some(Command::Pan(Vec2::new(-PAN_STEP, 0.0))),
        Key::Escape => Some(Command::CloseAllPanels),
        _ => None,
    }
}

/// Commands triggered by this frame's key presses.
///
/// Skipped entirely while a text field has keyboard focus, so typing a
/// drawing name never pans the view.
pub fn collect(ctx: &egui::Context) -> Vec<Command> {
    if ctx.wants_keyboard_input() {
        // Escape still closes the panels
        let escape = ctx.input(|i| i.key_pressed(Key::Escape));
        return if escape { vec![Command::CloseAllPanels] } else { Vec::new() };
    }

    ctx.input(|i| {
        i.events
            .iter()
            .filter_map(|event| match event {
                egui::Event::Key {
                    key,
                    pressed: true,
                    modifiers,
                    ..
                } => command_for_key(*key, *modifiers),
                _ => None,
            })
            .collect()
    })
}
