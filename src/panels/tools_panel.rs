use crate::command::{Command, ExportFormat};
use crate::components::ToggleButton;
use crate::panels::{Panel, PanelState};
use crate::settings::BrushSettings;

/// Top toolbar. Returns the commands its buttons triggered this frame.
pub fn tools_panel(ctx: &egui::Context, settings: &BrushSettings, panels: &PanelState, can_undo: bool) -> Vec<Command> {
    let mut commands = Vec::new();

    egui::TopBottomPanel::top("tools_panel").show(ctx, |ui| {
        ui.horizontal(|ui| {
            let buttons = [
                (
                    ToggleButton::new("🖌", "Brush", panels.is_open(Panel::Brush)),
                    Command::OpenPanel(Panel::Brush),
                ),
                (
                    ToggleButton::new("🗁", "Drawings", panels.is_open(Panel::File)),
                    Command::OpenPanel(Panel::File),
                ),
                (
                    ToggleButton::new("⚙", "Settings", panels.is_open(Panel::Settings)),
                    Command::OpenPanel(Panel::Settings),
                ),
            ];
            for (button, command) in buttons {
                if button.show(ui).clicked() {
                    // A second click on an open panel's button closes it
                    if button.selected {
                        commands.push(Command::CloseAllPanels);
                    } else {
                        commands.push(command);
                    }
                }
            }

            ui.separator();

            if ToggleButton::new("◐", "Mirror", settings.mirror()).show(ui).clicked() {
                commands.push(Command::ToggleMirror);
            }
            if ToggleButton::new("〰", "Simplify strokes", settings.simplify()).show(ui).clicked() {
                commands.push(Command::ToggleSimplify);
            }

            ui.separator();

            if ui.add_enabled(can_undo, egui::Button::new("Undo")).clicked() {
                commands.push(Command::Undo);
            }
            if ui.button("−").on_hover_text("Zoom out").clicked() {
                commands.push(Command::ZoomOut);
            }
            if ui.button("+").on_hover_text("Zoom in").clicked() {
                commands.push(Command::ZoomIn);
            }
            if ui.button("Save PNG").clicked() {
                commands.push(Command::Export(ExportFormat::Png));
            }
        });
    });

    commands
}
