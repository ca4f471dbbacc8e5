use crate::command::ExportFormat;
use crate::replicator::SymmetricReplicator;
use crate::renderer::Renderer;
use crate::view::ViewTransform;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsAction {
    ResetView,
    Export(ExportFormat),
}

/// Canvas settings: background, guides, view and the less common exports.
pub fn settings_panel(
    ctx: &egui::Context,
    open: &mut bool,
    replicator: &mut SymmetricReplicator,
    renderer: &mut Renderer,
    view: &ViewTransform,
    export_status: Option<&str>,
) -> Option<SettingsAction> {
    let mut action = None;

    egui::Window::new("Settings")
        .open(open)
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::RIGHT_TOP, egui::vec2(-12.0, 52.0))
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label("Background");
                let mut color = replicator.settings().background_color();
                if egui::color_picker::color_edit_button_srgba(ui, &mut color, egui::color_picker::Alpha::Opaque)
                    .changed()
                {
                    replicator.set_background_color(color);
                }
            });

            let mut guides = renderer.show_guides();
            if ui.checkbox(&mut guides, "Show symmetry guides").changed() {
                renderer.set_show_guides(guides);
            }

            ui.separator();
            ui.horizontal(|ui| {
                ui.label(format!("Zoom {:.0}%", view.zoom() * 100.0));
                if ui.button("Reset view").clicked() {
                    action = Some(SettingsAction::ResetView);
                }
            });

            ui.separator();
            ui.horizontal(|ui| {
                for (label, format) in [
                    ("PNG", ExportFormat::Png),
                    ("SVG", ExportFormat::Svg),
                    ("JSON", ExportFormat::Json),
                ] {
                    if ui.button(format!("Export {label}")).clicked() {
                        action = Some(SettingsAction::Export(format));
                    }
                }
            });
            if let Some(status) = export_status {
                ui.small(status);
            }
        });

    action
}
