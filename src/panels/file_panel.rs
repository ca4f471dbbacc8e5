use crate::command::ExportFormat;

/// What the user asked the drawing library to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileAction {
    SaveAs(String),
    Open(String),
    Delete(String),
    New,
    Export(ExportFormat),
}

/// The drawing library window: save under a name, reopen, delete, start
/// over, export.
#[derive(Debug, Default)]
pub struct FilePanel {
    name: String,
    message: Option<String>,
}

impl FilePanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feedback for the last action, shown at the bottom of the window.
    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = Some(message.into());
    }

    pub fn show(&mut self, ctx: &egui::Context, open: &mut bool, names: &[String]) -> Option<FileAction> {
        let mut action = None;

        egui::Window::new("Drawings")
            .open(open)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_TOP, egui::vec2(0.0, 52.0))
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    let response = ui.add(egui::TextEdit::singleline(&mut self.name).hint_text("Name"));
                    let submitted = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                    let can_save = !self.name.trim().is_empty();
                    if ui.add_enabled(can_save, egui::Button::new("Save")).clicked() || (submitted && can_save) {
                        action = Some(FileAction::SaveAs(self.name.trim().to_owned()));
                    }
                });

                ui.separator();

                if names.is_empty() {
                    ui.weak("No saved drawings");
                }
                egui::ScrollArea::vertical().max_height(240.0).show(ui, |ui| {
                    for name in names {
                        ui.horizontal(|ui| {
                            if ui.button("Open").clicked() {
                                self.name = name.clone();
                                action = Some(FileAction::Open(name.clone()));
                            }
                            if ui.button("Delete").clicked() {
                                action = Some(FileAction::Delete(name.clone()));
                            }
                            ui.label(name);
                        });
                    }
                });

                ui.separator();

                ui.horizontal(|ui| {
                    if ui.button("New drawing").clicked() {
                        self.name.clear();
                        action = Some(FileAction::New);
                    }
                    if ui.button("Export SVG").clicked() {
                        action = Some(FileAction::Export(ExportFormat::Svg));
                    }
                    if ui.button("Export PNG").clicked() {
                        action = Some(FileAction::Export(ExportFormat::Png));
                    }
                });

                if let Some(message) = &self.message {
                    ui.small(message);
                }
            });

        action
    }
}
