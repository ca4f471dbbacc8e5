use crate::color::to_hex;
use crate::components::PercentSlider;
use crate::replicator::SymmetricReplicator;

/// A change made through one of the brush bars or the number box beside it.
#[derive(Debug, Clone, Copy, PartialEq)]
enum NumericEdit {
    Rotations(u32),
    RotationsPercentage(f32),
    Size(f32),
    SizePercentage(f32),
}

impl NumericEdit {
    /// Typed values go through the value setters, which clamp them.
    fn apply(self, replicator: &mut SymmetricReplicator) {
        match self {
            Self::Rotations(rotations) => replicator.set_rotations(rotations),
            Self::RotationsPercentage(percentage) => replicator.set_rotations_percentage(percentage),
            Self::Size(size) => replicator.set_brush_size(size),
            Self::SizePercentage(percentage) => replicator.set_brush_size_percentage(percentage),
        }
    }
}

/// Brush controls: symmetry, size, color. Edits go through the replicator so
/// they are persisted.
pub fn brush_panel(ctx: &egui::Context, open: &mut bool, replicator: &mut SymmetricReplicator) {
    egui::Window::new("Brush")
        .open(open)
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::LEFT_TOP, egui::vec2(12.0, 52.0))
        .show(ctx, |ui| {
            let settings = replicator.settings().clone();

            let mut edits = Vec::new();

            ui.horizontal(|ui| {
                if let Some(percentage) = PercentSlider::new("Rotations", settings.rotations_percentage())
                    .value_text(settings.rotations().to_string())
                    .show(ui)
                {
                    edits.push(NumericEdit::RotationsPercentage(percentage));
                }
                let mut rotations = settings.rotations();
                if ui.add(egui::DragValue::new(&mut rotations).speed(0.1)).changed() {
                    edits.push(NumericEdit::Rotations(rotations));
                }
            });

            ui.horizontal(|ui| {
                if let Some(percentage) = PercentSlider::new("Size", settings.brush_size_percentage())
                    .value_text(format!("{:.1}", settings.brush_size()))
                    .show(ui)
                {
                    edits.push(NumericEdit::SizePercentage(percentage));
                }
                let mut size = settings.brush_size();
                if ui
                    .add(egui::DragValue::new(&mut size).speed(0.1).max_decimals(1).suffix("px"))
                    .changed()
                {
                    edits.push(NumericEdit::Size(size));
                }
            });

            for edit in edits {
                edit.apply(replicator);
            }

            ui.horizontal(|ui| {
                ui.label("Color");
                let mut color = settings.brush_color();
                if egui::color_picker::color_edit_button_srgba(ui, &mut color, egui::color_picker::Alpha::Opaque)
                    .changed()
                {
                    replicator.set_brush_color(color);
                }
                ui.monospace(to_hex(color));
            });

            ui.separator();

            let mut mirror = settings.mirror();
            if ui.checkbox(&mut mirror, "Mirror").changed() {
                replicator.set_mirror(mirror);
            }
            let mut simplify = settings.simplify();
            if ui.checkbox(&mut simplify, "Simplify strokes").changed() {
                replicator.set_simplify(simplify);
            }

            ui.label(format!(
                "{} strokes per gesture",
                crate::symmetry::group_size(settings.rotations(), settings.mirror())
            ));
        });
}
