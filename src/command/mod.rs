mod context;

pub use crate::export::ExportFormat;
pub use context::CommandContext;

use egui::Vec2;

use crate::panels::Panel;
use crate::view::ZOOM_STEP;

/// Everything the keyboard, toolbar and gestures can ask the editor to do.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Remove the last stroke group
    Undo,
    ToggleMirror,
    ToggleSimplify,
    ZoomIn,
    ZoomOut,
    /// Move the view by a screen-space delta
    Pan(Vec2),
    ResetView,
    Export(ExportFormat),
    OpenPanel(Panel),
    CloseAllPanels,
    /// Throw away the current drawing
    NewDrawing,
}

impl Command {
    pub fn execute(&self, ctx: &mut CommandContext<'_>) {
        match self {
            Command::Undo => {
                ctx.replicator.undo();
            }
            Command::ToggleMirror => ctx.replicator.toggle_mirror(),
            Command::ToggleSimplify => ctx.replicator.toggle_simplify(),
            Command::ZoomIn => ctx.view.zoom_centered(ZOOM_STEP, ctx.canvas),
            Command::ZoomOut => ctx.view.zoom_centered(1.0 / ZOOM_STEP, ctx.canvas),
            Command::Pan(delta) => ctx.view.pan_by(*delta),
            Command::ResetView => ctx.view.reset(),
            Command::Export(format) => {
                let drawing = ctx.replicator.drawing();
                let settings = ctx.replicator.settings();
                ctx.exporter.request(*format, drawing, settings, ctx.view, ctx.canvas);
            }
            Command::OpenPanel(panel) => ctx.panels.open(*panel),
            Command::CloseAllPanels => ctx.panels.close_all(),
            Command::NewDrawing => ctx.replicator.clear(),
        }
    }
}

#[cfg(test)]
mod tests {
    use egui::{Pos2, Rect};

    use super::*;
    use crate::export::Exporter;
    use crate::panels::PanelState;
    use crate::replicator::SymmetricReplicator;
    use crate::state::GesturePhase;
    use crate::view::ViewTransform;

    struct Editor {
        replicator: SymmetricReplicator,
        view: ViewTransform,
        panels: PanelState,
        exporter: Exporter,
    }

    impl Editor {
        fn new() -> Self {
            Self {
                replicator: SymmetricReplicator::default(),
                view: ViewTransform::default(),
                panels: PanelState::new(),
                exporter: Exporter::new(),
            }
        }

        fn run(&mut self, command: Command) {
            let mut ctx = CommandContext {
                replicator: &mut self.replicator,
                view: &mut self.view,
                panels: &mut self.panels,
                exporter: &mut self.exporter,
                canvas: Rect::from_min_size(Pos2::ZERO, Vec2::new(300.0, 200.0)),
            };
            command.execute(&mut ctx);
        }
    }

    #[test]
    fn toggles_and_undo_reach_the_replicator() {
        let mut editor = Editor::new();
        editor.run(Command::ToggleMirror);
        editor.run(Command::ToggleSimplify);
        assert!(!editor.replicator.settings().mirror());
        assert!(!editor.replicator.settings().simplify());

        editor.replicator.begin_stroke(Pos2::ZERO, GesturePhase::Idle);
        editor.replicator.add_point(Pos2::new(10.0, 0.0));
        editor.replicator.end_stroke();
        editor.run(Command::Undo);
        assert!(editor.replicator.drawing().is_empty());
    }

    #[test]
    fn view_commands() {
        let mut editor = Editor::new();
        editor.run(Command::ZoomIn);
        assert!((editor.view.zoom() - ZOOM_STEP).abs() < 1e-6);
        editor.run(Command::ZoomOut);
        assert!((editor.view.zoom() - 1.0).abs() < 1e-6);

        editor.run(Command::Pan(Vec2::new(10.0, 0.0)));
        assert_eq!(editor.view.pan(), Vec2::new(10.0, 0.0));
        editor.run(Command::ResetView);
        assert_eq!(editor.view, ViewTransform::default());
    }

    #[test]
    fn escape_closes_panels() {
        let mut editor = Editor::new();
        editor.run(Command::OpenPanel(Panel::Brush));
        assert!(editor.panels.is_open(Panel::Brush));
        editor.run(Command::CloseAllPanels);
        assert_eq!(editor.panels.current(), None);
    }
}
