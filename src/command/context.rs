use egui::Rect;

use crate::export::Exporter;
use crate::panels::PanelState;
use crate::replicator::SymmetricReplicator;
use crate::view::ViewTransform;

/// Everything a [`super::Command`] may touch.
pub struct CommandContext<'a> {
    pub replicator: &'a mut SymmetricReplicator,
    pub view: &'a mut ViewTransform,
    pub panels: &'a mut PanelState,
    pub exporter: &'a mut Exporter,
    /// Screen rectangle of the canvas, for zooming about its center
    pub canvas: Rect,
}
