use egui::{Color32, Painter, Pos2, Rect, Shape, Stroke as EguiStroke};

use crate::drawing::StrokeGroup;
use crate::geometry::rotate_deg;
use crate::replicator::SymmetricReplicator;
use crate::stroke::Stroke;
use crate::view::ViewTransform;

const GUIDE_COLOR: Color32 = Color32::from_rgba_premultiplied(60, 60, 60, 60);

/// Paints the canvas: background, committed groups, then the group being
/// drawn, all through the view transform.
#[derive(Debug, Default)]
pub struct Renderer {
    show_guides: bool,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show_guides(&self) -> bool {
        self.show_guides
    }

    pub fn set_show_guides(&mut self, show: bool) {
        self.show_guides = show;
    }

    pub fn render(&self, painter: &Painter, canvas: Rect, view: &ViewTransform, replicator: &SymmetricReplicator) {
        let settings = replicator.settings();
        painter.rect_filled(canvas, 0.0, settings.background_color());

        if self.show_guides {
            self.draw_guides(painter, canvas, view, settings.rotations(), settings.mirror());
        }

        for group in replicator.drawing().groups() {
            draw_group(painter, group, canvas, view);
        }
        if let Some(active) = replicator.active_group() {
            draw_group(painter, active, canvas, view);
        }
    }

    /// Faint spokes at every rotation angle, plus the mirror axis.
    fn draw_guides(&self, painter: &Painter, canvas: Rect, view: &ViewTransform, rotations: u32, mirror: bool) {
        let center = view.local_to_screen(Pos2::ZERO, canvas);
        let reach = canvas.size().length() / view.zoom();
        let stroke = EguiStroke::new(1.0, GUIDE_COLOR);

        let spokes = rotations.max(1);
        for i in 0..spokes {
            let angle = 360.0 / f64::from(spokes) * f64::from(i);
            let tip = rotate_deg(Pos2::new(reach, 0.0), angle);
            painter.line_segment([center, view.local_to_screen(tip, canvas)], stroke);
        }
        if mirror {
            let left = view.local_to_screen(Pos2::new(-reach, 0.0), canvas);
            let right = view.local_to_screen(Pos2::new(reach, 0.0), canvas);
            painter.line_segment([left, right], EguiStroke::new(1.5, GUIDE_COLOR));
        }
    }
}

fn draw_group(painter: &Painter, group: &StrokeGroup, canvas: Rect, view: &ViewTransform) {
    for stroke in group.strokes() {
        draw_stroke(painter, stroke, canvas, view);
    }
}

fn draw_stroke(painter: &Painter, stroke: &Stroke, canvas: Rect, view: &ViewTransform) {
    let width = stroke.width() * view.zoom();
    let points: Vec<Pos2> = stroke
        .points()
        .iter()
        .map(|p| view.local_to_screen(*p, canvas))
        .collect();

    match points.as_slice() {
        [] => {}
        [single] => {
            painter.circle_filled(*single, width / 2.0, stroke.color());
        }
        [first, .., last] => {
            // Round caps
            painter.circle_filled(*first, width / 2.0, stroke.color());
            painter.circle_filled(*last, width / 2.0, stroke.color());
            painter.add(Shape::line(points.clone(), EguiStroke::new(width, stroke.color())));
        }
    }
}
