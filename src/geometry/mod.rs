//! Point math in the drawing's local space.
//!
//! The local origin is the logical center of the view, so rotating and
//! mirroring about the origin is rotating and mirroring about the middle of
//! the canvas.

use egui::Pos2;

mod simplify;

pub use simplify::{SIMPLIFY_TOLERANCE, simplify_points};

/// Reflect a point across the horizontal axis through the origin.
pub fn mirror(point: Pos2) -> Pos2 {
    Pos2::new(point.x, -point.y)
}

/// Rotate a point about the origin by `degrees`.
///
/// Positive angles turn clockwise on screen (y grows downwards), so
/// `(10, 0)` rotated by 90 degrees lands on `(0, 10)`. The trigonometry is
/// done in `f64` to keep the copies of long strokes tight.
pub fn rotate_deg(point: Pos2, degrees: f64) -> Pos2 {
    let (sin, cos) = degrees.to_radians().sin_cos();
    let x = point.x as f64;
    let y = point.y as f64;
    Pos2::new((x * cos - y * sin) as f32, (x * sin + y * cos) as f32)
}

/// Squared distance from `point` to the segment `start..end`.
pub(crate) fn distance_sq_to_segment(point: Pos2, start: Pos2, end: Pos2) -> f32 {
    let line = end - start;
    let to_point = point - start;

    let len_sq = line.length_sq();
    if len_sq == 0.0 {
        return to_point.length_sq();
    }

    let t = ((to_point.x * line.x + to_point.y * line.y) / len_sq).clamp(0.0, 1.0);
    let projection = start + line * t;
    (point - projection).length_sq()
}
