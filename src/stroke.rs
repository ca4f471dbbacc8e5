use egui::{Color32, Pos2};
use serde::{Deserialize, Serialize};

use crate::geometry;

/// One continuous path. Color and width are fixed when the stroke is created;
/// points are only ever appended, except by [`Stroke::simplify`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    points: Vec<Pos2>,
    #[serde(with = "crate::color::serde_hex")]
    color: Color32,
    width: f32,
}

impl Stroke {
    // Create an empty stroke
    pub fn new(color: Color32, width: f32) -> Self {
        Self {
            points: Vec::new(),
            color,
            width,
        }
    }

    pub fn with_points(color: Color32, width: f32, points: Vec<Pos2>) -> Self {
        Self {
            points,
            color,
            width,
        }
    }

    pub fn add_point(&mut self, point: Pos2) {
        self.points.push(point);
    }

    pub fn points(&self) -> &[Pos2] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    /// Replace the control points with a simplified polyline of the same shape.
    pub fn simplify(&mut self, tolerance: f32) {
        self.points = geometry::simplify_points(&self.points, tolerance);
    }
}
