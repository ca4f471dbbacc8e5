use egui::{Pos2, Rect, Vec2};

pub const MIN_ZOOM: f32 = 0.05;
pub const MAX_ZOOM: f32 = 40.0;
/// Factor applied by one zoom-in / zoom-out step.
pub const ZOOM_STEP: f32 = 1.1;
/// Distance moved by one arrow-key press, in screen points.
pub const PAN_STEP: f32 = 10.0;
/// Zoom change per unit of ctrl+wheel scroll.
pub const WHEEL_ZOOM_FACTOR: f32 = 0.005;

/// Maps between screen points and the drawing's local space.
///
/// Local `(0, 0)` sits at the center of the canvas rectangle, shifted by
/// `pan` (screen points) and scaled by `zoom`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    zoom: f32,
    pan: Vec2,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            pan: Vec2::ZERO,
        }
    }
}

impl ViewTransform {
    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn pan(&self) -> Vec2 {
        self.pan
    }

    fn origin(&self, canvas: Rect) -> Pos2 {
        canvas.center() + self.pan
    }

    pub fn screen_to_local(&self, screen: Pos2, canvas: Rect) -> Pos2 {
        ((screen - self.origin(canvas)) / self.zoom).to_pos2()
    }

    pub fn local_to_screen(&self, local: Pos2, canvas: Rect) -> Pos2 {
        self.origin(canvas) + local.to_vec2() * self.zoom
    }

    /// Move the view by a screen-space delta.
    pub fn pan_by(&mut self, delta: Vec2) {
        self.pan += delta;
    }

    /// Multiply the zoom, keeping the screen point `anchor` fixed.
    pub fn zoom_by(&mut self, factor: f32, anchor: Pos2, canvas: Rect) {
        if !factor.is_finite() || factor <= 0.0 {
            return;
        }
        let local = self.screen_to_local(anchor, canvas);
        self.zoom = (self.zoom * factor).clamp(MIN_ZOOM, MAX_ZOOM);
        // Shift so that `local` is back under `anchor`
        let moved = self.local_to_screen(local, canvas);
        self.pan += anchor - moved;
    }

    /// Zoom about the canvas center.
    pub fn zoom_centered(&mut self, factor: f32, canvas: Rect) {
        self.zoom_by(factor, self.origin(canvas), canvas);
    }

    /// Ctrl+wheel zoom: scrolling up (negative delta) zooms in.
    pub fn wheel_zoom(&mut self, scroll_y: f32, anchor: Pos2, canvas: Rect) {
        let target = (self.zoom - scroll_y * WHEEL_ZOOM_FACTOR).max(MIN_ZOOM);
        self.zoom_by(target / self.zoom, anchor, canvas);
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
