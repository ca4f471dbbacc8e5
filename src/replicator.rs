//! The symmetric stroke replicator.
//!
//! One pointer gesture produces one [`StrokeGroup`]: the stroke under the
//! pointer plus its rotated and mirrored copies, all extended in lockstep
//! and committed, simplified, undone and persisted together.
//!
//! Nothing here writes to storage on its own. Mutations record what needs
//! saving in [`PendingWrites`]; [`SymmetricReplicator::persist`] performs the
//! writes and is called once per frame by the application.

use egui::{Color32, Pos2};

use crate::drawing::{Drawing, StrokeGroup};
use crate::geometry::SIMPLIFY_TOLERANCE;
use crate::settings::{BrushSettings, SettingsResult};
use crate::state::{GesturePhase, KeyValueStore, PersistenceResult, save_drawing, save_settings};
use crate::stroke::Stroke;
use crate::symmetry::SymmetryPlan;

/// Records that changed since the last [`SymmetricReplicator::persist`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PendingWrites {
    pub settings: bool,
    pub drawing: bool,
}

impl PendingWrites {
    pub fn any(self) -> bool {
        self.settings || self.drawing
    }
}

/// How a gesture ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrokeOutcome {
    /// The group was added to the drawing.
    Committed { strokes: usize },
    /// The gesture was a tap; the group was thrown away.
    Discarded,
    /// There was no gesture in progress.
    NoActiveStroke,
}

/// What [`SymmetricReplicator::undo`] removed.
#[derive(Debug, Clone, PartialEq)]
pub enum UndoOutcome {
    /// The most recent committed group.
    Removed(StrokeGroup),
    /// The group still being drawn.
    CancelledActive(StrokeGroup),
    /// Nothing to undo.
    Empty,
}

#[derive(Debug, Clone)]
struct ActiveGroup {
    plan: SymmetryPlan,
    group: StrokeGroup,
    /// Only the gesture-down sample has been recorded so far.
    single_point: bool,
}

impl ActiveGroup {
    fn append(&mut self, point: Pos2) {
        for (stroke, placed) in self.group.strokes_mut().iter_mut().zip(self.plan.place_all(point)) {
            stroke.add_point(placed);
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SymmetricReplicator {
    settings: BrushSettings,
    drawing: Drawing,
    active: Option<ActiveGroup>,
    pending: PendingWrites,
}

impl SymmetricReplicator {
    pub fn new(settings: BrushSettings, drawing: Drawing) -> Self {
        Self {
            settings,
            drawing,
            active: None,
            pending: PendingWrites::default(),
        }
    }

    pub fn settings(&self) -> &BrushSettings {
        &self.settings
    }

    pub fn drawing(&self) -> &Drawing {
        &self.drawing
    }

    /// The group of the gesture in progress, if any.
    pub fn active_group(&self) -> Option<&StrokeGroup> {
        self.active.as_ref().map(|active| &active.group)
    }

    pub fn is_drawing(&self) -> bool {
        self.active.is_some()
    }

    pub fn pending(&self) -> PendingWrites {
        self.pending
    }

    /// Start a gesture at `point`.
    ///
    /// Allocates one stroke per symmetry role and records `point` on all of
    /// them. A gesture still in progress is ended first, so its group is kept.
    /// Does nothing while `phase` suppresses drawing. Returns whether a
    /// gesture was started.
    pub fn begin_stroke(&mut self, point: Pos2, phase: GesturePhase) -> bool {
        if phase.suppresses_drawing() {
            log::debug!("Stroke suppressed by {:?}", phase);
            return false;
        }
        if self.active.is_some() {
            let outcome = self.end_stroke();
            log::debug!("Stroke started while another was active; finished that one first: {:?}", outcome);
        }

        let plan = SymmetryPlan::new(self.settings.rotations(), self.settings.mirror());
        let strokes = plan
            .roles()
            .iter()
            .map(|_| Stroke::new(self.settings.brush_color(), self.settings.brush_size()))
            .collect();

        let mut active = ActiveGroup {
            plan,
            group: StrokeGroup::new(strokes),
            single_point: true,
        };
        active.append(point);
        self.active = Some(active);
        true
    }

    /// Record a move sample on every stroke of the active group.
    /// Returns false when no gesture is in progress.
    pub fn add_point(&mut self, point: Pos2) -> bool {
        let Some(active) = self.active.as_mut() else {
            return false;
        };
        active.append(point);
        active.single_point = false;
        log::trace!("Added sample {:?} to {} strokes", point, active.group.len());
        true
    }

    /// Finish the gesture in progress.
    ///
    /// Simplifies every stroke when enabled, then commits the group, unless
    /// only the initial tap was recorded, in which case the group is dropped.
    pub fn end_stroke(&mut self) -> StrokeOutcome {
        let Some(mut active) = self.active.take() else {
            return StrokeOutcome::NoActiveStroke;
        };

        if active.single_point {
            log::debug!("Discarding single-point stroke group");
            return StrokeOutcome::Discarded;
        }

        if self.settings.simplify() {
            for stroke in active.group.strokes_mut() {
                stroke.simplify(SIMPLIFY_TOLERANCE);
            }
        }

        let strokes = active.group.len();
        self.drawing.push(active.group);
        self.pending.drawing = true;
        log::info!("Committed stroke group with {} strokes ({} groups total)", strokes, self.drawing.len());
        StrokeOutcome::Committed { strokes }
    }

    /// Remove the most recent group.
    ///
    /// A gesture in progress counts as the most recent group. Undo on an
    /// empty drawing changes nothing and schedules no write.
    pub fn undo(&mut self) -> UndoOutcome {
        if let Some(active) = self.active.take() {
            log::info!("Undo cancelled the stroke in progress");
            return UndoOutcome::CancelledActive(active.group);
        }

        match self.drawing.pop() {
            Some(group) => {
                self.pending.drawing = true;
                log::info!("Undo removed a group ({} left)", self.drawing.len());
                UndoOutcome::Removed(group)
            }
            None => UndoOutcome::Empty,
        }
    }

    /// Start over with an empty drawing.
    pub fn clear(&mut self) {
        self.active = None;
        self.drawing.clear();
        self.pending.drawing = true;
        log::info!("Cleared drawing");
    }

    /// Swap in a drawing loaded from elsewhere (library, import).
    pub fn replace_drawing(&mut self, drawing: Drawing) {
        self.active = None;
        self.drawing = drawing;
        self.pending.drawing = true;
    }

    pub fn replace_settings(&mut self, settings: BrushSettings) {
        self.settings = settings;
        self.pending.settings = true;
    }

    pub fn set_mirror(&mut self, mirror: bool) {
        self.settings.set_mirror(mirror);
        self.pending.settings = true;
    }

    pub fn toggle_mirror(&mut self) {
        self.set_mirror(!self.settings.mirror());
    }

    pub fn set_simplify(&mut self, simplify: bool) {
        self.settings.set_simplify(simplify);
        self.pending.settings = true;
    }

    pub fn toggle_simplify(&mut self) {
        self.set_simplify(!self.settings.simplify());
    }

    pub fn set_rotations(&mut self, rotations: u32) {
        self.settings.set_rotations(rotations);
        self.pending.settings = true;
    }

    pub fn set_rotations_percentage(&mut self, percentage: f32) {
        self.settings.set_rotations_percentage(percentage);
        self.pending.settings = true;
    }

    pub fn set_brush_size(&mut self, size: f32) {
        self.settings.set_brush_size(size);
        self.pending.settings = true;
    }

    pub fn set_brush_size_percentage(&mut self, percentage: f32) {
        self.settings.set_brush_size_percentage(percentage);
        self.pending.settings = true;
    }

    pub fn set_brush_color(&mut self, color: Color32) {
        self.settings.set_brush_color(color);
        self.pending.settings = true;
    }

    pub fn set_brush_color_hex(&mut self, hex: &str) -> SettingsResult<()> {
        self.settings.set_brush_color_hex(hex)?;
        self.pending.settings = true;
        Ok(())
    }

    pub fn set_background_color(&mut self, color: Color32) {
        self.settings.set_background_color(color);
        self.pending.settings = true;
    }

    pub fn set_background_color_hex(&mut self, hex: &str) -> SettingsResult<()> {
        self.settings.set_background_color_hex(hex)?;
        self.pending.settings = true;
        Ok(())
    }

    /// Write whatever changed since the last call. Returns what was written.
    ///
    /// A failed write leaves its flag set so the next call retries.
    pub fn persist(&mut self, store: &mut dyn KeyValueStore) -> PersistenceResult<PendingWrites> {
        let written = self.pending;

        if self.pending.settings {
            save_settings(store, &self.settings)?;
            self.pending.settings = false;
        }
        if self.pending.drawing {
            save_drawing(store, &self.drawing)?;
            self.pending.drawing = false;
        }

        if written.any() {
            log::debug!("Persisted {:?}", written);
        }
        Ok(written)
    }
}
