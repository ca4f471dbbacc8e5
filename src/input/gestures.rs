use egui::{MultiTouchInfo, Pos2, Vec2};

/// A recognized multi-touch gesture
#[derive(Debug, Clone, PartialEq)]
pub enum Gesture {
    /// Two fingers spreading or closing: zoom by `factor` about `anchor`
    Pinch { factor: f32, anchor: Pos2 },
    /// Two fingers moving together
    Pan { delta: Vec2 },
    /// Two fingers touching and lifting without moving
    TwoFingerTap,
}

/// Configuration for gesture recognition
#[derive(Debug, Clone)]
struct GestureConfig {
    /// Longest a two-finger tap may last (seconds)
    tap_time: f64,
    /// Furthest the fingers may travel during a tap (points)
    tap_travel: f32,
    /// Largest zoom drift still counted as a tap
    tap_zoom_drift: f32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            tap_time: 0.3,
            tap_travel: 10.0,
            tap_zoom_drift: 0.05,
        }
    }
}

/// One frame of multi-touch input, as egui reports it.
#[derive(Debug, Clone, Copy)]
pub struct TouchSample {
    pub num_touches: usize,
    pub zoom_delta: f32,
    pub translation_delta: Vec2,
    pub anchor: Pos2,
}

impl From<&MultiTouchInfo> for TouchSample {
    fn from(info: &MultiTouchInfo) -> Self {
        Self {
            num_touches: info.num_touches,
            zoom_delta: info.zoom_delta,
            translation_delta: info.translation_delta,
            anchor: info.start_pos,
        }
    }
}

#[derive(Debug, Clone)]
struct TouchSession {
    start_time: f64,
    travel: f32,
    zoom: f32,
}

/// Turns per-frame multi-touch samples into pinch, pan and two-finger tap.
#[derive(Debug, Default)]
pub struct GestureRecognizer {
    config: GestureConfig,
    session: Option<TouchSession>,
}

impl GestureRecognizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// True while two or more fingers are down.
    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// Feed this frame's multi-touch state (`None` when fewer than two
    /// touches are down) and collect the gestures it completes.
    pub fn update(&mut self, sample: Option<TouchSample>, now: f64) -> Vec<Gesture> {
        let mut gestures = Vec::new();

        match sample {
            Some(sample) if sample.num_touches >= 2 => {
                let session = self.session.get_or_insert_with(|| TouchSession {
                    start_time: now,
                    travel: 0.0,
                    zoom: 1.0,
                });
                session.travel += sample.translation_delta.length();
                session.zoom *= sample.zoom_delta;

                if sample.zoom_delta != 1.0 {
                    gestures.push(Gesture::Pinch {
                        factor: sample.zoom_delta,
                        anchor: sample.anchor,
                    });
                }
                if sample.translation_delta != Vec2::ZERO {
                    gestures.push(Gesture::Pan {
                        delta: sample.translation_delta,
                    });
                }
            }
            _ => {
                if let Some(session) = self.session.take() {
                    if self.is_tap(&session, now) {
                        gestures.push(Gesture::TwoFingerTap);
                    }
                }
            }
        }

        gestures
    }

    fn is_tap(&self, session: &TouchSession, now: f64) -> bool {
        now - session.start_time <= self.config.tap_time
            && session.travel <= self.config.tap_travel
            && (session.zoom - 1.0).abs() <= self.config.tap_zoom_drift
    }
}
