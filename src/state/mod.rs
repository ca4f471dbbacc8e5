pub mod library;
mod persistence;

pub use persistence::{
    DRAWING_KEY, EframeStore, FILES_KEY, KeyValueStore, MemoryStore, PersistenceError,
    PersistenceResult, SETTINGS_KEY, StartupStore, file_key, load_drawing, load_settings,
    save_drawing, save_settings,
};

/// What the input side is doing besides plain drawing.
///
/// Passed into every stroke-start so a pan or a multi-touch gesture can
/// suppress drawing without any shared flag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GesturePhase {
    #[default]
    Idle,
    /// The pan modifier (shift) is held: drags move the view.
    PanModifier,
    /// Two or more touches are down: pinch, two-finger pan or tap.
    MultiTouch,
}

impl GesturePhase {
    pub fn suppresses_drawing(self) -> bool {
        !matches!(self, Self::Idle)
    }
}
