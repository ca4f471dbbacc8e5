#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod color;
pub mod command;
pub mod components;
pub mod drawing;
pub mod export;
pub mod file_handler;
pub mod geometry;
pub mod input;
pub mod panels;
pub mod renderer;
pub mod replicator;
pub mod settings;
pub mod state;
pub mod stroke;
pub mod symmetry;
pub mod util;
pub mod view;

pub use app::MandalaApp;
pub use command::Command;
pub use drawing::{Drawing, StrokeGroup};
pub use renderer::Renderer;
pub use replicator::{PendingWrites, StrokeOutcome, SymmetricReplicator, UndoOutcome};
pub use settings::BrushSettings;
pub use state::GesturePhase;
pub use stroke::Stroke;
pub use symmetry::{StrokeRole, SymmetryPlan};
