mod brush_panel;
mod central_panel;
mod file_panel;
mod settings_panel;
mod tools_panel;

pub use brush_panel::brush_panel;
pub use central_panel::central_panel;
pub use file_panel::{FileAction, FilePanel};
pub use settings_panel::{SettingsAction, settings_panel};
pub use tools_panel::tools_panel;

/// The floating panels. At most one is open at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Brush,
    File,
    Settings,
}

#[derive(Debug, Default)]
pub struct PanelState {
    open: Option<Panel>,
}

impl PanelState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open `panel`, closing whichever other panel was open.
    pub fn open(&mut self, panel: Panel) {
        self.open = Some(panel);
    }

    pub fn toggle(&mut self, panel: Panel) {
        if self.is_open(panel) {
            self.open = None;
        } else {
            self.open = Some(panel);
        }
    }

    pub fn close_all(&mut self) {
        self.open = None;
    }

    pub fn is_open(&self, panel: Panel) -> bool {
        self.open == Some(panel)
    }

    pub fn current(&self) -> Option<Panel> {
        self.open
    }
}
