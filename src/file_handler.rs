use crate::drawing::Drawing;
use crate::export::{ImportResult, ImportedSvg, import_json, import_svg};

/// A drawing recovered from a file dropped onto the window.
#[derive(Debug, Clone, PartialEq)]
pub enum DroppedDrawing {
    Svg(ImportedSvg),
    Json(Drawing),
}

/// Picks up files dropped onto the window and turns SVG and JSON exports
/// back into drawings.
#[derive(Debug, Default)]
pub struct FileHandler {
    dropped_files: Vec<egui::DroppedFile>,
}

impl FileHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue any newly dropped files. Returns true if there were some.
    pub fn check_for_dropped_files(&mut self, ctx: &egui::Context) -> bool {
        let mut new_dropped_files = false;

        ctx.input(|i| {
            if !i.raw.dropped_files.is_empty() {
                self.dropped_files.extend(i.raw.dropped_files.iter().cloned());
                new_dropped_files = true;
            }
        });

        new_dropped_files
    }

    /// Read the queued files. Unsupported or unreadable files are logged and
    /// skipped.
    pub fn process_dropped_files(&mut self) -> Vec<DroppedDrawing> {
        let mut drawings = Vec::new();

        for file in self.dropped_files.drain(..) {
            let file_name = file_name(&file);
            let Some(kind) = FileKind::of(&file) else {
                log::warn!("Dropped file is not a supported type: {}", file_name);
                continue;
            };
            let Some(text) = read_text(&file, &file_name) else {
                continue;
            };

            match kind.parse(&text) {
                Ok(drawing) => {
                    log::info!("Imported dropped file {}", file_name);
                    drawings.push(drawing);
                }
                Err(err) => log::error!("Failed to import {}: {}", file_name, err),
            }
        }

        drawings
    }

    /// Dim the window and list the files while they are dragged over it.
    pub fn preview_files_being_dropped(&self, ctx: &egui::Context) {
        use egui::{Align2, Color32, FontId, Id, LayerId, Order};

        if ctx.input(|i| i.raw.hovered_files.is_empty()) {
            return;
        }

        let text = ctx.input(|i| {
            let mut text = "Dropping files:\n".to_owned();
            for file in &i.raw.hovered_files {
                if let Some(path) = &file.path {
                    text += &format!("\n{}", path.display());
                } else if !file.mime.is_empty() {
                    text += &format!("\n{}", file.mime);
                } else {
                    text += "\n(unknown file)";
                }
            }
            text
        });

        let painter = ctx.layer_painter(LayerId::new(Order::Foreground, Id::new("file_drop_target")));
        let screen_rect = ctx.screen_rect();
        painter.rect_filled(screen_rect, 0.0, Color32::from_black_alpha(192));
        painter.text(
            screen_rect.center(),
            Align2::CENTER_CENTER,
            text,
            FontId::proportional(20.0),
            Color32::WHITE,
        );
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileKind {
    Svg,
    Json,
}

impl FileKind {
    /// Decide by MIME type, then by extension.
    fn of(file: &egui::DroppedFile) -> Option<Self> {
        match file.mime.as_str() {
            "image/svg+xml" => return Some(Self::Svg),
            "application/json" => return Some(Self::Json),
            _ => {}
        }
        let name = file
            .path
            .as_ref()
            .and_then(|path| path.extension())
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .or_else(|| file.name.rsplit_once('.').map(|(_, ext)| ext.to_lowercase()))?;
        match name.as_str() {
            "svg" => Some(Self::Svg),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    fn parse(self, text: &str) -> ImportResult<DroppedDrawing> {
        match self {
            Self::Svg => import_svg(text).map(DroppedDrawing::Svg),
            Self::Json => import_json(text).map(DroppedDrawing::Json),
        }
    }
}

fn file_name(file: &egui::DroppedFile) -> String {
    if let Some(path) = &file.path {
        path.display().to_string()
    } else if !file.name.is_empty() {
        file.name.clone()
    } else {
        "unknown".to_owned()
    }
}

fn read_text(file: &egui::DroppedFile, file_name: &str) -> Option<String> {
    if let Some(bytes) = &file.bytes {
        return match std::str::from_utf8(bytes) {
            Ok(text) => Some(text.to_owned()),
            Err(err) => {
                log::error!("{} is not UTF-8 text: {}", file_name, err);
                None
            }
        };
    }

    #[cfg(not(target_arch = "wasm32"))]
    if let Some(path) = &file.path {
        return match std::fs::read_to_string(path) {
            Ok(text) => Some(text),
            Err(err) => {
                log::error!("Failed to read {}: {}", path.display(), err);
                None
            }
        };
    }

    log::warn!("Dropped file has no accessible data: {}", file_name);
    None
}
