use egui::{Rect, Response};

use crate::command::{Command, CommandContext};
use crate::export::Exporter;
use crate::file_handler::{DroppedDrawing, FileHandler};
use crate::input::{self, InputHandler};
use crate::panels::{self, FileAction, FilePanel, Panel, PanelState, SettingsAction};
use crate::renderer::Renderer;
use crate::replicator::SymmetricReplicator;
use crate::state::{
    DRAWING_KEY, EframeStore, KeyValueStore, MemoryStore, SETTINGS_KEY, StartupStore, library, load_drawing,
    load_settings,
};
use crate::view::ViewTransform;

pub struct MandalaApp {
    replicator: SymmetricReplicator,
    view: ViewTransform,
    renderer: Renderer,
    input: InputHandler,
    panels: PanelState,
    exporter: Exporter,
    file_handler: FileHandler,
    file_panel: FilePanel,
    /// Saved drawing names, refreshed whenever the library changes
    library_names: Option<Vec<String>>,
    /// Used when eframe runs without persistence
    fallback_store: MemoryStore,
    canvas_rect: Rect,
}

impl MandalaApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let store = StartupStore::new(cc.storage);
        let settings = load_settings(store.get(SETTINGS_KEY));
        let drawing = load_drawing(store.get(DRAWING_KEY));
        log::info!(
            "Loaded drawing with {} groups ({} rotations, mirror {})",
            drawing.len(),
            settings.rotations(),
            settings.mirror()
        );

        Self {
            replicator: SymmetricReplicator::new(settings, drawing),
            view: ViewTransform::default(),
            renderer: Renderer::new(),
            input: InputHandler::new(),
            panels: PanelState::new(),
            exporter: Exporter::new(),
            file_handler: FileHandler::new(),
            file_panel: FilePanel::new(),
            library_names: None,
            fallback_store: MemoryStore::new(),
            canvas_rect: Rect::NOTHING,
        }
    }

    pub fn replicator(&self) -> &SymmetricReplicator {
        &self.replicator
    }

    pub fn view(&self) -> &ViewTransform {
        &self.view
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    pub fn execute(&mut self, command: Command) {
        log::debug!("Executing {:?}", command);
        let mut ctx = CommandContext {
            replicator: &mut self.replicator,
            view: &mut self.view,
            panels: &mut self.panels,
            exporter: &mut self.exporter,
            canvas: self.canvas_rect,
        };
        command.execute(&mut ctx);
    }

    /// Translate this frame's canvas input and apply it.
    pub fn handle_canvas_input(&mut self, ctx: &egui::Context, response: &Response, canvas: Rect) {
        self.canvas_rect = canvas;
        for event in self.input.process(ctx, response, canvas, &self.view) {
            if let Some(command) = input::route_event(&event, &mut self.replicator, &mut self.view, canvas) {
                self.execute(command);
            }
        }
    }

    fn with_store<R>(&mut self, frame: &mut eframe::Frame, f: impl FnOnce(&mut Self, &mut dyn KeyValueStore) -> R) -> R {
        match frame.storage_mut() {
            Some(storage) => {
                let mut store = EframeStore::new(storage);
                f(self, &mut store)
            }
            None => {
                let mut store = self.fallback_store.clone();
                f(self, &mut store)
            }
        }
    }

    fn handle_file_action(&mut self, action: FileAction, frame: &mut eframe::Frame) {
        match action {
            FileAction::SaveAs(name) => {
                let result = self.with_store(frame, |app, store| {
                    library::save_as(store, &name, app.replicator.drawing(), app.replicator.settings())
                });
                match result {
                    Ok(()) => self.file_panel.set_message(format!("Saved {name}")),
                    Err(err) => {
                        log::error!("Saving {:?} failed: {}", name, err);
                        self.file_panel.set_message(format!("Save failed: {err}"));
                    }
                }
            }
            FileAction::Open(name) => match self.with_store(frame, |_, store| library::open(store, &name)) {
                Ok(saved) => {
                    self.replicator.replace_settings(saved.settings);
                    self.replicator.replace_drawing(saved.drawing);
                    self.view.reset();
                    self.file_panel.set_message(format!("Opened {name}"));
                }
                Err(err) => {
                    log::error!("Opening {:?} failed: {}", name, err);
                    self.file_panel.set_message(format!("Open failed: {err}"));
                }
            },
            FileAction::Delete(name) => {
                if let Err(err) = self.with_store(frame, |_, store| library::delete(store, &name)) {
                    log::error!("Deleting {:?} failed: {}", name, err);
                    self.file_panel.set_message(format!("Delete failed: {err}"));
                }
            }
            FileAction::New => self.execute(Command::NewDrawing),
            FileAction::Export(format) => self.execute(Command::Export(format)),
        }
        self.library_names = None;
    }

    fn import(&mut self, dropped: DroppedDrawing) {
        match dropped {
            DroppedDrawing::Svg(imported) => {
                if let Some(background) = imported.background {
                    self.replicator.set_background_color(background);
                }
                self.replicator.replace_drawing(imported.drawing);
            }
            DroppedDrawing::Json(drawing) => self.replicator.replace_drawing(drawing),
        }
        self.view.reset();
    }

    fn show_panels(&mut self, ctx: &egui::Context, frame: &mut eframe::Frame) {
        match self.panels.current() {
            Some(Panel::Brush) => {
                let mut open = true;
                panels::brush_panel(ctx, &mut open, &mut self.replicator);
                if !open {
                    self.panels.close_all();
                }
            }
            Some(Panel::File) => {
                if self.library_names.is_none() {
                    self.library_names = Some(self.with_store(frame, |_, store| library::list(store)));
                }
                let names = self.library_names.clone().unwrap_or_default();
                let mut open = true;
                let action = self.file_panel.show(ctx, &mut open, &names);
                if !open {
                    self.panels.close_all();
                }
                if let Some(action) = action {
                    self.handle_file_action(action, frame);
                }
            }
            Some(Panel::Settings) => {
                let mut open = true;
                let action = panels::settings_panel(
                    ctx,
                    &mut open,
                    &mut self.replicator,
                    &mut self.renderer,
                    &self.view,
                    self.exporter.status(),
                );
                if !open {
                    self.panels.close_all();
                }
                match action {
                    Some(SettingsAction::ResetView) => self.execute(Command::ResetView),
                    Some(SettingsAction::Export(format)) => self.execute(Command::Export(format)),
                    None => {}
                }
            }
            None => {}
        }
    }
}

impl eframe::App for MandalaApp {
    /// Flush anything not yet written before eframe saves its storage.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        let mut store = EframeStore::new(storage);
        if let Err(err) = self.replicator.persist(&mut store) {
            log::error!("Failed to save on shutdown: {}", err);
        }
    }

    fn update(&mut self, ctx: &egui::Context, frame: &mut eframe::Frame) {
        for command in input::shortcuts::collect(ctx) {
            self.execute(command);
        }

        let commands = panels::tools_panel(
            ctx,
            self.replicator.settings(),
            &self.panels,
            !self.replicator.drawing().is_empty() || self.replicator.is_drawing(),
        );
        for command in commands {
            self.execute(command);
        }

        self.show_panels(ctx, frame);
        panels::central_panel(self, ctx);

        self.file_handler.preview_files_being_dropped(ctx);
        if self.file_handler.check_for_dropped_files(ctx) {
            for dropped in self.file_handler.process_dropped_files() {
                self.import(dropped);
            }
        }

        if self.exporter.poll() {
            ctx.request_repaint();
        } else if self.exporter.is_busy() {
            ctx.request_repaint_after(std::time::Duration::from_millis(50));
        }

        let result = self.with_store(frame, |app, store| app.replicator.persist(store));
        if let Err(err) = result {
            log::error!("Failed to persist drawing: {}", err);
        }
    }
}
