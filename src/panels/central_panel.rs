use crate::MandalaApp;

/// The drawing surface: fills whatever space the other panels leave.
pub fn central_panel(app: &mut MandalaApp, ctx: &egui::Context) {
    egui::CentralPanel::default()
        .frame(egui::Frame::none())
        .show(ctx, |ui| {
            let (response, painter) = ui.allocate_painter(ui.available_size(), egui::Sense::click_and_drag());
            let canvas_rect = response.rect;

            app.handle_canvas_input(ctx, &response, canvas_rect);
            app.renderer().render(&painter, canvas_rect, app.view(), app.replicator());
        });
}
