use crate::ImageEditorApp;

pub fn central_panel(app: &mut ImageEditorApp, ctx: &egui::Context) {
    egui::CentralPanel::default()
        .frame(egui::Frame::default().fill(egui::Color32::from_gray(0x34)))
        .show(ctx, |ui| {
            let (response, painter) = ui.allocate_painter(ui.available_size(), egui::Sense::drag());

            {
                let live = app.editor.live().borrow();
                app.canvas.sync(ctx, &live);
            }

            app.canvas.handle_drag(&response);
            app.canvas.paint(&painter, response.rect);
        });
}
