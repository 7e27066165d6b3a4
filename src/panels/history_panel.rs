use crate::ImageEditorApp;

/// Sidebar listing every snapshot; clicking one jumps to it.
pub fn history_panel(app: &mut ImageEditorApp, ctx: &egui::Context) {
    egui::SidePanel::right("history_panel")
        .resizable(true)
        .default_width(220.0)
        .show(ctx, |ui| {
            ui.heading("History");
            ui.separator();

            let history = app.editor.history();
            let cursor = history.cursor();
            // Keep the highlighted row in view whenever the history moves
            let position = cursor.map(|index| (index, history.len()));
            let follow = position != app.history_position;
            app.history_position = position;

            let enabled = !app.is_modal();
            let mut clicked = None;
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    for (index, snapshot) in history.entries().iter().enumerate() {
                        let selected = cursor == Some(index);
                        let response = ui.add_enabled(
                            enabled,
                            egui::SelectableLabel::new(selected, snapshot.label()),
                        );
                        if selected && follow {
                            response.scroll_to_me(None);
                        }
                        if response.clicked() {
                            clicked = Some(index);
                        }
                    }
                });

            if let Some(index) = clicked {
                app.select_history(index);
            }
        });
}
