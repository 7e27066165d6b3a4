use crate::canvas::CanvasView;
use crate::dialogs::{Dialog, DialogOutcome};
use crate::editor::Editor;
use crate::error::{EditorError, EditorResult};
use crate::action::EditAction;
use crate::panels::{self, MenuCommand};
use crate::settings::EditorSettings;

/// The desktop front-end: menus, history sidebar, canvas and dialogs
/// around a single [`Editor`].
pub struct ImageEditorApp {
    pub(crate) editor: Editor,
    pub(crate) canvas: CanvasView,
    /// Cursor and length of the history when the sidebar was last drawn
    pub(crate) history_position: Option<(usize, usize)>,
    dialog: Option<Dialog>,
    error: Option<String>,
}

impl ImageEditorApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        cc.egui_ctx.set_visuals(egui::Visuals::dark());

        // Load previous settings (if any).
        let settings: EditorSettings = cc
            .storage
            .and_then(|storage| eframe::get_value(storage, eframe::APP_KEY))
            .unwrap_or_default();
        Self::with_settings(settings)
    }

    pub fn with_settings(settings: EditorSettings) -> Self {
        Self {
            canvas: CanvasView::new(settings.canvas_origin),
            editor: Editor::new(settings),
            history_position: None,
            dialog: None,
            error: None,
        }
    }

    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    pub fn dialog(&self) -> Option<&Dialog> {
        self.dialog.as_ref()
    }

    /// Message currently shown in the error window
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// True while a dialog is waiting for input; the rest of the UI is locked
    pub fn is_modal(&self) -> bool {
        self.dialog.is_some()
    }

    /// Routes a menu pick or shortcut to the editor
    pub fn run_command(&mut self, ctx: &egui::Context, command: MenuCommand) {
        if self.is_modal() {
            log::debug!("Ignoring {:?} while a dialog is open", command);
            return;
        }
        match command {
            MenuCommand::Open => {
                let path = self.editor.settings().suggested_path("");
                self.dialog = Some(Dialog::Open { path });
            }
            MenuCommand::Save => match self.editor.save() {
                Err(EditorError::NoSavePath) => self.run_command(ctx, MenuCommand::SaveAs),
                result => self.report(result),
            },
            MenuCommand::SaveAs => {
                let path = self.editor.settings().suggested_path("untitled.png");
                self.dialog = Some(Dialog::SaveAs { path });
            }
            MenuCommand::Exit => ctx.send_viewport_cmd(egui::ViewportCommand::Close),
            MenuCommand::Undo => self.editor.undo(),
            MenuCommand::Redo => self.editor.redo(),
            MenuCommand::Resize => {
                if let Some(size) = self.editor.image_size() {
                    let cap = self.editor.settings().resize_prefill_cap;
                    self.dialog = Some(Dialog::resize(size, cap));
                }
            }
            MenuCommand::Tint => {
                let color = self.editor.settings().tint_color.clone();
                self.dialog = Some(Dialog::Tint { color, error: None });
            }
            MenuCommand::Edit(action) => {
                let result = self.editor.apply(action);
                self.report(result);
            }
        }
    }

    /// Jumps to a history entry picked in the sidebar
    pub fn select_history(&mut self, index: usize) {
        if self.is_modal() {
            return;
        }
        log::info!("History entry selected from UI: {}", index);
        self.editor.select(index);
    }

    /// Acts on a finished dialog
    pub fn finish_dialog(&mut self, outcome: DialogOutcome) {
        let result = match outcome {
            DialogOutcome::Pending => return,
            DialogOutcome::Cancelled => Ok(()),
            DialogOutcome::Open(path) => self.editor.open(&path),
            DialogOutcome::SaveAs(path) => self.editor.save_as(&path),
            DialogOutcome::Resize { width, height } => self.editor.apply(EditAction::Resize { width, height }),
            DialogOutcome::Tint(color) => self.editor.apply(EditAction::Tint(color)),
        };
        self.dialog = None;
        self.report(result);
    }

    fn report(&mut self, result: EditorResult<()>) {
        if let Err(err) = result {
            log::error!("{}", err);
            self.error = Some(err.to_string());
        }
    }

    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        if self.is_modal() {
            return;
        }
        let (undo, redo) = ctx.input_mut(|i| {
            (
                i.consume_key(egui::Modifiers::COMMAND, egui::Key::Z),
                i.consume_key(egui::Modifiers::COMMAND, egui::Key::Y),
            )
        });
        if undo {
            self.editor.undo();
        }
        if redo {
            self.editor.redo();
        }
    }

    fn show_dialog(&mut self, ctx: &egui::Context) {
        let Some(dialog) = self.dialog.as_mut() else {
            return;
        };
        let outcome = dialog.show(ctx);
        self.finish_dialog(outcome);
    }

    fn show_error(&mut self, ctx: &egui::Context) {
        let Some(message) = &self.error else {
            return;
        };
        let mut dismissed = false;
        egui::Window::new("Error")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(message.as_str());
                if ui.button("OK").clicked() {
                    dismissed = true;
                }
            });
        if dismissed {
            self.error = None;
        }
    }
}

impl eframe::App for ImageEditorApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, self.editor.settings());
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_shortcuts(ctx);

        if let Some(command) = panels::menu_bar(ctx, !self.is_modal(), self.editor.has_image()) {
            self.run_command(ctx, command);
        }
        panels::history_panel(self, ctx);
        panels::central_panel(self, ctx);

        self.show_dialog(ctx);
        self.show_error(ctx);
    }
}
