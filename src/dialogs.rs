use std::path::PathBuf;

use image::Rgb;

use crate::operations;

const INVALID_SIZE: &str = "Width and height must be positive integers.";

/// What a dialog produced this frame
#[derive(Debug, Clone, PartialEq)]
pub enum DialogOutcome {
    Pending,
    Cancelled,
    Open(PathBuf),
    SaveAs(PathBuf),
    Resize { width: u32, height: u32 },
    Tint(Rgb<u8>),
}

/// Modal input dialogs. Input is validated here and never reaches the
/// editor until it is well formed.
#[derive(Debug, Clone, PartialEq)]
pub enum Dialog {
    Open { path: String },
    SaveAs { path: String },
    Resize { width: String, height: String, error: Option<String> },
    Tint { color: String, error: Option<String> },
}

impl Dialog {
    /// Resize dialog pre-filled with the current size, capped at `cap`
    pub fn resize(current: (u32, u32), cap: u32) -> Self {
        Dialog::Resize {
            width: current.0.min(cap).to_string(),
            height: current.1.min(cap).to_string(),
            error: None,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Dialog::Open { .. } => "Open Image",
            Dialog::SaveAs { .. } => "Save Image As...",
            Dialog::Resize { .. } => "Resize Image",
            Dialog::Tint { .. } => "Tint",
        }
    }

    /// Validates the current input, storing a message on failure
    pub fn submit(&mut self) -> DialogOutcome {
        match self {
            Dialog::Open { path } => non_empty_path(path).map_or(DialogOutcome::Pending, DialogOutcome::Open),
            Dialog::SaveAs { path } => non_empty_path(path).map_or(DialogOutcome::Pending, DialogOutcome::SaveAs),
            Dialog::Resize { width, height, error } => match parse_dimensions(width, height) {
                Some((width, height)) => DialogOutcome::Resize { width, height },
                None => {
                    *error = Some(INVALID_SIZE.to_owned());
                    DialogOutcome::Pending
                }
            },
            Dialog::Tint { color, error } => match operations::parse_color(color) {
                Ok(rgb) => DialogOutcome::Tint(rgb),
                Err(err) => {
                    *error = Some(err.to_string());
                    DialogOutcome::Pending
                }
            },
        }
    }

    pub fn show(&mut self, ctx: &egui::Context) -> DialogOutcome {
        let mut outcome = DialogOutcome::Pending;
        egui::Window::new(self.title())
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                match self {
                    Dialog::Open { path } | Dialog::SaveAs { path } => {
                        ui.horizontal(|ui| {
                            ui.label("Path:");
                            ui.text_edit_singleline(path);
                        });
                        ui.weak("Image files: png, jpg, jpeg, gif, bmp");
                    }
                    Dialog::Resize { width, height, error } => {
                        egui::Grid::new("resize_dialog_grid").num_columns(2).show(ui, |ui| {
                            ui.label("Width (px):");
                            ui.text_edit_singleline(width);
                            ui.end_row();
                            ui.label("Height (px):");
                            ui.text_edit_singleline(height);
                            ui.end_row();
                        });
                        if let Some(message) = error {
                            ui.colored_label(egui::Color32::LIGHT_RED, message.as_str());
                        }
                    }
                    Dialog::Tint { color, error } => {
                        ui.horizontal(|ui| {
                            ui.label("Color:");
                            ui.text_edit_singleline(color);
                        });
                        ui.weak("A color name or #rrggbb");
                        if let Some(message) = error {
                            ui.colored_label(egui::Color32::LIGHT_RED, message.as_str());
                        }
                    }
                }

                ui.separator();
                ui.horizontal(|ui| {
                    let enter = ui.input(|i| i.key_pressed(egui::Key::Enter));
                    if ui.button("OK").clicked() || enter {
                        outcome = self.submit();
                    }
                    if ui.button("Cancel").clicked() || ui.input(|i| i.key_pressed(egui::Key::Escape)) {
                        outcome = DialogOutcome::Cancelled;
                    }
                });
            });
        outcome
    }
}

fn non_empty_path(path: &str) -> Option<PathBuf> {
    let trimmed = path.trim();
    (!trimmed.is_empty()).then(|| PathBuf::from(trimmed))
}

/// Parses a width/height pair; both must be positive integers
pub fn parse_dimensions(width: &str, height: &str) -> Option<(u32, u32)> {
    let width: u32 = width.trim().parse().ok()?;
    let height: u32 = height.trim().parse().ok()?;
    (width > 0 && height > 0).then_some((width, height))
}
