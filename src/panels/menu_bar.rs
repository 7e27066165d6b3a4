use crate::action::EditAction;
use crate::operations::FilterKind;

/// A request coming from the menu bar or a keyboard shortcut
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MenuCommand {
    Open,
    Save,
    SaveAs,
    Exit,
    Undo,
    Redo,
    Resize,
    Tint,
    Edit(EditAction),
}

fn item(ui: &mut egui::Ui, enabled: bool, text: &str) -> bool {
    let clicked = ui.add_enabled(enabled, egui::Button::new(text)).clicked();
    if clicked {
        ui.close_menu();
    }
    clicked
}

/// Draws the menu bar and returns the command picked this frame, if any.
/// The whole bar is greyed out unless `enabled`.
pub fn menu_bar(ctx: &egui::Context, enabled: bool, has_image: bool) -> Option<MenuCommand> {
    let mut command = None;

    egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
        ui.add_enabled_ui(enabled, |ui| egui::menu::bar(ui, |ui| {
            ui.menu_button("File", |ui| {
                if item(ui, true, "Open image...") {
                    command = Some(MenuCommand::Open);
                }
                if item(ui, has_image, "Save image") {
                    command = Some(MenuCommand::Save);
                }
                if item(ui, has_image, "Save image as...") {
                    command = Some(MenuCommand::SaveAs);
                }
                ui.separator();
                if item(ui, true, "Exit") {
                    command = Some(MenuCommand::Exit);
                }
            });

            ui.menu_button("Edit", |ui| {
                // Undo/redo past either end is a silent no-op, so these stay enabled
                if item(ui, true, "Undo") {
                    command = Some(MenuCommand::Undo);
                }
                if item(ui, true, "Redo") {
                    command = Some(MenuCommand::Redo);
                }
                ui.separator();
                if item(ui, has_image, "Rotate") {
                    command = Some(MenuCommand::Edit(EditAction::Rotate));
                }
                if item(ui, has_image, "Resize...") {
                    command = Some(MenuCommand::Resize);
                }
                if item(ui, has_image, "Flip") {
                    command = Some(MenuCommand::Edit(EditAction::FlipVertical));
                }
                if item(ui, has_image, "Mirror") {
                    command = Some(MenuCommand::Edit(EditAction::FlipHorizontal));
                }
            });

            ui.menu_button("Effects", |ui| {
                for kind in FilterKind::ALL {
                    if item(ui, has_image, kind.title()) {
                        command = Some(MenuCommand::Edit(EditAction::Filter(kind)));
                    }
                }
            });

            ui.menu_button("Filters", |ui| {
                if item(ui, has_image, "Grayscale") {
                    command = Some(MenuCommand::Edit(EditAction::Grayscale));
                }
                if item(ui, has_image, "Invert") {
                    command = Some(MenuCommand::Edit(EditAction::Invert));
                }
                if item(ui, has_image, "Sepia") {
                    command = Some(MenuCommand::Edit(EditAction::Sepia));
                }
                if item(ui, has_image, "Tint...") {
                    command = Some(MenuCommand::Tint);
                }
            });
        }));
    });

    command
}
