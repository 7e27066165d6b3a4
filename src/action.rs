use image::{DynamicImage, Rgb};

use crate::error::EditorResult;
use crate::operations::{self, FilterKind};
use crate::settings::EditorSettings;

/// An edit that produces a new history entry
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EditAction {
    Rotate,
    Resize { width: u32, height: u32 },
    FlipVertical,
    FlipHorizontal,
    Filter(FilterKind),
    Grayscale,
    Invert,
    Sepia,
    Tint(Rgb<u8>),
}

impl EditAction {
    /// Label shown in the history list
    pub fn label(&self) -> String {
        match self {
            EditAction::Rotate => "Rotate".to_owned(),
            EditAction::Resize { width, height } => format!("Resize {}x{}", width, height),
            EditAction::FlipVertical => "Vertical Flip".to_owned(),
            EditAction::FlipHorizontal => "Horizontal Flip".to_owned(),
            EditAction::Filter(kind) => kind.title().to_owned(),
            EditAction::Grayscale => "Grayscale".to_owned(),
            EditAction::Invert => "Invert".to_owned(),
            EditAction::Sepia => "Sepia".to_owned(),
            EditAction::Tint(_) => "Tint".to_owned(),
        }
    }

    /// Runs the edit on `image`, returning the edited copy
    pub fn apply(&self, image: &DynamicImage, settings: &EditorSettings) -> EditorResult<DynamicImage> {
        let edited = match *self {
            EditAction::Rotate => operations::rotate90(image),
            EditAction::Resize { width, height } => operations::resize(image, width, height)?,
            EditAction::FlipVertical => operations::flip_vertical(image),
            EditAction::FlipHorizontal => operations::flip_horizontal(image),
            EditAction::Filter(kind) => operations::filter(image, kind),
            EditAction::Grayscale => operations::grayscale(image),
            EditAction::Invert => operations::invert(image),
            EditAction::Sepia => operations::sepia(image),
            EditAction::Tint(color) => operations::tint(image, color, settings.tint_strength),
        };
        Ok(edited)
    }
}
