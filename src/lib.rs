#![warn(clippy::all, rust_2018_idioms)]

pub mod action;
pub mod app;
pub mod canvas;
pub mod dialogs;
pub mod editor;
pub mod error;
pub mod history;
pub mod operations;
pub mod panels;
pub mod settings;

pub use action::EditAction;
pub use app::ImageEditorApp;
pub use editor::{Editor, LiveImage, SharedImage};
pub use error::{EditorError, EditorResult};
pub use history::{EditHistory, SelectionCallback, Snapshot};
pub use operations::FilterKind;
pub use settings::EditorSettings;
