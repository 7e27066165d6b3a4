use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use image::DynamicImage;

use crate::action::EditAction;
use crate::error::{EditorError, EditorResult};
use crate::history::EditHistory;
use crate::operations;
use crate::settings::EditorSettings;

/// The image currently on display.
///
/// `revision` increases every time the image is replaced, so views can
/// tell when they need to redraw.
#[derive(Debug, Default)]
pub struct LiveImage {
    image: Option<DynamicImage>,
    label: String,
    revision: u64,
}

impl LiveImage {
    pub fn image(&self) -> Option<&DynamicImage> {
        self.image.as_ref()
    }

    /// Label of the action that produced the displayed image
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub(crate) fn replace(&mut self, label: &str, image: DynamicImage) {
        self.image = Some(image);
        self.label = label.to_owned();
        self.revision += 1;
    }
}

/// Live image shared between the editor and the history listener
pub type SharedImage = Rc<RefCell<LiveImage>>;

/// Connects the image operations, the edit history and the displayed image.
///
/// Every successful edit replaces the live image and is recorded in the
/// history. Failed actions return an error and leave both untouched.
/// Undo, redo and history selection go through the history, whose listener
/// swaps the live image for the snapshot's copy.
pub struct Editor {
    live: SharedImage,
    history: EditHistory,
    current_path: Option<PathBuf>,
    settings: EditorSettings,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(EditorSettings::default())
    }
}

impl Editor {
    pub fn new(settings: EditorSettings) -> Self {
        let live = SharedImage::default();
        let listener = Rc::clone(&live);
        let history = EditHistory::new(move |label, image| {
            listener.borrow_mut().replace(label, image);
        });

        Self {
            live,
            history,
            current_path: None,
            settings,
        }
    }

    /// Loads `path` and starts a fresh history with it
    pub fn open(&mut self, path: impl AsRef<Path>) -> EditorResult<()> {
        let path = path.as_ref();
        let image = operations::open(path)?;

        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let label = format!("Open: {}", file_name);

        self.history.reset();
        self.history.push(label.as_str(), &image);
        self.live.borrow_mut().replace(&label, image);
        self.current_path = Some(path.to_path_buf());
        self.settings.remember_directory(path);
        Ok(())
    }

    /// Writes the live image back to the path it was opened from or last saved to
    pub fn save(&self) -> EditorResult<()> {
        let path = self.current_path.clone().ok_or(EditorError::NoSavePath)?;
        self.write_to(&path)
    }

    pub fn save_as(&mut self, path: impl AsRef<Path>) -> EditorResult<()> {
        let path = path.as_ref();
        self.write_to(path)?;
        self.current_path = Some(path.to_path_buf());
        self.settings.remember_directory(path);
        Ok(())
    }

    fn write_to(&self, path: &Path) -> EditorResult<()> {
        let live = self.live.borrow();
        let image = live.image().ok_or(EditorError::NoImage)?;
        operations::save(image, path, self.settings.jpeg_quality)
    }

    /// Applies `action` to the live image and records the result
    pub fn apply(&mut self, action: EditAction) -> EditorResult<()> {
        let edited = {
            let live = self.live.borrow();
            let image = live.image().ok_or(EditorError::NoImage)?;
            action.apply(image, &self.settings)?
        };

        let label = action.label();
        log::info!("Applied {}", label);
        self.history.push(label.as_str(), &edited);
        self.live.borrow_mut().replace(&label, edited);
        Ok(())
    }

    pub fn undo(&mut self) {
        self.history.undo();
    }

    pub fn redo(&mut self) {
        self.history.redo();
    }

    /// Jumps to a history entry, ignoring out-of-range indices
    pub fn select(&mut self, index: usize) {
        self.history.select(index);
    }

    pub fn history(&self) -> &EditHistory {
        &self.history
    }

    pub fn live(&self) -> &SharedImage {
        &self.live
    }

    pub fn has_image(&self) -> bool {
        self.live.borrow().image().is_some()
    }

    /// Dimensions of the live image
    pub fn image_size(&self) -> Option<(u32, u32)> {
        self.live
            .borrow()
            .image()
            .map(|image| (image.width(), image.height()))
    }

    pub fn current_path(&self) -> Option<&Path> {
        self.current_path.as_deref()
    }

    pub fn settings(&self) -> &EditorSettings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut EditorSettings {
        &mut self.settings
    }
}
