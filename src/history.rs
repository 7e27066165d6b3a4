use image::DynamicImage;

/// Listener invoked with a fresh copy of the snapshot the cursor moved to.
pub type SelectionCallback = Box<dyn FnMut(&str, DynamicImage)>;

/// A labelled image state recorded at one edit point
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    label: String,
    image: DynamicImage,
}

impl Snapshot {
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn image(&self) -> &DynamicImage {
        &self.image
    }
}

/// Linear undo/redo log of image snapshots.
///
/// The history owns its own copy of every image it records and hands out
/// copies on navigation, so nothing the caller does to an image afterwards
/// can reach into the archive.
///
/// The cursor is `None` while the history is empty and otherwise always
/// indexes the snapshot currently on display. Recording a new edit while
/// the cursor sits before the tail permanently drops the redo tail.
///
/// Navigation never fails: requests that would move the cursor out of range
/// are ignored, and the selection callback only fires when the cursor
/// actually lands on a snapshot.
pub struct EditHistory {
    /// Snapshots in chronological edit order
    entries: Vec<Snapshot>,
    /// Index of the displayed snapshot
    cursor: Option<usize>,
    on_select: Option<SelectionCallback>,
}

impl Default for EditHistory {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            cursor: None,
            on_select: None,
        }
    }
}

impl std::fmt::Debug for EditHistory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditHistory")
            .field("entries", &self.entries.len())
            .field("cursor", &self.cursor)
            .field("on_select", &self.on_select.as_ref().map(|_| "<callback>"))
            .finish()
    }
}

impl EditHistory {
    /// Creates an empty history that reports navigation to `on_select`
    pub fn new(on_select: impl FnMut(&str, DynamicImage) + 'static) -> Self {
        Self {
            on_select: Some(Box::new(on_select)),
            ..Self::default()
        }
    }

    /// Drops every snapshot. The selection callback is not invoked.
    pub fn reset(&mut self) {
        self.entries.clear();
        self.cursor = None;
    }

    /// Records a new edit after the cursor, discarding any redo tail.
    pub fn push(&mut self, label: impl Into<String>, image: &DynamicImage) {
        let keep = self.cursor.map_or(0, |cursor| cursor + 1);
        if keep < self.entries.len() {
            log::debug!("Discarding {} redo entries", self.entries.len() - keep);
            self.entries.truncate(keep);
        }

        let label = label.into();
        log::debug!("History push #{}: {}", self.entries.len(), label);
        self.entries.push(Snapshot {
            label,
            image: image.clone(),
        });
        self.cursor = Some(self.entries.len() - 1);
    }

    /// Moves the cursor by `delta`; out-of-range moves are ignored.
    pub fn step(&mut self, delta: isize) {
        let Some(cursor) = self.cursor else {
            return;
        };
        let target = cursor
            .checked_add_signed(delta)
            .filter(|&index| index < self.entries.len());
        if let Some(index) = target {
            self.activate(index);
        }
    }

    /// Jumps straight to `index`, as a click in the history list does.
    pub fn select(&mut self, index: usize) {
        if index < self.entries.len() {
            self.activate(index);
        }
    }

    pub fn undo(&mut self) {
        self.step(-1);
    }

    pub fn redo(&mut self) {
        self.step(1);
    }

    fn activate(&mut self, index: usize) {
        self.cursor = Some(index);
        let snapshot = &self.entries[index];
        log::debug!("History moved to #{}: {}", index, snapshot.label);
        if let Some(on_select) = self.on_select.as_mut() {
            on_select(&snapshot.label, snapshot.image.clone());
        }
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[Snapshot] {
        &self.entries
    }

    /// The snapshot under the cursor
    pub fn current(&self) -> Option<&Snapshot> {
        self.cursor.map(|cursor| &self.entries[cursor])
    }

    pub fn can_undo(&self) -> bool {
        self.cursor.is_some_and(|cursor| cursor > 0)
    }

    pub fn can_redo(&self) -> bool {
        self.cursor.is_some_and(|cursor| cursor + 1 < self.entries.len())
    }
}
