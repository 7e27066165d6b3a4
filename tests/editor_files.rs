use image::{DynamicImage, GenericImageView, Rgba, RgbaImage};
use pymage_editor::{EditAction, Editor, EditorError, FilterKind};
use tempfile::TempDir;

// Writes a small test picture into `dir` and returns its path
fn write_sample(dir: &TempDir, name: &str) -> std::path::PathBuf {
    let image = RgbaImage::from_fn(6, 4, |x, y| Rgba([(x * 40) as u8, (y * 60) as u8, 128, 255]));
    let path = dir.path().join(name);
    DynamicImage::ImageRgba8(image).save(&path).unwrap();
    path
}

#[test]
fn test_open_starts_fresh_history() {
    let dir = TempDir::new().unwrap();
    let first = write_sample(&dir, "first.png");
    let second = write_sample(&dir, "second.png");
    let mut editor = Editor::default();

    editor.open(&first).unwrap();
    editor.apply(EditAction::Rotate).unwrap();
    editor.apply(EditAction::Grayscale).unwrap();
    assert_eq!(editor.history().len(), 3);

    editor.open(&second).unwrap();

    assert_eq!(editor.history().len(), 1);
    assert_eq!(editor.history().cursor(), Some(0));
    assert_eq!(editor.history().entries()[0].label(), "Open: second.png");
    assert_eq!(editor.current_path(), Some(second.as_path()));
    assert_eq!(editor.image_size(), Some((6, 4)));
}

#[test]
fn test_open_missing_file_keeps_history() {
    let dir = TempDir::new().unwrap();
    let path = write_sample(&dir, "photo.png");
    let mut editor = Editor::default();
    editor.open(&path).unwrap();
    editor.apply(EditAction::Invert).unwrap();

    let result = editor.open(dir.path().join("nope.png"));

    assert!(matches!(result, Err(EditorError::NotFound(_))));
    assert_eq!(editor.history().len(), 2);
    assert_eq!(editor.live().borrow().label(), "Invert");
}

#[test]
fn test_open_garbage_is_decode_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.png");
    std::fs::write(&path, b"definitely not a png").unwrap();
    let mut editor = Editor::default();

    assert!(matches!(editor.open(&path), Err(EditorError::Decode(_))));
    assert!(editor.history().is_empty());
    assert!(!editor.has_image());
}

#[test]
fn test_save_writes_current_image() {
    let dir = TempDir::new().unwrap();
    let path = write_sample(&dir, "photo.png");
    let mut editor = Editor::default();
    editor.open(&path).unwrap();
    editor.apply(EditAction::Rotate).unwrap();

    editor.save().unwrap();

    let saved = image::open(&path).unwrap();
    assert_eq!(saved.dimensions(), (4, 6));
}

#[test]
fn test_save_as_jpeg_and_remember_path() {
    let dir = TempDir::new().unwrap();
    let source = write_sample(&dir, "photo.png");
    let target = dir.path().join("export.JPG");
    let mut editor = Editor::default();
    editor.open(&source).unwrap();

    editor.save_as(&target).unwrap();

    assert_eq!(editor.current_path(), Some(target.as_path()));
    let saved = image::open(&target).unwrap();
    assert_eq!(saved.dimensions(), (6, 4));
    assert!(!saved.color().has_alpha());
    // Saving never changes the history
    assert_eq!(editor.history().len(), 1);
}

#[test]
fn test_save_to_unknown_format_fails() {
    let dir = TempDir::new().unwrap();
    let source = write_sample(&dir, "photo.png");
    let mut editor = Editor::default();
    editor.open(&source).unwrap();

    let result = editor.save_as(dir.path().join("photo.unknownext"));

    assert!(matches!(result, Err(EditorError::Encode { .. })));
    assert_eq!(editor.current_path(), Some(source.as_path()));
}

#[test]
fn test_save_without_image() {
    let dir = TempDir::new().unwrap();
    let mut editor = Editor::default();
    assert!(matches!(
        editor.save_as(dir.path().join("empty.png")),
        Err(EditorError::NoImage)
    ));
}

#[test]
fn test_edit_undo_redo_roundtrip() {
    let dir = TempDir::new().unwrap();
    let path = write_sample(&dir, "photo.png");
    let mut editor = Editor::default();
    editor.open(&path).unwrap();
    let original = editor.live().borrow().image().cloned().unwrap();

    editor.apply(EditAction::Filter(FilterKind::Sharpen)).unwrap();
    editor.apply(EditAction::Resize { width: 3, height: 2 }).unwrap();
    let resized = editor.live().borrow().image().cloned().unwrap();

    editor.undo();
    editor.undo();
    assert_eq!(editor.live().borrow().image(), Some(&original));
    editor.undo();
    assert_eq!(editor.history().cursor(), Some(0));

    editor.select(2);
    assert_eq!(editor.live().borrow().image(), Some(&resized));
    assert_eq!(editor.live().borrow().label(), "Resize 3x2");
}

#[test]
fn test_new_edit_after_undo_discards_redo() {
    let dir = TempDir::new().unwrap();
    let path = write_sample(&dir, "photo.png");
    let mut editor = Editor::default();
    editor.open(&path).unwrap();
    editor.apply(EditAction::Rotate).unwrap();
    editor.undo();

    editor.apply(EditAction::Sepia).unwrap();

    let labels: Vec<&str> = editor.history().entries().iter().map(|s| s.label()).collect();
    assert_eq!(labels, ["Open: photo.png", "Sepia"]);
    editor.redo();
    assert_eq!(editor.history().cursor(), Some(1));
    assert_eq!(editor.live().borrow().label(), "Sepia");
}
