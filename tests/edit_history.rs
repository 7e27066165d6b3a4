use std::cell::RefCell;
use std::rc::Rc;

use image::{DynamicImage, Rgb, RgbImage};
use pymage_editor::EditHistory;

type Delivered = Rc<RefCell<Vec<(String, DynamicImage)>>>;

// Helper to build a small image that is easy to tell apart
fn img(value: u8) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_pixel(3, 2, Rgb([value, value / 2, 255 - value])))
}

// History whose selection callback records every delivery
fn observed_history() -> (EditHistory, Delivered) {
    let delivered: Delivered = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&delivered);
    let history = EditHistory::new(move |label, image| {
        sink.borrow_mut().push((label.to_owned(), image));
    });
    (history, delivered)
}

fn labels(history: &EditHistory) -> Vec<&str> {
    history.entries().iter().map(|s| s.label()).collect()
}

fn assert_cursor_in_bounds(history: &EditHistory) {
    match history.cursor() {
        None => assert!(history.is_empty()),
        Some(cursor) => assert!(cursor < history.len()),
    }
}

#[test]
fn test_scenario_open_rotate_undo() {
    let (mut history, delivered) = observed_history();

    history.reset();
    history.push("Open", &img(0));
    assert_eq!(labels(&history), ["Open"]);
    assert_eq!(history.cursor(), Some(0));

    history.push("Rotate", &img(1));
    assert_eq!(labels(&history), ["Open", "Rotate"]);
    assert_eq!(history.cursor(), Some(1));

    history.step(-1);
    assert_eq!(history.cursor(), Some(0));
    assert_eq!(*delivered.borrow(), vec![("Open".to_owned(), img(0))]);

    history.step(-1);
    assert_eq!(history.cursor(), Some(0));
    assert_eq!(delivered.borrow().len(), 1);
}

#[test]
fn test_push_after_undo_drops_redo_tail() {
    let (mut history, delivered) = observed_history();
    history.push("Open", &img(0));
    history.push("Rotate", &img(1));
    history.step(-1);

    history.push("Grayscale", &img(2));

    assert_eq!(labels(&history), ["Open", "Grayscale"]);
    assert_eq!(history.cursor(), Some(1));
    assert_eq!(history.entries()[1].image(), &img(2));

    // No redo is available any more
    history.step(1);
    assert_eq!(history.cursor(), Some(1));
    assert_eq!(delivered.borrow().len(), 1);
}

#[test]
fn test_push_truncates_to_cursor_plus_one() {
    let mut history = EditHistory::default();
    for value in 0..5 {
        history.push(format!("Edit {}", value), &img(value));
    }
    history.select(1);

    history.push("Sepia", &img(99));

    assert_eq!(history.len(), 3);
    assert_eq!(labels(&history), ["Edit 0", "Edit 1", "Sepia"]);
    assert_eq!(history.current().unwrap().image(), &img(99));
}

#[test]
fn test_redo_walks_forward() {
    let (mut history, delivered) = observed_history();
    history.push("Open", &img(0));
    history.push("Blur", &img(1));
    history.push("Invert", &img(2));
    history.select(0);
    delivered.borrow_mut().clear();

    history.step(1);
    assert_eq!(history.cursor(), Some(1));
    history.step(1);
    assert_eq!(history.cursor(), Some(2));

    assert_eq!(
        *delivered.borrow(),
        vec![("Blur".to_owned(), img(1)), ("Invert".to_owned(), img(2))]
    );
}

#[test]
fn test_step_past_either_end_is_noop() {
    let (mut history, delivered) = observed_history();
    history.push("Open", &img(0));
    history.push("Emboss", &img(1));

    history.step(1);
    history.step(5);
    assert_eq!(history.cursor(), Some(1));

    history.step(-1);
    history.step(-1);
    history.step(-7);
    assert_eq!(history.cursor(), Some(0));

    assert_eq!(history.len(), 2);
    assert_eq!(delivered.borrow().len(), 1);
}

#[test]
fn test_larger_deltas_jump() {
    let (mut history, delivered) = observed_history();
    for value in 0..4 {
        history.push(format!("Edit {}", value), &img(value));
    }

    history.step(-3);
    assert_eq!(history.cursor(), Some(0));
    history.step(2);
    assert_eq!(history.cursor(), Some(2));

    let seen: Vec<String> = delivered.borrow().iter().map(|(label, _)| label.clone()).collect();
    assert_eq!(seen, ["Edit 0", "Edit 2"]);
}

#[test]
fn test_step_on_empty_history() {
    let (mut history, delivered) = observed_history();
    for delta in [-1, 0, 1, isize::MAX, isize::MIN] {
        history.step(delta);
    }
    history.undo();
    history.redo();

    assert!(history.is_empty());
    assert_eq!(history.cursor(), None);
    assert!(delivered.borrow().is_empty());
}

#[test]
fn test_select_by_index() {
    let (mut history, delivered) = observed_history();
    history.push("Open", &img(0));
    history.push("Contour", &img(1));
    history.push("Smooth", &img(2));

    history.select(0);
    assert_eq!(history.cursor(), Some(0));

    history.select(3);
    history.select(usize::MAX);
    assert_eq!(history.cursor(), Some(0));

    assert_eq!(*delivered.borrow(), vec![("Open".to_owned(), img(0))]);
}

#[test]
fn test_reset_clears_everything() {
    let (mut history, delivered) = observed_history();
    history.push("Open", &img(0));
    history.push("Sharpen", &img(1));
    history.undo();

    history.reset();

    assert_eq!(history.len(), 0);
    assert_eq!(history.cursor(), None);
    assert!(history.current().is_none());
    assert_eq!(delivered.borrow().len(), 1);

    history.push("Open", &img(7));
    assert_eq!(history.cursor(), Some(0));
}

#[test]
fn test_pushed_image_is_isolated_from_caller() {
    let mut history = EditHistory::default();
    let mut image = img(10);

    history.push("Open", &image);
    image.invert();

    assert_eq!(history.current().unwrap().image(), &img(10));
}

#[test]
fn test_delivered_image_is_isolated_from_history() {
    let (mut history, delivered) = observed_history();
    history.push("Open", &img(10));
    history.push("Detail", &img(20));

    history.undo();
    delivered.borrow_mut()[0].1.invert();

    assert_eq!(history.entries()[0].image(), &img(10));
    history.redo();
    history.undo();
    assert_eq!(delivered.borrow()[2].1, img(10));
}

#[test]
fn test_labels_may_repeat_or_be_empty() {
    let mut history = EditHistory::default();
    history.push("", &img(0));
    history.push("Blur", &img(1));
    history.push("Blur", &img(2));

    assert_eq!(labels(&history), ["", "Blur", "Blur"]);
    assert_eq!(history.cursor(), Some(2));
}

#[test]
fn test_cursor_stays_in_bounds() {
    let (mut history, _delivered) = observed_history();
    let deltas = [-2, 1, 0, 3, -1, -1, 2, -5, 1];

    for (round, &delta) in deltas.iter().enumerate() {
        if round % 3 == 0 {
            history.push(format!("Edit {}", round), &img(round as u8));
        }
        history.step(delta);
        assert_cursor_in_bounds(&history);
        if round == 6 {
            history.reset();
            assert_cursor_in_bounds(&history);
        }
    }
}
