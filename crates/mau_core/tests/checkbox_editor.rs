use mau_core::editor::layout::{MonospaceLayout, Point};
use mau_core::editor::sentinel::checklist_progress;
use mau_core::editor::style::TextStyle;
use mau_core::{Affordance, CheckboxEditor, PressOutcome};

#[test]
fn press_on_sentinel_toggles_without_moving_caret() {
    let mut editor = CheckboxEditor::from_text("☐ write tests\n☐ ship");
    editor.set_caret(5);
    let before = editor.revision();

    let outcome = editor.press(0);
    assert_eq!(
        outcome,
        PressOutcome::Toggled {
            offset: 0,
            glyph: '☑'
        }
    );
    assert!(outcome.consumed());
    assert_eq!(editor.text(), "☑ write tests\n☐ ship");
    assert_eq!(editor.selection().caret, 5);
    assert!(editor.revision() > before);
}

#[test]
fn press_just_right_of_sentinel_toggles_it() {
    let mut editor = CheckboxEditor::from_text("☐ a");
    assert!(editor.press(1).consumed());
    assert_eq!(editor.text(), "☑ a");
}

#[test]
fn toggling_twice_restores_the_line() {
    let original = "  ☐ indented task\nplain";
    let mut editor = CheckboxEditor::from_text(original);

    assert!(editor.press(2).consumed());
    assert_eq!(editor.text(), "  ☑ indented task\nplain");
    assert!(editor.press(2).consumed());
    assert_eq!(editor.text(), original);
}

#[test]
fn sentinel_inside_a_line_is_plain_text() {
    let mut editor = CheckboxEditor::from_text("see ☐ here");
    let before = editor.revision();

    let outcome = editor.press(4);
    assert_eq!(outcome, PressOutcome::Caret { offset: 4 });
    assert_eq!(editor.text(), "see ☐ here");
    assert_eq!(editor.revision(), before);
    assert_eq!(editor.affordance_at(4), Affordance::Text);
}

#[test]
fn hover_and_click_go_through_the_layout() {
    let mut editor = CheckboxEditor::from_text("title\n☐ task");
    let layout = MonospaceLayout::new(10.0, 20.0);

    let over_box = layout.cell_origin(1, 0);
    let over_box = Point::new(over_box.x + 2.0, over_box.y + 5.0);
    assert_eq!(editor.hover(&layout, over_box), Affordance::Pointer);
    assert_eq!(editor.hover(&layout, Point::new(42.0, 5.0)), Affordance::Text);

    assert!(editor.click(&layout, over_box).consumed());
    assert_eq!(editor.text(), "title\n☑ task");
}

#[test]
fn add_checkboxes_prefixes_selected_lines_once() {
    let mut editor = CheckboxEditor::from_text("milk\n☑ bread\neggs\ntail");
    // Select from "milk" through the start of "tail".
    let end = editor.line_start(3);
    editor.select(0, end);

    assert_eq!(editor.add_checkboxes(), 2);
    assert_eq!(editor.text(), "☐ milk\n☑ bread\n☐ eggs\ntail");

    assert!(editor.undo());
    assert_eq!(editor.text(), "milk\n☑ bread\neggs\ntail");
    assert!(editor.redo());
    assert_eq!(editor.text(), "☐ milk\n☑ bread\n☐ eggs\ntail");
}

#[test]
fn add_checkboxes_without_selection_uses_caret_line() {
    let mut editor = CheckboxEditor::from_text("one\ntwo");
    editor.set_caret(5);

    assert_eq!(editor.add_checkboxes(), 1);
    assert_eq!(editor.text(), "one\n☐ two");
    assert_eq!(editor.add_checkboxes(), 0);
}

#[test]
fn insert_task_breaks_the_line_when_needed() {
    let mut editor = CheckboxEditor::from_text("abc");
    editor.set_caret(3);
    editor.insert_task_at_caret();
    assert_eq!(editor.text(), "abc\n☐ ");
    assert_eq!(editor.selection().caret, editor.len_chars());

    let mut fresh = CheckboxEditor::new();
    fresh.insert_task_at_caret();
    assert_eq!(fresh.text(), "☐ ");
}

#[test]
fn clear_formatting_keeps_text_and_drops_styles() {
    let mut editor = CheckboxEditor::from_text("bold\nred");
    editor.apply_style(
        0..4,
        TextStyle {
            bold: true,
            ..TextStyle::default()
        },
    );
    editor.apply_style(
        5..8,
        TextStyle {
            color: Some("#ff0000".to_string()),
            ..TextStyle::default()
        },
    );
    assert!(editor.style_at(1).bold);

    editor.select(0, 2);
    editor.clear_formatting();
    assert!(!editor.style_at(1).bold);
    assert!(editor.style_at(3).bold);

    editor.set_caret(0);
    editor.clear_formatting();
    assert!(editor.spans().is_empty());
    assert_eq!(editor.text(), "bold\nred");

    assert!(editor.undo());
    assert!(editor.style_at(6).color.is_some());
}

#[test]
fn undo_restores_exact_previous_text() {
    let mut editor = CheckboxEditor::from_text("☐ a\n☐ b");
    editor.press(4);
    editor.set_caret(editor.len_chars());
    editor.insert_text("!");
    assert_eq!(editor.text(), "☐ a\n☑ b!");

    assert!(editor.undo());
    assert_eq!(editor.text(), "☐ a\n☑ b");
    assert!(editor.undo());
    assert_eq!(editor.text(), "☐ a\n☐ b");
    assert!(!editor.undo());
    assert!(editor.can_redo());
}

#[test]
fn checklist_progress_counts_leading_sentinels() {
    let progress = checklist_progress("☐ a\n☑ b\n  ☑ c\nnot ☐ counted");
    assert_eq!(progress.done, 2);
    assert_eq!(progress.total, 3);
}

#[test]
fn ideographic_indent_is_treated_like_spaces() {
    let mut editor = CheckboxEditor::from_text("\u{3000}☐ x");

    assert_eq!(editor.add_checkboxes(), 0);
    assert_eq!(editor.affordance_at(1), Affordance::Pointer);
    assert!(editor.press(1).consumed());
    assert_eq!(editor.text(), "\u{3000}☑ x");
}
