//! Tests for the selection controller.

use super::*;
use crate::view::surface::{DrawOp, RecordingSurface};

fn controller(lines: &[&str], query: &str, rows: u16, cols: u16) -> Controller {
    controller_with(lines, query, rows, cols, ControllerOptions::default())
}

fn controller_with(
    lines: &[&str],
    query: &str,
    rows: u16,
    cols: u16,
    options: ControllerOptions,
) -> Controller {
    let store = LineStore::from_lines(lines.iter().copied());
    let mut controller = Controller::new(store, SubstringMatcher, query, options);
    controller.setup(SurfaceSize::new(rows, cols));
    controller
}

fn type_text(controller: &mut Controller, text: &str) {
    for c in text.chars() {
        assert_eq!(controller.process_input(KeyAction::Insert(c)), None);
    }
}

fn visible_lines(controller: &Controller) -> Vec<usize> {
    controller.window().iter().map(|m| m.line_index).collect()
}

fn rendered(controller: &Controller) -> RecordingSurface {
    let size = controller.size();
    let mut surface = RecordingSurface::new(size.rows, size.cols);
    controller.render(&mut surface).unwrap();
    surface
}

// ===== Matching =====

#[test]
fn setup_matches_initial_query() {
    let c = controller(&["one", "two", "three"], "t", 10, 40);
    assert_eq!(visible_lines(&c), vec![1, 2]);
    assert_eq!(c.highlight(), Some(0));
}

#[test]
fn window_is_bounded_by_screen_height() {
    let lines: Vec<String> = (0..20).map(|i| format!("line {i}")).collect();
    let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
    let c = controller(&refs, "", 5, 40);
    assert_eq!(visible_lines(&c), vec![0, 1, 2]);
}

#[test]
fn tiny_screen_has_empty_window() {
    let c = controller(&["a", "b"], "", 2, 40);
    assert!(c.window().is_empty());
    assert_eq!(c.highlight(), None);

    let c = controller(&["a", "b"], "", 1, 40);
    assert!(c.window().is_empty());
}

#[test]
fn typing_refines_matches() {
    let mut c = controller(&["apple", "banana", "cherry"], "", 10, 40);
    type_text(&mut c, "an");
    assert_eq!(c.query(), "an");
    assert_eq!(visible_lines(&c), vec![1]);
}

#[test]
fn control_characters_are_not_inserted() {
    let mut c = controller(&["a"], "", 10, 40);
    c.process_input(KeyAction::Insert('\u{1}'));
    assert_eq!(c.query(), "");
}

#[test]
fn delete_char_removes_last_character() {
    let mut c = controller(&["apple", "banana"], "ban", 10, 40);
    c.process_input(KeyAction::DeleteChar);
    assert_eq!(c.query(), "ba");
    assert_eq!(visible_lines(&c), vec![1]);
}

#[test]
fn delete_char_on_empty_query_is_noop() {
    let mut c = controller(&["a"], "", 10, 40);
    assert_eq!(c.process_input(KeyAction::DeleteChar), None);
    assert_eq!(c.query(), "");
}

#[test]
fn delete_word_drops_last_term() {
    let mut c = controller(&["foo bar", "foo"], "foo bar", 10, 40);
    assert_eq!(visible_lines(&c), vec![0]);
    c.process_input(KeyAction::DeleteWord);
    assert_eq!(c.query(), "foo ");
    assert_eq!(visible_lines(&c), vec![0, 1]);
}

#[test]
fn rematch_resets_highlight_to_first_candidate() {
    let mut c = controller(&["ab", "ac", "ad"], "a", 10, 40);
    c.process_input(KeyAction::NextCandidate);
    c.process_input(KeyAction::NextCandidate);
    assert_eq!(c.highlight(), Some(2));

    type_text(&mut c, "c");
    assert_eq!(c.highlight(), Some(0));
}

#[test]
fn no_matches_clears_highlight() {
    let mut c = controller(&["abc"], "", 10, 40);
    type_text(&mut c, "zzz");
    assert!(c.window().is_empty());
    assert_eq!(c.highlight(), None);
}

#[test]
fn resize_recomputes_window() {
    let mut c = controller(&["a1", "a2", "a3", "a4"], "a", 4, 40);
    assert_eq!(visible_lines(&c), vec![0, 1]);
    c.resize(SurfaceSize::new(10, 40));
    assert_eq!(visible_lines(&c), vec![0, 1, 2, 3]);
}

// ===== Navigation =====

#[test]
fn next_candidate_wraps_to_first() {
    let mut c = controller(&["a", "b", "c"], "", 10, 40);
    c.process_input(KeyAction::NextCandidate);
    assert_eq!(c.highlight(), Some(1));
    c.process_input(KeyAction::NextCandidate);
    c.process_input(KeyAction::NextCandidate);
    assert_eq!(c.highlight(), Some(0));
}

#[test]
fn prev_candidate_wraps_to_last() {
    let mut c = controller(&["a", "b", "c"], "", 10, 40);
    c.process_input(KeyAction::PrevCandidate);
    assert_eq!(c.highlight(), Some(2));
    c.process_input(KeyAction::PrevCandidate);
    assert_eq!(c.highlight(), Some(1));
}

#[test]
fn navigation_on_empty_window_is_noop() {
    let mut c = controller(&["a"], "zzz", 10, 40);
    c.process_input(KeyAction::NextCandidate);
    c.process_input(KeyAction::PrevCandidate);
    assert_eq!(c.highlight(), None);
}

// ===== Actions =====

#[test]
fn enter_selects_highlighted_line() {
    let mut c = controller(&["one", "two", "three"], "t", 10, 40);
    c.process_input(KeyAction::NextCandidate);
    let selection = c.process_input(KeyAction::Finish(ActionName::Enter));
    assert_eq!(selection, Some(Selection::new(Action::ENTER, "three")));
}

#[test]
fn enter_without_matches_returns_query() {
    let mut c = controller(&["one"], "xyz", 10, 40);
    let selection = c.process_input(KeyAction::Finish(ActionName::Enter));
    assert_eq!(selection, Some(Selection::new(Action::ENTER, "xyz")));
}

#[test]
fn abort_actions_carry_their_names() {
    for (name, action) in [
        (ActionName::Esc, Action::ESC),
        (ActionName::CtrlC, Action::CTRL_C),
        (ActionName::CtrlG, Action::CTRL_G),
    ] {
        let mut c = controller(&["one"], "", 10, 40);
        let selection = c.process_input(KeyAction::Finish(name)).unwrap();
        assert_eq!(selection.action, action);
        assert!(selection.is_abort());
        assert_eq!(selection.text, "one");
    }
}

#[test]
fn tab_is_ignored_unless_enabled() {
    let mut c = controller(&["one"], "", 10, 40);
    assert_eq!(c.process_input(KeyAction::Finish(ActionName::Tab)), None);
    assert_eq!(c.query(), "");
}

#[test]
fn tab_finishes_when_enabled() {
    let options = ControllerOptions {
        tab_exits: true,
        ..ControllerOptions::default()
    };
    let mut c = controller_with(&["one"], "", 10, 40, options);
    let selection = c.process_input(KeyAction::Finish(ActionName::Tab));
    assert_eq!(selection, Some(Selection::new(Action::TAB, "one")));
}

// ===== Status =====

#[test]
fn status_counts_visible_and_total_lines() {
    let c = controller(&["a1", "a2", "b"], "a", 10, 40);
    assert_eq!(c.status_text(), "2 of 3 lines ");
    assert_eq!(c.matched_total(), None);
}

#[test]
fn extended_status_counts_all_matches() {
    let lines: Vec<String> = (0..1500).map(|i| format!("line {i}")).collect();
    let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
    let options = ControllerOptions {
        extended_status: true,
        ..ControllerOptions::default()
    };
    let c = controller_with(&refs, "line", 5, 60, options);
    assert_eq!(c.matched_total(), Some(1500));
    assert_eq!(c.status_text(), "3 of 1,500 matches among 1,500 lines ");
}

#[test]
fn format_count_inserts_separators() {
    assert_eq!(format_count(0), "0");
    assert_eq!(format_count(999), "999");
    assert_eq!(format_count(1000), "1,000");
    assert_eq!(format_count(1234567), "1,234,567");
}

// ===== Rendering =====

#[test]
fn render_draws_query_status_and_matches() {
    let c = controller(&["one", "two", "three"], "t", 6, 20);
    let surface = rendered(&c);

    assert_eq!(surface.row_text(0), "> t");
    assert_eq!(surface.row_text(1), format!("{:>20}", "2 of 3 lines "));
    assert_eq!(surface.row_text(2), format!("{:<20}", "two"));
    assert_eq!(surface.row_text(3), "three");
}

#[test]
fn selected_row_is_padded_in_selected_role() {
    let c = controller(&["one"], "", 5, 10);
    let surface = rendered(&c);
    assert_eq!(
        surface.row_spans(2),
        vec![(0, "one       ".to_string(), StyleRole::Selected)]
    );
}

#[test]
fn unselected_rows_alternate_default_and_highlight() {
    let mut c = controller(&["one of them", "ne th too"], "ne th", 6, 40);
    c.process_input(KeyAction::NextCandidate);
    let surface = rendered(&c);

    assert_eq!(
        surface.row_spans(2),
        vec![
            (0, "o".to_string(), StyleRole::Default),
            (1, "ne".to_string(), StyleRole::Highlight),
            (3, " of ".to_string(), StyleRole::Default),
            (7, "th".to_string(), StyleRole::Highlight),
            (9, "em".to_string(), StyleRole::Default),
        ]
    );
    assert_eq!(c.highlight(), Some(1));
}

#[test]
fn tabs_expand_before_truncation() {
    let mut c = controller(&["a\tb", "zz"], "", 5, 6);
    c.process_input(KeyAction::NextCandidate);
    let surface = rendered(&c);
    assert_eq!(surface.row_text(2), "a    b");
}

#[test]
fn long_lines_are_truncated_to_width() {
    let mut c = controller(&["abcdefghij", "z"], "", 5, 4);
    c.process_input(KeyAction::NextCandidate);
    let surface = rendered(&c);
    assert_eq!(surface.row_text(2), "abcd");
    assert_eq!(surface.row_text(3), "z   ");
}

#[test]
fn highlight_past_width_is_not_drawn() {
    let mut c = controller(&["abcdefxy", "xy"], "xy", 5, 4);
    c.process_input(KeyAction::NextCandidate);
    let surface = rendered(&c);
    assert_eq!(
        surface.row_spans(2),
        vec![(0, "abcd".to_string(), StyleRole::Default)]
    );
}

#[test]
fn wide_characters_truncate_by_display_width() {
    let mut c = controller(&["日本語テキスト", "z"], "", 5, 5);
    c.process_input(KeyAction::NextCandidate);
    let surface = rendered(&c);
    assert_eq!(surface.row_text(2), "日本");
}

#[test]
fn control_characters_take_no_columns_after_a_match() {
    let mut c = controller(&["a\u{1b}b", "xb"], "b", 5, 10);
    c.process_input(KeyAction::NextCandidate);
    let surface = rendered(&c);
    assert_eq!(
        surface.row_spans(2),
        vec![
            (0, "a\u{1b}".to_string(), StyleRole::Default),
            (1, "b".to_string(), StyleRole::Highlight),
        ]
    );
}

#[test]
fn control_characters_take_no_columns_when_padding() {
    let c = controller(&["a\u{7}b"], "", 5, 4);
    let surface = rendered(&c);
    assert_eq!(
        surface.row_spans(2),
        vec![(0, "a\u{7}b  ".to_string(), StyleRole::Selected)]
    );
}

#[test]
fn zero_width_surface_draws_nothing() {
    let c = controller(&["one"], "", 5, 0);
    let surface = rendered(&c);
    assert_eq!(surface.last_frame().unwrap(), &[DrawOp::Erase]);
}

#[test]
fn rendering_twice_is_identical() {
    let c = controller(&["one", "two", "three"], "t", 6, 20);
    let size = c.size();
    let mut surface = RecordingSurface::new(size.rows, size.cols);
    c.render(&mut surface).unwrap();
    c.render(&mut surface).unwrap();

    let frames = surface.frames();
    assert_eq!(frames.len(), 2);
    assert_eq!(frames[0], frames[1]);
}
