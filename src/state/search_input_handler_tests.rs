//! Tests for search input handler.
//!
//! Tests verify runtime behavior of query editing transitions.

use super::*;

// ===== handle_char_input tests =====

#[test]
fn char_input_appends_at_end() {
    let input = SearchInput::with_query("re");
    let result = handle_char_input(input, 'd');

    assert_eq!(result.query, "red");
    assert_eq!(result.cursor, 3);
}

#[test]
fn char_input_inserts_at_cursor() {
    let input = SearchInput {
        query: "rd".to_string(),
        cursor: 1,
    };
    let result = handle_char_input(input, 'e');

    assert_eq!(result.query, "red");
    assert_eq!(result.cursor, 2, "Cursor should advance past inserted char");
}

#[test]
fn char_input_after_multibyte_char_uses_char_positions() {
    let input = SearchInput::with_query("é");
    assert_eq!(input.cursor, 1);

    let result = handle_char_input(input, 't');
    assert_eq!(result.query, "ét");
    assert_eq!(result.cursor, 2);
}

// ===== handle_backspace tests =====

#[test]
fn backspace_deletes_char_before_cursor() {
    let input = SearchInput::with_query("reds");
    let result = handle_backspace(input);

    assert_eq!(result.query, "red");
    assert_eq!(result.cursor, 3);
}

#[test]
fn backspace_at_start_is_noop() {
    let input = SearchInput {
        query: "red".to_string(),
        cursor: 0,
    };
    let result = handle_backspace(input.clone());

    assert_eq!(result, input);
}

#[test]
fn backspace_removes_multibyte_char() {
    let input = SearchInput::with_query("café");
    let result = handle_backspace(input);

    assert_eq!(result.query, "caf");
    assert_eq!(result.cursor, 3);
}

#[test]
fn backspace_on_empty_query_is_noop() {
    let result = handle_backspace(SearchInput::default());
    assert_eq!(result, SearchInput::default());
}

// ===== cursor movement tests =====

#[test]
fn cursor_left_saturates_at_zero() {
    let input = SearchInput {
        query: "a".to_string(),
        cursor: 0,
    };
    assert_eq!(handle_cursor_left(input).cursor, 0);
}

#[test]
fn cursor_left_moves_one() {
    let input = SearchInput::with_query("abc");
    assert_eq!(handle_cursor_left(input).cursor, 2);
}

#[test]
fn cursor_right_saturates_at_char_count() {
    let input = SearchInput::with_query("ñu");
    let result = handle_cursor_right(input);
    assert_eq!(result.cursor, 2, "Cursor is counted in chars, not bytes");
}

#[test]
fn cursor_right_moves_one() {
    let input = SearchInput {
        query: "abc".to_string(),
        cursor: 1,
    };
    assert_eq!(handle_cursor_right(input).cursor, 2);
}

// ===== clear tests =====

#[test]
fn clear_empties_query_and_resets_cursor() {
    let result = clear(SearchInput::with_query("green"));
    assert!(result.is_empty());
    assert_eq!(result.cursor, 0);
}
