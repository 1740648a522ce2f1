//! Tests for the terminal picker shell.

use super::*;
use crate::model::RawOption;
use crate::state::Phase;
use ratatui::backend::TestBackend;
use std::time::Duration;

const FULL: Duration = Duration::from_millis(500);

fn colors() -> Vec<RawOption> {
    vec![
        RawOption::entry(1, "Red"),
        RawOption::disabled(2, "Blue"),
        RawOption::entry(3, "Green"),
    ]
}

fn create_test_app(options: Vec<RawOption>) -> TuiApp<TestBackend> {
    let terminal = Terminal::new(TestBackend::new(30, 12)).unwrap();
    TuiApp::with_terminal(
        terminal,
        &ResolvedConfig::default(),
        SelectProps {
            options,
            ..Default::default()
        },
        ColorConfig::new(false),
    )
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn rendered(app: &mut TuiApp<TestBackend>) -> String {
    app.draw().unwrap();
    let buffer = app.terminal.backend().buffer();
    let area = buffer.area;
    let mut lines = Vec::new();
    for y in area.top()..area.bottom() {
        let line: String = (area.left()..area.right())
            .map(|x| buffer[(x, y)].symbol())
            .collect();
        lines.push(line.trim_end().to_string());
    }
    lines.join("\n")
}

/// Open with Space and let the animation finish.
fn open(app: &mut TuiApp<TestBackend>) {
    assert!(!app.handle_key(key(KeyCode::Char(' '))));
    app.list.tick(FULL);
    assert_eq!(app.state().phase(), Phase::Open);
}

#[test]
fn tui_error_from_io_error() {
    let io_err = io::Error::other("test error");
    let tui_err: TuiError = io_err.into();
    assert!(matches!(tui_err, TuiError::Io(_)));
}

#[test]
fn draw_renders_placeholder_when_nothing_selected() {
    let mut app = create_test_app(colors());
    let output = rendered(&mut app);
    assert!(
        output.contains("Select option"),
        "Closed control should show placeholder:\n{output}"
    );
}

#[test]
fn space_opens_and_shows_search_row_and_rows() {
    let mut app = create_test_app(colors());
    open(&mut app);

    let output = rendered(&mut app);
    assert!(output.contains("search"), "Search placeholder:\n{output}");
    assert!(output.contains("Red"));
    assert!(output.contains("Blue"));
    assert!(output.contains("Green"));
}

#[test]
fn enter_picks_highlighted_row() {
    let mut app = create_test_app(colors());
    open(&mut app);

    // Highlight starts on Red; Down skips the disabled Blue
    app.handle_key(key(KeyCode::Down));
    assert_eq!(app.state().highlight(), Some(2));
    app.handle_key(key(KeyCode::Enter));

    assert_eq!(app.outcome(), Outcome::Selected(OptionKey::from(3_i64)));
    assert_eq!(app.state().phase(), Phase::Closing);
}

#[test]
fn enter_on_closed_picker_quits() {
    let mut app = create_test_app(colors());
    assert!(app.handle_key(key(KeyCode::Enter)));
    assert_eq!(app.outcome(), Outcome::Dismissed);
}

#[test]
fn typing_while_open_filters() {
    let mut app = create_test_app(colors());
    open(&mut app);

    for ch in "GR".chars() {
        assert!(!app.handle_key(KeyEvent::new(KeyCode::Char(ch), KeyModifiers::SHIFT)));
    }
    assert_eq!(app.state().query(), "GR");
    assert_eq!(app.state().filtered_options().len(), 1);

    app.handle_key(key(KeyCode::Backspace));
    assert_eq!(app.state().query(), "G");
}

#[test]
fn q_is_text_while_searching_but_quits_when_closed() {
    let mut app = create_test_app(colors());
    open(&mut app);
    assert!(!app.handle_key(key(KeyCode::Char('q'))));
    assert_eq!(app.state().query(), "q");

    let mut closed = create_test_app(colors());
    assert!(closed.handle_key(key(KeyCode::Char('q'))));
}

#[test]
fn ctrl_c_quits_even_while_searching() {
    let mut app = create_test_app(colors());
    open(&mut app);
    assert!(app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
}

#[test]
fn esc_closes_open_picker_then_quits() {
    let mut app = create_test_app(colors());
    open(&mut app);

    assert!(!app.handle_key(key(KeyCode::Esc)));
    assert_eq!(app.state().phase(), Phase::Closing);
    app.list.tick(FULL);

    assert!(app.handle_key(key(KeyCode::Esc)));
}

#[test]
fn down_on_closed_picker_opens_it() {
    let mut app = create_test_app(colors());
    app.handle_key(key(KeyCode::Down));
    assert_eq!(app.state().phase(), Phase::Opening);
}

#[test]
fn not_found_row_is_pickable_with_enter() {
    let mut app = create_test_app(colors());
    open(&mut app);
    for ch in "zz".chars() {
        app.handle_key(key(KeyCode::Char(ch)));
    }

    let output = rendered(&mut app);
    assert!(output.contains("No data found"), "{output}");

    app.handle_key(key(KeyCode::Enter));
    assert_eq!(app.outcome(), Outcome::Cleared);
}

#[test]
fn mouse_click_on_control_toggles_and_row_picks() {
    let mut app = create_test_app(colors());
    app.draw().unwrap();

    app.handle_mouse(MouseEvent {
        kind: MouseEventKind::Down(MouseButton::Left),
        column: 4,
        row: 1,
        modifiers: KeyModifiers::NONE,
    });
    assert_eq!(app.state().phase(), Phase::Opening);
    app.list.tick(FULL);
    app.draw().unwrap();

    // Rows start right below the control: Red, Blue, Green
    app.handle_mouse(MouseEvent {
        kind: MouseEventKind::Down(MouseButton::Left),
        column: 4,
        row: 5,
        modifiers: KeyModifiers::NONE,
    });
    assert_eq!(app.outcome(), Outcome::Selected(OptionKey::from(3_i64)));
}

#[test]
fn mouse_click_on_disabled_row_does_nothing() {
    let mut app = create_test_app(colors());
    open(&mut app);
    app.draw().unwrap();

    app.handle_mouse(MouseEvent {
        kind: MouseEventKind::Down(MouseButton::Left),
        column: 4,
        row: 4,
        modifiers: KeyModifiers::NONE,
    });
    assert_eq!(app.outcome(), Outcome::Dismissed);
    assert_eq!(app.state().phase(), Phase::Open);
}

#[test]
fn selected_value_replaces_placeholder_after_pick() {
    let mut app = create_test_app(colors());
    open(&mut app);
    app.handle_key(key(KeyCode::Enter));
    app.list.tick(FULL);

    let output = rendered(&mut app);
    assert!(output.contains("Red"), "{output}");
    assert!(!output.contains("Select option"), "{output}");
}

#[test]
fn presentation_picks_trailing_icon_by_state() {
    let app = create_test_app(colors());
    let presentation = Presentation::default();
    assert_eq!(
        presentation.trailing_icon(app.state()),
        presentation.icons.arrow
    );
}

// ===== Terminal setup =====

#[test]
fn failed_setup_restores_terminal_and_keeps_setup_error() {
    let restored = std::cell::Cell::new(false);

    let result: Result<(), TuiError> = setup_or_restore(
        || Err(io::Error::other("alternate screen refused").into()),
        || {
            restored.set(true);
            Ok(())
        },
    );

    assert!(restored.get());
    let err = result.unwrap_err();
    assert!(err.to_string().contains("alternate screen refused"));
}

#[test]
fn successful_setup_skips_restore() {
    let restored = std::cell::Cell::new(false);

    let result = setup_or_restore(
        || Ok(7),
        || {
            restored.set(true);
            Ok(())
        },
    );

    assert_eq!(result.unwrap(), 7);
    assert!(!restored.get());
}

#[test]
fn restore_failure_does_not_mask_setup_error() {
    let result: Result<(), TuiError> = setup_or_restore(
        || Err(io::Error::other("raw mode").into()),
        || Err(io::Error::other("restore").into()),
    );

    assert!(result.unwrap_err().to_string().contains("raw mode"));
}
