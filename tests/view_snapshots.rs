//! Snapshot tests for the picker view
//!
//! Uses insta + ratatui TestBackend to verify rendering output doesn't regress.
//! Icons are ASCII and colors are off so snapshots are plain text.

use select_list::config::Icons;
use select_list::model::RawOption;
use select_list::state::{SelectConfig, SelectEvent, SelectProps, SelectState};
use select_list::view::{ColorConfig, Presentation, SelectStyles, SelectView};
use ratatui::backend::TestBackend;
use ratatui::Terminal;
use std::time::Duration;

// ===== Test Helpers =====

/// Convert a ratatui buffer to a string representation for snapshot testing.
///
/// Captures the visual output character by character, preserving layout.
/// Empty trailing lines are removed to keep snapshots clean.
fn buffer_to_string(buffer: &ratatui::buffer::Buffer) -> String {
    let area = buffer.area();
    let mut lines = Vec::new();

    for y in area.top()..area.bottom() {
        let mut line = String::new();
        for x in area.left()..area.right() {
            let cell = &buffer[(x, y)];
            line.push_str(cell.symbol());
        }
        let trimmed = line.trim_end();
        if !trimmed.is_empty() {
            lines.push(trimmed.to_string());
        }
    }

    lines.join("\n")
}

fn presentation() -> Presentation {
    Presentation {
        icons: Icons {
            search: ">".to_string(),
            close: "x".to_string(),
            arrow: "v".to_string(),
        },
        ..Default::default()
    }
}

fn colors() -> Vec<RawOption> {
    vec![
        RawOption::entry(1, "Red"),
        RawOption::disabled(2, "Blue"),
        RawOption::entry(3, "Green"),
    ]
}

fn mounted(options: Vec<RawOption>) -> SelectState {
    SelectState::mount(
        SelectConfig::default(),
        SelectProps {
            options,
            ..Default::default()
        },
    )
    .0
}

fn opened(options: Vec<RawOption>) -> SelectState {
    let mut state = mounted(options);
    state.dispatch(SelectEvent::Toggle);
    state.dispatch(SelectEvent::Tick(Duration::from_millis(500)));
    state
}

fn render(state: &SelectState) -> String {
    let mut terminal = Terminal::new(TestBackend::new(20, 10)).unwrap();
    let presentation = presentation();
    let styles = SelectStyles::with_color_config(ColorConfig::new(false));

    terminal
        .draw(|frame| {
            frame.render_widget(SelectView::new(state, &presentation, &styles), frame.area());
        })
        .unwrap();

    buffer_to_string(terminal.backend().buffer())
}

// ===== Snapshots =====

#[test]
fn closed_control_shows_placeholder() {
    let output = render(&mounted(colors()));
    insta::assert_snapshot!(output, @r"
┌──────────────────┐
│ Select option  v │
└──────────────────┘
");
}

#[test]
fn open_control_shows_search_row_and_all_rows() {
    let output = render(&opened(colors()));
    insta::assert_snapshot!(output, @r"
┌──────────────────┐
│ > search       x │
└──────────────────┘
│ Red              │
│ Blue             │
│ Green            │
└──────────────────┘
");
}

#[test]
fn empty_filter_shows_not_found_row() {
    let mut state = opened(colors());
    state.dispatch(SelectEvent::SetQuery("zz".to_string()));

    let output = render(&state);
    insta::assert_snapshot!(output, @r"
┌──────────────────┐
│ > zz           x │
└──────────────────┘
│ No data found    │
└──────────────────┘
");
}

#[test]
fn closed_control_shows_picked_value() {
    let mut state = opened(colors());
    state.dispatch(SelectEvent::PickRow(2));
    state.dispatch(SelectEvent::Tick(Duration::from_millis(500)));

    let output = render(&state);
    insta::assert_snapshot!(output, @r"
┌──────────────────┐
│ Green          v │
└──────────────────┘
");
}

// ===== Partial renders =====

#[test]
fn opening_panel_grows_with_extent() {
    let mut state = mounted(colors());
    state.dispatch(SelectEvent::Toggle);
    state.dispatch(SelectEvent::Tick(Duration::from_millis(100)));

    // Early in the ease-in-out curve the panel is still collapsed
    let output = render(&state);
    assert!(!output.contains("Red"), "{output}");

    state.dispatch(SelectEvent::Tick(Duration::from_millis(400)));
    let output = render(&state);
    assert!(output.contains("Green"), "{output}");
}

#[test]
fn search_disabled_keeps_closed_control_while_open() {
    let mut state = SelectState::mount(
        SelectConfig {
            search: false,
            ..Default::default()
        },
        SelectProps {
            options: colors(),
            ..Default::default()
        },
    )
    .0;
    state.dispatch(SelectEvent::Toggle);
    state.dispatch(SelectEvent::Tick(Duration::from_millis(500)));

    let output = render(&state);
    assert!(output.contains("Select option"), "{output}");
    assert!(!output.contains("search"), "{output}");
    assert!(output.contains("Red"), "{output}");
}
