//! Screen layout and mouse hit testing for the picker.
//!
//! The layout is derived from the state on every frame: the control row sits
//! at the top and the dropdown panel hangs below it, as tall as the animated
//! extent allows.

use super::constants::{CONTROL_HEIGHT, MAX_WIDTH, ROW_PADDING, UNITS_PER_ROW};
use crate::state::SelectState;
use ratatui::layout::{Position, Rect};

/// Where each part of the picker is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectLayout {
    /// Closed control or search row, border included.
    pub control: Rect,
    /// Text area inside the control.
    pub text: Rect,
    /// Trailing icon (arrow or close) inside the control.
    pub icon: Rect,
    /// Dropdown panel, border included. `None` while fully collapsed.
    pub panel: Option<Rect>,
    /// Row area inside the panel.
    pub rows: Rect,
    /// Index of the first filtered row shown.
    pub offset: usize,
}

/// What a mouse click landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    /// Closed control (tap toggles).
    Control,
    /// Search row text area.
    SearchRow,
    /// Close affordance of the search row.
    CloseIcon,
    /// A row of the filtered list.
    Row(usize),
    /// The "not found" row.
    NotFound,
    /// Panel border or blank space.
    Outside,
}

/// Number of terminal rows an extent covers.
pub fn extent_rows(extent: f32) -> u16 {
    if extent <= 0.0 {
        return 0;
    }
    (extent / UNITS_PER_ROW).floor() as u16
}

/// Rows the panel needs to show its whole content, bottom border included.
fn content_rows(state: &SelectState) -> u16 {
    let rows = state.filtered_options().len().max(1);
    u16::try_from(rows).unwrap_or(u16::MAX).saturating_add(1)
}

/// First visible row so the highlight stays in view.
pub fn scroll_offset(highlight: Option<usize>, visible: usize) -> usize {
    match highlight {
        Some(row) if visible > 0 && row >= visible => row + 1 - visible,
        _ => 0,
    }
}

/// Compute the layout for `state` inside `area`.
///
/// `icon_width` is the display width of the trailing icon.
pub fn compute_layout(area: Rect, state: &SelectState, icon_width: u16) -> SelectLayout {
    let width = area.width.min(MAX_WIDTH);
    let control = Rect::new(area.x, area.y, width, CONTROL_HEIGHT.min(area.height));

    let inner_x = control.x.saturating_add(1);
    let inner_right = control.right().saturating_sub(1);
    let line_y = control.y.saturating_add(1);

    let icon_x = inner_right
        .saturating_sub(ROW_PADDING)
        .saturating_sub(icon_width)
        .max(inner_x);
    let icon = Rect::new(
        icon_x,
        line_y,
        icon_width.min(inner_right.saturating_sub(icon_x)),
        1,
    );

    let text_x = inner_x.saturating_add(ROW_PADDING).min(icon_x);
    let text = Rect::new(text_x, line_y, icon_x.saturating_sub(text_x + 1), 1);

    let below = area.bottom().saturating_sub(control.bottom());
    let height = extent_rows(state.extent())
        .min(content_rows(state))
        .min(below);

    let (panel, rows) = if height == 0 {
        (None, Rect::new(control.x, control.bottom(), 0, 0))
    } else {
        let panel = Rect::new(control.x, control.bottom(), width, height);
        let rows = Rect::new(
            panel.x.saturating_add(1),
            panel.y,
            panel.width.saturating_sub(2),
            panel.height.saturating_sub(1),
        );
        (Some(panel), rows)
    };

    let offset = if state.shows_not_found() {
        0
    } else {
        scroll_offset(state.highlight(), rows.height as usize)
    };

    SelectLayout {
        control,
        text,
        icon,
        panel,
        rows,
        offset,
    }
}

/// Resolve a click position against a layout.
pub fn hit_test(layout: &SelectLayout, state: &SelectState, column: u16, row: u16) -> Hit {
    let position = Position::new(column, row);

    if layout.control.contains(position) {
        if !state.shows_search_row() {
            return Hit::Control;
        }
        return if layout.icon.contains(position) {
            Hit::CloseIcon
        } else {
            Hit::SearchRow
        };
    }

    if !layout.rows.contains(position) {
        return Hit::Outside;
    }

    if state.shows_not_found() {
        return if row == layout.rows.y {
            Hit::NotFound
        } else {
            Hit::Outside
        };
    }

    let index = layout.offset + usize::from(row - layout.rows.y);
    if index < state.filtered_options().len() {
        Hit::Row(index)
    } else {
        Hit::Outside
    }
}

#[cfg(test)]
#[path = "layout_tests.rs"]
mod tests;
