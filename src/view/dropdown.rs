//! Dropdown panel widget: the filtered rows or the "not found" row.

use super::layout::SelectLayout;
use super::styles::SelectStyles;
use super::Presentation;
use crate::state::SelectState;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

/// Renders the panel below the control, clipped to the layout's panel rect.
pub struct DropdownPanel<'a> {
    state: &'a SelectState,
    layout: &'a SelectLayout,
    presentation: &'a Presentation,
    styles: &'a SelectStyles,
}

impl<'a> DropdownPanel<'a> {
    pub fn new(
        state: &'a SelectState,
        layout: &'a SelectLayout,
        presentation: &'a Presentation,
        styles: &'a SelectStyles,
    ) -> Self {
        Self {
            state,
            layout,
            presentation,
            styles,
        }
    }

    fn row_rect(&self, line: u16) -> Rect {
        let rows = self.layout.rows;
        Rect::new(rows.x, rows.y + line, rows.width, 1)
    }
}

impl Widget for DropdownPanel<'_> {
    fn render(self, _area: Rect, buf: &mut Buffer) {
        let Some(panel) = self.layout.panel else {
            return;
        };

        Clear.render(panel, buf);
        Block::default()
            .borders(Borders::LEFT | Borders::RIGHT | Borders::BOTTOM)
            .border_style(self.styles.dropdown)
            .render(panel, buf);

        if self.layout.rows.height == 0 {
            return;
        }

        if self.state.shows_not_found() {
            let line = Line::from(vec![
                Span::raw(" "),
                Span::styled(self.presentation.not_found_text.as_str(), self.styles.not_found),
            ]);
            Paragraph::new(line)
                .style(self.styles.item)
                .render(self.row_rect(0), buf);
            return;
        }

        let visible = usize::from(self.layout.rows.height);
        let rows = self
            .state
            .filtered_options()
            .iter()
            .enumerate()
            .skip(self.layout.offset)
            .take(visible);

        for (line, (index, option)) in rows.enumerate() {
            let (row_style, text_style) = if option.disabled {
                (self.styles.disabled_item, self.styles.disabled_text)
            } else {
                (self.styles.item, self.styles.item_text)
            };
            let row_style = if self.state.highlight() == Some(index) {
                row_style.patch(self.styles.highlight)
            } else {
                row_style
            };

            let line_text = Line::from(vec![
                Span::raw(" "),
                Span::styled(option.display_text(), text_style),
            ]);
            Paragraph::new(line_text)
                .style(row_style)
                .render(self.row_rect(line as u16), buf);
        }
    }
}
