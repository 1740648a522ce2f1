//! Control row widget: the closed control or, while open, the search row.

use super::layout::SelectLayout;
use super::styles::SelectStyles;
use super::Presentation;
use crate::state::SelectState;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
};

/// Renders the control row of a picker.
///
/// Shows the selected value (or placeholder) with the arrow icon, replaced by
/// the search row with its close icon while the list is open and searchable.
pub struct SelectBox<'a> {
    state: &'a SelectState,
    layout: &'a SelectLayout,
    presentation: &'a Presentation,
    styles: &'a SelectStyles,
}

impl<'a> SelectBox<'a> {
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

    fn selection_line(&self) -> Line<'a> {
        let value = self.state.selected_value();
        if value.is_empty() {
            Line::from(Span::styled(
                self.presentation.placeholder.as_str(),
                self.styles.placeholder,
            ))
        } else {
            Line::from(Span::styled(value, self.styles.input))
        }
    }

    fn search_line(&self) -> Line<'a> {
        let input = self.state.search_input();
        let mut spans = vec![
            Span::styled(self.presentation.icons.search.as_str(), self.styles.input),
            Span::raw(" "),
        ];

        if input.is_empty() {
            // Cursor sits on the first placeholder character
            let mut chars = self.presentation.search_placeholder.chars();
            let first = chars.next().map(String::from).unwrap_or_else(|| " ".into());
            spans.push(Span::styled(first, self.styles.cursor));
            spans.push(Span::styled(
                chars.collect::<String>(),
                self.styles.placeholder,
            ));
            return Line::from(spans);
        }

        let before: String = input.query.chars().take(input.cursor).collect();
        let mut after = input.query.chars().skip(input.cursor);
        let at_cursor = after.next().map(String::from).unwrap_or_else(|| " ".into());

        spans.push(Span::styled(before, self.styles.input));
        spans.push(Span::styled(at_cursor, self.styles.cursor));
        spans.push(Span::styled(after.collect::<String>(), self.styles.input));
        Line::from(spans)
    }
}

impl Widget for SelectBox<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Block::bordered()
            .border_style(self.styles.box_style)
            .render(area, buf);

        let (line, icon) = if self.state.shows_search_row() {
            (self.search_line(), self.presentation.icons.close.as_str())
        } else {
            (self.selection_line(), self.presentation.icons.arrow.as_str())
        };

        Paragraph::new(line).render(self.layout.text, buf);
        Paragraph::new(Span::styled(icon, self.styles.input)).render(self.layout.icon, buf);
    }
}
