//! Search query editing (pure state transitions).
//!
//! All functions are pure - they take the current input by value and return
//! the next one. The cursor is a character index, never a byte index.

/// Search row contents: query text plus cursor position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchInput {
    pub query: String,
    pub cursor: usize,
}

impl SearchInput {
    /// Input holding `query` with the cursor at its end.
    pub fn with_query(query: impl Into<String>) -> Self {
        let query = query.into();
        let cursor = query.chars().count();
        Self { query, cursor }
    }

    pub fn is_empty(&self) -> bool {
        self.query.is_empty()
    }
}

/// Byte offset of the `cursor`-th character (or the end of the string).
fn byte_offset(query: &str, cursor: usize) -> usize {
    query
        .char_indices()
        .nth(cursor)
        .map(|(idx, _)| idx)
        .unwrap_or(query.len())
}

/// Insert the character at the cursor and advance the cursor.
pub fn handle_char_input(input: SearchInput, ch: char) -> SearchInput {
    let SearchInput { mut query, cursor } = input;
    let at = byte_offset(&query, cursor);
    query.insert(at, ch);
    SearchInput {
        query,
        cursor: cursor + 1,
    }
}

/// Delete the character before the cursor. No-op at position 0.
pub fn handle_backspace(input: SearchInput) -> SearchInput {
    let SearchInput { mut query, cursor } = input;
    if cursor == 0 {
        return SearchInput { query, cursor };
    }
    let at = byte_offset(&query, cursor - 1);
    query.remove(at);
    SearchInput {
        query,
        cursor: cursor - 1,
    }
}

/// Move the cursor left, saturating at 0.
pub fn handle_cursor_left(input: SearchInput) -> SearchInput {
    SearchInput {
        cursor: input.cursor.saturating_sub(1),
        ..input
    }
}

/// Move the cursor right, saturating at the query length.
pub fn handle_cursor_right(input: SearchInput) -> SearchInput {
    let max_cursor = input.query.chars().count();
    SearchInput {
        cursor: (input.cursor + 1).min(max_cursor),
        ..input
    }
}

/// Empty query, cursor at 0.
pub fn clear(_input: SearchInput) -> SearchInput {
    SearchInput::default()
}

// ===== Tests =====

#[cfg(test)]
#[path = "search_input_handler_tests.rs"]
mod tests;
