//! Domain-level keyboard actions independent of key bindings.

/// Actions that can be mapped to configurable key bindings.
///
/// These represent user intent, not specific keys. The mapping from
/// crossterm::event::KeyEvent to KeyAction is handled by KeyBindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    /// Tap the closed control: open when closed, close when open. Default: Space
    Toggle,
    /// Close affordance. Default: Esc
    Close,
    /// Move the highlight to the previous enabled row. Default: ↑/Ctrl+p
    HighlightPrev,
    /// Move the highlight to the next enabled row. Default: ↓/Ctrl+n
    HighlightNext,
    /// Pick the highlighted row (or the "not found" row). Default: Enter
    Pick,
    /// Leave the picker. Default: q/Ctrl+c
    Quit,
}
