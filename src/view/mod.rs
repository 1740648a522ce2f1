//! TUI rendering and terminal management (impure shell)

pub mod constants;
mod dropdown;
pub mod layout;
mod select_box;
pub mod styles;

pub use dropdown::DropdownPanel;
pub use layout::{compute_layout, hit_test, Hit, SelectLayout};
pub use select_box::SelectBox;
pub use styles::{ColorConfig, SelectStyles};

use crate::config::loader::{
    DEFAULT_NOT_FOUND_TEXT, DEFAULT_PLACEHOLDER, DEFAULT_SEARCH_PLACEHOLDER,
};
use crate::config::{Icons, KeyBindings, ResolvedConfig};
use crate::model::{AppError, KeyAction, OptionKey};
use crate::state::{SelectEvent, SelectProps, SelectState};
use crate::widget::SelectList;
use constants::{FRAME_INTERVAL, IDLE_INTERVAL};
use crossterm::{
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
        MouseEventKind,
    },
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    buffer::Buffer,
    layout::Rect,
    widgets::Widget,
    Terminal,
};
use std::cell::RefCell;
use std::io::{self, Stderr};
use std::rc::Rc;
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, info, warn};
use unicode_width::UnicodeWidthStr;

/// Errors that can occur during TUI operations
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),

    /// Input source error
    #[error("Input error: {0}")]
    Input(#[from] crate::model::InputError),

    /// Application error
    #[error("Application error: {0}")]
    App(#[from] AppError),
}

// ===== Presentation =====

/// Text and glyphs shown by the picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Presentation {
    pub placeholder: String,
    pub search_placeholder: String,
    pub not_found_text: String,
    pub icons: Icons,
    /// Carried for hosts that render with fonts; terminals ignore it.
    pub font_family: Option<String>,
}

impl Presentation {
    pub fn from_config(config: &ResolvedConfig) -> Self {
        Self {
            placeholder: config.placeholder.clone(),
            search_placeholder: config.search_placeholder.clone(),
            not_found_text: config.not_found_text.clone(),
            icons: config.icons.clone(),
            font_family: config.font_family.clone(),
        }
    }

    /// Icon at the right edge of the control row: close while searching,
    /// the arrow otherwise.
    pub fn trailing_icon(&self, state: &SelectState) -> &str {
        if state.shows_search_row() {
            &self.icons.close
        } else {
            &self.icons.arrow
        }
    }

    /// Layout of `state` inside `area` for this presentation.
    pub fn layout(&self, area: Rect, state: &SelectState) -> SelectLayout {
        let icon_width = self.trailing_icon(state).width() as u16;
        compute_layout(area, state, icon_width)
    }
}

impl Default for Presentation {
    fn default() -> Self {
        Self {
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            search_placeholder: DEFAULT_SEARCH_PLACEHOLDER.to_string(),
            not_found_text: DEFAULT_NOT_FOUND_TEXT.to_string(),
            icons: Icons::default(),
            font_family: None,
        }
    }
}

// ===== SelectView =====

/// Whole picker: control row plus dropdown panel.
pub struct SelectView<'a> {
    state: &'a SelectState,
    presentation: &'a Presentation,
    styles: &'a SelectStyles,
}

impl<'a> SelectView<'a> {
    pub fn new(
        state: &'a SelectState,
        presentation: &'a Presentation,
        styles: &'a SelectStyles,
    ) -> Self {
        Self {
            state,
            presentation,
            styles,
        }
    }
}

impl Widget for SelectView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let layout = self.presentation.layout(area, self.state);
        SelectBox::new(self.state, &layout, self.presentation, self.styles)
            .render(layout.control, buf);
        DropdownPanel::new(self.state, &layout, self.presentation, self.styles).render(area, buf);
    }
}

// ===== Outcome =====

/// What the picker reported last, returned when it exits.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// An option (or the adopted default) was reported.
    Selected(OptionKey),
    /// The "not found" row cleared the selection.
    Cleared,
    /// Nothing was ever reported.
    Dismissed,
}

// ===== TuiApp =====

/// Main TUI application
///
/// Generic over backend to support testing with TestBackend
pub struct TuiApp<B>
where
    B: Backend,
{
    terminal: Terminal<B>,
    list: SelectList,
    outcome: Rc<RefCell<Outcome>>,
    presentation: Presentation,
    styles: SelectStyles,
    key_bindings: KeyBindings,
    /// Layout of the last frame (for mouse click detection)
    last_layout: Option<SelectLayout>,
}

impl<B> TuiApp<B>
where
    B: Backend,
{
    /// Mount the picker on an existing terminal.
    pub fn with_terminal(
        terminal: Terminal<B>,
        config: &ResolvedConfig,
        props: SelectProps,
        colors: ColorConfig,
    ) -> Self {
        let outcome = Rc::new(RefCell::new(Outcome::Dismissed));
        let sink = Rc::clone(&outcome);
        let list = SelectList::new(config.select_config(), props, move |key: Option<&OptionKey>| {
            *sink.borrow_mut() = match key {
                Some(key) => Outcome::Selected(key.clone()),
                None => Outcome::Cleared,
            };
        });

        Self {
            terminal,
            list,
            outcome,
            presentation: Presentation::from_config(config),
            styles: SelectStyles::from_config(colors, &config.styles),
            key_bindings: KeyBindings::default(),
            last_layout: None,
        }
    }

    /// Run the main event loop
    ///
    /// Returns the last reported selection when the user leaves the picker.
    /// Polls at frame rate while an animation or deferred reset is running,
    /// slowly otherwise.
    pub fn run(&mut self) -> Result<Outcome, TuiError> {
        self.draw()?;
        let mut last_tick = Instant::now();

        loop {
            let timeout = if self.list.state().is_animating() {
                FRAME_INTERVAL
            } else {
                IDLE_INTERVAL
            };
            let ready = event::poll(timeout)?;

            // Advance time before handling input so events see the current state
            let now = Instant::now();
            self.list.tick(now.duration_since(last_tick));
            last_tick = now;

            if ready {
                match event::read()? {
                    Event::Key(key) => {
                        if self.handle_key(key) {
                            return Ok(self.outcome());
                        }
                    }
                    Event::Mouse(mouse) => self.handle_mouse(mouse),
                    _ => {}
                }
            }

            self.draw()?;
        }
    }

    /// Last reported selection.
    pub fn outcome(&self) -> Outcome {
        self.outcome.borrow().clone()
    }

    pub fn state(&self) -> &SelectState {
        self.list.state()
    }

    /// Handle a single keyboard event
    ///
    /// Returns true if app should quit
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.kind != KeyEventKind::Press {
            return false;
        }

        // Typing goes to the search row while it is shown
        if self.list.state().shows_search_row() {
            match key.code {
                KeyCode::Char(ch)
                    if !key
                        .modifiers
                        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
                {
                    self.list.input_char(ch);
                    return false;
                }
                KeyCode::Backspace => {
                    self.list.backspace();
                    return false;
                }
                KeyCode::Left => {
                    self.list.dispatch(SelectEvent::CursorLeft);
                    return false;
                }
                KeyCode::Right => {
                    self.list.dispatch(SelectEvent::CursorRight);
                    return false;
                }
                _ => {}
            }
        }

        let Some(action) = self.key_bindings.get(key) else {
            return false;
        };
        let open = self.list.state().is_open();
        debug!(?action, open, "Key action");

        match action {
            KeyAction::Toggle => self.list.toggle(),
            KeyAction::Close if open => self.list.close(),
            // Esc on a closed picker leaves it
            KeyAction::Close => return true,
            KeyAction::HighlightNext | KeyAction::HighlightPrev if !open => self.list.toggle(),
            KeyAction::HighlightNext => self.list.dispatch(SelectEvent::HighlightNext),
            KeyAction::HighlightPrev => self.list.dispatch(SelectEvent::HighlightPrev),
            KeyAction::Pick if open => self.list.dispatch(SelectEvent::PickHighlighted),
            // Enter on a closed picker accepts the current selection
            KeyAction::Pick => return true,
            KeyAction::Quit => return true,
        }

        false
    }

    /// Handle a single mouse event
    fn handle_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::ScrollDown if self.list.state().is_open() => {
                self.list.dispatch(SelectEvent::HighlightNext);
            }
            MouseEventKind::ScrollUp if self.list.state().is_open() => {
                self.list.dispatch(SelectEvent::HighlightPrev);
            }
            MouseEventKind::Down(MouseButton::Left) => {
                let Some(layout) = self.last_layout else {
                    return;
                };
                let hit = hit_test(&layout, self.list.state(), mouse.column, mouse.row);
                debug!(?hit, "Mouse click");
                match hit {
                    Hit::Control => self.list.toggle(),
                    Hit::CloseIcon => self.list.close(),
                    Hit::Row(row) => self.list.pick_row(row),
                    Hit::NotFound => self.list.pick_not_found(),
                    Hit::SearchRow | Hit::Outside => {}
                }
            }
            _ => {}
        }
    }

    fn draw(&mut self) -> Result<(), TuiError> {
        // Calculate layout before rendering (for mouse click detection)
        let size = self.terminal.size()?;
        let frame_area = Rect::new(0, 0, size.width.max(1), size.height);
        self.last_layout = Some(self.presentation.layout(frame_area, self.list.state()));

        let view = SelectView::new(self.list.state(), &self.presentation, &self.styles);
        self.terminal.draw(|frame| {
            frame.render_widget(view, frame.area());
        })?;

        Ok(())
    }
}

/// Run the picker on the real terminal until the user leaves it.
///
/// The picker draws to stderr so stdout stays free for the result.
pub fn run_with_config(
    props: SelectProps,
    config: &ResolvedConfig,
    colors: ColorConfig,
) -> Result<Outcome, TuiError> {
    if let Some(font) = &config.font_family {
        debug!(font, "Font family has no effect in a terminal");
    }

    let terminal = setup_or_restore(enter_terminal, restore_terminal)?;

    let mut app = TuiApp::with_terminal(terminal, config, props, colors);
    info!(options = app.state().options().len(), "Picker started");

    // Run the app and ensure cleanup happens even on error
    let result = app.run();

    // Always restore terminal state
    restore_terminal()?;

    result
}

/// Run `setup`; if any step of it fails, run `restore` before returning the
/// setup error so a half-initialized terminal is never left behind.
fn setup_or_restore<T>(
    setup: impl FnOnce() -> Result<T, TuiError>,
    restore: impl FnOnce() -> Result<(), TuiError>,
) -> Result<T, TuiError> {
    setup().inspect_err(|err| {
        warn!(error = %err, "Terminal setup failed, restoring");
        if let Err(restore_err) = restore() {
            warn!(error = %restore_err, "Terminal restore failed");
        }
    })
}

/// Raw mode, alternate screen and mouse capture on stderr.
fn enter_terminal() -> Result<Terminal<CrosstermBackend<Stderr>>, TuiError> {
    enable_raw_mode()?;
    let mut stderr = io::stderr();
    stderr.execute(EnterAlternateScreen)?;
    stderr.execute(crossterm::event::EnableMouseCapture)?;
    Ok(Terminal::new(CrosstermBackend::new(stderr))?)
}

/// Restore terminal to normal state
///
/// Disables raw mode, mouse capture, and leaves alternate screen. Every step
/// runs even if an earlier one fails; the first error is returned.
fn restore_terminal() -> Result<(), TuiError> {
    let raw = disable_raw_mode();
    let mouse = io::stderr()
        .execute(crossterm::event::DisableMouseCapture)
        .map(|_| ());
    let screen = io::stderr().execute(LeaveAlternateScreen).map(|_| ());
    raw.and(mouse).and(screen)?;
    Ok(())
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
