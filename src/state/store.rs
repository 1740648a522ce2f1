//! Dropdown state store and reducer.
//!
//! `SelectState` is the whole widget state. Every user or host event goes
//! through [`SelectState::dispatch`], which computes the next state and
//! returns the side effects the host must perform, in order.
//!
//! # State Machine
//!
//! ```text
//! Closed --toggle / open directive--> Opening --animation done--> Open
//!   ^                                    |                          |
//!   |                         toggle / close / pick     toggle / close / pick
//!   |                                    v                          v
//!   +------------animation done------ Closing <---------------------+
//! ```
//!
//! Time only advances through [`SelectEvent::Tick`]. A committed pick arms the
//! deferred search reset when its close animation completes; the reset fires
//! after the settle delay.

use crate::model::{normalize_all, DefaultOption, OptionKey, RawOption, SaveMode, SelectOption};
use crate::state::animation::{AnimationController, Easing, Phase};
use crate::state::filter::filter_options;
use crate::state::search_input_handler::{self as input, SearchInput};
use crate::state::selection::{resolve_pick, sync_default};
use crate::state::timer::ScheduledTask;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Default open extent of the dropdown panel.
pub const DEFAULT_TARGET_HEIGHT: f32 = 200.0;

/// Default duration of the open/close animation.
pub const DEFAULT_ANIMATION_DURATION: Duration = Duration::from_millis(500);

/// Default delay between close completion and the search reset.
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(800);

// ===== SelectConfig =====

/// Behavioral configuration, fixed for the lifetime of a state.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectConfig {
    /// Whether picks report the key or the value.
    pub save: SaveMode,
    /// Whether the open control shows a search row.
    pub search: bool,
    /// Open extent.
    pub target_height: f32,
    /// Open/close animation duration.
    pub animation_duration: Duration,
    /// Delay after close completion before the search state resets.
    pub settle_delay: Duration,
    /// Animation timing curve.
    pub easing: Easing,
}

impl Default for SelectConfig {
    fn default() -> Self {
        Self {
            save: SaveMode::Key,
            search: true,
            target_height: DEFAULT_TARGET_HEIGHT,
            animation_duration: DEFAULT_ANIMATION_DURATION,
            settle_delay: DEFAULT_SETTLE_DELAY,
            easing: Easing::default(),
        }
    }
}

/// Host-supplied inputs observed on the first render.
#[derive(Debug, Clone, Default)]
pub struct SelectProps {
    pub options: Vec<RawOption>,
    pub default_option: Option<DefaultOption>,
    /// Host-controlled open flag.
    pub open: Option<bool>,
}

// ===== Events & Effects =====

/// Everything that can happen to the widget.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectEvent {
    /// Tap on the closed control.
    Toggle,
    /// Tap on the close affordance of the search row.
    Close,
    /// Tap on a row of the filtered list.
    PickRow(usize),
    /// Tap on the "not found" row.
    PickNotFound,
    /// Pick whatever the keyboard highlight points at.
    PickHighlighted,
    HighlightNext,
    HighlightPrev,
    InputChar(char),
    Backspace,
    CursorLeft,
    CursorRight,
    /// Replace the whole query.
    SetQuery(String),
    /// Host replaced the full option list.
    SetOptions(Vec<RawOption>),
    /// Host supplied (or re-supplied) the default option.
    SetDefaultOption(Option<DefaultOption>),
    /// Host-controlled open flag.
    SetOpen(bool),
    /// Advance animation and timers.
    Tick(Duration),
    /// Component is going away; cancel everything pending.
    Teardown,
}

/// Side effects for the host, in the order they must run.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Report the persisted selection identifier; `None` means cleared.
    ReportSelection(Option<OptionKey>),
    /// The displayed selection changed.
    SelectionChanged,
    /// Drop focus from any text input before opening.
    DismissInput,
}

/// What the in-flight animation run does when it completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Transition {
    Open,
    Close { reset_search: bool },
}

// ===== SelectState =====

/// Complete widget state. Pure data plus a reducer.
#[derive(Debug, Clone)]
pub struct SelectState {
    config: SelectConfig,
    options: Vec<SelectOption>,
    filtered: Vec<SelectOption>,
    search: SearchInput,
    selected_key: Option<OptionKey>,
    selected_value: String,
    last_default_key: Option<OptionKey>,
    last_open_directive: Option<bool>,
    phase: Phase,
    extent: AnimationController,
    transition: Option<(u64, Transition)>,
    pending_reset: ScheduledTask,
    highlight: Option<usize>,
}

impl SelectState {
    /// First render.
    ///
    /// Adopts a default option whose key is defined. A host open flag set to
    /// `true` starts the widget fully open without animating.
    pub fn mount(mut config: SelectConfig, props: SelectProps) -> (Self, Vec<Effect>) {
        if !(config.target_height.is_finite() && config.target_height >= 0.0) {
            warn!(target_height = config.target_height, "Unusable target height, using default");
            config.target_height = DEFAULT_TARGET_HEIGHT;
        }
        let options = ingest(&props.options);
        let open = props.open.unwrap_or(false);
        let (phase, extent) = if open {
            (Phase::Open, config.target_height)
        } else {
            (Phase::Closed, 0.0)
        };

        let mut state = Self {
            filtered: options.clone(),
            options,
            search: SearchInput::default(),
            selected_key: None,
            selected_value: String::new(),
            last_default_key: None,
            last_open_directive: props.open,
            phase,
            extent: AnimationController::new(extent),
            transition: None,
            pending_reset: ScheduledTask::new(),
            highlight: None,
            config,
        };
        state.highlight = state.first_enabled_row();

        let mut effects = Vec::new();
        state.apply_default(props.default_option.as_ref(), &mut effects);

        debug!(
            options = state.options.len(),
            open,
            selected = ?state.selected_key,
            "Select mounted"
        );
        (state, effects)
    }

    /// Apply one event. Returns the effects to run, in order.
    pub fn dispatch(&mut self, event: SelectEvent) -> Vec<Effect> {
        let mut effects = Vec::new();

        match event {
            SelectEvent::Toggle => match self.phase {
                Phase::Closed => {
                    effects.push(Effect::DismissInput);
                    self.begin_open();
                }
                Phase::Opening | Phase::Open => self.begin_close(false),
                Phase::Closing => debug!("Toggle ignored while closing"),
            },
            SelectEvent::Close => match self.phase {
                Phase::Opening | Phase::Open => self.begin_close(false),
                Phase::Closing | Phase::Closed => {}
            },
            SelectEvent::PickRow(row) => self.pick_row(row, &mut effects),
            SelectEvent::PickNotFound => self.pick_not_found(&mut effects),
            SelectEvent::PickHighlighted => {
                if self.filtered.is_empty() {
                    self.pick_not_found(&mut effects);
                } else if let Some(row) = self.highlight {
                    self.pick_row(row, &mut effects);
                }
            }
            SelectEvent::HighlightNext => self.move_highlight(true),
            SelectEvent::HighlightPrev => self.move_highlight(false),
            SelectEvent::InputChar(ch) => self.edit_query(|i| input::handle_char_input(i, ch)),
            SelectEvent::Backspace => self.edit_query(input::handle_backspace),
            SelectEvent::CursorLeft => self.edit_query(input::handle_cursor_left),
            SelectEvent::CursorRight => self.edit_query(input::handle_cursor_right),
            SelectEvent::SetQuery(query) => self.edit_query(|_| SearchInput::with_query(query)),
            SelectEvent::SetOptions(raw) => {
                self.options = ingest(&raw);
                self.refilter();
                debug!(options = self.options.len(), "Options replaced");
            }
            SelectEvent::SetDefaultOption(default) => {
                self.apply_default(default.as_ref(), &mut effects);
            }
            SelectEvent::SetOpen(open) => self.apply_open_directive(open),
            SelectEvent::Tick(dt) => self.tick(dt),
            SelectEvent::Teardown => {
                self.pending_reset.cancel();
                self.extent.stop();
                self.transition = None;
                debug!("Select torn down");
            }
        }

        effects
    }

    // ===== Accessors =====

    pub fn config(&self) -> &SelectConfig {
        &self.config
    }

    /// Full normalized option list.
    pub fn options(&self) -> &[SelectOption] {
        &self.options
    }

    /// Options currently visible in the list.
    pub fn filtered_options(&self) -> &[SelectOption] {
        &self.filtered
    }

    pub fn query(&self) -> &str {
        &self.search.query
    }

    pub fn search_input(&self) -> &SearchInput {
        &self.search
    }

    pub fn selected_key(&self) -> Option<&OptionKey> {
        self.selected_key.as_ref()
    }

    /// Display text of the selection; empty when nothing is selected.
    pub fn selected_value(&self) -> &str {
        &self.selected_value
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Whether the option list is mounted.
    pub fn is_open(&self) -> bool {
        self.phase.is_open()
    }

    /// Current animated extent, in `[0, target_height]`.
    pub fn extent(&self) -> f32 {
        self.extent.value()
    }

    pub fn target_height(&self) -> f32 {
        self.config.target_height
    }

    /// Whether the closed-control row is replaced by the search row.
    pub fn shows_search_row(&self) -> bool {
        self.is_open() && self.config.search
    }

    /// Whether the "not found" row is shown.
    pub fn shows_not_found(&self) -> bool {
        self.is_open() && self.filtered.is_empty()
    }

    /// Highlighted row of the filtered list.
    pub fn highlight(&self) -> Option<usize> {
        self.highlight
    }

    /// Whether a deferred search reset is waiting to fire.
    pub fn reset_pending(&self) -> bool {
        self.pending_reset.is_pending()
    }

    /// Whether any animation or timer still needs ticks.
    pub fn is_animating(&self) -> bool {
        self.extent.is_running() || self.pending_reset.is_pending()
    }

    // ===== Transitions =====

    fn begin_open(&mut self) {
        // A reset still owed by the previous pick runs now, before the new
        // cycle starts, and can no longer fire later.
        let owed_by_close = matches!(
            self.transition,
            Some((_, Transition::Close { reset_search: true }))
        );
        if self.pending_reset.cancel() || owed_by_close {
            self.reset_search();
        }

        self.phase = Phase::Opening;
        let generation = self.extent.start(
            self.config.target_height,
            self.config.animation_duration,
            self.config.easing,
        );
        self.transition = Some((generation, Transition::Open));
        self.refilter();
        debug!(generation, "Opening");
    }

    fn begin_close(&mut self, reset_search: bool) {
        if self.phase == Phase::Closed {
            if reset_search {
                self.pending_reset.schedule(self.config.settle_delay);
            }
            return;
        }

        // Keep a reset owed by an earlier pick when a plain close supersedes it.
        let owed = matches!(
            self.transition,
            Some((_, Transition::Close { reset_search: true }))
        );

        self.phase = Phase::Closing;
        let generation =
            self.extent
                .start(0.0, self.config.animation_duration, self.config.easing);
        self.transition = Some((
            generation,
            Transition::Close {
                reset_search: reset_search || owed,
            },
        ));
        debug!(generation, reset_search, "Closing");
    }

    fn tick(&mut self, dt: Duration) {
        if self.pending_reset.tick(dt) {
            self.reset_search();
        }

        let Some(done) = self.extent.tick(dt) else {
            return;
        };

        match self.transition.take() {
            Some((generation, Transition::Open)) if generation == done.generation => {
                self.phase = Phase::Open;
                debug!("Open");
            }
            Some((generation, Transition::Close { reset_search })) if generation == done.generation => {
                self.phase = Phase::Closed;
                if reset_search {
                    self.pending_reset.schedule(self.config.settle_delay);
                }
                debug!(reset_search, "Closed");
            }
            other => {
                warn!(completed = done.generation, transition = ?other, "Stale animation completion");
                self.transition = other;
            }
        }
    }

    fn apply_open_directive(&mut self, open: bool) {
        if self.last_open_directive == Some(open) {
            return;
        }
        self.last_open_directive = Some(open);

        match (open, self.phase) {
            (true, Phase::Closed | Phase::Closing) => self.begin_open(),
            (false, Phase::Opening | Phase::Open) => self.begin_close(false),
            _ => {}
        }
    }

    // ===== Selection =====

    fn pick_row(&mut self, row: usize, effects: &mut Vec<Effect>) {
        if !self.is_open() {
            debug!(row, "Pick ignored while closed");
            return;
        }
        let Some(option) = self.filtered.get(row) else {
            warn!(row, rows = self.filtered.len(), "Pick of missing row");
            return;
        };
        let Some(commit) = resolve_pick(option, self.config.save) else {
            debug!(row, key = %option.key, "Pick of disabled option ignored");
            return;
        };

        info!(key = %commit.key, reported = %commit.reported, "Option picked");
        self.selected_key = Some(commit.key);
        effects.push(Effect::ReportSelection(Some(commit.reported)));
        self.set_selected_value(commit.display, effects);
        self.begin_close(true);
    }

    fn pick_not_found(&mut self, effects: &mut Vec<Effect>) {
        if !self.shows_not_found() {
            return;
        }

        info!("Selection cleared");
        self.selected_key = None;
        effects.push(Effect::ReportSelection(None));
        self.set_selected_value(String::new(), effects);
        self.begin_close(true);
    }

    fn apply_default(&mut self, default: Option<&DefaultOption>, effects: &mut Vec<Effect>) {
        let Some(adoption) = sync_default(self.last_default_key.as_ref(), default) else {
            return;
        };

        info!(key = %adoption.key, "Default option adopted");
        self.last_default_key = Some(adoption.key.clone());
        self.selected_key = Some(adoption.key.clone());
        effects.push(Effect::ReportSelection(Some(adoption.key)));
        self.set_selected_value(adoption.display, effects);
    }

    fn set_selected_value(&mut self, value: String, effects: &mut Vec<Effect>) {
        if self.selected_value != value {
            self.selected_value = value;
            effects.push(Effect::SelectionChanged);
        }
    }

    // ===== Search =====

    fn edit_query(&mut self, edit: impl FnOnce(SearchInput) -> SearchInput) {
        if !self.shows_search_row() {
            return;
        }
        let before = self.search.query.clone();
        self.search = edit(std::mem::take(&mut self.search));
        if self.search.query != before {
            self.refilter();
        }
    }

    fn refilter(&mut self) {
        self.filtered = filter_options(&self.options, &self.search.query);
        self.highlight = self.first_enabled_row();
    }

    fn reset_search(&mut self) {
        self.search = input::clear(std::mem::take(&mut self.search));
        self.filtered = self.options.clone();
        self.highlight = self.first_enabled_row();
        debug!("Search reset");
    }

    // ===== Highlight =====

    fn first_enabled_row(&self) -> Option<usize> {
        self.filtered.iter().position(|option| !option.disabled)
    }

    fn move_highlight(&mut self, forward: bool) {
        let Some(current) = self.highlight else {
            self.highlight = self.first_enabled_row();
            return;
        };

        let next = if forward {
            self.filtered
                .iter()
                .enumerate()
                .skip(current + 1)
                .find(|(_, option)| !option.disabled)
                .map(|(idx, _)| idx)
        } else {
            self.filtered[..current.min(self.filtered.len())]
                .iter()
                .rposition(|option| !option.disabled)
        };

        if let Some(next) = next {
            self.highlight = Some(next);
        }
    }
}

/// Normalize host options, logging entries that can never be searched.
fn ingest(raw: &[RawOption]) -> Vec<SelectOption> {
    let options = normalize_all(raw);
    let unsearchable = options.iter().filter(|o| o.label().is_none()).count();
    if unsearchable > 0 {
        warn!(
            unsearchable,
            "Options without a textual value never match a search"
        );
    }
    options
}

// ===== Tests =====

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
