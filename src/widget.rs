//! Host adapter: the dropdown as a component with callbacks.
//!
//! Wraps a [`SelectState`] and runs the effects of every dispatch against the
//! host's callbacks. The report callback is the only data the host receives.

use crate::model::{DefaultOption, OptionKey, RawOption};
use crate::state::{Effect, SelectConfig, SelectEvent, SelectProps, SelectState};
use std::fmt;
use std::time::Duration;

type ReportFn = Box<dyn FnMut(Option<&OptionKey>)>;
type NotifyFn = Box<dyn FnMut()>;

/// Single-select dropdown component.
///
/// Torn down on drop: pending animation and deferred reset are cancelled.
pub struct SelectList {
    state: SelectState,
    on_report: ReportFn,
    on_select: NotifyFn,
    on_dismiss_input: Option<NotifyFn>,
}

/// Collects the host callbacks, then mounts on [`SelectListBuilder::build`] so
/// every callback sees the effects of the first render.
pub struct SelectListBuilder {
    config: SelectConfig,
    props: SelectProps,
    on_report: ReportFn,
    on_select: NotifyFn,
    on_dismiss_input: Option<NotifyFn>,
}

impl SelectListBuilder {
    /// Post-selection notification, fired after every selection change,
    /// including a default adopted at mount.
    pub fn on_select(mut self, callback: impl FnMut() + 'static) -> Self {
        self.on_select = Box::new(callback);
        self
    }

    /// Called before opening so the host can drop text-input focus.
    pub fn on_dismiss_input(mut self, callback: impl FnMut() + 'static) -> Self {
        self.on_dismiss_input = Some(Box::new(callback));
        self
    }

    /// Mount the component. Effects of the first render (an adopted default)
    /// are delivered before this returns.
    pub fn build(self) -> SelectList {
        let (state, effects) = SelectState::mount(self.config, self.props);
        let mut list = SelectList {
            state,
            on_report: self.on_report,
            on_select: self.on_select,
            on_dismiss_input: self.on_dismiss_input,
        };
        list.run_effects(effects);
        list
    }
}

impl SelectList {
    pub fn builder(
        config: SelectConfig,
        props: SelectProps,
        on_report: impl FnMut(Option<&OptionKey>) + 'static,
    ) -> SelectListBuilder {
        SelectListBuilder {
            config,
            props,
            on_report: Box::new(on_report),
            on_select: Box::new(|| {}),
            on_dismiss_input: None,
        }
    }

    /// Mount with only the report callback.
    pub fn new(
        config: SelectConfig,
        props: SelectProps,
        on_report: impl FnMut(Option<&OptionKey>) + 'static,
    ) -> Self {
        Self::builder(config, props, on_report).build()
    }

    pub fn state(&self) -> &SelectState {
        &self.state
    }

    /// Dispatch an event and run its effects.
    pub fn dispatch(&mut self, event: SelectEvent) {
        let effects = self.state.dispatch(event);
        self.run_effects(effects);
    }

    pub fn toggle(&mut self) {
        self.dispatch(SelectEvent::Toggle);
    }

    pub fn close(&mut self) {
        self.dispatch(SelectEvent::Close);
    }

    pub fn pick_row(&mut self, row: usize) {
        self.dispatch(SelectEvent::PickRow(row));
    }

    pub fn pick_not_found(&mut self) {
        self.dispatch(SelectEvent::PickNotFound);
    }

    pub fn input_char(&mut self, ch: char) {
        self.dispatch(SelectEvent::InputChar(ch));
    }

    pub fn backspace(&mut self) {
        self.dispatch(SelectEvent::Backspace);
    }

    pub fn set_options(&mut self, options: Vec<RawOption>) {
        self.dispatch(SelectEvent::SetOptions(options));
    }

    pub fn set_default_option(&mut self, default: Option<DefaultOption>) {
        self.dispatch(SelectEvent::SetDefaultOption(default));
    }

    pub fn set_open(&mut self, open: bool) {
        self.dispatch(SelectEvent::SetOpen(open));
    }

    pub fn tick(&mut self, dt: Duration) {
        self.dispatch(SelectEvent::Tick(dt));
    }

    fn run_effects(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::ReportSelection(key) => (self.on_report)(key.as_ref()),
                Effect::SelectionChanged => (self.on_select)(),
                Effect::DismissInput => {
                    if let Some(dismiss) = self.on_dismiss_input.as_mut() {
                        dismiss();
                    }
                }
            }
        }
    }
}

impl fmt::Debug for SelectList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectList")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl Drop for SelectList {
    fn drop(&mut self) {
        self.state.dispatch(SelectEvent::Teardown);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Reports = Rc<RefCell<Vec<Option<OptionKey>>>>;

    fn recorder() -> (Reports, impl FnMut(Option<&OptionKey>) + 'static) {
        let reports: Reports = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&reports);
        (reports, move |key: Option<&OptionKey>| {
            sink.borrow_mut().push(key.cloned())
        })
    }

    fn colors() -> Vec<RawOption> {
        vec![
            RawOption::entry(1, "Red"),
            RawOption::disabled(2, "Blue"),
            RawOption::entry(3, "Green"),
        ]
    }

    #[test]
    fn default_is_reported_during_mount() {
        let (reports, report) = recorder();
        let _list = SelectList::new(
            SelectConfig::default(),
            SelectProps {
                options: colors(),
                default_option: Some(DefaultOption::new("a", "Alpha")),
                open: None,
            },
            report,
        );

        assert_eq!(*reports.borrow(), vec![Some(OptionKey::from("a"))]);
    }

    #[test]
    fn default_adopted_at_mount_notifies_once() {
        let (_reports, report) = recorder();
        let notified = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&notified);

        let _list = SelectList::builder(
            SelectConfig::default(),
            SelectProps {
                options: colors(),
                default_option: Some(DefaultOption::new("a", "Alpha")),
                open: None,
            },
            report,
        )
        .on_select(move || *counter.borrow_mut() += 1)
        .build();

        assert_eq!(*notified.borrow(), 1);
    }

    #[test]
    fn mount_without_default_does_not_notify() {
        let (_reports, report) = recorder();
        let notified = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&notified);

        let _list = SelectList::builder(
            SelectConfig::default(),
            SelectProps {
                options: colors(),
                ..Default::default()
            },
            report,
        )
        .on_select(move || *counter.borrow_mut() += 1)
        .build();

        assert_eq!(*notified.borrow(), 0);
    }

    #[test]
    fn pick_reports_and_notifies() {
        let (reports, report) = recorder();
        let notified = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&notified);

        let mut list = SelectList::builder(
            SelectConfig::default(),
            SelectProps {
                options: colors(),
                ..Default::default()
            },
            report,
        )
        .on_select(move || *counter.borrow_mut() += 1)
        .build();

        list.toggle();
        list.pick_row(2);

        assert_eq!(*reports.borrow(), vec![Some(OptionKey::from(3_i64))]);
        assert_eq!(*notified.borrow(), 1);
        assert_eq!(list.state().selected_value(), "Green");
    }

    #[test]
    fn disabled_pick_never_reaches_host() {
        let (reports, report) = recorder();
        let mut list = SelectList::new(
            SelectConfig::default(),
            SelectProps {
                options: colors(),
                ..Default::default()
            },
            report,
        );

        list.toggle();
        list.pick_row(1);
        assert!(reports.borrow().is_empty());
    }

    #[test]
    fn opening_dismisses_input_first() {
        let (_reports, report) = recorder();
        let dismissed = Rc::new(RefCell::new(false));
        let flag = Rc::clone(&dismissed);

        let mut list = SelectList::builder(SelectConfig::default(), SelectProps::default(), report)
            .on_dismiss_input(move || *flag.borrow_mut() = true)
            .build();

        list.toggle();
        assert!(*dismissed.borrow());
    }

    #[test]
    fn not_found_reports_cleared_sentinel() {
        let (reports, report) = recorder();
        let mut list = SelectList::new(SelectConfig::default(), SelectProps::default(), report);

        list.toggle();
        list.pick_not_found();
        assert_eq!(*reports.borrow(), vec![None]);
    }

    #[test]
    fn host_updates_flow_through_helpers() {
        let (reports, report) = recorder();
        let mut list = SelectList::new(SelectConfig::default(), SelectProps::default(), report);

        list.set_options(colors());
        list.set_default_option(Some(DefaultOption::new("b", "Beta")));
        list.set_default_option(Some(DefaultOption::new("b", "Beta")));
        list.set_open(true);
        list.tick(Duration::from_millis(500));
        list.input_char('g');
        list.backspace();
        list.close();

        assert_eq!(*reports.borrow(), vec![Some(OptionKey::from("b"))]);
        assert_eq!(list.state().filtered_options().len(), 3);
    }
}
