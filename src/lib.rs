//! select-list
//!
//! Single-select dropdown widget: a headless state machine (options, search
//! filter, selection, open/close animation) plus a terminal picker built on it.
//!
//! Pure core in [`model`] and [`state`], the callback adapter in [`widget`],
//! and the impure shell in [`view`], [`source`], [`config`] and [`logging`].

pub mod config;
pub mod logging;
pub mod model;
pub mod source;
pub mod state;
pub mod view;
pub mod widget;

pub use widget::{SelectList, SelectListBuilder};
