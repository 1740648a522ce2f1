//! Selection resolution (pure).
//!
//! Two entry points feed the selection: a user pick from the list, and the
//! externally supplied default option. Both are decided here; the store
//! applies the outcome and emits effects.

use crate::model::{DefaultOption, OptionKey, SaveMode, SelectOption};

/// Outcome of a successful pick.
#[derive(Debug, Clone, PartialEq)]
pub struct Commit {
    /// Effective key of the picked option.
    pub key: OptionKey,
    /// Identifier reported to the host (key or value, per save mode).
    pub reported: OptionKey,
    /// Display text for the closed control.
    pub display: String,
}

/// Resolve a pick of `option` under `save`.
///
/// Disabled options are inert: `None`, regardless of how the pick arrived.
pub fn resolve_pick(option: &SelectOption, save: SaveMode) -> Option<Commit> {
    if option.disabled {
        return None;
    }

    let reported = match save {
        SaveMode::Value => OptionKey::new(option.value.clone()),
        SaveMode::Key => option.key.clone(),
    };

    Some(Commit {
        key: option.key.clone(),
        reported,
        display: option.display_text(),
    })
}

/// A default option the widget should adopt.
#[derive(Debug, Clone, PartialEq)]
pub struct Adoption {
    pub key: OptionKey,
    pub display: String,
}

/// Decide whether `incoming` replaces the current selection.
///
/// A default is adopted when its key is defined and differs from
/// `last_observed`. Keys compare by equality; the value is ignored. An
/// undefined key means "no default" on first mount and on every update.
pub fn sync_default(
    last_observed: Option<&OptionKey>,
    incoming: Option<&DefaultOption>,
) -> Option<Adoption> {
    let default = incoming?;
    let key = default.defined_key()?;

    if last_observed == Some(&key) {
        return None;
    }

    Some(Adoption {
        key,
        display: default.display_value(),
    })
}
