//! Domain model types (pure).
//!
//! All types in this module are pure data; option entries are normalized at
//! the boundary by `RawOption::normalize`.

pub mod error;
pub mod key_action;
pub mod option;

// Re-export for convenience
pub use error::{AppError, InputError};
pub use key_action::KeyAction;
pub use option::{
    display_text, normalize_all, DefaultOption, OptionKey, OptionRecord, RawOption, SaveMode,
    SelectOption,
};
