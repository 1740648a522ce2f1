//! Dropdown state machine (pure).
//!
//! All state transitions are pure functions or reducer steps testable
//! without a terminal.

pub mod animation;
pub mod filter;
pub mod search_input_handler;
pub mod selection;
pub mod store;
pub mod timer;

// Re-export for convenience
pub use animation::{AnimationController, Easing, Phase};
pub use filter::filter_options;
pub use search_input_handler::SearchInput;
pub use selection::{resolve_pick, sync_default, Adoption, Commit};
pub use store::{Effect, SelectConfig, SelectEvent, SelectProps, SelectState};
pub use timer::ScheduledTask;
