//! Layout dimension constants for TUI rendering.
//!
//! Centralized location for layout and timing values of the terminal picker.

use std::time::Duration;

/// Height of the control row in lines (border + content).
///
/// Shared by the closed control and the search row that replaces it.
pub const CONTROL_HEIGHT: u16 = 3;

/// Extent units per terminal row.
///
/// The dropdown extent is measured in abstract units; the default open
/// extent of 200 maps to a 10-row panel.
pub const UNITS_PER_ROW: f32 = 20.0;

/// Horizontal padding between the border and the text or icons.
pub const ROW_PADDING: u16 = 1;

/// Widest the picker gets on large terminals.
pub const MAX_WIDTH: u16 = 60;

/// Poll interval while an animation or deferred reset is running.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Poll interval while idle.
pub const IDLE_INTERVAL: Duration = Duration::from_millis(250);
