//! Error types for the select-list host.
//!
//! The widget itself has no fatal error states: malformed options, empty lists
//! and undefined default keys all degrade to a visible, safe UI state. The
//! errors here belong to the host shell (reading option input, driving the
//! terminal).
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Top-level error for the binary
//!   - [`InputError`] - Option list file/stdin failures
//!   - `std::io::Error` - Terminal failures

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error.
///
/// Domain errors convert via `From`, so `?` works throughout the shell.
#[derive(Debug, Error)]
pub enum AppError {
    /// Failed to read the option list.
    #[error("Failed to read options: {0}")]
    Input(#[from] InputError),

    /// Terminal or rendering failure.
    ///
    /// Fatal: the terminal is restored and the process exits.
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

/// Errors encountered when reading the option list.
#[derive(Debug, Error)]
pub enum InputError {
    /// The options file does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::PathBuf;
    /// use select_list::model::error::InputError;
    ///
    /// let err = InputError::FileNotFound {
    ///     path: PathBuf::from("/tmp/missing.json")
    /// };
    /// assert!(err.to_string().contains("/tmp/missing.json"));
    /// ```
    #[error("File not found: {path}")]
    FileNotFound {
        /// Path that was attempted.
        path: PathBuf,
    },

    /// No file argument and stdin is an interactive terminal.
    #[error("No input: provide an options file or pipe options via stdin")]
    NoInput,

    /// The input held no options at all.
    #[error("No options found in input")]
    Empty,

    /// Generic I/O failure while reading.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
