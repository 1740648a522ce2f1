//! Option list input.
//!
//! Options come from a file or piped stdin, read once before the picker
//! starts. Two formats are accepted:
//! - a JSON array of option entries (records or scalars)
//! - plain text, one scalar string option per non-empty line

use crate::model::error::InputError;
use crate::model::RawOption;
use serde_json::Value;
use std::io::{IsTerminal, Read};
use std::path::PathBuf;
use tracing::{info, warn};

/// Read the option list from `file`, or from stdin when no file is given.
///
/// # Errors
///
/// - `InputError::FileNotFound` if the file does not exist
/// - `InputError::NoInput` if no file is given and stdin is a terminal
/// - `InputError::Empty` if the input is blank
/// - `InputError::Io` for read failures
pub fn read_options(file: Option<PathBuf>) -> Result<Vec<RawOption>, InputError> {
    match file {
        Some(path) => {
            if !path.exists() {
                return Err(InputError::FileNotFound { path });
            }
            let text = std::fs::read_to_string(&path)?;
            info!(path = %path.display(), "Read options file");
            parse_options(&text)
        }
        None => {
            let stdin = std::io::stdin();
            if stdin.is_terminal() {
                return Err(InputError::NoInput);
            }
            read_from(stdin.lock())
        }
    }
}

/// Read the option list from any reader.
///
/// # Errors
///
/// Returns `InputError::Io` for read failures and `InputError::Empty` for
/// blank input.
pub fn read_from<R: Read>(mut reader: R) -> Result<Vec<RawOption>, InputError> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    parse_options(&text)
}

/// Parse option text.
///
/// Text that parses as a JSON array becomes one option per element. Anything
/// else is split into lines; each non-empty trimmed line is a string option.
///
/// # Errors
///
/// Returns `InputError::Empty` when the text has no non-whitespace content.
pub fn parse_options(text: &str) -> Result<Vec<RawOption>, InputError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(InputError::Empty);
    }

    if trimmed.starts_with('[') {
        match serde_json::from_str::<Vec<RawOption>>(trimmed) {
            Ok(options) => return Ok(options),
            Err(e) => warn!(error = %e, "Input is not a JSON array, reading lines"),
        }
    }

    Ok(trimmed
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| RawOption::scalar(Value::String(line.to_string())))
        .collect())
}
