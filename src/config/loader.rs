//! Configuration file loading with precedence handling.

use crate::model::SaveMode;
use crate::state::store::{
    DEFAULT_ANIMATION_DURATION, DEFAULT_SETTLE_DELAY, DEFAULT_TARGET_HEIGHT,
};
use crate::state::{Easing, SelectConfig};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Placeholder shown in the closed control when nothing is selected.
pub const DEFAULT_PLACEHOLDER: &str = "Select option";

/// Placeholder shown in the empty search row.
pub const DEFAULT_SEARCH_PLACEHOLDER: &str = "search";

/// Text of the row shown when the filtered list is empty.
pub const DEFAULT_NOT_FOUND_TEXT: &str = "No data found";

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "SELECT_LIST_CONFIG";

/// Environment variable overriding the save mode (`key` or `value`).
pub const SAVE_ENV_VAR: &str = "SELECT_LIST_SAVE";

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Config file path contains invalid UTF-8 or cannot be resolved.
    #[error("Invalid config path: {0}")]
    InvalidPath(String),

    /// Failed to read config file (permission issues, not a file).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax or unknown fields.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/select-list/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Closed-control text when nothing is selected.
    #[serde(default)]
    pub placeholder: Option<String>,

    /// Whether the open control shows a search row.
    #[serde(default)]
    pub search: Option<bool>,

    /// Placeholder of the search row.
    #[serde(default)]
    pub search_placeholder: Option<String>,

    /// Text of the "not found" row.
    #[serde(default)]
    pub not_found_text: Option<String>,

    /// Report the key or the value of picked options.
    #[serde(default)]
    pub save: Option<SaveMode>,

    /// Open extent of the dropdown panel.
    #[serde(default)]
    pub max_height: Option<f32>,

    /// Open/close animation duration in milliseconds.
    #[serde(default)]
    pub animation_ms: Option<u64>,

    /// Delay between close completion and search reset, in milliseconds.
    #[serde(default)]
    pub settle_delay_ms: Option<u64>,

    /// Animation timing curve (`linear` or `ease-in-out`).
    #[serde(default)]
    pub easing: Option<Easing>,

    /// Font-family token, passed through to renderers that support one.
    #[serde(default)]
    pub font_family: Option<String>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,

    /// Affordance glyphs.
    #[serde(default)]
    pub icons: Option<IconsSection>,

    /// Style overrides per element.
    #[serde(default)]
    pub styles: Option<StylesSection>,
}

/// `[icons]` section.
///
/// ```toml
/// [icons]
/// search = "?"
/// close = "x"
/// arrow = "v"
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct IconsSection {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub close: Option<String>,
    #[serde(default)]
    pub arrow: Option<String>,
}

/// A single style override. Colors use ratatui color names (`red`,
/// `lightblue`, `#rrggbb`, an index `0`-`255`).
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct StyleSpec {
    #[serde(default)]
    pub fg: Option<String>,
    #[serde(default)]
    pub bg: Option<String>,
    #[serde(default)]
    pub bold: Option<bool>,
}

/// `[styles]` section: one optional override per element.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct StylesSection {
    /// Closed control / search row border.
    #[serde(default, rename = "box")]
    pub box_style: Option<StyleSpec>,
    /// Text in the closed control and the search input.
    #[serde(default)]
    pub input: Option<StyleSpec>,
    /// Dropdown panel border.
    #[serde(default)]
    pub dropdown: Option<StyleSpec>,
    /// Enabled option rows.
    #[serde(default)]
    pub item: Option<StyleSpec>,
    /// Text of enabled option rows.
    #[serde(default)]
    pub item_text: Option<StyleSpec>,
    /// Disabled option rows.
    #[serde(default)]
    pub disabled_item: Option<StyleSpec>,
    /// Text of disabled option rows.
    #[serde(default)]
    pub disabled_text: Option<StyleSpec>,
}

/// Resolved affordance glyphs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Icons {
    pub search: String,
    pub close: String,
    pub arrow: String,
}

impl Default for Icons {
    fn default() -> Self {
        Self {
            search: "⌕".to_string(),
            close: "✕".to_string(),
            arrow: "▾".to_string(),
        }
    }
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub placeholder: String,
    pub search: bool,
    pub search_placeholder: String,
    pub not_found_text: String,
    pub save: SaveMode,
    pub max_height: f32,
    pub animation: Duration,
    pub settle_delay: Duration,
    pub easing: Easing,
    pub font_family: Option<String>,
    pub icons: Icons,
    pub styles: StylesSection,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            search: true,
            search_placeholder: DEFAULT_SEARCH_PLACEHOLDER.to_string(),
            not_found_text: DEFAULT_NOT_FOUND_TEXT.to_string(),
            save: SaveMode::Key,
            max_height: DEFAULT_TARGET_HEIGHT,
            animation: DEFAULT_ANIMATION_DURATION,
            settle_delay: DEFAULT_SETTLE_DELAY,
            easing: Easing::default(),
            font_family: None,
            icons: Icons::default(),
            styles: StylesSection::default(),
            log_file_path: default_log_path(),
        }
    }
}

impl ResolvedConfig {
    /// Behavioral part of the configuration, for the state machine.
    pub fn select_config(&self) -> SelectConfig {
        SelectConfig {
            save: self.save,
            search: self.search,
            target_height: self.max_height,
            animation_duration: self.animation,
            settle_delay: self.settle_delay,
            easing: self.easing,
        }
    }
}

/// Overrides taken from command-line flags. `None` means "not given".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CliOverrides {
    pub save: Option<SaveMode>,
    pub search: Option<bool>,
    pub placeholder: Option<String>,
    pub max_height: Option<f32>,
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/select-list/select-list.log` on Unix-like systems,
/// or appropriate platform path on other systems.
///
/// If state directory cannot be determined, falls back to current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("select-list").join("select-list.log")
    } else {
        PathBuf::from("select-list.log")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    // Missing file is not an error - use defaults
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/select-list/config.toml` on Unix, appropriate path on
/// other platforms. Returns `None` if home directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("select-list").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `SELECT_LIST_CONFIG` environment variable
/// 3. Default path `~/.config/select-list/config.toml`
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
        if env_path.trim().is_empty() {
            return Err(ConfigError::InvalidPath(env_path));
        }
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Whether `height` can serve as the open extent.
pub fn is_valid_max_height(height: f32) -> bool {
    height.is_finite() && height > 0.0
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use default.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    let icons = match config.icons {
        Some(icons) => Icons {
            search: icons.search.unwrap_or(defaults.icons.search),
            close: icons.close.unwrap_or(defaults.icons.close),
            arrow: icons.arrow.unwrap_or(defaults.icons.arrow),
        },
        None => defaults.icons,
    };

    ResolvedConfig {
        placeholder: config.placeholder.unwrap_or(defaults.placeholder),
        search: config.search.unwrap_or(defaults.search),
        search_placeholder: config
            .search_placeholder
            .unwrap_or(defaults.search_placeholder),
        not_found_text: config.not_found_text.unwrap_or(defaults.not_found_text),
        save: config.save.unwrap_or(defaults.save),
        max_height: match config.max_height {
            Some(height) if is_valid_max_height(height) => height,
            Some(height) => {
                tracing::warn!(max_height = height, "Ignoring non-positive max_height");
                defaults.max_height
            }
            None => defaults.max_height,
        },
        animation: config
            .animation_ms
            .map(Duration::from_millis)
            .unwrap_or(defaults.animation),
        settle_delay: config
            .settle_delay_ms
            .map(Duration::from_millis)
            .unwrap_or(defaults.settle_delay),
        easing: config.easing.unwrap_or(defaults.easing),
        font_family: config.font_family.or(defaults.font_family),
        icons,
        styles: config.styles.unwrap_or(defaults.styles),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `SELECT_LIST_SAVE`: Override save mode (`key` or `value`); unknown
///   values are ignored
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(raw) = std::env::var(SAVE_ENV_VAR) {
        match SaveMode::parse(&raw) {
            Some(save) => config.save = save,
            None => tracing::warn!(value = %raw, "Ignoring unknown {}", SAVE_ENV_VAR),
        }
    }

    config
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence and override all other sources.
/// Only applies overrides for flags that were explicitly set by the user.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(mut config: ResolvedConfig, overrides: CliOverrides) -> ResolvedConfig {
    if let Some(save) = overrides.save {
        config.save = save;
    }

    if let Some(search) = overrides.search {
        config.search = search;
    }

    if let Some(placeholder) = overrides.placeholder {
        config.placeholder = placeholder;
    }

    if let Some(max_height) = overrides.max_height.filter(|h| is_valid_max_height(*h)) {
        config.max_height = max_height;
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
