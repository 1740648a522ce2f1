//! Picker styling.
//!
//! Base styles per element, optionally overridden from the `[styles]` config
//! section. Colors are dropped entirely under `--no-color` / `NO_COLOR`.

use crate::config::{StyleSpec, StylesSection};
use ratatui::style::{Color, Modifier, Style};
use std::str::FromStr;
use tracing::warn;

// ===== ColorConfig =====

/// Configuration for color output.
///
/// Determines whether colors should be enabled or disabled based on:
/// - `--no-color` CLI flag
/// - `NO_COLOR` environment variable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorConfig {
    enabled: bool,
}

impl ColorConfig {
    /// Create a ColorConfig from CLI args and environment.
    ///
    /// Priority (first match wins):
    /// 1. `--no-color` flag (disables colors)
    /// 2. `NO_COLOR` env var (any value disables colors)
    /// 3. Default: colors enabled
    pub fn from_env_and_args(no_color_flag: bool) -> Self {
        let enabled = !no_color_flag && std::env::var("NO_COLOR").is_err();
        Self { enabled }
    }

    /// Explicit setting, bypassing the environment.
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Check if colors are enabled.
    pub fn colors_enabled(self) -> bool {
        self.enabled
    }
}

// ===== SelectStyles =====

/// Resolved style for every picker element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectStyles {
    pub box_style: Style,
    pub input: Style,
    pub placeholder: Style,
    pub dropdown: Style,
    pub item: Style,
    pub item_text: Style,
    pub disabled_item: Style,
    pub disabled_text: Style,
    pub not_found: Style,
    pub highlight: Style,
    pub cursor: Style,
}

impl SelectStyles {
    /// Base styles for a color setting, without overrides.
    pub fn with_color_config(config: ColorConfig) -> Self {
        // Reverse video works without colors, so highlight and cursor keep it.
        let highlight = Style::default().add_modifier(Modifier::REVERSED);
        let cursor = Style::default().add_modifier(Modifier::REVERSED);

        if config.colors_enabled() {
            Self {
                box_style: Style::default().fg(Color::Gray),
                input: Style::default(),
                placeholder: Style::default().fg(Color::DarkGray),
                dropdown: Style::default().fg(Color::Gray),
                item: Style::default(),
                item_text: Style::default(),
                disabled_item: Style::default(),
                disabled_text: Style::default().fg(Color::DarkGray),
                not_found: Style::default().fg(Color::DarkGray),
                highlight,
                cursor,
            }
        } else {
            Self {
                box_style: Style::default(),
                input: Style::default(),
                placeholder: Style::default(),
                dropdown: Style::default(),
                item: Style::default(),
                item_text: Style::default(),
                disabled_item: Style::default(),
                disabled_text: Style::default(),
                not_found: Style::default(),
                highlight,
                cursor,
            }
        }
    }

    /// Base styles with config overrides applied on top.
    pub fn from_config(config: ColorConfig, overrides: &StylesSection) -> Self {
        let mut styles = Self::with_color_config(config);
        let apply = |base: &mut Style, spec: &Option<StyleSpec>| {
            if let Some(spec) = spec {
                *base = apply_spec(*base, spec, config);
            }
        };

        apply(&mut styles.box_style, &overrides.box_style);
        apply(&mut styles.input, &overrides.input);
        apply(&mut styles.dropdown, &overrides.dropdown);
        apply(&mut styles.item, &overrides.item);
        apply(&mut styles.item_text, &overrides.item_text);
        apply(&mut styles.disabled_item, &overrides.disabled_item);
        apply(&mut styles.disabled_text, &overrides.disabled_text);
        styles
    }
}

impl Default for SelectStyles {
    fn default() -> Self {
        Self::with_color_config(ColorConfig::from_env_and_args(false))
    }
}

/// Layer one override onto a base style.
///
/// Unparseable color names are logged and skipped. Colors are ignored when
/// color output is disabled; `bold` always applies.
pub fn apply_spec(base: Style, spec: &StyleSpec, config: ColorConfig) -> Style {
    let mut style = base;

    if config.colors_enabled() {
        if let Some(fg) = spec.fg.as_deref().and_then(parse_color) {
            style = style.fg(fg);
        }
        if let Some(bg) = spec.bg.as_deref().and_then(parse_color) {
            style = style.bg(bg);
        }
    }

    match spec.bold {
        Some(true) => style = style.add_modifier(Modifier::BOLD),
        Some(false) => style = style.remove_modifier(Modifier::BOLD),
        None => {}
    }

    style
}

fn parse_color(name: &str) -> Option<Color> {
    match Color::from_str(name) {
        Ok(color) => Some(color),
        Err(_) => {
            warn!(color = name, "Ignoring unknown color in style override");
            None
        }
    }
}

// ===== Tests =====
