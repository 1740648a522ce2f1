//! select-list - Entry Point

use clap::Parser;
use select_list::config::loader::is_valid_max_height;
use select_list::config::CliOverrides;
use select_list::model::{DefaultOption, SaveMode};
use select_list::state::SelectProps;
use select_list::view::{ColorConfig, Outcome};
use serde_json::Value;
use std::path::PathBuf;
use tracing::info;

/// Searchable single-select picker for the terminal
#[derive(Parser, Debug)]
#[command(name = "select-list")]
#[command(version)]
#[command(about = "Pick one option from a JSON array or a list of lines")]
pub struct Args {
    /// Path to options file (reads from stdin if not provided)
    pub file: Option<PathBuf>,

    /// Report the key or the value of the picked option
    #[arg(long, value_parser = parse_save_mode)]
    pub save: Option<SaveMode>,

    /// Hide the search row
    #[arg(long)]
    pub no_search: bool,

    /// Text shown while nothing is selected
    #[arg(long)]
    pub placeholder: Option<String>,

    /// Key of the pre-selected option (JSON, or a bare string)
    #[arg(long)]
    pub default_key: Option<String>,

    /// Displayed value of the pre-selected option
    #[arg(long, requires = "default_key")]
    pub default_value: Option<String>,

    /// Start with the list open
    #[arg(long)]
    pub open: bool,

    /// Open extent of the dropdown (20 units per row)
    #[arg(long, value_parser = parse_max_height)]
    pub max_height: Option<f32>,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Disable colors
    #[arg(long)]
    pub no_color: bool,
}

fn parse_save_mode(raw: &str) -> Result<SaveMode, String> {
    SaveMode::parse(raw).ok_or_else(|| format!("expected 'key' or 'value', got '{raw}'"))
}

fn parse_max_height(raw: &str) -> Result<f32, String> {
    match raw.parse::<f32>() {
        Ok(height) if is_valid_max_height(height) => Ok(height),
        _ => Err(format!("expected a positive number, got '{raw}'")),
    }
}

/// Interpret `--default-key`: valid JSON as-is, anything else as a string.
fn parse_key(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

impl Args {
    fn cli_overrides(&self) -> CliOverrides {
        CliOverrides {
            save: self.save,
            search: if self.no_search { Some(false) } else { None },
            placeholder: self.placeholder.clone(),
            max_height: self.max_height,
        }
    }

    fn default_option(&self) -> Option<DefaultOption> {
        let key = parse_key(self.default_key.as_deref()?);
        let value = self
            .default_value
            .clone()
            .map(Value::String)
            .unwrap_or_else(|| key.clone());
        Some(DefaultOption {
            key: Some(key),
            value: Some(value),
        })
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Load configuration with full precedence chain:
    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = select_list::config::load_config_with_precedence(args.config.clone())?;
        let merged = select_list::config::merge_config(config_file);
        let with_env = select_list::config::apply_env_overrides(merged);
        select_list::config::apply_cli_overrides(with_env, args.cli_overrides())
    };

    select_list::logging::init(&config.log_file_path)?;

    info!(config = ?config, "Configuration loaded and resolved");

    let options = select_list::source::read_options(args.file.clone())?;
    let props = SelectProps {
        options,
        default_option: args.default_option(),
        open: args.open.then_some(true),
    };

    let colors = ColorConfig::from_env_and_args(args.no_color);
    let outcome = select_list::view::run_with_config(props, &config, colors)?;

    info!(?outcome, "Picker finished");
    match outcome {
        Outcome::Selected(key) => println!("{key}"),
        Outcome::Cleared | Outcome::Dismissed => {}
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_help_does_not_error() {
        let result = Args::try_parse_from(["select-list", "--help"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_version_does_not_error() {
        let result = Args::try_parse_from(["select-list", "--version"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_no_args_defaults() {
        let args = Args::parse_from(["select-list"]);
        assert_eq!(args.file, None);
        assert_eq!(args.save, None);
        assert!(!args.no_search);
        assert_eq!(args.placeholder, None);
        assert_eq!(args.default_key, None);
        assert!(!args.open);
        assert_eq!(args.max_height, None);
        assert_eq!(args.config, None);
        assert!(!args.no_color);
        assert_eq!(args.cli_overrides(), CliOverrides::default());
    }

    #[test]
    fn test_file_path_populates_file_field() {
        let args = Args::parse_from(["select-list", "colors.json"]);
        assert_eq!(args.file, Some(PathBuf::from("colors.json")));
    }

    #[test]
    fn test_save_value() {
        let args = Args::parse_from(["select-list", "--save", "value"]);
        assert_eq!(args.save, Some(SaveMode::Value));
    }

    #[test]
    fn test_save_invalid_rejects() {
        let result = Args::try_parse_from(["select-list", "--save", "label"]);
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn test_max_height_rejects_zero() {
        let result = Args::try_parse_from(["select-list", "--max-height", "0"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_no_search_overrides_search() {
        let args = Args::parse_from(["select-list", "--no-search", "--placeholder", "Pick"]);
        let overrides = args.cli_overrides();
        assert_eq!(overrides.search, Some(false));
        assert_eq!(overrides.placeholder, Some("Pick".to_string()));
    }

    #[test]
    fn test_default_value_requires_default_key() {
        let result = Args::try_parse_from(["select-list", "--default-value", "Red"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_default_key_parses_json_number() {
        let args = Args::parse_from(["select-list", "--default-key", "3", "--default-value", "Green"]);
        assert_eq!(
            args.default_option(),
            Some(DefaultOption::new(3_i64, "Green"))
        );
    }

    #[test]
    fn test_default_key_bare_string_is_value_too() {
        let args = Args::parse_from(["select-list", "--default-key", "red"]);
        assert_eq!(args.default_option(), Some(DefaultOption::new("red", "red")));
    }

    #[test]
    fn test_open_sets_open_directive() {
        let args = Args::parse_from(["select-list", "--open"]);
        assert!(args.open);
        assert_eq!(args.open.then_some(true), Some(true));
    }

    #[test]
    fn test_combined_flags() {
        let args = Args::parse_from([
            "select-list",
            "opts.json",
            "--save",
            "key",
            "--max-height",
            "120",
            "--config",
            "/custom/config.toml",
            "--no-color",
        ]);
        assert_eq!(args.file, Some(PathBuf::from("opts.json")));
        assert_eq!(args.save, Some(SaveMode::Key));
        assert_eq!(args.max_height, Some(120.0));
        assert_eq!(args.config, Some(PathBuf::from("/custom/config.toml")));
        assert!(args.no_color);
    }
}
