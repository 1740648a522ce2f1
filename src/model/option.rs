//! Option entries and their canonical form.
//!
//! Hosts hand the widget heterogeneous entries: bare scalars (`"Red"`, `42`) or
//! records with optional `key`, `value` and `disabled` fields. Everything is
//! normalized at ingestion into [`SelectOption`]; internal logic never looks at
//! a [`RawOption`] again.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

// ===== OptionKey =====

/// Identifier of an option as reported to the host.
///
/// Any JSON value may serve as a key. Keys compare by value equality.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptionKey(Value);

impl OptionKey {
    pub fn new(value: impl Into<Value>) -> Self {
        Self(value.into())
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

/// Strings render without quotes; everything else renders as compact JSON.
impl fmt::Display for OptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Value::String(s) => f.write_str(s),
            other => write!(f, "{}", other),
        }
    }
}

impl From<Value> for OptionKey {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

impl From<&str> for OptionKey {
    fn from(value: &str) -> Self {
        Self(Value::from(value))
    }
}

impl From<String> for OptionKey {
    fn from(value: String) -> Self {
        Self(Value::from(value))
    }
}

impl From<i64> for OptionKey {
    fn from(value: i64) -> Self {
        Self(Value::from(value))
    }
}

// ===== RawOption =====

/// Record-shaped option entry. All fields optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OptionRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disabled: Option<bool>,
    /// Unrecognized fields, kept so the raw-entry fallback stays faithful.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// An option entry exactly as supplied by the host.
///
/// Sum type: either a record or a bare scalar. A JSON object always
/// deserializes as a record, even when it carries none of the known fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawOption {
    Record(OptionRecord),
    Scalar(Value),
}

impl RawOption {
    /// Record with key and value.
    pub fn entry(key: impl Into<Value>, value: impl Into<Value>) -> Self {
        RawOption::Record(OptionRecord {
            key: Some(key.into()),
            value: Some(value.into()),
            ..Default::default()
        })
    }

    /// Record with key and value, marked disabled.
    pub fn disabled(key: impl Into<Value>, value: impl Into<Value>) -> Self {
        RawOption::Record(OptionRecord {
            key: Some(key.into()),
            value: Some(value.into()),
            disabled: Some(true),
            ..Default::default()
        })
    }

    /// Bare scalar entry.
    pub fn scalar(value: impl Into<Value>) -> Self {
        RawOption::Scalar(value.into())
    }

    /// The entry as a JSON value, used when the entry itself is the fallback.
    fn to_value(&self) -> Value {
        match self {
            RawOption::Scalar(v) => v.clone(),
            RawOption::Record(record) => {
                serde_json::to_value(record).unwrap_or(Value::Object(Default::default()))
            }
        }
    }

    /// Normalize into the canonical `(key, value, disabled)` record.
    ///
    /// Effective key is `key`, else `value`, else the raw entry.
    /// Effective value is `value`, else the raw entry.
    pub fn normalize(&self) -> SelectOption {
        match self {
            RawOption::Scalar(v) => SelectOption {
                key: OptionKey(v.clone()),
                value: v.clone(),
                disabled: false,
            },
            RawOption::Record(record) => {
                let raw = self.to_value();
                let key = record
                    .key
                    .clone()
                    .or_else(|| record.value.clone())
                    .unwrap_or_else(|| raw.clone());
                let value = record.value.clone().unwrap_or(raw);
                SelectOption {
                    key: OptionKey(key),
                    value,
                    disabled: record.disabled.unwrap_or(false),
                }
            }
        }
    }
}

// ===== SelectOption =====

/// Canonical option record. Immutable once normalized.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectOption {
    pub key: OptionKey,
    pub value: Value,
    pub disabled: bool,
}

impl SelectOption {
    /// Textual display value, if the effective value is a string.
    ///
    /// Filtering only ever matches against this.
    pub fn label(&self) -> Option<&str> {
        self.value.as_str()
    }

    /// Display text for any value shape.
    pub fn display_text(&self) -> String {
        display_text(&self.value)
    }
}

/// Render a JSON value for display: strings verbatim, others as compact JSON.
pub fn display_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Normalize a host option list at the boundary.
pub fn normalize_all(raw: &[RawOption]) -> Vec<SelectOption> {
    raw.iter().map(RawOption::normalize).collect()
}

// ===== DefaultOption / SaveMode =====

/// Externally supplied pre-selection.
///
/// A default whose `key` is `None` is treated as no default at all.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DefaultOption {
    #[serde(default)]
    pub key: Option<Value>,
    #[serde(default)]
    pub value: Option<Value>,
}

impl DefaultOption {
    pub fn new(key: impl Into<Value>, value: impl Into<Value>) -> Self {
        Self {
            key: Some(key.into()),
            value: Some(value.into()),
        }
    }

    /// The key, when defined.
    pub fn defined_key(&self) -> Option<OptionKey> {
        self.key.clone().map(OptionKey)
    }

    /// Display string for the closed control.
    pub fn display_value(&self) -> String {
        self.value.as_ref().map(display_text).unwrap_or_default()
    }
}

/// Which part of a picked option is reported to the host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SaveMode {
    #[default]
    Key,
    Value,
}

impl SaveMode {
    /// Parse `"key"` / `"value"` (case-insensitive).
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "key" => Some(SaveMode::Key),
            "value" => Some(SaveMode::Value),
            _ => None,
        }
    }
}
