//! Cell Formatting
//!
//! Turns arbitrary JSON property values into short inline text plus an
//! optional detail string (the full value, shown in the detail popup).

use serde_json::{Map, Value};

/// Shown for missing values and empty arrays
pub const PLACEHOLDER: &str = "-";

/// Scalars longer than this are truncated
pub const SCALAR_MAX_CHARS: usize = 50;

/// Tag width when the whole array fits
pub const TAG_MAX_CHARS: usize = 20;

/// Tag width when an overflow tag follows
pub const TAG_MAX_CHARS_OVERFLOW: usize = 15;

/// Number of array items shown inline
pub const VISIBLE_TAGS: usize = 2;

/// Shape of a property value
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Null,
    Scalar(String),
    Array(Vec<String>),
    Object(Map<String, Value>),
}

impl From<&Value> for CellValue {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => CellValue::Null,
            Value::Array(items) => CellValue::Array(items.iter().map(item_text).collect()),
            Value::Object(map) => CellValue::Object(map.clone()),
            scalar => CellValue::Scalar(item_text(scalar)),
        }
    }
}

impl From<Option<&Value>> for CellValue {
    fn from(value: Option<&Value>) -> Self {
        value.map(CellValue::from).unwrap_or(CellValue::Null)
    }
}

/// String form of a single value; strings are not quoted
fn item_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        other => other.to_string(),
    }
}

/// Formatted cell
#[derive(Debug, Clone, PartialEq)]
pub enum CellDisplay {
    Placeholder,
    Text {
        text: String,
        detail: Option<String>,
    },
    Tags {
        tags: Vec<String>,
        /// Count of items not shown inline
        overflow: Option<usize>,
        detail: Option<String>,
    },
    Object {
        detail: String,
    },
}

impl CellDisplay {
    /// Single-line rendering for grids and plain-text output
    pub fn inline(&self) -> String {
        match self {
            CellDisplay::Placeholder => PLACEHOLDER.to_string(),
            CellDisplay::Text { text, .. } => text.clone(),
            CellDisplay::Tags { tags, overflow, .. } => {
                let mut parts: Vec<String> = tags.iter().map(|t| format!("[{}]", t)).collect();
                if let Some(n) = overflow {
                    parts.push(format!("[+{}]", n));
                }
                parts.join(" ")
            }
            CellDisplay::Object { .. } => "Object".to_string(),
        }
    }

    /// Full value, present only when the inline form hides something
    pub fn detail(&self) -> Option<&str> {
        match self {
            CellDisplay::Placeholder => None,
            CellDisplay::Text { detail, .. } | CellDisplay::Tags { detail, .. } => {
                detail.as_deref()
            }
            CellDisplay::Object { detail } => Some(detail),
        }
    }
}

pub fn format_cell(value: &CellValue) -> CellDisplay {
    match value {
        CellValue::Null => CellDisplay::Placeholder,
        CellValue::Array(items) if items.is_empty() => CellDisplay::Placeholder,
        CellValue::Array(items) if items.len() <= VISIBLE_TAGS => CellDisplay::Tags {
            tags: items.iter().map(|i| truncate_chars(i, TAG_MAX_CHARS)).collect(),
            overflow: None,
            detail: None,
        },
        CellValue::Array(items) => CellDisplay::Tags {
            tags: items
                .iter()
                .take(VISIBLE_TAGS)
                .map(|i| truncate_chars(i, TAG_MAX_CHARS_OVERFLOW))
                .collect(),
            overflow: Some(items.len() - VISIBLE_TAGS),
            detail: Some(items.join(", ")),
        },
        CellValue::Object(map) => CellDisplay::Object {
            detail: serde_json::to_string_pretty(map).unwrap_or_default(),
        },
        CellValue::Scalar(text) if text.chars().count() <= SCALAR_MAX_CHARS => {
            CellDisplay::Text {
                text: text.clone(),
                detail: None,
            }
        }
        CellValue::Scalar(text) => CellDisplay::Text {
            text: format!("{}...", truncate_chars(text, SCALAR_MAX_CHARS)),
            detail: Some(text.clone()),
        },
    }
}

/// First `max` characters of `s`
pub fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}
