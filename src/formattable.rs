//! Rich-text field values.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{HalError, Result};
use crate::link::nullable_string;

/// Text carried in raw, rendered and declared-format forms at once,
/// e.g. a work package description.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Formattable {
    /// Markup language of `raw` (`markdown`, `plain`, ...).
    #[serde(default, deserialize_with = "nullable_string")]
    pub format: String,
    /// Source text. OpenProject sends `null` for empty descriptions.
    #[serde(default, deserialize_with = "nullable_string")]
    pub raw: String,
    /// Server-rendered HTML.
    #[serde(default, deserialize_with = "nullable_string")]
    pub html: String,
}

impl Formattable {
    pub fn new(format: impl Into<String>, raw: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            format: format.into(),
            raw: raw.into(),
            html: html.into(),
        }
    }

    /// Markdown text with no rendered HTML, as sent in write requests.
    pub fn markdown(raw: impl Into<String>) -> Self {
        Self::new("markdown", raw, "")
    }

    /// Decode a field value.
    ///
    /// A missing or `null` value is `Ok(None)`. Unknown keys are ignored,
    /// known keys must hold strings.
    pub fn from_value(field: &str, value: Option<&Value>) -> Result<Option<Self>> {
        match value {
            None | Some(Value::Null) => Ok(None),
            Some(value) => Self::deserialize(value)
                .map(Some)
                .map_err(|e| HalError::InvalidFormattable {
                    field: field.to_string(),
                    reason: e.to_string(),
                }),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }
}
