//! Collection filters.
//!
//! Filters travel as one JSON array in the `filters` query parameter:
//! `[{"status": {"operator": "o", "values": []}}, ...]`.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use serde_json::Value;

/// Common filter operators.
pub mod operators {
    /// Equals one of the values.
    pub const EQUALS: &str = "=";
    /// Equals none of the values.
    pub const NOT_EQUALS: &str = "!";
    /// Contains the text.
    pub const CONTAINS: &str = "~";
    /// Does not contain the text.
    pub const NOT_CONTAINS: &str = "!~";
    /// Greater than or equal.
    pub const GREATER_OR_EQUAL: &str = ">=";
    /// Less than or equal.
    pub const LESS_OR_EQUAL: &str = "<=";
    /// Between two dates.
    pub const BETWEEN_DATES: &str = "<>d";
    /// Status is open.
    pub const OPEN: &str = "o";
    /// Status is closed.
    pub const CLOSED: &str = "c";
    /// Has any value.
    pub const ANY: &str = "*";
    /// Has no value.
    pub const NONE: &str = "!*";
}

/// One filter condition: an operator and its operands.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterOperator {
    pub operator: String,
    pub values: Vec<Value>,
}

/// A list of filter conditions, all of which must hold.
///
/// # Example
///
/// ```
/// use ophal::{operators, Filters};
///
/// let filters = Filters::new()
///     .filter("status", operators::OPEN, Vec::<String>::new())
///     .filter("assignee", operators::EQUALS, ["me"]);
/// assert_eq!(
///     filters.to_string(),
///     r#"[{"status":{"operator":"o","values":[]}},{"assignee":{"operator":"=","values":["me"]}}]"#
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Filters(Vec<BTreeMap<String, FilterOperator>>);

impl Filters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a condition on `name`.
    #[must_use]
    pub fn filter<I, V>(mut self, name: impl Into<String>, operator: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let mut filter = BTreeMap::new();
        filter.insert(
            name.into(),
            FilterOperator {
                operator: operator.into(),
                values: values.into_iter().map(Into::into).collect(),
            },
        );
        self.0.push(filter);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Append the `filters` query parameter to a path, unless empty.
    pub fn apply_to(&self, path: &str) -> String {
        if self.is_empty() {
            return path.to_string();
        }
        let separator = if path.contains('?') { '&' } else { '?' };
        format!(
            "{path}{separator}filters={}",
            urlencoding::encode(&self.to_string())
        )
    }
}

/// Compact JSON, or the empty string for no filters.
impl fmt::Display for Filters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return Ok(());
        }
        let json = serde_json::to_string(&self.0).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}
