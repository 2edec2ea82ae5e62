//! The HAL `Error` resource.

use std::fmt;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::decode::read_type;
use crate::error::{HalError, Result};
use crate::link::{nullable_string, Link};
use crate::traits::HalResource;

/// An error reported by the server as a HAL resource.
///
/// Multi-error responses carry the individual failures in [`errors`];
/// validation failures usually name the offending attribute in [`details`].
///
/// [`errors`]: ApiError::errors
/// [`details`]: ApiError::details
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApiError {
    /// URN-like identifier, e.g. `urn:openproject-org:api:v3:errors:NotFound`.
    pub error_identifier: String,
    /// Human readable message.
    pub message: String,
    /// Nested errors of a multi-error response.
    pub errors: Vec<ApiError>,
    /// Free-form details object.
    pub details: Option<Map<String, Value>>,
}

impl ApiError {
    /// The `_type` of error resources.
    pub const TYPE_NAME: &'static str = "Error";

    pub fn new(error_identifier: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error_identifier: error_identifier.into(),
            message: message.into(),
            ..Self::default()
        }
    }

    /// Whether the server bundled several errors into this one.
    pub fn is_multiple(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Decode an error document. Unknown keys are ignored.
    ///
    /// Every entry of `_embedded.errors` must itself be typed `Error`.
    pub(crate) fn from_map(map: &Map<String, Value>) -> Result<Self> {
        let document = ErrorDocument::deserialize(&Value::Object(map.clone()))
            .map_err(|e| HalError::malformed(Self::TYPE_NAME, e.to_string()))?;

        let mut err = Self::new(document.error_identifier, document.message);
        let Some(embedded) = document.embedded else {
            return Ok(err);
        };

        for item in embedded.errors.unwrap_or_default() {
            let type_name = read_type(&item)?;
            if type_name != Self::TYPE_NAME {
                return Err(HalError::malformed(
                    "_embedded.errors",
                    format!("expected an Error, got '{type_name}'"),
                ));
            }
            err.errors.push(Self::from_map(&item)?);
        }
        err.details = embedded.details;

        Ok(err)
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorDocument {
    #[serde(default, deserialize_with = "nullable_string")]
    error_identifier: String,
    #[serde(default, deserialize_with = "nullable_string")]
    message: String,
    #[serde(default, rename = "_embedded")]
    embedded: Option<ErrorEmbedded>,
}

#[derive(Deserialize)]
struct ErrorEmbedded {
    #[serde(default)]
    errors: Option<Vec<Map<String, Value>>>,
    #[serde(default)]
    details: Option<Map<String, Value>>,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.error_identifier, self.message)?;
        if let Some(details) = &self.details {
            let pairs: Vec<String> = details
                .iter()
                .filter(|(key, _)| !key.starts_with('_'))
                .map(|(key, value)| match value {
                    Value::String(s) => format!("{key}={s}"),
                    other => format!("{key}={other}"),
                })
                .collect();
            if !pairs.is_empty() {
                write!(f, " ({})", pairs.join(", "))?;
            }
        }
        for nested in &self.errors {
            write!(f, "; {nested}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}

impl HalResource for ApiError {
    fn resource_type(&self) -> &str {
        Self::TYPE_NAME
    }

    fn link(&self, _name: &str) -> Option<&Link> {
        None
    }

    fn as_error(&self) -> Option<&ApiError> {
        Some(self)
    }
}

impl Serialize for ApiError {
    fn serialize<S: Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("_type", Self::TYPE_NAME)?;
        map.serialize_entry("errorIdentifier", &self.error_identifier)?;
        map.serialize_entry("message", &self.message)?;
        if self.is_multiple() || self.details.is_some() {
            let mut embedded = Map::new();
            if self.is_multiple() {
                embedded.insert(
                    "errors".to_string(),
                    serde_json::to_value(&self.errors).map_err(serde::ser::Error::custom)?,
                );
            }
            if let Some(details) = &self.details {
                embedded.insert("details".to_string(), Value::Object(details.clone()));
            }
            map.serialize_entry("_embedded", &embedded)?;
        }
        map.end()
    }
}
