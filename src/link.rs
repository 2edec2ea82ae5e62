//! Hypermedia links.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A named hypermedia reference inside a resource's `_links` map.
///
/// Links are plain values: cloning one never aliases another resource's
/// link map. OpenProject marks an unset relation with `{"href": null}`;
/// that decodes to an empty `href` and such a link is never followed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    /// Target of the link, usually an absolute path such as `/api/v3/projects/3`.
    #[serde(default, deserialize_with = "nullable_string")]
    pub href: String,

    /// Human readable title of the target.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Whether `href` is a URI template.
    #[serde(default, skip_serializing_if = "is_false")]
    pub templated: bool,

    /// HTTP method to use when following the link (e.g. `patch`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,

    /// Request body template for action links.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,

    /// Server-side identifier of the target.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
}

impl Link {
    /// Create a simple link with just an href.
    pub fn new(href: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            title: None,
            templated: false,
            method: None,
            payload: None,
            identifier: None,
        }
    }

    /// Create a templated link.
    pub fn templated(href: impl Into<String>) -> Self {
        Self {
            templated: true,
            ..Self::new(href)
        }
    }

    /// Add a title to the link.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Add an HTTP method to the link.
    #[must_use]
    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    /// Whether the link points anywhere.
    pub fn is_resolvable(&self) -> bool {
        !self.href.is_empty()
    }
}

/// Decode a string that may be `null`; `null` becomes the empty string.
pub(crate) fn nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn is_false(value: &bool) -> bool {
    !*value
}
