//! The generic decoded resource and its accessors.
//!
//! Every typed resource is a thin wrapper over [`ResourceObject`] and reads
//! its data only through the accessors defined here. Scalar reads are
//! permissive (absent or wrong-shaped fields give zero values); date,
//! duration and formattable reads report malformed values as errors.

use std::borrow::Cow;
use std::collections::BTreeMap;

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use crate::client::HalClient;
use crate::duration;
use crate::error::{HalError, Result};
use crate::formattable::Formattable;
use crate::link::Link;
use crate::resource::{Embedded, Resource};
use crate::traits::HalResource;

/// Link used by [`ResourceObject::delete`].
pub const DELETE_LINK: &str = "delete";
/// Link used by [`ResourceObject::update`].
pub const UPDATE_LINK: &str = "updateImmediately";

/// Date format of OpenProject date-only fields.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// A decoded HAL document: type, links, plain fields and embedded resources.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourceObject {
    resource_type: String,
    links: BTreeMap<String, Link>,
    fields: Map<String, Value>,
    embedded: BTreeMap<String, Embedded>,
}

impl ResourceObject {
    /// Create an empty resource of the given type.
    pub fn new(resource_type: impl Into<String>) -> Self {
        Self {
            resource_type: resource_type.into(),
            ..Self::default()
        }
    }

    // -------------------------------------------------------------------------
    // Fields
    // -------------------------------------------------------------------------

    pub fn has_field(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// All plain fields, keyed by name.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// String field, or `""` when absent or not a string.
    pub fn string(&self, name: &str) -> &str {
        self.field(name).and_then(Value::as_str).unwrap_or("")
    }

    /// Integer field, or `0` when absent or not a number. Floats truncate.
    pub fn int(&self, name: &str) -> i64 {
        match self.field(name) {
            Some(Value::Number(n)) => n
                .as_i64()
                .or_else(|| n.as_f64().map(|f| f as i64))
                .unwrap_or(0),
            _ => 0,
        }
    }

    /// Boolean field, or `false` when absent or not a boolean.
    pub fn bool(&self, name: &str) -> bool {
        self.field(name).and_then(Value::as_bool).unwrap_or(false)
    }

    /// Parse an RFC 3339 timestamp field.
    pub fn date_time(&self, name: &str) -> Result<DateTime<FixedOffset>> {
        DateTime::parse_from_rfc3339(self.string(name)).map_err(|source| {
            HalError::InvalidDateTime {
                field: name.to_string(),
                source,
            }
        })
    }

    /// Parse a `YYYY-MM-DD` date field.
    pub fn date(&self, name: &str) -> Result<NaiveDate> {
        NaiveDate::parse_from_str(self.string(name), DATE_FORMAT).map_err(|source| {
            HalError::InvalidDate {
                field: name.to_string(),
                source,
            }
        })
    }

    /// Parse an ISO 8601 duration field.
    pub fn duration(&self, name: &str) -> Result<chrono::Duration> {
        let value = self.string(name);
        duration::parse(value).ok_or_else(|| HalError::InvalidDuration {
            field: name.to_string(),
            value: value.to_string(),
        })
    }

    /// Decode a `{format, raw, html}` field. `null` or absent is `None`.
    pub fn formattable(&self, name: &str) -> Result<Option<Formattable>> {
        Formattable::from_value(name, self.field(name))
    }

    pub fn created_at(&self) -> Option<DateTime<FixedOffset>> {
        self.date_time("createdAt").ok()
    }

    pub fn updated_at(&self) -> Option<DateTime<FixedOffset>> {
        self.date_time("updatedAt").ok()
    }

    /// Set a plain field. Returns the previous value.
    pub fn set_field(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(name.into(), value.into())
    }

    pub fn remove_field(&mut self, name: &str) -> Option<Value> {
        self.fields.remove(name)
    }

    pub fn set_date(&mut self, name: impl Into<String>, date: NaiveDate) {
        self.set_field(name, date.format(DATE_FORMAT).to_string());
    }

    pub fn set_date_time(&mut self, name: impl Into<String>, date_time: DateTime<FixedOffset>) {
        self.set_field(name, date_time.to_rfc3339());
    }

    pub fn set_duration(&mut self, name: impl Into<String>, value: chrono::Duration) {
        self.set_field(name, duration::format(value));
    }

    pub fn set_formattable(&mut self, name: impl Into<String>, value: &Formattable) {
        let value = serde_json::to_value(value).unwrap_or(Value::Null);
        self.set_field(name, value);
    }

    // -------------------------------------------------------------------------
    // Embedded resources
    // -------------------------------------------------------------------------

    pub fn embedded(&self, name: &str) -> Option<&Embedded> {
        self.embedded.get(name)
    }

    /// Names of all embedded entries.
    pub fn embedded_names(&self) -> impl Iterator<Item = &str> {
        self.embedded.keys().map(String::as_str)
    }

    /// A single embedded resource. Lists and plain values give `None`.
    pub fn embedded_resource(&self, name: &str) -> Option<&Resource> {
        match self.embedded(name)? {
            Embedded::Resource(res) => Some(res),
            _ => None,
        }
    }

    /// An embedded resource list. There is no link fallback for lists.
    pub fn embedded_resource_list(&self, name: &str) -> Option<&[Resource]> {
        match self.embedded(name)? {
            Embedded::List(list) => Some(list),
            _ => None,
        }
    }

    /// The embedded resource `name`, or the target of the same-named link.
    ///
    /// The link is only followed when a client is given and the link points
    /// somewhere; it costs exactly one GET. Without a client this never
    /// touches the network.
    pub async fn resolve_embedded(
        &self,
        name: &str,
        client: Option<&HalClient>,
    ) -> Result<Option<Cow<'_, Resource>>> {
        if let Some(res) = self.embedded_resource(name) {
            return Ok(Some(Cow::Borrowed(res)));
        }
        let (Some(client), Some(link)) = (client, self.link(name)) else {
            return Ok(None);
        };
        if !link.is_resolvable() {
            return Ok(None);
        }
        tracing::debug!(link = name, href = %link.href, "resolving embedded resource via link");
        Ok(Some(Cow::Owned(client.link_get(link).await?)))
    }

    pub(crate) fn insert_embedded(&mut self, name: impl Into<String>, value: Embedded) {
        self.embedded.insert(name.into(), value);
    }

    pub(crate) fn take_embedded(&mut self, name: &str) -> Option<Embedded> {
        self.embedded.remove(name)
    }

    // -------------------------------------------------------------------------
    // Links
    // -------------------------------------------------------------------------

    pub fn links(&self) -> impl Iterator<Item = (&str, &Link)> {
        self.links.iter().map(|(name, link)| (name.as_str(), link))
    }

    /// Add or replace a link, e.g. to set a relation in a write request.
    pub fn set_link(&mut self, name: impl Into<String>, link: Link) -> Option<Link> {
        self.links.insert(name.into(), link)
    }

    /// Fetch the resource behind the link `name`.
    pub async fn link_resource(&self, client: &HalClient, name: &str) -> Result<Resource> {
        let link = self
            .link(name)
            .filter(|link| link.is_resolvable())
            .ok_or_else(|| HalError::MissingLink(name.to_string()))?;
        client.link_get(link).await
    }

    /// Delete the resource through its `delete` link.
    pub async fn delete(&self, client: &HalClient) -> Result<()> {
        let link = self
            .link(DELETE_LINK)
            .ok_or_else(|| HalError::MissingLink(DELETE_LINK.to_string()))?;
        let response = client.delete(&link.href).await?;
        HalClient::check_status(response).await?;
        Ok(())
    }

    /// PATCH the current state to the `updateImmediately` link and return
    /// the server's version of the resource.
    pub async fn update(&self, client: &HalClient) -> Result<Resource> {
        let link = self
            .link(UPDATE_LINK)
            .ok_or_else(|| HalError::MissingLink(UPDATE_LINK.to_string()))?;
        client.patch(&link.href, self).await
    }
}

impl HalResource for ResourceObject {
    fn resource_type(&self) -> &str {
        &self.resource_type
    }

    fn link(&self, name: &str) -> Option<&Link> {
        self.links.get(name)
    }
}

/// Writes the resource back as one flat HAL object: `_type`, `_links`,
/// `_embedded` and every field at the top level.
impl Serialize for ResourceObject {
    fn serialize<S: Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("_type", &self.resource_type)?;
        if !self.links.is_empty() {
            map.serialize_entry("_links", &self.links)?;
        }
        if !self.embedded.is_empty() {
            map.serialize_entry("_embedded", &self.embedded)?;
        }
        for (key, value) in &self.fields {
            if matches!(key.as_str(), "_type" | "_links" | "_embedded") {
                continue;
            }
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
