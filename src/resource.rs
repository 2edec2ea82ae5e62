//! The decoded resource sum type.

use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::error::{HalError, Result};
use crate::link::Link;
use crate::models::{
    ApiError, Attachment, Collection, Project, TimeEntriesActivity, TimeEntry, User,
    UserPreferences, WorkPackage,
};
use crate::object::ResourceObject;
use crate::traits::{HalResource, TypedResource};

/// Any decoded HAL resource.
///
/// Known `_type` names decode to their typed variant; every other name
/// decodes to [`Resource::Generic`] stamped with that name.
#[derive(Debug, Clone, PartialEq)]
pub enum Resource {
    Generic(ResourceObject),
    Collection(Collection),
    Project(Project),
    WorkPackage(WorkPackage),
    User(User),
    UserPreferences(UserPreferences),
    TimeEntry(TimeEntry),
    TimeEntriesActivity(TimeEntriesActivity),
    Attachment(Attachment),
    Error(ApiError),
}

/// Runs `$body` with `$res` bound to the generic object of any non-error
/// variant, or evaluates `$error` for [`Resource::Error`].
macro_rules! with_object {
    ($self:expr, $res:ident => $body:expr, $err:ident => $error:expr) => {
        match $self {
            Resource::Generic($res) => $body,
            Resource::Collection($res) => $body,
            Resource::Project($res) => $body,
            Resource::WorkPackage($res) => $body,
            Resource::User($res) => $body,
            Resource::UserPreferences($res) => $body,
            Resource::TimeEntry($res) => $body,
            Resource::TimeEntriesActivity($res) => $body,
            Resource::Attachment($res) => $body,
            Resource::Error($err) => $error,
        }
    };
}

impl Resource {
    /// The generic object behind any non-error variant.
    pub fn object(&self) -> Option<&ResourceObject> {
        with_object!(self, res => Some(res.as_ref()), _err => None)
    }

    /// Mutable access to the generic object behind any non-error variant.
    pub fn object_mut(&mut self) -> Option<&mut ResourceObject> {
        with_object!(self, res => Some(res.as_mut()), _err => None)
    }

    /// Convert into a typed wrapper, or fail naming both types.
    pub fn downcast<T: TypedResource>(self) -> Result<T> {
        let actual = self.resource_type().to_string();
        T::from_resource(self).ok_or(HalError::UnexpectedResource {
            expected: T::TYPE_NAME,
            actual,
        })
    }

    /// Turn a decoded `Error` into `Err`, pass everything else through.
    pub fn into_result(self) -> Result<Self> {
        match self {
            Resource::Error(err) => Err(HalError::Api(err)),
            other => Ok(other),
        }
    }
}

impl HalResource for Resource {
    fn resource_type(&self) -> &str {
        with_object!(self, res => res.resource_type(), err => err.resource_type())
    }

    fn link(&self, name: &str) -> Option<&Link> {
        with_object!(self, res => res.link(name), _err => None)
    }

    fn as_error(&self) -> Option<&ApiError> {
        match self {
            Resource::Error(err) => Some(err),
            _ => None,
        }
    }
}

impl Serialize for Resource {
    fn serialize<S: Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        with_object!(self, res => res.serialize(serializer), err => err.serialize(serializer))
    }
}

impl From<ResourceObject> for Resource {
    fn from(object: ResourceObject) -> Self {
        Resource::Generic(object)
    }
}

impl AsRef<ResourceObject> for ResourceObject {
    fn as_ref(&self) -> &ResourceObject {
        self
    }
}

impl AsMut<ResourceObject> for ResourceObject {
    fn as_mut(&mut self) -> &mut ResourceObject {
        self
    }
}

/// A value under a resource's `_embedded` key.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Embedded {
    /// A single nested resource.
    Resource(Box<Resource>),
    /// An ordered list of nested resources.
    List(Vec<Resource>),
    /// Anything that is neither an object nor an array.
    Value(Value),
}
