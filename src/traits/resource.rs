//! Capabilities shared by all decoded resources.

use crate::link::Link;
use crate::models::ApiError;
use crate::object::ResourceObject;
use crate::resource::Resource;

/// What every decoded resource can answer, whatever its concrete variant.
pub trait HalResource {
    /// The `_type` discriminator the resource was decoded from.
    fn resource_type(&self) -> &str;

    /// Look up a link by name.
    fn link(&self, name: &str) -> Option<&Link>;

    /// The resource as a failure, if it is a HAL `Error`.
    fn as_error(&self) -> Option<&ApiError> {
        None
    }
}

/// A typed wrapper around a [`ResourceObject`].
///
/// Wrappers own nothing but the generic object; they exist to give typed
/// accessors and to be picked by the type registry.
pub trait TypedResource: HalResource + Sized {
    /// The `_type` name this wrapper is registered under by default.
    const TYPE_NAME: &'static str;

    /// Wrap a decoded generic object.
    fn from_object(object: ResourceObject) -> Self;

    /// Take the wrapper out of a [`Resource`], if it holds this variant.
    fn from_resource(resource: Resource) -> Option<Self>;

    /// Put the wrapper back into the [`Resource`] sum type.
    fn into_resource(self) -> Resource;

    /// A fresh, empty resource of this type, for building write requests.
    fn empty() -> Self {
        Self::from_object(ResourceObject::new(Self::TYPE_NAME))
    }
}
