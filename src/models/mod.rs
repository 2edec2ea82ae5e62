//! Typed HAL resources.
//!
//! Each wrapper owns one [`ResourceObject`](crate::ResourceObject) and
//! dereferences to it, so every generic accessor is available next to the
//! typed ones.

/// Root of every API v3 path.
pub(crate) const API_V3: &str = "/api/v3";

/// Declares a typed wrapper over `ResourceObject` and wires it into the
/// `Resource` sum type.
macro_rules! typed_resource {
    ($(#[$meta:meta])* $name:ident => $type_name:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        pub struct $name {
            object: $crate::object::ResourceObject,
        }

        impl $crate::traits::TypedResource for $name {
            const TYPE_NAME: &'static str = $type_name;

            fn from_object(object: $crate::object::ResourceObject) -> Self {
                Self { object }
            }

            fn from_resource(resource: $crate::resource::Resource) -> Option<Self> {
                match resource {
                    $crate::resource::Resource::$name(res) => Some(res),
                    _ => None,
                }
            }

            fn into_resource(self) -> $crate::resource::Resource {
                $crate::resource::Resource::$name(self)
            }
        }

        impl $crate::traits::HalResource for $name {
            fn resource_type(&self) -> &str {
                $crate::traits::HalResource::resource_type(&self.object)
            }

            fn link(&self, name: &str) -> Option<&$crate::link::Link> {
                $crate::traits::HalResource::link(&self.object, name)
            }
        }

        impl std::ops::Deref for $name {
            type Target = $crate::object::ResourceObject;

            fn deref(&self) -> &Self::Target {
                &self.object
            }
        }

        impl std::ops::DerefMut for $name {
            fn deref_mut(&mut self) -> &mut Self::Target {
                &mut self.object
            }
        }

        impl AsRef<$crate::object::ResourceObject> for $name {
            fn as_ref(&self) -> &$crate::object::ResourceObject {
                &self.object
            }
        }

        impl AsMut<$crate::object::ResourceObject> for $name {
            fn as_mut(&mut self) -> &mut $crate::object::ResourceObject {
                &mut self.object
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(
                &self,
                serializer: S,
            ) -> core::result::Result<S::Ok, S::Error> {
                serde::Serialize::serialize(&self.object, serializer)
            }
        }
    };
}

mod api_error;
mod attachment;
mod collection;
mod project;
mod time_entry;
mod user;
mod work_package;

pub use api_error::*;
pub use attachment::*;
pub use collection::*;
pub use project::*;
pub use time_entry::*;
pub use user::*;
pub use work_package::*;
