//! Mapping from `_type` names to resource constructors.

use std::collections::HashMap;
use std::fmt;

use crate::models::{
    Attachment, Collection, Project, TimeEntriesActivity, TimeEntry, User, UserPreferences,
    WorkPackage,
};
use crate::object::ResourceObject;
use crate::resource::Resource;
use crate::traits::{HalResource, TypedResource};

/// Builds a resource variant from a decoded generic object.
pub type Constructor = fn(ResourceObject) -> Resource;

/// Table consulted by the decoder to pick a resource variant by `_type`.
///
/// Built once before the client is created and read-only afterwards; the
/// client shares it behind an `Arc`. `Error` is not part of the table: the
/// decoder always handles it itself.
///
/// # Example
///
/// ```
/// use ophal::{Collection, TypeRegistry};
///
/// let mut registry = TypeRegistry::default();
/// registry.register_typed::<Collection>("QueryCollection");
/// assert!(registry.contains("QueryCollection"));
/// ```
#[derive(Clone)]
pub struct TypeRegistry {
    constructors: HashMap<String, Constructor>,
}

impl TypeRegistry {
    /// A registry with no types: everything decodes as a generic resource.
    pub fn empty() -> Self {
        Self {
            constructors: HashMap::new(),
        }
    }

    /// Register a constructor under a type name, replacing any earlier one.
    pub fn register(&mut self, type_name: impl Into<String>, constructor: Constructor) -> &mut Self {
        self.constructors.insert(type_name.into(), constructor);
        self
    }

    /// Register a typed wrapper under an additional type name.
    pub fn register_typed<T: TypedResource>(&mut self, type_name: impl Into<String>) -> &mut Self {
        self.register(type_name, construct_typed::<T>)
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.constructors.contains_key(type_name)
    }

    /// Registered type names, in no particular order.
    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.constructors.keys().map(String::as_str)
    }

    /// Pick the variant for the object's type, falling back to a generic
    /// resource for unknown names.
    pub fn construct(&self, object: ResourceObject) -> Resource {
        match self.constructors.get(object.resource_type()) {
            Some(constructor) => constructor(object),
            None => Resource::Generic(object),
        }
    }
}

fn construct_typed<T: TypedResource>(object: ResourceObject) -> Resource {
    T::from_object(object).into_resource()
}

impl Default for TypeRegistry {
    /// Every typed resource this crate knows, plus `WorkPackageCollection`
    /// as a [`Collection`].
    fn default() -> Self {
        let mut registry = Self::empty();
        registry
            .register_typed::<Collection>(Collection::TYPE_NAME)
            .register_typed::<Collection>("WorkPackageCollection")
            .register_typed::<Project>(Project::TYPE_NAME)
            .register_typed::<WorkPackage>(WorkPackage::TYPE_NAME)
            .register_typed::<User>(User::TYPE_NAME)
            .register_typed::<UserPreferences>(UserPreferences::TYPE_NAME)
            .register_typed::<TimeEntry>(TimeEntry::TYPE_NAME)
            .register_typed::<TimeEntriesActivity>(TimeEntriesActivity::TYPE_NAME)
            .register_typed::<Attachment>(Attachment::TYPE_NAME);
        registry
    }
}

impl fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.type_names().collect();
        names.sort_unstable();
        f.debug_struct("TypeRegistry").field("types", &names).finish()
    }
}
