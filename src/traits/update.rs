//! Update trait for modifying resources.

use async_trait::async_trait;

use crate::client::HalClient;
use crate::error::Result;
use crate::object::ResourceObject;
use crate::traits::TypedResource;

/// Send local changes to the server through the `updateImmediately` link.
///
/// Implemented for every typed resource.
///
/// # Example
///
/// ```ignore
/// use ophal::{HalClient, WorkPackage, Get, Update};
///
/// let client = HalClient::from_env()?;
/// let mut wp = WorkPackage::get(&client, 42).await?;
/// wp.set_subject("Renamed");
/// let wp = wp.update(&client).await?;
/// ```
#[async_trait]
pub trait Update: TypedResource {
    /// PATCH the resource and return the server's version of it.
    ///
    /// # Errors
    ///
    /// Returns [`HalError::MissingLink`](crate::HalError::MissingLink) when
    /// the resource cannot be updated by the current user.
    async fn update(&self, client: &HalClient) -> Result<Self>;
}

#[async_trait]
impl<T> Update for T
where
    T: TypedResource + AsRef<ResourceObject> + Send + Sync,
{
    async fn update(&self, client: &HalClient) -> Result<Self> {
        ResourceObject::update(self.as_ref(), client).await?.downcast()
    }
}
