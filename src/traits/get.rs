//! Get trait for fetching single resources.

use async_trait::async_trait;

use crate::client::HalClient;
use crate::error::Result;
use crate::traits::TypedResource;

/// Fetch a single resource by its numeric ID.
///
/// # Example
///
/// ```ignore
/// use ophal::{HalClient, Project, Get};
///
/// let client = HalClient::from_env()?;
/// let project = Project::get(&client, 3).await?;
/// ```
#[async_trait]
pub trait Get: TypedResource + Send {
    /// Path of the resource with the given ID, relative to the server root.
    fn path(id: u64) -> String;

    /// Fetch the resource by ID.
    ///
    /// # Errors
    ///
    /// Returns [`HalError::Api`](crate::HalError::Api) when the server
    /// answers with an error document, or
    /// [`HalError::UnexpectedResource`](crate::HalError::UnexpectedResource)
    /// when it answers with a resource of another type.
    async fn get(client: &HalClient, id: u64) -> Result<Self> {
        client.get(&Self::path(id)).await?.downcast()
    }
}
