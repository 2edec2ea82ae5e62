//! List trait for fetching collections of resources.

use async_trait::async_trait;

use crate::client::HalClient;
use crate::error::Result;
use crate::filters::Filters;
use crate::models::Collection;
use crate::pagination::{collect_all, PaginationParams, DEFAULT_PAGE_SIZE};
use crate::traits::TypedResource;

/// List resources of one type, with filters and offset pagination.
///
/// # Example
///
/// ```ignore
/// use ophal::{HalClient, WorkPackage, Filters, List, operators};
///
/// let client = HalClient::from_env()?;
/// let filters = Filters::new().filter("status", operators::OPEN, Vec::<String>::new());
///
/// // Fetch a single page
/// let page = WorkPackage::list_page(&client, &filters, &Default::default()).await?;
///
/// // Fetch all pages
/// let all = WorkPackage::list_all(&client, &filters).await?;
/// ```
#[async_trait]
pub trait List: TypedResource + Send {
    /// Path of the collection endpoint.
    const COLLECTION_PATH: &'static str;

    /// Fetch one page of the collection.
    ///
    /// Unset pagination parameters are left to the server's defaults.
    async fn list_page(
        client: &HalClient,
        filters: &Filters,
        params: &PaginationParams,
    ) -> Result<Collection> {
        let path = params.apply_to(&filters.apply_to(Self::COLLECTION_PATH));
        client.get_collection(&path).await
    }

    /// Fetch every page and keep the elements of this type.
    ///
    /// # Errors
    ///
    /// Returns an error if any page request fails.
    async fn list_all(client: &HalClient, filters: &Filters) -> Result<Vec<Self>> {
        let params = PaginationParams::for_page(1, DEFAULT_PAGE_SIZE);
        let first = Self::list_page(client, filters, &params).await?;
        let items = collect_all(first, client).await?;
        Ok(items.into_iter().filter_map(Self::from_resource).collect())
    }
}
