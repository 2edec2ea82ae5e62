//! Collection resource and page traversal.

use crate::client::HalClient;
use crate::error::Result;
use crate::resource::{Embedded, Resource};
use crate::traits::{HalResource, TypedResource};

/// Link to the following page.
pub const NEXT_PAGE_LINK: &str = "nextByOffset";
/// Link to the preceding page.
pub const PREVIOUS_PAGE_LINK: &str = "previousByOffset";

typed_resource! {
    /// A (possibly paginated) list of resources under `_embedded.elements`.
    ///
    /// Each page is its own collection: [`next_page`](Collection::next_page)
    /// returns a new instance and leaves this one untouched.
    Collection => "Collection"
}

impl Collection {
    /// Number of elements across all pages.
    pub fn total(&self) -> i64 {
        self.int("total")
    }

    /// Number of elements on this page.
    pub fn count(&self) -> i64 {
        self.int("count")
    }

    /// Whether the server paginates this collection (`pageSize` present).
    pub fn is_paginated(&self) -> bool {
        self.has_field("pageSize")
    }

    pub fn page_size(&self) -> i64 {
        self.int("pageSize")
    }

    /// Number of pages the server splits `total` into.
    ///
    /// A missing or non-positive `pageSize` counts as one element per page.
    pub fn page_count(&self) -> i64 {
        let total = self.total().max(0);
        let page_size = self.page_size().max(1);
        total / page_size + i64::from(total % page_size != 0)
    }

    /// 1-indexed page number.
    pub fn offset(&self) -> i64 {
        self.int("offset")
    }

    /// Elements on this page.
    pub fn items(&self) -> &[Resource] {
        self.embedded_resource_list("elements").unwrap_or_default()
    }

    /// Take the elements on this page.
    pub fn into_items(self) -> Vec<Resource> {
        let mut object = self.object;
        match object.take_embedded("elements") {
            Some(Embedded::List(items)) => items,
            _ => Vec::new(),
        }
    }

    /// Elements of type `T`; other elements are skipped.
    pub fn items_of<T: TypedResource>(&self) -> Vec<T> {
        self.items()
            .iter()
            .cloned()
            .filter_map(T::from_resource)
            .collect()
    }

    pub fn has_next_page(&self) -> bool {
        self.link(NEXT_PAGE_LINK)
            .is_some_and(|link| link.is_resolvable())
    }

    pub fn has_previous_page(&self) -> bool {
        self.link(PREVIOUS_PAGE_LINK)
            .is_some_and(|link| link.is_resolvable())
    }

    /// Fetch the next page.
    ///
    /// # Errors
    ///
    /// [`HalError::MissingLink`](crate::HalError::MissingLink) on the last
    /// page; check [`has_next_page`](Collection::has_next_page) first.
    pub async fn next_page(&self, client: &HalClient) -> Result<Collection> {
        self.page(client, NEXT_PAGE_LINK).await
    }

    /// Fetch the previous page.
    pub async fn previous_page(&self, client: &HalClient) -> Result<Collection> {
        self.page(client, PREVIOUS_PAGE_LINK).await
    }

    async fn page(&self, client: &HalClient, name: &str) -> Result<Collection> {
        self.link_resource(client, name).await?.downcast()
    }
}
