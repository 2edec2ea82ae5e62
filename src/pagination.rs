//! Pagination utilities for HAL collections.
//!
//! Collections are paged by offset: `offset` is the 1-indexed page number
//! and `pageSize` the number of elements per page. Pages are walked through
//! the `nextByOffset` link of each page; a page without that link is the
//! last one.

use serde::{Deserialize, Serialize};

use crate::client::HalClient;
use crate::error::Result;
use crate::models::Collection;
use crate::resource::Resource;

/// Default page size for list operations.
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Maximum pages to fetch (safety limit).
const MAX_PAGES: u32 = 1000;

/// Query parameters for paginated requests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationParams {
    /// Page number (1-indexed).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
    /// Number of items per page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
}

impl PaginationParams {
    /// Create pagination params for a specific page.
    #[must_use]
    pub fn for_page(offset: u32, page_size: u32) -> Self {
        Self {
            offset: Some(offset),
            page_size: Some(page_size),
        }
    }

    /// Append the set parameters to a path.
    pub fn apply_to(&self, path: &str) -> String {
        let mut params = Vec::new();
        if let Some(offset) = self.offset {
            params.push(format!("offset={offset}"));
        }
        if let Some(page_size) = self.page_size {
            params.push(format!("pageSize={page_size}"));
        }
        if params.is_empty() {
            return path.to_string();
        }
        let separator = if path.contains('?') { '&' } else { '?' };
        format!("{path}{separator}{}", params.join("&"))
    }
}

/// Collect the elements of `first` and every following page.
///
/// Stops at the first page without a `nextByOffset` link.
pub async fn collect_all(first: Collection, client: &HalClient) -> Result<Vec<Resource>> {
    let mut all_items = Vec::new();
    let mut current = first;
    let mut pages = 1;

    loop {
        let next = if current.has_next_page() {
            Some(current.next_page(client).await?)
        } else {
            None
        };
        all_items.extend(current.into_items());

        match next {
            Some(page) => current = page,
            None => break,
        }
        pages += 1;

        // Safety limit to prevent infinite loops
        if pages > MAX_PAGES {
            tracing::warn!("Reached pagination limit of {} pages, stopping", MAX_PAGES);
            all_items.extend(current.into_items());
            break;
        }
    }

    Ok(all_items)
}
