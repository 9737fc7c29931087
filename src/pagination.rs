//! Offset/limit pagination for Insightly collection endpoints.
//!
//! Insightly pages with `skip` and `top` and never reports a total count, so
//! the end of a collection is detected by a short page: any page holding
//! fewer than `top` records is the last one.

use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::error::{InsightlyError, Result};

/// A page of results from the Insightly API.
#[derive(Debug, Clone, Serialize)]
#[serde(bound = "T: Serialize")]
pub struct Page<T> {
    /// The items on this page, in server order.
    pub items: Vec<T>,
    /// Number of records skipped before this page.
    pub skip: u32,
    /// Requested page size.
    pub top: u32,
    /// Whether another page may follow (the page was full).
    pub has_more: bool,
}

impl<T> Page<T> {
    /// Create a new page from items and the parameters used to fetch it.
    #[must_use]
    pub fn new(items: Vec<T>, skip: u32, top: u32) -> Self {
        let has_more = items.len() >= top as usize;
        Self {
            items,
            skip,
            top,
            has_more,
        }
    }

    /// Map the items to a different type.
    #[must_use]
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            skip: self.skip,
            top: self.top,
            has_more: self.has_more,
        }
    }

    /// Returns true if this page has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of items on this page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns an iterator over the items in this page.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Page<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Query parameters for a single page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaginationParams {
    /// Records to skip.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip: Option<u32>,
    /// Page size.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top: Option<u32>,
}

impl PaginationParams {
    /// Params for the page starting at `skip`.
    #[must_use]
    pub fn at(skip: u32, top: u32) -> Self {
        Self {
            skip: Some(skip),
            top: Some(top),
        }
    }

    /// Resolve to concrete `(skip, top)` values, using `default_top` when unset.
    #[must_use]
    pub fn resolve(&self, default_top: u32) -> (u32, u32) {
        (self.skip.unwrap_or(0), self.top.unwrap_or(default_top))
    }
}

/// Fetch every page of a collection and concatenate the results.
///
/// `fetch_page` is called with `(skip, page_size)` starting at `skip = 0`
/// and advancing by `page_size` until it returns a page with fewer than
/// `page_size` items. Pages are requested one at a time; when the collection
/// size is an exact multiple of `page_size` the final request returns an
/// empty page.
///
/// The first failing page aborts the walk and its error is returned; items
/// from earlier pages are discarded.
///
/// # Errors
///
/// Returns [`InsightlyError::InvalidArgument`] if `page_size` is zero, or
/// the error of the first page request that fails.
pub async fn fetch_all<T, F, Fut>(page_size: u32, mut fetch_page: F) -> Result<Vec<T>>
where
    F: FnMut(u32, u32) -> Fut,
    Fut: Future<Output = Result<Page<T>>>,
{
    if page_size == 0 {
        return Err(InsightlyError::InvalidArgument(
            "page size must be greater than zero".to_string(),
        ));
    }

    let mut all_items = Vec::new();
    let mut skip = 0u32;
    let mut pages = 0u32;

    loop {
        let page = fetch_page(skip, page_size).await?;
        pages += 1;

        let row_count = page.items.len();
        tracing::debug!(skip, top = page_size, rows = row_count, "fetched page");
        all_items.extend(page.items);

        if row_count < page_size as usize {
            break;
        }

        skip = skip.checked_add(page_size).ok_or_else(|| {
            InsightlyError::InvalidArgument(format!("pagination offset overflow after {skip}"))
        })?;
    }

    tracing::debug!(pages, total = all_items.len(), "collection exhausted");
    Ok(all_items)
}
