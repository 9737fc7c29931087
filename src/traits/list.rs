//! List trait for fetching collections of entities.

use async_trait::async_trait;

use super::Resource;
use crate::error::{InsightlyError, Result};
use crate::pagination::{fetch_all, Page};
use crate::query::{collection_path, CollectionFilter};
use crate::transport::{request_json, Method, Transport};

/// Default page size for list operations.
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// List/filter entities with pagination support.
///
/// # Example
///
/// ```ignore
/// use insightly::{InsightlyClient, Opportunity, List, CollectionFilter};
///
/// let client = InsightlyClient::from_env()?;
///
/// // Fetch a single page
/// let page = Opportunity::list_page(&client, &Default::default(), 0, 50).await?;
///
/// // Fetch everything matching a filter
/// let open = CollectionFilter::field("OPPORTUNITY_STATE", "OPEN");
/// let all_open = Opportunity::list_all(&client, &open).await?;
/// ```
#[async_trait]
pub trait List: Resource {
    /// Records requested per page by [`List::list_all`].
    const PAGE_SIZE: u32 = DEFAULT_PAGE_SIZE;

    /// Fetch one page starting at `skip`.
    ///
    /// # Errors
    ///
    /// Returns [`InsightlyError::InvalidArgument`] for a zero `top`, or an
    /// error if the request fails or the body is not a list of this entity.
    #[tracing::instrument(skip(client), fields(entity = Self::ENTITY_TYPE))]
    async fn list_page(
        client: &dyn Transport,
        filter: &CollectionFilter,
        skip: u32,
        top: u32,
    ) -> Result<Page<Self>> {
        if top == 0 {
            return Err(InsightlyError::InvalidArgument(
                "page size must be at least 1".to_string(),
            ));
        }
        let path = collection_path(Self::PATH, filter, skip, top);
        let items: Vec<Self> = request_json(client, Method::GET, &path, None).await?;
        Ok(Page::new(items, skip, top))
    }

    /// Fetch every record matching `filter`, walking all pages.
    ///
    /// An empty collection yields an empty `Vec`.
    ///
    /// # Errors
    ///
    /// Returns the error of the first page that fails; no partial result is
    /// returned.
    #[tracing::instrument(skip(client), fields(entity = Self::ENTITY_TYPE))]
    async fn list_all(client: &dyn Transport, filter: &CollectionFilter) -> Result<Vec<Self>> {
        fetch_all(Self::PAGE_SIZE, |skip, top| {
            Self::list_page(client, filter, skip, top)
        })
        .await
    }
}
