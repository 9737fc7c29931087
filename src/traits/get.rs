//! Get trait for fetching single entities.

use async_trait::async_trait;

use super::Resource;
use crate::error::Result;
use crate::transport::{request_json, Method, Transport};

/// Fetch a single entity by ID.
///
/// # Example
///
/// ```ignore
/// use insightly::{InsightlyClient, Opportunity, Get};
///
/// let client = InsightlyClient::from_env()?;
/// let opportunity = Opportunity::get(&client, 4711).await?;
/// ```
#[async_trait]
pub trait Get: Resource {
    /// Fetch the entity by ID.
    ///
    /// # Errors
    ///
    /// Returns [`crate::InsightlyError::NotFound`] if the server answers 404,
    /// or the transport error if the request fails.
    #[tracing::instrument(skip(client), fields(entity = Self::ENTITY_TYPE))]
    async fn get(client: &dyn Transport, id: Self::Id) -> Result<Self> {
        request_json(client, Method::GET, &Self::item_path(&id), None)
            .await
            .map_err(|e| e.into_not_found(Self::ENTITY_TYPE, &id))
    }
}
