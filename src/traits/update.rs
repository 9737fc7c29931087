//! Update trait for modifying entities.

use async_trait::async_trait;

use super::Resource;
use crate::error::Result;
use crate::projection::{project, Writable};
use crate::transport::{request_json, Method, Transport};

/// Update an existing entity.
///
/// Insightly identifies the record by the id inside the body, so the whole
/// write projection is sent to the collection path.
///
/// # Example
///
/// ```ignore
/// use insightly::{InsightlyClient, Get, Opportunity, Update};
///
/// let client = InsightlyClient::from_env()?;
/// let mut opportunity = Opportunity::get(&client, 4711).await?;
/// opportunity.opportunity_state = Some("WON".to_string());
/// let updated = Opportunity::update(&client, Some(&opportunity)).await?;
/// ```
#[async_trait]
pub trait Update: Resource + Writable {
    /// PUT the entity's projection and return the updated record.
    ///
    /// Passing `None` is a no-op: no request is made and `Ok(None)` is
    /// returned.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be decoded.
    #[tracing::instrument(skip_all, fields(entity = Self::ENTITY_TYPE))]
    async fn update(client: &dyn Transport, entity: Option<&Self>) -> Result<Option<Self>> {
        let Some(projection) = project(entity) else {
            return Ok(None);
        };
        let body = serde_json::to_value(&projection)?;

        let updated = request_json(client, Method::PUT, Self::PATH, Some(body)).await?;
        Ok(Some(updated))
    }
}
