//! Create trait for adding new entities.

use async_trait::async_trait;

use super::Resource;
use crate::error::Result;
use crate::projection::{project, Writable};
use crate::transport::{request_json, Method, Transport};

/// Create a new entity from its write projection.
#[async_trait]
pub trait Create: Resource + Writable {
    /// POST the entity's projection and return the record the server stored.
    ///
    /// Passing `None` is a no-op: no request is made and `Ok(None)` is
    /// returned.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be decoded.
    #[tracing::instrument(skip_all, fields(entity = Self::ENTITY_TYPE))]
    async fn create(client: &dyn Transport, entity: Option<&Self>) -> Result<Option<Self>> {
        let Some(projection) = project(entity) else {
            return Ok(None);
        };
        let body = serde_json::to_value(&projection)?;

        let created = request_json(client, Method::POST, Self::PATH, Some(body)).await?;
        Ok(Some(created))
    }
}
