//! Delete trait for removing entities.

use async_trait::async_trait;

use super::Resource;
use crate::error::Result;
use crate::transport::{Method, Transport};

/// Delete an entity by ID.
#[async_trait]
pub trait Delete: Resource {
    /// Delete the record; any response body is ignored.
    ///
    /// # Errors
    ///
    /// Returns the transport error unchanged if the request fails.
    #[tracing::instrument(skip(client), fields(entity = Self::ENTITY_TYPE))]
    async fn delete(client: &dyn Transport, id: Self::Id) -> Result<()> {
        client
            .request(Method::DELETE, &Self::item_path(&id), None)
            .await?;
        Ok(())
    }
}
