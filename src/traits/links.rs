//! Links trait for entities that can be linked to other records.

use async_trait::async_trait;

use super::Resource;
use crate::error::Result;
use crate::models::Link;
use crate::transport::{request_json, Method, Transport};

/// Fetch the links attached to a record.
///
/// Links live under the plural collection path, e.g. `Opportunities/{id}/Links`,
/// not the singular `Opportunity/{id}/Links`.
#[async_trait]
pub trait Links: Resource {
    /// List the links of the record with the given ID.
    ///
    /// # Errors
    ///
    /// Returns [`crate::InsightlyError::NotFound`] if the record does not
    /// exist, or an error if the request fails or the body cannot be decoded.
    #[tracing::instrument(skip(client), fields(entity = Self::ENTITY_TYPE))]
    async fn links(client: &dyn Transport, id: Self::Id) -> Result<Vec<Link>> {
        let path = format!("{}/Links", Self::item_path(&id));
        request_json(client, Method::GET, &path, None)
            .await
            .map_err(|e| e.into_not_found(Self::ENTITY_TYPE, &id))
    }
}
