//! Collection and record endpoint handlers.
//!
//! The handlers are generic over [`Stored`] entities; the router
//! instantiates them once per collection path.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::mock_server::state::{SharedState, Stored};
use crate::{CollectionFilter, List, PaginationParams, Writable};

/// Query parameters accepted by collection and search endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct CollectionQuery {
    pub skip: Option<u32>,
    pub top: Option<u32>,
    pub updated_after_utc: Option<String>,
    pub field_name: Option<String>,
    pub field_value: Option<String>,
}

impl CollectionQuery {
    fn filter(&self) -> Result<CollectionFilter, Response> {
        let updated_after = self
            .updated_after_utc
            .as_deref()
            .map(|raw| {
                DateTime::parse_from_rfc3339(raw)
                    .map(|dt| dt.with_timezone(&Utc))
                    .map_err(|e| bad_request(format!("Invalid updated_after_utc '{raw}': {e}")))
            })
            .transpose()?;

        CollectionFilter::from_parts(
            updated_after,
            self.field_name.clone(),
            self.field_value.clone(),
        )
        .map_err(|e| bad_request(e.to_string()))
    }

    fn pagination(&self) -> PaginationParams {
        PaginationParams {
            skip: self.skip,
            top: self.top,
        }
    }
}

fn bad_request(message: String) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(serde_json::json!({ "Message": message })),
    )
        .into_response()
}

fn not_found<T: Stored>(id: u64) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({
            "Message": format!("{} with id {} not found", T::ENTITY_TYPE, id)
        })),
    )
        .into_response()
}

/// GET /{Collection} and GET /{Collection}/Search
pub async fn list_records<T: Stored + List>(
    State(state): State<SharedState>,
    Query(query): Query<CollectionQuery>,
) -> Response {
    let filter = match query.filter() {
        Ok(filter) => filter,
        Err(response) => return response,
    };
    let (skip, top) = query.pagination().resolve(T::PAGE_SIZE);

    let mut state = state.write().await;
    state.collection_requests += 1;

    let records: Vec<T> = state.list(&filter, skip, top);
    (StatusCode::OK, Json(records)).into_response()
}

/// GET /{Collection}/{id}
pub async fn get_record<T: Stored>(
    State(state): State<SharedState>,
    Path(id): Path<u64>,
) -> Response {
    let state = state.read().await;

    match state.get::<T>(id) {
        Some(record) => (StatusCode::OK, Json(record.clone())).into_response(),
        None => not_found::<T>(id),
    }
}

/// POST /{Collection}
pub async fn create_record<T>(
    State(state): State<SharedState>,
    Json(projection): Json<T::Projection>,
) -> Response
where
    T: Stored + Writable + Default,
    T::Projection: DeserializeOwned,
{
    let mut record = T::default();
    record.merge_projection(projection);

    let mut state = state.write().await;
    let created = state.create(record);
    (StatusCode::OK, Json(created)).into_response()
}

/// PUT /{Collection}
///
/// The record ID travels in the body, as Insightly expects.
pub async fn update_record<T>(
    State(state): State<SharedState>,
    Json(projection): Json<T::Projection>,
) -> Response
where
    T: Stored + Writable + Default,
    T::Projection: DeserializeOwned + Clone,
{
    let mut probe = T::default();
    probe.merge_projection(projection.clone());
    let id = probe.id();
    if id == 0 {
        return bad_request(format!("{} id is required for update", T::ENTITY_TYPE));
    }

    let mut state = state.write().await;
    let Some(mut record) = state.get::<T>(id).cloned() else {
        return not_found::<T>(id);
    };
    record.merge_projection(projection);

    match state.replace(record) {
        Some(updated) => (StatusCode::OK, Json(updated)).into_response(),
        None => not_found::<T>(id),
    }
}

/// DELETE /{Collection}/{id}
pub async fn delete_record<T: Stored>(
    State(state): State<SharedState>,
    Path(id): Path<u64>,
) -> Response {
    let mut state = state.write().await;

    if state.remove::<T>(id) {
        StatusCode::ACCEPTED.into_response()
    } else {
        not_found::<T>(id)
    }
}

/// GET /{Collection}/{id}/Links
pub async fn list_links<T: Stored>(
    State(state): State<SharedState>,
    Path(id): Path<u64>,
) -> Response {
    let state = state.read().await;

    if state.get::<T>(id).is_none() {
        return not_found::<T>(id);
    }

    (StatusCode::OK, Json(state.links_of(T::ENTITY_TYPE, id))).into_response()
}
