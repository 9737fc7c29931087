//! Instance endpoint handler.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::mock_server::state::SharedState;

/// GET /Instance
pub async fn get_instance(State(state): State<SharedState>) -> impl IntoResponse {
    let state = state.read().await;

    match state.instance.clone() {
        Some(instance) => (StatusCode::OK, Json(instance)).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({ "Message": "Instance not found" })),
        )
            .into_response(),
    }
}
