//! Mock Insightly API server.
//!
//! Provides an axum-based HTTP server that simulates the Insightly API.

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use super::fixtures::{DefaultScenario, Fixtures};
use super::handlers;
use super::state::{MockState, SharedState};
use crate::{Contact, Opportunity, PipelineStage, TeamMember};

/// A mock Insightly API server for testing.
///
/// The server runs in the background and can be used to test the client
/// against a stateful API implementation: records created through it can be
/// read back, and collection requests are counted in
/// [`MockState::collection_requests`].
pub struct MockServer {
    /// The URL where the server is listening.
    url: String,
    /// Handle to the server task.
    handle: JoinHandle<()>,
    /// Shared state that can be modified during tests.
    state: SharedState,
}

impl MockServer {
    /// Start a new mock server with default fixtures.
    ///
    /// The server listens on a random available port and returns immediately.
    /// Use `url()` to get the server's base URL.
    pub async fn start() -> Self {
        Self::with_state(Self::default_state()).await
    }

    /// Start a mock server with empty state.
    pub async fn start_empty() -> Self {
        Self::with_state(MockState::new()).await
    }

    /// Start a mock server with custom state.
    pub async fn with_state(state: MockState) -> Self {
        let shared_state = state.shared();
        let app = Self::create_router(shared_state.clone());

        // Bind to a random available port
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to address");
        let addr = listener.local_addr().expect("Failed to get local address");

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Server error");
        });

        Self {
            url: format!("http://{}", addr),
            handle,
            state: shared_state,
        }
    }

    /// Get the base URL of the mock server.
    ///
    /// Use this URL when creating an `InsightlyClient` for testing.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get access to the server's shared state.
    pub fn state(&self) -> SharedState {
        self.state.clone()
    }

    /// Number of collection requests served so far.
    pub async fn collection_requests(&self) -> u64 {
        self.state.read().await.collection_requests
    }

    /// Shutdown the server.
    ///
    /// This aborts the server task. It's safe to call multiple times.
    pub async fn shutdown(self) {
        self.handle.abort();
        let _ = self.handle.await;
    }

    /// Create the default state with common test fixtures.
    fn default_state() -> MockState {
        Self::state_from_scenario(Fixtures::default_scenario())
    }

    fn state_from_scenario(scenario: DefaultScenario) -> MockState {
        let mut state = MockState::new().with_instance(scenario.instance);

        for opportunity in scenario.opportunities {
            state.insert(opportunity);
        }
        for contact in scenario.contacts {
            state.insert(contact);
        }
        for stage in scenario.pipeline_stages {
            state.insert(stage);
        }
        for member in scenario.team_members {
            state.insert(member);
        }
        state.links = scenario.links;

        state
    }

    /// Create the axum router with all routes.
    pub(crate) fn create_router(state: SharedState) -> Router {
        Router::new()
            // Opportunity routes
            .route(
                "/Opportunities",
                get(handlers::list_records::<Opportunity>)
                    .post(handlers::create_record::<Opportunity>)
                    .put(handlers::update_record::<Opportunity>),
            )
            .route(
                "/Opportunities/Search",
                get(handlers::list_records::<Opportunity>),
            )
            .route(
                "/Opportunities/:id",
                get(handlers::get_record::<Opportunity>)
                    .delete(handlers::delete_record::<Opportunity>),
            )
            .route(
                "/Opportunities/:id/Links",
                get(handlers::list_links::<Opportunity>),
            )
            // Contact routes
            .route(
                "/Contacts",
                get(handlers::list_records::<Contact>)
                    .post(handlers::create_record::<Contact>)
                    .put(handlers::update_record::<Contact>),
            )
            .route("/Contacts/Search", get(handlers::list_records::<Contact>))
            .route(
                "/Contacts/:id",
                get(handlers::get_record::<Contact>).delete(handlers::delete_record::<Contact>),
            )
            .route("/Contacts/:id/Links", get(handlers::list_links::<Contact>))
            // Pipeline stage routes (read-only)
            .route(
                "/PipelineStages",
                get(handlers::list_records::<PipelineStage>),
            )
            .route(
                "/PipelineStages/Search",
                get(handlers::list_records::<PipelineStage>),
            )
            .route(
                "/PipelineStages/:id",
                get(handlers::get_record::<PipelineStage>),
            )
            // Team member routes
            .route(
                "/TeamMembers",
                get(handlers::list_records::<TeamMember>)
                    .post(handlers::create_record::<TeamMember>),
            )
            .route(
                "/TeamMembers/Search",
                get(handlers::list_records::<TeamMember>),
            )
            .route(
                "/TeamMembers/:id",
                get(handlers::get_record::<TeamMember>)
                    .delete(handlers::delete_record::<TeamMember>),
            )
            .route("/Instance", get(handlers::get_instance))
            .route_layer(middleware::from_fn_with_state(
                state.clone(),
                require_authorization,
            ))
            // Health check
            .route("/health", get(health_check))
            .with_state(state)
    }
}

/// Reject requests without the configured `Authorization` header.
async fn require_authorization(
    State(state): State<SharedState>,
    request: Request,
    next: Next,
) -> Response {
    let required = state.read().await.required_authorization.clone();

    if let Some(expected) = required {
        let given = request
            .headers()
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok());
        if given != Some(expected.as_str()) {
            return (
                StatusCode::UNAUTHORIZED,
                Json(serde_json::json!({ "Message": "Authorization has been denied" })),
            )
                .into_response();
        }
    }

    next.run(request).await
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "ok"
}
