//! Mock Insightly API server for E2E testing.
//!
//! This module provides an in-memory mock server that simulates the Insightly
//! API for integration and end-to-end testing. Unlike wiremock which mocks at
//! the HTTP level per-test, this server maintains state across requests, so a
//! record created through the client can be listed, linked and deleted.
//!
//! # Example
//!
//! ```ignore
//! use insightly::mock_server::MockServer;
//! use insightly::{Get, InsightlyClient, Opportunity};
//!
//! #[tokio::test]
//! async fn test_workflow() {
//!     let server = MockServer::start().await;
//!     let client = InsightlyClient::new("test-key", server.url()).unwrap();
//!
//!     // Server comes with default fixtures
//!     let opportunity = Opportunity::get(&client, 1).await.unwrap();
//!     assert_eq!(opportunity.opportunity_name, "Fleet renewal");
//!
//!     server.shutdown().await;
//! }
//! ```

mod fixtures;
mod handlers;
mod server;
mod state;

pub use fixtures::{DefaultScenario, Fixtures};
pub use server::MockServer;
pub use state::{MockState, SharedState, Stored};
