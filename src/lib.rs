//! Insightly CRM API client library.
//!
//! A Rust library for interacting with the Insightly REST API using a
//! trait-based architecture where each operation (Get, List, Create,
//! Update, Delete) is defined as a trait that entity types implement.
//!
//! # Quick Start
//!
//! ```no_run
//! use insightly::{CollectionFilter, Get, InsightlyClient, List, Opportunity, Update};
//!
//! #[tokio::main]
//! async fn main() -> insightly::Result<()> {
//!     // Create client from environment variables
//!     let client = InsightlyClient::from_env()?;
//!
//!     // Fetch every open opportunity, walking all pages
//!     let filter = CollectionFilter::field("OPPORTUNITY_STATE", "OPEN");
//!     let open = Opportunity::list_all(&client, &filter).await?;
//!     println!("Found {} open opportunities", open.len());
//!
//!     // Get one and mark it as won
//!     let mut opportunity = Opportunity::get(&client, 4711).await?;
//!     opportunity.opportunity_state = Some("WON".to_string());
//!     let updated = Opportunity::update(&client, Some(&opportunity)).await?;
//!     println!("Updated: {:?}", updated.map(|o| o.opportunity_state));
//!
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - [`Transport`] - the single seam to the network; [`InsightlyClient`]
//!   implements it over HTTP
//! - [`List`] - paginated collections, built on [`fetch_all`] and
//!   [`collection_path`]
//! - [`Get`], [`Create`], [`Update`], [`Delete`], [`Links`] - single-record
//!   operations
//! - [`Writable`] - the write projection each writable entity declares, so
//!   server-computed fields are never sent back
//!
//! # Configuration
//!
//! The client reads configuration from environment variables:
//!
//! - `INSIGHTLY_API_KEY` (required) - Your Insightly API key
//! - `INSIGHTLY_API_URL` (optional) - Base URL (defaults to `https://api.insightly.com/v3.1`)
//! - `INSIGHTLY_POD` (optional) - Pod name such as `na1`, used when no URL is set
//! - `INSIGHTLY_TIMEOUT_SECS` (optional) - Request timeout in seconds

mod client;
mod config;
mod error;
mod models;
mod output;
mod pagination;
mod projection;
mod query;
mod traits;
mod transport;

pub mod cli;
pub mod mcp;

#[cfg(feature = "test-server")]
pub mod mock_server;

// Re-export core types
pub use client::InsightlyClient;
pub use config::{pod_url, ClientConfig, DEFAULT_API_URL};
pub use error::{InsightlyError, Result};
pub use pagination::{fetch_all, Page, PaginationParams};
pub use projection::{project, Writable};
pub use query::{collection_path, CollectionFilter, FieldFilter, ISO8601_FORMAT};
pub use transport::{Method, Transport};

// Re-export traits
pub use traits::{Create, Delete, Get, Links, List, Resource, Update, DEFAULT_PAGE_SIZE};

// Re-export output formatting
pub use output::PrettyPrint;

// Re-export models
pub use models::{
    date_utc,
    // Contact types
    Contact,
    ContactWrite,
    // Shared types
    CustomField,
    CustomFields,
    // Instance
    Instance,
    Link,
    // Opportunity types
    Opportunity,
    OpportunityWrite,
    // Pipeline types
    PipelineStage,
    Tag,
    // Team types
    TeamMember,
    TeamMemberWrite,
};
