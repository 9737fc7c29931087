//! MCP (Model Context Protocol) server and tool types.
//!
//! This module provides an MCP server implementation for the Insightly API,
//! allowing AI assistants to read and maintain opportunities, contacts,
//! pipeline stages and team members.
//!
//! # Example
//!
//! ```no_run
//! use insightly::mcp::InsightlyServer;
//!
//! # fn main() -> insightly::Result<()> {
//! let server = InsightlyServer::from_env()?;
//! // Server can now be used with rmcp transport
//! # Ok(())
//! # }
//! ```

mod params;
mod server;

pub use params::*;
pub use server::InsightlyServer;
