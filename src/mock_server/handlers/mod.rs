//! HTTP request handlers for the mock server.

pub mod instance;
pub mod records;

pub use instance::*;
pub use records::*;
