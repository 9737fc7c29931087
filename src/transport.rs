//! The transport seam between entity operations and the network.
//!
//! Entity operations only ever see a [`Transport`]: they hand it a method, a
//! path relative to the API root and an optional JSON body, and get back the
//! decoded JSON value. [`crate::InsightlyClient`] is the HTTP implementation;
//! tests substitute their own.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::Result;

pub use reqwest::Method;

/// Issues a single request against the Insightly API.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send `body` (if any) to `path` with `method` and return the JSON body.
    ///
    /// `path` is relative to the API base URL and may include a query
    /// string. An empty response body is returned as [`Value::Null`].
    ///
    /// # Errors
    ///
    /// Returns an error for network failures, non-2xx statuses and bodies
    /// that are not valid JSON.
    async fn request(&self, method: Method, path: &str, body: Option<Value>) -> Result<Value>;
}

/// Send a request and decode the response into `T`.
pub(crate) async fn request_json<T: DeserializeOwned>(
    transport: &dyn Transport,
    method: Method,
    path: &str,
    body: Option<Value>,
) -> Result<T> {
    let value = transport.request(method, path, body).await?;
    Ok(serde_json::from_value(value)?)
}
