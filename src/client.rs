//! Insightly API client.
//!
//! Low-level HTTP client that handles authentication and raw requests.
//! Higher-level operations are implemented via traits on entity types.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde_json::Value;
use url::Url;

use crate::config::ClientConfig;
use crate::error::{InsightlyError, Result};
use crate::transport::{Method, Transport};

const USER_AGENT: &str = concat!("insightly/", env!("CARGO_PKG_VERSION"));

/// Low-level Insightly API client.
///
/// Handles authentication and HTTP requests. Entity-specific operations
/// are implemented via the `Get`, `List`, `Create`, `Update` and `Delete`
/// traits on model types, which accept any [`Transport`].
///
/// This struct is cheaply cloneable; clones reference the same underlying
/// connection pool.
///
/// # Example
///
/// ```no_run
/// use insightly::{ClientConfig, InsightlyClient};
///
/// # fn example() -> insightly::Result<()> {
/// // Create from environment variables
/// let client = InsightlyClient::from_env()?;
///
/// // Or configure manually
/// let config = ClientConfig::new("your-api-key", "https://api.na1.insightly.com/v3.1")?;
/// let client = InsightlyClient::from_config(config)?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct InsightlyClient {
    http: Client,
    base_url: Arc<Url>,
    api_key: String,
}

impl std::fmt::Debug for InsightlyClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InsightlyClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl InsightlyClient {
    /// Create a client from environment variables.
    ///
    /// See [`ClientConfig::from_env`] for the variables that are read.
    ///
    /// # Errors
    ///
    /// Returns an error if `INSIGHTLY_API_KEY` is not set.
    pub fn from_env() -> Result<Self> {
        Self::from_config(ClientConfig::from_env()?)
    }

    /// Create a new client with the provided API key and base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid.
    pub fn new(api_key: &str, base_url: &str) -> Result<Self> {
        Self::from_config(ClientConfig::new(api_key, base_url)?)
    }

    /// Create a client from an explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn from_config(config: ClientConfig) -> Result<Self> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .brotli(true)
            .gzip(true)
            .deflate(true)
            .timeout(config.timeout())
            .build()
            .map_err(InsightlyError::HttpError)?;

        Ok(Self {
            http,
            base_url: Arc::new(config.base_url().clone()),
            api_key: config.api_key().to_string(),
        })
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Check response status and convert errors.
    async fn check_response(response: Response) -> Result<Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        if status.as_u16() == 429 {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok());
            return Err(InsightlyError::RateLimited {
                retry_after_secs: retry_after,
            });
        }

        let message = Self::extract_error_message(response, status).await;
        Err(InsightlyError::ApiError {
            message,
            status_code: Some(status.as_u16()),
        })
    }

    /// Extract error message from a failed response.
    async fn extract_error_message(response: Response, status: reqwest::StatusCode) -> String {
        let body = match response.text().await {
            Ok(b) => b,
            Err(_) => return format!("HTTP {status}"),
        };

        if body.trim().is_empty() {
            return format!("HTTP {status}");
        }

        if let Ok(json) = serde_json::from_str::<Value>(&body) {
            for key in ["Message", "message", "error"] {
                if let Some(msg) = json.get(key).and_then(|m| m.as_str()) {
                    return msg.to_string();
                }
            }
        }

        body
    }
}

#[async_trait]
impl Transport for InsightlyClient {
    #[tracing::instrument(skip(self, body))]
    async fn request(&self, method: Method, path: &str, body: Option<Value>) -> Result<Value> {
        let url = self.base_url.join(path.trim_start_matches('/'))?;

        let mut request = self
            .http
            .request(method, url)
            .basic_auth(&self.api_key, Some(""));
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().await.map_err(InsightlyError::HttpError)?;
        let response = Self::check_response(response).await?;

        let text = response.text().await.map_err(InsightlyError::HttpError)?;
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_client_debug() {
        let client = InsightlyClient::new("test-key", "https://api.insightly.com/v3.1").unwrap();
        let debug = format!("{:?}", client);
        assert!(debug.contains("InsightlyClient"));
        assert!(debug.contains("base_url"));
        // API key should not be in debug output
        assert!(!debug.contains("test-key"));
    }

    #[tokio::test]
    async fn test_request_sends_basic_auth() {
        let mock_server = MockServer::start().await;

        // base64("test-key:")
        Mock::given(method("GET"))
            .and(path("/Instance"))
            .and(header("authorization", "Basic dGVzdC1rZXk6"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = InsightlyClient::new("test-key", &mock_server.uri()).unwrap();
        let value = client.request(Method::GET, "Instance", None).await.unwrap();
        assert!(value.is_object());
    }

    #[tokio::test]
    async fn test_empty_body_is_null() {
        let mock_server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/Opportunities/7"))
            .respond_with(ResponseTemplate::new(202))
            .mount(&mock_server)
            .await;

        let client = InsightlyClient::new("test-key", &mock_server.uri()).unwrap();
        let value = client
            .request(Method::DELETE, "Opportunities/7", None)
            .await
            .unwrap();
        assert!(value.is_null());
    }

    #[tokio::test]
    async fn test_error_message_extracted() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/Opportunities/1"))
            .respond_with(
                ResponseTemplate::new(400)
                    .set_body_json(serde_json::json!({"Message": "Bad things"})),
            )
            .mount(&mock_server)
            .await;

        let client = InsightlyClient::new("test-key", &mock_server.uri()).unwrap();
        let err = client
            .request(Method::GET, "Opportunities/1", None)
            .await
            .unwrap_err();

        match err {
            InsightlyError::ApiError {
                message,
                status_code,
            } => {
                assert_eq!(message, "Bad things");
                assert_eq!(status_code, Some(400));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_rate_limited() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/Contacts"))
            .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "12"))
            .mount(&mock_server)
            .await;

        let client = InsightlyClient::new("test-key", &mock_server.uri()).unwrap();
        let err = client
            .request(Method::GET, "Contacts?skip=0&top=100", None)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            InsightlyError::RateLimited {
                retry_after_secs: Some(12)
            }
        ));
    }

    #[tokio::test]
    async fn test_malformed_body_is_decode_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/Instance"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&mock_server)
            .await;

        let client = InsightlyClient::new("test-key", &mock_server.uri()).unwrap();
        let err = client.request(Method::GET, "Instance", None).await.unwrap_err();
        assert!(err.is_decode());
    }
}
