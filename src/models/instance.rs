//! Instance metadata.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::transport::{request_json, Method, Transport};

/// The Insightly instance (account) the API key belongs to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instance {
    #[serde(rename = "INSTANCE_NAME", default)]
    pub instance_name: String,

    #[serde(rename = "INSTANCE_SUBDOMAIN", default)]
    pub instance_subdomain: Option<String>,

    #[serde(rename = "PLAN_NAME", default)]
    pub plan_name: String,

    #[serde(rename = "NEW_USER_EXPERIENCE_ENABLED", default)]
    pub new_user_experience_enabled: bool,
}

impl Instance {
    pub const PATH: &'static str = "Instance";

    /// Fetch the instance. There is exactly one per API key, so no ID is taken.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body cannot be decoded.
    #[tracing::instrument(skip(client))]
    pub async fn get(client: &dyn Transport) -> Result<Self> {
        request_json(client, Method::GET, Self::PATH, None).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instance_deserialize() {
        let instance: Instance = serde_json::from_str(
            r#"{
                "INSTANCE_NAME": "Acme",
                "INSTANCE_SUBDOMAIN": null,
                "PLAN_NAME": "Professional",
                "NEW_USER_EXPERIENCE_ENABLED": true
            }"#,
        )
        .unwrap();

        assert_eq!(instance.instance_name, "Acme");
        assert!(instance.instance_subdomain.is_none());
        assert!(instance.new_user_experience_enabled);
    }
}
