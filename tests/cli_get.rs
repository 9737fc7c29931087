//! Execution tests for the get command.
//!
//! Uses wiremock to mock the Insightly API and test actual execution flow.

use insightly::{
    Contact, Get, InsightlyClient, InsightlyError, Instance, Links, Opportunity, PipelineStage,
};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_get_opportunity_returns_entity() {
    let mock_server = MockServer::start().await;

    let response = serde_json::json!({
        "OPPORTUNITY_ID": 4711,
        "OPPORTUNITY_NAME": "Fleet renewal",
        "OPPORTUNITY_STATE": "OPEN",
        "BID_CURRENCY": "USD",
        "OPPORTUNITY_VALUE": 12500.0,
        "DATE_CREATED_UTC": "2024-01-02 09:00:00",
        "DATE_UPDATED_UTC": "2024-02-10 17:45:12",
        "FORECAST_CLOSE_DATE": null,
        "CUSTOMFIELDS": [
            {"FIELD_NAME": "Region__c", "FIELD_VALUE": "EMEA"}
        ],
        "TAGS": [{"TAG_NAME": "fleet"}]
    });

    Mock::given(method("GET"))
        .and(path("/Opportunities/4711"))
        .and(header("authorization", "Basic dGVzdC1rZXk6"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&response))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = InsightlyClient::new("test-key", &mock_server.uri()).unwrap();
    let opportunity = Opportunity::get(&client, 4711).await.unwrap();

    assert_eq!(opportunity.opportunity_id, 4711);
    assert_eq!(opportunity.opportunity_name, "Fleet renewal");
    assert_eq!(opportunity.forecast_close_date, None);
    assert_eq!(
        opportunity.custom_fields.value_str("Region__c").as_deref(),
        Some("EMEA")
    );
    assert_eq!(opportunity.tags[0].tag_name, "fleet");
    assert!(opportunity.date_updated_utc.is_some());
}

#[tokio::test]
async fn test_get_missing_record_is_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/Contacts/404"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(serde_json::json!({
                "Message": "Contact not found"
            })),
        )
        .mount(&mock_server)
        .await;

    let client = InsightlyClient::new("test-key", &mock_server.uri()).unwrap();
    let err = Contact::get(&client, 404).await.unwrap_err();

    match err {
        InsightlyError::NotFound { entity_type, id } => {
            assert_eq!(entity_type, "Contact");
            assert_eq!(id, "404");
        }
        other => panic!("Expected NotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn test_links_use_plural_collection_path() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/Opportunities/5/Links"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([{
            "LINK_ID": 31,
            "OBJECT_NAME": "Opportunity",
            "OBJECT_ID": 5,
            "LINK_OBJECT_NAME": "Contact",
            "LINK_OBJECT_ID": 2,
            "ROLE": "Buyer"
        }])))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/Opportunity/5/Links"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = InsightlyClient::new("test-key", &mock_server.uri()).unwrap();
    let links = Opportunity::links(&client, 5).await.unwrap();

    assert_eq!(links.len(), 1);
    assert_eq!(links[0].link_object_id, Some(2));
    assert_eq!(links[0].role.as_deref(), Some("Buyer"));
}

#[tokio::test]
async fn test_get_contact_with_null_collections() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/Contacts/9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "CONTACT_ID": 9,
            "FIRST_NAME": "Grace",
            "LAST_NAME": "Hopper",
            "CUSTOMFIELDS": null,
            "TAGS": null
        })))
        .mount(&mock_server)
        .await;

    let client = InsightlyClient::new("test-key", &mock_server.uri()).unwrap();
    let contact = Contact::get(&client, 9).await.unwrap();

    assert_eq!(contact.full_name(), "Grace Hopper");
    assert!(contact.custom_fields.is_empty());
    assert!(contact.tags.is_empty());
}

#[tokio::test]
async fn test_get_pipeline_stage() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/PipelineStages/12"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "STAGE_ID": 12,
            "PIPELINE_ID": 1,
            "STAGE_NAME": "Propose",
            "STAGE_ORDER": 2,
            "ACTIVITYSET_ID": null,
            "OWNER_USER_ID": 100
        })))
        .mount(&mock_server)
        .await;

    let client = InsightlyClient::new("test-key", &mock_server.uri()).unwrap();
    let stage = PipelineStage::get(&client, 12).await.unwrap();

    assert_eq!(stage.stage_name, "Propose");
    assert_eq!(stage.stage_order, 2);
    assert_eq!(stage.owner_user_id, Some(100));
}

#[tokio::test]
async fn test_get_instance() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/Instance"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "INSTANCE_NAME": "Acme Corp",
            "INSTANCE_SUBDOMAIN": "acme",
            "PLAN_NAME": "Professional",
            "NEW_USER_EXPERIENCE_ENABLED": true
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = InsightlyClient::new("test-key", &mock_server.uri()).unwrap();
    let instance = Instance::get(&client).await.unwrap();

    assert_eq!(instance.instance_name, "Acme Corp");
    assert!(instance.new_user_experience_enabled);
}

#[tokio::test]
async fn test_get_server_error_is_api_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/Opportunities/1"))
        .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({
            "Message": "An error has occurred."
        })))
        .mount(&mock_server)
        .await;

    let client = InsightlyClient::new("test-key", &mock_server.uri()).unwrap();
    let err = Opportunity::get(&client, 1).await.unwrap_err();

    assert_eq!(err.status_code(), Some(500));
    assert!(err.to_string().contains("An error has occurred."));
}
