//! Tests for CLI output formatting.
//!
//! - JSON output with --json uses the Insightly wire field names
//! - Pretty-print output is the default

use insightly::{Contact, Instance, Opportunity, PipelineStage, PrettyPrint, TeamMember};

// ============================================================================
// JSON Output Tests
// ============================================================================

#[test]
fn test_json_output_uses_wire_names() {
    let opportunity = make_test_opportunity();
    let json_output = serde_json::to_string_pretty(&opportunity).unwrap();

    let parsed: serde_json::Value = serde_json::from_str(&json_output).unwrap();
    assert!(parsed.is_object());
    assert_eq!(parsed["OPPORTUNITY_NAME"], "Fleet renewal");
    assert_eq!(parsed["DATE_UPDATED_UTC"], "2024-02-10 17:45:12");
}

#[test]
fn test_json_output_for_list_is_array() {
    let contacts = vec![make_test_contact(), make_test_contact()];
    let json_output = serde_json::to_string_pretty(&contacts).unwrap();

    let parsed: serde_json::Value = serde_json::from_str(&json_output).unwrap();
    assert_eq!(parsed.as_array().unwrap().len(), 2);
}

#[test]
fn test_json_output_round_trips() {
    let opportunity = make_test_opportunity();
    let json_output = serde_json::to_string(&opportunity).unwrap();
    let back: Opportunity = serde_json::from_str(&json_output).unwrap();

    assert_eq!(back, opportunity);
}

// ============================================================================
// Pretty-Print Tests
// ============================================================================

#[test]
fn test_default_output_is_not_json() {
    let output = make_test_opportunity().pretty_print();

    let parse_result: Result<serde_json::Value, _> = serde_json::from_str(&output);
    assert!(parse_result.is_err(), "Default output should NOT be valid JSON");
}

#[test]
fn test_opportunity_pretty_print_shows_key_fields() {
    let output = make_test_opportunity().pretty_print();

    assert!(output.contains("Opportunity #4711"));
    assert!(output.contains("Fleet renewal"));
    assert!(output.contains("State:          OPEN"));
    assert!(output.contains("12500.00 USD"));
    assert!(output.contains("Pipeline/Stage: 1 / 11"));
    assert!(output.contains("Updated:        2024-02-10 17:45:12 UTC"));
}

#[test]
fn test_contact_pretty_print_shows_name_and_email() {
    let output = make_test_contact().pretty_print();

    assert!(output.contains("Contact #9"));
    assert!(output.contains("Grace Hopper"));
    assert!(output.contains("grace@example.com"));
}

#[test]
fn test_stage_member_and_instance_pretty_print() {
    let stage = PipelineStage {
        stage_id: 12,
        pipeline_id: 1,
        stage_name: "Propose".to_string(),
        stage_order: 2,
        activityset_id: None,
        owner_user_id: None,
    };
    assert!(stage.pretty_print().contains("Order:          2"));

    let member = TeamMember {
        permission_id: 3,
        team_id: 7,
        member_user_id: 100,
    };
    assert!(member.pretty_print().starts_with("Team Member #3"));

    let instance = Instance {
        instance_name: "Acme Corp".to_string(),
        instance_subdomain: None,
        plan_name: "Professional".to_string(),
        new_user_experience_enabled: false,
    };
    let output = instance.pretty_print();
    assert!(output.contains("Professional"));
    assert!(output.contains("disabled"));
}

#[test]
fn test_list_pretty_print_is_table() {
    use tabled::{Table, Tabled};

    #[derive(Tabled)]
    struct TestRow {
        id: u64,
        name: String,
    }

    let rows = vec![
        TestRow {
            id: 1,
            name: "a".to_string(),
        },
        TestRow {
            id: 2,
            name: "b".to_string(),
        },
    ];

    let table_output = Table::new(rows).to_string();

    assert!(table_output.contains("id"), "Should have column headers");
    assert!(table_output.contains("name"), "Should have column headers");
}

// ============================================================================
// Test Helpers
// ============================================================================

fn make_test_opportunity() -> Opportunity {
    serde_json::from_value(serde_json::json!({
        "OPPORTUNITY_ID": 4711,
        "OPPORTUNITY_NAME": "Fleet renewal",
        "OPPORTUNITY_STATE": "OPEN",
        "OPPORTUNITY_VALUE": 12500.0,
        "BID_CURRENCY": "USD",
        "PIPELINE_ID": 1,
        "STAGE_ID": 11,
        "DATE_UPDATED_UTC": "2024-02-10 17:45:12",
        "CUSTOMFIELDS": [],
        "TAGS": []
    }))
    .unwrap()
}

fn make_test_contact() -> Contact {
    serde_json::from_value(serde_json::json!({
        "CONTACT_ID": 9,
        "FIRST_NAME": "Grace",
        "LAST_NAME": "Hopper",
        "EMAIL_ADDRESS": "grace@example.com"
    }))
    .unwrap()
}
