//! MCP tool parameter types with JSON Schema support.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::Deserialize;

use crate::error::{InsightlyError, Result};
use crate::query::CollectionFilter;

/// Entity types supported by MCP tools.
#[derive(Debug, Clone, Copy, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    /// Sales opportunity.
    Opportunity,
    /// Person.
    Contact,
    /// Pipeline stage (read-only).
    PipelineStage,
    /// Team membership.
    TeamMember,
    /// The Insightly instance (get only, no id).
    Instance,
}

/// Parameters for the `get` MCP tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetParams {
    /// The type of entity to fetch.
    pub entity: EntityType,
    /// The record ID (omit for instance).
    #[serde(default)]
    pub id: Option<u64>,
}

/// Parameters for the `list` MCP tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ListParams {
    /// The type of entity to list.
    pub entity: EntityType,
    /// Only records updated after this RFC 3339 timestamp.
    #[serde(default)]
    pub updated_after: Option<String>,
    /// Field to filter on (requires field_value).
    #[serde(default)]
    pub field_name: Option<String>,
    /// Value the field must equal.
    #[serde(default)]
    pub field_value: Option<String>,
    /// Records to skip. When skip or top is set a single page is returned.
    #[serde(default)]
    pub skip: Option<u32>,
    /// Page size for a single page (max 500).
    #[serde(default)]
    pub top: Option<u32>,
}

impl ListParams {
    /// Build the collection filter from the optional filter arguments.
    ///
    /// # Errors
    ///
    /// Returns [`InsightlyError::InvalidArgument`] for an unparseable
    /// timestamp or a field name without a value (or vice versa).
    pub fn filter(&self) -> Result<CollectionFilter> {
        let updated_after = self
            .updated_after
            .as_deref()
            .map(|raw| {
                DateTime::parse_from_rfc3339(raw)
                    .map(|dt| dt.with_timezone(&Utc))
                    .map_err(|e| {
                        InsightlyError::InvalidArgument(format!("updated_after '{raw}': {e}"))
                    })
            })
            .transpose()?;

        CollectionFilter::from_parts(
            updated_after,
            self.field_name.clone(),
            self.field_value.clone(),
        )
    }

    /// True when the caller asked for a single page.
    pub fn is_single_page(&self) -> bool {
        self.skip.is_some() || self.top.is_some()
    }
}

/// Parameters for the `update` MCP tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct UpdateParams {
    /// The type of entity to update.
    pub entity: EntityType,
    /// The record ID.
    pub id: u64,
    /// New name (Opportunity only).
    #[serde(default)]
    pub name: Option<String>,
    /// New state (Opportunity only): OPEN, WON, LOST, SUSPENDED, ABANDONED.
    #[serde(default)]
    pub state: Option<String>,
}

/// Parameters for the `delete` MCP tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct DeleteParams {
    /// The type of entity to delete.
    pub entity: EntityType,
    /// The record ID.
    pub id: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_params_schema_generates() {
        let schema = schemars::schema_for!(GetParams);
        let json = serde_json::to_string(&schema).unwrap();
        assert!(json.contains("entity"));
        assert!(json.contains("id"));
    }

    #[test]
    fn list_params_schema_generates() {
        let schema = schemars::schema_for!(ListParams);
        let json = serde_json::to_string(&schema).unwrap();
        assert!(json.contains("entity"));
        assert!(json.contains("updated_after"));
        assert!(json.contains("field_name"));
        assert!(json.contains("field_value"));
        assert!(json.contains("skip"));
        assert!(json.contains("top"));
    }

    #[test]
    fn entity_type_schema_has_variants() {
        let schema = schemars::schema_for!(EntityType);
        let json = serde_json::to_string(&schema).unwrap();
        assert!(json.contains("opportunity"));
        assert!(json.contains("contact"));
        assert!(json.contains("pipeline_stage"));
        assert!(json.contains("team_member"));
        assert!(json.contains("instance"));
    }

    #[test]
    fn get_params_deserializes() {
        let json = r#"{"entity": "opportunity", "id": 4711}"#;
        let params: GetParams = serde_json::from_str(json).unwrap();
        assert!(matches!(params.entity, EntityType::Opportunity));
        assert_eq!(params.id, Some(4711));
    }

    #[test]
    fn list_params_deserializes_with_defaults() {
        let json = r#"{"entity": "team_member"}"#;
        let params: ListParams = serde_json::from_str(json).unwrap();
        assert!(matches!(params.entity, EntityType::TeamMember));
        assert!(!params.is_single_page());
        assert!(!params.filter().unwrap().is_active());
    }

    #[test]
    fn list_params_builds_filter() {
        let json = r#"{
            "entity": "contact",
            "updated_after": "2024-01-01T00:00:00Z",
            "field_name": "LAST_NAME",
            "field_value": "Hopper"
        }"#;
        let params: ListParams = serde_json::from_str(json).unwrap();
        let filter = params.filter().unwrap();
        assert!(filter.updated_after.is_some());
        assert_eq!(filter.field.unwrap().field_value, "Hopper");
    }

    #[test]
    fn list_params_rejects_half_field_filter() {
        let json = r#"{"entity": "contact", "field_name": "LAST_NAME"}"#;
        let params: ListParams = serde_json::from_str(json).unwrap();
        assert!(matches!(params.filter(), Err(InsightlyError::InvalidArgument(_))));
    }

    #[test]
    fn list_params_rejects_bad_timestamp() {
        let json = r#"{"entity": "contact", "updated_after": "last week"}"#;
        let params: ListParams = serde_json::from_str(json).unwrap();
        assert!(params.filter().is_err());
    }

    #[test]
    fn update_params_deserializes() {
        let json = r#"{"entity": "opportunity", "id": 5, "state": "WON"}"#;
        let params: UpdateParams = serde_json::from_str(json).unwrap();
        assert_eq!(params.id, 5);
        assert_eq!(params.state.as_deref(), Some("WON"));
        assert!(params.name.is_none());
    }
}
