//! Pipeline stage model.

use serde::{Deserialize, Serialize};

use crate::traits::{Get, List, Resource};

/// A stage of an opportunity or project pipeline.
///
/// Stages are configured in the Insightly UI; the API only reads them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineStage {
    #[serde(rename = "STAGE_ID")]
    pub stage_id: u64,

    #[serde(rename = "PIPELINE_ID", default)]
    pub pipeline_id: u64,

    #[serde(rename = "STAGE_NAME", default)]
    pub stage_name: String,

    #[serde(rename = "STAGE_ORDER", default)]
    pub stage_order: u32,

    #[serde(rename = "ACTIVITYSET_ID", default, skip_serializing_if = "Option::is_none")]
    pub activityset_id: Option<u64>,

    #[serde(rename = "OWNER_USER_ID", default)]
    pub owner_user_id: Option<u64>,
}

impl Resource for PipelineStage {
    const ENTITY_TYPE: &'static str = "PipelineStage";
    const PATH: &'static str = "PipelineStages";
    type Id = u64;
}

impl Get for PipelineStage {}

impl List for PipelineStage {
    const PAGE_SIZE: u32 = 500;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipeline_stage_deserialize() {
        let stage: PipelineStage = serde_json::from_str(
            r#"{"STAGE_ID": 8, "PIPELINE_ID": 3, "STAGE_NAME": "Proposal", "STAGE_ORDER": 2, "OWNER_USER_ID": 12}"#,
        )
        .unwrap();

        assert_eq!(stage.stage_id, 8);
        assert_eq!(stage.stage_name, "Proposal");
        assert!(stage.activityset_id.is_none());
    }

    #[test]
    fn test_activityset_omitted_when_unset() {
        let json = serde_json::to_value(PipelineStage::default()).unwrap();
        assert!(json.get("ACTIVITYSET_ID").is_none());
    }
}
