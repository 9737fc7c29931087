//! Test data fixtures for the mock server.
//!
//! Provides factory functions for creating realistic test data.

use chrono::{TimeZone, Utc};

use crate::{Contact, Instance, Link, Opportunity, PipelineStage, Tag, TeamMember};

/// Collection of fixture factories for test data.
pub struct Fixtures;

impl Fixtures {
    // =========================================================================
    // Opportunity Fixtures
    // =========================================================================

    /// Create an open opportunity with the given ID.
    pub fn opportunity(id: u64, name: &str) -> Opportunity {
        Opportunity {
            opportunity_id: id,
            opportunity_name: name.to_string(),
            opportunity_state: Some("OPEN".to_string()),
            bid_currency: Some("USD".to_string()),
            date_created_utc: Utc.with_ymd_and_hms(2024, 1, 2, 9, 0, 0).single(),
            date_updated_utc: Utc.with_ymd_and_hms(2024, 1, 2, 9, 0, 0).single(),
            ..Default::default()
        }
    }

    /// Create an opportunity placed in a pipeline stage, with a value.
    pub fn staged_opportunity(
        id: u64,
        name: &str,
        pipeline_id: u64,
        stage_id: u64,
        value: f64,
    ) -> Opportunity {
        let mut opportunity = Self::opportunity(id, name);
        opportunity.pipeline_id = Some(pipeline_id);
        opportunity.stage_id = Some(stage_id);
        opportunity.opportunity_value = Some(value);
        opportunity.probability = Some(50);
        opportunity
    }

    // =========================================================================
    // Contact Fixtures
    // =========================================================================

    pub fn contact(id: u64, first_name: &str, last_name: &str) -> Contact {
        Contact {
            contact_id: id,
            first_name: Some(first_name.to_string()),
            last_name: Some(last_name.to_string()),
            email_address: Some(format!(
                "{}.{}@example.com",
                first_name.to_lowercase(),
                last_name.to_lowercase()
            )),
            date_created_utc: Utc.with_ymd_and_hms(2024, 1, 2, 9, 0, 0).single(),
            date_updated_utc: Utc.with_ymd_and_hms(2024, 1, 2, 9, 0, 0).single(),
            ..Default::default()
        }
    }

    // =========================================================================
    // Pipeline and Team Fixtures
    // =========================================================================

    pub fn pipeline_stage(id: u64, pipeline_id: u64, name: &str, order: u32) -> PipelineStage {
        PipelineStage {
            stage_id: id,
            pipeline_id,
            stage_name: name.to_string(),
            stage_order: order,
            activityset_id: None,
            owner_user_id: None,
        }
    }

    pub fn team_member(id: u64, team_id: u64, member_user_id: u64) -> TeamMember {
        TeamMember {
            permission_id: id,
            team_id,
            member_user_id,
        }
    }

    // =========================================================================
    // Links and Instance
    // =========================================================================

    /// Create a forward link from one record to another.
    pub fn link(
        id: u64,
        object_name: &str,
        object_id: u64,
        link_object_name: &str,
        link_object_id: u64,
    ) -> Link {
        Link {
            link_id: id,
            object_name: Some(object_name.to_string()),
            object_id: Some(object_id),
            link_object_name: Some(link_object_name.to_string()),
            link_object_id: Some(link_object_id),
            role: None,
            details: None,
            relationship_id: None,
            is_forward: Some(true),
        }
    }

    pub fn instance() -> Instance {
        Instance {
            instance_name: "Acme Corp".to_string(),
            instance_subdomain: Some("acme".to_string()),
            plan_name: "Professional".to_string(),
            new_user_experience_enabled: true,
        }
    }

    // =========================================================================
    // Scenario Builders
    // =========================================================================

    /// Create a default scenario: one sales pipeline with four stages,
    /// opportunities spread over it, two contacts and a small team.
    pub fn default_scenario() -> DefaultScenario {
        let mut won = Self::staged_opportunity(3, "Warehouse expansion", 1, 14, 48_000.0);
        won.opportunity_state = Some("WON".to_string());
        won.probability = Some(100);
        won.tags = vec![Tag {
            tag_name: "enterprise".to_string(),
        }];

        let mut buyer = Self::link(1, "Opportunity", 1, "Contact", 1);
        buyer.role = Some("Buyer".to_string());

        DefaultScenario {
            opportunities: vec![
                Self::staged_opportunity(1, "Fleet renewal", 1, 11, 12_500.0),
                Self::staged_opportunity(2, "Support contract", 1, 12, 3_000.0),
                won,
            ],
            contacts: vec![
                Self::contact(1, "Ada", "Lovelace"),
                Self::contact(2, "Grace", "Hopper"),
            ],
            pipeline_stages: vec![
                Self::pipeline_stage(11, 1, "Qualify", 1),
                Self::pipeline_stage(12, 1, "Propose", 2),
                Self::pipeline_stage(13, 1, "Negotiate", 3),
                Self::pipeline_stage(14, 1, "Close", 4),
            ],
            team_members: vec![Self::team_member(1, 7, 100), Self::team_member(2, 7, 101)],
            links: vec![buyer, Self::link(2, "Contact", 2, "Opportunity", 2)],
            instance: Self::instance(),
        }
    }
}

/// A complete test scenario with related data.
pub struct DefaultScenario {
    pub opportunities: Vec<Opportunity>,
    pub contacts: Vec<Contact>,
    pub pipeline_stages: Vec<PipelineStage>,
    pub team_members: Vec<TeamMember>,
    pub links: Vec<Link>,
    pub instance: Instance,
}
