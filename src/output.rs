//! Output formatting for CLI display.
//!
//! Provides the [`PrettyPrint`] trait for human-readable output
//! as an alternative to JSON serialization.

use chrono::{DateTime, Utc};

use crate::{Contact, Instance, Link, Opportunity, PipelineStage, TeamMember};

/// Trait for human-readable key-value output.
///
/// Implemented by entity types to provide formatted output
/// suitable for terminal display when `--json` is not specified.
pub trait PrettyPrint {
    /// Returns a formatted string for terminal display.
    fn pretty_print(&self) -> String;
}

fn header(title: String) -> Vec<String> {
    let divider = "─".repeat(title.chars().count().max(30));
    vec![title, divider]
}

fn timestamp(dt: &DateTime<Utc>) -> String {
    dt.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

impl PrettyPrint for Opportunity {
    fn pretty_print(&self) -> String {
        let mut lines = header(format!("Opportunity #{}", self.opportunity_id));
        lines.push(format!("Name:           {}", self.opportunity_name));

        if let Some(ref state) = self.opportunity_state {
            lines.push(format!("State:          {}", state));
        }

        if let Some(value) = self.opportunity_value {
            let currency = self.bid_currency.as_deref().unwrap_or("");
            lines.push(format!("Value:          {:.2} {}", value, currency).trim_end().to_string());
        }

        if let Some(probability) = self.probability {
            lines.push(format!("Probability:    {}%", probability));
        }

        if let (Some(pipeline), Some(stage)) = (self.pipeline_id, self.stage_id) {
            lines.push(format!("Pipeline/Stage: {} / {}", pipeline, stage));
        }

        if let Some(ref forecast) = self.forecast_close_date {
            lines.push(format!("Forecast Close: {}", forecast.format("%Y-%m-%d")));
        }

        if let Some(ref updated) = self.date_updated_utc {
            lines.push(format!("Updated:        {}", timestamp(updated)));
        }

        if !self.tags.is_empty() {
            let tags: Vec<&str> = self.tags.iter().map(|t| t.tag_name.as_str()).collect();
            lines.push(format!("Tags:           {}", tags.join(", ")));
        }

        lines.join("\n")
    }
}

impl PrettyPrint for Contact {
    fn pretty_print(&self) -> String {
        let mut lines = header(format!("Contact #{}", self.contact_id));
        lines.push(format!("Name:           {}", self.full_name()));

        if let Some(ref title) = self.title {
            lines.push(format!("Title:          {}", title));
        }

        if let Some(ref email) = self.email_address {
            lines.push(format!("Email:          {}", email));
        }

        if let Some(ref phone) = self.phone {
            lines.push(format!("Phone:          {}", phone));
        }

        if let Some(org) = self.organisation_id {
            lines.push(format!("Organisation:   {}", org));
        }

        if let Some(ref updated) = self.date_updated_utc {
            lines.push(format!("Updated:        {}", timestamp(updated)));
        }

        lines.join("\n")
    }
}

impl PrettyPrint for PipelineStage {
    fn pretty_print(&self) -> String {
        let mut lines = header(format!("Pipeline Stage #{}", self.stage_id));
        lines.push(format!("Name:           {}", self.stage_name));
        lines.push(format!("Pipeline:       {}", self.pipeline_id));
        lines.push(format!("Order:          {}", self.stage_order));
        lines.join("\n")
    }
}

impl PrettyPrint for TeamMember {
    fn pretty_print(&self) -> String {
        let mut lines = header(format!("Team Member #{}", self.permission_id));
        lines.push(format!("Team:           {}", self.team_id));
        lines.push(format!("User:           {}", self.member_user_id));
        lines.join("\n")
    }
}

impl PrettyPrint for Instance {
    fn pretty_print(&self) -> String {
        let mut lines = header(format!("Instance: {}", self.instance_name));
        lines.push(format!("Plan:           {}", self.plan_name));

        if let Some(ref subdomain) = self.instance_subdomain {
            lines.push(format!("Subdomain:      {}", subdomain));
        }

        lines.push(format!(
            "New UX:         {}",
            if self.new_user_experience_enabled { "enabled" } else { "disabled" }
        ));

        lines.join("\n")
    }
}

impl PrettyPrint for Link {
    fn pretty_print(&self) -> String {
        format!(
            "{} {} -> {} {}{}",
            self.object_name.as_deref().unwrap_or("?"),
            self.object_id.map(|id| id.to_string()).unwrap_or_default(),
            self.link_object_name.as_deref().unwrap_or("?"),
            self.link_object_id.map(|id| id.to_string()).unwrap_or_default(),
            self.role
                .as_deref()
                .map(|r| format!(" ({r})"))
                .unwrap_or_default(),
        )
    }
}
