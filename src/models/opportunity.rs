//! Opportunity model and trait implementations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::{date_utc, CustomField, CustomFields, Tag};
use crate::projection::{assigned_id, Writable};
use crate::traits::{Create, Delete, Get, Links, List, Resource, Update};

/// An Insightly opportunity (a potential deal).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Opportunity {
    /// Server-assigned ID; `0` for a record that has not been created yet.
    #[serde(rename = "OPPORTUNITY_ID", default)]
    pub opportunity_id: u64,

    #[serde(rename = "OPPORTUNITY_NAME", default)]
    pub opportunity_name: String,

    #[serde(rename = "OPPORTUNITY_DETAILS", default)]
    pub opportunity_details: Option<String>,

    /// `OPEN`, `WON`, `LOST`, `SUSPENDED` or `ABANDONED`.
    #[serde(rename = "OPPORTUNITY_STATE", default)]
    pub opportunity_state: Option<String>,

    #[serde(rename = "RESPONSIBLE_USER_ID", default)]
    pub responsible_user_id: Option<u64>,

    #[serde(rename = "CATEGORY_ID", default)]
    pub category_id: Option<u64>,

    #[serde(rename = "IMAGE_URL", default)]
    pub image_url: Option<String>,

    #[serde(rename = "BID_CURRENCY", default)]
    pub bid_currency: Option<String>,

    #[serde(rename = "BID_AMOUNT", default)]
    pub bid_amount: Option<f64>,

    /// How the bid is charged: `Fixed Bid`, `Per Hour`, `Per Month`, ...
    #[serde(rename = "BID_TYPE", default)]
    pub bid_type: Option<String>,

    #[serde(rename = "BID_DURATION", default)]
    pub bid_duration: Option<u32>,

    #[serde(rename = "ACTUAL_CLOSE_DATE", with = "date_utc", default)]
    pub actual_close_date: Option<DateTime<Utc>>,

    /// Set by the server.
    #[serde(rename = "DATE_CREATED_UTC", with = "date_utc", default)]
    pub date_created_utc: Option<DateTime<Utc>>,

    /// Set by the server.
    #[serde(rename = "DATE_UPDATED_UTC", with = "date_utc", default)]
    pub date_updated_utc: Option<DateTime<Utc>>,

    #[serde(rename = "OPPORTUNITY_VALUE", default)]
    pub opportunity_value: Option<f64>,

    #[serde(rename = "PROBABILITY", default)]
    pub probability: Option<u32>,

    #[serde(rename = "FORECAST_CLOSE_DATE", with = "date_utc", default)]
    pub forecast_close_date: Option<DateTime<Utc>>,

    #[serde(rename = "OWNER_USER_ID", default)]
    pub owner_user_id: Option<u64>,

    /// Set by the server.
    #[serde(rename = "LAST_ACTIVITY_DATE_UTC", with = "date_utc", default)]
    pub last_activity_date_utc: Option<DateTime<Utc>>,

    /// Set by the server.
    #[serde(rename = "NEXT_ACTIVITY_DATE_UTC", with = "date_utc", default)]
    pub next_activity_date_utc: Option<DateTime<Utc>>,

    #[serde(rename = "PIPELINE_ID", default)]
    pub pipeline_id: Option<u64>,

    #[serde(rename = "STAGE_ID", default)]
    pub stage_id: Option<u64>,

    /// Set by the server.
    #[serde(rename = "CREATED_USER_ID", default)]
    pub created_user_id: Option<u64>,

    #[serde(rename = "ORGANISATION_ID", default)]
    pub organisation_id: Option<u64>,

    #[serde(rename = "CUSTOMFIELDS", default)]
    pub custom_fields: CustomFields,

    /// Tags are managed through their own endpoints and never written here.
    #[serde(rename = "TAGS", default, deserialize_with = "super::common::null_as_empty")]
    pub tags: Vec<Tag>,
}

impl Opportunity {
    /// A new, not yet created opportunity.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            opportunity_name: name.into(),
            ..Default::default()
        }
    }

    /// True once the opportunity has been won.
    pub fn is_won(&self) -> bool {
        self.opportunity_state
            .as_deref()
            .is_some_and(|s| s.eq_ignore_ascii_case("WON"))
    }
}

/// The fields of an [`Opportunity`] accepted by create and update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpportunityWrite {
    #[serde(rename = "OPPORTUNITY_ID", default, skip_serializing_if = "Option::is_none")]
    pub opportunity_id: Option<u64>,
    #[serde(rename = "OPPORTUNITY_NAME", default)]
    pub opportunity_name: String,
    #[serde(rename = "OPPORTUNITY_DETAILS", default)]
    pub opportunity_details: Option<String>,
    #[serde(rename = "OPPORTUNITY_STATE", default)]
    pub opportunity_state: Option<String>,
    #[serde(rename = "RESPONSIBLE_USER_ID", default)]
    pub responsible_user_id: Option<u64>,
    #[serde(rename = "CATEGORY_ID", default)]
    pub category_id: Option<u64>,
    #[serde(rename = "IMAGE_URL", default)]
    pub image_url: Option<String>,
    #[serde(rename = "BID_CURRENCY", default)]
    pub bid_currency: Option<String>,
    #[serde(rename = "BID_AMOUNT", default)]
    pub bid_amount: Option<f64>,
    #[serde(rename = "BID_TYPE", default)]
    pub bid_type: Option<String>,
    #[serde(rename = "BID_DURATION", default)]
    pub bid_duration: Option<u32>,
    #[serde(rename = "ACTUAL_CLOSE_DATE", with = "date_utc", default)]
    pub actual_close_date: Option<DateTime<Utc>>,
    #[serde(rename = "OPPORTUNITY_VALUE", default)]
    pub opportunity_value: Option<f64>,
    #[serde(rename = "PROBABILITY", default)]
    pub probability: Option<u32>,
    #[serde(rename = "FORECAST_CLOSE_DATE", with = "date_utc", default)]
    pub forecast_close_date: Option<DateTime<Utc>>,
    #[serde(rename = "OWNER_USER_ID", default)]
    pub owner_user_id: Option<u64>,
    #[serde(rename = "PIPELINE_ID", default)]
    pub pipeline_id: Option<u64>,
    #[serde(rename = "STAGE_ID", default)]
    pub stage_id: Option<u64>,
    #[serde(rename = "ORGANISATION_ID", default)]
    pub organisation_id: Option<u64>,
    #[serde(rename = "CUSTOMFIELDS", default)]
    pub custom_fields: Vec<CustomField>,
}

impl Writable for Opportunity {
    type Projection = OpportunityWrite;

    fn to_projection(&self) -> OpportunityWrite {
        OpportunityWrite {
            opportunity_id: assigned_id(self.opportunity_id),
            opportunity_name: self.opportunity_name.clone(),
            opportunity_details: self.opportunity_details.clone(),
            opportunity_state: self.opportunity_state.clone(),
            responsible_user_id: self.responsible_user_id,
            category_id: self.category_id,
            image_url: self.image_url.clone(),
            bid_currency: self.bid_currency.clone(),
            bid_amount: self.bid_amount,
            bid_type: self.bid_type.clone(),
            bid_duration: self.bid_duration,
            actual_close_date: self.actual_close_date,
            opportunity_value: self.opportunity_value,
            probability: self.probability,
            forecast_close_date: self.forecast_close_date,
            owner_user_id: self.owner_user_id,
            pipeline_id: self.pipeline_id,
            stage_id: self.stage_id,
            organisation_id: self.organisation_id,
            custom_fields: self.custom_fields.to_vec(),
        }
    }

    fn merge_projection(&mut self, p: OpportunityWrite) {
        if let Some(id) = p.opportunity_id {
            self.opportunity_id = id;
        }
        self.opportunity_name = p.opportunity_name;
        self.opportunity_details = p.opportunity_details;
        self.opportunity_state = p.opportunity_state;
        self.responsible_user_id = p.responsible_user_id;
        self.category_id = p.category_id;
        self.image_url = p.image_url;
        self.bid_currency = p.bid_currency;
        self.bid_amount = p.bid_amount;
        self.bid_type = p.bid_type;
        self.bid_duration = p.bid_duration;
        self.actual_close_date = p.actual_close_date;
        self.opportunity_value = p.opportunity_value;
        self.probability = p.probability;
        self.forecast_close_date = p.forecast_close_date;
        self.owner_user_id = p.owner_user_id;
        self.pipeline_id = p.pipeline_id;
        self.stage_id = p.stage_id;
        self.organisation_id = p.organisation_id;
        self.custom_fields = p.custom_fields.into();
    }
}

impl Resource for Opportunity {
    const ENTITY_TYPE: &'static str = "Opportunity";
    const PATH: &'static str = "Opportunities";
    type Id = u64;
}

impl Get for Opportunity {}

impl List for Opportunity {
    const PAGE_SIZE: u32 = 100;
}

impl Create for Opportunity {}

impl Update for Opportunity {}

impl Delete for Opportunity {}

impl Links for Opportunity {}
