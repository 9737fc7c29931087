//! Contact model and trait implementations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::{date_utc, null_as_empty, CustomField, CustomFields, Tag};
use crate::projection::{assigned_id, Writable};
use crate::traits::{Create, Delete, Get, Links, List, Resource, Update};

/// An Insightly contact (a person).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    /// Server-assigned ID; `0` for a record that has not been created yet.
    #[serde(rename = "CONTACT_ID", default)]
    pub contact_id: u64,

    #[serde(rename = "SALUTATION", default)]
    pub salutation: Option<String>,

    #[serde(rename = "FIRST_NAME", default)]
    pub first_name: Option<String>,

    #[serde(rename = "LAST_NAME", default)]
    pub last_name: Option<String>,

    #[serde(rename = "TITLE", default)]
    pub title: Option<String>,

    #[serde(rename = "ORGANISATION_ID", default)]
    pub organisation_id: Option<u64>,

    #[serde(rename = "EMAIL_ADDRESS", default)]
    pub email_address: Option<String>,

    #[serde(rename = "PHONE", default)]
    pub phone: Option<String>,

    #[serde(rename = "OWNER_USER_ID", default)]
    pub owner_user_id: Option<u64>,

    #[serde(rename = "DATE_CREATED_UTC", with = "date_utc", default)]
    pub date_created_utc: Option<DateTime<Utc>>,

    #[serde(rename = "DATE_UPDATED_UTC", with = "date_utc", default)]
    pub date_updated_utc: Option<DateTime<Utc>>,

    #[serde(rename = "CUSTOMFIELDS", default)]
    pub custom_fields: CustomFields,

    #[serde(rename = "TAGS", default, deserialize_with = "null_as_empty")]
    pub tags: Vec<Tag>,
}

impl Contact {
    /// First and last name joined by a space, skipping missing parts.
    pub fn full_name(&self) -> String {
        [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// The fields of a [`Contact`] accepted by create and update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactWrite {
    #[serde(rename = "CONTACT_ID", default, skip_serializing_if = "Option::is_none")]
    pub contact_id: Option<u64>,
    #[serde(rename = "SALUTATION", default)]
    pub salutation: Option<String>,
    #[serde(rename = "FIRST_NAME", default)]
    pub first_name: Option<String>,
    #[serde(rename = "LAST_NAME", default)]
    pub last_name: Option<String>,
    #[serde(rename = "TITLE", default)]
    pub title: Option<String>,
    #[serde(rename = "ORGANISATION_ID", default)]
    pub organisation_id: Option<u64>,
    #[serde(rename = "EMAIL_ADDRESS", default)]
    pub email_address: Option<String>,
    #[serde(rename = "PHONE", default)]
    pub phone: Option<String>,
    #[serde(rename = "OWNER_USER_ID", default)]
    pub owner_user_id: Option<u64>,
    #[serde(rename = "CUSTOMFIELDS", default)]
    pub custom_fields: Vec<CustomField>,
}

impl Writable for Contact {
    type Projection = ContactWrite;

    fn to_projection(&self) -> ContactWrite {
        ContactWrite {
            contact_id: assigned_id(self.contact_id),
            salutation: self.salutation.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            title: self.title.clone(),
            organisation_id: self.organisation_id,
            email_address: self.email_address.clone(),
            phone: self.phone.clone(),
            owner_user_id: self.owner_user_id,
            custom_fields: self.custom_fields.to_vec(),
        }
    }

    fn merge_projection(&mut self, p: ContactWrite) {
        if let Some(id) = p.contact_id {
            self.contact_id = id;
        }
        self.salutation = p.salutation;
        self.first_name = p.first_name;
        self.last_name = p.last_name;
        self.title = p.title;
        self.organisation_id = p.organisation_id;
        self.email_address = p.email_address;
        self.phone = p.phone;
        self.owner_user_id = p.owner_user_id;
        self.custom_fields = p.custom_fields.into();
    }
}

impl Resource for Contact {
    const ENTITY_TYPE: &'static str = "Contact";
    const PATH: &'static str = "Contacts";
    type Id = u64;
}

impl Get for Contact {}

impl List for Contact {
    const PAGE_SIZE: u32 = 100;
}

impl Create for Contact {}

impl Update for Contact {}

impl Delete for Contact {}

impl Links for Contact {}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Contact {
        serde_json::from_value(serde_json::json!({
            "CONTACT_ID": 901,
            "SALUTATION": "Ms",
            "FIRST_NAME": "Ada",
            "LAST_NAME": "Lovelace",
            "TITLE": "CTO",
            "ORGANISATION_ID": 77,
            "EMAIL_ADDRESS": "ada@example.com",
            "PHONE": null,
            "OWNER_USER_ID": 12,
            "DATE_CREATED_UTC": "2023-11-01 08:00:00",
            "DATE_UPDATED_UTC": "2024-02-01 08:00:00",
            "CUSTOMFIELDS": [{"FIELD_NAME": "Newsletter__c", "FIELD_VALUE": true}],
            "TAGS": []
        }))
        .unwrap()
    }

    #[test]
    fn test_contact_full_name() {
        assert_eq!(sample().full_name(), "Ada Lovelace");

        let only_last = Contact {
            last_name: Some("Hopper".to_string()),
            ..Default::default()
        };
        assert_eq!(only_last.full_name(), "Hopper");
    }

    #[test]
    fn test_projection_fields() {
        let json = serde_json::to_value(sample().to_projection()).unwrap();
        let obj = json.as_object().unwrap();

        assert!(!obj.contains_key("DATE_CREATED_UTC"));
        assert!(!obj.contains_key("DATE_UPDATED_UTC"));
        assert!(!obj.contains_key("TAGS"));
        assert_eq!(obj["CONTACT_ID"], 901);
        assert_eq!(obj["EMAIL_ADDRESS"], "ada@example.com");
        assert_eq!(obj.len(), 10);
    }

    #[test]
    fn test_merge_projection_round_trip() {
        let original = sample();
        let mut merged = original.clone();
        merged.merge_projection(original.to_projection());
        assert_eq!(merged, original);
    }
}
