//! Collection query construction.
//!
//! Insightly exposes two variants of every collection endpoint: the plain
//! listing (`Opportunities?skip=..&top=..`) and the search variant
//! (`Opportunities/Search?...`), which is the only one that accepts filters.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{InsightlyError, Result};

/// Timestamp format accepted by `updated_after_utc`.
pub const ISO8601_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// A single `field_name = field_value` equality constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldFilter {
    pub field_name: String,
    pub field_value: String,
}

impl FieldFilter {
    pub fn new(field_name: impl Into<String>, field_value: impl Into<String>) -> Self {
        Self {
            field_name: field_name.into(),
            field_value: field_value.into(),
        }
    }
}

/// Filter for a collection request.
///
/// Both slots are optional; the default filter has no active constraints
/// and selects the whole collection through the plain listing path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionFilter {
    /// Only return records updated after this instant.
    #[serde(default)]
    pub updated_after: Option<DateTime<Utc>>,
    /// Only return records whose field equals the given value.
    #[serde(default)]
    pub field: Option<FieldFilter>,
}

impl CollectionFilter {
    /// Filter on the last-updated timestamp only.
    pub fn updated_after(instant: DateTime<Utc>) -> Self {
        Self {
            updated_after: Some(instant),
            field: None,
        }
    }

    /// Filter on a single field value only.
    pub fn field(field_name: impl Into<String>, field_value: impl Into<String>) -> Self {
        Self {
            updated_after: None,
            field: Some(FieldFilter::new(field_name, field_value)),
        }
    }

    /// Build a filter from optional parts as they arrive from a caller.
    ///
    /// # Errors
    ///
    /// Returns [`InsightlyError::InvalidArgument`] when only one of
    /// `field_name` and `field_value` is given.
    pub fn from_parts(
        updated_after: Option<DateTime<Utc>>,
        field_name: Option<String>,
        field_value: Option<String>,
    ) -> Result<Self> {
        let field = match (field_name, field_value) {
            (Some(name), Some(value)) => Some(FieldFilter::new(name, value)),
            (None, None) => None,
            _ => {
                return Err(InsightlyError::InvalidArgument(
                    "field_name and field_value must be given together".to_string(),
                ))
            }
        };

        Ok(Self {
            updated_after,
            field,
        })
    }

    /// Add or replace the field-equality constraint.
    #[must_use]
    pub fn with_field(mut self, field_name: impl Into<String>, field_value: impl Into<String>) -> Self {
        self.field = Some(FieldFilter::new(field_name, field_value));
        self
    }

    /// Add or replace the updated-after constraint.
    #[must_use]
    pub fn with_updated_after(mut self, instant: DateTime<Utc>) -> Self {
        self.updated_after = Some(instant);
        self
    }

    /// True when at least one constraint is set.
    pub fn is_active(&self) -> bool {
        self.updated_after.is_some() || self.field.is_some()
    }
}

/// Build the relative path for one page of a collection.
///
/// Without active constraints this is `{base}?skip=..&top=..`. With any
/// constraint it becomes `{base}/Search?<filters>&skip=..&top=..`.
pub fn collection_path(base_path: &str, filter: &CollectionFilter, skip: u32, top: u32) -> String {
    let mut params: Vec<String> = Vec::with_capacity(5);

    if let Some(updated_after) = filter.updated_after {
        params.push(format!(
            "updated_after_utc={}",
            urlencoding::encode(&updated_after.format(ISO8601_FORMAT).to_string())
        ));
    }

    if let Some(field) = &filter.field {
        params.push(format!("field_name={}", urlencoding::encode(&field.field_name)));
        params.push(format!("field_value={}", urlencoding::encode(&field.field_value)));
    }

    let endpoint = if params.is_empty() {
        base_path.to_string()
    } else {
        format!("{base_path}/Search")
    };

    params.push(format!("skip={skip}"));
    params.push(format!("top={top}"));

    format!("{endpoint}?{}", params.join("&"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_from_parts_combines_constraints() {
        let when = Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap();
        let filter = CollectionFilter::from_parts(
            Some(when),
            Some("OPPORTUNITY_STATE".to_string()),
            Some("OPEN".to_string()),
        )
        .unwrap();

        assert_eq!(
            filter,
            CollectionFilter::updated_after(when).with_field("OPPORTUNITY_STATE", "OPEN")
        );
        assert!(!CollectionFilter::from_parts(None, None, None).unwrap().is_active());
    }

    #[test]
    fn test_from_parts_rejects_half_field_filter() {
        let name_only = CollectionFilter::from_parts(None, Some("LAST_NAME".to_string()), None);
        assert!(matches!(name_only, Err(InsightlyError::InvalidArgument(_))));

        let value_only = CollectionFilter::from_parts(None, None, Some("Hopper".to_string()));
        assert!(matches!(value_only, Err(InsightlyError::InvalidArgument(_))));
    }

    #[test]
    fn test_no_filter_uses_listing_path() {
        let path = collection_path("Opportunities", &CollectionFilter::default(), 0, 100);
        assert_eq!(path, "Opportunities?skip=0&top=100");
    }

    #[test]
    fn test_updated_after_uses_search_path() {
        let when = Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap();
        let path = collection_path("Opportunities", &CollectionFilter::updated_after(when), 200, 100);
        assert_eq!(
            path,
            "Opportunities/Search?updated_after_utc=2024-03-01T12%3A30%3A00Z&skip=200&top=100"
        );
    }

    #[test]
    fn test_field_filter_uses_search_path() {
        let filter = CollectionFilter::field("OPPORTUNITY_STATE", "OPEN");
        let path = collection_path("Opportunities", &filter, 0, 100);
        assert_eq!(
            path,
            "Opportunities/Search?field_name=OPPORTUNITY_STATE&field_value=OPEN&skip=0&top=100"
        );
    }

    #[test]
    fn test_both_filters_in_order() {
        let when = Utc.with_ymd_and_hms(2023, 1, 2, 3, 4, 5).unwrap();
        let filter = CollectionFilter::updated_after(when).with_field("EMAIL_ADDRESS", "a@b.com");
        let path = collection_path("Contacts", &filter, 100, 100);
        assert_eq!(
            path,
            "Contacts/Search?updated_after_utc=2023-01-02T03%3A04%3A05Z\
             &field_name=EMAIL_ADDRESS&field_value=a%40b.com&skip=100&top=100"
        );
    }

    #[test]
    fn test_field_value_is_encoded() {
        let filter = CollectionFilter::field("OPPORTUNITY_NAME", "Big & Small deal");
        let path = collection_path("Opportunities", &filter, 0, 100);
        assert!(path.contains("field_value=Big%20%26%20Small%20deal&"));
        // A stray '&' in the value must not introduce another parameter.
        assert_eq!(path.matches('&').count(), 3);
    }

    #[test]
    fn test_is_active() {
        assert!(!CollectionFilter::default().is_active());
        assert!(CollectionFilter::field("A", "B").is_active());
        assert!(CollectionFilter::updated_after(Utc::now()).is_active());
    }
}
