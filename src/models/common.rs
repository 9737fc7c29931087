//! Types shared by several Insightly records.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Serde adapter for Insightly date strings.
///
/// Insightly writes UTC dates as `YYYY-MM-DD HH:MM:SS` and uses `null` for
/// unset dates. RFC 3339 input is also accepted.
pub mod date_utc {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    pub fn serialize<S: Serializer>(
        value: &Option<DateTime<Utc>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(dt) => serializer.serialize_str(&dt.format(FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        let Some(raw) = raw.filter(|s| !s.trim().is_empty()) else {
            return Ok(None);
        };

        if let Ok(naive) = NaiveDateTime::parse_from_str(raw.trim(), FORMAT) {
            return Ok(Some(naive.and_utc()));
        }

        DateTime::parse_from_rfc3339(raw.trim())
            .map(|dt| Some(dt.with_timezone(&Utc)))
            .map_err(|_| de::Error::custom(format!("invalid Insightly date '{raw}'")))
    }
}

/// A custom field value as sent to and received from Insightly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomField {
    #[serde(rename = "FIELD_NAME")]
    pub field_name: String,

    #[serde(rename = "FIELD_VALUE", default)]
    pub field_value: Value,
}

impl CustomField {
    pub fn new(field_name: impl Into<String>, field_value: impl Into<Value>) -> Self {
        Self {
            field_name: field_name.into(),
            field_value: field_value.into(),
        }
    }
}

/// Custom fields of a record as read from the server.
///
/// Write projections send the plain `Vec<CustomField>` instead.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CustomFields(pub Vec<CustomField>);

impl<'de> Deserialize<'de> for CustomFields {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        null_as_empty(deserializer).map(Self)
    }
}

impl CustomFields {
    /// Look up a custom field by name.
    pub fn get(&self, field_name: &str) -> Option<&CustomField> {
        self.0.iter().find(|f| f.field_name == field_name)
    }

    /// The value of a custom field rendered as text.
    ///
    /// Strings are returned as-is, other JSON values in their JSON form.
    pub fn value_str(&self, field_name: &str) -> Option<String> {
        self.get(field_name).and_then(|f| match &f.field_value {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        })
    }

    pub fn to_vec(&self) -> Vec<CustomField> {
        self.0.clone()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl From<Vec<CustomField>> for CustomFields {
    fn from(fields: Vec<CustomField>) -> Self {
        Self(fields)
    }
}

/// A tag attached to a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    #[serde(rename = "TAG_NAME")]
    pub tag_name: String,
}

/// A link between two Insightly records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    #[serde(rename = "LINK_ID", default)]
    pub link_id: u64,

    #[serde(rename = "OBJECT_NAME", default)]
    pub object_name: Option<String>,

    #[serde(rename = "OBJECT_ID", default)]
    pub object_id: Option<u64>,

    #[serde(rename = "LINK_OBJECT_NAME", default)]
    pub link_object_name: Option<String>,

    #[serde(rename = "LINK_OBJECT_ID", default)]
    pub link_object_id: Option<u64>,

    #[serde(rename = "ROLE", default)]
    pub role: Option<String>,

    #[serde(rename = "DETAILS", default)]
    pub details: Option<String>,

    #[serde(rename = "RELATIONSHIP_ID", default)]
    pub relationship_id: Option<u64>,

    #[serde(rename = "IS_FORWARD", default)]
    pub is_forward: Option<bool>,
}

/// Deserialize `null` as an empty list.
pub(crate) fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
