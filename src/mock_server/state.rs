//! Mock server state management.
//!
//! Provides the in-memory data store for the mock Insightly API server.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde_json::Value;
use tokio::sync::RwLock;

use crate::{
    date_utc, CollectionFilter, Contact, Instance, Link, Opportunity, PipelineStage, Resource,
    TeamMember,
};

/// Shared handle to the state, as held by the router.
pub type SharedState = Arc<RwLock<MockState>>;

/// Shared state for the mock server.
///
/// Records are kept in `BTreeMap`s keyed by ID so collections are always
/// served in ascending ID order, which keeps `skip`/`top` windows stable.
#[derive(Debug, Default)]
pub struct MockState {
    pub opportunities: BTreeMap<u64, Opportunity>,

    pub contacts: BTreeMap<u64, Contact>,

    pub pipeline_stages: BTreeMap<u64, PipelineStage>,

    pub team_members: BTreeMap<u64, TeamMember>,

    /// Links between records, filtered by `OBJECT_NAME`/`OBJECT_ID` on read.
    pub links: Vec<Link>,

    pub instance: Option<Instance>,

    /// Number of collection (list or search) requests served so far.
    pub collection_requests: u64,

    /// Optional `Authorization` header value every request must carry.
    pub required_authorization: Option<String>,

    next_id: u64,
}

/// An entity the mock server stores in its own table.
pub trait Stored: Resource<Id = u64> + Clone {
    fn table(state: &MockState) -> &BTreeMap<u64, Self>;

    fn table_mut(state: &mut MockState) -> &mut BTreeMap<u64, Self>;

    fn id(&self) -> u64;

    fn set_id(&mut self, id: u64);

    /// Stamp server-maintained timestamps after a write.
    fn touch(&mut self, _now: DateTime<Utc>, _created: bool) {}
}

impl Stored for Opportunity {
    fn table(state: &MockState) -> &BTreeMap<u64, Self> {
        &state.opportunities
    }

    fn table_mut(state: &mut MockState) -> &mut BTreeMap<u64, Self> {
        &mut state.opportunities
    }

    fn id(&self) -> u64 {
        self.opportunity_id
    }

    fn set_id(&mut self, id: u64) {
        self.opportunity_id = id;
    }

    fn touch(&mut self, now: DateTime<Utc>, created: bool) {
        if created {
            self.date_created_utc = Some(now);
        }
        self.date_updated_utc = Some(now);
    }
}

impl Stored for Contact {
    fn table(state: &MockState) -> &BTreeMap<u64, Self> {
        &state.contacts
    }

    fn table_mut(state: &mut MockState) -> &mut BTreeMap<u64, Self> {
        &mut state.contacts
    }

    fn id(&self) -> u64 {
        self.contact_id
    }

    fn set_id(&mut self, id: u64) {
        self.contact_id = id;
    }

    fn touch(&mut self, now: DateTime<Utc>, created: bool) {
        if created {
            self.date_created_utc = Some(now);
        }
        self.date_updated_utc = Some(now);
    }
}

impl Stored for PipelineStage {
    fn table(state: &MockState) -> &BTreeMap<u64, Self> {
        &state.pipeline_stages
    }

    fn table_mut(state: &mut MockState) -> &mut BTreeMap<u64, Self> {
        &mut state.pipeline_stages
    }

    fn id(&self) -> u64 {
        self.stage_id
    }

    fn set_id(&mut self, id: u64) {
        self.stage_id = id;
    }
}

impl Stored for TeamMember {
    fn table(state: &MockState) -> &BTreeMap<u64, Self> {
        &state.team_members
    }

    fn table_mut(state: &mut MockState) -> &mut BTreeMap<u64, Self> {
        &mut state.team_members
    }

    fn id(&self) -> u64 {
        self.permission_id
    }

    fn set_id(&mut self, id: u64) {
        self.permission_id = id;
    }
}

impl MockState {
    /// Create a new empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create state wrapped in Arc<RwLock> for sharing.
    pub fn shared(self) -> SharedState {
        Arc::new(RwLock::new(self))
    }

    /// Insert a record under its own ID.
    pub fn insert<T: Stored>(&mut self, record: T) {
        let id = record.id();
        self.next_id = self.next_id.max(id);
        T::table_mut(self).insert(id, record);
    }

    pub fn with_opportunity(mut self, opportunity: Opportunity) -> Self {
        self.insert(opportunity);
        self
    }

    /// Add `count` generated opportunities with IDs `1..=count`.
    pub fn with_opportunities(mut self, count: u64) -> Self {
        for id in 1..=count {
            self.insert(super::Fixtures::opportunity(id, &format!("Opportunity {id}")));
        }
        self
    }

    pub fn with_contact(mut self, contact: Contact) -> Self {
        self.insert(contact);
        self
    }

    pub fn with_pipeline_stage(mut self, stage: PipelineStage) -> Self {
        self.insert(stage);
        self
    }

    pub fn with_team_member(mut self, member: TeamMember) -> Self {
        self.insert(member);
        self
    }

    pub fn with_link(mut self, link: Link) -> Self {
        self.links.push(link);
        self
    }

    pub fn with_instance(mut self, instance: Instance) -> Self {
        self.instance = Some(instance);
        self
    }

    /// Require every request to carry this `Authorization` header value.
    pub fn with_required_authorization(mut self, header: &str) -> Self {
        self.required_authorization = Some(header.to_string());
        self
    }

    /// Get a record by ID.
    pub fn get<T: Stored>(&self, id: u64) -> Option<&T> {
        T::table(self).get(&id)
    }

    /// The window `[skip, skip + top)` of records matching `filter`.
    pub fn list<T: Stored>(&self, filter: &CollectionFilter, skip: u32, top: u32) -> Vec<T> {
        T::table(self)
            .values()
            .filter(|record| matches(*record, filter))
            .skip(skip as usize)
            .take(top as usize)
            .cloned()
            .collect()
    }

    /// Store a new record under a fresh ID.
    pub fn create<T: Stored>(&mut self, mut record: T) -> T {
        self.next_id += 1;
        record.set_id(self.next_id);
        record.touch(Utc::now(), true);
        let id = self.next_id;
        T::table_mut(self).insert(id, record.clone());
        record
    }

    /// Replace an existing record. Returns `None` when the ID is unknown.
    pub fn replace<T: Stored>(&mut self, mut record: T) -> Option<T> {
        let id = record.id();
        let slot = T::table_mut(self).get_mut(&id)?;
        record.touch(Utc::now(), false);
        *slot = record.clone();
        Some(record)
    }

    /// Remove a record. Returns false when the ID is unknown.
    pub fn remove<T: Stored>(&mut self, id: u64) -> bool {
        let removed = T::table_mut(self).remove(&id).is_some();
        if removed {
            self.links
                .retain(|l| !(l.object_name.as_deref() == Some(T::ENTITY_TYPE) && l.object_id == Some(id)));
        }
        removed
    }

    /// Links whose source is the given record.
    pub fn links_of(&self, object_name: &str, id: u64) -> Vec<Link> {
        self.links
            .iter()
            .filter(|l| l.object_name.as_deref() == Some(object_name) && l.object_id == Some(id))
            .cloned()
            .collect()
    }
}

/// Whether a record passes a collection filter.
///
/// Field filters compare top-level fields first, then custom fields. Numbers
/// and booleans compare by their JSON text.
fn matches<T: Stored>(record: &T, filter: &CollectionFilter) -> bool {
    if !filter.is_active() {
        return true;
    }

    let Ok(value) = serde_json::to_value(record) else {
        return false;
    };

    if let Some(after) = filter.updated_after {
        let updated = value
            .get("DATE_UPDATED_UTC")
            .and_then(Value::as_str)
            .and_then(|s| NaiveDateTime::parse_from_str(s, date_utc::FORMAT).ok())
            .map(|dt| dt.and_utc());
        if !updated.is_some_and(|dt| dt > after) {
            return false;
        }
    }

    if let Some(ref field) = filter.field {
        if !field_matches(&value, &field.field_name, &field.field_value) {
            return false;
        }
    }

    true
}

fn field_matches(record: &Value, name: &str, expected: &str) -> bool {
    let scalar_eq = |v: &Value| match v {
        Value::String(s) => s == expected,
        Value::Null => false,
        other => other.to_string() == expected,
    };

    if let Some(v) = record.get(name) {
        return scalar_eq(v);
    }

    record
        .get("CUSTOMFIELDS")
        .and_then(Value::as_array)
        .is_some_and(|fields| {
            fields.iter().any(|f| {
                f.get("FIELD_NAME").and_then(Value::as_str) == Some(name)
                    && f.get("FIELD_VALUE").is_some_and(scalar_eq)
            })
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock_server::Fixtures;
    use crate::CustomField;
    use chrono::TimeZone;

    #[test]
    fn test_list_windows_in_id_order() {
        let state = MockState::new().with_opportunities(250);

        let page = state.list::<Opportunity>(&CollectionFilter::default(), 200, 100);
        assert_eq!(page.len(), 50);
        assert_eq!(page[0].opportunity_id, 201);
        assert_eq!(page[49].opportunity_id, 250);

        let past_end = state.list::<Opportunity>(&CollectionFilter::default(), 300, 100);
        assert!(past_end.is_empty());
    }

    #[test]
    fn test_field_filter_matches_top_level_and_custom_fields() {
        let mut won = Fixtures::opportunity(1, "Won deal");
        won.opportunity_state = Some("WON".to_string());
        won.custom_fields = vec![CustomField::new("Region__c", "EMEA")].into();
        let open = Fixtures::opportunity(2, "Open deal");

        let state = MockState::new().with_opportunity(won).with_opportunity(open);

        let by_state = state.list::<Opportunity>(
            &CollectionFilter::field("OPPORTUNITY_STATE", "WON"),
            0,
            100,
        );
        assert_eq!(by_state.len(), 1);
        assert_eq!(by_state[0].opportunity_id, 1);

        let by_custom =
            state.list::<Opportunity>(&CollectionFilter::field("Region__c", "EMEA"), 0, 100);
        assert_eq!(by_custom.len(), 1);

        let by_number =
            state.list::<Opportunity>(&CollectionFilter::field("OPPORTUNITY_ID", "2"), 0, 100);
        assert_eq!(by_number[0].opportunity_id, 2);
    }

    #[test]
    fn test_updated_after_filter() {
        let mut old = Fixtures::contact(1, "Ada", "Lovelace");
        old.date_updated_utc = Some(Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap());
        let mut recent = Fixtures::contact(2, "Grace", "Hopper");
        recent.date_updated_utc = Some(Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap());

        let state = MockState::new().with_contact(old).with_contact(recent);
        let filter =
            CollectionFilter::updated_after(Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap());

        let contacts = state.list::<Contact>(&filter, 0, 100);
        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts[0].contact_id, 2);
    }

    #[test]
    fn test_create_assigns_fresh_id_and_dates() {
        let mut state = MockState::new().with_opportunities(3);

        let created = state.create(Opportunity::new("Fresh"));
        assert_eq!(created.opportunity_id, 4);
        assert!(created.date_created_utc.is_some());
        assert_eq!(state.get::<Opportunity>(4).unwrap().opportunity_name, "Fresh");
    }

    #[test]
    fn test_replace_unknown_id() {
        let mut state = MockState::new();
        assert!(state.replace(Fixtures::opportunity(9, "Ghost")).is_none());
    }

    #[test]
    fn test_remove_drops_links() {
        let mut state = MockState::new()
            .with_opportunity(Fixtures::opportunity(5, "Linked"))
            .with_link(Fixtures::link(1, "Opportunity", 5, "Contact", 9));

        assert_eq!(state.links_of("Opportunity", 5).len(), 1);
        assert!(state.remove::<Opportunity>(5));
        assert!(state.links_of("Opportunity", 5).is_empty());
        assert!(!state.remove::<Opportunity>(5));
    }
}
