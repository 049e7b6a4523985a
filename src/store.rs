//! Mutable record store and its two derived views
//!
//! The store owns the ordered record collection plus two projections kept
//! consistent with it: the *current view* (the primary list, typically "all
//! clients" or a search result) and the *renewals view* (an independently
//! filtered list of upcoming renewals). Every mutation re-runs the active
//! filters synchronously before returning, so readers never observe a torn
//! intermediate state.
//!
//! The two views deliberately differ on comparator behavior: the current
//! view's sort is installed alongside its filter and `None` means insertion
//! order, while the renewals view's sort is sticky - once set it re-applies
//! on every repopulation until replaced. This asymmetry serves the two-pane
//! UI the engine backs.

use chrono::{DateTime, Utc};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::client::ClientRecord;
use crate::error::CommandError;
use crate::query::{RecordFilter, SortKey};

/// Serializable snapshot of the store for the persistence layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreSnapshot {
    /// Last-modified timestamp at save time
    pub saved_at: DateTime<Utc>,
    pub clients: Vec<ClientRecord>,
}

/// The record collection and its derived views
#[derive(Debug, Clone)]
pub struct ClientStore {
    /// Insertion-ordered records, unique by full equality
    records: Vec<ClientRecord>,

    /// Updated on every add/remove/replace and on bulk load
    last_modified: DateTime<Utc>,

    current_filter: RecordFilter,
    current_sort: Option<SortKey>,
    current_view: Vec<ClientRecord>,

    renewals_filter: RecordFilter,
    /// Sticky: survives repopulation until explicitly replaced
    renewals_sort: Option<SortKey>,
    renewals_view: Vec<ClientRecord>,
}

impl ClientStore {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            last_modified: Utc::now(),
            current_filter: RecordFilter::All,
            current_sort: None,
            current_view: Vec::new(),
            renewals_filter: RecordFilter::All,
            renewals_sort: None,
            renewals_view: Vec::new(),
        }
    }

    /// Rebuild a store from a persisted snapshot
    ///
    /// Both views start unfiltered; filters are session state, not data.
    pub fn from_snapshot(snapshot: StoreSnapshot) -> Self {
        let mut store = Self::new();
        store.replace_all(snapshot.clients, snapshot.saved_at);
        store
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records in insertion order
    pub fn records(&self) -> &[ClientRecord] {
        &self.records
    }

    pub fn last_modified(&self) -> DateTime<Utc> {
        self.last_modified
    }

    /// Persistence-layer override of the timestamp
    pub fn set_last_modified(&mut self, timestamp: DateTime<Utc>) {
        self.last_modified = timestamp;
    }

    /// Read-only full copy for the persistence layer
    pub fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            saved_at: self.last_modified,
            clients: self.records.clone(),
        }
    }

    /// Add a record, rejecting any pairwise identity collision
    pub fn add(&mut self, record: ClientRecord) -> Result<(), CommandError> {
        if self.records.iter().any(|r| r.is_same_client(&record)) {
            return Err(CommandError::DuplicateClient);
        }
        self.records.push(record);
        self.touch();
        self.refresh_views();
        Ok(())
    }

    /// Remove the record equal (by full equality) to `record`
    pub fn remove(&mut self, record: &ClientRecord) -> Result<(), CommandError> {
        let index = self
            .records
            .iter()
            .position(|r| r == record)
            .ok_or(CommandError::ClientNotFound)?;
        self.records.remove(index);
        self.touch();
        self.refresh_views();
        Ok(())
    }

    /// Atomically replace `outgoing` with `incoming`, preserving its position
    ///
    /// The replacement must not collide, by identity, with any record other
    /// than the one it replaces.
    pub fn replace(
        &mut self,
        outgoing: &ClientRecord,
        incoming: ClientRecord,
    ) -> Result<(), CommandError> {
        let index = self
            .records
            .iter()
            .position(|r| r == outgoing)
            .ok_or(CommandError::ClientNotFound)?;
        let collides = self
            .records
            .iter()
            .enumerate()
            .any(|(i, r)| i != index && r.is_same_client(&incoming));
        if collides {
            return Err(CommandError::DuplicateClient);
        }
        self.records[index] = incoming;
        self.touch();
        self.refresh_views();
        Ok(())
    }

    /// Bulk load: replace every record and adopt the persisted timestamp
    pub fn replace_all(&mut self, records: Vec<ClientRecord>, saved_at: DateTime<Utc>) {
        self.records = records;
        self.last_modified = saved_at;
        self.refresh_views();
    }

    /// The primary filtered/sorted projection
    pub fn current_view(&self) -> &[ClientRecord] {
        &self.current_view
    }

    /// The upcoming-renewals projection
    pub fn renewals_view(&self) -> &[ClientRecord] {
        &self.renewals_view
    }

    /// Install the current view's filter and comparator together
    ///
    /// `None` for the comparator means insertion order; nothing sticks.
    pub fn set_current_filter(&mut self, filter: RecordFilter, sort: Option<SortKey>) {
        self.current_filter = filter;
        self.current_sort = sort;
        self.refresh_current();
    }

    /// Explicit reset back to the unfiltered, insertion-ordered list
    pub fn reset_current_view(&mut self) {
        self.set_current_filter(RecordFilter::All, None);
    }

    /// Install the renewals view's filter; the held comparator re-applies
    pub fn set_renewals_filter(&mut self, filter: RecordFilter) {
        self.renewals_filter = filter;
        self.refresh_renewals();
    }

    /// Install the sticky renewals comparator
    pub fn set_renewals_sort(&mut self, sort: SortKey) {
        self.renewals_sort = Some(sort);
        self.refresh_renewals();
    }

    pub fn renewals_sort(&self) -> Option<SortKey> {
        self.renewals_sort
    }

    pub fn is_current_view_filtered(&self) -> bool {
        !self.current_filter.is_unfiltered()
    }

    fn touch(&mut self) {
        self.last_modified = Utc::now();
    }

    fn refresh_views(&mut self) {
        self.refresh_current();
        self.refresh_renewals();
    }

    fn refresh_current(&mut self) {
        self.current_view = project(&self.records, &self.current_filter, self.current_sort);
        debug!(
            "current view recomputed: {} of {} records",
            self.current_view.len(),
            self.records.len()
        );
    }

    fn refresh_renewals(&mut self) {
        self.renewals_view = project(&self.records, &self.renewals_filter, self.renewals_sort);
        debug!(
            "renewals view recomputed: {} of {} records",
            self.renewals_view.len(),
            self.records.len()
        );
    }
}

impl Default for ClientStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Pull-based view recomputation: filter, then stable-sort
fn project(
    records: &[ClientRecord],
    filter: &RecordFilter,
    sort: Option<SortKey>,
) -> Vec<ClientRecord> {
    let mut view: Vec<ClientRecord> = records.iter().filter(|r| filter.matches(r)).cloned().collect();
    if let Some(key) = sort {
        // Stable sort: ties keep insertion order
        view.sort_by(|a, b| key.compare(a, b));
    }
    view
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{Policy, PolicyKind, PolicyNumber, RenewalDate};
    use crate::query::{CompositePredicate, FieldPredicate};
    use chrono::NaiveDate;

    fn record(name: &str, phone: &str, number: &str, renewal: (i32, u32, u32)) -> ClientRecord {
        let (year, month, day) = renewal;
        let policy = Policy::new(
            PolicyNumber::new(number).unwrap(),
            RenewalDate::from_stored(NaiveDate::from_ymd_opt(year, month, day).unwrap()),
            PolicyKind::Life,
        );
        ClientRecord::new(
            name.to_string(),
            phone.to_string(),
            format!("{}@example.com", number),
            "8 Bedok North St 1".to_string(),
            policy,
        )
        .unwrap()
    }

    fn seeded() -> ClientStore {
        let mut store = ClientStore::new();
        store
            .add(record("Carol Ng", "81112222", "333333", (2026, 7, 1)))
            .unwrap();
        store
            .add(record("Alice Tan", "91234567", "111111", (2026, 3, 1)))
            .unwrap();
        store
            .add(record("Bob Lee", "87654321", "222222", (2026, 5, 1)))
            .unwrap();
        store
    }

    fn name_filter(term: &str) -> RecordFilter {
        RecordFilter::Fields(
            CompositePredicate::new(vec![FieldPredicate::Name(vec![term.to_string()])]).unwrap(),
        )
    }

    #[test]
    fn test_add_rejects_identity_collision() {
        let mut store = seeded();

        // Same policy number, everything else different
        let dup = record("Dan Koh", "80001111", "111111", (2026, 9, 9));
        assert_eq!(store.add(dup), Err(CommandError::DuplicateClient));
        assert_eq!(store.len(), 3);

        // Same name + phone, different policy
        let dup = record("Alice Tan", "91234567", "999999", (2026, 9, 9));
        assert_eq!(store.add(dup), Err(CommandError::DuplicateClient));
    }

    #[test]
    fn test_views_default_to_unfiltered_insertion_order() {
        let store = seeded();

        let names: Vec<_> = store.current_view().iter().map(|r| r.name()).collect();
        assert_eq!(names, ["Carol Ng", "Alice Tan", "Bob Lee"]);
        assert_eq!(store.renewals_view().len(), 3);
    }

    #[test]
    fn test_mutation_reruns_active_filter() {
        let mut store = seeded();
        store.set_current_filter(name_filter("alice"), None);
        assert_eq!(store.current_view().len(), 1);

        // A matching add shows up without re-installing the filter
        store
            .add(record("Alice Wong", "98887777", "444444", (2026, 8, 1)))
            .unwrap();
        assert_eq!(store.current_view().len(), 2);

        // A non-matching add does not
        store
            .add(record("Dan Koh", "80001111", "555555", (2026, 8, 2)))
            .unwrap();
        assert_eq!(store.current_view().len(), 2);
        assert_eq!(store.len(), 5);
    }

    #[test]
    fn test_filter_persists_until_reset() {
        let mut store = seeded();
        store.set_current_filter(name_filter("bob"), None);
        assert!(store.is_current_view_filtered());
        assert_eq!(store.current_view().len(), 1);

        store.reset_current_view();
        assert!(!store.is_current_view_filtered());
        assert_eq!(store.current_view().len(), 3);
    }

    #[test]
    fn test_current_sort_is_not_sticky() {
        let mut store = seeded();
        store.set_current_filter(RecordFilter::All, Some(SortKey::Name));
        let names: Vec<_> = store.current_view().iter().map(|r| r.name()).collect();
        assert_eq!(names, ["Alice Tan", "Bob Lee", "Carol Ng"]);

        // Installing None reverts to insertion order
        store.set_current_filter(RecordFilter::All, None);
        let names: Vec<_> = store.current_view().iter().map(|r| r.name()).collect();
        assert_eq!(names, ["Carol Ng", "Alice Tan", "Bob Lee"]);
    }

    #[test]
    fn test_renewals_sort_is_sticky_across_repopulation() {
        let mut store = seeded();
        store.set_renewals_sort(SortKey::Date);

        let dates: Vec<_> = store
            .renewals_view()
            .iter()
            .map(|r| r.policy().renewal_date().to_string())
            .collect();
        assert_eq!(dates, ["01-03-2026", "01-05-2026", "01-07-2026"]);

        // Repopulation via mutation re-applies the held comparator
        store
            .add(record("Dan Koh", "80001111", "444444", (2026, 4, 1)))
            .unwrap();
        let dates: Vec<_> = store
            .renewals_view()
            .iter()
            .map(|r| r.policy().renewal_date().to_string())
            .collect();
        assert_eq!(dates, ["01-03-2026", "01-04-2026", "01-05-2026", "01-07-2026"]);
    }

    #[test]
    fn test_replace_preserves_position_and_checks_collisions() {
        let mut store = seeded();
        let bob = store.records()[2].clone();

        let renewed = bob.with_policy(bob.policy().renewed(RenewalDate::from_stored(
            NaiveDate::from_ymd_opt(2027, 5, 1).unwrap(),
        )));
        store.replace(&bob, renewed).unwrap();

        assert_eq!(store.records()[2].name(), "Bob Lee");
        assert_eq!(
            store.records()[2].policy().renewal_date().to_string(),
            "01-05-2027"
        );

        // Replacement colliding with another record is rejected
        let bob = store.records()[2].clone();
        let stolen = record("Bob Lee", "87654321", "111111", (2027, 5, 1));
        assert_eq!(
            store.replace(&bob, stolen),
            Err(CommandError::DuplicateClient)
        );
    }

    #[test]
    fn test_remove_requires_full_equality() {
        let mut store = seeded();
        let ghost = record("Alice Tan", "91234567", "111111", (2030, 1, 1));

        // Same identity but different renewal date - not the stored record
        assert_eq!(store.remove(&ghost), Err(CommandError::ClientNotFound));

        let alice = store.records()[1].clone();
        store.remove(&alice).unwrap();
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_mutations_advance_last_modified() {
        let mut store = seeded();
        let before = store.last_modified();

        store
            .add(record("Dan Koh", "80001111", "444444", (2026, 4, 1)))
            .unwrap();
        assert!(store.last_modified() >= before);

        let pinned = Utc::now();
        store.set_last_modified(pinned);
        assert_eq!(store.last_modified(), pinned);
    }

    #[test]
    fn test_snapshot_round_trip() {
        let store = seeded();
        let snapshot = store.snapshot();

        let json = serde_json::to_string_pretty(&snapshot).unwrap();
        let restored: StoreSnapshot = serde_json::from_str(&json).unwrap();
        let reloaded = ClientStore::from_snapshot(restored);

        assert_eq!(reloaded.records(), store.records());
        assert_eq!(reloaded.last_modified(), store.last_modified());
        assert_eq!(reloaded.current_view().len(), 3);
    }
}
