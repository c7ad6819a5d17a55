//! The in-memory activity log, keyed by day.

use std::collections::{BTreeMap, HashSet};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::activity::ActivityRecord;
use crate::date_key::DateKey;
use crate::error::{DaylogError, DaylogResult};

/// Activities grouped by day.
///
/// Each day's list is kept in insertion order. A day is never present with
/// an empty list: removing the last record removes the day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActivityStore {
    days: BTreeMap<DateKey, Vec<ActivityRecord>>,
}

impl ActivityStore {
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Number of days with at least one activity.
    pub fn date_count(&self) -> usize {
        self.days.len()
    }

    pub fn record_count(&self) -> usize {
        self.days.values().map(Vec::len).sum()
    }

    pub fn has_activities(&self, date: &DateKey) -> bool {
        self.days.contains_key(date)
    }

    /// A day's records in insertion order.
    pub fn records(&self, date: &DateKey) -> &[ActivityRecord] {
        self.days.get(date).map(Vec::as_slice).unwrap_or(&[])
    }

    /// A day's records in display order: newest first, ties in insertion order.
    pub fn activities_for(&self, date: &DateKey) -> Vec<&ActivityRecord> {
        let mut sorted: Vec<_> = self.records(date).iter().collect();
        sorted.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        sorted
    }

    /// Sum of the logged durations for one day.
    pub fn total_duration(&self, date: &DateKey) -> Duration {
        self.records(date)
            .iter()
            .filter_map(ActivityRecord::duration_std)
            .sum()
    }

    /// Sum of the logged durations for every day of a month.
    pub fn total_duration_in_month(&self, year: i32, month: u32) -> Duration {
        self.days
            .iter()
            .filter(|(date, _)| date.year() == year && date.month() == month)
            .flat_map(|(_, records)| records)
            .filter_map(ActivityRecord::duration_std)
            .sum()
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Append an activity stamped with the current time.
    pub fn add_activity(
        &mut self,
        date: DateKey,
        description: &str,
        hours: u32,
        minutes: u32,
    ) -> DaylogResult<&ActivityRecord> {
        self.add_activity_at(date, description, hours, minutes, Utc::now())
    }

    /// Append an activity with an explicit timestamp.
    ///
    /// A blank description is rejected and leaves the store untouched.
    pub fn add_activity_at(
        &mut self,
        date: DateKey,
        description: &str,
        hours: u32,
        minutes: u32,
        timestamp: DateTime<Utc>,
    ) -> DaylogResult<&ActivityRecord> {
        let record = ActivityRecord::new(description, hours, minutes, timestamp)?;
        let list = self.days.entry(date).or_default();
        list.push(record);
        Ok(&list[list.len() - 1])
    }

    /// Remove a record by id, dropping the day if it becomes empty.
    pub fn delete_activity(&mut self, date: &DateKey, id: Uuid) -> DaylogResult<ActivityRecord> {
        let list = self
            .days
            .get_mut(date)
            .ok_or_else(|| DaylogError::ActivityNotFound(format!("no activities on {}", date)))?;

        let pos = list
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| DaylogError::ActivityNotFound(format!("{} on {}", id, date)))?;

        let removed = list.remove(pos);
        if list.is_empty() {
            self.days.remove(date);
        }
        Ok(removed)
    }

    /// Remove the record shown at `index` (0-based) in display order.
    pub fn delete_displayed(&mut self, date: &DateKey, index: usize) -> DaylogResult<ActivityRecord> {
        let id = self
            .activities_for(date)
            .get(index)
            .map(|r| r.id)
            .ok_or_else(|| {
                DaylogError::Validation(format!("No activity #{} on {}", index + 1, date))
            })?;
        self.delete_activity(date, id)
    }

    /// Resolve an id prefix (as printed by `short_id`) to a record on `date`.
    pub fn find_by_id_prefix(&self, date: &DateKey, prefix: &str) -> DaylogResult<Uuid> {
        let prefix = prefix.to_lowercase().replace('-', "");
        let matches: Vec<_> = self
            .records(date)
            .iter()
            .filter(|r| !prefix.is_empty() && r.id.simple().to_string().starts_with(&prefix))
            .collect();

        match matches.as_slice() {
            [record] => Ok(record.id),
            [] => Err(DaylogError::ActivityNotFound(format!("'{}' on {}", prefix, date))),
            _ => Err(DaylogError::Validation(format!(
                "Id prefix '{}' is ambiguous on {}",
                prefix, date
            ))),
        }
    }

    /// Append every incoming day's records after the existing ones.
    ///
    /// Records are not de-duplicated, but an incoming record whose id is
    /// already taken gets a fresh one so every record stays addressable.
    pub fn import_merge(&mut self, incoming: ActivityStore) {
        let mut seen: HashSet<Uuid> = self.days.values().flatten().map(|r| r.id).collect();
        for (date, mut records) in incoming.days {
            if records.is_empty() {
                continue;
            }
            reassign_taken_ids(&mut records, &mut seen);
            self.days.entry(date).or_default().extend(records);
        }
    }

    /// Discard everything and adopt `incoming`.
    pub fn import_replace(&mut self, incoming: ActivityStore) {
        *self = incoming.normalized();
    }

    pub fn clear(&mut self) {
        self.days.clear();
    }

    // =========================================================================
    // Serialization
    // =========================================================================

    /// Compact JSON for the storage slot.
    pub fn to_json(&self) -> DaylogResult<String> {
        serde_json::to_string(self).map_err(|e| DaylogError::Serialization(e.to_string()))
    }

    /// Pretty-printed JSON for export files.
    pub fn to_json_pretty(&self) -> DaylogResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| DaylogError::Serialization(e.to_string()))
    }

    /// Parse a store, requiring a JSON object at the top level.
    pub fn from_json(text: &str) -> DaylogResult<Self> {
        let value: serde_json::Value =
            serde_json::from_str(text).map_err(|e| DaylogError::Parse(e.to_string()))?;

        if !value.is_object() {
            return Err(DaylogError::InvalidFormat);
        }

        let store: ActivityStore =
            serde_json::from_value(value).map_err(|e| DaylogError::Parse(e.to_string()))?;
        Ok(store.normalized())
    }

    fn normalized(mut self) -> Self {
        self.days.retain(|_, records| !records.is_empty());
        let mut seen = HashSet::new();
        for records in self.days.values_mut() {
            reassign_taken_ids(records, &mut seen);
        }
        self
    }
}

/// Give a fresh id to every record whose id is already in `seen`.
fn reassign_taken_ids(records: &mut [ActivityRecord], seen: &mut HashSet<Uuid>) {
    for record in records {
        while !seen.insert(record.id) {
            tracing::debug!(id = %record.id, "reassigning duplicate record id");
            record.id = Uuid::new_v4();
        }
    }
}
