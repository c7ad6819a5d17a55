//! A single logged activity.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{DaylogError, DaylogResult};

/// One activity entry attached to a calendar day.
///
/// Records are never edited in place; they are appended to a day's list and
/// later removed from it by `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityRecord {
    pub description: String,

    /// Creation time. Stored as RFC 3339, e.g. `2024-03-15T10:00:00Z`.
    pub timestamp: DateTime<Utc>,

    /// `"{h}h {m}m"`, or `None` when no time was logged.
    #[serde(default)]
    pub duration: Option<String>,

    /// Stable identifier. Files written before ids existed get one on read.
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
}

impl ActivityRecord {
    /// Build a record, trimming the description and rejecting it when empty.
    pub fn new(
        description: &str,
        hours: u32,
        minutes: u32,
        timestamp: DateTime<Utc>,
    ) -> DaylogResult<Self> {
        let description = description.trim();
        if description.is_empty() {
            return Err(DaylogError::Validation(
                "Please enter an activity description".into(),
            ));
        }

        Ok(ActivityRecord {
            description: description.to_string(),
            timestamp,
            duration: format_duration(hours, minutes),
            id: Uuid::new_v4(),
        })
    }

    /// The logged duration, if it is present and parseable.
    pub fn duration_std(&self) -> Option<std::time::Duration> {
        self.duration
            .as_deref()
            .and_then(|d| humantime::parse_duration(d).ok())
    }

    /// First 8 hex digits of the id, enough to address a record by hand.
    pub fn short_id(&self) -> String {
        self.id.simple().to_string()[..8].to_string()
    }
}

impl fmt::Display for ActivityRecord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.description)
    }
}

/// `None` when both parts are zero, otherwise `"{h}h {m}m"`.
pub fn format_duration(hours: u32, minutes: u32) -> Option<String> {
    if hours == 0 && minutes == 0 {
        None
    } else {
        Some(format!("{}h {}m", hours, minutes))
    }
}

/// Render a total as `"{h}h {m}m"`, dropping seconds.
pub fn format_total(total: std::time::Duration) -> String {
    let minutes = total.as_secs() / 60;
    format!("{}h {}m", minutes / 60, minutes % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at_ten() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 15, 10, 0, 0).unwrap()
    }

    #[test]
    fn trims_description() {
        let record = ActivityRecord::new("  Run  ", 0, 30, at_ten()).unwrap();
        assert_eq!(record.description, "Run");
        assert_eq!(record.duration.as_deref(), Some("0h 30m"));
    }

    #[test]
    fn rejects_blank_description() {
        assert!(matches!(
            ActivityRecord::new("   \n\t", 1, 0, at_ten()),
            Err(DaylogError::Validation(_))
        ));
    }

    #[test]
    fn zero_duration_is_none() {
        assert_eq!(format_duration(0, 0), None);
        assert_eq!(format_duration(2, 0).as_deref(), Some("2h 0m"));
        assert_eq!(format_duration(2, 30).as_deref(), Some("2h 30m"));
    }

    #[test]
    fn parses_logged_duration() {
        let record = ActivityRecord::new("Read", 2, 30, at_ten()).unwrap();
        assert_eq!(record.duration_std().unwrap().as_secs(), 2 * 3600 + 30 * 60);

        let no_time = ActivityRecord::new("Read", 0, 0, at_ten()).unwrap();
        assert_eq!(no_time.duration_std(), None);
    }

    #[test]
    fn reads_records_without_id() {
        let json = r#"{"description":"Swim","timestamp":"2024-03-15T10:00:00.000Z","duration":null}"#;
        let record: ActivityRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.description, "Swim");
        assert_eq!(record.timestamp, at_ten());
        assert!(record.duration.is_none());
        assert!(!record.id.is_nil());
    }

    #[test]
    fn total_formatting() {
        assert_eq!(format_total(std::time::Duration::from_secs(0)), "0h 0m");
        assert_eq!(format_total(std::time::Duration::from_secs(95 * 60)), "1h 35m");
    }
}
