//! In-memory year snapshot of a user's moods

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::models::{MoodEntry, MoodGrade};

/// What the grid and statistics need to know about one day
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SnapshotDay {
    pub mood: MoodGrade,
    #[serde(default)]
    pub note: String,
}

/// Date-keyed moods for a bounded range, kept in chronological order.
///
/// Owned by whoever fetched it; rebuilt on every fetch.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct MoodSnapshot {
    days: BTreeMap<NaiveDate, SnapshotDay>,
}

impl MoodSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from backend rows. A later row for the same date replaces the earlier one.
    pub fn from_entries<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = &'a MoodEntry>,
    {
        let mut snapshot = Self::new();
        for entry in entries {
            snapshot.insert(
                entry.date,
                entry.mood,
                entry.note.clone().unwrap_or_default(),
            );
        }
        snapshot
    }

    pub fn insert(&mut self, date: NaiveDate, mood: MoodGrade, note: String) {
        self.days.insert(date, SnapshotDay { mood, note });
    }

    pub fn get(&self, date: NaiveDate) -> Option<&SnapshotDay> {
        self.days.get(&date)
    }

    pub fn grade(&self, date: NaiveDate) -> Option<MoodGrade> {
        self.days.get(&date).map(|d| d.mood)
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Days in ascending date order
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, &SnapshotDay)> {
        self.days.iter().map(|(date, day)| (*date, day))
    }

    /// Dates in ascending order
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.days.keys().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn entry(day: &str, mood: MoodGrade, note: Option<&str>) -> MoodEntry {
        MoodEntry {
            id: Uuid::new_v4(),
            user_id: Uuid::nil(),
            date: date(day),
            mood,
            note: note.map(str::to_string),
            positive_note: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_from_entries_orders_and_overwrites() {
        let entries = vec![
            entry("2026-02-10", MoodGrade::C, None),
            entry("2026-01-05", MoodGrade::A, Some("walk")),
            entry("2026-02-10", MoodGrade::B, Some("better")),
        ];
        let snapshot = MoodSnapshot::from_entries(&entries);

        assert_eq!(snapshot.len(), 2);
        let dates: Vec<_> = snapshot.dates().collect();
        assert_eq!(dates, vec![date("2026-01-05"), date("2026-02-10")]);
        assert_eq!(snapshot.grade(date("2026-02-10")), Some(MoodGrade::B));
        assert_eq!(snapshot.get(date("2026-02-10")).unwrap().note, "better");
    }

    #[test]
    fn test_json_uses_date_keys() {
        let mut snapshot = MoodSnapshot::new();
        snapshot.insert(date("2026-01-02"), MoodGrade::A, String::new());

        let json = serde_json::to_string(&snapshot).unwrap();
        assert_eq!(json, r#"{"2026-01-02":{"mood":"A","note":""}}"#);

        let parsed: MoodSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, snapshot);
    }

    #[test]
    fn test_malformed_key_rejected_at_boundary() {
        let result: Result<MoodSnapshot, _> =
            serde_json::from_str(r#"{"2026-13-40":{"mood":"A","note":""}}"#);
        assert!(result.is_err());
    }
}
