//! Mood grades and journal entry models

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A daily mood rating. Declaration order is the display and tie-break order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MoodGrade {
    A,
    B,
    C,
    D,
    F,
}

/// Display metadata for a grade
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoodInfo {
    pub label: &'static str,
    pub description: &'static str,
    pub emoji: &'static str,
    /// Hex swatch used when rendering the grade
    pub color: &'static str,
}

const MOODS: [MoodInfo; 5] = [
    MoodInfo {
        label: "Great",
        description: "Amazing day",
        emoji: "😊",
        color: "#34d399",
    },
    MoodInfo {
        label: "Good",
        description: "Good day",
        emoji: "🙂",
        color: "#fbbf24",
    },
    MoodInfo {
        label: "Okay",
        description: "Average day",
        emoji: "😐",
        color: "#c4b5fd",
    },
    MoodInfo {
        label: "Bad",
        description: "Tough day",
        emoji: "😔",
        color: "#fca5a5",
    },
    MoodInfo {
        label: "Terrible",
        description: "Very bad day",
        emoji: "😢",
        color: "#64748b",
    },
];

impl MoodGrade {
    pub const ALL: [MoodGrade; 5] = [
        MoodGrade::A,
        MoodGrade::B,
        MoodGrade::C,
        MoodGrade::D,
        MoodGrade::F,
    ];

    /// Position of the grade in `ALL`
    pub fn index(self) -> usize {
        match self {
            MoodGrade::A => 0,
            MoodGrade::B => 1,
            MoodGrade::C => 2,
            MoodGrade::D => 3,
            MoodGrade::F => 4,
        }
    }

    pub fn info(self) -> &'static MoodInfo {
        &MOODS[self.index()]
    }

    pub fn letter(self) -> &'static str {
        match self {
            MoodGrade::A => "A",
            MoodGrade::B => "B",
            MoodGrade::C => "C",
            MoodGrade::D => "D",
            MoodGrade::F => "F",
        }
    }
}

impl fmt::Display for MoodGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.letter())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown mood grade: {0} (expected one of A, B, C, D, F)")]
pub struct ParseGradeError(pub String);

impl FromStr for MoodGrade {
    type Err = ParseGradeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A" => Ok(MoodGrade::A),
            "B" => Ok(MoodGrade::B),
            "C" => Ok(MoodGrade::C),
            "D" => Ok(MoodGrade::D),
            "F" => Ok(MoodGrade::F),
            _ => Err(ParseGradeError(s.to_string())),
        }
    }
}

/// One stored mood row; at most one per (user, date)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MoodEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    /// Calendar day (YYYY-MM-DD)
    pub date: NaiveDate,
    pub mood: MoodGrade,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub positive_note: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Request to record a mood for a date (upsert by date)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SaveMoodRequest {
    pub date: NaiveDate,
    pub mood: MoodGrade,
    /// `None` leaves the stored note untouched, `Some("")` clears it
    #[serde(default)]
    pub note: Option<String>,
    /// `None` leaves the stored positive note untouched
    #[serde(default)]
    pub positive_note: Option<String>,
}

impl SaveMoodRequest {
    pub fn new(date: NaiveDate, mood: MoodGrade) -> Self {
        Self {
            date,
            mood,
            note: None,
            positive_note: None,
        }
    }

    /// Note with empty text treated as absent
    pub fn normalized_note(&self) -> Option<String> {
        non_empty(self.note.as_deref())
    }

    /// The note to store given the one already stored
    pub fn merged_note(&self, existing: Option<&str>) -> Option<String> {
        match self.note.as_deref() {
            Some(note) => non_empty(Some(note)),
            None => non_empty(existing),
        }
    }
}

/// Editable state of a single day
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DayRecord {
    pub date: NaiveDate,
    pub mood: Option<MoodGrade>,
    pub note: String,
    pub positive_note: String,
}

impl DayRecord {
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            mood: None,
            note: String::new(),
            positive_note: String::new(),
        }
    }

    pub fn from_entry(entry: &MoodEntry) -> Self {
        Self {
            date: entry.date,
            mood: Some(entry.mood),
            note: entry.note.clone().unwrap_or_default(),
            positive_note: entry.positive_note.clone().unwrap_or_default(),
        }
    }
}

pub(crate) fn non_empty(text: Option<&str>) -> Option<String> {
    text.filter(|t| !t.is_empty()).map(str::to_string)
}
