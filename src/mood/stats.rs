//! Mood statistics and streaks derived from a snapshot

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::models::MoodGrade;
use super::snapshot::MoodSnapshot;

/// A streak still counts as current when the last entry is at most this many days old
pub const RECENT_WINDOW_DAYS: i64 = 2;

/// Per-grade counts, always holding all five grades
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct GradeCounts(BTreeMap<MoodGrade, u32>);

impl GradeCounts {
    pub fn zeroed() -> Self {
        Self(MoodGrade::ALL.iter().map(|g| (*g, 0)).collect())
    }

    fn increment(&mut self, grade: MoodGrade) {
        *self.0.entry(grade).or_insert(0) += 1;
    }

    pub fn get(&self, grade: MoodGrade) -> u32 {
        self.0.get(&grade).copied().unwrap_or(0)
    }

    /// Counts in grade order
    pub fn iter(&self) -> impl Iterator<Item = (MoodGrade, u32)> + '_ {
        MoodGrade::ALL.iter().map(|g| (*g, self.get(*g)))
    }

    pub fn max(&self) -> u32 {
        self.iter().map(|(_, c)| c).max().unwrap_or(0)
    }

    pub fn sum(&self) -> u32 {
        self.iter().map(|(_, c)| c).sum()
    }

    /// Highest count; ties go to the grade earliest in `MoodGrade::ALL`
    pub fn primary(&self) -> MoodGrade {
        let mut primary = MoodGrade::A;
        let mut best = 0;
        for (grade, count) in self.iter() {
            if count > best {
                primary = grade;
                best = count;
            }
        }
        primary
    }
}

impl Default for GradeCounts {
    fn default() -> Self {
        Self::zeroed()
    }
}

/// Derived statistics (not stored)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MoodStatistics {
    pub total: u32,
    pub counts: GradeCounts,
    /// Run ending at the latest entry, or 0 if that entry is stale
    pub current_streak: u32,
    pub best_streak: u32,
    pub primary_grade: MoodGrade,
}

/// One bar of the grade distribution chart
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GradeBar {
    pub grade: MoodGrade,
    pub count: u32,
    pub height: u32,
}

impl MoodStatistics {
    /// Scale counts against the largest one. Non-zero counts never drop below
    /// `min_filled`; zero counts get `empty`.
    pub fn bar_heights(&self, max_height: u32, min_filled: u32, empty: u32) -> Vec<GradeBar> {
        let max_count = self.counts.max().max(1);
        self.counts
            .iter()
            .map(|(grade, count)| {
                let height = if count > 0 {
                    let scaled = (f64::from(count) / f64::from(max_count) * f64::from(max_height))
                        .round() as u32;
                    scaled.max(min_filled)
                } else {
                    empty
                };
                GradeBar {
                    grade,
                    count,
                    height,
                }
            })
            .collect()
    }
}

/// Compute statistics for a snapshot as seen on `today`.
///
/// Returns `None` for an empty snapshot.
pub fn calculate_statistics(snapshot: &MoodSnapshot, today: NaiveDate) -> Option<MoodStatistics> {
    if snapshot.is_empty() {
        return None;
    }

    let mut counts = GradeCounts::zeroed();
    for (_, day) in snapshot.iter() {
        counts.increment(day.mood);
    }

    let mut best_streak = 0u32;
    let mut running = 0u32;
    let mut previous: Option<NaiveDate> = None;

    for date in snapshot.dates() {
        running = match previous {
            Some(prev) if (date - prev).num_days() == 1 => running + 1,
            _ => 1,
        };
        best_streak = best_streak.max(running);
        previous = Some(date);
    }

    let last_date = previous?;
    let current_streak = if (today - last_date).num_days() <= RECENT_WINDOW_DAYS {
        running
    } else {
        0
    };

    Some(MoodStatistics {
        total: snapshot.len() as u32,
        primary_grade: counts.primary(),
        counts,
        current_streak,
        best_streak,
    })
}
