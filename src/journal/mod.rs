//! Per-session mood journal.
//!
//! Owns the year snapshot that the grid and the statistics panel read. Saves are
//! applied locally first and rolled back if the backend refuses them.

use chrono::{Datelike, Local, NaiveDate};

use crate::backend::{BackendError, MoodBackend};
use crate::mood::calendar::year_bounds;
use crate::mood::{calculate_statistics, DayRecord, MoodEntry, MoodSnapshot, MoodStatistics, SaveMoodRequest};
use crate::profile::{self, UserProfile};

/// Result of a save
#[derive(Debug)]
pub enum SaveOutcome {
    Saved(MoodEntry),
    /// The backend rejected the save; the snapshot is back to its previous state
    RolledBack(BackendError),
}

impl SaveOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, SaveOutcome::Saved(_))
    }
}

pub struct MoodJournal<B: MoodBackend> {
    backend: B,
    year: i32,
    user: Option<UserProfile>,
    snapshot: MoodSnapshot,
}

impl<B: MoodBackend> MoodJournal<B> {
    pub fn new(backend: B, year: i32) -> Self {
        Self {
            backend,
            year,
            user: None,
            snapshot: MoodSnapshot::new(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// Switch years. The snapshot is cleared until the next refresh.
    pub fn set_year(&mut self, year: i32) {
        if year != self.year {
            self.year = year;
            self.snapshot = MoodSnapshot::new();
        }
    }

    pub fn user(&self) -> Option<&UserProfile> {
        self.user.as_ref()
    }

    pub fn display_name(&self) -> String {
        profile::display_name(self.user.as_ref())
    }

    pub fn snapshot(&self) -> &MoodSnapshot {
        &self.snapshot
    }

    /// Load the signed-in user and their moods for the current year.
    ///
    /// Failures are logged and leave the previous snapshot in place. Returns whether a
    /// fresh snapshot was loaded.
    pub fn refresh(&mut self) -> bool {
        match self.try_refresh() {
            Ok(loaded) => loaded,
            Err(e) => {
                log::error!("Error fetching moods: {}", e);
                false
            }
        }
    }

    fn try_refresh(&mut self) -> Result<bool, BackendError> {
        self.user = self.backend.current_user()?;
        let Some(user) = self.user.as_ref() else {
            return Ok(false);
        };

        let Some((start, end)) = year_bounds(self.year) else {
            log::warn!("Year {} is out of range", self.year);
            return Ok(false);
        };

        let entries = self.backend.fetch_range(user.id, start, end)?;
        self.snapshot = MoodSnapshot::from_entries(&entries);
        log::debug!("Loaded {} moods for {}", self.snapshot.len(), self.year);
        Ok(true)
    }

    /// Record a mood. The snapshot reflects the change immediately; if the backend
    /// fails, the snapshot is restored and the error is logged.
    pub fn save_mood(&mut self, request: SaveMoodRequest) -> SaveOutcome {
        let previous = self.snapshot.clone();
        if request.date.year() == self.year {
            let existing = self.snapshot.get(request.date).map(|d| d.note.as_str());
            let note = request.merged_note(existing).unwrap_or_default();
            self.snapshot.insert(request.date, request.mood, note);
        }

        let result = match self.user.as_ref() {
            Some(user) => self.backend.upsert(user.id, &request),
            None => Err(BackendError::NotSignedIn),
        };

        match result {
            Ok(entry) => {
                if entry.date.year() == self.year {
                    self.snapshot
                        .insert(entry.date, entry.mood, entry.note.clone().unwrap_or_default());
                }
                SaveOutcome::Saved(entry)
            }
            Err(e) => {
                log::error!("Error saving mood: {}", e);
                self.snapshot = previous;
                SaveOutcome::RolledBack(e)
            }
        }
    }

    /// Editable state for one day; empty when nothing is recorded or the fetch fails
    pub fn load_day(&self, date: NaiveDate) -> DayRecord {
        let Some(user) = self.user.as_ref() else {
            return DayRecord::empty(date);
        };

        match self.backend.fetch_day(user.id, date) {
            Ok(Some(entry)) => DayRecord::from_entry(&entry),
            Ok(None) => DayRecord::empty(date),
            Err(e) => {
                log::error!("Error fetching day data: {}", e);
                DayRecord::empty(date)
            }
        }
    }

    /// Update the signed-in user's display name
    pub fn rename(&mut self, full_name: &str) -> Result<&UserProfile, BackendError> {
        let updated = self.backend.update_profile(full_name)?;
        Ok(self.user.insert(updated))
    }

    pub fn statistics(&self, today: NaiveDate) -> Option<MoodStatistics> {
        calculate_statistics(&self.snapshot, today)
    }

    /// Statistics as of the local calendar date
    pub fn statistics_now(&self) -> Option<MoodStatistics> {
        self.statistics(Local::now().date_naive())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    use chrono::Utc;
    use uuid::Uuid;

    use crate::backend::Result;
    use crate::mood::MoodGrade;

    /// In-memory backend whose writes can be made to fail
    struct ScriptedBackend {
        user: Option<UserProfile>,
        rows: RefCell<Vec<MoodEntry>>,
        fail_writes: bool,
        fail_reads: bool,
        fail_range: bool,
    }

    impl ScriptedBackend {
        fn signed_in() -> Self {
            Self {
                user: Some(UserProfile {
                    id: Uuid::new_v4(),
                    email: Some("sam@example.com".to_string()),
                    full_name: None,
                }),
                rows: RefCell::new(Vec::new()),
                fail_writes: false,
                fail_reads: false,
                fail_range: false,
            }
        }

        fn seed(&self, day: &str, mood: MoodGrade) {
            let user_id = self.user.as_ref().unwrap().id;
            self.rows.borrow_mut().push(MoodEntry {
                id: Uuid::new_v4(),
                user_id,
                date: date(day),
                mood,
                note: None,
                positive_note: Some("sunshine".to_string()),
                created_at: Utc::now(),
            });
        }
    }

    impl MoodBackend for ScriptedBackend {
        fn current_user(&self) -> Result<Option<UserProfile>> {
            if self.fail_reads {
                return Err(BackendError::Server {
                    status: 503,
                    message: "unavailable".to_string(),
                });
            }
            Ok(self.user.clone())
        }

        fn fetch_range(&self, user_id: Uuid, start: NaiveDate, end: NaiveDate) -> Result<Vec<MoodEntry>> {
            if self.fail_range {
                return Err(BackendError::Server {
                    status: 502,
                    message: "bad gateway".to_string(),
                });
            }
            Ok(self
                .rows
                .borrow()
                .iter()
                .filter(|r| r.user_id == user_id && r.date >= start && r.date <= end)
                .cloned()
                .collect())
        }

        fn fetch_day(&self, user_id: Uuid, date: NaiveDate) -> Result<Option<MoodEntry>> {
            if self.fail_reads {
                return Err(BackendError::AuthFailed);
            }
            Ok(self
                .rows
                .borrow()
                .iter()
                .find(|r| r.user_id == user_id && r.date == date)
                .cloned())
        }

        fn upsert(&self, user_id: Uuid, request: &SaveMoodRequest) -> Result<MoodEntry> {
            if self.fail_writes {
                return Err(BackendError::Server {
                    status: 500,
                    message: "write failed".to_string(),
                });
            }
            let mut rows = self.rows.borrow_mut();
            let existing = rows
                .iter()
                .find(|r| r.user_id == user_id && r.date == request.date)
                .cloned();
            let entry = MoodEntry {
                id: Uuid::new_v4(),
                user_id,
                date: request.date,
                mood: request.mood,
                note: request.merged_note(existing.as_ref().and_then(|r| r.note.as_deref())),
                positive_note: request
                    .positive_note
                    .clone()
                    .or_else(|| existing.and_then(|r| r.positive_note)),
                created_at: Utc::now(),
            };
            rows.retain(|r| !(r.user_id == user_id && r.date == request.date));
            rows.push(entry.clone());
            Ok(entry)
        }

        fn update_profile(&self, full_name: &str) -> Result<UserProfile> {
            let mut user = self.user.clone().ok_or(BackendError::NotSignedIn)?;
            user.full_name = Some(full_name.to_string());
            Ok(user)
        }
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn save(day: &str, mood: MoodGrade, note: &str) -> SaveMoodRequest {
        SaveMoodRequest {
            date: date(day),
            mood,
            note: Some(note.to_string()),
            positive_note: None,
        }
    }

    #[test]
    fn test_refresh_loads_only_the_year() {
        let backend = ScriptedBackend::signed_in();
        backend.seed("2025-12-31", MoodGrade::A);
        backend.seed("2026-01-01", MoodGrade::B);
        backend.seed("2026-01-02", MoodGrade::B);

        let mut journal = MoodJournal::new(backend, 2026);
        assert!(journal.refresh());
        assert_eq!(journal.snapshot().len(), 2);
        assert_eq!(journal.display_name(), "sam");

        let stats = journal.statistics(date("2026-01-03")).unwrap();
        assert_eq!(stats.total, 2);
        assert_eq!(stats.current_streak, 2);
        assert_eq!(stats.primary_grade, MoodGrade::B);
    }

    #[test]
    fn test_refresh_failure_keeps_stale_snapshot() {
        let backend = ScriptedBackend::signed_in();
        backend.seed("2026-03-01", MoodGrade::C);

        let mut journal = MoodJournal::new(backend, 2026);
        assert!(journal.refresh());

        journal.backend.fail_reads = true;
        assert!(!journal.refresh());
        assert_eq!(journal.snapshot().grade(date("2026-03-01")), Some(MoodGrade::C));
    }

    #[test]
    fn test_signed_out_refresh_is_empty() {
        let mut backend = ScriptedBackend::signed_in();
        backend.user = None;

        let mut journal = MoodJournal::new(backend, 2026);
        assert!(!journal.refresh());
        assert!(journal.snapshot().is_empty());
        assert_eq!(journal.statistics(date("2026-01-01")), None);
        assert_eq!(journal.display_name(), "there");
    }

    #[test]
    fn test_save_updates_snapshot() {
        let mut journal = MoodJournal::new(ScriptedBackend::signed_in(), 2026);
        journal.refresh();

        let outcome = journal.save_mood(save("2026-07-04", MoodGrade::A, "fireworks"));
        assert!(outcome.is_saved());

        let day = journal.snapshot().get(date("2026-07-04")).unwrap();
        assert_eq!(day.mood, MoodGrade::A);
        assert_eq!(day.note, "fireworks");
        assert_eq!(journal.backend().rows.borrow().len(), 1);
    }

    #[test]
    fn test_failed_save_rolls_back() {
        let backend = ScriptedBackend::signed_in();
        backend.seed("2026-07-04", MoodGrade::C);

        let mut journal = MoodJournal::new(backend, 2026);
        journal.refresh();
        let before = journal.snapshot().clone();

        journal.backend.fail_writes = true;
        let overwrite = journal.save_mood(save("2026-07-04", MoodGrade::F, "rain"));
        let insert = journal.save_mood(save("2026-07-05", MoodGrade::B, ""));

        assert!(matches!(overwrite, SaveOutcome::RolledBack(_)));
        assert!(!insert.is_saved());
        assert_eq!(journal.snapshot(), &before);
    }

    #[test]
    fn test_save_without_user_rolls_back() {
        let mut journal = MoodJournal::new(ScriptedBackend::signed_in(), 2026);
        // never refreshed, so no user is known
        let outcome = journal.save_mood(save("2026-01-01", MoodGrade::A, ""));

        assert!(matches!(outcome, SaveOutcome::RolledBack(BackendError::NotSignedIn)));
        assert!(journal.snapshot().is_empty());
    }

    #[test]
    fn test_grade_only_save_keeps_note_when_year_fetch_failed() {
        let backend = ScriptedBackend::signed_in();
        let user_id = backend.user.as_ref().unwrap().id;
        backend.rows.borrow_mut().push(MoodEntry {
            id: Uuid::new_v4(),
            user_id,
            date: date("2026-09-09"),
            mood: MoodGrade::B,
            note: Some("keep me".to_string()),
            positive_note: None,
            created_at: Utc::now(),
        });

        let mut journal = MoodJournal::new(backend, 2026);
        journal.backend.fail_range = true;
        assert!(!journal.refresh());
        assert!(journal.user().is_some());
        assert!(journal.snapshot().is_empty());

        let outcome = journal.save_mood(SaveMoodRequest::new(date("2026-09-09"), MoodGrade::D));
        assert!(outcome.is_saved());

        let stored = journal.load_day(date("2026-09-09"));
        assert_eq!(stored.mood, Some(MoodGrade::D));
        assert_eq!(stored.note, "keep me");
        assert_eq!(journal.snapshot().get(date("2026-09-09")).unwrap().note, "keep me");
    }

    #[test]
    fn test_save_outside_year_leaves_snapshot() {
        let mut journal = MoodJournal::new(ScriptedBackend::signed_in(), 2026);
        journal.refresh();

        assert!(journal.save_mood(save("2025-12-31", MoodGrade::B, "")).is_saved());
        assert!(journal.snapshot().is_empty());
    }

    #[test]
    fn test_load_day() {
        let backend = ScriptedBackend::signed_in();
        backend.seed("2026-02-02", MoodGrade::D);

        let mut journal = MoodJournal::new(backend, 2026);
        journal.refresh();

        let day = journal.load_day(date("2026-02-02"));
        assert_eq!(day.mood, Some(MoodGrade::D));
        assert_eq!(day.positive_note, "sunshine");

        assert_eq!(journal.load_day(date("2026-02-03")), DayRecord::empty(date("2026-02-03")));

        journal.backend.fail_reads = true;
        assert_eq!(journal.load_day(date("2026-02-02")).mood, None);
    }

    #[test]
    fn test_set_year_clears_snapshot() {
        let backend = ScriptedBackend::signed_in();
        backend.seed("2026-02-02", MoodGrade::D);
        backend.seed("2027-02-02", MoodGrade::A);

        let mut journal = MoodJournal::new(backend, 2026);
        journal.refresh();
        journal.set_year(2027);
        assert!(journal.snapshot().is_empty());

        journal.refresh();
        assert_eq!(journal.snapshot().grade(date("2027-02-02")), Some(MoodGrade::A));
    }

    #[test]
    fn test_rename() {
        let mut journal = MoodJournal::new(ScriptedBackend::signed_in(), 2026);
        journal.refresh();

        let renamed = journal.rename("Sam Rivera").unwrap();
        assert_eq!(renamed.full_name.as_deref(), Some("Sam Rivera"));
        assert_eq!(journal.display_name(), "Sam Rivera");
    }
}
