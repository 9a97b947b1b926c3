//! Offline backend over the local JSON store

use chrono::NaiveDate;
use uuid::Uuid;

use super::{BackendError, MoodBackend, Result};
use crate::mood::{MoodEntry, SaveMoodRequest};
use crate::profile::UserProfile;
use crate::storage::FileStorage;

pub struct LocalBackend {
    storage: FileStorage,
}

impl LocalBackend {
    pub fn new(storage: FileStorage) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &FileStorage {
        &self.storage
    }

    /// Rows may only be written for the signed-in user
    fn require_user(&self, user_id: Uuid) -> Result<()> {
        match self.storage.load_profile()? {
            Some(profile) if profile.id == user_id => Ok(()),
            _ => Err(BackendError::NotSignedIn),
        }
    }
}

impl MoodBackend for LocalBackend {
    fn current_user(&self) -> Result<Option<UserProfile>> {
        Ok(self.storage.load_profile()?)
    }

    fn fetch_range(&self, user_id: Uuid, start: NaiveDate, end: NaiveDate) -> Result<Vec<MoodEntry>> {
        Ok(self.storage.moods_in_range(user_id, start, end)?)
    }

    fn fetch_day(&self, user_id: Uuid, date: NaiveDate) -> Result<Option<MoodEntry>> {
        Ok(self.storage.get_mood(user_id, date)?)
    }

    fn upsert(&self, user_id: Uuid, request: &SaveMoodRequest) -> Result<MoodEntry> {
        self.require_user(user_id)?;
        Ok(self.storage.upsert_mood(user_id, request)?)
    }

    fn update_profile(&self, full_name: &str) -> Result<UserProfile> {
        if self.storage.load_profile()?.is_none() {
            return Err(BackendError::NotSignedIn);
        }
        Ok(self.storage.update_profile(full_name)?)
    }
}
