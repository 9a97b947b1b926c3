use std::fs;
use std::path::{Path, PathBuf};

use chrono::{NaiveDate, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::mood::models::non_empty;
use crate::mood::{MoodEntry, SaveMoodRequest};
use crate::profile::UserProfile;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Data directory not found")]
    DataDirNotFound,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
}

pub type Result<T> = std::result::Result<T, StorageError>;

/// Local JSON store for mood rows and the signed-in profile
pub struct FileStorage {
    base_path: PathBuf,
}

impl FileStorage {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    /// Get the default data directory
    pub fn default_data_dir() -> Result<PathBuf> {
        dirs::data_local_dir()
            .map(|p| p.join("vibelog"))
            .ok_or(StorageError::DataDirNotFound)
    }

    /// Initialize storage directories
    pub fn init(&self) -> Result<()> {
        fs::create_dir_all(&self.base_path)?;
        Ok(())
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn moods_file(&self) -> PathBuf {
        self.base_path.join("moods.json")
    }

    fn profile_file(&self) -> PathBuf {
        self.base_path.join("profile.json")
    }

    // ===== Mood Operations =====

    /// List all stored rows, for every user
    pub fn list_moods(&self) -> Result<Vec<MoodEntry>> {
        let path = self.moods_file();
        if !path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(path)?;
        let moods: Vec<MoodEntry> = serde_json::from_str(&content)?;
        Ok(moods)
    }

    /// Get one user's entry for a date
    pub fn get_mood(&self, user_id: Uuid, date: NaiveDate) -> Result<Option<MoodEntry>> {
        let moods = self.list_moods()?;
        Ok(moods
            .into_iter()
            .find(|m| m.user_id == user_id && m.date == date))
    }

    /// Get one user's entries between `start` and `end`, inclusive
    pub fn moods_in_range(
        &self,
        user_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<MoodEntry>> {
        let moods = self.list_moods()?;
        Ok(moods
            .into_iter()
            .filter(|m| m.user_id == user_id && m.date >= start && m.date <= end)
            .collect())
    }

    /// Create or overwrite the entry for (user, date)
    pub fn upsert_mood(&self, user_id: Uuid, request: &SaveMoodRequest) -> Result<MoodEntry> {
        let mut moods = self.list_moods()?;
        let saved = if let Some(existing) = moods
            .iter_mut()
            .find(|m| m.user_id == user_id && m.date == request.date)
        {
            existing.mood = request.mood;
            existing.note = request.merged_note(existing.note.as_deref());
            if let Some(positive) = request.positive_note.as_deref() {
                existing.positive_note = non_empty(Some(positive));
            }
            existing.clone()
        } else {
            let entry = MoodEntry {
                id: Uuid::new_v4(),
                user_id,
                date: request.date,
                mood: request.mood,
                note: request.normalized_note(),
                positive_note: non_empty(request.positive_note.as_deref()),
                created_at: Utc::now(),
            };
            moods.push(entry.clone());
            moods.sort_by(|a, b| a.user_id.cmp(&b.user_id).then(a.date.cmp(&b.date)));
            entry
        };

        self.save_moods(&moods)?;
        Ok(saved)
    }

    fn save_moods(&self, moods: &[MoodEntry]) -> Result<()> {
        self.init()?;
        let json = serde_json::to_string_pretty(moods)?;
        fs::write(self.moods_file(), json)?;
        Ok(())
    }

    // ===== Profile Operations =====

    /// The signed-in local profile, if any
    pub fn load_profile(&self) -> Result<Option<UserProfile>> {
        let path = self.profile_file();
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(path)?;
        Ok(Some(serde_json::from_str(&content)?))
    }

    /// Sign in locally. The same e-mail always maps to the same user id.
    pub fn sign_in(&self, email: &str) -> Result<UserProfile> {
        let email = email.trim();
        if !email.contains('@') {
            return Err(StorageError::InvalidOperation(format!(
                "Invalid e-mail address: {}",
                email
            )));
        }

        let id = Uuid::new_v5(&Uuid::NAMESPACE_URL, format!("mailto:{}", email.to_lowercase()).as_bytes());
        let full_name = self
            .load_profile()?
            .filter(|p| p.id == id)
            .and_then(|p| p.full_name);

        let profile = UserProfile {
            id,
            email: Some(email.to_string()),
            full_name,
        };
        self.save_profile(&profile)?;

        log::info!("Signed in locally as {}", email);
        Ok(profile)
    }

    pub fn sign_out(&self) -> Result<()> {
        let path = self.profile_file();
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }

    /// Set the display name of the signed-in profile
    pub fn update_profile(&self, full_name: &str) -> Result<UserProfile> {
        let mut profile = self
            .load_profile()?
            .ok_or_else(|| StorageError::NotFound("No signed-in profile".to_string()))?;

        profile.full_name = non_empty(Some(full_name.trim()));
        self.save_profile(&profile)?;
        Ok(profile)
    }

    fn save_profile(&self, profile: &UserProfile) -> Result<()> {
        self.init()?;
        let json = serde_json::to_string_pretty(profile)?;
        fs::write(self.profile_file(), json)?;
        Ok(())
    }
}
