//! The persistence and auth service that owns mood rows.
//!
//! Everything durable lives behind [`MoodBackend`]: fetch returns a user's rows for a
//! date range, save upserts one row keyed by (user, date).

mod local;
mod rest;

use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

use crate::mood::{MoodEntry, SaveMoodRequest};
use crate::profile::UserProfile;
use crate::storage::StorageError;

pub use local::LocalBackend;
pub use rest::{RestBackend, RestCredentials};

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Authentication failed")]
    AuthFailed,

    #[error("Not signed in")]
    NotSignedIn,

    #[error("Server error: {status} - {message}")]
    Server { status: u16, message: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Unexpected response: {0}")]
    Decode(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

pub type Result<T> = std::result::Result<T, BackendError>;

pub trait MoodBackend {
    /// The signed-in user, or `None` when signed out
    fn current_user(&self) -> Result<Option<UserProfile>>;

    /// A user's rows with `start <= date <= end`
    fn fetch_range(&self, user_id: Uuid, start: NaiveDate, end: NaiveDate) -> Result<Vec<MoodEntry>>;

    fn fetch_day(&self, user_id: Uuid, date: NaiveDate) -> Result<Option<MoodEntry>>;

    /// Create or overwrite the row for (user, request.date)
    fn upsert(&self, user_id: Uuid, request: &SaveMoodRequest) -> Result<MoodEntry>;

    /// Set the signed-in user's display name
    fn update_profile(&self, full_name: &str) -> Result<UserProfile>;
}

impl<B: MoodBackend + ?Sized> MoodBackend for Box<B> {
    fn current_user(&self) -> Result<Option<UserProfile>> {
        (**self).current_user()
    }

    fn fetch_range(&self, user_id: Uuid, start: NaiveDate, end: NaiveDate) -> Result<Vec<MoodEntry>> {
        (**self).fetch_range(user_id, start, end)
    }

    fn fetch_day(&self, user_id: Uuid, date: NaiveDate) -> Result<Option<MoodEntry>> {
        (**self).fetch_day(user_id, date)
    }

    fn upsert(&self, user_id: Uuid, request: &SaveMoodRequest) -> Result<MoodEntry> {
        (**self).upsert(user_id, request)
    }

    fn update_profile(&self, full_name: &str) -> Result<UserProfile> {
        (**self).update_profile(full_name)
    }
}
