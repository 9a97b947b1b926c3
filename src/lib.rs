//! Personal mood journal: daily grades and notes, year-in-pixels views and streak
//! statistics. Persistence and auth live behind [`backend::MoodBackend`].

pub mod backend;
pub mod config;
pub mod journal;
pub mod mood;
pub mod profile;
pub mod storage;

pub use backend::{BackendError, MoodBackend};
pub use config::AppConfig;
pub use journal::{MoodJournal, SaveOutcome};
pub use mood::{calculate_statistics, MoodGrade, MoodSnapshot, MoodStatistics};
