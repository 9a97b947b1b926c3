//! Mood journaling: grades, snapshots, statistics and calendar layouts

pub mod calendar;
pub mod models;
pub mod snapshot;
pub mod stats;

pub use models::*;
pub use snapshot::{MoodSnapshot, SnapshotDay};
pub use stats::{calculate_statistics, GradeBar, GradeCounts, MoodStatistics};
