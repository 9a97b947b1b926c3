pub mod auth;
pub mod day;
pub mod log;
pub mod month;
pub mod moods;
pub mod profile;
pub mod year;
