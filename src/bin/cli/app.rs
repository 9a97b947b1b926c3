use std::path::Path;

use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDate};

use vibelog_lib::mood::calendar::parse_date_key;
use vibelog_lib::{AppConfig, MoodBackend, MoodJournal};

/// Shared application state for CLI commands
pub struct App {
    pub config: AppConfig,
    pub journal: MoodJournal<Box<dyn MoodBackend>>,
}

impl App {
    /// Load config, open the backend and fetch the year's moods
    pub fn new(config_path: Option<&Path>, year: Option<i32>) -> Result<Self> {
        let config = AppConfig::load(config_path).context("Failed to load config")?;
        let backend = config.open_backend().context("Failed to open backend")?;

        let year = year.unwrap_or_else(|| config.year());
        let mut journal = MoodJournal::new(backend, year);
        journal.refresh();

        Ok(Self { config, journal })
    }

    pub fn today() -> NaiveDate {
        Local::now().date_naive()
    }

    /// Parse a YYYY-MM-DD argument, defaulting to today
    pub fn parse_date(date: Option<&str>) -> Result<NaiveDate> {
        match date {
            Some(s) => parse_date_key(s).with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s)),
            None => Ok(Self::today()),
        }
    }

    /// Fail with a hint when nobody is signed in
    pub fn require_user(&self) -> Result<()> {
        if self.journal.user().is_some() {
            return Ok(());
        }
        if self.config.is_local() {
            bail!("Not signed in. Run `vibelog-cli login <email>` first.");
        }
        bail!("Not signed in. Set backend.access_token in the config or VIBELOG_ACCESS_TOKEN.");
    }
}
