//! Application configuration (`config.toml`)

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Datelike, Local};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::backend::{BackendError, LocalBackend, MoodBackend, RestBackend, RestCredentials};
use crate::storage::FileStorage;

/// Overrides `backend.access_token`
pub const ACCESS_TOKEN_ENV: &str = "VIBELOG_ACCESS_TOKEN";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config file: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Config directory not found")]
    ConfigDirNotFound,

    #[error("Data directory not found")]
    DataDirNotFound,

    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Which service holds the moods
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum BackendConfig {
    /// JSON files in the data directory
    #[default]
    Local,
    /// Hosted auth + database
    Remote {
        url: String,
        api_key: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        access_token: Option<String>,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Year shown by default; the current year when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    /// Local data directory
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    pub backend: BackendConfig,
}

impl AppConfig {
    /// Default location of the config file
    pub fn default_path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|p| p.join("vibelog").join("config.toml"))
            .ok_or(ConfigError::ConfigDirNotFound)
    }

    /// Load from `path`, or the default location. A missing file yields defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::default_path()?,
        };

        let mut config = if path.exists() {
            let content = fs::read_to_string(&path)?;
            Self::from_toml(&content)?
        } else {
            log::debug!("No config at {:?}, using defaults", path);
            Self::default()
        };

        if let Ok(token) = std::env::var(ACCESS_TOKEN_ENV) {
            config.set_access_token(token);
        }

        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    fn set_access_token(&mut self, token: String) {
        if let BackendConfig::Remote { access_token, .. } = &mut self.backend {
            if !token.trim().is_empty() {
                *access_token = Some(token.trim().to_string());
            }
        }
    }

    pub fn year(&self) -> i32 {
        self.year.unwrap_or_else(|| Local::now().year())
    }

    pub fn data_dir(&self) -> Result<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => FileStorage::default_data_dir().map_err(|_| ConfigError::DataDirNotFound),
        }
    }

    pub fn is_local(&self) -> bool {
        matches!(self.backend, BackendConfig::Local)
    }

    /// Build the configured backend
    pub fn open_backend(&self) -> Result<Box<dyn MoodBackend>> {
        match &self.backend {
            BackendConfig::Local => {
                let storage = FileStorage::new(self.data_dir()?);
                Ok(Box::new(LocalBackend::new(storage)))
            }
            BackendConfig::Remote {
                url,
                api_key,
                access_token,
            } => {
                let credentials = RestCredentials {
                    api_key: api_key.clone(),
                    access_token: access_token.clone(),
                };
                Ok(Box::new(RestBackend::new(url.clone(), credentials)?))
            }
        }
    }
}
