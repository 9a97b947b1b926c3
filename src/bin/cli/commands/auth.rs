use std::path::Path;

use anyhow::{bail, Context, Result};

use vibelog_lib::storage::FileStorage;
use vibelog_lib::AppConfig;

use crate::OutputFormat;

/// Local storage, or an error explaining where remote sign-in happens
fn local_storage(config_path: Option<&Path>) -> Result<FileStorage> {
    let config = AppConfig::load(config_path).context("Failed to load config")?;
    if !config.is_local() {
        bail!(
            "The hosted backend handles sign-in. Put its access token in backend.access_token or VIBELOG_ACCESS_TOKEN."
        );
    }
    let storage = FileStorage::new(config.data_dir()?);
    storage.init().context("Failed to initialize storage")?;
    Ok(storage)
}

pub fn login(config_path: Option<&Path>, email: &str, format: &OutputFormat) -> Result<()> {
    let storage = local_storage(config_path)?;
    let profile = storage.sign_in(email).context("Failed to sign in")?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&profile)?);
        }
        OutputFormat::Plain => {
            println!("Signed in as {}", profile.display_name());
        }
    }

    Ok(())
}

pub fn logout(config_path: Option<&Path>) -> Result<()> {
    let storage = local_storage(config_path)?;
    storage.sign_out().context("Failed to sign out")?;
    println!("Signed out");
    Ok(())
}
