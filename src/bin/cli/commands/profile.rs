use anyhow::{Context, Result};

use crate::app::App;
use crate::OutputFormat;

pub fn run(app: &mut App, name: Option<&str>, format: &OutputFormat) -> Result<()> {
    app.require_user()?;

    if let Some(name) = name {
        app.journal
            .rename(name)
            .context("Failed to update profile")?;
    }

    let display_name = app.journal.display_name();
    let Some(user) = app.journal.user() else {
        return Ok(());
    };

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "id": user.id.to_string(),
                "email": user.email,
                "fullName": user.full_name,
                "displayName": display_name,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!("{}", display_name);
            if let Some(email) = user.email.as_deref() {
                println!("  Email: {}", email);
            }
            println!("  ID: {}", user.id);
        }
    }

    Ok(())
}
