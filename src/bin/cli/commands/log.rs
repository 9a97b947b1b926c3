use anyhow::{bail, Result};
use chrono::Datelike;

use vibelog_lib::mood::calendar::date_key;
use vibelog_lib::mood::{MoodEntry, SaveMoodRequest};
use vibelog_lib::{MoodGrade, SaveOutcome};

use crate::app::App;
use crate::render::terminal;
use crate::OutputFormat;

pub fn run(
    app: &mut App,
    grade: &str,
    date: Option<&str>,
    note: Option<String>,
    positive: Option<String>,
    format: &OutputFormat,
    use_color: bool,
) -> Result<()> {
    let grade: MoodGrade = grade.parse()?;
    let date = App::parse_date(date)?;

    if date.year() != app.journal.year() {
        app.journal.set_year(date.year());
        app.journal.refresh();
    }
    app.require_user()?;

    // An omitted note or positive note leaves the stored text alone
    let request = SaveMoodRequest {
        date,
        mood: grade,
        note,
        positive_note: positive,
    };

    let entry = match app.journal.save_mood(request) {
        SaveOutcome::Saved(entry) => entry,
        SaveOutcome::RolledBack(e) => {
            bail!("Could not save mood for {}: {}", date_key(date), e)
        }
    };
    let stats = app.journal.statistics(App::today());

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "entry": entry_json(&entry),
                "statistics": stats,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!(
                "Saved {} for {}",
                terminal::grade_badge(entry.mood, use_color),
                terminal::long_date(entry.date)
            );
            if let Some(note) = entry.note.as_deref() {
                println!("  Note: {}", note);
            }
            if let Some(positive) = entry.positive_note.as_deref() {
                println!("  Positive: {}", positive);
            }
            if let Some(stats) = stats {
                println!(
                    "  Current streak: {} (best {})",
                    stats.current_streak, stats.best_streak
                );
            }
        }
    }

    Ok(())
}

/// Saved entry with the same camelCase keys as the rest of the JSON output
fn entry_json(entry: &MoodEntry) -> serde_json::Value {
    serde_json::json!({
        "id": entry.id,
        "userId": entry.user_id,
        "date": date_key(entry.date),
        "mood": entry.mood,
        "note": entry.note,
        "positiveNote": entry.positive_note,
        "createdAt": entry.created_at,
    })
}
