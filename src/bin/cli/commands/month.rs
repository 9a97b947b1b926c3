use anyhow::{Context, Result};
use chrono::Datelike;

use vibelog_lib::mood::calendar::{date_key, shift_month, MonthCalendar};

use crate::app::App;
use crate::render::terminal;
use crate::OutputFormat;

pub fn run(
    app: &mut App,
    date: Option<&str>,
    offset: i32,
    format: &OutputFormat,
    use_color: bool,
) -> Result<()> {
    app.require_user()?;
    let selected = App::parse_date(date)?;
    let (year, month) =
        shift_month(selected.year(), selected.month(), offset).context("Month out of range")?;

    if year != app.journal.year() {
        app.journal.set_year(year);
        app.journal.refresh();
    }

    let calendar = MonthCalendar::build(year, month, app.journal.snapshot(), selected, App::today())
        .context("Month out of range")?;

    match format {
        OutputFormat::Json => {
            let days: Vec<_> = calendar
                .days
                .iter()
                .map(|d| {
                    serde_json::json!({
                        "date": date_key(d.date),
                        "mood": d.mood,
                        "isSelected": d.is_selected,
                        "isToday": d.is_today,
                    })
                })
                .collect();
            let output = serde_json::json!({
                "year": calendar.year,
                "month": calendar.month,
                "leadingBlanks": calendar.leading_blanks,
                "days": days,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!("{}", terminal::render_month(&calendar, use_color));
        }
    }

    Ok(())
}
