use anyhow::Result;

use vibelog_lib::mood::calendar::{date_key, next_day, previous_day};

use crate::app::App;
use crate::render::terminal::{self, Color};
use crate::OutputFormat;

pub fn run(app: &App, date: Option<&str>, format: &OutputFormat, use_color: bool) -> Result<()> {
    app.require_user()?;
    let date = App::parse_date(date)?;
    let day = app.journal.load_day(date);
    let is_today = date == App::today();

    let previous = previous_day(date).map(date_key);
    let next = next_day(date).map(date_key);

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "day": day,
                "isToday": is_today,
                "previous": previous,
                "next": next,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!(
                "{}   {}   {}",
                paint_nav(previous.map(|d| format!("< {}", d)), use_color),
                terminal::paint(&terminal::long_date(date), Color::BOLD, use_color),
                paint_nav(next.map(|d| format!("{} >", d)), use_color),
            );
            println!();
            if is_today {
                println!("How was your day today?");
            } else {
                println!("How was your day?");
            }
            println!();

            match day.mood {
                Some(grade) => println!("Mood:      {}", terminal::grade_badge(grade, use_color)),
                None => println!(
                    "Mood:      {}",
                    terminal::paint(
                        &format!("not recorded (vibelog-cli log <grade> --date {})", date_key(date)),
                        Color::DIM,
                        use_color
                    )
                ),
            }
            if !day.note.is_empty() {
                println!("Note:      {}", day.note);
            }
            if !day.positive_note.is_empty() {
                println!("Positive:  {}", day.positive_note);
            }
        }
    }

    Ok(())
}

fn paint_nav(label: Option<String>, use_color: bool) -> String {
    terminal::paint(&label.unwrap_or_default(), Color::DIM, use_color)
}
