use anyhow::Result;

use vibelog_lib::mood::calendar::YearGrid;

use crate::app::App;
use crate::render::terminal;
use crate::OutputFormat;

/// Statistics panel, followed by the year grid when `with_grid` is set
pub fn run(app: &App, with_grid: bool, format: &OutputFormat, use_color: bool) -> Result<()> {
    app.require_user()?;

    let today = App::today();
    let year = app.journal.year();
    let stats = app.journal.statistics(today);

    match format {
        OutputFormat::Json => {
            let output = if with_grid {
                serde_json::json!({
                    "year": year,
                    "displayName": app.journal.display_name(),
                    "statistics": stats,
                    "moods": app.journal.snapshot(),
                })
            } else {
                serde_json::to_value(&stats)?
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            match &stats {
                Some(stats) => println!(
                    "{}",
                    terminal::render_statistics(stats, &app.journal.display_name(), year, use_color)
                ),
                None => println!("No moods recorded in {} yet.", year),
            }

            if with_grid {
                println!();
                let grid = YearGrid::build(year, app.journal.snapshot(), today);
                println!("{}", terminal::render_year_grid(&grid, use_color));
            }
        }
    }

    Ok(())
}
