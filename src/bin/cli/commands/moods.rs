use anyhow::Result;

use vibelog_lib::MoodGrade;

use crate::render::terminal;
use crate::OutputFormat;

pub fn run(format: &OutputFormat, use_color: bool) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let output: Vec<_> = MoodGrade::ALL
                .iter()
                .map(|grade| {
                    let info = grade.info();
                    serde_json::json!({
                        "grade": grade,
                        "label": info.label,
                        "description": info.description,
                        "emoji": info.emoji,
                        "color": info.color,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            for grade in MoodGrade::ALL {
                println!(
                    "{}   {}",
                    terminal::grade_badge(grade, use_color),
                    grade.info().description
                );
            }
        }
    }

    Ok(())
}
