use chrono::NaiveDate;

use vibelog_lib::mood::calendar::{MonthCalendar, YearGrid, MONTH_ABBREVIATIONS, WEEKDAY_ABBREVIATIONS};
use vibelog_lib::{MoodGrade, MoodStatistics};

/// ANSI color codes
#[allow(dead_code)]
pub struct Color;

#[allow(dead_code)]
impl Color {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const REVERSE: &str = "\x1b[7m";
    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const MAGENTA: &str = "\x1b[35m";
    pub const GRAY: &str = "\x1b[90m";
}

/// Terminal color closest to a grade's swatch
pub fn grade_color(grade: MoodGrade) -> &'static str {
    match grade {
        MoodGrade::A => Color::GREEN,
        MoodGrade::B => Color::YELLOW,
        MoodGrade::C => Color::MAGENTA,
        MoodGrade::D => Color::RED,
        MoodGrade::F => Color::GRAY,
    }
}

pub fn paint(text: &str, color: &str, use_color: bool) -> String {
    if use_color {
        format!("{}{}{}", color, text, Color::RESET)
    } else {
        text.to_string()
    }
}

/// "Monday, January 5, 2026"
pub fn long_date(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}

/// "A 😊 Great"
pub fn grade_badge(grade: MoodGrade, use_color: bool) -> String {
    let info = grade.info();
    format!(
        "{} {} {}",
        paint(grade.letter(), grade_color(grade), use_color),
        info.emoji,
        info.label
    )
}

fn plural_days(n: u32) -> &'static str {
    if n == 1 {
        "day"
    } else {
        "days"
    }
}

/// Greeting, primary vibe, streaks, total and the per-grade bar chart
pub fn render_statistics(stats: &MoodStatistics, name: &str, year: i32, use_color: bool) -> String {
    let primary = stats.primary_grade.info();
    let mut lines = vec![
        paint(&format!("Hey, {}! 👋", name), Color::BOLD, use_color),
        format!("Here's how your {} is looking so far.", year),
        String::new(),
        format!(
            "Primary vibe     {}",
            grade_badge(stats.primary_grade, use_color)
        ),
        format!(
            "                 You're mostly feeling {} this year.",
            primary.description.to_lowercase()
        ),
        format!(
            "Current streak   {} {} in a row (best: {} {})",
            stats.current_streak,
            plural_days(stats.current_streak),
            stats.best_streak,
            plural_days(stats.best_streak)
        ),
        format!("Total check-ins  {}", stats.total),
        String::new(),
    ];

    for bar in stats.bar_heights(24, 6, 0) {
        let fill = if bar.count > 0 {
            paint(&"█".repeat(bar.height as usize), grade_color(bar.grade), use_color)
        } else {
            paint("·", Color::DIM, use_color)
        };
        lines.push(format!(
            "  {} {} {} {}",
            bar.grade.letter(),
            bar.grade.info().emoji,
            fill,
            bar.count
        ));
    }

    lines.join("\n")
}

/// 31 rows by 12 month columns, aligned under the month abbreviations
pub fn render_year_grid(grid: &YearGrid, use_color: bool) -> String {
    let mut lines = Vec::with_capacity(grid.rows.len() + 1);
    lines.push(format!("    {}", MONTH_ABBREVIATIONS.join(" ")));

    for (i, row) in grid.rows.iter().enumerate() {
        let cells: Vec<String> = row
            .iter()
            .map(|cell| match (cell.date, cell.mood) {
                (None, _) => "   ".to_string(),
                (Some(_), Some(grade)) => {
                    let text = format!(" {} ", grade.letter());
                    let color = if cell.is_today {
                        format!("{}{}", Color::REVERSE, grade_color(grade))
                    } else {
                        grade_color(grade).to_string()
                    };
                    paint(&text, &color, use_color)
                }
                (Some(_), None) if cell.is_today => paint(" + ", Color::BOLD, use_color),
                (Some(_), None) => paint(" · ", Color::DIM, use_color),
            })
            .collect();
        lines.push(format!("{:>3} {}", i + 1, cells.join(" ").trim_end()));
    }

    lines.join("\n")
}

/// Sunday-first month calendar; the selected day is bracketed
pub fn render_month(calendar: &MonthCalendar, use_color: bool) -> String {
    let mut lines = vec![
        paint(&calendar.title(), Color::BOLD, use_color),
        WEEKDAY_ABBREVIATIONS
            .iter()
            .map(|d| format!("{:^5}", d))
            .collect::<Vec<_>>()
            .join(""),
    ];

    for week in calendar.weeks() {
        let slots: Vec<String> = week
            .iter()
            .map(|slot| match slot {
                None => "     ".to_string(),
                Some(day) => {
                    let number = day.date.format("%-d").to_string();
                    let mark = day.mood.map(|g| g.letter()).unwrap_or(" ");
                    let text = if day.is_selected {
                        format!("[{:>2}{}]", number, mark)
                    } else {
                        format!(" {:>2}{} ", number, mark)
                    };
                    match (day.mood, day.is_today) {
                        (Some(grade), _) => paint(&text, grade_color(grade), use_color),
                        (None, true) => paint(&text, Color::BOLD, use_color),
                        (None, false) => text,
                    }
                }
            })
            .collect();
        lines.push(slots.join("").trim_end().to_string());
    }

    lines.join("\n")
}
