//! Calendar layouts for the year-in-pixels grid and the month picker

use chrono::{Datelike, NaiveDate};

use super::models::MoodGrade;
use super::snapshot::MoodSnapshot;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

pub const WEEKDAY_ABBREVIATIONS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Format a date as its YYYY-MM-DD key
pub fn date_key(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn parse_date_key(key: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(key.trim(), DATE_FORMAT)
}

/// Number of days in `month` (1-12), or 0 for an invalid month
pub fn days_in_month(year: i32, month: u32) -> u32 {
    if !(1..=12).contains(&month) {
        return 0;
    }
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.pred_opt())
        .map(|d| d.day())
        .unwrap_or(0)
}

/// Move `delta` months from (year, month); `None` when the year leaves `i32`
pub fn shift_month(year: i32, month: u32, delta: i32) -> Option<(i32, u32)> {
    let total = i64::from(year) * 12 + i64::from(month) - 1 + i64::from(delta);
    let year = i32::try_from(total.div_euclid(12)).ok()?;
    Some((year, total.rem_euclid(12) as u32 + 1))
}

pub fn previous_day(date: NaiveDate) -> Option<NaiveDate> {
    date.pred_opt()
}

pub fn next_day(date: NaiveDate) -> Option<NaiveDate> {
    date.succ_opt()
}

/// First and last day of a year
pub fn year_bounds(year: i32) -> Option<(NaiveDate, NaiveDate)> {
    Some((
        NaiveDate::from_ymd_opt(year, 1, 1)?,
        NaiveDate::from_ymd_opt(year, 12, 31)?,
    ))
}

/// One cell of the year grid; `date` is `None` for days a month doesn't have
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridCell {
    pub date: Option<NaiveDate>,
    pub mood: Option<MoodGrade>,
    pub is_today: bool,
}

impl GridCell {
    pub fn is_disabled(&self) -> bool {
        self.date.is_none()
    }
}

/// 31 rows (day of month) by 12 columns (month)
#[derive(Debug, Clone)]
pub struct YearGrid {
    pub year: i32,
    pub rows: Vec<Vec<GridCell>>,
}

impl YearGrid {
    pub fn build(year: i32, snapshot: &MoodSnapshot, today: NaiveDate) -> Self {
        let rows = (1..=31u32)
            .map(|day| {
                (1..=12u32)
                    .map(|month| match NaiveDate::from_ymd_opt(year, month, day) {
                        Some(date) => GridCell {
                            date: Some(date),
                            mood: snapshot.grade(date),
                            is_today: date == today,
                        },
                        None => GridCell {
                            date: None,
                            mood: None,
                            is_today: false,
                        },
                    })
                    .collect()
            })
            .collect();

        Self { year, rows }
    }

    /// Cell for a day of month (1-31) and month (1-12)
    pub fn cell(&self, day: u32, month: u32) -> Option<&GridCell> {
        self.rows
            .get(day.checked_sub(1)? as usize)?
            .get(month.checked_sub(1)? as usize)
    }

    pub fn filled_count(&self) -> usize {
        self.rows
            .iter()
            .flatten()
            .filter(|c| c.mood.is_some())
            .count()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub mood: Option<MoodGrade>,
    pub is_selected: bool,
    pub is_today: bool,
}

/// Month view laid out Sunday-first
#[derive(Debug, Clone)]
pub struct MonthCalendar {
    pub year: i32,
    pub month: u32,
    /// Empty slots before the 1st
    pub leading_blanks: u32,
    pub days: Vec<CalendarDay>,
}

impl MonthCalendar {
    pub fn build(
        year: i32,
        month: u32,
        snapshot: &MoodSnapshot,
        selected: NaiveDate,
        today: NaiveDate,
    ) -> Option<Self> {
        let first = NaiveDate::from_ymd_opt(year, month, 1)?;
        let days = (1..=days_in_month(year, month))
            .filter_map(|day| NaiveDate::from_ymd_opt(year, month, day))
            .map(|date| CalendarDay {
                date,
                mood: snapshot.grade(date),
                is_selected: date == selected,
                is_today: date == today,
            })
            .collect();

        Some(Self {
            year,
            month,
            leading_blanks: first.weekday().num_days_from_sunday(),
            days,
        })
    }

    pub fn title(&self) -> String {
        format!("{} {}", MONTH_NAMES[(self.month - 1) as usize], self.year)
    }

    /// Rows of seven slots; `None` pads before the 1st and after the last day
    pub fn weeks(&self) -> Vec<Vec<Option<&CalendarDay>>> {
        let mut slots: Vec<Option<&CalendarDay>> = vec![None; self.leading_blanks as usize];
        slots.extend(self.days.iter().map(Some));
        while slots.len() % 7 != 0 {
            slots.push(None);
        }
        slots.chunks(7).map(|week| week.to_vec()).collect()
    }
}
