//! ASCII month calendar.
//!
//! ```text
//!    September 2015
//! Mo Tu We Th Fr Sa Su
//!     1  2  3  4  5  6
//!  7  8  9 10 11 12 13
//! 14 15 16 17 18 19 20
//! 21 22 23 24 25 26 27
//! 28 29 30
//! ```
//!
//! Layout and decoration are separate: [`MonthGrid`] knows which role each
//! cell plays, a [`CalendarStyle`] decides how that role looks. Styles must
//! not change the two-column cell width.

use chrono::{Datelike, NaiveDate, Weekday};

const WIDTH: usize = 20;
const WEEKDAYS: &str = "Mo Tu We Th Fr Sa Su";

/// What a day cell means to the reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayRole {
    /// The day the guess points at.
    Target,
    /// The caller's current day, when the month is the current month.
    Today,
    Sunday,
    Plain,
}

/// Decoration applied to each rendered day cell.
pub trait CalendarStyle {
    /// Decorate a two-character cell. The visible width must stay the same.
    fn paint(&self, cell: &str, role: DayRole) -> String;
}

/// No decoration.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainStyle;

impl CalendarStyle for PlainStyle {
    fn paint(&self, cell: &str, _role: DayRole) -> String {
        cell.to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCell {
    pub day: u32,
    pub role: DayRole,
}

/// Weeks of one month, Monday first. Leading days of the previous month are
/// `None`; the last week stops at the end of the month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    title: String,
    weeks: Vec<Vec<Option<DayCell>>>,
}

impl MonthGrid {
    /// Lay out the month containing `target`. `today` is only marked when it
    /// falls in the same month.
    #[must_use]
    pub fn new(target: NaiveDate, today: NaiveDate) -> Self {
        let first = target.with_day(1).unwrap_or(target);
        let current_month = today.year() == target.year() && today.month() == target.month();

        let mut weeks = Vec::new();
        let mut week = vec![None; first.weekday().num_days_from_monday() as usize];
        for date in first.iter_days().take_while(|d| d.month() == target.month()) {
            let role = if date == target {
                DayRole::Target
            } else if current_month && date == today {
                DayRole::Today
            } else if date.weekday() == Weekday::Sun {
                DayRole::Sunday
            } else {
                DayRole::Plain
            };
            week.push(Some(DayCell {
                day: date.day(),
                role,
            }));
            if week.len() == 7 {
                weeks.push(std::mem::take(&mut week));
            }
        }
        if !week.is_empty() {
            weeks.push(week);
        }

        Self {
            title: target.format("%B %Y").to_string(),
            weeks,
        }
    }

    #[must_use]
    pub fn weeks(&self) -> &[Vec<Option<DayCell>>] {
        &self.weeks
    }

    /// Render the header, weekday line and one line per week.
    #[must_use]
    pub fn lines(&self, style: &dyn CalendarStyle) -> Vec<String> {
        let pad = WIDTH.saturating_sub(self.title.len()) / 2;
        let mut lines = vec![
            format!("{}{}", " ".repeat(pad), self.title),
            WEEKDAYS.to_string(),
        ];
        lines.extend(self.weeks.iter().map(|week| {
            week.iter()
                .map(|cell| match cell {
                    Some(c) => style.paint(&format!("{:2}", c.day), c.role),
                    None => "  ".to_string(),
                })
                .collect::<Vec<_>>()
                .join(" ")
        }));
        lines
    }
}

/// Plain calendar for the month containing `date`.
#[must_use]
pub fn calendar(date: NaiveDate) -> Vec<String> {
    MonthGrid::new(date, date).lines(&PlainStyle)
}
