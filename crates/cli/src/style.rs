//! Terminal rendering of guesses and calendars.
//!
//! Color is decided globally through `colored::control`; with the override
//! off every function here returns plain text.

use colored::Colorize;
use guess_core::{CalendarStyle, DayRole, Guess};

/// Indent of context lines under a guess.
const INDENT: &str = "    ";

/// Calendar cells: target day on red, today underlined, Sundays magenta.
#[derive(Debug, Clone, Copy, Default)]
pub struct ColoredCalendar;

impl CalendarStyle for ColoredCalendar {
    fn paint(&self, cell: &str, role: DayRole) -> String {
        match role {
            DayRole::Target => cell.on_red().bold().to_string(),
            DayRole::Today => cell.bold().underline().to_string(),
            DayRole::Sunday => cell.magenta().to_string(),
            DayRole::Plain => cell.to_string(),
        }
    }
}

/// Lines for one guess: optional score header, bold rendering with the
/// comment in parentheses, then indented context lines.
pub fn format_guess(guess: &Guess, scores: bool) -> Vec<String> {
    let mut lines = Vec::with_capacity(guess.additional.len() + 2);
    if scores {
        lines.push(
            format!("[goodness: {}, source: {}]", guess.goodness, guess.source)
                .dimmed()
                .to_string(),
        );
    }

    let mut headline = guess.rendering.bold().to_string();
    if let Some(comment) = &guess.comment {
        headline.push_str(&format!(" ({comment})"));
    }
    lines.push(headline);

    lines.extend(guess.additional.iter().map(|l| format!("{INDENT}{l}")));
    lines
}
