//! Built-in guessers.
//!
//! Each guesser is a plain function from an already-recognized value (an
//! integer, a parsed date, an IP address) to the guesses it implies. The
//! classifier decides which ones apply.

mod bytesize;
mod date;
mod ipaddr;
mod timestamp;

pub use bytesize::{
    byte_breakdown, guess_byte_size, guess_bytes_with_unit, unit_goodness, ByteUnit, BYTE_UNITS,
};
pub use date::{
    guess_confident_date, guess_naive_dates, ConfidentLayout, NaiveLayout, ZoneSpec, CONFIDENT_LAYOUTS,
    NAIVE_LAYOUTS,
};
pub use ipaddr::guess_ip;
pub use timestamp::{guess_timestamp, Resolution};

use std::fmt::Display;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use crate::calendar::MonthGrid;
use crate::classify::Context;
use crate::layout::side_by_side;
use crate::relative::assess;
use crate::types::{Guess, GuessValue};

/// Render an instant as wall clock, numeric offset and zone name,
/// e.g. `2015-09-26 11:29:43 -0700 PDT`.
pub(crate) fn render_instant<Z: TimeZone>(instant: &DateTime<Z>) -> String
where
    Z::Offset: Display,
{
    instant.format("%Y-%m-%d %H:%M:%S%.f %z %Z").to_string()
}

/// Guess for a fully determined instant: narrative, zone table, UNIX
/// timestamp and, when it is close enough to matter, a calendar.
///
/// `calendar_day` is the day to mark, in whatever zone `rendering` shows.
pub(crate) fn instant_guess(
    rendering: String,
    source: impl Into<String>,
    instant: DateTime<Utc>,
    calendar_day: NaiveDate,
    ctx: &Context<'_>,
) -> Guess {
    let (narrative, relevance) = assess(instant, ctx.now);

    let mut lines = Vec::new();
    if relevance.zone_table {
        lines.push("In other time zones:".to_string());
        lines.extend(ctx.zones.zones().iter().map(|tz| {
            format!("{} ({})", render_instant(&instant.with_timezone(tz)), tz)
        }));
    }
    lines.push(format!("UNIX timestamp: {}", instant.timestamp()));

    let additional = if relevance.calendar {
        let cal = MonthGrid::new(calendar_day, ctx.today()).lines(ctx.style);
        side_by_side(&lines, &cal)
    } else {
        lines
    };

    Guess::new(rendering, source, relevance.goodness, GuessValue::Instant(instant))
        .with_comment(narrative)
        .with_additional(additional)
}
