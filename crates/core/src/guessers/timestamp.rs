//! UNIX timestamps.
//!
//! An integer is tried as seconds, milliseconds, microseconds and
//! nanoseconds since the epoch. Each reading is scored on its own by how
//! close it lands to now, which is what tells the resolutions apart.

use chrono::{DateTime, Utc};
use tracing::{debug, trace};

use super::{instant_guess, render_instant};
use crate::classify::Context;
use crate::types::Guess;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Seconds,
    Milliseconds,
    Microseconds,
    Nanoseconds,
}

impl Resolution {
    pub const ALL: [Resolution; 4] = [
        Self::Seconds,
        Self::Milliseconds,
        Self::Microseconds,
        Self::Nanoseconds,
    ];

    /// Units of this resolution per second.
    #[must_use]
    pub fn per_second(self) -> i64 {
        match self {
            Self::Seconds => 1,
            Self::Milliseconds => 1_000,
            Self::Microseconds => 1_000_000,
            Self::Nanoseconds => 1_000_000_000,
        }
    }

    #[must_use]
    pub fn source(self) -> &'static str {
        match self {
            Self::Seconds => "timestamp (seconds)",
            Self::Milliseconds => "timestamp (milliseconds)",
            Self::Microseconds => "timestamp (microseconds)",
            Self::Nanoseconds => "timestamp (nanoseconds)",
        }
    }

    /// The instant `value` denotes at this resolution, if representable.
    #[must_use]
    pub fn instant(self, value: i64) -> Option<DateTime<Utc>> {
        let per_second = self.per_second();
        let secs = value.div_euclid(per_second);
        let nanos = value.rem_euclid(per_second) * (1_000_000_000 / per_second);
        DateTime::from_timestamp(secs, u32::try_from(nanos).ok()?)
    }
}

/// Up to four guesses, one per resolution. Non-positive values yield none.
#[must_use]
pub fn guess_timestamp(value: i64, ctx: &Context<'_>) -> Vec<Guess> {
    if value <= 0 {
        trace!(value, "timestamp: rejected - not positive");
        return vec![];
    }

    let local = ctx.zones.local();
    Resolution::ALL
        .iter()
        .filter_map(|&resolution| {
            let Some(instant) = resolution.instant(value) else {
                trace!(value, ?resolution, "timestamp: out of range");
                return None;
            };
            let shown = instant.with_timezone(&local);
            let guess = instant_guess(
                format!("Timestamp {value} is {}", render_instant(&shown)),
                resolution.source(),
                instant,
                shown.date_naive(),
                ctx,
            );
            debug!(value, ?resolution, goodness = guess.goodness, "timestamp: candidate");
            Some(guess)
        })
        .collect()
}
