//! Guess Core
//!
//! Give it one ambiguous token (`1443346122`, `8TiB`, `2015-09-26 11:29:43 PDT`,
//! `192.0.2.1`) and get back every plausible reading of it: byte counts, UNIX
//! timestamps at four resolutions, dates with or without a zone, IP addresses.
//! Each reading is a [`Guess`] with a rendering, context lines and a goodness
//! score.
//!
//! # Quick Start
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use guess_core::{dns::NoResolver, Guesser, RankOptions, TimeZones};
//!
//! let zones = TimeZones::parse("America/Los_Angeles,UTC", chrono_tz::UTC).unwrap();
//! let guesser = Guesser::new(zones).with_resolver(NoResolver);
//! let now = Utc.with_ymd_and_hms(2015, 9, 27, 9, 29, 35).unwrap();
//!
//! let selection = guesser
//!     .guess_ranked("1443346122", now, RankOptions::default())
//!     .unwrap();
//!
//! // The best guess is first.
//! let best = &selection.guesses[0];
//! assert_eq!(best.source, "timestamp (seconds)");
//! assert_eq!(best.comment.as_deref(), Some("within the minute, 53 seconds ago"));
//! ```

pub mod calendar;
pub mod classify;
pub mod dns;
pub mod error;
pub mod guessers;
pub mod layout;
pub mod rank;
pub mod relative;
pub mod types;
pub mod zones;

pub use calendar::{CalendarStyle, DayRole, PlainStyle};
pub use classify::{classify, Context, Strategy};
pub use dns::{LookupError, Resolver, SystemResolver};
pub use error::{GuessError, Result};
pub use rank::{RankOptions, Selection};
pub use types::{Guess, GuessValue};
pub use zones::{TimeZones, Tz, DEFAULT_ZONES};

use chrono::{DateTime, Utc};

/// Main entry point: a zone configuration plus its collaborators.
pub struct Guesser {
    zones: TimeZones,
    resolver: Box<dyn Resolver>,
    style: Box<dyn CalendarStyle>,
}

impl Guesser {
    /// Guesser using the system resolver and undecorated calendars.
    #[must_use]
    pub fn new(zones: TimeZones) -> Self {
        Self {
            zones,
            resolver: Box::new(SystemResolver::default()),
            style: Box::new(PlainStyle),
        }
    }

    /// Replace the DNS collaborator.
    #[must_use]
    pub fn with_resolver(mut self, resolver: impl Resolver + 'static) -> Self {
        self.resolver = Box::new(resolver);
        self
    }

    /// Replace the calendar decoration.
    #[must_use]
    pub fn with_calendar_style(mut self, style: impl CalendarStyle + 'static) -> Self {
        self.style = Box::new(style);
        self
    }

    #[must_use]
    pub fn zones(&self) -> &TimeZones {
        &self.zones
    }

    /// Every guess for `token`, in discovery order.
    pub fn guess(&self, token: &str, now: DateTime<Utc>) -> Result<Vec<Guess>> {
        let ctx = Context {
            zones: &self.zones,
            now,
            resolver: &*self.resolver,
            style: &*self.style,
        };
        classify(token, &ctx)
    }

    /// Guesses for `token`, ranked and filtered for display.
    pub fn guess_ranked(
        &self,
        token: &str,
        now: DateTime<Utc>,
        options: RankOptions,
    ) -> Result<Selection> {
        Ok(rank::select(self.guess(token, now)?, options))
    }
}
