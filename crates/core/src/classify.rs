//! Token classification.
//!
//! Every [`Strategy`] is tried on every token; none of them short-circuits
//! another. Their guesses are concatenated in [`Strategy::ALL`] order.

use chrono::{DateTime, NaiveDate, Utc};
use tracing::{debug, trace};

use crate::calendar::CalendarStyle;
use crate::dns::Resolver;
use crate::error::{GuessError, Result};
use crate::guessers::{
    guess_byte_size, guess_bytes_with_unit, guess_confident_date, guess_ip, guess_naive_dates,
    guess_timestamp,
};
use crate::types::Guess;
use crate::zones::TimeZones;

/// Everything a classification pass reads besides the token itself.
pub struct Context<'a> {
    pub zones: &'a TimeZones,
    /// Read once by the caller; every guess in the pass is relative to it.
    pub now: DateTime<Utc>,
    pub resolver: &'a dyn Resolver,
    pub style: &'a dyn CalendarStyle,
}

impl Context<'_> {
    /// The caller's current day in the local zone.
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        self.now.with_timezone(&self.zones.local()).date_naive()
    }
}

/// One way of reading a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Plain integer: byte count and UNIX timestamps.
    Integer,
    /// The word `now`: the current instant as a timestamp.
    Now,
    /// Date string with an offset or zone abbreviation.
    ConfidentDate,
    /// Date string without a zone, read in the local zone.
    NaiveDate,
    IpLiteral,
    /// Number with a byte unit suffix.
    UnitSuffix,
}

impl Strategy {
    /// Dispatch order.
    pub const ALL: [Strategy; 6] = [
        Self::Integer,
        Self::Now,
        Self::ConfidentDate,
        Self::NaiveDate,
        Self::IpLiteral,
        Self::UnitSuffix,
    ];

    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            Self::Integer => "integer",
            Self::Now => "now",
            Self::ConfidentDate => "confident-date",
            Self::NaiveDate => "naive-date",
            Self::IpLiteral => "ip",
            Self::UnitSuffix => "unit-suffix",
        }
    }

    /// Guesses this strategy finds in `token`. A miss is an empty list.
    pub fn run(self, token: &str, ctx: &Context<'_>) -> Result<Vec<Guess>> {
        let guesses = match self {
            Self::Integer => match token.parse::<i64>() {
                Ok(n) => {
                    let mut guesses = Vec::new();
                    if let Ok(bytes) = u64::try_from(n) {
                        guesses.push(guess_byte_size(bytes));
                    }
                    guesses.extend(guess_timestamp(n, ctx));
                    guesses
                }
                Err(e) => {
                    trace!(token, error = %e, "integer: no match");
                    vec![]
                }
            },
            Self::Now => {
                if token.eq_ignore_ascii_case("now") {
                    guess_timestamp(ctx.now.timestamp(), ctx)
                } else {
                    vec![]
                }
            }
            Self::ConfidentDate => guess_confident_date(token, ctx)?.into_iter().collect(),
            Self::NaiveDate => guess_naive_dates(token, ctx),
            Self::IpLiteral => guess_ip(token, ctx.resolver).into_iter().collect(),
            Self::UnitSuffix => guess_bytes_with_unit(token).into_iter().collect(),
        };
        Ok(guesses)
    }
}

/// All guesses for `token`, in discovery order.
///
/// Surrounding whitespace is ignored. Fails with
/// [`GuessError::Unclassifiable`] when no strategy matched, and with
/// [`GuessError::Disambiguation`] when a zone abbreviation could not be
/// re-anchored.
pub fn classify(token: &str, ctx: &Context<'_>) -> Result<Vec<Guess>> {
    let token = token.trim();
    let mut guesses = Vec::new();
    for strategy in Strategy::ALL {
        let found = strategy.run(token, ctx)?;
        if !found.is_empty() {
            debug!(strategy = strategy.id(), count = found.len(), "classify: matched");
        }
        guesses.extend(found);
    }

    if guesses.is_empty() {
        debug!(token, "classify: nothing matched");
        return Err(GuessError::Unclassifiable(token.to_string()));
    }
    Ok(guesses)
}
