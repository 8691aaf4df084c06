//! Core types for guess.
//!
//! A [`Guess`] is one candidate reading of an input token. Guessers build
//! them once; ranking reorders them but never changes their contents.

use std::net::IpAddr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The typed value behind a guess.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum GuessValue {
    Bytes(u64),
    Instant(DateTime<Utc>),
    Ip(IpAddr),
}

impl GuessValue {
    /// Returns the type name as a string.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Bytes(_) => "bytes",
            Self::Instant(_) => "instant",
            Self::Ip(_) => "ip",
        }
    }
}

/// A possible interpretation of the input token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Guess {
    /// Primary human-readable line. Never empty.
    pub rendering: String,
    /// Short qualifier, usually the relative-time narrative.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Context lines: zone tables, calendars, DNS notes.
    #[serde(default)]
    pub additional: Vec<String>,
    /// Which heuristic produced this guess.
    pub source: String,
    /// Higher is more plausible. Negative guesses are hidden by default.
    pub goodness: i32,
    pub value: GuessValue,
}

impl Guess {
    pub(crate) fn new(
        rendering: impl Into<String>,
        source: impl Into<String>,
        goodness: i32,
        value: GuessValue,
    ) -> Self {
        let rendering = rendering.into();
        debug_assert!(!rendering.is_empty(), "guess rendering must not be empty");
        Self {
            rendering,
            comment: None,
            additional: Vec::new(),
            source: source.into(),
            goodness,
            value,
        }
    }

    pub(crate) fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub(crate) fn with_additional(mut self, additional: Vec<String>) -> Self {
        self.additional = additional;
        self
    }

    /// Whether the guess passes the default (likely-only) filter.
    #[must_use]
    pub fn is_likely(&self) -> bool {
        self.goodness >= 0
    }
}
