//! Error types for guessing.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GuessError {
    /// A configured time zone name is not a known IANA zone.
    #[error("unknown time zone: {0}")]
    UnknownZone(String),

    #[error("time zone list is empty")]
    EmptyZoneList,

    /// A date string that parsed with a zone abbreviation could not be
    /// re-anchored to the configured zone using that abbreviation.
    ///
    /// The wall clock reading already parsed once, so this points at an
    /// internal inconsistency rather than unrecognized input.
    #[error("cannot anchor {input:?} to {zone} after matching abbreviation {abbreviation}")]
    Disambiguation {
        input: String,
        zone: String,
        abbreviation: String,
    },

    /// No strategy produced a single guess for the token.
    #[error("could not classify {0:?}")]
    Unclassifiable(String),
}

pub type Result<T> = std::result::Result<T, GuessError>;
