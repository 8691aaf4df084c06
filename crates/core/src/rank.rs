//! Ordering and filtering guesses for presentation.

use serde::Serialize;

use crate::types::Guess;

/// Shown instead of an empty result when every guess is unlikely.
pub const FALLBACK_NOTE: &str = "no good guesses, showing unlikely ones";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankOptions {
    /// Stable sort by descending goodness. Off keeps discovery order.
    pub sort: bool,
    /// Keep guesses with negative goodness.
    pub show_unlikely: bool,
}

impl Default for RankOptions {
    fn default() -> Self {
        Self {
            sort: true,
            show_unlikely: false,
        }
    }
}

/// What the caller should display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Selection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<&'static str>,
    pub guesses: Vec<Guess>,
}

/// Stable descending sort by goodness; equal scores keep discovery order.
#[must_use]
pub fn rank(mut guesses: Vec<Guess>, sort: bool) -> Vec<Guess> {
    if sort {
        guesses.sort_by(|a, b| b.goodness.cmp(&a.goodness));
    }
    guesses
}

/// Rank, then drop unlikely guesses unless that would leave nothing.
///
/// # Examples
///
/// ```
/// use guess_core::rank::{select, RankOptions};
///
/// let selection = select(Vec::new(), RankOptions::default());
/// assert!(selection.guesses.is_empty());
/// ```
#[must_use]
pub fn select(guesses: Vec<Guess>, options: RankOptions) -> Selection {
    let ranked = rank(guesses, options.sort);
    if options.show_unlikely {
        return Selection {
            note: None,
            guesses: ranked,
        };
    }

    let likely: Vec<Guess> = ranked.iter().filter(|g| g.is_likely()).cloned().collect();
    if likely.is_empty() && !ranked.is_empty() {
        Selection {
            note: Some(FALLBACK_NOTE),
            guesses: ranked,
        }
    } else {
        Selection {
            note: None,
            guesses: likely,
        }
    }
}
