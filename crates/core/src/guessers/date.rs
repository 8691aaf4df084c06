//! Date strings, with or without a time zone.
//!
//! Confident layouts carry a zone: a numeric offset, an abbreviation, or
//! both. The first confident layout that matches produces a single guess.
//!
//! Naive layouts carry none. Their wall clock reading is interpreted in the
//! local zone, and additionally as if it had been written in each configured
//! zone, which answers "if someone in Sydney wrote this, when is that for me?".

use chrono::{DateTime, FixedOffset, LocalResult, NaiveDateTime, Offset, TimeDelta, TimeZone, Utc};
use chrono_tz::Tz;
use tracing::{debug, trace};

use super::{instant_guess, render_instant};
use crate::calendar::MonthGrid;
use crate::classify::Context;
use crate::error::{GuessError, Result};
use crate::layout::side_by_side;
use crate::relative::assess;
use crate::types::{Guess, GuessValue};

/// Marks the whitespace-separated zone abbreviation token in a pattern.
const ZONE: &str = "%Z";

/// Abbreviations that really do mean a zero offset.
const UTC_NAMES: [&str; 4] = ["UTC", "GMT", "UT", "Z"];

/// How a confident layout states its zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneSpec {
    /// RFC 3339 with an optional fraction, parsed by chrono directly.
    Rfc3339,
    /// Numeric offset (`%z`).
    Offset,
    /// Zone abbreviation only (`PDT`), no offset.
    Abbreviation,
    /// Numeric offset followed by an abbreviation.
    OffsetAndAbbreviation,
}

#[derive(Debug, Clone, Copy)]
pub struct ConfidentLayout {
    pub name: &'static str,
    pub pattern: &'static str,
    pub zone: ZoneSpec,
}

#[derive(Debug, Clone, Copy)]
pub struct NaiveLayout {
    pub name: &'static str,
    pub pattern: &'static str,
}

pub const CONFIDENT_LAYOUTS: [ConfidentLayout; 13] = [
    ConfidentLayout {
        name: "RFC 3339",
        pattern: "",
        zone: ZoneSpec::Rfc3339,
    },
    ConfidentLayout {
        name: "RFC 1123 with offset",
        pattern: "%a, %d %b %Y %H:%M:%S %z",
        zone: ZoneSpec::Offset,
    },
    ConfidentLayout {
        name: "RFC 1123",
        pattern: "%a, %d %b %Y %H:%M:%S %Z",
        zone: ZoneSpec::Abbreviation,
    },
    ConfidentLayout {
        name: "RFC 850",
        pattern: "%A, %d-%b-%y %H:%M:%S %Z",
        zone: ZoneSpec::Abbreviation,
    },
    ConfidentLayout {
        name: "RFC 822 with offset",
        pattern: "%d %b %y %H:%M %z",
        zone: ZoneSpec::Offset,
    },
    ConfidentLayout {
        name: "RFC 822",
        pattern: "%d %b %y %H:%M %Z",
        zone: ZoneSpec::Abbreviation,
    },
    ConfidentLayout {
        name: "Ruby date",
        pattern: "%a %b %d %H:%M:%S %z %Y",
        zone: ZoneSpec::Offset,
    },
    ConfidentLayout {
        name: "Unix date",
        pattern: "%a %b %e %H:%M:%S %Z %Y",
        zone: ZoneSpec::Abbreviation,
    },
    ConfidentLayout {
        name: "offset and zone",
        pattern: "%Y-%m-%d %H:%M:%S%.f %z %Z",
        zone: ZoneSpec::OffsetAndAbbreviation,
    },
    ConfidentLayout {
        name: "YYYY-MM-DD hh:mm:ss zone",
        pattern: "%Y-%m-%d %H:%M:%S %Z",
        zone: ZoneSpec::Abbreviation,
    },
    ConfidentLayout {
        name: "YYYY-MM-DD hh:mm zone",
        pattern: "%Y-%m-%d %H:%M %Z",
        zone: ZoneSpec::Abbreviation,
    },
    ConfidentLayout {
        name: "YYYY/MM/DD hh:mm:ss zone",
        pattern: "%Y/%m/%d %H:%M:%S%.f %Z",
        zone: ZoneSpec::Abbreviation,
    },
    ConfidentLayout {
        name: "YYYY/MM/DD-hh:mm:ss zone",
        pattern: "%Y/%m/%d-%H:%M:%S%.f %Z",
        zone: ZoneSpec::Abbreviation,
    },
];

pub const NAIVE_LAYOUTS: [NaiveLayout; 10] = [
    NaiveLayout {
        name: "ANSI C",
        pattern: "%a %b %e %H:%M:%S %Y",
    },
    NaiveLayout {
        name: "Mon DD YYYY hh:mm:ss",
        pattern: "%b %e %Y %H:%M:%S",
    },
    NaiveLayout {
        name: "YYYY-MM-DD hh:mm:ss",
        pattern: "%Y-%m-%d %H:%M:%S",
    },
    NaiveLayout {
        name: "YYYY-MM-DD hh:mm",
        pattern: "%Y-%m-%d %H:%M",
    },
    NaiveLayout {
        name: "ISO 8601 without zone",
        pattern: "%Y-%m-%dT%H:%M:%S",
    },
    NaiveLayout {
        name: "MM/DD/YYYY hh:mm:ss",
        pattern: "%m/%d/%Y %H:%M:%S",
    },
    NaiveLayout {
        name: "DD/MM/YYYY hh:mm:ss",
        pattern: "%d/%m/%Y %H:%M:%S",
    },
    NaiveLayout {
        name: "YYYY/MM/DD hh:mm:ss",
        pattern: "%Y/%m/%d %H:%M:%S%.f",
    },
    NaiveLayout {
        name: "YYYY/MM/DD-hh:mm:ss",
        pattern: "%Y/%m/%d-%H:%M:%S%.f",
    },
    NaiveLayout {
        name: "YYYYMMDDhhmmss",
        pattern: "%Y%m%d%H%M%S",
    },
];

/// Result of matching a confident layout.
enum Reading {
    /// Offset known; the label is the zone name to show, if any.
    Zoned(DateTime<FixedOffset>, Option<String>),
    /// Only an abbreviation; the offset still has to be found.
    Abbreviated(NaiveDateTime, String),
}

/// Zone-aware guess from the first confident layout that matches.
///
/// Fails only when an abbreviation matched a configured zone but the wall
/// clock reading could not be placed in that zone.
pub fn guess_confident_date(token: &str, ctx: &Context<'_>) -> Result<Option<Guess>> {
    for layout in &CONFIDENT_LAYOUTS {
        let Some(reading) = parse_confident(token, layout) else {
            trace!(layout = layout.name, "date: no match");
            continue;
        };
        let (instant, label) = match reading {
            Reading::Zoned(instant, label) => (instant, label),
            Reading::Abbreviated(naive, abbreviation) => {
                anchor_abbreviation(token, naive, abbreviation, ctx)?
            }
        };
        debug!(layout = layout.name, %instant, "date: matched with zone");

        let stamp = instant.format("%Y-%m-%d %H:%M:%S%.f %z");
        let rendering = match label {
            Some(label) => format!("{stamp} {label}"),
            None => stamp.to_string(),
        };
        return Ok(Some(instant_guess(
            rendering,
            "date string with timezone",
            instant.with_timezone(&Utc),
            instant.date_naive(),
            ctx,
        )));
    }
    Ok(None)
}

/// One guess per naive layout that matches, read in the local zone.
#[must_use]
pub fn guess_naive_dates(token: &str, ctx: &Context<'_>) -> Vec<Guess> {
    NAIVE_LAYOUTS
        .iter()
        .filter_map(|layout| match NaiveDateTime::parse_from_str(token, layout.pattern) {
            Ok(reading) => {
                debug!(layout = layout.name, %reading, "date: matched without zone");
                naive_guess(reading, layout, ctx)
            }
            Err(e) => {
                trace!(layout = layout.name, error = %e, "date: no match");
                None
            }
        })
        .collect()
}

fn parse_confident(token: &str, layout: &ConfidentLayout) -> Option<Reading> {
    match layout.zone {
        ZoneSpec::Rfc3339 => DateTime::parse_from_rfc3339(token)
            .ok()
            .map(|dt| Reading::Zoned(dt, None)),
        ZoneSpec::Offset => DateTime::parse_from_str(token, layout.pattern)
            .ok()
            .map(|dt| Reading::Zoned(dt, None)),
        ZoneSpec::Abbreviation => {
            let (rest, pattern, abbreviation) = split_zone(token, layout.pattern)?;
            NaiveDateTime::parse_from_str(&rest, &pattern)
                .ok()
                .map(|naive| Reading::Abbreviated(naive, abbreviation))
        }
        ZoneSpec::OffsetAndAbbreviation => {
            let (rest, pattern, abbreviation) = split_zone(token, layout.pattern)?;
            DateTime::parse_from_str(&rest, &pattern)
                .ok()
                .map(|dt| Reading::Zoned(dt, Some(abbreviation)))
        }
    }
}

/// Cut the zone abbreviation token out of both the input and the pattern.
///
/// Returns the input without it, the pattern without it, and the
/// abbreviation. Token counts must agree for the layout to apply at all.
fn split_zone(token: &str, pattern: &str) -> Option<(String, String, String)> {
    let pattern_parts: Vec<&str> = pattern.split_whitespace().collect();
    let token_parts: Vec<&str> = token.split_whitespace().collect();
    if pattern_parts.len() != token_parts.len() {
        return None;
    }
    let at = pattern_parts.iter().position(|p| *p == ZONE)?;
    let abbreviation = token_parts[at];
    if !is_abbreviation(abbreviation) {
        return None;
    }

    let without = |parts: &[&str]| {
        parts
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != at)
            .map(|(_, p)| *p)
            .collect::<Vec<_>>()
            .join(" ")
    };
    Some((
        without(&token_parts),
        without(&pattern_parts),
        abbreviation.to_string(),
    ))
}

fn is_abbreviation(s: &str) -> bool {
    UTC_NAMES.contains(&s)
        || ((3..=5).contains(&s.len()) && s.chars().all(|c| c.is_ascii_uppercase()))
}

/// Give an abbreviation-only reading a real offset.
///
/// A bare abbreviation carries no offset, so on its own the reading lands
/// at +00:00. If a configured zone currently goes by that abbreviation, the
/// reading is re-anchored in that zone instead. The offset is the one the
/// abbreviation stands for, even when the zone observes a different one on
/// the parsed date (`PST` in July is still -08:00).
fn anchor_abbreviation(
    token: &str,
    naive: NaiveDateTime,
    abbreviation: String,
    ctx: &Context<'_>,
) -> Result<(DateTime<FixedOffset>, Option<String>)> {
    if !UTC_NAMES.contains(&abbreviation.as_str()) {
        for tz in ctx.zones.zones() {
            let current = ctx.now.with_timezone(tz);
            if current.format("%Z").to_string() != abbreviation {
                continue;
            }
            let named = |dt: &DateTime<Tz>| dt.format("%Z").to_string() == abbreviation;
            let anchored = match tz.from_local_datetime(&naive) {
                LocalResult::Single(dt) if named(&dt) => Some(dt.fixed_offset()),
                LocalResult::Ambiguous(early, _) if named(&early) => Some(early.fixed_offset()),
                LocalResult::Ambiguous(_, late) if named(&late) => Some(late.fixed_offset()),
                LocalResult::Single(_) | LocalResult::Ambiguous(..) => {
                    debug!(
                        %abbreviation,
                        zone = %tz,
                        "date: zone uses another abbreviation on that date"
                    );
                    current.offset().fix().from_local_datetime(&naive).single()
                }
                LocalResult::None => None,
            };
            return match anchored {
                Some(dt) => {
                    debug!(%abbreviation, zone = %tz, "date: anchored abbreviation to zone");
                    Ok((dt, Some(abbreviation)))
                }
                None => Err(GuessError::Disambiguation {
                    input: token.to_string(),
                    zone: tz.to_string(),
                    abbreviation,
                }),
            };
        }
        debug!(%abbreviation, "date: abbreviation matches no configured zone, keeping +00:00");
    }
    Ok((naive.and_utc().fixed_offset(), Some(abbreviation)))
}

/// Wall clock reading in `tz`. Ambiguous readings take the earlier instant.
/// Readings skipped by a forward DST change keep the offset in effect just
/// before it, so `02:30` on a spring-forward night lands at `03:30`.
fn place(tz: Tz, reading: NaiveDateTime) -> Option<DateTime<Tz>> {
    if let Some(dt) = tz.from_local_datetime(&reading).earliest() {
        return Some(dt);
    }
    let before = tz.from_local_datetime(&(reading - TimeDelta::hours(1))).earliest()?;
    let dt = before.offset().fix().from_local_datetime(&reading).single()?;
    trace!(%reading, zone = %tz, "date: reading falls in a DST gap, using the earlier offset");
    Some(dt.with_timezone(&tz))
}

fn naive_guess(reading: NaiveDateTime, layout: &NaiveLayout, ctx: &Context<'_>) -> Option<Guess> {
    let local = ctx.zones.local();
    let Some(here) = place(local, reading) else {
        trace!(%reading, zone = %local, "date: reading does not exist in local zone");
        return None;
    };
    let (narrative, relevance) = assess(here.with_timezone(&Utc), ctx.now);

    let mut lines: Vec<String> = ctx
        .zones
        .zones()
        .iter()
        .filter_map(|tz| {
            let Some(there) = place(*tz, reading) else {
                trace!(%reading, zone = %tz, "date: reading does not exist in zone");
                return None;
            };
            let mut line = format!(
                "From {} ({}): {}",
                there.format("%Z"),
                tz,
                render_instant(&there.with_timezone(&local))
            );
            if !relevance.calendar {
                let (there_narrative, _) = assess(there.with_timezone(&Utc), ctx.now);
                line.push_str(&format!(" ({there_narrative})"));
            }
            Some(line)
        })
        .collect();
    lines.push(format!("As UNIX timestamp: {}", reading.and_utc().timestamp()));

    let additional = if relevance.calendar {
        let cal = MonthGrid::new(here.date_naive(), ctx.today()).lines(ctx.style);
        side_by_side(&lines, &cal)
    } else {
        lines
    };

    Some(
        Guess::new(
            format!("In local time: {}", render_instant(&here)),
            format!("date string without timezone ({})", layout.name),
            relevance.goodness,
            GuessValue::Instant(here.with_timezone(&Utc)),
        )
        .with_comment(narrative)
        .with_additional(additional),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::PlainStyle;
    use crate::dns::NoResolver;
    use crate::zones::TimeZones;
    use pretty_assertions::assert_eq;

    fn zones() -> TimeZones {
        TimeZones::parse("America/Los_Angeles,UTC", chrono_tz::UTC).unwrap()
    }

    fn ctx_at(zones: &TimeZones, now: DateTime<Utc>) -> Context<'_> {
        Context {
            zones,
            now,
            resolver: &NoResolver,
            style: &PlainStyle,
        }
    }

    fn summer() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2015, 9, 27, 9, 29, 35).unwrap()
    }

    fn instant(g: &Guess) -> DateTime<Utc> {
        match g.value {
            GuessValue::Instant(i) => i,
            ref other => panic!("expected instant, got {other:?}"),
        }
    }

    #[test]
    fn test_abbreviation_is_anchored_to_configured_zone() {
        let zones = zones();
        let g = guess_confident_date("2015-09-26 11:29:43 PDT", &ctx_at(&zones, summer()))
            .unwrap()
            .unwrap();
        assert_eq!(g.rendering, "2015-09-26 11:29:43 -0700 PDT");
        assert_eq!(
            instant(&g),
            Utc.with_ymd_and_hms(2015, 9, 26, 18, 29, 43).unwrap()
        );
        assert_eq!(
            g.comment.as_deref(),
            Some("within the day, 14 hours 59 minutes 52 seconds ago")
        );
        assert_eq!(g.goodness, 150);
        assert_eq!(g.source, "date string with timezone");
    }

    #[test]
    fn test_unmatched_abbreviation_keeps_zero_offset() {
        // In December Los Angeles says PST, so PDT matches nothing.
        let zones = zones();
        let winter = Utc.with_ymd_and_hms(2015, 12, 1, 0, 0, 0).unwrap();
        let g = guess_confident_date("2015-09-26 11:29:43 PDT", &ctx_at(&zones, winter))
            .unwrap()
            .unwrap();
        assert_eq!(g.rendering, "2015-09-26 11:29:43 +0000 PDT");
    }

    #[test]
    fn test_utc_abbreviation_is_not_disambiguated() {
        let zones = zones();
        let g = guess_confident_date("2015-09-27 09:29 UTC", &ctx_at(&zones, summer()))
            .unwrap()
            .unwrap();
        assert_eq!(g.rendering, "2015-09-27 09:29:00 +0000 UTC");
        assert_eq!(g.comment.as_deref(), Some("within the minute, 35 seconds ago"));
    }

    #[test]
    fn test_short_utc_names() {
        let zones = zones();
        let ctx = ctx_at(&zones, summer());
        for token in ["2015-09-27 09:28:42 UT", "2015-09-27 09:28:42 Z"] {
            let g = guess_confident_date(token, &ctx).unwrap().unwrap();
            assert_eq!(
                instant(&g),
                Utc.with_ymd_and_hms(2015, 9, 27, 9, 28, 42).unwrap(),
                "{token}"
            );
        }
    }

    #[test]
    fn test_rfc3339() {
        let zones = zones();
        let g = guess_confident_date("2015-09-27T09:28:42Z", &ctx_at(&zones, summer()))
            .unwrap()
            .unwrap();
        assert_eq!(g.rendering, "2015-09-27 09:28:42 +0000");
        assert_eq!(g.goodness, 200);
        assert_eq!(
            g.additional,
            vec![
                "In other time zones:",
                "2015-09-27 02:28:42 -0700 PDT (America/Los_Angeles)",
                "2015-09-27 09:28:42 +0000 UTC (UTC)",
                "UNIX timestamp: 1443346122",
            ]
        );
    }

    #[test]
    fn test_numeric_offset_layouts() {
        let zones = zones();
        let ctx = ctx_at(&zones, summer());
        let expected = Utc.with_ymd_and_hms(2015, 9, 27, 9, 28, 42).unwrap();
        for token in [
            "Sun, 27 Sep 2015 02:28:42 -0700",
            "Sun Sep 27 02:28:42 -0700 2015",
            "2015-09-27 11:28:42.000 +0200 CEST",
        ] {
            let g = guess_confident_date(token, &ctx).unwrap().unwrap();
            assert_eq!(instant(&g), expected, "{token}");
        }
    }

    #[test]
    fn test_unix_date_with_abbreviation_in_the_middle() {
        let zones = zones();
        let g = guess_confident_date("Sun Sep 27 02:28:42 PDT 2015", &ctx_at(&zones, summer()))
            .unwrap()
            .unwrap();
        assert_eq!(g.rendering, "2015-09-27 02:28:42 -0700 PDT");
    }

    #[test]
    fn test_abbreviation_offset_wins_across_dst_change() {
        // PST is -08:00 even for a July wall clock in Los Angeles.
        let zones = zones();
        let january = Utc.with_ymd_and_hms(2015, 1, 15, 0, 0, 0).unwrap();
        let g = guess_confident_date("2015-07-01 10:00:00 PST", &ctx_at(&zones, january))
            .unwrap()
            .unwrap();
        assert_eq!(g.rendering, "2015-07-01 10:00:00 -0800 PST");
        assert_eq!(
            instant(&g),
            Utc.with_ymd_and_hms(2015, 7, 1, 18, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_ambiguous_wall_clock_picks_named_candidate() {
        // 01:30 on 2015-11-01 happened twice in Los Angeles.
        let zones = zones();
        let november = Utc.with_ymd_and_hms(2015, 11, 15, 0, 0, 0).unwrap();
        let g = guess_confident_date("2015-11-01 01:30:00 PST", &ctx_at(&zones, november))
            .unwrap()
            .unwrap();
        assert_eq!(
            instant(&g),
            Utc.with_ymd_and_hms(2015, 11, 1, 9, 30, 0).unwrap()
        );
    }

    #[test]
    fn test_reanchor_into_dst_gap_is_an_internal_error() {
        // 02:30 on 2015-03-08 never happened in Los Angeles.
        let zones = zones();
        let january = Utc.with_ymd_and_hms(2015, 1, 15, 0, 0, 0).unwrap();
        let err = guess_confident_date("2015-03-08 02:30:00 PST", &ctx_at(&zones, january))
            .unwrap_err();
        assert_eq!(
            err,
            GuessError::Disambiguation {
                input: "2015-03-08 02:30:00 PST".to_string(),
                zone: "America/Los_Angeles".to_string(),
                abbreviation: "PST".to_string(),
            }
        );
    }

    #[test]
    fn test_not_a_zoned_date() {
        let zones = zones();
        let ctx = ctx_at(&zones, summer());
        for token in ["1443346122", "2015-09-26 11:29:43", "2015-09-26 11:29:43 pdt", "hello"] {
            assert!(guess_confident_date(token, &ctx).unwrap().is_none(), "{token}");
        }
    }

    #[test]
    fn test_naive_date_reinterpreted_per_zone() {
        let zones = zones();
        let guesses = guess_naive_dates("2015-09-26 11:29:43", &ctx_at(&zones, summer()));
        assert_eq!(guesses.len(), 1);
        let g = &guesses[0];
        assert_eq!(g.rendering, "In local time: 2015-09-26 11:29:43 +0000 UTC");
        assert_eq!(g.source, "date string without timezone (YYYY-MM-DD hh:mm:ss)");
        assert_eq!(g.goodness, 150);
        assert_eq!(
            g.additional,
            vec![
                "From PDT (America/Los_Angeles): 2015-09-26 18:29:43 +0000 UTC (within the day, 14 hours 59 minutes 52 seconds ago)",
                "From UTC (UTC): 2015-09-26 11:29:43 +0000 UTC (within the day, 21 hours 59 minutes 52 seconds ago)",
                "As UNIX timestamp: 1443266983",
            ]
        );
    }

    #[test]
    fn test_naive_reading_in_local_dst_gap_is_kept() {
        // 02:30 on 2015-03-08 never happened in Los Angeles.
        let zones = TimeZones::parse("America/Los_Angeles,UTC", chrono_tz::America::Los_Angeles)
            .unwrap();
        let march = Utc.with_ymd_and_hms(2015, 3, 10, 0, 0, 0).unwrap();
        let guesses = guess_naive_dates("2015-03-08 02:30:00", &ctx_at(&zones, march));
        assert_eq!(guesses.len(), 1);
        let g = &guesses[0];
        assert_eq!(g.rendering, "In local time: 2015-03-08 03:30:00 -0700 PDT");
        assert_eq!(
            instant(g),
            Utc.with_ymd_and_hms(2015, 3, 8, 10, 30, 0).unwrap()
        );
        assert!(g.additional[1].starts_with("From UTC (UTC): 2015-03-07 18:30:00 -0800 PST"));
    }

    #[test]
    fn test_month_day_order_is_ambiguous() {
        let zones = zones();
        let ctx = ctx_at(&zones, summer());
        let both = guess_naive_dates("05/06/2015 10:00:00", &ctx);
        let sources: Vec<&str> = both.iter().map(|g| g.source.as_str()).collect();
        assert_eq!(
            sources,
            vec![
                "date string without timezone (MM/DD/YYYY hh:mm:ss)",
                "date string without timezone (DD/MM/YYYY hh:mm:ss)",
            ]
        );
        assert_eq!(guess_naive_dates("13/06/2015 10:00:00", &ctx).len(), 1);
    }

    #[test]
    fn test_naive_date_in_calendar_window() {
        let zones = zones();
        let guesses = guess_naive_dates("2015-09-21 10:00:00", &ctx_at(&zones, summer()));
        let g = &guesses[0];
        assert_eq!(g.goodness, 120);
        assert!(g.additional[0].ends_with("   September 2015"));
        assert!(g.additional.iter().all(|l| !l.contains(" ago)")));
        assert_eq!(g.additional.len(), 2 + 5);
    }

    #[test]
    fn test_compact_naive_layout() {
        let zones = zones();
        let guesses = guess_naive_dates("20150927092842", &ctx_at(&zones, summer()));
        assert_eq!(guesses.len(), 1);
        assert_eq!(guesses[0].goodness, 200);
        assert_eq!(guesses[0].comment.as_deref(), Some("within the minute, 53 seconds ago"));
    }
}
