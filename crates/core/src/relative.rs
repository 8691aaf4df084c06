//! Relative time narration and time-based goodness.
//!
//! Every time-based guesser scores its instant by how close it lands to the
//! current instant: timestamps "within the minute" are far more likely to be
//! what the user meant than ones decades away.

use chrono::{DateTime, TimeDelta, Utc};

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;
const WEEK: i64 = 7 * DAY;
const YEAR: i64 = 365 * DAY;

/// Goodness of an instant plus which context blocks are worth attaching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Relevance {
    pub goodness: i32,
    /// Attach the per-zone conversion table.
    pub zone_table: bool,
    /// Attach a month calendar.
    pub calendar: bool,
}

struct Bucket {
    /// Upper bound in seconds (exclusive).
    below: i64,
    within: Option<&'static str>,
    relevance: Relevance,
}

const BUCKETS: [Bucket; 5] = [
    Bucket {
        below: MINUTE,
        within: Some("minute"),
        relevance: Relevance {
            goodness: 200,
            zone_table: true,
            calendar: false,
        },
    },
    Bucket {
        below: HOUR,
        within: Some("hour"),
        relevance: Relevance {
            goodness: 180,
            zone_table: true,
            calendar: false,
        },
    },
    Bucket {
        below: DAY,
        within: Some("day"),
        relevance: Relevance {
            goodness: 150,
            zone_table: true,
            calendar: false,
        },
    },
    Bucket {
        below: WEEK,
        within: Some("week"),
        relevance: Relevance {
            goodness: 120,
            zone_table: true,
            calendar: true,
        },
    },
    Bucket {
        below: YEAR,
        within: None,
        relevance: Relevance {
            goodness: 20,
            zone_table: false,
            calendar: true,
        },
    },
];

const RIGHT_NOW: Relevance = BUCKETS[0].relevance;

const DISTANT: Relevance = Relevance {
    goodness: -10,
    zone_table: false,
    calendar: false,
};

/// Absolute distance between `instant` and `now`, with a narrative such as
/// `"within the hour, 3 minutes 12 seconds ago"`.
///
/// Anything closer than one second is `"right now"` with a zero delta.
///
/// # Examples
///
/// ```
/// use chrono::{TimeDelta, TimeZone, Utc};
/// use guess_core::relative::delta_now;
///
/// let now = Utc.with_ymd_and_hms(2015, 9, 27, 9, 29, 35).unwrap();
/// assert_eq!(delta_now(now, now), (TimeDelta::zero(), "right now".to_string()));
///
/// let (_, narrative) = delta_now(now + TimeDelta::seconds(90), now);
/// assert_eq!(narrative, "within the hour, 1 minute 30 seconds ahead");
/// ```
#[must_use]
pub fn delta_now(instant: DateTime<Utc>, now: DateTime<Utc>) -> (TimeDelta, String) {
    let (delta, suffix) = if now < instant {
        (instant - now, "ahead")
    } else {
        (now - instant, "ago")
    };
    if delta.num_milliseconds() < 1000 {
        return (TimeDelta::zero(), "right now".to_string());
    }

    let secs = delta.num_seconds();
    let prefix = BUCKETS
        .iter()
        .find(|b| secs < b.below)
        .and_then(|b| b.within)
        .map(|unit| format!("within the {unit}, "))
        .unwrap_or_default();

    (delta, format!("{prefix}{}", exact(secs, suffix)))
}

/// Goodness bucket for an absolute delta as returned by [`delta_now`].
#[must_use]
pub fn relevance(delta: TimeDelta) -> Relevance {
    if delta.num_milliseconds() < 1000 {
        return RIGHT_NOW;
    }
    let secs = delta.num_seconds();
    BUCKETS
        .iter()
        .find(|b| secs < b.below)
        .map_or(DISTANT, |b| b.relevance)
}

/// Narrative and relevance in one go.
#[must_use]
pub fn assess(instant: DateTime<Utc>, now: DateTime<Utc>) -> (String, Relevance) {
    let (delta, narrative) = delta_now(instant, now);
    (narrative, relevance(delta))
}

fn exact(secs: i64, suffix: &str) -> String {
    let components = [
        (secs / DAY, "day"),
        (secs % DAY / HOUR, "hour"),
        (secs % HOUR / MINUTE, "minute"),
        (secs % MINUTE, "second"),
    ];
    let mut parts: Vec<String> = components
        .iter()
        .filter(|(n, _)| *n != 0)
        .map(|(n, unit)| format!("{n} {unit}{}", if *n > 1 { "s" } else { "" }))
        .collect();
    parts.push(suffix.to_string());
    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2015, 9, 27, 9, 29, 35).unwrap()
    }

    fn ago(secs: i64) -> DateTime<Utc> {
        now() - TimeDelta::seconds(secs)
    }

    #[test]
    fn test_right_now() {
        let (delta, narrative) = delta_now(now(), now());
        assert_eq!(delta, TimeDelta::zero());
        assert_eq!(narrative, "right now");

        let (_, narrative) = delta_now(now() + TimeDelta::milliseconds(999), now());
        assert_eq!(narrative, "right now");
        assert_eq!(relevance(TimeDelta::zero()).goodness, 200);
    }

    #[test]
    fn test_minute_boundary() {
        let (delta, narrative) = delta_now(ago(59), now());
        assert_eq!(narrative, "within the minute, 59 seconds ago");
        assert_eq!(relevance(delta).goodness, 200);

        let (delta, narrative) = delta_now(ago(60), now());
        assert_eq!(narrative, "within the hour, 1 minute ago");
        assert_eq!(relevance(delta).goodness, 180);

        let (_, narrative) = delta_now(ago(61), now());
        assert_eq!(narrative, "within the hour, 1 minute 1 second ago");
    }

    #[test]
    fn test_direction() {
        let (_, narrative) = delta_now(now() + TimeDelta::seconds(2 * HOUR + 5), now());
        assert_eq!(narrative, "within the day, 2 hours 5 seconds ahead");
    }

    #[test]
    fn test_days_are_split_from_hours() {
        let (delta, narrative) = delta_now(ago(3 * DAY + 4 * HOUR), now());
        assert_eq!(narrative, "within the week, 3 days 4 hours ago");
        let r = relevance(delta);
        assert_eq!(r.goodness, 120);
        assert!(r.zone_table);
        assert!(r.calendar);
    }

    #[test]
    fn test_beyond_a_week_has_no_prefix() {
        let (delta, narrative) = delta_now(ago(30 * DAY + 1), now());
        assert_eq!(narrative, "30 days 1 second ago");
        assert_eq!(
            relevance(delta),
            Relevance {
                goodness: 20,
                zone_table: false,
                calendar: true
            }
        );
    }

    #[test]
    fn test_distant_instants() {
        let (delta, narrative) = delta_now(ago(400 * DAY), now());
        assert_eq!(narrative, "400 days ago");
        assert_eq!(relevance(delta), DISTANT);
    }
}
