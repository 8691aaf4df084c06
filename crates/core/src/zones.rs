//! Time zone configuration.
//!
//! The zone list is resolved once, before any classification, and is then
//! only read. Every date guesser converts to and from these zones.

pub use chrono_tz::Tz;
use tracing::{debug, warn};

use crate::error::{GuessError, Result};

/// Zones used when nothing else is configured.
pub const DEFAULT_ZONES: &str = "America/Los_Angeles,America/New_York,UTC,Europe/Berlin,Asia/Dubai,Asia/Singapore,Australia/Sydney";

/// Ordered, non-empty list of zones plus the zone treated as "local".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeZones {
    zones: Vec<Tz>,
    local: Tz,
}

impl TimeZones {
    /// Build a configuration from already-resolved zones.
    pub fn new(zones: Vec<Tz>, local: Tz) -> Result<Self> {
        if zones.is_empty() {
            return Err(GuessError::EmptyZoneList);
        }
        Ok(Self { zones, local })
    }

    /// Parse a comma-separated list of IANA names.
    ///
    /// # Examples
    ///
    /// ```
    /// use guess_core::TimeZones;
    ///
    /// let zones = TimeZones::parse("UTC, Europe/Berlin", chrono_tz::UTC).unwrap();
    /// assert_eq!(zones.zones().len(), 2);
    /// assert!(TimeZones::parse("Mars/Olympus_Mons", chrono_tz::UTC).is_err());
    /// ```
    pub fn parse(list: &str, local: Tz) -> Result<Self> {
        let zones = list
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(parse_zone)
            .collect::<Result<Vec<_>>>()?;
        Self::new(zones, local)
    }

    #[must_use]
    pub fn zones(&self) -> &[Tz] {
        &self.zones
    }

    #[must_use]
    pub fn local(&self) -> Tz {
        self.local
    }
}

/// Resolve a single IANA zone name.
pub fn parse_zone(name: &str) -> Result<Tz> {
    name.parse::<Tz>()
        .map_err(|_| GuessError::UnknownZone(name.to_string()))
}

/// Detect the system's local zone, falling back to UTC.
#[must_use]
pub fn detect_local_zone() -> Tz {
    match iana_time_zone::get_timezone() {
        Ok(name) => match name.parse::<Tz>() {
            Ok(tz) => {
                debug!(zone = %tz, "detected local time zone");
                tz
            }
            Err(_) => {
                warn!(zone = name, "system time zone is not a known IANA zone, using UTC");
                Tz::UTC
            }
        },
        Err(e) => {
            warn!(error = %e, "cannot detect local time zone, using UTC");
            Tz::UTC
        }
    }
}
