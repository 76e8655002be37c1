//! # Timestamps
//!
//! Stored timestamps are kept as the raw string found in the document and
//! interpreted lazily. The predecessor wrote several shapes over its life
//! (ISO with microseconds, ISO without, space-separated, bare dates), so
//! parsing tries a fixed priority list and simply yields `None` for
//! anything unrecognized. What `None` means — excluded from a date window,
//! sorted last — is decided by the caller, not here.

use chrono::{Local, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Render format for new timestamps. `%.f` prints fractional seconds only
/// when non-zero, matching the predecessor's ISO output.
const CANONICAL_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Accepted datetime shapes, most specific first. First match wins.
/// `%.f` also matches the empty string, so the first entry covers ISO
/// values with and without a fractional part.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Parses a stored timestamp string. Bare dates resolve to midnight.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    for format in DATETIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(parsed);
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

// =============================================================================
// Timestamp
// =============================================================================

/// A stored timestamp.
///
/// Transparent serde over the raw string, so historical values round-trip
/// byte-for-byte no matter which era of the format wrote them.
///
/// ## Example
/// ```rust
/// use dukan_core::timestamp::Timestamp;
///
/// let ts = Timestamp::from_raw("2024-01-05T10:00:00.123456");
/// let day = ts.date().unwrap();
/// assert_eq!(day.to_string(), "2024-01-05");
///
/// assert!(Timestamp::from_raw("last tuesday").parse().is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(String);

impl Timestamp {
    /// Current local time in the canonical format.
    pub fn now() -> Self {
        Timestamp::from_datetime(Local::now().naive_local())
    }

    /// Renders a datetime in the canonical format.
    pub fn from_datetime(datetime: NaiveDateTime) -> Self {
        Timestamp(datetime.format(CANONICAL_FORMAT).to_string())
    }

    /// Wraps an already-stored string verbatim.
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Timestamp(raw.into())
    }

    /// The stored string, untouched.
    pub fn raw(&self) -> &str {
        &self.0
    }

    /// The datetime this string denotes, if it matches an accepted shape.
    pub fn parse(&self) -> Option<NaiveDateTime> {
        parse_timestamp(&self.0)
    }

    /// Calendar day the timestamp falls on, when it parses.
    pub fn date(&self) -> Option<NaiveDate> {
        self.parse().map(|dt| dt.date())
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
