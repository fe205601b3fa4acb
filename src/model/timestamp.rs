//! Lenient date/time parsing for the date fields of a Swarmic export.

use crate::model::Cell;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use std::cmp::Ordering;
use std::fmt::{Display, Formatter};

/// The format used for `<field>_readable` columns.
pub const READABLE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// The format used for date-only values.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Timestamps carrying a UTC offset. A trailing `Z` is rewritten to `+00:00` before these run.
const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
];

/// Timestamps without an offset.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Dates without a time of day, read as midnight.
const DATE_FORMATS: &[&str] = &[DATE_FORMAT, "%Y/%m/%d", "%m/%d/%Y"];

/// A point in time parsed from an export field.
///
/// The wall clock time is kept as written so that readable columns show what the app recorded.
/// When the source carried an offset it is kept too, and comparisons and differences use the
/// corresponding UTC instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Timestamp {
    local: NaiveDateTime,
    offset: Option<FixedOffset>,
}

impl Timestamp {
    pub fn new(local: NaiveDateTime, offset: Option<FixedOffset>) -> Self {
        Self { local, offset }
    }

    /// Parses an ISO 8601 style string. Returns `None` for empty or unrecognised input.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.is_empty() {
            return None;
        }

        let normalised = match s.strip_suffix('Z').or_else(|| s.strip_suffix('z')) {
            Some(stripped) => format!("{stripped}+00:00"),
            None => s.to_string(),
        };

        for fmt in OFFSET_FORMATS {
            if let Ok(dt) = DateTime::parse_from_str(&normalised, fmt) {
                return Some(Self::new(dt.naive_local(), Some(*dt.offset())));
            }
        }

        for fmt in NAIVE_FORMATS {
            if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
                return Some(Self::new(dt, None));
            }
        }

        DATE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
            .map(Self::from)
    }

    /// Interprets a number of seconds since the Unix epoch.
    pub fn from_epoch_seconds(seconds: f64) -> Option<Self> {
        if !seconds.is_finite() {
            return None;
        }
        let whole = seconds.floor();
        let nanos = ((seconds - whole) * 1_000_000_000.0).round() as u32;
        DateTime::from_timestamp(whole as i64, nanos.min(999_999_999))
            .map(|dt| Self::new(dt.naive_utc(), None))
    }

    /// Coerces a table cell into a `Timestamp`, yielding `None` for anything unparseable.
    pub fn from_cell(cell: &Cell) -> Option<Self> {
        match cell {
            Cell::Timestamp(ts) => Some(*ts),
            Cell::Date(date) => Some(Self::from(*date)),
            Cell::Text(s) => Self::parse(s),
            Cell::Int(i) => Self::from_epoch_seconds(*i as f64),
            Cell::Float(f) => Self::from_epoch_seconds(*f),
            _ => None,
        }
    }

    /// The wall clock date and time as recorded.
    pub fn local(&self) -> NaiveDateTime {
        self.local
    }

    pub fn offset(&self) -> Option<FixedOffset> {
        self.offset
    }

    /// The calendar date of the wall clock time.
    pub fn date(&self) -> NaiveDate {
        self.local.date()
    }

    /// The instant used for ordering and arithmetic: UTC when an offset is known, otherwise the
    /// wall clock time.
    fn instant(&self) -> NaiveDateTime {
        match self.offset {
            Some(offset) => self.local - offset,
            None => self.local,
        }
    }

    /// Hours elapsed from `self` to `later`. Negative when `later` is earlier.
    pub fn hours_until(&self, later: &Timestamp) -> f64 {
        let delta = later.instant() - self.instant();
        match delta.num_microseconds() {
            Some(micros) => micros as f64 / 3_600_000_000.0,
            None => delta.num_seconds() as f64 / 3600.0,
        }
    }

    /// `YYYY-MM-DD HH:MM:SS` of the wall clock time.
    pub fn readable(&self) -> String {
        self.local.format(READABLE_FORMAT).to_string()
    }
}

impl From<NaiveDate> for Timestamp {
    fn from(date: NaiveDate) -> Self {
        Self::new(date.and_time(NaiveTime::MIN), None)
    }
}

impl Display for Timestamp {
    /// Writes `YYYY-MM-DD HH:MM:SS`, with microseconds when the value has a fractional second and
    /// with the offset when one was parsed.
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.readable())?;
        if self.local.nanosecond() != 0 {
            write!(f, "{}", self.local.format("%.6f"))?;
        }
        if let Some(offset) = self.offset {
            write!(f, "{offset}")?;
        }
        Ok(())
    }
}

impl PartialOrd for Timestamp {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Timestamp {
    fn cmp(&self, other: &Self) -> Ordering {
        self.instant().cmp(&other.instant())
    }
}
