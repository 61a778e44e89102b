//! Course time strings -- parse `"Mon/Wed 10:00-11:30"` into a [`TimeSpec`] and back.
//!
//! The stored form is `<days> <start>-<end>`: three-letter weekday
//! abbreviations joined by `/`, then two clock times. Each clock time is
//! `H:MM` or `HH:MM`, optionally followed by `AM`/`PM` (any case, space
//! optional). Without a suffix the hour is read as 24-hour.
//!
//! [`parse_time_spec`] is lenient: unknown day tokens are dropped and
//! malformed strings yield `None`, which callers treat as "no schedule
//! constraint". [`TimeSpec`]'s `FromStr` is the strict variant for callers
//! that want an error to report.
//!
//! `Display` always emits the canonical 24-hour form, so
//! `parse(format(parse(s))) == parse(s)` for every accepted `s` with at
//! least one known day.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use chrono::Weekday;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{CourseTimeError, Result};

/// Minutes in a day; every parsed offset is below this.
pub const MINUTES_PER_DAY: u16 = 24 * 60;

/// Weekdays in canonical (Monday-first) order.
const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

static TIME_SPEC_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^\s*([A-Za-z/]+)\s+(\d{1,2}):(\d{2})(?:\s*([AaPp][Mm]))?\s*-\s*(\d{1,2}):(\d{2})(?:\s*([AaPp][Mm]))?",
    )
    .expect("time spec pattern is valid")
});

/// A set of weekdays, iterated Monday first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<Weekday>", into = "Vec<Weekday>")]
pub struct DaySet(u8);

impl DaySet {
    pub const fn empty() -> Self {
        DaySet(0)
    }

    fn bit(day: Weekday) -> u8 {
        1 << day.num_days_from_monday()
    }

    pub fn insert(&mut self, day: Weekday) {
        self.0 |= Self::bit(day);
    }

    pub fn contains(&self, day: Weekday) -> bool {
        self.0 & Self::bit(day) != 0
    }

    pub fn intersection(&self, other: &DaySet) -> DaySet {
        DaySet(self.0 & other.0)
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn iter(self) -> impl Iterator<Item = Weekday> {
        WEEK.into_iter().filter(move |day| self.contains(*day))
    }
}

impl FromIterator<Weekday> for DaySet {
    fn from_iter<I: IntoIterator<Item = Weekday>>(iter: I) -> Self {
        let mut set = DaySet::empty();
        for day in iter {
            set.insert(day);
        }
        set
    }
}

impl From<Vec<Weekday>> for DaySet {
    fn from(days: Vec<Weekday>) -> Self {
        days.into_iter().collect()
    }
}

impl From<DaySet> for Vec<Weekday> {
    fn from(set: DaySet) -> Self {
        set.iter().collect()
    }
}

impl fmt::Display for DaySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, day) in self.iter().enumerate() {
            if i > 0 {
                f.write_str("/")?;
            }
            write!(f, "{}", day)?;
        }
        Ok(())
    }
}

/// A weekly recurring time interval: a day set plus start/end minute offsets
/// from local midnight.
///
/// `start_minute < end_minute` is expected but not enforced; see
/// [`TimeSpec::is_well_formed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeSpec {
    days: DaySet,
    start_minute: u16,
    end_minute: u16,
}

impl TimeSpec {
    pub fn new(days: DaySet, start_minute: u16, end_minute: u16) -> Self {
        TimeSpec {
            days,
            start_minute,
            end_minute,
        }
    }

    pub fn days(&self) -> DaySet {
        self.days
    }

    pub fn start_minute(&self) -> u16 {
        self.start_minute
    }

    pub fn end_minute(&self) -> u16 {
        self.end_minute
    }

    /// True when the time has at least one day and a positive-length interval.
    pub fn is_well_formed(&self) -> bool {
        !self.days.is_empty() && self.start_minute < self.end_minute
    }
}

impl fmt::Display for TimeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {:02}:{:02}-{:02}:{:02}",
            self.days,
            self.start_minute / 60,
            self.start_minute % 60,
            self.end_minute / 60,
            self.end_minute % 60,
        )
    }
}

impl FromStr for TimeSpec {
    type Err = CourseTimeError;

    fn from_str(s: &str) -> Result<Self> {
        parse_time_spec(s).ok_or_else(|| CourseTimeError::InvalidTimeSpec(s.to_string()))
    }
}

/// Parse a stored course time string.
///
/// Returns `None` when the string does not match the `<days> <start>-<end>`
/// shape or a clock field is out of range (minutes >= 60, a 24-hour hour
/// above 23, a 12-hour hour above 12). The day part is required. Unknown
/// day tokens are dropped; a string whose tokens are all unknown parses to
/// an empty day set. Text after the end time is ignored unless it starts
/// with a digit.
pub fn parse_time_spec(raw: &str) -> Option<TimeSpec> {
    parse_time_spec_prefix(raw).map(|(spec, _)| spec)
}

/// Like [`parse_time_spec`], but also returns the trimmed text that follows
/// the end time (`""` when the whole string was consumed).
pub fn parse_time_spec_prefix(raw: &str) -> Option<(TimeSpec, &str)> {
    let caps = TIME_SPEC_RE.captures(raw)?;
    let rest = &raw[caps.get(0)?.end()..];
    if rest.starts_with(|c: char| c.is_ascii_digit()) {
        return None;
    }

    let days: DaySet = caps[1].split('/').filter_map(parse_day).collect();
    let start_minute = clock_minutes(&caps[2], &caps[3], caps.get(4).map(|m| m.as_str()))?;
    let end_minute = clock_minutes(&caps[5], &caps[6], caps.get(7).map(|m| m.as_str()))?;

    Some((TimeSpec::new(days, start_minute, end_minute), rest.trim()))
}

/// Match a three-letter weekday abbreviation, ignoring case.
fn parse_day(token: &str) -> Option<Weekday> {
    match token.trim().to_ascii_lowercase().as_str() {
        "mon" => Some(Weekday::Mon),
        "tue" => Some(Weekday::Tue),
        "wed" => Some(Weekday::Wed),
        "thu" => Some(Weekday::Thu),
        "fri" => Some(Weekday::Fri),
        "sat" => Some(Weekday::Sat),
        "sun" => Some(Weekday::Sun),
        _ => None,
    }
}

/// Convert captured clock fields to minutes since midnight.
fn clock_minutes(hour: &str, minute: &str, suffix: Option<&str>) -> Option<u16> {
    let hour: u16 = hour.parse().ok()?;
    let minute: u16 = minute.parse().ok()?;
    if minute >= 60 {
        return None;
    }

    let hour = match suffix {
        Some(_) if hour > 12 => return None,
        Some(s) if s.eq_ignore_ascii_case("am") => hour % 12,
        Some(_) => hour % 12 + 12,
        None if hour > 23 => return None,
        None => hour,
    };

    Some(hour * 60 + minute)
}
