//! Detect overlapping courses in a weekly schedule.
//!
//! Intervals are half-open: a course ending at 10:00 does not conflict with
//! one starting at 10:00 on the same day. Courses without a parseable time
//! never conflict with anything.

use serde::Serialize;

use crate::timespec::{parse_time_spec, DaySet, TimeSpec};

/// True iff `a` and `b` share a day and their `[start, end)` intervals overlap.
///
/// Total over all inputs. Inverted or zero-length ranges are compared as the
/// literal numbers given, with no special casing.
pub fn has_conflict(a: &TimeSpec, b: &TimeSpec) -> bool {
    if a.days().intersection(&b.days()).is_empty() {
        return false;
    }
    !(a.end_minute() <= b.start_minute() || a.start_minute() >= b.end_minute())
}

/// One course in an existing schedule: a display label plus its stored time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduleEntry {
    pub label: String,
    /// The raw stored string, kept for user-facing messages.
    pub time: Option<String>,
    /// `None` when `time` is absent or unparseable.
    pub spec: Option<TimeSpec>,
}

impl ScheduleEntry {
    /// Build an entry, parsing the stored time on demand.
    pub fn new(label: impl Into<String>, time: Option<&str>) -> Self {
        ScheduleEntry {
            label: label.into(),
            time: time.map(str::to_string),
            spec: time.and_then(parse_time_spec),
        }
    }
}

/// Outcome of checking a candidate time against a schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ConflictResult {
    Clear,
    Conflict { label: String, time: String },
}

impl ConflictResult {
    pub fn is_conflict(&self) -> bool {
        matches!(self, ConflictResult::Conflict { .. })
    }
}

/// Check `candidate` against `existing`, reporting the first conflicting entry.
///
/// A `None` candidate is exempt and always yields [`ConflictResult::Clear`].
/// Entries without a parsed time are skipped. Whether a conflict exists does
/// not depend on order; which entry gets reported does.
pub fn check_schedule_conflict(
    candidate: Option<&TimeSpec>,
    existing: &[ScheduleEntry],
) -> ConflictResult {
    let Some(candidate) = candidate else {
        return ConflictResult::Clear;
    };

    existing
        .iter()
        .find(|entry| entry.spec.is_some_and(|spec| has_conflict(candidate, &spec)))
        .map(|entry| ConflictResult::Conflict {
            label: entry.label.clone(),
            time: entry.time.clone().unwrap_or_default(),
        })
        .unwrap_or(ConflictResult::Clear)
}

/// A detected conflict between two entries of the same schedule.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Conflict {
    pub entry_a: ScheduleEntry,
    pub entry_b: ScheduleEntry,
    pub shared_days: DaySet,
    /// Weekly overlap per shared day.
    pub overlap_minutes: u16,
}

/// Find all pairwise conflicts within one schedule.
///
/// Each unordered pair is reported once, with `entry_a` preceding `entry_b`
/// in the input. The overlap is `min(a.end, b.end) - max(a.start, b.start)`.
pub fn find_conflicts(entries: &[ScheduleEntry]) -> Vec<Conflict> {
    let mut conflicts = Vec::new();

    for (i, a) in entries.iter().enumerate() {
        let Some(spec_a) = a.spec else { continue };
        for b in &entries[i + 1..] {
            let Some(spec_b) = b.spec else { continue };
            if !has_conflict(&spec_a, &spec_b) {
                continue;
            }

            let overlap_start = spec_a.start_minute().max(spec_b.start_minute());
            let overlap_end = spec_a.end_minute().min(spec_b.end_minute());

            conflicts.push(Conflict {
                entry_a: a.clone(),
                entry_b: b.clone(),
                shared_days: spec_a.days().intersection(&spec_b.days()),
                overlap_minutes: overlap_end.saturating_sub(overlap_start),
            });
        }
    }

    conflicts
}
