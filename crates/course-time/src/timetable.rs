//! Place a schedule on a weekly timetable grid.
//!
//! The grid has one column per day and one row per fixed-length slot between
//! `first_minute` and `last_minute`. Each (course, day) pair becomes a
//! [`Placement`] anchored at the row containing its start time and spanning
//! enough rows to cover its duration.

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::conflict::ScheduleEntry;
use crate::error::{CourseTimeError, Result};
use crate::timespec::{TimeSpec, MINUTES_PER_DAY};

/// Timetable grid dimensions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// First row starts here (minutes since midnight).
    pub first_minute: u16,
    /// Grid ends here, exclusive.
    pub last_minute: u16,
    pub slot_minutes: u16,
    /// Saturday and Sunday columns are dropped unless set.
    pub include_weekends: bool,
}

impl Default for GridConfig {
    fn default() -> Self {
        GridConfig {
            first_minute: 8 * 60,
            last_minute: 18 * 60,
            slot_minutes: 30,
            include_weekends: false,
        }
    }
}

impl GridConfig {
    pub fn validate(&self) -> Result<()> {
        if self.slot_minutes == 0 {
            return Err(CourseTimeError::InvalidGrid(
                "slot length must be positive".to_string(),
            ));
        }
        if self.first_minute >= self.last_minute {
            return Err(CourseTimeError::InvalidGrid(format!(
                "window {}..{} is empty",
                self.first_minute, self.last_minute
            )));
        }
        if self.last_minute > MINUTES_PER_DAY {
            return Err(CourseTimeError::InvalidGrid(format!(
                "window end {} is past midnight",
                self.last_minute
            )));
        }
        Ok(())
    }

    /// Number of rows, counting a trailing partial slot.
    pub fn slot_count(&self) -> usize {
        if self.slot_minutes == 0 {
            return 0;
        }
        let window = i64::from(self.last_minute) - i64::from(self.first_minute);
        ceil_div(window, i64::from(self.slot_minutes)).max(0) as usize
    }

    /// Day columns shown on the grid, Monday first.
    pub fn columns(&self) -> Vec<Weekday> {
        let mut days = vec![
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
        ];
        if self.include_weekends {
            days.extend([Weekday::Sat, Weekday::Sun]);
        }
        days
    }
}

/// One course block on the grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Placement {
    pub label: String,
    pub day: Weekday,
    /// Row the block starts in.
    pub slot_index: usize,
    /// Rows covered, at least one and never past the last row.
    pub slot_span: usize,
    pub spec: TimeSpec,
}

/// Lay out `entries` on the grid described by `config`.
///
/// Entries without a parsed time are skipped, as are blocks starting at or
/// after the end of the grid. Blocks starting before the grid are pinned to
/// the first row. Output is ordered by day column, then row, then input order.
pub fn layout(config: &GridConfig, entries: &[ScheduleEntry]) -> Result<Vec<Placement>> {
    config.validate()?;

    let slot = i64::from(config.slot_minutes);
    let rows = config.slot_count();
    let columns = config.columns();
    let mut placements = Vec::new();

    for entry in entries {
        let Some(spec) = entry.spec else { continue };

        let start = i64::from(spec.start_minute());
        let end = i64::from(spec.end_minute());
        let slot_index = (start - i64::from(config.first_minute))
            .div_euclid(slot)
            .max(0) as usize;
        if slot_index >= rows {
            continue;
        }
        let slot_span = (ceil_div(end - start, slot).max(1) as usize).min(rows - slot_index);

        for day in spec.days().iter().filter(|day| columns.contains(day)) {
            placements.push(Placement {
                label: entry.label.clone(),
                day,
                slot_index,
                slot_span,
                spec,
            });
        }
    }

    placements.sort_by_key(|p| (p.day.num_days_from_monday(), p.slot_index));
    Ok(placements)
}

/// Row labels for the grid, e.g. `["8:00 AM", "8:30 AM", ...]`.
pub fn slot_labels(config: &GridConfig) -> Vec<String> {
    (0..config.slot_count())
        .map(|row| config.first_minute + row as u16 * config.slot_minutes)
        .map(format_clock_12h)
        .collect()
}

/// Render minutes since midnight as a 12-hour clock time, e.g. `"1:05 PM"`.
pub fn format_clock_12h(minute: u16) -> String {
    let hour = (minute / 60) % 24;
    let suffix = if hour < 12 { "AM" } else { "PM" };
    let display_hour = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{}:{:02} {}", display_hour, minute % 60, suffix)
}

fn ceil_div(numerator: i64, denominator: i64) -> i64 {
    (numerator + denominator - 1).div_euclid(denominator)
}
