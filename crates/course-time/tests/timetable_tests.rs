//! Tests for weekly timetable layout.

use chrono::Weekday;
use course_time::timetable::{format_clock_12h, slot_labels};
use course_time::{layout, CourseTimeError, GridConfig, ScheduleEntry};

// ── Helpers ─────────────────────────────────────────────────────────────────

fn entry(label: &str, time: &str) -> ScheduleEntry {
    ScheduleEntry::new(label, Some(time))
}

// ── Grid geometry ───────────────────────────────────────────────────────────

#[test]
fn default_grid_is_weekdays_eight_to_six_in_half_hours() {
    let grid = GridConfig::default();
    assert_eq!(grid.slot_count(), 20);
    assert_eq!(grid.columns().len(), 5);

    let labels = slot_labels(&grid);
    assert_eq!(labels.first().map(String::as_str), Some("8:00 AM"));
    assert_eq!(labels.last().map(String::as_str), Some("5:30 PM"));
}

#[test]
fn invalid_grids_are_rejected() {
    let zero_slot = GridConfig {
        slot_minutes: 0,
        ..GridConfig::default()
    };
    assert!(matches!(
        layout(&zero_slot, &[]),
        Err(CourseTimeError::InvalidGrid(_))
    ));

    let empty_window = GridConfig {
        first_minute: 600,
        last_minute: 600,
        ..GridConfig::default()
    };
    assert!(empty_window.validate().is_err());

    let past_midnight = GridConfig {
        last_minute: 1500,
        ..GridConfig::default()
    };
    assert!(past_midnight.validate().is_err());
}

// ── Placement ───────────────────────────────────────────────────────────────

#[test]
fn course_is_placed_once_per_day() {
    let placements = layout(
        &GridConfig::default(),
        &[entry("Algorithms", "Mon/Wed 10:00-11:30")],
    )
    .unwrap();

    assert_eq!(placements.len(), 2);
    assert_eq!(placements[0].day, Weekday::Mon);
    assert_eq!(placements[1].day, Weekday::Wed);
    for p in &placements {
        assert_eq!(p.slot_index, 4, "10:00 is the fifth half-hour row after 08:00");
        assert_eq!(p.slot_span, 3, "90 minutes covers three rows");
        assert_eq!(p.label, "Algorithms");
    }
}

#[test]
fn partial_slot_rounds_span_up() {
    let placements = layout(&GridConfig::default(), &[entry("Lab", "Tue 13:10-14:00")]).unwrap();
    assert_eq!(placements[0].slot_index, 10);
    assert_eq!(placements[0].slot_span, 2);
}

#[test]
fn early_course_is_pinned_to_first_row() {
    let placements = layout(&GridConfig::default(), &[entry("Dawn", "Thu 07:00-09:00")]).unwrap();
    assert_eq!(placements[0].slot_index, 0);
    assert_eq!(placements[0].slot_span, 4);
}

#[test]
fn span_is_clamped_to_last_row() {
    let placements = layout(&GridConfig::default(), &[entry("Late", "Fri 17:00-20:00")]).unwrap();
    assert_eq!(placements[0].slot_index, 18);
    assert_eq!(placements[0].slot_span, 2);
}

#[test]
fn course_after_grid_end_is_skipped() {
    let placements = layout(&GridConfig::default(), &[entry("Night", "Mon 19:00-20:00")]).unwrap();
    assert!(placements.is_empty());
}

#[test]
fn inverted_or_zero_length_range_still_gets_one_row() {
    let placements = layout(
        &GridConfig::default(),
        &[entry("Odd", "Mon 11:00-10:00"), entry("Blip", "Tue 09:00-09:00")],
    )
    .unwrap();
    assert_eq!(placements.len(), 2);
    assert!(placements.iter().all(|p| p.slot_span == 1));
}

#[test]
fn weekends_and_unparseable_entries_are_skipped_by_default() {
    let placements = layout(
        &GridConfig::default(),
        &[
            entry("Weekend", "Sat/Sun 10:00-11:00"),
            entry("Mixed", "Fri/Sat 10:00-11:00"),
            entry("Unknown", "TBA"),
            ScheduleEntry::new("Unscheduled", None),
        ],
    )
    .unwrap();

    assert_eq!(placements.len(), 1);
    assert_eq!(placements[0].label, "Mixed");
    assert_eq!(placements[0].day, Weekday::Fri);
}

#[test]
fn weekends_can_be_enabled() {
    let grid = GridConfig {
        include_weekends: true,
        ..GridConfig::default()
    };
    let placements = layout(&grid, &[entry("Weekend", "Sat/Sun 10:00-11:00")]).unwrap();
    let days: Vec<Weekday> = placements.iter().map(|p| p.day).collect();
    assert_eq!(days, vec![Weekday::Sat, Weekday::Sun]);
}

#[test]
fn placements_are_ordered_by_day_then_row() {
    let placements = layout(
        &GridConfig::default(),
        &[
            entry("Afternoon", "Mon/Tue 14:00-15:00"),
            entry("Morning", "Tue/Mon 09:00-10:00"),
        ],
    )
    .unwrap();

    let order: Vec<(Weekday, &str)> = placements
        .iter()
        .map(|p| (p.day, p.label.as_str()))
        .collect();
    assert_eq!(
        order,
        vec![
            (Weekday::Mon, "Morning"),
            (Weekday::Mon, "Afternoon"),
            (Weekday::Tue, "Morning"),
            (Weekday::Tue, "Afternoon"),
        ]
    );
}

// ── Clock labels ────────────────────────────────────────────────────────────

#[test]
fn twelve_hour_clock_labels() {
    assert_eq!(format_clock_12h(0), "12:00 AM");
    assert_eq!(format_clock_12h(9 * 60 + 5), "9:05 AM");
    assert_eq!(format_clock_12h(12 * 60), "12:00 PM");
    assert_eq!(format_clock_12h(13 * 60 + 30), "1:30 PM");
    assert_eq!(format_clock_12h(23 * 60 + 59), "11:59 PM");
}
