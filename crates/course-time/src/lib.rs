//! # course-time
//!
//! Weekly course times, schedule conflicts, and letter grades for a course
//! registration system.
//!
//! Every function here is pure: callers load stored strings, hand them in,
//! and act on the result. Nothing in this crate fails a registration because
//! a stored time is malformed. An unparseable time is simply exempt from
//! conflict checking.
//!
//! ## Quick start
//!
//! ```rust
//! use course_time::{check_schedule_conflict, convert_score_to_grade, parse_time_spec, ScheduleEntry};
//!
//! let candidate = parse_time_spec("Wed 11:00-12:00");
//! let enrolled = vec![ScheduleEntry::new("Algorithms", Some("Mon/Wed 10:00-11:30"))];
//!
//! let result = check_schedule_conflict(candidate.as_ref(), &enrolled);
//! assert!(result.is_conflict());
//!
//! assert_eq!(convert_score_to_grade("92"), "A");
//! assert_eq!(convert_score_to_grade("B+"), "B+");
//! ```
//!
//! ## Modules
//!
//! - [`timespec`]: `"Mon/Wed 10:00-11:30"` ⇄ [`TimeSpec`]
//! - [`conflict`]: day/interval overlap between a candidate and a schedule
//! - [`grade`]: numeric score → canonical letter grade
//! - [`timetable`]: place a schedule on a weekly slot grid
//! - [`error`]: Error types

pub mod conflict;
pub mod error;
pub mod grade;
pub mod timespec;
pub mod timetable;

pub use conflict::{
    check_schedule_conflict, find_conflicts, has_conflict, Conflict, ConflictResult,
    ScheduleEntry,
};
pub use error::CourseTimeError;
pub use grade::{convert_score_to_grade, GradeAction, LetterGrade};
pub use timespec::{parse_time_spec, parse_time_spec_prefix, DaySet, TimeSpec};
pub use timetable::{layout, GridConfig, Placement};
