//! Error types for course-time operations.
//!
//! The lenient entry points ([`parse_time_spec`](crate::parse_time_spec),
//! [`check_schedule_conflict`](crate::check_schedule_conflict)) never fail.
//! These errors only come out of the strict paths.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CourseTimeError {
    #[error("Invalid course time: {0:?} (expected e.g. \"Mon/Wed 10:00-11:30\")")]
    InvalidTimeSpec(String),

    #[error("Invalid timetable grid: {0}")]
    InvalidGrid(String),
}

pub type Result<T> = std::result::Result<T, CourseTimeError>;
