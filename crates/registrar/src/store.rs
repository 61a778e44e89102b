//! Data-access interface the registrar workflows run against.
//!
//! The store owns atomicity: a duplicate enrollment must be rejected by the
//! store itself (not only by the workflow's pre-check), and grade writes are
//! upserts keyed on (student, course).

use course_time::ScheduleEntry;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// A course row as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseRecord {
    pub course_id: i64,
    pub course_name: String,
    pub staff_id: Option<i64>,
    pub location: Option<String>,
    /// Course time string; canonical when it was parseable at write time.
    pub time: Option<String>,
}

impl CourseRecord {
    pub fn schedule_entry(&self) -> ScheduleEntry {
        ScheduleEntry::new(self.course_name.as_str(), self.time.as_deref())
    }
}

/// Fields for creating or replacing a course.
///
/// A `time` that parses completely into a well-formed time is stored in
/// canonical form. Anything else, including a valid time followed by extra
/// text such as a room note, is stored as given after trimming.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseDraft {
    pub course_name: String,
    pub staff_id: Option<i64>,
    pub location: Option<String>,
    pub time: Option<String>,
}

impl CourseDraft {
    /// Trim text fields and turn blank optional fields into `None`.
    pub fn normalized(&self) -> CourseDraft {
        fn non_blank(value: &Option<String>) -> Option<String> {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        }

        CourseDraft {
            course_name: self.course_name.trim().to_string(),
            staff_id: self.staff_id,
            location: non_blank(&self.location),
            time: non_blank(&self.time),
        }
    }
}

/// One row of a student's grade report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradeRow {
    pub course_id: i64,
    pub course_name: String,
    /// `None` when the course has not been graded yet.
    pub grade: Option<String>,
}

pub trait CourseStore {
    fn course(&self, course_id: i64) -> Result<Option<CourseRecord>>;

    /// Courses the student is enrolled in, ordered by course name.
    fn student_schedule(&self, student_id: i64) -> Result<Vec<CourseRecord>>;

    /// Courses assigned to a teacher, optionally leaving one course out
    /// (the one being edited).
    fn teacher_schedule(&self, staff_id: i64, excluding: Option<i64>)
        -> Result<Vec<CourseRecord>>;

    fn enrollment_exists(&self, student_id: i64, course_id: i64) -> Result<bool>;

    /// Fails with [`RegistrarError::AlreadyRegistered`](crate::RegistrarError::AlreadyRegistered)
    /// if the pair is already enrolled.
    fn insert_enrollment(&self, student_id: i64, course_id: i64) -> Result<()>;

    /// Returns whether a row was removed.
    fn delete_enrollment(&self, student_id: i64, course_id: i64) -> Result<bool>;

    fn insert_course(&self, draft: &CourseDraft) -> Result<i64>;

    /// Returns whether the course existed.
    fn update_course(&self, course_id: i64, draft: &CourseDraft) -> Result<bool>;

    /// Removes the course with its enrollments and grades. Returns whether
    /// the course existed.
    fn delete_course(&self, course_id: i64) -> Result<bool>;

    fn upsert_grade(&self, student_id: i64, course_id: i64, grade: &str) -> Result<()>;

    /// Returns whether a grade was removed.
    fn delete_grade(&self, student_id: i64, course_id: i64) -> Result<bool>;

    /// Grade report over the student's enrollments, ordered by course name.
    fn student_grades(&self, student_id: i64) -> Result<Vec<GradeRow>>;
}
