//! Error types for registrar workflows.
//!
//! Every rejected write is a variant here. A route layer renders them with
//! [`RegistrarError::status_code`] and the `Display` message.

use course_time::CourseTimeError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RegistrarError {
    #[error("Time conflict: this course conflicts with \"{label}\" ({time})")]
    Conflict { label: String, time: String },

    #[error("Already registered for this course")]
    AlreadyRegistered,

    #[error("Course name is required")]
    MissingCourseName,

    #[error("Course {0} not found")]
    CourseNotFound(i64),

    #[error("Enrollment not found")]
    EnrollmentNotFound,

    #[error("Student {student_id} is not enrolled in course {course_id}")]
    NotEnrolled { student_id: i64, course_id: i64 },

    #[error("Staff member {staff_id} does not teach course {course_id}")]
    NotCourseTeacher { staff_id: i64, course_id: i64 },

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl RegistrarError {
    /// HTTP-equivalent status for this rejection.
    pub fn status_code(&self) -> u16 {
        match self {
            RegistrarError::Conflict { .. }
            | RegistrarError::AlreadyRegistered
            | RegistrarError::MissingCourseName
            | RegistrarError::NotEnrolled { .. } => 400,
            RegistrarError::NotCourseTeacher { .. } => 403,
            RegistrarError::CourseNotFound(_) | RegistrarError::EnrollmentNotFound => 404,
            RegistrarError::Storage(_)
            | RegistrarError::Config(_)
            | RegistrarError::Io(_)
            | RegistrarError::Json(_) => 500,
        }
    }

    /// True for rejections caused by the request rather than the system.
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status_code())
    }
}

impl From<CourseTimeError> for RegistrarError {
    fn from(err: CourseTimeError) -> Self {
        RegistrarError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, RegistrarError>;
