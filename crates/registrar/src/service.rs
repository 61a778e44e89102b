//! Registration, course administration and grading workflows.
//!
//! Each workflow loads what it needs from the [`CourseStore`], runs the
//! course-time engine over it, and only writes when the engine allows it.
//! Stored course times that fail to parse never block a write; they are
//! logged and exempted from conflict checking.

use course_time::{
    check_schedule_conflict, find_conflicts, layout, parse_time_spec, parse_time_spec_prefix,
    Conflict, ConflictResult, GradeAction, GridConfig, Placement, ScheduleEntry, TimeSpec,
};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::RegistrarConfig;
use crate::error::{RegistrarError, Result};
use crate::store::{CourseDraft, CourseRecord, CourseStore, GradeRow};

/// Who is performing a grade write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Actor {
    /// May only grade courses they are assigned to.
    Teacher(i64),
    /// May grade any course.
    Admin,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum GradeOutcome {
    Cleared,
    Recorded {
        letter: String,
        original_input: String,
    },
}

pub struct Registrar<S> {
    store: S,
    grid: GridConfig,
}

impl<S: CourseStore> Registrar<S> {
    pub fn new(store: S, grid: GridConfig) -> Self {
        Registrar { store, grid }
    }

    pub fn with_config(store: S, config: &RegistrarConfig) -> Self {
        Self::new(store, config.timetable.clone())
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn grid(&self) -> &GridConfig {
        &self.grid
    }

    // ── Student registration ────────────────────────────────────────────────

    /// Enroll a student, rejecting duplicates and time conflicts with the
    /// student's current courses.
    pub fn register(&self, student_id: i64, course_id: i64) -> Result<()> {
        if self.store.enrollment_exists(student_id, course_id)? {
            return Err(RegistrarError::AlreadyRegistered);
        }

        let course = self
            .store
            .course(course_id)?
            .ok_or(RegistrarError::CourseNotFound(course_id))?;
        let candidate = parse_logged(&course.course_name, course.time.as_deref());

        let enrolled = schedule_entries(&self.store.student_schedule(student_id)?);
        debug!(
            student_id,
            course_id,
            enrolled = enrolled.len(),
            "checking registration against current schedule"
        );
        reject_conflict(check_schedule_conflict(candidate.as_ref(), &enrolled))?;

        self.store.insert_enrollment(student_id, course_id)?;
        info!(student_id, course_id, "registered for course");
        Ok(())
    }

    pub fn unregister(&self, student_id: i64, course_id: i64) -> Result<()> {
        if !self.store.delete_enrollment(student_id, course_id)? {
            return Err(RegistrarError::EnrollmentNotFound);
        }
        info!(student_id, course_id, "unregistered from course");
        Ok(())
    }

    // ── Course administration ───────────────────────────────────────────────

    /// Create a course. A teacher may hold several courses as long as their
    /// times do not overlap.
    pub fn create_course(&self, draft: &CourseDraft) -> Result<i64> {
        let draft = self.prepare_course(draft, None)?;
        let course_id = self.store.insert_course(&draft)?;
        info!(course_id, course = %draft.course_name, "created course");
        Ok(course_id)
    }

    /// Replace a course's fields, checking the teacher's other courses.
    pub fn update_course(&self, course_id: i64, draft: &CourseDraft) -> Result<()> {
        if self.store.course(course_id)?.is_none() {
            return Err(RegistrarError::CourseNotFound(course_id));
        }
        let draft = self.prepare_course(draft, Some(course_id))?;
        if !self.store.update_course(course_id, &draft)? {
            return Err(RegistrarError::CourseNotFound(course_id));
        }
        info!(course_id, course = %draft.course_name, "updated course");
        Ok(())
    }

    /// Delete a course along with its enrollments and grades.
    pub fn delete_course(&self, course_id: i64) -> Result<()> {
        if !self.store.delete_course(course_id)? {
            return Err(RegistrarError::CourseNotFound(course_id));
        }
        info!(course_id, "deleted course");
        Ok(())
    }

    /// Normalize a draft, run the teacher conflict check, and canonicalize
    /// its time string when it parses cleanly.
    fn prepare_course(&self, draft: &CourseDraft, excluding: Option<i64>) -> Result<CourseDraft> {
        let mut draft = draft.normalized();
        if draft.course_name.is_empty() {
            return Err(RegistrarError::MissingCourseName);
        }
        let spec = parse_logged(&draft.course_name, draft.time.as_deref());

        if let (Some(staff_id), Some(spec)) = (draft.staff_id, spec.as_ref()) {
            let assigned = schedule_entries(&self.store.teacher_schedule(staff_id, excluding)?);
            debug!(
                staff_id,
                assigned = assigned.len(),
                "checking course time against teacher schedule"
            );
            reject_conflict(check_schedule_conflict(Some(spec), &assigned))?;
        }

        let canonical = draft
            .time
            .as_deref()
            .and_then(parse_time_spec_prefix)
            .filter(|(spec, rest)| rest.is_empty() && spec.is_well_formed())
            .map(|(spec, _)| spec.to_string());
        if canonical.is_some() {
            draft.time = canonical;
        }
        Ok(draft)
    }

    // ── Grading ─────────────────────────────────────────────────────────────

    /// Record or clear a grade.
    ///
    /// `None` or `""` clears the grade. Anything else is converted to its
    /// canonical letter form before it is stored. The student must be
    /// enrolled in the course.
    pub fn set_grade(
        &self,
        actor: Actor,
        student_id: i64,
        course_id: i64,
        input: Option<&str>,
    ) -> Result<GradeOutcome> {
        if !self.store.enrollment_exists(student_id, course_id)? {
            return Err(RegistrarError::NotEnrolled {
                student_id,
                course_id,
            });
        }

        if let Actor::Teacher(staff_id) = actor {
            let course = self
                .store
                .course(course_id)?
                .ok_or(RegistrarError::CourseNotFound(course_id))?;
            if course.staff_id != Some(staff_id) {
                return Err(RegistrarError::NotCourseTeacher {
                    staff_id,
                    course_id,
                });
            }
        }

        match GradeAction::from_input(input) {
            GradeAction::Clear => {
                self.store.delete_grade(student_id, course_id)?;
                info!(student_id, course_id, ?actor, "cleared grade");
                Ok(GradeOutcome::Cleared)
            }
            GradeAction::Set(letter) => {
                self.store.upsert_grade(student_id, course_id, &letter)?;
                info!(student_id, course_id, ?actor, grade = %letter, "recorded grade");
                Ok(GradeOutcome::Recorded {
                    letter,
                    original_input: input.unwrap_or_default().to_string(),
                })
            }
        }
    }

    pub fn student_grades(&self, student_id: i64) -> Result<Vec<GradeRow>> {
        self.store.student_grades(student_id)
    }

    // ── Schedules ───────────────────────────────────────────────────────────

    /// Lay out the student's enrolled courses on the configured grid.
    pub fn student_timetable(&self, student_id: i64) -> Result<Vec<Placement>> {
        let entries = schedule_entries(&self.store.student_schedule(student_id)?);
        Ok(layout(&self.grid, &entries)?)
    }

    /// Every conflicting pair among the student's enrolled courses. Normally
    /// empty; course edits after enrollment can introduce conflicts.
    pub fn audit_student_schedule(&self, student_id: i64) -> Result<Vec<Conflict>> {
        let entries = schedule_entries(&self.store.student_schedule(student_id)?);
        let conflicts = find_conflicts(&entries);
        if !conflicts.is_empty() {
            warn!(
                student_id,
                conflicts = conflicts.len(),
                "student schedule has overlapping courses"
            );
        }
        Ok(conflicts)
    }
}

fn schedule_entries(courses: &[CourseRecord]) -> Vec<ScheduleEntry> {
    courses.iter().map(CourseRecord::schedule_entry).collect()
}

/// Parse a stored time, warning when one is present but unusable.
fn parse_logged(course: &str, time: Option<&str>) -> Option<TimeSpec> {
    let time = time?;
    let spec = parse_time_spec(time);
    if spec.is_none() {
        warn!(course, time, "could not parse course time; skipping conflict check");
    }
    spec
}

fn reject_conflict(result: ConflictResult) -> Result<()> {
    match result {
        ConflictResult::Clear => Ok(()),
        ConflictResult::Conflict { label, time } => {
            debug!(conflicts_with = %label, time = %time, "rejecting write");
            Err(RegistrarError::Conflict { label, time })
        }
    }
}
