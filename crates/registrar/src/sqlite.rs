//! SQLite-backed [`CourseStore`].

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use rusqlite::{params, Connection, OptionalExtension, Row};
use serde::{Deserialize, Serialize};

use crate::error::{RegistrarError, Result};
use crate::store::{CourseDraft, CourseRecord, CourseStore, GradeRow};

const SCHEMA_SQL: &str = include_str!("../sql/schema.sql");

const COURSE_COLUMNS: &str = "c.course_id, c.course_name, c.staff_id, c.location, c.time";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StaffRole {
    Teacher,
    Admin,
}

impl StaffRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            StaffRole::Teacher => "teacher",
            StaffRole::Admin => "admin",
        }
    }
}

impl fmt::Display for StaffRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StaffRole {
    type Err = RegistrarError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "teacher" => Ok(StaffRole::Teacher),
            "admin" => Ok(StaffRole::Admin),
            other => Err(RegistrarError::Config(format!("unknown staff role {:?}", other))),
        }
    }
}

pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (creating if needed) the database at `path` and ensure the schema.
    pub fn open(path: &Path) -> Result<Self> {
        Self::with_connection(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch(SCHEMA_SQL)?;
        Ok(SqliteStore { conn })
    }

    pub fn add_student(&self, first_name: &str, last_name: &str, email: Option<&str>) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO students (first_name, last_name, email) VALUES (?1, ?2, ?3)",
            params![first_name, last_name, email],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn add_staff(
        &self,
        first_name: &str,
        last_name: &str,
        email: Option<&str>,
        role: StaffRole,
    ) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO staff (first_name, last_name, email, role) VALUES (?1, ?2, ?3, ?4)",
            params![first_name, last_name, email, role.as_str()],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn staff_role(&self, staff_id: i64) -> Result<Option<StaffRole>> {
        let role: Option<String> = self
            .conn
            .query_row(
                "SELECT role FROM staff WHERE staff_id = ?1",
                [staff_id],
                |row| row.get(0),
            )
            .optional()?;
        role.map(|r| r.parse::<StaffRole>()).transpose()
    }

    /// All courses, ordered by name.
    pub fn list_courses(&self) -> Result<Vec<CourseRecord>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM courses c ORDER BY c.course_name, c.course_id",
            COURSE_COLUMNS
        ))?;
        let rows = stmt.query_map([], course_from_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }
}

fn course_from_row(row: &Row<'_>) -> rusqlite::Result<CourseRecord> {
    Ok(CourseRecord {
        course_id: row.get(0)?,
        course_name: row.get(1)?,
        staff_id: row.get(2)?,
        location: row.get(3)?,
        time: row.get(4)?,
    })
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _)
            if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}

impl CourseStore for SqliteStore {
    fn course(&self, course_id: i64) -> Result<Option<CourseRecord>> {
        let course = self
            .conn
            .query_row(
                &format!("SELECT {} FROM courses c WHERE c.course_id = ?1", COURSE_COLUMNS),
                [course_id],
                course_from_row,
            )
            .optional()?;
        Ok(course)
    }

    fn student_schedule(&self, student_id: i64) -> Result<Vec<CourseRecord>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM courses c
             INNER JOIN enrollments e ON c.course_id = e.course_id
             WHERE e.student_id = ?1
             ORDER BY c.course_name, c.course_id",
            COURSE_COLUMNS
        ))?;
        let rows = stmt.query_map([student_id], course_from_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    fn teacher_schedule(
        &self,
        staff_id: i64,
        excluding: Option<i64>,
    ) -> Result<Vec<CourseRecord>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM courses c
             WHERE c.staff_id = ?1
               AND (?2 IS NULL OR c.course_id != ?2)
               AND c.time IS NOT NULL AND c.time != ''
             ORDER BY c.course_name, c.course_id",
            COURSE_COLUMNS
        ))?;
        let rows = stmt.query_map(params![staff_id, excluding], course_from_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    fn enrollment_exists(&self, student_id: i64, course_id: i64) -> Result<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM enrollments WHERE student_id = ?1 AND course_id = ?2",
            [student_id, course_id],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    fn insert_enrollment(&self, student_id: i64, course_id: i64) -> Result<()> {
        match self.conn.execute(
            "INSERT INTO enrollments (student_id, course_id) VALUES (?1, ?2)",
            [student_id, course_id],
        ) {
            Ok(_) => Ok(()),
            Err(e) if is_unique_violation(&e) => Err(RegistrarError::AlreadyRegistered),
            Err(e) => Err(e.into()),
        }
    }

    fn delete_enrollment(&self, student_id: i64, course_id: i64) -> Result<bool> {
        let removed = self.conn.execute(
            "DELETE FROM enrollments WHERE student_id = ?1 AND course_id = ?2",
            [student_id, course_id],
        )?;
        Ok(removed > 0)
    }

    fn insert_course(&self, draft: &CourseDraft) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO courses (course_name, staff_id, location, time) VALUES (?1, ?2, ?3, ?4)",
            params![draft.course_name, draft.staff_id, draft.location, draft.time],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn update_course(&self, course_id: i64, draft: &CourseDraft) -> Result<bool> {
        let updated = self.conn.execute(
            "UPDATE courses SET course_name = ?1, staff_id = ?2, location = ?3, time = ?4
             WHERE course_id = ?5",
            params![
                draft.course_name,
                draft.staff_id,
                draft.location,
                draft.time,
                course_id
            ],
        )?;
        Ok(updated > 0)
    }

    fn delete_course(&self, course_id: i64) -> Result<bool> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute("DELETE FROM grades WHERE course_id = ?1", [course_id])?;
        tx.execute("DELETE FROM enrollments WHERE course_id = ?1", [course_id])?;
        let removed = tx.execute("DELETE FROM courses WHERE course_id = ?1", [course_id])?;
        tx.commit()?;
        Ok(removed > 0)
    }

    fn upsert_grade(&self, student_id: i64, course_id: i64, grade: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO grades (student_id, course_id, grade) VALUES (?1, ?2, ?3)
             ON CONFLICT (student_id, course_id) DO UPDATE SET grade = excluded.grade",
            params![student_id, course_id, grade],
        )?;
        Ok(())
    }

    fn delete_grade(&self, student_id: i64, course_id: i64) -> Result<bool> {
        let removed = self.conn.execute(
            "DELETE FROM grades WHERE student_id = ?1 AND course_id = ?2",
            [student_id, course_id],
        )?;
        Ok(removed > 0)
    }

    fn student_grades(&self, student_id: i64) -> Result<Vec<GradeRow>> {
        let mut stmt = self.conn.prepare(
            "SELECT c.course_id, c.course_name, g.grade
             FROM enrollments e
             INNER JOIN courses c ON e.course_id = c.course_id
             LEFT JOIN grades g ON e.student_id = g.student_id AND e.course_id = g.course_id
             WHERE e.student_id = ?1
             ORDER BY c.course_name, c.course_id",
        )?;
        let rows = stmt.query_map([student_id], |row| {
            Ok(GradeRow {
                course_id: row.get(0)?,
                course_name: row.get(1)?,
                grade: row.get(2)?,
            })
        })?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }
}
