//! # registrar
//!
//! Course registration, course administration and grading on top of the
//! [`course_time`] engine.
//!
//! Workflows go through [`Registrar`], which reads from and writes to a
//! [`CourseStore`]. [`SqliteStore`] is the relational backend.
//!
//! ```rust
//! use registrar::{CourseDraft, Registrar, RegistrarError, SqliteStore, StaffRole};
//! use course_time::GridConfig;
//!
//! let store = SqliteStore::open_in_memory().unwrap();
//! let student = store.add_student("Ada", "Lovelace", None).unwrap();
//! let registrar = Registrar::new(store, GridConfig::default());
//!
//! let algo = registrar
//!     .create_course(&CourseDraft {
//!         course_name: "Algorithms".into(),
//!         time: Some("Mon/Wed 10:00-11:30".into()),
//!         ..Default::default()
//!     })
//!     .unwrap();
//! let db = registrar
//!     .create_course(&CourseDraft {
//!         course_name: "Databases".into(),
//!         time: Some("Wed 11:00-12:00".into()),
//!         ..Default::default()
//!     })
//!     .unwrap();
//!
//! registrar.register(student, algo).unwrap();
//! let err = registrar.register(student, db).unwrap_err();
//! assert!(matches!(err, RegistrarError::Conflict { .. }));
//! assert_eq!(err.status_code(), 400);
//! ```
//!
//! ## Modules
//!
//! - [`service`]: registration, course admin and grading workflows
//! - [`store`]: the data-access trait and record types
//! - [`sqlite`]: SQLite implementation of the store
//! - [`config`]: file + environment configuration
//! - [`error`]: Error types

pub mod config;
pub mod error;
pub mod service;
pub mod sqlite;
pub mod store;

pub use config::RegistrarConfig;
pub use error::RegistrarError;
pub use service::{Actor, GradeOutcome, Registrar};
pub use sqlite::{SqliteStore, StaffRole};
pub use store::{CourseDraft, CourseRecord, CourseStore, GradeRow};
