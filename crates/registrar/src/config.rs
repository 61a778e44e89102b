//! Registrar configuration.
//!
//! Loaded from an optional JSON file, then overridden from the environment:
//!
//! ```json
//! {
//!   "database": "registrar.sqlite3",
//!   "timetable": { "first_minute": 480, "last_minute": 1080, "slot_minutes": 30 }
//! }
//! ```
//!
//! Missing keys fall back to [`RegistrarConfig::default`].

use std::path::{Path, PathBuf};

use course_time::GridConfig;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Environment variable overriding [`RegistrarConfig::database`].
pub const DATABASE_ENV: &str = "REGISTRAR_DATABASE";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistrarConfig {
    /// SQLite database file.
    pub database: PathBuf,
    /// Grid used for student timetables.
    pub timetable: GridConfig,
}

impl Default for RegistrarConfig {
    fn default() -> Self {
        RegistrarConfig {
            database: PathBuf::from("registrar.sqlite3"),
            timetable: GridConfig::default(),
        }
    }
}

impl RegistrarConfig {
    /// Load from `path` (defaults when `None`), apply the process environment,
    /// and validate.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Apply overrides from `lookup`, which maps variable names to values.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(database) = lookup(DATABASE_ENV).filter(|v| !v.trim().is_empty()) {
            self.database = PathBuf::from(database);
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.timetable.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config: RegistrarConfig =
            serde_json::from_str(r#"{"timetable": {"include_weekends": true}}"#).unwrap();
        assert_eq!(config.database, PathBuf::from("registrar.sqlite3"));
        assert!(config.timetable.include_weekends);
        assert_eq!(config.timetable.slot_minutes, 30);
    }

    #[test]
    fn env_overrides_database() {
        let mut config = RegistrarConfig::default();
        config.apply_env(|key| (key == DATABASE_ENV).then(|| "/tmp/other.sqlite3".to_string()));
        assert_eq!(config.database, PathBuf::from("/tmp/other.sqlite3"));
    }

    #[test]
    fn blank_env_value_is_ignored() {
        let mut config = RegistrarConfig::default();
        config.apply_env(|_| Some("  ".to_string()));
        assert_eq!(config.database, PathBuf::from("registrar.sqlite3"));
    }

    #[test]
    fn invalid_grid_fails_validation() {
        let mut config = RegistrarConfig::default();
        config.timetable.slot_minutes = 0;
        assert!(config.validate().is_err());
    }
}
