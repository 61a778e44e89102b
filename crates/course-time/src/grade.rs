//! Numeric score to letter grade mapping.
//!
//! [`convert_score_to_grade`] is the single conversion every grade write goes
//! through, whichever role performs it. Numeric input maps through
//! [`BREAKPOINTS`]; anything else is taken to be a letter grade already and
//! passes through untouched.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LetterGrade {
    #[serde(rename = "A+")]
    APlus,
    A,
    #[serde(rename = "A-")]
    AMinus,
    #[serde(rename = "B+")]
    BPlus,
    B,
    #[serde(rename = "B-")]
    BMinus,
    #[serde(rename = "C+")]
    CPlus,
    C,
    #[serde(rename = "C-")]
    CMinus,
    D,
    F,
}

/// Inclusive lower bounds, checked top-down; first match wins. Below 50 is `F`.
pub const BREAKPOINTS: [(f64, LetterGrade); 10] = [
    (95.0, LetterGrade::APlus),
    (90.0, LetterGrade::A),
    (85.0, LetterGrade::AMinus),
    (80.0, LetterGrade::BPlus),
    (75.0, LetterGrade::B),
    (70.0, LetterGrade::BMinus),
    (65.0, LetterGrade::CPlus),
    (60.0, LetterGrade::C),
    (55.0, LetterGrade::CMinus),
    (50.0, LetterGrade::D),
];

impl LetterGrade {
    pub fn from_score(score: f64) -> LetterGrade {
        BREAKPOINTS
            .iter()
            .find(|(floor, _)| score >= *floor)
            .map(|(_, grade)| *grade)
            .unwrap_or(LetterGrade::F)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LetterGrade::APlus => "A+",
            LetterGrade::A => "A",
            LetterGrade::AMinus => "A-",
            LetterGrade::BPlus => "B+",
            LetterGrade::B => "B",
            LetterGrade::BMinus => "B-",
            LetterGrade::CPlus => "C+",
            LetterGrade::C => "C",
            LetterGrade::CMinus => "C-",
            LetterGrade::D => "D",
            LetterGrade::F => "F",
        }
    }
}

impl fmt::Display for LetterGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse `input` as a finite score, if it is one.
pub fn parse_score(input: &str) -> Option<f64> {
    input
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|score| score.is_finite())
}

/// Convert a raw grade input to its canonical stored form.
///
/// `"92"` becomes `"A"`; `"B+"` (or any non-numeric text) is returned as is.
/// No check is made that pass-through text is a known letter grade.
pub fn convert_score_to_grade(input: &str) -> String {
    match parse_score(input) {
        Some(score) => LetterGrade::from_score(score).to_string(),
        None => input.to_string(),
    }
}

/// What a grade write should do to the stored record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GradeAction {
    /// Delete the (student, course) grade record.
    Clear,
    /// Upsert this canonical grade for (student, course).
    Set(String),
}

impl GradeAction {
    /// `None` and `""` clear the grade; anything else sets its canonical form.
    pub fn from_input(input: Option<&str>) -> GradeAction {
        match input {
            None | Some("") => GradeAction::Clear,
            Some(raw) => GradeAction::Set(convert_score_to_grade(raw)),
        }
    }
}
