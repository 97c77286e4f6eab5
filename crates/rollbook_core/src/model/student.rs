//! Student record model.
//!
//! # Responsibility
//! - Define the single persisted entity and its validation rule.
//! - Provide the tuple shape the form displays.
//!
//! # Invariants
//! - `roll_no` is non-blank and never changes after insert.
//! - `name` and `course` are free text; duplicates are allowed.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Display tuple `(roll_no, name, course, marks)`.
pub type DisplayRow = (String, String, String, i64);

/// One student's stored attributes, keyed by roll number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StudentRecord {
    /// Primary key. Addressing key for update and delete.
    pub roll_no: String,
    pub name: String,
    pub course: String,
    pub marks: i64,
}

/// Validation failure for a [`StudentRecord`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StudentValidationError {
    EmptyRollNo,
}

impl Display for StudentValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyRollNo => write!(f, "roll_no must not be empty"),
        }
    }
}

impl Error for StudentValidationError {}

impl StudentRecord {
    pub fn new(
        roll_no: impl Into<String>,
        name: impl Into<String>,
        course: impl Into<String>,
        marks: i64,
    ) -> Self {
        Self {
            roll_no: roll_no.into(),
            name: name.into(),
            course: course.into(),
            marks,
        }
    }

    /// Checks the record before it reaches storage.
    ///
    /// # Errors
    /// - `EmptyRollNo` when `roll_no` is empty or whitespace only.
    pub fn validate(&self) -> Result<(), StudentValidationError> {
        if self.roll_no.trim().is_empty() {
            return Err(StudentValidationError::EmptyRollNo);
        }
        Ok(())
    }
}

impl From<StudentRecord> for DisplayRow {
    fn from(value: StudentRecord) -> Self {
        (value.roll_no, value.name, value.course, value.marks)
    }
}
