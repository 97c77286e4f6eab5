//! Raw form field values and their validation.

use crate::model::student::StudentRecord;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Input rejected before any store call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    InvalidInput {
        field: &'static str,
        message: String,
    },
}

impl Display for FormError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput { message, .. } => write!(f, "{message}"),
        }
    }
}

impl Error for FormError {}

/// Text currently held by the four form fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    pub roll_no: String,
    pub name: String,
    pub course: String,
    pub marks: String,
}

impl FormFields {
    pub fn new(
        roll_no: impl Into<String>,
        name: impl Into<String>,
        course: impl Into<String>,
        marks: impl Into<String>,
    ) -> Self {
        Self {
            roll_no: roll_no.into(),
            name: name.into(),
            course: course.into(),
            marks: marks.into(),
        }
    }

    /// Fields for key-only actions (delete, search).
    pub fn roll_no_only(roll_no: impl Into<String>) -> Self {
        Self {
            roll_no: roll_no.into(),
            ..Self::default()
        }
    }

    /// Returns the trimmed roll number.
    ///
    /// # Errors
    /// - `InvalidInput` on `roll_no` when the field is blank.
    pub fn roll_no(&self) -> Result<&str, FormError> {
        let roll_no = self.roll_no.trim();
        if roll_no.is_empty() {
            return Err(FormError::InvalidInput {
                field: "roll_no",
                message: "Roll No is required!".to_string(),
            });
        }
        Ok(roll_no)
    }

    /// Parses all four fields into a record.
    ///
    /// # Errors
    /// - `InvalidInput` on `roll_no` when blank.
    /// - `InvalidInput` on `marks` when the text is not a whole number.
    pub fn to_record(&self) -> Result<StudentRecord, FormError> {
        let roll_no = self.roll_no()?;
        let marks_text = self.marks.trim();
        let marks = marks_text
            .parse::<i64>()
            .map_err(|_| FormError::InvalidInput {
                field: "marks",
                message: format!("Marks must be a whole number, got `{marks_text}`!"),
            })?;

        Ok(StudentRecord::new(
            roll_no,
            self.name.trim(),
            self.course.trim(),
            marks,
        ))
    }
}
