//! Form actions and the displayed list snapshot.

use super::fields::{FormError, FormFields};
use crate::model::student::DisplayRow;
use crate::repo::student_repo::{RepoError, StudentRepository};
use log::debug;
use std::fmt::{Display, Formatter};

const MSG_ADDED: &str = "Student Added Successfully!";
const MSG_UPDATED: &str = "Student Updated Successfully!";
const MSG_DELETED: &str = "Student Deleted Successfully!";
const MSG_DUPLICATE: &str = "Roll No already exists!";
const MSG_NOT_FOUND: &str = "Student not found!";
const MSG_REFRESH_FAILED: &str = "list could not be refreshed";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// Transient user-facing message produced by a form action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }

    pub fn title(&self) -> &'static str {
        match self.kind {
            NoticeKind::Success => "Success",
            NoticeKind::Error => "Error",
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == NoticeKind::Error
    }
}

impl Display for Notice {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.title(), self.message)
    }
}

impl From<FormError> for Notice {
    fn from(value: FormError) -> Self {
        Self::error(value.to_string())
    }
}

impl From<RepoError> for Notice {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::DuplicateKey(_) => Self::error(MSG_DUPLICATE),
            RepoError::NotFound(_) => Self::error(MSG_NOT_FOUND),
            other => Self::error(format!("Storage failure: {other}")),
        }
    }
}

/// Adapter driving the record store from form actions.
///
/// Holds nothing but the currently displayed rows. Every action calls one
/// store operation, optionally yields a [`Notice`], and recomputes the rows.
pub struct StudentForm<R: StudentRepository> {
    store: R,
    displayed: Vec<DisplayRow>,
}

impl<R: StudentRepository> StudentForm<R> {
    /// Creates a form with an empty displayed list.
    pub fn new(store: R) -> Self {
        Self {
            store,
            displayed: Vec::new(),
        }
    }

    pub fn store(&self) -> &R {
        &self.store
    }

    /// Rows currently shown, in store order or as narrowed by a search.
    pub fn displayed(&self) -> &[DisplayRow] {
        &self.displayed
    }

    /// Inserts the record built from `fields`, then reloads the list.
    ///
    /// The list is reloaded even when the insert is rejected, which leaves it
    /// matching the unchanged store.
    pub fn on_add(&mut self, fields: &FormFields) -> Option<Notice> {
        let record = match fields.to_record() {
            Ok(record) => record,
            Err(err) => return Some(self.rejected("add", err)),
        };

        let notice = match self.store.insert_student(&record) {
            Ok(()) => Notice::success(MSG_ADDED),
            Err(err) => err.into(),
        };
        Some(self.finish_mutation("add", notice))
    }

    /// Replaces name, course and marks of the record keyed by the entered
    /// roll number, then reloads the list.
    pub fn on_update(&mut self, fields: &FormFields) -> Option<Notice> {
        let record = match fields.to_record() {
            Ok(record) => record,
            Err(err) => return Some(self.rejected("update", err)),
        };

        let notice = match self.store.update_student(&record) {
            Ok(()) => Notice::success(MSG_UPDATED),
            Err(err) => err.into(),
        };
        Some(self.finish_mutation("update", notice))
    }

    /// Deletes by the entered roll number; other fields are ignored.
    pub fn on_delete(&mut self, fields: &FormFields) -> Option<Notice> {
        let roll_no = match fields.roll_no() {
            Ok(roll_no) => roll_no,
            Err(err) => return Some(self.rejected("delete", err)),
        };

        let notice = match self.store.delete_student(roll_no) {
            Ok(()) => Notice::success(MSG_DELETED),
            Err(err) => err.into(),
        };
        Some(self.finish_mutation("delete", notice))
    }

    /// Narrows the list to the record with the entered roll number.
    ///
    /// On a miss the current list is kept as is and a not-found notice is
    /// returned.
    pub fn on_search(&mut self, fields: &FormFields) -> Option<Notice> {
        let roll_no = match fields.roll_no() {
            Ok(roll_no) => roll_no,
            Err(err) => return Some(self.rejected("search", err)),
        };

        match self.store.get_student(roll_no) {
            Ok(Some(record)) => {
                debug!("event=form_action module=form action=search status=hit");
                self.displayed = vec![record.into()];
                None
            }
            Ok(None) => {
                debug!("event=form_action module=form action=search status=miss");
                Some(Notice::error(MSG_NOT_FOUND))
            }
            Err(err) => Some(err.into()),
        }
    }

    /// Replaces the list with every stored record.
    pub fn on_view_all(&mut self) -> Option<Notice> {
        self.refresh().err().map(Notice::from)
    }

    fn refresh(&mut self) -> Result<(), RepoError> {
        let students = self.store.list_students()?;
        self.displayed = students.into_iter().map(DisplayRow::from).collect();
        Ok(())
    }

    /// Reloads the list after a mutation attempt.
    ///
    /// The mutation outcome is already final, so a failed reload never changes
    /// the notice kind; it is appended to the message instead.
    fn finish_mutation(&mut self, action: &'static str, mut notice: Notice) -> Notice {
        debug!(
            "event=form_action module=form action={action} status={}",
            if notice.is_error() { "error" } else { "ok" }
        );
        if let Err(err) = self.refresh() {
            notice.message = format!("{} ({MSG_REFRESH_FAILED}: {err})", notice.message);
        }
        notice
    }

    fn rejected(&self, action: &'static str, err: FormError) -> Notice {
        let FormError::InvalidInput { field, .. } = &err;
        debug!("event=form_action module=form action={action} status=invalid_input field={field}");
        err.into()
    }
}
