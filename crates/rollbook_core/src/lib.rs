//! Core logic for rollbook, a single-table student record manager.
//! Every record invariant is enforced in this crate.

pub mod db;
pub mod form;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use form::{FormError, FormFields, Notice, NoticeKind, StudentForm};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::student::{DisplayRow, StudentRecord, StudentValidationError};
pub use repo::student_repo::{RepoError, RepoResult, SqliteStudentRepository, StudentRepository};
pub use service::student_store::{StudentStore, DEFAULT_DB_FILE_NAME};
