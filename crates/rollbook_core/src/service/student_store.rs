//! Authoritative record store for student records.
//!
//! # Responsibility
//! - Expose initialize plus the five record operations behind a path.
//! - Scope one SQLite connection to each operation.
//!
//! # Invariants
//! - A connection is opened at the start of every operation and dropped
//!   before it returns, on success and on every error path.
//! - Each operation runs exactly one repository call, so it either applies
//!   fully or not at all.
//! - Log events carry keys and outcomes only, never field contents.

use crate::db::open_db;
use crate::model::student::StudentRecord;
use crate::repo::student_repo::{
    RepoError, RepoResult, SqliteStudentRepository, StudentRepository,
};
use log::{error, log, warn, Level};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// File name used when no database path is configured.
pub const DEFAULT_DB_FILE_NAME: &str = "students.db";

/// Record store backed by a single local SQLite file.
#[derive(Debug, Clone)]
pub struct StudentStore {
    db_path: PathBuf,
}

impl StudentStore {
    /// Creates a store for `db_path` without touching the file.
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
        }
    }

    /// Creates a store and makes sure its schema exists.
    pub fn open(db_path: impl Into<PathBuf>) -> RepoResult<Self> {
        let store = Self::new(db_path);
        store.initialize()?;
        Ok(store)
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    /// Ensures the `student` table exists.
    ///
    /// Idempotent: safe on every startup, whatever state the file is in,
    /// as long as its schema is not newer than this binary.
    ///
    /// Legacy rows with a blank roll number or non-integer marks are moved to
    /// `student_quarantine` by the schema upgrade; their count is logged.
    pub fn initialize(&self) -> RepoResult<()> {
        let quarantined =
            self.scoped("store_init", Level::Info, |repo| repo.count_quarantined())?;
        if quarantined > 0 {
            warn!(
                "event=store_init module=store status=quarantine quarantined_rows={quarantined}"
            );
        }
        Ok(())
    }

    fn scoped<T>(
        &self,
        event: &'static str,
        ok_level: Level,
        op: impl FnOnce(&SqliteStudentRepository<'_>) -> RepoResult<T>,
    ) -> RepoResult<T> {
        let started_at = Instant::now();
        let result = self.with_repo(op);
        let duration_ms = started_at.elapsed().as_millis();

        match &result {
            Ok(_) => log!(
                ok_level,
                "event={event} module=store status=ok duration_ms={duration_ms}"
            ),
            Err(err @ (RepoError::DuplicateKey(_) | RepoError::NotFound(_))) => warn!(
                "event={event} module=store status=rejected duration_ms={duration_ms} error_code={}",
                error_code(err)
            ),
            Err(err) => error!(
                "event={event} module=store status=error duration_ms={duration_ms} error_code={} error={err}",
                error_code(err)
            ),
        }

        result
    }

    fn with_repo<T>(
        &self,
        op: impl FnOnce(&SqliteStudentRepository<'_>) -> RepoResult<T>,
    ) -> RepoResult<T> {
        let conn = open_db(&self.db_path)?;
        let repo = SqliteStudentRepository::try_new(&conn)?;
        op(&repo)
    }
}

impl StudentRepository for StudentStore {
    fn insert_student(&self, record: &StudentRecord) -> RepoResult<()> {
        self.scoped("student_insert", Level::Info, |repo| repo.insert_student(record))
    }

    fn update_student(&self, record: &StudentRecord) -> RepoResult<()> {
        self.scoped("student_update", Level::Info, |repo| repo.update_student(record))
    }

    fn delete_student(&self, roll_no: &str) -> RepoResult<()> {
        self.scoped("student_delete", Level::Info, |repo| repo.delete_student(roll_no))
    }

    fn list_students(&self) -> RepoResult<Vec<StudentRecord>> {
        self.scoped("student_list", Level::Debug, |repo| repo.list_students())
    }

    fn get_student(&self, roll_no: &str) -> RepoResult<Option<StudentRecord>> {
        self.scoped("student_get", Level::Debug, |repo| repo.get_student(roll_no))
    }
}

fn error_code(err: &RepoError) -> &'static str {
    match err {
        RepoError::Validation(_) => "validation_failed",
        RepoError::Db(_) => "db_error",
        RepoError::DuplicateKey(_) => "duplicate_key",
        RepoError::NotFound(_) => "not_found",
        RepoError::InvalidData(_) => "invalid_data",
        RepoError::UninitializedConnection { .. } => "uninitialized_connection",
        RepoError::MissingRequiredTable(_) => "missing_table",
        RepoError::MissingRequiredColumn { .. } => "missing_column",
    }
}
