//! Student repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide insert/update/delete/list/get over the `student` table.
//! - Translate constraint violations and zero-row writes into record-level
//!   errors.
//!
//! # Invariants
//! - Insert never overwrites: the primary key rejects collisions inside the
//!   statement itself, so a failed insert writes nothing.
//! - Update never upserts and never touches `roll_no`.
//! - List order is storage order (`rowid ASC`).
//! - Read paths reject malformed persisted rows instead of masking them.

use crate::db::migrations::{current_user_version, latest_version};
use crate::db::DbError;
use crate::model::student::{StudentRecord, StudentValidationError};
use rusqlite::types::Value;
use rusqlite::{ffi, params, Connection, ErrorCode, OptionalExtension, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const STUDENT_TABLE: &str = "student";
const STUDENT_COLUMNS: &[&str] = &["roll_no", "name", "course", "marks"];

const STUDENT_SELECT_SQL: &str = "SELECT
    roll_no,
    name,
    course,
    marks
FROM student";

pub type RepoResult<T> = Result<T, RepoError>;

/// Error for student persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(StudentValidationError),
    Db(DbError),
    /// Insert addressed a `roll_no` that already exists.
    DuplicateKey(String),
    /// Update or delete addressed a `roll_no` that does not exist.
    NotFound(String),
    InvalidData(String),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::DuplicateKey(roll_no) => write!(f, "roll_no already exists: {roll_no}"),
            Self::NotFound(roll_no) => write!(f, "student not found: {roll_no}"),
            Self::InvalidData(message) => write!(f, "invalid persisted student data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}"
            ),
            Self::MissingRequiredTable(table) => write!(f, "missing required table `{table}`"),
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "missing required column `{table}.{column}`")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StudentValidationError> for RepoError {
    fn from(value: StudentValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// The record-store contract: five operations over student records.
pub trait StudentRepository {
    /// Persists a new record. Fails with `DuplicateKey` when the key exists.
    fn insert_student(&self, record: &StudentRecord) -> RepoResult<()>;
    /// Replaces `name`, `course` and `marks` of the record addressed by
    /// `record.roll_no`. Fails with `NotFound` when no such record exists.
    fn update_student(&self, record: &StudentRecord) -> RepoResult<()>;
    /// Removes the record with `roll_no`. Fails with `NotFound` when absent.
    fn delete_student(&self, roll_no: &str) -> RepoResult<()>;
    /// Returns every record in storage order.
    fn list_students(&self) -> RepoResult<Vec<StudentRecord>>;
    /// Returns the record with `roll_no`, or `None`.
    fn get_student(&self, roll_no: &str) -> RepoResult<Option<StudentRecord>>;
}

impl<R: StudentRepository + ?Sized> StudentRepository for &R {
    fn insert_student(&self, record: &StudentRecord) -> RepoResult<()> {
        (**self).insert_student(record)
    }

    fn update_student(&self, record: &StudentRecord) -> RepoResult<()> {
        (**self).update_student(record)
    }

    fn delete_student(&self, roll_no: &str) -> RepoResult<()> {
        (**self).delete_student(roll_no)
    }

    fn list_students(&self) -> RepoResult<Vec<StudentRecord>> {
        (**self).list_students()
    }

    fn get_student(&self, roll_no: &str) -> RepoResult<Option<StudentRecord>> {
        (**self).get_student(roll_no)
    }
}

/// SQLite-backed student repository over a borrowed connection.
pub struct SqliteStudentRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteStudentRepository<'conn> {
    /// Wraps a connection after checking it carries the current schema.
    ///
    /// # Errors
    /// - `UninitializedConnection` when migrations were not applied.
    /// - `MissingRequiredTable` / `MissingRequiredColumn` when the schema is
    ///   not the one this repository queries.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        let actual_version = current_user_version(conn)?;
        let expected_version = latest_version();
        if actual_version != expected_version {
            return Err(RepoError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }

        let columns = table_columns(conn, STUDENT_TABLE)?;
        if columns.is_empty() {
            return Err(RepoError::MissingRequiredTable(STUDENT_TABLE));
        }
        if let Some(&column) = STUDENT_COLUMNS
            .iter()
            .find(|column| !columns.iter().any(|name| name == *column))
        {
            return Err(RepoError::MissingRequiredColumn {
                table: STUDENT_TABLE,
                column,
            });
        }

        Ok(Self { conn })
    }

    /// Counts legacy rows moved out of `student` because they could not be
    /// read as records.
    pub fn count_quarantined(&self) -> RepoResult<u64> {
        let count = self.conn.query_row(
            "SELECT COUNT(*) FROM student_quarantine;",
            [],
            |row| row.get::<_, u64>(0),
        )?;
        Ok(count)
    }
}

impl StudentRepository for SqliteStudentRepository<'_> {
    fn insert_student(&self, record: &StudentRecord) -> RepoResult<()> {
        record.validate()?;

        let result = self.conn.execute(
            "INSERT INTO student (roll_no, name, course, marks) VALUES (?1, ?2, ?3, ?4);",
            params![
                record.roll_no.as_str(),
                record.name.as_str(),
                record.course.as_str(),
                record.marks,
            ],
        );

        match result {
            Ok(_) => Ok(()),
            Err(err) if is_primary_key_violation(&err) => {
                Err(RepoError::DuplicateKey(record.roll_no.clone()))
            }
            Err(err) => Err(err.into()),
        }
    }

    fn update_student(&self, record: &StudentRecord) -> RepoResult<()> {
        record.validate()?;

        let changed = self.conn.execute(
            "UPDATE student
             SET
                name = ?1,
                course = ?2,
                marks = ?3
             WHERE roll_no = ?4;",
            params![
                record.name.as_str(),
                record.course.as_str(),
                record.marks,
                record.roll_no.as_str(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(record.roll_no.clone()));
        }

        Ok(())
    }

    fn delete_student(&self, roll_no: &str) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM student WHERE roll_no = ?1;", [roll_no])?;

        if changed == 0 {
            return Err(RepoError::NotFound(roll_no.to_string()));
        }

        Ok(())
    }

    fn list_students(&self) -> RepoResult<Vec<StudentRecord>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{STUDENT_SELECT_SQL} ORDER BY rowid ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut students = Vec::new();

        while let Some(row) = rows.next()? {
            students.push(parse_student_row(row)?);
        }

        Ok(students)
    }

    fn get_student(&self, roll_no: &str) -> RepoResult<Option<StudentRecord>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{STUDENT_SELECT_SQL} WHERE roll_no = ?1;"))?;
        let mut rows = stmt.query([roll_no])?;
        match rows.next()? {
            Some(row) => Ok(Some(parse_student_row(row)?)),
            None => Ok(None),
        }
    }
}

fn parse_student_row(row: &Row<'_>) -> RepoResult<StudentRecord> {
    let roll_no: String = row.get("roll_no")?;

    // Legacy databases declared no NOT NULL and stored marks as typed text.
    let marks = match row.get::<_, Value>("marks")? {
        Value::Integer(value) => value,
        Value::Text(text) => text.trim().parse::<i64>().map_err(|_| {
            RepoError::InvalidData(format!(
                "non-integer marks `{text}` in student.marks for roll_no `{roll_no}`"
            ))
        })?,
        other => {
            return Err(RepoError::InvalidData(format!(
                "unexpected {} in student.marks for roll_no `{roll_no}`",
                value_kind(&other)
            )));
        }
    };

    let student = StudentRecord {
        name: row.get::<_, Option<String>>("name")?.unwrap_or_default(),
        course: row.get::<_, Option<String>>("course")?.unwrap_or_default(),
        marks,
        roll_no,
    };
    student.validate()?;
    Ok(student)
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "NULL",
        Value::Integer(_) => "integer",
        Value::Real(_) => "real",
        Value::Text(_) => "text",
        Value::Blob(_) => "blob",
    }
}

fn is_primary_key_violation(err: &rusqlite::Error) -> bool {
    match err {
        rusqlite::Error::SqliteFailure(failure, _) => {
            failure.code == ErrorCode::ConstraintViolation
                && failure.extended_code == ffi::SQLITE_CONSTRAINT_PRIMARYKEY
        }
        _ => false,
    }
}

fn table_columns(conn: &Connection, table: &str) -> RepoResult<Vec<String>> {
    let exists = conn
        .query_row(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name = ?1;",
            [table],
            |row| row.get::<_, String>(0),
        )
        .optional()?;
    if exists.is_none() {
        return Ok(Vec::new());
    }

    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let columns = stmt
        .query_map([], |row| row.get::<_, String>("name"))?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(columns)
}
