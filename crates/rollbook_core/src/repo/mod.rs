//! Repository contracts and the SQLite implementation.
//!
//! # Responsibility
//! - Define the record-store contract used by the form and the CLI.
//! - Keep SQL behind the repository boundary.
//!
//! # Invariants
//! - Writes call `StudentRecord::validate()` first.
//! - Key collisions and missing keys surface as `DuplicateKey` / `NotFound`,
//!   never as raw SQLite errors.

pub mod student_repo;
