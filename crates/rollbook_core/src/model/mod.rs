//! Domain model for student records.
//!
//! # Invariants
//! - A record is identified by its `roll_no` and nothing else.
//! - Records carry no references to other entities.

pub mod student;
