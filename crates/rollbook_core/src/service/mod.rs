//! Use-case services over the repository layer.
//!
//! # Responsibility
//! - Own the storage handle lifecycle so callers never see a connection.

pub mod student_store;
