//! Presentation adapter between form fields and the record store.
//!
//! # Responsibility
//! - Turn raw field text into well-typed store calls.
//! - Keep the displayed list in sync with the store after each action.
//! - Translate every store outcome into a user-facing notice.
//!
//! # Invariants
//! - The displayed list is a snapshot; the store stays authoritative.
//! - No action lets an error escape; failures become notices and leave the
//!   snapshot as it was.

mod adapter;
mod fields;

pub use adapter::{Notice, NoticeKind, StudentForm};
pub use fields::{FormError, FormFields};
