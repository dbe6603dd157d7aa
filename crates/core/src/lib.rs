//! Domain layer for the bug tracker.
//!
//! Pure types and decision functions with no I/O: field validation, the
//! create/update contract for bug reports, and shared error types.

pub mod bug_report;
pub mod error;
pub mod search;
pub mod types;
