//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod bug_report_repo;

pub use bug_report_repo::BugReportRepo;
