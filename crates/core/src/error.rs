use crate::bug_report::Rejection;
use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    /// A submission rejected by the bug report contract, with every
    /// failing field in evaluation order.
    #[error("Validation failed: {0}")]
    Rejected(#[from] Rejection),

    #[error("Internal error: {0}")]
    Internal(String),
}
