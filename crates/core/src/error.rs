use crate::types::DbId;

/// Domain-level error type shared across the workspace.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// No record of the given entity exists under this id.
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    /// The input failed a local validation rule.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The operation conflicts with existing state (e.g. a unique value).
    #[error("conflict: {0}")]
    Conflict(String),

    /// An unexpected internal failure.
    #[error("internal error: {0}")]
    Internal(String),
}
