//! Domain-level error types.

use thiserror::Error;
use uuid::Uuid;

/// Domain errors - business logic failures.
#[derive(Debug, Error)]
pub enum DomainError {
    /// Absent, or present but hidden from this viewer. Callers cannot tell which.
    #[error("{entity} not found: {key}")]
    NotFound { entity: &'static str, key: String },

    #[error("Authentication required")]
    AuthenticationRequired,

    /// The viewer is not the author. Handled by sending the viewer back to
    /// the read-only detail of `post_id` rather than reporting an error.
    #[error("Not the author; falling back to post {post_id}")]
    Denied { post_id: Uuid },

    #[error("Validation failed: {}", .0.join(", "))]
    Validation(Vec<String>),

    #[error("Duplicate entity: {0}")]
    Duplicate(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn not_found(entity: &'static str, key: impl ToString) -> Self {
        DomainError::NotFound {
            entity,
            key: key.to_string(),
        }
    }
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Entity not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    Constraint(String),

    /// The entity points at a row that does not exist.
    #[error("Missing reference: {0}")]
    MissingReference(String),

    /// The entity breaks a field rule and was not written.
    #[error("Invalid entity: {0}")]
    Invalid(String),
}

impl From<RepoError> for DomainError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound => DomainError::not_found("record", "unknown"),
            RepoError::Constraint(msg) => DomainError::Duplicate(msg),
            RepoError::MissingReference(msg) | RepoError::Invalid(msg) => {
                DomainError::Validation(vec![msg])
            }
            RepoError::Connection(msg) | RepoError::Query(msg) => DomainError::Internal(msg),
        }
    }
}
