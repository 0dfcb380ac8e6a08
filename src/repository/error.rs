//! Repository Errors
//!
//! Error types shared by every repository adapter.

/// Result alias for repository operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Errors a repository can report to the usecases
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepositoryError {
    /// No row matched the lookup
    #[error("record not found: {entity} {id}")]
    NotFound { entity: &'static str, id: String },

    /// The company balance cannot cover a debit
    #[error("Insufficient balance")]
    InsufficientBalance,

    /// Rejected balance movement (zero or negative)
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Storage or connectivity failure
    #[error("Database error: {0}")]
    Database(String),
}

impl RepositoryError {
    /// Create a not-found error for an entity lookup
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// Check if this is the distinguished "record not found" condition
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl From<sqlx::Error> for RepositoryError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => Self::not_found("record", "unknown"),
            other => Self::Database(other.to_string()),
        }
    }
}
