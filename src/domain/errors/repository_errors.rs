/// Errors raised by the supplier persistence layer
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RepositoryError {
    #[error("Supplier not found: {id}")]
    NotFound { id: i64 },

    #[error("Database error: {message}")]
    Database { message: String },
}

impl From<sqlx::Error> for RepositoryError {
    fn from(err: sqlx::Error) -> Self {
        RepositoryError::Database {
            message: err.to_string(),
        }
    }
}

/// Result type for repository operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;
