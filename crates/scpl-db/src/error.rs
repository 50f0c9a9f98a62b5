/// Error type produced by store implementations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A unique constraint was violated (e.g. duplicate email).
    #[error("conflict: {0}")]
    Conflict(String),

    /// The search expression could not be compiled.
    #[error("invalid search pattern: {0}")]
    InvalidPattern(String),

    /// A stored row could not be mapped back to a domain value.
    #[error("corrupt record: {0}")]
    Corrupt(String),
}

impl StoreError {
    /// Maps PostgreSQL's `invalid_regular_expression` (2201B) to
    /// [`StoreError::InvalidPattern`]; everything else stays a database error.
    pub(crate) fn from_search(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db) = &err {
            if db.code().as_deref() == Some("2201B") {
                return StoreError::InvalidPattern(db.message().to_string());
            }
        }
        StoreError::Database(err)
    }
}
