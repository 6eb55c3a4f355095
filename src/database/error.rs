use thiserror::Error;

/// Failures surfaced by the stores and the services built on them.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid: {0}")]
    Invalid(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Invalid database URL")]
    InvalidDatabaseUrl,

    #[error(transparent)]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

impl StoreError {
    pub fn not_found(message: impl Into<String>) -> Self {
        StoreError::NotFound(message.into())
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        StoreError::Invalid(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        StoreError::Forbidden(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        StoreError::Unauthorized(message.into())
    }

    /// Map `RowNotFound` onto a typed `NotFound` for the named entity.
    pub fn or_not_found(err: sqlx::Error, what: &str) -> Self {
        match err {
            sqlx::Error::RowNotFound => StoreError::NotFound(format!("{} not found", what)),
            other => StoreError::Sqlx(other),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }
}

fn has_sqlstate(err: &sqlx::Error, code: &str) -> bool {
    match err {
        sqlx::Error::Database(db) => db.code().as_deref() == Some(code),
        _ => false,
    }
}

/// True when a database error is a unique-key violation (SQLSTATE 23505).
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    has_sqlstate(err, "23505")
}

/// True when an insert referenced a parent row that does not exist (23503).
pub fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    has_sqlstate(err, "23503")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_not_found_becomes_typed() {
        let err = StoreError::or_not_found(sqlx::Error::RowNotFound, "Container");
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Not found: Container not found");
    }

    #[test]
    fn other_errors_stay_internal() {
        let err = StoreError::or_not_found(sqlx::Error::PoolTimedOut, "Container");
        assert!(matches!(err, StoreError::Sqlx(sqlx::Error::PoolTimedOut)));
        assert!(!is_unique_violation(&sqlx::Error::PoolTimedOut));
    }
}
