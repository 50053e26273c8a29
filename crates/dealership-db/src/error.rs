//! # Database Error Types
//!
//! Error types for database operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  PostgreSQL error (sqlx::Error)     ValidationError / CoreError        │
//! │       │                                  │                              │
//! │       ▼                                  ▼                              │
//! │  DbError (this module) ← Adds context and categorization               │
//! │       │                                                                 │
//! │       ├──► Repositories return DbResult<T> (kind is visible)           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DataAccess facade logs it, rolls back, returns None / [] / false      │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use dealership_core::{CoreError, ValidationError};
use sqlx::error::ErrorKind;
use thiserror::Error;

/// The four ways an operation can fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Database unreachable or misconfigured.
    Connection,
    /// Caller input failed coercion or a range rule; no query ran.
    Validation,
    /// A referenced make/model/customer/salesperson/sale does not exist.
    Lookup,
    /// The database rejected a statement.
    Statement,
}

/// Database operation errors.
///
/// These errors wrap sqlx errors and domain rejections and keep the
/// failure kind available to callers that want more than a boolean.
#[derive(Debug, Error)]
pub enum DbError {
    /// Input validation or lookup failure from the domain layer.
    #[error(transparent)]
    Rejected(#[from] CoreError),

    /// A lookup that must be unique matched several rows.
    ///
    /// ## When This Occurs
    /// - Two models with the same name (ignoring case) under one make,
    ///   possible only when the unique index is missing
    #[error("{entity} '{name}' is ambiguous: {matches} matches")]
    Ambiguous {
        entity: String,
        name: String,
        matches: usize,
    },

    /// Entity not found in database.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Unique constraint violation.
    #[error("Duplicate value violates {constraint}")]
    UniqueViolation { constraint: String },

    /// Foreign key constraint violation.
    #[error("Foreign key violation: {message}")]
    ForeignKeyViolation { message: String },

    /// CHECK constraint violation (negative price, half-sold row, ...).
    #[error("Check constraint violation: {message}")]
    CheckViolation { message: String },

    /// Database connection failed.
    ///
    /// ## When This Occurs
    /// - Host unreachable or refusing connections
    /// - Bad credentials or unknown database
    /// - TLS negotiation failure
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// No connection could be acquired before the acquire timeout.
    #[error("Timed out waiting for a database connection")]
    PoolTimedOut,

    /// Migration failed.
    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// Query execution failed.
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Internal database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

impl DbError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        DbError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Which of the four failure families this error belongs to.
    pub fn kind(&self) -> FailureKind {
        match self {
            DbError::Rejected(CoreError::Validation(_)) => FailureKind::Validation,
            DbError::Rejected(_) | DbError::Ambiguous { .. } | DbError::NotFound { .. } => {
                FailureKind::Lookup
            }
            DbError::ConnectionFailed(_) | DbError::PoolTimedOut => FailureKind::Connection,
            DbError::UniqueViolation { .. }
            | DbError::ForeignKeyViolation { .. }
            | DbError::CheckViolation { .. }
            | DbError::MigrationFailed(_)
            | DbError::QueryFailed(_)
            | DbError::Internal(_) => FailureKind::Statement,
        }
    }
}

impl From<ValidationError> for DbError {
    fn from(err: ValidationError) -> Self {
        DbError::Rejected(CoreError::Validation(err))
    }
}

/// Convert sqlx errors to DbError.
///
/// ## Error Mapping
/// ```text
/// sqlx::Error::RowNotFound         → DbError::NotFound
/// sqlx::Error::Database            → by SQLSTATE class (23505, 23503, 23514)
/// sqlx::Error::PoolTimedOut        → DbError::PoolTimedOut
/// Io / Tls / Configuration / Closed→ DbError::ConnectionFailed
/// Other                            → DbError::Internal
/// ```
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DbError::NotFound {
                entity: "Record".to_string(),
                id: "unknown".to_string(),
            },

            sqlx::Error::Database(db_err) => {
                let message = db_err.message().to_string();
                let constraint = db_err.constraint().unwrap_or("unknown").to_string();

                match db_err.kind() {
                    ErrorKind::UniqueViolation => DbError::UniqueViolation { constraint },
                    ErrorKind::ForeignKeyViolation => DbError::ForeignKeyViolation { message },
                    ErrorKind::CheckViolation => DbError::CheckViolation { message },
                    _ => DbError::QueryFailed(message),
                }
            }

            sqlx::Error::PoolTimedOut => DbError::PoolTimedOut,

            sqlx::Error::PoolClosed => DbError::ConnectionFailed("Pool is closed".to_string()),

            sqlx::Error::Io(_) | sqlx::Error::Tls(_) | sqlx::Error::Configuration(_) => {
                DbError::ConnectionFailed(err.to_string())
            }

            _ => DbError::Internal(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sqlx_mapping() {
        assert!(matches!(
            DbError::from(sqlx::Error::RowNotFound),
            DbError::NotFound { .. }
        ));
        assert!(matches!(
            DbError::from(sqlx::Error::PoolTimedOut),
            DbError::PoolTimedOut
        ));
        assert!(matches!(
            DbError::from(sqlx::Error::PoolClosed),
            DbError::ConnectionFailed(_)
        ));

        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        assert!(matches!(
            DbError::from(sqlx::Error::Io(io)),
            DbError::ConnectionFailed(_)
        ));
    }

    #[test]
    fn test_failure_kinds() {
        let validation: DbError = ValidationError::Negative {
            field: "price".to_string(),
        }
        .into();
        assert_eq!(validation.kind(), FailureKind::Validation);

        let lookup: DbError = CoreError::MakeNotFound("Tesla".to_string()).into();
        assert_eq!(lookup.kind(), FailureKind::Lookup);
        assert_eq!(lookup.to_string(), "Make not found: Tesla");

        assert_eq!(DbError::not_found("Car sale", "7").kind(), FailureKind::Lookup);
        assert_eq!(DbError::PoolTimedOut.kind(), FailureKind::Connection);
        assert_eq!(
            DbError::CheckViolation {
                message: "price".to_string()
            }
            .kind(),
            FailureKind::Statement
        );
    }
}
