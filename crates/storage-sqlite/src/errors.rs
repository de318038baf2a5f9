//! Storage-specific error types for SQLite operations.
//!
//! Diesel and r2d2 errors never leave this crate; they are converted to the
//! database-agnostic types of `myfolio_core` at the repository boundary.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use myfolio_core::errors::{DatabaseError, Error};
use thiserror::Error;

/// Storage-specific errors that wrap Diesel and r2d2 types.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database connection failed: {0}")]
    ConnectionFailed(#[from] diesel::ConnectionError),

    #[error("Connection pool error: {0}")]
    PoolError(#[from] r2d2::Error),

    #[error("Query execution failed: {0}")]
    QueryFailed(#[from] DieselError),

    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// A stored column could not be read back into its domain type.
    #[error("Corrupt column {column}: {message}")]
    CorruptColumn { column: &'static str, message: String },

    #[error("Writer actor unavailable: {0}")]
    WriterUnavailable(String),

    /// A core error raised inside a write job, carried through the transaction.
    #[error("Core error: {0}")]
    CoreError(Box<Error>),
}

/// Convert core Error to StorageError (for the write actor transaction wrapper)
impl From<Error> for StorageError {
    fn from(err: Error) -> Self {
        StorageError::CoreError(Box::new(err))
    }
}

impl From<StorageError> for Error {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::ConnectionFailed(e) => {
                Error::Database(DatabaseError::ConnectionFailed(e.to_string()))
            }
            StorageError::PoolError(e) => {
                Error::Database(DatabaseError::PoolCreationFailed(e.to_string()))
            }
            StorageError::QueryFailed(DieselError::NotFound) => {
                Error::Database(DatabaseError::NotFound("Record not found".to_string()))
            }
            StorageError::QueryFailed(DieselError::DatabaseError(
                DatabaseErrorKind::UniqueViolation | DatabaseErrorKind::CheckViolation,
                info,
            )) => Error::Database(DatabaseError::QueryFailed(format!(
                "Constraint violation: {}",
                info.message()
            ))),
            StorageError::QueryFailed(DieselError::RollbackTransaction) => {
                Error::Database(DatabaseError::TransactionFailed(
                    "Transaction rolled back".to_string(),
                ))
            }
            StorageError::QueryFailed(e) => {
                Error::Database(DatabaseError::QueryFailed(e.to_string()))
            }
            StorageError::MigrationFailed(e) => Error::Database(DatabaseError::MigrationFailed(e)),
            StorageError::CorruptColumn { column, message } => Error::Database(
                DatabaseError::Internal(format!("Corrupt column {}: {}", column, message)),
            ),
            StorageError::WriterUnavailable(e) => {
                Error::Database(DatabaseError::TransactionFailed(e))
            }
            StorageError::CoreError(e) => *e,
        }
    }
}

/// Extension trait for converting Diesel and r2d2 results into core results.
pub trait IntoCore<T> {
    fn into_core(self) -> myfolio_core::Result<T>;
}

impl<T> IntoCore<T> for std::result::Result<T, DieselError> {
    fn into_core(self) -> myfolio_core::Result<T> {
        self.map_err(|e| StorageError::from(e).into())
    }
}

impl<T> IntoCore<T> for std::result::Result<T, r2d2::Error> {
    fn into_core(self) -> myfolio_core::Result<T> {
        self.map_err(|e| StorageError::from(e).into())
    }
}
