//! Storage error types for shop-storage.
//!
//! [`StorageError`] covers all anticipated failure modes in the storage layer:
//! engine failures, migration failures, constraint violations and
//! record-not-found variants for each table.

use rusqlite::ffi;
use thiserror::Error;

/// Errors produced by storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// An SQLite operation failed for a reason other than a constraint.
    #[error("database error: {0}")]
    Database(#[source] rusqlite::Error),

    /// Applying the schema migrations failed.
    #[error("migration error: {0}")]
    Migration(String),

    /// Removing a previous store file failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A UNIQUE or PRIMARY KEY constraint rejected the write.
    #[error("unique constraint violation: {0}")]
    UniqueViolation(String),

    /// A FOREIGN KEY constraint rejected the write.
    #[error("foreign key violation: {0}")]
    ForeignKeyViolation(String),

    /// A user with the given ID was not found.
    #[error("user not found: {0}")]
    UserNotFound(i64),

    /// A product with the given ID was not found.
    #[error("product not found: {0}")]
    ProductNotFound(i64),

    /// An order with the given ID was not found.
    #[error("order not found: {0}")]
    OrderNotFound(i64),

    /// No line item exists for the given order/product pair.
    #[error("line item not found: order={order}, product={product}")]
    LineItemNotFound { order: i64, product: i64 },
}

impl StorageError {
    /// True for unique and foreign-key violations.
    pub fn is_constraint_violation(&self) -> bool {
        matches!(
            self,
            StorageError::UniqueViolation(_) | StorageError::ForeignKeyViolation(_)
        )
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::SqliteFailure(failure, message)
                if failure.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                let message = message.unwrap_or_else(|| failure.to_string());
                match failure.extended_code {
                    ffi::SQLITE_CONSTRAINT_UNIQUE | ffi::SQLITE_CONSTRAINT_PRIMARYKEY => {
                        StorageError::UniqueViolation(message)
                    }
                    ffi::SQLITE_CONSTRAINT_FOREIGNKEY => StorageError::ForeignKeyViolation(message),
                    _ => StorageError::Database(rusqlite::Error::SqliteFailure(
                        failure,
                        Some(message),
                    )),
                }
            }
            other => StorageError::Database(other),
        }
    }
}

impl From<rusqlite_migration::Error> for StorageError {
    fn from(err: rusqlite_migration::Error) -> Self {
        StorageError::Migration(err.to_string())
    }
}
