//! Custom error types for the common library
//!
//! This module defines the persistence-layer error type shared by every
//! service that talks to the document store.

use mongodb::error::{Error as MongoError, ErrorKind, WriteFailure};
use std::time::Duration;
use thiserror::Error;

/// Server error code MongoDB returns for a unique index violation
const DUPLICATE_KEY_CODE: i32 = 11000;

/// Custom error type for database operations
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Error occurred while connecting or pinging the server
    #[error("Database connection error: {0}")]
    Connection(#[source] MongoError),

    /// Error occurred during a database operation
    #[error("Database query error: {0}")]
    Query(#[source] MongoError),

    /// A write was rejected by a unique index
    #[error("Duplicate key: {0}")]
    Duplicate(String),

    /// The operation did not finish before its deadline
    #[error("Database operation timed out after {0:?}")]
    Timeout(Duration),

    /// Configuration error
    #[error("Database configuration error: {0}")]
    Configuration(String),
}

impl From<MongoError> for DatabaseError {
    fn from(err: MongoError) -> Self {
        if is_duplicate_key(&err) {
            DatabaseError::Duplicate(err.to_string())
        } else {
            DatabaseError::Query(err)
        }
    }
}

fn is_duplicate_key(err: &MongoError) -> bool {
    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write_error)) => {
            write_error.code == DUPLICATE_KEY_CODE
        }
        ErrorKind::Command(command_error) => command_error.code == DUPLICATE_KEY_CODE,
        _ => false,
    }
}

/// Type alias for Result with DatabaseError
pub type DatabaseResult<T> = Result<T, DatabaseError>;
