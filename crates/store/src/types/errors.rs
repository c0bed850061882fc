//! Error types for the session store

use thiserror::Error;

/// Storage-layer errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage connection error: {0}")]
    ConnectionError(String),

    #[error("storage query error: {0}")]
    QueryError(String),

    #[error("storage migration error: {0}")]
    MigrationError(String),
}

/// Authentication errors surfaced to callers of the session store.
///
/// Both `InvalidCredentials` and `EmailTaken` are expected, recoverable
/// conditions whose messages are presentable to the end user.
#[derive(Debug, Error, PartialEq)]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("email already registered")]
    EmailTaken,

    #[error("storage error: {0}")]
    Storage(String),
}

impl From<StoreError> for AuthError {
    fn from(err: StoreError) -> Self {
        AuthError::Storage(err.to_string())
    }
}
