//! Shared types and result types for the session store

pub mod errors;

pub use errors::{AuthError, StoreError};

// Common result types
pub type StoreResult<T> = Result<T, StoreError>;
pub type AuthResult<T> = Result<T, AuthError>;
