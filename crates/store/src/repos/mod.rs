//! Repository implementations for the session store

pub mod seed_repository;
pub mod session_repository;
pub mod user_repository;

// Re-export all repositories for convenience
pub use seed_repository::*;
pub use session_repository::*;
pub use user_repository::*;
