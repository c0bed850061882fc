//! EduFlow Session Store Crate
//!
//! This crate provides the authentication core of the EduFlow application:
//! the session store owning the signed-in identity, the locally registered
//! user directory, and the session-scoped notification list.
//!
//! ## Architecture
//!
//! - **Entities**: Domain models (User, Notification)
//! - **Repos**: Data access over the key-value storage and the seed dataset
//! - **Store**: The [`SessionStore`] context object with login, registration,
//!   logout, and notification-read operations
//! - **Types**: Shared error and result types
//!
//! Session identity is persisted to a SQLite-backed key-value table and
//! survives process restarts. Two processes pointed at the same storage file
//! are last-writer-wins on the persisted entries; this is an accepted
//! limitation, not something the store reconciles.

use eduflow_config::StorageConfig;
use sqlx::SqlitePool;

pub mod connection;
pub mod entities;
pub mod migrations;
pub mod repos;
pub mod store;
pub mod types;

pub use connection::{prepare_storage, StorageConnection};
pub use migrations::run_migrations;
pub use store::SessionStore;

// Re-export repositories
pub use repos::{
    DemoSeedRepository, SeedRepository, SessionRepository, UserRepository,
    CURRENT_USER_KEY, USERS_KEY,
};

// Re-export entities
pub use entities::{
    notification::{Notification, NotificationType},
    user::{User, UserRole},
};

// Re-export types
pub use types::{
    errors::{AuthError, StoreError},
    AuthResult, StoreResult,
};

/// Re-export commonly used types for convenience
pub use sqlx::Pool;

/// Initialize the storage with migrations
pub async fn initialize_storage(config: &StorageConfig) -> StoreResult<SqlitePool> {
    let pool = prepare_storage(config)
        .await
        .map_err(|e| StoreError::ConnectionError(e.to_string()))?;

    run_migrations(&pool)
        .await
        .map_err(|e| StoreError::MigrationError(e.to_string()))?;

    Ok(pool)
}
