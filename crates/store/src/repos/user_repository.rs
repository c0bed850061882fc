//! Local user directory repository.

use crate::entities::User;
use crate::types::errors::StoreError;
use crate::types::StoreResult;
use sqlx::{Row, SqlitePool};
use tracing::warn;

/// Storage key holding the locally registered user directory.
pub const USERS_KEY: &str = "eduflow_users";

/// Repository for the persisted directory of locally registered users.
///
/// The directory is stored as a single JSON array under [`USERS_KEY`];
/// records are only ever appended (no update or delete operation exists).
#[derive(Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    /// Create a new user repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// All locally registered users.
    ///
    /// A missing or unreadable directory entry reads as empty.
    pub async fn list(&self) -> StoreResult<Vec<User>> {
        let row = sqlx::query("SELECT value FROM store_entries WHERE key = ?")
            .bind(USERS_KEY)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StoreError::QueryError(e.to_string()))?;

        let Some(row) = row else {
            return Ok(Vec::new());
        };

        let raw: String = row
            .try_get("value")
            .map_err(|e| StoreError::QueryError(e.to_string()))?;

        match serde_json::from_str(&raw) {
            Ok(users) => Ok(users),
            Err(e) => {
                warn!(error = %e, "unreadable user directory entry, treating as empty");
                Ok(Vec::new())
            }
        }
    }

    /// Find a registered user by exact email match
    pub async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let users = self.list().await?;
        Ok(users.into_iter().find(|u| u.email == email))
    }

    /// Check if an email exists in the local directory
    pub async fn email_exists(&self, email: &str) -> StoreResult<bool> {
        Ok(self.find_by_email(email).await?.is_some())
    }

    /// Append a newly registered user to the directory.
    ///
    /// The stored record keeps the password so later logins can verify it.
    pub async fn append(&self, user: &User) -> StoreResult<()> {
        let mut users = self.list().await?;
        users.push(user.clone());

        let value = serde_json::to_string(&users)
            .map_err(|e| StoreError::QueryError(e.to_string()))?;
        let now = chrono::Utc::now().to_rfc3339();

        sqlx::query("INSERT OR REPLACE INTO store_entries (key, value, updated_at) VALUES (?, ?, ?)")
            .bind(USERS_KEY)
            .bind(&value)
            .bind(&now)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::QueryError(e.to_string()))?;

        Ok(())
    }
}
