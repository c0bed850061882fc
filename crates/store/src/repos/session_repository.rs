//! Persisted session identity repository.

use crate::entities::User;
use crate::types::errors::StoreError;
use crate::types::StoreResult;
use sqlx::{Row, SqlitePool};
use tracing::warn;

/// Storage key holding the persisted session identity.
pub const CURRENT_USER_KEY: &str = "eduflow_current_user";

/// Repository for the persisted "who is signed in" record.
///
/// Holds at most one sanitized [`User`]; the row is absent when signed out.
pub struct SessionRepository {
    pool: SqlitePool,
}

impl SessionRepository {
    /// Create a new session repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Load the persisted session identity.
    ///
    /// A missing or unreadable record reads as signed out.
    pub async fn load(&self) -> StoreResult<Option<User>> {
        let row = sqlx::query("SELECT value FROM store_entries WHERE key = ?")
            .bind(CURRENT_USER_KEY)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StoreError::QueryError(e.to_string()))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let raw: String = row
            .try_get("value")
            .map_err(|e| StoreError::QueryError(e.to_string()))?;

        match serde_json::from_str(&raw) {
            Ok(user) => Ok(Some(user)),
            Err(e) => {
                warn!(error = %e, "unreadable session identity, treating as signed out");
                Ok(None)
            }
        }
    }

    /// Persist the session identity so it survives a process restart
    pub async fn save(&self, user: &User) -> StoreResult<()> {
        let value = serde_json::to_string(user)
            .map_err(|e| StoreError::QueryError(e.to_string()))?;
        let now = chrono::Utc::now().to_rfc3339();

        sqlx::query("INSERT OR REPLACE INTO store_entries (key, value, updated_at) VALUES (?, ?, ?)")
            .bind(CURRENT_USER_KEY)
            .bind(&value)
            .bind(&now)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::QueryError(e.to_string()))?;

        Ok(())
    }

    /// Remove the persisted session identity. Idempotent.
    pub async fn clear(&self) -> StoreResult<()> {
        sqlx::query("DELETE FROM store_entries WHERE key = ?")
            .bind(CURRENT_USER_KEY)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::QueryError(e.to_string()))?;

        Ok(())
    }
}
