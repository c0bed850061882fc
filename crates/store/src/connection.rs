//! Storage connection management

use anyhow::{Context, Result};
use eduflow_config::StorageConfig;
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use std::path::Path;
use tokio::fs;
use tracing::info;

/// Prepare and establish the storage connection
pub async fn prepare_storage(config: &StorageConfig) -> Result<SqlitePool> {
    ensure_sqlite_path(&config.url).await?;

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.url)
        .await
        .with_context(|| format!("failed to connect to storage {}", config.url))?;

    // WAL keeps concurrent readers from tripping over writes
    sqlx::query("PRAGMA journal_mode = WAL")
        .execute(&pool)
        .await
        .context("failed to enable WAL mode for sqlite")?;

    // Set busy timeout to prevent database locked errors
    sqlx::query("PRAGMA busy_timeout = 5000")
        .execute(&pool)
        .await
        .context("failed to set busy timeout for sqlite")?;

    info!(url = %config.url, "storage connection established");
    Ok(pool)
}

/// Ensure the SQLite storage file and directory exist
async fn ensure_sqlite_path(url: &str) -> Result<()> {
    let sqlite_path = url
        .strip_prefix("sqlite://")
        .or_else(|| url.strip_prefix("sqlite:"));

    let Some(sqlite_path) = sqlite_path else {
        return Ok(());
    };

    if sqlite_path == ":memory:" {
        return Ok(());
    }

    let path = Path::new(sqlite_path);
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).await.with_context(|| {
                format!("failed to create storage directory {}", parent.display())
            })?;
        }
    }

    if fs::metadata(path).await.is_err() {
        fs::OpenOptions::new()
            .create(true)
            .write(true)
            .open(path)
            .await
            .with_context(|| format!("failed to create storage file {}", path.display()))?;
    }

    Ok(())
}

/// Storage connection wrapper for easier management
#[derive(Clone)]
pub struct StorageConnection {
    pub pool: SqlitePool,
}

impl StorageConnection {
    /// Create a new storage connection from configuration
    pub async fn from_config(config: &StorageConfig) -> Result<Self> {
        let pool = prepare_storage(config).await?;
        Ok(Self { pool })
    }

    /// Create a new storage connection from an existing pool
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Get a reference to the underlying connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close the storage connection pool
    pub async fn close(self) {
        self.pool.close().await;
    }

    /// Test the storage connection
    pub async fn test_connection(&self) -> Result<()> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .context("failed to test storage connection")?;
        Ok(())
    }
}
