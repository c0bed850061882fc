//! End-to-end tests for the session store lifecycle.
//!
//! These tests exercise login, registration, logout, persistence across
//! store restarts, and the session-scoped notification state.

use std::sync::Arc;

use eduflow_config::StorageConfig;
use eduflow_store::{
    initialize_storage, AuthError, DemoSeedRepository, SessionStore, User, UserRepository,
    UserRole, CURRENT_USER_KEY, USERS_KEY,
};
use sqlx::SqlitePool;
use tempfile::TempDir;

type TestResult<T = ()> = Result<T, Box<dyn std::error::Error>>;

struct TestContext {
    pool: SqlitePool,
    _temp_dir: TempDir,
}

impl TestContext {
    async fn new() -> TestResult<Self> {
        let temp_dir = TempDir::new()?;
        let db_path = temp_dir.path().join("store.sqlite");
        let config = StorageConfig {
            url: format!("sqlite://{}", db_path.display()),
            max_connections: 1,
        };

        let pool = initialize_storage(&config).await?;

        Ok(Self {
            pool,
            _temp_dir: temp_dir,
        })
    }

    fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn open_store(&self) -> SessionStore {
        SessionStore::open(self.pool.clone(), Arc::new(DemoSeedRepository::new())).await
    }
}

#[tokio::test]
async fn register_then_login_round_trips_identity() -> TestResult {
    let ctx = TestContext::new().await?;
    let mut store = ctx.open_store().await;

    store
        .register("Nina Alvarez", "nina@student.com", "hunter2", None)
        .await?;

    let registered = store.current_user().expect("registration signs in").clone();
    assert_eq!(registered.email, "nina@student.com");
    assert_eq!(registered.name, "Nina Alvarez");
    assert_eq!(registered.role, UserRole::Student);
    assert!(
        registered.password.is_none(),
        "session identity must not carry the password"
    );
    assert!(store.notifications().is_empty());

    store.logout().await;

    store.login("nina@student.com", "hunter2", None).await?;
    let logged_in = store.current_user().expect("login signs in");
    assert_eq!(logged_in.id, registered.id);
    assert_eq!(logged_in.email, registered.email);
    assert!(logged_in.password.is_none());

    Ok(())
}

#[tokio::test]
async fn register_requires_matching_password_on_login() -> TestResult {
    let ctx = TestContext::new().await?;
    let mut store = ctx.open_store().await;

    store
        .register("Nina Alvarez", "nina@student.com", "hunter2", None)
        .await?;
    store.logout().await;

    let err = store
        .login("nina@student.com", "wrong", None)
        .await
        .unwrap_err();
    assert_eq!(err, AuthError::InvalidCredentials);
    assert!(!store.is_signed_in());

    Ok(())
}

#[tokio::test]
async fn register_rejects_seed_email() -> TestResult {
    let ctx = TestContext::new().await?;
    let mut store = ctx.open_store().await;

    let err = store
        .register("Impostor", "admin@edumanage.com", "pw", Some(UserRole::Admin))
        .await
        .unwrap_err();
    assert_eq!(err, AuthError::EmailTaken);
    assert!(!store.is_signed_in());

    // Email matching is exact: a case variant is a distinct address
    store
        .register("Casey Variant", "Admin@edumanage.com", "pw", None)
        .await?;
    assert!(store.is_signed_in());

    Ok(())
}

#[tokio::test]
async fn register_rejects_already_registered_email() -> TestResult {
    let ctx = TestContext::new().await?;
    let mut store = ctx.open_store().await;

    store
        .register("Nina Alvarez", "nina@student.com", "hunter2", None)
        .await?;
    store.logout().await;

    let err = store
        .register("Nina Again", "nina@student.com", "other", None)
        .await
        .unwrap_err();
    assert_eq!(err, AuthError::EmailTaken);

    Ok(())
}

#[tokio::test]
async fn failed_login_leaves_session_untouched() -> TestResult {
    let ctx = TestContext::new().await?;
    let mut store = ctx.open_store().await;

    store
        .login("student@edumanage.com", "anything", Some(UserRole::Student))
        .await?;
    assert_eq!(store.current_user().unwrap().id, "u3");
    let unread_before = store.unread_count();

    let err = store
        .login("nobody@edumanage.com", "pw", None)
        .await
        .unwrap_err();
    assert_eq!(err, AuthError::InvalidCredentials);

    assert_eq!(store.current_user().unwrap().id, "u3");
    assert_eq!(store.unread_count(), unread_before);

    Ok(())
}

#[tokio::test]
async fn session_survives_store_restart() -> TestResult {
    let ctx = TestContext::new().await?;

    {
        let mut store = ctx.open_store().await;
        store
            .login("jane@student.com", "whatever", Some(UserRole::Student))
            .await?;
    }

    let store = ctx.open_store().await;
    let user = store.current_user().expect("session should rehydrate");
    assert_eq!(user.id, "u5");
    assert_eq!(user.email, "jane@student.com");

    // Notification state is session-scoped and does not survive a restart
    assert!(store.notifications().is_empty());
    assert_eq!(store.unread_count(), 0);

    Ok(())
}

#[tokio::test]
async fn logout_clears_persisted_session() -> TestResult {
    let ctx = TestContext::new().await?;

    {
        let mut store = ctx.open_store().await;
        store.login("jane@student.com", "pw", None).await?;
        store.logout().await;
    }

    let store = ctx.open_store().await;
    assert!(!store.is_signed_in());

    Ok(())
}

#[tokio::test]
async fn mark_notification_read_decrements_unread_once() -> TestResult {
    let ctx = TestContext::new().await?;
    let mut store = ctx.open_store().await;

    store.login("student@edumanage.com", "pw", None).await?;
    assert_eq!(store.notifications().len(), 3);
    assert_eq!(store.unread_count(), 2);

    // Unknown ids leave the count unchanged
    store.mark_notification_read("n999");
    assert_eq!(store.unread_count(), 2);

    store.mark_notification_read("n1");
    assert_eq!(store.unread_count(), 1);

    // Marking twice has the same effect as once
    store.mark_notification_read("n1");
    assert_eq!(store.unread_count(), 1);

    // Already-read notifications change nothing
    store.mark_notification_read("n3");
    assert_eq!(store.unread_count(), 1);

    Ok(())
}

#[tokio::test]
async fn local_record_shadows_seed_account() -> TestResult {
    let ctx = TestContext::new().await?;

    // A directory record sharing a seed email, e.g. registered before that
    // seed account shipped. No registration path can create this today.
    let users = UserRepository::new(ctx.pool().clone());
    users
        .append(&User {
            id: "local-1".to_string(),
            email: "student@edumanage.com".to_string(),
            name: "Local Alex".to_string(),
            role: UserRole::Student,
            password: Some("localpw".to_string()),
            created_at: "2024-01-01".to_string(),
        })
        .await?;

    let mut store = ctx.open_store().await;

    // The local record wins, so its password is enforced even though the
    // seed account would accept anything
    let err = store
        .login("student@edumanage.com", "anything", None)
        .await
        .unwrap_err();
    assert_eq!(err, AuthError::InvalidCredentials);

    store
        .login("student@edumanage.com", "localpw", None)
        .await?;
    let user = store.current_user().unwrap();
    assert_eq!(user.id, "local-1");
    assert_eq!(user.name, "Local Alex");

    // Local logins never seed notifications
    assert!(store.notifications().is_empty());

    Ok(())
}

#[tokio::test]
async fn seed_login_enforces_expected_role() -> TestResult {
    let ctx = TestContext::new().await?;
    let mut store = ctx.open_store().await;

    store
        .login("student@edumanage.com", "anything", Some(UserRole::Student))
        .await?;
    assert_eq!(store.current_user().unwrap().id, "u3");
    store.logout().await;

    let err = store
        .login("student@edumanage.com", "anything", Some(UserRole::Admin))
        .await
        .unwrap_err();
    assert_eq!(err, AuthError::InvalidCredentials);
    assert!(!store.is_signed_in());

    Ok(())
}

#[tokio::test]
async fn corrupt_persisted_state_fails_open() -> TestResult {
    let ctx = TestContext::new().await?;

    for key in [USERS_KEY, CURRENT_USER_KEY] {
        sqlx::query("INSERT INTO store_entries (key, value, updated_at) VALUES (?, ?, ?)")
            .bind(key)
            .bind("{definitely not json")
            .bind("2025-08-01T00:00:00Z")
            .execute(ctx.pool())
            .await?;
    }

    let mut store = ctx.open_store().await;
    assert!(!store.is_signed_in());

    // Registration starts over from the empty directory
    store
        .register("Nina Alvarez", "nina@student.com", "hunter2", None)
        .await?;
    assert!(store.is_signed_in());

    Ok(())
}
