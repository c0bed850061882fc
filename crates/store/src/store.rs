//! Session store: the single source of truth for "who is signed in".

use std::sync::Arc;

use cuid2::CuidConstructor;
use once_cell::sync::Lazy;
use sqlx::SqlitePool;
use tracing::{debug, info, warn};

use crate::entities::{Notification, User, UserRole};
use crate::repos::{SeedRepository, SessionRepository, UserRepository};
use crate::types::{AuthError, AuthResult};

static CUID: Lazy<CuidConstructor> = Lazy::new(CuidConstructor::new);

fn new_user_id() -> String {
    CUID.create_id()
}

/// Check a supplied password against a stored credential.
///
/// Records without a stored credential (seed accounts) accept any password.
/// Stored credentials are currently plaintext; a hashing scheme would
/// replace only this function.
fn password_matches(stored: Option<&String>, supplied: &str) -> bool {
    match stored {
        Some(stored) => stored == supplied,
        None => true,
    }
}

/// Owns the current session, the locally registered user directory, and the
/// session-scoped notification list.
///
/// One store is constructed per process and injected into consumers; every
/// operation completes its state transition synchronously with the call.
/// Two processes sharing the same storage file are last-writer-wins on the
/// persisted entries; no cross-process reconciliation is attempted.
pub struct SessionStore {
    users: UserRepository,
    sessions: SessionRepository,
    seed: Arc<dyn SeedRepository>,
    current_user: Option<User>,
    notifications: Vec<Notification>,
}

impl SessionStore {
    /// Open the store, rehydrating any persisted session identity.
    ///
    /// An unreadable persisted record fails open to signed out. Rehydrated
    /// sessions always start with an empty notification list; notifications
    /// are only seeded by a live login.
    pub async fn open(pool: SqlitePool, seed: Arc<dyn SeedRepository>) -> Self {
        let users = UserRepository::new(pool.clone());
        let sessions = SessionRepository::new(pool);

        let current_user = match sessions.load().await {
            Ok(user) => user,
            Err(e) => {
                warn!(error = %e, "failed to read persisted session, starting signed out");
                None
            }
        };

        if let Some(user) = &current_user {
            info!(user_id = %user.id, "session rehydrated");
        }

        Self {
            users,
            sessions,
            seed,
            current_user,
            notifications: Vec::new(),
        }
    }

    /// Sign in with email and password, optionally requiring a role.
    ///
    /// The local directory is checked before the seed pool, so a local
    /// registration shadows a seed account sharing its email. Seed accounts
    /// carry no password and accept any. On failure the session state is
    /// left untouched.
    pub async fn login(
        &mut self,
        email: &str,
        password: &str,
        expected_role: Option<UserRole>,
    ) -> AuthResult<()> {
        if let Some(local) = self.users.find_by_email(email).await? {
            if !password_matches(local.password.as_ref(), password) {
                return Err(AuthError::InvalidCredentials);
            }
            if let Some(role) = &expected_role {
                if *role != local.role {
                    return Err(AuthError::InvalidCredentials);
                }
            }

            let session_user = local.sanitized();
            self.sessions.save(&session_user).await?;
            info!(user_id = %session_user.id, "user signed in");

            self.current_user = Some(session_user);
            self.notifications.clear();
            return Ok(());
        }

        if let Some(seed_user) = self.seed.find_user_by_email(email) {
            if let Some(role) = &expected_role {
                if *role != seed_user.role {
                    return Err(AuthError::InvalidCredentials);
                }
            }

            self.sessions.save(&seed_user).await?;
            info!(user_id = %seed_user.id, "user signed in");

            self.notifications = self.seed.list_notifications_for_user(&seed_user.id);
            self.current_user = Some(seed_user);
            return Ok(());
        }

        Err(AuthError::InvalidCredentials)
    }

    /// Register a new account and sign it in.
    ///
    /// Fails with [`AuthError::EmailTaken`] when the email exists in either
    /// the local directory or the seed pool (exact, case-sensitive match).
    /// The directory record keeps the password; the session identity does
    /// not.
    pub async fn register(
        &mut self,
        name: &str,
        email: &str,
        password: &str,
        role: Option<UserRole>,
    ) -> AuthResult<()> {
        if self.users.email_exists(email).await?
            || self.seed.find_user_by_email(email).is_some()
        {
            return Err(AuthError::EmailTaken);
        }

        let user = User {
            id: new_user_id(),
            email: email.to_string(),
            name: name.to_string(),
            role: role.unwrap_or(UserRole::Student),
            password: Some(password.to_string()),
            created_at: chrono::Utc::now().to_rfc3339(),
        };

        self.users.append(&user).await?;

        let session_user = user.sanitized();
        self.sessions.save(&session_user).await?;
        info!(user_id = %session_user.id, "user registered");

        self.current_user = Some(session_user);
        self.notifications.clear();
        Ok(())
    }

    /// Sign out. Always succeeds and is safe to call when already signed out.
    ///
    /// The in-memory session is cleared unconditionally; failure to remove
    /// the persisted identity is logged rather than surfaced.
    pub async fn logout(&mut self) {
        self.current_user = None;
        self.notifications.clear();

        if let Err(e) = self.sessions.clear().await {
            warn!(error = %e, "failed to clear persisted session");
        }

        debug!("signed out");
    }

    /// Mark the matching in-memory notification as read.
    ///
    /// A no-op when the id is absent. Read state is session-scoped and never
    /// persisted.
    pub fn mark_notification_read(&mut self, notification_id: &str) {
        if let Some(notification) = self
            .notifications
            .iter_mut()
            .find(|n| n.id == notification_id)
        {
            notification.read = true;
        }
    }

    /// Count of unread notifications in the current session
    pub fn unread_count(&self) -> usize {
        self.notifications.iter().filter(|n| !n.read).count()
    }

    /// The signed-in user, if any
    pub fn current_user(&self) -> Option<&User> {
        self.current_user.as_ref()
    }

    /// Notifications scoped to the current session
    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    /// Whether a user is currently signed in
    pub fn is_signed_in(&self) -> bool {
        self.current_user.is_some()
    }
}
