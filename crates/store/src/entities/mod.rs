//! Domain entities for the session store

pub mod notification;
pub mod user;

// Re-export all entity types
pub use notification::{Notification, NotificationType};
pub use user::{User, UserRole};
