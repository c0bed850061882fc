//! Read-only access to the seed demo dataset.

use crate::entities::{Notification, NotificationType, User, UserRole};
use once_cell::sync::Lazy;

/// Read-only view over the seed dataset.
///
/// Session logic only ever reads seed data through this trait, so a real
/// backend can implement it without touching the store.
pub trait SeedRepository: Send + Sync {
    /// Find a seed user by exact email match
    fn find_user_by_email(&self, email: &str) -> Option<User>;

    /// All notifications owned by the given user id
    fn list_notifications_for_user(&self, user_id: &str) -> Vec<Notification>;
}

fn seed_user(id: &str, email: &str, name: &str, role: UserRole, created_at: &str) -> User {
    User {
        id: id.to_string(),
        email: email.to_string(),
        name: name.to_string(),
        role,
        password: None,
        created_at: created_at.to_string(),
    }
}

fn seed_notification(
    id: &str,
    user_id: &str,
    title: &str,
    message: &str,
    notification_type: NotificationType,
    read: bool,
    created_at: &str,
) -> Notification {
    Notification {
        id: id.to_string(),
        user_id: user_id.to_string(),
        title: title.to_string(),
        message: message.to_string(),
        notification_type,
        read,
        created_at: created_at.to_string(),
    }
}

static SEED_USERS: Lazy<Vec<User>> = Lazy::new(|| {
    vec![
        seed_user("u1", "admin@edumanage.com", "Sarah Chen", UserRole::Admin, "2024-01-15"),
        seed_user("u2", "instructor@edumanage.com", "Dr. James Wilson", UserRole::Instructor, "2024-02-01"),
        seed_user("u3", "student@edumanage.com", "Alex Rivera", UserRole::Student, "2024-03-10"),
        seed_user("u4", "creator@edumanage.com", "Maya Patel", UserRole::ContentCreator, "2024-02-20"),
        seed_user("u5", "jane@student.com", "Jane Cooper", UserRole::Student, "2024-04-01"),
        seed_user("u6", "bob@instructor.com", "Prof. Bob Martinez", UserRole::Instructor, "2024-01-20"),
        seed_user("u7", "emma@student.com", "Emma Thompson", UserRole::Student, "2024-05-15"),
        seed_user("u8", "liam@student.com", "Liam O'Brien", UserRole::Student, "2024-06-01"),
    ]
});

static SEED_NOTIFICATIONS: Lazy<Vec<Notification>> = Lazy::new(|| {
    vec![
        seed_notification(
            "n1",
            "u3",
            "Assignment Graded",
            "Your submission for \"Build a Linear Regression Model\" has been graded. Score: 92/100",
            NotificationType::Grade,
            false,
            "2025-03-13",
        ),
        seed_notification(
            "n2",
            "u3",
            "New Announcement",
            "Dr. James Wilson posted a new announcement in Machine Learning.",
            NotificationType::Announcement,
            false,
            "2025-03-10",
        ),
        seed_notification(
            "n3",
            "u3",
            "Enrollment Confirmed",
            "You have been enrolled in Data Structures & Algorithms.",
            NotificationType::Enrollment,
            true,
            "2025-06-01",
        ),
        seed_notification(
            "n4",
            "u1",
            "Course Pending Approval",
            "UX Design Fundamentals is awaiting your approval.",
            NotificationType::Approval,
            false,
            "2025-07-01",
        ),
        seed_notification(
            "n5",
            "u2",
            "New Submission",
            "Jane Cooper submitted \"Build a Linear Regression Model\".",
            NotificationType::General,
            false,
            "2025-03-14",
        ),
    ]
});

/// Seed repository backed by the built-in demo dataset.
#[derive(Debug, Clone, Default)]
pub struct DemoSeedRepository;

impl DemoSeedRepository {
    pub fn new() -> Self {
        Self
    }
}

impl SeedRepository for DemoSeedRepository {
    fn find_user_by_email(&self, email: &str) -> Option<User> {
        SEED_USERS.iter().find(|u| u.email == email).cloned()
    }

    fn list_notifications_for_user(&self, user_id: &str) -> Vec<Notification> {
        SEED_NOTIFICATIONS
            .iter()
            .filter(|n| n.user_id == user_id)
            .cloned()
            .collect()
    }
}
