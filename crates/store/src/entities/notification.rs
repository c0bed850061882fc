//! Notification entity definitions

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub message: String,
    pub notification_type: NotificationType,
    pub read: bool,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    Grade,
    Announcement,
    Enrollment,
    Approval,
    General,
}

impl NotificationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationType::Grade => "grade",
            NotificationType::Announcement => "announcement",
            NotificationType::Enrollment => "enrollment",
            NotificationType::Approval => "approval",
            NotificationType::General => "general",
        }
    }
}

impl From<&str> for NotificationType {
    fn from(s: &str) -> Self {
        match s {
            "grade" => NotificationType::Grade,
            "announcement" => NotificationType::Announcement,
            "enrollment" => NotificationType::Enrollment,
            "approval" => NotificationType::Approval,
            _ => NotificationType::General,
        }
    }
}

impl ToString for NotificationType {
    fn to_string(&self) -> String {
        self.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notification_type_round_trip() {
        for kind in [
            NotificationType::Grade,
            NotificationType::Announcement,
            NotificationType::Enrollment,
            NotificationType::Approval,
            NotificationType::General,
        ] {
            assert_eq!(NotificationType::from(kind.as_str()), kind);
        }

        assert_eq!(NotificationType::from("unknown"), NotificationType::General);
    }
}
