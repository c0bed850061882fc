//! User entity definitions

use serde::{Deserialize, Serialize};

/// A user account, either from the seed dataset or locally registered.
///
/// `password` is only present on locally registered directory records; it is
/// stripped before the user is exposed as a session identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: UserRole,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    pub created_at: String,
}

impl User {
    /// Copy of this user with the password stripped, safe to expose and
    /// persist as session identity.
    pub fn sanitized(&self) -> User {
        User {
            password: None,
            ..self.clone()
        }
    }
}

/// User role enum
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Admin,
    Instructor,
    Student,
    ContentCreator,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::Instructor => "instructor",
            UserRole::Student => "student",
            UserRole::ContentCreator => "content_creator",
        }
    }
}

impl From<&str> for UserRole {
    fn from(s: &str) -> Self {
        match s {
            "admin" => UserRole::Admin,
            "instructor" => UserRole::Instructor,
            "content_creator" => UserRole::ContentCreator,
            _ => UserRole::Student,
        }
    }
}

impl ToString for UserRole {
    fn to_string(&self) -> String {
        self.as_str().to_string()
    }
}
