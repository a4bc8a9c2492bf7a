//! User identity issued by the auth backend.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::deserialize_id;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    #[default]
    User,
}

/// An authenticated user's profile.
///
/// Immutable once issued; a new profile only arrives via re-authentication.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// First letter of the name, upper-cased, for avatar badges.
    pub fn initial(&self) -> Option<char> {
        self.name.chars().next().map(|c| c.to_ascii_uppercase())
    }
}

/// Result of a successful login or registration.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthSession {
    pub user: User,
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_from_backend_json_drops_password() {
        let json = r#"{
            "id": 1,
            "email": "demo@example.com",
            "password": "password",
            "name": "demo user",
            "role": "admin",
            "created_at": "2024-01-15T10:00:00.000Z"
        }"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.id, "1");
        assert!(user.is_admin());
        assert_eq!(user.initial(), Some('D'));

        let back = serde_json::to_value(&user).unwrap();
        assert!(back.get("password").is_none());
        assert_eq!(back["role"], "admin");
    }

    #[test]
    fn test_role_defaults_to_user() {
        let json = r#"{"id":"u","email":"a@b.co","name":"A","created_at":"2024-01-15T10:00:00Z"}"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.role, Role::User);
    }
}
