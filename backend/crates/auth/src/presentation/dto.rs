//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use kernel::validation::RequiredFields;
use serde::{Deserialize, Serialize};

use crate::domain::entity::user::User;
use crate::domain::value_object::{auth_provider::AuthProvider, user_role::UserRole};

// ============================================================================
// Register
// ============================================================================

/// Register request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub full_name: String,
    pub email: String,
    pub username: String,
    pub student_number: String,
    pub password: String,
    /// Defaults to Student
    #[serde(default)]
    pub role: Option<UserRole>,
}

impl RequiredFields for RegisterRequest {
    const REQUIRED_FIELDS: &'static [&'static str] =
        &["fullName", "email", "username", "studentNumber", "password"];
}

// ============================================================================
// Login
// ============================================================================

/// Login request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl RequiredFields for LoginRequest {
    const REQUIRED_FIELDS: &'static [&'static str] = &["email", "password"];
}

// ============================================================================
// Responses
// ============================================================================

/// Register / login response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserResponse,
}

/// Public user profile. Never carries the password hash or Google id.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub username: String,
    pub student_number: String,
    pub role: UserRole,
    pub auth_provider: AuthProvider,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.user_id.to_string(),
            full_name: user.full_name.as_str().to_string(),
            email: user.email.as_str().to_string(),
            username: user.user_name.original().to_string(),
            student_number: user.student_number.as_str().to_string(),
            role: user.user_role,
            auth_provider: user.auth_provider,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

// ============================================================================
// List Users
// ============================================================================

/// `GET /api/users` query string
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListUsersQuery {
    pub role: Option<UserRole>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::{
        email::Email, full_name::FullName, student_number::StudentNumber, user_name::UserName,
    };

    #[test]
    fn test_user_response_shape() {
        let user = User::new(
            FullName::new("Grace Hopper").unwrap(),
            Email::new("grace@example.edu").unwrap(),
            UserName::new("Grace_H").unwrap(),
            StudentNumber::new("cs-42").unwrap(),
            UserRole::Consultant,
            AuthProvider::Local,
        );

        let json = serde_json::to_value(UserResponse::from(&user)).unwrap();
        let object = json.as_object().unwrap();

        let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            vec![
                "authProvider",
                "createdAt",
                "email",
                "fullName",
                "id",
                "role",
                "studentNumber",
                "updatedAt",
                "username",
            ]
        );
        assert_eq!(json["role"], "Consultant");
        assert_eq!(json["authProvider"], "local");
        assert_eq!(json["username"], "Grace_H");
        assert_eq!(json["studentNumber"], "CS-42");
    }

    #[test]
    fn test_register_role_defaults_to_none() {
        let req: RegisterRequest = serde_json::from_value(serde_json::json!({
            "fullName": "A B",
            "email": "a@b.co",
            "username": "abc",
            "studentNumber": "1",
            "password": "Long-Enough-1"
        }))
        .unwrap();
        assert!(req.role.is_none());
    }
}
