//! User Entity
//!
//! Account profile. Carries no secret material; the password hash and
//! federated id live in [`Credential`](super::credential::Credential).

use chrono::{DateTime, Utc};

use crate::domain::value_object::{
    auth_provider::AuthProvider, email::Email, full_name::FullName,
    student_number::StudentNumber, user_id::UserId, user_name::UserName, user_role::UserRole,
};

/// User entity
#[derive(Debug, Clone)]
pub struct User {
    /// Internal UUID identifier (also the token subject)
    pub user_id: UserId,
    pub full_name: FullName,
    /// Unique, lower-cased
    pub email: Email,
    /// Unique (case-insensitive)
    pub user_name: UserName,
    /// Unique, upper-cased
    pub student_number: StudentNumber,
    /// Admin, Consultant or Student
    pub user_role: UserRole,
    /// How the account signs in
    pub auth_provider: AuthProvider,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user
    pub fn new(
        full_name: FullName,
        email: Email,
        user_name: UserName,
        student_number: StudentNumber,
        user_role: UserRole,
        auth_provider: AuthProvider,
    ) -> Self {
        let now = Utc::now();

        Self {
            user_id: UserId::new(),
            full_name,
            email,
            user_name,
            student_number,
            user_role,
            auth_provider,
            created_at: now,
            updated_at: now,
        }
    }
}
