//! In-Memory Repository Implementation
//!
//! Process-local user store for tests and database-less local runs.
//! State is owned by the value (no globals); clones share the same data.

use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entity::{credential::Credential, user::User};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{email::Email, user_id::UserId, user_role::UserRole};
use crate::error::{AuthError, AuthResult, UniqueField};

#[derive(Debug, Clone)]
struct StoredUser {
    user: User,
    credential: Credential,
}

impl StoredUser {
    fn collides_with(&self, user: &User, credential: &Credential) -> Option<UniqueField> {
        if self.user.email == user.email {
            Some(UniqueField::Email)
        } else if self.user.user_name.canonical() == user.user_name.canonical() {
            Some(UniqueField::Username)
        } else if self.user.student_number == user.student_number {
            Some(UniqueField::StudentNumber)
        } else if credential.google_id.is_some()
            && self.credential.google_id == credential.google_id
        {
            Some(UniqueField::GoogleId)
        } else {
            None
        }
    }
}

/// In-memory user repository
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserRepository {
    // Insertion order
    users: Arc<RwLock<Vec<StoredUser>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove a user. Returns whether a record was deleted.
    pub async fn remove(&self, user_id: &UserId) -> bool {
        let mut users = self.users.write().await;
        let before = users.len();
        users.retain(|stored| stored.user.user_id != *user_id);
        before != users.len()
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: &User, credential: &Credential) -> AuthResult<()> {
        // Check and insert under one write lock
        let mut users = self.users.write().await;

        if let Some(field) = users.iter().find_map(|stored| stored.collides_with(user, credential)) {
            return Err(AuthError::Duplicate(field));
        }

        users.push(StoredUser {
            user: user.clone(),
            credential: credential.clone(),
        });

        Ok(())
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        let users = self.users.read().await;

        Ok(users
            .iter()
            .find(|stored| stored.user.user_id == *user_id)
            .map(|stored| stored.user.clone()))
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        let users = self.users.read().await;

        Ok(users
            .iter()
            .find(|stored| stored.user.email == *email)
            .map(|stored| stored.user.clone()))
    }

    async fn find_credential(&self, user_id: &UserId) -> AuthResult<Option<Credential>> {
        let users = self.users.read().await;

        Ok(users
            .iter()
            .find(|stored| stored.user.user_id == *user_id)
            .map(|stored| stored.credential.clone()))
    }

    async fn list(&self, role: Option<UserRole>) -> AuthResult<Vec<User>> {
        let users = self.users.read().await;

        let mut listed: Vec<User> = users
            .iter()
            .rev()
            .filter(|stored| role.is_none_or(|r| stored.user.user_role == r))
            .map(|stored| stored.user.clone())
            .collect();
        // Stable: ties keep newest-inserted first
        listed.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(listed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::{
        auth_provider::AuthProvider,
        full_name::FullName,
        student_number::StudentNumber,
        user_name::UserName,
        user_password::{RawPassword, UserPassword},
    };

    fn user(email: &str, user_name: &str, student_number: &str, role: UserRole) -> User {
        User::new(
            FullName::new("Test Student").unwrap(),
            Email::new(email).unwrap(),
            UserName::new(user_name).unwrap(),
            StudentNumber::new(student_number).unwrap(),
            role,
            AuthProvider::Local,
        )
    }

    fn credential(user: &User) -> Credential {
        let raw = RawPassword::new("Gentle-Stream-64".to_string()).unwrap();
        Credential::local(user.user_id, UserPassword::from_raw(&raw, None).unwrap())
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let repo = InMemoryUserRepository::new();
        let alice = user("alice@example.edu", "alice", "S-1", UserRole::Student);
        repo.create(&alice, &credential(&alice)).await.unwrap();

        let found = repo.find_by_id(&alice.user_id).await.unwrap().unwrap();
        assert_eq!(found.email, alice.email);

        let by_email = repo
            .find_by_email(&Email::new("ALICE@example.edu").unwrap())
            .await
            .unwrap();
        assert!(by_email.is_some());

        let cred = repo.find_credential(&alice.user_id).await.unwrap().unwrap();
        assert!(cred.matches("Gentle-Stream-64", None));
    }

    #[tokio::test]
    async fn test_duplicates_rejected_and_first_kept() {
        let repo = InMemoryUserRepository::new();
        let first = user("first@example.edu", "first", "S-1", UserRole::Student);
        repo.create(&first, &credential(&first)).await.unwrap();

        let cases = [
            (user("first@example.edu", "other", "S-2", UserRole::Student), UniqueField::Email),
            (user("x@example.edu", "FIRST", "S-3", UserRole::Student), UniqueField::Username),
            (user("y@example.edu", "third", "s-1", UserRole::Student), UniqueField::StudentNumber),
        ];

        for (dup, field) in cases {
            let err = repo.create(&dup, &credential(&dup)).await.unwrap_err();
            assert!(matches!(err, AuthError::Duplicate(f) if f == field));
        }

        let federated = user("z@example.edu", "zed", "S-4", UserRole::Student);
        let linked = Credential::google(federated.user_id, "google-sub-1");
        repo.create(&federated, &linked).await.unwrap();

        let twin = user("w@example.edu", "wes", "S-5", UserRole::Student);
        let err = repo
            .create(&twin, &Credential::google(twin.user_id, "google-sub-1"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::Duplicate(UniqueField::GoogleId)));

        assert_eq!(repo.len().await, 2);
        let kept = repo.find_by_id(&first.user_id).await.unwrap().unwrap();
        assert_eq!(kept.user_name.original(), "first");
    }

    #[tokio::test]
    async fn test_remove() {
        let repo = InMemoryUserRepository::new();
        let gone = user("gone@example.edu", "gone", "S-9", UserRole::Student);
        repo.create(&gone, &credential(&gone)).await.unwrap();

        assert!(repo.remove(&gone.user_id).await);
        assert!(!repo.remove(&gone.user_id).await);
        assert!(repo.find_by_id(&gone.user_id).await.unwrap().is_none());
        assert!(repo.is_empty().await);
    }

    #[tokio::test]
    async fn test_list_filters_by_role_newest_first() {
        let repo = InMemoryUserRepository::new();
        let a = user("a@example.edu", "user_a", "S-1", UserRole::Student);
        let b = user("b@example.edu", "user_b", "S-2", UserRole::Consultant);
        let c = user("c@example.edu", "user_c", "S-3", UserRole::Student);
        for u in [&a, &b, &c] {
            repo.create(u, &credential(u)).await.unwrap();
        }

        let all = repo.list(None).await.unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].user_id, c.user_id);

        let students = repo.list(Some(UserRole::Student)).await.unwrap();
        let ids: Vec<_> = students.iter().map(|u| u.user_id).collect();
        assert_eq!(ids, vec![c.user_id, a.user_id]);
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let repo = InMemoryUserRepository::new();
        let shared = repo.clone();
        let u = user("share@example.edu", "share", "S-5", UserRole::Admin);
        repo.create(&u, &credential(&u)).await.unwrap();

        assert_eq!(shared.len().await, 1);
    }
}
