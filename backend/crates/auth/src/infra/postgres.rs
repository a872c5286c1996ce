//! PostgreSQL Repository Implementation

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::{credential::Credential, user::User};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    auth_provider::AuthProvider, email::Email, full_name::FullName,
    student_number::StudentNumber, user_id::UserId, user_name::UserName,
    user_password::UserPassword, user_role::UserRole,
};
use crate::error::{AuthError, AuthResult, UniqueField};

/// Unique violation
/// https://www.postgresql.org/docs/current/errcodes-appendix.html
const UNIQUE_VIOLATION: &str = "23505";

const USER_COLUMNS: &str = r#"
    user_id,
    full_name,
    email,
    user_name,
    student_number,
    user_role,
    auth_provider,
    created_at,
    updated_at
"#;

/// PostgreSQL-backed user repository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl UserRepository for PgUserRepository {
    async fn create(&self, user: &User, credential: &Credential) -> AuthResult<()> {
        sqlx::query(
            r#"
            INSERT INTO users (
                user_id,
                full_name,
                email,
                user_name,
                user_name_canonical,
                student_number,
                user_role,
                auth_provider,
                password_hash,
                google_id,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(user.user_id.as_uuid())
        .bind(user.full_name.as_str())
        .bind(user.email.as_str())
        .bind(user.user_name.original())
        .bind(user.user_name.canonical())
        .bind(user.student_number.as_str())
        .bind(user.user_role.code())
        .bind(user.auth_provider.code())
        .bind(credential.password_hash.as_ref().map(UserPassword::as_phc_string))
        .bind(credential.google_id.as_deref())
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_insert_error)?;

        Ok(())
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE user_id = $1"
        ))
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(UserRow::into_user).transpose()
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(UserRow::into_user).transpose()
    }

    async fn find_credential(&self, user_id: &UserId) -> AuthResult<Option<Credential>> {
        let row = sqlx::query_as::<_, CredentialRow>(
            "SELECT user_id, password_hash, google_id FROM users WHERE user_id = $1",
        )
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(CredentialRow::into_credential))
    }

    async fn list(&self, role: Option<UserRole>) -> AuthResult<Vec<User>> {
        let rows = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            SELECT {USER_COLUMNS}
            FROM users
            WHERE ($1::TEXT IS NULL OR user_role = $1)
            ORDER BY created_at DESC
            "#
        ))
        .bind(role.map(|r| r.code()))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(UserRow::into_user).collect()
    }
}

/// Map a unique violation to the colliding field
fn map_insert_error(err: sqlx::Error) -> AuthError {
    let field = match &err {
        sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) => {
            db_err.constraint().and_then(UniqueField::from_constraint)
        }
        _ => None,
    };

    match field {
        Some(field) => AuthError::Duplicate(field),
        None => AuthError::Database(err),
    }
}

// ============================================================================
// Row types
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    user_id: Uuid,
    full_name: String,
    email: String,
    user_name: String,
    student_number: String,
    user_role: String,
    auth_provider: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> AuthResult<User> {
        let user_role = self
            .user_role
            .parse::<UserRole>()
            .map_err(|e| AuthError::Internal(e.to_string()))?;
        let auth_provider = self
            .auth_provider
            .parse::<AuthProvider>()
            .map_err(AuthError::Internal)?;

        Ok(User {
            user_id: UserId::from_uuid(self.user_id),
            full_name: FullName::from_db(self.full_name),
            email: Email::from_db(self.email),
            user_name: UserName::from_db(self.user_name),
            student_number: StudentNumber::from_db(self.student_number),
            user_role,
            auth_provider,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct CredentialRow {
    user_id: Uuid,
    password_hash: Option<String>,
    google_id: Option<String>,
}

impl CredentialRow {
    /// An unreadable stored hash becomes `None`, so it never matches
    fn into_credential(self) -> Credential {
        let user_id = UserId::from_uuid(self.user_id);
        let password_hash = self.password_hash.and_then(|phc| {
            UserPassword::from_phc_string(phc)
                .inspect_err(|e| {
                    tracing::error!(%user_id, error = %e, "Stored password hash is unparsable");
                })
                .ok()
        });

        Credential {
            user_id,
            password_hash,
            google_id: self.google_id,
        }
    }
}
