//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::access::UserRole;
use kernel::error::conversions::violated_unique_constraint;
use kernel::id::UserId;
use kernel::query::contains_pattern;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    confirmation_code::ConfirmationDigest, email::Email, profile::Profile, user_name::UserName,
};
use crate::error::{AuthError, AuthResult};

const USERNAME_KEY: &str = "users_username_key";
const EMAIL_KEY: &str = "users_email_key";

const USER_COLUMNS: &str = r#"
    id,
    username,
    email,
    role,
    is_superuser,
    confirmation_digest,
    first_name,
    last_name,
    bio,
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

    async fn find_one(&self, predicate: &str, value: &str) -> AuthResult<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE {predicate} = $1");
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(value)
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| r.into_user()).transpose()
    }
}

/// Lost uniqueness races surface as the same error the pre-check gives
fn map_write_error(err: sqlx::Error) -> AuthError {
    match violated_unique_constraint(&err) {
        Some(USERNAME_KEY) => AuthError::UserNameTaken,
        Some(EMAIL_KEY) => AuthError::EmailTaken,
        _ => AuthError::Database(err),
    }
}

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for PgUserRepository {
    async fn create(&self, user: &User) -> AuthResult<()> {
        sqlx::query(
            r#"
            INSERT INTO users (
                id,
                username,
                email,
                role,
                is_superuser,
                confirmation_digest,
                first_name,
                last_name,
                bio,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(user.user_id.as_uuid())
        .bind(user.user_name.as_str())
        .bind(user.email.as_str())
        .bind(user.role.id())
        .bind(user.is_superuser)
        .bind(user.confirmation_digest.as_ref().map(|d| d.as_bytes()))
        .bind(&user.profile.first_name)
        .bind(&user.profile.last_name)
        .bind(&user.profile.bio)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_write_error)?;

        Ok(())
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(user_id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn find_by_user_name(&self, user_name: &UserName) -> AuthResult<Option<User>> {
        self.find_one("username", user_name.as_str()).await
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        self.find_one("email", email.as_str()).await
    }

    async fn list(&self, search: Option<&str>) -> AuthResult<Vec<User>> {
        let sql = format!(
            "SELECT {USER_COLUMNS} FROM users
             WHERE $1::TEXT IS NULL OR username ILIKE $1
             ORDER BY created_at, id"
        );
        let rows = sqlx::query_as::<_, UserRow>(&sql)
            .bind(search.map(contains_pattern))
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(|r| r.into_user()).collect()
    }

    async fn update(&self, user: &User) -> AuthResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE users SET
                username = $2,
                email = $3,
                role = $4,
                is_superuser = $5,
                confirmation_digest = $6,
                first_name = $7,
                last_name = $8,
                bio = $9,
                updated_at = $10
            WHERE id = $1
            "#,
        )
        .bind(user.user_id.as_uuid())
        .bind(user.user_name.as_str())
        .bind(user.email.as_str())
        .bind(user.role.id())
        .bind(user.is_superuser)
        .bind(user.confirmation_digest.as_ref().map(|d| d.as_bytes()))
        .bind(&user.profile.first_name)
        .bind(&user.profile.last_name)
        .bind(&user.profile.bio)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_write_error)?;

        if result.rows_affected() == 0 {
            return Err(AuthError::UserNotFound);
        }
        Ok(())
    }

    async fn delete(&self, user_id: &UserId) -> AuthResult<()> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user_id.as_uuid())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AuthError::UserNotFound);
        }
        Ok(())
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    username: String,
    email: String,
    role: i16,
    is_superuser: bool,
    confirmation_digest: Option<Vec<u8>>,
    first_name: String,
    last_name: String,
    bio: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> AuthResult<User> {
        let role = UserRole::from_id(self.role)
            .ok_or_else(|| AuthError::Internal(format!("Invalid role id: {}", self.role)))?;

        let confirmation_digest = match self.confirmation_digest {
            Some(bytes) => Some(ConfirmationDigest::from_db(&bytes).ok_or_else(|| {
                AuthError::Internal("Invalid confirmation digest length".to_string())
            })?),
            None => None,
        };

        Ok(User {
            user_id: UserId::from_uuid(self.id),
            user_name: UserName::from_db(self.username),
            email: Email::from_db(self.email),
            role,
            is_superuser: self.is_superuser,
            confirmation_digest,
            profile: Profile {
                first_name: self.first_name,
                last_name: self.last_name,
                bio: self.bio,
            },
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
