use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::database::Database;
use crate::error::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

impl FromStr for Role {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Role::User),
            "admin" => Ok(Role::Admin),
            _ => Err(()),
        }
    }
}

/// A registered account. Deliberately not `Serialize`: everything that goes
/// over the wire passes through [`UserResponse`], which has no hash field.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub phone: String,
    pub role: Role,
    pub is_active: bool,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The public shape of an account.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub role: Role,
    pub is_active: bool,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        UserResponse {
            id: user.id,
            name: user.name,
            email: user.email,
            phone: user.phone,
            role: user.role,
            is_active: user.is_active,
            last_login: user.last_login,
            created_at: user.created_at,
        }
    }
}

/// Canonical form for stored emails: trimmed and lowercased. Applied to
/// account emails and booking guest emails alike, so ownership comparisons
/// are plain equality.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Bcrypt at the default cost, moved off the async executor.
pub async fn hash_password(password: &str) -> Result<String, ApiError> {
    let password = password.to_owned();
    let hash = tokio::task::spawn_blocking(move || bcrypt::hash(password, bcrypt::DEFAULT_COST))
        .await
        .map_err(|e| ApiError::Internal(anyhow::Error::new(e).context("password hashing task failed")))??;
    Ok(hash)
}

impl User {
    pub async fn verify_password(&self, password: &str) -> Result<bool, ApiError> {
        let password = password.to_owned();
        let hash = self.password_hash.clone();
        let ok = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
            .await
            .map_err(|e| {
                ApiError::Internal(anyhow::Error::new(e).context("password check task failed"))
            })??;
        Ok(ok)
    }

    pub async fn find_by_email(email: &str, db: &Database) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(normalize_email(email))
            .fetch_optional(&db.pool)
            .await
    }

    pub async fn find_by_id(id: Uuid, db: &Database) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&db.pool)
            .await
    }

    /// Duplicate-email check, optionally ignoring one account (the account
    /// being edited keeps its own address).
    pub async fn email_taken(
        email: &str,
        exclude: Option<Uuid>,
        db: &Database,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE email = $1 AND ($2::uuid IS NULL OR id <> $2))",
        )
        .bind(normalize_email(email))
        .bind(exclude)
        .fetch_one(&db.pool)
        .await
    }

    /// Insert a new account with the default role. The unique index on
    /// `email` backstops the pre-insert duplicate check under races.
    pub async fn create(
        name: &str,
        email: &str,
        password_hash: &str,
        db: &Database,
    ) -> Result<User, ApiError> {
        let result = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(normalize_email(email))
        .bind(password_hash)
        .fetch_one(&db.pool)
        .await;

        match result {
            Ok(user) => Ok(user),
            Err(sqlx::Error::Database(e)) if e.code().as_deref() == Some("23505") => {
                Err(ApiError::BadRequest("User already exists".to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    pub async fn touch_last_login(id: Uuid, db: &Database) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE users SET last_login = now() WHERE id = $1")
            .bind(id)
            .execute(&db.pool)
            .await?;
        Ok(())
    }

    pub async fn set_password(id: Uuid, password_hash: &str, db: &Database) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE users SET password_hash = $2 WHERE id = $1")
            .bind(id)
            .bind(password_hash)
            .execute(&db.pool)
            .await?;
        Ok(())
    }

    /// Partial update; `None` keeps the current value. Emails are stored in
    /// canonical form by the callers.
    pub async fn update_fields(
        id: Uuid,
        name: Option<&str>,
        phone: Option<&str>,
        email: Option<&str>,
        role: Option<Role>,
        is_active: Option<bool>,
        db: &Database,
    ) -> Result<Option<User>, ApiError> {
        let result = sqlx::query_as::<_, User>(
            r#"
            UPDATE users SET
                name = COALESCE($2, name),
                phone = COALESCE($3, phone),
                email = COALESCE($4, email),
                role = COALESCE($5, role),
                is_active = COALESCE($6, is_active)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(phone)
        .bind(email)
        .bind(role)
        .bind(is_active)
        .fetch_optional(&db.pool)
        .await;

        match result {
            Ok(user) => Ok(user),
            Err(sqlx::Error::Database(e)) if e.code().as_deref() == Some("23505") => {
                Err(ApiError::BadRequest("Email already in use".to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    pub async fn set_active(
        id: Uuid,
        is_active: bool,
        db: &Database,
    ) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>("UPDATE users SET is_active = $2 WHERE id = $1 RETURNING *")
            .bind(id)
            .bind(is_active)
            .fetch_optional(&db.pool)
            .await
    }

    pub async fn delete(id: Uuid, db: &Database) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&db.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Newest first, with an optional case-insensitive name/email filter.
    pub async fn list(
        search: &str,
        limit: i64,
        offset: i64,
        db: &Database,
    ) -> Result<Vec<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT * FROM users
            WHERE ($1 = '' OR name ILIKE '%' || $1 || '%' OR email ILIKE '%' || $1 || '%')
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(search)
        .bind(limit)
        .bind(offset)
        .fetch_all(&db.pool)
        .await
    }

    pub async fn count(search: &str, db: &Database) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM users
            WHERE ($1 = '' OR name ILIKE '%' || $1 || '%' OR email ILIKE '%' || $1 || '%')
            "#,
        )
        .bind(search)
        .fetch_one(&db.pool)
        .await
    }
}
