use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgExecutor};
use time::OffsetDateTime;

use crate::error::AppError;

/// User row in the database. `id` and both timestamps are store-assigned;
/// the hash is opaque to everything above this module and never serialized.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Client-settable fields of a new row. The caller hashes the credential
/// before this struct exists.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: String,
}

// Every query runs against `impl PgExecutor`, so the same body serves the
// ambient pool and a live transaction. Opening and closing the unit of
// work is the caller's job.
impl User {
    pub async fn insert<'e>(db: impl PgExecutor<'e>, new: &NewUser) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, first_name, last_name, password_hash)
            VALUES ($1, $2, $3, $4)
            RETURNING id, email, first_name, last_name, password_hash, created_at, updated_at
            "#,
        )
        .bind(&new.email)
        .bind(&new.first_name)
        .bind(&new.last_name)
        .bind(&new.password_hash)
        .fetch_one(db)
        .await
        .map_err(|e| AppError::persistence("insert user", e))
    }

    pub async fn find_by_id<'e>(db: impl PgExecutor<'e>, id: i64) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, first_name, last_name, password_hash, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await
        .map_err(|e| AppError::persistence("select user by id", e))?
        .ok_or_else(|| AppError::user_not_found(id))
    }

    /// Caller normalizes case and whitespace before this lookup.
    pub async fn find_by_email<'e>(db: impl PgExecutor<'e>, email: &str) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, first_name, last_name, password_hash, created_at, updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(db)
        .await
        .map_err(|e| AppError::persistence("select user by email", e))?
        .ok_or_else(|| AppError::NotFound(format!("user {email}")))
    }

    /// Ordered by ascending id so two identical calls against an unmodified
    /// table return identical sequences. An offset past the end yields an
    /// empty vec, not an error.
    pub async fn list<'e>(
        db: impl PgExecutor<'e>,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<User>, AppError> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, first_name, last_name, password_hash, created_at, updated_at
            FROM users
            ORDER BY id ASC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(db)
        .await
        .map_err(|e| AppError::persistence("list users", e))
    }

    pub async fn count<'e>(db: impl PgExecutor<'e>) -> Result<i64, AppError> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(db)
            .await
            .map_err(|e| AppError::persistence("count users", e))
    }

    /// Writes the mutable fields and refreshes `updated_at`. Id and email
    /// are immutable through this path.
    pub async fn update<'e>(db: impl PgExecutor<'e>, user: &User) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET first_name = $2, last_name = $3, password_hash = $4, updated_at = now()
            WHERE id = $1
            RETURNING id, email, first_name, last_name, password_hash, created_at, updated_at
            "#,
        )
        .bind(user.id)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.password_hash)
        .fetch_optional(db)
        .await
        .map_err(|e| AppError::persistence("update user", e))?
        .ok_or_else(|| AppError::user_not_found(user.id))
    }

    /// Removing an already-absent id reports `NotFound`, never success.
    pub async fn delete<'e>(db: impl PgExecutor<'e>, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .map_err(|e| AppError::persistence("delete user", e))?;

        if result.rows_affected() == 0 {
            return Err(AppError::user_not_found(id));
        }
        Ok(())
    }
}
